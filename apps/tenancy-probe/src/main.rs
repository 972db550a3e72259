use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use topic_tenancy::{PatternTenantResolver, TenancyPlugin, TopicTenancyConfig};
use topic_tenancy_sdk::{
    BrokerEvent, ClientSession, ConnectEvent, MessageEvent, SubscribeEvent, TenancyError,
    TenantResolver, UnsubscribeEvent,
};
use tracing_subscriber::EnvFilter;

/// Topic tenancy probe - shows how the tenancy hooks rewrite client ids,
/// topics and filters under a given configuration
#[derive(Parser)]
#[command(name = "tenancy-probe")]
#[command(about = "Shows how topic tenancy rewrites client ids, topics and filters")]
#[command(version)]
struct Cli {
    /// Path to configuration file (YAML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Log output format on stderr
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the configuration and print the effective capture pattern
    Check,
    /// Print the tenant derived from a username
    Tenant {
        /// Username as presented by the client
        username: String,
    },
    /// Print the client id after the connect hook
    Connect {
        /// Client id as presented by the client
        client_id: String,
        #[command(flatten)]
        client: ClientArgs,
    },
    /// Print the topic the broker routes after the publish hook
    Publish {
        /// Topic as seen by the broker before the hook
        topic: String,
        #[command(flatten)]
        client: ClientArgs,
    },
    /// Print the topic the client receives after the delivery hook
    Deliver {
        /// Topic as routed by the broker
        topic: String,
        #[command(flatten)]
        client: ClientArgs,
    },
    /// Print the filter the broker registers after the subscribe hook
    Subscribe {
        /// Topic filter as requested by the client
        filter: String,
        #[command(flatten)]
        client: ClientArgs,
    },
    /// Print the filter the broker deregisters after the unsubscribe hook
    Unsubscribe {
        /// Topic filter as requested by the client
        filter: String,
        #[command(flatten)]
        client: ClientArgs,
    },
}

#[derive(Args)]
struct ClientArgs {
    /// Authenticated username; omit for an anonymous client
    #[arg(short, long)]
    username: Option<String>,
}

impl ClientArgs {
    fn session(&self, client_id: &str) -> ClientSession {
        ClientSession::new(client_id, self.username.clone())
    }
}

const PROBE_CLIENT_ID: &str = "probe";

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_format);

    let config = TopicTenancyConfig::load(cli.config.as_deref())?;
    tracing::debug!(regex = %config.regex, "Loaded configuration");

    let output = run(&cli.command, &config)?;
    println!("{output}");
    Ok(())
}

/// `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8, format: LogFormat) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match format {
        LogFormat::Text => builder.with_target(false).init(),
        LogFormat::Json => builder.json().init(),
    }
}

fn run(command: &Commands, config: &TopicTenancyConfig) -> Result<String> {
    let plugin = || TenancyPlugin::init(config).context("invalid tenancy configuration");
    match command {
        Commands::Check => {
            plugin()?;
            let resolver = PatternTenantResolver::new(&config.regex)?;
            Ok(format!("Configuration is valid\nregex: {}", resolver.pattern()))
        }
        Commands::Tenant { username } => {
            let resolver = PatternTenantResolver::new(&config.regex)?;
            let tenant = resolver.resolve(username)?;
            Ok(match tenant {
                Some(tenant) => tenant.to_string(),
                None => "no tenant".to_owned(),
            })
        }
        Commands::Connect { client_id, client } => {
            let mut session = client.session(client_id);
            plugin()?
                .handle(BrokerEvent::Connect(&mut ConnectEvent::new(&mut session)))
                .map_err(rejected)?;
            Ok(session.id().to_owned())
        }
        Commands::Publish { topic, client } => {
            let session = client.session(PROBE_CLIENT_ID);
            let mut event = MessageEvent::new(&session, topic);
            plugin()?
                .handle(BrokerEvent::MessageIn(&mut event))
                .map_err(rejected)?;
            Ok(event.topic.into_owned())
        }
        Commands::Deliver { topic, client } => {
            let session = client.session(PROBE_CLIENT_ID);
            let mut event = MessageEvent::new(&session, topic);
            plugin()?
                .handle(BrokerEvent::MessageOut(&mut event))
                .map_err(rejected)?;
            Ok(event.topic.into_owned())
        }
        Commands::Subscribe { filter, client } => {
            let session = client.session(PROBE_CLIENT_ID);
            let mut event = SubscribeEvent::new(&session, filter);
            plugin()?
                .handle(BrokerEvent::Subscribe(&mut event))
                .map_err(rejected)?;
            Ok(event.topic_filter.into_owned())
        }
        Commands::Unsubscribe { filter, client } => {
            let session = client.session(PROBE_CLIENT_ID);
            let mut event = UnsubscribeEvent::new(&session, filter);
            plugin()?
                .handle(BrokerEvent::Unsubscribe(&mut event))
                .map_err(rejected)?;
            Ok(event.topic_filter.into_owned())
        }
    }
}

fn rejected(e: TenancyError) -> anyhow::Error {
    if e.is_per_event() {
        anyhow::Error::new(e).context("the broker would reject this event")
    } else {
        e.into()
    }
}
