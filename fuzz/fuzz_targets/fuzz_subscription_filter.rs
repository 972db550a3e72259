#![no_main]

use libfuzzer_sys::fuzz_target;
use topic_tenancy::{TenancyPlugin, TopicTenancyConfig};
use topic_tenancy_sdk::{ClientSession, SubscribeEvent, TenancyError, UnsubscribeEvent};

fuzz_target!(|data: &[u8]| {
    if data.len() > 1024 {
        return;
    }
    let Ok(filter) = std::str::from_utf8(data) else {
        return;
    };

    let plugin = TenancyPlugin::init(&TopicTenancyConfig::default()).unwrap();
    let hooks = plugin.hooks();
    let client = ClientSession::new("fuzz", Some("user@bar".to_owned()));

    let mut sub = SubscribeEvent::new(&client, filter);
    let mut unsub = UnsubscribeEvent::new(&client, filter);
    match (hooks.on_subscribe(&mut sub), hooks.on_unsubscribe(&mut unsub)) {
        (Ok(()), Ok(())) => {
            assert_eq!(sub.topic_filter, unsub.topic_filter);
            let scoped = sub.topic_filter.as_ref();
            if let Some(rest) = filter.strip_prefix("$share/") {
                let (group, inner) = rest.split_once('/').unwrap();
                assert_eq!(scoped, format!("$share/{group}/bar/{inner}"));
            } else {
                assert_eq!(scoped, format!("bar/{filter}"));
            }
        }
        (Err(TenancyError::InvalidSharedFilter { .. }), Err(TenancyError::InvalidSharedFilter { .. })) => {
            assert!(filter.starts_with("$share/"));
        }
        (a, b) => panic!("subscribe and unsubscribe disagree: {a:?} vs {b:?}"),
    }
});
