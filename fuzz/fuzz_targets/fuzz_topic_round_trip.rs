#![no_main]

use libfuzzer_sys::fuzz_target;
use topic_tenancy::{TenancyPlugin, TopicTenancyConfig};
use topic_tenancy_sdk::{ClientSession, MessageEvent};

// Input: "<username>\n<topic>". Publish then deliver must return the topic
// for every client, tenant or not.
fuzz_target!(|data: &[u8]| {
    if data.len() > 1024 {
        return;
    }
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let Some((username, topic)) = s.split_once('\n') else {
        return;
    };
    if topic.is_empty() {
        return;
    }

    let plugin = TenancyPlugin::init(&TopicTenancyConfig::default()).unwrap();
    let hooks = plugin.hooks();
    let client = ClientSession::new("fuzz", Some(username.to_owned()));

    let mut publish = MessageEvent::new(&client, topic);
    hooks.on_message_in(&mut publish).unwrap();
    let routed = publish.topic.into_owned();

    let mut deliver = MessageEvent::new(&client, &routed);
    hooks.on_message_out(&mut deliver).unwrap();
    assert_eq!(deliver.topic, topic);
});
