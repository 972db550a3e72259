//! Local (in-process) client for the topic tenancy hooks.

use std::sync::Arc;

use topic_tenancy_sdk::{
    ConnectEvent, EventKind, MessageEvent, SubscribeEvent, TenancyError, TenancyHooks,
    UnsubscribeEvent,
};

use super::{DomainError, Service};
use crate::telemetry::WarnThrottle;

/// Local client wrapping the tenancy service.
///
/// Handed to the broker adapter as `Arc<dyn TenancyHooks>` by
/// [`TenancyPlugin`](crate::TenancyPlugin).
pub struct TenancyLocalClient {
    svc: Arc<Service>,
    rejected_log: WarnThrottle,
}

impl TenancyLocalClient {
    #[must_use]
    pub fn new(svc: Arc<Service>) -> Self {
        Self {
            svc,
            rejected_log: WarnThrottle::default(),
        }
    }

    fn log_and_convert(&self, event: EventKind, client_id: &str, e: DomainError) -> TenancyError {
        if let Some(suppressed) = self.rejected_log.permit(event) {
            tracing::warn!(%event, client_id, error = %e, suppressed, "Rejecting broker event");
        }
        e.into()
    }
}

impl TenancyHooks for TenancyLocalClient {
    fn on_connect(&self, event: &mut ConnectEvent<'_>) -> Result<(), TenancyError> {
        self.svc
            .connect(event.client)
            .map_err(|e| self.log_and_convert(EventKind::Connect, event.client.id(), e))
    }

    fn on_message_in(&self, event: &mut MessageEvent<'_>) -> Result<(), TenancyError> {
        self.svc
            .message_in(event.client, &mut event.topic)
            .map_err(|e| self.log_and_convert(EventKind::MessageIn, event.client.id(), e))
    }

    fn on_message_out(&self, event: &mut MessageEvent<'_>) -> Result<(), TenancyError> {
        self.svc
            .message_out(event.client, &mut event.topic)
            .map_err(|e| self.log_and_convert(EventKind::MessageOut, event.client.id(), e))
    }

    fn on_subscribe(&self, event: &mut SubscribeEvent<'_>) -> Result<(), TenancyError> {
        self.svc
            .subscription(event.client, &mut event.topic_filter)
            .map_err(|e| self.log_and_convert(EventKind::Subscribe, event.client.id(), e))
    }

    fn on_unsubscribe(&self, event: &mut UnsubscribeEvent<'_>) -> Result<(), TenancyError> {
        self.svc
            .subscription(event.client, &mut event.topic_filter)
            .map_err(|e| self.log_and_convert(EventKind::Unsubscribe, event.client.id(), e))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_CAPTURE_PATTERN;
    use crate::domain::{PatternTenantResolver, RegexShareSplitter};
    use topic_tenancy_sdk::ClientSession;
    use tracing_test::traced_test;

    fn local_client() -> TenancyLocalClient {
        TenancyLocalClient::new(Arc::new(Service::new(
            Arc::new(PatternTenantResolver::new(DEFAULT_CAPTURE_PATTERN).unwrap()),
            Arc::new(RegexShareSplitter::new().unwrap()),
        )))
    }

    fn count_lines(lines: &[&str], needle: &str) -> usize {
        lines.iter().filter(|l| l.contains(needle)).count()
    }

    #[test]
    #[traced_test]
    fn repeated_rejections_log_once() {
        let hooks = local_client();
        let c = ClientSession::new("client1", Some("a@bar".to_owned()));
        for _ in 0..3 {
            let mut event = SubscribeEvent::new(&c, "$share/g1");
            let err = hooks.on_subscribe(&mut event).unwrap_err();
            assert!(matches!(err, TenancyError::InvalidSharedFilter { .. }));
        }
        assert!(logs_contain("Rejecting broker event"));
        logs_assert(|lines: &[&str]| {
            match count_lines(lines, "Rejecting broker event") {
                1 => Ok(()),
                n => Err(format!("expected 1 warning, got {n}")),
            }
        });
    }

    #[test]
    #[traced_test]
    fn subscribe_flood_does_not_hide_unsubscribe_rejection() {
        let hooks = local_client();
        let c = ClientSession::new("client1", Some("a@bar".to_owned()));
        for _ in 0..5 {
            let mut event = SubscribeEvent::new(&c, "$share/g1");
            assert!(hooks.on_subscribe(&mut event).is_err());
        }
        let mut event = UnsubscribeEvent::new(&c, "$share//x");
        assert!(hooks.on_unsubscribe(&mut event).is_err());

        logs_assert(|lines: &[&str]| {
            let subscribe = count_lines(lines, "event=subscribe");
            let unsubscribe = count_lines(lines, "event=unsubscribe");
            if subscribe == 1 && unsubscribe == 1 {
                Ok(())
            } else {
                Err(format!("subscribe: {subscribe}, unsubscribe: {unsubscribe}"))
            }
        });
    }
}
