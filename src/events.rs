// src/events.rs
//! Best-effort fan-out to any listening dashboard surface.
//!
//! Events ride a broadcast channel; the SSE route bridges it to subscribed
//! dashboards. Publishing never blocks and never fails the calling flow --
//! with no subscribers the event is dropped and logged at debug.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

const EVENT_CHANNEL_CAPACITY: usize = 256;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PartnerEvent {
    CommissionCreated {
        commission_id: i64,
        distributor_id: i64,
        product_name: String,
        commission_amount: f64,
        session_id: String,
    },
    CommissionApproved {
        commission_id: i64,
        distributor_id: i64,
        commission_amount: f64,
        approved_by: String,
    },
    WithdrawalRequested {
        withdrawal_id: i64,
        distributor_id: i64,
        amount: f64,
        method: String,
    },
}

impl PartnerEvent {
    pub fn name(&self) -> &'static str {
        match self {
            PartnerEvent::CommissionCreated { .. } => "commission_created",
            PartnerEvent::CommissionApproved { .. } => "commission_approved",
            PartnerEvent::WithdrawalRequested { .. } => "withdrawal_requested",
        }
    }
}

#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<PartnerEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        EventBus { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PartnerEvent> {
        self.tx.subscribe()
    }

    /// Fire-and-forget publish, at-most-once per subscriber.
    pub fn publish(&self, event: PartnerEvent) {
        let name = event.name();
        match self.tx.send(event) {
            Ok(receivers) => {
                tracing::debug!(event = name, receivers, "Event published");
            }
            Err(_) => {
                tracing::debug!(event = name, "No subscribers, event dropped");
            }
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn delivers_to_subscriber() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe();
        bus.publish(PartnerEvent::WithdrawalRequested {
            withdrawal_id: 1,
            distributor_id: 2,
            amount: 50.0,
            method: "bank_transfer".to_string(),
        });
        let event = rx.recv().await.unwrap();
        assert_eq!(event.name(), "withdrawal_requested");
    }

    #[test]
    fn publish_without_subscribers_is_silent() {
        let bus = EventBus::new();
        bus.publish(PartnerEvent::CommissionApproved {
            commission_id: 1,
            distributor_id: 1,
            commission_amount: 18.0,
            approved_by: "admin@example.com".to_string(),
        });
    }
}
