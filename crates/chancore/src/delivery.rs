//! Outbound delivery of composed messages to registered entities.
//!
//! Only a simulated backend exists: it records the attempt and reports
//! success without contacting Telegram.

use async_trait::async_trait;

use crate::core::error::AppResult;
use crate::core::metrics::DELIVERIES_TOTAL;
use crate::storage::EntityRef;

/// Destination-agnostic sender for message and broadcast flows.
#[async_trait]
pub trait DeliveryChannel: Send + Sync {
    /// Backend name for logs (e.g. "simulated").
    fn name(&self) -> &str;

    /// Delivers `payload` to `target`.
    async fn send(&self, target: &EntityRef, payload: &str) -> AppResult<()>;

    /// Delivers `payload` to every target. Returns how many succeeded.
    async fn broadcast(&self, targets: &[EntityRef], payload: &str) -> usize {
        let mut delivered = 0;
        for target in targets {
            match self.send(target, payload).await {
                Ok(()) => delivered += 1,
                Err(e) => log::warn!("{} delivery to {} {} failed: {}", self.name(), target.kind, target.id, e),
            }
        }
        delivered
    }
}

/// Delivery backend that performs no I/O.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedDelivery;

#[async_trait]
impl DeliveryChannel for SimulatedDelivery {
    fn name(&self) -> &str {
        "simulated"
    }

    async fn send(&self, target: &EntityRef, payload: &str) -> AppResult<()> {
        DELIVERIES_TOTAL.with_label_values(&[target.kind.singular()]).inc();
        log::info!(
            "Simulated delivery to {} {} ({} chars)",
            target.kind.singular(),
            target.id,
            payload.chars().count()
        );
        Ok(())
    }
}
