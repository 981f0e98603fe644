//! Metrics collection using Prometheus
//!
//! Counters for store mutations, save failures and menu traffic. Exposed by
//! the web server at `/metrics`.

// Registration fails only on duplicate metric names.
#![allow(clippy::expect_used)]

use once_cell::sync::Lazy;
use prometheus::{register_counter, register_counter_vec, Counter, CounterVec};

/// Store mutations
/// Labels: kind (channels/groups), op (add/remove)
pub static STORE_MUTATIONS_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "chanbot_store_mutations_total",
        "Total number of store mutations by entity kind and operation",
        &["kind", "op"]
    )
    .expect("register chanbot_store_mutations_total")
});

/// Failed writes of the data file
pub static STORE_SAVE_FAILURES_TOTAL: Lazy<Counter> = Lazy::new(|| {
    register_counter!(
        "chanbot_store_save_failures_total",
        "Total number of failed data file writes"
    )
    .expect("register chanbot_store_save_failures_total")
});

/// Callback queries handled
/// Labels: action (manage/detail/stats/delete/send/...)
pub static CALLBACKS_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "chanbot_callbacks_total",
        "Total number of callback queries by action",
        &["action"]
    )
    .expect("register chanbot_callbacks_total")
});

/// Deliveries attempted
/// Labels: kind (channel/group)
pub static DELIVERIES_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "chanbot_deliveries_total",
        "Total number of delivery attempts by target kind",
        &["kind"]
    )
    .expect("register chanbot_deliveries_total")
});

/// Initializes every metric so they appear in /metrics with zero values
pub fn init_metrics() {
    log::info!("Initializing metrics registry...");

    for kind in ["channels", "groups"] {
        for op in ["add", "remove"] {
            STORE_MUTATIONS_TOTAL.with_label_values(&[kind, op]);
        }
    }
    let _ = &*STORE_SAVE_FAILURES_TOTAL;
    let _ = &*CALLBACKS_TOTAL;
    DELIVERIES_TOTAL.with_label_values(&["channel"]);
    DELIVERIES_TOTAL.with_label_values(&["group"]);
}

/// Records a store mutation
pub fn record_mutation(kind: &str, op: &str) {
    STORE_MUTATIONS_TOTAL.with_label_values(&[kind, op]).inc();
}

/// Records a handled callback query
pub fn record_callback(action: &str) {
    CALLBACKS_TOTAL.with_label_values(&[action]).inc();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_mutation_increments() {
        let before = STORE_MUTATIONS_TOTAL.with_label_values(&["channels", "add"]).get();
        record_mutation("channels", "add");
        let after = STORE_MUTATIONS_TOTAL.with_label_values(&["channels", "add"]).get();
        assert!(after >= before + 1.0);
    }
}
