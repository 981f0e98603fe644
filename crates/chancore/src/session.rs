//! Per-conversation pending-flow state.
//!
//! Each chat holds exactly one mode. Entering a pending flow replaces whatever
//! was pending before, and the next inbound message consumes it.

use serde::{Deserialize, Serialize};

use crate::storage::EntityRef;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionMode {
    /// No pending flow
    #[default]
    Idle,
    /// Next message is broadcast to every registered entity
    AwaitingBroadcast,
    /// Next message is sent to one entity
    AwaitingMessage(EntityRef),
}

impl SessionMode {
    /// True when the next private message is consumed as a payload.
    pub fn is_pending(&self) -> bool {
        !matches!(self, SessionMode::Idle)
    }

    /// Short label for logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            SessionMode::Idle => "idle",
            SessionMode::AwaitingBroadcast => "broadcast",
            SessionMode::AwaitingMessage(_) => "message",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_idle() {
        assert_eq!(SessionMode::default(), SessionMode::Idle);
        assert!(!SessionMode::Idle.is_pending());
    }

    #[test]
    fn test_both_flows_are_pending() {
        assert!(SessionMode::AwaitingBroadcast.is_pending());
        assert!(SessionMode::AwaitingMessage(EntityRef::channel("c1")).is_pending());
    }

    #[test]
    fn test_entering_one_flow_replaces_the_other() {
        let mut mode = SessionMode::AwaitingBroadcast;
        assert!(mode.is_pending());
        mode = SessionMode::AwaitingMessage(EntityRef::group("g1"));

        assert!(mode.is_pending());
        assert_ne!(mode, SessionMode::AwaitingBroadcast);
        assert_eq!(mode.label(), "message");
    }
}
