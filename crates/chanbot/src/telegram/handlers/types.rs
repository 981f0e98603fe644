//! Handler types and dependencies

use std::sync::Arc;

use chancore::{DeliveryChannel, SessionMode, SimulatedDelivery, Store};
use teloxide::dispatching::dialogue::{Dialogue, InMemStorage};

/// Error type for handlers
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Per-chat session storage. Recreated whenever the dispatcher restarts.
pub type SessionStorage = InMemStorage<SessionMode>;

/// Session mode of the chat an update came from
pub type SessionDialogue = Dialogue<SessionMode, SessionStorage>;

/// Dependencies required by handlers
#[derive(Clone)]
pub struct HandlerDeps {
    pub store: Arc<Store>,
    pub delivery: Arc<dyn DeliveryChannel>,
}

impl HandlerDeps {
    /// Create new handler dependencies
    pub fn new(store: Arc<Store>, delivery: Arc<dyn DeliveryChannel>) -> Self {
        Self { store, delivery }
    }

    /// Dependencies with the simulated delivery backend
    pub fn simulated(store: Arc<Store>) -> Self {
        Self::new(store, Arc::new(SimulatedDelivery))
    }
}
