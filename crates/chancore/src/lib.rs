//! Chancore - core library for the channel manager bot
//!
//! Everything here is free of Telegram types so it can be tested and reused
//! without a bot token.
//!
//! # Module Structure
//!
//! - `core`: configuration, errors, logging, metrics and the health web server
//! - `storage`: the JSON document and the file-backed store
//! - `session`: per-conversation pending-flow state
//! - `delivery`: outbound delivery seam (simulated)

pub mod core;
pub mod delivery;
pub mod session;
pub mod storage;

// Re-export commonly used types for convenience
pub use core::{config, AppError, AppResult};
pub use delivery::{DeliveryChannel, SimulatedDelivery};
pub use session::SessionMode;
pub use storage::{Document, EntityKind, EntityRecord, EntityRef, Store};
