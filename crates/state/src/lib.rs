//! # Ferrocord State
//!
//! The identity-cache layer and client facade for the ferrocord
//! chat-platform client. A [`State`] is the single logical owner of every
//! cached entity: users live in an unbounded snowflake-keyed cache, messages
//! in a bounded FIFO-evicted cache, and the gateway presence record is
//! patched in place. All handed-out references are borrows tied to the
//! owning context.

pub mod cache;
pub mod client;
pub mod config;
pub mod state;

// Re-export key types at crate root for ergonomics
pub use cache::{DEFAULT_MAX_MESSAGES, MessageCache, UserCache};
pub use client::{Client, ClientOptions};
pub use config::{ClientConfig, PresenceConfig, TOKEN_ENV};
pub use state::{State, StateOptions};
