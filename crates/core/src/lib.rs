//! # Ferrocord Core
//!
//! The tagged container engine and identity primitives for the ferrocord
//! chat-platform client. This crate owns the substrate every other layer
//! relies on: values whose kind is known only at runtime, the `List` and
//! `Map` containers that exclusively own them, and the snowflake IDs the
//! cache layer keys on.
//!
//! ## Design Philosophy
//!
//! Ownership is the contract. A value lives in exactly one container slot;
//! value-semantics insertion deep-copies, move insertion transfers, and a
//! container destroys everything it owns when it goes away. Capacity is
//! managed explicitly (geometric growth, slack-halving shrink) so memory
//! behavior is deterministic rather than delegated to collection defaults.

pub mod error;
pub mod list;
pub mod map;
pub mod snowflake;
pub mod value;

// Re-export key types at crate root for ergonomics
pub use error::{ContainerError, EntityError, Error, Result, StateError};
pub use list::{List, MINIMUM_CAPACITY};
pub use map::Map;
pub use snowflake::Snowflake;
pub use value::{Opaque, Value, ValueKind};
