//! # Ferrocord Model
//!
//! Domain entities for the ferrocord chat-platform client: the records
//! decoded from wire JSON (users, members, roles, channels, guilds,
//! messages, embeds), the outbound reply/embed builders, and the presence
//! and intent types the gateway collaborator sends.
//!
//! Constructors never leave partial state behind: a payload either decodes
//! into a complete entity or fails with a
//! [`ConstructorFailure`](ferrocord_core::error::EntityError) naming the
//! entity.

pub mod channel;
pub mod embed;
pub mod guild;
pub mod intents;
pub mod member;
pub mod message;
pub mod presence;
pub mod role;
pub mod user;

// Re-export key types at crate root for ergonomics
pub use channel::{Channel, ChannelKind};
pub use embed::{Embed, EmbedField};
pub use guild::Guild;
pub use intents::Intents;
pub use member::Member;
pub use message::{AllowedMentions, Message, MessageKind, MessageReference, MessageReply};
pub use presence::{Activity, ActivityKind, Presence, PresenceUpdate, StatusKind};
pub use role::Role;
pub use user::User;
