//! Identity caches built on the container engine.
//!
//! At most one live instance exists per remote ID. Users live in an
//! unbounded [`Map`] keyed by snowflake and are freed only with the owning
//! context; messages live in an insertion-ordered [`List`] bounded by a
//! configured maximum, with FIFO eviction and no refresh-on-read. Callers
//! receive borrowed references valid until eviction or teardown.

use serde_json::Value as JsonValue;
use tracing::debug;

use ferrocord_core::error::{ContainerError, EntityError, StateError};
use ferrocord_core::list::List;
use ferrocord_core::map::Map;
use ferrocord_core::snowflake::Snowflake;
use ferrocord_core::value::Value;
use ferrocord_model::message::Message;
use ferrocord_model::user::User;

/// Message-cache bound when none is configured.
pub const DEFAULT_MAX_MESSAGES: usize = 100;

/// Pull the identity out of a raw payload before constructing anything.
pub(crate) fn payload_id(entity: &'static str, payload: &JsonValue) -> Result<Snowflake, EntityError> {
    let field = payload
        .get("id")
        .ok_or(EntityError::MissingField { entity, field: "id" })?;

    match field {
        JsonValue::String(raw) => raw.parse(),
        JsonValue::Number(raw) => raw
            .as_u64()
            .map(Snowflake::new)
            .ok_or_else(|| EntityError::InvalidSnowflake(raw.to_string())),
        other => Err(EntityError::InvalidSnowflake(other.to_string())),
    }
}

/// Unbounded user cache: snowflake key, generic-wrapped [`User`] payload.
#[derive(Debug, Default)]
pub struct UserCache {
    entries: Map,
}

impl UserCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Borrow the cached user with this ID, if present.
    pub fn get(&self, id: Snowflake) -> Option<&User> {
        self.entries.downcast_ref::<User>(&Value::from(id))
    }

    /// Get-or-create from a raw payload.
    ///
    /// A cache hit returns the existing instance without duplication or
    /// growth. A miss constructs the user, stores it, and returns the stored
    /// instance. A failed construction caches nothing.
    pub fn set(&mut self, payload: &JsonValue) -> Result<&User, StateError> {
        let id = payload_id("user", payload)?;

        if self.entries.contains_key(&Value::from(id)) {
            debug!(id = %id, "user cache hit");
            return self.stored(id);
        }

        let user = User::from_json(payload)?;
        self.entries.set(&Value::from(id), Value::generic(user))?;
        debug!(id = %id, length = self.entries.len(), "user cached");
        self.stored(id)
    }

    fn stored(&self, id: Snowflake) -> Result<&User, StateError> {
        self.get(id).ok_or_else(|| {
            StateError::ValidationFailure(format!("user {id} missing from cache after insert"))
        })
    }
}

/// Bounded, insertion-ordered message cache with FIFO eviction.
#[derive(Debug)]
pub struct MessageCache {
    entries: List,
    max_messages: usize,
}

impl MessageCache {
    /// `max_messages` of 0 falls back to [`DEFAULT_MAX_MESSAGES`].
    pub fn new(max_messages: usize) -> Result<Self, ContainerError> {
        Ok(Self {
            entries: List::new()?,
            max_messages: if max_messages == 0 {
                DEFAULT_MAX_MESSAGES
            } else {
                max_messages
            },
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_messages(&self) -> usize {
        self.max_messages
    }

    fn position(&self, id: Snowflake) -> Option<usize> {
        self.entries
            .iter()
            .position(|value| value.downcast_ref::<Message>().is_some_and(|m| m.id == id))
    }

    pub fn contains(&self, id: Snowflake) -> bool {
        self.position(id).is_some()
    }

    /// Borrow the cached message with this ID. Lookup never reorders the
    /// cache (FIFO, not LRU).
    pub fn get(&self, id: Snowflake) -> Option<&Message> {
        let pos = self.position(id)?;
        self.entries.downcast_ref::<Message>(pos)
    }

    /// Store a newly-constructed message, evicting the oldest entry first
    /// when the cache is at its bound.
    pub fn insert(&mut self, message: Message) -> Result<&Message, StateError> {
        let id = message.id;

        if self.entries.len() == self.max_messages {
            debug!(max_messages = self.max_messages, "message cache full, evicting oldest");
            self.entries.remove(0);
        }

        self.entries.append_owned(Value::generic(message))?;
        debug!(id = %id, length = self.entries.len(), "message cached");

        self.entries
            .downcast_ref::<Message>(self.entries.len() - 1)
            .ok_or_else(|| {
                StateError::ValidationFailure(format!(
                    "message {id} missing from cache after insert"
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn user_payload(id: u64, name: &str) -> JsonValue {
        json!({ "id": id.to_string(), "username": name })
    }

    fn message(id: u64) -> Message {
        Message::from_json(&json!({
            "id": id.to_string(),
            "channel_id": "1",
            "content": format!("message {id}")
        }))
        .unwrap()
    }

    #[test]
    fn user_get_or_create_preserves_identity() {
        let mut cache = UserCache::new();

        let first = cache.set(&user_payload(7, "anna")).unwrap() as *const User;
        assert_eq!(cache.len(), 1);

        // Same id, different payload content: the cached instance wins.
        let second = cache.set(&user_payload(7, "renamed")).unwrap();
        assert_eq!(second.username, "anna");
        let second = second as *const User;
        assert_eq!(cache.len(), 1);
        assert!(std::ptr::eq(first, second));
    }

    #[test]
    fn user_constructor_failure_caches_nothing() {
        let mut cache = UserCache::new();
        // `username` missing: construction fails after the id check.
        let err = cache.set(&json!({ "id": "9" })).unwrap_err();
        assert!(matches!(
            err,
            StateError::Entity(EntityError::ConstructorFailure { entity: "user", .. })
        ));
        assert!(cache.is_empty());
        assert!(cache.get(Snowflake::new(9)).is_none());
    }

    #[test]
    fn user_payload_without_id_is_rejected() {
        let mut cache = UserCache::new();
        let err = cache.set(&json!({ "username": "no-id" })).unwrap_err();
        assert!(matches!(
            err,
            StateError::Entity(EntityError::MissingField { field: "id", .. })
        ));
        assert!(cache.is_empty());
    }

    #[test]
    fn message_fifo_eviction_at_bound() {
        let mut cache = MessageCache::new(3).unwrap();
        for id in [10u64, 11, 12, 13] {
            cache.insert(message(id)).unwrap();
        }

        assert_eq!(cache.len(), 3);
        assert!(cache.get(Snowflake::new(10)).is_none());
        for id in [11u64, 12, 13] {
            assert!(cache.get(Snowflake::new(id)).is_some(), "id {id} should survive");
        }
    }

    #[test]
    fn message_lookup_does_not_reorder() {
        let mut cache = MessageCache::new(2).unwrap();
        cache.insert(message(1)).unwrap();
        cache.insert(message(2)).unwrap();

        // Touch the oldest entry, then overflow: FIFO still evicts it.
        assert!(cache.get(Snowflake::new(1)).is_some());
        cache.insert(message(3)).unwrap();

        assert!(cache.get(Snowflake::new(1)).is_none());
        assert!(cache.get(Snowflake::new(2)).is_some());
    }

    #[test]
    fn zero_bound_falls_back_to_default() {
        let cache = MessageCache::new(0).unwrap();
        assert_eq!(cache.max_messages(), DEFAULT_MAX_MESSAGES);
    }

    #[test]
    fn payload_id_accepts_strings_and_integers() {
        assert_eq!(payload_id("user", &json!({ "id": "42" })).unwrap().get(), 42);
        assert_eq!(payload_id("user", &json!({ "id": 42 })).unwrap().get(), 42);
        assert!(payload_id("user", &json!({ "id": true })).is_err());
        assert!(payload_id("user", &json!({})).is_err());
    }
}
