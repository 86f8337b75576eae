//! The owning context: caches, presence, and connection-scoped settings.

use serde_json::Value as JsonValue;
use tracing::{debug, warn};

use ferrocord_core::error::StateError;
use ferrocord_core::snowflake::Snowflake;
use ferrocord_model::intents::Intents;
use ferrocord_model::message::Message;
use ferrocord_model::presence::{Presence, PresenceUpdate, StatusKind};
use ferrocord_model::user::User;

use crate::cache::{self, MessageCache, UserCache};

/// Settings applied when a [`State`] is created.
#[derive(Debug, Clone, Default)]
pub struct StateOptions {
    pub intents: Intents,
    /// Message-cache bound; 0 means the default.
    pub max_messages: usize,
    /// Initial presence, validated before the state is handed out.
    pub presence: Option<PresenceUpdate>,
}

/// The single logical owner of all cached entities and presence state.
///
/// Every operation is synchronous and runs to completion on the calling
/// thread; concurrent writers need external mutual exclusion around the
/// whole instance.
#[derive(Debug)]
pub struct State {
    token: String,
    intents: Intents,
    presence: Presence,
    users: UserCache,
    messages: MessageCache,
}

impl State {
    pub fn new(token: &str, options: &StateOptions) -> Result<Self, StateError> {
        if token.trim().is_empty() {
            warn!("refusing to initialize state without a token");
            return Err(StateError::MissingToken);
        }

        let mut state = Self {
            token: token.to_string(),
            intents: options.intents,
            presence: Presence::default(),
            users: UserCache::new(),
            messages: MessageCache::new(options.max_messages)?,
        };

        if let Some(update) = &options.presence {
            state.set_presence(update)?;
        }

        Ok(state)
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn intents(&self) -> Intents {
        self.intents
    }

    // --- user cache ---

    /// Get-or-create a user from a raw payload. Two calls naming the same ID
    /// return the same cached instance.
    pub fn set_user(&mut self, payload: &JsonValue) -> Result<&User, StateError> {
        self.users.set(payload)
    }

    pub fn user(&self, id: Snowflake) -> Option<&User> {
        self.users.get(id)
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    // --- message cache ---

    /// Get-or-create a message from a raw payload.
    ///
    /// The author payload, when present, is routed through the user cache
    /// before the message is constructed; any failure along the way caches
    /// nothing. At the configured bound the oldest message is evicted first.
    pub fn set_message(&mut self, payload: &JsonValue) -> Result<&Message, StateError> {
        let id = cache::payload_id("message", payload)?;

        if self.messages.contains(id) {
            debug!(id = %id, "message cache hit");
            return self
                .messages
                .get(id)
                .ok_or_else(|| StateError::ValidationFailure(format!("message {id} vanished")));
        }

        if let Some(author) = payload.get("author") {
            self.users.set(author)?;
        }

        let message = Message::from_json(payload)?;
        self.messages.insert(message)
    }

    pub fn message(&self, id: Snowflake) -> Option<&Message> {
        self.messages.get(id)
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    pub fn max_messages(&self) -> usize {
        self.messages.max_messages()
    }

    // --- presence ---

    /// Patch the presence record atomically.
    ///
    /// Omitted fields keep their prior values. An unrecognized status string
    /// aborts the whole update; no field is mutated.
    pub fn set_presence(&mut self, update: &PresenceUpdate) -> Result<(), StateError> {
        let status = match update.status.as_deref() {
            Some(raw) => Some(raw.parse::<StatusKind>().inspect_err(|_| {
                warn!(status = raw, "rejecting presence update");
            })?),
            None => None,
        };

        if let Some(since) = update.since {
            self.presence.since = Some(since);
        }
        if let Some(activities) = &update.activities {
            self.presence.activities = activities.clone();
        }
        if let Some(status) = status {
            self.presence.status = status;
        }
        if let Some(afk) = update.afk {
            self.presence.afk = afk;
        }

        debug!(status = %self.presence.status, afk = self.presence.afk, "presence updated");
        Ok(())
    }

    pub fn presence(&self) -> &Presence {
        &self.presence
    }

    /// The presence record as a gateway payload.
    pub fn presence_json(&self) -> JsonValue {
        serde_json::to_value(&self.presence).unwrap_or(JsonValue::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferrocord_model::presence::Activity;
    use serde_json::json;

    fn state() -> State {
        State::new("token-123", &StateOptions::default()).unwrap()
    }

    #[test]
    fn empty_token_is_rejected() {
        let err = State::new("  ", &StateOptions::default()).unwrap_err();
        assert!(matches!(err, StateError::MissingToken));
    }

    #[test]
    fn initial_presence_is_applied() {
        let options = StateOptions {
            presence: Some(PresenceUpdate {
                status: Some("idle".into()),
                afk: Some(true),
                ..PresenceUpdate::default()
            }),
            ..StateOptions::default()
        };
        let state = State::new("token", &options).unwrap();
        assert_eq!(state.presence().status, StatusKind::Idle);
        assert!(state.presence().afk);
    }

    #[test]
    fn invalid_initial_presence_fails_construction() {
        let options = StateOptions {
            presence: Some(PresenceUpdate::status("lurking")),
            ..StateOptions::default()
        };
        assert!(matches!(
            State::new("token", &options),
            Err(StateError::ValidationFailure(_))
        ));
    }

    #[test]
    fn presence_patch_keeps_omitted_fields() {
        let mut state = state();
        state
            .set_presence(&PresenceUpdate {
                since: Some(1000),
                activities: Some(vec![Activity::playing("chess")]),
                status: Some("dnd".into()),
                afk: Some(false),
            })
            .unwrap();

        // Only `afk` this time; everything else must survive.
        state.set_presence(&PresenceUpdate::afk(true)).unwrap();

        let presence = state.presence();
        assert_eq!(presence.since, Some(1000));
        assert_eq!(presence.activities.len(), 1);
        assert_eq!(presence.status, StatusKind::Dnd);
        assert!(presence.afk);
    }

    #[test]
    fn invalid_status_aborts_whole_update() {
        let mut state = state();
        state.set_presence(&PresenceUpdate::status("idle")).unwrap();

        let err = state
            .set_presence(&PresenceUpdate {
                since: Some(42),
                activities: Some(vec![Activity::playing("nothing")]),
                status: Some("away".into()),
                afk: Some(true),
            })
            .unwrap_err();

        assert!(matches!(err, StateError::ValidationFailure(_)));
        // Nothing was touched.
        let presence = state.presence();
        assert_eq!(presence.status, StatusKind::Idle);
        assert_eq!(presence.since, None);
        assert!(presence.activities.is_empty());
        assert!(!presence.afk);
    }

    #[test]
    fn presence_json_has_gateway_shape() {
        let mut state = state();
        state.set_presence(&PresenceUpdate::status("offline")).unwrap();
        let payload = state.presence_json();
        assert_eq!(payload["status"], json!("offline"));
        assert_eq!(payload["afk"], json!(false));
    }

    #[test]
    fn set_message_routes_author_through_user_cache() {
        let mut state = state();
        let payload = json!({
            "id": "500",
            "channel_id": "77",
            "content": "hello",
            "author": { "id": "900", "username": "ada" }
        });

        let author_id = {
            let message = state.set_message(&payload).unwrap();
            assert_eq!(message.content, "hello");
            message.author_id.unwrap()
        };

        assert_eq!(author_id.get(), 900);
        assert_eq!(state.user(author_id).map(|u| u.username.as_str()), Some("ada"));
        assert_eq!(state.user_count(), 1);
    }

    #[test]
    fn set_message_twice_preserves_identity() {
        let mut state = state();
        let payload = json!({ "id": "600", "channel_id": "1", "content": "original" });

        let first = state.set_message(&payload).unwrap() as *const Message;

        let mut altered = payload.clone();
        altered["content"] = json!("rewritten");
        let second = state.set_message(&altered).unwrap();

        assert_eq!(second.content, "original");
        assert!(std::ptr::eq(first, second));
        assert_eq!(state.message_count(), 1);
    }

    #[test]
    fn bad_author_payload_caches_no_message() {
        let mut state = state();
        let payload = json!({
            "id": "700",
            "channel_id": "1",
            "author": { "username": "missing-id" }
        });

        assert!(state.set_message(&payload).is_err());
        assert_eq!(state.message_count(), 0);
        assert_eq!(state.user_count(), 0);
    }
}
