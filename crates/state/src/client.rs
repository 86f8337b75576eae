//! Client facade — owns the state context and builds outbound payloads.
//!
//! Transport-free: the gateway and HTTP collaborators drive this type and
//! ship whatever JSON it hands back.

use serde_json::Value as JsonValue;

use ferrocord_core::error::{EntityError, StateError};
use ferrocord_core::snowflake::Snowflake;
use ferrocord_model::intents::Intents;
use ferrocord_model::message::MessageReply;
use ferrocord_model::presence::{Presence, PresenceUpdate};

use crate::state::{State, StateOptions};

/// Everything needed to bring a client up.
#[derive(Clone, Default)]
pub struct ClientOptions {
    /// Bot token from the developer portal.
    pub token: String,
    pub intents: Intents,
    /// Message-cache bound; 0 means the default.
    pub max_messages: usize,
    /// Presence applied at startup.
    pub presence: Option<PresenceUpdate>,
}

impl std::fmt::Debug for ClientOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientOptions")
            .field("token", &"[REDACTED]")
            .field("intents", &self.intents)
            .field("max_messages", &self.max_messages)
            .field("presence", &self.presence)
            .finish()
    }
}

/// A chat-platform bot client.
#[derive(Debug)]
pub struct Client {
    state: State,
}

impl Client {
    pub fn new(options: &ClientOptions) -> Result<Self, StateError> {
        let state = State::new(
            &options.token,
            &StateOptions {
                intents: options.intents,
                max_messages: options.max_messages,
                presence: options.presence.clone(),
            },
        )?;
        Ok(Self { state })
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut State {
        &mut self.state
    }

    /// Patch the presence record and return the gateway payload to send.
    pub fn set_presence(&mut self, update: &PresenceUpdate) -> Result<JsonValue, StateError> {
        self.state.set_presence(update)?;
        Ok(self.state.presence_json())
    }

    pub fn presence(&self) -> &Presence {
        self.state.presence()
    }

    /// Build the create-message body for a channel; the HTTP collaborator
    /// posts it.
    pub fn build_reply(
        &self,
        channel_id: Snowflake,
        reply: &MessageReply,
    ) -> Result<(Snowflake, JsonValue), EntityError> {
        Ok((channel_id, reply.to_json()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn options() -> ClientOptions {
        ClientOptions {
            token: "test-token".into(),
            intents: Intents::GUILDS | Intents::GUILD_MESSAGES,
            ..ClientOptions::default()
        }
    }

    #[test]
    fn debug_output_redacts_token() {
        let rendered = format!("{:?}", options());
        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("test-token"));
    }

    #[test]
    fn client_requires_token() {
        let err = Client::new(&ClientOptions::default()).unwrap_err();
        assert!(matches!(err, StateError::MissingToken));
    }

    #[test]
    fn set_presence_returns_gateway_payload() {
        let mut client = Client::new(&options()).unwrap();
        let payload = client.set_presence(&PresenceUpdate::status("dnd")).unwrap();
        assert_eq!(payload["status"], json!("dnd"));
    }

    #[test]
    fn build_reply_carries_channel_and_body() {
        let client = Client::new(&options()).unwrap();
        let (channel, body) = client
            .build_reply(Snowflake::new(42), &MessageReply::text("hi"))
            .unwrap();
        assert_eq!(channel.get(), 42);
        assert_eq!(body, json!({ "content": "hi" }));
    }

    #[test]
    fn caches_are_reachable_through_state() {
        let mut client = Client::new(&options()).unwrap();
        client
            .state_mut()
            .set_user(&json!({ "id": "5", "username": "u" }))
            .unwrap();
        assert_eq!(client.state().user_count(), 1);
    }
}
