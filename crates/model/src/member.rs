//! Guild member entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ferrocord_core::error::EntityError;
use ferrocord_core::snowflake::Snowflake;

/// A user's per-guild membership record. The account itself lives in the
/// user cache; this carries only the guild-local state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Member {
    #[serde(default)]
    pub nick: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub roles: Vec<Snowflake>,
    #[serde(default)]
    pub joined_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub premium_since: Option<DateTime<Utc>>,
    #[serde(default)]
    pub deaf: bool,
    #[serde(default)]
    pub mute: bool,
    #[serde(default)]
    pub pending: bool,
    #[serde(default)]
    pub permissions: Option<String>,
    #[serde(default)]
    pub communication_disabled_until: Option<DateTime<Utc>>,
}

impl Member {
    pub fn from_json(data: &serde_json::Value) -> Result<Self, EntityError> {
        serde_json::from_value(data.clone()).map_err(|source| EntityError::ConstructorFailure {
            entity: "member",
            source,
        })
    }
}
