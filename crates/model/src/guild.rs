//! Guild entity and its moderation-level enums.

use serde::{Deserialize, Serialize};

use ferrocord_core::error::EntityError;
use ferrocord_core::snowflake::Snowflake;

use crate::role::Role;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum VerificationLevel {
    #[default]
    None,
    Low,
    Medium,
    High,
    VeryHigh,
    Unknown(u8),
}

impl From<u8> for VerificationLevel {
    fn from(raw: u8) -> Self {
        match raw {
            0 => Self::None,
            1 => Self::Low,
            2 => Self::Medium,
            3 => Self::High,
            4 => Self::VeryHigh,
            other => Self::Unknown(other),
        }
    }
}

impl From<VerificationLevel> for u8 {
    fn from(level: VerificationLevel) -> Self {
        match level {
            VerificationLevel::None => 0,
            VerificationLevel::Low => 1,
            VerificationLevel::Medium => 2,
            VerificationLevel::High => 3,
            VerificationLevel::VeryHigh => 4,
            VerificationLevel::Unknown(raw) => raw,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum NotificationLevel {
    #[default]
    AllMessages,
    OnlyMentions,
    Unknown(u8),
}

impl From<u8> for NotificationLevel {
    fn from(raw: u8) -> Self {
        match raw {
            0 => Self::AllMessages,
            1 => Self::OnlyMentions,
            other => Self::Unknown(other),
        }
    }
}

impl From<NotificationLevel> for u8 {
    fn from(level: NotificationLevel) -> Self {
        match level {
            NotificationLevel::AllMessages => 0,
            NotificationLevel::OnlyMentions => 1,
            NotificationLevel::Unknown(raw) => raw,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum ContentFilterLevel {
    #[default]
    Disabled,
    MembersWithoutRoles,
    AllMembers,
    Unknown(u8),
}

impl From<u8> for ContentFilterLevel {
    fn from(raw: u8) -> Self {
        match raw {
            0 => Self::Disabled,
            1 => Self::MembersWithoutRoles,
            2 => Self::AllMembers,
            other => Self::Unknown(other),
        }
    }
}

impl From<ContentFilterLevel> for u8 {
    fn from(level: ContentFilterLevel) -> Self {
        match level {
            ContentFilterLevel::Disabled => 0,
            ContentFilterLevel::MembersWithoutRoles => 1,
            ContentFilterLevel::AllMembers => 2,
            ContentFilterLevel::Unknown(raw) => raw,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum NsfwLevel {
    #[default]
    Default,
    Explicit,
    Safe,
    AgeRestricted,
    Unknown(u8),
}

impl From<u8> for NsfwLevel {
    fn from(raw: u8) -> Self {
        match raw {
            0 => Self::Default,
            1 => Self::Explicit,
            2 => Self::Safe,
            3 => Self::AgeRestricted,
            other => Self::Unknown(other),
        }
    }
}

impl From<NsfwLevel> for u8 {
    fn from(level: NsfwLevel) -> Self {
        match level {
            NsfwLevel::Default => 0,
            NsfwLevel::Explicit => 1,
            NsfwLevel::Safe => 2,
            NsfwLevel::AgeRestricted => 3,
            NsfwLevel::Unknown(raw) => raw,
        }
    }
}

/// A guild (server) as seen in gateway and REST payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guild {
    pub id: Snowflake,
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub icon_hash: Option<String>,
    #[serde(default)]
    pub splash: Option<String>,
    #[serde(default)]
    pub discovery_splash: Option<String>,
    #[serde(default)]
    pub owner: bool,
    #[serde(default)]
    pub owner_id: Option<Snowflake>,
    #[serde(default)]
    pub permissions: Option<String>,
    #[serde(default)]
    pub afk_channel_id: Option<Snowflake>,
    #[serde(default)]
    pub afk_timeout: u32,
    #[serde(default)]
    pub widget_enabled: bool,
    #[serde(default)]
    pub widget_channel_id: Option<Snowflake>,
    #[serde(default)]
    pub verification_level: VerificationLevel,
    #[serde(default)]
    pub default_message_notifications: NotificationLevel,
    #[serde(default)]
    pub explicit_content_filter: ContentFilterLevel,
    #[serde(default)]
    pub nsfw_level: NsfwLevel,
    #[serde(default)]
    pub roles: Vec<Role>,
}

impl Guild {
    pub fn from_json(data: &serde_json::Value) -> Result<Self, EntityError> {
        serde_json::from_value(data.clone()).map_err(|source| EntityError::ConstructorFailure {
            entity: "guild",
            source,
        })
    }

    /// Look up a role by ID.
    pub fn role(&self, id: Snowflake) -> Option<&Role> {
        self.roles.iter().find(|role| role.id == id)
    }
}
