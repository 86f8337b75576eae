//! Gateway presence types: status, activities, and the patchable record.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use ferrocord_core::error::StateError;

/// The fixed set of valid gateway statuses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    #[default]
    Online,
    Dnd,
    Idle,
    Invisible,
    Offline,
}

impl StatusKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Dnd => "dnd",
            Self::Idle => "idle",
            Self::Invisible => "invisible",
            Self::Offline => "offline",
        }
    }
}

impl fmt::Display for StatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusKind {
    type Err = StateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "online" => Ok(Self::Online),
            "dnd" => Ok(Self::Dnd),
            "idle" => Ok(Self::Idle),
            "invisible" => Ok(Self::Invisible),
            "offline" => Ok(Self::Offline),
            other => Err(StateError::ValidationFailure(format!(
                "`{other}` is not a recognized status"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum ActivityKind {
    #[default]
    Game,
    Streaming,
    Listening,
    Watching,
    Custom,
    Competing,
    Unknown(u8),
}

impl From<u8> for ActivityKind {
    fn from(raw: u8) -> Self {
        match raw {
            0 => Self::Game,
            1 => Self::Streaming,
            2 => Self::Listening,
            3 => Self::Watching,
            4 => Self::Custom,
            5 => Self::Competing,
            other => Self::Unknown(other),
        }
    }
}

impl From<ActivityKind> for u8 {
    fn from(kind: ActivityKind) -> Self {
        match kind {
            ActivityKind::Game => 0,
            ActivityKind::Streaming => 1,
            ActivityKind::Listening => 2,
            ActivityKind::Watching => 3,
            ActivityKind::Custom => 4,
            ActivityKind::Competing => 5,
            ActivityKind::Unknown(raw) => raw,
        }
    }
}

/// One activity line shown under the bot's name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: ActivityKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Activity {
    pub fn playing(name: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: ActivityKind::Game,
            url: None,
        }
    }
}

/// The presence record sent with identify and presence-update payloads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Presence {
    /// Milliseconds since the Unix epoch when the client went idle, if it is.
    #[serde(default)]
    pub since: Option<i64>,
    #[serde(default)]
    pub activities: Vec<Activity>,
    #[serde(default)]
    pub status: StatusKind,
    #[serde(default)]
    pub afk: bool,
}

/// A partial presence update.
///
/// `None` fields mean "keep the prior value"; the status travels as its raw
/// wire string and is validated before any field is applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PresenceUpdate {
    pub since: Option<i64>,
    pub activities: Option<Vec<Activity>>,
    pub status: Option<String>,
    pub afk: Option<bool>,
}

impl PresenceUpdate {
    pub fn status(status: &str) -> Self {
        Self {
            status: Some(status.to_string()),
            ..Self::default()
        }
    }

    pub fn afk(afk: bool) -> Self {
        Self {
            afk: Some(afk),
            ..Self::default()
        }
    }
}
