//! User entity decoded from wire JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ferrocord_core::error::EntityError;
use ferrocord_core::snowflake::Snowflake;

/// Account flags carried in `flags`/`public_flags`.
pub mod flags {
    pub const STAFF: u64 = 1 << 0;
    pub const PARTNER: u64 = 1 << 1;
    pub const HYPESQUAD: u64 = 1 << 2;
    pub const BUG_HUNTER_LEVEL_1: u64 = 1 << 3;
    pub const MFA_SMS: u64 = 1 << 4;
    pub const PREMIUM_PROMO_DISMISSED: u64 = 1 << 5;
    pub const HOUSE_BRAVERY: u64 = 1 << 6;
    pub const HOUSE_BRILLIANCE: u64 = 1 << 7;
    pub const HOUSE_BALANCE: u64 = 1 << 8;
    pub const EARLY_SUPPORTER: u64 = 1 << 9;
    pub const TEAM_USER: u64 = 1 << 10;
    pub const SYSTEM: u64 = 1 << 12;
    pub const HAS_UNREAD_URGENT_MESSAGES: u64 = 1 << 13;
    pub const BUG_HUNTER_LEVEL_2: u64 = 1 << 14;
    pub const VERIFIED_BOT: u64 = 1 << 16;
    pub const VERIFIED_BOT_DEVELOPER: u64 = 1 << 17;
    pub const MODERATOR: u64 = 1 << 18;
    pub const BOT_HTTP_INTERACTIONS: u64 = 1 << 19;
}

/// A platform account, bot or human.
///
/// Unknown wire fields are ignored; absent optional fields decode to their
/// defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Snowflake,
    pub username: String,
    #[serde(default)]
    pub discriminator: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub bot: bool,
    #[serde(default)]
    pub system: bool,
    #[serde(default)]
    pub mfa_enabled: bool,
    #[serde(default)]
    pub banner: Option<String>,
    #[serde(default)]
    pub accent_color: Option<u32>,
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub flags: u64,
    #[serde(default)]
    pub premium_type: u8,
    #[serde(default)]
    pub public_flags: u64,
}

impl User {
    /// Construct from a raw wire payload.
    pub fn from_json(data: &serde_json::Value) -> Result<Self, EntityError> {
        serde_json::from_value(data.clone()).map_err(|source| EntityError::ConstructorFailure {
            entity: "user",
            source,
        })
    }

    /// The creation instant embedded in the account's ID.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.id.created_at()
    }

    /// Whether `flags` carries the given [`flags`] bit.
    pub fn has_flag(&self, flag: u64) -> bool {
        self.flags & flag != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload() -> serde_json::Value {
        json!({
            "id": "80351110224678912",
            "username": "Nelly",
            "discriminator": "1337",
            "avatar": "8342729096ea3675442027381ff50dfe",
            "verified": true,
            "email": "nelly@example.com",
            "flags": 64,
            "premium_type": 1,
            "public_flags": 64
        })
    }

    #[test]
    fn decodes_wire_payload() {
        let user = User::from_json(&payload()).unwrap();
        assert_eq!(user.id.get(), 80_351_110_224_678_912);
        assert_eq!(user.username, "Nelly");
        assert_eq!(user.discriminator, "1337");
        assert!(user.verified);
        assert!(!user.bot);
        assert!(user.has_flag(flags::HOUSE_BRAVERY));
        assert!(!user.has_flag(flags::STAFF));
    }

    #[test]
    fn missing_id_fails_construction() {
        let err = User::from_json(&json!({ "username": "ghost" })).unwrap_err();
        assert!(matches!(err, EntityError::ConstructorFailure { entity: "user", .. }));
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let mut data = payload();
        data["brand_new_field"] = json!({ "nested": true });
        assert!(User::from_json(&data).is_ok());
    }

    #[test]
    fn creation_time_comes_from_id() {
        let user = User::from_json(&payload()).unwrap();
        assert_eq!(user.created_at(), user.id.created_at());
    }
}
