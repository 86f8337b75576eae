//! Guild role entity.

use serde::{Deserialize, Serialize};

use ferrocord_core::error::EntityError;
use ferrocord_core::snowflake::Snowflake;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub id: Snowflake,
    pub name: String,
}

impl Role {
    pub fn from_json(data: &serde_json::Value) -> Result<Self, EntityError> {
        serde_json::from_value(data.clone()).map_err(|source| EntityError::ConstructorFailure {
            entity: "role",
            source,
        })
    }
}
