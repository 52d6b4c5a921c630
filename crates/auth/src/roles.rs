use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Principal kind carried in a token's `role` claim.
///
/// A closed set: the codec signs and verifies both kinds identically, and
/// only consumers decide what a role may do. Serialized as the wire strings
/// `ACCOUNTANT` / `CLIENT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "ACCOUNTANT")]
    Accountant,
    #[serde(rename = "CLIENT")]
    Client,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Accountant => "ACCOUNTANT",
            Role::Client => "CLIENT",
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(String);

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACCOUNTANT" => Ok(Role::Accountant),
            "CLIENT" => Ok(Role::Client),
            other => Err(ParseRoleError(other.to_string())),
        }
    }
}
