//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

/// Suffix that marks a group conversation. Group traffic is never answered.
pub const GROUP_SUFFIX: &str = "@g.us";

/// Unique identifier for one webhook delivery, used to correlate log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeliveryId(Uuid);

impl DeliveryId {
    /// Creates a new random DeliveryId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DeliveryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DeliveryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque channel identifier on the messaging platform (`<id>@<suffix>`).
///
/// The gateway treats it as an opaque string; the only structure the bot
/// relies on is the local part before `@` (the sender) and the group suffix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatId(String);

impl ChatId {
    /// Creates a ChatId, rejecting blank input.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::empty_field("chat_id"));
        }
        Ok(Self(id))
    }

    /// Builds a ChatId from a local part and a suffix such as `c.us`.
    pub fn with_suffix(local: &str, suffix: &str) -> Self {
        Self(format!("{}@{}", local, suffix.trim_start_matches('@')))
    }

    /// Returns true for group conversations.
    pub fn is_group(&self) -> bool {
        self.0.contains(GROUP_SUFFIX)
    }

    /// The local part before the first `@` (the whole id when there is none).
    pub fn sender_id(&self) -> SenderId {
        let local = self.0.split('@').next().unwrap_or_default();
        SenderId(local.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ChatId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for ChatId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Local part of a chat id; what the support allowlist is matched against.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SenderId(String);

impl SenderId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SenderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
