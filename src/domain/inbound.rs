//! Inbound chat events and their routing.

use std::fmt;

use super::foundation::{ChatId, SenderId, SupportAllowlist};

/// One inbound chat message delivered by the webhook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundEvent {
    pub chat_id: ChatId,
    /// Message text, trimmed and non-empty.
    pub body: String,
}

/// Why a delivery is acknowledged without any action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    MissingSender,
    EmptyBody,
    GroupChat,
}

impl fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            IgnoreReason::MissingSender => "missing sender",
            IgnoreReason::EmptyBody => "empty body",
            IgnoreReason::GroupChat => "group chat",
        };
        f.write_str(s)
    }
}

/// Which path an inbound event takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InboundRoute {
    /// Authorized operator issuing an offer command.
    Support,
    /// Customer conversation answered by the model.
    Customer,
}

impl InboundEvent {
    /// Builds an event from raw webhook fields, or says why it is ignored.
    pub fn from_parts(from: Option<&str>, body: Option<&str>) -> Result<Self, IgnoreReason> {
        let chat_id = from
            .and_then(|f| ChatId::new(f).ok())
            .ok_or(IgnoreReason::MissingSender)?;

        let body = body.map(str::trim).unwrap_or_default();
        if body.is_empty() {
            return Err(IgnoreReason::EmptyBody);
        }
        if chat_id.is_group() {
            return Err(IgnoreReason::GroupChat);
        }

        Ok(Self {
            chat_id,
            body: body.to_string(),
        })
    }

    pub fn sender_id(&self) -> SenderId {
        self.chat_id.sender_id()
    }

    pub fn route(&self, allowlist: &SupportAllowlist) -> InboundRoute {
        if allowlist.contains(&self.sender_id()) {
            InboundRoute::Support
        } else {
            InboundRoute::Customer
        }
    }
}
