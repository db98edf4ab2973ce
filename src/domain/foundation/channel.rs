//! Customer channel identity resolution.
//!
//! Operators type phone numbers or internal ids in whatever format they
//! like. The platform addresses a conversation either by a phone-based id
//! (`<digits>@c.us`) or, for long internal identifiers, by `<digits>@lid`.

use std::fmt;

use super::ChatId;

/// Digit counts above this are long-form internal identifiers.
pub const MAX_PHONE_DIGITS: usize = 14;

/// Addressing scheme for a customer conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelSuffix {
    /// Conventional phone-number based contact (`@c.us`).
    Contact,
    /// Long-form internal identifier (`@lid`).
    Lid,
}

impl ChannelSuffix {
    /// Picks the suffix for an already-normalized digit string.
    pub fn for_digits(digits: &str) -> Self {
        if digits.len() > MAX_PHONE_DIGITS {
            ChannelSuffix::Lid
        } else {
            ChannelSuffix::Contact
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChannelSuffix::Contact => "c.us",
            ChannelSuffix::Lid => "lid",
        }
    }
}

impl fmt::Display for ChannelSuffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keeps only ASCII digits.
pub fn normalize_digits(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Resolved customer channel: the normalized digits plus the chat id to send to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerChannel {
    pub digits: String,
    pub suffix: ChannelSuffix,
    pub chat_id: ChatId,
}

impl CustomerChannel {
    /// Normalizes `raw` and resolves its suffix.
    ///
    /// Returns `None` when no digits remain, since there is nothing to address.
    pub fn resolve(raw: &str) -> Option<Self> {
        let digits = normalize_digits(raw);
        if digits.is_empty() {
            return None;
        }
        let suffix = ChannelSuffix::for_digits(&digits);
        let chat_id = ChatId::with_suffix(&digits, suffix.as_str());
        Some(Self {
            digits,
            suffix,
            chat_id,
        })
    }
}
