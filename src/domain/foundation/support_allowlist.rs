//! Authorized operator senders.

use super::{ChatId, SenderId, ValidationError};

/// Ordered, immutable set of operator sender ids.
///
/// The first entry is the primary operator: every support alert goes to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportAllowlist {
    numbers: Vec<String>,
}

impl SupportAllowlist {
    /// Builds the allowlist, trimming entries and dropping blanks.
    pub fn new<I, S>(numbers: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let numbers: Vec<String> = numbers
            .into_iter()
            .map(|n| n.as_ref().trim().to_string())
            .filter(|n| !n.is_empty())
            .collect();

        if numbers.is_empty() {
            return Err(ValidationError::empty_field("support_numbers"));
        }
        Ok(Self { numbers })
    }

    pub fn contains(&self, sender: &SenderId) -> bool {
        self.numbers.iter().any(|n| n == sender.as_str())
    }

    /// The alert-receiving operator.
    pub fn primary(&self) -> &str {
        &self.numbers[0]
    }

    /// Chat id of the primary operator under the configured alert suffix.
    pub fn alert_chat_id(&self, suffix: &str) -> ChatId {
        ChatId::with_suffix(self.primary(), suffix)
    }

    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }
}
