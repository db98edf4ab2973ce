//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers and error types that form the
//! vocabulary of the sales relay domain.

mod channel;
mod errors;
mod ids;
mod support_allowlist;

pub use channel::{normalize_digits, ChannelSuffix, CustomerChannel, MAX_PHONE_DIGITS};
pub use errors::ValidationError;
pub use ids::{ChatId, DeliveryId, SenderId, GROUP_SUFFIX};
pub use support_allowlist::SupportAllowlist;
