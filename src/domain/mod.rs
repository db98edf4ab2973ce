//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (chat ids, channel resolution, allowlist, errors)
//! - `inbound` - Inbound event validation and support/customer routing
//! - `extraction` - Pattern-based field extraction for offers and closures
//! - `tags` - Control tag detection, parsing and stripping
//! - `messages` - Localized texts sent to customers and operators

pub mod extraction;
pub mod foundation;
pub mod inbound;
pub mod messages;
pub mod tags;
