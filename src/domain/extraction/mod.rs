//! Field extraction from operator commands and model replies.
//!
//! - `fields` - the shared pattern table and single-field lookup
//! - `offer` - identifier/phone/amount with positional comma fallback
//! - `closure` - bank name/branch/account with placeholders

mod closure;
mod fields;
mod offer;

pub use closure::{ClosurePayload, BANK_CODE_PLACEHOLDER, BANK_NAME_PLACEHOLDER};
pub use fields::{extract, FieldKind};
pub use offer::{CompleteOffer, OfferPayload};
