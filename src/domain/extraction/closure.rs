//! Bank details announced in a closing reply.

use super::fields::{extract, FieldKind};

pub const BANK_NAME_PLACEHOLDER: &str = "Não detectado";
pub const BANK_CODE_PLACEHOLDER: &str = "---";

/// Bank name, branch and account for the payment team.
///
/// Unlike offers, closures are always reported: missing fields fall back
/// to placeholders independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClosurePayload {
    pub bank: String,
    pub branch: String,
    pub account: String,
}

impl ClosurePayload {
    pub fn from_reply(reply: &str) -> Self {
        Self {
            bank: extract(FieldKind::BankName, reply)
                .unwrap_or_else(|| BANK_NAME_PLACEHOLDER.to_string()),
            branch: extract(FieldKind::BankBranch, reply)
                .unwrap_or_else(|| BANK_CODE_PLACEHOLDER.to_string()),
            account: extract(FieldKind::BankAccount, reply)
                .unwrap_or_else(|| BANK_CODE_PLACEHOLDER.to_string()),
        }
    }
}
