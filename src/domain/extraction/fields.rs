//! Pattern table for structured values embedded in free text.
//!
//! Each field has one precompiled pattern whose first capture group is the
//! value. The table is built once and shared read-only across requests.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// A structured value the bot knows how to pull out of chat text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Taxpayer identifier (CPF), e.g. `123.456.789-00`.
    Identifier,
    /// Phone number or long internal id of the customer.
    Phone,
    /// Monetary amount as typed, e.g. `1500,00`.
    Amount,
    /// Bank branch (agência).
    BankBranch,
    /// Bank account number.
    BankAccount,
    /// Bank name.
    BankName,
}

impl FieldKind {
    pub const ALL: [FieldKind; 6] = [
        FieldKind::Identifier,
        FieldKind::Phone,
        FieldKind::Amount,
        FieldKind::BankBranch,
        FieldKind::BankAccount,
        FieldKind::BankName,
    ];

    fn pattern(&self) -> &'static Regex {
        match self {
            FieldKind::Identifier => &IDENTIFIER,
            FieldKind::Phone => &PHONE,
            FieldKind::Amount => &AMOUNT,
            FieldKind::BankBranch => &BANK_BRANCH,
            FieldKind::BankAccount => &BANK_ACCOUNT,
            FieldKind::BankName => &BANK_NAME,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Identifier => "identifier",
            FieldKind::Phone => "phone",
            FieldKind::Amount => "amount",
            FieldKind::BankBranch => "bank_branch",
            FieldKind::BankAccount => "bank_account",
            FieldKind::BankName => "bank_name",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Only the identifier label is case-sensitive (CPF or cpf).
static IDENTIFIER: Lazy<Regex> = Lazy::new(|| compile(r"(?:CPF|cpf)\s*:?\s*([\d.-]+)"));
static PHONE: Lazy<Regex> = Lazy::new(|| compile(r"(?i)(?:TEL|Telefone|id)\s*:?\s*(\d+)"));
static AMOUNT: Lazy<Regex> = Lazy::new(|| compile(r"(?i)(?:VALOR|R\$)\s*:?\s*([\d.,]+)"));
static BANK_BRANCH: Lazy<Regex> =
    Lazy::new(|| compile(r"(?i)(?:Ag|Agência)\.?\s*:?\s*([\d\-]{3,})"));
static BANK_ACCOUNT: Lazy<Regex> =
    Lazy::new(|| compile(r"(?i)(?:Conta|Cc|C/C)\.?\s*:?\s*([\d\-]{4,})"));
static BANK_NAME: Lazy<Regex> = Lazy::new(|| compile(r"(?i)Banco\s*:?\s*([A-Za-z0-9\s]+)"));

fn compile(pattern: &str) -> Regex {
    // Patterns are literals covered by tests; a failure here is a programming error.
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid field pattern {pattern:?}: {e}"))
}

/// Returns the first match of `field` in `text`, trimmed.
///
/// `None` when the pattern does not match or the captured value is blank.
pub fn extract(field: FieldKind, text: &str) -> Option<String> {
    field
        .pattern()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|v| !v.is_empty())
}
