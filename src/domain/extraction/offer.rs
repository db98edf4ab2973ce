//! Offer fields from an operator command.

use super::fields::{extract, FieldKind};

/// Minimum comma-separated segments for the positional fallback.
const FALLBACK_SEGMENTS: usize = 3;

/// Identifier, phone and amount as found in a support command.
///
/// Each field is `None` when it could not be resolved; an offer is only
/// actionable when [`OfferPayload::complete`] returns a value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OfferPayload {
    pub identifier: Option<String>,
    pub phone: Option<String>,
    pub amount: Option<String>,
}

/// All three offer fields, guaranteed non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompleteOffer {
    pub identifier: String,
    pub phone: String,
    pub amount: String,
}

impl OfferPayload {
    /// Extracts labeled fields, falling back to `identifier, phone, amount`
    /// positional parsing when any label is missing.
    ///
    /// The fallback replaces all three values, including ones the labeled
    /// patterns did find.
    pub fn from_command(body: &str) -> Self {
        let labeled = Self {
            identifier: extract(FieldKind::Identifier, body),
            phone: extract(FieldKind::Phone, body),
            amount: extract(FieldKind::Amount, body),
        };

        if labeled.is_filled() {
            return labeled;
        }

        Self::from_segments(body).unwrap_or(labeled)
    }

    fn from_segments(body: &str) -> Option<Self> {
        let parts: Vec<&str> = body.split(',').map(str::trim).collect();
        if parts.len() < FALLBACK_SEGMENTS {
            return None;
        }
        let field = |s: &str| Some(s.to_string()).filter(|v| !v.is_empty());
        Some(Self {
            identifier: field(parts[0]),
            phone: field(parts[1]),
            amount: field(parts[2]),
        })
    }

    fn is_filled(&self) -> bool {
        self.identifier.is_some() && self.phone.is_some() && self.amount.is_some()
    }

    /// Returns the complete offer, or `None` if any field is missing.
    pub fn complete(&self) -> Option<CompleteOffer> {
        Some(CompleteOffer {
            identifier: self.identifier.clone()?,
            phone: self.phone.clone()?,
            amount: self.amount.clone()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labeled_command_is_complete() {
        let offer = OfferPayload::from_command("CPF: 123.456.789-00, TEL: 556282027373, VALOR: 1500,00")
            .complete()
            .unwrap();
        assert_eq!(offer.identifier, "123.456.789-00");
        assert_eq!(offer.phone, "556282027373");
        assert_eq!(offer.amount, "1500,00");
    }

    #[test]
    fn unlabeled_command_uses_positional_fallback() {
        let offer = OfferPayload::from_command("111222333, 556282027373, 2000")
            .complete()
            .unwrap();
        assert_eq!(offer.identifier, "111222333");
        assert_eq!(offer.phone, "556282027373");
        assert_eq!(offer.amount, "2000");
    }

    #[test]
    fn fallback_overrides_partial_labels() {
        // The identifier label matches, but phone and amount don't; the
        // positional parse wins for all three fields.
        let payload = OfferPayload::from_command("cpf 999, 5562988887777, 3000");
        assert_eq!(payload.identifier.as_deref(), Some("cpf 999"));
        assert_eq!(payload.phone.as_deref(), Some("5562988887777"));
        assert_eq!(payload.amount.as_deref(), Some("3000"));
    }

    #[test]
    fn too_few_segments_is_incomplete() {
        let payload = OfferPayload::from_command("CPF: 123, VALOR: 500");
        assert_eq!(payload.identifier.as_deref(), Some("123"));
        assert_eq!(payload.phone, None);
        assert_eq!(payload.amount.as_deref(), Some("500"));
        assert!(payload.complete().is_none());
    }

    #[test]
    fn blank_segment_is_incomplete() {
        let payload = OfferPayload::from_command("111, , 2000");
        assert!(payload.complete().is_none());
    }

    #[test]
    fn extra_segments_are_ignored() {
        let offer = OfferPayload::from_command("111, 5562, 2000, obs: urgente")
            .complete()
            .unwrap();
        assert_eq!(offer.amount, "2000");
    }
}
