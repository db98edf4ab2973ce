//! Detection, parsing and stripping of control tags in model output.
//!
//! A tag is written by the model as `|||<KIND>:<payload>|||`. Tags drive
//! support automation and must never reach the customer.

use once_cell::sync::Lazy;
use regex::Regex;

use super::TagKind;

/// Delimiter opening and closing every tag.
pub const TAG_DELIMITER: &str = "|||";

pub const DEFAULT_SIMULATION_MARKER: &str = "|||SUPORTE_ALERT:";
pub const DEFAULT_CLOSURE_MARKER: &str = "|||FECHAMENTO_ALERT:";
pub const DEFAULT_SIMULATION_TRIGGER: &str = "Vou verificar a melhor proposta";
pub const DEFAULT_CLOSURE_TRIGGER: &str = "Já encaminhei para o nosso financeiro";

/// Note used when a simulation was detected without a readable payload.
pub const DEFAULT_SIMULATION_NOTE: &str = "Consultar histórico.";

// From a delimiter to the next delimiter, or to the end when unterminated.
static TAG_SPAN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)\|\|\|.*?(?:\|\|\||\z)")
        .unwrap_or_else(|e| panic!("invalid tag span pattern: {e}"))
});

/// Removes every tag span and trims the result.
///
/// Idempotent: the output never contains a delimiter, so a second pass
/// only trims already-trimmed text.
pub fn strip_tags(text: &str) -> String {
    TAG_SPAN.replace_all(text, "").trim().to_string()
}

/// Markers and trigger phrases that identify each tag kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRules {
    pub simulation_marker: String,
    pub closure_marker: String,
    pub simulation_trigger: String,
    pub closure_trigger: String,
}

impl Default for TagRules {
    fn default() -> Self {
        Self {
            simulation_marker: DEFAULT_SIMULATION_MARKER.to_string(),
            closure_marker: DEFAULT_CLOSURE_MARKER.to_string(),
            simulation_trigger: DEFAULT_SIMULATION_TRIGGER.to_string(),
            closure_trigger: DEFAULT_CLOSURE_TRIGGER.to_string(),
        }
    }
}

impl TagRules {
    /// Which tag, if any, the reply carries.
    ///
    /// A kind matches on its explicit marker or its trigger phrase.
    /// Simulation is checked first, so it wins when both are present.
    pub fn classify(&self, text: &str) -> Option<TagKind> {
        if text.contains(&self.simulation_marker) || text.contains(&self.simulation_trigger) {
            Some(TagKind::SimulationAlert)
        } else if text.contains(&self.closure_marker) || text.contains(&self.closure_trigger) {
            Some(TagKind::ClosureAlert)
        } else {
            None
        }
    }

    /// Payload of the simulation tag, up to the closing delimiter or end of text.
    ///
    /// Falls back to [`DEFAULT_SIMULATION_NOTE`] when the marker is absent
    /// (detection came from the trigger phrase) or the payload is blank.
    pub fn simulation_note(&self, text: &str) -> String {
        let Some(start) = text.find(&self.simulation_marker) else {
            return DEFAULT_SIMULATION_NOTE.to_string();
        };
        let rest = &text[start + self.simulation_marker.len()..];
        let end = rest.find(TAG_DELIMITER).unwrap_or(rest.len());
        let note = rest[..end].trim();

        if note.is_empty() {
            DEFAULT_SIMULATION_NOTE.to_string()
        } else {
            note.to_string()
        }
    }
}
