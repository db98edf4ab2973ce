//! Control tag kinds.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Automation signal embedded in a model reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TagKind {
    /// Customer sent personal data; support must run a simulation.
    SimulationAlert,
    /// Customer accepted and sent bank details; support must pay out.
    ClosureAlert,
}

impl TagKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TagKind::SimulationAlert => "SIMULATION_ALERT",
            TagKind::ClosureAlert => "CLOSURE_ALERT",
        }
    }
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_kind_serializes_screaming_snake_case() {
        let json = serde_json::to_string(&TagKind::SimulationAlert).unwrap();
        assert_eq!(json, "\"SIMULATION_ALERT\"");

        let json = serde_json::to_string(&TagKind::ClosureAlert).unwrap();
        assert_eq!(json, "\"CLOSURE_ALERT\"");
    }
}
