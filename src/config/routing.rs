//! Routing configuration: support allowlist, alert channel and control tags

use serde::Deserialize;

use crate::domain::foundation::SupportAllowlist;
use crate::domain::tags::{
    TagRules, DEFAULT_CLOSURE_MARKER, DEFAULT_CLOSURE_TRIGGER, DEFAULT_SIMULATION_MARKER,
    DEFAULT_SIMULATION_TRIGGER, TAG_DELIMITER,
};

use super::error::ValidationError;

/// Routing configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RoutingConfig {
    /// Operator sender ids (comma-separated); the first one receives alerts
    #[serde(default)]
    pub support_numbers: String,

    /// Suffix of the alert chat id (`<primary>@<suffix>`)
    #[serde(default = "default_alert_suffix")]
    pub alert_suffix: String,

    #[serde(default = "default_simulation_marker")]
    pub simulation_marker: String,

    #[serde(default = "default_closure_marker")]
    pub closure_marker: String,

    #[serde(default = "default_simulation_trigger")]
    pub simulation_trigger: String,

    #[serde(default = "default_closure_trigger")]
    pub closure_trigger: String,
}

impl RoutingConfig {
    /// Get support numbers as a vector, blanks dropped
    pub fn support_numbers_list(&self) -> Vec<String> {
        self.support_numbers
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }

    pub fn support_allowlist(&self) -> Result<SupportAllowlist, ValidationError> {
        SupportAllowlist::new(self.support_numbers_list())
            .map_err(|_| ValidationError::EmptySupportNumbers)
    }

    pub fn tag_rules(&self) -> TagRules {
        TagRules {
            simulation_marker: self.simulation_marker.clone(),
            closure_marker: self.closure_marker.clone(),
            simulation_trigger: self.simulation_trigger.clone(),
            closure_trigger: self.closure_trigger.clone(),
        }
    }

    /// Validate routing configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.support_allowlist()?;

        let suffix = self.alert_suffix.trim();
        if suffix.is_empty() || suffix.contains('@') {
            return Err(ValidationError::InvalidAlertSuffix);
        }

        validate_marker(&self.simulation_marker, "routing.simulation_marker")?;
        validate_marker(&self.closure_marker, "routing.closure_marker")?;

        if self.simulation_trigger.trim().is_empty() {
            return Err(ValidationError::EmptyTriggerPhrase("routing.simulation_trigger"));
        }
        if self.closure_trigger.trim().is_empty() {
            return Err(ValidationError::EmptyTriggerPhrase("routing.closure_trigger"));
        }
        Ok(())
    }
}

fn validate_marker(marker: &str, field: &'static str) -> Result<(), ValidationError> {
    let name = marker
        .strip_prefix(TAG_DELIMITER)
        .ok_or(ValidationError::InvalidTagMarker(field))?;
    let name = name.trim_end_matches(':').trim();
    if name.is_empty() || name.contains(TAG_DELIMITER) {
        return Err(ValidationError::InvalidTagMarker(field));
    }
    Ok(())
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            support_numbers: String::new(),
            alert_suffix: default_alert_suffix(),
            simulation_marker: default_simulation_marker(),
            closure_marker: default_closure_marker(),
            simulation_trigger: default_simulation_trigger(),
            closure_trigger: default_closure_trigger(),
        }
    }
}

fn default_alert_suffix() -> String {
    "lid".to_string()
}

fn default_simulation_marker() -> String {
    DEFAULT_SIMULATION_MARKER.to_string()
}

fn default_closure_marker() -> String {
    DEFAULT_CLOSURE_MARKER.to_string()
}

fn default_simulation_trigger() -> String {
    DEFAULT_SIMULATION_TRIGGER.to_string()
}

fn default_closure_trigger() -> String {
    DEFAULT_CLOSURE_TRIGGER.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> RoutingConfig {
        RoutingConfig {
            support_numbers: "215470020018431, 556282027373,,6282027373".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_support_numbers_parsing() {
        let config = configured();
        assert_eq!(
            config.support_numbers_list(),
            vec!["215470020018431", "556282027373", "6282027373"]
        );
        let allowlist = config.support_allowlist().unwrap();
        assert_eq!(allowlist.primary(), "215470020018431");
        assert_eq!(
            allowlist.alert_chat_id(&config.alert_suffix).as_str(),
            "215470020018431@lid"
        );
    }

    #[test]
    fn test_defaults_match_tag_rules() {
        assert_eq!(configured().tag_rules(), TagRules::default());
        assert!(configured().validate().is_ok());
    }

    #[test]
    fn test_validation_requires_support_numbers() {
        let config = RoutingConfig {
            support_numbers: " , ".to_string(),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::EmptySupportNumbers));
    }

    #[test]
    fn test_validation_rejects_bad_markers() {
        let config = RoutingConfig {
            simulation_marker: "SUPORTE_ALERT:".to_string(),
            ..configured()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidTagMarker("routing.simulation_marker"))
        );

        let config = RoutingConfig {
            closure_marker: "|||:".to_string(),
            ..configured()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidTagMarker("routing.closure_marker"))
        );
    }

    #[test]
    fn test_validation_rejects_empty_trigger() {
        let config = RoutingConfig {
            closure_trigger: "   ".to_string(),
            ..configured()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::EmptyTriggerPhrase("routing.closure_trigger"))
        );
    }

    #[test]
    fn test_validation_rejects_alert_suffix_with_at() {
        let config = RoutingConfig {
            alert_suffix: "@lid".to_string(),
            ..configured()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidAlertSuffix));
    }
}
