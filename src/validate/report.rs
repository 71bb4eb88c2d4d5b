//! Validation report output
//!
//! Structured JSON and human-readable renderings of a validation result
//! for the `validate` and `check` commands.

use serde::Serialize;

use super::{ValidationError, ValidationResult, ValidationWarning};

/// Report for one validated hooks document
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    /// What was validated (scope name or file path)
    pub source: String,

    /// Machine-readable error codes
    pub error_codes: Vec<String>,

    /// Validity, errors and warnings
    #[serde(flatten)]
    pub result: ValidationResult,
}

impl ValidationReport {
    pub fn new(source: impl Into<String>, result: ValidationResult) -> Self {
        Self {
            source: source.into(),
            error_codes: result.error_codes(),
            result,
        }
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Human-readable rendering
    pub fn to_human(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!("Source: {}", self.source));
        lines.push(String::new());

        if self.result.is_valid() {
            lines.push("Result: VALID".to_string());
        } else {
            lines.push("Result: INVALID".to_string());
        }

        let errors = self.result.errors();
        if !errors.is_empty() {
            lines.push(String::new());
            lines.push(format!("Errors ({}):", errors.len()));
            for error in errors {
                lines.push(format!("  - {}", format_error(error)));
            }
        }

        let warnings = self.result.warnings();
        if !warnings.is_empty() {
            lines.push(String::new());
            lines.push(format!("Warnings ({}):", warnings.len()));
            for warning in warnings {
                lines.push(format!("  - {}", format_warning(warning)));
            }
        }

        lines.join("\n")
    }
}

fn location(event: &str, pattern: Option<&str>) -> String {
    match pattern {
        Some(p) => format!("{} '{}'", event, p),
        None => event.to_string(),
    }
}

fn format_error(error: &ValidationError) -> String {
    format!(
        "{}: {}",
        location(error.event.as_str(), error.pattern.as_deref()),
        error.message
    )
}

fn format_warning(warning: &ValidationWarning) -> String {
    format!(
        "{}: {} [{}]\n      {}",
        location(warning.event.as_str(), warning.pattern.as_deref()),
        warning.message,
        warning.heuristic_id,
        warning.command
    )
}
