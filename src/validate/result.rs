//! Validation result types.

use hookguard_model::EventKind;
use serde::Serialize;

/// Machine-readable kind of a blocking error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Matcher pattern absent or blank
    EmptyPattern,
    /// Matcher pattern does not compile
    InvalidPattern,
    /// Matcher without commands
    NoCommands,
    /// Command string absent or blank
    EmptyCommand,
}

impl ErrorKind {
    pub fn as_code(&self) -> &'static str {
        match self {
            ErrorKind::EmptyPattern => "EMPTY_PATTERN",
            ErrorKind::InvalidPattern => "INVALID_PATTERN",
            ErrorKind::NoCommands => "NO_COMMANDS",
            ErrorKind::EmptyCommand => "EMPTY_COMMAND",
        }
    }
}

/// Kind of an advisory finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// Command matched a dangerous-command heuristic
    DangerousCommand,
}

/// A structural problem that blocks saving the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub event: EventKind,
    pub kind: ErrorKind,

    /// Pattern of the offending matcher
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    /// The offending command
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,

    /// Position of the matcher within the event
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matcher_index: Option<usize>,

    /// Position of the command within its list
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command_index: Option<usize>,

    pub message: String,
}

impl ValidationError {
    /// `KIND:Event[matcher][command]`
    pub fn to_code(&self) -> String {
        let mut code = format!("{}:{}", self.kind.as_code(), self.event);
        if let Some(i) = self.matcher_index {
            code.push_str(&format!("[{}]", i));
        }
        if let Some(i) = self.command_index {
            code.push_str(&format!("[{}]", i));
        }
        code
    }
}

/// An advisory finding from the heuristic library. Never blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationWarning {
    pub event: EventKind,
    pub kind: WarningKind,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    /// The flagged command
    pub command: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub matcher_index: Option<usize>,

    pub command_index: usize,

    /// Heuristic that matched
    pub heuristic_id: String,

    pub message: String,
}

/// Outcome of validating one hooks document.
///
/// `valid` is derived from `errors` at construction and cannot be set
/// independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    valid: bool,
    errors: Vec<ValidationError>,
    warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn new(errors: Vec<ValidationError>, warnings: Vec<ValidationWarning>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    /// True when there are no errors. Warnings do not count.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn warnings(&self) -> &[ValidationWarning] {
        &self.warnings
    }

    /// Error codes in report order
    pub fn error_codes(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.to_code()).collect()
    }
}
