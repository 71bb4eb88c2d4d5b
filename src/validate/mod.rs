//! Validator - structural checks and security lint for hooks documents
//!
//! Structural problems (missing or invalid patterns, empty command lists,
//! blank commands) are errors and make the document invalid. Heuristic
//! matches from the pattern library are warnings only. Bad input is
//! reported as data; validation never fails.

mod report;
mod result;

pub use report::ValidationReport;
pub use result::{ErrorKind, ValidationError, ValidationResult, ValidationWarning, WarningKind};

use hookguard_lint::{Detection, PatternLibrary};
use hookguard_model::{
    DirectEvent, EventKind, HookCommand, HookMatcher, HooksConfiguration, MatcherEvent,
};
use regex_lite::Regex;
use tracing::{debug, warn};

/// Validate `config` against the built-in heuristics.
pub fn validate(config: &HooksConfiguration) -> ValidationResult {
    validate_with(PatternLibrary::builtin(), config)
}

/// Validator bound to a specific heuristic library
#[derive(Debug, Clone, Default)]
pub struct Validator {
    library: PatternLibrary,
}

impl Validator {
    pub fn new(library: PatternLibrary) -> Self {
        Self { library }
    }

    pub fn library(&self) -> &PatternLibrary {
        &self.library
    }

    /// Validate a whole document
    pub fn validate(&self, config: &HooksConfiguration) -> ValidationResult {
        validate_with(&self.library, config)
    }

    /// Heuristic findings for a single command, e.g. while it is being typed
    pub fn check_command(&self, command: &str) -> Vec<Detection> {
        self.library.detect(command)
    }
}

fn validate_with(library: &PatternLibrary, config: &HooksConfiguration) -> ValidationResult {
    let mut checker = Checker {
        library,
        errors: Vec::new(),
        warnings: Vec::new(),
    };

    for event in MatcherEvent::ALL {
        if let Some(matchers) = config.matchers(event) {
            for (index, matcher) in matchers.iter().enumerate() {
                checker.check_matcher(event.kind(), index, matcher);
            }
        }
    }

    for event in DirectEvent::ALL {
        if let Some(commands) = config.commands(event) {
            for (index, command) in commands.iter().enumerate() {
                checker.check_command(event.kind(), None, None, index, command);
            }
        }
    }

    if checker.errors.is_empty() {
        debug!(warnings = checker.warnings.len(), "validated hooks");
    } else {
        warn!(
            errors = checker.errors.len(),
            warnings = checker.warnings.len(),
            "hooks configuration has blocking errors"
        );
    }

    ValidationResult::new(checker.errors, checker.warnings)
}

struct Checker<'a> {
    library: &'a PatternLibrary,
    errors: Vec<ValidationError>,
    warnings: Vec<ValidationWarning>,
}

impl Checker<'_> {
    fn check_matcher(&mut self, event: EventKind, index: usize, matcher: &HookMatcher) {
        let pattern = matcher.pattern();

        match pattern {
            None => self.error(
                event,
                ErrorKind::EmptyPattern,
                None,
                Some(index),
                None,
                "Matcher pattern is missing".to_string(),
            ),
            Some(p) if p.trim().is_empty() => self.error(
                event,
                ErrorKind::EmptyPattern,
                pattern,
                Some(index),
                None,
                "Matcher pattern is empty".to_string(),
            ),
            Some(p) => {
                if let Err(e) = Regex::new(p) {
                    self.error(
                        event,
                        ErrorKind::InvalidPattern,
                        pattern,
                        Some(index),
                        None,
                        format!("Invalid matcher pattern '{}': {}", p, e),
                    );
                }
            }
        }

        if matcher.hooks.is_empty() {
            self.error(
                event,
                ErrorKind::NoCommands,
                pattern,
                Some(index),
                None,
                "Matcher has no commands defined".to_string(),
            );
        }

        for (command_index, command) in matcher.hooks.iter().enumerate() {
            self.check_command(event, pattern, Some(index), command_index, command);
        }
    }

    fn check_command(
        &mut self,
        event: EventKind,
        pattern: Option<&str>,
        matcher_index: Option<usize>,
        command_index: usize,
        command: &HookCommand,
    ) {
        if command.command.trim().is_empty() {
            self.errors.push(ValidationError {
                event,
                kind: ErrorKind::EmptyCommand,
                pattern: pattern.map(str::to_string),
                command: None,
                matcher_index,
                command_index: Some(command_index),
                message: "Command is empty".to_string(),
            });
            return;
        }

        for detection in self.library.detect(&command.command) {
            self.warnings.push(ValidationWarning {
                event,
                kind: WarningKind::DangerousCommand,
                pattern: pattern.map(str::to_string),
                command: command.command.clone(),
                matcher_index,
                command_index,
                heuristic_id: detection.heuristic_id,
                message: detection.message,
            });
        }
    }

    fn error(
        &mut self,
        event: EventKind,
        kind: ErrorKind,
        pattern: Option<&str>,
        matcher_index: Option<usize>,
        command_index: Option<usize>,
        message: String,
    ) {
        self.errors.push(ValidationError {
            event,
            kind,
            pattern: pattern.map(str::to_string),
            command: None,
            matcher_index,
            command_index,
            message,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hookguard_lint::CustomRule;

    fn pre(matchers: Vec<HookMatcher>) -> HooksConfiguration {
        let mut config = HooksConfiguration::default();
        config.set_matchers(MatcherEvent::PreToolUse, Some(matchers));
        config
    }

    fn kinds(result: &ValidationResult) -> Vec<ErrorKind> {
        result.errors().iter().map(|e| e.kind).collect()
    }

    #[test]
    fn test_valid_config() {
        let config = pre(vec![HookMatcher::new("Edit|Write", vec![HookCommand::new("cargo fmt")])]);
        let result = validate(&config);
        assert!(result.is_valid());
        assert!(result.errors().is_empty());
        assert!(result.warnings().is_empty());
    }

    #[test]
    fn test_empty_config_is_valid() {
        assert!(validate(&HooksConfiguration::default()).is_valid());
    }

    #[test]
    fn test_missing_pattern() {
        let config = pre(vec![HookMatcher {
            matcher: None,
            hooks: vec![HookCommand::new("ls")],
        }]);
        let result = validate(&config);
        assert!(!result.is_valid());
        assert_eq!(kinds(&result), vec![ErrorKind::EmptyPattern]);
    }

    #[test]
    fn test_blank_pattern() {
        let config = pre(vec![HookMatcher::new("   ", vec![HookCommand::new("ls")])]);
        let result = validate(&config);
        assert_eq!(kinds(&result), vec![ErrorKind::EmptyPattern]);
        assert_eq!(result.errors()[0].pattern.as_deref(), Some("   "));
    }

    #[test]
    fn test_invalid_pattern_is_distinct() {
        let config = pre(vec![HookMatcher::new("Bash(", vec![HookCommand::new("ls")])]);
        let result = validate(&config);
        assert_eq!(kinds(&result), vec![ErrorKind::InvalidPattern]);
        assert!(result.errors()[0].message.contains("Bash("));
        assert_ne!(result.errors()[0].message, "Matcher pattern is empty");
    }

    #[test]
    fn test_no_commands() {
        let config = pre(vec![HookMatcher::new("Bash", vec![])]);
        let result = validate(&config);
        assert_eq!(kinds(&result), vec![ErrorKind::NoCommands]);
    }

    #[test]
    fn test_empty_command_in_matcher() {
        let config = pre(vec![HookMatcher::new(
            "Bash",
            vec![HookCommand::new("echo ok"), HookCommand::new("  ")],
        )]);
        let result = validate(&config);
        assert_eq!(kinds(&result), vec![ErrorKind::EmptyCommand]);
        assert_eq!(result.errors()[0].command_index, Some(1));
    }

    #[test]
    fn test_empty_command_in_direct_event() {
        let mut config = HooksConfiguration::default();
        config.set_commands(DirectEvent::Notification, Some(vec![HookCommand::new("")]));
        let result = validate(&config);
        assert!(!result.is_valid());
        assert_eq!(result.errors()[0].event, EventKind::Notification);
        assert!(result.errors()[0].matcher_index.is_none());
    }

    #[test]
    fn test_errors_accumulate() {
        let config = pre(vec![
            HookMatcher::new("", vec![]),
            HookMatcher::new("[", vec![HookCommand::new("")]),
        ]);
        let result = validate(&config);
        assert_eq!(
            kinds(&result),
            vec![
                ErrorKind::EmptyPattern,
                ErrorKind::NoCommands,
                ErrorKind::InvalidPattern,
                ErrorKind::EmptyCommand,
            ]
        );
    }

    #[test]
    fn test_warnings_do_not_invalidate() {
        let mut config = HooksConfiguration::default();
        config.set_commands(
            DirectEvent::Stop,
            Some(vec![HookCommand::new("sudo rm -rf ~")]),
        );
        let result = validate(&config);
        assert!(result.is_valid());
        let ids: Vec<&str> = result.warnings().iter().map(|w| w.heuristic_id.as_str()).collect();
        assert_eq!(ids, vec!["rm-home", "sudo"]);
        assert!(result.warnings().iter().all(|w| w.command == "sudo rm -rf ~"));
    }

    #[test]
    fn test_blank_command_skips_heuristics() {
        let mut config = HooksConfiguration::default();
        config.set_commands(DirectEvent::Stop, Some(vec![HookCommand::new(" ")]));
        assert!(validate(&config).warnings().is_empty());
    }

    #[test]
    fn test_custom_library() {
        let library = PatternLibrary::default()
            .with_extra(vec![CustomRule {
                id: "no-npm".to_string(),
                pattern: r"\bnpm\b".to_string(),
                message: "Use pnpm".to_string(),
            }])
            .unwrap();
        let validator = Validator::new(library);
        let config = pre(vec![HookMatcher::new("Bash", vec![HookCommand::new("npm test")])]);

        let result = validator.validate(&config);

        assert!(result.is_valid());
        assert_eq!(result.warnings()[0].heuristic_id, "no-npm");
        assert_eq!(result.warnings()[0].pattern.as_deref(), Some("Bash"));
        assert_eq!(validator.check_command("npm ci").len(), 1);
    }
}
