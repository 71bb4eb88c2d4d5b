//! Compiled heuristic library.

use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::sync::OnceLock;

use crate::heuristics::{Detector, BUILTIN_HEURISTICS};

/// A heuristic supplied at runtime (e.g. from a lint config file).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomRule {
    /// Identifier, must not collide with any rule already in the library
    pub id: String,
    /// Regular expression searched anywhere in the command
    pub pattern: String,
    /// Warning shown when the rule matches
    pub message: String,
}

/// One heuristic that matched a command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Detection {
    /// Identifier of the heuristic
    pub heuristic_id: String,
    /// Warning text
    pub message: String,
}

/// Errors building a library from custom rules.
#[derive(Debug, thiserror::Error)]
pub enum LintError {
    #[error("heuristic '{id}': invalid pattern: {reason}")]
    InvalidRule { id: String, reason: String },

    #[error("heuristic '{0}': identifier already in use")]
    DuplicateId(String),

    #[error("heuristic with empty identifier")]
    EmptyId,
}

#[derive(Clone)]
enum RuleCheck {
    Regex(Regex),
    Predicate(fn(&str) -> bool),
}

impl fmt::Debug for RuleCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleCheck::Regex(re) => f.debug_tuple("Regex").field(&re.as_str()).finish(),
            RuleCheck::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

#[derive(Debug, Clone)]
struct Rule {
    id: String,
    check: RuleCheck,
    message: String,
}

impl Rule {
    fn matches(&self, command: &str) -> bool {
        match &self.check {
            RuleCheck::Regex(re) => re.is_match(command),
            RuleCheck::Predicate(check) => check(command),
        }
    }
}

/// An ordered, compiled set of heuristics.
///
/// Evaluation never short-circuits: every rule is checked and each match
/// produces one detection.
#[derive(Debug, Clone)]
pub struct PatternLibrary {
    rules: Vec<Rule>,
}

static BUILTIN: OnceLock<PatternLibrary> = OnceLock::new();

impl PatternLibrary {
    /// The built-in library, compiled on first use
    pub fn builtin() -> &'static PatternLibrary {
        BUILTIN.get_or_init(Self::compile_builtin)
    }

    fn compile_builtin() -> PatternLibrary {
        let rules = BUILTIN_HEURISTICS
            .iter()
            .map(|h| Rule {
                id: h.id.to_string(),
                check: match h.detector {
                    Detector::Regex(pattern) => RuleCheck::Regex(
                        Regex::new(pattern).expect("built-in heuristic regex compiles"),
                    ),
                    Detector::Predicate(check) => RuleCheck::Predicate(check),
                },
                message: h.message.to_string(),
            })
            .collect();
        PatternLibrary { rules }
    }

    /// Append custom rules after the existing ones
    pub fn with_extra<I>(mut self, extra: I) -> Result<Self, LintError>
    where
        I: IntoIterator<Item = CustomRule>,
    {
        let mut ids: HashSet<String> = self.rules.iter().map(|r| r.id.clone()).collect();
        for rule in extra {
            if rule.id.trim().is_empty() {
                return Err(LintError::EmptyId);
            }
            if !ids.insert(rule.id.clone()) {
                return Err(LintError::DuplicateId(rule.id));
            }
            if rule.pattern.trim().is_empty() {
                return Err(LintError::InvalidRule {
                    id: rule.id,
                    reason: "pattern is empty".to_string(),
                });
            }
            let re = Regex::new(&rule.pattern).map_err(|e| LintError::InvalidRule {
                id: rule.id.clone(),
                reason: e.to_string(),
            })?;
            self.rules.push(Rule {
                id: rule.id,
                check: RuleCheck::Regex(re),
                message: rule.message,
            });
        }
        Ok(self)
    }

    /// Drop rules by identifier. Unknown identifiers are ignored.
    pub fn without<S: AsRef<str>>(mut self, ids: &[S]) -> Self {
        self.rules
            .retain(|rule| !ids.iter().any(|id| id.as_ref() == rule.id));
        self
    }

    /// Every rule that matches `command`, in library order
    pub fn detect(&self, command: &str) -> Vec<Detection> {
        self.rules
            .iter()
            .filter(|rule| rule.matches(command))
            .map(|rule| Detection {
                heuristic_id: rule.id.clone(),
                message: rule.message.clone(),
            })
            .collect()
    }

    /// Rule identifiers in evaluation order
    pub fn ids(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.id.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for PatternLibrary {
    fn default() -> Self {
        Self::builtin().clone()
    }
}
