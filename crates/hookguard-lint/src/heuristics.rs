//! The built-in heuristic table.
//!
//! Adding a heuristic means adding a row here; the library compiles the
//! table once and evaluates every row against each command.

use std::fmt;

/// Flags that make `rm` both recursive and forced, in any spelling.
macro_rules! rm_recursive_force {
    () => {
        r"\brm\s+(?:-[a-zA-Z]*[rR][a-zA-Z]*f[a-zA-Z]*|-[a-zA-Z]*f[a-zA-Z]*[rR][a-zA-Z]*|-[rR]\s+-f|-f\s+-[rR]|--recursive\s+--force|--force\s+--recursive)\s+(?:--\s+)?"
    };
}

/// How a heuristic inspects a command.
#[derive(Clone, Copy)]
pub enum Detector {
    /// Regular expression searched anywhere in the command
    Regex(&'static str),
    /// Check that cannot be expressed without lookaround
    Predicate(fn(&str) -> bool),
}

impl fmt::Debug for Detector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Detector::Regex(pattern) => f.debug_tuple("Regex").field(pattern).finish(),
            Detector::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

/// A named dangerous-command rule.
#[derive(Debug, Clone, Copy)]
pub struct Heuristic {
    /// Stable identifier, usable to disable the rule
    pub id: &'static str,
    pub detector: Detector,
    /// Warning shown to the user when the rule matches
    pub message: &'static str,
}

/// Built-in heuristics in evaluation order.
pub const BUILTIN_HEURISTICS: &[Heuristic] = &[
    Heuristic {
        id: "rm-root",
        detector: Detector::Regex(concat!(rm_recursive_force!(), r"/\*?(?:\s|;|&|\||$)")),
        message: "Recursive delete of the filesystem root (rm -rf /)",
    },
    Heuristic {
        id: "rm-home",
        detector: Detector::Regex(concat!(
            rm_recursive_force!(),
            r#""?(?:~|\$HOME|\$\{HOME\})/?\*?"?(?:\s|;|&|\||$)"#
        )),
        message: "Recursive delete of the home directory (rm -rf ~)",
    },
    Heuristic {
        id: "fork-bomb",
        detector: Detector::Regex(r":\s*\(\s*\)\s*\{[^}]*:\s*\|\s*:\s*&[^}]*\}\s*;\s*:"),
        message: "Fork bomb pattern detected",
    },
    Heuristic {
        id: "remote-exec",
        detector: Detector::Regex(r"\b(?:curl|wget)\b[^|]*\|\s*(?:sudo\s+)?(?:ba|z|da|k|fi)?sh\b"),
        message: "Downloading and executing remote code (network download piped into a shell)",
    },
    Heuristic {
        id: "block-device-write",
        detector: Detector::Regex(
            r">\s*/dev/(?:sd[a-z]|hd[a-z]|vd[a-z]|xvd[a-z]|nvme[0-9]|mmcblk[0-9]|disk[0-9])|\bdd\b[^|;&]*\bof=/dev/(?:sd|hd|vd|xvd|nvme|mmcblk|disk)",
        ),
        message: "Direct write to a raw block device",
    },
    Heuristic {
        id: "mkfs",
        detector: Detector::Regex(r"\bmkfs(?:\.[a-zA-Z0-9]+)?\b"),
        message: "Filesystem format command (mkfs)",
    },
    Heuristic {
        id: "sudo",
        detector: Detector::Regex(r"\bsudo\s+"),
        message: "Elevated privileges requested (sudo)",
    },
    Heuristic {
        id: "chmod-777",
        detector: Detector::Regex(r"\bchmod\s+(?:-[a-zA-Z]+\s+)*0?777\b"),
        message: "Setting world-writable permissions (chmod 777)",
    },
    Heuristic {
        id: "unquoted-variable",
        detector: Detector::Predicate(has_unquoted_variable),
        message: "Unquoted shell variable detected, potential injection risk",
    },
];

/// Any `$` in a command that never contains `"$`.
///
/// Deliberately coarse: `echo "$HOME" $PATH` passes, `echo $HOME` does not.
fn has_unquoted_variable(command: &str) -> bool {
    command.contains('$') && !command.contains("\"$")
}
