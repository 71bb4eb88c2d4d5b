//! Shell escaping for double-quoted contexts.
//!
//! These helpers are for display and for embedding a command inside a
//! larger command line. They are not a security boundary: anything that
//! must reach a process intact should be passed as an argv element, never
//! spliced into a shell string.

/// Backslash-escape `\`, `"`, `$` and `` ` `` so `command` can sit inside
/// double quotes without being expanded.
pub fn escape_for_shell(command: &str) -> String {
    let mut escaped = String::with_capacity(command.len());
    for ch in command.chars() {
        if matches!(ch, '\\' | '"' | '$' | '`') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// [`escape_for_shell`] wrapped in double quotes.
pub fn quote_for_shell(command: &str) -> String {
    format!("\"{}\"", escape_for_shell(command))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(escape_for_shell("echo hello world"), "echo hello world");
    }

    #[test]
    fn test_escapes_special_characters() {
        assert_eq!(escape_for_shell(r#"echo "$HOME""#), r#"echo \"\$HOME\""#);
        assert_eq!(escape_for_shell("echo `id`"), "echo \\`id\\`");
        assert_eq!(escape_for_shell(r"C:\tmp"), r"C:\\tmp");
    }

    #[test]
    fn test_single_quotes_untouched() {
        assert_eq!(escape_for_shell("echo 'a b'"), "echo 'a b'");
    }

    #[test]
    fn test_input_not_mutated() {
        let original = String::from("say \"hi\"");
        let escaped = escape_for_shell(&original);
        assert_eq!(original, "say \"hi\"");
        assert_ne!(escaped, original);
    }

    #[test]
    fn test_quote_for_shell() {
        assert_eq!(quote_for_shell("a$b"), "\"a\\$b\"");
    }
}
