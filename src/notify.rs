//! User feedback after a copy.
//!
//! The core only needs a `show(message, detail)` capability. The CLI prints
//! to stderr; [`NullNotifier`] is used when notifications are switched off.

use crate::clipboard::CopyResult;

/// Transient feedback after a copy: a headline and the copied text.
pub trait Notifier {
    fn show(&mut self, message: &str, detail: &str);
}

/// Writes `message` and the indented `detail` to stderr.
#[derive(Debug, Default)]
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn show(&mut self, message: &str, detail: &str) {
        eprintln!("{}", message);
        if !detail.is_empty() {
            eprintln!("  {}", detail);
        }
    }
}

/// Shows nothing; used when notifications are turned off.
#[derive(Debug, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn show(&mut self, _message: &str, _detail: &str) {}
}

/// `markdown` or `plain text`, as used in messages and logs.
pub fn mode_label(want_markdown: bool) -> &'static str {
    if want_markdown { "markdown" } else { "plain text" }
}

/// Headline for a finished write.
pub fn result_message(result: &CopyResult, want_markdown: bool) -> String {
    if result.succeeded {
        format!("URL copied as {}", mode_label(want_markdown))
    } else {
        "Failed to copy URL".to_string()
    }
}

/// Headline when the clipboard capability is missing.
pub const UNSUPPORTED_MESSAGE: &str = "Clipboard not supported";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::CopyMethod;

    fn result(succeeded: bool) -> CopyResult {
        CopyResult {
            text: "https://example.com".into(),
            method: CopyMethod::Fallback,
            succeeded,
        }
    }

    #[test]
    fn success_message_names_the_mode() {
        assert_eq!(result_message(&result(true), true), "URL copied as markdown");
        assert_eq!(result_message(&result(true), false), "URL copied as plain text");
    }

    #[test]
    fn failure_message() {
        assert_eq!(result_message(&result(false), true), "Failed to copy URL");
    }
}
