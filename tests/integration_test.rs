use std::fs;

use copy_url_lib::clipboard::{
    ClipboardError, ClipboardWriter, CopyMethod, PrimaryClipboard, ScratchSelection, SelectionCopy,
};
use copy_url_lib::notify::Notifier;
use copy_url_lib::trigger::{Invocation, KeyChord, Platform, copy_url, resolve_chord};
use pretty_assertions::assert_eq;

struct FakePrimary {
    available: bool,
    succeed: bool,
}

impl PrimaryClipboard for FakePrimary {
    fn is_available(&self) -> bool {
        self.available
    }

    fn write_text(&mut self, _text: &str) -> Result<(), ClipboardError> {
        if self.succeed {
            Ok(())
        } else {
            Err(ClipboardError::PrimaryWriteFailed("permission denied".into()))
        }
    }
}

struct FakeCopyCommand {
    succeed: bool,
}

impl SelectionCopy for FakeCopyCommand {
    fn copy_selection(&mut self, selection: &ScratchSelection) -> Result<bool, ClipboardError> {
        assert!(!fs::read_to_string(selection.path())?.is_empty());
        Ok(self.succeed)
    }
}

#[derive(Default)]
struct Recorder {
    shown: Vec<(String, String)>,
}

impl Notifier for Recorder {
    fn show(&mut self, message: &str, detail: &str) {
        self.shown.push((message.to_owned(), detail.to_owned()));
    }
}

#[test]
fn zendesk_shortcut_copies_markdown_ticket_link() {
    let scratch = tempfile::tempdir().expect("tempdir");
    let mut writer = ClipboardWriter::new(
        FakePrimary { available: true, succeed: true },
        FakeCopyCommand { succeed: true },
    )
    .with_scratch_dir(scratch.path());
    let mut notifier = Recorder::default();

    let chord: KeyChord = "Ctrl+Shift+C".parse().expect("chord");
    let want_markdown = resolve_chord(&chord, Platform::Other).expect("bound");
    let invocation = Invocation::new(
        "http://localhost:3000/tests/example-zendesk.html",
        "Ticket: My really hard support problem – Example Support – Zendesk",
        want_markdown,
    )
    .with_override_url(Some("https://example.zendesk.com/agent/tickets/122694".into()));

    let result = copy_url(&invocation, &mut writer, &mut notifier).expect("supported");

    let expected = "[Ticket 122694 - My really hard support problem](https://example.zendesk.com/agent/tickets/122694)";
    assert_eq!(result.text, expected);
    assert_eq!(result.method, CopyMethod::Primary);
    assert!(result.succeeded);
    assert_eq!(
        notifier.shown,
        vec![("URL copied as markdown".to_string(), expected.to_string())]
    );
}

#[test]
fn rejected_primary_falls_back_and_leaves_no_scratch_file() {
    let scratch = tempfile::tempdir().expect("tempdir");
    let mut writer = ClipboardWriter::new(
        FakePrimary { available: true, succeed: false },
        FakeCopyCommand { succeed: true },
    )
    .with_scratch_dir(scratch.path());
    let mut notifier = Recorder::default();

    let invocation = Invocation::new("https://foo.force.com/page?x=1", "Case 42", false);
    let result = copy_url(&invocation, &mut writer, &mut notifier).expect("supported");

    assert_eq!(result.text, "https://foo.force.com/page");
    assert_eq!(result.method, CopyMethod::Fallback);
    assert!(result.succeeded);
    assert_eq!(notifier.shown[0].0, "URL copied as plain text");
    assert!(fs::read_dir(scratch.path()).expect("read_dir").next().is_none());
}

#[test]
fn failed_fallback_is_reported_not_raised() {
    let scratch = tempfile::tempdir().expect("tempdir");
    let mut writer = ClipboardWriter::new(
        FakePrimary { available: true, succeed: false },
        FakeCopyCommand { succeed: false },
    )
    .with_scratch_dir(scratch.path());
    let mut notifier = Recorder::default();

    let invocation = Invocation::new(
        "https://example.atlassian.net/browse/TEST-123",
        "TEST-123 [Bug] Some issue with brackets",
        true,
    );
    let result = copy_url(&invocation, &mut writer, &mut notifier).expect("supported");

    assert!(!result.succeeded);
    assert_eq!(result.method, CopyMethod::Fallback);
    assert_eq!(notifier.shown[0].0, "Failed to copy URL");
    assert!(fs::read_dir(scratch.path()).expect("read_dir").next().is_none());
}

#[test]
fn missing_clipboard_is_reported_and_returned() {
    let scratch = tempfile::tempdir().expect("tempdir");
    let mut writer = ClipboardWriter::new(
        FakePrimary {
            available: false,
            succeed: true,
        },
        FakeCopyCommand { succeed: true },
    )
    .with_scratch_dir(scratch.path());
    let mut notifier = Recorder::default();

    let invocation = Invocation::new("https://example.com/", "Example", true);
    let err = copy_url(&invocation, &mut writer, &mut notifier).unwrap_err();

    assert!(matches!(err, ClipboardError::Unsupported));
    assert_eq!(
        notifier.shown,
        vec![(
            "Clipboard not supported".to_string(),
            "clipboard capability not available".to_string()
        )]
    );
    assert!(fs::read_dir(scratch.path()).expect("read_dir").next().is_none());
}
