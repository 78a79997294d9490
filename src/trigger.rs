//! Trigger: keyboard chords, invocation parameters and the copy pipeline.
//!
//! Platform and URL override are passed in explicitly on [`Invocation`]
//! rather than read from process-wide state, so the whole pipeline can be
//! driven from tests with fake clipboards.

use std::str::FromStr;

use thiserror::Error;
use tracing::{debug, info};

use crate::clipboard::{
    ClipboardError, ClipboardWriter, CopyResult, PrimaryClipboard, SelectionCopy,
};
use crate::format::FormatRequest;
use crate::notify::{self, Notifier};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Mac,
    Other,
}

impl Platform {
    /// Classify a platform string such as `MacIntel`, `mac` or `Linux x86_64`.
    pub fn from_platform_string(s: &str) -> Self {
        if s.to_lowercase().contains("mac") {
            Platform::Mac
        } else {
            Platform::Other
        }
    }

    /// Platform this binary was built for.
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Platform::Mac
        } else {
            Platform::Other
        }
    }

    pub fn modifier_name(self) -> &'static str {
        match self {
            Platform::Mac => "Cmd",
            Platform::Other => "Ctrl",
        }
    }
}

/// Start-up hint naming the plain-text shortcut for `platform`.
pub fn shortcut_hint(platform: Platform) -> String {
    format!("Use {}+Shift+C to copy URL.", platform.modifier_name())
}

/// A pressed key combination. `code` uses DOM key codes (`KeyC`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyChord {
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid key chord: {0}")]
pub struct ParseChordError(String);

impl FromStr for KeyChord {
    type Err = ParseChordError;

    /// Parse `Ctrl+Shift+C`, `cmd+shift+c`, `Meta+Shift+KeyC`...
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chord = KeyChord::default();
        for part in s.split('+').map(str::trim) {
            match part.to_lowercase().as_str() {
                "ctrl" | "control" => chord.ctrl = true,
                "cmd" | "meta" | "command" | "super" => chord.meta = true,
                "shift" => chord.shift = true,
                "" => return Err(ParseChordError(s.to_string())),
                _ if !chord.code.is_empty() => return Err(ParseChordError(s.to_string())),
                key if key.len() == 1 && key.chars().all(|c| c.is_ascii_alphabetic()) => {
                    chord.code = format!("Key{}", key.to_uppercase());
                }
                _ => chord.code = part.to_string(),
            }
        }
        if chord.code.is_empty() {
            return Err(ParseChordError(s.to_string()));
        }
        Ok(chord)
    }
}

/// Map a chord to a copy mode: `Some(false)` plain text, `Some(true)`
/// markdown, `None` for unbound chords.
///
/// Plain text is `Shift` + the platform modifier + `C`; markdown is always
/// `Ctrl+Shift+C`. Off macOS both bindings match the same chord and the
/// markdown copy lands last, so markdown is what the user gets.
pub fn resolve_chord(chord: &KeyChord, platform: Platform) -> Option<bool> {
    if chord.code != "KeyC" || !chord.shift {
        return None;
    }
    let plain = match platform {
        Platform::Mac => chord.meta,
        Platform::Other => chord.ctrl,
    };
    let markdown = chord.ctrl;
    if markdown {
        Some(true)
    } else if plain {
        Some(false)
    } else {
        None
    }
}

/// Everything one copy needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub raw_url: String,
    pub page_title: String,
    pub want_markdown: bool,
    pub override_url: Option<String>,
}

impl Invocation {
    pub fn new(
        raw_url: impl Into<String>,
        page_title: impl Into<String>,
        want_markdown: bool,
    ) -> Self {
        Self {
            raw_url: raw_url.into(),
            page_title: page_title.into(),
            want_markdown,
            override_url: None,
        }
    }

    /// Replace the page URL, e.g. when testing against a local copy.
    pub fn with_override_url(mut self, url: Option<String>) -> Self {
        self.override_url = url;
        self
    }

    /// The override wins when it is set and non-empty.
    pub fn effective_url(&self) -> &str {
        match self.override_url.as_deref() {
            Some(u) if !u.is_empty() => u,
            _ => &self.raw_url,
        }
    }

    /// The formatter input, with the override already applied.
    pub fn request(&self) -> FormatRequest {
        FormatRequest::new(self.effective_url(), self.page_title.as_str(), self.want_markdown)
    }
}

/// Format, write and report one invocation.
///
/// The `Unsupported` case is shown to the user and then returned; every
/// other outcome is a [`CopyResult`].
pub fn copy_url<P, F, N>(
    invocation: &Invocation,
    writer: &mut ClipboardWriter<P, F>,
    notifier: &mut N,
) -> Result<CopyResult, ClipboardError>
where
    P: PrimaryClipboard,
    F: SelectionCopy,
    N: Notifier + ?Sized,
{
    let text = invocation.request().format();
    debug!(url = invocation.effective_url(), markdown = invocation.want_markdown, "formatted");

    let result = match writer.write(&text) {
        Ok(r) => r,
        Err(e) => {
            notifier.show(notify::UNSUPPORTED_MESSAGE, &e.to_string());
            return Err(e);
        }
    };

    if result.succeeded {
        info!(
            "URL copied as {}: {}",
            notify::mode_label(invocation.want_markdown),
            result.text
        );
    }
    notifier.show(
        &notify::result_message(&result, invocation.want_markdown),
        &result.text,
    );
    Ok(result)
}
