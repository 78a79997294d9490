//! Clipboard writer with a single fallback.
//!
//! The primary path is the native clipboard (`arboard`). When it rejects the
//! write, the text goes into a short-lived [`ScratchSelection`] file which a
//! platform copy command (`pbcopy`, `wl-copy`, `xclip`, `clip`) reads from.
//! The scratch file is removed when it goes out of scope, whatever the copy
//! command did.
//!
//! Failures are non-fatal: [`ClipboardWriter::write`] always hands back a
//! [`CopyResult`] unless the primary capability is missing altogether, in
//! which case nothing is attempted and [`ClipboardError::Unsupported`] is
//! returned for the caller to report.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Why a clipboard write did not happen.
///
/// Only `Unsupported` leaves [`ClipboardWriter::write`]; the others are
/// logged and folded into a failed [`CopyResult`].
#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard capability not available")]
    Unsupported,
    #[error("primary clipboard write failed: {0}")]
    PrimaryWriteFailed(String),
    #[error("fallback copy failed: {0}")]
    FallbackWriteFailed(String),
    #[error("scratch selection: {0}")]
    Io(#[from] std::io::Error),
}

/// Which path put the text on the clipboard (or tried to).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyMethod {
    Primary,
    Fallback,
}

/// Outcome of one write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyResult {
    pub text: String,
    pub method: CopyMethod,
    pub succeeded: bool,
}

impl CopyResult {
    fn new(text: &str, method: CopyMethod, succeeded: bool) -> Self {
        Self {
            text: text.to_owned(),
            method,
            succeeded,
        }
    }
}

/// The host's primary "write text to clipboard" capability.
pub trait PrimaryClipboard {
    fn is_available(&self) -> bool;
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// The legacy "copy the current selection" command.
///
/// `Ok(true)` means the text was copied, `Ok(false)` means the command ran and
/// reported failure, `Err` means it could not run at all.
pub trait SelectionCopy {
    fn copy_selection(&mut self, selection: &ScratchSelection) -> Result<bool, ClipboardError>;
}

/// Native clipboard through `arboard`.
///
/// On some platforms or in headless environments clipboard initialization
/// fails; `is_available` reports that up front.
///
/// The handle is dropped as soon as the text is set. On X11 the contents
/// outlive the process only when a clipboard manager takes them over, so a
/// successful write with no manager running can still leave the clipboard
/// empty after exit. Wayland, macOS and Windows keep the text.
#[derive(Debug, Default)]
pub struct NativeClipboard;

impl PrimaryClipboard for NativeClipboard {
    fn is_available(&self) -> bool {
        arboard::Clipboard::new().is_ok()
    }

    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut ctx = arboard::Clipboard::new()
            .map_err(|e| ClipboardError::PrimaryWriteFailed(format!("clipboard init: {}", e)))?;
        ctx.set_text(text.to_owned())
            .map_err(|e| ClipboardError::PrimaryWriteFailed(format!("clipboard set: {}", e)))
    }
}

/// Temporary container holding the text for the fallback copy.
///
/// Backed by a named temp file that is deleted on drop.
pub struct ScratchSelection {
    file: NamedTempFile,
}

impl ScratchSelection {
    /// Write `text` to a new hidden file in `dir`.
    pub fn create_in(dir: &Path, text: &str) -> Result<Self, ClipboardError> {
        let mut file = tempfile::Builder::new()
            .prefix(".copy-url-")
            .tempfile_in(dir)?;
        file.write_all(text.as_bytes())?;
        file.flush()?;
        debug!(path = %file.path().display(), "created scratch selection");
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// A fresh read handle positioned at the start of the text.
    pub fn reopen(&self) -> Result<File, ClipboardError> {
        Ok(self.file.reopen()?)
    }
}

impl Drop for ScratchSelection {
    fn drop(&mut self) {
        debug!(path = %self.file.path().display(), "removing scratch selection");
    }
}

/// Platform copy command fed from the scratch selection on stdin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandCopy {
    program: String,
    args: Vec<String>,
}

impl CommandCopy {
    /// Build from an argv list. Returns `None` for an empty list.
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    /// The usual copy command for the platform this binary was built for.
    pub fn platform_default() -> Self {
        let argv: &[&str] = if cfg!(target_os = "macos") {
            &["pbcopy"]
        } else if cfg!(windows) {
            &["clip"]
        } else if std::env::var_os("WAYLAND_DISPLAY").is_some() {
            &["wl-copy"]
        } else {
            &["xclip", "-selection", "clipboard"]
        };
        Self {
            program: argv[0].to_string(),
            args: argv[1..].iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl SelectionCopy for CommandCopy {
    fn copy_selection(&mut self, selection: &ScratchSelection) -> Result<bool, ClipboardError> {
        let input = selection.reopen()?;
        let status = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::from(input))
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| ClipboardError::FallbackWriteFailed(format!("{}: {}", self.program, e)))?;
        debug!(program = %self.program, %status, "copy command finished");
        Ok(status.success())
    }
}

/// Primary write, then at most one fallback attempt.
pub struct ClipboardWriter<P, F> {
    primary: P,
    fallback: F,
    scratch_dir: PathBuf,
}

impl<P: PrimaryClipboard, F: SelectionCopy> ClipboardWriter<P, F> {
    /// Writer using the OS temp directory for scratch files.
    pub fn new(primary: P, fallback: F) -> Self {
        Self {
            primary,
            fallback,
            scratch_dir: std::env::temp_dir(),
        }
    }

    /// Directory the scratch selection is created in.
    pub fn with_scratch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = dir.into();
        self
    }

    /// Whether the primary capability is present right now.
    pub fn is_supported(&self) -> bool {
        self.primary.is_available()
    }

    /// Place `text` on the clipboard.
    ///
    /// Returns `Err(ClipboardError::Unsupported)` without touching either path
    /// when the primary capability is absent. Otherwise returns the outcome of
    /// the primary write or, if that failed, of the fallback.
    pub fn write(&mut self, text: &str) -> Result<CopyResult, ClipboardError> {
        if !self.primary.is_available() {
            warn!("clipboard not supported on this host");
            return Err(ClipboardError::Unsupported);
        }

        match self.primary.write_text(text) {
            Ok(()) => {
                info!(method = "primary", "copied {} bytes", text.len());
                Ok(CopyResult::new(text, CopyMethod::Primary, true))
            }
            Err(e) => {
                error!(error = %e, "failed to copy URL, trying fallback");
                let succeeded = self.write_fallback(text);
                Ok(CopyResult::new(text, CopyMethod::Fallback, succeeded))
            }
        }
    }

    fn write_fallback(&mut self, text: &str) -> bool {
        let selection = match ScratchSelection::create_in(&self.scratch_dir, text) {
            Ok(s) => s,
            Err(e) => {
                error!(error = %e, "all copy methods failed");
                return false;
            }
        };

        match self.fallback.copy_selection(&selection) {
            Ok(true) => {
                info!(method = "fallback", "copied {} bytes", text.len());
                true
            }
            Ok(false) => {
                error!("fallback copy method failed");
                false
            }
            Err(e) => {
                error!(error = %e, "all copy methods failed");
                false
            }
        }
    }
}
