//! browser-copy-url library crate
//!
//! This crate provides the core of the `browser-copy-url` CLI: copy a page URL
//! as plain text or as a markdown link, with title cleanup for a handful of
//! known sites. It is organized into small modules: `format` (the pure
//! URL/title formatter), `clipboard` (primary write with a scratch-file
//! fallback), `trigger` (key chords and the copy pipeline), `notify` (user
//! feedback), `capabilities` (advisory browser check) and `config`. The binary
//! `src/main.rs` calls `copy_url_lib::run()`.
//!
//! Public API
//!
//! - `run()` — CLI entrypoint used by the binary.
//! - `format::format()` — turn `(url, title, markdown?)` into clipboard text.
//! - `trigger::copy_url()` — format, write and report one invocation.

pub mod capabilities;
pub mod clipboard;
pub mod config;
pub mod format;
pub mod notify;
pub mod trigger;

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt};

use crate::clipboard::{ClipboardWriter, CommandCopy, NativeClipboard, PrimaryClipboard};
use crate::config::Config;
use crate::notify::{Notifier, NullNotifier, StderrNotifier};
use crate::trigger::{Invocation, KeyChord, Platform, copy_url, resolve_chord, shortcut_hint};

/// Top-level CLI types and runner. Keep `main.rs` thin.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Platform the shortcut is pressed on, e.g. `MacIntel` or `Linux x86_64`
    /// (defaults to this machine)
    #[arg(long = "platform", global = true)]
    platform: Option<String>,

    /// Use this URL instead of the one given; an empty value is ignored
    #[arg(long = "override-url", global = true)]
    override_url: Option<String>,

    /// Log pipeline steps to stderr
    #[arg(short = 'v', long = "verbose", global = true, action = ArgAction::SetTrue)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Copy a URL to the clipboard
    Copy {
        /// Page URL
        url: String,

        /// Page title, used for markdown links
        #[arg(short = 't', long = "title", default_value = "")]
        title: String,

        /// Copy as a markdown link
        #[arg(short = 'm', long = "markdown", action = ArgAction::SetTrue, conflicts_with = "plain")]
        markdown: bool,

        /// Copy the bare URL
        #[arg(short = 'p', long = "plain", action = ArgAction::SetTrue)]
        plain: bool,
    },
    /// Print the text that would be copied, without touching the clipboard
    Format {
        url: String,
        #[arg(short = 't', long = "title", default_value = "")]
        title: String,
        #[arg(short = 'm', long = "markdown", action = ArgAction::SetTrue)]
        markdown: bool,
    },
    /// Copy as if a keyboard shortcut (e.g. Ctrl+Shift+C) had been pressed
    Key {
        /// Key chord such as `Cmd+Shift+C`
        chord: String,
        url: String,
        #[arg(short = 't', long = "title", default_value = "")]
        title: String,
    },
    /// Report clipboard support and browser version warnings
    Check {
        /// Browser user-agent string to inspect
        #[arg(long = "user-agent", default_value = "")]
        user_agent: String,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_writer(std::io::stderr)
        .init();
}

fn system_writer(config: &Config) -> ClipboardWriter<NativeClipboard, CommandCopy> {
    let fallback = config
        .fallback_command
        .as_deref()
        .and_then(CommandCopy::from_argv)
        .unwrap_or_else(CommandCopy::platform_default);
    debug!(program = fallback.program(), "fallback copy command");

    let writer = ClipboardWriter::new(NativeClipboard, fallback);
    match &config.scratch_dir {
        Some(dir) => writer.with_scratch_dir(dir),
        None => writer,
    }
}

/// Run one invocation against the system clipboard. Prints the copied text on
/// success and fails when nothing could be copied.
fn perform(config: &Config, invocation: &Invocation) -> Result<()> {
    let mut writer = system_writer(config);
    let mut notifier: Box<dyn Notifier> = if config.notify {
        Box::new(StderrNotifier)
    } else {
        Box::new(NullNotifier)
    };

    let result = copy_url(invocation, &mut writer, notifier.as_mut())
        .context("Failed to copy URL")?;
    if !result.succeeded {
        bail!("Failed to copy URL: all copy methods failed");
    }
    println!("{}", result.text);
    Ok(())
}

/// Run the browser-copy-url CLI.
///
/// Parses arguments, sets up logging and loads the optional config file, then
/// dispatches:
/// - `copy` — format the URL and place it on the clipboard.
/// - `format` — print the formatted text only.
/// - `key` — resolve a key chord for the platform to a copy mode, then copy.
/// - `check` — report clipboard support and user-agent warnings.
///
/// Example:
///
/// ```no_run
/// copy_url_lib::run().unwrap(); // called from src/main.rs
/// ```
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load()?;
    let platform = cli
        .platform
        .as_deref()
        .map(Platform::from_platform_string)
        .unwrap_or_else(Platform::current);
    debug!(?platform, ?config, "starting");

    match cli.command {
        Commands::Copy {
            url,
            title,
            markdown,
            plain,
        } => {
            let want_markdown = if markdown || plain { markdown } else { config.markdown };
            let invocation =
                Invocation::new(url, title, want_markdown).with_override_url(cli.override_url);
            perform(&config, &invocation)
        }
        Commands::Format {
            url,
            title,
            markdown,
        } => {
            let invocation = Invocation::new(url, title, markdown).with_override_url(cli.override_url);
            println!("{}", invocation.request().format());
            Ok(())
        }
        Commands::Key { chord, url, title } => {
            let parsed: KeyChord = chord.parse()?;
            let Some(want_markdown) = resolve_chord(&parsed, platform) else {
                bail!("{} is not bound. {}", chord, shortcut_hint(platform));
            };
            let invocation =
                Invocation::new(url, title, want_markdown).with_override_url(cli.override_url);
            perform(&config, &invocation)
        }
        Commands::Check { user_agent } => {
            let available = NativeClipboard.is_available();
            let caps = capabilities::classify(&user_agent, available);
            println!("Supported: {}", if caps.supported { "yes" } else { "no" });
            for w in &caps.warnings {
                println!("warning: {}", w);
            }
            if caps.supported {
                println!("{}", shortcut_hint(platform));
            }
            Ok(())
        }
    }
}
