//! Title/URL formatting for browser-copy-url.
//!
//! This module turns a `(url, page title, markdown?)` triple into the exact
//! string that ends up on the clipboard. It is a pure module: no I/O, no
//! clipboard access, and every function is total. Inputs that do not match a
//! rule fall through unchanged rather than producing an error.
//!
//! Markdown links get site-specific title cleanup, chosen by substring
//! match on the (normalized) URL in a fixed order:
//!
//! 1. `zendesk.com` — `[Ticket <id> - <title>](<url>)` with the `Ticket:`
//!    label and the trailing `– <company> – Zendesk` suffix removed.
//! 2. `atlassian.net` — square brackets removed from the title.
//! 3. anything else — the title verbatim.

use once_cell::sync::Lazy;
use regex::Regex;

static TICKET_PATH: Lazy<Regex> = Lazy::new(|| Regex::new(r"/tickets/(\d+)").unwrap());
static TICKET_LABEL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*Ticket:\s*").unwrap());
static ZENDESK_COMPANY_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*[–—]\s*[^–—]+\s*[–—]\s*Zendesk\s*$").unwrap());
static ZENDESK_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*[–—]\s*Zendesk\s*$").unwrap());

/// One copy request, as handed over by the trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatRequest {
    pub raw_url: String,
    pub page_title: String,
    pub want_markdown: bool,
}

impl FormatRequest {
    pub fn new(
        raw_url: impl Into<String>,
        page_title: impl Into<String>,
        want_markdown: bool,
    ) -> Self {
        Self {
            raw_url: raw_url.into(),
            page_title: page_title.into(),
            want_markdown,
        }
    }

    /// Produce the clipboard text for this request. See [`format`].
    pub fn format(&self) -> String {
        format(&self.raw_url, &self.page_title, self.want_markdown)
    }
}

/// Title cleanup rule picked from the URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteRule {
    Zendesk,
    Atlassian,
    Default,
}

impl SiteRule {
    /// Select the rule for `url`. First match wins: Zendesk, then Atlassian.
    pub fn for_url(url: &str) -> Self {
        if url.contains("zendesk.com") {
            SiteRule::Zendesk
        } else if url.contains("atlassian.net") {
            SiteRule::Atlassian
        } else {
            SiteRule::Default
        }
    }

    /// Apply this rule's title cleanup. Never fails; a title with nothing to
    /// strip comes back unchanged (Zendesk titles are also trimmed).
    pub fn clean_title(self, title: &str) -> String {
        match self {
            SiteRule::Zendesk => clean_zendesk_title(title),
            SiteRule::Atlassian => title.replace(['[', ']'], ""),
            SiteRule::Default => title.to_string(),
        }
    }

    /// Render the markdown link for an already-normalized `url`.
    pub fn markdown_link(self, url: &str, title: &str) -> String {
        let clean = self.clean_title(title);
        match self {
            SiteRule::Zendesk => format!("[Ticket {} - {}]({})", ticket_number(url), clean, url),
            SiteRule::Atlassian | SiteRule::Default => format!("[{}]({})", clean, url),
        }
    }
}

/// Drop the query string from force.com URLs; everything else passes through.
pub fn normalize_url(raw_url: &str) -> &str {
    if raw_url.contains("force.com")
        && let Some((head, _)) = raw_url.split_once('?')
    {
        return head;
    }
    raw_url
}

/// Digits following the first `/tickets/` in `url`, or an empty string.
pub fn ticket_number(url: &str) -> &str {
    TICKET_PATH
        .captures(url)
        .and_then(|c| c.get(1))
        .map_or("", |m| m.as_str())
}

fn clean_zendesk_title(title: &str) -> String {
    let title = TICKET_LABEL.replace(title, "");
    let stripped = if ZENDESK_COMPANY_SUFFIX.is_match(&title) {
        ZENDESK_COMPANY_SUFFIX.replace(&title, "")
    } else {
        ZENDESK_SUFFIX.replace(&title, "")
    };
    stripped.trim().to_string()
}

/// Build the clipboard text for a page.
///
/// Plain mode returns the normalized URL. Markdown mode returns a link whose
/// label has been cleaned by the [`SiteRule`] matching the URL.
///
/// ```
/// use copy_url_lib::format::format;
///
/// let out = format(
///     "https://example.atlassian.net/browse/TEST-123",
///     "TEST-123 [Bug] Some issue with brackets",
///     true,
/// );
/// assert_eq!(
///     out,
///     "[TEST-123 Bug Some issue with brackets](https://example.atlassian.net/browse/TEST-123)"
/// );
/// ```
pub fn format(raw_url: &str, page_title: &str, want_markdown: bool) -> String {
    let url = normalize_url(raw_url);
    if !want_markdown {
        return url.to_string();
    }
    SiteRule::for_url(url).markdown_link(url, page_title)
}
