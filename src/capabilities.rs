//! Advisory browser compatibility check.
//!
//! A missing clipboard makes the feature unusable; an old browser version
//! only earns a warning. Nothing here feeds back into formatting or writing.
use once_cell::sync::Lazy;
use regex::Regex;

const CLIPBOARD_MISSING: &str = "Clipboard API not supported in this browser";
const OLD_VERSION: &str = "Your browser version may not fully support this feature";

struct Browser {
    token: &'static str,
    version: Lazy<Regex>,
    min: f64,
}

static BROWSERS: [Browser; 4] = [
    Browser {
        token: "firefox",
        version: Lazy::new(|| Regex::new(r"firefox/([\d.]+)").unwrap()),
        min: 63.0,
    },
    Browser {
        token: "chrome",
        version: Lazy::new(|| Regex::new(r"chrome/([\d.]+)").unwrap()),
        min: 66.0,
    },
    Browser {
        token: "safari",
        version: Lazy::new(|| Regex::new(r"version/([\d.]+).*safari").unwrap()),
        min: 13.1,
    },
    Browser {
        token: "edg",
        version: Lazy::new(|| Regex::new(r"edg/([\d.]+)").unwrap()),
        min: 79.0,
    },
];

#[derive(Debug, Clone, PartialEq)]
pub struct Capabilities {
    pub supported: bool,
    pub warnings: Vec<String>,
}

/// Classify a user-agent string.
///
/// `clipboard_available` is whether the host exposes the primary clipboard
/// write; without it the result is unsupported and the UA is not inspected.
pub fn classify(user_agent: &str, clipboard_available: bool) -> Capabilities {
    if !clipboard_available {
        return Capabilities {
            supported: false,
            warnings: vec![CLIPBOARD_MISSING.to_string()],
        };
    }

    let ua = user_agent.to_lowercase();
    let outdated = BROWSERS.iter().any(|b| {
        // Chrome's UA also says "safari"; only judge Safari on its own.
        let named = ua.contains(b.token) && !(b.token == "safari" && ua.contains("chrome"));
        named && !meets_minimum(&ua, &b.version, b.min)
    });

    Capabilities {
        supported: true,
        warnings: if outdated { vec![OLD_VERSION.to_string()] } else { Vec::new() },
    }
}

fn meets_minimum(ua: &str, re: &Regex, min: f64) -> bool {
    re.captures(ua)
        .and_then(|c| c.get(1))
        .and_then(|m| leading_float(m.as_str()))
        .is_some_and(|v| v >= min)
}

/// Parse the longest `digits[.digits]` prefix, so `"66.0.3359"` is `66.0`.
fn leading_float(s: &str) -> Option<f64> {
    let mut end = 0;
    let mut seen_dot = false;
    for (i, c) in s.char_indices() {
        match c {
            '0'..='9' => end = i + 1,
            '.' if !seen_dot => seen_dot = true,
            _ => break,
        }
    }
    s[..end].parse().ok()
}
