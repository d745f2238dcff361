//! User-Agent classification for click analytics.
//!
//! Raw User-Agent strings are kept verbatim on the click record; this module
//! derives the best-effort device/browser/OS categories stored alongside
//! them. Parsing is deliberately forgiving: every field falls back to its
//! default independently.

use woothee::parser::Parser;

/// Device category fallback when the User-Agent is missing or unclassifiable.
pub const DEFAULT_DEVICE: &str = "desktop";

/// Browser/OS fallback when the User-Agent is missing or unclassifiable.
pub const UNKNOWN: &str = "Unknown";

/// Best-effort client classification derived from a User-Agent string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientInfo {
    /// `desktop`, `mobile`, or `tablet`.
    pub device_type: String,
    /// Browser name, or `Unknown`.
    pub browser: String,
    /// Operating system name, or `Unknown`.
    pub os: String,
}

impl Default for ClientInfo {
    fn default() -> Self {
        Self {
            device_type: DEFAULT_DEVICE.to_string(),
            browser: UNKNOWN.to_string(),
            os: UNKNOWN.to_string(),
        }
    }
}

/// Parses a raw User-Agent header into a [`ClientInfo`].
///
/// `None` or an unparsable string yields the defaults (`desktop` / `Unknown`
/// / `Unknown`). Each field degrades independently: a UA with a recognized
/// browser but unknown OS still reports the browser.
pub fn parse_user_agent(user_agent: Option<&str>) -> ClientInfo {
    let Some(ua) = user_agent else {
        return ClientInfo::default();
    };

    let Some(result) = Parser::new().parse(ua) else {
        return ClientInfo::default();
    };

    let device_type = match result.category {
        "smartphone" | "mobilephone" => "mobile",
        "appliance" => "tablet",
        _ => DEFAULT_DEVICE,
    }
    .to_string();

    let browser = if result.name.is_empty() || result.name == "UNKNOWN" {
        UNKNOWN.to_string()
    } else {
        result.name.to_string()
    };

    let os = if result.os.is_empty() || result.os == "UNKNOWN" {
        UNKNOWN.to_string()
    } else {
        result.os.to_string()
    };

    ClientInfo {
        device_type,
        browser,
        os,
    }
}
