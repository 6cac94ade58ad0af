//! Legacy browser (Internet Explorer) detection

use serde::{Deserialize, Serialize};

/// Outcome of the IE signature scan.
///
/// "No match" is an ordinary value here, not a caught fault: the scan is a
/// total function over any user-agent string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IeDetection {
    /// An IE engine signature was found; carries the parsed version
    Detected(u32),
    /// No IE signature present, or the version text was malformed
    NotDetected,
}

impl IeDetection {
    /// Scan a user agent for the three IE engine signatures, in order:
    /// `MSIE ` (IE ≤ 10), `Trident/` (IE 11, version after `rv:`), and
    /// `Edge/` (IE 12). First match wins.
    pub fn scan(user_agent: &str) -> Self {
        if let Some(at) = user_agent.find("MSIE ") {
            return Self::from_version(leading_int(&user_agent[at + 5..]));
        }
        if user_agent.contains("Trident/") {
            let version = user_agent
                .find("rv:")
                .and_then(|at| leading_int(&user_agent[at + 3..]));
            return Self::from_version(version);
        }
        if let Some(at) = user_agent.find("Edge/") {
            return Self::from_version(leading_int(&user_agent[at + 5..]));
        }
        Self::NotDetected
    }

    fn from_version(version: Option<u32>) -> Self {
        version.map_or(Self::NotDetected, Self::Detected)
    }

    pub fn version(self) -> Option<u32> {
        match self {
            Self::Detected(version) => Some(version),
            Self::NotDetected => None,
        }
    }
}

/// Integer run at the start of `text`, up to the next `.` or other non-digit.
fn leading_int(text: &str) -> Option<u32> {
    let len = text.chars().take_while(char::is_ascii_digit).count();
    if len == 0 {
        return None;
    }
    text[..len].parse().ok()
}

/// Browser capability flags derived from the user agent
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowserProfile {
    /// Any IE engine (MSIE, Trident or legacy Edge)
    pub is_ie: bool,
    /// IE 10 or older
    pub is_ie_old: bool,
}

impl BrowserProfile {
    pub fn classify(user_agent: &str) -> Self {
        match IeDetection::scan(user_agent) {
            IeDetection::Detected(version) => Self {
                is_ie: version > 0,
                is_ie_old: (1..=10).contains(&version),
            },
            IeDetection::NotDetected => Self::default(),
        }
    }
}
