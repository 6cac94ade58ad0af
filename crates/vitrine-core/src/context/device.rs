//! Device family and mobile-OS detection

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Mobile operating system family parsed from the user agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OsFamily {
    /// iOS (iPhone, iPad, iPod)
    Ios,
    /// Android
    Android,
}

impl OsFamily {
    /// Detect the OS family from a user-agent string.
    ///
    /// Returns `None` when no known mobile OS signature is present; callers
    /// treat that as "every OS-dependent flag is false".
    pub fn detect(user_agent: &str) -> Option<Self> {
        if user_agent.contains("iPhone") || user_agent.contains("iPad") || user_agent.contains("iPod")
        {
            return Some(Self::Ios);
        }
        if user_agent.contains("Android") {
            return Some(Self::Android);
        }
        None
    }
}

/// Parsed OS version (major.minor), ordered lexicographically
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OsVersion {
    pub major: u32,
    pub minor: u32,
}

impl OsVersion {
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    /// Parse the OS version for a detected family out of the user agent.
    ///
    /// iOS versions appear as `OS 8_1` (underscore-separated), Android as
    /// `Android 4.4.2` (dot-separated). Anything unparseable yields `None`.
    pub fn parse(user_agent: &str, family: OsFamily) -> Option<Self> {
        match family {
            OsFamily::Ios => {
                let rest = &user_agent[user_agent.find(" OS ")? + 4..];
                parse_major_minor(rest, '_')
            }
            OsFamily::Android => {
                let rest = &user_agent[user_agent.find("Android ")? + 8..];
                parse_major_minor(rest, '.')
            }
        }
    }
}

/// Parse a leading `major(<sep>minor)?` digit sequence.
fn parse_major_minor(text: &str, sep: char) -> Option<OsVersion> {
    let major_len = text.chars().take_while(char::is_ascii_digit).count();
    if major_len == 0 {
        return None;
    }
    let major = text[..major_len].parse().ok()?;
    let minor = text[major_len..]
        .strip_prefix(sep)
        .map(|rest| {
            let len = rest.chars().take_while(char::is_ascii_digit).count();
            rest[..len].parse().unwrap_or(0)
        })
        .unwrap_or(0);
    Some(OsVersion { major, minor })
}

/// Support thresholds: OS versions below these raise the legacy flags.
const IOS_LEGACY_BELOW: OsVersion = OsVersion::new(8, 0);
const ANDROID_LEGACY_BELOW: OsVersion = OsVersion::new(4, 4);

/// Device capability flags, computed once from the user agent plus a
/// host-based mobile override.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceProfile {
    /// Phone-class device (phones only, never tablets)
    pub is_phone: bool,
    /// Tablet-class device, or the page is served from a mobile subdomain
    pub is_tablet: bool,
    /// Phones and tablets combined, or the mobile-subdomain override
    pub is_mobile: bool,
    pub is_ios: bool,
    pub is_android: bool,
    /// iOS below the support threshold (< 8)
    pub is_ios_old: bool,
    /// Android below the support threshold (< 4.4)
    pub is_android_old: bool,
}

impl DeviceProfile {
    /// Classify a user agent.
    ///
    /// `mobile_host` is the host-based override (an `m.<brand>` subdomain):
    /// when set, `is_tablet` and `is_mobile` are forced true regardless of
    /// what the user agent says.
    pub fn classify(user_agent: &str, mobile_host: bool) -> Self {
        let phone = is_phone_agent(user_agent);
        let tablet = is_tablet_agent(user_agent);

        let family = OsFamily::detect(user_agent);
        let version = family.and_then(|f| OsVersion::parse(user_agent, f));
        if family.is_some() && version.is_none() {
            debug!("mobile OS detected but version unparseable, legacy flags stay false");
        }

        let is_ios = family == Some(OsFamily::Ios);
        let is_android = family == Some(OsFamily::Android);

        Self {
            is_phone: phone,
            is_tablet: tablet || mobile_host,
            is_mobile: phone || tablet || mobile_host,
            is_ios,
            is_android,
            is_ios_old: is_ios && version.is_some_and(|v| v < IOS_LEGACY_BELOW),
            is_android_old: is_android && version.is_some_and(|v| v < ANDROID_LEGACY_BELOW),
        }
    }
}

/// Phone signatures: handsets only, never tablets.
fn is_phone_agent(user_agent: &str) -> bool {
    user_agent.contains("iPhone")
        || user_agent.contains("iPod")
        || (user_agent.contains("Android") && user_agent.contains("Mobile"))
        || user_agent.contains("Windows Phone")
        || user_agent.contains("BlackBerry")
        || user_agent.contains("BB10")
}

/// Tablet signatures. Android without the `Mobile` token is a tablet by
/// Google's own UA convention.
fn is_tablet_agent(user_agent: &str) -> bool {
    user_agent.contains("iPad")
        || user_agent.contains("Tablet")
        || (user_agent.contains("Android") && !user_agent.contains("Mobile"))
        || user_agent.contains("Kindle")
        || user_agent.contains("Silk")
        || user_agent.contains("PlayBook")
}

#[cfg(test)]
mod tests {
    use super::*;

    const IPHONE_IOS7: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 7_1_2 like Mac OS X) \
         AppleWebKit/537.51.2 (KHTML, like Gecko) Version/7.0 Mobile/11D257 Safari/9537.53";
    const IPHONE_IOS8: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 8_0 like Mac OS X) \
         AppleWebKit/600.1.3 (KHTML, like Gecko) Version/8.0 Mobile/12A4345d Safari/600.1.4";
    const IPAD: &str = "Mozilla/5.0 (iPad; CPU OS 9_3_2 like Mac OS X) \
         AppleWebKit/601.1.46 (KHTML, like Gecko) Version/9.0 Mobile/13F69 Safari/601.1";
    const ANDROID_PHONE_43: &str = "Mozilla/5.0 (Linux; Android 4.3; Nexus 4 Build/JWR66Y) \
         AppleWebKit/537.36 (KHTML, like Gecko) Chrome/29.0.1547.72 Mobile Safari/537.36";
    const ANDROID_PHONE_44: &str = "Mozilla/5.0 (Linux; Android 4.4.2; Nexus 5 Build/KOT49H) \
         AppleWebKit/537.36 (KHTML, like Gecko) Chrome/33.0.1750.117 Mobile Safari/537.36";
    const ANDROID_TABLET: &str = "Mozilla/5.0 (Linux; Android 5.0.2; SM-T810) \
         AppleWebKit/537.36 (KHTML, like Gecko) Chrome/47.0.2526.76 Safari/537.36";
    const DESKTOP_CHROME: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
         AppleWebKit/537.36 (KHTML, like Gecko) Chrome/47.0.2526.80 Safari/537.36";

    #[test]
    fn iphone_is_phone_and_ios() {
        let profile = DeviceProfile::classify(IPHONE_IOS8, false);
        assert!(profile.is_phone);
        assert!(!profile.is_tablet);
        assert!(profile.is_mobile);
        assert!(profile.is_ios);
        assert!(!profile.is_android);
    }

    #[test]
    fn ipad_is_tablet_not_phone() {
        let profile = DeviceProfile::classify(IPAD, false);
        assert!(!profile.is_phone);
        assert!(profile.is_tablet);
        assert!(profile.is_mobile);
        assert!(profile.is_ios);
    }

    #[test]
    fn android_mobile_token_means_phone() {
        let profile = DeviceProfile::classify(ANDROID_PHONE_44, false);
        assert!(profile.is_phone);
        assert!(!profile.is_tablet);
        assert!(profile.is_android);
    }

    #[test]
    fn android_without_mobile_token_means_tablet() {
        let profile = DeviceProfile::classify(ANDROID_TABLET, false);
        assert!(!profile.is_phone);
        assert!(profile.is_tablet);
        assert!(profile.is_android);
    }

    #[test]
    fn desktop_agent_all_false() {
        assert_eq!(DeviceProfile::classify(DESKTOP_CHROME, false), DeviceProfile::default());
    }

    #[test]
    fn empty_agent_all_false() {
        assert_eq!(DeviceProfile::classify("", false), DeviceProfile::default());
    }

    #[test]
    fn host_override_forces_tablet_and_mobile() {
        // desktop UA, but served from an m.<brand> subdomain
        let profile = DeviceProfile::classify(DESKTOP_CHROME, true);
        assert!(!profile.is_phone);
        assert!(profile.is_tablet);
        assert!(profile.is_mobile);
    }

    #[test]
    fn ios_legacy_threshold() {
        assert!(DeviceProfile::classify(IPHONE_IOS7, false).is_ios_old);
        assert!(!DeviceProfile::classify(IPHONE_IOS8, false).is_ios_old);
    }

    #[test]
    fn android_legacy_threshold() {
        assert!(DeviceProfile::classify(ANDROID_PHONE_43, false).is_android_old);
        assert!(!DeviceProfile::classify(ANDROID_PHONE_44, false).is_android_old);
    }

    #[test]
    fn unparseable_version_keeps_legacy_flags_false() {
        let profile = DeviceProfile::classify("Mozilla/5.0 (Linux; Android; Pixel)", false);
        assert!(profile.is_android);
        assert!(!profile.is_android_old);
    }

    #[test]
    fn mobile_invariant_holds() {
        for ua in [IPHONE_IOS7, IPHONE_IOS8, IPAD, ANDROID_PHONE_44, ANDROID_TABLET, DESKTOP_CHROME, ""] {
            for override_flag in [false, true] {
                let p = DeviceProfile::classify(ua, override_flag);
                assert_eq!(p.is_mobile, p.is_phone || p.is_tablet || override_flag, "ua: {ua}");
            }
        }
    }

    #[test]
    fn version_parse_variants() {
        assert_eq!(
            OsVersion::parse(IPHONE_IOS7, OsFamily::Ios),
            Some(OsVersion::new(7, 1))
        );
        assert_eq!(
            OsVersion::parse(ANDROID_PHONE_44, OsFamily::Android),
            Some(OsVersion::new(4, 4))
        );
        assert_eq!(OsVersion::parse("Android garbage", OsFamily::Android), None);
    }
}
