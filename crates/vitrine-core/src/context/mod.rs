//! Environment detection resolved at page load
//!
//! Pure classifiers over the two strings the hosting environment supplies:
//! the user agent and the network host. Every classifier degrades to `false`
//! flags on malformed input; nothing in this module returns an error.

mod browser;
mod device;
mod host;

pub use browser::{BrowserProfile, IeDetection};
pub use device::{DeviceProfile, OsFamily, OsVersion};
pub use host::{default_brands, is_mobile_subdomain, Brand, HostProfile};
