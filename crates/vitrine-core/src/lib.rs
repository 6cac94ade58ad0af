//! Core types and detection for vitrine
//!
//! This crate resolves the runtime configuration snapshot the marketing-site
//! front end boots from: device and browser capability flags derived from the
//! user agent, host-identity and deployment-path resolution, and a live
//! responsive-breakpoint cell refreshed on viewport resize.
//!
//! All detection is total: malformed or missing inputs degrade to `false`
//! flags or an unset breakpoint, never to an error. The aggregated
//! [`snapshot::ConfigSnapshot`] is therefore always complete.

pub mod breakpoint;
pub mod build;
pub mod context;
pub mod logging;
pub mod snapshot;

pub use breakpoint::{Breakpoint, BreakpointHandle, BreakpointObserver, BreakpointProbe};
pub use context::{Brand, BrowserProfile, DeviceProfile, HostProfile, IeDetection};
pub use snapshot::{BuildFlags, ConfigSnapshot, Origin, PageContext};
