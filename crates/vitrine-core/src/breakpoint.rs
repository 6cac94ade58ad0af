//! Responsive breakpoint observation
//!
//! The page's style rules surface the active breakpoint as a single string
//! token (in the browser build, the generated-content value of a hidden
//! marker element). This module maps that token onto a discrete
//! [`Breakpoint`] plus six precedence-ordered flags, and keeps the result in
//! a shared cell with exactly one writer: the resize handler.

use serde::{Deserialize, Serialize, Serializer};
use std::sync::{Arc, RwLock};
use tracing::debug;

/// Named responsive-layout tier selected by the current viewport width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Breakpoint {
    DesktopLgUp,
    Desktop,
    Tablet,
    TabletSm,
    Mobile,
    MobileSm,
}

impl Breakpoint {
    /// Map a raw style token onto a breakpoint.
    ///
    /// Quoting characters are stripped first (computed `content` values come
    /// back double-quoted). Unrecognized tokens yield `None`.
    pub fn from_token(raw: &str) -> Option<Self> {
        let token = raw.replace(['"', '\''], "");
        match token.trim() {
            "desktop-lg-up" => Some(Self::DesktopLgUp),
            "desktop" => Some(Self::Desktop),
            "tablet" => Some(Self::Tablet),
            "tablet-sm" => Some(Self::TabletSm),
            "mobile" => Some(Self::Mobile),
            "mobile-sm" => Some(Self::MobileSm),
            other => {
                if !other.is_empty() {
                    debug!("unrecognized breakpoint token: {other:?}");
                }
                None
            }
        }
    }
}

/// Current breakpoint plus its derived flags.
///
/// The flags follow a strict precedence: the large variant implies its
/// desktop parent, and each small variant implies its parent tier. An unset
/// or unrecognized token leaves all six false.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakpointState {
    pub value: Option<Breakpoint>,
    pub is_desktop_large: bool,
    pub is_desktop: bool,
    pub is_tablet: bool,
    pub is_tablet_small: bool,
    pub is_mobile: bool,
    pub is_mobile_small: bool,
}

impl BreakpointState {
    pub fn from_token(raw: &str) -> Self {
        let value = Breakpoint::from_token(raw);
        let is_desktop_large = value == Some(Breakpoint::DesktopLgUp);
        let is_tablet_small = value == Some(Breakpoint::TabletSm);
        let is_mobile_small = value == Some(Breakpoint::MobileSm);
        Self {
            value,
            is_desktop_large,
            is_desktop: is_desktop_large || value == Some(Breakpoint::Desktop),
            is_tablet_small,
            is_tablet: is_tablet_small || value == Some(Breakpoint::Tablet),
            is_mobile_small,
            is_mobile: is_mobile_small || value == Some(Breakpoint::Mobile),
        }
    }
}

/// Externally supplied DOM-query capability: surfaces the breakpoint token
/// selected by the current responsive style rules.
pub trait BreakpointProbe {
    /// The raw token, or `None` when the style marker is absent.
    fn current_token(&self) -> Option<String>;
}

/// Probe backed by a fixed token, for bootstraps that receive the breakpoint
/// out of band (tests, the CLI, server-side rendering).
#[derive(Debug, Clone, Default)]
pub struct StaticProbe {
    token: Option<String>,
}

impl StaticProbe {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }

    pub fn unset() -> Self {
        Self::default()
    }
}

impl BreakpointProbe for StaticProbe {
    fn current_token(&self) -> Option<String> {
        self.token.clone()
    }
}

/// Cheap cloneable read handle onto the shared breakpoint cell.
///
/// Serializes as the state it currently points at, so a snapshot dump always
/// reflects the latest resize.
#[derive(Debug, Clone, Default)]
pub struct BreakpointHandle {
    state: Arc<RwLock<BreakpointState>>,
}

impl BreakpointHandle {
    /// Copy of the current state.
    pub fn current(&self) -> BreakpointState {
        self.state.read().map(|state| *state).unwrap_or_default()
    }

    pub fn value(&self) -> Option<Breakpoint> {
        self.current().value
    }
}

impl Serialize for BreakpointHandle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.current().serialize(serializer)
    }
}

/// Single writer over the shared breakpoint cell.
///
/// Refreshes once at construction and again on every [`on_resize`]
/// notification. Each refresh is a pure read-then-write; no debouncing is
/// applied, the cell simply ends up reflecting the latest token.
///
/// [`on_resize`]: BreakpointObserver::on_resize
#[derive(Debug)]
pub struct BreakpointObserver<P> {
    probe: P,
    state: Arc<RwLock<BreakpointState>>,
}

impl<P: BreakpointProbe> BreakpointObserver<P> {
    pub fn new(probe: P) -> Self {
        let observer = Self {
            probe,
            state: Arc::default(),
        };
        observer.refresh();
        observer
    }

    /// Read handle for consumers; clones share the same cell.
    pub fn handle(&self) -> BreakpointHandle {
        BreakpointHandle {
            state: Arc::clone(&self.state),
        }
    }

    /// Viewport-resize notification: re-read the token and recompute flags.
    pub fn on_resize(&self) {
        self.refresh();
    }

    fn refresh(&self) {
        let next = match self.probe.current_token() {
            Some(token) => BreakpointState::from_token(&token),
            None => BreakpointState::default(),
        };
        if let Ok(mut state) = self.state.write() {
            *state = next;
        }
    }
}
