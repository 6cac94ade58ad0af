//! Configuration snapshot aggregation
//!
//! Composes the device, browser and host classifiers with the deployment
//! path resolution and the static timing constants into one mostly-immutable
//! [`ConfigSnapshot`]. The only live part of a snapshot is its breakpoint
//! handle; everything else is fixed at resolution time.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};
use tracing::info;

use crate::breakpoint::BreakpointHandle;
use crate::context::{
    default_brands, is_mobile_subdomain, Brand, BrowserProfile, DeviceProfile, HostProfile,
};

/// Source tree root served while developing.
pub const SRC_ROOT: &str = "/src/";
/// Compiled tree root served in production.
pub const DIST_ROOT: &str = "/dist/";
/// App URL prefix outside of brand deployments (deployments are served from
/// the site root, where the base href takes over).
pub const APP_URL_PREFIX: &str = "/performance";

const VIEWS_SUFFIX: &str = "static/views/";
const TEMPLATES_SUFFIX: &str = "static/templates/";
const DATA_SUFFIX: &str = "data/";
const IMAGES_SUFFIX: &str = "assets/images/";
const VIDEOS_SUFFIX: &str = "assets/videos/";

/// Where the page is being served from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Origin {
    /// URL scheme, without the `://`
    pub protocol: String,
    pub hostname: String,
    pub port: Option<u16>,
}

impl Origin {
    pub fn new(protocol: impl Into<String>, hostname: impl Into<String>, port: Option<u16>) -> Self {
        Self {
            protocol: protocol.into(),
            hostname: hostname.into(),
            port,
        }
    }

    /// `hostname[:port]`, the string all host predicates run against.
    pub fn host(&self) -> String {
        match self.port {
            Some(port) => format!("{}:{}", self.hostname, port),
            None => self.hostname.clone(),
        }
    }
}

/// Build-time mode flags (patched into the page by the asset pipeline).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildFlags {
    /// Serve from the compiled tree instead of the source tree
    pub is_prod: bool,
    /// Brand deployment: single resolved tree, URL prefix cleared
    pub is_deploy: bool,
}

/// Everything the hosting environment feeds the aggregator.
#[derive(Debug, Clone)]
pub struct PageContext {
    pub user_agent: String,
    pub origin: Origin,
    pub build: BuildFlags,
    pub brands: Vec<Brand>,
}

impl PageContext {
    /// Context with the default brand list and dev-mode build flags.
    pub fn new(user_agent: impl Into<String>, origin: Origin) -> Self {
        Self {
            user_agent: user_agent.into(),
            origin,
            build: BuildFlags::default(),
            brands: default_brands(),
        }
    }

    pub fn with_build(mut self, build: BuildFlags) -> Self {
        self.build = build;
        self
    }

    pub fn with_brands(mut self, brands: Vec<Brand>) -> Self {
        self.brands = brands;
        self
    }
}

/// Deployment target and host identity, resolved at construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentProfile {
    pub is_prod: bool,
    pub is_deploy: bool,
    pub is_local_host: bool,
    pub is_amazon_host: bool,
    /// One predicate per configured brand, keyed by brand name
    pub brand_hosts: BTreeMap<String, bool>,
}

/// Resolved base paths for every asset kind the site loads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathSet {
    /// App URL prefix; empty on brand deployments
    pub url: String,
    /// Absolute page root (`protocol://hostname`, port kept on localhost)
    pub root: String,
    pub views: String,
    pub templates: String,
    pub data: String,
    pub images: String,
    pub videos: String,
    /// Per-brand external asset bases; empty string on the brand's own host
    pub brand_bases: BTreeMap<String, String>,
}

/// Animation timing used by downstream transition code, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationTiming {
    pub delay_ms: u64,
    pub duration_ms: u64,
}

impl Default for AnimationTiming {
    fn default() -> Self {
        Self {
            delay_ms: 250,
            duration_ms: 500,
        }
    }
}

/// Timeouts for manual scope and animation updates, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeoutTiming {
    pub scope_ms: u64,
    pub animation_ms: u64,
}

impl Default for TimeoutTiming {
    fn default() -> Self {
        Self {
            scope_ms: 250,
            animation_ms: 550,
        }
    }
}

/// The aggregated configuration the rest of the site consumes.
///
/// Immutable once resolved, except through the live `breakpoint` handle.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigSnapshot {
    pub device: DeviceProfile,
    pub browser: BrowserProfile,
    pub breakpoint: BreakpointHandle,
    pub environment: EnvironmentProfile,
    pub path: PathSet,
    pub animation: AnimationTiming,
    pub timeout: TimeoutTiming,
}

impl ConfigSnapshot {
    /// Resolve a snapshot from the page context.
    ///
    /// Total: malformed inputs leave detection flags false but the snapshot
    /// is always complete.
    pub fn resolve(ctx: &PageContext, breakpoint: BreakpointHandle) -> Self {
        let host = ctx.origin.host();
        let host_profile = HostProfile::classify(&host, &ctx.brands);
        let mobile_host = is_mobile_subdomain(&host, &ctx.brands);

        let (tree, url) = resolve_deployment(ctx, &host);
        let path = PathSet {
            url,
            root: root_path(&ctx.origin, host_profile.is_local),
            views: format!("{tree}{VIEWS_SUFFIX}"),
            templates: format!("{tree}{TEMPLATES_SUFFIX}"),
            data: format!("{tree}{DATA_SUFFIX}"),
            images: format!("{tree}{IMAGES_SUFFIX}"),
            videos: format!("{tree}{VIDEOS_SUFFIX}"),
            brand_bases: resolve_brand_bases(&ctx.brands, &host),
        };

        info!(
            host = %host,
            is_prod = ctx.build.is_prod,
            is_deploy = ctx.build.is_deploy,
            "resolved configuration snapshot"
        );

        Self {
            device: DeviceProfile::classify(&ctx.user_agent, mobile_host),
            browser: BrowserProfile::classify(&ctx.user_agent),
            breakpoint,
            environment: EnvironmentProfile {
                is_prod: ctx.build.is_prod,
                is_deploy: ctx.build.is_deploy,
                is_local_host: host_profile.is_local,
                is_amazon_host: host_profile.is_amazon,
                brand_hosts: host_profile.brands,
            },
            path,
            animation: AnimationTiming::default(),
            timeout: TimeoutTiming::default(),
        }
    }
}

/// Pick the tree root assets resolve against, and the app URL prefix.
///
/// On a deployment, brand predicates are tested in configured order and the
/// first match wins; src and dist collapse into that brand's deploy path and
/// the URL prefix is cleared (the deployed page's base href covers it). A
/// deployment on an unrecognized host resolves to the site root.
fn resolve_deployment(ctx: &PageContext, host: &str) -> (String, String) {
    if ctx.build.is_deploy {
        let deploy = ctx
            .brands
            .iter()
            .find(|brand| brand.matches(host))
            .map(|brand| brand.deploy_path.clone())
            .unwrap_or_default();
        (deploy, String::new())
    } else {
        let tree = if ctx.build.is_prod { DIST_ROOT } else { SRC_ROOT };
        (tree.to_string(), APP_URL_PREFIX.to_string())
    }
}

/// `protocol://hostname`, with the port appended only on localhost.
fn root_path(origin: &Origin, is_local: bool) -> String {
    let mut root = format!("{}://{}", origin.protocol, origin.hostname);
    if is_local {
        if let Some(port) = origin.port {
            root.push_str(&format!(":{port}"));
        }
    }
    root
}

/// External asset bases per brand: empty on the brand's own host.
fn resolve_brand_bases(brands: &[Brand], host: &str) -> BTreeMap<String, String> {
    brands
        .iter()
        .filter_map(|brand| {
            let base = brand.external_base.as_ref()?;
            let resolved = if brand.matches(host) {
                String::new()
            } else {
                base.clone()
            };
            Some((brand.name.clone(), resolved))
        })
        .collect()
}

static SNAPSHOT: OnceLock<Arc<ConfigSnapshot>> = OnceLock::new();

/// Resolve the process-wide snapshot, once.
///
/// The first call constructs the snapshot; every later call returns the same
/// instance regardless of its arguments. The breakpoint handle inside stays
/// live either way.
pub fn init(ctx: &PageContext, breakpoint: BreakpointHandle) -> Arc<ConfigSnapshot> {
    Arc::clone(SNAPSHOT.get_or_init(|| Arc::new(ConfigSnapshot::resolve(ctx, breakpoint))))
}

/// The process-wide snapshot, if [`init`] has run.
pub fn get() -> Option<Arc<ConfigSnapshot>> {
    SNAPSHOT.get().cloned()
}
