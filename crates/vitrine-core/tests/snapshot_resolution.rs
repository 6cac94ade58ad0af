//! End-to-end snapshot resolution tests: classifiers, deployment paths and
//! the live breakpoint cell working together.

use std::sync::{Arc, Mutex};

use vitrine_core::breakpoint::{BreakpointObserver, BreakpointProbe, StaticProbe};
use vitrine_core::context::default_brands;
use vitrine_core::snapshot::{BuildFlags, ConfigSnapshot, Origin, PageContext};

const IE9_ON_OLD_IOS: &str =
    "Mozilla/5.0 (compatible; MSIE 9.0; Windows NT 6.1; WOW64; Trident/5.0)";
const IPHONE_IOS7: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 7_1_2 like Mac OS X) \
     AppleWebKit/537.51.2 (KHTML, like Gecko) Version/7.0 Mobile/11D257 Safari/9537.53";
const DESKTOP_CHROME: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/47.0.2526.80 Safari/537.36";

fn context(user_agent: &str, hostname: &str, port: Option<u16>) -> PageContext {
    PageContext::new(user_agent, Origin::new("http", hostname, port))
}

#[test]
fn dev_snapshot_on_localhost() {
    let observer = BreakpointObserver::new(StaticProbe::new("desktop-lg-up"));
    let snapshot = ConfigSnapshot::resolve(
        &context(DESKTOP_CHROME, "localhost", Some(8000)),
        observer.handle(),
    );

    assert!(snapshot.environment.is_local_host);
    assert!(!snapshot.environment.is_prod);
    assert_eq!(snapshot.path.data, "/src/data/");
    assert_eq!(snapshot.path.url, "/performance");
    assert_eq!(snapshot.path.root, "http://localhost:8000");

    let bp = snapshot.breakpoint.current();
    assert!(bp.is_desktop_large);
    assert!(bp.is_desktop);
    assert!(!bp.is_mobile);

    assert!(!snapshot.device.is_mobile);
    assert!(!snapshot.browser.is_ie);
}

#[test]
fn brand_deploy_snapshot() {
    let ctx = context(IPHONE_IOS7, "m.mcdonalds.com.au", None).with_build(BuildFlags {
        is_prod: true,
        is_deploy: true,
    });
    let snapshot = ConfigSnapshot::resolve(&ctx, Default::default());

    // first configured brand matches; its deploy path prefixes every asset kind
    let brand_path = &default_brands()[0].deploy_path;
    assert_eq!(snapshot.path.views, format!("{brand_path}static/views/"));
    assert_eq!(snapshot.path.url, "");
    assert!(snapshot.environment.is_deploy);
    assert!(snapshot.environment.brand_hosts["mcdonalds"]);

    // iPhone on iOS 7, plus the m. host override
    assert!(snapshot.device.is_phone);
    assert!(snapshot.device.is_tablet, "m. subdomain forces the tablet flag");
    assert!(snapshot.device.is_mobile);
    assert!(snapshot.device.is_ios_old);
}

#[test]
fn legacy_browser_flags_flow_through() {
    let snapshot = ConfigSnapshot::resolve(
        &context(IE9_ON_OLD_IOS, "localhost", Some(8000)),
        Default::default(),
    );
    assert!(snapshot.browser.is_ie);
    assert!(snapshot.browser.is_ie_old);
}

#[test]
fn unparseable_inputs_still_produce_a_complete_snapshot() {
    let snapshot = ConfigSnapshot::resolve(&context("", "", None), Default::default());
    assert!(!snapshot.device.is_mobile);
    assert!(!snapshot.browser.is_ie);
    assert!(!snapshot.environment.is_local_host);
    assert_eq!(snapshot.breakpoint.current().value, None);
    // constants and paths are unconditional
    assert_eq!(snapshot.animation.duration_ms, 500);
    assert_eq!(snapshot.path.views, "/src/static/views/");
}

struct SwappableProbe(Arc<Mutex<Option<String>>>);

impl BreakpointProbe for SwappableProbe {
    fn current_token(&self) -> Option<String> {
        self.0.lock().map(|token| token.clone()).unwrap_or(None)
    }
}

#[test]
fn snapshot_breakpoint_stays_live_across_resizes() {
    let token = Arc::new(Mutex::new(Some("\"tablet-sm\"".to_string())));
    let observer = BreakpointObserver::new(SwappableProbe(Arc::clone(&token)));
    let snapshot = ConfigSnapshot::resolve(
        &context(DESKTOP_CHROME, "localhost", Some(8000)),
        observer.handle(),
    );

    let bp = snapshot.breakpoint.current();
    assert!(bp.is_tablet_small);
    assert!(bp.is_tablet);
    assert!(!bp.is_desktop);

    *token.lock().unwrap() = Some("mobile".to_string());
    observer.on_resize();

    let bp = snapshot.breakpoint.current();
    assert!(bp.is_mobile);
    assert!(!bp.is_tablet);
}

#[test]
fn snapshot_serializes_with_live_breakpoint_view() {
    let observer = BreakpointObserver::new(StaticProbe::new("mobile-sm"));
    let snapshot = ConfigSnapshot::resolve(
        &context(DESKTOP_CHROME, "localhost", Some(8000)),
        observer.handle(),
    );
    let json = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(json["breakpoint"]["value"], "mobile-sm");
    assert_eq!(json["breakpoint"]["is_mobile"], true);
    assert_eq!(json["path"]["url"], "/performance");
    assert_eq!(json["timeout"]["animation_ms"], 550);
}
