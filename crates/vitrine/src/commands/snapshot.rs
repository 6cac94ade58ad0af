//! Snapshot command implementation

use anyhow::Result;
use clap::Args;
use tracing::debug;
use vitrine_core::breakpoint::{BreakpointObserver, StaticProbe};
use vitrine_core::snapshot::{self, BuildFlags, ConfigSnapshot, Origin, PageContext};

/// Resolve the configuration snapshot for a given environment
#[derive(Args, Debug)]
pub struct SnapshotArgs {
    /// User-agent string of the visiting browser
    #[arg(long, default_value = "")]
    user_agent: String,

    /// Host the page is served from (hostname[:port])
    #[arg(long, default_value = "localhost:8000")]
    host: String,

    /// URL scheme
    #[arg(long, default_value = "http")]
    protocol: String,

    /// Current responsive breakpoint token (e.g. "tablet-sm")
    #[arg(long)]
    breakpoint: Option<String>,

    /// Resolve against the compiled (dist) tree
    #[arg(long)]
    prod: bool,

    /// Resolve against a brand deployment
    #[arg(long)]
    deploy: bool,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Execute the snapshot command
pub fn execute(args: SnapshotArgs) -> Result<()> {
    debug!("resolving snapshot for host {}", args.host);
    let origin = parse_origin(&args.protocol, &args.host);
    let ctx = PageContext::new(args.user_agent.clone(), origin).with_build(BuildFlags {
        is_prod: args.prod,
        is_deploy: args.deploy,
    });

    let probe = match &args.breakpoint {
        Some(token) => StaticProbe::new(token.clone()),
        None => StaticProbe::unset(),
    };
    let observer = BreakpointObserver::new(probe);

    let snapshot = snapshot::init(&ctx, observer.handle());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&*snapshot)?);
    } else {
        print_text(&snapshot);
    }
    Ok(())
}

/// Split a `hostname[:port]` string into an [`Origin`].
fn parse_origin(protocol: &str, host: &str) -> Origin {
    match host.rsplit_once(':') {
        Some((hostname, port)) => match port.parse::<u16>() {
            Ok(port) => Origin::new(protocol, hostname, Some(port)),
            Err(_) => Origin::new(protocol, host, None),
        },
        None => Origin::new(protocol, host, None),
    }
}

fn print_text(snapshot: &ConfigSnapshot) {
    let device = &snapshot.device;
    let browser = &snapshot.browser;
    let env = &snapshot.environment;
    let path = &snapshot.path;
    let bp = snapshot.breakpoint.current();

    println!("Device:");
    println!("  phone: {}  tablet: {}  mobile: {}", device.is_phone, device.is_tablet, device.is_mobile);
    println!(
        "  ios: {} (old: {})  android: {} (old: {})",
        device.is_ios, device.is_ios_old, device.is_android, device.is_android_old
    );
    println!("Browser:");
    println!("  ie: {}  ie_old: {}", browser.is_ie, browser.is_ie_old);
    println!("Breakpoint:");
    match bp.value {
        Some(value) => println!("  value: {value:?}"),
        None => println!("  value: (unset)"),
    }
    println!(
        "  desktop: {} (large: {})  tablet: {} (small: {})  mobile: {} (small: {})",
        bp.is_desktop, bp.is_desktop_large, bp.is_tablet, bp.is_tablet_small, bp.is_mobile, bp.is_mobile_small
    );
    println!("Environment:");
    println!("  prod: {}  deploy: {}", env.is_prod, env.is_deploy);
    println!("  local: {}  amazon: {}", env.is_local_host, env.is_amazon_host);
    for (brand, matched) in &env.brand_hosts {
        println!("  brand {brand}: {matched}");
    }
    println!("Paths:");
    println!("  url: {:?}", path.url);
    println!("  root: {}", path.root);
    println!("  views: {}", path.views);
    println!("  templates: {}", path.templates);
    println!("  data: {}", path.data);
    println!("  images: {}", path.images);
    println!("  videos: {}", path.videos);
    for (brand, base) in &path.brand_bases {
        println!("  {brand} base: {base:?}");
    }
    println!("Timing:");
    println!(
        "  animation delay/duration: {}ms/{}ms  timeout scope/animation: {}ms/{}ms",
        snapshot.animation.delay_ms,
        snapshot.animation.duration_ms,
        snapshot.timeout.scope_ms,
        snapshot.timeout.animation_ms
    );
}
