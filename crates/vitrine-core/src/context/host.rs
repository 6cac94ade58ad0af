//! Host identity and deployment brands

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A named hosting target with its own asset path prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brand {
    /// Display name, also the key in [`HostProfile::brands`]
    pub name: String,
    /// Substring matched against the host to identify this brand
    pub token: String,
    /// Asset path prefix used when deployed to this brand's host
    #[serde(default)]
    pub deploy_path: String,
    /// Base URL for this brand's assets when served from elsewhere
    /// (resolves to `""` on the brand's own host)
    #[serde(default)]
    pub external_base: Option<String>,
}

impl Brand {
    pub fn new(name: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            token: token.into(),
            deploy_path: String::new(),
            external_base: None,
        }
    }

    pub fn with_deploy_path(mut self, path: impl Into<String>) -> Self {
        self.deploy_path = path.into();
        self
    }

    pub fn with_external_base(mut self, base: impl Into<String>) -> Self {
        self.external_base = Some(base.into());
        self
    }

    /// Plain substring containment against the host.
    pub fn matches(&self, host: &str) -> bool {
        host.contains(&self.token)
    }
}

/// The brands the site currently deploys to.
pub fn default_brands() -> Vec<Brand> {
    vec![
        Brand::new("mcdonalds", "mcdonalds"),
        Brand::new("volkswagen", "volkswagen")
            .with_external_base("https://au.volkswagen.tribalstage.com"),
    ]
}

/// Host-identity predicates, resolved once at startup.
///
/// The checks are independent and non-exclusive: a host can match more than
/// one predicate. Deployment-path resolution applies its own tie-break
/// (first configured brand wins).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostProfile {
    pub is_local: bool,
    pub is_amazon: bool,
    /// One predicate per configured brand, keyed by brand name
    pub brands: BTreeMap<String, bool>,
}

impl HostProfile {
    pub fn classify(host: &str, brands: &[Brand]) -> Self {
        Self {
            is_local: host.contains("localhost"),
            is_amazon: host.contains("amazonaws"),
            brands: brands
                .iter()
                .map(|brand| (brand.name.clone(), brand.matches(host)))
                .collect(),
        }
    }

    pub fn matches_brand(&self, name: &str) -> bool {
        self.brands.get(name).copied().unwrap_or(false)
    }
}

/// Mobile-subdomain convention: `m.` followed by any known host token.
///
/// Takes precedence over user-agent classification for the tablet/mobile
/// device flags.
pub fn is_mobile_subdomain(host: &str, brands: &[Brand]) -> bool {
    if host.contains("m.localhost") || host.contains("m.amazonaws") {
        return true;
    }
    brands
        .iter()
        .any(|brand| host.contains(&format!("m.{}", brand.token)))
}
