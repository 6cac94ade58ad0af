//! Asset-pipeline configuration document
//!
//! Typed counterpart of the build tool's config object: mode flags, source
//! file locations, icon-font options and dev-server options. Loaded from a
//! TOML file when one exists; every section falls back to the shipped
//! defaults, so a partial document is fine.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

use crate::snapshot::BuildFlags;

/// Build configuration error
#[derive(Debug, Error)]
pub enum BuildConfigError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Complete build configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Regex patterns excluded while wiring dependencies
    pub exclude: Vec<String>,
    /// Pipeline mode flags
    pub mode: ModeConfig,
    /// Locations of source files and folders
    pub files: FilesConfig,
    /// Icon-font generation options
    pub icons: IconsConfig,
    /// Local/deploy webserver options
    pub server: ServerConfig,
}

/// Pipeline mode flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModeConfig {
    /// Production mode (compiled assets)
    pub is_prod: bool,
    /// Deployment mode (brand-host trees)
    pub is_deploy: bool,
    /// Emit source maps
    pub is_mapped: bool,
    /// Watch files and assets
    pub is_watched: bool,
    /// Strip comments and logs
    pub is_stripped: bool,
    /// Emit a PHP index file
    pub has_php: bool,
    /// Emit an ASPX index file
    pub has_aspx: bool,
    /// Emit a partial index file
    pub has_partial: bool,
}

impl Default for ModeConfig {
    fn default() -> Self {
        Self {
            is_prod: false,
            is_deploy: false,
            is_mapped: true,
            is_watched: true,
            is_stripped: false,
            has_php: false,
            has_aspx: true,
            has_partial: false,
        }
    }
}

/// Locations of source files and folders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilesConfig {
    pub root: RootConfig,
    pub styles: StylesConfig,
    pub scripts: ScriptsConfig,
    /// Data directory
    pub data: String,
    pub assets: AssetsConfig,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            root: RootConfig::default(),
            styles: StylesConfig::default(),
            scripts: ScriptsConfig::default(),
            data: "data/".to_string(),
            assets: AssetsConfig::default(),
        }
    }
}

/// Root trees per pipeline mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RootConfig {
    /// Development files
    pub dev: String,
    /// Compiled production files
    pub prod: String,
    /// Compiled deployment files
    pub deploy: String,
}

impl Default for RootConfig {
    fn default() -> Self {
        Self {
            dev: "_src/assets/".to_string(),
            prod: "_src/_compiled_assets/".to_string(),
            deploy: "_site/assets/".to_string(),
        }
    }
}

/// Style sources and compiled output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StylesConfig {
    pub sass: String,
    /// Main sass entry point
    pub main: String,
    /// Compiled css
    pub css: String,
    pub dependencies: String,
}

impl Default for StylesConfig {
    fn default() -> Self {
        Self {
            sass: "sass/".to_string(),
            main: "sass/app.scss".to_string(),
            css: "css/".to_string(),
            dependencies: "css/dependencies/".to_string(),
        }
    }
}

/// Script sources
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptsConfig {
    pub js: String,
    /// Main js entry point
    pub main: String,
    /// Runtime config script
    pub config: String,
    pub dependencies: String,
}

impl Default for ScriptsConfig {
    fn default() -> Self {
        Self {
            js: "js/".to_string(),
            main: "js/app.js".to_string(),
            config: "js/config.js".to_string(),
            dependencies: "js/dependencies/".to_string(),
        }
    }
}

/// Static asset directories
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    pub fonts: String,
    pub icons: String,
    pub images: String,
    pub videos: String,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            fonts: "fonts/".to_string(),
            icons: "icons/".to_string(),
            images: "images/".to_string(),
            videos: "videos/".to_string(),
        }
    }
}

/// Icon-font generation options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IconsConfig {
    /// Generated font name
    pub name: String,
    /// SCSS class prefix
    pub class_name: String,
    /// Generated icon stylesheet name
    pub file_name: String,
    /// Font path relative to the stylesheet
    pub font_path: String,
    /// SCSS output path
    pub style_path: String,
    /// Font formats to emit
    pub formats: Vec<String>,
}

impl Default for IconsConfig {
    fn default() -> Self {
        Self {
            name: "icons-vitrine-site".to_string(),
            class_name: "icon__vitrine".to_string(),
            file_name: "_icons.scss".to_string(),
            font_path: "../assets/fonts/".to_string(),
            style_path: "../../sass/base/".to_string(),
            formats: ["svg", "ttf", "eot", "woff"]
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

/// Local/deploy webserver options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Open the browser on start
    pub open: bool,
    pub port: u16,
    pub https: bool,
    pub livereload: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            open: true,
            port: 8000,
            https: false,
            livereload: true,
        }
    }
}

impl BuildConfig {
    /// Load a build configuration from a TOML file.
    ///
    /// A missing file yields the defaults; a present but malformed file is a
    /// real error and is surfaced.
    pub fn load(path: &Path) -> Result<Self, BuildConfigError> {
        if !path.exists() {
            debug!("no build config at {path:?}, using defaults");
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// The mode flags the runtime snapshot branches on.
    pub fn build_flags(&self) -> BuildFlags {
        BuildFlags {
            is_prod: self.mode.is_prod,
            is_deploy: self.mode.is_deploy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_shipped_pipeline() {
        let config = BuildConfig::default();
        assert!(!config.mode.is_prod);
        assert!(!config.mode.is_deploy);
        assert!(config.mode.is_mapped);
        assert!(config.mode.is_watched);
        assert!(!config.mode.is_stripped);
        assert!(!config.mode.has_php);
        assert!(config.mode.has_aspx);
        assert!(config.exclude.is_empty());
        assert_eq!(config.files.root.dev, "_src/assets/");
        assert_eq!(config.files.data, "data/");
        assert_eq!(config.server.port, 8000);
        assert!(config.server.livereload);
        assert_eq!(config.icons.formats.len(), 4);
    }

    #[test]
    fn toml_round_trip() {
        let config = BuildConfig::default();
        let text = toml::to_string(&config).unwrap();
        let parsed: BuildConfig = toml::from_str(&text).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn partial_document_fills_defaults() {
        let text = r#"
[mode]
is_prod = true
is_mapped = false
is_watched = false
has_aspx = false

[server]
open = false
port = 9090
livereload = false
"#;
        let config: BuildConfig = toml::from_str(text).unwrap();
        assert!(config.mode.is_prod);
        assert!(!config.mode.is_mapped);
        // untouched sections keep their defaults
        assert_eq!(config.files.styles.main, "sass/app.scss");
        assert_eq!(config.icons.file_name, "_icons.scss");
        assert_eq!(config.server.port, 9090);
    }

    #[test]
    fn build_flags_derive_from_mode() {
        let text = r#"
[mode]
is_prod = true
is_deploy = true
is_mapped = true
is_watched = false
has_aspx = true
"#;
        let config: BuildConfig = toml::from_str(text).unwrap();
        let flags = config.build_flags();
        assert!(flags.is_prod);
        assert!(flags.is_deploy);
    }

    #[test]
    fn load_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = BuildConfig::load(&dir.path().join("vitrine.toml")).unwrap();
        assert_eq!(config, BuildConfig::default());
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vitrine.toml");
        std::fs::write(&path, "[mode]\nis_prod = true\nis_mapped = true\nis_watched = true\nhas_aspx = true\n").unwrap();
        let config = BuildConfig::load(&path).unwrap();
        assert!(config.mode.is_prod);
    }

    #[test]
    fn load_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vitrine.toml");
        std::fs::write(&path, "not = [valid").unwrap();
        let err = BuildConfig::load(&path).unwrap_err();
        assert!(matches!(err, BuildConfigError::TomlParse(_)));
    }
}
