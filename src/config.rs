use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::viewport::ObserverOptions;

/// Default config file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "folio.toml";

/// Site-wide settings. Every field has a default, so an empty or partial
/// `folio.toml` is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub site_name: String,
    /// JSON catalog to load instead of the embedded one.
    pub data_path: Option<String>,
    /// Viewport height assumed by the preview server.
    pub viewport_height: f64,
    pub timing: Timing,
    pub observers: Observers,
    pub nav: NavConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        SiteConfig {
            site_name: "Portfolio".to_string(),
            data_path: None,
            viewport_height: 800.0,
            timing: Timing::default(),
            observers: Observers::default(),
            nav: NavConfig::default(),
        }
    }
}

/// Animation and simulated-latency delays, in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timing {
    pub project_stagger_ms: u64,
    pub skill_stagger_ms: u64,
    pub submit_delay_ms: u64,
    pub success_clear_ms: u64,
    pub body_reveal_ms: u64,
}

impl Default for Timing {
    fn default() -> Self {
        Timing {
            project_stagger_ms: 100,
            skill_stagger_ms: 150,
            submit_delay_ms: 1500,
            success_clear_ms: 5000,
            body_reveal_ms: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Observers {
    pub skills: ObserverOptions,
    pub fade_in: ObserverOptions,
}

impl Default for Observers {
    fn default() -> Self {
        Observers {
            skills: ObserverOptions::new(0.3, -50.0),
            fade_in: ObserverOptions::new(0.1, -50.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    /// Added to `scrollY` before matching sections.
    pub scroll_offset: f64,
    /// Header height used when the page has no `.header`.
    pub default_header_height: f64,
    /// 0 recomputes the active link on every scroll event.
    pub scroll_throttle_ms: u64,
    /// Scroll depth past which the header blur deepens.
    pub header_blur_after: f64,
}

impl Default for NavConfig {
    fn default() -> Self {
        NavConfig {
            scroll_offset: 100.0,
            default_header_height: 80.0,
            scroll_throttle_ms: 0,
            header_blur_after: 100.0,
        }
    }
}

impl SiteConfig {
    pub fn from_toml(raw: &str) -> Result<Self, String> {
        toml::from_str(raw).map_err(|e| e.to_string())
    }

    pub fn from_file(path: &Path) -> Result<Self, String> {
        let raw = fs::read_to_string(path).map_err(|e| e.to_string())?;
        Self::from_toml(&raw)
    }

    /// Read `$FOLIO_CONFIG` or `folio.toml`. A missing file means defaults;
    /// an unreadable or malformed one is logged and also means defaults.
    pub fn load() -> Self {
        let path = std::env::var("FOLIO_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let path = Path::new(&path);
        if !path.exists() {
            log::info!("No config at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::from_file(path) {
            Ok(cfg) => {
                log::info!("Loaded config from {}", path.display());
                cfg
            }
            Err(e) => {
                log::warn!("Ignoring config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(SiteConfig::from_toml("").unwrap(), SiteConfig::default());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg = SiteConfig::from_toml(
            r#"
site_name = "Ada Lovelace"

[timing]
submit_delay_ms = 10

[nav]
scroll_throttle_ms = 50

[observers.skills]
threshold = 0.5
bottom_margin = 0.0
"#,
        )
        .unwrap();
        assert_eq!(cfg.site_name, "Ada Lovelace");
        assert_eq!(cfg.timing.submit_delay_ms, 10);
        assert_eq!(cfg.timing.success_clear_ms, 5000);
        assert_eq!(cfg.nav.scroll_throttle_ms, 50);
        assert_eq!(cfg.nav.scroll_offset, 100.0);
        assert_eq!(cfg.observers.skills.threshold, 0.5);
        assert_eq!(cfg.observers.fade_in.threshold, 0.1);
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(SiteConfig::from_toml("timing = 3").is_err());
    }
}
