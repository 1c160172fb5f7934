use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::catalog::Catalog;
use data_error::{AvatarError, Result};

pub const CONFIG_FOLDER: &str = "avatar";
pub const CONFIG_FILE: &str = "config.toml";

/// Settings of the avatar rendering endpoint and the URL cache.
///
/// Persisted as TOML. Every field is optional in the file:
///
/// ```toml
/// endpoint = "https://api.dicebear.com"
/// api_version = "7.x"
/// format = "png"
/// default_style = "avataaars"
/// default_size = 256
/// cache_capacity = 512
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub endpoint: String,
    pub api_version: String,
    pub format: String,
    pub default_style: String,
    pub default_size: u32,
    pub cache_capacity: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.dicebear.com".to_owned(),
            api_version: "7.x".to_owned(),
            format: "png".to_owned(),
            default_style: "avataaars".to_owned(),
            default_size: 256,
            cache_capacity: 512,
        }
    }
}

impl ServiceConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Loads the configuration from `path`, or the defaults when the
    /// file does not exist.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            log::debug!(
                "No config at {}, using defaults",
                path.display()
            );
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// `$XDG_CONFIG_HOME/avatar/config.toml`, falling back to
    /// `$HOME/.config/avatar/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        let config_home = env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|_| env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
            .ok()?;
        Some(config_home.join(CONFIG_FOLDER).join(CONFIG_FILE))
    }

    pub fn validate(&self, catalog: &Catalog) -> Result<()> {
        let mut problems = Vec::new();

        match Url::parse(&self.endpoint) {
            Ok(url) if url.cannot_be_a_base() => {
                problems.push(format!("endpoint {} cannot be a base URL", self.endpoint))
            }
            Ok(_) => {}
            Err(e) => problems.push(format!("endpoint {}: {}", self.endpoint, e)),
        }
        if self.api_version.trim().is_empty() {
            problems.push("api_version is empty".to_owned());
        }
        if self.format.trim().is_empty() {
            problems.push("format is empty".to_owned());
        }
        if !catalog.contains(&self.default_style) {
            problems.push(format!(
                "default_style {} is not in the catalog",
                self.default_style
            ));
        }
        if self.default_size == 0 {
            problems.push("default_size must be positive".to_owned());
        }
        if self.cache_capacity == 0 {
            problems.push("cache_capacity must be positive".to_owned());
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(AvatarError::Config(problems.join("; ")))
        }
    }
}
