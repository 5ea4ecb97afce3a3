//! Configuration for component

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::executor::HandlebarsExecutor;
use crate::hooks::{self, LOCATE_TEMPLATE};
use crate::host::{DEFAULT_COMPONENTS_DIR, DEFAULT_EXTENSION, Host, HostBuilder};
use crate::locator::FsLocator;
use crate::output::Output;

/// File name looked up in the working directory and the user config dir
pub const CONFIG_FILE: &str = "component.yml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Search roots, checked in order (child theme before parent theme)
    pub roots: Vec<PathBuf>,

    /// Components directory relative to each root
    #[serde(rename = "components-dir")]
    pub components_dir: String,

    /// Template file extension
    pub extension: String,

    /// Extra directories searched when no root has the template
    #[serde(rename = "plugin-dirs")]
    pub plugin_dirs: Vec<PathBuf>,

    /// Fail on missing template fields
    pub strict: bool,

    /// Log level (trace, debug, info, warn, error)
    #[serde(rename = "log-level")]
    pub log_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            roots: vec![PathBuf::from(".")],
            components_dir: DEFAULT_COMPONENTS_DIR.to_string(),
            extension: DEFAULT_EXTENSION.to_string(),
            plugin_dirs: Vec::new(),
            strict: false,
            log_level: None,
        }
    }
}

impl Config {
    /// Load configuration
    ///
    /// An explicit `config_path` must load. Otherwise the first readable
    /// file from [`Config::search_paths`] is used; a broken one is reported
    /// and skipped. With no usable file the defaults apply.
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        for path in Self::search_paths().into_iter().filter(|p| p.is_file()) {
            match Self::load_from_file(&path) {
                Ok(config) => return Ok(config),
                Err(e) => tracing::warn!(path = %path.display(), "Config::load: skipping broken config: {:#}", e),
            }
        }

        tracing::debug!("Config::load: no config file, using defaults");
        Ok(Self::default())
    }

    /// Implicit config locations, most specific first
    ///
    /// `component.yml` in the working directory, then
    /// `<config_dir>/component/component.yml` for the user.
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(CONFIG_FILE)];
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("component").join(CONFIG_FILE));
        }
        paths
    }

    fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;
        tracing::info!(path = %path.display(), roots = config.roots.len(), "Config::load: loaded");
        Ok(config)
    }

    /// Host builder preconfigured from this configuration
    pub fn builder(&self, output: Output) -> HostBuilder {
        Host::builder()
            .locator(FsLocator::new(self.roots.iter().cloned()))
            .executor(HandlebarsExecutor::new().strict(self.strict))
            .output(output)
            .components_dir(self.components_dir.clone())
            .extension(self.extension.clone())
    }

    /// Build a host from this configuration, writing rendered output to `output`
    pub fn host(&self, output: Output) -> Arc<Host> {
        let host = self.builder(output).build();
        self.register_plugin_dirs(&host);
        host
    }

    /// Add each plugin directory as a [`LOCATE_TEMPLATE`] fallback filter
    ///
    /// Filters use the default priority and run in the order listed.
    pub fn register_plugin_dirs(&self, host: &Host) {
        for dir in &self.plugin_dirs {
            host.filters().add_filter(
                LOCATE_TEMPLATE,
                hooks::DEFAULT_PRIORITY,
                hooks::fallback_dir(dir.clone(), host.extension()),
            );
        }
    }
}
