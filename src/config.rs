//! Generator configuration.
//!
//! Settings come from `hexgen.toml`: an explicit `--config` path wins, then a
//! file in the project root, then built-in defaults. The project root itself
//! comes from `--root`, then `HEXGEN_ROOT`, then the working directory.
//!
//! ```toml
//! services_dir = "services"
//! service_prefix = "saas-mt-"
//! service_suffix = "-service"
//! shared_import_root = "pim/src/shared"
//!
//! [[ports]]
//! contains = "pim"
//! port = 8090
//! ```

use std::env;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// File name looked up in the project root.
pub const CONFIG_FILE_NAME: &str = "hexgen.toml";

/// Environment variable naming the project root.
pub const ROOT_ENV: &str = "HEXGEN_ROOT";

/// Maps services whose directory name contains `contains` to `port`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortRule {
    pub contains: String,
    pub port: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Directory under the project root holding one directory per service
    pub services_dir: String,
    /// Directory inside a service holding its modules
    pub source_dir: String,
    pub service_prefix: String,
    pub service_suffix: String,
    /// Import root of the shared criteria packages
    pub shared_import_root: String,
    /// Tracking document, relative to the project root
    pub tracking_file: String,
    /// Checked in order; first match wins
    pub ports: Vec<PortRule>,
    pub default_port: u16,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        let rule = |contains: &str, port| PortRule {
            contains: contains.to_string(),
            port,
        };
        GeneratorConfig {
            services_dir: "services".to_string(),
            source_dir: "src".to_string(),
            service_prefix: "saas-mt-".to_string(),
            service_suffix: "-service".to_string(),
            shared_import_root: "pim/src/shared".to_string(),
            tracking_file: "documentation/PROJECT_TRACKING.md".to_string(),
            ports: vec![rule("pim", 8090), rule("stock", 8100), rule("chat", 8000)],
            default_port: 8080,
        }
    }
}

impl GeneratorConfig {
    /// Port the integration scripts target for a service.
    pub fn port_for(&self, service: &str) -> u16 {
        self.ports
            .iter()
            .find(|rule| service.contains(&rule.contains))
            .map_or(self.default_port, |rule| rule.port)
    }
}

/// Load a configuration file.
///
/// Returns `Ok(None)` when the file does not exist and an error when it
/// exists but cannot be read or parsed.
pub fn load_config(config_path: &Path) -> anyhow::Result<Option<GeneratorConfig>> {
    if !config_path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config: {}", config_path.display()))?;
    let config: GeneratorConfig = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config: {}", config_path.display()))?;
    Ok(Some(config))
}

/// `hexgen.toml` in the project root, if present.
pub fn auto_detect_config_path(root: &Path) -> Option<PathBuf> {
    let path = root.join(CONFIG_FILE_NAME);
    path.exists().then_some(path)
}

/// Explicit path first, then the auto-detected one.
pub fn resolve_config_path(explicit_path: Option<&Path>, root: &Path) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        if path.exists() {
            return Some(path.to_path_buf());
        }
    }
    auto_detect_config_path(root)
}

/// Resolve and load the configuration, falling back to defaults.
///
/// An explicit path that does not exist is an error rather than a silent
/// fallback.
pub fn resolve_config(explicit_path: Option<&Path>, root: &Path) -> anyhow::Result<GeneratorConfig> {
    if let Some(path) = explicit_path {
        if !path.exists() {
            anyhow::bail!("Config file not found: {}", path.display());
        }
    }
    match resolve_config_path(explicit_path, root) {
        Some(path) => Ok(load_config(&path)?.unwrap_or_default()),
        None => Ok(GeneratorConfig::default()),
    }
}

/// Project root: explicit flag, then `HEXGEN_ROOT`, then the working directory.
pub fn resolve_root(explicit: Option<&Path>) -> anyhow::Result<PathBuf> {
    if let Some(root) = explicit {
        return Ok(root.to_path_buf());
    }
    match env::var(ROOT_ENV) {
        Ok(root) if !root.trim().is_empty() => Ok(PathBuf::from(root)),
        _ => env::current_dir().context("Failed to read the current directory"),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn default_ports_follow_service_names() {
        let config = GeneratorConfig::default();
        assert_eq!(config.port_for("saas-mt-pim-service"), 8090);
        assert_eq!(config.port_for("saas-mt-stock-service"), 8100);
        assert_eq!(config.port_for("saas-mt-chat-service"), 8000);
        assert_eq!(config.port_for("saas-mt-iam-service"), 8080);
    }

    #[test]
    fn missing_file_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(&dir.path().join(CONFIG_FILE_NAME)).unwrap().is_none());
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "service_prefix = \"acme-\"\ndefault_port = 9000\n",
        )
        .unwrap();

        let config = resolve_config(None, dir.path()).unwrap();
        assert_eq!(config.service_prefix, "acme-");
        assert_eq!(config.default_port, 9000);
        assert_eq!(config.service_suffix, "-service");
        assert_eq!(config.ports.len(), 3);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "ports = 12").unwrap();
        let err = load_config(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
    }

    #[test]
    fn explicit_missing_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(resolve_config(Some(&missing), dir.path()).is_err());
    }

    #[test]
    fn explicit_root_wins() {
        let root = resolve_root(Some(Path::new("/tmp/project"))).unwrap();
        assert_eq!(root, PathBuf::from("/tmp/project"));
    }
}
