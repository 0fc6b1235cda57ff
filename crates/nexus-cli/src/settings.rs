//! Configuration, data loading and log setup

use anyhow::{Context, Result};
use nexus_graph::NexusConfig;
use nexus_model::EntityStore;
use std::fs;
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Read a TOML configuration file, or the defaults when `path` is `None`
///
/// # Errors
/// Fails if the file cannot be read or parsed
pub fn load_config(path: Option<&Path>) -> Result<NexusConfig> {
    let Some(path) = path else {
        return Ok(NexusConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config: NexusConfig =
        toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))?;
    tracing::info!(path = %path.display(), "configuration loaded");
    Ok(config)
}

/// Load a JSON export, or the sample data when `path` is `None`
///
/// # Errors
/// Fails if the file cannot be read or is not a valid export
pub fn load_store(path: Option<&Path>) -> Result<EntityStore> {
    let Some(path) = path else {
        return Ok(EntityStore::seeded());
    };
    let json = fs::read_to_string(path)
        .with_context(|| format!("reading data {}", path.display()))?;
    EntityStore::import_json(&json).with_context(|| format!("importing {}", path.display()))
}

/// Level used when `RUST_LOG` is unset
#[must_use]
pub fn default_level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Install the stderr subscriber; later calls are no-ops
pub fn init_tracing(verbosity: u8, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level(verbosity)));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    let installed = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_paths_fall_back_to_defaults() {
        assert_eq!(load_config(None).unwrap(), NexusConfig::default());
        assert!(load_store(None).unwrap().projects().count() > 0);
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "root_label = \"Org\"\n[layout]\nlevel_gap = 200.0").unwrap();
        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.root_label, "Org");
        assert_eq!(config.layout.level_gap, 200.0);
        assert_eq!(config.layout.node_size, 120.0);
        assert_eq!(config.viewport.initial_scale, 0.75);
    }

    #[test]
    fn unreadable_config_reports_path() {
        let err = load_config(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(format!("{err:#}").contains("/definitely/not/here.toml"));
    }

    #[test]
    fn verbosity_levels() {
        assert_eq!(default_level(0), "warn");
        assert_eq!(default_level(1), "info");
        assert_eq!(default_level(5), "debug");
    }
}
