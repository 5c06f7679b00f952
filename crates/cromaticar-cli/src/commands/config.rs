//! Configuration resolution and display.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};

use cromaticar_client::ClientConfig;

/// Default config file location, if the platform has a config directory.
fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("cromaticar").join("config.toml"))
}

/// Resolve the client settings: defaults, then the config file, then the
/// environment, then `--api-url`.
///
/// An explicit `--config` must exist; the default location is optional.
pub fn resolve(explicit: Option<&Path>, api_url: Option<&str>) -> Result<ClientConfig> {
    let mut settings = match explicit {
        Some(path) => ClientConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => match default_config_path().filter(|p| p.exists()) {
            Some(path) => ClientConfig::load(&path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => ClientConfig::default(),
        },
    };

    settings = settings.apply_env().context("Invalid environment override")?;

    if let Some(url) = api_url.map(str::trim).filter(|u| !u.is_empty()) {
        settings.base_url = url.to_string();
    }

    settings.validate().context("Invalid configuration")?;
    Ok(settings)
}

pub fn execute(settings: &ClientConfig, offline: bool) -> Result<()> {
    let rendered = settings.to_toml().context("Failed to render configuration")?;

    if let Some(path) = default_config_path() {
        println!("{} {}", "# default file:".dimmed(), path.display().to_string().dimmed());
    }
    if offline {
        println!("{}", "# offline: using the bundled sample catalog".yellow());
    }
    print!("{}", rendered);
    Ok(())
}
