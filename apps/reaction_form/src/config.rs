use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context};

pub const DEFAULT_CONFIG_FILE: &str = "reaction_form.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_url: String,
    pub log_filter: String,
    /// Whether the page carries the save button and banners.
    pub save_controls: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:5000".into(),
            log_filter: "info".into(),
            save_controls: true,
        }
    }
}

/// Defaults, then the config file, then environment overrides.
///
/// Without an explicit path a missing `reaction_form.toml` is fine; a path
/// given on the command line has to exist.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<Settings> {
    load_settings_with(path, |key| std::env::var(key).ok())
}

fn load_settings_with(
    path: Option<&Path>,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    let (file, required) = match path {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
    };
    match fs::read_to_string(&file) {
        Ok(raw) => apply_file(&mut settings, &raw)
            .with_context(|| format!("invalid config file '{}'", file.display()))?,
        Err(err) if required || err.kind() != std::io::ErrorKind::NotFound => {
            return Err(err).with_context(|| format!("failed to read '{}'", file.display()));
        }
        Err(_) => tracing::debug!("no {DEFAULT_CONFIG_FILE}; using defaults"),
    }

    if let Some(v) = env("REACTION_FORM_SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = env("APP__SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = env("APP__LOG_FILTER") {
        settings.log_filter = v;
    }
    if let Some(v) = env("APP__SAVE_CONTROLS") {
        settings.save_controls =
            parse_flag(&v).with_context(|| format!("APP__SAVE_CONTROLS='{v}'"))?;
    }

    Ok(settings)
}

fn apply_file(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let table: toml::Table = toml::from_str(raw)?;
    for (key, value) in table {
        match (key.as_str(), value) {
            ("server_url", toml::Value::String(v)) => settings.server_url = v,
            ("log_filter", toml::Value::String(v)) => settings.log_filter = v,
            ("save_controls", toml::Value::Boolean(v)) => settings.save_controls = v,
            ("save_controls", toml::Value::String(v)) => settings.save_controls = parse_flag(&v)?,
            (key, value) => {
                tracing::warn!(key, value = %value, "ignoring unrecognised config entry")
            }
        }
    }
    Ok(())
}

fn parse_flag(raw: &str) -> anyhow::Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("expected a boolean, got '{other}'"),
    }
}
