use std::{fs, path::Path};

use anyhow::Context;

pub const CONFIG_FILE: &str = "server.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_bind: String,
    pub dice_seed: Option<u64>,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:8888".into(),
            dice_seed: None,
            log_filter: "info".into(),
        }
    }
}

pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    match read_file_overrides(Path::new(CONFIG_FILE)) {
        Ok(Some(table)) => apply_file_overrides(&mut settings, &table),
        Ok(None) => {}
        // The subscriber is not installed yet, so this cannot go through tracing.
        Err(error) => eprintln!("ignoring {CONFIG_FILE}: {error:#}"),
    }

    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());
    settings
}

pub fn read_file_overrides(path: &Path) -> anyhow::Result<Option<toml::Table>> {
    if !path.exists() {
        return Ok(None);
    }
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read '{}'", path.display()))?;
    let table = toml::from_str::<toml::Table>(&raw)
        .with_context(|| format!("failed to parse '{}'", path.display()))?;
    Ok(Some(table))
}

pub fn apply_file_overrides(settings: &mut Settings, table: &toml::Table) {
    if let Some(v) = table.get("bind_addr").and_then(value_as_string) {
        settings.server_bind = v;
    }
    if let Some(seed) = table
        .get("dice_seed")
        .and_then(value_as_string)
        .and_then(|v| v.parse::<u64>().ok())
    {
        settings.dice_seed = Some(seed);
    }
    if let Some(v) = table.get("log_filter").and_then(value_as_string) {
        settings.log_filter = v;
    }
}

pub fn apply_env_overrides(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("SERVER_BIND") {
        settings.server_bind = v;
    }
    if let Some(v) = lookup("APP__BIND_ADDR") {
        settings.server_bind = v;
    }

    if let Some(v) = lookup("APP__DICE_SEED") {
        if let Ok(parsed) = v.trim().parse::<u64>() {
            settings.dice_seed = Some(parsed);
        }
    }

    if let Some(v) = lookup("RUST_LOG") {
        settings.log_filter = v;
    }
    if let Some(v) = lookup("APP__LOG_FILTER") {
        settings.log_filter = v;
    }
}

fn value_as_string(value: &toml::Value) -> Option<String> {
    match value {
        toml::Value::String(s) => Some(s.clone()),
        toml::Value::Integer(i) => Some(i.to_string()),
        _ => None,
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
