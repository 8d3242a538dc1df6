use std::{collections::HashMap, fs, path::Path};

use serde::Deserialize;
use tracing::warn;

pub const DEFAULT_SETTINGS_FILE: &str = "client.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub moderation_concurrency: usize,
    pub delete_prompt: String,
    pub scroll_animated: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            moderation_concurrency: 4,
            delete_prompt: "Delete the selected comments? This cannot be undone.".into(),
            scroll_animated: true,
        }
    }
}

pub fn load_settings() -> Settings {
    load_settings_from(Path::new(DEFAULT_SETTINGS_FILE))
}

/// Defaults, then the flat `key = value` file at `path` if it parses, then
/// `APP__*` environment variables.
pub fn load_settings_from(path: &Path) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        apply_file_overrides(&mut settings, &raw);
    }
    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());

    settings
}

fn apply_file_overrides(settings: &mut Settings, raw: &str) {
    let file_cfg = match toml::from_str::<HashMap<String, toml::Value>>(raw) {
        Ok(file_cfg) => file_cfg,
        Err(err) => {
            warn!(error = %err, "ignoring unparseable settings file");
            return;
        }
    };

    if let Some(v) = file_cfg.get("moderation_concurrency").and_then(value_as_string) {
        set_concurrency(settings, &v);
    }
    if let Some(v) = file_cfg.get("delete_prompt").and_then(value_as_string) {
        settings.delete_prompt = v;
    }
    if let Some(v) = file_cfg.get("scroll_animated").and_then(value_as_string) {
        set_scroll_animated(settings, &v);
    }
}

fn apply_env_overrides(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("APP__MODERATION_CONCURRENCY") {
        set_concurrency(settings, &v);
    }
    if let Some(v) = lookup("APP__DELETE_PROMPT") {
        settings.delete_prompt = v;
    }
    if let Some(v) = lookup("APP__SCROLL_ANIMATED") {
        set_scroll_animated(settings, &v);
    }
}

fn value_as_string(value: &toml::Value) -> Option<String> {
    match value {
        toml::Value::String(s) => Some(s.clone()),
        toml::Value::Integer(i) => Some(i.to_string()),
        toml::Value::Boolean(b) => Some(b.to_string()),
        _ => None,
    }
}

fn set_concurrency(settings: &mut Settings, raw: &str) {
    match raw.trim().parse::<usize>() {
        Ok(parsed) => settings.moderation_concurrency = parsed.max(1),
        Err(_) => warn!(value = raw, "invalid moderation_concurrency"),
    }
}

fn set_scroll_animated(settings: &mut Settings, raw: &str) {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => settings.scroll_animated = true,
        "0" | "false" | "no" => settings.scroll_animated = false,
        _ => warn!(value = raw, "invalid scroll_animated"),
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
