use std::fs;

use client_core::DEFAULT_BATCH_SIZE;

/// Viewer settings: defaults, then `viewer.toml` from the working
/// directory if present, then environment overrides.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_base_url: String,
    pub batch_size: usize,
    pub start_page: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: "https://rickandmortyapi.com/api/character".into(),
            batch_size: DEFAULT_BATCH_SIZE,
            start_page: 1,
        }
    }
}

pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("viewer.toml") {
        apply_file_config(&mut settings, &raw);
    }
    apply_env_overrides(&mut settings);

    settings
}

fn apply_file_config(settings: &mut Settings, raw: &str) {
    let Ok(value) = toml::from_str::<toml::Value>(raw) else {
        tracing::warn!("viewer.toml is not valid TOML; using defaults");
        return;
    };

    if let Some(v) = value.get("api_base_url").and_then(|v| v.as_str()) {
        settings.api_base_url = v.to_string();
    }
    if let Some(v) = value.get("batch_size").and_then(|v| v.as_integer()) {
        settings.batch_size = v.max(1) as usize;
    }
    if let Some(v) = value.get("start_page").and_then(|v| v.as_integer()) {
        settings.start_page = v.max(1) as u32;
    }
}

fn apply_env_overrides(settings: &mut Settings) {
    if let Ok(v) = std::env::var("VIEWER_API_BASE_URL") {
        settings.api_base_url = v;
    }
    if let Ok(v) = std::env::var("VIEWER_BATCH_SIZE") {
        if let Ok(parsed) = v.parse::<usize>() {
            settings.batch_size = parsed.max(1);
        }
    }
    if let Ok(v) = std::env::var("VIEWER_START_PAGE") {
        if let Ok(parsed) = v.parse::<u32>() {
            settings.start_page = parsed.max(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_config_overrides_defaults() {
        let mut settings = Settings::default();

        apply_file_config(
            &mut settings,
            "api_base_url = \"http://localhost:9000/characters\"\nbatch_size = 40\nstart_page = 3\n",
        );

        assert_eq!(settings.api_base_url, "http://localhost:9000/characters");
        assert_eq!(settings.batch_size, 40);
        assert_eq!(settings.start_page, 3);
    }

    #[test]
    fn unknown_and_malformed_keys_leave_defaults_in_place() {
        let mut settings = Settings::default();

        apply_file_config(&mut settings, "batch_size = \"lots\"\nsomething_else = 7\n");

        assert_eq!(settings.batch_size, Settings::default().batch_size);
        assert_eq!(settings.api_base_url, Settings::default().api_base_url);
    }

    #[test]
    fn zero_batch_size_is_clamped_to_one() {
        let mut settings = Settings::default();

        apply_file_config(&mut settings, "batch_size = 0\n");

        assert_eq!(settings.batch_size, 1);
    }
}
