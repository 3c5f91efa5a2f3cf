use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::time::Duration;

use crate::api::DEFAULT_PLACEHOLDER_IMAGE_URL;
use crate::config::{get_settings_file, ADMIN_ENV, CREATE_DELAY_ENV};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExplorerSettings {
    pub admin_mode: bool,
    pub create_latency_ms: u64,
    pub initial_load_ms: u64,
    pub placeholder_image_url: String,
}

impl Default for ExplorerSettings {
    fn default() -> Self {
        Self {
            admin_mode: false,
            create_latency_ms: 800,
            initial_load_ms: 1000,
            placeholder_image_url: DEFAULT_PLACEHOLDER_IMAGE_URL.to_string(),
        }
    }
}

impl ExplorerSettings {
    pub fn create_latency(&self) -> Duration {
        Duration::from_millis(self.create_latency_ms)
    }

    pub fn initial_load(&self) -> Duration {
        Duration::from_millis(self.initial_load_ms)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(value) = env::var(ADMIN_ENV) {
            self.admin_mode = matches!(value.trim(), "1" | "true" | "TRUE" | "yes");
        }
        if let Ok(value) = env::var(CREATE_DELAY_ENV) {
            match value.trim().parse() {
                Ok(ms) => self.create_latency_ms = ms,
                Err(_) => {
                    tracing::warn!(value = %value, "Ignoring invalid {}", CREATE_DELAY_ENV);
                }
            }
        }
    }
}

pub fn load_settings() -> Result<ExplorerSettings> {
    let settings_file = get_settings_file()?;
    let mut settings = if settings_file.exists() {
        let contents = fs::read_to_string(&settings_file)
            .with_context(|| format!("Failed to read settings file: {:?}", settings_file))?;
        serde_json::from_str(&contents).with_context(|| "Failed to parse explorer settings")?
    } else {
        ExplorerSettings::default()
    };
    settings.apply_env_overrides();
    Ok(settings)
}

pub fn save_settings(settings: &ExplorerSettings) -> Result<()> {
    let settings_file = get_settings_file()?;
    if let Some(parent) = settings_file.parent() {
        fs::create_dir_all(parent)?;
    }

    let contents = serde_json::to_string_pretty(settings)?;
    fs::write(&settings_file, contents)?;
    Ok(())
}
