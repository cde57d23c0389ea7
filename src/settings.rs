use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::common::constants::{DEFAULT_PAGE_SIZE, DEFAULT_WRITE_BASE_URL};

fn default_generator() -> String {
    "tumblr-archive".to_string()
}

fn default_write_base_url() -> String {
    DEFAULT_WRITE_BASE_URL.to_string()
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AuthSettings {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Settings {
    pub version: String,
    pub auth: AuthSettings,
    #[serde(default = "default_generator")]
    pub generator: String,
    #[serde(default = "default_write_base_url")]
    pub write_base_url: String,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    pub default_save_location: String,
}

impl Settings {
    pub fn load(settings_file: &str) -> Result<Self> {
        let path = Path::new(settings_file);
        if !path.exists() {
            return Err(anyhow::anyhow!(
                "settings.json not found at '{}'. Exiting...",
                settings_file
            ));
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", settings_file))?;

        let settings: Settings = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse settings file: {}", settings_file))?;

        info!("Settings loaded from '{}'.", settings_file);
        Ok(settings)
    }
}
