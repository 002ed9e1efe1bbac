use anyhow::{Context, Result};
use resto_search::supabase::DEFAULT_IMAGE_BUCKET;
use resto_search::EngineSettings;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

const URL_ENV: &str = "SUPABASE_URL";
const ANON_KEY_ENV: &str = "SUPABASE_ANON_KEY";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestoConfig {
    /// Supabase project URL, e.g. "https://abcd.supabase.co"
    #[serde(default)]
    pub api_url: String,
    /// Public anon key of the project
    #[serde(default)]
    pub anon_key: String,
    /// Storage bucket holding restaurant images
    #[serde(default = "default_image_bucket")]
    pub image_bucket: String,
    #[serde(default)]
    pub search: SearchConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub page_size: usize,
    pub suggestion_limit: usize,
    pub min_suggestion_chars: usize,
    pub debounce_ms: u64,
}

fn default_image_bucket() -> String {
    DEFAULT_IMAGE_BUCKET.to_string()
}

impl Default for RestoConfig {
    fn default() -> Self {
        Self {
            api_url: String::new(),
            anon_key: String::new(),
            image_bucket: default_image_bucket(),
            search: SearchConfig::default(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        let settings = EngineSettings::default();
        Self {
            page_size: settings.page_size,
            suggestion_limit: settings.suggestion_limit,
            min_suggestion_chars: settings.min_suggestion_chars,
            debounce_ms: settings.term_debounce.as_millis() as u64,
        }
    }
}

impl RestoConfig {
    pub fn config_path() -> Result<PathBuf> {
        Ok(dirs::config_dir()
            .context("Cannot determine config directory")?
            .join("resto-tui")
            .join("config.toml"))
    }

    /// Load config from disk, then apply environment overrides (including a
    /// `.env` file in the working directory). Missing file means defaults.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let path = Self::config_path()?;
        let config = if path.exists() {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config at {}", path.display()))?;
            toml::from_str(&raw)
                .with_context(|| format!("Failed to parse config at {}", path.display()))?
        } else {
            Self::default()
        };

        Ok(config.with_env_overrides(|key| std::env::var(key).ok()))
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = toml::to_string_pretty(self)?;
        std::fs::write(&path, raw)?;
        Ok(())
    }

    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(URL_ENV).filter(|v| !v.trim().is_empty()) {
            self.api_url = url.trim().to_string();
        }
        if let Some(key) = lookup(ANON_KEY_ENV).filter(|v| !v.trim().is_empty()) {
            self.anon_key = key.trim().to_string();
        }
        self
    }

    /// Zero values fall back to the defaults.
    pub fn engine_settings(&self) -> EngineSettings {
        let defaults = EngineSettings::default();
        let or_default = |value: usize, fallback: usize| if value == 0 { fallback } else { value };
        EngineSettings {
            page_size: or_default(self.search.page_size, defaults.page_size),
            suggestion_limit: or_default(self.search.suggestion_limit, defaults.suggestion_limit),
            // An empty term never suggests.
            min_suggestion_chars: self.search.min_suggestion_chars.max(1),
            term_debounce: if self.search.debounce_ms == 0 {
                defaults.term_debounce
            } else {
                Duration::from_millis(self.search.debounce_ms)
            },
        }
    }
}
