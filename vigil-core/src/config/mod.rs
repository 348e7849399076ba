//! Configuration management for vigil.
//!
//! This module provides a unified configuration system that separates
//! secrets (from environment variables) from settings (from TOML files).
//!
//! # Configuration Sources
//!
//! ## Secrets (Environment Variables)
//! - `OPENAI_API_KEY` - OpenAI API key
//! - `ANTHROPIC_API_KEY` - Anthropic API key
//! - `POE_API_KEY` - Poe API key
//! - `ELEVENLABS_API_KEY` - ElevenLabs API key
//!
//! ## Settings (TOML File)
//! Located at `~/.config/vigil/config.toml`:
//! ```toml
//! [identity]
//! bot_name = "Vigil"
//! primary_user = "Louis"
//!
//! [scheduler]
//! daily_task_time = "10:00"
//!
//! [knowledge]
//! context_min_importance = 3
//!
//! [logging]
//! level = "info"
//! ```
//!
//! The resulting [`Config`] is built once at startup and handed to the
//! components that need it; nothing reads configuration from global state.

pub mod knowledge;
mod secrets;
mod settings;

pub use knowledge::KnowledgeSettings;
pub use secrets::Secrets;
pub use settings::{
    IdentitySettings, KnowledgeStoreSettings, LlmSettings, LoggingSettings, MemorySettings,
    ReflectionSettings, SchedulerSettings, Settings, SettingsError, VoiceSettings,
};

use crate::schedule::{DailySchedule, ScheduleParseError};

/// Combined configuration containing both secrets and settings.
#[derive(Debug, Clone)]
pub struct Config {
    /// Secrets loaded from environment variables
    pub secrets: Secrets,
    /// Settings loaded from TOML configuration file
    pub settings: Settings,
}

/// Errors that can occur when loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    #[error("Bot name must not be empty")]
    EmptyBotName,

    #[error("Invalid daily task time: {0}")]
    InvalidSchedule(#[from] ScheduleParseError),
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// This loads:
    /// 1. Secrets from environment variables (and `.env`)
    /// 2. Settings from TOML file (creating defaults if needed)
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file cannot be read or parsed, or if
    /// the settings fail validation.
    pub fn load() -> Result<Self, ConfigError> {
        let secrets = Secrets::from_env();
        let settings = Settings::load()?;
        Self::from_parts(secrets, settings)
    }

    /// Build a configuration from already-loaded parts, validating them.
    pub fn from_parts(secrets: Secrets, settings: Settings) -> Result<Self, ConfigError> {
        if settings.identity.bot_name.trim().is_empty() {
            return Err(ConfigError::EmptyBotName);
        }
        DailySchedule::parse(&settings.scheduler.daily_task_time)?;

        Ok(Self { secrets, settings })
    }

    /// Get the assistant's name.
    pub fn bot_name(&self) -> &str {
        &self.settings.identity.bot_name
    }

    /// Check if a provider is available (has API key configured).
    pub fn has_provider(&self, provider: &str) -> bool {
        self.secrets.has_provider(provider)
    }

    /// Resolved knowledge base settings.
    pub fn knowledge_settings(&self) -> KnowledgeSettings {
        KnowledgeSettings::from(&self.settings)
    }

    /// Parsed daily task schedule.
    pub fn daily_schedule(&self) -> DailySchedule {
        // Validated in `from_parts`.
        DailySchedule::parse(&self.settings.scheduler.daily_task_time)
            .unwrap_or_default()
    }
}

/// Load .env file if it exists (for development convenience).
///
/// This is called automatically by `Config::load()` but is also
/// exported for use in other contexts.
pub fn load_dotenv() {
    let _ = dotenvy::dotenv();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    use secrets::tests::{ENV_MUTEX, clear_env};

    #[test]
    fn test_from_parts_accepts_defaults() {
        let config = Config::from_parts(Secrets::default(), Settings::default()).unwrap();
        assert_eq!(config.bot_name(), "Vigil");
        assert_eq!(config.daily_schedule().to_string(), "10:00:00");
        assert_eq!(config.knowledge_settings().bot_name, "Vigil");
    }

    #[test]
    fn test_empty_bot_name_rejected() {
        let mut settings = Settings::default();
        settings.identity.bot_name = "  ".to_string();
        let err = Config::from_parts(Secrets::default(), settings).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyBotName));
    }

    #[test]
    fn test_invalid_schedule_rejected() {
        let mut settings = Settings::default();
        settings.scheduler.daily_task_time = "25:99".to_string();
        let err = Config::from_parts(Secrets::default(), settings).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSchedule(_)));
    }

    #[test]
    fn test_provider_lookup() {
        let _lock = ENV_MUTEX.lock().unwrap();
        clear_env();
        unsafe { env::set_var("ANTHROPIC_API_KEY", "sk-test") };

        let secrets = Secrets::from_env_inner();
        let config = Config::from_parts(secrets, Settings::default()).unwrap();
        assert!(config.has_provider("anthropic"));
        assert!(!config.has_provider("openai"));

        clear_env();
    }
}
