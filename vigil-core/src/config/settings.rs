//! Settings configuration loaded from TOML files.
//!
//! This module handles non-sensitive configuration stored in TOML format
//! in the XDG config directory (~/.config/vigil/config.toml).

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default TOML configuration file content
const DEFAULT_CONFIG_TOML: &str = r#"# vigil configuration file
# Located at: ~/.config/vigil/config.toml
#
# This file contains non-sensitive configuration.
# Secrets (API keys) are loaded from environment variables:
#   - OPENAI_API_KEY
#   - ANTHROPIC_API_KEY
#   - POE_API_KEY
#   - ELEVENLABS_API_KEY

[identity]
bot_name = "Vigil"
bot_title = "The Watchful Guardian"
wake_words = ["vigil", "hey vigil", "yo vigil", "yo v", "yo vigil you with me", "the truth will set you free", "help"]
user_names = ["Louis", "Bizy", "Lazurith"]
primary_user = "Louis"

[llm]
primary_model = "gpt-4o"
primary_provider = "openai"
claude_model = "claude-sonnet-4-20250514"
gemini_model = "Gemini-2.5-Flash"
default_temperature = 0.7
creative_temperature = 0.9
precise_temperature = 0.3

[voice]
elevenlabs_voice_id = "pNInz6obpgDQGcFmaJgB"
elevenlabs_model = "eleven_monolingual_v1"
whisper_model = "whisper-1"
wake_word_sensitivity = 0.5
silence_threshold_ms = 500
sample_rate = 16000
channels = 1

[reflection]
hour = 0
minute = 0
second = 1

[memory]
short_term_limit = 20
long_term_summary_threshold = 50
max_context_tokens = 8000

[logging]
level = "info"

[scheduler]
enabled = true
daily_task_time = "10:00"
check_seconds = 60

[knowledge]
# entries_path = "/path/to/entries.json"
# data_root = "/path/to/vigil/data"
context_min_importance = 3
context_max_entries = 3
import_title_chars = 50
"#;

/// Settings loaded from TOML configuration file.
///
/// These are non-sensitive configuration values that can be safely
/// stored in files and version controlled (excluding secrets).
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    /// Who the assistant is and who it serves
    #[serde(default)]
    pub identity: IdentitySettings,

    /// Language model selection and sampling
    #[serde(default)]
    pub llm: LlmSettings,

    /// Speech synthesis and recognition
    #[serde(default)]
    pub voice: VoiceSettings,

    /// Daily reflection timing and content
    #[serde(default)]
    pub reflection: ReflectionSettings,

    /// Conversation memory limits
    #[serde(default)]
    pub memory: MemorySettings,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingSettings,

    /// Daily task scheduler
    #[serde(default)]
    pub scheduler: SchedulerSettings,

    /// Knowledge base overrides
    #[serde(default)]
    pub knowledge: KnowledgeStoreSettings,
}

/// Assistant identity
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IdentitySettings {
    /// Name used in prompts and as the log prefix
    #[serde(default = "default_bot_name")]
    pub bot_name: String,

    #[serde(default = "default_bot_title")]
    pub bot_title: String,

    /// Phrases that activate the assistant (case-insensitive)
    #[serde(default = "default_wake_words")]
    pub wake_words: Vec<String>,

    /// Names the user goes by (all refer to the same person)
    #[serde(default = "default_user_names")]
    pub user_names: Vec<String>,

    #[serde(default = "default_primary_user")]
    pub primary_user: String,
}

/// Language model settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LlmSettings {
    #[serde(default = "default_primary_model")]
    pub primary_model: String,

    #[serde(default = "default_primary_provider")]
    pub primary_provider: String,

    #[serde(default = "default_claude_model")]
    pub claude_model: String,

    #[serde(default = "default_gemini_model")]
    pub gemini_model: String,

    #[serde(default = "default_temperature")]
    pub default_temperature: f32,

    #[serde(default = "default_creative_temperature")]
    pub creative_temperature: f32,

    #[serde(default = "default_precise_temperature")]
    pub precise_temperature: f32,
}

/// Voice I/O settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VoiceSettings {
    #[serde(default = "default_elevenlabs_voice_id")]
    pub elevenlabs_voice_id: String,

    #[serde(default = "default_elevenlabs_model")]
    pub elevenlabs_model: String,

    #[serde(default = "default_whisper_model")]
    pub whisper_model: String,

    /// Wake word detection sensitivity (0.0 to 1.0)
    #[serde(default = "default_wake_word_sensitivity")]
    pub wake_word_sensitivity: f32,

    /// Milliseconds of silence that stop a recording
    #[serde(default = "default_silence_threshold_ms")]
    pub silence_threshold_ms: u32,

    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    #[serde(default = "default_channels")]
    pub channels: u16,
}

/// Reflection timing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReflectionSettings {
    /// Hour of the daily reflection (24-hour clock)
    #[serde(default)]
    pub hour: u32,

    #[serde(default)]
    pub minute: u32,

    #[serde(default = "default_reflection_second")]
    pub second: u32,

    #[serde(default = "default_true")]
    pub include_lessons: bool,

    #[serde(default = "default_true")]
    pub include_challenges: bool,

    #[serde(default = "default_true")]
    pub include_performance: bool,

    #[serde(default = "default_true")]
    pub include_relationship: bool,

    #[serde(default = "default_true")]
    pub include_external_interactions: bool,

    #[serde(default = "default_true")]
    pub include_strategic_outlook: bool,

    #[serde(default = "default_true")]
    pub include_threat_assessment: bool,
}

/// Conversation memory settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MemorySettings {
    /// Conversation turns kept in short-term memory
    #[serde(default = "default_short_term_limit")]
    pub short_term_limit: usize,

    /// Interactions collected before a long-term summary
    #[serde(default = "default_long_term_summary_threshold")]
    pub long_term_summary_threshold: usize,

    /// Maximum tokens for the context window
    #[serde(default = "default_max_context_tokens")]
    pub max_context_tokens: usize,
}

/// Logging settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingSettings {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Daily task scheduler settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SchedulerSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Local wall-clock time of the daily task ("HH:MM" or "HH:MM:SS")
    #[serde(default = "default_daily_task_time")]
    pub daily_task_time: String,

    /// Seconds between schedule checks
    #[serde(default = "default_check_seconds")]
    pub check_seconds: u64,
}

/// User-facing knowledge base overrides.
///
/// Resolved into [`super::KnowledgeSettings`] via `From`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct KnowledgeStoreSettings {
    /// Explicit path of the entries JSON file
    pub entries_path: Option<String>,

    /// Override for the root data directory
    pub data_root: Option<String>,

    /// Importance floor used when building prompt context
    pub context_min_importance: Option<i64>,

    /// Entries included in prompt context by default
    pub context_max_entries: Option<usize>,

    /// Characters of a paragraph used as the title of imported entries
    pub import_title_chars: Option<usize>,
}

fn default_true() -> bool {
    true
}

fn default_bot_name() -> String {
    "Vigil".to_string()
}

fn default_bot_title() -> String {
    "The Watchful Guardian".to_string()
}

fn default_wake_words() -> Vec<String> {
    [
        "vigil",
        "hey vigil",
        "yo vigil",
        "yo v",
        "yo vigil you with me",
        "the truth will set you free",
        "help",
    ]
    .iter()
    .map(|w| w.to_string())
    .collect()
}

fn default_user_names() -> Vec<String> {
    ["Louis", "Bizy", "Lazurith"]
        .iter()
        .map(|n| n.to_string())
        .collect()
}

fn default_primary_user() -> String {
    "Louis".to_string()
}

fn default_primary_model() -> String {
    "gpt-4o".to_string()
}

fn default_primary_provider() -> String {
    "openai".to_string()
}

fn default_claude_model() -> String {
    "claude-sonnet-4-20250514".to_string()
}

fn default_gemini_model() -> String {
    "Gemini-2.5-Flash".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_creative_temperature() -> f32 {
    0.9
}

fn default_precise_temperature() -> f32 {
    0.3
}

fn default_elevenlabs_voice_id() -> String {
    "pNInz6obpgDQGcFmaJgB".to_string()
}

fn default_elevenlabs_model() -> String {
    "eleven_monolingual_v1".to_string()
}

fn default_whisper_model() -> String {
    "whisper-1".to_string()
}

fn default_wake_word_sensitivity() -> f32 {
    0.5
}

fn default_silence_threshold_ms() -> u32 {
    500
}

fn default_sample_rate() -> u32 {
    16000
}

fn default_channels() -> u16 {
    1
}

fn default_reflection_second() -> u32 {
    1
}

fn default_short_term_limit() -> usize {
    20
}

fn default_long_term_summary_threshold() -> usize {
    50
}

fn default_max_context_tokens() -> usize {
    8000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_daily_task_time() -> String {
    "10:00".to_string()
}

fn default_check_seconds() -> u64 {
    60
}

impl Default for IdentitySettings {
    fn default() -> Self {
        Self {
            bot_name: default_bot_name(),
            bot_title: default_bot_title(),
            wake_words: default_wake_words(),
            user_names: default_user_names(),
            primary_user: default_primary_user(),
        }
    }
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            primary_model: default_primary_model(),
            primary_provider: default_primary_provider(),
            claude_model: default_claude_model(),
            gemini_model: default_gemini_model(),
            default_temperature: default_temperature(),
            creative_temperature: default_creative_temperature(),
            precise_temperature: default_precise_temperature(),
        }
    }
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            elevenlabs_voice_id: default_elevenlabs_voice_id(),
            elevenlabs_model: default_elevenlabs_model(),
            whisper_model: default_whisper_model(),
            wake_word_sensitivity: default_wake_word_sensitivity(),
            silence_threshold_ms: default_silence_threshold_ms(),
            sample_rate: default_sample_rate(),
            channels: default_channels(),
        }
    }
}

impl Default for ReflectionSettings {
    fn default() -> Self {
        Self {
            hour: 0,
            minute: 0,
            second: default_reflection_second(),
            include_lessons: true,
            include_challenges: true,
            include_performance: true,
            include_relationship: true,
            include_external_interactions: true,
            include_strategic_outlook: true,
            include_threat_assessment: true,
        }
    }
}

impl Default for MemorySettings {
    fn default() -> Self {
        Self {
            short_term_limit: default_short_term_limit(),
            long_term_summary_threshold: default_long_term_summary_threshold(),
            max_context_tokens: default_max_context_tokens(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for SchedulerSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            daily_task_time: default_daily_task_time(),
            check_seconds: default_check_seconds(),
        }
    }
}

/// Errors that can occur when loading settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config directory not found")]
    ConfigDirNotFound,
}

impl Settings {
    /// Load settings from the TOML configuration file.
    ///
    /// If the config file doesn't exist, creates it with default values.
    /// The file is located at `~/.config/vigil/config.toml`.
    pub fn load() -> Result<Self, SettingsError> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            tracing::info!("Creating default configuration at {:?}", config_path);
            Self::create_default_config(&config_path)?;
        }

        let content = fs::read_to_string(&config_path)?;
        Self::from_toml(&content)
    }

    /// Parse settings from TOML content.
    pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
        let settings: Self = toml::from_str(content)?;
        Ok(settings)
    }

    /// Get the configuration file path.
    ///
    /// `VIGIL_CONFIG_DIR` wins over the XDG config directory.
    pub fn config_path() -> Result<PathBuf, SettingsError> {
        if let Ok(override_dir) = std::env::var("VIGIL_CONFIG_DIR") {
            let dir = PathBuf::from(override_dir);
            return Ok(dir.join("config.toml"));
        }

        let config_dir = dirs::config_dir()
            .ok_or(SettingsError::ConfigDirNotFound)?
            .join("vigil");

        Ok(config_dir.join("config.toml"))
    }

    fn create_default_config(path: &PathBuf) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, DEFAULT_CONFIG_TOML)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();

        assert_eq!(settings.identity.bot_name, "Vigil");
        assert_eq!(settings.identity.primary_user, "Louis");
        assert_eq!(settings.identity.user_names.len(), 3);

        assert_eq!(settings.llm.primary_model, "gpt-4o");
        assert_eq!(settings.llm.primary_provider, "openai");

        assert_eq!(settings.voice.sample_rate, 16000);
        assert_eq!(settings.voice.channels, 1);

        assert_eq!(settings.reflection.hour, 0);
        assert_eq!(settings.reflection.second, 1);
        assert!(settings.reflection.include_threat_assessment);

        assert_eq!(settings.memory.short_term_limit, 20);
        assert_eq!(settings.memory.max_context_tokens, 8000);

        assert_eq!(settings.logging.level, "info");

        assert!(settings.scheduler.enabled);
        assert_eq!(settings.scheduler.daily_task_time, "10:00");
        assert_eq!(settings.scheduler.check_seconds, 60);

        assert!(settings.knowledge.entries_path.is_none());
        assert!(settings.knowledge.context_min_importance.is_none());
    }

    #[test]
    fn test_default_config_toml_matches_defaults() {
        let parsed = Settings::from_toml(DEFAULT_CONFIG_TOML).unwrap();
        let defaults = Settings::default();

        assert_eq!(parsed.identity.wake_words, defaults.identity.wake_words);
        assert_eq!(parsed.identity.bot_title, defaults.identity.bot_title);
        assert_eq!(parsed.llm.claude_model, defaults.llm.claude_model);
        assert_eq!(parsed.voice.elevenlabs_voice_id, defaults.voice.elevenlabs_voice_id);
        assert_eq!(parsed.scheduler.daily_task_time, defaults.scheduler.daily_task_time);
        assert_eq!(parsed.knowledge.context_min_importance, Some(3));
        assert_eq!(parsed.knowledge.context_max_entries, Some(3));
    }

    #[test]
    fn test_from_toml() {
        let toml = r#"
[identity]
bot_name = "Sentinel"
primary_user = "Ada"
wake_words = ["sentinel"]

[llm]
primary_model = "gpt-4.1"
default_temperature = 0.5

[logging]
level = "debug"

[scheduler]
daily_task_time = "07:30"
check_seconds = 15

[knowledge]
entries_path = "/tmp/entries.json"
context_max_entries = 5
"#;

        let settings = Settings::from_toml(toml).unwrap();

        assert_eq!(settings.identity.bot_name, "Sentinel");
        assert_eq!(settings.identity.primary_user, "Ada");
        assert_eq!(settings.identity.wake_words, vec!["sentinel".to_string()]);
        // Omitted identity fields keep their defaults
        assert_eq!(settings.identity.bot_title, "The Watchful Guardian");

        assert_eq!(settings.llm.primary_model, "gpt-4.1");
        assert_eq!(settings.llm.default_temperature, 0.5);
        assert_eq!(settings.llm.creative_temperature, 0.9);

        assert_eq!(settings.logging.level, "debug");
        assert_eq!(settings.scheduler.daily_task_time, "07:30");
        assert_eq!(settings.scheduler.check_seconds, 15);

        assert_eq!(
            settings.knowledge.entries_path.as_deref(),
            Some("/tmp/entries.json")
        );
        assert_eq!(settings.knowledge.context_max_entries, Some(5));
        assert!(settings.knowledge.data_root.is_none());
    }

    #[test]
    fn test_from_toml_partial() {
        let toml = r#"
[memory]
short_term_limit = 40
"#;

        let settings = Settings::from_toml(toml).unwrap();

        assert_eq!(settings.memory.short_term_limit, 40);
        assert_eq!(settings.memory.long_term_summary_threshold, 50);
        assert_eq!(settings.identity.bot_name, "Vigil");
        assert_eq!(settings.scheduler.daily_task_time, "10:00");
    }

    #[test]
    fn test_toml_roundtrip() {
        let mut settings = Settings::default();
        settings.identity.bot_name = "Warden".to_string();
        settings.scheduler.daily_task_time = "22:15".to_string();
        settings.knowledge.context_min_importance = Some(4);

        let content = toml::to_string_pretty(&settings).expect("serialize failed");
        let loaded = Settings::from_toml(&content).expect("parse failed");

        assert_eq!(loaded.identity.bot_name, "Warden");
        assert_eq!(loaded.scheduler.daily_task_time, "22:15");
        assert_eq!(loaded.knowledge.context_min_importance, Some(4));
        assert_eq!(loaded.identity.wake_words, settings.identity.wake_words);
    }

    #[test]
    fn test_config_path_uses_env_override() {
        let dir = tempfile::tempdir().unwrap();
        let value = dir.path().to_string_lossy().to_string();

        // SAFETY: test-scoped env mutation.
        unsafe { std::env::set_var("VIGIL_CONFIG_DIR", &value) };
        let path = Settings::config_path().unwrap();
        // SAFETY: test-scoped env mutation cleanup.
        unsafe { std::env::remove_var("VIGIL_CONFIG_DIR") };

        assert_eq!(path, dir.path().join("config.toml"));
    }
}
