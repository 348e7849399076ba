pub mod config;
pub mod prompt;
pub mod schedule;

// Config re-exports
pub use config::{
    Config,
    ConfigError,
    IdentitySettings,
    KnowledgeSettings,
    Secrets,
    Settings,
    SettingsError,
    load_dotenv,
};

pub use prompt::{PromptError, compose_prompt, system_prompt};
pub use schedule::{DailySchedule, ScheduleParseError};
