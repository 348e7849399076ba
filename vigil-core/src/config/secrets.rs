//! Secrets configuration loaded from environment variables only.
//!
//! This module handles sensitive configuration like API keys that should
//! never be stored in files. All secrets are read from environment variables.

use std::env;

/// Secrets loaded exclusively from environment variables.
///
/// None of them are required: the knowledge base runs without any
/// provider configured.
#[derive(Debug, Clone, Default)]
pub struct Secrets {
    /// OpenAI API key (env: OPENAI_API_KEY)
    pub openai_api_key: Option<String>,

    /// Anthropic API key (env: ANTHROPIC_API_KEY)
    pub anthropic_api_key: Option<String>,

    /// Poe API key (env: POE_API_KEY)
    pub poe_api_key: Option<String>,

    /// ElevenLabs API key (env: ELEVENLABS_API_KEY)
    pub elevenlabs_api_key: Option<String>,
}

impl Secrets {
    /// Load secrets from environment variables.
    ///
    /// This function also loads .env file if present (for development),
    /// but production should rely on actual environment variables.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        Self::from_env_inner()
    }

    /// Internal method to load from environment without loading .env
    pub(crate) fn from_env_inner() -> Self {
        Self {
            openai_api_key: non_empty_var("OPENAI_API_KEY"),
            anthropic_api_key: non_empty_var("ANTHROPIC_API_KEY"),
            poe_api_key: non_empty_var("POE_API_KEY"),
            elevenlabs_api_key: non_empty_var("ELEVENLABS_API_KEY"),
        }
    }

    /// Check if a specific provider is available
    pub fn has_provider(&self, provider: &str) -> bool {
        match provider {
            "openai" => self.openai_api_key.is_some(),
            "anthropic" => self.anthropic_api_key.is_some(),
            "poe" => self.poe_api_key.is_some(),
            "elevenlabs" => self.elevenlabs_api_key.is_some(),
            _ => false,
        }
    }

    /// Get the available providers
    pub fn available_providers(&self) -> Vec<&'static str> {
        let mut providers = Vec::new();
        if self.openai_api_key.is_some() {
            providers.push("openai");
        }
        if self.anthropic_api_key.is_some() {
            providers.push("anthropic");
        }
        if self.poe_api_key.is_some() {
            providers.push("poe");
        }
        if self.elevenlabs_api_key.is_some() {
            providers.push("elevenlabs");
        }
        providers
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}
