use tokio::sync::Mutex;

use vigil_core::{Config, compose_prompt, system_prompt};
use vigil_knowledge::{KnowledgeBase, codex};

use crate::error::DaemonError;

/// Shared state of the running daemon.
///
/// The knowledge base sits behind a mutex so each read-modify-persist
/// sequence runs alone.
#[derive(Debug)]
pub struct AppState {
    pub config: Config,
    knowledge: Mutex<KnowledgeBase>,
}

impl AppState {
    pub fn new(config: Config, knowledge: KnowledgeBase) -> Self {
        Self {
            config,
            knowledge: Mutex::new(knowledge),
        }
    }

    /// Open the knowledge base described by `config`.
    pub fn open(config: Config) -> Result<Self, DaemonError> {
        let knowledge = KnowledgeBase::open(config.knowledge_settings())?;
        Ok(Self::new(config, knowledge))
    }

    pub fn knowledge(&self) -> &Mutex<KnowledgeBase> {
        &self.knowledge
    }

    /// System prompt for `user_text` with stored knowledge and Codex
    /// wisdom appended. Empty knowledge context is left out.
    pub async fn build_prompt(&self, user_text: &str) -> Result<String, DaemonError> {
        let base = system_prompt(&self.config.settings.identity)?;
        let knowledge = self
            .knowledge
            .lock()
            .await
            .get_context_for_query(user_text, None);
        let wisdom = codex::render_context(user_text);
        Ok(compose_prompt(&base, &[&knowledge, &wisdom]))
    }

    /// System prompt for the daily task: identity plus the Codex summary.
    pub fn build_daily_prompt(&self) -> Result<String, DaemonError> {
        let base = system_prompt(&self.config.settings.identity)?;
        Ok(compose_prompt(&base, &[&codex::render_summary()]))
    }
}
