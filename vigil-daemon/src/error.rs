use vigil_core::{ConfigError, PromptError};
use vigil_knowledge::KnowledgeError;

#[derive(Debug, thiserror::Error)]
pub enum DaemonError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("knowledge base error: {0}")]
    Knowledge(#[from] KnowledgeError),
    #[error("prompt error: {0}")]
    Prompt(#[from] PromptError),
    #[error("usage: {0}")]
    Usage(String),
}
