use std::path::PathBuf;

use crate::error::DaemonError;

const USAGE: &str = "vigil [import <path> [category] | prompt <text...>]";

/// What the binary was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the daily task loop until interrupted.
    Run,
    /// Import a text file into the knowledge base and exit.
    Import {
        path: PathBuf,
        category: Option<String>,
    },
    /// Print the system prompt assembled for `text` and exit.
    Prompt { text: String },
}

impl Command {
    /// Parse positional arguments, excluding the program name.
    pub fn parse<I, S>(args: I) -> Result<Self, DaemonError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|a| a.as_ref().to_string()).collect();
        match args.as_slice() {
            [] => Ok(Self::Run),
            [cmd, path] if cmd == "import" => Ok(Self::Import {
                path: PathBuf::from(path),
                category: None,
            }),
            [cmd, path, category] if cmd == "import" => Ok(Self::Import {
                path: PathBuf::from(path),
                category: Some(category.clone()),
            }),
            [cmd, words @ ..] if cmd == "prompt" && !words.is_empty() => Ok(Self::Prompt {
                text: words.join(" "),
            }),
            _ => Err(DaemonError::Usage(USAGE.to_string())),
        }
    }
}
