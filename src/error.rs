use std::io;
use std::time::Duration;
use thiserror::Error;

/// Failure of a single external tool invocation.
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("{tool} not found, ensure it is installed and on PATH")]
    NotFound { tool: String },

    #[error("failed to launch {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: io::Error,
    },

    #[error("{tool} exited with {}: {}", exit_label(.code), .stderr.trim())]
    NonZeroExit {
        tool: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("{tool} timed out after {}s", .budget.as_secs())]
    Timeout { tool: String, budget: Duration },

    #[error("I/O error while running {tool}: {source}")]
    Io {
        tool: String,
        #[source]
        source: io::Error,
    },
}

impl ToolError {
    pub fn tool(&self) -> &str {
        match self {
            ToolError::NotFound { tool }
            | ToolError::Spawn { tool, .. }
            | ToolError::NonZeroExit { tool, .. }
            | ToolError::Timeout { tool, .. }
            | ToolError::Io { tool, .. } => tool,
        }
    }
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("status {}", c),
        None => "a signal".to_string(),
    }
}

/// Anything a producer can fail with before its result is turned into an empty list.
#[derive(Error, Debug)]
pub enum ProducerError {
    #[error(transparent)]
    Tool(#[from] ToolError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {0}")]
    Status(u16),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Cannot read config file: {0}")]
    Io(#[from] io::Error),

    #[error("Cannot parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_zero_exit_message() {
        let err = ToolError::NonZeroExit {
            tool: "httpx".to_string(),
            code: Some(2),
            stderr: "bad flag\n".to_string(),
        };
        assert_eq!(err.to_string(), "httpx exited with status 2: bad flag");
        assert_eq!(err.tool(), "httpx");
    }

    #[test]
    fn test_timeout_message() {
        let err = ToolError::Timeout {
            tool: "gobuster".to_string(),
            budget: Duration::from_secs(300),
        };
        assert_eq!(err.to_string(), "gobuster timed out after 300s");
    }
}
