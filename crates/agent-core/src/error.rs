//! Error Types

use thiserror::Error;

/// Result type alias for agent operations
pub type Result<T> = std::result::Result<T, AgentError>;

/// Terminal failures of an agent run.
///
/// Tool-level faults (unknown tool, bad arguments, handler failure) are NOT
/// represented here: they are recoverable and flow back into the reasoning
/// loop as observations. See [`crate::tool::ToolError`].
#[derive(Error, Debug)]
pub enum AgentError {
    /// Reasoning oracle returned an error
    #[error("Oracle error: {0}")]
    Oracle(String),

    /// A THINKING or ACTING wait exceeded the configured step timeout
    #[error("Step timed out after {0:?}")]
    StepTimeout(std::time::Duration),

    /// Iteration cap reached without a final answer
    #[error("Did not converge after {iterations} iterations")]
    DidNotConverge { iterations: usize },

    /// Session error
    #[error("Session error: {0}")]
    Session(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Other/unknown error
    #[error("{0}")]
    Other(String),
}

impl AgentError {
    /// Check if error is retryable by the caller. The loop itself never
    /// retries; retry policy belongs to whoever invoked the run.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AgentError::Oracle(_) | AgentError::StepTimeout(_) | AgentError::Io(_)
        )
    }

    /// Convert to a user-friendly message. Raw internal errors are never
    /// shown to end users verbatim; they map onto this bounded set.
    pub fn user_message(&self) -> String {
        match self {
            AgentError::Oracle(_) => {
                "The planning service is currently unavailable. Please try again.".into()
            }
            AgentError::StepTimeout(_) => "The request timed out. Please try again.".into(),
            AgentError::DidNotConverge { .. } => {
                "The request did not converge to an answer. Please try a simpler goal.".into()
            }
            AgentError::Session(_) => {
                "The session is no longer usable. Please start a new one.".into()
            }
            AgentError::Config(msg) => format!("Configuration problem: {}", msg),
            _ => "An unexpected error occurred.".into(),
        }
    }
}

impl From<anyhow::Error> for AgentError {
    fn from(err: anyhow::Error) -> Self {
        AgentError::Other(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages_are_bounded() {
        let err = AgentError::Oracle("connection reset by peer at 10.0.0.3:9911".into());
        assert!(!err.user_message().contains("10.0.0.3"));

        let err = AgentError::DidNotConverge { iterations: 10 };
        assert!(err.user_message().contains("did not converge"));
    }

    #[test]
    fn test_retryable_classification() {
        assert!(AgentError::StepTimeout(std::time::Duration::from_secs(30)).is_retryable());
        assert!(!AgentError::DidNotConverge { iterations: 10 }.is_retryable());
    }
}
