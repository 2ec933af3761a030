//! Travel Knowledge Oracle
//!
//! Seam to the knowledge-retrieval backend behind the travel guide tool.
//! Index and retrieval internals live on the other side of this trait; the
//! concierge only passes questions through and returns the oracle's text.

use async_trait::async_trait;

/// Strategy trait for knowledge retrieval backends
#[async_trait]
pub trait KnowledgeOracle: Send + Sync {
    /// Answer a free-text travel question
    async fn query(&self, text: &str) -> anyhow::Result<String>;

    /// Oracle name (diagnostics)
    fn name(&self) -> &str {
        "knowledge-oracle"
    }
}

/// Canned oracle for development and testing
pub struct CannedGuide {
    answer: String,
}

impl CannedGuide {
    pub fn new(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
        }
    }
}

#[async_trait]
impl KnowledgeOracle for CannedGuide {
    async fn query(&self, _text: &str) -> anyhow::Result<String> {
        Ok(self.answer.clone())
    }

    fn name(&self) -> &str {
        "canned-guide"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_canned_guide() {
        let guide = CannedGuide::new("Visit the Salar de Uyuni at dawn.");
        let answer = guide.query("what should I see?").await.unwrap();
        assert!(answer.contains("Uyuni"));
    }
}
