//! Travel Guide Tool
//!
//! Pass-through to the knowledge oracle: the question goes in, the oracle's
//! text comes back as the observation. No reservation state is touched.

use std::sync::Arc;

use async_trait::async_trait;

use agent_core::{
    tool::ParameterSchema, ParamKind, Tool, ToolArgs, ToolError, ToolOutput, ToolSchema,
};

use crate::error::ConciergeError;
use crate::guide::KnowledgeOracle;

pub struct TravelGuideTool {
    oracle: Arc<dyn KnowledgeOracle>,
}

impl TravelGuideTool {
    pub fn new(oracle: Arc<dyn KnowledgeOracle>) -> Self {
        Self { oracle }
    }
}

#[async_trait]
impl Tool for TravelGuideTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "travel_guide".into(),
            description: "Query travel information: recommendations and insights about places, transportation, accommodations, dining options, and travel tips.".into(),
            parameters: vec![ParameterSchema::required(
                "query",
                ParamKind::String,
                "Free-text travel question",
            )],
            has_side_effects: false,
        }
    }

    async fn execute(&self, args: &ToolArgs) -> Result<ToolOutput, ToolError> {
        let query = args.str("query")?;

        tracing::debug!(oracle = self.oracle.name(), "Querying travel guide");
        let answer = self
            .oracle
            .query(query)
            .await
            .map_err(|err| ConciergeError::Guide(err.to_string()))?;

        Ok(ToolOutput::text(answer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guide::CannedGuide;
    use agent_core::{ToolCallIntent, ToolRegistry};

    #[tokio::test]
    async fn test_passes_question_through() {
        let mut registry = ToolRegistry::new();
        registry.register(TravelGuideTool::new(Arc::new(CannedGuide::new(
            "Sucre: colonial center, mild weather in May.",
        ))));

        let output = registry
            .dispatch(&ToolCallIntent::new("travel_guide").arg("query", "Tell me about Sucre"))
            .await
            .unwrap();
        assert!(output.summary.contains("Sucre"));
    }

    #[tokio::test]
    async fn test_oracle_failure_becomes_handler_failed() {
        struct DownOracle;

        #[async_trait]
        impl KnowledgeOracle for DownOracle {
            async fn query(&self, _text: &str) -> anyhow::Result<String> {
                anyhow::bail!("index offline")
            }
        }

        let mut registry = ToolRegistry::new();
        registry.register(TravelGuideTool::new(Arc::new(DownOracle)));

        let err = registry
            .dispatch(&ToolCallIntent::new("travel_guide").arg("query", "anything"))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::HandlerFailed(_)));
    }
}
