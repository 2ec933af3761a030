//! Trip Summary Tool
//!
//! Reads the ledger and folds it into a per-place, cost-totaled report. An
//! absent ledger is an empty trip; a ledger that exists but cannot be
//! decoded is a handler failure.

use std::sync::Arc;

use async_trait::async_trait;

use agent_core::{Tool, ToolArgs, ToolError, ToolOutput, ToolSchema};

use crate::ledger::TripLedger;
use crate::model::TripSummary;
use crate::summary::summarize;

pub struct TripSummaryTool {
    ledger: Arc<TripLedger>,
}

impl TripSummaryTool {
    pub fn new(ledger: Arc<TripLedger>) -> Self {
        Self { ledger }
    }
}

/// Prompt-friendly rendering of the grouped activities plus the summary line
fn render_report(summary: &TripSummary) -> String {
    let mut text = String::new();
    for group in &summary.activities_by_place {
        text.push_str(&format!("Place: {}\n", group.place));
        for activity in &group.activities {
            text.push_str(&format!(
                "  Date: {}, Description: {}, Cost: {}.\n",
                activity.date, activity.description, activity.cost
            ));
        }
    }
    text.push_str(&summary.summary);
    text
}

#[async_trait]
impl Tool for TripSummaryTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "trip_summary".into(),
            description: "Summarize the trip so far: activities organized by place and date, with the total budget.".into(),
            parameters: Vec::new(),
            has_side_effects: false,
        }
    }

    async fn execute(&self, _args: &ToolArgs) -> Result<ToolOutput, ToolError> {
        let records = self.ledger.read_all()?;
        let summary = summarize(&records);

        let data = serde_json::to_value(&summary)
            .map_err(|err| ToolError::HandlerFailed(err.to_string()))?;
        Ok(ToolOutput::text(render_report(&summary)).with_data(data))
    }
}
