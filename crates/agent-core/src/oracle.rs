//! Reasoning Oracle Strategy
//!
//! Defines the seam between the agent loop and whatever produces the next
//! step of reasoning (an LLM, a rules engine, a test script). The oracle is
//! opaque: the loop only requires that, given the transcript so far, it
//! returns either a final answer or a tool call intent. How natural language
//! becomes an intent is the oracle's problem, not the loop's.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{AgentError, Result};
use crate::message::Message;
use crate::tool::ToolCallIntent;

/// What the oracle wants to do next
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum NextStep {
    /// Terminate the run with this natural-language answer
    Answer(String),

    /// Invoke exactly one tool, then continue reasoning
    ToolCall(ToolCallIntent),
}

/// Strategy trait for reasoning oracles
///
/// Implement this to plug in an LLM backend or any other planner.
/// The agent works exclusively through this interface.
#[async_trait]
pub trait ReasoningOracle: Send + Sync {
    /// Produce the next step given the transcript so far
    async fn next_step(&self, transcript: &[Message]) -> Result<NextStep>;
}

/// Scripted oracle for development and testing.
///
/// Plays back a fixed sequence of steps; optionally cycles through the
/// sequence forever instead of exhausting it.
pub struct ScriptedOracle {
    steps: Mutex<VecDeque<NextStep>>,
    cycle: bool,
}

impl ScriptedOracle {
    /// Play each step once, then fail with an oracle error
    pub fn new(steps: Vec<NextStep>) -> Self {
        Self {
            steps: Mutex::new(steps.into()),
            cycle: false,
        }
    }

    /// Cycle through the steps forever (e.g. an oracle that always asks for
    /// the same tool)
    pub fn looping(steps: Vec<NextStep>) -> Self {
        Self {
            steps: Mutex::new(steps.into()),
            cycle: true,
        }
    }
}

#[async_trait]
impl ReasoningOracle for ScriptedOracle {
    async fn next_step(&self, _transcript: &[Message]) -> Result<NextStep> {
        let mut steps = self
            .steps
            .lock()
            .map_err(|_| AgentError::Oracle("script lock poisoned".into()))?;

        let step = steps
            .pop_front()
            .ok_or_else(|| AgentError::Oracle("script exhausted".into()))?;

        if self.cycle {
            steps.push_back(step.clone());
        }

        Ok(step)
    }
}
