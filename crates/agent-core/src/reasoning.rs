//! Reasoning Loop
//!
//! Implements the ReAct (Reason + Act) pattern: THINKING asks the oracle for
//! the next step, ACTING dispatches a tool call, OBSERVING feeds the result
//! back into the transcript, and the cycle repeats until the oracle produces
//! a final answer (DONE) or the run fails (iteration cap, oracle fault,
//! timeout). Tool-level faults never fail the run; they become observations
//! so the oracle gets a chance to recover.

use std::sync::Arc;
use std::time::Duration;

use crate::error::{AgentError, Result};
use crate::message::Message;
use crate::oracle::{NextStep, ReasoningOracle};
use crate::session::Session;
use crate::tool::{ToolCallIntent, ToolRegistry};

/// Agent configuration
#[derive(Clone, Debug)]
pub struct AgentConfig {
    /// System prompt inserted at the head of fresh transcripts
    pub system_prompt: Option<String>,

    /// Maximum reasoning iterations per run before giving up
    pub max_iterations: usize,

    /// Timeout applied to each THINKING and ACTING wait
    pub step_timeout: Option<Duration>,

    /// Whether to append tool descriptions to the system prompt
    pub inject_tool_descriptions: bool,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            system_prompt: None,
            max_iterations: 10,
            step_timeout: None,
            inject_tool_descriptions: true,
        }
    }
}

/// The main Agent struct
///
/// One run is strictly sequential: no two tool calls from the same session
/// overlap, and each observation reflects the immediately preceding action.
/// Independent sessions may run concurrently; they share nothing but
/// whatever durable stores the tool handlers write to.
pub struct Agent {
    oracle: Arc<dyn ReasoningOracle>,
    tools: Arc<ToolRegistry>,
    config: AgentConfig,
}

impl Agent {
    /// Create a new agent
    pub fn new(
        oracle: Arc<dyn ReasoningOracle>,
        tools: Arc<ToolRegistry>,
        config: AgentConfig,
    ) -> Self {
        Self {
            oracle,
            tools,
            config,
        }
    }

    /// Create with default configuration
    pub fn with_defaults(oracle: Arc<dyn ReasoningOracle>, tools: Arc<ToolRegistry>) -> Self {
        Self::new(oracle, tools, AgentConfig::default())
    }

    /// Build the full system prompt including tool descriptions
    fn build_system_prompt(&self) -> Option<String> {
        let mut prompt = self.config.system_prompt.clone()?;

        if self.config.inject_tool_descriptions && !self.tools.is_empty() {
            prompt.push_str("\n\n");
            prompt.push_str(&self.tools.prompt_section());
        }

        Some(prompt)
    }

    /// Pursue a goal within a session until the oracle answers or the run
    /// fails. Returns the oracle's final answer verbatim.
    pub async fn run(&self, goal: &str, session: &mut Session) -> Result<String> {
        // Ensure the system prompt is set on fresh transcripts
        if let Some(prompt) = self.build_system_prompt() {
            session.conversation.ensure_system_prompt(prompt);
        }

        session.conversation.push(Message::user(goal));
        session.touch();

        for iteration in 1..=self.config.max_iterations {
            session.iterations += 1;

            // THINKING
            let step = self.think(session).await?;

            let intent = match step {
                NextStep::Answer(answer) => {
                    tracing::debug!(iteration, "Oracle produced final answer");
                    session.conversation.push(Message::assistant(&answer));
                    session.touch();
                    return Ok(answer);
                }
                NextStep::ToolCall(intent) => intent,
            };

            // Record the action in the transcript so the oracle sees what it
            // just asked for
            session
                .conversation
                .push(Message::assistant(render_action(&intent)));

            // ACTING
            tracing::debug!(iteration, tool = %intent.name, "Oracle requested tool");
            let observation = match self.config.step_timeout {
                Some(limit) => tokio::time::timeout(limit, self.tools.observe(&intent))
                    .await
                    .map_err(|_| AgentError::StepTimeout(limit))?,
                None => self.tools.observe(&intent).await,
            };

            // OBSERVING
            session
                .conversation
                .push(Message::tool(observation.render(), &observation.tool_name));
            session.touch();
        }

        tracing::warn!(
            max_iterations = self.config.max_iterations,
            session = %session.id,
            "Run did not converge"
        );
        Err(AgentError::DidNotConverge {
            iterations: self.config.max_iterations,
        })
    }

    /// Ask the oracle for the next step, under the step timeout if one is
    /// configured
    async fn think(&self, session: &Session) -> Result<NextStep> {
        let transcript = session.conversation.messages();
        match self.config.step_timeout {
            Some(limit) => tokio::time::timeout(limit, self.oracle.next_step(transcript))
                .await
                .map_err(|_| AgentError::StepTimeout(limit))?,
            None => self.oracle.next_step(transcript).await,
        }
    }

    /// Get the tool registry
    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    /// Get configuration
    pub fn config(&self) -> &AgentConfig {
        &self.config
    }
}

/// Transcript rendering of a tool call intent
fn render_action(intent: &ToolCallIntent) -> String {
    let args = serde_json::to_string(&intent.arguments).unwrap_or_else(|_| "{}".into());
    format!("Action: {}({})", intent.name, args)
}

/// Builder for Agent configuration
pub struct AgentBuilder {
    oracle: Option<Arc<dyn ReasoningOracle>>,
    tools: ToolRegistry,
    config: AgentConfig,
}

impl Default for AgentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentBuilder {
    pub fn new() -> Self {
        Self {
            oracle: None,
            tools: ToolRegistry::new(),
            config: AgentConfig::default(),
        }
    }

    pub fn oracle(mut self, oracle: Arc<dyn ReasoningOracle>) -> Self {
        self.oracle = Some(oracle);
        self
    }

    pub fn tool<T: crate::tool::Tool + 'static>(mut self, tool: T) -> Self {
        self.tools.register(tool);
        self
    }

    pub fn tools(mut self, tools: ToolRegistry) -> Self {
        self.tools = tools;
        self
    }

    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.system_prompt = Some(prompt.into());
        self
    }

    pub fn max_iterations(mut self, max: usize) -> Self {
        self.config.max_iterations = max;
        self
    }

    pub fn step_timeout(mut self, timeout: Duration) -> Self {
        self.config.step_timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<Agent> {
        let oracle = self
            .oracle
            .ok_or_else(|| AgentError::Config("Oracle is required".into()))?;

        Ok(Agent::new(oracle, Arc::new(self.tools), self.config))
    }
}
