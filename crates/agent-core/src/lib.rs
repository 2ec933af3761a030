//! # agent-core
//!
//! Core agent logic: an oracle-agnostic reasoning loop and a schema-validated
//! tool system.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Agent                                 │
//! │  ┌─────────────┐  ┌─────────────┐  ┌─────────────────────┐  │
//! │  │  Reasoning  │  │    Tool     │  │   ReasoningOracle   │  │
//! │  │    Loop     │──│   Registry  │──│     (Strategy)      │  │
//! │  └─────────────┘  └─────────────┘  └─────────────────────┘  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The `ReasoningOracle` trait enables swapping between LLM backends, rule
//! engines, or scripted test oracles without changing agent logic. The loop
//! asks the oracle for the next step (answer or tool call), dispatches tool
//! calls through the registry, and feeds each observation back until the
//! oracle answers or the iteration cap is hit.

pub mod error;
pub mod message;
pub mod oracle;
pub mod reasoning;
pub mod session;
pub mod tool;

pub use error::{AgentError, Result};
pub use message::{Conversation, Message, Role};
pub use oracle::{NextStep, ReasoningOracle, ScriptedOracle};
pub use reasoning::{Agent, AgentBuilder, AgentConfig};
pub use session::{Session, SessionId};
pub use tool::{
    Observation, ParamKind, ParameterSchema, Tool, ToolArgs, ToolCallIntent, ToolError,
    ToolOutput, ToolRegistry, ToolSchema,
};
