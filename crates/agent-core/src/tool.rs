//! Tool System
//!
//! Schema-validated tool framework. Each tool declares its parameter contract
//! up front; the registry resolves calls by name, coerces and validates every
//! argument against that contract, and only then invokes the handler. The
//! schema table is built once at startup and read-only afterwards.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tool call request produced by the reasoning oracle
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToolCallIntent {
    /// Tool identifier
    pub name: String,

    /// Arguments as key-value pairs
    #[serde(default)]
    pub arguments: HashMap<String, serde_json::Value>,
}

impl ToolCallIntent {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: HashMap::new(),
        }
    }

    /// Add an argument (builder style)
    pub fn arg(mut self, name: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.arguments.insert(name.into(), value.into());
        self
    }
}

/// Faults of a single tool invocation.
///
/// Every variant is recoverable from the loop's point of view: it becomes an
/// error observation fed back to the oracle, never a run failure.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ToolError {
    /// No tool registered under the requested name
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// An argument is missing, has the wrong type, or fails coercion
    #[error("Invalid argument '{field}': {reason}")]
    InvalidArguments { field: String, reason: String },

    /// The handler itself failed (storage fault, upstream outage, ...)
    #[error("Tool execution failed: {0}")]
    HandlerFailed(String),
}

impl ToolError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ToolError::InvalidArguments {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Successful output of a tool invocation
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToolOutput {
    /// Human-readable summary (what the oracle reads)
    pub summary: String,

    /// Structured payload (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl ToolOutput {
    pub fn text(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            data: None,
        }
    }

    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }
}

/// The result of one tool invocation, success or error, fed back into the
/// reasoning cycle. Ephemeral; never persisted.
#[derive(Clone, Debug)]
pub struct Observation {
    /// Tool that was called (or was asked for)
    pub tool_name: String,

    /// What happened
    pub outcome: Result<ToolOutput, ToolError>,
}

impl Observation {
    pub fn is_error(&self) -> bool {
        self.outcome.is_err()
    }

    /// Render for the transcript
    pub fn render(&self) -> String {
        match &self.outcome {
            Ok(output) => format!("[Tool '{}' returned]\n{}", self.tool_name, output.summary),
            Err(err) => format!("[Tool '{}' failed]\n{}", self.tool_name, err),
        }
    }
}

/// Primitive parameter types a tool may declare
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParamKind {
    /// Non-empty string (when required)
    #[serde(rename = "string")]
    String,
    /// ISO calendar date (YYYY-MM-DD)
    #[serde(rename = "date")]
    Date,
    /// ISO date-time (YYYY-MM-DDTHH:MM:SS)
    #[serde(rename = "date-time")]
    DateTime,
    #[serde(rename = "integer")]
    Integer,
    #[serde(rename = "decimal")]
    Decimal,
}

impl std::fmt::Display for ParamKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ParamKind::String => "string",
            ParamKind::Date => "date",
            ParamKind::DateTime => "date-time",
            ParamKind::Integer => "integer",
            ParamKind::Decimal => "decimal",
        };
        write!(f, "{}", s)
    }
}

/// Parameter definition for tool schema
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ParameterSchema {
    /// Parameter name
    pub name: String,

    /// Primitive type the value is coerced into
    #[serde(rename = "type")]
    pub kind: ParamKind,

    /// Human-readable description (shown to the oracle)
    pub description: String,

    /// Whether this parameter is required
    #[serde(default)]
    pub required: bool,

    /// Default value if not provided
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
}

impl ParameterSchema {
    pub fn required(name: impl Into<String>, kind: ParamKind, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            description: description.into(),
            required: true,
            default: None,
        }
    }

    pub fn optional(
        name: impl Into<String>,
        kind: ParamKind,
        description: impl Into<String>,
        default: Option<serde_json::Value>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            description: description.into(),
            required: false,
            default,
        }
    }
}

/// Tool definition schema (what the oracle sees)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToolSchema {
    /// Unique tool identifier
    pub name: String,

    /// Human-readable description
    pub description: String,

    /// Parameter definitions
    pub parameters: Vec<ParameterSchema>,

    /// Whether the tool writes durable state
    #[serde(default)]
    pub has_side_effects: bool,
}

/// A coerced argument value
#[derive(Clone, Debug, PartialEq)]
pub enum ArgValue {
    Str(String),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Int(i64),
    Decimal(f64),
}

/// Arguments after schema validation and coercion.
///
/// Handlers receive this instead of raw JSON: by the time a handler runs,
/// required parameters are present and every value has the declared type.
#[derive(Clone, Debug, Default)]
pub struct ToolArgs {
    values: HashMap<String, ArgValue>,
}

impl ToolArgs {
    fn get(&self, name: &str) -> Result<&ArgValue, ToolError> {
        self.values
            .get(name)
            .ok_or_else(|| ToolError::invalid(name, "argument not provided"))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn str(&self, name: &str) -> Result<&str, ToolError> {
        match self.get(name)? {
            ArgValue::Str(s) => Ok(s),
            other => Err(ToolError::invalid(name, format!("expected string, got {:?}", other))),
        }
    }

    pub fn date(&self, name: &str) -> Result<NaiveDate, ToolError> {
        match self.get(name)? {
            ArgValue::Date(d) => Ok(*d),
            other => Err(ToolError::invalid(name, format!("expected date, got {:?}", other))),
        }
    }

    pub fn datetime(&self, name: &str) -> Result<NaiveDateTime, ToolError> {
        match self.get(name)? {
            ArgValue::DateTime(dt) => Ok(*dt),
            other => Err(ToolError::invalid(
                name,
                format!("expected date-time, got {:?}", other),
            )),
        }
    }

    pub fn int(&self, name: &str) -> Result<i64, ToolError> {
        match self.get(name)? {
            ArgValue::Int(i) => Ok(*i),
            other => Err(ToolError::invalid(name, format!("expected integer, got {:?}", other))),
        }
    }
}

/// Coerce raw oracle-provided arguments against a tool's schema.
///
/// Required parameters must be present (after default filling) and non-empty
/// for strings; dates and date-times must parse from their ISO forms.
/// Arguments not named in the schema are ignored.
fn coerce_arguments(
    schema: &ToolSchema,
    raw: &HashMap<String, serde_json::Value>,
) -> Result<ToolArgs, ToolError> {
    let mut values = HashMap::new();

    for param in &schema.parameters {
        let provided = raw.get(&param.name).or(param.default.as_ref());

        let Some(value) = provided else {
            if param.required {
                return Err(ToolError::invalid(&param.name, "missing required argument"));
            }
            continue;
        };

        let coerced = coerce_value(param, value)?;
        values.insert(param.name.clone(), coerced);
    }

    Ok(ToolArgs { values })
}

fn coerce_value(param: &ParameterSchema, value: &serde_json::Value) -> Result<ArgValue, ToolError> {
    match param.kind {
        ParamKind::String => {
            let s = value
                .as_str()
                .ok_or_else(|| ToolError::invalid(&param.name, "expected a string"))?;
            if param.required && s.trim().is_empty() {
                return Err(ToolError::invalid(&param.name, "must not be empty"));
            }
            Ok(ArgValue::Str(s.to_string()))
        }
        ParamKind::Date => {
            let s = value
                .as_str()
                .ok_or_else(|| ToolError::invalid(&param.name, "expected an ISO date string"))?;
            let date = s.trim().parse::<NaiveDate>().map_err(|_| {
                ToolError::invalid(&param.name, format!("'{}' is not an ISO date (YYYY-MM-DD)", s))
            })?;
            Ok(ArgValue::Date(date))
        }
        ParamKind::DateTime => {
            let s = value
                .as_str()
                .ok_or_else(|| ToolError::invalid(&param.name, "expected an ISO date-time string"))?;
            let dt = s.trim().parse::<NaiveDateTime>().map_err(|_| {
                ToolError::invalid(
                    &param.name,
                    format!("'{}' is not an ISO date-time (YYYY-MM-DDTHH:MM:SS)", s),
                )
            })?;
            Ok(ArgValue::DateTime(dt))
        }
        ParamKind::Integer => {
            if let Some(i) = value.as_i64() {
                return Ok(ArgValue::Int(i));
            }
            // Oracles frequently quote numbers; accept the string form too.
            if let Some(s) = value.as_str() {
                if let Ok(i) = s.trim().parse::<i64>() {
                    return Ok(ArgValue::Int(i));
                }
            }
            Err(ToolError::invalid(&param.name, "expected an integer"))
        }
        ParamKind::Decimal => {
            if let Some(f) = value.as_f64() {
                return Ok(ArgValue::Decimal(f));
            }
            if let Some(s) = value.as_str() {
                if let Ok(f) = s.trim().parse::<f64>() {
                    return Ok(ArgValue::Decimal(f));
                }
            }
            Err(ToolError::invalid(&param.name, "expected a decimal number"))
        }
    }
}

/// Tool trait - implement to add new capabilities
#[async_trait]
pub trait Tool: Send + Sync {
    /// Get the tool's schema
    fn schema(&self) -> ToolSchema;

    /// Execute with coerced, validated arguments
    async fn execute(&self, args: &ToolArgs) -> Result<ToolOutput, ToolError>;
}

/// Registry for available tools.
///
/// Populated once at startup, then shared read-only behind an `Arc`. All side
/// effects live in handlers; the registry holds nothing but the schema table.
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a new tool
    pub fn register<T: Tool + 'static>(&mut self, tool: T) {
        let schema = tool.schema();
        self.tools.insert(schema.name, Arc::new(tool));
    }

    /// Register a shared tool
    pub fn register_shared(&mut self, tool: Arc<dyn Tool>) {
        let schema = tool.schema();
        self.tools.insert(schema.name, tool);
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// Resolve, validate, and execute a tool call intent.
    ///
    /// Lookup failure, argument faults, and handler faults all come back as
    /// `ToolError` values; nothing propagates as a raw fault.
    pub async fn dispatch(&self, intent: &ToolCallIntent) -> Result<ToolOutput, ToolError> {
        let tool = self
            .get(&intent.name)
            .ok_or_else(|| ToolError::UnknownTool(intent.name.clone()))?;

        let args = coerce_arguments(&tool.schema(), &intent.arguments)?;

        tracing::debug!(tool = %intent.name, "Executing tool");
        tool.execute(&args).await
    }

    /// Dispatch and wrap the outcome as an [`Observation`]. Never fails: the
    /// reasoning loop feeds whatever happened back to the oracle.
    pub async fn observe(&self, intent: &ToolCallIntent) -> Observation {
        let outcome = self.dispatch(intent).await;
        if let Err(ref err) = outcome {
            tracing::warn!(tool = %intent.name, error = %err, "Tool call failed");
        }
        Observation {
            tool_name: intent.name.clone(),
            outcome,
        }
    }

    /// Get all tool schemas, sorted by name
    pub fn schemas(&self) -> Vec<ToolSchema> {
        let mut schemas: Vec<_> = self.tools.values().map(|t| t.schema()).collect();
        schemas.sort_by(|a, b| a.name.cmp(&b.name));
        schemas
    }

    /// Get tool names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.tools.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Generate a prompt section describing available tools
    pub fn prompt_section(&self) -> String {
        let mut prompt = String::from("## Available Tools\n\n");

        for schema in self.schemas() {
            prompt.push_str(&format!("### {}\n", schema.name));
            prompt.push_str(&format!("{}\n", schema.description));

            if !schema.parameters.is_empty() {
                prompt.push_str("**Parameters:**\n");
                for param in &schema.parameters {
                    let required = if param.required { " (required)" } else { "" };
                    prompt.push_str(&format!(
                        "- `{}` ({}){}: {}\n",
                        param.name, param.kind, required, param.description
                    ));
                }
            }
            prompt.push('\n');
        }

        prompt
    }
}
