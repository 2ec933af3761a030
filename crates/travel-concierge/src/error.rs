//! Error Types for the Travel Concierge

use chrono::NaiveDate;
use thiserror::Error;

use agent_core::ToolError;

use crate::ledger::StorageError;

pub type Result<T> = std::result::Result<T, ConciergeError>;

#[derive(Debug, Error)]
pub enum ConciergeError {
    /// Hotel checkout must be strictly after checkin
    #[error("Invalid date order: checkout {checkout} is not after checkin {checkin}")]
    InvalidDateOrder {
        checkin: NaiveDate,
        checkout: NaiveDate,
    },

    /// The durable ledger failed
    #[error("Ledger error: {0}")]
    Storage(#[from] StorageError),

    /// The knowledge oracle failed or was unreachable
    #[error("Travel guide error: {0}")]
    Guide(String),
}

/// Domain faults surface to the agent loop as tool errors: bad input becomes
/// an argument fault (recoverable), everything else a handler failure.
impl From<ConciergeError> for ToolError {
    fn from(err: ConciergeError) -> Self {
        match err {
            ConciergeError::InvalidDateOrder { checkin, checkout } => ToolError::invalid(
                "checkout_date",
                format!("checkout {} must be after checkin {}", checkout, checkin),
            ),
            other => ToolError::HandlerFailed(other.to_string()),
        }
    }
}
