//! # travel-concierge
//!
//! Travel planning concierge built on `agent-core`: a reasoning oracle
//! decides, turn by turn, whether to answer the traveler directly or invoke
//! one of the concierge tools; every successful booking lands in a durable
//! append-only ledger, and the trip summary is folded back out of that
//! ledger on demand.
//!
//! ```text
//!  goal ──▶ Agent loop ──▶ ToolRegistry ──┬─▶ reserve_flight ─┐
//!                ▲                        ├─▶ reserve_bus ────┤
//!                │                        ├─▶ reserve_hotel ──┼─▶ TripLedger
//!                │                        ├─▶ reserve_restaurant ┘    │
//!           observation                   ├─▶ travel_guide ─▶ KnowledgeOracle
//!                └────────────────────────┴─▶ trip_summary ◀──────────┘
//! ```
//!
//! The ledger is the sole source of truth for summaries: reservations are
//! durable before the tool reports success, corrections are new records, and
//! nothing is ever updated in place.

pub mod cost;
pub mod error;
pub mod guide;
pub mod ledger;
pub mod model;
pub mod summary;
pub mod svckit;

pub use cost::{CostPolicy, FixedCostPolicy, RandomCostPolicy};
pub use error::{ConciergeError, Result};
pub use guide::{CannedGuide, KnowledgeOracle};
pub use ledger::{StorageError, TripLedger};
pub use model::{
    Activity, PlaceActivities, ReservationRecord, TripSummary, TripType,
};
pub use summary::summarize;

/// Re-export tools for easy registration
pub mod tools {
    pub use crate::svckit::{
        HotelReservationTool, RestaurantReservationTool, TravelGuideTool, TripReservationTool,
        TripSummaryTool,
    };
}

use std::sync::Arc;

use agent_core::ToolRegistry;

/// System prompt for the travel concierge agent
pub const CONCIERGE_PROMPT: &str = r#"You are a travel concierge helping users plan trips.

## How to work

1. Use `travel_guide` for recommendations on places, transport, hotels, and restaurants.
2. Use the reservation tools (`reserve_flight`, `reserve_bus`, `reserve_hotel`, `reserve_restaurant`) to save the user's choices; request every required parameter before calling.
3. Use `trip_summary` to report what has been booked so far and the total budget.

Dates are ISO format (YYYY-MM-DD); restaurant reservations take a full date-time (YYYY-MM-DDTHH:MM:SS). Never invent a booking: only the reservation tools create one."#;

/// Build a registry with the full concierge tool surface:
/// the four reservation tools, the travel guide, and the trip summary.
pub fn concierge_registry(
    ledger: Arc<TripLedger>,
    costs: Arc<dyn CostPolicy>,
    guide: Arc<dyn KnowledgeOracle>,
) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(tools::TripReservationTool::flight(
        Arc::clone(&ledger),
        Arc::clone(&costs),
    ));
    registry.register(tools::TripReservationTool::bus(
        Arc::clone(&ledger),
        Arc::clone(&costs),
    ));
    registry.register(tools::HotelReservationTool::new(
        Arc::clone(&ledger),
        Arc::clone(&costs),
    ));
    registry.register(tools::RestaurantReservationTool::new(
        Arc::clone(&ledger),
        Arc::clone(&costs),
    ));
    registry.register(tools::TravelGuideTool::new(guide));
    registry.register(tools::TripSummaryTool::new(ledger));
    registry
}
