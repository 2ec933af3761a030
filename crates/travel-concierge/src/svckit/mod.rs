//! Service Kit - Agent Tools
//!
//! Domain-specific tools that implement `agent_core::Tool` for the travel
//! concierge: four reservation tools, the travel guide, and the trip summary.

mod reserve_hotel;
mod reserve_restaurant;
mod reserve_trip;
mod travel_guide;
mod trip_summary;

pub use reserve_hotel::HotelReservationTool;
pub use reserve_restaurant::RestaurantReservationTool;
pub use reserve_trip::TripReservationTool;
pub use travel_guide::TravelGuideTool;
pub use trip_summary::TripSummaryTool;
