//! Trip Reservation Tools
//!
//! `reserve_flight` and `reserve_bus` share one tool type: both book a
//! point-to-point leg and persist a `TripReservation`, differing only in
//! name and cost band.

use std::sync::Arc;

use async_trait::async_trait;

use agent_core::{
    tool::ParameterSchema, ParamKind, Tool, ToolArgs, ToolError, ToolOutput, ToolSchema,
};

use crate::cost::CostPolicy;
use crate::ledger::TripLedger;
use crate::model::{ReservationRecord, TripType};

/// Cost bands in whole currency units
const FLIGHT_COST_BAND: (u32, u32) = (200, 700);
const BUS_COST_BAND: (u32, u32) = (50, 200);

/// Books a flight or bus leg and records it in the trip ledger
pub struct TripReservationTool {
    kind: TripType,
    ledger: Arc<TripLedger>,
    costs: Arc<dyn CostPolicy>,
}

impl TripReservationTool {
    /// The `reserve_flight` tool
    pub fn flight(ledger: Arc<TripLedger>, costs: Arc<dyn CostPolicy>) -> Self {
        Self {
            kind: TripType::Flight,
            ledger,
            costs,
        }
    }

    /// The `reserve_bus` tool
    pub fn bus(ledger: Arc<TripLedger>, costs: Arc<dyn CostPolicy>) -> Self {
        Self {
            kind: TripType::Bus,
            ledger,
            costs,
        }
    }

    fn band(&self) -> (u32, u32) {
        match self.kind {
            TripType::Flight => FLIGHT_COST_BAND,
            TripType::Bus => BUS_COST_BAND,
        }
    }
}

#[async_trait]
impl Tool for TripReservationTool {
    fn schema(&self) -> ToolSchema {
        let (name, description) = match self.kind {
            TripType::Flight => (
                "reserve_flight",
                "Reserve a flight given the departure and destination locations and a date in ISO format (YYYY-MM-DD).",
            ),
            TripType::Bus => (
                "reserve_bus",
                "Reserve a bus ticket given the departure and destination locations and a date in ISO format (YYYY-MM-DD).",
            ),
        };

        ToolSchema {
            name: name.into(),
            description: description.into(),
            parameters: vec![
                ParameterSchema::required("date", ParamKind::Date, "Travel date in ISO format (YYYY-MM-DD)"),
                ParameterSchema::required(
                    "departure",
                    ParamKind::String,
                    "Departure location (city, airport code, etc.)",
                ),
                ParameterSchema::required("destination", ParamKind::String, "Destination location"),
            ],
            has_side_effects: true,
        }
    }

    async fn execute(&self, args: &ToolArgs) -> Result<ToolOutput, ToolError> {
        let date = args.date("date")?;
        let departure = args.str("departure")?.to_string();
        let destination = args.str("destination")?.to_string();

        let (min, max) = self.band();
        let cost = self.costs.quote(min, max);

        let record = ReservationRecord::TripReservation {
            trip_type: self.kind,
            date,
            departure: departure.clone(),
            destination: destination.clone(),
            cost,
        };

        // Reserved only once the append has been durably acknowledged.
        self.ledger.append(&record)?;

        tracing::info!(
            kind = self.kind.label(),
            %departure,
            %destination,
            %date,
            cost,
            "Trip reservation recorded"
        );

        let confirmation = match self.kind {
            TripType::Flight => format!(
                "Flight booked from {} to {} on {} (cost: ${})",
                departure, destination, date, cost
            ),
            TripType::Bus => format!(
                "Bus ticket booked from {} to {} on {} (cost: ${})",
                departure, destination, date, cost
            ),
        };

        let data = serde_json::to_value(&record)
            .map_err(|err| ToolError::HandlerFailed(err.to_string()))?;
        Ok(ToolOutput::text(confirmation).with_data(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::RandomCostPolicy;
    use agent_core::{ToolCallIntent, ToolRegistry};

    fn setup(dir: &tempfile::TempDir) -> (Arc<TripLedger>, ToolRegistry) {
        let ledger = Arc::new(TripLedger::new(dir.path().join("trip.jsonl")));
        let costs: Arc<dyn CostPolicy> = Arc::new(RandomCostPolicy::seeded(11));

        let mut registry = ToolRegistry::new();
        registry.register(TripReservationTool::flight(Arc::clone(&ledger), Arc::clone(&costs)));
        registry.register(TripReservationTool::bus(Arc::clone(&ledger), Arc::clone(&costs)));
        (ledger, registry)
    }

    fn intent(name: &str) -> ToolCallIntent {
        ToolCallIntent::new(name)
            .arg("date", "2024-05-01")
            .arg("departure", "La Paz")
            .arg("destination", "Santa Cruz")
    }

    #[tokio::test]
    async fn test_flight_cost_in_band_and_record_appended() {
        let dir = tempfile::tempdir().unwrap();
        let (ledger, registry) = setup(&dir);

        let output = registry.dispatch(&intent("reserve_flight")).await.unwrap();
        assert!(output
            .summary
            .starts_with("Flight booked from La Paz to Santa Cruz on 2024-05-01"));

        let records = ledger.read_all().unwrap();
        assert_eq!(records.len(), 1);
        let ReservationRecord::TripReservation { trip_type, cost, .. } = records[0].clone() else {
            panic!("wrong variant");
        };
        assert_eq!(trip_type, TripType::Flight);
        assert!((200..=700).contains(&cost));
    }

    #[tokio::test]
    async fn test_bus_cost_in_band() {
        let dir = tempfile::tempdir().unwrap();
        let (ledger, registry) = setup(&dir);

        registry.dispatch(&intent("reserve_bus")).await.unwrap();

        let records = ledger.read_all().unwrap();
        let ReservationRecord::TripReservation { trip_type, cost, .. } = records[0].clone() else {
            panic!("wrong variant");
        };
        assert_eq!(trip_type, TripType::Bus);
        assert!((50..=200).contains(&cost));
    }

    #[tokio::test]
    async fn test_missing_destination_rejected_before_any_write() {
        let dir = tempfile::tempdir().unwrap();
        let (ledger, registry) = setup(&dir);

        let err = registry
            .dispatch(
                &ToolCallIntent::new("reserve_flight")
                    .arg("date", "2024-05-01")
                    .arg("departure", "La Paz"),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ToolError::InvalidArguments { ref field, .. } if field == "destination"));
        assert!(ledger.read_all().unwrap().is_empty());
    }
}
