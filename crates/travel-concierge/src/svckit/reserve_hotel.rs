//! Hotel Reservation Tool

use std::sync::Arc;

use async_trait::async_trait;

use agent_core::{
    tool::ParameterSchema, ParamKind, Tool, ToolArgs, ToolError, ToolOutput, ToolSchema,
};

use crate::cost::CostPolicy;
use crate::error::ConciergeError;
use crate::ledger::TripLedger;
use crate::model::ReservationRecord;

const HOTEL_COST_BAND: (u32, u32) = (100, 1000);

/// Books a hotel stay and records it in the trip ledger.
///
/// The checkin/checkout order is checked before anything is quoted or
/// written: an out-of-order stay never reaches the ledger.
pub struct HotelReservationTool {
    ledger: Arc<TripLedger>,
    costs: Arc<dyn CostPolicy>,
}

impl HotelReservationTool {
    pub fn new(ledger: Arc<TripLedger>, costs: Arc<dyn CostPolicy>) -> Self {
        Self { ledger, costs }
    }
}

#[async_trait]
impl Tool for HotelReservationTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "reserve_hotel".into(),
            description: "Reserve a hotel room given the check-in and check-out dates (ISO format), hotel name, and city.".into(),
            parameters: vec![
                ParameterSchema::required("checkin_date", ParamKind::Date, "Check-in date in ISO format (YYYY-MM-DD)"),
                ParameterSchema::required("checkout_date", ParamKind::Date, "Check-out date in ISO format (YYYY-MM-DD); must be after check-in"),
                ParameterSchema::required("hotel_name", ParamKind::String, "Name of the hotel"),
                ParameterSchema::required("city", ParamKind::String, "City where the hotel is located"),
            ],
            has_side_effects: true,
        }
    }

    async fn execute(&self, args: &ToolArgs) -> Result<ToolOutput, ToolError> {
        let checkin_date = args.date("checkin_date")?;
        let checkout_date = args.date("checkout_date")?;
        let hotel_name = args.str("hotel_name")?.to_string();
        let city = args.str("city")?.to_string();

        if checkout_date <= checkin_date {
            return Err(ConciergeError::InvalidDateOrder {
                checkin: checkin_date,
                checkout: checkout_date,
            }
            .into());
        }

        let (min, max) = HOTEL_COST_BAND;
        let cost = self.costs.quote(min, max);

        let record = ReservationRecord::HotelReservation {
            checkin_date,
            checkout_date,
            hotel_name: hotel_name.clone(),
            city: city.clone(),
            cost,
        };

        self.ledger.append(&record)?;

        tracing::info!(%hotel_name, %city, %checkin_date, %checkout_date, cost, "Hotel reservation recorded");

        let confirmation = format!(
            "Hotel room booked at {} in {} from {} to {} (cost: ${})",
            hotel_name, city, checkin_date, checkout_date, cost
        );
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
        let mut registry = ToolRegistry::new();
        registry.register(HotelReservationTool::new(
            Arc::clone(&ledger),
            Arc::new(RandomCostPolicy::seeded(5)),
        ));
        (ledger, registry)
    }

    fn intent(checkin: &str, checkout: &str) -> ToolCallIntent {
        ToolCallIntent::new("reserve_hotel")
            .arg("checkin_date", checkin)
            .arg("checkout_date", checkout)
            .arg("hotel_name", "Hotel Cortez")
            .arg("city", "Santa Cruz")
    }

    #[tokio::test]
    async fn test_books_and_appends_within_band() {
        let dir = tempfile::tempdir().unwrap();
        let (ledger, registry) = setup(&dir);

        let output = registry
            .dispatch(&intent("2024-05-01", "2024-05-03"))
            .await
            .unwrap();
        assert!(output.summary.starts_with("Hotel room booked at Hotel Cortez in Santa Cruz"));

        let records = ledger.read_all().unwrap();
        assert_eq!(records.len(), 1);
        let ReservationRecord::HotelReservation { cost, .. } = records[0].clone() else {
            panic!("wrong variant");
        };
        assert!((100..=1000).contains(&cost));
    }

    #[tokio::test]
    async fn test_checkout_not_after_checkin_never_appends() {
        let dir = tempfile::tempdir().unwrap();
        let (ledger, registry) = setup(&dir);

        for (checkin, checkout) in [("2024-05-03", "2024-05-01"), ("2024-05-01", "2024-05-01")] {
            let err = registry.dispatch(&intent(checkin, checkout)).await.unwrap_err();
            assert!(matches!(
                err,
                ToolError::InvalidArguments { ref field, .. } if field == "checkout_date"
            ));
        }

        assert!(ledger.read_all().unwrap().is_empty());
    }
}
