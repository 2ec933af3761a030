//! Restaurant Reservation Tool

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use agent_core::{
    tool::ParameterSchema, ParamKind, Tool, ToolArgs, ToolError, ToolOutput, ToolSchema,
};

use crate::cost::CostPolicy;
use crate::ledger::TripLedger;
use crate::model::ReservationRecord;

const RESTAURANT_COST_BAND: (u32, u32) = (20, 100);

/// Books a restaurant table and records it in the trip ledger
pub struct RestaurantReservationTool {
    ledger: Arc<TripLedger>,
    costs: Arc<dyn CostPolicy>,
}

impl RestaurantReservationTool {
    pub fn new(ledger: Arc<TripLedger>, costs: Arc<dyn CostPolicy>) -> Self {
        Self { ledger, costs }
    }
}

#[async_trait]
impl Tool for RestaurantReservationTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "reserve_restaurant".into(),
            description: "Reserve a table at a restaurant given the reservation date-time (ISO format), restaurant name, city, and an optional dish preference.".into(),
            parameters: vec![
                ParameterSchema::required(
                    "reservation_time",
                    ParamKind::DateTime,
                    "Reservation date-time in ISO format (YYYY-MM-DDTHH:MM:SS)",
                ),
                ParameterSchema::required("restaurant", ParamKind::String, "Name of the restaurant"),
                ParameterSchema::required("city", ParamKind::String, "City where the restaurant is located"),
                ParameterSchema::optional(
                    "dish",
                    ParamKind::String,
                    "Preferred dish",
                    Some(json!("Not specified")),
                ),
            ],
            has_side_effects: true,
        }
    }

    async fn execute(&self, args: &ToolArgs) -> Result<ToolOutput, ToolError> {
        let reservation_time = args.datetime("reservation_time")?;
        let restaurant = args.str("restaurant")?.to_string();
        let city = args.str("city")?.to_string();
        let dish = args.str("dish")?.to_string();

        let (min, max) = RESTAURANT_COST_BAND;
        let cost = self.costs.quote(min, max);

        let record = ReservationRecord::RestaurantReservation {
            reservation_time,
            restaurant: restaurant.clone(),
            city: city.clone(),
            dish,
            cost,
        };

        self.ledger.append(&record)?;

        tracing::info!(%restaurant, %city, %reservation_time, cost, "Restaurant reservation recorded");

        let confirmation = format!(
            "Table reserved at {} in {} on {} (cost: ${})",
            restaurant,
            city,
            reservation_time.format("%Y-%m-%dT%H:%M:%S"),
            cost
        );
        let data = serde_json::to_value(&record)
            .map_err(|err| ToolError::HandlerFailed(err.to_string()))?;
        Ok(ToolOutput::text(confirmation).with_data(data))
    }
}
