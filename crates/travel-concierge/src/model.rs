//! Domain Models
//!
//! Reservation records as persisted in the trip ledger, and the derived trip
//! summary types. Budget totals use `rust_decimal` - never use f64 for money!

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Kind of point-to-point trip reservation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TripType {
    #[serde(rename = "FLIGHT")]
    Flight,
    #[serde(rename = "BUS")]
    Bus,
}

impl TripType {
    /// Human-readable label used in summaries
    pub fn label(self) -> &'static str {
        match self {
            TripType::Flight => "Flight",
            TripType::Bus => "Bus",
        }
    }
}

/// Default dish preference when the diner did not state one
pub(crate) fn default_dish() -> String {
    "Not specified".into()
}

/// A reservation, exactly as persisted in the trip ledger.
///
/// The `reservation_type` discriminant is stored alongside the fields so
/// records can be reconstructed later; unknown discriminants found in the
/// ledger are skipped on read, not errors. Records are immutable once
/// written and never deleted by this crate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reservation_type")]
pub enum ReservationRecord {
    /// A flight or bus leg between two places
    TripReservation {
        trip_type: TripType,
        date: NaiveDate,
        departure: String,
        destination: String,
        cost: u32,
    },

    /// A hotel stay; `checkout_date` is strictly after `checkin_date`
    HotelReservation {
        checkin_date: NaiveDate,
        checkout_date: NaiveDate,
        hotel_name: String,
        city: String,
        cost: u32,
    },

    /// A restaurant table
    RestaurantReservation {
        reservation_time: NaiveDateTime,
        restaurant: String,
        city: String,
        #[serde(default = "default_dish")]
        dish: String,
        cost: u32,
    },
}

impl ReservationRecord {
    /// Cost of this reservation in whole currency units
    pub fn cost(&self) -> u32 {
        match self {
            ReservationRecord::TripReservation { cost, .. }
            | ReservationRecord::HotelReservation { cost, .. }
            | ReservationRecord::RestaurantReservation { cost, .. } => *cost,
        }
    }

    /// Whether a persisted `reservation_type` tag is one this crate decodes
    pub fn is_known_tag(tag: &str) -> bool {
        matches!(
            tag,
            "TripReservation" | "HotelReservation" | "RestaurantReservation"
        )
    }
}

/// One line item of a trip summary
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    /// ISO date (or date-time, for restaurant reservations)
    pub date: String,

    /// Human-readable description
    pub description: String,

    /// Cost formatted as "$x.xx"
    pub cost: String,
}

/// Activities grouped under one place key, in ledger order
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceActivities {
    /// Grouping key: "A to B" for trips, the city for hotels/restaurants
    pub place: String,

    /// Line items, preserving ledger order within the place
    pub activities: Vec<Activity>,
}

/// Aggregate trip report, recomputed from the ledger on every request and
/// never persisted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TripSummary {
    /// Exact sum of all reservation costs
    pub total_budget: Decimal,

    /// Place groups in first-seen order
    pub activities_by_place: Vec<PlaceActivities>,

    /// One-paragraph rendering: total plus the distinct place keys
    pub summary: String,
}

impl TripSummary {
    /// Look up a place group by key
    pub fn place(&self, key: &str) -> Option<&PlaceActivities> {
        self.activities_by_place.iter().find(|g| g.place == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_trip_reservation_round_trips_with_discriminant() {
        let record = ReservationRecord::TripReservation {
            trip_type: TripType::Flight,
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            departure: "La Paz".into(),
            destination: "Santa Cruz".into(),
            cost: 350,
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["reservation_type"], "TripReservation");
        assert_eq!(value["trip_type"], "FLIGHT");
        assert_eq!(value["date"], "2024-05-01");

        let back: ReservationRecord = serde_json::from_value(value).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_restaurant_dish_defaults_when_absent() {
        let value = json!({
            "reservation_type": "RestaurantReservation",
            "reservation_time": "2024-05-02T19:30:00",
            "restaurant": "Gustu",
            "city": "La Paz",
            "cost": 45,
        });

        let record: ReservationRecord = serde_json::from_value(value).unwrap();
        let ReservationRecord::RestaurantReservation { dish, .. } = record else {
            panic!("wrong variant");
        };
        assert_eq!(dish, "Not specified");
    }

    #[test]
    fn test_known_tags() {
        assert!(ReservationRecord::is_known_tag("HotelReservation"));
        assert!(!ReservationRecord::is_known_tag("CruiseReservation"));
    }
}
