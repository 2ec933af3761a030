//! Trip Summary
//!
//! Folds the reservation ledger into a per-place, cost-totaled report. The
//! fold is pure given a ledger snapshot and is recomputed fresh on every
//! request; correctness dominates throughput at this data scale.

use rust_decimal::Decimal;

use crate::model::{Activity, PlaceActivities, ReservationRecord, TripSummary, TripType};

/// Aggregate records (in ledger order) into a [`TripSummary`].
///
/// Grouping key: "{departure} to {destination}" for trips, the city for
/// hotels and restaurants. Place groups appear in first-seen order;
/// activities keep ledger order within their group. `total_budget` is the
/// exact sum of all costs, with no currency conversion.
pub fn summarize(records: &[ReservationRecord]) -> TripSummary {
    let mut total_budget = Decimal::ZERO;
    let mut groups: Vec<PlaceActivities> = Vec::new();

    for record in records {
        let (place, date, description) = describe(record);
        let cost = Decimal::from(record.cost());
        total_budget += cost;

        let activity = Activity {
            date,
            description,
            cost: format_cost(cost),
        };

        match groups.iter_mut().find(|group| group.place == place) {
            Some(group) => group.activities.push(activity),
            None => groups.push(PlaceActivities {
                place,
                activities: vec![activity],
            }),
        }
    }

    let summary = render_summary(total_budget, &groups);
    TripSummary {
        total_budget,
        activities_by_place: groups,
        summary,
    }
}

/// (place key, activity date, description) for one record
fn describe(record: &ReservationRecord) -> (String, String, String) {
    match record {
        ReservationRecord::TripReservation {
            trip_type,
            date,
            departure,
            destination,
            ..
        } => (
            format!("{} to {}", departure, destination),
            date.to_string(),
            format!("{} from {} to {}", trip_type.label(), departure, destination),
        ),
        ReservationRecord::HotelReservation {
            checkin_date,
            checkout_date,
            hotel_name,
            city,
            ..
        } => (
            city.clone(),
            checkin_date.to_string(),
            format!(
                "Hotel stay at {} from {} to {}",
                hotel_name, checkin_date, checkout_date
            ),
        ),
        ReservationRecord::RestaurantReservation {
            reservation_time,
            restaurant,
            city,
            ..
        } => {
            let when = reservation_time.format("%Y-%m-%dT%H:%M:%S").to_string();
            (
                city.clone(),
                when.clone(),
                format!("Restaurant reservation at {} at {}", restaurant, when),
            )
        }
    }
}

fn format_cost(cost: Decimal) -> String {
    format!("${:.2}", cost)
}

fn render_summary(total_budget: Decimal, groups: &[PlaceActivities]) -> String {
    if groups.is_empty() {
        return format!("Total budget: ${:.2}. The trip has no recorded activities yet.", total_budget);
    }

    let places: Vec<&str> = groups.iter().map(|group| group.place.as_str()).collect();
    format!(
        "Total budget: ${:.2}. The trip includes activities in the following places: {}.",
        total_budget,
        places.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use rust_decimal_macros::dec;

    fn fixture() -> Vec<ReservationRecord> {
        vec![
            ReservationRecord::TripReservation {
                trip_type: TripType::Flight,
                date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
                departure: "La Paz".into(),
                destination: "Santa Cruz".into(),
                cost: 350,
            },
            ReservationRecord::HotelReservation {
                checkin_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
                checkout_date: NaiveDate::from_ymd_opt(2024, 5, 3).unwrap(),
                hotel_name: "Hotel Cortez".into(),
                city: "Santa Cruz".into(),
                cost: 420,
            },
            ReservationRecord::RestaurantReservation {
                reservation_time: "2024-05-02T19:30:00".parse::<NaiveDateTime>().unwrap(),
                restaurant: "La Casona".into(),
                city: "Santa Cruz".into(),
                dish: "Majadito".into(),
                cost: 60,
            },
            ReservationRecord::TripReservation {
                trip_type: TripType::Bus,
                date: NaiveDate::from_ymd_opt(2024, 5, 3).unwrap(),
                departure: "Santa Cruz".into(),
                destination: "Sucre".into(),
                cost: 80,
            },
        ]
    }

    #[test]
    fn test_total_is_exact_sum() {
        let summary = summarize(&fixture());
        assert_eq!(summary.total_budget, dec!(910));
    }

    #[test]
    fn test_grouping_and_order() {
        let summary = summarize(&fixture());

        let places: Vec<_> = summary
            .activities_by_place
            .iter()
            .map(|group| group.place.as_str())
            .collect();
        assert_eq!(
            places,
            vec!["La Paz to Santa Cruz", "Santa Cruz", "Santa Cruz to Sucre"]
        );

        // Hotel then restaurant, ledger order within the city group.
        let santa_cruz = summary.place("Santa Cruz").unwrap();
        assert_eq!(santa_cruz.activities.len(), 2);
        assert!(santa_cruz.activities[0].description.starts_with("Hotel stay at Hotel Cortez"));
        assert!(santa_cruz.activities[1]
            .description
            .starts_with("Restaurant reservation at La Casona"));
        assert_eq!(santa_cruz.activities[0].cost, "$420.00");
    }

    #[test]
    fn test_bus_described_as_bus() {
        let summary = summarize(&fixture());
        let leg = summary.place("Santa Cruz to Sucre").unwrap();
        assert_eq!(leg.activities[0].description, "Bus from Santa Cruz to Sucre");
    }

    #[test]
    fn test_summary_text_lists_places_in_first_seen_order() {
        let summary = summarize(&fixture());
        assert_eq!(
            summary.summary,
            "Total budget: $910.00. The trip includes activities in the following places: \
             La Paz to Santa Cruz, Santa Cruz, Santa Cruz to Sucre."
        );
    }

    #[test]
    fn test_pure_fold() {
        let records = fixture();
        assert_eq!(summarize(&records), summarize(&records));
    }

    #[test]
    fn test_empty_ledger_is_an_empty_trip() {
        let summary = summarize(&[]);
        assert_eq!(summary.total_budget, Decimal::ZERO);
        assert!(summary.activities_by_place.is_empty());
        assert!(summary.summary.contains("$0.00"));
    }
}
