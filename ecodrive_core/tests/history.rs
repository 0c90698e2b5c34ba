//! End-to-end checks of the history browser against the built-in and custom datasets.

use std::sync::Arc;

use chrono::{Datelike, NaiveDate, Weekday};
use ecodrive_core::{clock::FixedClock, selector::TripSelector, StaticTripSource, TripSource};
use ecodrive_lib::view_mode::ViewMode;
use serde_json::json;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn wednesday_opens_on_monday_to_sunday() {
    let source = StaticTripSource::mock().unwrap();
    let selector = TripSelector::new(Arc::new(source), Arc::new(FixedClock(date(2025, 9, 17))));

    let days = selector.current_week().days();
    assert_eq!(days, [15, 16, 17, 18, 19, 20, 21].map(|d| date(2025, 9, d)));
}

#[test]
fn repeated_times_share_one_header() {
    let source = StaticTripSource::from_json(r#"{
        "2025-09-20": [
            {"id":"1","name":"Home → Work","imageUrl":"","time":"08:30","distanceKm":12.5,"ecoCoins":45},
            {"id":"2","name":"Work → Gym","imageUrl":"","time":"08:30","distanceKm":3.2,"ecoCoins":28},
            {"id":"3","name":"Gym → Home","imageUrl":"","time":"20:15","distanceKm":15.1,"ecoCoins":52}
        ]
    }"#).unwrap();
    let mut selector = TripSelector::new(Arc::new(source), Arc::new(FixedClock(date(2025, 9, 17))));

    selector.select_date("2025-09-20");

    assert_eq!(selector.time_headers(), [true, false, true]);
    let groups = selector.time_groups();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].trips.iter().map(|trip| trip.id.as_str()).collect::<Vec<_>>(), ["1", "2"]);
}

#[test]
fn every_unlogged_day_in_a_year_is_empty() {
    let source = Arc::new(StaticTripSource::mock().unwrap());
    let logged = source.dates();
    let mut selector = TripSelector::new(source.clone(), Arc::new(FixedClock(date(2025, 9, 17))));

    let mut day = date(2025, 1, 1);
    while day.year() == 2025 {
        assert_eq!(selector.select_date(day), Some(day));
        assert_eq!(selector.trips().is_empty(), !logged.contains(&day));
        day = day.succ_opt().unwrap();
    }
}

#[test]
fn monthly_pick_then_week_browsing() {
    let source = StaticTripSource::mock().unwrap();
    let mut selector = TripSelector::new(Arc::new(source), Arc::new(FixedClock(date(2025, 9, 21))));
    let opened = selector.current_week();
    assert_eq!(opened.monday(), date(2025, 9, 15));

    selector.set_view_mode(ViewMode::Monthly);
    selector.select_date(json!({ "year": 2025, "month": 9, "day": 10, "dateString": "2025-09-10" }));
    assert_eq!(selector.trips().len(), 3);

    for _ in 0..5 {
        selector.go_to_next_week();
        assert_eq!(selector.current_week().monday().weekday(), Weekday::Mon);
    }
    for _ in 0..5 {
        selector.go_to_previous_week();
    }

    assert_eq!(selector.current_week(), opened);
    assert_eq!(selector.selected_date(), date(2025, 9, 10));
    assert_eq!(selector.view_mode(), ViewMode::Monthly);
}
