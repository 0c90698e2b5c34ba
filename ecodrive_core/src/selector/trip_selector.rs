use std::sync::Arc;

use chrono::NaiveDate;
use ecodrive_lib::{date_input::DateInput, trip::TripRecord, view_mode::ViewMode};
use serde::Serialize;

use crate::{clock::Clock, TripSource};

use super::{grouping::{self, TimeGroup}, week::{Week, DAYS_IN_WEEK}};

/// One cell of the weekly strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayCell {
    pub date: NaiveDate,
    pub is_today: bool,
    pub is_selected: bool,
    pub has_trips: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripDetails {
    pub date: NaiveDate,
    pub trip: TripRecord,
}

/// Date and view state of the trip history, and the trips of the selected day.
///
/// The week window and the selected date move independently: browsing weeks
/// keeps the selection, and picking a day from the month grid does not move
/// the window.
pub struct TripSelector {
    source: Arc<dyn TripSource>,
    clock: Arc<dyn Clock>,
    selected_date: NaiveDate,
    view_mode: ViewMode,
    current_week: Week,
    trips: Vec<TripRecord>,
}

impl TripSelector {
    pub fn new(source: Arc<dyn TripSource>, clock: Arc<dyn Clock>) -> Self {
        let today = clock.today();
        let trips = source.trips_on(today);

        Self {
            source,
            clock,
            selected_date: today,
            view_mode: ViewMode::default(),
            current_week: Week::containing(today),
            trips,
        }
    }

    /// Selects the day and reloads its trips. Input without a usable date is
    /// ignored and returns `None`.
    pub fn select_date(&mut self, input: impl Into<DateInput>) -> Option<NaiveDate> {
        let input = input.into();
        let Some(date) = input.normalize() else {
            tracing::warn!("Ignoring invalid date input: {:?}", input);
            return None;
        };

        self.selected_date = date;
        self.trips = self.source.trips_on(date);
        tracing::debug!("Selected {} with {} trips", date, self.trips.len());

        Some(date)
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }

    pub fn go_to_previous_week(&mut self) {
        self.current_week = self.current_week.previous();
    }

    pub fn go_to_next_week(&mut self) {
        self.current_week = self.current_week.next();
    }

    /// Back to the state the history opens with: this week, today selected.
    pub fn go_to_today(&mut self) {
        let today = self.clock.today();
        self.current_week = Week::containing(today);
        self.select_date(today);
    }

    pub fn is_today(&self, date: impl Into<DateInput>) -> bool {
        date.into().normalize() == Some(self.clock.today())
    }

    pub fn is_selected(&self, date: impl Into<DateInput>) -> bool {
        date.into().normalize() == Some(self.selected_date)
    }

    pub fn has_trips(&self, date: impl Into<DateInput>) -> bool {
        date.into()
            .normalize()
            .is_some_and(|date| self.source.has_trips(date))
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.selected_date
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn current_week(&self) -> Week {
        self.current_week
    }

    pub fn trips(&self) -> &[TripRecord] {
        &self.trips
    }

    pub fn week_days(&self) -> [DayCell; DAYS_IN_WEEK] {
        let today = self.clock.today();
        self.current_week.days().map(|date| DayCell {
            date,
            is_today: date == today,
            is_selected: date == self.selected_date,
            has_trips: self.source.has_trips(date),
        })
    }

    pub fn time_headers(&self) -> Vec<bool> {
        grouping::time_headers(&self.trips)
    }

    pub fn time_groups(&self) -> Vec<TimeGroup<'_>> {
        grouping::time_groups(&self.trips)
    }

    pub fn eco_coins_total(&self) -> i64 {
        self.trips.iter().map(|trip| trip.eco_coins).sum()
    }

    pub fn trip_details(&self, trip_id: &str) -> Option<TripDetails> {
        self.source
            .find_trip(trip_id)
            .map(|(date, trip)| TripDetails { date, trip })
    }
}
