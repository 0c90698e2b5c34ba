use std::{collections::{BTreeMap, HashSet}, path::Path};

use chrono::NaiveDate;
use ecodrive_lib::{date_input::parse_calendar_date, trip::{TripRecord, TripsByDate}};

use crate::{DataError, TRIPS_PATH};

const MOCK_TRIPS_JSON: &str = include_str!("../data/trips.json");

/// Read-only access to logged trips, keyed by calendar day.
pub trait TripSource: Send + Sync {
    /// Trips of the day in logged order. Empty when nothing was logged.
    fn trips_on(&self, date: NaiveDate) -> Vec<TripRecord>;

    /// The trip with the given id and the day it belongs to.
    fn find_trip(&self, id: &str) -> Option<(NaiveDate, TripRecord)>;

    /// Days that have at least one entry, ascending.
    fn dates(&self) -> Vec<NaiveDate>;

    fn has_trips(&self, date: NaiveDate) -> bool {
        !self.trips_on(date).is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct StaticTripSource {
    trips: TripsByDate,
}

impl StaticTripSource {
    pub fn new(trips: TripsByDate) -> Result<Self, DataError> {
        let mut seen = HashSet::new();
        for trip in trips.values().flatten() {
            if !seen.insert(trip.id.as_str()) {
                return Err(DataError::DuplicateTripId(trip.id.clone()));
            }
        }

        Ok(Self { trips })
    }

    /// Parses a JSON object of "YYYY-MM-DD" keys to trip arrays.
    pub fn from_json(json: &str) -> Result<Self, DataError> {
        let raw: BTreeMap<String, Vec<TripRecord>> = serde_json::from_str(json)
            .map_err(|err| DataError::Parse(err.to_string()))?;

        let mut trips = TripsByDate::new();
        for (key, day_trips) in raw {
            let date = parse_calendar_date(&key).ok_or_else(|| DataError::InvalidDate(key.clone()))?;
            trips.entry(date).or_insert_with(Vec::new).extend(day_trips);
        }

        Self::new(trips)
    }

    /// The demonstration dataset compiled into the binary.
    pub fn mock() -> Result<Self, DataError> {
        Self::from_json(MOCK_TRIPS_JSON)
    }

    pub fn load(path: &Path) -> Result<Self, DataError> {
        let json = std::fs::read_to_string(path)
            .map_err(|err| DataError::Io(format!("{:?}: {}", path, err)))?;
        Self::from_json(&json)
    }

    /// `data/trips.json` under the project root, or the mock dataset when there is none.
    pub fn load_default() -> Result<Self, DataError> {
        let path = match project_root::get_project_root() {
            Ok(root) => root.join(TRIPS_PATH),
            Err(err) => {
                tracing::debug!("No project root ({}), using built-in trips", err);
                return Self::mock();
            }
        };

        if path.exists() {
            tracing::info!("Loading trips from {:?}", path);
            Self::load(&path)
        } else {
            tracing::debug!("{:?} not found, using built-in trips", path);
            Self::mock()
        }
    }

    pub fn trip_count(&self) -> usize {
        self.trips.values().map(Vec::len).sum()
    }
}

impl TripSource for StaticTripSource {
    fn trips_on(&self, date: NaiveDate) -> Vec<TripRecord> {
        self.trips.get(&date).cloned().unwrap_or_default()
    }

    fn find_trip(&self, id: &str) -> Option<(NaiveDate, TripRecord)> {
        self.trips.iter()
            .find_map(|(date, trips)| trips.iter()
                .find(|trip| trip.id == id)
                .map(|trip| (*date, trip.clone())))
    }

    fn dates(&self) -> Vec<NaiveDate> {
        self.trips.iter()
            .filter(|(_, trips)| !trips.is_empty())
            .map(|(date, _)| *date)
            .collect()
    }

    fn has_trips(&self, date: NaiveDate) -> bool {
        self.trips.get(&date).is_some_and(|trips| !trips.is_empty())
    }
}
