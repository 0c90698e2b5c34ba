use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Trips of each calendar day, in the order they were logged.
pub type TripsByDate = BTreeMap<NaiveDate, Vec<TripRecord>>;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TripRecord {
    pub id: String,
    pub name: String,
    pub image_url: String,
    /// "HH:MM"
    pub time: String,
    pub distance_km: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_min: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_speed_kmh: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuel_liters: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Negative values are penalties. Absent in the data means zero.
    #[serde(default)]
    pub eco_coins: i64,
}

impl TripRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>, time: impl Into<String>, distance_km: f64, eco_coins: i64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            image_url: String::new(),
            time: time.into(),
            distance_km,
            duration_min: None,
            avg_speed_kmh: None,
            fuel_liters: None,
            cost_currency: None,
            route: None,
            notes: None,
            eco_coins,
        }
    }

    pub fn is_penalty(&self) -> bool {
        self.eco_coins < 0
    }

    /// Badge text, "+45" or "-15".
    pub fn eco_coins_label(&self) -> String {
        if self.is_penalty() {
            self.eco_coins.to_string()
        } else {
            format!("+{}", self.eco_coins)
        }
    }
}
