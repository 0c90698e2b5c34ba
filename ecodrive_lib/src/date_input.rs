use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";
const ISO_DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";
const ISO_DATE_LEN: usize = 10;

/// The day object a calendar widget hands to its press callback.
#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    #[serde(default)]
    pub date_string: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub month: Option<u32>,
    #[serde(default)]
    pub day: Option<u32>,
}

impl CalendarDay {
    pub fn normalize(&self) -> Option<NaiveDate> {
        if let Some(date_string) = &self.date_string {
            return parse_iso_date(date_string);
        }

        match (self.year, self.month, self.day) {
            (Some(year), Some(month), Some(day)) => NaiveDate::from_ymd_opt(year, month, day),
            _ => None,
        }
    }
}

/// Every shape a date selection may arrive in.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(from = "Value")]
pub enum DateInput {
    Iso(String),
    Day(CalendarDay),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Unrecognized,
}

impl DateInput {
    /// Canonical calendar day, or `None` when the input carries no usable date.
    pub fn normalize(&self) -> Option<NaiveDate> {
        match self {
            DateInput::Iso(value) => parse_iso_date(value),
            DateInput::Day(day) => day.normalize(),
            DateInput::Date(date) => Some(*date),
            DateInput::DateTime(date_time) => Some(date_time.date()),
            DateInput::Unrecognized => None,
        }
    }
}

/// Accepts "YYYY-MM-DD", and full ISO timestamps by their date part.
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    let date = parse_calendar_date(value.get(..ISO_DATE_LEN)?)?;

    if value.len() > ISO_DATE_LEN
        && DateTime::parse_from_rfc3339(value).is_err()
        && NaiveDateTime::parse_from_str(value, ISO_DATE_TIME_FORMAT).is_err()
    {
        return None;
    }

    Some(date)
}

/// Strict "YYYY-MM-DD": zero-padded, no sign, nothing after the day.
pub fn parse_calendar_date(value: &str) -> Option<NaiveDate> {
    let canonical = value.len() == ISO_DATE_LEN
        && value.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !canonical {
        return None;
    }

    NaiveDate::parse_from_str(value, ISO_DATE_FORMAT).ok()
}

impl From<Value> for DateInput {
    fn from(value: Value) -> Self {
        match value {
            Value::String(value) => DateInput::Iso(value),
            Value::Object(_) => serde_json::from_value::<CalendarDay>(value)
                .map(DateInput::Day)
                .unwrap_or(DateInput::Unrecognized),
            _ => DateInput::Unrecognized,
        }
    }
}

impl From<&str> for DateInput {
    fn from(value: &str) -> Self {
        DateInput::Iso(value.to_string())
    }
}

impl From<String> for DateInput {
    fn from(value: String) -> Self {
        DateInput::Iso(value)
    }
}

impl From<CalendarDay> for DateInput {
    fn from(value: CalendarDay) -> Self {
        DateInput::Day(value)
    }
}

impl From<NaiveDate> for DateInput {
    fn from(value: NaiveDate) -> Self {
        DateInput::Date(value)
    }
}

impl From<NaiveDateTime> for DateInput {
    fn from(value: NaiveDateTime) -> Self {
        DateInput::DateTime(value)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for DateInput {
    fn from(value: DateTime<Tz>) -> Self {
        DateInput::DateTime(value.naive_local())
    }
}
