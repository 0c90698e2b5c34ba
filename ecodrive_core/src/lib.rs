use std::fmt;

use const_format::concatcp;

pub mod clock;
pub mod config;
pub mod connection;
pub mod selector;
mod trip_source;

pub use trip_source::*;

pub const DATA_DIR: &str = "data/";
pub const TRIPS_PATH: &str = concatcp!(DATA_DIR, "trips.json");

#[derive(Debug)]
pub enum DataError {
    Io(String),
    Parse(String),
    InvalidDate(String),
    DuplicateTripId(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConnectionError {
    /// The simulated handshake did not find the scanner. The state is back to disconnected.
    ConnectionFailed(String),
    /// A handshake is already running. Nothing changed.
    AlreadyConnecting,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    InvalidFailureProbability(f64),
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataError::Io(message) => write!(f, "Failed to read trip data: {message}"),
            DataError::Parse(message) => write!(f, "Failed to parse trip data: {message}"),
            DataError::InvalidDate(date) => write!(f, "Trip data has an invalid date key: {date:?}"),
            DataError::DuplicateTripId(id) => write!(f, "Trip id {id:?} appears more than once"),
        }
    }
}

impl fmt::Display for ConnectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionError::ConnectionFailed(reason) => write!(f, "Connection failed: {reason}"),
            ConnectionError::AlreadyConnecting => write!(f, "A connection attempt is already in progress"),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidFailureProbability(value) => write!(f, "Failure probability must be within [0, 1], got {value}"),
        }
    }
}

impl std::error::Error for DataError {}
impl std::error::Error for ConnectionError {}
impl std::error::Error for ConfigError {}
