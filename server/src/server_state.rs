use std::sync::Arc;

use ecodrive_core::{clock::Clock, config::SimulatorConfig, connection::ConnectionSimulator, selector::TripSelector, ConfigError, TripSource};
use tokio::sync::Mutex;

/// One history screen and one scanner, shared by all requests.
pub struct ServerState {
    pub selector: Mutex<TripSelector>,
    pub connection: ConnectionSimulator,
}

impl ServerState {
    pub fn new(selector: TripSelector, connection: ConnectionSimulator) -> Self {
        Self {
            selector: Mutex::new(selector),
            connection,
        }
    }

    pub fn start(source: Arc<dyn TripSource>, clock: Arc<dyn Clock>, config: SimulatorConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(
            TripSelector::new(source, clock),
            ConnectionSimulator::new(config)?,
        ))
    }
}
