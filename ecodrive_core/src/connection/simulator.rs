use ecodrive_lib::connection_state::ConnectionState;
use rand::{rngs::StdRng, Rng, SeedableRng};
use tokio::sync::{watch, Mutex};

use crate::{config::SimulatorConfig, ConfigError, ConnectionError};

/// Mock OBD-II scanner pairing.
///
/// Connecting waits `handshake_delay`, then succeeds or fails at random.
/// Disconnecting is immediate. The state is published on a watch channel so a
/// renderer sees every transition, including the transient `Connecting`.
pub struct ConnectionSimulator<R = StdRng> {
    state: watch::Sender<ConnectionState>,
    rng: Mutex<R>,
    config: SimulatorConfig,
}

impl ConnectionSimulator<StdRng> {
    pub fn new(config: SimulatorConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    pub fn seeded(config: SimulatorConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng + Send> ConnectionSimulator<R> {
    pub fn with_rng(config: SimulatorConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let (state, _) = watch::channel(ConnectionState::Disconnected);

        Ok(Self {
            state,
            rng: Mutex::new(rng),
            config,
        })
    }

    /// Disconnects when connected (returns `false` right away), otherwise runs
    /// the handshake and returns `true` on success.
    ///
    /// Calling while a handshake is running changes nothing and returns
    /// `AlreadyConnecting`. A failed handshake leaves the state `Disconnected`.
    pub async fn toggle_connection(&self) -> Result<bool, ConnectionError> {
        let mut previous = ConnectionState::Disconnected;
        self.state.send_if_modified(|state| {
            previous = *state;
            match previous {
                ConnectionState::Connected => {
                    *state = ConnectionState::Disconnected;
                    true
                }
                ConnectionState::Disconnected => {
                    *state = ConnectionState::Connecting;
                    true
                }
                ConnectionState::Connecting => false,
            }
        });

        match previous {
            ConnectionState::Connected => {
                tracing::info!("Scanner disconnected");
                return Ok(false);
            }
            ConnectionState::Connecting => {
                tracing::debug!("Toggle ignored, handshake already running");
                return Err(ConnectionError::AlreadyConnecting);
            }
            ConnectionState::Disconnected => {}
        }

        tracing::info!("Connecting to scanner...");
        let _guard = ConnectingGuard { state: &self.state };

        tokio::time::sleep(self.config.handshake_delay).await;

        let draw: f64 = self.rng.lock().await.random();
        if draw < self.config.failure_probability {
            self.state.send_replace(ConnectionState::Disconnected);
            tracing::warn!("Scanner handshake failed");
            Err(ConnectionError::ConnectionFailed("OBD-II device not found".to_string()))
        } else {
            self.state.send_replace(ConnectionState::Connected);
            tracing::info!("Scanner connected");
            Ok(true)
        }
    }

    /// Drops an established connection. A running handshake is not cancelled.
    pub fn disconnect(&self) {
        let changed = self.state.send_if_modified(|state| {
            if *state == ConnectionState::Connected {
                *state = ConnectionState::Disconnected;
                true
            } else {
                false
            }
        });

        if changed {
            tracing::info!("Scanner disconnected");
        }
    }

    pub fn state(&self) -> ConnectionState {
        *self.state.borrow()
    }

    pub fn status_label(&self) -> &'static str {
        self.state().status_label()
    }

    pub fn is_device_ready(&self) -> bool {
        self.state().is_device_ready()
    }

    pub fn can_connect(&self) -> bool {
        self.state().can_connect()
    }

    pub fn subscribe(&self) -> watch::Receiver<ConnectionState> {
        self.state.subscribe()
    }
}

/// Resets a `Connecting` state left behind when the handshake future is dropped early.
struct ConnectingGuard<'a> {
    state: &'a watch::Sender<ConnectionState>,
}

impl Drop for ConnectingGuard<'_> {
    fn drop(&mut self) {
        self.state.send_if_modified(|state| {
            if *state == ConnectionState::Connecting {
                *state = ConnectionState::Disconnected;
                true
            } else {
                false
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::Duration};

    use tokio::time::Instant;

    use super::*;

    fn config(failure_probability: f64) -> SimulatorConfig {
        SimulatorConfig::new(Duration::from_millis(2000), failure_probability).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn connects_after_delay() {
        let simulator = ConnectionSimulator::seeded(config(0.0), 1).unwrap();
        let start = Instant::now();

        assert_eq!(simulator.toggle_connection().await, Ok(true));
        assert_eq!(simulator.state(), ConnectionState::Connected);
        assert!(start.elapsed() >= Duration::from_millis(2000));
        assert_eq!(simulator.status_label(), "Device Connected");
        assert!(simulator.is_device_ready());
    }

    #[tokio::test(start_paused = true)]
    async fn disconnect_is_immediate() {
        let simulator = ConnectionSimulator::seeded(config(0.0), 1).unwrap();
        simulator.toggle_connection().await.unwrap();

        let start = Instant::now();
        assert_eq!(simulator.toggle_connection().await, Ok(false));
        assert_eq!(start.elapsed(), Duration::ZERO);
        assert_eq!(simulator.state(), ConnectionState::Disconnected);
        assert_eq!(simulator.status_label(), "Connect Scanner");
    }

    #[tokio::test(start_paused = true)]
    async fn failure_returns_to_disconnected() {
        let simulator = ConnectionSimulator::seeded(config(1.0), 1).unwrap();

        let result = simulator.toggle_connection().await;
        assert!(matches!(result, Err(ConnectionError::ConnectionFailed(_))));
        assert_eq!(simulator.state(), ConnectionState::Disconnected);
        assert!(simulator.can_connect());
    }

    #[tokio::test(start_paused = true)]
    async fn second_toggle_while_connecting_is_ignored() {
        let simulator = Arc::new(ConnectionSimulator::seeded(config(0.0), 1).unwrap());
        let mut states = simulator.subscribe();

        let handshake = tokio::spawn({
            let simulator = simulator.clone();
            async move { simulator.toggle_connection().await }
        });

        states.changed().await.unwrap();
        assert_eq!(*states.borrow_and_update(), ConnectionState::Connecting);
        assert_eq!(simulator.status_label(), "Connecting…");
        assert!(!simulator.can_connect());

        assert_eq!(simulator.toggle_connection().await, Err(ConnectionError::AlreadyConnecting));
        simulator.disconnect();
        assert_eq!(simulator.state(), ConnectionState::Connecting);

        assert_eq!(handshake.await.unwrap(), Ok(true));
        assert_eq!(simulator.state(), ConnectionState::Connected);
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_handshake_leaves_no_connecting_state() {
        let simulator = ConnectionSimulator::seeded(config(0.0), 1).unwrap();

        let timed_out = tokio::time::timeout(Duration::from_millis(500), simulator.toggle_connection()).await;
        assert!(timed_out.is_err());
        assert_eq!(simulator.state(), ConnectionState::Disconnected);
    }

    #[tokio::test]
    async fn explicit_disconnect() {
        let simulator = ConnectionSimulator::seeded(SimulatorConfig::new(Duration::ZERO, 0.0).unwrap(), 7).unwrap();
        simulator.toggle_connection().await.unwrap();

        simulator.disconnect();
        assert_eq!(simulator.state(), ConnectionState::Disconnected);

        // No-op when already disconnected.
        simulator.disconnect();
        assert_eq!(simulator.state(), ConnectionState::Disconnected);
    }

    #[test]
    fn rejects_bad_config() {
        let config = SimulatorConfig {
            handshake_delay: Duration::ZERO,
            failure_probability: -0.5,
        };
        assert!(ConnectionSimulator::seeded(config, 0).is_err());
    }
}
