//! Ambient neural-sync readout.
//!
//! A background task drifts the global sync percentage on an interval
//! and publishes each reading on a watch channel. Handlers only ever
//! borrow the latest reading; nothing in request handling depends on
//! the tick cadence.

use std::time::Duration;

use rand::Rng;
use serde::Serialize;
use tokio::sync::watch;
use tracing::debug;

/// Lowest sync percentage the monitor will report.
const SYNC_FLOOR: f64 = 75.0;
/// Highest sync percentage the monitor will report.
const SYNC_CEIL: f64 = 99.9;
/// Largest per-tick drift in either direction.
const MAX_DRIFT: f64 = 1.0;
/// How often the reading is refreshed.
const TICK: Duration = Duration::from_secs(5);

/// One reading of the ambient sync state.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SyncReading {
    /// Global consciousness sync percentage.
    pub sync_level: f64,
    /// Live synaptic connection count.
    pub synaptic_connections: u32,
}

impl SyncReading {
    fn sampled() -> Self {
        let mut rng = rand::rng();
        Self {
            sync_level: round1(rng.random_range(SYNC_FLOOR..=SYNC_CEIL)),
            synaptic_connections: rng.random_range(800..=1200),
        }
    }

    fn drifted(self) -> Self {
        let mut rng = rand::rng();
        let next = self.sync_level + rng.random_range(-MAX_DRIFT..=MAX_DRIFT);
        Self {
            sync_level: round1(next.clamp(SYNC_FLOOR, SYNC_CEIL)),
            synaptic_connections: rng.random_range(800..=1200),
        }
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Handle for reading the latest sync state.
#[derive(Debug, Clone)]
pub struct SyncMonitor {
    rx: watch::Receiver<SyncReading>,
}

impl SyncMonitor {
    /// Start the background drift task and return a read handle.
    ///
    /// The task runs for the lifetime of the process; dropping every
    /// monitor handle stops it on the next tick.
    #[must_use]
    pub fn start() -> Self {
        let (tx, rx) = watch::channel(SyncReading::sampled());

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(TICK);
            interval.tick().await;
            loop {
                interval.tick().await;
                let next = tx.borrow().drifted();
                debug!(sync_level = next.sync_level, "neural sync drift");
                if tx.send(next).is_err() {
                    break;
                }
            }
        });

        Self { rx }
    }

    /// The most recent reading.
    #[must_use]
    pub fn reading(&self) -> SyncReading {
        *self.rx.borrow()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sampled_reading_is_in_range() {
        for _ in 0..100 {
            let reading = SyncReading::sampled();
            assert!((SYNC_FLOOR..=SYNC_CEIL).contains(&reading.sync_level));
            assert!((800..=1200).contains(&reading.synaptic_connections));
        }
    }

    #[test]
    fn drift_stays_clamped() {
        let mut reading = SyncReading {
            sync_level: SYNC_CEIL,
            synaptic_connections: 1000,
        };
        for _ in 0..100 {
            reading = reading.drifted();
            assert!((SYNC_FLOOR..=SYNC_CEIL).contains(&reading.sync_level));
        }
    }

    #[tokio::test]
    async fn monitor_serves_a_reading() {
        let monitor = SyncMonitor::start();
        let reading = monitor.reading();
        assert!(reading.sync_level >= SYNC_FLOOR);
    }
}
