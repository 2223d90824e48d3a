//! Runtime configuration for [`KitchenSystem`](crate::lifecycle::KitchenSystem).

use crate::shelf::ShelfCapacities;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("channel_buffer must be at least 1")]
    ZeroChannelBuffer,

    #[error("reap_interval must be positive")]
    ZeroReapInterval,

    #[error("idle_report_after must be positive")]
    ZeroIdleWindow,

    #[error("courier delay range is empty: min {min:?} > max {max:?}")]
    InvalidCourierDelay { min: Duration, max: Duration },
}

/// Tunables for one kitchen run. Durations are written in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KitchenConfig {
    pub shelves: ShelfCapacities,
    #[serde(with = "seconds")]
    pub reap_interval: Duration,
    #[serde(with = "seconds")]
    pub courier_delay_min: Duration,
    #[serde(with = "seconds")]
    pub courier_delay_max: Duration,
    pub channel_buffer: usize,
    /// Fixes eviction and courier randomness when set.
    pub seed: Option<u64>,
    #[serde(with = "seconds")]
    pub idle_report_after: Duration,
}

impl Default for KitchenConfig {
    fn default() -> Self {
        Self {
            shelves: ShelfCapacities::default(),
            reap_interval: Duration::from_secs(1),
            courier_delay_min: Duration::from_secs(2),
            courier_delay_max: Duration::from_secs(6),
            channel_buffer: 64,
            seed: None,
            idle_report_after: Duration::from_secs(10),
        }
    }
}

impl KitchenConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.channel_buffer == 0 {
            return Err(ConfigError::ZeroChannelBuffer);
        }
        if self.reap_interval.is_zero() {
            return Err(ConfigError::ZeroReapInterval);
        }
        if self.idle_report_after.is_zero() {
            return Err(ConfigError::ZeroIdleWindow);
        }
        if self.courier_delay_min > self.courier_delay_max {
            return Err(ConfigError::InvalidCourierDelay {
                min: self.courier_delay_min,
                max: self.courier_delay_max,
            });
        }
        Ok(())
    }

    pub fn courier_delay(&self) -> RangeInclusive<Duration> {
        self.courier_delay_min..=self.courier_delay_max
    }
}

mod seconds {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(value.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(D::Error::custom)
    }
}
