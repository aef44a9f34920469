//! Environment: climate readings from the controller's air sensor.

use serde::{Deserialize, Serialize};

/// Air readings at the time of the last poll.
///
/// A reading is `None` when the controller reports it missing or `null`
/// (the firmware serializes a failed sensor read as `null`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Environment {
    /// Vapour pressure deficit in kPa.
    pub vpd: Option<f64>,
    /// Temperature in °C.
    pub temp: Option<f64>,
    /// Relative humidity in %.
    pub hum: Option<f64>,
}

impl Environment {
    /// Whether any reading is present.
    #[must_use]
    pub fn has_readings(&self) -> bool {
        self.vpd.is_some() || self.temp.is_some() || self.hum.is_some()
    }
}
