//! Controller link and probe information.

use serde::{Deserialize, Serialize};

use crate::plant::deserialize_flag;

/// Connectivity and housekeeping fields reported alongside each snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerStatus {
    /// `true` in station mode, `false` while the access point is up.
    pub wifi_connected: bool,
    /// Joined network, or the access-point SSID when not connected.
    pub ssid: Option<String>,
    pub ip: Option<String>,
    /// Seconds since the controller booted.
    pub uptime: Option<u64>,
    /// Buzzer do-not-disturb window active.
    pub dnd: bool,
}

/// One network found by a Wi-Fi scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WifiNetwork {
    pub ssid: String,
    /// The firmware reports this as `0`/`1`, so any truthy value is accepted.
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub secure: bool,
}

/// Result of forcing sensor auto-detection on a channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorProbe {
    /// Raw ADC or radar energy value.
    pub raw: i64,
    /// Detected mode, e.g. `"Radar"` or `"Analog"`.
    pub mode: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn should_parse_scan_result_with_numeric_secure_flag() {
        let networks: Vec<WifiNetwork> = serde_json::from_value(json!([
            {"ssid": "greenhouse", "secure": 1},
            {"ssid": "guest", "secure": 0},
        ]))
        .unwrap();
        assert!(networks[0].secure);
        assert!(!networks[1].secure);
    }

    #[test]
    fn should_default_missing_status_fields() {
        let status: ControllerStatus = serde_json::from_value(json!({})).unwrap();
        assert_eq!(status, ControllerStatus::default());
    }

    #[test]
    fn should_parse_probe() {
        let probe: SensorProbe =
            serde_json::from_value(json!({"raw": 2810, "mode": "Analog"})).unwrap();
        assert_eq!(probe.raw, 2810);
        assert_eq!(probe.mode, "Analog");
    }
}
