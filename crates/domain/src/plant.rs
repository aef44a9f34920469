//! Plant: one watered channel as reported by the controller.

use serde::{Deserialize, Deserializer, Serialize};

use crate::id::{ChannelIndex, PlantId};

/// Substring of `sensor_mode` that marks a radar probe (case-sensitive).
const RADAR_MARKER: &str = "Radar";

/// A plant bound to a hardware channel.
///
/// Only `id` and `originalIndex` are required on the wire; every other field
/// falls back to a neutral default so a sparse controller payload still
/// parses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plant {
    pub id: PlantId,
    #[serde(rename = "originalIndex")]
    pub channel: ChannelIndex,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub moisture: i32,
    #[serde(default)]
    pub threshold: i32,
    #[serde(default)]
    pub is_watering: bool,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub error: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensor_mode: Option<String>,
    #[serde(
        rename = "type",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub profile: Option<String>,
    /// Pump run time in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
}

impl Plant {
    /// Display status, evaluated top-down: watering, then error, then dry.
    #[must_use]
    pub fn status(&self) -> PlantStatus {
        if self.is_watering {
            PlantStatus::Pumping
        } else if self.error {
            PlantStatus::Error
        } else if self.moisture < self.threshold {
            PlantStatus::Dry
        } else {
            PlantStatus::Normal
        }
    }

    #[must_use]
    pub fn sensor_kind(&self) -> SensorKind {
        SensorKind::classify(self.sensor_mode.as_deref())
    }
}

/// Display status of a plant row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlantStatus {
    Pumping,
    Error,
    Dry,
    Normal,
}

impl PlantStatus {
    /// Tag label shown next to the name, `None` for a healthy plant.
    #[must_use]
    pub fn tag(self) -> Option<&'static str> {
        match self {
            Self::Pumping => Some("PUMPING"),
            Self::Error => Some("ERROR"),
            Self::Dry => Some("DRY"),
            Self::Normal => None,
        }
    }

    /// Style hook for the tag.
    #[must_use]
    pub fn css_class(self) -> Option<&'static str> {
        match self {
            Self::Pumping => Some("water"),
            Self::Error => Some("err"),
            Self::Dry => Some("dry"),
            Self::Normal => None,
        }
    }
}

/// Moisture probe family, derived from the controller's `sensor_mode` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorKind {
    Radar,
    Analog,
}

impl SensorKind {
    #[must_use]
    pub fn classify(sensor_mode: Option<&str>) -> Self {
        match sensor_mode {
            Some(mode) if mode.contains(RADAR_MARKER) => Self::Radar,
            _ => Self::Analog,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Radar => "RADAR",
            Self::Analog => "ANALOG",
        }
    }
}

/// Accept any JSON value as a flag using truthiness: `null`, `false`, `0`
/// and `""` are false, everything else is true.
pub(crate) fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    use serde_json::Value;

    Ok(match Value::deserialize(deserializer)? {
        Value::Null => false,
        Value::Bool(flag) => flag,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0 && !v.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    })
}
