//! Request bodies sent to the controller.

use serde::Serialize;

use crate::error::ValidationError;
use crate::id::{ChannelIndex, PlantId};

/// Profile sent for newly added plants; the controller picks the sensor type.
pub const DEFAULT_PLANT_PROFILE: &str = "general";
/// Dryness threshold (%) sent for newly added plants.
pub const DEFAULT_THRESHOLD: i32 = 40;

/// `POST /api/water`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WaterRequest {
    pub index: ChannelIndex,
}

/// `POST /api/delete-plant`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeletePlantRequest {
    pub id: PlantId,
}

/// `POST /api/add-plant`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddPlantRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub profile: String,
    pub threshold: i32,
}

impl AddPlantRequest {
    /// Build a request with the default profile and threshold.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyName`] when `name` is empty.
    pub fn with_defaults(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        Ok(Self {
            name,
            profile: DEFAULT_PLANT_PROFILE.to_string(),
            threshold: DEFAULT_THRESHOLD,
        })
    }
}

/// `POST /api/update-config`: omitted fields are left unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UpdateConfigRequest {
    pub id: PlantId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
}

/// `POST /api/save-wifi`
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct WifiCredentials {
    pub ssid: String,
    pub password: String,
}

impl std::fmt::Debug for WifiCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WifiCredentials")
            .field("ssid", &self.ssid)
            .field("password", &"<redacted>")
            .finish()
    }
}
