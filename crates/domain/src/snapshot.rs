//! Snapshot: the full `/api/data` payload.

use serde::{Deserialize, Deserializer, Serialize};

use crate::environment::Environment;
use crate::network::ControllerStatus;
use crate::plant::Plant;

/// Everything the controller reports in one poll.
///
/// `plants` and `env` may be missing or `null`; both fall back to empty.
/// A snapshot is applied as a unit, so any plant that fails to parse rejects
/// the whole payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default, deserialize_with = "null_as_default")]
    pub plants: Vec<Plant>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub env: Environment,
    #[serde(flatten)]
    pub status: ControllerStatus,
}

impl Snapshot {
    /// Parse a raw `/api/data` body.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error when the body is not JSON or a plant is
    /// missing a required key.
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
