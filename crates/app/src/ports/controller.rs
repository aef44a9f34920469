//! Controller port: the irrigation controller's HTTP API.

use std::future::Future;

use irrigo_domain::error::ControllerError;
use irrigo_domain::id::ChannelIndex;
use irrigo_domain::network::{SensorProbe, WifiNetwork};
use irrigo_domain::request::{
    AddPlantRequest, DeletePlantRequest, UpdateConfigRequest, WaterRequest, WifiCredentials,
};
use irrigo_domain::snapshot::Snapshot;

/// Client for the controller's `/api/*` endpoints.
///
/// Mutating calls resolve to `Ok(())` once the controller answered with a
/// 2xx status; the response body is ignored. Implementations never retry.
pub trait ControllerApi {
    /// `GET /api/data`
    fn fetch_snapshot(&self) -> impl Future<Output = Result<Snapshot, ControllerError>>;

    /// `POST /api/add-plant`
    fn add_plant(
        &self,
        request: &AddPlantRequest,
    ) -> impl Future<Output = Result<(), ControllerError>>;

    /// `POST /api/water`
    fn water(&self, request: WaterRequest) -> impl Future<Output = Result<(), ControllerError>>;

    /// `POST /api/delete-plant`
    fn delete_plant(
        &self,
        request: DeletePlantRequest,
    ) -> impl Future<Output = Result<(), ControllerError>>;

    /// `POST /api/update-config`
    fn update_config(
        &self,
        request: UpdateConfigRequest,
    ) -> impl Future<Output = Result<(), ControllerError>>;

    /// `POST /api/save-wifi`
    fn save_wifi(
        &self,
        credentials: &WifiCredentials,
    ) -> impl Future<Output = Result<(), ControllerError>>;

    /// `POST /api/reboot` (no body)
    fn reboot(&self) -> impl Future<Output = Result<(), ControllerError>>;

    /// `GET /api/scan`: an empty list while the controller is still scanning.
    fn scan_networks(&self) -> impl Future<Output = Result<Vec<WifiNetwork>, ControllerError>>;

    /// `GET /api/detect-sensor?index=<channel>`
    fn detect_sensor(
        &self,
        channel: ChannelIndex,
    ) -> impl Future<Output = Result<SensorProbe, ControllerError>>;
}
