//! HTTP API client wrapping `gloo-net` for calls to `/api/*`.
//!
//! Paths are relative, so requests go to the origin that served the page
//! (the controller itself).

use gloo_net::http::{Request, Response};
use irrigo_app::ports::ControllerApi;
use irrigo_domain::endpoint;
use irrigo_domain::error::ControllerError;
use irrigo_domain::id::ChannelIndex;
use irrigo_domain::network::{SensorProbe, WifiNetwork};
use irrigo_domain::request::{
    AddPlantRequest, DeletePlantRequest, UpdateConfigRequest, WaterRequest, WifiCredentials,
};
use irrigo_domain::snapshot::Snapshot;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Error returned by the request helpers, converted into
/// [`ControllerError`] at the port boundary.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Net(#[from] gloo_net::Error),
    #[error("HTTP {0}")]
    Status(u16),
    #[error(transparent)]
    Payload(#[from] serde_json::Error),
}

impl ApiError {
    /// Attach the endpoint the failed request targeted.
    #[must_use]
    pub fn at(self, endpoint: &'static str) -> ControllerError {
        match self {
            Self::Status(status) => ControllerError::Status { endpoint, status },
            Self::Net(gloo_net::Error::SerdeError(err)) | Self::Payload(err) => {
                ControllerError::Decode {
                    endpoint,
                    source: Box::new(err),
                }
            }
            Self::Net(err) => ControllerError::Transport {
                endpoint,
                source: Box::new(err),
            },
        }
    }
}

/// Check the HTTP response status and extract an error if non-2xx.
fn check_response(resp: Response) -> Result<Response, ApiError> {
    if resp.ok() {
        return Ok(resp);
    }
    Err(ApiError::Status(resp.status()))
}

async fn get_json<T: DeserializeOwned>(url: &str) -> Result<T, ApiError> {
    let resp = check_response(Request::get(url).send().await?)?;
    Ok(resp.json().await?)
}

async fn post_json<B: Serialize + ?Sized>(url: &str, body: &B) -> Result<(), ApiError> {
    check_response(Request::post(url).json(body)?.send().await?)?;
    Ok(())
}

async fn fetch_snapshot() -> Result<Snapshot, ApiError> {
    let resp = check_response(Request::get(endpoint::DATA).send().await?)?;
    let body = resp.text().await?;
    Ok(Snapshot::from_json(&body)?)
}

/// [`ControllerApi`] for the page's own origin.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooController;

impl ControllerApi for GlooController {
    async fn fetch_snapshot(&self) -> Result<Snapshot, ControllerError> {
        fetch_snapshot().await.map_err(|err| err.at(endpoint::DATA))
    }

    async fn add_plant(&self, request: &AddPlantRequest) -> Result<(), ControllerError> {
        post_json(endpoint::ADD_PLANT, request)
            .await
            .map_err(|err| err.at(endpoint::ADD_PLANT))
    }

    async fn water(&self, request: WaterRequest) -> Result<(), ControllerError> {
        post_json(endpoint::WATER, &request)
            .await
            .map_err(|err| err.at(endpoint::WATER))
    }

    async fn delete_plant(&self, request: DeletePlantRequest) -> Result<(), ControllerError> {
        post_json(endpoint::DELETE_PLANT, &request)
            .await
            .map_err(|err| err.at(endpoint::DELETE_PLANT))
    }

    async fn update_config(&self, request: UpdateConfigRequest) -> Result<(), ControllerError> {
        post_json(endpoint::UPDATE_CONFIG, &request)
            .await
            .map_err(|err| err.at(endpoint::UPDATE_CONFIG))
    }

    async fn save_wifi(&self, credentials: &WifiCredentials) -> Result<(), ControllerError> {
        post_json(endpoint::SAVE_WIFI, credentials)
            .await
            .map_err(|err| err.at(endpoint::SAVE_WIFI))
    }

    async fn reboot(&self) -> Result<(), ControllerError> {
        let resp = Request::post(endpoint::REBOOT)
            .send()
            .await
            .map_err(|err| ApiError::from(err).at(endpoint::REBOOT))?;
        check_response(resp).map_err(|err| err.at(endpoint::REBOOT))?;
        Ok(())
    }

    async fn scan_networks(&self) -> Result<Vec<WifiNetwork>, ControllerError> {
        get_json(endpoint::SCAN)
            .await
            .map_err(|err| err.at(endpoint::SCAN))
    }

    async fn detect_sensor(&self, channel: ChannelIndex) -> Result<SensorProbe, ControllerError> {
        let url = format!("{}?index={channel}", endpoint::DETECT_SENSOR);
        get_json(&url)
            .await
            .map_err(|err| err.at(endpoint::DETECT_SENSOR))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_map_status_to_controller_status_error() {
        let err = ApiError::Status(502).at(endpoint::WATER);
        assert!(matches!(
            err,
            ControllerError::Status {
                endpoint: endpoint::WATER,
                status: 502
            }
        ));
    }

    #[test]
    fn should_map_payload_errors_to_decode() {
        let parse = serde_json::from_str::<Snapshot>("<html>").unwrap_err();
        let err = ApiError::from(parse).at(endpoint::DATA);
        assert!(matches!(err, ControllerError::Decode { .. }));
        assert_eq!(err.endpoint(), endpoint::DATA);
    }

    #[test]
    fn should_map_network_errors_to_transport() {
        let err = ApiError::Net(gloo_net::Error::GlooError("aborted".to_string())).at(endpoint::SCAN);
        assert!(matches!(err, ControllerError::Transport { .. }));
    }
}
