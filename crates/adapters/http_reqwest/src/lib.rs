//! # irrigo-adapter-http-reqwest
//!
//! [`ControllerApi`] implementation over `reqwest`, used by native front ends
//! that reach the controller through a configured base URL.
//!
//! ## Responsibilities
//! - Prefix the fixed endpoint paths with the controller base URL
//! - Serialize request bodies as JSON
//! - Treat every non-2xx status as a failure
//! - Map transport, status and decode failures into [`ControllerError`]
//!
//! ## Dependency rule
//! Depends on `irrigo-domain` and `irrigo-app` (for the port trait).
//! No retries, no timeouts beyond the client's own.

use irrigo_app::ports::ControllerApi;
use irrigo_domain::endpoint;
use irrigo_domain::error::ControllerError;
use irrigo_domain::id::ChannelIndex;
use irrigo_domain::network::{SensorProbe, WifiNetwork};
use irrigo_domain::request::{
    AddPlantRequest, DeletePlantRequest, UpdateConfigRequest, WaterRequest, WifiCredentials,
};
use irrigo_domain::snapshot::Snapshot;
use reqwest::{Client, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Controller client bound to one base URL (e.g. `http://192.168.4.1`).
#[derive(Debug, Clone)]
pub struct ReqwestController {
    client: Client,
    base_url: String,
}

impl ReqwestController {
    /// Create a client with reqwest's default settings.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Create a client reusing an existing `reqwest` connection pool.
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { client, base_url }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn get(&self, endpoint: &'static str, url: String) -> Result<Response, ControllerError> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| transport(endpoint, err))?;
        check_response(endpoint, resp)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        url: String,
    ) -> Result<T, ControllerError> {
        self.get(endpoint, url)
            .await?
            .json()
            .await
            .map_err(|err| ControllerError::Decode {
                endpoint,
                source: Box::new(err),
            })
    }

    async fn post_json<B: Serialize + ?Sized>(
        &self,
        endpoint: &'static str,
        body: &B,
    ) -> Result<(), ControllerError> {
        let resp = self
            .client
            .post(self.url(endpoint))
            .json(body)
            .send()
            .await
            .map_err(|err| transport(endpoint, err))?;
        check_response(endpoint, resp)?;
        tracing::debug!(endpoint, "controller accepted request");
        Ok(())
    }
}

fn transport(endpoint: &'static str, err: reqwest::Error) -> ControllerError {
    ControllerError::Transport {
        endpoint,
        source: Box::new(err),
    }
}

/// Reject non-2xx responses; the body of a failed response is not read.
fn check_response(endpoint: &'static str, resp: Response) -> Result<Response, ControllerError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    Err(ControllerError::Status {
        endpoint,
        status: status.as_u16(),
    })
}

impl ControllerApi for ReqwestController {
    async fn fetch_snapshot(&self) -> Result<Snapshot, ControllerError> {
        let body = self
            .get(endpoint::DATA, self.url(endpoint::DATA))
            .await?
            .text()
            .await
            .map_err(|err| transport(endpoint::DATA, err))?;
        Snapshot::from_json(&body).map_err(|err| ControllerError::Decode {
            endpoint: endpoint::DATA,
            source: Box::new(err),
        })
    }

    async fn add_plant(&self, request: &AddPlantRequest) -> Result<(), ControllerError> {
        self.post_json(endpoint::ADD_PLANT, request).await
    }

    async fn water(&self, request: WaterRequest) -> Result<(), ControllerError> {
        self.post_json(endpoint::WATER, &request).await
    }

    async fn delete_plant(&self, request: DeletePlantRequest) -> Result<(), ControllerError> {
        self.post_json(endpoint::DELETE_PLANT, &request).await
    }

    async fn update_config(&self, request: UpdateConfigRequest) -> Result<(), ControllerError> {
        self.post_json(endpoint::UPDATE_CONFIG, &request).await
    }

    async fn save_wifi(&self, credentials: &WifiCredentials) -> Result<(), ControllerError> {
        self.post_json(endpoint::SAVE_WIFI, credentials).await
    }

    async fn reboot(&self) -> Result<(), ControllerError> {
        let resp = self
            .client
            .post(self.url(endpoint::REBOOT))
            .send()
            .await
            .map_err(|err| transport(endpoint::REBOOT, err))?;
        check_response(endpoint::REBOOT, resp)?;
        Ok(())
    }

    async fn scan_networks(&self) -> Result<Vec<WifiNetwork>, ControllerError> {
        self.get_json(endpoint::SCAN, self.url(endpoint::SCAN))
            .await
    }

    async fn detect_sensor(&self, channel: ChannelIndex) -> Result<SensorProbe, ControllerError> {
        let url = format!("{}?index={channel}", self.url(endpoint::DETECT_SENSOR));
        self.get_json(endpoint::DETECT_SENSOR, url).await
    }
}
