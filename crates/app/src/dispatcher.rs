//! Action dispatcher: turns user gestures into controller requests.
//!
//! Every operation is one request, sent at most once. Nothing is updated
//! optimistically: the effect shows up when the poller next observes it.
//! Failures are returned to the caller and never retried.

use irrigo_domain::error::{ClientError, ControllerError};
use irrigo_domain::id::{ChannelIndex, PlantId};
use irrigo_domain::network::{SensorProbe, WifiNetwork};
use irrigo_domain::request::{
    AddPlantRequest, DeletePlantRequest, UpdateConfigRequest, WaterRequest, WifiCredentials,
};

use crate::poller::RefreshHandle;
use crate::ports::{ControllerApi, UserInteraction};
use crate::view::Action;

pub const DELETE_PROMPT: &str = "Confirm Delete?";
pub const REBOOT_PROMPT: &str = "Reboot?";
pub const REBOOT_NOTICE: &str = "Rebooting...";

/// Whether a request went out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatched {
    Sent,
    /// The user declined the confirmation; nothing was sent.
    Declined,
}

/// Sends dashboard commands to the controller.
pub struct ActionDispatcher<C, U> {
    controller: C,
    ui: U,
    refresh: RefreshHandle,
}

impl<C, U> ActionDispatcher<C, U>
where
    C: ControllerApi,
    U: UserInteraction,
{
    pub fn new(controller: C, ui: U, refresh: RefreshHandle) -> Self {
        Self {
            controller,
            ui,
            refresh,
        }
    }

    #[must_use]
    pub fn ui(&self) -> &U {
        &self.ui
    }

    /// Run the command bound to a plant row button.
    ///
    /// # Errors
    ///
    /// See [`water`](Self::water) and [`delete`](Self::delete).
    pub async fn dispatch(&self, action: Action) -> Result<Dispatched, ClientError> {
        match action {
            Action::Water(channel) => self.water(channel).await,
            Action::Delete(id) => self.delete(id).await,
        }
    }

    /// Run the pump on `channel`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Controller`] when the request fails.
    #[tracing::instrument(skip(self))]
    pub async fn water(&self, channel: ChannelIndex) -> Result<Dispatched, ClientError> {
        self.controller
            .water(WaterRequest { index: channel })
            .await?;
        tracing::debug!("water request sent");
        Ok(Dispatched::Sent)
    }

    /// Delete the plant `id` once the user confirms.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Controller`] when the request fails.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: PlantId) -> Result<Dispatched, ClientError> {
        if !self.ui.confirm(DELETE_PROMPT).await {
            tracing::debug!("delete declined");
            return Ok(Dispatched::Declined);
        }
        self.controller
            .delete_plant(DeletePlantRequest { id })
            .await?;
        tracing::debug!("delete request sent");
        Ok(Dispatched::Sent)
    }

    /// Register a new plant with the default profile and threshold, then
    /// close the modal and force a refresh.
    ///
    /// The controller assigns the channel and detects the sensor type. A
    /// rejection from the controller (e.g. every channel taken) still closes
    /// the modal and refreshes; only a transport failure leaves it open.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] for an empty name (nothing is sent
    /// and the modal stays open), or [`ClientError::Controller`] when the
    /// request fails.
    #[tracing::instrument(skip(self))]
    pub async fn add_plant(&self, name: &str) -> Result<Dispatched, ClientError> {
        let request = AddPlantRequest::with_defaults(name)?;
        let result = self.controller.add_plant(&request).await;
        if answered(&result) {
            self.ui.close_modals();
            self.refresh.request();
            tracing::debug!("add-plant answered, refresh requested");
        }
        result?;
        Ok(Dispatched::Sent)
    }

    /// Change a plant's threshold and/or pump duration, then force a refresh
    /// unless the controller was unreachable.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Controller`] when the request fails.
    #[tracing::instrument(skip(self))]
    pub async fn update_config(
        &self,
        id: PlantId,
        threshold: Option<i32>,
        duration: Option<u32>,
    ) -> Result<Dispatched, ClientError> {
        let result = self
            .controller
            .update_config(UpdateConfigRequest {
                id,
                threshold,
                duration,
            })
            .await;
        if answered(&result) {
            self.refresh.request();
        }
        result?;
        Ok(Dispatched::Sent)
    }

    /// Store new Wi-Fi credentials on the controller.
    ///
    /// The controller restarts after saving, so the user is told a reboot is
    /// underway whatever the response.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Controller`] when the request fails.
    #[tracing::instrument(skip(self, credentials), fields(ssid = %credentials.ssid))]
    pub async fn save_wifi(&self, credentials: WifiCredentials) -> Result<Dispatched, ClientError> {
        let result = self.controller.save_wifi(&credentials).await;
        self.ui.notify(REBOOT_NOTICE);
        result?;
        Ok(Dispatched::Sent)
    }

    /// Restart the controller once the user confirms.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Controller`] when the request fails.
    #[tracing::instrument(skip(self))]
    pub async fn reboot(&self) -> Result<Dispatched, ClientError> {
        if !self.ui.confirm(REBOOT_PROMPT).await {
            return Ok(Dispatched::Declined);
        }
        self.controller.reboot().await?;
        Ok(Dispatched::Sent)
    }

    /// List nearby networks. Empty while the controller's scan is running.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Controller`] when the request fails.
    pub async fn scan_networks(&self) -> Result<Vec<WifiNetwork>, ClientError> {
        Ok(self.controller.scan_networks().await?)
    }

    /// Force sensor auto-detection on `channel`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Controller`] when the request fails.
    #[tracing::instrument(skip(self))]
    pub async fn detect_sensor(&self, channel: ChannelIndex) -> Result<SensorProbe, ClientError> {
        Ok(self.controller.detect_sensor(channel).await?)
    }
}

/// Whether the controller received the request and replied, successfully or not.
fn answered(result: &Result<(), ControllerError>) -> bool {
    !matches!(result, Err(ControllerError::Transport { .. }))
}
