//! Browser side of the [`UserInteraction`] port.

use irrigo_app::ports::UserInteraction;
use leptos::prelude::*;

/// Which modal dialog is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modal {
    AddPlant,
    Wifi,
}

/// Native `confirm`/`alert` dialogs plus the page's modal state.
#[derive(Clone, Copy)]
pub struct BrowserUser {
    modal: WriteSignal<Option<Modal>>,
}

impl BrowserUser {
    pub fn new(modal: WriteSignal<Option<Modal>>) -> Self {
        Self { modal }
    }
}

impl UserInteraction for BrowserUser {
    async fn confirm(&self, message: &str) -> bool {
        web_sys::window()
            .and_then(|window| window.confirm_with_message(message).ok())
            .unwrap_or(false)
    }

    fn notify(&self, message: &str) {
        let result = web_sys::window()
            .map(|window| window.alert_with_message(message))
            .transpose();
        if let Err(err) = result {
            tracing::debug!(error = ?err, "alert dialog failed");
        }
    }

    fn close_modals(&self) {
        self.modal.set(None);
    }
}
