//! # irrigo-dashboard-leptos
//!
//! Browser front end served by the controller itself. The Leptos shell owns
//! the stat cards, status bar, dialogs and toasts; the plant list is mounted
//! by the core renderer through [`dom::DomDashboard`].

use std::rc::Rc;

use irrigo_app::dispatcher::ActionDispatcher;
use irrigo_app::poller::Poller;
use irrigo_app::ports::LinkStatus;
use irrigo_app::view::EnvironmentReadout;
use irrigo_domain::environment::Environment;
use leptos::prelude::*;
use leptos::task::spawn_local;

pub mod api;
mod components;
pub mod dom;
pub mod interaction;
pub mod logging;
pub mod timer;

use api::GlooController;
use components::{AddPlantModal, StatCard, ToastContainer, WifiModal, use_toasts};
use interaction::{BrowserUser, Modal};
use timer::GlooTimer;

pub type BrowserDispatcher = ActionDispatcher<GlooController, BrowserUser>;

/// Dispatcher handle that event handlers can copy.
pub type SharedDispatcher = StoredValue<Rc<BrowserDispatcher>, LocalStorage>;

fn link_label(link: LinkStatus) -> String {
    if link.online {
        "ONLINE".to_string()
    } else {
        format!("OFFLINE ({})", link.consecutive_failures)
    }
}

/// Root application component.
#[component]
pub fn App() -> impl IntoView {
    view! {
        <ToastContainer>
            <PlantDashboard/>
        </ToastContainer>
    }
}

#[component]
fn PlantDashboard() -> impl IntoView {
    let toasts = use_toasts();
    let (readout, set_readout) = signal(EnvironmentReadout::from_environment(
        &Environment::default(),
    ));
    let (status, set_status) = signal(String::new());
    let (link, set_link) = signal(LinkStatus {
        online: true,
        consecutive_failures: 0,
    });
    let (modal, set_modal) = signal(None::<Modal>);

    let poller = Poller::new(
        GlooController,
        GlooTimer,
        dom::DomDashboard::new(set_readout, set_status, set_link),
    );
    let dispatcher = Rc::new(ActionDispatcher::new(
        GlooController,
        BrowserUser::new(set_modal),
        poller.refresh_handle(),
    ));
    spawn_local(poller.run());

    let rows = Rc::clone(&dispatcher);
    let installed = dom::install_click_delegate(move |action| {
        let dispatcher = Rc::clone(&rows);
        spawn_local(async move {
            if let Err(err) = dispatcher.dispatch(action).await {
                toasts.report(&err);
            }
        });
    });
    if let Err(err) = installed {
        tracing::error!(error = %err, "plant row buttons will not respond");
    }

    let dispatcher: SharedDispatcher = StoredValue::new_local(dispatcher);
    let reboot = move |_| {
        let dispatcher = dispatcher.get_value();
        spawn_local(async move {
            if let Err(err) = dispatcher.reboot().await {
                toasts.report(&err);
            }
        });
    };

    view! {
        <header class="top-bar">
            <h1>"IRRIGO"</h1>
            <span class="link" class:offline=move || !link.get().online>
                {move || link_label(link.get())}
            </span>
        </header>
        <section class="stats">
            <StatCard label="VPD" unit="kPa" value=Signal::derive(move || readout.get().vpd)/>
            <StatCard label="TEMP" unit="\u{00B0}C" value=Signal::derive(move || readout.get().temp)/>
            <StatCard label="HUM" unit="%" value=Signal::derive(move || readout.get().hum)/>
        </section>
        <p class="status-line">{move || status.get()}</p>
        <div id={dom::PLANT_LIST_ID} class="plant-list"></div>
        <footer class="controls">
            <button on:click=move |_| set_modal.set(Some(Modal::AddPlant))>"+ PLANT"</button>
            <button on:click=move |_| set_modal.set(Some(Modal::Wifi))>"WIFI"</button>
            <button class="btn-del" on:click=reboot>"REBOOT"</button>
        </footer>
        <Show when=move || modal.get() == Some(Modal::AddPlant)>
            <AddPlantModal dispatcher=dispatcher set_modal=set_modal/>
        </Show>
        <Show when=move || modal.get() == Some(Modal::Wifi)>
            <WifiModal dispatcher=dispatcher set_modal=set_modal/>
        </Show>
    }
}
