//! Add-plant and Wi-Fi dialogs.

use irrigo_domain::network::WifiNetwork;
use irrigo_domain::request::WifiCredentials;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::toast::use_toasts;
use crate::SharedDispatcher;
use crate::interaction::Modal;

/// Name entry for a new plant. The controller picks channel and sensor.
#[component]
pub fn AddPlantModal(
    dispatcher: SharedDispatcher,
    set_modal: WriteSignal<Option<Modal>>,
) -> impl IntoView {
    let toasts = use_toasts();
    let (name, set_name) = signal(String::new());

    let submit = move |_| {
        let dispatcher = dispatcher.get_value();
        let name = name.get_untracked();
        spawn_local(async move {
            // Once the controller answers, the dispatcher closes this dialog and forces a refresh.
            if let Err(err) = dispatcher.add_plant(&name).await {
                toasts.report(&err);
            }
        });
    };

    view! {
        <div class="modal-backdrop">
            <div class="modal">
                <h2>"NEW PLANT"</h2>
                <input
                    type="text"
                    placeholder="Name"
                    prop:value=move || name.get()
                    on:input=move |ev| set_name.set(event_target_value(&ev))
                />
                <div class="modal-actions">
                    <button on:click=submit>"ADD"</button>
                    <button class="btn-del" on:click=move |_| set_modal.set(None)>"CANCEL"</button>
                </div>
            </div>
        </div>
    }
}

/// Network scan and credential entry.
#[component]
pub fn WifiModal(
    dispatcher: SharedDispatcher,
    set_modal: WriteSignal<Option<Modal>>,
) -> impl IntoView {
    let toasts = use_toasts();
    let (ssid, set_ssid) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (networks, set_networks) = signal(Vec::<WifiNetwork>::new());

    let scan = move |_| {
        let dispatcher = dispatcher.get_value();
        spawn_local(async move {
            match dispatcher.scan_networks().await {
                Ok(found) if found.is_empty() => toasts.info("Scanning, try again shortly"),
                Ok(found) => set_networks.set(found),
                Err(err) => toasts.report(&err),
            }
        });
    };

    let save = move |_| {
        let dispatcher = dispatcher.get_value();
        let credentials = WifiCredentials {
            ssid: ssid.get_untracked(),
            password: password.get_untracked(),
        };
        set_modal.set(None);
        spawn_local(async move {
            if let Err(err) = dispatcher.save_wifi(credentials).await {
                toasts.report(&err);
            }
        });
    };

    view! {
        <div class="modal-backdrop">
            <div class="modal">
                <h2>"WIFI"</h2>
                <button on:click=scan>"SCAN"</button>
                <ul class="networks">
                    {move || {
                        networks
                            .get()
                            .into_iter()
                            .map(|network| {
                                let picked = network.ssid.clone();
                                let security = if network.secure { " (secured)" } else { "" };
                                view! {
                                    <li on:click=move |_| set_ssid.set(picked.clone())>
                                        {network.ssid}{security}
                                    </li>
                                }
                            })
                            .collect_view()
                    }}
                </ul>
                <input
                    type="text"
                    placeholder="SSID"
                    prop:value=move || ssid.get()
                    on:input=move |ev| set_ssid.set(event_target_value(&ev))
                />
                <input
                    type="password"
                    placeholder="Password"
                    prop:value=move || password.get()
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                />
                <div class="modal-actions">
                    <button on:click=save>"SAVE & REBOOT"</button>
                    <button class="btn-del" on:click=move |_| set_modal.set(None)>"CANCEL"</button>
                </div>
            </div>
        </div>
    }
}
