//! Windows app instances: the generic CRUD screen plus the device chooser.
//!
//! Choosing a device is optimistic. The list flips locally, the PUT confirms
//! it, and a failure restores the snapshot taken before the flip.

use leptos::prelude::*;
use leptos::task::spawn_local;
use records::resources::{ScanningDevice, WindowsAppInstance, choose_device};
use records::{RecordId, Resource};

use crate::components::alert::ErrorAlert;
use crate::net::api;
use crate::pages::resource::resource_page;

#[component]
pub fn InstancesPage() -> impl IntoView {
    view! {
        {resource_page::<WindowsAppInstance>()}
        <DeviceChooser/>
    }
}

#[component]
fn DeviceChooser() -> impl IntoView {
    let instances = RwSignal::new(Vec::<WindowsAppInstance>::new());
    let selected = RwSignal::new(None::<RecordId>);
    let devices = RwSignal::new(Vec::<ScanningDevice>::new());
    let loading = RwSignal::new(false);
    let busy = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);

    spawn_local(async move {
        match api::fetch_list::<WindowsAppInstance>(WindowsAppInstance::ENDPOINT).await {
            Ok(list) => {
                let _ = instances.try_set(list);
            }
            Err(e) => {
                let _ = error.try_set(Some(e.user_message()));
            }
        }
    });

    Effect::new(move || {
        let Some(instance_id) = selected.get() else {
            devices.set(Vec::new());
            return;
        };
        loading.set(true);
        error.set(None);
        spawn_local(async move {
            let result = api::fetch_list::<ScanningDevice>(&WindowsAppInstance::devices_path(instance_id)).await;
            let _ = loading.try_set(false);
            // A newer selection owns the list now.
            if selected.get_untracked() != Some(instance_id) {
                return;
            }
            match result {
                Ok(list) => {
                    let _ = devices.try_set(list);
                }
                Err(e) => {
                    let _ = error.try_set(Some(e.user_message()));
                }
            }
        });
    });

    let choose = move |device_id: RecordId| {
        let Some(instance_id) = selected.get_untracked() else {
            return;
        };
        if busy.get_untracked() {
            return;
        }
        let snapshot = devices.get_untracked();
        if !devices.try_update(|d| choose_device(d, device_id)).unwrap_or(false) {
            return;
        }
        busy.set(true);
        error.set(None);
        spawn_local(async move {
            let body = serde_json::json!({ "device_id": device_id });
            let result = api::patch(&WindowsAppInstance::devices_path(instance_id), &body).await;
            let _ = busy.try_set(false);
            if let Err(e) = result {
                let _ = devices.try_set(snapshot);
                let _ = error.try_set(Some(e.user_message()));
            }
        });
    };

    let device_rows = move || {
        devices
            .get()
            .into_iter()
            .map(|device| {
                let id = device.id;
                view! {
                    <li class="device-list__item" class:device-list__item--chosen=device.chosen>
                        <span>{device.device_name}</span>
                        <button
                            class="btn btn--small"
                            disabled=move || busy.get() || device.chosen
                            on:click=move |_| choose(id)
                        >
                            {if device.chosen { "Chosen" } else { "Choose" }}
                        </button>
                    </li>
                }
            })
            .collect_view()
    };

    view! {
        <section class="device-chooser">
            <h2>"Scanning devices"</h2>
            <ErrorAlert message=error/>
            <select on:change=move |ev| selected.set(event_target_value(&ev).parse().ok())>
                <option value="">"Select an instance…"</option>
                {move || {
                    instances
                        .get()
                        .into_iter()
                        .filter_map(|i| i.id.map(|id| (id, i.title)))
                        .map(|(id, title)| view! { <option value=id.to_string()>{title}</option> })
                        .collect_view()
                }}
            </select>
            <Show when=move || loading.get()>
                <span class="table-controls__loading">"Loading devices…"</span>
            </Show>
            <Show
                when=move || selected.with(Option::is_some) && !loading.get() && devices.with(Vec::is_empty)
            >
                <p class="device-chooser__empty">"No devices reported by this instance."</p>
            </Show>
            <ul class="device-list">{device_rows}</ul>
        </section>
    }
}
