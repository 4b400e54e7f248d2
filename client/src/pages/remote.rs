//! Remote processing: ask an app instance to scan and process a document,
//! then wait for the result on the processing namespace.
//!
//! SYSTEM CONTEXT
//! ==============
//! ```text
//! mount ──► subscribe(processing) ──session:connected──► Ready
//! submit ──► RemoteSession::begin ──► POST /api/remote/process
//!        ◄── processing:result (same session) ──► Completed / Failed
//! ```
//!
//! The socket does not reconnect: a new socket would carry a new session id
//! and the pending result would never match it.

use frames::Namespace;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos::tachys::view::any_view::IntoAny;
use records::logs::{RemoteTransactionLog, initiators};
use records::remote::{PROCESS_PATH, ProcessingResult, RemoteCommand, RemoteError, RemoteSession, SessionPhase};
use records::resources::{DocumentType, WindowsAppInstance};
use records::{LogRecord, RecordId, Resource, ValidationErrors};

use crate::components::alert::ErrorAlert;
use crate::net::api;
use crate::net::feed::{self, FeedStatus};

#[component]
pub fn RemotePage() -> impl IntoView {
    let session = RwSignal::new(RemoteSession::new());
    let status = RwSignal::new(FeedStatus::default());
    let error = RwSignal::new(None::<String>);
    let field_errors = RwSignal::new(ValidationErrors::new());

    let initiator = RwSignal::new(String::new());
    let instance = RwSignal::new(None::<RecordId>);
    let device = RwSignal::new(None::<RecordId>);
    let document_type = RwSignal::new(None::<RecordId>);

    let known_initiators = RwSignal::new(Vec::<String>::new());
    let instances = RwSignal::new(Vec::<WindowsAppInstance>::new());
    let document_types = RwSignal::new(Vec::<DocumentType>::new());
    load_choices(known_initiators, instances, document_types, error);

    let subscription = feed::subscribe(
        Namespace::Processing,
        false,
        move |frame| {
            let _ = session.try_update(|s| s.observe(&frame));
        },
        move |s| {
            let _ = status.try_set(s);
            if s == FeedStatus::Closed {
                let _ = session.try_update(|sess| sess.abort("the processing channel closed"));
            }
        },
    );
    on_cleanup(move || drop(subscription));

    // The chosen device belongs to the chosen instance.
    Effect::new(move || {
        instance.track();
        device.set(None);
    });

    let submit = move |_| {
        let command = RemoteCommand {
            initiator_key: initiator.get_untracked(),
            app_instance_id: instance.get_untracked().unwrap_or(0),
            device_id: device.get_untracked(),
            document_type_id: document_type.get_untracked(),
        };
        error.set(None);
        field_errors.set(ValidationErrors::new());
        let Some(begun) = session.try_update(|s| s.begin(command)) else {
            return;
        };
        let request = match begun {
            Ok(request) => request,
            Err(RemoteError::Validation(errors)) => {
                field_errors.set(errors);
                return;
            }
            Err(e) => {
                error.set(Some(e.to_string()));
                return;
            }
        };
        spawn_local(async move {
            if let Err(e) = api::create::<_, serde_json::Value>(PROCESS_PATH, &request).await {
                let _ = session.try_update(|s| s.abort(e.user_message()));
            }
        });
    };

    let busy = move || session.with(|s| matches!(s.phase(), SessionPhase::Connecting | SessionPhase::Awaiting { .. }));
    let field_error =
        move |key: &'static str| Signal::derive(move || field_errors.with(|e| e.for_field(key).map(str::to_owned)));

    let device_options = move || {
        let chosen = instance.get();
        instances.with(|list| {
            list.iter()
                .filter(|i| i.id.is_some() && i.id == chosen)
                .flat_map(|i| i.devices.iter())
                .map(|d| {
                    let id = d.id;
                    view! { <option value=id.to_string() selected=move || device.get() == Some(id)>{d.device_name.clone()}</option> }
                })
                .collect_view()
        })
    };

    view! {
        <section class="remote-page">
            <header class="page-header">
                <h1>"Remote command"</h1>
                <span class="page-header__spacer"></span>
                <span class=move || format!("feed-status feed-status--{:?}", status.get()).to_lowercase()>
                    {move || status.get().label()}
                </span>
            </header>
            <ErrorAlert message=error/>
            <div class="form-grid">
                <label class="field">
                    <span class="field__label">"Initiator key *"</span>
                    <input
                        class="field__input"
                        type="text"
                        list="known-initiators"
                        prop:value=move || initiator.get()
                        on:input=move |ev| initiator.set(event_target_value(&ev))
                    />
                    <datalist id="known-initiators">
                        {move || {
                            known_initiators
                                .get()
                                .into_iter()
                                .map(|key| view! { <option value=key></option> })
                                .collect_view()
                        }}
                    </datalist>
                    <FieldError message=field_error("initiator_key")/>
                </label>
                <label class="field">
                    <span class="field__label">"App instance *"</span>
                    <select class="field__input" on:change=move |ev| instance.set(event_target_value(&ev).parse().ok())>
                        <option value="">"Select…"</option>
                        {move || {
                            instances
                                .get()
                                .into_iter()
                                .filter_map(|i| i.id.map(|id| (id, i.title)))
                                .map(|(id, title)| view! { <option value=id.to_string()>{title}</option> })
                                .collect_view()
                        }}
                    </select>
                    <FieldError message=field_error("app_instance_id")/>
                </label>
                <label class="field">
                    <span class="field__label">"Device"</span>
                    <select class="field__input" on:change=move |ev| device.set(event_target_value(&ev).parse().ok())>
                        <option value="" selected=move || device.with(Option::is_none)>"Instance default"</option>
                        {device_options}
                    </select>
                </label>
                <label class="field">
                    <span class="field__label">"Document type"</span>
                    <select class="field__input" on:change=move |ev| document_type.set(event_target_value(&ev).parse().ok())>
                        <option value="">"Detect"</option>
                        {move || {
                            document_types
                                .get()
                                .into_iter()
                                .filter_map(|t| t.id.map(|id| (id, t.name)))
                                .map(|(id, name)| view! { <option value=id.to_string()>{name}</option> })
                                .collect_view()
                        }}
                    </select>
                </label>
            </div>
            <div class="remote-page__actions">
                <button class="btn btn--primary" disabled=busy on:click=submit>
                    "Process"
                </button>
            </div>
            <PhaseView session=session/>
        </section>
    }
}

#[component]
fn FieldError(#[prop(into)] message: Signal<Option<String>>) -> impl IntoView {
    view! {
        <Show when=move || message.with(Option::is_some)>
            <span class="field__error">{move || message.get().unwrap_or_default()}</span>
        </Show>
    }
}

#[component]
fn PhaseView(session: RwSignal<RemoteSession>) -> impl IntoView {
    move || match session.with(|s| s.phase().clone()) {
        SessionPhase::Connecting => view! { <p class="remote-phase">"Connecting to the processing channel…"</p> }.into_any(),
        SessionPhase::Ready { session_id } => view! {
            <p class="remote-phase">"Ready. Session " <code>{session_id}</code></p>
        }
        .into_any(),
        SessionPhase::Awaiting { .. } => {
            view! { <p class="remote-phase remote-phase--waiting">"Waiting for the result…"</p> }.into_any()
        }
        SessionPhase::Completed(result) => result_view(result).into_any(),
        SessionPhase::Failed(message) => view! {
            <div class="alert alert--error" role="alert">{message}</div>
        }
        .into_any(),
    }
}

fn result_view(result: ProcessingResult) -> impl IntoView {
    let class = if result.succeeded() { "remote-result remote-result--ok" } else { "remote-result remote-result--failed" };
    let data = serde_json::to_string_pretty(&result.data).unwrap_or_default();
    view! {
        <article class=class>
            <h2>{result.status.label()}</h2>
            <p>{result.message}</p>
            {result.transaction_id.map(|id| view! { <p>"Transaction #" {id}</p> })}
            <pre class="remote-result__data">{data}</pre>
        </article>
    }
}

fn load_choices(
    known_initiators: RwSignal<Vec<String>>,
    instances: RwSignal<Vec<WindowsAppInstance>>,
    document_types: RwSignal<Vec<DocumentType>>,
    error: RwSignal<Option<String>>,
) {
    spawn_local(async move {
        match api::fetch_list::<RemoteTransactionLog>(RemoteTransactionLog::ENDPOINT).await {
            Ok(logs) => {
                let _ = known_initiators.try_set(initiators(&logs));
            }
            Err(e) => leptos::logging::warn!("loading initiators failed: {e}"),
        }
    });
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
    spawn_local(async move {
        match api::fetch_list::<DocumentType>(DocumentType::ENDPOINT).await {
            Ok(list) => {
                let _ = document_types.try_set(list);
            }
            Err(e) => leptos::logging::warn!("loading document types failed: {e}"),
        }
    });
}
