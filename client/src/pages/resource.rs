//! Generic CRUD screen for any [`Resource`].
//!
//! SYSTEM CONTEXT
//! ==============
//! Each editable entity gets a route component wrapping
//! `resource_page::<R>()`. The list is fetched once on mount and on
//! Refresh; search, filter and paging are local.
//! Forms, deletes and active toggles go through the helpers below, which the
//! destinations and instances screens reuse.
//!
//! ERROR HANDLING
//! ==============
//! Failures never leave the screen half-updated: a failed toggle is rolled
//! back, a failed save keeps the dialog open with the server's message, and
//! list errors show above the table.

use leptos::prelude::*;
use leptos::task::spawn_local;
use records::table::TableState;
use records::{ApiError, RecordId, Resource, optimistic};
use records::form::FieldSpec;
use records::resources::{
    AccessToken, AiProvider, ApiEndpoint, DocumentType, FtpEndpoint, LocalStorageFolder, ProcessingRule,
};

use crate::components::alert::ErrorAlert;
use crate::components::data_table::{data_table, pager, table_controls};
use crate::components::dialog::ConfirmDialog;
use crate::components::record_form::record_form;
use crate::net::api;
use crate::state::form::FormState;
use crate::state::references::{ReferenceOptions, options_from, reference_endpoints};

#[component]
pub fn DocumentTypesPage() -> impl IntoView {
    resource_page::<DocumentType>()
}

#[component]
pub fn ProcessingRulesPage() -> impl IntoView {
    resource_page::<ProcessingRule>()
}

#[component]
pub fn ApiEndpointsPage() -> impl IntoView {
    resource_page::<ApiEndpoint>()
}

#[component]
pub fn FtpEndpointsPage() -> impl IntoView {
    resource_page::<FtpEndpoint>()
}

#[component]
pub fn LocalFoldersPage() -> impl IntoView {
    resource_page::<LocalStorageFolder>()
}

#[component]
pub fn AccessTokensPage() -> impl IntoView {
    resource_page::<AccessToken>()
}

#[component]
pub fn AiProvidersPage() -> impl IntoView {
    resource_page::<AiProvider>()
}

pub(crate) fn resource_page<R>() -> impl IntoView
where
    R: Resource + Send + Sync,
{
    let table = RwSignal::new(TableState::<R>::new());
    let form = RwSignal::new(None::<FormState>);
    let references = RwSignal::new(ReferenceOptions::default());

    load_list(table);
    load_references(R::fields(), references);

    let on_submit = Callback::new(move |()| {
        save_record::<R, _>(form, move |saved| match saved {
            Some(record) => table.update(|t| t.upsert(record)),
            None => load_list(table),
        });
    });

    let new_record = move |_: leptos::ev::MouseEvent| form.set(Some(FormState::create::<R>()));

    view! {
        <section class="resource-page">
            <header class="page-header">
                <h1>{R::TITLE}</h1>
                <span class="page-header__spacer"></span>
                <button class="btn" on:click=move |_| load_list(table)>
                    "Refresh"
                </button>
                <button class="btn btn--primary" on:click=new_record>
                    "New"
                </button>
            </header>
            {crud_body(table, form, references, on_submit)}
        </section>
    }
}

/// Table, pager, form dialog and delete confirmation for one resource.
pub(crate) fn crud_body<R>(
    table: RwSignal<TableState<R>>,
    form: RwSignal<Option<FormState>>,
    references: RwSignal<ReferenceOptions>,
    on_submit: Callback<()>,
) -> impl IntoView
where
    R: Resource + Send + Sync,
{
    let confirm_delete = RwSignal::new(None::<RecordId>);
    let deleting = RwSignal::new(false);

    let row_actions = move |row: &R| {
        let id = row.id();
        let record = row.clone();
        let toggle = row.active().zip(id).map(|(active, id)| {
            view! {
                <button class="btn btn--small" on:click=move |_| toggle_active(table, id)>
                    {if active { "Deactivate" } else { "Activate" }}
                </button>
            }
        });
        view! {
            {toggle}
            <button class="btn btn--small" on:click=move |_| form.set(Some(FormState::edit(&record)))>
                "Edit"
            </button>
            <button
                class="btn btn--small btn--danger"
                disabled=id.is_none()
                on:click=move |_| confirm_delete.set(id)
            >
                "Delete"
            </button>
        }
    };

    let on_cancel = Callback::new(move |()| form.set(None));
    let on_delete = Callback::new(move |()| delete_record(table, confirm_delete, deleting));
    let on_keep = Callback::new(move |()| confirm_delete.set(None));
    let list_error = Signal::derive(move || table.with(|t| t.error.as_ref().map(ApiError::user_message)));
    let delete_message = Signal::derive(move || {
        let id = confirm_delete.get().map(|id| id.to_string()).unwrap_or_default();
        format!("Delete record #{id}? This cannot be undone.")
    });

    view! {
        <ErrorAlert message=list_error/>
        {table_controls(table)}
        {data_table(table, row_actions)}
        {pager(table)}
        <Show when=move || form.with(Option::is_some)>
            {record_form::<R>(form, references, on_submit, on_cancel)}
        </Show>
        <Show when=move || confirm_delete.with(Option::is_some)>
            <ConfirmDialog
                title="Delete record"
                message=delete_message
                busy=deleting
                on_confirm=on_delete
                on_cancel=on_keep
            />
        </Show>
    }
}

/// Fetch the collection into `table`. Rows already shown stay until it lands.
pub(crate) fn load_list<R>(table: RwSignal<TableState<R>>)
where
    R: Resource + Send + Sync,
{
    table.update(TableState::begin_loading);
    spawn_local(async move {
        let result = api::fetch_list::<R>(R::ENDPOINT).await;
        let _ = table.try_update(|t| match result {
            Ok(items) => t.set_items(items),
            Err(e) => t.fail(e),
        });
    });
}

/// Load select options for every reference field.
pub(crate) fn load_references(fields: &'static [FieldSpec], references: RwSignal<ReferenceOptions>) {
    for endpoint in reference_endpoints(fields) {
        spawn_local(async move {
            match api::fetch_list::<serde_json::Value>(endpoint).await {
                Ok(records) => {
                    let _ = references.try_update(|r| r.insert(endpoint, options_from(&records)));
                }
                Err(e) => leptos::logging::warn!("loading options from {endpoint} failed: {e}"),
            }
        });
    }
}

/// Validate the open form and send it: PUT for an edit, POST for a create.
///
/// `on_saved` receives the stored record, or `None` when the server answered
/// without a body. The dialog closes only on success.
pub(crate) fn save_record<R, F>(form: RwSignal<Option<FormState>>, on_saved: F)
where
    R: Resource + Send + Sync,
    F: FnOnce(Option<R>) + 'static,
{
    let record = form
        .try_update(|f| f.as_mut().filter(|f| !f.busy).and_then(|f| f.prepare::<R>()))
        .flatten();
    let Some(record) = record else {
        return;
    };

    spawn_local(async move {
        let saved = match record.id() {
            Some(id) => api::update::<R, R>(&R::item_path(id), &record)
                .await
                .map(|echo| Some(echo.unwrap_or(record))),
            None => api::create::<R, R>(R::ENDPOINT, &record).await,
        };
        match saved {
            Ok(saved) => {
                let _ = form.try_set(None);
                on_saved(saved);
            }
            Err(e) => {
                let _ = form.try_update(|f| {
                    if let Some(f) = f {
                        f.fail(e);
                    }
                });
            }
        }
    });
}

/// Flip the active flag locally, then confirm it with a PATCH.
pub(crate) fn toggle_active<R>(table: RwSignal<TableState<R>>, id: RecordId)
where
    R: Resource + Send + Sync,
{
    let Some(pending) = table.try_update(|t| optimistic::begin_toggle(t, id)).flatten() else {
        return;
    };
    spawn_local(async move {
        match api::patch(&R::item_path(pending.id()), &pending.request_body()).await {
            Ok(()) => pending.commit(),
            Err(e) => {
                let _ = table.try_update(|t| {
                    pending.rollback(t);
                    t.error = Some(e);
                });
            }
        }
    });
}

/// Delete the record awaiting confirmation and drop it from the table.
pub(crate) fn delete_record<R>(
    table: RwSignal<TableState<R>>,
    confirm: RwSignal<Option<RecordId>>,
    deleting: RwSignal<bool>,
) where
    R: Resource + Send + Sync,
{
    let Some(id) = confirm.get_untracked() else {
        return;
    };
    if deleting.get_untracked() {
        return;
    }
    deleting.set(true);
    spawn_local(async move {
        let result = api::delete(&R::item_path(id)).await;
        let _ = deleting.try_set(false);
        let _ = confirm.try_set(None);
        let _ = table.try_update(|t| match result {
            Ok(()) => {
                t.remove(id);
            }
            Err(e) => t.error = Some(e),
        });
    });
}
