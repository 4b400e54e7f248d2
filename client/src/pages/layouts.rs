//! Document layout list. Layouts are edited on the canvas editor page, not in
//! a generated form, so this screen only lists, opens and deletes them.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use records::resources::DocumentLayout;
use records::table::TableState;
use records::{ApiError, RecordId};

use crate::components::alert::ErrorAlert;
use crate::components::data_table::{data_table, pager, table_controls};
use crate::components::dialog::ConfirmDialog;
use crate::net::api;

#[component]
pub fn LayoutsPage() -> impl IntoView {
    let table = RwSignal::new(TableState::<DocumentLayout>::new());
    let confirm_delete = RwSignal::new(None::<(RecordId, String)>);
    let deleting = RwSignal::new(false);

    load_layouts(table);

    let row_actions = move |layout: &DocumentLayout| {
        layout.id.map(|id| {
            let name = layout.name.clone();
            view! {
                <A href=format!("/document-layouts/{id}")>"Open"</A>
                <button
                    class="btn btn--small btn--danger"
                    on:click=move |_| confirm_delete.set(Some((id, name.clone())))
                >
                    "Delete"
                </button>
            }
        })
    };

    let on_delete = Callback::new(move |()| {
        let Some((id, _)) = confirm_delete.get_untracked() else {
            return;
        };
        if deleting.get_untracked() {
            return;
        }
        deleting.set(true);
        spawn_local(async move {
            let result = api::delete(&DocumentLayout::item_path(id)).await;
            let _ = deleting.try_set(false);
            let _ = confirm_delete.try_set(None);
            let _ = table.try_update(|t| match result {
                Ok(()) => {
                    let kept = t.items().iter().filter(|l| l.id != Some(id)).cloned().collect();
                    t.set_items(kept);
                }
                Err(e) => t.error = Some(e),
            });
        });
    });
    let on_keep = Callback::new(move |()| confirm_delete.set(None));
    let list_error = Signal::derive(move || table.with(|t| t.error.as_ref().map(ApiError::user_message)));
    let delete_message = Signal::derive(move || {
        confirm_delete.with(|c| {
            c.as_ref()
                .map(|(_, name)| format!("Delete layout \"{name}\" and its image?"))
                .unwrap_or_default()
        })
    });

    view! {
        <section class="resource-page">
            <header class="page-header">
                <h1>{DocumentLayout::TITLE}</h1>
                <span class="page-header__spacer"></span>
                <button class="btn" on:click=move |_| load_layouts(table)>
                    "Refresh"
                </button>
                <A href="/layout-editor">"New layout"</A>
            </header>
            <ErrorAlert message=list_error/>
            {table_controls(table)}
            {data_table(table, row_actions)}
            {pager(table)}
            <Show when=move || confirm_delete.with(Option::is_some)>
                <ConfirmDialog
                    title="Delete layout"
                    message=delete_message
                    busy=deleting
                    on_confirm=on_delete
                    on_cancel=on_keep
                />
            </Show>
        </section>
    }
}

fn load_layouts(table: RwSignal<TableState<DocumentLayout>>) {
    table.update(TableState::begin_loading);
    spawn_local(async move {
        let result = api::fetch_list::<DocumentLayout>(DocumentLayout::ENDPOINT).await;
        let _ = table.try_update(|t| match result {
            Ok(items) => t.set_items(items),
            Err(e) => t.fail(e),
        });
    });
}
