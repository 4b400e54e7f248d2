//! List table with search, enum filter and paging.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every list screen keeps a `RwSignal<TableState<R>>`. These helpers only
//! read it and forward user input to the state's setters; fetching and
//! mutation stay with the page.

use leptos::prelude::*;
use leptos::tachys::view::any_view::IntoAny;
use records::Row;
use records::table::TableState;

/// Search box plus the enum filter select when the row type has one.
pub fn table_controls<R>(table: RwSignal<TableState<R>>) -> impl IntoView
where
    R: Row + Send + Sync + 'static,
{
    let options = R::filter_options();
    let filter = (!options.is_empty()).then(|| {
        view! {
            <select
                class="table-controls__filter"
                on:change=move |ev| {
                    let value = event_target_value(&ev);
                    let filter = (!value.is_empty()).then_some(value.as_str());
                    table.update(|t| t.set_filter(filter));
                }
            >
                <option value="">"All"</option>
                {options
                    .iter()
                    .map(|(value, label)| {
                        let selected = move || table.with(|t| t.filter() == Some(*value));
                        view! { <option value=*value selected=selected>{*label}</option> }
                    })
                    .collect_view()}
            </select>
        }
    });

    view! {
        <div class="table-controls">
            <input
                class="table-controls__search"
                type="search"
                placeholder="Search"
                prop:value=move || table.with(|t| t.query().to_owned())
                on:input=move |ev| table.update(|t| t.set_query(event_target_value(&ev)))
            />
            {filter}
            <Show when=move || table.with(|t| t.loading)>
                <span class="table-controls__loading">"Loading…"</span>
            </Show>
        </div>
    }
}

/// Previous/next buttons and the page indicator.
pub fn pager<R>(table: RwSignal<TableState<R>>) -> impl IntoView
where
    R: Row + Send + Sync + 'static,
{
    let at_start = move || table.with(|t| t.page() == 0);
    let at_end = move || table.with(|t| t.page() + 1 >= t.page_count());
    let label = move || {
        table.with(|t| {
            let shown = t.visible().len();
            format!("Page {} of {} · {shown} rows", t.page() + 1, t.page_count().max(1))
        })
    };

    view! {
        <div class="pager">
            <button class="btn btn--small" disabled=at_start on:click=move |_| table.update(TableState::prev_page)>
                "Previous"
            </button>
            <span class="pager__label">{label}</span>
            <button class="btn btn--small" disabled=at_end on:click=move |_| table.update(TableState::next_page)>
                "Next"
            </button>
        </div>
    }
}

/// Table of the current page with a per-row actions cell.
pub fn data_table<R, F, V>(table: RwSignal<TableState<R>>, row_actions: F) -> impl IntoView
where
    R: Row + Clone + Send + Sync + 'static,
    F: Fn(&R) -> V + Clone + Send + Sync + 'static,
    V: IntoView + 'static,
{
    render_table(table, Some(row_actions))
}

/// Read-only table, used by the log screens.
pub fn plain_table<R>(table: RwSignal<TableState<R>>) -> impl IntoView
where
    R: Row + Clone + Send + Sync + 'static,
{
    render_table(table, None::<fn(&R)>)
}

fn render_table<R, F, V>(table: RwSignal<TableState<R>>, row_actions: Option<F>) -> impl IntoView
where
    R: Row + Clone + Send + Sync + 'static,
    F: Fn(&R) -> V + Clone + Send + Sync + 'static,
    V: IntoView + 'static,
{
    let columns = R::columns();
    let has_actions = row_actions.is_some();
    let span = (columns.len() + usize::from(has_actions)).to_string();

    let body = move || {
        let rows: Vec<R> = table.with(|t| t.page_rows().into_iter().cloned().collect());
        if rows.is_empty() {
            let text = if table.with(|t| t.loading) { "Loading…" } else { "No records" };
            return view! {
                <tr class="data-table__empty">
                    <td colspan=span.clone()>{text}</td>
                </tr>
            }
            .into_any();
        }
        rows.iter()
            .map(|row| {
                let actions = row_actions.as_ref().map(|actions| {
                    view! { <td class="data-table__actions">{actions(row)}</td> }
                });
                view! {
                    <tr>
                        {row.cells().into_iter().map(|cell| view! { <td>{cell}</td> }).collect_view()}
                        {actions}
                    </tr>
                }
            })
            .collect_view()
            .into_any()
    };

    view! {
        <table class="data-table">
            <thead>
                <tr>
                    {columns.iter().map(|c| view! { <th>{*c}</th> }).collect_view()}
                    {has_actions.then(|| view! { <th class="data-table__actions"></th> })}
                </tr>
            </thead>
            <tbody>{body}</tbody>
        </table>
    }
}
