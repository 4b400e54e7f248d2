//! Destinations screen, scoped to one processing rule at a time.
//!
//! SYSTEM CONTEXT
//! ==============
//! The backend lists every destination from one collection. Choosing a rule
//! refetches that collection and keeps only the rule's rows, so the table
//! never shows a stale subset after edits made under another rule.

use leptos::prelude::*;
use leptos::task::spawn_local;
use records::RecordId;
use records::Resource;
use records::resources::{Destination, ProcessingRule};
use records::table::TableState;

use crate::components::alert::ErrorAlert;
use crate::net::api;
use crate::pages::resource::{crud_body, load_references, save_record};
use crate::state::form::FormState;
use crate::state::references::ReferenceOptions;

#[component]
pub fn DestinationsPage() -> impl IntoView {
    let rules = RwSignal::new(Vec::<ProcessingRule>::new());
    let rules_error = RwSignal::new(None::<String>);
    let rule = RwSignal::new(None::<RecordId>);
    let table = RwSignal::new(TableState::<Destination>::new());
    let form = RwSignal::new(None::<FormState>);
    let references = RwSignal::new(ReferenceOptions::default());

    spawn_local(async move {
        match api::fetch_list::<ProcessingRule>(ProcessingRule::ENDPOINT).await {
            Ok(list) => {
                let first = list.iter().find_map(ProcessingRule::id);
                let _ = rules.try_set(list);
                let _ = rule.try_set(first);
            }
            Err(e) => {
                let _ = rules_error.try_set(Some(e.user_message()));
            }
        }
    });
    load_references(Destination::fields(), references);

    Effect::new(move || {
        if let Some(rule_id) = rule.get() {
            load_for_rule(table, rule_id);
        } else {
            table.update(|t| t.set_items(Vec::new()));
        }
    });

    let on_new = move |_| {
        let Some(rule_id) = rule.get_untracked() else {
            return;
        };
        let mut state = FormState::create::<Destination>();
        state.set_text("rule_id", rule_id.to_string());
        form.set(Some(state));
    };
    let on_submit = Callback::new(move |()| {
        save_record::<Destination, _>(form, move |_| {
            if let Some(rule_id) = rule.get_untracked() {
                load_for_rule(table, rule_id);
            }
        });
    });

    view! {
        <section class="resource-page">
            <header class="page-header">
                <h1>{Destination::TITLE}</h1>
                <span class="page-header__spacer"></span>
                <label class="page-header__select">
                    "Rule "
                    <select on:change=move |ev| rule.set(event_target_value(&ev).parse().ok())>
                        {move || {
                            rules
                                .get()
                                .into_iter()
                                .filter_map(|r| r.id.map(|id| (id, r.title)))
                                .map(|(id, title)| {
                                    view! {
                                        <option value=id.to_string() selected=move || rule.get() == Some(id)>
                                            {title}
                                        </option>
                                    }
                                })
                                .collect_view()
                        }}
                    </select>
                </label>
                <button class="btn btn--primary" disabled=move || rule.with(Option::is_none) on:click=on_new>
                    "New"
                </button>
            </header>
            <ErrorAlert message=rules_error/>
            {crud_body(table, form, references, on_submit)}
        </section>
    }
}

fn load_for_rule(table: RwSignal<TableState<Destination>>, rule_id: RecordId) {
    table.update(TableState::begin_loading);
    spawn_local(async move {
        let result = api::fetch_list::<Destination>(Destination::ENDPOINT).await;
        let _ = table.try_update(|t| match result {
            Ok(all) => t.set_items(Destination::for_rule(&all, rule_id).cloned().collect()),
            Err(e) => t.fail(e),
        });
    });
}
