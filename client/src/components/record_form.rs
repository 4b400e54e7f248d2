//! Create/edit dialog generated from a resource's field specs.
//!
//! SYSTEM CONTEXT
//! ==============
//! The page owns `RwSignal<Option<FormState>>`; `Some` means the dialog is
//! open. Inputs write straight into [`FormState::values`]. Submitting is the
//! page's job: the Save button only runs `on_submit`.

use leptos::prelude::*;
use leptos::tachys::view::any_view::IntoAny;
use records::Resource;
use records::form::{FieldKind, FieldSpec};

use crate::components::alert::ErrorAlert;
use crate::state::form::FormState;
use crate::state::references::ReferenceOptions;

pub fn record_form<R>(
    form: RwSignal<Option<FormState>>,
    references: RwSignal<ReferenceOptions>,
    on_submit: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView
where
    R: Resource + Send + Sync,
{
    let mode = move || {
        if form.with(|f| f.as_ref().is_some_and(FormState::is_edit)) {
            "Edit"
        } else {
            "New"
        }
    };
    let busy = move || form.with(|f| f.as_ref().is_some_and(|f| f.busy));
    let error = Signal::derive(move || form.with(|f| f.as_ref().and_then(|f| f.error.clone())));

    view! {
        <div class="dialog-backdrop" on:click=move |_| on_cancel.run(())>
            <div class="dialog dialog--form" on:click=move |ev| ev.stop_propagation()>
                <h2 class="dialog__title">{mode}" · "{R::TITLE}</h2>
                <ErrorAlert message=error/>
                <div class="form-grid">
                    {R::fields().iter().map(|spec| field_row(spec, form, references)).collect_view()}
                </div>
                <div class="dialog__actions">
                    <button class="btn" on:click=move |_| on_cancel.run(())>
                        "Cancel"
                    </button>
                    <button class="btn btn--primary" disabled=busy on:click=move |_| on_submit.run(())>
                        {move || if busy() { "Saving…" } else { "Save" }}
                    </button>
                </div>
            </div>
        </div>
    }
}

fn field_row(
    spec: &'static FieldSpec,
    form: RwSignal<Option<FormState>>,
    references: RwSignal<ReferenceOptions>,
) -> impl IntoView {
    let key = spec.key;
    let text = move || form.with(|f| f.as_ref().map(|f| f.values.text(key).to_owned()).unwrap_or_default());
    let set_text = move |value: String| {
        form.update(|f| {
            if let Some(f) = f {
                f.set_text(key, value);
            }
        });
    };
    let error = move || form.with(|f| f.as_ref().and_then(|f| f.field_error(key).map(str::to_owned)));

    let control = match &spec.kind {
        FieldKind::Text | FieldKind::Password | FieldKind::Number => {
            let input_type = match spec.kind {
                FieldKind::Password => "password",
                FieldKind::Number => "number",
                _ => "text",
            };
            view! {
                <input
                    class="field__input"
                    type=input_type
                    prop:value=text
                    on:input=move |ev| set_text(event_target_value(&ev))
                />
            }
            .into_any()
        }
        FieldKind::TextArea => view! {
            <textarea
                class="field__input field__input--area"
                prop:value=text
                on:input=move |ev| set_text(event_target_value(&ev))
            ></textarea>
        }
        .into_any(),
        FieldKind::Checkbox => view! {
            <input
                class="field__checkbox"
                type="checkbox"
                prop:checked=move || form.with(|f| f.as_ref().is_some_and(|f| f.values.flag(key)))
                on:change=move |ev| {
                    let on = event_target_checked(&ev);
                    form.update(|f| {
                        if let Some(f) = f {
                            f.set_flag(key, on);
                        }
                    });
                }
            />
        }
        .into_any(),
        FieldKind::Select(options) => {
            let options = *options;
            view! {
                <select class="field__input" on:change=move |ev| set_text(event_target_value(&ev))>
                    <option value="" selected=move || text().is_empty()>"Select…"</option>
                    {options
                        .iter()
                        .map(|(value, label)| {
                            view! {
                                <option value=*value selected=move || text() == *value>{*label}</option>
                            }
                        })
                        .collect_view()}
                </select>
            }
            .into_any()
        }
        FieldKind::Reference(endpoint) => {
            let endpoint = *endpoint;
            let choices = move || {
                references.with(|r| {
                    r.get(endpoint)
                        .iter()
                        .map(|option| {
                            let value = option.value.clone();
                            let current = value.clone();
                            view! {
                                <option value=value selected=move || text() == current>
                                    {option.label.clone()}
                                </option>
                            }
                        })
                        .collect_view()
                })
            };
            view! {
                <select class="field__input" on:change=move |ev| set_text(event_target_value(&ev))>
                    <option value="" selected=move || text().is_empty()>"None"</option>
                    {choices}
                </select>
            }
            .into_any()
        }
    };

    view! {
        <label class="field">
            <span class="field__label">{spec.label}{spec.required.then_some(" *")}</span>
            {control}
            <Show when=move || error().is_some()>
                <span class="field__error">{move || error().unwrap_or_default()}</span>
            </Show>
        </label>
    }
}
