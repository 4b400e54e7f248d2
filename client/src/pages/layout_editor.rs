//! Layout editor: upload a reference document, draw and name field regions,
//! save the layout and its image.
//!
//! SYSTEM CONTEXT
//! ==============
//! `/layout-editor` starts a new layout; `/document-layouts/:id` loads one.
//! The canvas [`Editor`] lives in a local `StoredValue` so pointer handlers,
//! side-panel buttons and async tasks all reach the same instance. Every
//! editor call goes through [`dispatch`], which folds the returned actions
//! into the [`LayoutPanel`] signal and redraws.
//!
//! ```text
//! pointer / panel button ──► dispatch ──► Editor ──actions──► LayoutPanel
//!                                            └──► render()
//! ```
//!
//! Saving writes the layout first and the image second, so a new layout has
//! an id to upload against. After the first save the page moves to the
//! layout's own route.

use layout::editor::{Action, Background, Editor, EditorError};
use layout::geometry::Point;
use layout::input::Button;
use leptos::prelude::*;
use leptos::reactive::owner::LocalStorage;
use leptos::task::spawn_local;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_params_map};
use records::resources::DocumentLayout;
use records::{ApiError, RecordId};

use crate::components::alert::{ErrorAlert, NoticeAlert};
use crate::net::api;
use crate::state::layout_panel::LayoutPanel;
#[cfg(feature = "csr")]
use crate::state::layout_panel::PendingUpload;

type EditorSlot = StoredValue<Option<Editor>, LocalStorage>;

#[cfg(feature = "csr")]
type UrlSlot = StoredValue<Option<gloo_file::ObjectUrl>, LocalStorage>;

/// Run `f` against the editor, fold its actions into `panel` and redraw.
///
/// A no-op until the canvas has mounted.
fn dispatch<F>(editor: EditorSlot, panel: RwSignal<LayoutPanel>, f: F)
where
    F: FnOnce(&mut Editor) -> Result<Vec<Action>, EditorError>,
{
    editor.update_value(|slot| {
        let Some(ed) = slot.as_mut() else {
            return;
        };
        let outcome = f(ed);
        let _ = panel.try_update(|p| {
            match &outcome {
                Ok(actions) => {
                    p.apply(actions);
                }
                Err(e) => p.editor_error(e),
            }
            p.sync(&ed.core);
        });
        if let Err(e) = ed.render() {
            leptos::logging::warn!("layout render failed: {e:?}");
        }
    });
}

fn pointer_point(ev: &leptos::ev::PointerEvent) -> Point {
    Point::new(f64::from(ev.offset_x()), f64::from(ev.offset_y()))
}

#[component]
pub fn LayoutEditorPage() -> impl IntoView {
    let params = use_params_map();
    let navigate = use_navigate();
    let panel = RwSignal::new(LayoutPanel::default());
    let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
    let editor: EditorSlot = StoredValue::new_local(None);
    #[cfg(feature = "csr")]
    let background_url: UrlSlot = StoredValue::new_local(None);

    let route_id = move || params.with(|p| p.get("id").and_then(|id| id.parse::<RecordId>().ok()));

    Effect::new(move || {
        let Some(canvas) = canvas_ref.get() else {
            return;
        };
        if editor.with_value(Option::is_some) {
            return;
        }
        editor.set_value(Some(Editor::new(canvas)));
        dispatch(editor, panel, |_| Ok(vec![Action::RenderNeeded]));
        if let Some(id) = route_id() {
            #[cfg(feature = "csr")]
            load_layout(id, editor, panel, background_url);
            #[cfg(not(feature = "csr"))]
            let _ = id;
        }
    });

    let on_pointer_down = move |ev: leptos::ev::PointerEvent| {
        ev.prevent_default();
        if let Some(canvas) = canvas_ref.get_untracked() {
            let _ = canvas.set_pointer_capture(ev.pointer_id());
        }
        let point = pointer_point(&ev);
        let button = Button::from_dom(ev.button());
        dispatch(editor, panel, |ed| Ok(ed.on_pointer_down(point, button)));
    };
    let on_pointer_move = move |ev: leptos::ev::PointerEvent| {
        let point = pointer_point(&ev);
        dispatch(editor, panel, |ed| Ok(ed.on_pointer_move(point)));
    };
    let on_pointer_up = move |ev: leptos::ev::PointerEvent| {
        let point = pointer_point(&ev);
        let button = Button::from_dom(ev.button());
        dispatch(editor, panel, |ed| Ok(ed.on_pointer_up(point, button)));
    };

    let on_file = move |ev: leptos::ev::Event| {
        #[cfg(feature = "csr")]
        {
            use wasm_bindgen::JsCast;
            let file = ev
                .target()
                .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
                .and_then(|input| input.files())
                .and_then(|files| files.get(0));
            if let Some(file) = file {
                upload_file(file, editor, panel, background_url);
            }
        }
        #[cfg(not(feature = "csr"))]
        let _ = ev;
    };

    let on_save = move |_| save_layout(editor, panel, navigate.clone());

    view! {
        <section class="layout-editor">
            <header class="page-header">
                <h1>{move || if route_id().is_some() { "Edit layout" } else { "New layout" }}</h1>
                <span class="page-header__spacer"></span>
                <input
                    class="field__input layout-editor__name"
                    type="text"
                    placeholder="Layout name"
                    prop:value=move || panel.with(|p| p.layout_name.clone())
                    on:input=move |ev| panel.update(|p| p.layout_name = event_target_value(&ev))
                />
                <label class="btn layout-editor__upload">
                    "Upload image or PDF"
                    <input type="file" accept="image/*,application/pdf" hidden=true on:change=on_file/>
                </label>
                <button
                    class="btn btn--primary"
                    disabled=move || panel.with(|p| p.saving || p.loading)
                    on:click=on_save
                >
                    {move || if panel.with(|p| p.saving) { "Saving…" } else { "Save layout" }}
                </button>
            </header>
            <ErrorAlert message=Signal::derive(move || panel.with(|p| p.error.clone()))/>
            <NoticeAlert message=Signal::derive(move || panel.with(|p| p.notice.clone()))/>
            <div class="layout-editor__body">
                <div class="layout-editor__stage">
                    <Show when=move || panel.with(|p| p.loading)>
                        <div class="layout-editor__loading">"Loading…"</div>
                    </Show>
                    <Show when=move || panel.with(|p| !p.has_image && !p.loading)>
                        <div class="layout-editor__hint">"Upload a scanned document to draw regions on."</div>
                    </Show>
                    <canvas
                        class="layout-editor__canvas"
                        node_ref=canvas_ref
                        width="900"
                        height="600"
                        style:cursor=move || panel.with(|p| p.cursor)
                        on:pointerdown=on_pointer_down
                        on:pointermove=on_pointer_move
                        on:pointerup=on_pointer_up
                        on:contextmenu=move |ev: leptos::ev::MouseEvent| ev.prevent_default()
                    >
                        "Your browser does not support canvas."
                    </canvas>
                </div>
                <aside class="layout-editor__panel">
                    <NamePromptView editor=editor panel=panel/>
                    <EditPanelView editor=editor panel=panel/>
                    <RegionList editor=editor panel=panel/>
                </aside>
            </div>
        </section>
    }
}

/// Name entry for the region that just finished drawing.
#[component]
fn NamePromptView(editor: EditorSlot, panel: RwSignal<LayoutPanel>) -> impl IntoView {
    let save = move || {
        let Some(prompt) = panel.with_untracked(|p| p.prompt.clone()) else {
            return;
        };
        dispatch(editor, panel, |ed| {
            ed.core.save_pending(&prompt.name, prompt.multiline).map(|a| vec![a])
        });
    };
    let discard = move |_| {
        dispatch(editor, panel, |ed| {
            ed.core.discard_pending();
            Ok(vec![Action::RenderNeeded])
        });
    };

    view! {
        <Show when=move || panel.with(|p| p.prompt.is_some())>
            <div class="layout-panel layout-panel--prompt">
                <h3>"New region"</h3>
                <input
                    class="field__input"
                    type="text"
                    placeholder="Field name"
                    autofocus=true
                    prop:value=move || panel.with(|p| p.prompt.as_ref().map(|pr| pr.name.clone()).unwrap_or_default())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        panel.update(|p| {
                            if let Some(prompt) = &mut p.prompt {
                                prompt.name = value;
                            }
                        });
                    }
                    on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                        if ev.key() == "Enter" {
                            save();
                        }
                    }
                />
                <label class="field field--inline">
                    <input
                        type="checkbox"
                        prop:checked=move || panel.with(|p| p.prompt.as_ref().is_some_and(|pr| pr.multiline))
                        on:change=move |ev| {
                            let on = event_target_checked(&ev);
                            panel.update(|p| {
                                if let Some(prompt) = &mut p.prompt {
                                    prompt.multiline = on;
                                }
                            });
                        }
                    />
                    "Multiline"
                </label>
                <div class="dialog__actions">
                    <button class="btn" on:click=discard>
                        "Discard"
                    </button>
                    <button class="btn btn--primary" on:click=move |_| save()>
                        "Save region"
                    </button>
                </div>
            </div>
        </Show>
    }
}

/// Attributes of the region under edit. Geometry is edited on the canvas.
#[component]
fn EditPanelView(editor: EditorSlot, panel: RwSignal<LayoutPanel>) -> impl IntoView {
    let apply = move |_| dispatch(editor, panel, |ed| ed.core.apply_edit().map(|a| vec![a]));
    let cancel = move |_| dispatch(editor, panel, |ed| Ok(ed.core.cancel_edit().into_iter().collect()));

    view! {
        <Show when=move || panel.with(|p| p.edit.is_some())>
            <div class="layout-panel layout-panel--edit">
                <h3>"Edit region"</h3>
                <input
                    class="field__input"
                    type="text"
                    prop:value=move || panel.with(|p| p.edit.as_ref().map(|e| e.name.clone()).unwrap_or_default())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        panel.update(|p| {
                            if let Some(edit) = &mut p.edit {
                                edit.name.clone_from(&value);
                            }
                        });
                        dispatch(editor, panel, |ed| {
                            ed.core.set_edit_name(&value)?;
                            Ok(Vec::new())
                        });
                    }
                />
                <label class="field field--inline">
                    <input
                        type="checkbox"
                        prop:checked=move || panel.with(|p| p.edit.as_ref().is_some_and(|e| e.multiline))
                        on:change=move |ev| {
                            let on = event_target_checked(&ev);
                            panel.update(|p| {
                                if let Some(edit) = &mut p.edit {
                                    edit.multiline = on;
                                }
                            });
                            dispatch(editor, panel, |ed| {
                                ed.core.set_edit_multiline(on)?;
                                Ok(Vec::new())
                            });
                        }
                    />
                    "Multiline"
                </label>
                <p class="layout-panel__hint">"Drag the region to move it, or a corner handle to resize."</p>
                <div class="dialog__actions">
                    <button class="btn" on:click=cancel>
                        "Cancel"
                    </button>
                    <button class="btn btn--primary" on:click=apply>
                        "Apply"
                    </button>
                </div>
            </div>
        </Show>
    }
}

#[component]
fn RegionList(editor: EditorSlot, panel: RwSignal<LayoutPanel>) -> impl IntoView {
    let rows = move || {
        panel
            .with(|p| p.regions.clone())
            .into_iter()
            .filter(|r| r.saved)
            .map(|region| {
                let index = region.index;
                let editing = move || panel.with(|p| p.edit.as_ref().is_some_and(|e| e.index == index));
                view! {
                    <li class="region-list__item" class:region-list__item--editing=editing>
                        <span class="region-list__name">{region.name}</span>
                        {region.multiline.then(|| view! { <span class="badge">"multiline"</span> })}
                        <button
                            class="btn btn--small"
                            on:click=move |_| dispatch(editor, panel, |ed| ed.core.begin_edit(index).map(|a| vec![a]))
                        >
                            "Edit"
                        </button>
                        <button
                            class="btn btn--small btn--danger"
                            on:click=move |_| dispatch(editor, panel, |ed| ed.core.delete(index).map(|a| vec![a]))
                        >
                            "Delete"
                        </button>
                    </li>
                }
            })
            .collect_view()
    };

    view! {
        <div class="layout-panel">
            <h3>{move || format!("Regions ({})", panel.with(LayoutPanel::saved_count))}</h3>
            <ul class="region-list">{rows}</ul>
        </div>
    }
}

/// Persist the layout, then its pending image upload.
fn save_layout<N>(editor: EditorSlot, panel: RwSignal<LayoutPanel>, navigate: N)
where
    N: Fn(&str, NavigateOptions) + 'static,
{
    if panel.with_untracked(|p| p.saving) {
        return;
    }
    let name = panel.with_untracked(|p| p.layout_name.clone());
    let Some(prepared) = editor.with_value(|slot| {
        slot.as_ref()
            .map(|ed| ed.core.layout_draft(&name).map(|draft| (draft, ed.core.fit(), ed.core.draft_mark())))
    }) else {
        return;
    };
    let (draft, fit, mark) = match prepared {
        Ok(prepared) => prepared,
        Err(e) => {
            panel.update(|p| p.editor_error(&e));
            return;
        }
    };

    let (id, upload) = panel.with_untracked(|p| (p.layout_id, p.upload.clone()));
    let (width, height) = fit.map(|f| f.display_size()).unzip();
    let body = DocumentLayout {
        id,
        name: draft.name,
        fields: draft.fields,
        width,
        height,
    };
    panel.update(|p| {
        p.saving = true;
        p.error = None;
        p.notice = None;
    });

    spawn_local(async move {
        let saved = match id {
            Some(id) => api::update::<_, serde_json::Value>(&DocumentLayout::item_path(id), &body)
                .await
                .map(|_| id),
            None => api::create::<_, DocumentLayout>(DocumentLayout::ENDPOINT, &body)
                .await
                .and_then(|echo| {
                    echo.and_then(|layout| layout.id)
                        .ok_or_else(|| ApiError::Decode("the server did not return the new layout id".to_owned()))
                }),
        };
        let saved_id = match saved {
            Ok(saved_id) => saved_id,
            Err(e) => {
                let _ = panel.try_update(|p| {
                    p.saving = false;
                    p.error = Some(e.user_message());
                });
                return;
            }
        };

        dispatch(editor, panel, |ed| {
            ed.core.mark_persisted(mark);
            Ok(vec![Action::RenderNeeded])
        });
        let _ = panel.try_update(|p| p.layout_id = Some(saved_id));

        let uploaded = match &upload {
            Some(file) => api::upload_layout_image(saved_id, &file.bytes, &file.content_type).await,
            None => Ok(()),
        };
        let _ = panel.try_update(|p| {
            p.saving = false;
            match uploaded {
                Ok(()) => {
                    p.upload = None;
                    p.notice = Some("Layout saved.".to_owned());
                }
                Err(e) => p.error = Some(format!("Layout saved, but the image upload failed: {}", e.user_message())),
            }
        });

        if id.is_none() {
            navigate(
                &format!("/document-layouts/{saved_id}"),
                NavigateOptions {
                    replace: true,
                    ..NavigateOptions::default()
                },
            );
        }
    });
}

/// Fetch a stored layout, show its regions, then its image.
#[cfg(feature = "csr")]
fn load_layout(id: RecordId, editor: EditorSlot, panel: RwSignal<LayoutPanel>, background_url: UrlSlot) {
    panel.update(|p| {
        p.loading = true;
        p.layout_id = Some(id);
    });
    spawn_local(async move {
        let layout = match api::fetch_one::<DocumentLayout>(&DocumentLayout::item_path(id)).await {
            Ok(layout) => layout,
            Err(e) => {
                let _ = panel.try_update(|p| {
                    p.loading = false;
                    p.error = Some(e.user_message());
                });
                return;
            }
        };
        let _ = panel.try_update(|p| p.layout_name.clone_from(&layout.name));
        dispatch(editor, panel, |ed| {
            ed.core.load_regions(&layout.fields);
            Ok(vec![Action::RenderNeeded])
        });

        match api::fetch_layout_image(id).await {
            Ok(image) => match crate::util::image::load_image(&image.bytes, &image.content_type).await {
                Ok(loaded) => {
                    let fit = crate::util::image::stored_fit(
                        loaded.natural_width,
                        loaded.natural_height,
                        (image.width, image.height),
                        (layout.width, layout.height),
                    );
                    let background = Background::Image(loaded.element);
                    background_url.set_value(Some(loaded.url));
                    dispatch(editor, panel, |ed| {
                        ed.set_background_with_fit(background, fit);
                        Ok(vec![Action::RenderNeeded])
                    });
                    let _ = panel.try_update(|p| p.has_image = true);
                }
                Err(e) => {
                    let _ = panel.try_update(|p| p.error = Some(format!("Stored image could not be shown: {e}")));
                }
            },
            Err(ApiError::Status { status: 404, .. }) => {
                let _ = panel.try_update(|p| p.notice = Some("No reference image stored for this layout.".to_owned()));
            }
            Err(e) => {
                let _ = panel.try_update(|p| p.error = Some(e.user_message()));
            }
        }
        let _ = panel.try_update(|p| p.loading = false);
    });
}

/// Read a chosen file, show it as the background and queue it for upload.
#[cfg(feature = "csr")]
fn upload_file(file: web_sys::File, editor: EditorSlot, panel: RwSignal<LayoutPanel>, background_url: UrlSlot) {
    use crate::util::upload::{UploadKind, classify, upload_content_type};

    let file_name = file.name();
    let mime = file.type_();
    let kind = classify(&file_name, &mime);
    if kind == UploadKind::Unsupported {
        panel.update(|p| p.error = Some(format!("{file_name} is not an image or a PDF.")));
        return;
    }
    panel.update(|p| {
        p.loading = true;
        p.error = None;
        p.notice = None;
    });

    spawn_local(async move {
        let file = gloo_file::File::from(file);
        let bytes = match gloo_file::futures::read_as_bytes(&file).await {
            Ok(bytes) => bytes,
            Err(e) => {
                let _ = panel.try_update(|p| {
                    p.loading = false;
                    p.error = Some(format!("Could not read {file_name}: {e}"));
                });
                return;
            }
        };

        let shown = if kind == UploadKind::Pdf {
            crate::util::pdf::render_first_page(&bytes).await.map(|canvas| {
                let (w, h) = (f64::from(canvas.width()), f64::from(canvas.height()));
                (Background::Canvas(canvas), w, h, None)
            })
        } else {
            crate::util::image::load_image(&bytes, &mime)
                .await
                .map(|img| (Background::Image(img.element), img.natural_width, img.natural_height, Some(img.url)))
        };

        match shown {
            Ok((background, width, height, url)) => {
                background_url.set_value(url);
                dispatch(editor, panel, |ed| {
                    ed.set_background(background, width, height);
                    Ok(vec![Action::RenderNeeded])
                });
                let content_type = upload_content_type(kind, &mime);
                let _ = panel.try_update(|p| {
                    p.loading = false;
                    p.has_image = true;
                    p.upload = Some(PendingUpload {
                        file_name,
                        content_type,
                        bytes,
                    });
                });
            }
            Err(e) => {
                let _ = panel.try_update(|p| {
                    p.loading = false;
                    p.error = Some(format!("Could not display {file_name}: {e}"));
                });
            }
        }
    });
}
