//! Editor state and the pointer protocol.
//!
//! SYSTEM CONTEXT
//! ==============
//! The layout page owns one [`Editor`] bound to its canvas. DOM pointer
//! events are forwarded here; the returned [`Action`]s tell the page what to
//! show (name prompt, edit panel, cursor) and when to re-render. Saving a
//! layout is two steps: [`EditorCore::layout_draft`] builds the body without
//! touching state, and [`EditorCore::mark_persisted`] runs once the server
//! accepted it. A [`DraftMark`] taken with the draft limits that cleanup to
//! the pending region and edit session the draft left out; work started
//! while the request was in flight survives.
//!
//! DESIGN
//! ======
//! - Annotations are an ordered list; at most one unsaved annotation exists
//!   and it is always last.
//! - An edit session holds the index under edit plus a pre-edit snapshot.
//!   Drawing is suspended while it is open.
//! - Deleting shifts indices; the edit session follows its annotation.

#[cfg(test)]
#[path = "editor_test.rs"]
mod editor_test;

use records::resources::{LayoutDraft, LayoutField};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::annotation::Annotation;
use crate::consts::{EDIT_STROKE, HANDLE_RADIUS_PX, MAX_DISPLAY_WIDTH};
use crate::geometry::{ImageFit, Point};
use crate::hit::{self, HitPart, apply_resize};
use crate::input::{Button, InputState};
use crate::render;

/// Actions returned from input and editing calls for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A region finished drawing and needs a name.
    RegionPending { index: usize },
    RegionSaved { index: usize },
    /// Geometry of the edited region changed.
    RegionChanged { index: usize },
    RegionDeleted { index: usize },
    EditStarted { index: usize, name: String, multiline: bool },
    EditApplied { index: usize },
    EditCancelled { index: usize },
    SetCursor(&'static str),
    RenderNeeded,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditorError {
    #[error("field name is required")]
    EmptyName,
    #[error("a field named `{0}` already exists")]
    DuplicateName(String),
    #[error("there is no region waiting for a name")]
    NoPendingRegion,
    #[error("region {0} has not been saved")]
    NotSaved(usize),
    #[error("no region at index {0}")]
    OutOfRange(usize),
    #[error("no region is being edited")]
    NotEditing,
    #[error("layout name is required")]
    EmptyLayoutName,
}

#[derive(Debug, Clone)]
struct EditSession {
    index: usize,
    snapshot: Annotation,
    serial: u64,
}

/// Which unsaved work a draft left out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DraftMark {
    pending: Option<u64>,
    edit: Option<u64>,
}

/// Core editor state: everything that doesn't depend on the canvas element.
///
/// Separated from [`Editor`] so it can be tested without a browser.
#[derive(Debug, Clone, Default)]
pub struct EditorCore {
    annotations: Vec<Annotation>,
    pub input: InputState,
    edit: Option<EditSession>,
    fit: Option<ImageFit>,
    /// Bumped for every new pending region and edit session.
    serial: u64,
    pending_serial: u64,
}

impl EditorCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Data inputs ---

    /// Fit a freshly uploaded image to the display width.
    pub fn set_image(&mut self, natural_width: f64, natural_height: f64) -> ImageFit {
        let fit = ImageFit::fit_to_width(natural_width, natural_height, MAX_DISPLAY_WIDTH);
        self.fit = Some(fit);
        fit
    }

    /// Use an explicit fit, e.g. the stored dimensions of an existing layout.
    pub fn set_fit(&mut self, fit: ImageFit) {
        self.fit = Some(fit);
    }

    /// Replace all regions with persisted fields. Any edit or gesture is dropped.
    pub fn load_regions(&mut self, fields: &[LayoutField]) {
        self.annotations = fields.iter().map(Annotation::from_field).collect();
        self.edit = None;
        self.input = InputState::Idle;
    }

    /// Drop every region.
    pub fn clear(&mut self) {
        self.load_regions(&[]);
    }

    // --- Queries ---

    #[must_use]
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    #[must_use]
    pub fn fit(&self) -> Option<ImageFit> {
        self.fit
    }

    /// The trailing unsaved annotation, if any.
    #[must_use]
    pub fn pending(&self) -> Option<&Annotation> {
        self.annotations.last().filter(|a| !a.saved)
    }

    /// Index under edit, if an edit session is open.
    #[must_use]
    pub fn editing(&self) -> Option<usize> {
        self.edit.as_ref().map(|e| e.index)
    }

    // --- Pointer protocol ---

    pub fn on_pointer_down(&mut self, p: Point, button: Button) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        let p = self.clamp(p);

        if let Some(index) = self.editing() {
            let rect = self.annotations[index].rect;
            self.input = match hit::hit_test(p, rect, HANDLE_RADIUS_PX) {
                Some(HitPart::ResizeHandle(anchor)) => InputState::Resizing {
                    anchor,
                    start: p,
                    orig: rect,
                },
                Some(HitPart::Body) => InputState::Moving { start: p, orig: rect },
                None => InputState::Idle,
            };
            return Vec::new();
        }

        self.discard_pending();
        self.pending_serial = self.next_serial();
        self.annotations.push(Annotation::pending(p));
        self.input = InputState::Drawing { anchor: p };
        vec![Action::RenderNeeded]
    }

    pub fn on_pointer_move(&mut self, p: Point) -> Vec<Action> {
        let p = self.clamp(p);
        match self.input {
            InputState::Idle => self.hover_cursor(p).into_iter().collect(),
            InputState::Drawing { anchor } => {
                if let Some(last) = self.annotations.last_mut() {
                    last.rect.width = p.x - anchor.x;
                    last.rect.height = p.y - anchor.y;
                }
                vec![Action::RenderNeeded]
            }
            InputState::Moving { start, orig } => {
                if let Some(index) = self.editing() {
                    let (dx, dy) = (p.x - start.x, p.y - start.y);
                    self.annotations[index].rect = match self.fit {
                        Some(fit) => fit.translate_within(orig, dx, dy),
                        None => orig.translated(dx, dy),
                    };
                }
                vec![Action::RenderNeeded]
            }
            InputState::Resizing { anchor, start, orig } => {
                if let Some(index) = self.editing() {
                    let rect = apply_resize(orig, anchor, p.x - start.x, p.y - start.y);
                    self.annotations[index].rect = self.fit.map_or(rect, |fit| fit.clamp_rect(rect));
                }
                vec![Action::RenderNeeded]
            }
        }
    }

    pub fn on_pointer_up(&mut self, p: Point, button: Button) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        let mut actions = self.on_pointer_move(p);
        let finished = std::mem::take(&mut self.input);
        match finished {
            InputState::Idle => {}
            InputState::Drawing { .. } => {
                actions.push(Action::RegionPending {
                    index: self.annotations.len().saturating_sub(1),
                });
            }
            InputState::Moving { .. } | InputState::Resizing { .. } => {
                if let Some(index) = self.editing() {
                    actions.push(Action::RegionChanged { index });
                }
            }
        }
        actions
    }

    // --- Pending region ---

    /// Name the trailing unsaved region and mark it saved.
    ///
    /// # Errors
    ///
    /// Fails without changing state when there is no pending region or the
    /// name is blank or already used.
    pub fn save_pending(&mut self, name: &str, multiline: bool) -> Result<Action, EditorError> {
        if self.pending().is_none() {
            return Err(EditorError::NoPendingRegion);
        }
        let index = self.annotations.len() - 1;
        let name = self.check_name(name, Some(index))?;
        self.annotations[index].seal(&name, multiline);
        Ok(Action::RegionSaved { index })
    }

    /// Remove the trailing unsaved region, if any. Returns whether one was removed.
    pub fn discard_pending(&mut self) -> bool {
        if self.pending().is_some() {
            self.annotations.pop();
            if matches!(self.input, InputState::Drawing { .. }) {
                self.input = InputState::Idle;
            }
            return true;
        }
        false
    }

    // --- Edit session ---

    /// Open an edit session on saved region `index`. An open session on
    /// another region is cancelled first.
    ///
    /// # Errors
    ///
    /// [`EditorError::OutOfRange`] or [`EditorError::NotSaved`].
    pub fn begin_edit(&mut self, index: usize) -> Result<Action, EditorError> {
        let target = self.annotations.get(index).ok_or(EditorError::OutOfRange(index))?;
        if !target.saved {
            return Err(EditorError::NotSaved(index));
        }
        if self.editing() == Some(index) {
            let a = &self.annotations[index];
            return Ok(Action::EditStarted {
                index,
                name: a.name.clone(),
                multiline: a.multiline,
            });
        }
        self.cancel_edit();
        let snapshot = self.annotations[index].clone();
        self.annotations[index].stroke = EDIT_STROKE;
        self.input = InputState::Idle;
        let action = Action::EditStarted {
            index,
            name: snapshot.name.clone(),
            multiline: snapshot.multiline,
        };
        let serial = self.next_serial();
        self.edit = Some(EditSession { index, snapshot, serial });
        Ok(action)
    }

    /// Rename the edited region; checked on [`apply_edit`](Self::apply_edit).
    ///
    /// # Errors
    ///
    /// [`EditorError::NotEditing`] without an open session.
    pub fn set_edit_name(&mut self, name: &str) -> Result<(), EditorError> {
        let index = self.editing().ok_or(EditorError::NotEditing)?;
        name.clone_into(&mut self.annotations[index].name);
        Ok(())
    }

    /// # Errors
    ///
    /// [`EditorError::NotEditing`] without an open session.
    pub fn set_edit_multiline(&mut self, multiline: bool) -> Result<(), EditorError> {
        let index = self.editing().ok_or(EditorError::NotEditing)?;
        self.annotations[index].multiline = multiline;
        Ok(())
    }

    /// Commit the edited region and close the session.
    ///
    /// # Errors
    ///
    /// Fails without closing the session when no session is open or the
    /// edited name is blank or already used.
    pub fn apply_edit(&mut self) -> Result<Action, EditorError> {
        let index = self.editing().ok_or(EditorError::NotEditing)?;
        let current = &self.annotations[index];
        let name = self.check_name(&current.name, Some(index))?;
        let multiline = current.multiline;
        self.annotations[index].seal(&name, multiline);
        self.edit = None;
        self.input = InputState::Idle;
        Ok(Action::EditApplied { index })
    }

    /// Restore the pre-edit snapshot and close the session. No-op without a session.
    pub fn cancel_edit(&mut self) -> Option<Action> {
        let session = self.edit.take()?;
        self.annotations[session.index] = session.snapshot;
        self.input = InputState::Idle;
        Some(Action::EditCancelled { index: session.index })
    }

    /// Delete region `index`. Deleting the edited region closes its session.
    ///
    /// # Errors
    ///
    /// [`EditorError::OutOfRange`].
    pub fn delete(&mut self, index: usize) -> Result<Action, EditorError> {
        if index >= self.annotations.len() {
            return Err(EditorError::OutOfRange(index));
        }
        self.annotations.remove(index);
        if let Some(session) = &mut self.edit {
            if session.index == index {
                self.edit = None;
                self.input = InputState::Idle;
            } else if session.index > index {
                session.index -= 1;
            }
        }
        if self.annotations.len() == index && matches!(self.input, InputState::Drawing { .. }) {
            self.input = InputState::Idle;
        }
        Ok(Action::RegionDeleted { index })
    }

    // --- Persistence ---

    /// Body for creating or updating the layout.
    ///
    /// Every saved region is included with normalized corners; the trailing
    /// unsaved region is left out and a region under edit contributes its
    /// pre-edit snapshot. State is not modified.
    ///
    /// # Errors
    ///
    /// [`EditorError::EmptyLayoutName`] for a blank name.
    pub fn layout_draft(&self, name: &str) -> Result<LayoutDraft, EditorError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(EditorError::EmptyLayoutName);
        }
        let fields = self
            .annotations
            .iter()
            .enumerate()
            .filter_map(|(i, a)| match &self.edit {
                Some(session) if session.index == i => Some(session.snapshot.to_field()),
                _ if a.saved => Some(a.to_field()),
                _ => None,
            })
            .collect();
        Ok(LayoutDraft {
            name: name.to_owned(),
            fields,
        })
    }

    /// Identify the unsaved work [`layout_draft`](Self::layout_draft) leaves out right now.
    #[must_use]
    pub fn draft_mark(&self) -> DraftMark {
        DraftMark {
            pending: self.pending().map(|_| self.pending_serial),
            edit: self.edit.as_ref().map(|e| e.serial),
        }
    }

    /// Bring state in line with what was just persisted: drop the unsaved
    /// region and roll back the edit session recorded in `mark`, if they are
    /// still the current ones.
    pub fn mark_persisted(&mut self, mark: DraftMark) {
        if mark.edit.is_some() && mark.edit == self.edit.as_ref().map(|e| e.serial) {
            self.cancel_edit();
        }
        if mark.pending.is_some() && mark.pending == self.pending().map(|_| self.pending_serial) {
            self.discard_pending();
            if matches!(self.input, InputState::Drawing { .. }) {
                self.input = InputState::Idle;
            }
        }
    }

    fn next_serial(&mut self) -> u64 {
        self.serial += 1;
        self.serial
    }

    // --- Helpers ---

    fn clamp(&self, p: Point) -> Point {
        self.fit.map_or(p, |fit| fit.clamp(p))
    }

    fn hover_cursor(&self, p: Point) -> Option<Action> {
        let index = self.editing()?;
        let cursor = match hit::hit_test(p, self.annotations[index].rect, HANDLE_RADIUS_PX) {
            Some(HitPart::ResizeHandle(anchor)) => anchor.cursor(),
            Some(HitPart::Body) => "move",
            None => "default",
        };
        Some(Action::SetCursor(cursor))
    }

    /// Trimmed `name` if non-empty and unused by any other saved region.
    fn check_name(&self, name: &str, except: Option<usize>) -> Result<String, EditorError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(EditorError::EmptyName);
        }
        let taken = self
            .annotations
            .iter()
            .enumerate()
            .any(|(i, a)| Some(i) != except && a.saved && a.name == name);
        if taken {
            return Err(EditorError::DuplicateName(name.to_owned()));
        }
        Ok(name.to_owned())
    }
}

/// Where the reference image comes from.
#[derive(Debug, Clone)]
pub enum Background {
    /// A raster upload or the stored layout image.
    Image(HtmlImageElement),
    /// A PDF's first page, rendered off-screen by the host.
    Canvas(HtmlCanvasElement),
}

/// The full editor. Wraps `EditorCore` and owns the browser canvas element.
pub struct Editor {
    canvas: HtmlCanvasElement,
    background: Option<Background>,
    pub core: EditorCore,
}

impl Editor {
    /// Create a new editor bound to the given canvas element.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        Self {
            canvas,
            background: None,
            core: EditorCore::new(),
        }
    }

    /// Show a new upload, fitted to the display width. Regions are kept.
    pub fn set_background(&mut self, background: Background, natural_width: f64, natural_height: f64) -> ImageFit {
        self.background = Some(background);
        let fit = self.core.set_image(natural_width, natural_height);
        self.resize_canvas(fit);
        fit
    }

    /// Show a stored image in the coordinate space its regions were drawn in.
    pub fn set_background_with_fit(&mut self, background: Background, fit: ImageFit) {
        self.background = Some(background);
        self.core.set_fit(fit);
        self.resize_canvas(fit);
    }

    fn resize_canvas(&self, fit: ImageFit) {
        let (width, height) = fit.display_size();
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    // --- Delegated input ---

    pub fn on_pointer_down(&mut self, p: Point, button: Button) -> Vec<Action> {
        self.core.on_pointer_down(p, button)
    }

    pub fn on_pointer_move(&mut self, p: Point) -> Vec<Action> {
        self.core.on_pointer_move(p)
    }

    pub fn on_pointer_up(&mut self, p: Point, button: Button) -> Vec<Action> {
        self.core.on_pointer_up(p, button)
    }

    // --- Render ---

    /// Draw the current state to the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the 2D context is unavailable or a draw call fails.
    pub fn render(&self) -> Result<(), JsValue> {
        let ctx = self
            .canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        let fit = self.core.fit();
        let (width, height) = fit.map_or_else(
            || (f64::from(self.canvas.width()), f64::from(self.canvas.height())),
            |f| (f.display_width, f.display_height),
        );
        render::draw(&ctx, &self.core, self.background.as_ref(), width, height)
    }
}
