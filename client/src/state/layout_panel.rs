//! Side-panel state of the layout editor page.
//!
//! The canvas editor reports what happened as [`Action`]s; this folds them
//! into what the page shows: the name prompt for a fresh region, the edit
//! panel, the region list, the cursor and the save status.

#[cfg(test)]
#[path = "layout_panel_test.rs"]
mod layout_panel_test;

use layout::editor::{Action, EditorCore, EditorError};
use layout::input::InputState;
use records::RecordId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionSummary {
    pub index: usize,
    pub name: String,
    pub multiline: bool,
    pub saved: bool,
}

/// Name entry for the region that just finished drawing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamePrompt {
    pub index: usize,
    pub name: String,
    pub multiline: bool,
}

/// Attributes of the region under edit, as typed so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditPanel {
    pub index: usize,
    pub name: String,
    pub multiline: bool,
}

/// File chosen by the user, uploaded after the layout itself is saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutPanel {
    pub layout_id: Option<RecordId>,
    pub layout_name: String,
    pub regions: Vec<RegionSummary>,
    pub prompt: Option<NamePrompt>,
    pub edit: Option<EditPanel>,
    pub cursor: &'static str,
    pub error: Option<String>,
    pub notice: Option<String>,
    pub loading: bool,
    pub saving: bool,
    pub has_image: bool,
    pub upload: Option<PendingUpload>,
}

impl Default for LayoutPanel {
    fn default() -> Self {
        Self {
            layout_id: None,
            layout_name: String::new(),
            regions: Vec::new(),
            prompt: None,
            edit: None,
            cursor: "crosshair",
            error: None,
            notice: None,
            loading: false,
            saving: false,
            has_image: false,
            upload: None,
        }
    }
}

impl LayoutPanel {
    /// Fold editor actions. Returns whether the canvas needs a redraw.
    pub fn apply(&mut self, actions: &[Action]) -> bool {
        let mut render = false;
        for action in actions {
            match action {
                Action::RegionPending { index } => {
                    self.prompt = Some(NamePrompt {
                        index: *index,
                        name: String::new(),
                        multiline: false,
                    });
                    render = true;
                }
                Action::RegionSaved { .. } => {
                    self.prompt = None;
                    self.error = None;
                    render = true;
                }
                Action::RegionChanged { .. } | Action::RenderNeeded => render = true,
                Action::RegionDeleted { index } => {
                    if self.prompt.as_ref().is_some_and(|p| p.index == *index) {
                        self.prompt = None;
                    }
                    if let Some(edit) = &mut self.edit {
                        if edit.index > *index {
                            edit.index -= 1;
                        } else if edit.index == *index {
                            self.edit = None;
                        }
                    }
                    render = true;
                }
                Action::EditStarted { index, name, multiline } => {
                    self.edit = Some(EditPanel {
                        index: *index,
                        name: name.clone(),
                        multiline: *multiline,
                    });
                    render = true;
                }
                Action::EditApplied { .. } | Action::EditCancelled { .. } => {
                    self.edit = None;
                    self.cursor = "crosshair";
                    self.error = None;
                    render = true;
                }
                Action::SetCursor(cursor) => self.cursor = cursor,
            }
        }
        render
    }

    /// Refresh the region list and drop panels the editor no longer backs.
    pub fn sync(&mut self, core: &EditorCore) {
        self.regions = core
            .annotations()
            .iter()
            .enumerate()
            .map(|(index, a)| RegionSummary {
                index,
                name: a.name.clone(),
                multiline: a.multiline,
                saved: a.saved,
            })
            .collect();

        let pending = core.annotations().len().checked_sub(1).filter(|_| core.pending().is_some());
        let drawing = matches!(core.input, InputState::Drawing { .. });
        if drawing || self.prompt.as_ref().map(|p| p.index) != pending {
            self.prompt = None;
        }
        if self.edit.as_ref().map(|e| e.index) != core.editing() {
            self.edit = None;
        }
        if self.edit.is_none() {
            self.cursor = "crosshair";
        }
    }

    pub fn editor_error(&mut self, error: &EditorError) {
        self.error = Some(error.to_string());
    }

    /// Saved regions, for the "nothing to save" hint.
    #[must_use]
    pub fn saved_count(&self) -> usize {
        self.regions.iter().filter(|r| r.saved).count()
    }
}
