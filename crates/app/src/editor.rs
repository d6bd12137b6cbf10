//! Modal button editor dialog.
//!
//! Edits one slot's descriptor as a whole: title, action kind, and value.
//! Save validates that both title and value are non-empty (after
//! trimming) and keeps the dialog open with an inline warning otherwise;
//! Clear empties the slot. Either closes the dialog.

use eframe::egui;
use quickdeck_core::{ActionKind, ButtonDescriptor};

/// What the user chose when the dialog closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorOutcome {
    Save(ButtonDescriptor),
    Clear,
    Cancel,
}

pub struct EditorState {
    pub tab: usize,
    pub slot: usize,
    title: String,
    kind: ActionKind,
    value: String,
    warning: Option<&'static str>,
}

impl EditorState {
    pub fn new(tab: usize, slot: usize, current: Option<&ButtonDescriptor>) -> Self {
        Self {
            tab,
            slot,
            title: current.map(|d| d.title.clone()).unwrap_or_default(),
            kind: current.map(|d| d.kind).unwrap_or(ActionKind::Url),
            value: current.map(|d| d.value.clone()).unwrap_or_default(),
            warning: None,
        }
    }

    /// Builds the descriptor from the current fields, or explains why it
    /// is invalid.
    fn build_descriptor(&self) -> Result<ButtonDescriptor, &'static str> {
        let title = self.title.trim();
        let value = self.value.trim();
        if title.is_empty() || value.is_empty() {
            return Err("Title and value must not be empty");
        }
        Ok(ButtonDescriptor {
            title: title.to_string(),
            kind: self.kind,
            value: value.to_string(),
        })
    }

    fn browse(&mut self) {
        let picked = match self.kind {
            ActionKind::Folder => rfd::FileDialog::new().pick_folder(),
            ActionKind::File => rfd::FileDialog::new().pick_file(),
            _ => None,
        };
        if let Some(path) = picked {
            self.value = path.display().to_string();
        }
    }

    /// Draws the dialog for one frame. Returns `Some` once the user has
    /// committed (or dismissed) it.
    pub fn show(&mut self, ctx: &egui::Context) -> Option<EditorOutcome> {
        let mut outcome = None;
        let mut keep_open = true;

        egui::Window::new("Configure Button")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .open(&mut keep_open)
            .show(ctx, |ui| {
                ui.label("Title:");
                ui.add(
                    egui::TextEdit::singleline(&mut self.title)
                        .hint_text("Button title")
                        .desired_width(320.0),
                );
                ui.add_space(8.0);

                ui.label("Action:");
                ui.horizontal(|ui| {
                    for kind in [
                        ActionKind::Url,
                        ActionKind::Folder,
                        ActionKind::File,
                        ActionKind::Clipboard,
                    ] {
                        ui.radio_value(&mut self.kind, kind, kind.label());
                    }
                });
                ui.add_space(8.0);

                ui.label("Path / URL / text:");
                match self.kind {
                    ActionKind::Clipboard => {
                        ui.add(
                            egui::TextEdit::multiline(&mut self.value)
                                .desired_rows(6)
                                .desired_width(320.0),
                        );
                    }
                    ActionKind::Folder | ActionKind::File => {
                        ui.horizontal(|ui| {
                            ui.add(
                                egui::TextEdit::singleline(&mut self.value).desired_width(250.0),
                            );
                            if ui.button("Browse…").clicked() {
                                self.browse();
                            }
                        });
                    }
                    ActionKind::Url => {
                        ui.add(
                            egui::TextEdit::singleline(&mut self.value)
                                .hint_text("example.com")
                                .desired_width(320.0),
                        );
                    }
                }

                if let Some(warning) = self.warning {
                    ui.add_space(6.0);
                    ui.colored_label(ui.visuals().warn_fg_color, warning);
                }

                ui.add_space(12.0);
                ui.horizontal(|ui| {
                    if ui.button("Clear slot").clicked() {
                        outcome = Some(EditorOutcome::Clear);
                    }
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                        if ui.button("Save").clicked() {
                            match self.build_descriptor() {
                                Ok(descriptor) => {
                                    outcome = Some(EditorOutcome::Save(descriptor))
                                }
                                Err(warning) => self.warning = Some(warning),
                            }
                        }
                    });
                });
            });

        if !keep_open && outcome.is_none() {
            outcome = Some(EditorOutcome::Cancel);
        }
        outcome
    }
}
