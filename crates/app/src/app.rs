//! Application controller: owns the workspace, wires the grid renderer to
//! the drag recognizer, and routes dialog/menu/keyboard events.

use std::time::{Duration, Instant};

use eframe::egui;
use quickdeck_core::{
    dispatch, ActionKind, ButtonDescriptor, ConfigStore, DragTracker, Dispatched, Gesture,
    SlotMap, SlotRect, Workspace, SLOT_COUNT,
};

use crate::bridge::DesktopBridge;
use crate::editor::{EditorOutcome, EditorState};

const GRID_COLUMNS: usize = 2;
const GRID_ROWS: usize = SLOT_COUNT / GRID_COLUMNS;
const CELL_SIZE: egui::Vec2 = egui::vec2(280.0, 64.0);
const CELL_SPACING: f32 = 14.0;
const TOAST_DURATION: Duration = Duration::from_millis(1500);

const HINT: &str =
    "Hold and drag to swap slots  |  double-click a tab to rename  |  right-click to edit";

pub struct QuickDeckApp {
    workspace: Workspace,
    store: ConfigStore,
    bridge: DesktopBridge,

    selected_tab: usize,

    // Gesture state: the tracker persists across frames, the slot map is
    // rebuilt from the rectangles rendered this frame.
    tracker: DragTracker,
    slot_map: SlotMap,

    // Dialogs
    editor: Option<EditorState>,
    rename: Option<RenameState>,
    message: Option<MessageDialog>,
    toast: Option<Toast>,
}

struct RenameState {
    tab: usize,
    name: String,
}

struct MessageDialog {
    severity: Severity,
    message: String,
}

#[derive(Clone, Copy, PartialEq)]
enum Severity {
    Error,
    Info,
}

impl Severity {
    fn icon(&self) -> &'static str {
        match self {
            Severity::Error => "❌",
            Severity::Info => "ℹ",
        }
    }

    fn title(&self) -> &'static str {
        match self {
            Severity::Error => "Error",
            Severity::Info => "Notice",
        }
    }
}

struct Toast {
    message: String,
    expires_at: Instant,
}

impl QuickDeckApp {
    pub fn new(store: ConfigStore) -> Self {
        let workspace = store.load();
        Self {
            workspace,
            store,
            bridge: DesktopBridge,
            selected_tab: 0,
            tracker: DragTracker::default(),
            slot_map: SlotMap::default(),
            editor: None,
            rename: None,
            message: None,
            toast: None,
        }
    }

    fn modal_open(&self) -> bool {
        self.editor.is_some() || self.rename.is_some() || self.message.is_some()
    }

    fn show_message(&mut self, severity: Severity, message: impl Into<String>) {
        self.message = Some(MessageDialog {
            severity,
            message: message.into(),
        });
    }

    /// Best-effort persistence: failures are logged, never surfaced.
    fn autosave(&self) {
        if let Err(e) = self.store.save(&self.workspace) {
            tracing::warn!(path = %self.store.path().display(), error = %e, "autosave failed");
        }
    }

    fn save_now(&self) {
        self.autosave();
        tracing::info!(path = %self.store.path().display(), "configuration saved");
    }

    fn import_config(&mut self) {
        let Some(path) = rfd::FileDialog::new().add_filter("JSON", &["json"]).pick_file() else {
            return;
        };
        match self.store.import(&path) {
            Ok(workspace) => {
                self.workspace = workspace;
                self.selected_tab = 0;
                self.autosave();
                self.show_message(Severity::Info, "Configuration imported");
            }
            Err(e) => self.show_message(Severity::Error, format!("Import failed: {e}")),
        }
    }

    fn export_config(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .set_file_name("quickdeck.json")
            .save_file()
        else {
            return;
        };
        match self.store.export(&path, &self.workspace) {
            Ok(()) => self.show_message(Severity::Info, "Configuration exported"),
            Err(e) => self.show_message(Severity::Error, format!("Export failed: {e}")),
        }
    }

    fn run_action(&mut self, descriptor: &ButtonDescriptor) {
        match dispatch(descriptor, &mut self.bridge) {
            Ok(Dispatched::Copied) => {
                self.toast = Some(Toast {
                    message: "✓ Copied to clipboard".to_string(),
                    expires_at: Instant::now() + TOAST_DURATION,
                });
            }
            Ok(Dispatched::Opened) => {}
            Err(e) => self.show_message(Severity::Error, e.to_string()),
        }
    }

    fn apply_gesture(&mut self, gesture: Gesture) {
        match gesture {
            Gesture::Click { tab, slot } => {
                // Empty slots produce no action.
                if let Some(descriptor) = self.workspace.slot(tab, slot).cloned() {
                    self.run_action(&descriptor);
                }
            }
            Gesture::Swap {
                tab,
                source,
                target,
            } => {
                self.workspace.swap_slots(tab, source, target);
                self.autosave();
            }
        }
    }
}

impl eframe::App for QuickDeckApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Import can shrink the tab list out from under the selection.
        if self.selected_tab >= self.workspace.tabs.len() {
            self.selected_tab = 0;
        }

        if ctx.input(|i| i.viewport().close_requested()) {
            self.save_now();
        }

        self.handle_keyboard_shortcuts(ctx);
        self.draw_menu_bar(ctx);
        self.draw_tab_strip(ctx);
        self.draw_grid(ctx);
        self.handle_grid_pointer(ctx);
        self.draw_editor_dialog(ctx);
        self.draw_rename_dialog(ctx);
        self.draw_message_dialog(ctx);
        self.draw_toast(ctx);
    }
}

impl QuickDeckApp {
    fn handle_keyboard_shortcuts(&mut self, ctx: &egui::Context) {
        let modifiers = ctx.input(|i| i.modifiers);
        let cmd_or_ctrl = modifiers.command || modifiers.ctrl;

        let (save, escape) = ctx.input(|i| {
            (
                cmd_or_ctrl && i.key_pressed(egui::Key::S),
                i.key_pressed(egui::Key::Escape),
            )
        });

        if save {
            self.save_now();
        }

        if escape {
            if self.message.is_some() {
                self.message = None;
            } else if self.rename.is_some() {
                self.rename = None;
            } else if self.editor.is_some() {
                self.editor = None;
            }
        }
    }

    fn draw_menu_bar(&mut self, ctx: &egui::Context) {
        let enabled = !self.modal_open();
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.add_enabled_ui(enabled, |ui| {
                    ui.menu_button("File", |ui| {
                        if ui.button("Save    Ctrl+S").clicked() {
                            self.save_now();
                            ui.close_menu();
                        }
                        ui.separator();
                        if ui.button("Import…").clicked() {
                            self.import_config();
                            ui.close_menu();
                        }
                        if ui.button("Export…").clicked() {
                            self.export_config();
                            ui.close_menu();
                        }
                    });
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.weak(HINT);
                });
            });
        });
    }

    fn draw_tab_strip(&mut self, ctx: &egui::Context) {
        let enabled = !self.modal_open();
        egui::TopBottomPanel::top("tab_strip").show(ctx, |ui| {
            ui.add_space(2.0);
            let mut select = None;
            let mut rename = None;

            ui.add_enabled_ui(enabled, |ui| {
                ui.horizontal_wrapped(|ui| {
                    for (idx, tab) in self.workspace.tabs.iter().enumerate() {
                        let response = ui.selectable_label(idx == self.selected_tab, &tab.name);
                        if response.clicked() {
                            select = Some(idx);
                        }
                        if response.double_clicked() {
                            rename = Some((idx, tab.name.clone()));
                        }
                    }
                });
            });
            ui.add_space(2.0);

            if let Some(idx) = select {
                self.selected_tab = idx;
            }
            if let Some((tab, name)) = rename {
                self.tracker.cancel();
                self.rename = Some(RenameState { tab, name });
            }
        });
    }

    fn draw_grid(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            self.slot_map.clear();

            let Some(tab) = self.workspace.tabs.get(self.selected_tab) else {
                return;
            };

            let grid_width = GRID_COLUMNS as f32 * CELL_SIZE.x
                + (GRID_COLUMNS - 1) as f32 * CELL_SPACING;
            let grid_height =
                GRID_ROWS as f32 * CELL_SIZE.y + (GRID_ROWS - 1) as f32 * CELL_SPACING;
            let available = ui.available_size();
            let padding_x = ((available.x - grid_width) / 2.0).max(0.0);
            let padding_y = ((available.y - grid_height) / 2.0).max(0.0);

            let modal = self.modal_open();
            let mut open_editor = None;

            ui.add_space(padding_y);
            for row in 0..GRID_ROWS {
                ui.horizontal(|ui| {
                    ui.add_space(padding_x);
                    for col in 0..GRID_COLUMNS {
                        let slot = row * GRID_COLUMNS + col;
                        let descriptor = tab.buttons.get(slot).and_then(|b| b.as_ref());

                        let (rect, response) =
                            ui.allocate_exact_size(CELL_SIZE, egui::Sense::click());
                        paint_slot(ui, rect, descriptor);

                        self.slot_map.insert(
                            slot,
                            SlotRect {
                                min_x: rect.min.x,
                                min_y: rect.min.y,
                                max_x: rect.max.x,
                                max_y: rect.max.y,
                            },
                        );

                        if !modal {
                            if response.secondary_clicked() {
                                open_editor = Some(slot);
                            }
                            if let Some(descriptor) = descriptor {
                                response.on_hover_text(&descriptor.value);
                            }
                        }

                        if col + 1 < GRID_COLUMNS {
                            ui.add_space(CELL_SPACING);
                        }
                    }
                });
                if row + 1 < GRID_ROWS {
                    ui.add_space(CELL_SPACING);
                }
            }

            if let Some(slot) = open_editor {
                self.tracker.cancel();
                let current = self.workspace.slot(self.selected_tab, slot);
                self.editor = Some(EditorState::new(self.selected_tab, slot, current));
            }
        });
    }

    /// Feeds raw pointer events to the drag recognizer against this
    /// frame's slot map. Skipped entirely while a dialog is up.
    fn handle_grid_pointer(&mut self, ctx: &egui::Context) {
        if self.modal_open() {
            self.tracker.cancel();
            return;
        }

        let (pressed, released, pos) = ctx.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
                i.pointer.interact_pos(),
            )
        });

        let gesture = feed_pointer_frame(
            &mut self.tracker,
            &self.slot_map,
            self.selected_tab,
            pressed,
            released,
            pos.map(|p| (p.x, p.y)),
        );

        if self.tracker.is_dragging() {
            ctx.output_mut(|o| o.cursor_icon = egui::CursorIcon::Grabbing);
        }

        if let Some(gesture) = gesture {
            self.apply_gesture(gesture);
        }
    }

    fn draw_editor_dialog(&mut self, ctx: &egui::Context) {
        let Some(editor) = &mut self.editor else {
            return;
        };
        let outcome = editor.show(ctx);
        let (tab, slot) = (editor.tab, editor.slot);

        match outcome {
            None => {}
            Some(EditorOutcome::Save(descriptor)) => {
                self.workspace.set_slot(tab, slot, Some(descriptor));
                self.editor = None;
                self.autosave();
            }
            Some(EditorOutcome::Clear) => {
                self.workspace.set_slot(tab, slot, None);
                self.editor = None;
                self.autosave();
            }
            Some(EditorOutcome::Cancel) => {
                self.editor = None;
            }
        }
    }

    fn draw_rename_dialog(&mut self, ctx: &egui::Context) {
        let Some(rename) = &mut self.rename else {
            return;
        };

        let mut confirmed = false;
        let mut cancelled = false;

        egui::Window::new("Rename Tab")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                let response = ui.add(
                    egui::TextEdit::singleline(&mut rename.name)
                        .hint_text("Tab name")
                        .desired_width(220.0),
                );
                if response.gained_focus() || rename.name.is_empty() {
                    response.request_focus();
                }

                let valid = !rename.name.trim().is_empty();
                if valid && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    confirmed = true;
                }

                ui.add_space(10.0);
                ui.horizontal(|ui| {
                    if ui.button("Cancel").clicked() {
                        cancelled = true;
                    }
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                        if ui.add_enabled(valid, egui::Button::new("OK")).clicked() {
                            confirmed = true;
                        }
                    });
                });
            });

        if confirmed {
            let (tab, name) = (rename.tab, rename.name.trim().to_string());
            self.workspace.rename_tab(tab, name);
            self.rename = None;
            self.autosave();
        } else if cancelled {
            self.rename = None;
        }
    }

    fn draw_message_dialog(&mut self, ctx: &egui::Context) {
        let Some(dialog) = &self.message else {
            return;
        };

        let title = format!("{} {}", dialog.severity.icon(), dialog.severity.title());
        let message = dialog.message.clone();

        let mut should_close = false;
        egui::Window::new(title)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(&message);
                ui.add_space(12.0);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                    if ui.button("OK").clicked() {
                        should_close = true;
                    }
                });
            });

        if should_close {
            self.message = None;
        }
    }

    fn draw_toast(&mut self, ctx: &egui::Context) {
        let Some(toast) = &self.toast else {
            return;
        };

        let now = Instant::now();
        if now >= toast.expires_at {
            self.toast = None;
            return;
        }
        ctx.request_repaint_after(toast.expires_at - now);
        let message = toast.message.clone();

        egui::Area::new(egui::Id::new("status_toast"))
            .anchor(egui::Align2::CENTER_BOTTOM, [0.0, -24.0])
            .interactable(false)
            .show(ctx, |ui| {
                egui::Frame::NONE
                    .fill(egui::Color32::from_rgb(0x4c, 0xaf, 0x50))
                    .corner_radius(6.0)
                    .inner_margin(10.0)
                    .show(ui, |ui| {
                        ui.colored_label(egui::Color32::WHITE, message);
                    });
            });
    }
}

/// Applies one frame of pointer input to the recognizer. A fast tap can
/// deliver press and release in the same event batch, so both are handled
/// here in order; a release with no pointer position (pointer left the
/// window) abandons the gesture instead of stranding the tracker.
fn feed_pointer_frame(
    tracker: &mut DragTracker,
    slots: &SlotMap,
    tab: usize,
    pressed: bool,
    released: bool,
    pos: Option<(f32, f32)>,
) -> Option<Gesture> {
    let Some((x, y)) = pos else {
        if released {
            tracker.cancel();
        }
        return None;
    };

    if pressed {
        if let Some(slot) = slots.slot_at(x, y) {
            tracker.on_press(x, y, tab, slot);
        }
    } else if tracker.is_tracking() {
        tracker.on_move(x, y);
    }

    if released && tracker.is_tracking() {
        return tracker.on_release(x, y, slots);
    }
    None
}

/// Paints one grid cell: per-kind tint and icon for configured slots, a
/// muted placeholder for empty ones.
fn paint_slot(ui: &egui::Ui, rect: egui::Rect, descriptor: Option<&ButtonDescriptor>) {
    let (fill, text, text_color) = match descriptor {
        Some(descriptor) => {
            let (fill, icon) = match descriptor.kind {
                ActionKind::Url => (egui::Color32::from_rgb(0xe3, 0xf2, 0xfd), "🌐"),
                ActionKind::Folder => (egui::Color32::from_rgb(0xf3, 0xe5, 0xf5), "📂"),
                ActionKind::File => (egui::Color32::from_rgb(0xe8, 0xf5, 0xe9), "📄"),
                ActionKind::Clipboard => (egui::Color32::from_rgb(0xff, 0xf9, 0xc4), "📋"),
            };
            (
                fill,
                format!("{icon} {}", truncate_title(&descriptor.title, 30)),
                egui::Color32::from_rgb(0x20, 0x20, 0x20),
            )
        }
        None => (
            egui::Color32::from_rgb(0xf8, 0xf9, 0xfa),
            "[ empty ]".to_string(),
            egui::Color32::from_rgb(0x90, 0x90, 0x90),
        ),
    };

    let painter = ui.painter();
    painter.rect_filled(rect, 6.0, fill);
    painter.rect_stroke(
        rect,
        6.0,
        egui::Stroke::new(1.0, egui::Color32::from_gray(0xc0)),
        egui::StrokeKind::Inside,
    );
    painter.text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        text,
        egui::FontId::proportional(14.0),
        text_color,
    );
}

fn truncate_title(title: &str, max_chars: usize) -> String {
    if title.chars().count() <= max_chars {
        return title.to_string();
    }
    let mut out: String = title.chars().take(max_chars).collect();
    out.push('…');
    out
}
