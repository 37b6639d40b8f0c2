//! Main application module for Citrine
//!
//! This module implements the eframe App trait: menu bar, toolbar, the
//! split editor/preview panes, the status bar, and the glue between edit
//! events and the debounced refresh pipeline.

use crate::config::{save_config_silent, Theme, WindowSize};
use crate::editor::{apply_format, overlay_layout_job, FormatCommand};
use crate::files::{self, dialogs};
use crate::preview::ComrakConverter;
use crate::state::{AppState, Document, PendingAction};
use crate::theme::{apply_visuals, EditorColors};
use crate::ui::{SearchOutcome, SearchPanel};
use eframe::egui::{self, Key, Modifiers};
use log::{info, warn};
use std::path::PathBuf;
use std::time::Instant;

/// Keyboard shortcut actions.
///
/// Detected inside the input closure and executed afterwards to avoid
/// borrow conflicts.
#[derive(Debug, Clone, Copy)]
enum KeyboardAction {
    /// New document (Ctrl+N)
    New,
    /// Open file dialog (Ctrl+O)
    Open,
    /// Save current file (Ctrl+S)
    Save,
    /// Save As dialog (Ctrl+Shift+S)
    SaveAs,
    /// Open find panel (Ctrl+F)
    Find,
    /// Quit (Ctrl+Q)
    Quit,
    /// Apply Markdown formatting (Ctrl+B / Ctrl+I)
    Format(FormatCommand),
}

/// The main application struct that holds all state and implements eframe::App.
pub struct CitrineApp {
    /// Central application state
    state: AppState,
    /// Markdown-to-HTML converter for the preview pane
    converter: ComrakConverter,
    /// Find panel
    search_panel: SearchPanel,
    /// Destructive action awaiting the unsaved-changes confirmation
    pending_action: Option<PendingAction>,
    /// Last seen editor cursor range (character indices)
    selection: (usize, usize),
    /// Whether the About window is visible
    show_about: bool,
    /// Last window title sent to the viewport
    last_title: String,
    /// Set once quitting is confirmed, so the close request passes through
    allowed_to_quit: bool,
}

impl CitrineApp {
    /// Create a new CitrineApp, optionally opening an initial file.
    pub fn new(cc: &eframe::CreationContext<'_>, initial_file: Option<PathBuf>) -> Self {
        info!("Initializing Citrine");

        let state = AppState::new();
        apply_visuals(&cc.egui_ctx, state.settings.theme);

        let mut app = Self {
            state,
            converter: ComrakConverter::new(),
            search_panel: SearchPanel::new(),
            pending_action: None,
            selection: (0, 0),
            show_about: false,
            last_title: String::new(),
            allowed_to_quit: false,
        };

        if let Some(path) = initial_file {
            match files::read_document(&path) {
                Ok(content) => {
                    app.state.document = Document::with_file(path, content);
                }
                Err(err) => {
                    warn!("Could not open initial file: {}", err);
                    app.state.status_line = err.to_string();
                }
            }
        }

        // Initial render: empty buffers get the preview placeholder.
        app.run_refresh(false);
        app
    }

    /// Stable widget id for the editor, used to steer its cursor state.
    fn editor_id() -> egui::Id {
        egui::Id::new("citrine_editor")
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Refresh Wiring
    // ─────────────────────────────────────────────────────────────────────────

    /// An edit happened: arm (or re-arm) the refresh deadline.
    fn on_buffer_edited(&mut self) {
        if self.state.settings.auto_preview {
            self.state.scheduler.note_edit(Instant::now());
        }
    }

    /// Run the refresh pipeline over the current buffer.
    ///
    /// `mark_modified` distinguishes edit-triggered refreshes from the
    /// initial render after open/startup, which must leave the document
    /// clean.
    fn run_refresh(&mut self, mark_modified: bool) {
        let content = self.state.document.content.clone();
        let theme = self.state.settings.theme;
        if let Some(output) = self.state.refresher.refresh(&content, theme, &self.converter) {
            self.state.apply_refresh(output);
            if mark_modified {
                self.state.document.modified = true;
            }
            // Keep search highlights tracking the edited buffer.
            if let Some(spans) = self.search_panel.resync(&content) {
                self.state.set_search_spans(spans);
            }
        }
    }

    /// Poll the debounce deadline and ask for a wake-up while one is armed.
    fn poll_scheduler(&mut self, ctx: &egui::Context) {
        let now = Instant::now();
        if self.state.scheduler.fire_due(now) {
            self.run_refresh(true);
        }
        if let Some(remaining) = self.state.scheduler.time_until_due(Instant::now()) {
            ctx.request_repaint_after(remaining);
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // File Operations
    // ─────────────────────────────────────────────────────────────────────────

    fn request_new_document(&mut self) {
        if self.state.document.modified {
            self.pending_action = Some(PendingAction::NewDocument);
        } else {
            self.new_document();
        }
    }

    fn new_document(&mut self) {
        self.state.begin_document_transition();
        self.state.document = Document::new();
        self.state.reset_surfaces();
        info!("New document");
    }

    fn request_open_document(&mut self) {
        if self.state.document.modified {
            self.pending_action = Some(PendingAction::OpenDocument);
        } else {
            self.open_document();
        }
    }

    fn open_document(&mut self) {
        let initial_dir = self
            .state
            .document
            .path
            .as_deref()
            .and_then(|p| p.parent())
            .map(|d| d.to_path_buf());
        let Some(path) = dialogs::open_file_dialog(initial_dir.as_ref()) else {
            return;
        };
        match files::read_document(&path) {
            Ok(content) => {
                // Cancel any pending refresh before the buffer changes hands.
                self.state.begin_document_transition();
                self.state.document = Document::with_file(path, content);
                self.run_refresh(false);
                self.state.status_line = format!("Opened: {}", self.state.document.file_name());
            }
            Err(err) => {
                warn!("Open failed: {}", err);
                self.state.status_line = err.to_string();
            }
        }
    }

    /// Save to the current path, or fall through to Save As.
    ///
    /// Returns false if the user cancelled the dialog or the write failed.
    fn save_document(&mut self) -> bool {
        match self.state.document.path.clone() {
            Some(path) => self.write_to(path),
            None => self.save_document_as(),
        }
    }

    /// Always ask for a path, then save.
    fn save_document_as(&mut self) -> bool {
        let initial_dir = self
            .state
            .document
            .path
            .as_deref()
            .and_then(|p| p.parent())
            .map(|d| d.to_path_buf());
        let default_name = self
            .state
            .document
            .path
            .as_deref()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str());
        match dialogs::save_file_dialog(initial_dir.as_ref(), default_name) {
            Some(path) => self.write_to(path),
            None => false,
        }
    }

    fn write_to(&mut self, path: PathBuf) -> bool {
        match files::write_document(&path, &self.state.document.content) {
            Ok(()) => {
                self.state.document.path = Some(path);
                self.state.document.mark_saved();
                self.state.status_line = format!("Saved: {}", self.state.document.file_name());
                true
            }
            Err(err) => {
                warn!("Save failed: {}", err);
                self.state.status_line = err.to_string();
                false
            }
        }
    }

    fn request_quit(&mut self, ctx: &egui::Context) {
        if self.state.document.modified {
            self.pending_action = Some(PendingAction::Quit);
        } else {
            self.quit(ctx);
        }
    }

    fn quit(&mut self, ctx: &egui::Context) {
        self.state.scheduler.cancel();
        save_config_silent(&self.state.settings);
        self.allowed_to_quit = true;
        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Theme and Formatting
    // ─────────────────────────────────────────────────────────────────────────

    fn set_theme(&mut self, ctx: &egui::Context, theme: Theme) {
        if self.state.settings.theme == theme {
            return;
        }
        info!("Theme changed to {}", theme.display_name());
        self.state.settings.theme = theme;
        apply_visuals(ctx, theme);
        // Instant re-resolution: geometry stays, colors swap.
        self.state.restyle(theme);
        save_config_silent(&self.state.settings);
    }

    fn apply_format_command(&mut self, ctx: &egui::Context, command: FormatCommand) {
        let result = apply_format(&self.state.document.content, self.selection, command);
        self.state.document.content = result.text;

        // Steer the editor cursor onto the formatted run.
        if let Some(mut editor_state) = egui::TextEdit::load_state(ctx, Self::editor_id()) {
            use egui::text::{CCursor, CCursorRange};
            let range = match result.selection {
                Some((start, end)) => {
                    CCursorRange::two(CCursor::new(start), CCursor::new(end))
                }
                None => CCursorRange::one(CCursor::new(result.cursor)),
            };
            editor_state.cursor.set_char_range(Some(range));
            editor_state.store(ctx, Self::editor_id());
        }
        self.selection = result.selection.unwrap_or((result.cursor, result.cursor));

        self.on_buffer_edited();
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Input Handling
    // ─────────────────────────────────────────────────────────────────────────

    fn keyboard_actions(&mut self, ctx: &egui::Context) -> Vec<KeyboardAction> {
        let mut actions = Vec::new();
        ctx.input_mut(|input| {
            let ctrl_shift = Modifiers::CTRL | Modifiers::SHIFT;
            if input.consume_key(ctrl_shift, Key::S) {
                actions.push(KeyboardAction::SaveAs);
            }
            if input.consume_key(Modifiers::CTRL, Key::S) {
                actions.push(KeyboardAction::Save);
            }
            if input.consume_key(Modifiers::CTRL, Key::N) {
                actions.push(KeyboardAction::New);
            }
            if input.consume_key(Modifiers::CTRL, Key::O) {
                actions.push(KeyboardAction::Open);
            }
            if input.consume_key(Modifiers::CTRL, Key::F) {
                actions.push(KeyboardAction::Find);
            }
            if input.consume_key(Modifiers::CTRL, Key::Q) {
                actions.push(KeyboardAction::Quit);
            }
            if input.consume_key(Modifiers::CTRL, Key::B) {
                actions.push(KeyboardAction::Format(FormatCommand::Bold));
            }
            if input.consume_key(Modifiers::CTRL, Key::I) {
                actions.push(KeyboardAction::Format(FormatCommand::Italic));
            }
        });
        actions
    }

    fn execute(&mut self, ctx: &egui::Context, action: KeyboardAction) {
        match action {
            KeyboardAction::New => self.request_new_document(),
            KeyboardAction::Open => self.request_open_document(),
            KeyboardAction::Save => {
                self.save_document();
            }
            KeyboardAction::SaveAs => {
                self.save_document_as();
            }
            KeyboardAction::Find => self.search_panel.open_panel(),
            KeyboardAction::Quit => self.request_quit(ctx),
            KeyboardAction::Format(command) => self.apply_format_command(ctx, command),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Chrome
    // ─────────────────────────────────────────────────────────────────────────

    fn show_menu_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("New\tCtrl+N").clicked() {
                        self.request_new_document();
                        ui.close_menu();
                    }
                    if ui.button("Open...\tCtrl+O").clicked() {
                        self.request_open_document();
                        ui.close_menu();
                    }
                    if ui.button("Save\tCtrl+S").clicked() {
                        self.save_document();
                        ui.close_menu();
                    }
                    if ui.button("Save As...\tCtrl+Shift+S").clicked() {
                        self.save_document_as();
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Exit\tCtrl+Q").clicked() {
                        self.request_quit(ctx);
                        ui.close_menu();
                    }
                });

                ui.menu_button("Edit", |ui| {
                    if ui.button("Find...\tCtrl+F").clicked() {
                        self.search_panel.open_panel();
                        ui.close_menu();
                    }
                });

                ui.menu_button("Tools", |ui| {
                    let commands = [
                        FormatCommand::Bold,
                        FormatCommand::Italic,
                        FormatCommand::Heading(1),
                        FormatCommand::Heading(2),
                        FormatCommand::Heading(3),
                        FormatCommand::Heading(4),
                        FormatCommand::Heading(5),
                        FormatCommand::Heading(6),
                    ];
                    for command in commands {
                        if ui.button(command.label()).clicked() {
                            self.apply_format_command(ctx, command);
                            ui.close_menu();
                        }
                    }
                    ui.separator();
                    for command in [
                        FormatCommand::Link,
                        FormatCommand::CodeBlock,
                        FormatCommand::Image,
                    ] {
                        if ui.button(command.label()).clicked() {
                            self.apply_format_command(ctx, command);
                            ui.close_menu();
                        }
                    }
                    ui.separator();
                    for command in [
                        FormatCommand::BulletList,
                        FormatCommand::NumberedList,
                        FormatCommand::Quote,
                    ] {
                        if ui.button(command.label()).clicked() {
                            self.apply_format_command(ctx, command);
                            ui.close_menu();
                        }
                    }
                });

                ui.menu_button("View", |ui| {
                    ui.menu_button("Theme", |ui| {
                        for &theme in Theme::all() {
                            if ui.button(theme.display_name()).clicked() {
                                self.set_theme(ctx, theme);
                                ui.close_menu();
                            }
                        }
                    });
                    let mut auto_preview = self.state.settings.auto_preview;
                    if ui.checkbox(&mut auto_preview, "Auto preview").clicked() {
                        self.state.settings.auto_preview = auto_preview;
                        save_config_silent(&self.state.settings);
                    }
                    if ui.button("Refresh preview").clicked() {
                        self.run_refresh(true);
                        ui.close_menu();
                    }
                });

                ui.menu_button("Help", |ui| {
                    if ui.button("About").clicked() {
                        self.show_about = true;
                        ui.close_menu();
                    }
                });
            });
        });
    }

    fn show_toolbar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("📁 Open").clicked() {
                    self.request_open_document();
                }
                if ui.button("💾 Save").clicked() {
                    self.save_document();
                }
                if ui.button("🔄 New").clicked() {
                    self.request_new_document();
                }

                ui.separator();
                ui.label("Theme:");
                let mut selected = self.state.settings.theme;
                egui::ComboBox::from_id_source("theme_select")
                    .selected_text(selected.display_name())
                    .show_ui(ui, |ui| {
                        for &theme in Theme::all() {
                            ui.selectable_value(&mut selected, theme, theme.display_name());
                        }
                    });
                if selected != self.state.settings.theme {
                    self.set_theme(ctx, selected);
                }
            });
        });
    }

    fn show_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(&self.state.status_line);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format!(
                        "Theme: {}",
                        self.state.settings.theme.display_name()
                    ));
                });
            });
        });
    }

    fn show_panes(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.columns(2, |columns| {
                self.show_editor_pane(&mut columns[0]);
                Self::show_preview_pane(&mut columns[1], &self.state.preview_html);
            });
        });
    }

    fn show_editor_pane(&mut self, ui: &mut egui::Ui) {
        ui.strong("Editor");

        let spans = self.state.overlay_spans();
        let colors = EditorColors::resolve(self.state.settings.theme);
        let font_size = self.state.settings.font_size;
        let mut layouter = |ui: &egui::Ui, text: &str, wrap_width: f32| {
            let mut job = overlay_layout_job(text, &spans, colors, font_size);
            job.wrap.max_width = wrap_width;
            ui.fonts(|fonts| fonts.layout_job(job))
        };

        egui::ScrollArea::vertical()
            .id_source("editor_scroll")
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                let output = egui::TextEdit::multiline(&mut self.state.document.content)
                    .id(Self::editor_id())
                    .font(egui::FontId::monospace(font_size))
                    .desired_width(f32::INFINITY)
                    .desired_rows(40)
                    .lock_focus(true)
                    .layouter(&mut layouter)
                    .show(ui);

                if let Some(range) = output.cursor_range {
                    self.selection = (range.primary.ccursor.index, range.secondary.ccursor.index);
                }
                if output.response.changed() {
                    self.on_buffer_edited();
                }
            });
    }

    fn show_preview_pane(ui: &mut egui::Ui, html: &str) {
        ui.strong("Preview");
        egui::ScrollArea::vertical()
            .id_source("preview_scroll")
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                ui.add(egui::Label::new(egui::RichText::new(html).monospace()).wrap());
            });
    }

    fn show_about_window(&mut self, ctx: &egui::Context) {
        if !self.show_about {
            return;
        }
        let mut open = self.show_about;
        egui::Window::new("About Citrine")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.heading("Citrine");
                ui.label("A lightweight Markdown editor with live preview and syntax highlighting.");
                ui.add_space(8.0);
                ui.label("Built with egui and comrak.");
            });
        self.show_about = open;
    }

    fn show_pending_dialog(&mut self, ctx: &egui::Context) {
        let Some(action) = self.pending_action else {
            return;
        };

        #[derive(Clone, Copy, PartialEq)]
        enum Decision {
            Save,
            Discard,
            Cancel,
        }
        let mut decision = None;

        egui::Window::new("Unsaved Changes")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label("The current document has unsaved changes. Save them first?");
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("Save").clicked() {
                        decision = Some(Decision::Save);
                    }
                    if ui.button("Discard").clicked() {
                        decision = Some(Decision::Discard);
                    }
                    if ui.button("Cancel").clicked() {
                        decision = Some(Decision::Cancel);
                    }
                });
            });

        match decision {
            Some(Decision::Save) => {
                self.pending_action = None;
                if self.save_document() {
                    self.proceed(ctx, action);
                }
            }
            Some(Decision::Discard) => {
                self.pending_action = None;
                self.proceed(ctx, action);
            }
            Some(Decision::Cancel) => {
                self.pending_action = None;
            }
            None => {}
        }
    }

    fn proceed(&mut self, ctx: &egui::Context, action: PendingAction) {
        match action {
            PendingAction::NewDocument => self.new_document(),
            PendingAction::OpenDocument => self.open_document(),
            PendingAction::Quit => self.quit(ctx),
        }
    }

    fn update_window_title(&mut self, ctx: &egui::Context) {
        let title = self.state.document.title();
        if title != self.last_title {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title.clone()));
            self.last_title = title;
        }
    }
}

impl eframe::App for CitrineApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Intercept the window close button while changes are unsaved.
        if ctx.input(|i| i.viewport().close_requested()) {
            if self.state.document.modified && !self.allowed_to_quit {
                ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
                self.pending_action = Some(PendingAction::Quit);
            } else {
                self.state.scheduler.cancel();
                save_config_silent(&self.state.settings);
            }
        }

        // Fire a due refresh before drawing so this frame shows the result.
        self.poll_scheduler(ctx);

        let actions = self.keyboard_actions(ctx);
        for action in actions {
            self.execute(ctx, action);
        }

        self.show_menu_bar(ctx);
        self.show_toolbar(ctx);
        self.show_status_bar(ctx);
        self.show_panes(ctx);

        let search_outcome = self.search_panel.show(ctx, &self.state.document.content);
        match search_outcome {
            SearchOutcome::Updated(spans) => self.state.set_search_spans(spans),
            SearchOutcome::Cleared => self.state.clear_search_spans(),
            SearchOutcome::Unchanged => {}
        }

        self.show_pending_dialog(ctx);
        self.show_about_window(ctx);
        self.update_window_title(ctx);

        // Remember the window size for the next session.
        if let Some(rect) = ctx.input(|i| i.viewport().inner_rect) {
            self.state.settings.window_size = WindowSize {
                width: rect.width(),
                height: rect.height(),
            };
        }
    }
}
