// TUI application state
//
// One `App` lives for the whole run; sessions come and go inside it. A
// session is one "page load": a fresh pair of controllers tagged with a new
// session id. Updates from gateway calls carry the id of the session that
// issued them and are dropped once that session is gone.

use super::clipboard::{copy_to_clipboard, to_clipboard_json};
use super::components::form_panel::edit_date;
use super::components::{FormPanel, LogsPanel, ProfilesPanel, TablePanel, Toast};
use super::input::KeyDebounce;
use super::modal::Modal;
use super::traits::{Handled, Interactive};
use crate::config::{Config, TableConfig};
use crate::controller::{
    ProfileSelector, ReportController, SessionEvent, SessionId, SessionInvalidated, Update,
    UpdateSender,
};
use crate::gateway::GatewayClient;
use crate::logging::LogBuffer;
use crate::table::{report_table, CellAction};
use crate::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent};
use std::time::Instant;
use tokio::sync::mpsc;

/// Top-level screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Reports,
    Profiles,
}

impl Screen {
    /// Panels that take focus on this screen, in Tab order
    pub fn focus_order(self) -> &'static [Focus] {
        match self {
            Screen::Reports => &[Focus::Form, Focus::Table, Focus::Logs],
            Screen::Profiles => &[Focus::Profiles, Focus::Logs],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Screen::Reports => "reports",
            Screen::Profiles => "profiles",
        }
    }
}

/// Panels that can receive keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Form,
    Table,
    Profiles,
    Logs,
}

pub struct App {
    pub should_quit: bool,

    pub screen: Screen,
    pub focused: Focus,

    // Controllers of the current session
    pub reports: ReportController,
    pub profiles: ProfileSelector,

    // Panel view state
    pub form_panel: FormPanel,
    pub table_panel: TablePanel,
    pub profiles_panel: ProfilesPanel,
    pub logs_panel: LogsPanel,

    pub theme: Theme,
    pub table_config: TableConfig,
    pub modal: Option<Modal>,
    pub toast: Option<Toast>,
    pub log_buffer: LogBuffer,

    session: SessionId,
    client: GatewayClient,
    updates_tx: mpsc::Sender<SessionEvent>,
    keys: KeyDebounce,
    animation_frame: usize,
    start_time: Instant,
}

impl App {
    /// Build the app and start the first session on `screen`
    ///
    /// Must run inside a tokio runtime: starting a session spawns its fetches.
    pub fn new(
        config: &Config,
        client: GatewayClient,
        updates_tx: mpsc::Sender<SessionEvent>,
        log_buffer: LogBuffer,
        screen: Screen,
    ) -> Self {
        // Placeholder controllers for session 0, replaced by start_session
        let updates = UpdateSender::new(0, updates_tx.clone());

        let mut app = Self {
            should_quit: false,
            screen,
            focused: screen.focus_order()[0],
            reports: ReportController::new(client.clone(), updates.clone()),
            profiles: ProfileSelector::new(client.clone(), updates),
            form_panel: FormPanel::new(),
            table_panel: TablePanel::new(),
            profiles_panel: ProfilesPanel::new(),
            logs_panel: LogsPanel::new(),
            theme: Theme::by_name(&config.theme),
            table_config: config.table.clone(),
            modal: None,
            toast: None,
            log_buffer,
            session: 0,
            client,
            updates_tx,
            keys: KeyDebounce::new(),
            animation_frame: 0,
            start_time: Instant::now(),
        };
        app.start_session(screen);
        app
    }

    /// Discard all client state and load `screen` from scratch
    pub fn start_session(&mut self, screen: Screen) {
        self.session += 1;
        let updates = UpdateSender::new(self.session, self.updates_tx.clone());

        self.reports = ReportController::new(self.client.clone(), updates.clone());
        self.profiles = ProfileSelector::new(self.client.clone(), updates);
        self.form_panel = FormPanel::new();
        self.table_panel = TablePanel::new();
        self.profiles_panel = ProfilesPanel::new();

        self.screen = screen;
        self.focused = screen.focus_order()[0];
        self.modal = None;

        tracing::info!(session = self.session, screen = screen.name(), "Session started");

        match screen {
            Screen::Reports => self.reports.initialize(),
            Screen::Profiles => self.profiles.load(),
        }
    }

    pub fn session(&self) -> SessionId {
        self.session
    }

    /// Apply a finished gateway call, unless its session is gone
    pub fn apply_event(&mut self, event: SessionEvent) {
        if event.session != self.session {
            tracing::debug!(
                stale = event.session,
                current = self.session,
                "Dropping update from a previous session"
            );
            return;
        }

        match event.update {
            Update::Reports(update) => {
                self.reports.apply(update);
                let columns = self.reports.reports().first().map_or(0, |r| r.keys().count() + 1);
                self.table_panel.sync(self.reports.reports().len(), columns);
            }
            Update::Profiles(update) => {
                if let Some(SessionInvalidated { profile_id }) = self.profiles.apply(update) {
                    tracing::info!(%profile_id, "Active profile changed, reloading");
                    self.start_session(Screen::Reports);
                    self.show_toast(format!("✓ Switched to profile {}", profile_id));
                } else {
                    self.profiles_panel.sync(self.profiles.profiles().len());
                }
            }
        }
    }

    // ─── Input ───────────────────────────────────────────────

    pub fn handle_key_press(&mut self, key: KeyCode) -> bool {
        self.keys.press(key)
    }

    pub fn handle_key_release(&mut self, key: KeyCode) {
        self.keys.release(key);
    }

    /// Route a key to the focused panel
    pub fn dispatch_to_focused(&mut self, key: KeyEvent) -> Handled {
        match self.focused {
            Focus::Form => self.form_panel.handle_key(key),
            Focus::Table => self.table_panel.handle_key(key),
            Focus::Profiles => self.profiles_panel.handle_key(key),
            Focus::Logs => self.logs_panel.handle_key(key),
        }
    }

    pub fn focus_hint(&self) -> Option<&'static str> {
        match self.focused {
            Focus::Form => self.form_panel.focus_hint(),
            Focus::Table => self.table_panel.focus_hint(),
            Focus::Profiles => self.profiles_panel.focus_hint(),
            Focus::Logs => self.logs_panel.focus_hint(),
        }
    }

    pub fn focus_next(&mut self) {
        self.cycle_focus(1);
    }

    pub fn focus_prev(&mut self) {
        let order = self.screen.focus_order();
        self.cycle_focus(order.len() - 1);
    }

    fn cycle_focus(&mut self, step: usize) {
        let order = self.screen.focus_order();
        let current = order.iter().position(|f| *f == self.focused).unwrap_or(0);
        self.focused = order[(current + step) % order.len()];
    }

    // ─── Report actions ──────────────────────────────────────

    /// Cycle the selected choice field through its catalog
    pub fn cycle_selected_choice(&mut self, forward: bool) {
        let field = self.form_panel.selected();
        self.reports.cycle_choice(field, forward);
    }

    /// Apply one typed character (or a backspace) to the selected date field
    pub fn edit_selected_date(&mut self, typed: Option<char>) {
        let field = self.form_panel.selected();
        if field.is_choice() {
            return;
        }
        if let Some(value) = edit_date(self.reports.form().get(field), typed) {
            self.reports.update_field(field, value);
        }
    }

    /// Submit the pending form; a validation failure opens an alert
    pub fn submit_request(&mut self) {
        if let Err(e) = self.reports.submit_request() {
            tracing::debug!("Request refused: {}", e);
            self.modal = Some(Modal::alert("Invalid request", e.to_string()));
        }
    }

    /// Activate the action cell of the selected table row
    pub fn activate_selected_row(&mut self) {
        let Some(row) = self.table_panel.selected() else {
            return;
        };
        let Some(table) = report_table(self.reports.reports()) else {
            return;
        };
        let action = table
            .first_button_column(row)
            .and_then(|column| table.activate(row, column));

        match action {
            Some(CellAction::CheckStatus { report_id }) => self.reports.check_status(report_id),
            None => tracing::debug!(row, "Row has no report id to check"),
        }
    }

    /// Select the highlighted profile
    pub fn select_highlighted_profile(&mut self) {
        let Some(profile) = self
            .profiles_panel
            .selected()
            .and_then(|idx| self.profiles.profiles().get(idx))
        else {
            return;
        };
        self.profiles.select(profile.profile_id.clone());
    }

    // ─── Clipboard ───────────────────────────────────────────

    /// Text `y` copies from the focused panel
    pub fn copy_text(&self) -> Option<String> {
        match self.focused {
            Focus::Table => {
                let report = self
                    .table_panel
                    .selected()
                    .and_then(|idx| self.reports.reports().get(idx))?;
                match to_clipboard_json(report) {
                    Ok(json) => Some(json),
                    Err(e) => {
                        tracing::warn!("{:#}", e);
                        None
                    }
                }
            }
            Focus::Logs => self
                .logs_panel
                .selected_entry_text(&self.log_buffer.get_all()),
            Focus::Form | Focus::Profiles => None,
        }
    }

    pub fn copy_selection(&mut self) {
        let Some(text) = self.copy_text() else {
            return;
        };
        match copy_to_clipboard(&text) {
            Ok(()) => self.show_toast("✓ Copied to clipboard"),
            Err(e) => {
                tracing::warn!("{:#}", e);
                self.toast = Some(Toast::error("✗ Failed to copy"));
            }
        }
    }

    // ─── Chrome ──────────────────────────────────────────────

    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast::new(message));
    }

    pub fn clear_expired_toast(&mut self) {
        if self.toast.as_ref().is_some_and(Toast::is_expired) {
            self.toast = None;
        }
    }

    pub fn tick_animation(&mut self) {
        self.animation_frame = self.animation_frame.wrapping_add(1);
    }

    pub fn spinner_char(&self) -> char {
        const SPINNER: [char; 4] = ['◐', '◓', '◑', '◒'];
        SPINNER[self.animation_frame % SPINNER.len()]
    }

    /// Time since launch as `HH:MM:SS`
    pub fn uptime(&self) -> String {
        let seconds = self.start_time.elapsed().as_secs();
        format!(
            "{:02}:{:02}:{:02}",
            seconds / 3600,
            (seconds % 3600) / 60,
            seconds % 60
        )
    }
}
