//! Logs panel component
//!
//! Shows what the tracing subscriber captured: gateway failures, session
//! reloads, submissions. Follows new entries until the operator selects one.

use super::scrollbar::{render_scrollbar, ScrollbarEnds};
use crate::logging::{LogEntry, LogLevel};
use crate::theme::Theme;
use crate::tui::app::{App, Focus};
use crate::tui::scroll::ScrollState;
use crate::tui::traits::{Handled, Interactive};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

pub struct LogsPanel {
    scroll: ScrollState,

    /// Selected entry (None = auto-follow mode)
    pub selected: Option<usize>,

    /// Entry count as of the last sync, for bounds checking
    entry_count: usize,
}

impl LogsPanel {
    pub fn new() -> Self {
        Self {
            scroll: ScrollState::new(),
            selected: None,
            entry_count: 0,
        }
    }

    /// Sync with the current log buffer contents (call each frame)
    pub fn sync_entries(&mut self, entries: &[LogEntry], viewport_height: usize) {
        self.entry_count = entries.len();
        self.scroll.update_dimensions(entries.len(), viewport_height);

        if let Some(idx) = self.selected {
            if idx >= entries.len() {
                self.selected = entries.len().checked_sub(1);
            }
        }
    }

    pub fn render_with_entries(
        &self,
        f: &mut Frame,
        area: Rect,
        entries: &[LogEntry],
        theme: &Theme,
        focused: bool,
    ) {
        let (start, end) = self.scroll.visible_range();

        let items: Vec<ListItem> = entries
            .iter()
            .enumerate()
            .skip(start)
            .take(end - start)
            .map(|(idx, entry)| {
                let style = if focused && self.selected == Some(idx) {
                    Style::default()
                        .fg(theme.selection_fg)
                        .bg(theme.selection)
                        .add_modifier(Modifier::BOLD)
                } else {
                    log_level_style(&entry.level, theme)
                };
                ListItem::new(format_log_entry(entry)).style(style)
            })
            .collect();

        let border_color = if focused {
            theme.panel_logs
        } else {
            theme.border
        };

        let title = if self.selected.is_some() && focused {
            " Logs [select] "
        } else if self.scroll.auto_follow {
            " Logs "
        } else {
            " Logs [scroll] "
        };

        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(theme.border_type)
                .border_style(Style::default().fg(border_color))
                .title(title),
        );

        f.render_widget(list, area);
        render_scrollbar(f, area, &self.scroll, ScrollbarEnds::Bare);
    }

    /// Selected entry as one line of text, for the clipboard
    pub fn selected_entry_text(&self, entries: &[LogEntry]) -> Option<String> {
        self.selected
            .and_then(|idx| entries.get(idx))
            .map(format_log_entry)
    }

    fn select_next(&mut self) {
        match self.selected {
            Some(idx) if idx + 1 < self.entry_count => {
                self.selected = Some(idx + 1);
                self.scroll.ensure_visible(idx + 1);
            }
            // First selection starts at the most recent entry
            None if self.entry_count > 0 => self.selected = Some(self.entry_count - 1),
            _ => {}
        }
    }

    fn select_previous(&mut self) {
        match self.selected {
            Some(idx) if idx > 0 => {
                self.selected = Some(idx - 1);
                self.scroll.auto_follow = false;
                self.scroll.ensure_visible(idx - 1);
            }
            None if self.entry_count > 0 => self.selected = Some(self.entry_count - 1),
            _ => {}
        }
    }
}

impl Default for LogsPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Interactive for LogsPanel {
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        match key.code {
            KeyCode::Up => self.select_previous(),
            KeyCode::Down => self.select_next(),
            KeyCode::PageUp => self.scroll.page_up(),
            KeyCode::PageDown => self.scroll.page_down(),
            KeyCode::Esc => {
                if self.selected.is_none() {
                    return Handled::No;
                }
                self.selected = None;
                self.scroll.auto_follow = true;
            }
            _ => return Handled::No,
        }
        Handled::Yes
    }

    fn focus_hint(&self) -> Option<&'static str> {
        Some("↑↓:select  y:copy  Esc:follow")
    }
}

fn format_log_entry(entry: &LogEntry) -> String {
    format!(
        "[{}] {:5} {}",
        entry.timestamp.format("%H:%M:%S"),
        entry.level.as_str(),
        entry.message
    )
}

fn log_level_style(level: &LogLevel, theme: &Theme) -> Style {
    match level {
        LogLevel::Error => Style::default()
            .fg(theme.error)
            .add_modifier(Modifier::BOLD),
        LogLevel::Warn => Style::default().fg(theme.highlight),
        LogLevel::Info => Style::default().fg(theme.foreground),
        LogLevel::Debug | LogLevel::Trace => Style::default().fg(theme.muted),
    }
}

/// Render the logs panel owned by `app`
pub fn render(f: &mut Frame, area: Rect, app: &mut App) {
    let height = area.height.saturating_sub(2) as usize;
    let entries = app.log_buffer.get_all();
    let focused = app.focused == Focus::Logs;

    app.logs_panel.sync_entries(&entries, height);
    app.logs_panel
        .render_with_entries(f, area, &entries, &app.theme, focused);
}
