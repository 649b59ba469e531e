//! Report table panel
//!
//! Draws a [`DynamicTable`] inside a fixed-size viewport: at most
//! `[table] width x height` cells, whatever the terminal size. Rows scroll
//! vertically under a fixed header row; columns scroll horizontally one column
//! at a time. With no table nothing is drawn at all.

use super::scrollbar::{render_scrollbar, ScrollbarEnds};
use crate::config::TableConfig;
use crate::table::DynamicTable;
use crate::theme::Theme;
use crate::tui::scroll::ScrollState;
use crate::tui::traits::{Handled, Interactive};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table},
    Frame,
};

/// Borders plus the header row
const CHROME_HEIGHT: u16 = 3;

pub struct TablePanel {
    selected: usize,
    column_offset: usize,
    row_count: usize,
    column_count: usize,
    scroll: ScrollState,
}

impl TablePanel {
    pub fn new() -> Self {
        Self {
            selected: 0,
            column_offset: 0,
            row_count: 0,
            column_count: 0,
            scroll: ScrollState::manual(),
        }
    }

    /// Record the current table shape and clamp the cursor into it
    pub fn sync(&mut self, rows: usize, columns: usize) {
        self.row_count = rows;
        self.column_count = columns;
        self.selected = self.selected.min(rows.saturating_sub(1));
        self.column_offset = self.column_offset.min(columns.saturating_sub(1));
    }

    /// Selected row, if the table has any
    pub fn selected(&self) -> Option<usize> {
        (self.selected < self.row_count).then_some(self.selected)
    }

    /// The viewport the table occupies inside `area`
    pub fn viewport(area: Rect, config: &TableConfig) -> Rect {
        Rect {
            width: area.width.min(config.width),
            height: area.height.min(config.height),
            ..area
        }
    }

    pub fn render(
        &mut self,
        f: &mut Frame,
        area: Rect,
        table: Option<&DynamicTable>,
        config: &TableConfig,
        theme: &Theme,
        focused: bool,
    ) {
        let Some(table) = table else {
            self.sync(0, 0);
            return;
        };
        self.sync(table.row_count(), table.column_count());

        let viewport = Self::viewport(area, config);
        let body_height = viewport.height.saturating_sub(CHROME_HEIGHT) as usize;
        self.scroll.update_dimensions(self.row_count, body_height);
        self.scroll.ensure_visible(self.selected);

        let widths = table.column_widths();
        let columns: Vec<usize> = (self.column_offset..table.column_count()).collect();

        let header = Row::new(
            columns
                .iter()
                .map(|&column| Cell::from(table.headers()[column].clone())),
        )
        .style(
            Style::default()
                .fg(theme.title)
                .add_modifier(Modifier::BOLD),
        );

        let (start, end) = self.scroll.visible_range();
        let rows: Vec<Row> = (start..end)
            .map(|row| {
                let cells = columns.iter().map(|&column| {
                    let content = table.cell(row, column);
                    let style = if content.is_button() {
                        Style::default().fg(theme.button)
                    } else {
                        Style::default().fg(theme.foreground)
                    };
                    Cell::from(content.display()).style(style)
                });

                let row_widget = Row::new(cells);
                if focused && row == self.selected {
                    row_widget.style(
                        Style::default()
                            .fg(theme.selection_fg)
                            .bg(theme.selection)
                            .add_modifier(Modifier::BOLD),
                    )
                } else {
                    row_widget
                }
            })
            .collect();

        let border_color = if focused {
            theme.panel_table
        } else {
            theme.border
        };

        let more_left = if self.column_offset > 0 { "◀ " } else { "" };
        let title = format!(" {}Reports ({}) ", more_left, self.row_count);

        let widget = Table::new(
            rows,
            columns.iter().map(|&column| Constraint::Length(widths[column])),
        )
        .header(header)
        .column_spacing(2)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(theme.border_type)
                .border_style(Style::default().fg(border_color))
                .title(title),
        );

        f.render_widget(widget, viewport);
        render_scrollbar(f, viewport, &self.scroll, ScrollbarEnds::Arrows);
    }
}

impl Default for TablePanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Interactive for TablePanel {
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        let last_row = self.row_count.saturating_sub(1);
        match key.code {
            KeyCode::Up => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down => self.selected = (self.selected + 1).min(last_row),
            KeyCode::Home => self.selected = 0,
            KeyCode::End => self.selected = last_row,
            KeyCode::PageUp => {
                let page = self.scroll.viewport().max(1);
                self.selected = self.selected.saturating_sub(page);
            }
            KeyCode::PageDown => {
                let page = self.scroll.viewport().max(1);
                self.selected = (self.selected + page).min(last_row);
            }
            KeyCode::Left => self.column_offset = self.column_offset.saturating_sub(1),
            KeyCode::Right => {
                self.column_offset = (self.column_offset + 1).min(self.column_count.saturating_sub(1))
            }
            _ => return Handled::No,
        }
        Handled::Yes
    }

    fn focus_hint(&self) -> Option<&'static str> {
        Some("↑↓:row  ←→:columns  Enter:check status  y:copy")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(panel: &mut TablePanel, code: KeyCode) {
        panel.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn cursor_is_clamped_to_table_shape() {
        let mut panel = TablePanel::new();
        assert_eq!(panel.selected(), None);

        panel.sync(3, 4);
        press(&mut panel, KeyCode::End);
        press(&mut panel, KeyCode::Right);
        press(&mut panel, KeyCode::Right);
        assert_eq!(panel.selected(), Some(2));
        assert_eq!(panel.column_offset, 2);

        // Fewer rows after a refresh
        panel.sync(1, 2);
        assert_eq!(panel.selected(), Some(0));
        assert_eq!(panel.column_offset, 1);
    }

    #[test]
    fn viewport_is_capped_by_config() {
        let config = TableConfig {
            width: 50,
            height: 10,
        };
        let area = Rect::new(5, 2, 120, 40);
        assert_eq!(TablePanel::viewport(area, &config), Rect::new(5, 2, 50, 10));

        let small = Rect::new(0, 0, 30, 6);
        assert_eq!(TablePanel::viewport(small, &config), small);
    }
}
