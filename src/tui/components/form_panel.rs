//! Report request form
//!
//! Four rows, one per field, plus the submit button. The panel only owns
//! which field is selected; values live in the controller's pending form and
//! edits go through the controller so catalog membership is enforced there.

use crate::controller::{FormField, PendingForm};
use crate::theme::Theme;
use crate::tui::traits::{Handled, Interactive};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Longest text a date field accepts (`YYYY-MM-DD`)
pub const DATE_LEN: usize = 10;

const LABEL_WIDTH: usize = 13;

pub struct FormPanel {
    selected: usize,
}

impl FormPanel {
    pub fn new() -> Self {
        Self { selected: 0 }
    }

    pub fn selected(&self) -> FormField {
        FormField::ALL[self.selected]
    }

    pub fn render(
        &self,
        f: &mut Frame,
        area: Rect,
        form: &PendingForm,
        theme: &Theme,
        focused: bool,
    ) {
        let label_style = Style::default().fg(theme.muted);
        let value_style = Style::default().fg(theme.foreground);

        let mut lines: Vec<Line> = FormField::ALL
            .iter()
            .enumerate()
            .map(|(idx, field)| {
                let active = focused && idx == self.selected;
                let value = form.get(*field);

                let shown = if field.is_choice() {
                    if value.is_empty() {
                        "◀ … ▶".to_string()
                    } else {
                        format!("◀ {} ▶", value)
                    }
                } else if value.is_empty() && !active {
                    "YYYY-MM-DD".to_string()
                } else if active {
                    format!("{}▏", value)
                } else {
                    value.to_string()
                };

                let style = if active {
                    Style::default()
                        .fg(theme.selection_fg)
                        .bg(theme.selection)
                        .add_modifier(Modifier::BOLD)
                } else if value.is_empty() {
                    label_style
                } else {
                    value_style
                };

                Line::from(vec![
                    Span::styled(format!(" {:<width$}", field.label(), width = LABEL_WIDTH), label_style),
                    Span::styled(shown, style),
                ])
            })
            .collect();

        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            " [ Request report ]  Enter",
            Style::default()
                .fg(theme.button)
                .add_modifier(Modifier::BOLD),
        )));

        let border_color = if focused {
            theme.panel_form
        } else {
            theme.border
        };

        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(theme.border_type)
                .border_style(Style::default().fg(border_color))
                .title(" Request Report "),
        );

        f.render_widget(paragraph, area);
    }
}

impl Default for FormPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Interactive for FormPanel {
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        match key.code {
            KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
                Handled::Yes
            }
            KeyCode::Down => {
                self.selected = (self.selected + 1).min(FormField::ALL.len() - 1);
                Handled::Yes
            }
            _ => Handled::No,
        }
    }

    fn focus_hint(&self) -> Option<&'static str> {
        Some("↑↓:field  ←→:choose  0-9 -:date  Enter:request")
    }
}

/// `current` with one typed character applied; `None` erases the last one
///
/// Only digits and `-` are accepted and the result never exceeds a full date.
pub fn edit_date(current: &str, typed: Option<char>) -> Option<String> {
    let mut value = current.to_string();
    match typed {
        Some(c) if (c.is_ascii_digit() || c == '-') && value.len() < DATE_LEN => value.push(c),
        Some(_) => return None,
        None => {
            value.pop()?;
        }
    }
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    #[test]
    fn selection_stays_within_fields() {
        let mut panel = FormPanel::new();
        let up = KeyEvent::new(KeyCode::Up, KeyModifiers::NONE);
        let down = KeyEvent::new(KeyCode::Down, KeyModifiers::NONE);

        panel.handle_key(up);
        assert_eq!(panel.selected(), FormField::AdType);
        for _ in 0..10 {
            panel.handle_key(down);
        }
        assert_eq!(panel.selected(), FormField::EndDate);
    }

    #[test]
    fn date_editing() {
        assert_eq!(edit_date("2024-0", Some('1')).as_deref(), Some("2024-01"));
        assert_eq!(edit_date("2024-01", None).as_deref(), Some("2024-0"));
        assert_eq!(edit_date("", None), None);
        assert_eq!(edit_date("2024", Some('x')), None);
        assert_eq!(edit_date("2024-01-31", Some('9')), None);
    }
}
