//! Profile list
//!
//! Nothing but a loading line is drawn until the profile list has arrived;
//! after that one row per profile.

use super::scrollbar::{render_scrollbar, ScrollbarEnds};
use crate::model::Profile;
use crate::theme::Theme;
use crate::tui::scroll::ScrollState;
use crate::tui::traits::{Handled, Interactive};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

pub struct ProfilesPanel {
    selected: usize,
    count: usize,
    scroll: ScrollState,
}

impl ProfilesPanel {
    pub fn new() -> Self {
        Self {
            selected: 0,
            count: 0,
            scroll: ScrollState::manual(),
        }
    }

    pub fn sync(&mut self, count: usize) {
        self.count = count;
        self.selected = self.selected.min(count.saturating_sub(1));
    }

    pub fn selected(&self) -> Option<usize> {
        (self.selected < self.count).then_some(self.selected)
    }

    pub fn render(
        &mut self,
        f: &mut Frame,
        area: Rect,
        profiles: &[Profile],
        loaded: bool,
        theme: &Theme,
        focused: bool,
    ) {
        let border_color = if focused {
            theme.panel_table
        } else {
            theme.border
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(border_color))
            .title(" Profiles ");

        if !loaded {
            let waiting = Paragraph::new(" Loading profiles…")
                .style(Style::default().fg(theme.muted))
                .block(block);
            f.render_widget(waiting, area);
            return;
        }

        self.sync(profiles.len());
        self.scroll
            .update_dimensions(profiles.len(), area.height.saturating_sub(2) as usize);
        self.scroll.ensure_visible(self.selected);

        let (start, end) = self.scroll.visible_range();
        let items: Vec<ListItem> = profiles
            .iter()
            .enumerate()
            .skip(start)
            .take(end - start)
            .map(|(idx, profile)| {
                let line = Line::from(vec![
                    Span::raw(format!(" {}", profile.display_name())),
                    Span::styled(
                        format!("  #{}", profile.profile_id),
                        Style::default().fg(theme.muted),
                    ),
                ]);
                let style = if focused && idx == self.selected {
                    Style::default()
                        .fg(theme.selection_fg)
                        .bg(theme.selection)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(theme.foreground)
                };
                ListItem::new(line).style(style)
            })
            .collect();

        f.render_widget(List::new(items).block(block), area);
        render_scrollbar(f, area, &self.scroll, ScrollbarEnds::Bare);
    }
}

impl Default for ProfilesPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Interactive for ProfilesPanel {
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        let last = self.count.saturating_sub(1);
        match key.code {
            KeyCode::Up => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down => self.selected = (self.selected + 1).min(last),
            KeyCode::Home => self.selected = 0,
            KeyCode::End => self.selected = last,
            _ => return Handled::No,
        }
        Handled::Yes
    }

    fn focus_hint(&self) -> Option<&'static str> {
        Some("↑↓:profile  Enter:switch  Esc:back")
    }
}
