//! Toast notification component
//!
//! A non-blocking overlay in the bottom-right corner that dismisses itself
//! after a short time. Drawn on top of everything, modals included.

use crate::theme::Theme;
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::time::{Duration, Instant};
use unicode_width::UnicodeWidthStr;

const TOAST_DURATION: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Error,
}

pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    created_at: Instant,
}

impl Toast {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: ToastKind::Info,
            created_at: Instant::now(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Error,
            ..Self::new(message)
        }
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= TOAST_DURATION
    }

    /// Render in the bottom-right corner of `area`
    pub fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        // 2 cells padding plus borders
        let width = (self.message.width() as u16 + 4).min(area.width.saturating_sub(4));
        let height = 3;

        let x = area.right().saturating_sub(width + 2);
        let y = area.bottom().saturating_sub(height + 2);
        let toast_area = Rect::new(x, y, width, height).intersection(area);

        let border = match self.kind {
            ToastKind::Info => theme.highlight,
            ToastKind::Error => theme.error,
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(theme.background));

        let text = Paragraph::new(self.message.as_str())
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.foreground))
            .block(block);

        f.render_widget(Clear, toast_area);
        f.render_widget(text, toast_area);
    }
}
