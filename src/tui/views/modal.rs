// Modal overlay rendering
//
// Modals are centered on top of the main content:
// - Help: keyboard shortcuts and the active theme
// - Alert: a message that must be dismissed

use crate::theme::THEME_NAMES;
use crate::tui::app::App;
use crate::tui::layout::centered_rect;
use crate::tui::modal::Modal;
use ratatui::{
    layout::Alignment,
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

pub fn render(f: &mut Frame, modal: &Modal, app: &App) {
    match modal {
        Modal::Help => render_help(f, app),
        Modal::Alert { title, message } => render_alert(f, app, title, message),
    }
}

fn render_help(f: &mut Frame, app: &App) {
    let key_style = Style::default().fg(app.theme.button);
    let desc_style = Style::default().fg(app.theme.foreground);
    let header_style = Style::default()
        .fg(app.theme.highlight)
        .add_modifier(Modifier::BOLD);
    let divider_style = Style::default().fg(app.theme.border);

    // "    key         description"
    let kb = |key: &str, desc: &str| -> Line {
        Line::from(vec![
            Span::raw("    "),
            Span::styled(format!("{:<12}", key), key_style),
            Span::styled(desc.to_string(), desc_style),
        ])
    };

    let content = Text::from(vec![
        Line::raw(""),
        Line::from(Span::styled("  Screens", header_style)),
        kb("p", "Choose profile"),
        kb("Esc", "Back to reports"),
        kb("r", "Reload current screen"),
        Line::raw(""),
        Line::from(Span::styled("  Request Form", header_style)),
        kb("↑/↓", "Select field"),
        kb("←/→", "Cycle ad / report type"),
        kb("0-9, -", "Type a date"),
        kb("Backspace", "Erase"),
        kb("Enter", "Request report"),
        Line::raw(""),
        Line::from(Span::styled("  Report Table", header_style)),
        kb("↑/↓", "Select report"),
        kb("←/→", "Scroll columns"),
        kb("Enter", "Check status"),
        kb("y", "Copy report as JSON"),
        Line::raw(""),
        Line::from(Span::styled("  General", header_style)),
        kb("Tab", "Cycle panel focus"),
        kb("?", "Toggle this help"),
        kb("q", "Quit"),
        Line::raw(""),
        Line::from(Span::styled(
            "  ──────────────────────────────────",
            divider_style,
        )),
        Line::from(vec![
            Span::styled("  Theme: ", desc_style),
            Span::styled(&app.theme.name, key_style),
            Span::styled(format!(" ({})", THEME_NAMES.join(", ")), divider_style),
        ]),
    ]);

    let area = centered_rect(48, 31, f.area());
    f.render_widget(Clear, area);

    let paragraph = Paragraph::new(content)
        .style(Style::default().bg(app.theme.background))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.highlight))
                .border_type(app.theme.border_type)
                .title(" Help ")
                .title_bottom(Line::from(" Press ? or Esc to close ").centered()),
        );

    f.render_widget(paragraph, area);
}

fn render_alert(f: &mut Frame, app: &App, title: &str, message: &str) {
    let width = (message.width() as u16 + 6).clamp(36, 72);
    let area = centered_rect(width, 7, f.area());
    f.render_widget(Clear, area);

    let paragraph = Paragraph::new(vec![Line::raw(""), Line::raw(message.to_string())])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .style(
            Style::default()
                .fg(app.theme.foreground)
                .bg(app.theme.background),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.error))
                .border_type(app.theme.border_type)
                .title(format!(" {} ", title))
                .title_bottom(Line::from(" Enter to dismiss ").centered()),
        );

    f.render_widget(paragraph, area);
}
