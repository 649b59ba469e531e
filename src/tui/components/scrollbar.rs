//! Vertical scrollbar for the list panels

use crate::tui::scroll::ScrollState;
use ratatui::{
    layout::Rect,
    widgets::{Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

/// End caps drawn above and below the track
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollbarEnds {
    /// `▲` and `▼`, for the report table where rows are the unit of travel
    Arrows,
    Bare,
}

/// Draw a scrollbar on the right edge of `area` while `scroll` overflows
pub fn render_scrollbar(f: &mut Frame, area: Rect, scroll: &ScrollState, ends: ScrollbarEnds) {
    if !scroll.needs_scrollbar() {
        return;
    }

    let (begin, end) = match ends {
        ScrollbarEnds::Arrows => (Some("▲"), Some("▼")),
        ScrollbarEnds::Bare => (None, None),
    };
    let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .begin_symbol(begin)
        .end_symbol(end);

    // Thumb travel spans offsets, not items: the last offset pins it to the bottom
    let travel = scroll.total().saturating_sub(scroll.viewport());
    let mut state = ScrollbarState::new(travel).position(scroll.offset());

    f.render_stateful_widget(scrollbar, area, &mut state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn right_edge(scroll: &ScrollState, ends: ScrollbarEnds) -> String {
        let mut terminal = Terminal::new(TestBackend::new(10, 6)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                render_scrollbar(f, area, scroll, ends);
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        (0..6).map(|y| buffer[(9, y)].symbol().to_string()).collect()
    }

    #[test]
    fn nothing_drawn_when_content_fits() {
        let mut scroll = ScrollState::manual();
        scroll.update_dimensions(4, 6);
        assert_eq!(right_edge(&scroll, ScrollbarEnds::Arrows).trim(), "");
    }

    #[test]
    fn overflow_draws_caps_on_request() {
        let mut scroll = ScrollState::manual();
        scroll.update_dimensions(30, 6);

        let arrows = right_edge(&scroll, ScrollbarEnds::Arrows);
        assert!(arrows.starts_with('▲'));
        assert!(arrows.ends_with('▼'));

        let bare = right_edge(&scroll, ScrollbarEnds::Bare);
        assert!(!bare.contains('▲'));
        assert!(!bare.trim().is_empty());
    }
}
