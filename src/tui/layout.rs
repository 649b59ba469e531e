//! Layout helpers: width breakpoints and overlay placement
//!
//! Width thresholds live here so render code carries no magic numbers.

use ratatui::layout::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Breakpoint {
    /// < 60 cols: split pane, minimal terminal
    Compact,
    /// 60-119 cols
    Normal,
    /// 120+ cols: room for the form beside the table
    Wide,
}

impl Breakpoint {
    pub fn from_width(width: u16) -> Self {
        match width {
            0..=59 => Breakpoint::Compact,
            60..=119 => Breakpoint::Normal,
            _ => Breakpoint::Wide,
        }
    }

    /// Check if at least this breakpoint (inclusive)
    pub fn at_least(&self, min: Breakpoint) -> bool {
        *self >= min
    }
}

/// A `width` x `height` rect centered in `area`, shrunk to fit
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakpoint_thresholds() {
        assert_eq!(Breakpoint::from_width(40), Breakpoint::Compact);
        assert_eq!(Breakpoint::from_width(59), Breakpoint::Compact);
        assert_eq!(Breakpoint::from_width(60), Breakpoint::Normal);
        assert_eq!(Breakpoint::from_width(119), Breakpoint::Normal);
        assert_eq!(Breakpoint::from_width(120), Breakpoint::Wide);
    }

    #[test]
    fn at_least_comparisons() {
        let normal = Breakpoint::Normal;
        assert!(normal.at_least(Breakpoint::Compact));
        assert!(normal.at_least(Breakpoint::Normal));
        assert!(!normal.at_least(Breakpoint::Wide));
    }

    #[test]
    fn centered_rect_fits_inside_area() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(centered_rect(40, 10, area), Rect::new(30, 15, 40, 10));

        let small = Rect::new(2, 1, 20, 5);
        let rect = centered_rect(40, 10, small);
        assert_eq!(rect, Rect::new(2, 1, 20, 5));
    }
}
