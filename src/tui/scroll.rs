// Scroll state shared by the list panels
//
// Each panel owns one of these and syncs it with content and viewport size
// every frame. Auto-follow keeps the view pinned to the newest item until the
// operator scrolls away.

/// Scroll position of one panel, in items
#[derive(Debug, Clone)]
pub struct ScrollState {
    /// Index of the item at the top of the viewport
    offset: usize,
    total: usize,
    viewport: usize,

    /// Snap to the bottom when content grows
    pub auto_follow: bool,
}

impl ScrollState {
    /// Scroll state that follows new content
    pub fn new() -> Self {
        Self {
            offset: 0,
            total: 0,
            viewport: 0,
            auto_follow: true,
        }
    }

    /// Scroll state that stays where the operator put it
    pub fn manual() -> Self {
        Self {
            auto_follow: false,
            ..Self::new()
        }
    }

    /// Update content and viewport dimensions; call once per frame
    pub fn update_dimensions(&mut self, total: usize, viewport: usize) {
        self.total = total;
        self.viewport = viewport;

        if self.auto_follow {
            self.offset = self.max_offset();
        } else {
            self.offset = self.offset.min(self.max_offset());
        }
    }

    /// Scroll up by one item; disables auto-follow
    pub fn scroll_up(&mut self) {
        if self.offset > 0 {
            self.offset -= 1;
            self.auto_follow = false;
        }
    }

    /// Scroll down by one item; re-enables auto-follow at the bottom
    pub fn scroll_down(&mut self) {
        if self.offset < self.max_offset() {
            self.offset += 1;
        }
        if self.total > 0 && self.offset >= self.max_offset() {
            self.auto_follow = true;
        }
    }

    pub fn page_up(&mut self) {
        let page = self.viewport.max(1);
        self.offset = self.offset.saturating_sub(page);
        self.auto_follow = false;
    }

    pub fn page_down(&mut self) {
        let page = self.viewport.max(1);
        self.offset = (self.offset + page).min(self.max_offset());
        if self.offset >= self.max_offset() {
            self.auto_follow = true;
        }
    }

    /// Move the viewport just enough to show `index`
    pub fn ensure_visible(&mut self, index: usize) {
        if index < self.offset {
            self.offset = index;
        } else if self.viewport > 0 && index >= self.offset + self.viewport {
            self.offset = index + 1 - self.viewport;
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Visible item range as `(start, end)`, end exclusive
    pub fn visible_range(&self) -> (usize, usize) {
        let start = self.offset;
        let end = (self.offset + self.viewport).min(self.total);
        (start, end.max(start))
    }

    pub fn needs_scrollbar(&self) -> bool {
        self.total > self.viewport
    }

    fn max_offset(&self) -> usize {
        self.total.saturating_sub(self.viewport)
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn viewport(&self) -> usize {
        self.viewport
    }
}

impl Default for ScrollState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_follow_on_new_content() {
        let mut scroll = ScrollState::new();
        scroll.update_dimensions(10, 5);
        assert_eq!(scroll.offset(), 5);

        scroll.update_dimensions(15, 5);
        assert_eq!(scroll.offset(), 10);
    }

    #[test]
    fn test_scroll_up_disables_auto_follow() {
        let mut scroll = ScrollState::new();
        scroll.update_dimensions(20, 5);

        scroll.scroll_up();
        assert!(!scroll.auto_follow);
        assert_eq!(scroll.offset(), 14);

        scroll.scroll_down();
        assert!(scroll.auto_follow);
    }

    #[test]
    fn test_manual_scroll_mode_stays_put() {
        let mut scroll = ScrollState::manual();
        scroll.update_dimensions(10, 5);
        assert_eq!(scroll.offset(), 0);
        scroll.update_dimensions(15, 5);
        assert_eq!(scroll.offset(), 0);
    }

    #[test]
    fn test_ensure_visible() {
        let mut scroll = ScrollState::manual();
        scroll.update_dimensions(30, 5);

        scroll.ensure_visible(7);
        assert_eq!(scroll.visible_range(), (3, 8));

        scroll.ensure_visible(1);
        assert_eq!(scroll.visible_range(), (1, 6));

        // Already visible: no movement
        scroll.ensure_visible(4);
        assert_eq!(scroll.offset(), 1);
    }

    #[test]
    fn test_shrinking_content_clamps_offset() {
        let mut scroll = ScrollState::manual();
        scroll.update_dimensions(30, 5);
        scroll.page_down();
        scroll.page_down();
        assert_eq!(scroll.offset(), 10);

        scroll.update_dimensions(8, 5);
        assert_eq!(scroll.offset(), 3);
        assert!(scroll.needs_scrollbar());
    }
}
