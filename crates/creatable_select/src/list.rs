//! Scroll window of the dropdown list.
//!
//! The list shows at most `visible_count` rows. When the active item moves
//! outside the window, the window scrolls the minimum distance needed to
//! bring it back. Row height is measured by the host after the first row
//! renders and is zero until then.

use tracing::trace;

/// Visible window over the projected option list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListViewport {
    item_height: u32,
    visible_count: usize,
    first_visible: usize,
}

impl ListViewport {
    /// Creates a viewport with no measured row height.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the measured row height.
    pub fn measure(&mut self, item_height: u32) {
        if self.item_height != item_height {
            trace!(list.item_height = item_height, "list row measured");
            self.item_height = item_height;
        }
    }

    /// Measured row height; zero before the first measurement.
    pub fn item_height(&self) -> u32 {
        self.item_height
    }

    /// Rows shown at once.
    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    /// Index of the first row in the window.
    pub fn first_visible(&self) -> usize {
        self.first_visible
    }

    /// Range of row indices currently in the window.
    pub fn visible_range(&self) -> std::ops::Range<usize> {
        self.first_visible..self.first_visible + self.visible_count
    }

    /// Resizes the window to `visible_count` rows over a list of `len`
    /// rows and scrolls so `active` is inside it.
    pub fn follow(&mut self, active: usize, len: usize, visible_count: usize) {
        self.visible_count = visible_count.min(len);
        if self.visible_count == 0 {
            self.first_visible = 0;
            return;
        }

        let active = active.min(len - 1);
        if active < self.first_visible {
            self.first_visible = active;
        } else if active >= self.first_visible + self.visible_count {
            self.first_visible = active + 1 - self.visible_count;
        }

        // Shrinking lists must not leave the window hanging past the end.
        self.first_visible = self.first_visible.min(len - self.visible_count);
    }

    /// Scroll offset of the window in pixels.
    pub fn scroll_top_px(&self) -> u64 {
        self.first_visible as u64 * u64::from(self.item_height)
    }

    /// Height of the window in pixels.
    pub fn height_px(&self) -> u64 {
        self.visible_count as u64 * u64::from(self.item_height)
    }

    /// Scrolls back to the top.
    pub fn reset(&mut self) {
        self.first_visible = 0;
    }
}
