/// Scroll offsets of a view whose content may be larger than the area it is drawn into.
#[derive(Clone, Copy, Debug, Default)]
pub struct ViewportState {
    pub x: u32,
    pub y: u32,
    pub viewport_w: u16,
    pub viewport_h: u16,
    pub content_w: u32,
    pub content_h: u32,
}

impl ViewportState {
    pub fn set_viewport(&mut self, w: u16, h: u16) {
        self.viewport_w = w;
        self.viewport_h = h;
        self.clamp();
    }

    pub fn set_content(&mut self, w: u32, h: u32) {
        self.content_w = w;
        self.content_h = h;
        self.clamp();
    }

    pub fn clamp(&mut self) {
        self.y = self.y.min(self.max_y());
        self.x = self.x.min(self.max_x());
    }

    pub fn scroll_y_by(&mut self, delta: i32) {
        let next = self.y as i64 + delta as i64;
        self.y = next.clamp(0, self.max_y() as i64) as u32;
    }

    pub fn page_down(&mut self) {
        self.scroll_y_by(self.page_step());
    }

    pub fn page_up(&mut self) {
        self.scroll_y_by(-self.page_step());
    }

    /// Rows moved by a page jump: one viewport minus one row of overlap.
    pub fn page_step(&self) -> i32 {
        self.viewport_h.saturating_sub(1).max(1) as i32
    }

    pub fn to_top(&mut self) {
        self.y = 0;
    }

    pub fn to_bottom(&mut self) {
        self.y = self.max_y();
    }

    /// Scrolls vertically by the smallest amount that makes content row `row` visible.
    pub fn ensure_row_visible(&mut self, row: u32) {
        if row < self.y {
            self.y = row;
        } else if self.viewport_h > 0 && row >= self.y.saturating_add(self.viewport_h as u32) {
            self.y = row.saturating_sub(self.viewport_h.saturating_sub(1) as u32);
        }
        self.clamp();
    }

    /// Scrolls horizontally by the smallest amount that makes content column `col` visible.
    pub fn ensure_col_visible(&mut self, col: u32) {
        if col < self.x {
            self.x = col;
        } else if self.viewport_w > 0 && col >= self.x.saturating_add(self.viewport_w as u32) {
            self.x = col.saturating_sub(self.viewport_w.saturating_sub(1) as u32);
        }
    }

    fn max_y(&self) -> u32 {
        self.content_h.saturating_sub(self.viewport_h as u32)
    }

    fn max_x(&self) -> u32 {
        self.content_w.saturating_sub(self.viewport_w as u32)
    }
}
