use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Span;
use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

use crate::viewport::ViewportState;

const TAB_WIDTH: usize = 4;

pub fn render_scrollbar(area: Rect, buf: &mut Buffer, state: &ViewportState, style: Style) {
    buf.set_style(area, style);
    if area.height == 0 {
        return;
    }
    if state.content_h <= state.viewport_h as u32 || state.content_h == 0 {
        for dy in 0..area.height {
            buf.set_stringn(area.x, area.y + dy, " ", 1, style);
        }
        return;
    }

    let track_h = area.height as f64;
    let thumb_h = ((state.viewport_h as f64 / state.content_h as f64) * track_h)
        .round()
        .clamp(1.0, track_h) as u16;

    let max_y = state
        .content_h
        .saturating_sub(state.viewport_h as u32)
        .max(1) as f64;
    let thumb_top = ((state.y as f64 / max_y) * (track_h - thumb_h as f64))
        .round()
        .clamp(0.0, (track_h - thumb_h as f64).max(0.0)) as u16;

    for dy in 0..area.height {
        let ch = if dy >= thumb_top && dy < thumb_top + thumb_h {
            "█"
        } else {
            " "
        };
        buf.set_stringn(area.x, area.y + dy, ch, 1, style);
    }
}

/// Writes characters into a single buffer row, skipping `start_col` display columns and stopping
/// after `max_cols`. Wide characters that straddle either edge are dropped.
struct ClippedWriter<'a> {
    buf: &'a mut Buffer,
    x: u16,
    y: u16,
    start_col: usize,
    max_cols: usize,
    col: usize,
    out_cols: usize,
}

impl ClippedWriter<'_> {
    /// Returns `false` once the row is full.
    fn push(&mut self, ch: char, style: Style) -> bool {
        if ch == '\t' {
            for _ in 0..TAB_WIDTH {
                if !self.push(' ', style) {
                    return false;
                }
            }
            return true;
        }

        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if w == 0 {
            return true;
        }
        if self.col < self.start_col {
            self.col += w;
            return true;
        }
        if self.out_cols + w > self.max_cols {
            return false;
        }

        let mut tmp = [0u8; 4];
        let x = self.x + self.out_cols as u16;
        if let Some(cell) = self.buf.cell_mut((x, self.y)) {
            cell.set_style(style);
            cell.set_symbol(ch.encode_utf8(&mut tmp));
        }
        if w == 2
            && let Some(cell) = self.buf.cell_mut((x + 1, self.y))
        {
            cell.set_style(style);
            cell.set_symbol("");
        }
        self.out_cols += w;
        self.col += w;
        true
    }
}

pub fn render_str_clipped(
    x: u16,
    y: u16,
    start_col: u32,
    max_cols: u16,
    buf: &mut Buffer,
    input: &str,
    style: Style,
) {
    if max_cols == 0 {
        return;
    }
    let mut w = ClippedWriter {
        buf,
        x,
        y,
        start_col: start_col as usize,
        max_cols: max_cols as usize,
        col: 0,
        out_cols: 0,
    };
    for ch in input.chars() {
        if !w.push(ch, style) {
            return;
        }
    }
}

pub fn render_spans_clipped(
    x: u16,
    y: u16,
    start_col: u32,
    max_cols: u16,
    buf: &mut Buffer,
    spans: &[Span<'_>],
    fallback_style: Style,
) {
    if max_cols == 0 {
        return;
    }
    let mut w = ClippedWriter {
        buf,
        x,
        y,
        start_col: start_col as usize,
        max_cols: max_cols as usize,
        col: 0,
        out_cols: 0,
    };
    for span in spans {
        let style = fallback_style.patch(span.style);
        for ch in span.content.chars() {
            if !w.push(ch, style) {
                return;
            }
        }
    }
}

/// Renders `input` horizontally centered inside `area` on its first row.
pub fn render_str_centered(area: Rect, buf: &mut Buffer, input: &str, style: Style) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let w = display_width(input).min(area.width as usize) as u16;
    let dx = (area.width - w) / 2;
    render_str_clipped(area.x + dx, area.y, 0, area.width - dx, buf, input, style);
}

pub fn display_width(input: &str) -> usize {
    if input.contains('\t') {
        UnicodeWidthStr::width(input.replace('\t', "    ").as_str())
    } else {
        UnicodeWidthStr::width(input)
    }
}

pub fn slice_by_cols(input: &str, start_col: u32, max_cols: u16) -> String {
    if max_cols == 0 {
        return String::new();
    }

    let start_col = start_col as usize;
    let max_cols = max_cols as usize;
    let input = if input.contains('\t') {
        std::borrow::Cow::Owned(input.replace('\t', "    "))
    } else {
        std::borrow::Cow::Borrowed(input)
    };

    let mut col = 0usize;
    let mut out_cols = 0usize;
    let mut out = String::new();

    for ch in input.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if w == 0 {
            continue;
        }
        if col < start_col {
            col += w;
            continue;
        }
        if out_cols + w > max_cols {
            break;
        }
        out.push(ch);
        col += w;
        out_cols += w;
    }

    out
}

/// Truncates `input` to `max_cols` display columns, replacing the tail with `…` when it does not
/// fit.
pub fn truncate_with_ellipsis(input: &str, max_cols: u16) -> String {
    if display_width(input) <= max_cols as usize {
        return input.to_string();
    }
    if max_cols == 0 {
        return String::new();
    }
    let mut out = slice_by_cols(input, 0, max_cols - 1);
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::buffer::Buffer;

    fn row_text(buf: &Buffer, y: u16) -> String {
        let area = buf.area;
        (area.x..area.x + area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn slice_by_cols_handles_tabs_and_width() {
        assert_eq!(slice_by_cols("\t1", 0, 4), "    ");
        assert_eq!(slice_by_cols("abcdef", 0, 3), "abc");
        assert_eq!(slice_by_cols("abcdef", 2, 3), "cde");
    }

    #[test]
    fn slice_by_cols_skips_partial_wide_char_overlap() {
        assert_eq!(slice_by_cols("你好", 0, 2), "你");
        assert_eq!(slice_by_cols("你好", 2, 2), "好");
        assert_eq!(slice_by_cols("你好", 1, 2), "好");
    }

    #[test]
    fn truncates_with_ellipsis() {
        assert_eq!(truncate_with_ellipsis("Aisha", 10), "Aisha");
        assert_eq!(truncate_with_ellipsis("aisha@example.com", 6), "aisha…");
        assert_eq!(truncate_with_ellipsis("abc", 0), "");
    }

    #[test]
    fn render_str_clipped_stops_at_max_cols() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 6, 1));
        render_str_clipped(1, 0, 0, 3, &mut buf, "abcdef", Style::default());
        assert_eq!(row_text(&buf, 0), " abc  ");
    }

    #[test]
    fn render_str_centered_pads_both_sides() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 7, 1));
        render_str_centered(Rect::new(0, 0, 7, 1), &mut buf, "abc", Style::default());
        assert_eq!(row_text(&buf, 0), "  abc  ");
    }

    #[test]
    fn render_scrollbar_does_not_panic() {
        let mut state = ViewportState::default();
        state.set_viewport(10, 5);
        state.set_content(10, 50);
        let mut buf = Buffer::empty(Rect::new(0, 0, 1, 5));
        render_scrollbar(Rect::new(0, 0, 1, 5), &mut buf, &state, Style::default());
    }
}
