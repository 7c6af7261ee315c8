use crate::keymap::Binding;
use crate::render;
use crate::theme::Theme;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Span;

#[derive(Clone, Debug)]
pub struct HelpBarOptions {
    /// Overrides the theme's muted style when set.
    pub style: Option<Style>,
    /// Overrides the theme's accent style for keys when set.
    pub key_style: Option<Style>,
    pub separator: String,
    pub space: String,
}

impl Default for HelpBarOptions {
    fn default() -> Self {
        Self {
            style: None,
            key_style: None,
            separator: " • ".to_string(),
            space: " ".to_string(),
        }
    }
}

/// One-line summary of key bindings, e.g. `space select • s sort`.
#[derive(Clone, Debug, Default)]
pub struct HelpBar {
    bindings: Vec<Binding>,
    options: HelpBarOptions,
}

impl HelpBar {
    pub fn new(bindings: Vec<Binding>) -> Self {
        Self {
            bindings,
            options: HelpBarOptions::default(),
        }
    }

    pub fn with_options(bindings: Vec<Binding>, options: HelpBarOptions) -> Self {
        Self { bindings, options }
    }

    pub fn set_bindings(&mut self, bindings: Vec<Binding>) {
        self.bindings = bindings;
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let style = self.options.style.unwrap_or(theme.text_muted);
        let key_style = self.options.key_style.unwrap_or(theme.accent);
        let spans = self.to_spans(style, key_style);
        buf.set_style(area, style);
        render::render_spans_clipped(area.x, area.y, 0, area.width, buf, &spans, style);
    }

    fn to_spans(&self, style: Style, key_style: Style) -> Vec<Span<'_>> {
        let mut spans: Vec<Span<'_>> = Vec::new();
        for (i, b) in self.bindings.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(self.options.separator.as_str(), style));
            }
            spans.push(Span::styled(b.help_key.as_str(), key_style));
            spans.push(Span::styled(self.options.space.as_str(), style));
            spans.push(Span::styled(b.help_desc.as_str(), style));
        }
        spans
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap;
    use ratatui::buffer::Buffer;

    #[test]
    fn help_bar_renders_narrow_width() {
        let bindings = vec![keymap::Binding::new(
            "q",
            "quit",
            vec![keymap::key_char('q')],
        )];
        let hb = HelpBar::new(bindings);
        let mut buf = Buffer::empty(Rect::new(0, 0, 3, 1));
        hb.render(Rect::new(0, 0, 3, 1), &mut buf, &Theme::default());
    }

    #[test]
    fn help_bar_joins_bindings_with_separator() {
        let hb = HelpBar::new(vec![
            keymap::Binding::new("a", "all", vec![keymap::key_char('a')]),
            keymap::Binding::new("s", "sort", vec![keymap::key_char('s')]),
        ]);
        let mut buf = Buffer::empty(Rect::new(0, 0, 20, 1));
        hb.render(Rect::new(0, 0, 20, 1), &mut buf, &Theme::default());
        let text: String = (0..20).map(|x| buf[(x, 0)].symbol().to_string()).collect();
        assert_eq!(text.trim_end(), "a all • s sort");
    }
}
