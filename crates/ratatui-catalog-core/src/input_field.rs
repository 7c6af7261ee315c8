//! Single-line labelled text input.
//!
//! [`InputField`] renders an optional label, a box in one of three [`Variant`]s, trailing
//! adornments (loading spinner, clear button, password reveal toggle) and at most one auxiliary
//! line underneath: helper text while valid, the error message while invalid.
//!
//! The field works either *uncontrolled* (it keeps the value itself) or *controlled* (the caller
//! passes the value in with [`InputField::set_value`] and applies the edits reported through
//! [`InputFieldAction::Changed`]).

use crate::input::InputEvent;
use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::input::MouseEvent;
use crate::keymap;
use crate::render;
use crate::theme::Theme;
use crate::viewport::ViewportState;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui::widgets::Widget;
use tracing::trace;
use unicode_width::UnicodeWidthChar;

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const CLEAR_GLYPH: &str = "×";
const REVEAL_GLYPH: &str = "◉";
const CONCEAL_GLYPH: &str = "○";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Variant {
    /// Solid background, no border.
    Filled,
    /// Full border around the value.
    #[default]
    Outlined,
    /// Underline only.
    Ghost,
}

impl Variant {
    fn border_rows(self) -> u16 {
        match self {
            Variant::Filled => 0,
            Variant::Outlined => 2,
            Variant::Ghost => 1,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Size {
    Sm,
    #[default]
    Md,
    Lg,
}

impl Size {
    pub fn padding_x(self) -> u16 {
        match self {
            Size::Sm => 0,
            Size::Md => 1,
            Size::Lg => 2,
        }
    }

    pub fn padding_y(self) -> u16 {
        match self {
            Size::Sm | Size::Md => 0,
            Size::Lg => 1,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InputKind {
    #[default]
    Text,
    Password,
}

#[derive(Clone, Debug)]
pub struct InputFieldOptions {
    pub label: Option<String>,
    pub placeholder: Option<String>,
    pub helper_text: Option<String>,
    pub error_message: Option<String>,
    pub disabled: bool,
    pub invalid: bool,
    pub loading: bool,
    pub variant: Variant,
    pub size: Size,
    pub kind: InputKind,
    pub clearable: bool,
    pub mask_char: char,
}

impl Default for InputFieldOptions {
    fn default() -> Self {
        Self {
            label: None,
            placeholder: None,
            helper_text: None,
            error_message: None,
            disabled: false,
            invalid: false,
            loading: false,
            variant: Variant::default(),
            size: Size::default(),
            kind: InputKind::default(),
            clearable: false,
            mask_char: '•',
        }
    }
}

#[derive(Clone, Debug)]
pub struct InputFieldBindings {
    pub clear: Vec<KeyEvent>,
    pub toggle_password: Vec<KeyEvent>,
    pub submit: Vec<KeyEvent>,
}

impl Default for InputFieldBindings {
    fn default() -> Self {
        Self {
            clear: vec![keymap::key_ctrl('u')],
            toggle_password: vec![keymap::key_ctrl('r')],
            submit: vec![keymap::key(KeyCode::Enter)],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputFieldAction {
    None,
    Redraw,
    /// The value the field proposes after an edit. Uncontrolled fields have already applied it.
    Changed(String),
    Submitted(String),
}

/// The auxiliary line shown under the field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldDescription<'a> {
    Helper(&'a str),
    Error(&'a str),
}

impl<'a> FieldDescription<'a> {
    pub fn text(&self) -> &'a str {
        match *self {
            FieldDescription::Helper(s) | FieldDescription::Error(s) => s,
        }
    }
}

/// Screen rectangles computed for one render pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct FieldLayout {
    label: Option<Rect>,
    frame: Rect,
    text: Rect,
    spinner: Option<Rect>,
    clear: Option<Rect>,
    toggle: Option<Rect>,
    description: Option<Rect>,
}

#[derive(Clone, Debug, Default)]
pub struct InputField {
    options: InputFieldOptions,
    bindings: InputFieldBindings,
    local: String,
    controlled: Option<String>,
    cursor: usize,
    show_password: bool,
    focused: bool,
    spinner_frame: usize,
    /// Horizontal scroll of the value inside the text rect.
    pub state: ViewportState,
    layout: Option<FieldLayout>,
}

impl InputField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: InputFieldOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> &InputFieldOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: InputFieldOptions) {
        self.options = options;
        if self.options.kind != InputKind::Password {
            self.show_password = false;
        }
    }

    pub fn bindings(&self) -> &InputFieldBindings {
        &self.bindings
    }

    pub fn set_bindings(&mut self, bindings: InputFieldBindings) {
        self.bindings = bindings;
    }

    /// `Some(value)` makes the field controlled and echoes `value`; `None` returns the field to
    /// its own local value.
    pub fn set_value(&mut self, value: Option<String>) {
        self.controlled = value;
        self.clamp_cursor();
    }

    /// Replaces the local value used while uncontrolled and moves the cursor to its end.
    pub fn set_default_value(&mut self, value: impl Into<String>) {
        self.local = value.into();
        if self.controlled.is_none() {
            self.cursor = self.local.chars().count();
        }
    }

    pub fn value(&self) -> &str {
        self.controlled.as_deref().unwrap_or(&self.local)
    }

    pub fn is_controlled(&self) -> bool {
        self.controlled.is_some()
    }

    pub fn is_invalid(&self) -> bool {
        self.options.invalid
    }

    pub fn is_interactive(&self) -> bool {
        !self.options.disabled && !self.options.loading
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    pub fn show_password(&self) -> bool {
        self.show_password
    }

    /// `true` while the value is rendered with the mask character.
    pub fn masked(&self) -> bool {
        self.options.kind == InputKind::Password && !self.show_password
    }

    /// Cursor position as a char index into [`Self::value`].
    pub fn cursor(&self) -> usize {
        self.cursor.min(self.value().chars().count())
    }

    pub fn description(&self) -> Option<FieldDescription<'_>> {
        if self.options.invalid {
            self.options
                .error_message
                .as_deref()
                .map(FieldDescription::Error)
        } else {
            self.options
                .helper_text
                .as_deref()
                .map(FieldDescription::Helper)
        }
    }

    pub fn shows_clear_button(&self) -> bool {
        self.options.clearable && !self.options.loading && !self.value().is_empty()
    }

    pub fn shows_password_toggle(&self) -> bool {
        self.options.kind == InputKind::Password && !self.options.loading
    }

    /// Rows needed to draw the field without clipping.
    pub fn required_height(&self) -> u16 {
        let label = u16::from(self.options.label.is_some());
        let description = u16::from(self.description().is_some());
        label + self.box_height() + description
    }

    /// Advances the loading spinner. Returns `true` if a redraw is needed.
    pub fn tick(&mut self) -> bool {
        if !self.options.loading {
            return false;
        }
        self.spinner_frame = (self.spinner_frame + 1) % SPINNER_FRAMES.len();
        true
    }

    pub fn handle_event(&mut self, event: InputEvent) -> InputFieldAction {
        if !self.is_interactive() {
            return InputFieldAction::None;
        }
        match event {
            InputEvent::Key(key) => self.handle_key(key),
            InputEvent::Paste(s) => {
                let s: String = s.chars().filter(|c| *c != '\n' && *c != '\r').collect();
                if s.is_empty() {
                    return InputFieldAction::None;
                }
                self.insert_str(&s)
            }
            InputEvent::Mouse(m) => self.handle_mouse(m),
        }
    }

    /// Clears the value if the clear button is currently offered.
    pub fn clear(&mut self) -> InputFieldAction {
        if !self.is_interactive() || !self.shows_clear_button() {
            return InputFieldAction::None;
        }
        self.commit(String::new(), 0)
    }

    pub fn toggle_password(&mut self) -> InputFieldAction {
        if !self.shows_password_toggle() {
            return InputFieldAction::None;
        }
        self.show_password = !self.show_password;
        trace!(show_password = self.show_password, "input field password visibility toggled");
        InputFieldAction::Redraw
    }

    /// Where the terminal cursor should be placed when the field is focused.
    pub fn cursor_pos(&self, area: Rect) -> Option<(u16, u16)> {
        if !self.focused || !self.is_interactive() {
            return None;
        }
        let layout = self.compute_layout(area);
        let text = layout.text;
        if text.width == 0 || text.height == 0 {
            return None;
        }
        let x = (self.cursor_display_x() as u32).checked_sub(self.state.x)?;
        if x >= text.width as u32 {
            return None;
        }
        Some((text.x + x as u16, text.y))
    }

    pub fn render(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        if area.width == 0 || area.height == 0 {
            self.layout = None;
            return;
        }
        let layout = self.compute_layout(area);

        let dim = if self.is_interactive() {
            Style::default()
        } else {
            Style::default().add_modifier(Modifier::DIM)
        };

        if let (Some(rect), Some(label)) = (layout.label, self.options.label.as_deref()) {
            let style = theme
                .text_primary
                .add_modifier(Modifier::BOLD)
                .patch(dim);
            render::render_str_clipped(rect.x, rect.y, 0, rect.width, buf, label, style);
        }

        let (field_style, border_style) = self.box_styles(theme);
        let field_style = field_style.patch(dim);
        let border_style = border_style.patch(dim);
        self.render_frame(layout.frame, buf, field_style, border_style);

        self.state.set_viewport(layout.text.width, layout.text.height.min(1));
        let shown = self.display_value();
        self.state.set_content(render::display_width(&shown) as u32 + 1, 1);
        self.state.ensure_col_visible(self.cursor_display_x() as u32);
        if shown.is_empty() {
            if let Some(placeholder) = self.options.placeholder.as_deref() {
                let style = field_style.patch(theme.placeholder).patch(dim);
                render::render_str_clipped(
                    layout.text.x,
                    layout.text.y,
                    0,
                    layout.text.width,
                    buf,
                    placeholder,
                    style,
                );
            }
        } else {
            render::render_str_clipped(
                layout.text.x,
                layout.text.y,
                self.state.x,
                layout.text.width,
                buf,
                &shown,
                field_style,
            );
        }

        if let Some(r) = layout.spinner {
            let frame = SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()];
            buf.set_stringn(r.x, r.y, frame, 1, field_style.patch(theme.text_muted));
        }
        if let Some(r) = layout.clear {
            buf.set_stringn(r.x, r.y, CLEAR_GLYPH, 1, field_style.patch(theme.text_muted));
        }
        if let Some(r) = layout.toggle {
            let glyph = if self.show_password {
                CONCEAL_GLYPH
            } else {
                REVEAL_GLYPH
            };
            buf.set_stringn(r.x, r.y, glyph, 1, field_style.patch(theme.text_muted));
        }

        if let (Some(rect), Some(desc)) = (layout.description, self.description()) {
            let style = match desc {
                FieldDescription::Helper(_) => theme.text_muted,
                FieldDescription::Error(_) => theme.danger,
            };
            render::render_str_clipped(rect.x, rect.y, 0, rect.width, buf, desc.text(), style);
        }

        self.layout = Some(layout);
    }

    fn handle_key(&mut self, key: KeyEvent) -> InputFieldAction {
        if keymap::any_matches(&self.bindings.clear, &key) {
            return self.clear();
        }
        if keymap::any_matches(&self.bindings.toggle_password, &key) {
            return self.toggle_password();
        }
        if keymap::any_matches(&self.bindings.submit, &key) {
            trace!("input field submitted");
            return InputFieldAction::Submitted(self.value().to_string());
        }

        let len = self.value().chars().count();
        let cursor = self.cursor();
        match key.code {
            KeyCode::Char(c) if key.modifiers.is_text_entry() => {
                let mut buf = [0u8; 4];
                self.insert_str(c.encode_utf8(&mut buf))
            }
            KeyCode::Backspace if cursor > 0 => {
                let mut next = self.value().to_string();
                let start = byte_index_from_char_index(&next, cursor - 1);
                let end = byte_index_from_char_index(&next, cursor);
                next.replace_range(start..end, "");
                self.commit(next, cursor - 1)
            }
            KeyCode::Delete if cursor < len => {
                let mut next = self.value().to_string();
                let start = byte_index_from_char_index(&next, cursor);
                let end = byte_index_from_char_index(&next, cursor + 1);
                next.replace_range(start..end, "");
                self.commit(next, cursor)
            }
            KeyCode::Left => self.move_cursor_to(cursor.saturating_sub(1)),
            KeyCode::Right => self.move_cursor_to((cursor + 1).min(len)),
            KeyCode::Home => self.move_cursor_to(0),
            KeyCode::End => self.move_cursor_to(len),
            _ => InputFieldAction::None,
        }
    }

    fn handle_mouse(&mut self, m: MouseEvent) -> InputFieldAction {
        if !m.is_left_click() {
            return InputFieldAction::None;
        }
        let Some(layout) = self.layout else {
            return InputFieldAction::None;
        };
        if layout.clear.is_some_and(|r| contains(r, m.x, m.y)) {
            return self.clear();
        }
        if layout.toggle.is_some_and(|r| contains(r, m.x, m.y)) {
            return self.toggle_password();
        }
        if contains(layout.frame, m.x, m.y) {
            self.focused = true;
            let target_x = (m.x.saturating_sub(layout.text.x) as u32 + self.state.x) as usize;
            let col = col_from_display_x(&self.display_value(), target_x);
            self.cursor = col;
            return InputFieldAction::Redraw;
        }
        InputFieldAction::None
    }

    fn insert_str(&mut self, s: &str) -> InputFieldAction {
        let cursor = self.cursor();
        let mut next = self.value().to_string();
        let at = byte_index_from_char_index(&next, cursor);
        next.insert_str(at, s);
        self.commit(next, cursor + s.chars().count())
    }

    fn commit(&mut self, next: String, cursor: usize) -> InputFieldAction {
        trace!(controlled = self.is_controlled(), len = next.len(), "input field value changed");
        if self.controlled.is_none() {
            self.local = next.clone();
        }
        self.cursor = cursor;
        InputFieldAction::Changed(next)
    }

    fn move_cursor_to(&mut self, cursor: usize) -> InputFieldAction {
        if cursor == self.cursor() {
            return InputFieldAction::None;
        }
        self.cursor = cursor;
        InputFieldAction::Redraw
    }

    fn clamp_cursor(&mut self) {
        self.cursor = self.cursor();
    }

    fn display_value(&self) -> String {
        if self.masked() {
            std::iter::repeat_n(self.options.mask_char, self.value().chars().count()).collect()
        } else {
            self.value().to_string()
        }
    }

    fn cursor_display_x(&self) -> usize {
        let cursor = self.cursor();
        if self.masked() {
            return cursor * UnicodeWidthChar::width(self.options.mask_char).unwrap_or(1);
        }
        self.value()
            .chars()
            .take(cursor)
            .map(|c| UnicodeWidthChar::width(c).unwrap_or(0))
            .sum()
    }

    fn box_height(&self) -> u16 {
        self.options.variant.border_rows() + 1 + 2 * self.options.size.padding_y()
    }

    fn box_styles(&self, theme: &Theme) -> (Style, Style) {
        let field = match self.options.variant {
            Variant::Filled => theme.surface,
            Variant::Outlined | Variant::Ghost => theme.text_primary,
        };
        if self.options.invalid {
            return (field.patch(theme.danger), theme.danger);
        }
        let border = if self.focused {
            theme.accent
        } else {
            theme.border
        };
        (field, border)
    }

    fn render_frame(&self, frame: Rect, buf: &mut Buffer, field_style: Style, border_style: Style) {
        if frame.width == 0 || frame.height == 0 {
            return;
        }
        buf.set_style(frame, field_style);
        let borders = match self.options.variant {
            Variant::Filled => return,
            Variant::Outlined => Borders::ALL,
            Variant::Ghost => Borders::BOTTOM,
        };
        Block::default()
            .borders(borders)
            .border_style(border_style)
            .render(frame, buf);
    }

    fn compute_layout(&self, area: Rect) -> FieldLayout {
        let bottom = area.y.saturating_add(area.height);
        let mut y = area.y;
        let mut take = |rows: u16| -> Rect {
            let h = rows.min(bottom.saturating_sub(y));
            let r = Rect::new(area.x, y, area.width, h);
            y += h;
            r
        };

        let label = self
            .options
            .label
            .as_ref()
            .map(|_| take(1))
            .filter(|r| r.height > 0);
        let frame = take(self.box_height());
        let description = self
            .description()
            .map(|_| take(1))
            .filter(|r| r.height > 0);

        let (border_top, border_side) = match self.options.variant {
            Variant::Filled => (0, 0),
            Variant::Outlined => (1, 1),
            Variant::Ghost => (0, 0),
        };
        let pad_x = self.options.size.padding_x();
        let inner_x = frame.x + border_side + pad_x;
        let inner_w = frame.width.saturating_sub(2 * (border_side + pad_x));
        let inner_y = frame.y + border_top + self.options.size.padding_y();
        let inner_h = u16::from(inner_y < frame.y + frame.height);
        let mut content = Rect::new(inner_x, inner_y, inner_w, inner_h);

        let mut take_adornment = |show: bool| -> Option<Rect> {
            if !show || content.width < 2 || content.height == 0 {
                return None;
            }
            let r = Rect::new(content.x + content.width - 1, content.y, 1, 1);
            content.width -= 1;
            Some(r)
        };

        // Right to left: clear sits at the far edge, the password toggle to its left.
        let spinner = take_adornment(self.options.loading);
        let clear = take_adornment(self.shows_clear_button());
        let toggle = take_adornment(self.shows_password_toggle());
        if (spinner.is_some() || toggle.is_some() || clear.is_some()) && content.width > 1 {
            content.width -= 1;
        }

        FieldLayout {
            label,
            frame,
            text: content,
            spinner,
            clear,
            toggle,
            description,
        }
    }
}

fn contains(r: Rect, x: u16, y: u16) -> bool {
    x >= r.x && x < r.x.saturating_add(r.width) && y >= r.y && y < r.y.saturating_add(r.height)
}

fn col_from_display_x(line: &str, target_x: usize) -> usize {
    let mut cols = 0usize;
    let mut col = 0usize;
    for ch in line.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if cols + w > target_x {
            break;
        }
        cols += w;
        col += 1;
    }
    col
}

fn byte_index_from_char_index(s: &str, char_idx: usize) -> usize {
    match s.char_indices().nth(char_idx) {
        Some((i, _)) => i,
        None => s.len(),
    }
}
