use std::collections::HashSet;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use tracing::debug;
use tracing::trace;
use tracing::warn;

use super::column::Column;
use super::column::TableRow;
use super::sort;
use super::sort::SortOrder;
use super::sort::SortState;
use crate::error::Error;
use crate::error::Result;
use crate::input::InputEvent;
use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::input::KeyModifiers;
use crate::input::MouseEvent;
use crate::input::MouseEventKind;
use crate::keymap;
use crate::keymap::Binding;
use crate::render;
use crate::theme::Theme;
use crate::viewport::ViewportState;

const CHECKBOX_WIDTH: u16 = 3;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DataTableAction {
    None,
    Redraw,
    SortChanged(Option<SortState>),
    /// The selection changed; read it back with [`DataTable::selected_rows`].
    SelectionChanged,
    /// Enter was pressed on a row. Carries the row's index into the data slice.
    Activated(usize),
}

#[derive(Clone, Debug)]
pub struct DataTableOptions {
    /// Adds a checkbox column and enables row selection.
    pub selectable: bool,
    /// Replaces the body with `loading_text`.
    pub loading: bool,
    pub show_scrollbar: bool,
    pub col_gap: u16,
    pub loading_text: String,
    pub empty_text: String,
}

impl Default for DataTableOptions {
    fn default() -> Self {
        Self {
            selectable: false,
            loading: false,
            show_scrollbar: true,
            col_gap: 1,
            loading_text: "Loading…".to_string(),
            empty_text: "No data available".to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TableCommand {
    Up,
    Down,
    PageUp,
    PageDown,
    Top,
    Bottom,
    PrevColumn,
    NextColumn,
    ToggleSort,
    ToggleRow,
    ToggleAll,
    Activate,
}

#[derive(Clone, Debug)]
pub struct DataTableBindings {
    pub up: Vec<KeyEvent>,
    pub down: Vec<KeyEvent>,
    pub page_up: Vec<KeyEvent>,
    pub page_down: Vec<KeyEvent>,
    pub top: Vec<KeyEvent>,
    pub bottom: Vec<KeyEvent>,
    pub prev_column: Vec<KeyEvent>,
    pub next_column: Vec<KeyEvent>,
    pub sort: Vec<KeyEvent>,
    pub toggle_row: Vec<KeyEvent>,
    pub toggle_all: Vec<KeyEvent>,
    pub activate: Vec<KeyEvent>,
}

impl Default for DataTableBindings {
    fn default() -> Self {
        Self {
            up: vec![keymap::key(KeyCode::Up), keymap::key_char('k')],
            down: vec![keymap::key(KeyCode::Down), keymap::key_char('j')],
            page_up: vec![keymap::key(KeyCode::PageUp), keymap::key_ctrl('u')],
            page_down: vec![keymap::key(KeyCode::PageDown), keymap::key_ctrl('d')],
            top: vec![keymap::key(KeyCode::Home), keymap::key_char('g')],
            bottom: vec![
                keymap::key(KeyCode::End),
                keymap::key_char('G'),
                keymap::key_char('G').with_modifiers(KeyModifiers::shift()),
            ],
            prev_column: vec![keymap::key(KeyCode::Left), keymap::key_char('h')],
            next_column: vec![keymap::key(KeyCode::Right), keymap::key_char('l')],
            sort: vec![keymap::key_char('s')],
            toggle_row: vec![keymap::key_char(' ')],
            toggle_all: vec![keymap::key_char('a')],
            activate: vec![keymap::key(KeyCode::Enter)],
        }
    }
}

impl DataTableBindings {
    pub fn command_for(&self, key: &KeyEvent) -> Option<TableCommand> {
        let table = [
            (&self.up, TableCommand::Up),
            (&self.down, TableCommand::Down),
            (&self.page_up, TableCommand::PageUp),
            (&self.page_down, TableCommand::PageDown),
            (&self.top, TableCommand::Top),
            (&self.bottom, TableCommand::Bottom),
            (&self.prev_column, TableCommand::PrevColumn),
            (&self.next_column, TableCommand::NextColumn),
            (&self.sort, TableCommand::ToggleSort),
            (&self.toggle_row, TableCommand::ToggleRow),
            (&self.toggle_all, TableCommand::ToggleAll),
            (&self.activate, TableCommand::Activate),
        ];
        table
            .into_iter()
            .find(|(keys, _)| keymap::any_matches(keys, key))
            .map(|(_, cmd)| cmd)
    }
}

/// Hit-test geometry from the last render.
#[derive(Clone, Debug, Default)]
struct TableLayout {
    header: Rect,
    body: Rect,
    checkbox: Option<(u16, u16)>,
    columns: Vec<(u16, u16)>,
}

/// A sortable, optionally selectable table over caller-owned rows.
///
/// The table owns its rows and column descriptors. Sorting never reorders the data itself: the
/// display order is a permutation of data indices, recomputed whenever the data, the columns or
/// the sort state change. Selection is keyed by [`TableRow::Id`] and reported in data order.
pub struct DataTable<T: TableRow> {
    pub state: ViewportState,
    options: DataTableOptions,
    bindings: DataTableBindings,
    columns: Vec<Column<T>>,
    data: Vec<T>,
    order: Vec<usize>,
    sort: Option<SortState>,
    selected: HashSet<T::Id>,
    cursor: Option<usize>,
    focused_col: usize,
    focused: bool,
    /// Set when the cursor moved; the next render scrolls it into view.
    reveal_cursor: bool,
    layout: Option<TableLayout>,
}

impl<T: TableRow> Default for DataTable<T> {
    fn default() -> Self {
        Self {
            state: ViewportState::default(),
            options: DataTableOptions::default(),
            bindings: DataTableBindings::default(),
            columns: Vec::new(),
            data: Vec::new(),
            order: Vec::new(),
            sort: None,
            selected: HashSet::new(),
            cursor: None,
            focused_col: 0,
            focused: false,
            reveal_cursor: false,
            layout: None,
        }
    }
}

impl<T: TableRow> DataTable<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: DataTableOptions) -> Self {
        let mut t = Self::default();
        t.set_options(options);
        t
    }

    pub fn options(&self) -> &DataTableOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: DataTableOptions) {
        self.options = options;
        if !self.options.selectable {
            self.selected.clear();
        }
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.options.loading = loading;
    }

    pub fn bindings(&self) -> &DataTableBindings {
        &self.bindings
    }

    pub fn set_bindings(&mut self, bindings: DataTableBindings) {
        self.bindings = bindings;
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    pub fn columns(&self) -> &[Column<T>] {
        &self.columns
    }

    pub fn set_columns(&mut self, columns: Vec<Column<T>>) -> Result<()> {
        let mut keys = HashSet::new();
        for c in &columns {
            if !keys.insert(c.key.as_str()) {
                return Err(Error::DuplicateColumnKey(c.key.clone()));
            }
        }
        debug!(count = columns.len(), "data table columns replaced");
        self.columns = columns;
        if let Some(s) = &self.sort
            && !self.columns.iter().any(|c| c.key == s.key && c.sortable)
        {
            debug!(key = %s.key, "sort column removed; restoring data order");
            self.sort = None;
        }
        self.focused_col = self.focused_col.min(self.columns.len().saturating_sub(1));
        self.recompute_order();
        Ok(())
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Replaces the rows. Selected ids that no longer exist are dropped from the selection.
    pub fn set_data(&mut self, data: Vec<T>) -> Result<()> {
        let mut ids = HashSet::with_capacity(data.len());
        for row in &data {
            let id = row.id();
            if ids.contains(&id) {
                return Err(Error::DuplicateRowId(id.to_string()));
            }
            ids.insert(id);
        }
        let before = self.selected.len();
        self.selected.retain(|id| ids.contains(id));
        debug!(
            rows = data.len(),
            pruned = before - self.selected.len(),
            "data table rows replaced"
        );
        let anchor = self.cursor_row().map(TableRow::id);
        self.data = data;
        self.reorder(anchor);
        Ok(())
    }

    pub fn sort(&self) -> Option<&SortState> {
        self.sort.as_ref()
    }

    /// The order column `key` is currently sorted in, if it is the sort key.
    pub fn column_sort(&self, key: &str) -> Option<SortOrder> {
        self.sort.as_ref().filter(|s| s.key == key).map(|s| s.order)
    }

    /// `aria-sort` for column `key`: `ascending`, `descending` or `none`.
    pub fn aria_sort(&self, key: &str) -> &'static str {
        self.column_sort(key).map_or("none", SortOrder::aria_sort)
    }

    /// Activates the header of column `key`. Unknown and non-sortable columns are ignored.
    pub fn toggle_sort(&mut self, key: &str) -> DataTableAction {
        if !self.columns.iter().any(|c| c.key == key && c.sortable) {
            trace!(key, "ignoring sort toggle on non-sortable column");
            return DataTableAction::None;
        }
        let next = sort::next_sort(self.sort.as_ref(), key);
        trace!(key, order = ?next.order, "data table sort toggled");
        self.sort = Some(next);
        self.recompute_order();
        DataTableAction::SortChanged(self.sort.clone())
    }

    /// Sets the sort state directly. `None` restores data order.
    pub fn set_sort(&mut self, sort: Option<SortState>) -> Result<()> {
        if let Some(s) = &sort {
            let Some(col) = self.columns.iter().find(|c| c.key == s.key) else {
                warn!(key = %s.key, "sort requested on unknown column");
                return Err(Error::UnknownColumn(s.key.clone()));
            };
            if !col.sortable {
                warn!(key = %s.key, "sort requested on non-sortable column");
                return Err(Error::NotSortable(s.key.clone()));
            }
        }
        self.sort = sort;
        self.recompute_order();
        Ok(())
    }

    /// Data indices in the order rows are displayed.
    pub fn display_order(&self) -> &[usize] {
        &self.order
    }

    pub fn display_rows(&self) -> impl Iterator<Item = &T> + '_ {
        self.order.iter().map(|&i| &self.data[i])
    }

    pub fn is_selected(&self, id: &T::Id) -> bool {
        self.selected.contains(id)
    }

    pub fn selected_ids(&self) -> &HashSet<T::Id> {
        &self.selected
    }

    /// Selected rows in data order, independent of the current sort.
    pub fn selected_rows(&self) -> Vec<&T> {
        self.data
            .iter()
            .filter(|r| self.selected.contains(&r.id()))
            .collect()
    }

    pub fn all_selected(&self) -> bool {
        !self.data.is_empty() && self.selected.len() == self.data.len()
    }

    pub fn toggle_row(&mut self, id: &T::Id) -> DataTableAction {
        if !self.options.selectable || !self.data.iter().any(|r| &r.id() == id) {
            return DataTableAction::None;
        }
        if !self.selected.remove(id) {
            self.selected.insert(id.clone());
        }
        trace!(%id, selected = self.selected.len(), "data table row toggled");
        DataTableAction::SelectionChanged
    }

    /// Selects every row, or clears the selection when every row is already selected.
    pub fn toggle_all(&mut self) -> DataTableAction {
        if !self.options.selectable {
            return DataTableAction::None;
        }
        if self.all_selected() {
            self.selected.clear();
        } else {
            self.selected = self.data.iter().map(TableRow::id).collect();
        }
        trace!(selected = self.selected.len(), "data table select-all toggled");
        DataTableAction::SelectionChanged
    }

    pub fn clear_selection(&mut self) -> DataTableAction {
        if self.selected.is_empty() {
            return DataTableAction::None;
        }
        self.selected.clear();
        DataTableAction::SelectionChanged
    }

    pub fn select_all_label(&self) -> &'static str {
        if self.all_selected() {
            "Deselect all rows"
        } else {
            "Select all rows"
        }
    }

    pub fn row_select_label(&self, row: &T) -> String {
        format!("Select row {}", row.id())
    }

    /// Cursor position within the display order.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn cursor_row(&self) -> Option<&T> {
        self.cursor
            .and_then(|c| self.order.get(c))
            .map(|&i| &self.data[i])
    }

    pub fn set_cursor(&mut self, cursor: Option<usize>) {
        self.cursor = match cursor {
            Some(_) if self.order.is_empty() => None,
            Some(c) => Some(c.min(self.order.len() - 1)),
            None => None,
        };
        if let Some(c) = self.cursor {
            self.state.ensure_row_visible(c as u32);
            self.reveal_cursor = true;
        }
    }

    pub fn focused_column(&self) -> Option<&Column<T>> {
        self.columns.get(self.focused_col)
    }

    pub fn help_bindings(&self) -> Vec<Binding> {
        let mut out = vec![
            Binding::new("↑/↓", "move", self.bindings.down.clone()),
            Binding::new("←/→", "column", self.bindings.next_column.clone()),
            Binding::new("s", "sort", self.bindings.sort.clone()),
        ];
        if self.options.selectable {
            out.push(Binding::new(
                "space",
                "select row",
                self.bindings.toggle_row.clone(),
            ));
            out.push(Binding::new(
                "a",
                self.select_all_label(),
                self.bindings.toggle_all.clone(),
            ));
        }
        out.push(Binding::new("enter", "open", self.bindings.activate.clone()));
        out
    }

    pub fn handle_event(&mut self, event: InputEvent) -> DataTableAction {
        match event {
            InputEvent::Key(key) => match self.bindings.command_for(&key) {
                Some(cmd) => self.apply(cmd),
                None => DataTableAction::None,
            },
            InputEvent::Mouse(m) => self.handle_mouse(m),
            InputEvent::Paste(_) => DataTableAction::None,
        }
    }

    pub fn apply(&mut self, cmd: TableCommand) -> DataTableAction {
        let rows_available = !self.options.loading && !self.order.is_empty();
        match cmd {
            TableCommand::Up if rows_available => self.move_cursor_by(-1),
            TableCommand::Down if rows_available => self.move_cursor_by(1),
            TableCommand::PageUp
            | TableCommand::PageDown
            | TableCommand::Top
            | TableCommand::Bottom
                if rows_available =>
            {
                self.scroll_with_cursor(cmd)
            }
            TableCommand::PrevColumn => self.move_column_by(-1),
            TableCommand::NextColumn => self.move_column_by(1),
            TableCommand::ToggleSort => match self.focused_column() {
                Some(col) => {
                    let key = col.key.clone();
                    self.toggle_sort(&key)
                }
                None => DataTableAction::None,
            },
            TableCommand::ToggleRow if rows_available => match self.cursor_row() {
                Some(row) => {
                    let id = row.id();
                    self.toggle_row(&id)
                }
                None => DataTableAction::None,
            },
            TableCommand::ToggleAll => self.toggle_all(),
            TableCommand::Activate if rows_available => self
                .cursor
                .and_then(|c| self.order.get(c).copied())
                .map_or(DataTableAction::None, DataTableAction::Activated),
            _ => DataTableAction::None,
        }
    }

    pub fn render(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        if area.width == 0 || area.height == 0 {
            self.layout = None;
            return;
        }

        let (content, scrollbar_x) = if self.options.show_scrollbar && area.width >= 2 {
            (
                Rect::new(area.x, area.y, area.width - 1, area.height),
                Some(area.x + area.width - 1),
            )
        } else {
            (area, None)
        };

        let header = Rect::new(content.x, content.y, content.width, 1);
        let body = Rect::new(
            content.x,
            content.y + 1,
            content.width,
            content.height.saturating_sub(1),
        );

        let rows_shown = if self.options.loading {
            0
        } else {
            self.order.len()
        };
        self.state.set_viewport(body.width, body.height);
        self.state.set_content(body.width as u32, rows_shown as u32);
        if std::mem::take(&mut self.reveal_cursor)
            && let Some(c) = self.cursor
        {
            self.state.ensure_row_visible(c as u32);
        }

        let layout = self.compute_layout(header, body);
        buf.set_style(content, theme.text_primary);

        self.render_header(&layout, buf, theme);
        if self.options.loading {
            render::render_str_centered(body, buf, &self.options.loading_text, theme.text_muted);
        } else if self.order.is_empty() {
            render::render_str_centered(body, buf, &self.options.empty_text, theme.text_muted);
        } else {
            self.render_body(&layout, buf, theme);
        }

        if let Some(sb_x) = scrollbar_x {
            render::render_scrollbar(
                Rect::new(sb_x, body.y, 1, body.height),
                buf,
                &self.state,
                theme.text_muted,
            );
        }

        self.layout = Some(layout);
    }

    fn compute_layout(&self, header: Rect, body: Rect) -> TableLayout {
        let right = header.x.saturating_add(header.width);
        let mut x = header.x;
        let mut place = |w: u16, gap: u16| -> (u16, u16) {
            let start = x.min(right);
            let width = w.min(right - start);
            x = x.saturating_add(w).saturating_add(gap);
            (start, width)
        };

        let checkbox = self
            .options
            .selectable
            .then(|| place(CHECKBOX_WIDTH, self.options.col_gap));
        let columns = self
            .columns
            .iter()
            .map(|c| place(c.width, self.options.col_gap))
            .collect();

        TableLayout {
            header,
            body,
            checkbox,
            columns,
        }
    }

    fn render_header(&self, layout: &TableLayout, buf: &mut Buffer, theme: &Theme) {
        let area = layout.header;
        if area.height == 0 {
            return;
        }
        buf.set_style(area, theme.header);
        let y = area.y;

        if let Some((x, w)) = layout.checkbox {
            let mark = checkbox_mark(self.all_selected());
            render::render_str_clipped(x, y, 0, w, buf, mark, theme.header);
            self.render_separator(x + w, y, area, buf, theme);
        }

        for (i, (col, &(x, w))) in self.columns.iter().zip(&layout.columns).enumerate() {
            if w == 0 {
                continue;
            }
            let mut style = theme.header;
            if self.focused && i == self.focused_col {
                style = style.patch(theme.accent).add_modifier(Modifier::UNDERLINED);
            }
            if col.sortable {
                let indicator = self
                    .column_sort(&col.key)
                    .map_or(sort::UNSORTED_INDICATOR, SortOrder::indicator);
                let title_w = w.saturating_sub(2);
                let title = render::truncate_with_ellipsis(&col.title, title_w);
                let text = format!("{title} {indicator}");
                render::render_str_clipped(x, y, 0, w, buf, &text, style);
            } else {
                let title = render::truncate_with_ellipsis(&col.title, w);
                render::render_str_clipped(x, y, 0, w, buf, &title, style);
            }
            if i + 1 < self.columns.len() {
                self.render_separator(x + w, y, area, buf, theme);
            }
        }
    }

    fn render_body(&self, layout: &TableLayout, buf: &mut Buffer, theme: &Theme) {
        let area = layout.body;
        for dy in 0..area.height {
            let pos = self.state.y as usize + dy as usize;
            let Some(&data_idx) = self.order.get(pos) else {
                break;
            };
            let row = &self.data[data_idx];
            let y = area.y + dy;
            let selected = self.selected.contains(&row.id());
            let mut style = theme.text_primary;
            if selected {
                style = style.patch(theme.row_selected);
            }
            if self.focused && self.cursor == Some(pos) {
                style = style.patch(theme.row_hover);
            }
            buf.set_style(Rect::new(area.x, y, area.width, 1), style);

            if let Some((x, w)) = layout.checkbox {
                render::render_str_clipped(x, y, 0, w, buf, checkbox_mark(selected), style);
                self.render_separator(x + w, y, area, buf, theme);
            }
            for (i, (col, &(x, w))) in self.columns.iter().zip(&layout.columns).enumerate() {
                if w == 0 {
                    continue;
                }
                let line = col.cell_line(row);
                render::render_spans_clipped(x, y, 0, w, buf, &line.spans, style.patch(line.style));
                if i + 1 < self.columns.len() {
                    self.render_separator(x + w, y, area, buf, theme);
                }
            }
        }
    }

    fn render_separator(&self, x: u16, y: u16, area: Rect, buf: &mut Buffer, theme: &Theme) {
        if self.options.col_gap == 0 || x >= area.x.saturating_add(area.width) {
            return;
        }
        if let Some(cell) = buf.cell_mut((x, y)) {
            cell.set_symbol("│");
            cell.set_style(theme.border);
        }
    }

    fn handle_mouse(&mut self, m: MouseEvent) -> DataTableAction {
        match m.kind {
            MouseEventKind::ScrollUp => {
                self.state.scroll_y_by(-1);
                return DataTableAction::Redraw;
            }
            MouseEventKind::ScrollDown => {
                self.state.scroll_y_by(1);
                return DataTableAction::Redraw;
            }
            _ if !m.is_left_click() => return DataTableAction::None,
            _ => {}
        }
        let Some(layout) = self.layout.as_ref() else {
            return DataTableAction::None;
        };
        let (header, body) = (layout.header, layout.body);
        let in_checkbox = layout
            .checkbox
            .is_some_and(|(x, w)| m.x >= x && m.x < x + w);
        let column = layout
            .columns
            .iter()
            .position(|&(x, w)| m.x >= x && m.x < x + w);

        if header.height > 0 && m.y == header.y && contains_x(header, m.x) {
            if in_checkbox {
                return self.toggle_all();
            }
            let Some(i) = column else {
                return DataTableAction::None;
            };
            self.focused_col = i;
            let key = self.columns[i].key.clone();
            return match self.toggle_sort(&key) {
                DataTableAction::None => DataTableAction::Redraw,
                other => other,
            };
        }

        if self.options.loading
            || !contains_x(body, m.x)
            || m.y < body.y
            || m.y >= body.y.saturating_add(body.height)
        {
            return DataTableAction::None;
        }
        let pos = self.state.y as usize + (m.y - body.y) as usize;
        let Some(&data_idx) = self.order.get(pos) else {
            return DataTableAction::None;
        };
        if in_checkbox {
            let id = self.data[data_idx].id();
            return self.toggle_row(&id);
        }
        if let Some(i) = column {
            self.focused_col = i;
        }
        self.set_cursor(Some(pos));
        DataTableAction::Redraw
    }

    fn move_cursor_by(&mut self, delta: i32) -> DataTableAction {
        let cur = self.cursor.unwrap_or(0) as i64;
        let max = self.order.len().saturating_sub(1) as i64;
        let next = if self.cursor.is_none() {
            0
        } else {
            (cur + delta as i64).clamp(0, max) as usize
        };
        self.move_cursor_to(next)
    }

    fn move_cursor_to(&mut self, pos: usize) -> DataTableAction {
        if self.cursor == Some(pos) {
            return DataTableAction::None;
        }
        self.set_cursor(Some(pos));
        DataTableAction::Redraw
    }

    /// Page and jump commands move the viewport first, then the cursor along with it.
    fn scroll_with_cursor(&mut self, cmd: TableCommand) -> DataTableAction {
        let y = self.state.y;
        let step = self.state.page_step();
        let act = match cmd {
            TableCommand::PageUp => {
                self.state.page_up();
                self.move_cursor_by(-step)
            }
            TableCommand::PageDown => {
                self.state.page_down();
                self.move_cursor_by(step)
            }
            TableCommand::Top => {
                self.state.to_top();
                self.move_cursor_to(0)
            }
            TableCommand::Bottom => {
                self.state.to_bottom();
                self.move_cursor_to(self.order.len().saturating_sub(1))
            }
            _ => DataTableAction::None,
        };
        match act {
            DataTableAction::None if self.state.y != y => DataTableAction::Redraw,
            act => act,
        }
    }

    fn move_column_by(&mut self, delta: i32) -> DataTableAction {
        if self.columns.is_empty() {
            return DataTableAction::None;
        }
        let max = self.columns.len() as i64 - 1;
        let next = (self.focused_col as i64 + delta as i64).clamp(0, max) as usize;
        if next == self.focused_col {
            return DataTableAction::None;
        }
        self.focused_col = next;
        DataTableAction::Redraw
    }

    /// Rebuilds the display order, keeping the cursor on the same row.
    fn recompute_order(&mut self) {
        let anchor = self.cursor_row().map(TableRow::id);
        self.reorder(anchor);
    }

    /// Rebuilds the display order and moves the cursor to the row with id `anchor`. When that row
    /// is gone the cursor keeps its position, clamped to the new length.
    fn reorder(&mut self, anchor: Option<T::Id>) {
        let (column, order) = match &self.sort {
            Some(s) => (
                self.columns.iter().find(|c| c.key == s.key),
                s.order,
            ),
            None => (None, SortOrder::Asc),
        };
        self.order = sort::sorted_indices(&self.data, column, order);
        let data = &self.data;
        self.cursor = anchor
            .and_then(|id| self.order.iter().position(|&d| data[d].id() == id))
            .or_else(|| self.cursor.filter(|_| !self.order.is_empty()))
            .map(|c| c.min(self.order.len().saturating_sub(1)));
        self.reveal_cursor |= self.cursor.is_some();
        self.state.set_content(self.state.content_w, self.order.len() as u32);
    }
}

fn checkbox_mark(checked: bool) -> &'static str {
    if checked { "[x]" } else { "[ ]" }
}

fn contains_x(r: Rect, x: u16) -> bool {
    x >= r.x && x < r.x.saturating_add(r.width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_table::column::CellValue;

    #[derive(Clone, Debug, PartialEq)]
    struct Row {
        id: u32,
        name: &'static str,
        age: i64,
    }

    impl TableRow for Row {
        type Id = u32;

        fn id(&self) -> u32 {
            self.id
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row {
                id: 1,
                name: "B",
                age: 30,
            },
            Row {
                id: 2,
                name: "A",
                age: 25,
            },
        ]
    }

    fn cols() -> Vec<Column<Row>> {
        vec![
            Column::new("name", "Name", |r: &Row| CellValue::from(r.name)).sortable(true),
            Column::new("age", "Age", |r: &Row| CellValue::Int(r.age)).sortable(true),
        ]
    }

    fn table(selectable: bool) -> DataTable<Row> {
        let mut t = DataTable::with_options(DataTableOptions {
            selectable,
            ..Default::default()
        });
        t.set_columns(cols()).unwrap();
        t.set_data(rows()).unwrap();
        t
    }

    fn key(code: KeyCode) -> InputEvent {
        InputEvent::Key(KeyEvent::new(code))
    }

    fn names(t: &DataTable<Row>) -> Vec<&'static str> {
        t.display_rows().map(|r| r.name).collect()
    }

    #[test]
    fn unsorted_table_keeps_data_order() {
        let t = table(false);
        assert_eq!(names(&t), vec!["B", "A"]);
        assert_eq!(t.aria_sort("name"), "none");
    }

    #[test]
    fn toggling_sort_cycles_asc_desc() {
        let mut t = table(false);
        let act = t.toggle_sort("name");
        assert_eq!(
            act,
            DataTableAction::SortChanged(Some(SortState::new("name", SortOrder::Asc)))
        );
        assert_eq!(names(&t), vec!["A", "B"]);
        assert_eq!(t.aria_sort("name"), "ascending");

        t.toggle_sort("name");
        assert_eq!(names(&t), vec!["B", "A"]);
        assert_eq!(t.aria_sort("name"), "descending");

        t.toggle_sort("age");
        assert_eq!(t.column_sort("age"), Some(SortOrder::Asc));
        assert_eq!(t.aria_sort("name"), "none");
        assert_eq!(names(&t), vec!["A", "B"]);
    }

    #[test]
    fn non_sortable_and_unknown_columns_ignore_toggle() {
        let mut t = table(false);
        let mut c = cols();
        c[1].sortable = false;
        t.set_columns(c).unwrap();
        assert_eq!(t.toggle_sort("age"), DataTableAction::None);
        assert_eq!(t.toggle_sort("missing"), DataTableAction::None);
        assert_eq!(t.sort(), None);
    }

    #[test]
    fn set_sort_validates_column() {
        let mut t = table(false);
        assert!(matches!(
            t.set_sort(Some(SortState::new("nope", SortOrder::Asc))),
            Err(Error::UnknownColumn(_))
        ));
        t.set_sort(Some(SortState::new("age", SortOrder::Desc)))
            .unwrap();
        assert_eq!(names(&t), vec!["B", "A"]);
        t.set_sort(None).unwrap();
        assert_eq!(t.display_order(), &[0, 1]);
    }

    #[test]
    fn dropped_sort_column_falls_back_to_data_order() {
        let mut t = table(false);
        t.toggle_sort("name");
        t.set_columns(vec![cols().remove(1)]).unwrap();
        assert_eq!(t.display_order(), &[0, 1]);
        assert_eq!(t.sort(), None);
    }

    #[test]
    fn selection_reports_rows_in_data_order() {
        let mut t = table(true);
        t.toggle_sort("name");
        assert_eq!(t.toggle_row(&2), DataTableAction::SelectionChanged);
        assert_eq!(t.toggle_row(&1), DataTableAction::SelectionChanged);
        let ids: Vec<u32> = t.selected_rows().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2]);
        t.toggle_row(&1);
        assert_eq!(t.selected_rows(), vec![&rows()[1]]);
    }

    #[test]
    fn toggle_all_selects_then_clears() {
        let mut t = table(true);
        assert_eq!(t.select_all_label(), "Select all rows");
        t.toggle_all();
        assert!(t.all_selected());
        assert_eq!(t.selected_rows().len(), 2);
        assert_eq!(t.select_all_label(), "Deselect all rows");
        t.toggle_all();
        assert!(t.selected_rows().is_empty());
    }

    #[test]
    fn partial_selection_toggle_all_selects_everything() {
        let mut t = table(true);
        t.toggle_row(&1);
        t.toggle_all();
        assert!(t.all_selected());
    }

    #[test]
    fn selection_requires_selectable() {
        let mut t = table(false);
        assert_eq!(t.toggle_row(&1), DataTableAction::None);
        assert_eq!(t.toggle_all(), DataTableAction::None);
        assert!(t.selected_rows().is_empty());
    }

    #[test]
    fn empty_table_is_never_all_selected() {
        let mut t: DataTable<Row> = DataTable::with_options(DataTableOptions {
            selectable: true,
            ..Default::default()
        });
        assert!(!t.all_selected());
        t.toggle_all();
        assert!(!t.all_selected());
    }

    #[test]
    fn set_data_rejects_duplicates_and_prunes_selection() {
        let mut t = table(true);
        t.toggle_all();
        let mut dup = rows();
        dup[1].id = 1;
        assert!(matches!(t.set_data(dup), Err(Error::DuplicateRowId(id)) if id == "1"));

        t.set_data(vec![rows().remove(0)]).unwrap();
        assert_eq!(t.selected_ids().len(), 1);
        assert!(t.all_selected());
    }

    #[test]
    fn duplicate_column_keys_are_rejected() {
        let mut t: DataTable<Row> = DataTable::new();
        let mut c = cols();
        c.push(c[0].clone());
        assert!(matches!(t.set_columns(c), Err(Error::DuplicateColumnKey(k)) if k == "name"));
    }

    #[test]
    fn keyboard_moves_cursor_toggles_and_sorts() {
        let mut t = table(true);
        assert_eq!(t.handle_event(key(KeyCode::Down)), DataTableAction::Redraw);
        assert_eq!(t.cursor(), Some(0));
        t.handle_event(key(KeyCode::Down));
        assert_eq!(t.cursor_row().map(|r| r.id), Some(2));
        assert_eq!(
            t.handle_event(key(KeyCode::Char(' '))),
            DataTableAction::SelectionChanged
        );
        assert!(t.is_selected(&2));

        // Sorting by name moves row 2 ("A") to the top; the cursor follows it.
        t.handle_event(key(KeyCode::Char('s')));
        assert_eq!(t.cursor(), Some(0));
        assert_eq!(t.cursor_row().map(|r| r.id), Some(2));

        t.handle_event(key(KeyCode::Right));
        t.handle_event(key(KeyCode::Char('s')));
        assert_eq!(t.column_sort("age"), Some(SortOrder::Asc));
        assert_eq!(
            t.handle_event(key(KeyCode::Enter)),
            DataTableAction::Activated(1)
        );
    }

    #[test]
    fn loading_ignores_row_commands_but_allows_sorting() {
        let mut t = table(true);
        t.set_loading(true);
        assert_eq!(t.handle_event(key(KeyCode::Down)), DataTableAction::None);
        assert_eq!(t.handle_event(key(KeyCode::Char(' '))), DataTableAction::None);
        assert!(matches!(
            t.handle_event(key(KeyCode::Char('s'))),
            DataTableAction::SortChanged(_)
        ));
    }

    #[test]
    fn help_lists_selection_bindings_only_when_selectable() {
        let t = table(false);
        assert!(t.help_bindings().iter().all(|b| b.help_key != "space"));
        let mut t = table(true);
        let descs: Vec<String> = t.help_bindings().into_iter().map(|b| b.help_desc).collect();
        assert!(descs.contains(&"Select all rows".to_string()));
        t.toggle_all();
        let descs: Vec<String> = t.help_bindings().into_iter().map(|b| b.help_desc).collect();
        assert!(descs.contains(&"Deselect all rows".to_string()));
    }

    fn row(id: u32) -> Row {
        Row {
            id,
            name: "r",
            age: id as i64,
        }
    }

    fn tall_table() -> DataTable<Row> {
        let mut t = table(false);
        t.set_data((0..20).map(row).collect()).unwrap();
        t
    }

    fn render(t: &mut DataTable<Row>) {
        let area = Rect::new(0, 0, 20, 5);
        let mut buf = Buffer::empty(area);
        t.render(area, &mut buf, &Theme::default());
    }

    fn wheel(kind: MouseEventKind) -> InputEvent {
        InputEvent::Mouse(MouseEvent {
            kind,
            ..MouseEvent::left_click(2, 2)
        })
    }

    #[test]
    fn wheel_scroll_survives_render_with_cursor_set() {
        let mut t = tall_table();
        t.handle_event(key(KeyCode::Down));
        render(&mut t);
        assert_eq!(t.state.y, 0);
        for _ in 0..5 {
            assert_eq!(
                t.handle_event(wheel(MouseEventKind::ScrollDown)),
                DataTableAction::Redraw
            );
        }
        assert_eq!(t.state.y, 5);
        render(&mut t);
        assert_eq!(t.state.y, 5);
        assert_eq!(t.cursor(), Some(0));

        // Moving the cursor brings it back into view.
        t.handle_event(key(KeyCode::Down));
        render(&mut t);
        assert_eq!(t.state.y, 1);
    }

    #[test]
    fn paging_moves_cursor_and_viewport_together() {
        let mut t = tall_table();
        render(&mut t);
        t.handle_event(key(KeyCode::Down));
        assert_eq!(t.state.page_step(), 3);

        t.handle_event(key(KeyCode::PageDown));
        assert_eq!((t.cursor(), t.state.y), (Some(3), 3));
        t.handle_event(key(KeyCode::PageDown));
        assert_eq!((t.cursor(), t.state.y), (Some(6), 6));
        t.handle_event(key(KeyCode::PageUp));
        assert_eq!((t.cursor(), t.state.y), (Some(3), 3));

        t.handle_event(key(KeyCode::End));
        assert_eq!((t.cursor(), t.state.y), (Some(19), 16));
        render(&mut t);
        assert_eq!(t.state.y, 16);
        t.handle_event(key(KeyCode::Home));
        assert_eq!((t.cursor(), t.state.y), (Some(0), 0));
    }

    #[test]
    fn set_data_keeps_cursor_on_the_same_row() {
        let mut t = table(false);
        t.set_data(vec![row(20), row(5)]).unwrap();
        t.set_cursor(Some(0));
        t.set_data(vec![row(5), row(10), row(20)]).unwrap();
        assert_eq!(t.cursor(), Some(2));
        assert_eq!(t.cursor_row().map(|r| r.id), Some(20));

        // When the row disappears the cursor stays put.
        t.set_data(vec![row(1), row(2), row(3)]).unwrap();
        assert_eq!(t.cursor(), Some(2));
    }

    #[test]
    fn clear_selection_empties_the_set() {
        let mut t = table(true);
        assert_eq!(t.clear_selection(), DataTableAction::None);
        t.toggle_all();
        assert_eq!(t.clear_selection(), DataTableAction::SelectionChanged);
        assert!(t.selected_rows().is_empty());
        assert!(!t.all_selected());
    }

    #[test]
    fn row_select_label_names_the_id() {
        let t = table(true);
        assert_eq!(t.row_select_label(&rows()[0]), "Select row 1");
    }
}
