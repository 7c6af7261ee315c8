use std::cmp::Ordering;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use ratatui::text::Line;

use crate::render;

/// A record that can be shown by [`super::DataTable`].
///
/// Ids must be unique within one data set; they key the selection.
pub trait TableRow {
    type Id: Clone + Eq + Hash + fmt::Debug + fmt::Display;

    fn id(&self) -> Self::Id;
}

/// The value a column reads out of a row.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum CellValue {
    #[default]
    Empty,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl CellValue {
    /// Total order used for sorting.
    ///
    /// Numbers compare numerically across `Int`/`Float`; text compares lexicographically. Values
    /// of different kinds are ordered `Empty < Bool < number < Text`.
    pub fn compare(&self, other: &CellValue) -> Ordering {
        match (self, other) {
            (CellValue::Int(a), CellValue::Int(b)) => a.cmp(b),
            (CellValue::Int(a), CellValue::Float(b)) => (*a as f64).total_cmp(b),
            (CellValue::Float(a), CellValue::Int(b)) => a.total_cmp(&(*b as f64)),
            (CellValue::Float(a), CellValue::Float(b)) => a.total_cmp(b),
            (CellValue::Bool(a), CellValue::Bool(b)) => a.cmp(b),
            (CellValue::Text(a), CellValue::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            CellValue::Empty => 0,
            CellValue::Bool(_) => 1,
            CellValue::Int(_) | CellValue::Float(_) => 2,
            CellValue::Text(_) => 3,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Bool(v) => write!(f, "{v}"),
            CellValue::Int(v) => write!(f, "{v}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Text(v) => f.write_str(v),
        }
    }
}

impl From<&str> for CellValue {
    fn from(v: &str) -> Self {
        CellValue::Text(v.to_string())
    }
}

impl From<String> for CellValue {
    fn from(v: String) -> Self {
        CellValue::Text(v)
    }
}

impl From<bool> for CellValue {
    fn from(v: bool) -> Self {
        CellValue::Bool(v)
    }
}

impl From<i64> for CellValue {
    fn from(v: i64) -> Self {
        CellValue::Int(v)
    }
}

impl From<i32> for CellValue {
    fn from(v: i32) -> Self {
        CellValue::Int(v.into())
    }
}

impl From<u32> for CellValue {
    fn from(v: u32) -> Self {
        CellValue::Int(v.into())
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Float(v)
    }
}

impl<V: Into<CellValue>> From<Option<V>> for CellValue {
    fn from(v: Option<V>) -> Self {
        v.map(Into::into).unwrap_or(CellValue::Empty)
    }
}

type Accessor<T> = Arc<dyn Fn(&T) -> CellValue>;
type CellRenderer<T> = Arc<dyn Fn(&CellValue, &T) -> Line<'static>>;

/// Describes one table column: which field it shows and how.
pub struct Column<T> {
    pub key: String,
    pub title: String,
    pub width: u16,
    pub sortable: bool,
    accessor: Accessor<T>,
    render: Option<CellRenderer<T>>,
}

impl<T> Column<T> {
    /// Creates a column reading its values through `accessor`.
    ///
    /// The width defaults to the title plus room for the sort indicator, at least 8 columns.
    pub fn new(
        key: impl Into<String>,
        title: impl Into<String>,
        accessor: impl Fn(&T) -> CellValue + 'static,
    ) -> Self {
        let title = title.into();
        let width = (render::display_width(&title) as u16 + 2).max(8);
        Self {
            key: key.into(),
            title,
            width,
            sortable: false,
            accessor: Arc::new(accessor),
            render: None,
        }
    }

    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    pub fn width(mut self, width: u16) -> Self {
        self.width = width;
        self
    }

    /// Overrides how a cell is drawn. The callback receives the accessor value and the row.
    pub fn render_with(
        mut self,
        render: impl Fn(&CellValue, &T) -> Line<'static> + 'static,
    ) -> Self {
        self.render = Some(Arc::new(render));
        self
    }

    pub fn value(&self, row: &T) -> CellValue {
        (self.accessor)(row)
    }

    pub fn cell_line(&self, row: &T) -> Line<'static> {
        let value = self.value(row);
        match &self.render {
            Some(render) => render(&value, row),
            None => Line::raw(value.to_string()),
        }
    }
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            title: self.title.clone(),
            width: self.width,
            sortable: self.sortable,
            accessor: Arc::clone(&self.accessor),
            render: self.render.clone(),
        }
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("title", &self.title)
            .field("width", &self.width)
            .field("sortable", &self.sortable)
            .field("custom_render", &self.render.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Stylize;

    struct Item {
        name: &'static str,
        score: Option<f64>,
    }

    #[test]
    fn compares_numbers_across_kinds() {
        assert_eq!(CellValue::Int(2).compare(&CellValue::Float(2.5)), Ordering::Less);
        assert_eq!(CellValue::Float(3.0).compare(&CellValue::Int(3)), Ordering::Equal);
        assert_eq!(
            CellValue::from("b").compare(&CellValue::from("a")),
            Ordering::Greater
        );
    }

    #[test]
    fn mixed_kinds_order_by_rank() {
        assert_eq!(CellValue::Empty.compare(&CellValue::Int(0)), Ordering::Less);
        assert_eq!(CellValue::from("0").compare(&CellValue::Int(9)), Ordering::Greater);
    }

    #[test]
    fn empty_values_display_as_blank() {
        let col = Column::new("score", "Score", |i: &Item| i.score.into());
        let item = Item {
            name: "x",
            score: None,
        };
        assert_eq!(col.cell_line(&item).to_string(), "");
    }

    #[test]
    fn render_override_receives_value_and_row() {
        let col = Column::new("name", "Name", |i: &Item| i.name.into())
            .render_with(|v, row: &Item| Line::from(format!("{v}!{}", row.name.len())).bold());
        let item = Item {
            name: "abc",
            score: Some(1.0),
        };
        assert_eq!(col.cell_line(&item).to_string(), "abc!3");
    }

    #[test]
    fn default_width_fits_title_and_indicator() {
        let col = Column::new("email", "Email address", |i: &Item| i.name.into());
        assert_eq!(col.width, 15);
        assert_eq!(Column::new("a", "A", |i: &Item| i.name.into()).width, 8);
    }
}
