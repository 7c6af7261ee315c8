//! Sortable, selectable table.
//!
//! Build [`Column`]s with an accessor per field, hand rows implementing [`TableRow`] to a
//! [`DataTable`], and feed it [`crate::input::InputEvent`]s. Header activation sorts by a single
//! key (ascending, then descending); the checkbox column maintains a set of selected row ids.

pub mod column;
pub mod sort;
pub mod view;

pub use column::CellValue;
pub use column::Column;
pub use column::TableRow;
pub use sort::SortOrder;
pub use sort::SortState;
pub use view::DataTable;
pub use view::DataTableAction;
pub use view::DataTableBindings;
pub use view::DataTableOptions;
pub use view::TableCommand;
