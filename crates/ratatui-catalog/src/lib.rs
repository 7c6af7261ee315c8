//! `ratatui-catalog` is a small component catalog for ratatui apps.
//!
//! It ships two widgets:
//! - [`input_field::InputField`]: a labelled text input (controlled or uncontrolled) with helper
//!   and error text, `filled`/`outlined`/`ghost` variants, three sizes, password masking, a clear
//!   button and a loading state.
//! - [`data_table::DataTable`]: a table over your own row type with single-key ascending or
//!   descending sorting and checkbox row selection.
//!
//! Everything is re-exported from `ratatui-catalog-core`; the `crossterm` feature adds
//! [`crossterm_input`] for converting terminal events.
//!
//! ```no_run
//! use ratatui_catalog::data_table::{CellValue, Column, DataTable, DataTableOptions, TableRow};
//!
//! struct User {
//!     id: u32,
//!     name: String,
//! }
//!
//! impl TableRow for User {
//!     type Id = u32;
//!     fn id(&self) -> u32 {
//!         self.id
//!     }
//! }
//!
//! let mut table = DataTable::with_options(DataTableOptions {
//!     selectable: true,
//!     ..Default::default()
//! });
//! table
//!     .set_columns(vec![
//!         Column::new("name", "Name", |u: &User| CellValue::from(u.name.as_str())).sortable(true),
//!     ])
//!     .unwrap();
//! table
//!     .set_data(vec![User { id: 1, name: "Aisha".into() }])
//!     .unwrap();
//! ```
pub use ratatui_catalog_core::data_table;
pub use ratatui_catalog_core::error;
pub use ratatui_catalog_core::help;
pub use ratatui_catalog_core::input;
pub use ratatui_catalog_core::input_field;
pub use ratatui_catalog_core::keymap;
pub use ratatui_catalog_core::render;
pub use ratatui_catalog_core::theme;
pub use ratatui_catalog_core::viewport;

#[cfg(feature = "crossterm")]
pub use ratatui_catalog_core::crossterm_input;

pub use ratatui_catalog_core::Error;
pub use ratatui_catalog_core::Result;
