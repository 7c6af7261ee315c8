//! `ratatui-catalog-core` provides the building blocks behind the catalog widgets.
//!
//! ## Design goals
//!
//! - Event-loop agnostic: you drive input + rendering from your app.
//! - No async runtime: all components run on the main thread.
//! - No callbacks: widgets answer every event with an action enum
//!   ([`input_field::InputFieldAction`], [`data_table::DataTableAction`]) and the caller decides
//!   what to do with it.
//!
//! ## Widgets
//!
//! - [`input_field::InputField`]: labelled single-line input with helper/error text, variants,
//!   sizes, password masking and a clear button.
//! - [`data_table::DataTable`]: table with single-key sorting and row selection.
//! - [`help::HelpBar`]: one-line key binding summary.
//!
//! Both widgets take a [`theme::Theme`] when rendering; [`theme::ThemeMode`] switches between the
//! light and dark palettes.
pub mod error;
pub mod theme;

pub mod input;
pub mod keymap;

#[cfg(feature = "crossterm")]
pub mod crossterm_input;

pub mod render;
pub mod viewport;

pub mod data_table;
pub mod help;
pub mod input_field;

pub use error::Error;
pub use error::Result;
