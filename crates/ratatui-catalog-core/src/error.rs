use thiserror::Error;

/// Errors reported by catalog widgets when the caller hands them inconsistent data.
///
/// Input validation on [`crate::input_field::InputField`] is not an error: `invalid` is a
/// presentation flag the caller sets.
#[derive(Debug, Error)]
pub enum Error {
    #[error("row id {0} appears more than once in the table data")]
    DuplicateRowId(String),

    #[error("column key '{0}' appears more than once")]
    DuplicateColumnKey(String),

    #[error("no column with key '{0}'")]
    UnknownColumn(String),

    #[error("column '{0}' is not sortable")]
    NotSortable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
