use std::cmp::Ordering;

use super::column::Column;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn toggle(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }

    /// The `aria-sort` token for a column sorted in this order.
    pub fn aria_sort(self) -> &'static str {
        match self {
            SortOrder::Asc => "ascending",
            SortOrder::Desc => "descending",
        }
    }

    pub fn indicator(self) -> &'static str {
        match self {
            SortOrder::Asc => "▲",
            SortOrder::Desc => "▼",
        }
    }

    fn apply(self, ord: Ordering) -> Ordering {
        match self {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    }
}

/// Indicator shown on sortable columns that are not the active sort key.
pub const UNSORTED_INDICATOR: &str = "↕";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SortState {
    pub key: String,
    pub order: SortOrder,
}

impl SortState {
    pub fn new(key: impl Into<String>, order: SortOrder) -> Self {
        Self {
            key: key.into(),
            order,
        }
    }
}

/// The sort state after the header of column `key` is activated.
///
/// The active column flips between ascending and descending; any other column becomes the sort
/// key in ascending order.
pub fn next_sort(current: Option<&SortState>, key: &str) -> SortState {
    match current {
        Some(s) if s.key == key => SortState::new(key, s.order.toggle()),
        _ => SortState::new(key, SortOrder::Asc),
    }
}

/// Data indices in display order.
///
/// Without a sort column the data order is kept. Sorting is stable, so rows with equal values
/// keep their relative data order in both directions.
pub fn sorted_indices<T>(data: &[T], column: Option<&Column<T>>, order: SortOrder) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..data.len()).collect();
    let Some(column) = column else {
        return indices;
    };
    let values: Vec<_> = data.iter().map(|row| column.value(row)).collect();
    indices.sort_by(|&a, &b| order.apply(values[a].compare(&values[b])));
    indices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_table::column::CellValue;

    #[test]
    fn same_key_flips_and_new_key_resets() {
        let s = next_sort(None, "name");
        assert_eq!(s, SortState::new("name", SortOrder::Asc));
        let s = next_sort(Some(&s), "name");
        assert_eq!(s.order, SortOrder::Desc);
        let s = next_sort(Some(&s), "name");
        assert_eq!(s.order, SortOrder::Asc);
        let s = next_sort(Some(&SortState::new("name", SortOrder::Desc)), "age");
        assert_eq!(s, SortState::new("age", SortOrder::Asc));
    }

    #[test]
    fn sort_is_stable_in_both_directions() {
        let data: Vec<(i64, i64)> = vec![(1, 2), (2, 1), (3, 2), (4, 1)];
        let col = Column::new("v", "V", |r: &(i64, i64)| CellValue::Int(r.1));
        assert_eq!(sorted_indices(&data, Some(&col), SortOrder::Asc), vec![1, 3, 0, 2]);
        assert_eq!(sorted_indices(&data, Some(&col), SortOrder::Desc), vec![0, 2, 1, 3]);
    }

    #[test]
    fn no_column_keeps_data_order() {
        let data = vec![3, 1, 2];
        assert_eq!(
            sorted_indices::<i32>(&data, None, SortOrder::Desc),
            vec![0, 1, 2]
        );
    }
}
