//! Single-column sort state machine.
//!
//! Header clicks cycle a column between ascending and descending and never
//! clear the sort; only the toolbar's quick-sort action can turn it off.

use crate::state::{SortDirection, SortSpec};

/// Next sort after a click on the header of `field`.
///
/// - no active sort: `field` ascending
/// - `field` already active: direction flipped
/// - another column active: retarget to `field` ascending
pub fn header_click(current: Option<&SortSpec>, field: &str) -> SortSpec {
    match current {
        Some(spec) if spec.field == field => SortSpec {
            field: spec.field.clone(),
            direction: spec.direction.flipped(),
        },
        _ => SortSpec::asc(field),
    }
}

/// Next sort after the quick-sort toolbar action.
///
/// Sorts by `first_sortable` ascending, or clears the sort when that column
/// is already the active target. Returns the current sort unchanged when
/// there is no sortable column.
pub fn quick_sort(current: Option<&SortSpec>, first_sortable: Option<&str>) -> Option<SortSpec> {
    let Some(first) = first_sortable else {
        return current.cloned();
    };
    match current {
        Some(spec) if spec.field == first => None,
        _ => Some(SortSpec { field: first.to_string(), direction: SortDirection::Asc }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_clicks_cycle_asc_desc_asc() {
        let first = header_click(None, "price");
        assert_eq!(first, SortSpec::asc("price"));
        let second = header_click(Some(&first), "price");
        assert_eq!(second, SortSpec::desc("price"));
        let third = header_click(Some(&second), "price");
        assert_eq!(third, SortSpec::asc("price"));
    }

    #[test]
    fn clicking_another_column_restarts_at_asc() {
        let current = SortSpec::desc("price");
        assert_eq!(header_click(Some(&current), "city"), SortSpec::asc("city"));
    }

    #[test]
    fn quick_sort_toggles_first_column() {
        let on = quick_sort(None, Some("title"));
        assert_eq!(on, Some(SortSpec::asc("title")));
        assert_eq!(quick_sort(on.as_ref(), Some("title")), None);

        let desc = SortSpec::desc("title");
        assert_eq!(quick_sort(Some(&desc), Some("title")), None);
    }

    #[test]
    fn quick_sort_retargets_from_other_column() {
        let current = SortSpec::desc("price");
        assert_eq!(quick_sort(Some(&current), Some("title")), Some(SortSpec::asc("title")));
    }

    #[test]
    fn quick_sort_without_sortable_column_is_noop() {
        let current = SortSpec::desc("price");
        assert_eq!(quick_sort(Some(&current), None), Some(current.clone()));
        assert_eq!(quick_sort(None, None), None);
    }
}
