//! Grid interaction state as it round-trips through the query string.
//!
//! These types are the typed face of the query string. The rest of the crate
//! reads and writes `GridState` / `StatePatch` and never touches raw
//! parameters; only `domain::query_codec` knows the wire format.

use std::collections::BTreeMap;
use std::fmt;

/// Per-column filter values keyed by column field.
pub type FilterMap = BTreeMap<String, String>;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// Returns the opposite direction.
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    /// Wire value used in the `sort` parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    /// Parses the wire value; anything other than `asc`/`desc` is rejected.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "asc" => Some(SortDirection::Asc),
            "desc" => Some(SortDirection::Desc),
            _ => None,
        }
    }

    /// Header glyph for the active sort column.
    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Asc => "▲",
            SortDirection::Desc => "▼",
        }
    }
}

/// Complete sorting specification: one active column and its direction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn asc(field: impl Into<String>) -> Self {
        Self { field: field.into(), direction: SortDirection::Asc }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self { field: field.into(), direction: SortDirection::Desc }
    }
}

/// Rows per page. Only the enumerated sizes are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageSize(u32);

impl PageSize {
    /// Every selectable page size, in display order.
    pub const OPTIONS: [u32; 9] = [5, 10, 25, 50, 75, 100, 200, 300, 500];

    /// Page size used when the query carries none or an invalid one.
    pub const DEFAULT: PageSize = PageSize(25);

    /// Returns `Some` only for one of the enumerated sizes.
    pub fn new(size: u32) -> Option<Self> {
        Self::OPTIONS.contains(&size).then_some(PageSize(size))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// All page sizes as typed values.
    pub fn all() -> impl Iterator<Item = PageSize> {
        Self::OPTIONS.iter().map(|&n| PageSize(n))
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Decoded grid state.
///
/// `sort` carries the direction together with the field, so a direction can
/// never exist without a column. `filter_mode` and `filters` are independent:
/// filter mode may be on with no filters populated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridState {
    pub sort: Option<SortSpec>,
    pub search: String,
    pub filters: FilterMap,
    pub filter_mode: bool,
    /// 1-based page number
    pub page: u32,
    pub page_size: PageSize,
}

impl Default for GridState {
    fn default() -> Self {
        Self {
            sort: None,
            search: String::new(),
            filters: FilterMap::new(),
            filter_mode: false,
            page: 1,
            page_size: PageSize::DEFAULT,
        }
    }
}

impl GridState {
    /// Returns the filter value for a field, or an empty string.
    pub fn filter_value(&self, field: &str) -> &str {
        self.filters.get(field).map(String::as_str).unwrap_or("")
    }

    /// Returns the active sort direction for `field`, if it is the sort target.
    pub fn sort_direction_for(&self, field: &str) -> Option<SortDirection> {
        self.sort
            .as_ref()
            .filter(|spec| spec.field == field)
            .map(|spec| spec.direction)
    }
}

/// Change applied to the filter set by a patch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterChange {
    /// Set (or, with a blank value, remove) a single field's filter.
    Set { field: String, value: String },
    /// Replace the whole filter set.
    Replace(FilterMap),
    /// Remove every filter.
    Clear,
}

/// Partial grid state: only the fields that are `Some` are written.
///
/// Patches that touch search, filters, page size or sort reset the page to 1
/// unless `page` is set explicitly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatePatch {
    /// `Some(None)` clears the sort.
    pub sort: Option<Option<SortSpec>>,
    pub search: Option<String>,
    pub filters: Option<FilterChange>,
    pub filter_mode: Option<bool>,
    pub page: Option<u32>,
    pub page_size: Option<PageSize>,
}

impl StatePatch {
    pub fn sort(spec: Option<SortSpec>) -> Self {
        Self { sort: Some(spec), ..Self::default() }
    }

    pub fn search(text: impl Into<String>) -> Self {
        Self { search: Some(text.into()), ..Self::default() }
    }

    pub fn filter(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            filters: Some(FilterChange::Set { field: field.into(), value: value.into() }),
            ..Self::default()
        }
    }

    pub fn filters(filters: FilterMap) -> Self {
        Self { filters: Some(FilterChange::Replace(filters)), ..Self::default() }
    }

    /// Turning filter mode off also clears every filter.
    pub fn filter_mode(enabled: bool) -> Self {
        Self {
            filter_mode: Some(enabled),
            filters: (!enabled).then_some(FilterChange::Clear),
            ..Self::default()
        }
    }

    pub fn page(page: u32) -> Self {
        Self { page: Some(page), ..Self::default() }
    }

    pub fn page_size(size: PageSize) -> Self {
        Self { page_size: Some(size), ..Self::default() }
    }

    /// Whether this patch changes the requested data set or its ordering.
    pub fn resets_page(&self) -> bool {
        self.search.is_some() || self.filters.is_some() || self.page_size.is_some() || self.sort.is_some()
    }
}
