//! Query-string codec for grid state.
//!
//! Decoding is total: every malformed or unknown value falls back to a
//! default, so any query string yields a usable `GridState`. Encoding is a
//! read-modify-write over the full current query, which keeps parameters the
//! grid does not own (a tab id, a modal flag) exactly where they were.
//!
//! Filters travel in a single `filters` parameter as `field-value` pairs
//! joined by commas. Values are percent-encoded before the outer form
//! encoding, but `-` is left intact, so decoding must split each pair on the
//! first dash only.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use url::form_urlencoded;

use crate::state::{FilterChange, FilterMap, GridState, PageSize, SortDirection, SortSpec, StatePatch};

pub const PARAM_SORT: &str = "sort";
pub const PARAM_SORT_FIELD: &str = "sortField";
pub const PARAM_SEARCH: &str = "search";
pub const PARAM_FILTERS: &str = "filters";
pub const PARAM_FILTRATION: &str = "filtration";
pub const PARAM_PAGE: &str = "page";
pub const PARAM_LIMIT: &str = "limit";
pub const PARAM_FIELDS: &str = "fields";

/// Characters left unescaped by `encodeURIComponent`.
const VALUE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Field names additionally escape `-` so the first dash always separates
/// field from value.
const FIELD_SET: &AsciiSet = &VALUE_SET.add(b'-');

/// Ordered query parameters.
///
/// Keeps the original order of pairs; `set` replaces in place so unrelated
/// parameters do not move around between writes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Parses a query string, with or without a leading `?`.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        Self {
            pairs: form_urlencoded::parse(query.as_bytes()).into_owned().collect(),
        }
    }

    /// Returns the first value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Sets `key` to `value`, replacing the first occurrence in place and
    /// dropping any duplicates.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.pairs.iter().position(|(k, _)| k == key) {
            Some(pos) => {
                self.pairs[pos].1 = value;
                let mut index = 0;
                self.pairs.retain(|(k, _)| {
                    let keep = index <= pos || k != key;
                    index += 1;
                    keep
                });
            }
            None => self.pairs.push((key.to_string(), value)),
        }
    }

    /// Removes every occurrence of `key`.
    pub fn remove(&mut self, key: &str) {
        self.pairs.retain(|(k, _)| k != key);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == key)
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Serializes back to a query string without a leading `?`.
    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish()
    }
}

// ===== Decoding =====

/// Decodes a query string into grid state. Never fails.
pub fn decode(query: &str) -> GridState {
    decode_params(&QueryParams::parse(query))
}

/// Decodes already-parsed parameters into grid state.
pub fn decode_params(params: &QueryParams) -> GridState {
    let sort = params
        .get(PARAM_SORT_FIELD)
        .filter(|field| !field.is_empty())
        .map(|field| SortSpec {
            field: field.to_string(),
            direction: params
                .get(PARAM_SORT)
                .and_then(SortDirection::parse)
                .unwrap_or(SortDirection::Asc),
        });

    let page = params
        .get(PARAM_PAGE)
        .and_then(|v| v.trim().parse::<u32>().ok())
        .filter(|&page| page >= 1)
        .unwrap_or(1);

    let page_size = params
        .get(PARAM_LIMIT)
        .and_then(|v| v.trim().parse::<u32>().ok())
        .and_then(PageSize::new)
        .unwrap_or_default();

    GridState {
        sort,
        search: params.get(PARAM_SEARCH).unwrap_or_default().to_string(),
        filters: params.get(PARAM_FILTERS).map(unpack_filters).unwrap_or_default(),
        filter_mode: params.get(PARAM_FILTRATION) == Some("true"),
        page,
        page_size,
    }
}

/// Unpacks `field-value,field-value` into a filter map.
///
/// Each segment is split on its first `-` only; values may contain dashes.
/// Segments without a dash, with an empty field or a blank value are skipped.
pub fn unpack_filters(packed: &str) -> FilterMap {
    let mut filters = FilterMap::new();
    for segment in packed.split(',') {
        let Some((raw_field, raw_value)) = segment.split_once('-') else {
            continue;
        };
        let field = percent_decode_str(raw_field).decode_utf8_lossy();
        let value = percent_decode_str(raw_value).decode_utf8_lossy();
        if field.is_empty() || value.trim().is_empty() {
            continue;
        }
        filters.insert(field.into_owned(), value.into_owned());
    }
    filters
}

// ===== Encoding =====

/// Packs a filter map, dropping blank values. Returns `None` when nothing
/// remains so callers remove the parameter instead of writing an empty one.
pub fn pack_filters(filters: &FilterMap) -> Option<String> {
    let segments: Vec<String> = filters
        .iter()
        .filter(|(field, value)| !field.is_empty() && !value.trim().is_empty())
        .map(|(field, value)| {
            format!(
                "{}-{}",
                utf8_percent_encode(field, FIELD_SET),
                utf8_percent_encode(value, VALUE_SET)
            )
        })
        .collect();

    if segments.is_empty() {
        None
    } else {
        Some(segments.join(","))
    }
}

/// Applies `patch` on top of the full `current` query string and returns the
/// full new query string.
pub fn encode(patch: &StatePatch, current: &str) -> String {
    let mut params = QueryParams::parse(current);
    apply_patch(&mut params, patch);
    params.to_query_string()
}

/// Applies a patch to parsed parameters in place.
pub fn apply_patch(params: &mut QueryParams, patch: &StatePatch) {
    if let Some(sort) = &patch.sort {
        match sort {
            Some(spec) => {
                params.set(PARAM_SORT_FIELD, spec.field.as_str());
                params.set(PARAM_SORT, spec.direction.as_str());
            }
            None => {
                params.remove(PARAM_SORT_FIELD);
                params.remove(PARAM_SORT);
            }
        }
    }

    if let Some(search) = &patch.search {
        if search.is_empty() {
            params.remove(PARAM_SEARCH);
        } else {
            params.set(PARAM_SEARCH, search.as_str());
        }
    }

    if let Some(change) = &patch.filters {
        let filters = match change {
            FilterChange::Set { field, value } => {
                let mut current = params.get(PARAM_FILTERS).map(unpack_filters).unwrap_or_default();
                if value.trim().is_empty() {
                    current.remove(field);
                } else {
                    current.insert(field.clone(), value.clone());
                }
                current
            }
            FilterChange::Replace(filters) => filters.clone(),
            FilterChange::Clear => FilterMap::new(),
        };
        match pack_filters(&filters) {
            Some(packed) => params.set(PARAM_FILTERS, packed),
            None => params.remove(PARAM_FILTERS),
        }
    }

    if let Some(enabled) = patch.filter_mode {
        if enabled {
            params.set(PARAM_FILTRATION, "true");
        } else {
            params.remove(PARAM_FILTRATION);
        }
    }

    if let Some(size) = patch.page_size {
        params.set(PARAM_LIMIT, size.get().to_string());
    }

    match patch.page {
        Some(page) => params.set(PARAM_PAGE, page.max(1).to_string()),
        None if patch.resets_page() => params.set(PARAM_PAGE, "1"),
        None => {}
    }
}

/// Current query plus a `fields` parameter listing the exported columns.
pub fn export_query<S: AsRef<str>>(current: &str, fields: &[S]) -> String {
    let mut params = QueryParams::parse(current);
    let joined = fields.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(",");
    params.set(PARAM_FIELDS, joined);
    params.to_query_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_packed_filters_with_dash_in_value() {
        let state = decode("filters=price-100-200,city-Santiago");
        assert_eq!(state.filters.len(), 2);
        assert_eq!(state.filters["price"], "100-200");
        assert_eq!(state.filters["city"], "Santiago");
    }

    #[test]
    fn dash_values_survive_encode_decode() {
        for value in ["100-200", "-", "a--b", "-leading", "trailing-", "2024-01-05"] {
            let query = encode(&StatePatch::filter("code", value), "");
            assert_eq!(decode(&query).filters["code"], value, "query was {query}");
        }
    }

    #[test]
    fn field_names_with_dashes_round_trip() {
        let query = encode(&StatePatch::filter("unit-type", "a-b"), "");
        assert_eq!(decode(&query).filters["unit-type"], "a-b");
    }

    #[test]
    fn commas_in_values_do_not_split_segments() {
        let query = encode(&StatePatch::filter("address", "Main St, 5"), "");
        let state = decode(&query);
        assert_eq!(state.filters.len(), 1);
        assert_eq!(state.filters["address"], "Main St, 5");
    }

    #[test]
    fn malformed_values_fall_back_to_defaults() {
        let state = decode("page=abc&limit=33&sort=sideways&filtration=TRUE&filters=nodash,-x,,y-");
        assert_eq!(state.page, 1);
        assert_eq!(state.page_size, PageSize::DEFAULT);
        assert_eq!(state.sort, None);
        assert!(!state.filter_mode);
        assert!(state.filters.is_empty());

        assert_eq!(decode("page=0").page, 1);
        assert_eq!(decode("page=-4").page, 1);
        assert_eq!(decode("%%%&&==").page, 1);
    }

    #[test]
    fn direction_without_field_is_ignored() {
        assert_eq!(decode("sort=desc").sort, None);
        assert_eq!(decode("sort=desc&sortField=").sort, None);
        assert_eq!(decode("sortField=city").sort, Some(SortSpec::asc("city")));
        assert_eq!(decode("sort=desc&sortField=city").sort, Some(SortSpec::desc("city")));
    }

    #[test]
    fn empty_filters_parameter_is_removed() {
        let query = encode(&StatePatch::filter("name", "   "), "filters=name-John&tab=2");
        assert!(!QueryParams::parse(&query).contains(PARAM_FILTERS));
        assert_eq!(QueryParams::parse(&query).get("tab"), Some("2"));
    }

    #[test]
    fn unrelated_parameters_are_preserved_in_place() {
        let query = encode(&StatePatch::page(3), "tab=7&page=2&modal=open");
        assert_eq!(query, "tab=7&page=3&modal=open");
    }

    #[test]
    fn data_changes_reset_page() {
        let current = "page=4&limit=10";
        for patch in [
            StatePatch::search("villa"),
            StatePatch::filter("city", "Lima"),
            StatePatch::page_size(PageSize::new(50).unwrap()),
            StatePatch::sort(Some(SortSpec::asc("price"))),
            StatePatch::sort(None),
        ] {
            assert_eq!(decode(&encode(&patch, current)).page, 1, "{patch:?}");
        }
    }

    #[test]
    fn page_change_leaves_everything_else() {
        let current = "search=house&filters=city-Lima&filtration=true&sort=desc&sortField=price&limit=50&page=1";
        let before = decode(current);
        let after = decode(&encode(&StatePatch::page(2), current));
        assert_eq!(after.page, 2);
        assert_eq!(GridState { page: 1, ..after }, before);
    }

    #[test]
    fn filter_mode_off_clears_filters_entirely() {
        let query = encode(&StatePatch::filter_mode(false), "filtration=true&filters=name-John");
        let params = QueryParams::parse(&query);
        assert!(!params.contains(PARAM_FILTERS));
        assert!(!params.contains(PARAM_FILTRATION));
    }

    #[test]
    fn filter_mode_on_does_not_fabricate_filters() {
        let query = encode(&StatePatch::filter_mode(true), "page=3");
        let state = decode(&query);
        assert!(state.filter_mode);
        assert!(state.filters.is_empty());
        assert_eq!(state.page, 3);
    }

    #[test]
    fn single_filter_edit_keeps_other_filters() {
        let query = encode(&StatePatch::filter("city", "Lima"), "filters=price-100-200");
        let state = decode(&query);
        assert_eq!(state.filters["price"], "100-200");
        assert_eq!(state.filters["city"], "Lima");
    }

    #[test]
    fn clearing_sort_removes_both_parameters() {
        let query = encode(&StatePatch::sort(None), "sort=asc&sortField=price");
        let params = QueryParams::parse(&query);
        assert!(!params.contains(PARAM_SORT));
        assert!(!params.contains(PARAM_SORT_FIELD));
    }

    #[test]
    fn set_drops_duplicate_keys() {
        let mut params = QueryParams::parse("?page=1&x=y&page=9");
        params.set("page", "2");
        assert_eq!(params.to_query_string(), "page=2&x=y");
    }

    #[test]
    fn export_query_appends_fields() {
        let query = export_query("search=loft&page=2", &["title", "price"]);
        let params = QueryParams::parse(&query);
        assert_eq!(params.get(PARAM_FIELDS), Some("title,price"));
        assert_eq!(params.get(PARAM_SEARCH), Some("loft"));
    }
}
