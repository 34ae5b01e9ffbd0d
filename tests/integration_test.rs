use std::time::{Duration, Instant};

use rgrid::domain::pagination::totals_label;
use rgrid::state::GridViewState;
use rgrid::{
    decode, ColumnSpec, GridConfig, GridCoordinator, GridInteraction, GridState, MemoryLocation, PageNav, PageSize,
    QueryStore, SortSpec,
};
use serde_json::Value;

fn columns() -> Vec<ColumnSpec<Value>> {
    vec![
        ColumnSpec::new("name", "Name"),
        ColumnSpec::new("city", "City"),
        ColumnSpec::new("price", "Price"),
        ColumnSpec::new("actions", "").sortable(false).filterable(false),
    ]
}

fn view_for(location: &MemoryLocation) -> GridViewState {
    GridViewState::new(&GridConfig::default(), &decode(&location.query()))
}

fn handle_all(
    interactions: Vec<GridInteraction>,
    view: &mut GridViewState,
    location: &mut MemoryLocation,
    total_rows: usize,
) {
    let columns = columns();
    for interaction in interactions {
        GridCoordinator::handle(interaction, view, location, &columns, total_rows);
    }
}

#[test]
fn test_fast_typing_commits_once() {
    let mut location = MemoryLocation::new("page=4");
    let mut view = view_for(&location);
    let t0 = Instant::now();

    view.search.edit("A", t0);
    view.search.edit("AB", t0 + Duration::from_millis(100));
    view.search.edit("ABC", t0 + Duration::from_millis(200));

    for ms in [250, 300, 499] {
        let due = GridCoordinator::poll_commits(&mut view, t0 + Duration::from_millis(ms));
        assert!(due.is_empty(), "nothing should commit at {}ms", ms);
    }

    let due = GridCoordinator::poll_commits(&mut view, t0 + Duration::from_millis(500));
    assert_eq!(due, vec![GridInteraction::SearchCommitted("ABC".to_string())]);
    handle_all(due, &mut view, &mut location, 100);

    assert_eq!(location.version(), 1);
    let state = decode(&location.query());
    assert_eq!(state.search, "ABC");
    assert_eq!(state.page, 1);

    assert!(GridCoordinator::poll_commits(&mut view, t0 + Duration::from_secs(2)).is_empty());
}

#[test]
fn test_last_page_navigation() {
    let mut location = MemoryLocation::new("limit=10&page=3");
    let mut view = view_for(&location);

    handle_all(vec![GridInteraction::PageNav(PageNav::Last)], &mut view, &mut location, 47);

    let state = decode(&location.query());
    assert_eq!(state.page, 5);
    assert_eq!(state.page_size.get(), 10);
    assert_eq!(totals_label(47, None), "Total: 47");
    assert_eq!(totals_label(47, Some(47)), "Total: 47");
}

#[test]
fn test_navigation_clamps_at_bounds() {
    let mut location = MemoryLocation::new("limit=10&page=5");
    let mut view = view_for(&location);

    handle_all(vec![GridInteraction::PageNav(PageNav::Next)], &mut view, &mut location, 47);
    assert_eq!(decode(&location.query()).page, 5);

    handle_all(vec![GridInteraction::PageNav(PageNav::To(99))], &mut view, &mut location, 47);
    assert_eq!(decode(&location.query()).page, 5);

    handle_all(vec![GridInteraction::PageNav(PageNav::First)], &mut view, &mut location, 47);
    handle_all(vec![GridInteraction::PageNav(PageNav::Prev)], &mut view, &mut location, 47);
    assert_eq!(decode(&location.query()).page, 1);
}

#[test]
fn test_filter_mode_off_removes_filters() {
    let mut location = MemoryLocation::new("filtration=true&filters=name-John&page=3&tab=listings");
    let mut view = view_for(&location);
    view.sync_inputs(&decode(&location.query()), &columns());
    assert_eq!(view.filters.len(), 3);

    handle_all(vec![GridInteraction::FilterModeToggled(false)], &mut view, &mut location, 10);

    let query = location.query();
    assert!(!query.contains("filters"), "query was {}", query);
    assert!(!query.contains("filtration"), "query was {}", query);
    assert!(query.contains("tab=listings"));
    assert!(view.filters.is_empty());

    let state = decode(&query);
    assert!(state.filters.is_empty());
    assert!(!state.filter_mode);
    assert_eq!(state.page, 1);
}

#[test]
fn test_pending_filter_is_cancelled_by_filter_mode_off() {
    let mut location = MemoryLocation::new("filtration=true");
    let mut view = view_for(&location);
    view.sync_inputs(&decode(&location.query()), &columns());

    let t0 = Instant::now();
    view.filters.input_mut("city", "").edit("Lima", t0);
    handle_all(vec![GridInteraction::FilterModeToggled(false)], &mut view, &mut location, 10);

    assert!(GridCoordinator::poll_commits(&mut view, t0 + Duration::from_secs(1)).is_empty());
    assert!(decode(&location.query()).filters.is_empty());
}

#[test]
fn test_filter_due_in_same_frame_as_filter_mode_off_is_not_written() {
    let mut location = MemoryLocation::new("filtration=true&page=3");
    let mut view = view_for(&location);
    view.sync_inputs(&decode(&location.query()), &columns());

    let t0 = Instant::now();
    view.filters.input_mut("city", "").edit("Lima", t0);

    // Widget interactions come first, then the commits due this frame.
    let mut frame = vec![GridInteraction::FilterModeToggled(false)];
    frame.extend(GridCoordinator::poll_commits(&mut view, t0 + Duration::from_millis(310)));
    assert_eq!(frame.len(), 2);
    handle_all(frame, &mut view, &mut location, 10);

    let query = location.query();
    assert!(!query.contains("filters="), "unexpected filters in {}", query);
    assert!(!query.contains("filtration"), "unexpected filtration in {}", query);
    let state = decode(&query);
    assert!(state.filters.is_empty());
    assert_eq!(state.page, 1);
}

#[test]
fn test_page_size_change_resets_page() {
    let mut location = MemoryLocation::new("page=7&limit=25&sortField=price&sort=desc");
    let mut view = view_for(&location);

    handle_all(
        vec![GridInteraction::PageSizeChanged(PageSize::new(100).unwrap())],
        &mut view,
        &mut location,
        1000,
    );

    let state = decode(&location.query());
    assert_eq!(state.page, 1);
    assert_eq!(state.page_size.get(), 100);
    assert_eq!(state.sort, Some(SortSpec::desc("price")));
}

#[test]
fn test_three_header_clicks_cycle_direction() {
    let mut location = MemoryLocation::new("");
    let mut view = view_for(&location);
    let mut directions = Vec::new();

    for _ in 0..3 {
        handle_all(vec![GridInteraction::SortClicked("name".to_string())], &mut view, &mut location, 10);
        directions.push(decode(&location.query()).sort.map(|s| s.direction.as_str()));
    }
    assert_eq!(directions, vec![Some("asc"), Some("desc"), Some("asc")]);

    handle_all(vec![GridInteraction::SortClicked("city".to_string())], &mut view, &mut location, 10);
    assert_eq!(decode(&location.query()).sort, Some(SortSpec::asc("city")));
}

#[test]
fn test_filter_commits_land_together_and_keep_dashes() {
    let mut location = MemoryLocation::new("filtration=true");
    let mut view = view_for(&location);
    view.sync_inputs(&decode(&location.query()), &columns());

    let t0 = Instant::now();
    view.filters.input_mut("price", "").edit("100-200", t0);
    view.filters.input_mut("city", "").edit("Santiago", t0);

    let due = GridCoordinator::poll_commits(&mut view, t0 + Duration::from_millis(300));
    assert_eq!(due.len(), 2);
    handle_all(due, &mut view, &mut location, 10);

    let state = decode(&location.query());
    assert_eq!(state.filters["price"], "100-200");
    assert_eq!(state.filters["city"], "Santiago");
    assert!(state.filter_mode);
}

#[test]
fn test_back_restores_previous_state() {
    let mut location = MemoryLocation::new("page=2");
    let mut view = view_for(&location);

    handle_all(vec![GridInteraction::QuickSort], &mut view, &mut location, 10);
    assert_eq!(decode(&location.query()).sort, Some(SortSpec::asc("name")));

    assert!(location.back());
    let state = decode(&location.query());
    assert_eq!(state, GridState { page: 2, ..GridState::default() });
}
