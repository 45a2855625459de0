/// Warehouse detail state machine and resize handling.
///
/// Covers every transition of the detail view, the stale-response race
/// (select W1, select W2, W2 arrives, W1 arrives late) and the width and
/// orientation rules of the resize handler.
use stockdash::api::FetchError;
use stockdash::api::models::{ProductLine, Shipment, WarehouseDetail};
use stockdash::view::viewport::{Orientation, handle_resize};
use stockdash::view::{
    DetailState, Layout, ResizeAction, ResizeTracker, Resolution, Viewport, WarehouseView, render,
};

fn detail(stores: &[&str]) -> WarehouseDetail {
    WarehouseDetail {
        shipments: stores
            .iter()
            .map(|store| Shipment {
                store_id: store.to_string(),
                products: vec![ProductLine {
                    product_id: "P1".to_string(),
                    sizes: vec!["S".to_string(), "M".to_string()],
                }],
            })
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// State transitions
// ---------------------------------------------------------------------------

#[test]
fn select_moves_to_loading() {
    let mut view = WarehouseView::new();
    view.select("W1");
    assert_eq!(
        view.state(),
        &DetailState::Loading {
            warehouse_id: "W1".to_string()
        }
    );
}

#[test]
fn non_empty_response_loads_summary_and_stores() {
    let mut view = WarehouseView::new();
    let token = view.select("W1");

    assert_eq!(view.resolve(token, Ok(detail(&["A", "B"]))), Resolution::Applied);

    let DetailState::Loaded {
        warehouse_id,
        summary,
        stores,
        ..
    } = view.state()
    else {
        panic!("expected loaded state, got {}", view.state().name());
    };
    assert_eq!(warehouse_id, "W1");
    assert_eq!(summary.store_count, 2);
    assert_eq!(summary.total_size_count, 4);
    assert_eq!(stores.len(), 2);
    assert_eq!(stores[1].store_id, "B");
}

#[test]
fn empty_response_is_empty_state_not_loaded() {
    let mut view = WarehouseView::new();
    let token = view.select("W1");
    view.resolve(token, Ok(detail(&[])));

    assert_eq!(
        view.state(),
        &DetailState::Empty {
            warehouse_id: "W1".to_string()
        }
    );
}

#[test]
fn failed_response_keeps_error() {
    let mut view = WarehouseView::new();
    let token = view.select("W1");
    view.resolve(token, Err(FetchError::Server("almacén no encontrado".to_string())));

    let DetailState::Error { error, .. } = view.state() else {
        panic!("expected error state");
    };
    assert_eq!(error.kind(), "server");
}

#[test]
fn reselecting_after_error_loads_again() {
    let mut view = WarehouseView::new();
    let token = view.select("W1");
    view.resolve(token, Err(FetchError::Network("timed out".to_string())));

    let token = view.select("W1");
    assert_eq!(view.state().name(), "loading");
    view.resolve(token, Ok(detail(&["A"])));
    assert_eq!(view.state().name(), "loaded");
}

#[test]
fn stale_response_is_discarded() {
    let mut view = WarehouseView::new();
    let w1 = view.select("W1");
    let w2 = view.select("W2");

    assert_eq!(view.resolve(w2, Ok(detail(&["B"]))), Resolution::Applied);
    assert_eq!(view.resolve(w1, Ok(detail(&["A", "A2"]))), Resolution::Stale);

    let DetailState::Loaded {
        warehouse_id,
        summary,
        ..
    } = view.state()
    else {
        panic!("expected loaded state");
    };
    assert_eq!(warehouse_id, "W2");
    assert_eq!(summary.store_count, 1);
}

#[test]
fn stale_response_arriving_first_does_not_end_loading() {
    let mut view = WarehouseView::new();
    let w1 = view.select("W1");
    let w2 = view.select("W2");

    assert_eq!(
        view.resolve(w1, Err(FetchError::Network("refused".to_string()))),
        Resolution::Stale
    );
    assert!(view.is_current(w2));
    assert_eq!(view.state().warehouse_id(), Some("W2"));
    assert_eq!(view.state().name(), "loading");
}

#[test]
fn loaded_state_renders_detail_with_store_breakdown() {
    colored::control::set_override(false);

    let mut view = WarehouseView::new();
    let token = view.select("ALM-7");
    view.resolve(token, Ok(detail(&["T-1"])));

    let text = render::detail_state(view.state());
    assert!(text.contains("Warehouse ALM-7"));
    assert!(text.contains("Most shipped products"));
    assert!(text.contains("Shipments by store"));
    assert!(text.contains("T-1"));
}

// ---------------------------------------------------------------------------
// Resize handling
// ---------------------------------------------------------------------------

fn vp(width: u16, height: u16) -> Viewport {
    Viewport { width, height }
}

#[test]
fn resize_sequence_threads_tracker_state() {
    let tracker = ResizeTracker::new(vp(120, 40));
    assert_eq!(tracker.last_orientation, Orientation::Landscape);

    let (tracker, action) = handle_resize(tracker, vp(120, 30));
    assert_eq!(action, ResizeAction::None);

    let (tracker, action) = handle_resize(tracker, vp(100, 40));
    assert_eq!(action, ResizeAction::Relayout);
    assert_eq!(tracker.last_width, 100);

    let (tracker, action) = handle_resize(tracker, vp(60, 40));
    assert_eq!(action, ResizeAction::Redraw);
    assert_eq!(tracker.last_orientation, Orientation::Portrait);

    let (_, action) = handle_resize(tracker, vp(100, 40));
    assert_eq!(action, ResizeAction::Redraw);
}

#[test]
fn layout_switches_at_breakpoint() {
    assert_eq!(vp(79, 24).layout(80), Layout::Compact);
    assert_eq!(vp(80, 24).layout(80), Layout::Wide);
}
