//! Integration tests for TestHarness.
//!
//! Drives placement, selection, drag/drop and the scene cache headlessly.

use std::sync::Arc;

use room_planner_lib::catalog::JsonCatalog;
use room_planner_lib::config::PlannerConfig;
use room_planner_lib::drag::DragPayload;
use room_planner_lib::fixtures::{self, MemoryThumbnailLoader};
use room_planner_lib::harness::TestHarness;
use room_planner_lib::session::PlannerSession;
use room_planner_lib::state::CatalogBrowser;
use shared::{PlanePoint, RoomDimensions};

#[test]
fn test_drop_desk_lands_at_expected_scene_position() {
    let mut h = TestHarness::new();
    let payload = DragPayload::encode(&fixtures::desk());
    let id = h.drop_json(payload.as_str(), 100.0, 100.0).unwrap();

    h.build();
    let node = h.furniture_node(&id).unwrap();
    assert!((node.center.x - 1.4).abs() < 1e-5);
    assert!((node.center.z - 1.2).abs() < 1e-5);
    assert!((node.center.y - 0.375).abs() < 1e-5);
    assert!((node.size.y - 0.75).abs() < 1e-5);

    let v = h.validate_mesh(&id).unwrap();
    assert!(v.validate_all().is_empty(), "{:?}", v.validate_all());
    assert!(v.dimensions_approx([0.8, 0.75, 0.4], 1e-4));
}

#[test]
fn test_drop_relative_to_canvas_origin() {
    let mut h = TestHarness::new();
    let payload = DragPayload::encode(&fixtures::chair());
    let id = h
        .drop_at(
            payload.as_str(),
            PlanePoint::new(350.0, 260.0),
            PlanePoint::new(250.0, 60.0),
        )
        .unwrap();
    let placed = h.placement(&id).unwrap();
    assert_eq!((placed.x, placed.y), (100.0, 200.0));
    assert_eq!(placed.rotation, 0.0);
}

#[test]
fn test_malformed_payload_adds_nothing() {
    let mut h = TestHarness::new();
    assert!(h.drop_json("{not json", 10.0, 10.0).is_none());
    assert!(h.drop_json(r#"{"id": "x", "name": "X"}"#, 10.0, 10.0).is_none());
    assert!(h.drop_json("", 10.0, 10.0).is_none());
    assert_eq!(h.placement_count(), 0);
}

#[test]
fn test_rotation_accumulates_modulo_360() {
    let mut h = TestHarness::new();
    let id = h.add_item(fixtures::desk(), 0.0, 0.0);
    let deltas = [90.0, 90.0, 90.0, 90.0, 15.0, -30.0, -90.0, 720.0];
    for d in deltas {
        assert!(h.rotate(&id, d));
    }
    let expected = deltas.iter().sum::<f64>().rem_euclid(360.0);
    let rotation = h.placement(&id).unwrap().rotation;
    assert!((rotation - expected).abs() < 1e-9);
    assert!((0.0..360.0).contains(&rotation));
}

#[test]
fn test_selection_is_exclusive() {
    let mut h = TestHarness::new();
    let a = h.add_item(fixtures::desk(), 0.0, 0.0);
    let b = h.add_item(fixtures::chair(), 100.0, 0.0);

    h.select(Some(&a));
    h.select(None);
    assert!(h.session.store.selected_id().is_none());

    h.select(Some(&a));
    h.select(Some(&b));
    assert!(!h.session.store.is_selected(&a));
    assert!(h.session.store.is_selected(&b));

    h.build();
    let selected: Vec<_> = h.scene().unwrap().selected_nodes().map(|n| n.id.clone()).collect();
    assert_eq!(selected, vec![b]);
}

#[test]
fn test_remove_leaves_others_untouched() {
    let mut h = TestHarness::new();
    let a = h.add_item(fixtures::desk(), 0.0, 0.0);
    let b = h.add_item(fixtures::chair(), 100.0, 50.0);
    let c = h.add_item(fixtures::desk(), 200.0, 100.0);
    h.rotate(&c, 45.0);
    let before_c = h.placement(&c).unwrap().clone();

    assert!(h.remove(&b));
    assert!(!h.remove(&b));

    let ids: Vec<_> = h
        .session
        .store
        .placements()
        .iter()
        .map(|p| p.id.clone())
        .collect();
    assert_eq!(ids, vec![a, c.clone()]);
    assert_eq!(h.placement(&c).unwrap(), &before_c);
}

#[test]
fn test_unknown_ids_are_no_ops() {
    let mut h = TestHarness::new();
    let a = h.add_item(fixtures::desk(), 0.0, 0.0);
    h.select(Some(&a));
    assert!(!h.move_to("ghost", 1.0, 1.0));
    assert!(!h.rotate("ghost", 90.0));
    assert!(!h.remove("ghost"));
    assert_eq!(h.placement_count(), 1);
    assert!(h.session.store.is_selected(&a));
}

#[test]
fn test_scene_cache_rebuilds_only_on_change() {
    let mut h = TestHarness::new();
    let id = h.add_item(fixtures::chair(), 0.0, 0.0);
    h.build();
    h.build();
    assert_eq!(h.scene_rebuild_count(), 1);

    h.select(Some(&id));
    h.build();
    assert_eq!(h.scene_rebuild_count(), 2);
    assert!(h.furniture_node(&id).unwrap().selected);

    h.move_to(&id, 50.0, 50.0);
    h.build();
    assert_eq!(h.scene_rebuild_count(), 3);
}

#[test]
fn test_category_switch_keeps_placements() {
    let catalog = JsonCatalog::from_json(fixtures::catalog_json()).unwrap();
    let session = PlannerSession::with_room(
        Arc::new(PlannerConfig::default()),
        RoomDimensions::default(),
        CatalogBrowser::new(Box::new(catalog)),
    );
    let mut h = TestHarness::with_session(session, Arc::new(MemoryThumbnailLoader::new()));

    let desk = h.session.catalog.find_item("desk-800").unwrap().clone();
    let payload = DragPayload::encode(&desk);
    let id = h.drop_json(payload.as_str(), 10.0, 10.0).unwrap();
    let before = h.placement(&id).unwrap().clone();

    h.session.catalog.select_category("lab");
    assert_eq!(h.session.catalog.items().len(), 1);
    assert_eq!(h.placement(&id).unwrap(), &before);
    assert_eq!(h.placement(&id).unwrap().furniture.name, "Desk");
}

#[test]
fn test_out_of_room_is_reported_not_enforced() {
    let mut h = TestHarness::with_config(PlannerConfig::default(), RoomDimensions::new(5000.0, 4000.0));
    let inside = h.add_item(fixtures::desk(), 0.0, 0.0);
    let outside = h.add_item(fixtures::desk(), 480.0, 0.0);

    let layout = h.layout();
    assert!(layout.validate_all().is_empty());
    assert_eq!(layout.out_of_room(), vec![outside.clone()]);
    assert!(h.placement(&inside).is_some());
    assert_eq!(h.placement(&outside).unwrap().x, 480.0);
}

#[test]
fn test_drops_share_the_catalog_entry_across_category_switches() {
    let catalog = JsonCatalog::from_json(fixtures::catalog_json()).unwrap();
    let session = PlannerSession::with_room(
        Arc::new(PlannerConfig::default()),
        RoomDimensions::default(),
        CatalogBrowser::new(Box::new(catalog)),
    );
    let mut h = TestHarness::with_session(session, Arc::new(MemoryThumbnailLoader::new()));
    let category = h.session.catalog.selected_category().unwrap().to_string();
    let desk = Arc::clone(h.session.catalog.find_item("desk-800").unwrap());
    let payload = DragPayload::encode(&desk);

    let first = h.drop_json(payload.as_str(), 10.0, 10.0).unwrap();
    h.session.catalog.select_category("lab");
    h.session.catalog.select_category(&category);
    let second = h.drop_json(payload.as_str(), 60.0, 10.0).unwrap();

    let a = &h.placement(&first).unwrap().furniture;
    let b = &h.placement(&second).unwrap().furniture;
    assert!(Arc::ptr_eq(a, b));
    assert!(Arc::ptr_eq(a, &desk));
}
