//! Integration tests for the AgentCommand JSON protocol.
//!
//! Tests the full command pipeline: JSON string -> parse -> execute -> response.

use room_planner_lib::command::{execute_json, execute_json_batch};
use room_planner_lib::harness::TestHarness;

const ADD_DESK: &str = r##"{"command": "add_furniture", "item": {"id": "desk-800", "name": "Desk", "width": 800, "height": 400, "depth": 750, "color": "#8b7355"}, "x": 100, "y": 100}"##;

fn add_desk(h: &mut TestHarness) -> String {
    let resp = execute_json(h, ADD_DESK).unwrap();
    assert!(resp.success);
    resp.data.unwrap()["id"].as_str().unwrap().to_string()
}

#[test]
fn test_command_scripted_session() {
    let mut h = TestHarness::new();
    let a = add_desk(&mut h);
    let b = add_desk(&mut h);

    let script = format!(
        r#"[
            {{"command": "move", "id": "{b}", "x": 250, "y": 150}},
            {{"command": "rotate", "id": "{b}", "delta": 90}},
            {{"command": "rotate", "id": "{b}", "delta": -180}},
            {{"command": "select", "id": "{a}"}},
            {{"command": "inspect"}}
        ]"#
    );
    let responses = execute_json_batch(&mut h, &script).unwrap();
    assert!(responses.iter().all(|r| r.success));

    let inspect = responses[4].data.as_ref().unwrap();
    assert_eq!(inspect["placement_count"], 2);
    assert_eq!(inspect["selected"], a.as_str());
    assert_eq!(inspect["placements"][1]["x"], 250.0);
    assert_eq!(inspect["placements"][1]["rotation"], 270.0);
}

#[test]
fn test_command_select_none_clears() {
    let mut h = TestHarness::new();
    let a = add_desk(&mut h);
    execute_json(&mut h, &format!(r#"{{"command": "select", "id": "{a}"}}"#)).unwrap();
    execute_json(&mut h, r#"{"command": "select"}"#).unwrap();
    assert!(h.session.store.selected_id().is_none());

    execute_json(&mut h, &format!(r#"{{"command": "select", "id": "{a}"}}"#)).unwrap();
    execute_json(&mut h, r#"{"command": "clear_selection"}"#).unwrap();
    assert!(h.session.store.selected_id().is_none());
}

#[test]
fn test_command_validate_reports_out_of_room() {
    let mut h = TestHarness::new();
    add_desk(&mut h);
    let far = add_desk(&mut h);
    execute_json(&mut h, &format!(r#"{{"command": "move", "id": "{far}", "x": 900, "y": 0}}"#)).unwrap();

    let data = execute_json(&mut h, r#"{"command": "validate"}"#)
        .unwrap()
        .data
        .unwrap();
    assert!(data["errors"].as_array().unwrap().is_empty());
    assert_eq!(data["out_of_room"], serde_json::json!([far]));
}

#[test]
fn test_command_scene_summary_marks_selection() {
    let mut h = TestHarness::new();
    let a = add_desk(&mut h);
    execute_json(&mut h, &format!(r#"{{"command": "select", "id": "{a}"}}"#)).unwrap();

    let data = execute_json(&mut h, r#"{"command": "scene_summary"}"#)
        .unwrap()
        .data
        .unwrap();
    assert_eq!(data["furniture"][0]["selected"], true);
    assert_eq!(data["furniture"][0]["textured"], false);
    assert_eq!(data["floor"], serde_json::json!([5.0, 4.0]));
}

#[test]
fn test_command_reset_then_export_is_empty() {
    let mut h = TestHarness::new();
    add_desk(&mut h);
    execute_json(&mut h, r#"{"command": "reset"}"#).unwrap();
    let data = execute_json(&mut h, r#"{"command": "export_layout"}"#)
        .unwrap()
        .data
        .unwrap();
    let layout: serde_json::Value =
        serde_json::from_str(data["layout_json"].as_str().unwrap()).unwrap();
    assert_eq!(layout, serde_json::json!([]));
}

#[test]
fn test_command_batch_rejects_bad_json() {
    let mut h = TestHarness::new();
    assert!(execute_json_batch(&mut h, r#"[{"command": "inspect"}, {"command": "nope"}]"#).is_err());
    assert_eq!(h.placement_count(), 0);
}
