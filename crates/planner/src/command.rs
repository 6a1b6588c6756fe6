//! JSON command protocol for scripted layout editing.

use serde::{Deserialize, Serialize};
use shared::FurnitureItem;

use crate::harness::TestHarness;

/// A command an external agent can execute against the harness.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum AgentCommand {
    /// Place a catalog item at a plane position
    AddFurniture { item: FurnitureItem, x: f64, y: f64 },
    /// Remove a placement by ID
    Remove { id: String },
    /// Move a placement, keeping its rotation
    Move { id: String, x: f64, y: f64 },
    /// Rotate a placement by a delta in degrees
    Rotate { id: String, delta: f64 },
    /// Select one placement, or nothing when `id` is absent
    Select {
        #[serde(default)]
        id: Option<String>,
    },
    /// Clear selection.
    ClearSelection,
    /// Drop every placement.
    Reset,
    /// List all placements.
    Inspect,
    /// Build the scene and describe it.
    SceneSummary,
    /// Check the layout invariants and report out-of-room placements.
    Validate,
    /// Snapshot of the placement list as JSON.
    ExportLayout,
}

/// Response from executing a command.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl CommandResponse {
    fn ok() -> Self {
        Self {
            success: true,
            error: None,
            data: None,
        }
    }

    fn ok_with_data(data: serde_json::Value) -> Self {
        Self {
            success: true,
            error: None,
            data: Some(data),
        }
    }

    fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(msg.into()),
            data: None,
        }
    }
}

/// Execute a single command on the harness.
pub fn execute_command(harness: &mut TestHarness, cmd: AgentCommand) -> CommandResponse {
    match cmd {
        AgentCommand::AddFurniture { item, x, y } => {
            if !item.is_valid() {
                return CommandResponse::err(format!(
                    "Item {} needs a positive width and height",
                    item.id
                ));
            }
            let id = harness.add_item(item, x, y);
            CommandResponse::ok_with_data(serde_json::json!({ "id": id }))
        }

        AgentCommand::Remove { id } => {
            let removed = harness.remove(&id);
            CommandResponse::ok_with_data(serde_json::json!({ "removed": removed }))
        }

        AgentCommand::Move { id, x, y } => {
            let moved = harness.move_to(&id, x, y);
            CommandResponse::ok_with_data(serde_json::json!({ "moved": moved }))
        }

        AgentCommand::Rotate { id, delta } => {
            let rotated = harness.rotate(&id, delta);
            let rotation = harness.placement(&id).map(|p| p.rotation);
            CommandResponse::ok_with_data(serde_json::json!({
                "rotated": rotated,
                "rotation": rotation,
            }))
        }

        AgentCommand::Select { id } => {
            harness.select(id.as_deref());
            CommandResponse::ok_with_data(serde_json::json!({ "selected": id }))
        }

        AgentCommand::ClearSelection => {
            harness.clear_selection();
            CommandResponse::ok()
        }

        AgentCommand::Reset => {
            harness.reset();
            CommandResponse::ok()
        }

        AgentCommand::Inspect => {
            let store = &harness.session.store;
            let placements: Vec<serde_json::Value> = store
                .placements()
                .iter()
                .map(|p| {
                    serde_json::json!({
                        "id": p.id,
                        "item_id": p.furniture.id,
                        "name": p.furniture.name,
                        "x": p.x,
                        "y": p.y,
                        "rotation": p.rotation,
                        "selected": store.is_selected(&p.id),
                    })
                })
                .collect();
            CommandResponse::ok_with_data(serde_json::json!({
                "placement_count": placements.len(),
                "selected": store.selected_id(),
                "placements": placements,
            }))
        }

        AgentCommand::SceneSummary => {
            let scene = harness.build();
            let furniture: Vec<serde_json::Value> = scene
                .furniture
                .iter()
                .map(|n| {
                    serde_json::json!({
                        "id": n.id,
                        "name": n.name,
                        "center": n.center.to_array(),
                        "size": n.size.to_array(),
                        "yaw": n.yaw,
                        "selected": n.selected,
                        "textured": n.face.texture().is_some(),
                        "labels": n.labels.iter().map(|l| l.text.clone()).collect::<Vec<_>>(),
                    })
                })
                .collect();
            let walls: Vec<serde_json::Value> = scene
                .room
                .walls
                .iter()
                .map(|w| {
                    serde_json::json!({
                        "side": w.side,
                        "ghost": w.is_ghost(),
                        "opacity": w.material.opacity(),
                    })
                })
                .collect();
            CommandResponse::ok_with_data(serde_json::json!({
                "floor": scene.room.floor.size.to_array(),
                "walls": walls,
                "furniture": furniture,
                "light_count": scene.lights.len(),
                "camera_target": scene.camera.target.to_array(),
            }))
        }

        AgentCommand::Validate => {
            let layout = harness.layout();
            CommandResponse::ok_with_data(serde_json::json!({
                "errors": layout.validate_all(),
                "out_of_room": layout.out_of_room(),
            }))
        }

        AgentCommand::ExportLayout => {
            let json = harness.export_layout_json();
            CommandResponse::ok_with_data(serde_json::json!({ "layout_json": json }))
        }
    }
}

/// Parse and execute a single JSON command string.
pub fn execute_json(harness: &mut TestHarness, json: &str) -> Result<CommandResponse, String> {
    let cmd: AgentCommand =
        serde_json::from_str(json).map_err(|e| format!("Invalid command JSON: {e}"))?;
    Ok(execute_command(harness, cmd))
}

/// Parse and execute multiple JSON commands (array).
pub fn execute_json_batch(
    harness: &mut TestHarness,
    json: &str,
) -> Result<Vec<CommandResponse>, String> {
    let cmds: Vec<AgentCommand> =
        serde_json::from_str(json).map_err(|e| format!("Invalid commands JSON: {e}"))?;
    Ok(cmds
        .into_iter()
        .map(|cmd| execute_command(harness, cmd))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADD_DESK: &str = r#"{"command": "add_furniture", "item": {"id": "d1", "name": "Desk", "width": 800, "height": 400, "depth": 750}, "x": 100, "y": 100}"#;

    fn added_id(resp: CommandResponse) -> String {
        resp.data.unwrap()["id"].as_str().unwrap().to_string()
    }

    #[test]
    fn test_command_serde_select_none() {
        let cmd: AgentCommand = serde_json::from_str(r#"{"command": "select"}"#).unwrap();
        assert!(matches!(cmd, AgentCommand::Select { id: None }));
    }

    #[test]
    fn test_command_serde_rotate() {
        let json = r#"{"command": "rotate", "id": "p1", "delta": -90}"#;
        match serde_json::from_str(json).unwrap() {
            AgentCommand::Rotate { id, delta } => {
                assert_eq!(id, "p1");
                assert_eq!(delta, -90.0);
            }
            other => panic!("Expected Rotate, got {other:?}"),
        }
    }

    #[test]
    fn test_execute_add_furniture() {
        let mut h = TestHarness::new();
        let resp = execute_json(&mut h, ADD_DESK).unwrap();
        assert!(resp.success);
        assert_eq!(h.placement_count(), 1);
    }

    #[test]
    fn test_execute_add_invalid_item() {
        let mut h = TestHarness::new();
        let json = r#"{"command": "add_furniture", "item": {"id": "x", "name": "X", "width": -1, "height": 400}, "x": 0, "y": 0}"#;
        let resp = execute_json(&mut h, json).unwrap();
        assert!(!resp.success);
        assert_eq!(h.placement_count(), 0);
    }

    #[test]
    fn test_execute_rotate_wraps() {
        let mut h = TestHarness::new();
        let id = added_id(execute_json(&mut h, ADD_DESK).unwrap());
        let cmd = format!(r#"{{"command": "rotate", "id": "{id}", "delta": -90}}"#);
        let resp = execute_json(&mut h, &cmd).unwrap();
        assert_eq!(resp.data.unwrap()["rotation"], 270.0);
    }

    #[test]
    fn test_execute_remove_unknown_is_not_an_error() {
        let mut h = TestHarness::new();
        let resp = execute_json(&mut h, r#"{"command": "remove", "id": "nope"}"#).unwrap();
        assert!(resp.success);
        assert_eq!(resp.data.unwrap()["removed"], false);
    }

    #[test]
    fn test_execute_inspect() {
        let mut h = TestHarness::new();
        let id = added_id(execute_json(&mut h, ADD_DESK).unwrap());
        execute_json(&mut h, ADD_DESK).unwrap();
        execute_json(&mut h, &format!(r#"{{"command": "select", "id": "{id}"}}"#)).unwrap();

        let data = execute_json(&mut h, r#"{"command": "inspect"}"#)
            .unwrap()
            .data
            .unwrap();
        assert_eq!(data["placement_count"], 2);
        assert_eq!(data["selected"], id.as_str());
        assert_eq!(data["placements"][0]["selected"], true);
        assert_eq!(data["placements"][1]["selected"], false);
    }

    #[test]
    fn test_execute_scene_summary() {
        let mut h = TestHarness::new();
        execute_json(&mut h, ADD_DESK).unwrap();
        let data = execute_json(&mut h, r#"{"command": "scene_summary"}"#)
            .unwrap()
            .data
            .unwrap();
        let center = &data["furniture"][0]["center"];
        assert!((center[0].as_f64().unwrap() - 1.4).abs() < 1e-5);
        assert!((center[2].as_f64().unwrap() - 1.2).abs() < 1e-5);
        assert_eq!(data["furniture"][0]["labels"][1], "800×400×750");
        assert_eq!(data["light_count"], 3);
        let ghosts: Vec<_> = data["walls"]
            .as_array()
            .unwrap()
            .iter()
            .filter(|w| w["ghost"] == true)
            .map(|w| w["side"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(ghosts, vec!["right", "front"]);
    }

    #[test]
    fn test_execute_export_layout() {
        let mut h = TestHarness::new();
        execute_json(&mut h, ADD_DESK).unwrap();
        let data = execute_json(&mut h, r#"{"command": "export_layout"}"#)
            .unwrap()
            .data
            .unwrap();
        assert!(data["layout_json"].as_str().unwrap().contains("\"Desk\""));
    }

    #[test]
    fn test_execute_invalid_json() {
        let mut h = TestHarness::new();
        assert!(execute_json(&mut h, "not valid json").is_err());
        assert!(execute_json(&mut h, r#"{"command": "explode"}"#).is_err());
    }

    #[test]
    fn test_execute_batch() {
        let mut h = TestHarness::new();
        let batch = format!(r#"[{ADD_DESK}, {ADD_DESK}, {{"command": "reset"}}, {ADD_DESK}]"#);
        let responses = execute_json_batch(&mut h, &batch).unwrap();
        assert_eq!(responses.len(), 4);
        assert!(responses.iter().all(|r| r.success));
        assert_eq!(h.placement_count(), 1);
    }
}
