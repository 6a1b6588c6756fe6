// Library crate: the planner core plus the headless harness and command protocol.
// GUI-specific modules (app, ui, viewport rendering) remain in the binary crate.

pub mod catalog;
pub mod command;
pub mod config;
pub mod drag;
pub mod fixtures;
pub mod harness;
pub mod scene;
pub mod session;
pub mod state;
pub mod texture;
pub mod transform;
pub mod validation;

/// Viewport types shared with the scene builder (face meshes, rays, picking).
/// Drawing, the plan canvas and input handling stay in the binary crate.
pub mod viewport {
    pub mod mesh;
    pub mod picking;
}
