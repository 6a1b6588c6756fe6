//! Keyboard shortcut handling

use eframe::egui;

use crate::state::AppState;

/// Rotation applied by `R` / `Shift+R` (degrees)
const ROTATE_STEP: f64 = 90.0;

/// Handle keyboard shortcuts for the application
pub fn handle_keyboard(ctx: &egui::Context, state: &mut AppState) {
    // Don't handle shortcuts when a text field is focused
    if ctx.memory(|m| m.focused().is_some()) {
        return;
    }

    let (delete, rotate, escape) = ctx.input(|i| {
        let rotate = if i.key_pressed(egui::Key::R) && !i.modifiers.command {
            Some(if i.modifiers.shift { -ROTATE_STEP } else { ROTATE_STEP })
        } else {
            None
        };
        (
            i.key_pressed(egui::Key::Delete) || i.key_pressed(egui::Key::Backspace),
            rotate,
            i.key_pressed(egui::Key::Escape),
        )
    });

    let store = &mut state.session.store;
    if escape {
        store.clear_selection();
        return;
    }
    let Some(id) = store.selected_id().cloned() else {
        return;
    };
    if delete {
        store.remove_placement(&id);
    } else if let Some(delta) = rotate {
        store.rotate_placement(&id, delta);
    }
}
