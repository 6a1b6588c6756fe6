//! GPU-side copies of decoded thumbnails

use std::collections::HashMap;

use room_planner_lib::texture::{TextureCache, TextureEvent};

/// egui texture handles keyed by thumbnail reference
#[derive(Default)]
pub struct TextureHandles {
    handles: HashMap<String, egui::TextureHandle>,
}

impl TextureHandles {
    /// Upload every image that finished loading since the last poll
    pub fn upload(&mut self, ctx: &egui::Context, cache: &TextureCache, events: &[TextureEvent]) {
        for event in events.iter().filter(|e| e.ready) {
            if self.handles.contains_key(&event.reference) {
                continue;
            }
            let Some(image) = cache.ready(&event.reference) else {
                continue;
            };
            let color_image = egui::ColorImage::from_rgba_unmultiplied(image.size, &image.rgba);
            let handle = ctx.load_texture(
                format!("thumb:{}", event.reference),
                color_image,
                egui::TextureOptions::LINEAR,
            );
            tracing::debug!("Uploaded thumbnail {}", event.reference);
            self.handles.insert(event.reference.clone(), handle);
        }
    }

    pub fn id(&self, reference: &str) -> Option<egui::TextureId> {
        self.handles.get(reference).map(|h| h.id())
    }
}
