//! Layout and mesh validation.
//!
//! `LayoutValidator` checks the placement list against the data-model
//! invariants and reports placements that leave the room. It never blocks or
//! corrects anything. `MeshValidator` checks extracted mesh buffers.

use std::collections::HashSet;

use shared::PlacementId;

use crate::session::PlannerSession;
use crate::viewport::mesh::MeshData;
use crate::viewport::picking::Aabb;

/// Read-only checks over a session's placements
pub struct LayoutValidator<'a> {
    session: &'a PlannerSession,
}

impl<'a> LayoutValidator<'a> {
    pub fn new(session: &'a PlannerSession) -> Self {
        Self { session }
    }

    /// Invariant violations; empty means the layout is consistent.
    ///
    /// A selection naming a missing placement is not an error.
    pub fn validate_all(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();

        for p in self.session.store.placements() {
            if !seen.insert(p.id.as_str()) {
                errors.push(format!("Duplicate placement id {}", p.id));
            }
            if !(0.0..360.0).contains(&p.rotation) {
                errors.push(format!(
                    "Placement {} rotation {} outside [0, 360)",
                    p.id, p.rotation
                ));
            }
            if !p.x.is_finite() || !p.y.is_finite() {
                errors.push(format!(
                    "Placement {} has non-finite position ({}, {})",
                    p.id, p.x, p.y
                ));
            }
            if !p.furniture.is_valid() {
                errors.push(format!(
                    "Placement {} references item {} without a positive footprint",
                    p.id, p.furniture.id
                ));
            }
        }

        errors
    }

    /// Placements whose rotated footprint is not fully inside the room
    pub fn out_of_room(&self) -> Vec<PlacementId> {
        let (w, h) = self.session.room_plane_size();
        let room = kurbo::Rect::new(0.0, 0.0, w, h);
        // Footprints touching the wall line count as inside
        let tolerance = 1e-6;

        self.session
            .store
            .placements()
            .iter()
            .filter(|p| {
                let bbox = self.session.transform.footprint(p).bounding_box();
                bbox.x0 < room.x0 - tolerance
                    || bbox.y0 < room.y0 - tolerance
                    || bbox.x1 > room.x1 + tolerance
                    || bbox.y1 > room.y1 + tolerance
            })
            .map(|p| p.id.clone())
            .collect()
    }
}

/// Validator for `MeshData` integrity checks.
pub struct MeshValidator<'a> {
    mesh: &'a MeshData,
}

impl<'a> MeshValidator<'a> {
    pub fn new(mesh: &'a MeshData) -> Self {
        Self { mesh }
    }

    pub fn vertex_count(&self) -> usize {
        self.mesh.vertex_count()
    }

    pub fn triangle_count(&self) -> usize {
        self.mesh.triangle_count()
    }

    /// Vertex buffer length is a multiple of the 9-float stride
    pub fn is_stride_valid(&self) -> bool {
        self.mesh.vertices.len() % 9 == 0
    }

    pub fn is_index_stride_valid(&self) -> bool {
        self.mesh.indices.len() % 3 == 0
    }

    pub fn are_indices_in_range(&self) -> bool {
        let max_idx = self.vertex_count() as u32;
        self.mesh.indices.iter().all(|&i| i < max_idx)
    }

    pub fn are_normals_normalized(&self, epsilon: f32) -> bool {
        self.mesh.vertices.chunks_exact(9).all(|v| {
            let len = (v[3] * v[3] + v[4] * v[4] + v[5] * v[5]).sqrt();
            (len - 1.0).abs() <= epsilon
        })
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_mesh(self.mesh)
    }

    /// Bounding box extents (x, y, z)
    pub fn dimensions(&self) -> [f32; 3] {
        self.aabb().size().to_array()
    }

    pub fn dimensions_approx(&self, expected: [f32; 3], tolerance: f32) -> bool {
        self.dimensions()
            .iter()
            .zip(expected)
            .all(|(d, e)| (d - e).abs() < tolerance)
    }

    /// Whether every vertex carries the given color
    pub fn has_uniform_color(&self, rgb: [u8; 3]) -> bool {
        let expected = rgb.map(|c| c as f32 / 255.0);
        self.mesh.vertices.chunks_exact(9).all(|v| {
            (v[6] - expected[0]).abs() < 1e-3
                && (v[7] - expected[1]).abs() < 1e-3
                && (v[8] - expected[2]).abs() < 1e-3
        })
    }

    /// Run all buffer checks; an empty list means the mesh is valid
    pub fn validate_all(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !self.is_stride_valid() {
            errors.push(format!(
                "Vertex buffer length {} is not a multiple of 9",
                self.mesh.vertices.len()
            ));
        }

        if !self.is_index_stride_valid() {
            errors.push(format!(
                "Index buffer length {} is not a multiple of 3",
                self.mesh.indices.len()
            ));
        }

        if !self.are_indices_in_range() {
            let max_idx = self.vertex_count() as u32;
            let out_of_range: Vec<_> = self
                .mesh
                .indices
                .iter()
                .filter(|&&i| i >= max_idx)
                .take(5)
                .collect();
            errors.push(format!(
                "Indices out of range (vertex_count={max_idx}): {out_of_range:?}"
            ));
        }

        if self.vertex_count() > 0 && !self.are_normals_normalized(0.1) {
            errors.push("Some normals are not unit-length (epsilon=0.1)".to_string());
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use shared::{FurnitureItem, PlanePoint};

    use super::*;

    fn session_with(positions: &[(f64, f64, f64)]) -> PlannerSession {
        let mut session = PlannerSession::default();
        for &(x, y, rot) in positions {
            let p = session.store.add_placement(
                FurnitureItem::new("d", "Desk", 1000.0, 200.0),
                PlanePoint::new(x, y),
            );
            session.store.rotate_placement(&p.id, rot);
        }
        session
    }

    #[test]
    fn test_valid_layout() {
        let mut session = session_with(&[(0.0, 0.0, 0.0), (50.0, 50.0, 270.0)]);
        session.store.select(Some("gone"));
        assert!(LayoutValidator::new(&session).validate_all().is_empty());
    }

    #[test]
    fn test_out_of_room_is_reported_not_enforced() {
        // Room is 500 x 400 plane units; the desk is 100 x 20
        let session = session_with(&[
            (0.0, 0.0, 0.0),
            (450.0, 10.0, 0.0),
            (-5.0, 100.0, 0.0),
            (10.0, 100.0, 90.0),
        ]);
        let outside = LayoutValidator::new(&session).out_of_room();
        let ids: Vec<_> = session.store.placements().iter().map(|p| p.id.clone()).collect();
        assert_eq!(outside, vec![ids[1].clone(), ids[2].clone()]);
        assert_eq!(session.store.len(), 4);
    }

    #[test]
    fn test_rotated_footprint_can_leave_room() {
        // Turned 90° about its center (50, 10) it spans y = -40..60
        let session = session_with(&[(0.0, 0.0, 90.0)]);
        assert_eq!(LayoutValidator::new(&session).out_of_room().len(), 1);
    }

    fn simple_triangle() -> MeshData {
        MeshData {
            vertices: vec![
                0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.5, 0.5, 0.5, //
                1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.5, 0.5, 0.5, //
                0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.5, 0.5, 0.5,
            ],
            indices: vec![0, 1, 2],
        }
    }

    #[test]
    fn test_valid_mesh() {
        let mesh = simple_triangle();
        let v = MeshValidator::new(&mesh);
        assert!(v.validate_all().is_empty());
        assert!(v.dimensions_approx([1.0, 1.0, 0.0], 1e-6));
    }

    #[test]
    fn test_bad_indices() {
        let mut mesh = simple_triangle();
        mesh.indices = vec![0, 1, 7, 2];
        let errors = MeshValidator::new(&mesh).validate_all();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_denormalized_normals() {
        let mut mesh = simple_triangle();
        mesh.vertices[5] = 3.0;
        assert!(!MeshValidator::new(&mesh).are_normals_normalized(0.1));
    }
}
