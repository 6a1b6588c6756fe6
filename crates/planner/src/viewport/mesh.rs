use glam::{Mat4, Vec2, Vec3};

use crate::scene::Material;

/// CPU-side mesh data: interleaved [pos.x, pos.y, pos.z, norm.x, norm.y, norm.z, r, g, b]
#[derive(Clone, Debug, Default)]
pub struct MeshData {
    /// 9 floats per vertex: position(3) + normal(3) + color(3)
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 9
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Two triangles per face, flat-colored from each face's material
    pub fn from_faces(faces: &[BoxFace]) -> Self {
        let mut vertices = Vec::with_capacity(faces.len() * 4 * 9);
        let mut indices = Vec::with_capacity(faces.len() * 6);

        for face in faces {
            let base = (vertices.len() / 9) as u32;
            let [r, g, b] = face.material.color();
            let color = [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0];
            for v in &face.corners {
                vertices.extend_from_slice(&[
                    v.x,
                    v.y,
                    v.z,
                    face.normal.x,
                    face.normal.y,
                    face.normal.z,
                    color[0],
                    color[1],
                    color[2],
                ]);
            }
            indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }

        Self { vertices, indices }
    }
}

/// Which side of a box a face belongs to, in the box's local frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceSide {
    /// +Z
    Front,
    /// -Z
    Back,
    /// +X
    Right,
    /// -X
    Left,
    /// +Y
    Top,
    /// -Y
    Bottom,
}

impl FaceSide {
    /// Faces that carry a thumbnail texture
    pub fn is_textured_side(self) -> bool {
        matches!(self, FaceSide::Front | FaceSide::Back)
    }
}

/// One world-space quad of a box
#[derive(Debug, Clone)]
pub struct BoxFace {
    pub side: FaceSide,
    /// Counter-clockwise seen from outside: bottom-left, bottom-right, top-right, top-left
    pub corners: [Vec3; 4],
    pub normal: Vec3,
    pub material: Material,
}

impl BoxFace {
    /// Texture coordinates matching `corners`
    pub const UVS: [Vec2; 4] = [
        Vec2::new(0.0, 1.0),
        Vec2::new(1.0, 1.0),
        Vec2::new(1.0, 0.0),
        Vec2::new(0.0, 0.0),
    ];

    pub fn center(&self) -> Vec3 {
        (self.corners[0] + self.corners[1] + self.corners[2] + self.corners[3]) * 0.25
    }
}

/// Six faces of a `size` box transformed by `model`.
///
/// `body` tints side, top and bottom faces; `face` covers front and back.
pub fn box_faces(model: Mat4, size: Vec3, body: &Material, face: &Material) -> Vec<BoxFace> {
    let hw = size.x * 0.5;
    let hh = size.y * 0.5;
    let hd = size.z * 0.5;

    let local: [(FaceSide, [Vec3; 4], Vec3); 6] = [
        (
            FaceSide::Front,
            [
                Vec3::new(-hw, -hh, hd),
                Vec3::new(hw, -hh, hd),
                Vec3::new(hw, hh, hd),
                Vec3::new(-hw, hh, hd),
            ],
            Vec3::Z,
        ),
        (
            FaceSide::Back,
            [
                Vec3::new(hw, -hh, -hd),
                Vec3::new(-hw, -hh, -hd),
                Vec3::new(-hw, hh, -hd),
                Vec3::new(hw, hh, -hd),
            ],
            Vec3::NEG_Z,
        ),
        (
            FaceSide::Right,
            [
                Vec3::new(hw, -hh, hd),
                Vec3::new(hw, -hh, -hd),
                Vec3::new(hw, hh, -hd),
                Vec3::new(hw, hh, hd),
            ],
            Vec3::X,
        ),
        (
            FaceSide::Left,
            [
                Vec3::new(-hw, -hh, -hd),
                Vec3::new(-hw, -hh, hd),
                Vec3::new(-hw, hh, hd),
                Vec3::new(-hw, hh, -hd),
            ],
            Vec3::NEG_X,
        ),
        (
            FaceSide::Top,
            [
                Vec3::new(-hw, hh, hd),
                Vec3::new(hw, hh, hd),
                Vec3::new(hw, hh, -hd),
                Vec3::new(-hw, hh, -hd),
            ],
            Vec3::Y,
        ),
        (
            FaceSide::Bottom,
            [
                Vec3::new(-hw, -hh, -hd),
                Vec3::new(hw, -hh, -hd),
                Vec3::new(hw, -hh, hd),
                Vec3::new(-hw, -hh, hd),
            ],
            Vec3::NEG_Y,
        ),
    ];

    local
        .into_iter()
        .map(|(side, quad, normal)| BoxFace {
            side,
            corners: quad.map(|v| model.transform_point3(v)),
            normal: model.transform_vector3(normal).normalize_or_zero(),
            material: if side.is_textured_side() {
                face.clone()
            } else {
                body.clone()
            },
        })
        .collect()
}

/// The 12 edges of a box as world-space segments, for outlines
pub fn box_edges(model: Mat4, size: Vec3) -> [(Vec3, Vec3); 12] {
    let h = size * 0.5;
    let c = |x: f32, y: f32, z: f32| model.transform_point3(Vec3::new(x * h.x, y * h.y, z * h.z));
    let bottom = [c(-1., -1., -1.), c(1., -1., -1.), c(1., -1., 1.), c(-1., -1., 1.)];
    let top = [c(-1., 1., -1.), c(1., 1., -1.), c(1., 1., 1.), c(-1., 1., 1.)];
    let mut edges = [(Vec3::ZERO, Vec3::ZERO); 12];
    for i in 0..4 {
        let j = (i + 1) % 4;
        edges[i] = (bottom[i], bottom[j]);
        edges[i + 4] = (top[i], top[j]);
        edges[i + 8] = (bottom[i], top[i]);
    }
    edges
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat(color: [u8; 3]) -> Material {
        Material::Flat {
            color,
            opacity: 1.0,
        }
    }

    #[test]
    fn test_box_faces_materials() {
        let body = flat([10, 20, 30]);
        let front = Material::Textured {
            reference: "thumb.png".to_string(),
            tint: [10, 20, 30],
            opacity: 1.0,
        };
        let faces = box_faces(Mat4::IDENTITY, Vec3::ONE, &body, &front);
        assert_eq!(faces.len(), 6);
        for f in &faces {
            assert_eq!(f.material.texture().is_some(), f.side.is_textured_side());
        }
    }

    #[test]
    fn test_face_normals_point_outward() {
        let model = Mat4::from_translation(Vec3::new(3.0, 1.0, -2.0))
            * Mat4::from_rotation_y(0.7);
        let center = model.transform_point3(Vec3::ZERO);
        let m = flat([0, 0, 0]);
        for f in box_faces(model, Vec3::new(2.0, 1.0, 0.5), &m, &m) {
            assert!((f.center() - center).dot(f.normal) > 0.0, "{:?}", f.side);
        }
    }

    #[test]
    fn test_mesh_from_faces() {
        let m = flat([255, 0, 0]);
        let mesh = MeshData::from_faces(&box_faces(Mat4::IDENTITY, Vec3::ONE, &m, &m));
        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.triangle_count(), 12);
        assert_eq!(mesh.vertices[6], 1.0);
        assert_eq!(mesh.vertices[7], 0.0);
    }

    #[test]
    fn test_box_edges_lengths() {
        let size = Vec3::new(2.0, 1.0, 0.5);
        let edges = box_edges(Mat4::IDENTITY, size);
        let total: f32 = edges.iter().map(|(a, b)| a.distance(*b)).sum();
        assert!((total - 4.0 * (2.0 + 1.0 + 0.5)).abs() < 1e-5);
    }
}
