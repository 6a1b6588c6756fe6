use glam::{Mat4, Vec3};

use super::mesh::MeshData;

/// A ray in world space
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// The same ray expressed in another frame
    pub fn transformed(&self, m: Mat4) -> Ray {
        Ray {
            origin: m.transform_point3(self.origin),
            direction: m.transform_vector3(self.direction),
        }
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Box of extents `size` centered on the origin
    pub fn centered(size: Vec3) -> Self {
        Self {
            min: -size * 0.5,
            max: size * 0.5,
        }
    }

    /// Compute AABB from MeshData (9 floats per vertex: pos+normal+color)
    pub fn from_mesh(data: &MeshData) -> Self {
        let mut min = Vec3::splat(f32::MAX);
        let mut max = Vec3::splat(f32::MIN);

        for v in data.vertices.chunks_exact(9) {
            let p = Vec3::new(v[0], v[1], v[2]);
            min = min.min(p);
            max = max.max(p);
        }

        Self { min, max }
    }

    /// Center of the bounding box
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}

/// Ray-AABB intersection using the slab method.
/// Returns the distance along the ray to the nearest hit, or None.
pub fn ray_aabb(ray: &Ray, aabb: &Aabb) -> Option<f32> {
    let inv_dir = Vec3::new(
        1.0 / ray.direction.x,
        1.0 / ray.direction.y,
        1.0 / ray.direction.z,
    );

    let t1 = (aabb.min - ray.origin) * inv_dir;
    let t2 = (aabb.max - ray.origin) * inv_dir;

    let tmin = t1.min(t2).max_element();
    let tmax = t1.max(t2).min_element();

    if tmax < 0.0 || tmin > tmax {
        return None;
    }

    Some(if tmin < 0.0 { tmax } else { tmin })
}

/// Ray against a box of extents `size` placed by a rigid `model` transform.
///
/// The ray is moved into the box's local frame and tested against the
/// centered AABB. Rigid transforms keep lengths, so the returned distance is
/// valid in world space.
pub fn ray_oriented_box(ray: &Ray, model: Mat4, size: Vec3) -> Option<f32> {
    let local = ray.transformed(model.inverse());
    ray_aabb(&local, &Aabb::centered(size))
}

/// Where the ray crosses the horizontal plane `y = height`
pub fn ray_floor(ray: &Ray, height: f32) -> Option<Vec3> {
    if ray.direction.y.abs() < 1e-6 {
        return None;
    }
    let t = (height - ray.origin.y) / ray.direction.y;
    (t >= 0.0).then(|| ray.at(t))
}

/// Pick the nearest oriented box hit by the ray
pub fn pick_nearest<'a>(
    ray: &Ray,
    boxes: impl IntoIterator<Item = (&'a str, Mat4, Vec3)>,
) -> Option<String> {
    let mut best: Option<(&str, f32)> = None;

    for (id, model, size) in boxes {
        if let Some(dist) = ray_oriented_box(ray, model, size) {
            if best.is_none_or(|(_, d)| dist < d) {
                best = Some((id, dist));
            }
        }
    }

    best.map(|(id, _)| id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn down_at(x: f32, z: f32) -> Ray {
        Ray {
            origin: Vec3::new(x, 10.0, z),
            direction: Vec3::NEG_Y,
        }
    }

    #[test]
    fn test_ray_aabb_hit_and_miss() {
        let aabb = Aabb::centered(Vec3::splat(2.0));
        let hit = ray_aabb(&down_at(0.5, 0.5), &aabb).unwrap();
        assert!((hit - 9.0).abs() < 1e-5);
        assert!(ray_aabb(&down_at(3.0, 0.0), &aabb).is_none());
    }

    #[test]
    fn test_ray_from_inside_hits_far_side() {
        let aabb = Aabb::centered(Vec3::splat(2.0));
        let ray = Ray {
            origin: Vec3::ZERO,
            direction: Vec3::X,
        };
        assert!((ray_aabb(&ray, &aabb).unwrap() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_oriented_box_respects_rotation() {
        // 4 m long along local x, 0.4 m along local z, turned 90° about y
        let size = Vec3::new(4.0, 1.0, 0.4);
        let model = Mat4::from_translation(Vec3::new(5.0, 0.5, 5.0))
            * Mat4::from_rotation_y(std::f32::consts::FRAC_PI_2);

        assert!(ray_oriented_box(&down_at(5.0, 6.5), model, size).is_some());
        assert!(ray_oriented_box(&down_at(6.5, 5.0), model, size).is_none());
    }

    #[test]
    fn test_pick_nearest_prefers_closer() {
        let size = Vec3::ONE;
        let low = Mat4::from_translation(Vec3::new(0.0, 0.5, 0.0));
        let high = Mat4::from_translation(Vec3::new(0.0, 3.0, 0.0));
        let picked = pick_nearest(&down_at(0.0, 0.0), [("low", low, size), ("high", high, size)]);
        assert_eq!(picked.as_deref(), Some("high"));
        assert!(pick_nearest(&down_at(9.0, 9.0), [("low", low, size)]).is_none());
    }

    #[test]
    fn test_ray_floor() {
        let ray = Ray {
            origin: Vec3::new(0.0, 2.0, 0.0),
            direction: Vec3::new(1.0, -1.0, 0.0).normalize(),
        };
        let p = ray_floor(&ray, 0.0).unwrap();
        assert!((p - Vec3::new(2.0, 0.0, 0.0)).length() < 1e-5);

        let up = Ray {
            origin: Vec3::ONE,
            direction: Vec3::Y,
        };
        assert!(ray_floor(&up, 0.0).is_none());
    }

    #[test]
    fn test_aabb_from_mesh() {
        let mesh = MeshData {
            vertices: vec![
                -1.0, 0.0, 2.0, 0.0, 1.0, 0.0, 1.0, 1.0, 1.0, //
                3.0, 1.0, -2.0, 0.0, 1.0, 0.0, 1.0, 1.0, 1.0,
            ],
            indices: vec![],
        };
        let aabb = Aabb::from_mesh(&mesh);
        assert_eq!(aabb.min, Vec3::new(-1.0, 0.0, -2.0));
        assert_eq!(aabb.max, Vec3::new(3.0, 1.0, 2.0));
        assert_eq!(aabb.center(), Vec3::new(1.0, 0.5, 0.0));
    }
}
