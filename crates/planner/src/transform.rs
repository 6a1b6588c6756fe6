//! Coordinate transforms between the catalog, plane and scene frames.
//!
//! - catalog frame: millimeters
//! - plane frame: `mm * scale`, corner-origin, y grows toward the room front
//! - scene frame: meters, boxes centered on their own footprint
//!
//! Every conversion goes through [`CoordinateTransform`] so the plan view and
//! the 3D scene can never disagree about the scale.

use glam::Vec3;
use kurbo::{Affine, Point, Rect};
use shared::{FurnitureItem, PlacedFurniture, PlanePoint, RoomDimensions};

use crate::config::PlannerConfig;
use crate::viewport::picking::{ray_floor, Ray};

/// Millimeters to meters
pub fn meters(mm: f64) -> f64 {
    mm / 1000.0
}

/// Wrap an angle in degrees into `[0, 360)`
pub fn normalize_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 || wrapped == 0.0 {
        0.0
    } else {
        wrapped
    }
}

/// Converter bound to one scale constant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateTransform {
    scale: f64,
}

impl CoordinateTransform {
    /// `scale` is plane units per millimeter
    pub fn new(scale: f64) -> Self {
        Self { scale }
    }

    pub fn from_config(config: &PlannerConfig) -> Self {
        Self::new(config.scale)
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn mm_to_plane(&self, mm: f64) -> f64 {
        mm * self.scale
    }

    pub fn plane_to_mm(&self, plane: f64) -> f64 {
        plane / self.scale
    }

    /// Plane units to scene meters (no footprint offset)
    pub fn plane_to_meters(&self, plane: f64) -> f64 {
        meters(self.plane_to_mm(plane))
    }

    /// Scene meters to plane units
    pub fn meters_to_plane(&self, m: f64) -> f64 {
        self.mm_to_plane(m * 1000.0)
    }

    /// Box extents in scene units: (width, vertical, plan depth)
    pub fn box_size(&self, item: &FurnitureItem) -> Vec3 {
        Vec3::new(
            meters(item.width) as f32,
            meters(item.effective_depth_mm()) as f32,
            meters(item.height) as f32,
        )
    }

    /// Scene position of the box center for a plane corner position
    pub fn scene_center_at(&self, item: &FurnitureItem, corner: PlanePoint) -> Vec3 {
        self.plane_to_scene(corner) + self.box_size(item) / 2.0
    }

    pub fn scene_center(&self, placed: &PlacedFurniture) -> Vec3 {
        self.scene_center_at(&placed.furniture, placed.position())
    }

    /// Rotation about the vertical axis. The plane is y-down, the scene is
    /// right-handed y-up, hence the sign flip.
    pub fn scene_yaw(&self, rotation_deg: f64) -> f32 {
        (-rotation_deg.to_radians()) as f32
    }

    /// Floor point in the scene (x, z) to a plane point
    pub fn scene_to_plane(&self, scene_x: f32, scene_z: f32) -> PlanePoint {
        PlanePoint::new(
            self.meters_to_plane(scene_x as f64),
            self.meters_to_plane(scene_z as f64),
        )
    }

    /// Plane point to a scene floor point (y = 0)
    pub fn plane_to_scene(&self, point: PlanePoint) -> Vec3 {
        Vec3::new(
            self.plane_to_meters(point.x) as f32,
            0.0,
            self.plane_to_meters(point.y) as f32,
        )
    }

    /// Plane point under a scene ray, where it meets the floor
    pub fn floor_point(&self, ray: &Ray) -> Option<PlanePoint> {
        let hit = ray_floor(ray, 0.0)?;
        Some(self.scene_to_plane(hit.x, hit.z))
    }

    /// Room extents in plane units
    pub fn room_plane_size(&self, room: &RoomDimensions) -> (f64, f64) {
        (self.mm_to_plane(room.width), self.mm_to_plane(room.height))
    }

    /// Room extents in meters: (width, depth)
    pub fn room_scene_size(&self, room: &RoomDimensions) -> (f32, f32) {
        (meters(room.width) as f32, meters(room.height) as f32)
    }

    /// Rotated footprint of a placement on the plane
    pub fn footprint(&self, placed: &PlacedFurniture) -> Footprint {
        let item = &placed.furniture;
        let rect = Rect::new(
            placed.x,
            placed.y,
            placed.x + self.mm_to_plane(item.width),
            placed.y + self.mm_to_plane(item.height),
        );
        // Plane is y-down: a positive angle turns clockwise on screen, which
        // matches the negative scene yaw seen from above.
        let affine = Affine::rotate_about(placed.rotation.to_radians(), rect.center());
        Footprint { rect, affine }
    }
}

/// Rectangle on the plane plus its rotation about the rectangle center
#[derive(Debug, Clone, Copy)]
pub struct Footprint {
    /// Unrotated rectangle
    pub rect: Rect,
    pub affine: Affine,
}

impl Footprint {
    /// Corners in drawing order
    pub fn corners(&self) -> [Point; 4] {
        let r = self.rect;
        [
            self.affine * Point::new(r.x0, r.y0),
            self.affine * Point::new(r.x1, r.y0),
            self.affine * Point::new(r.x1, r.y1),
            self.affine * Point::new(r.x0, r.y1),
        ]
    }

    pub fn center(&self) -> Point {
        self.rect.center()
    }

    pub fn contains(&self, point: Point) -> bool {
        self.rect.contains(self.affine.inverse() * point)
    }

    /// Axis-aligned bounds of the rotated rectangle
    pub fn bounding_box(&self) -> Rect {
        self.affine.transform_rect_bbox(self.rect)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn placed(item: FurnitureItem, x: f64, y: f64, rotation: f64) -> PlacedFurniture {
        PlacedFurniture {
            id: "p".to_string(),
            furniture: Arc::new(item),
            x,
            y,
            rotation,
        }
    }

    #[test]
    fn test_round_trip_mm_plane_mm() {
        for scale in [0.1, 0.25, 1.0, 0.037] {
            let t = CoordinateTransform::new(scale);
            for mm in [0.0, 1.0, 750.0, 1234.5, 98765.0] {
                let back = t.plane_to_mm(t.mm_to_plane(mm));
                assert!((back - mm).abs() < 1e-9, "scale {scale}: {mm} -> {back}");
            }
        }
    }

    #[test]
    fn test_concrete_scene_center() {
        let t = CoordinateTransform::new(0.1);
        let mut item = FurnitureItem::new("d", "Desk", 800.0, 400.0);
        item.depth = Some(750.0);
        let p = placed(item, 100.0, 100.0, 0.0);

        let center = t.scene_center(&p);
        assert!((center.x - 1.4).abs() < 1e-6);
        assert!((center.z - 1.2).abs() < 1e-6);
        assert!((center.y - 0.375).abs() < 1e-6);

        let size = t.box_size(&p.furniture);
        assert!((size.x - 0.8).abs() < 1e-6);
        assert!((size.y - 0.75).abs() < 1e-6);
        assert!((size.z - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_missing_depth_defaults_to_750() {
        let t = CoordinateTransform::new(0.1);
        let item = FurnitureItem::new("d", "Desk", 800.0, 400.0);
        assert!((t.box_size(&item).y - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_scene_yaw_sign_flip() {
        let t = CoordinateTransform::new(0.1);
        assert_eq!(t.scene_yaw(0.0), 0.0);
        assert!((t.scene_yaw(90.0) + std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_scene_plane_round_trip() {
        let t = CoordinateTransform::new(0.1);
        let p = PlanePoint::new(123.0, 45.0);
        let scene = t.plane_to_scene(p);
        let back = t.scene_to_plane(scene.x, scene.z);
        assert!((back.x - p.x).abs() < 1e-3);
        assert!((back.y - p.y).abs() < 1e-3);
    }

    #[test]
    fn test_floor_point_under_ray() {
        let t = CoordinateTransform::new(0.1);
        let down = Ray {
            origin: Vec3::new(1.4, 3.0, 1.2),
            direction: Vec3::NEG_Y,
        };
        let p = t.floor_point(&down).unwrap();
        assert!((p.x - 140.0).abs() < 1e-3);
        assert!((p.y - 120.0).abs() < 1e-3);

        let sky = Ray {
            origin: Vec3::new(1.0, 1.0, 1.0),
            direction: Vec3::Y,
        };
        assert!(t.floor_point(&sky).is_none());
    }

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(0.0), 0.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert_eq!(normalize_degrees(-90.0), 270.0);
        assert_eq!(normalize_degrees(725.0), 5.0);
        assert_eq!(normalize_degrees(-0.0), 0.0);
        let tiny = normalize_degrees(-1e-14);
        assert!((0.0..360.0).contains(&tiny));
    }

    #[test]
    fn test_footprint_rotation() {
        let t = CoordinateTransform::new(0.1);
        // 1000 x 200 mm -> 100 x 20 plane units, centered at (50, 10)
        let item = FurnitureItem::new("b", "Bench", 1000.0, 200.0);
        let flat = t.footprint(&placed(item.clone(), 0.0, 0.0, 0.0));
        assert!(flat.contains(Point::new(90.0, 10.0)));
        assert!(!flat.contains(Point::new(50.0, 40.0)));

        let turned = t.footprint(&placed(item, 0.0, 0.0, 90.0));
        assert!(!turned.contains(Point::new(90.0, 10.0)));
        assert!(turned.contains(Point::new(50.0, 40.0)));

        let bbox = turned.bounding_box();
        assert!((bbox.width() - 20.0).abs() < 1e-9);
        assert!((bbox.height() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_room_sizes() {
        let t = CoordinateTransform::new(0.1);
        let room = RoomDimensions::new(5000.0, 4000.0);
        assert_eq!(t.room_plane_size(&room), (500.0, 400.0));
        assert_eq!(t.room_scene_size(&room), (5.0, 4.0));
    }
}
