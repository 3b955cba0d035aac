use foundation::math::{Rotation, Vec2, Vec3};

use crate::picking::Ray;

pub const RAY_BACKOFF: f64 = 1.0e4;

/// Pixel size of the surface the scene is drawn into.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }
}

/// A projected point: pixel coordinates plus distance along the view direction.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ScreenPoint {
    pub px: Vec2,
    pub depth: f64,
}

/// Orthographic camera looking down its local -Z axis.
///
/// `field_of_view` is `[min_x, min_y, max_x, max_y]` in view-plane units; the
/// rectangle is fitted into the viewport without distortion and centred.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct OrthoViewpoint {
    pub position: Vec3,
    pub orientation: Rotation,
    pub center_of_rotation: Vec3,
    pub field_of_view: [f64; 4],
}

impl OrthoViewpoint {
    /// World point → camera space.
    pub fn to_view(&self, p: Vec3) -> Vec3 {
        self.orientation.inverse().apply(p - self.position)
    }

    /// Camera space → world point.
    pub fn from_view(&self, v: Vec3) -> Vec3 {
        self.position + self.orientation.apply(v)
    }

    /// Pixels per scene unit for `viewport`.
    pub fn pixels_per_unit(&self, viewport: Viewport) -> f64 {
        let [min_x, min_y, max_x, max_y] = self.field_of_view;
        let w = (max_x - min_x).abs().max(f64::EPSILON);
        let h = (max_y - min_y).abs().max(f64::EPSILON);
        (viewport.width / w).min(viewport.height / h)
    }

    pub fn project(&self, p: Vec3, viewport: Viewport) -> ScreenPoint {
        let v = self.to_view(p);
        let (cx, cy) = self.fov_center();
        let k = self.pixels_per_unit(viewport);
        ScreenPoint {
            px: Vec2::new(
                viewport.width * 0.5 + (v.x - cx) * k,
                viewport.height * 0.5 - (v.y - cy) * k,
            ),
            depth: -v.z,
        }
    }

    /// Ray through a pixel, pointing into the scene.
    ///
    /// An orthographic view has no near limit, so the origin sits
    /// [`RAY_BACKOFF`] units behind the camera plane.
    pub fn ray_through(&self, px: Vec2, viewport: Viewport) -> Ray {
        let (cx, cy) = self.fov_center();
        let k = self.pixels_per_unit(viewport);
        let vx = cx + (px.x - viewport.width * 0.5) / k;
        let vy = cy - (px.y - viewport.height * 0.5) / k;
        Ray::new(
            self.from_view(Vec3::new(vx, vy, RAY_BACKOFF)),
            self.orientation.apply(Vec3::new(0.0, 0.0, -1.0)),
        )
    }

    fn fov_center(&self) -> (f64, f64) {
        let [min_x, min_y, max_x, max_y] = self.field_of_view;
        ((min_x + max_x) * 0.5, (min_y + max_y) * 0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::{OrthoViewpoint, RAY_BACKOFF, Viewport};
    use foundation::math::{Rotation, Vec2, Vec3};

    fn front_view() -> OrthoViewpoint {
        OrthoViewpoint {
            position: Vec3::new(0.0, 0.0, 10.0),
            orientation: Rotation::IDENTITY,
            center_of_rotation: Vec3::ZERO,
            field_of_view: [-5.0, -5.0, 5.0, 5.0],
        }
    }

    #[test]
    fn origin_projects_to_viewport_center() {
        let vp = front_view();
        let s = vp.project(Vec3::ZERO, Viewport::new(200.0, 100.0));
        assert_eq!(s.px, Vec2::new(100.0, 50.0));
        assert_eq!(s.depth, 10.0);
    }

    #[test]
    fn up_is_up_on_screen() {
        let vp = front_view();
        let viewport = Viewport::new(100.0, 100.0);
        let s = vp.project(Vec3::new(0.0, 5.0, 0.0), viewport);
        assert_eq!(s.px, Vec2::new(50.0, 0.0));
    }

    #[test]
    fn ray_through_projected_pixel_hits_point() {
        let vp = OrthoViewpoint {
            position: Vec3::new(8.0, 4.0, 15.0),
            orientation: Rotation::new(Vec3::new(-0.5, 1.0, 0.2), 0.7),
            center_of_rotation: Vec3::splat(5.0),
            field_of_view: [-5.0, -5.0, 15.0, 15.0],
        };
        let viewport = Viewport::new(900.0, 900.0);
        let p = Vec3::new(3.0, 7.0, 2.0);
        let s = vp.project(p, viewport);
        let ray = vp.ray_through(s.px, viewport);
        let hit = ray.origin + ray.dir * (s.depth + RAY_BACKOFF);
        assert!((hit - p).length() < 1e-6);
    }
}
