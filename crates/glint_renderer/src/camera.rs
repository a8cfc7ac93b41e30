//! Camera for ray generation.

use crate::sampling::random_in_unit_disk;
use glint_math::{Ray, Vec3};
use rand::RngCore;

/// Builder for a [`Camera`].
///
/// Defaults match a camera at the origin looking down `-Z` with a 90 degree
/// vertical field of view, 2:1 aspect ratio and depth of field disabled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraBuilder {
    look_from: Vec3,
    look_at: Vec3,
    vup: Vec3,
    vfov: f32,
    aspect: f32,
    aperture: f32,
    focus_dist: f32,
}

impl CameraBuilder {
    /// Set camera position.
    pub fn with_position(mut self, look_from: Vec3, look_at: Vec3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self
    }

    /// Set lens settings.
    ///
    /// A negative `focus_dist` disables depth of field; `aperture` is then ignored.
    /// Zero focus distance and negative apertures are invalid.
    pub fn with_lens(mut self, vfov: f32, aperture: f32, focus_dist: f32) -> Self {
        self.vfov = vfov;
        self.aperture = aperture;
        self.focus_dist = focus_dist;
        self
    }

    /// Set the image aspect ratio (width / height).
    pub fn with_aspect(mut self, aspect: f32) -> Self {
        self.aspect = aspect;
        self
    }

    /// Derive the image plane and camera basis.
    pub fn build(self) -> Camera {
        debug_assert!(self.aspect > 0.0, "aspect ratio must be positive");
        debug_assert!(
            self.focus_dist.is_finite() && self.focus_dist != 0.0,
            "focus distance must be finite and non-zero, got {}",
            self.focus_dist
        );
        debug_assert!(
            self.aperture.is_finite() && self.aperture >= 0.0,
            "aperture must be finite and non-negative, got {}",
            self.aperture
        );
        debug_assert!(
            (self.look_from - self.look_at).length_squared() > 0.0,
            "look_from and look_at coincide"
        );

        let theta = self.vfov.to_radians();
        let half_height = (theta / 2.0).tan();
        let half_width = self.aspect * half_height;

        let w = (self.look_from - self.look_at).normalize();
        let u = self.vup.cross(w).normalize();
        let v = w.cross(u).normalize();

        let origin = self.look_from;
        // Image plane sits at unit distance unless depth of field is enabled
        let depth_of_field = self.focus_dist >= 0.0;
        let plane = if depth_of_field { self.focus_dist } else { 1.0 };

        let lower_left_corner =
            origin - half_width * plane * u - half_height * plane * v - plane * w;
        let horizontal = 2.0 * half_width * plane * u;
        let vertical = 2.0 * half_height * plane * v;

        Camera {
            origin,
            lower_left_corner,
            horizontal,
            vertical,
            u,
            v,
            w,
            lens_radius: self.aperture / 2.0,
            focus_dist: self.focus_dist,
        }
    }
}

impl Default for CameraBuilder {
    fn default() -> Self {
        Self {
            look_from: Vec3::ZERO,
            look_at: Vec3::new(0.0, 0.0, -1.0),
            vup: Vec3::Y,
            vfov: 90.0,
            aspect: 2.0,
            aperture: 0.0,
            focus_dist: -1.0,
        }
    }
}

/// Thin-lens pinhole camera. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    origin: Vec3,
    lower_left_corner: Vec3,
    horizontal: Vec3,
    vertical: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    lens_radius: f32,
    focus_dist: f32,
}

impl Camera {
    /// Start building a camera.
    pub fn builder() -> CameraBuilder {
        CameraBuilder::default()
    }

    /// Whether rays are jittered across the lens aperture.
    pub fn depth_of_field(&self) -> bool {
        self.focus_dist >= 0.0
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Orthonormal camera basis `(u, v, w)`; `w` points away from the view direction.
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        (self.u, self.v, self.w)
    }

    pub fn lens_radius(&self) -> f32 {
        self.lens_radius
    }

    /// Generate a ray through normalized image coordinates `(s, t)`.
    ///
    /// `(0, 0)` is the lower-left corner of the image, `(1, 1)` the upper right.
    pub fn get_ray(&self, s: f32, t: f32, rng: &mut dyn RngCore) -> Ray {
        let target = self.lower_left_corner + s * self.horizontal + t * self.vertical;

        if !self.depth_of_field() {
            return Ray::new(self.origin, target - self.origin);
        }

        let rd = self.lens_radius * random_in_unit_disk(rng);
        let offset = self.u * rd.x + self.v * rd.y;
        let origin = self.origin + offset;
        Ray::new(origin, target - origin)
    }
}

impl Default for Camera {
    fn default() -> Self {
        CameraBuilder::default().build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_camera_basis() {
        let camera = Camera::builder()
            .with_position(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), Vec3::Y)
            .build();

        let (u, v, w) = camera.basis();
        assert!((u - Vec3::X).length() < 1e-6);
        assert!((v - Vec3::Y).length() < 1e-6);
        assert!((w - Vec3::Z).length() < 1e-6);
        assert_eq!(camera.origin(), Vec3::ZERO);
    }

    #[test]
    fn test_center_ray_points_at_target() {
        let camera = Camera::builder()
            .with_position(Vec3::new(-2.0, 2.0, 1.0), Vec3::new(0.0, 0.0, -1.0), Vec3::Y)
            .with_lens(90.0, 0.0, -1.0)
            .build();
        let mut rng = StdRng::seed_from_u64(42);

        let ray = camera.get_ray(0.5, 0.5, &mut rng);
        let expected = (Vec3::new(0.0, 0.0, -1.0) - Vec3::new(-2.0, 2.0, 1.0)).normalize();
        assert_eq!(ray.origin(), Vec3::new(-2.0, 2.0, 1.0));
        assert!((ray.direction().normalize() - expected).length() < 1e-5);
    }

    #[test]
    fn test_corner_rays_span_field_of_view() {
        // 90 degree vfov, aspect 2: image plane spans [-2, 2] x [-1, 1] at z = -1
        let camera = Camera::default();
        let mut rng = StdRng::seed_from_u64(1);

        let lower_left = camera.get_ray(0.0, 0.0, &mut rng);
        assert!((lower_left.direction() - Vec3::new(-2.0, -1.0, -1.0)).length() < 1e-5);

        let upper_right = camera.get_ray(1.0, 1.0, &mut rng);
        assert!((upper_right.direction() - Vec3::new(2.0, 1.0, -1.0)).length() < 1e-5);
    }

    #[test]
    fn test_depth_of_field_keeps_focus_plane_sharp() {
        let focus = 3.0;
        let camera = Camera::builder()
            .with_position(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), Vec3::Y)
            .with_lens(40.0, 0.5, focus)
            .build();
        assert!(camera.depth_of_field());
        assert_eq!(camera.lens_radius(), 0.25);

        let mut rng = StdRng::seed_from_u64(8);
        let mut origins_differ = false;
        let first = camera.get_ray(0.3, 0.7, &mut rng);
        for _ in 0..50 {
            let ray = camera.get_ray(0.3, 0.7, &mut rng);
            // Lens offset stays within the aperture and on the lens plane
            assert!(ray.origin().length() <= 0.25 + 1e-6);
            assert!(ray.origin().z.abs() < 1e-6);
            // Every ray reaches the same point on the focus plane
            assert!((ray.at(1.0) - first.at(1.0)).length() < 1e-4);
            origins_differ |= ray.origin() != first.origin();
        }
        assert!(origins_differ);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "focus distance")]
    fn test_zero_focus_distance_rejected() {
        let _ = Camera::builder().with_lens(90.0, 0.0, 0.0).build();
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "aperture")]
    fn test_negative_aperture_rejected() {
        let _ = Camera::builder().with_lens(90.0, -1.0, 2.0).build();
    }

    #[test]
    fn test_negative_focus_disables_depth_of_field() {
        let camera = Camera::builder().with_lens(90.0, 2.0, -1.0).build();
        assert!(!camera.depth_of_field());

        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..10 {
            assert_eq!(camera.get_ray(0.2, 0.9, &mut rng).origin(), Vec3::ZERO);
        }
    }
}
