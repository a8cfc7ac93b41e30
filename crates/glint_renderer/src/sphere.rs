//! Sphere primitive for ray tracing.

use crate::{
    hittable::{HitRecord, Hittable},
    GeometryError, Material,
};
use glint_math::{Interval, Ray, Vec3};

/// A sphere primitive that owns its material.
///
/// A negative radius turns the sphere inside out: the normal
/// `(p - center) / radius` then points inward, which is how hollow glass
/// shells are modelled.
pub struct Sphere<M: Material> {
    center: Vec3,
    radius: f32,
    material: M,
}

impl<M: Material> Sphere<M> {
    /// Create a new sphere.
    ///
    /// # Panics
    ///
    /// Panics if the radius is zero or not finite. Use [`Sphere::try_new`]
    /// for untrusted input.
    pub fn new(center: Vec3, radius: f32, material: M) -> Self {
        match Self::try_new(center, radius, material) {
            Ok(sphere) => sphere,
            Err(err) => panic!("{err}"),
        }
    }

    /// Create a new sphere, rejecting degenerate parameters.
    pub fn try_new(center: Vec3, radius: f32, material: M) -> Result<Self, GeometryError> {
        if !radius.is_finite() || radius == 0.0 {
            return Err(GeometryError::DegenerateRadius(radius));
        }
        if !center.is_finite() {
            return Err(GeometryError::NonFiniteCenter(center.to_array()));
        }
        Ok(Self {
            center,
            radius,
            material,
        })
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn material(&self) -> &M {
        &self.material
    }
}

impl<M: Material + 'static> Hittable for Sphere<M> {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        debug_assert!(ray_t.is_valid(), "invalid hit interval {:?}", ray_t);

        let direction = ray.direction();
        let oc = ray.origin() - self.center;
        let a = direction.length_squared();
        debug_assert!(a > 0.0, "ray direction has zero length");

        // Normalized quadratic t^2 + p*t + q = 0
        let p = 2.0 * direction.dot(oc) / a;
        let q = (oc.length_squared() - self.radius * self.radius) / a;
        let half_p = 0.5 * p;

        let discriminant = half_p * half_p - q;
        if discriminant <= 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = -half_p - sqrtd;
        if !ray_t.surrounds(root) {
            root = -half_p + sqrtd;
            if !ray_t.surrounds(root) {
                return None;
            }
        }

        let p = ray.at(root);
        Some(HitRecord {
            t: root,
            p,
            normal: (p - self.center) / self.radius,
            material: &self.material,
        })
    }
}
