//! Material trait for surface scattering.

use crate::hittable::HitRecord;
use crate::sampling::{gen_f32, random_in_unit_sphere};
use glint_math::{Ray, Vec3};
use rand::RngCore;

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;

/// Outcome of a successful scatter event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterResult {
    /// Componentwise multiplier applied to the light carried back along the path
    pub attenuation: Color,
    /// The continuation ray, starting at the hit point
    pub scattered: Ray,
}

impl ScatterResult {
    #[inline]
    pub fn new(attenuation: Color, scattered: Ray) -> Self {
        Self {
            attenuation,
            scattered,
        }
    }
}

/// Trait for materials that describe how light interacts with surfaces.
pub trait Material: Send + Sync {
    /// Scatter an incoming ray.
    ///
    /// Returns `None` if the ray is absorbed.
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult>;
}

/// Lambertian (diffuse) material.
#[derive(Debug, Clone)]
pub struct Lambertian {
    albedo: Color,
}

impl Lambertian {
    /// Create a new Lambertian material with the given albedo color.
    pub fn new(albedo: Color) -> Self {
        Self { albedo }
    }

    pub fn albedo(&self) -> Color {
        self.albedo
    }
}

impl Material for Lambertian {
    fn scatter(&self, _ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        // target = p + normal + random point in the unit sphere
        let mut scatter_direction = rec.normal + random_in_unit_sphere(rng);

        // Catch degenerate scatter direction
        if scatter_direction.length_squared() < 1e-8 {
            scatter_direction = rec.normal;
        }

        Some(ScatterResult::new(
            self.albedo,
            Ray::new(rec.p, scatter_direction),
        ))
    }
}

/// Metal (specular) material.
#[derive(Debug, Clone)]
pub struct Metal {
    albedo: Color,
    fuzz: f32,
}

impl Metal {
    /// Create a new Metal material.
    ///
    /// - `albedo`: The color of the metal
    /// - `fuzz`: Roughness, 0.0 = perfect mirror, 1.0 = very rough. Clamped to [0, 1].
    pub fn new(albedo: Color, fuzz: f32) -> Self {
        Self {
            albedo,
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }

    pub fn albedo(&self) -> Color {
        self.albedo
    }

    pub fn fuzz(&self) -> f32 {
        self.fuzz
    }
}

impl Material for Metal {
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        let reflected = reflect(ray_in.direction().normalize(), rec.normal);
        let scattered_dir = if self.fuzz > 0.0 {
            reflected + self.fuzz * random_in_unit_sphere(rng)
        } else {
            reflected
        };

        // Fuzz may push the ray below the surface; treat that as absorbed
        if scattered_dir.dot(rec.normal) > 0.0 {
            Some(ScatterResult::new(self.albedo, Ray::new(rec.p, scattered_dir)))
        } else {
            None
        }
    }
}

/// Dielectric (glass) material.
#[derive(Debug, Clone)]
pub struct Dielectric {
    /// Index of refraction
    ior: f32,
}

impl Dielectric {
    /// Create a new Dielectric material.
    ///
    /// - `ior`: Index of refraction (1.0 = air, 1.5 = glass, 2.4 = diamond)
    pub fn new(ior: f32) -> Self {
        Self { ior }
    }

    pub fn ior(&self) -> f32 {
        self.ior
    }

    /// Reflected direction, refracted direction if one exists, and the
    /// probability of taking the reflection (1 under total internal reflection).
    fn split(&self, ray_in: &Ray, rec: &HitRecord) -> (Vec3, Option<Vec3>, f32) {
        let direction = ray_in.direction();
        let d_dot_n = direction.dot(rec.normal);
        let inv_len = direction.length().recip();

        let (outward_normal, eta, cosine) = if d_dot_n > 0.0 {
            // Exiting the medium
            (-rec.normal, self.ior, self.ior * d_dot_n * inv_len)
        } else {
            (rec.normal, self.ior.recip(), -d_dot_n * inv_len)
        };

        let reflected = reflect(direction, rec.normal);
        match refract(direction, outward_normal, eta) {
            Some(refracted) => (reflected, Some(refracted), schlick(cosine, self.ior)),
            None => (reflected, None, 1.0),
        }
    }
}

impl Material for Dielectric {
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        // Glass absorbs nothing
        let attenuation = Color::ONE;

        let (reflected, refracted, reflect_prob) = self.split(ray_in, rec);
        let direction = match refracted {
            Some(refracted) if gen_f32(rng) >= reflect_prob => refracted,
            _ => reflected,
        };

        Some(ScatterResult::new(attenuation, Ray::new(rec.p, direction)))
    }
}

// =============================================================================
// Helper functions
// =============================================================================

/// Reflect a vector about a normal.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract `v` through a surface with normal `n` and relative index `eta`.
///
/// Returns `None` under total internal reflection.
#[inline]
pub fn refract(v: Vec3, n: Vec3, eta: f32) -> Option<Vec3> {
    let uv = v.normalize();
    let dt = uv.dot(n);
    let discriminant = 1.0 - eta * eta * (1.0 - dt * dt);
    if discriminant > 0.0 {
        Some(eta * (uv - n * dt) - n * discriminant.sqrt())
    } else {
        None
    }
}

/// Schlick's approximation for reflectance.
#[inline]
pub fn schlick(cosine: f32, ior: f32) -> f32 {
    let r0 = ((1.0 - ior) / (1.0 + ior)).powi(2);
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn record<'a>(normal: Vec3, material: &'a dyn Material) -> HitRecord<'a> {
        HitRecord {
            t: 1.0,
            p: Vec3::ZERO,
            normal,
            material,
        }
    }

    #[test]
    fn test_lambertian_always_scatters() {
        let mat = Lambertian::new(Color::new(0.8, 0.3, 0.3));
        let rec = record(Vec3::Y, &mat);
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Y);
        let mut rng = StdRng::seed_from_u64(1);

        for _ in 0..500 {
            let result = mat.scatter(&ray, &rec, &mut rng).expect("lambertian always scatters");
            assert_eq!(result.attenuation, Color::new(0.8, 0.3, 0.3));
            assert_eq!(result.scattered.origin(), rec.p);
            // normal + point in unit sphere never points into the surface
            assert!(result.scattered.direction().dot(rec.normal) >= 0.0);
        }
    }

    #[test]
    fn test_mirror_reflection_law() {
        let mat = Metal::new(Color::new(0.9, 0.9, 0.9), 0.0);
        let n = Vec3::Y;
        let rec = record(n, &mat);
        let d = Vec3::new(1.0, -1.0, 0.5).normalize();
        let ray = Ray::new(Vec3::new(-1.0, 1.0, -0.5), d);
        let mut rng = StdRng::seed_from_u64(9);

        let expected = d - 2.0 * d.dot(n) * n;
        for _ in 0..10 {
            let result = mat.scatter(&ray, &rec, &mut rng).expect("mirror reflects");
            assert!((result.scattered.direction() - expected).length() < 1e-6);
            assert_eq!(result.attenuation, Color::new(0.9, 0.9, 0.9));
        }
    }

    #[test]
    fn test_metal_fuzz_clamped() {
        assert_eq!(Metal::new(Color::ONE, 3.0).fuzz(), 1.0);
        assert_eq!(Metal::new(Color::ONE, -1.0).fuzz(), 0.0);
        assert_eq!(Metal::new(Color::ONE, 0.3).fuzz(), 0.3);
    }

    #[test]
    fn test_fuzzy_metal_absorbs_grazing_rays() {
        let mat = Metal::new(Color::ONE, 1.0);
        let rec = record(Vec3::Y, &mat);
        // Almost parallel to the surface
        let ray = Ray::new(Vec3::new(-1.0, 0.001, 0.0), Vec3::new(1.0, -0.001, 0.0));
        let mut rng = StdRng::seed_from_u64(5);

        let absorbed = (0..1000)
            .filter(|_| mat.scatter(&ray, &rec, &mut rng).is_none())
            .count();
        assert!(absorbed > 0);
        assert!(absorbed < 1000);
    }

    #[test]
    fn test_total_internal_reflection_is_deterministic() {
        let mat = Dielectric::new(1.5);
        // Outward normal of the glass surface
        let n = Vec3::Y;
        let rec = record(n, &mat);

        // Travelling from inside the glass at 60 degrees from the normal,
        // beyond the ~41.8 degree critical angle for ior 1.5
        let theta = 60f32.to_radians();
        let d = Vec3::new(theta.sin(), theta.cos(), 0.0);
        let ray = Ray::new(Vec3::new(-theta.sin(), -theta.cos(), 0.0), d);

        let expected = reflect(d, n);
        let mut rng = StdRng::seed_from_u64(77);
        for _ in 0..200 {
            let result = mat.scatter(&ray, &rec, &mut rng).expect("dielectric always scatters");
            assert_eq!(result.attenuation, Color::ONE);
            assert!((result.scattered.direction() - expected).length() < 1e-6);
        }
    }

    #[test]
    fn test_dielectric_chooses_both_branches_when_refraction_possible() {
        let mat = Dielectric::new(1.5);
        let rec = record(Vec3::Y, &mat);
        // Grazing entry gives a high but not total Schlick reflectance
        let d = Vec3::new(1.0, -0.2, 0.0);
        let ray = Ray::new(Vec3::new(-1.0, 0.2, 0.0), d);
        let mut rng = StdRng::seed_from_u64(11);

        let mut reflected = 0;
        let mut refracted = 0;
        for _ in 0..2000 {
            let result = mat.scatter(&ray, &rec, &mut rng).expect("dielectric always scatters");
            if result.scattered.direction().y > 0.0 {
                reflected += 1;
            } else {
                refracted += 1;
            }
        }
        assert!(reflected > 0);
        assert!(refracted > 0);
    }

    #[test]
    fn test_dielectric_exiting_ray_refracts_away_from_normal() {
        let mat = Dielectric::new(1.5);
        let n = Vec3::Y;
        let rec = record(n, &mat);

        // Leaving the glass at 30 degrees, inside the critical angle
        let theta = 30f32.to_radians();
        let d = Vec3::new(theta.sin(), theta.cos(), 0.0);
        let ray = Ray::new(Vec3::new(-theta.sin(), -theta.cos(), 0.0), d);

        let expected_refracted = refract(d, -n, 1.5).expect("below the critical angle");
        let expected_reflected = reflect(d, n);
        // Snell: sin(out) = 1.5 * sin(30) = 0.75, bent away from the normal
        assert!((expected_refracted.normalize().x - 0.75).abs() < 1e-5);
        assert!(expected_refracted.y > 0.0);

        let mut rng = StdRng::seed_from_u64(23);
        let mut reflected = 0;
        let mut refracted = 0;
        for _ in 0..5000 {
            let result = mat.scatter(&ray, &rec, &mut rng).expect("dielectric always scatters");
            let dir = result.scattered.direction();
            if dir.y > 0.0 {
                assert!((dir - expected_refracted).length() < 1e-6);
                refracted += 1;
            } else {
                assert!((dir - expected_reflected).length() < 1e-6);
                reflected += 1;
            }
        }
        // Schlick reflectance here is about 0.038
        assert!(reflected > 0);
        assert!(refracted > reflected);
    }

    #[test]
    fn test_refract_straight_through() {
        let refracted = refract(Vec3::NEG_Y, Vec3::Y, 1.0 / 1.5).expect("normal incidence refracts");
        assert!((refracted - Vec3::NEG_Y).length() < 1e-6);
    }

    #[test]
    fn test_refract_snell_law() {
        let eta = 1.0 / 1.5;
        let theta_i = 30f32.to_radians();
        let v = Vec3::new(theta_i.sin(), -theta_i.cos(), 0.0);
        let r = refract(v, Vec3::Y, eta).expect("entering glass always refracts");

        let sin_t = r.normalize().x;
        assert!((sin_t - eta * theta_i.sin()).abs() < 1e-5);
        assert!((r.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_refract_total_internal_reflection() {
        let theta = 60f32.to_radians();
        let v = Vec3::new(theta.sin(), -theta.cos(), 0.0);
        assert!(refract(v, Vec3::Y, 1.5).is_none());
    }

    #[test]
    fn test_schlick_bounds() {
        // Normal incidence: r0 = ((1 - 1.5) / 2.5)^2 = 0.04
        assert!((schlick(1.0, 1.5) - 0.04).abs() < 1e-6);
        // Grazing incidence reflects everything
        assert!((schlick(0.0, 1.5) - 1.0).abs() < 1e-6);
    }
}
