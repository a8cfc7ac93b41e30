//! Glint renderer - CPU Path Tracing
//!
//! A Monte Carlo path tracer over spheres with diffuse, metal and glass
//! materials, a thin-lens camera, and sequential or bucketed parallel
//! render drivers.

mod bucket;
mod camera;
mod error;
mod hittable;
mod material;
mod output;
mod renderer;
pub mod sampling;
mod sphere;

pub use bucket::{
    bucket_seed, generate_buckets, render_bucket, render_parallel, render_scene, Bucket,
    BucketResult, DEFAULT_BUCKET_SIZE,
};
pub use camera::{Camera, CameraBuilder};
pub use error::{GeometryError, RenderError, RenderResult};
pub use hittable::{HitRecord, Hittable, HittableList};
pub use material::{reflect, refract, schlick, Color, Dielectric, Lambertian, Material, Metal, ScatterResult};
pub use output::{save_image, write_ppm};
pub use renderer::{
    color_to_rgb, linear_to_gamma, quantize, ray_color, render, render_pixel, sky_gradient,
    ImageBuffer, RenderConfig, Resolution,
};
pub use sphere::Sphere;

/// Re-export math types from glint_math
pub use glint_math::{Interval, Ray, Vec3};
