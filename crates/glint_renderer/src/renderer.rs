//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Recursive ray tracing with a hard depth cutoff
//! - Gamma correction
//! - Anti-aliasing via jittered multi-sampling

use crate::sampling::gen_f32;
use crate::{Camera, Color, Hittable, RenderError, RenderResult};
use glint_math::{Interval, Ray};
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// Output image dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width divided by height.
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Self::new(200, 100)
    }
}

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Number of bounces after which a path is terminated as black
    pub max_depth: u32,
    /// Minimum hit distance, suppresses shadow acne
    pub t_min: f32,
    /// Seed for the per-bucket random streams; drawn at random when unset
    pub seed: Option<u64>,
    /// Worker thread count; `Some(1)` renders sequentially
    pub threads: Option<usize>,
    /// Edge length of a parallel render tile in pixels
    pub bucket_size: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            samples_per_pixel: 100,
            max_depth: 50,
            t_min: 0.001,
            seed: None,
            threads: None,
            bucket_size: crate::DEFAULT_BUCKET_SIZE,
        }
    }
}

impl RenderConfig {
    /// Check the configuration before starting a render.
    pub fn validate(&self) -> RenderResult<()> {
        if self.samples_per_pixel == 0 {
            return Err(RenderError::InvalidConfig(
                "samples_per_pixel must be at least 1".into(),
            ));
        }
        if !self.t_min.is_finite() || self.t_min < 0.0 {
            return Err(RenderError::InvalidConfig(format!(
                "t_min must be finite and non-negative, got {}",
                self.t_min
            )));
        }
        if self.threads == Some(0) {
            return Err(RenderError::InvalidConfig("threads must be at least 1".into()));
        }
        if self.bucket_size == 0 {
            return Err(RenderError::InvalidConfig("bucket_size must be at least 1".into()));
        }
        Ok(())
    }

    /// The configured seed, or a fresh one from the thread RNG.
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}

/// Compute the color seen by a ray.
///
/// `depth` counts bounces taken so far; the first call passes 0. A hit at
/// `depth >= config.max_depth` contributes black.
pub fn ray_color(
    ray: &Ray,
    world: &dyn Hittable,
    depth: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let Some(rec) = world.hit(ray, Interval::new(config.t_min, f32::INFINITY)) else {
        return sky_gradient(ray);
    };

    if depth >= config.max_depth {
        return Color::ZERO;
    }

    match rec.material.scatter(ray, &rec, rng) {
        Some(result) => {
            result.attenuation * ray_color(&result.scattered, world, depth + 1, config, rng)
        }
        // Absorbed
        None => Color::ZERO,
    }
}

/// Vertical white-to-blue gradient used when a ray escapes the scene.
pub fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    white * (1.0 - a) + blue * a
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Gamma-correct a linear channel value and quantize it to 8 bits.
#[inline]
pub fn quantize(linear: f32) -> u8 {
    let value = (255.99 * linear_to_gamma(linear)).floor();
    value.clamp(0.0, 255.0) as u8
}

/// Convert a linear color to gamma-corrected 8-bit RGB.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    [quantize(color.x), quantize(color.y), quantize(color.z)]
}

/// Render a single pixel with multi-sampling.
///
/// `(x, y)` are camera-space pixel coordinates: `y = 0` is the bottom row.
/// Samples whose color is not finite are dropped from the average.
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    x: u32,
    y: u32,
    resolution: Resolution,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let mut pixel_color = Color::ZERO;
    let mut accepted = 0u32;

    for _ in 0..config.samples_per_pixel {
        let s = (x as f32 + gen_f32(rng)) / resolution.width as f32;
        let t = (y as f32 + gen_f32(rng)) / resolution.height as f32;
        let ray = camera.get_ray(s, t, rng);
        let sample = ray_color(&ray, world, 0, config, rng);

        if sample.is_finite() {
            pixel_color += sample;
            accepted += 1;
        }
    }

    let dropped = config.samples_per_pixel - accepted;
    if dropped > 0 {
        log::debug!("Dropped {} non-finite samples at pixel ({}, {})", dropped, x, y);
    }
    if accepted == 0 {
        return Color::ZERO;
    }

    pixel_color / accepted as f32
}

/// Image buffer of averaged linear colors, rows stored top to bottom.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    #[inline]
    fn index(&self, x: u32, row: u32) -> usize {
        row as usize * self.width as usize + x as usize
    }

    /// Get the pixel at column `x` of file row `row` (0 = top).
    pub fn get(&self, x: u32, row: u32) -> Color {
        self.pixels[self.index(x, row)]
    }

    /// Set the pixel at column `x` of file row `row` (0 = top).
    pub fn set(&mut self, x: u32, row: u32, color: Color) {
        let index = self.index(x, row);
        self.pixels[index] = color;
    }

    /// Gamma-corrected 8-bit RGB triples in row-major, top-to-bottom order.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgb(*color));
        }
        bytes
    }
}

/// Render the entire scene on the calling thread.
///
/// Rows are traced bottom to top, left to right, and stored top to bottom.
pub fn render(
    camera: &Camera,
    world: &dyn Hittable,
    resolution: Resolution,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> ImageBuffer {
    let mut image = ImageBuffer::new(resolution.width, resolution.height);

    for y in (0..resolution.height).rev() {
        for x in 0..resolution.width {
            let color = render_pixel(camera, world, x, y, resolution, config, rng);
            image.set(x, resolution.height - 1 - y, color);
        }
    }

    image
}
