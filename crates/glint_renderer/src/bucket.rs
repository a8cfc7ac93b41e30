//! Bucket-based tile rendering.
//!
//! Divides the image into tiles (buckets) that are rendered independently
//! and in parallel using rayon. Each bucket owns its own random stream,
//! derived from the render seed and the bucket index, so the output is
//! reproducible for a given seed and bucket size.

use crate::renderer::{render, render_pixel, ImageBuffer, RenderConfig, Resolution};
use crate::{Camera, Color, Hittable, RenderError, RenderResult};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

/// A rectangular region of the image to render.
///
/// Coordinates are file rows: `y = 0` is the top of the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// X coordinate of bucket's top-left corner
    pub x: u32,
    /// Y coordinate of bucket's top-left corner
    pub y: u32,
    /// Width of the bucket in pixels
    pub width: u32,
    /// Height of the bucket in pixels
    pub height: u32,
    /// Index of this bucket in row-major grid order
    pub index: usize,
}

impl Bucket {
    /// Create a new bucket.
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self { x, y, width, height, index }
    }

    /// Get the total number of pixels in this bucket.
    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }
}

/// Default bucket size in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 32;

/// Generate buckets covering an image in row-major grid order.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let mut buckets = Vec::new();
    let mut index = 0;

    let mut y = 0;
    while y < height {
        let mut x = 0;
        while x < width {
            let bw = bucket_size.min(width - x);
            let bh = bucket_size.min(height - y);
            buckets.push(Bucket::new(x, y, bw, bh, index));
            index += 1;
            x += bucket_size;
        }
        y += bucket_size;
    }

    buckets
}

/// Seed for one bucket's random stream (SplitMix64 finalizer over seed and index).
pub fn bucket_seed(seed: u64, index: usize) -> u64 {
    let mut z = seed ^ (index as u64).wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Result of rendering a bucket.
#[derive(Debug, Clone)]
pub struct BucketResult {
    /// The bucket that was rendered
    pub bucket: Bucket,
    /// Pixel colors in row-major order, top row first
    pub pixels: Vec<Color>,
}

/// Render a single bucket with its own random stream.
pub fn render_bucket(
    bucket: &Bucket,
    camera: &Camera,
    world: &dyn Hittable,
    resolution: Resolution,
    config: &RenderConfig,
    seed: u64,
) -> BucketResult {
    let mut rng = StdRng::seed_from_u64(bucket_seed(seed, bucket.index));
    let mut pixels = Vec::with_capacity(bucket.pixel_count() as usize);

    // Top file row of the bucket first; camera rows count up from the bottom
    for local_y in 0..bucket.height {
        let row = bucket.y + local_y;
        let camera_y = resolution.height - 1 - row;
        for local_x in 0..bucket.width {
            let color = render_pixel(
                camera,
                world,
                bucket.x + local_x,
                camera_y,
                resolution,
                config,
                &mut rng,
            );
            pixels.push(color);
        }
    }

    BucketResult { bucket: *bucket, pixels }
}

/// Render all buckets on the current rayon pool.
pub fn render_parallel(
    camera: &Camera,
    world: &dyn Hittable,
    resolution: Resolution,
    config: &RenderConfig,
    seed: u64,
) -> ImageBuffer {
    let buckets = generate_buckets(resolution.width, resolution.height, config.bucket_size);
    let total = buckets.len();
    let done = AtomicUsize::new(0);

    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| {
            let result = render_bucket(bucket, camera, world, resolution, config, seed);
            let finished = done.fetch_add(1, Ordering::Relaxed) + 1;
            log::debug!("Bucket {} done ({}/{})", bucket.index, finished, total);
            result
        })
        .collect();

    let mut image = ImageBuffer::new(resolution.width, resolution.height);
    for result in results {
        let bucket = result.bucket;
        for (i, color) in result.pixels.into_iter().enumerate() {
            let local_x = i as u32 % bucket.width;
            let local_y = i as u32 / bucket.width;
            image.set(bucket.x + local_x, bucket.y + local_y, color);
        }
    }

    image
}

/// Validate `config`, pick a seed and render with the configured threading.
///
/// `threads == Some(1)` uses the sequential driver with a single stream;
/// otherwise buckets are rendered on a rayon pool (the global one when
/// `threads` is unset).
pub fn render_scene(
    camera: &Camera,
    world: &dyn Hittable,
    resolution: Resolution,
    config: &RenderConfig,
) -> RenderResult<ImageBuffer> {
    config.validate()?;
    if resolution.width == 0 || resolution.height == 0 {
        return Err(RenderError::InvalidConfig(format!(
            "resolution must be non-empty, got {}x{}",
            resolution.width, resolution.height
        )));
    }
    let seed = config.resolve_seed();

    log::info!(
        "Rendering {}x{} @ {} spp, max depth {}, seed {}, threads {}",
        resolution.width,
        resolution.height,
        config.samples_per_pixel,
        config.max_depth,
        seed,
        config
            .threads
            .map_or_else(|| "auto".to_string(), |n| n.to_string()),
    );

    let start = Instant::now();
    let image = match config.threads {
        Some(1) => {
            let mut rng = StdRng::seed_from_u64(seed);
            render(camera, world, resolution, config, &mut rng)
        }
        Some(threads) => {
            let pool = rayon::ThreadPoolBuilder::new().num_threads(threads).build()?;
            pool.install(|| render_parallel(camera, world, resolution, config, seed))
        }
        None => render_parallel(camera, world, resolution, config, seed),
    };
    log::info!("Rendered in {:?}", start.elapsed());

    Ok(image)
}
