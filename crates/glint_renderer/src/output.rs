//! Image writers.

use crate::renderer::{color_to_rgb, ImageBuffer};
use crate::{RenderError, RenderResult};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write an image as plain-text PPM (`P3`), top row first.
pub fn write_ppm<W: Write>(image: &ImageBuffer, writer: &mut W) -> std::io::Result<()> {
    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "255")?;

    for color in &image.pixels {
        let [r, g, b] = color_to_rgb(*color);
        writeln!(writer, "{} {} {}", r, g, b)?;
    }

    Ok(())
}

/// Save an image, choosing the format from the file extension.
///
/// `.ppm` (or no extension) writes plain-text PPM; anything else is handed
/// to the `image` crate (PNG, JPEG).
pub fn save_image(image: &ImageBuffer, path: impl AsRef<Path>) -> RenderResult<()> {
    let path = path.as_ref();
    let is_ppm = path
        .extension()
        .map_or(true, |ext| ext.eq_ignore_ascii_case("ppm"));

    if is_ppm {
        let mut writer = BufWriter::new(File::create(path)?);
        write_ppm(image, &mut writer)?;
        writer.flush()?;
    } else {
        let encoded = image::RgbImage::from_raw(image.width, image.height, image.to_rgb8())
            .ok_or(RenderError::BufferSize {
                width: image.width,
                height: image.height,
            })?;
        encoded.save(path)?;
    }

    log::info!("Saved {}x{} image to {}", image.width, image.height, path.display());
    Ok(())
}
