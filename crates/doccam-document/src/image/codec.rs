// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Codec helpers — turn encoded photos into RGB rasters and rectified rasters
// back into files. Uses the `image` crate for every format.

use std::path::Path;

use doccam_core::error::{DoccamError, Result};
use image::{ImageFormat, RgbImage};
use tracing::{debug, info, instrument};

/// Decode JPEG/PNG/TIFF/... bytes into an RGB raster.
#[instrument(skip(data), fields(data_len = data.len()))]
pub fn decode_rgb(data: &[u8]) -> Result<RgbImage> {
    let img = image::load_from_memory(data).map_err(source_error)?;
    debug!(
        width = img.width(),
        height = img.height(),
        "Image decoded from bytes"
    );
    Ok(img.to_rgb8())
}

/// Open an image file and convert it to an RGB raster.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn open_rgb(path: impl AsRef<Path>) -> Result<RgbImage> {
    let img = image::open(path.as_ref()).map_err(source_error)?;
    info!(width = img.width(), height = img.height(), "Image loaded");
    Ok(img.to_rgb8())
}

/// Encode a raster as PNG bytes.
pub fn encode_png(image: &RgbImage) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let mut cursor = std::io::Cursor::new(&mut buffer);
    image
        .write_to(&mut cursor, ImageFormat::Png)
        .map_err(|err| DoccamError::ImageError(format!("PNG encoding failed: {}", err)))?;
    Ok(buffer)
}

/// Write a raster to a file. The format is inferred from the file extension.
#[instrument(skip(image), fields(path = %path.as_ref().display()))]
pub fn save_rgb(image: &RgbImage, path: impl AsRef<Path>) -> Result<()> {
    image.save(path.as_ref()).map_err(|err| {
        DoccamError::ImageError(format!(
            "failed to save image to {}: {}",
            path.as_ref().display(),
            err
        ))
    })?;
    debug!(width = image.width(), height = image.height(), "Image saved");
    Ok(())
}

/// Keep I/O failures distinguishable from undecodable data.
fn source_error(err: image::ImageError) -> DoccamError {
    match err {
        image::ImageError::IoError(io) => DoccamError::Io(io),
        other => DoccamError::ImageSource(format!("failed to decode image: {}", other)),
    }
}
