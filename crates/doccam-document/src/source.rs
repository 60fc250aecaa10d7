// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image sources — where the photo to scan comes from.
//
// The pipeline only needs "give me a colour raster"; each kind of source
// (file on disk, encoded bytes from a camera or upload, an already-decoded
// raster) implements the one-method `ImageSource` capability.

use std::path::{Path, PathBuf};

use doccam_core::error::Result;
use image::RgbImage;
use tracing::instrument;

use crate::image::codec;

/// Anything that can hand over a colour photo.
pub trait ImageSource {
    /// Produce the photo, or the I/O / decode failure that prevented it.
    fn get_image(&self) -> Result<RgbImage>;
}

/// Reads the photo from a file; the format is sniffed from the contents.
#[derive(Debug, Clone)]
pub struct FileImageSource {
    path: PathBuf,
}

impl FileImageSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ImageSource for FileImageSource {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn get_image(&self) -> Result<RgbImage> {
        codec::open_rgb(&self.path)
    }
}

/// Decodes the photo from encoded bytes (JPEG, PNG, TIFF, ...).
#[derive(Debug, Clone)]
pub struct BytesImageSource {
    data: Vec<u8>,
}

impl BytesImageSource {
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self { data: data.into() }
    }
}

impl ImageSource for BytesImageSource {
    fn get_image(&self) -> Result<RgbImage> {
        codec::decode_rgb(&self.data)
    }
}

/// Hands out copies of an already-decoded raster (camera frames, fixtures).
#[derive(Debug, Clone)]
pub struct MemoryImageSource {
    image: RgbImage,
}

impl MemoryImageSource {
    pub fn new(image: RgbImage) -> Self {
        Self { image }
    }
}

impl ImageSource for MemoryImageSource {
    fn get_image(&self) -> Result<RgbImage> {
        Ok(self.image.clone())
    }
}

impl<S: ImageSource + ?Sized> ImageSource for Box<S> {
    fn get_image(&self) -> Result<RgbImage> {
        (**self).get_image()
    }
}
