// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Raster fingerprints — SHA-256 over dimensions and pixels, used to check
// that repeated scans of the same photo are bit-identical.

use image::RgbImage;
use sha2::{Digest, Sha256};

/// Fingerprint a raster. Dimensions are hashed too, so a 2x3 and a 3x2 image
/// with the same bytes differ.
pub fn raster_digest(image: &RgbImage) -> String {
    let mut hasher = Sha256::new();
    hasher.update(image.width().to_le_bytes());
    hasher.update(image.height().to_le_bytes());
    hasher.update(image.as_raw());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn digest_is_lowercase_sha256_hex() {
        let digest = raster_digest(&RgbImage::new(0, 0));
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn identical_rasters_share_a_digest() {
        let a = RgbImage::from_pixel(4, 4, Rgb([1, 2, 3]));
        let b = a.clone();
        assert_eq!(raster_digest(&a), raster_digest(&b));
    }

    #[test]
    fn one_pixel_changes_the_digest() {
        let a = RgbImage::from_pixel(4, 4, Rgb([1, 2, 3]));
        let mut b = a.clone();
        b.put_pixel(2, 2, Rgb([1, 2, 4]));
        assert_ne!(raster_digest(&a), raster_digest(&b));
    }

    #[test]
    fn transposed_shape_changes_the_digest() {
        let a = RgbImage::from_pixel(2, 3, Rgb([9, 9, 9]));
        let b = RgbImage::from_pixel(3, 2, Rgb([9, 9, 9]));
        assert_ne!(raster_digest(&a), raster_digest(&b));
    }
}
