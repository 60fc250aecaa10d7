// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Edge preprocessing — grayscale conversion, edge-preserving smoothing,
// Canny edge detection and edge closing.

use doccam_core::config::PreprocessConfig;
use doccam_core::error::PipelineFailure;
use image::{GrayImage, RgbImage};
use imageproc::distance_transform::Norm;
use imageproc::edges::canny;
use imageproc::filter::bilateral_filter;
use imageproc::morphology::dilate;
use tracing::{debug, info, instrument, warn};

/// Turn a colour photo into a binary edge map (edges 255, background 0).
///
/// ## Pipeline
///
/// 1. Convert to grayscale
/// 2. Bilateral smoothing, which flattens paper grain and printed text but
///    keeps the strong page-against-background step
/// 3. Canny edge detection with hysteresis thresholds
/// 4. Dilation so single-pixel gaps (typically at page corners) do not
///    break the page outline open
#[instrument(skip_all, fields(width = image.width(), height = image.height()))]
pub fn preprocess(
    image: &RgbImage,
    config: &PreprocessConfig,
) -> Result<GrayImage, PipelineFailure> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        warn!(width, height, "Refusing to preprocess an empty image");
        return Err(PipelineFailure::InvalidInput(format!(
            "image has no pixels ({width}x{height})"
        )));
    }

    let gray = image::imageops::grayscale(image);

    let smoothed = bilateral_filter(
        &gray,
        config.bilateral_diameter,
        config.bilateral_sigma_color,
        config.bilateral_sigma_space,
    );
    debug!(
        diameter = config.bilateral_diameter,
        sigma_color = config.bilateral_sigma_color,
        sigma_space = config.bilateral_sigma_space,
        "Applied bilateral filter"
    );

    let edges = canny(&smoothed, config.canny_low, config.canny_high);

    let edges = if config.edge_closing_radius > 0 {
        dilate(&edges, Norm::LInf, config.edge_closing_radius)
    } else {
        edges
    };

    let edge_pixels = edges.pixels().filter(|p| p.0[0] > 0).count();
    info!(edge_pixels, "Edge map ready");
    Ok(edges)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::fixtures::framed_rectangle;
    use image::Rgb;

    #[test]
    fn empty_image_is_invalid_input() {
        let img = RgbImage::new(0, 0);
        let err = preprocess(&img, &PreprocessConfig::default()).unwrap_err();
        assert!(matches!(err, PipelineFailure::InvalidInput(_)));
    }

    #[test]
    fn uniform_image_has_no_edges() {
        let img = RgbImage::from_pixel(60, 40, Rgb([120, 130, 140]));
        let edges = preprocess(&img, &PreprocessConfig::default()).unwrap();
        assert_eq!(edges.dimensions(), (60, 40));
        assert!(edges.pixels().all(|p| p.0[0] == 0));
    }

    #[test]
    fn black_photo_has_no_edges() {
        let img = RgbImage::new(50, 30);
        let edges = preprocess(&img, &PreprocessConfig::default()).unwrap();
        assert!(edges.pixels().all(|p| p.0[0] == 0));
    }

    #[test]
    fn rectangle_outline_becomes_edges() {
        let img = framed_rectangle(120, 100, 30, 20, 60, 50);
        let edges = preprocess(&img, &PreprocessConfig::default()).unwrap();

        // Edge pixels along the left side of the rectangle...
        let left_side = (30..70).filter(|&y| (27..=33).any(|x| edges.get_pixel(x, y).0[0] == 255));
        assert_eq!(left_side.count(), 40);
        // ...but none deep inside it or far outside it.
        assert_eq!(edges.get_pixel(60, 45).0[0], 0);
        assert_eq!(edges.get_pixel(5, 5).0[0], 0);
    }

    #[test]
    fn output_is_binary() {
        let img = framed_rectangle(80, 80, 20, 20, 40, 40);
        let edges = preprocess(&img, &PreprocessConfig::default()).unwrap();
        assert!(edges.pixels().all(|p| p.0[0] == 0 || p.0[0] == 255));
    }

    #[test]
    fn closing_radius_zero_keeps_thin_edges() {
        let img = framed_rectangle(80, 80, 20, 20, 40, 40);
        let closed = preprocess(&img, &PreprocessConfig::default()).unwrap();
        let thin = preprocess(
            &img,
            &PreprocessConfig {
                edge_closing_radius: 0,
                ..PreprocessConfig::default()
            },
        )
        .unwrap();
        let count = |g: &GrayImage| g.pixels().filter(|p| p.0[0] > 0).count();
        assert!(count(&thin) > 0);
        assert!(count(&closed) > count(&thin));
    }
}
