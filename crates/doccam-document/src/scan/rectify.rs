// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Perspective rectification — map the detected quadrilateral onto an
// axis-aligned rectangle and resample the photo through that mapping.

use doccam_core::Quadrilateral;
use doccam_core::config::RectifyConfig;
use doccam_core::error::PipelineFailure;
use image::{Rgb, RgbImage};
use imageproc::geometric_transformations::{Interpolation, Projection, warp_into};
use tracing::{debug, info, instrument, warn};

/// Homography taking each corner of `quad` to the matching corner of the
/// `dest_width × dest_height` output rectangle.
///
/// `None` when three corners are collinear or the solved matrix has no
/// inverse.
pub fn perspective_projection(
    quad: &Quadrilateral,
    dest_width: u32,
    dest_height: u32,
) -> Option<Projection> {
    if quad.has_collinear_triple() {
        return None;
    }
    let src = quad.corners.map(|p| (p.x as f32, p.y as f32));
    let dest = target_corners(dest_width, dest_height);
    Projection::from_control_points(src, dest)
}

/// Output-rectangle corners in canonical order: top-left, bottom-left,
/// bottom-right, top-right.
pub fn target_corners(dest_width: u32, dest_height: u32) -> [(f32, f32); 4] {
    let w = dest_width as f32;
    let h = dest_height as f32;
    [(0.0, 0.0), (0.0, h), (w, h), (w, 0.0)]
}

/// Warp the canonically ordered `quad` of `image` into a
/// `dest_width × (dest_width * aspect_ratio)` raster.
///
/// Output pixels whose source falls outside the photo take `config.fill`.
#[instrument(skip(image, quad, config), fields(src_width = image.width(), src_height = image.height()))]
pub fn rectify(
    image: &RgbImage,
    quad: &Quadrilateral,
    aspect_ratio: f32,
    dest_width: u32,
    config: &RectifyConfig,
) -> Result<RgbImage, PipelineFailure> {
    if image.width() == 0 || image.height() == 0 {
        return Err(PipelineFailure::InvalidInput(
            "source image has no pixels".into(),
        ));
    }
    if dest_width == 0 {
        return Err(PipelineFailure::InvalidInput(
            "output width must be positive".into(),
        ));
    }
    if !aspect_ratio.is_finite() || aspect_ratio <= 0.0 {
        warn!(aspect_ratio, "Unusable aspect ratio");
        return Err(PipelineFailure::DegenerateGeometry);
    }

    let dest_height = (dest_width as f32 * aspect_ratio) as u32;
    if dest_height == 0 {
        warn!(dest_width, aspect_ratio, "Output would have no rows");
        return Err(PipelineFailure::DegenerateGeometry);
    }

    if quad.has_collinear_triple() {
        warn!(corners = ?quad.corners, "Three corners are collinear");
        return Err(PipelineFailure::DegenerateGeometry);
    }

    let projection = perspective_projection(quad, dest_width, dest_height).ok_or_else(|| {
        warn!(corners = ?quad.corners, "No invertible projection for these corners");
        PipelineFailure::DegenerateGeometry
    })?;
    debug!(?projection, "Solved homography");

    let mut output = RgbImage::new(dest_width, dest_height);
    warp_into(
        image,
        &projection,
        Interpolation::Bilinear,
        Rgb(config.fill),
        &mut output,
    );

    info!(dest_width, dest_height, "Rectified document");
    Ok(output)
}
