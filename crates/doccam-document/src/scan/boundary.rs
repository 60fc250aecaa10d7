// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Boundary selection — pick the outermost edge contour most likely to be
// the document.

use doccam_core::config::BoundaryConfig;
use doccam_core::error::PipelineFailure;
use doccam_core::{Contour, GridPoint};
use image::GrayImage;
use imageproc::contours::{BorderType, find_contours};
use tracing::{debug, info, instrument};

/// The chosen boundary together with how it was chosen.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundarySelection {
    pub contour: Contour,
    /// Enclosed area in square pixels.
    pub area: f64,
    /// `area` divided by the edge map's pixel count.
    pub area_ratio: f64,
    /// Number of external contours that were considered.
    pub candidates: usize,
}

/// Trace every outermost closed curve of the edge map.
///
/// Curves nested inside another curve are skipped, as are traces too short
/// to enclose anything.
pub fn external_contours(edges: &GrayImage) -> Vec<Contour> {
    find_contours::<i32>(edges)
        .into_iter()
        .filter(|c| c.border_type == BorderType::Outer && c.parent.is_none())
        .filter_map(|c| {
            let points = c.points.iter().map(|p| GridPoint::new(p.x, p.y)).collect();
            Contour::new(points)
        })
        .collect()
}

/// Select the largest-area external contour and check that it covers a
/// plausible share of the frame.
///
/// Ties on area keep the contour traced first. Fails with
/// [`PipelineFailure::NoBoundaryFound`] when there are no contours or the
/// winner encloses less than `min_area_ratio` of the frame.
#[instrument(skip_all, fields(width = edges.width(), height = edges.height()))]
pub fn select_boundary(
    edges: &GrayImage,
    config: &BoundaryConfig,
) -> Result<BoundarySelection, PipelineFailure> {
    let frame_area = f64::from(edges.width()) * f64::from(edges.height());
    if frame_area == 0.0 {
        return Err(PipelineFailure::InvalidInput(
            "edge map has no pixels".into(),
        ));
    }

    let contours = external_contours(edges);
    let candidates = contours.len();

    let mut best: Option<(Contour, f64)> = None;
    for contour in contours {
        let area = contour.area();
        match &best {
            Some((_, best_area)) if area <= *best_area => {}
            _ => best = Some((contour, area)),
        }
    }

    let Some((contour, area)) = best else {
        debug!("Edge map has no closed contours");
        return Err(PipelineFailure::NoBoundaryFound);
    };

    let area_ratio = area / frame_area;
    if area_ratio < config.min_area_ratio {
        debug!(
            area,
            area_ratio,
            min_area_ratio = config.min_area_ratio,
            "Largest contour too small"
        );
        return Err(PipelineFailure::NoBoundaryFound);
    }

    info!(
        candidates,
        area,
        area_ratio,
        points = contour.len(),
        "Selected document boundary"
    );

    Ok(BoundarySelection {
        contour,
        area,
        area_ratio,
        candidates,
    })
}
