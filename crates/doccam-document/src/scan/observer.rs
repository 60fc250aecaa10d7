// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pipeline observers — optional hooks invoked between scan stages.

use doccam_core::error::PipelineFailure;
use doccam_core::{Contour, Quadrilateral};
use image::{GrayImage, RgbImage};
use tracing::debug;

/// Receives each intermediate result as the pipeline produces it.
///
/// Every method defaults to doing nothing. Observers cannot influence the
/// run; they only see it.
pub trait PipelineObserver {
    /// Binary edge map out of preprocessing.
    fn on_edges(&mut self, _edges: &GrayImage) {}

    /// Chosen boundary contour and the share of the frame it encloses.
    fn on_boundary(&mut self, _contour: &Contour, _area_ratio: f64) {}

    /// Convex hull of the boundary.
    fn on_hull(&mut self, _hull: &Contour) {}

    /// Canonically ordered corners and the tolerance that produced them.
    fn on_quadrilateral(&mut self, _quad: &Quadrilateral, _tolerance: u32) {}

    /// Final rectified raster.
    fn on_rectified(&mut self, _image: &RgbImage) {}

    /// The stage failure that ended the run.
    fn on_failure(&mut self, _failure: &PipelineFailure) {}
}

/// Ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {}

/// Logs every hook at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl PipelineObserver for TracingObserver {
    fn on_edges(&mut self, edges: &GrayImage) {
        let edge_pixels = edges.pixels().filter(|p| p.0[0] > 0).count();
        debug!(
            width = edges.width(),
            height = edges.height(),
            edge_pixels,
            "observer: edges"
        );
    }

    fn on_boundary(&mut self, contour: &Contour, area_ratio: f64) {
        debug!(points = contour.len(), area_ratio, "observer: boundary");
    }

    fn on_hull(&mut self, hull: &Contour) {
        debug!(points = hull.len(), "observer: hull");
    }

    fn on_quadrilateral(&mut self, quad: &Quadrilateral, tolerance: u32) {
        debug!(corners = ?quad.corners, tolerance, "observer: quadrilateral");
    }

    fn on_rectified(&mut self, image: &RgbImage) {
        debug!(
            width = image.width(),
            height = image.height(),
            "observer: rectified"
        );
    }

    fn on_failure(&mut self, failure: &PipelineFailure) {
        debug!(%failure, "observer: failure");
    }
}
