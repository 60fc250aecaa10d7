// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scan pipeline — runs the stages in order on one photo and hands back
// either the flattened document or the failure that stopped it.

use doccam_core::config::ScanConfig;
use doccam_core::error::{DoccamError, PipelineFailure, Result};
use doccam_core::Detection;
use image::RgbImage;
use tracing::{debug, info, instrument, warn};

use super::boundary::select_boundary;
use super::canonical::canonicalize;
use super::observer::{NoopObserver, PipelineObserver};
use super::preprocess::preprocess;
use super::rectify::rectify;
use super::simplify::simplify_to_quad;
use crate::source::ImageSource;

/// A detection together with the raster it produced.
#[derive(Debug, Clone)]
pub struct RectifiedDocument {
    pub detection: Detection,
    pub image: RgbImage,
}

/// Finds a document in a photo and warps it into an upright rectangle.
///
/// Holds only configuration; every call is an independent, deterministic
/// run over one image.
#[derive(Debug, Clone, Default)]
pub struct DocumentScanner {
    config: ScanConfig,
}

impl DocumentScanner {
    // -- Construction ---------------------------------------------------------

    /// Accepts any config. An inconsistent one is reported as
    /// `InvalidInput` by every detection; [`DocumentScanner::try_new`]
    /// reports it up front instead.
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    /// Like [`DocumentScanner::new`], but rejects an inconsistent config.
    pub fn try_new(config: ScanConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config))
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    // -- Detection ------------------------------------------------------------

    /// Locate the document's corners without resampling anything.
    pub fn detect(&self, image: &RgbImage) -> std::result::Result<Detection, PipelineFailure> {
        self.detect_observed(image, &mut NoopObserver)
    }

    /// [`DocumentScanner::detect`], reporting each stage to `observer`.
    #[instrument(skip_all, fields(width = image.width(), height = image.height()))]
    pub fn detect_observed(
        &self,
        image: &RgbImage,
        observer: &mut dyn PipelineObserver,
    ) -> std::result::Result<Detection, PipelineFailure> {
        self.run_detection(image, observer).inspect_err(|failure| {
            warn!(%failure, "Document detection failed");
            observer.on_failure(failure);
        })
    }

    fn run_detection(
        &self,
        image: &RgbImage,
        observer: &mut dyn PipelineObserver,
    ) -> std::result::Result<Detection, PipelineFailure> {
        self.config
            .validate()
            .map_err(|err| PipelineFailure::InvalidInput(err.to_string()))?;

        let edges = preprocess(image, &self.config.preprocess)?;
        observer.on_edges(&edges);

        let boundary = select_boundary(&edges, &self.config.boundary)?;
        observer.on_boundary(&boundary.contour, boundary.area_ratio);

        let simplified = simplify_to_quad(&boundary.contour, &self.config.simplify)?;
        observer.on_hull(&simplified.hull);

        let quadrilateral = canonicalize(simplified.quadrilateral.corners);
        observer.on_quadrilateral(&quadrilateral, simplified.tolerance);

        // The output width follows corner 0 → corner 3, which on a tilted
        // page can be the rectangle's height side.
        let aspect_ratio = simplified.oriented_rect.aspect_ratio_along(&quadrilateral);
        if aspect_ratio != simplified.aspect_ratio {
            debug!(
                measured = simplified.aspect_ratio,
                aspect_ratio, "Output width follows the rectangle's height side"
            );
        }

        Ok(Detection {
            quadrilateral,
            aspect_ratio,
            oriented_rect: simplified.oriented_rect,
            tolerance: simplified.tolerance,
            area_ratio: boundary.area_ratio,
            contour_points: boundary.contour.len(),
            hull_points: simplified.hull.len(),
        })
    }

    // -- Rectification --------------------------------------------------------

    /// Warp the region described by an earlier detection.
    pub fn rectify(
        &self,
        image: &RgbImage,
        detection: &Detection,
        dest_width: u32,
    ) -> std::result::Result<RgbImage, PipelineFailure> {
        rectify(
            image,
            &detection.quadrilateral,
            detection.aspect_ratio,
            dest_width,
            &self.config.rectify,
        )
    }

    /// Detect and rectify in one pass.
    pub fn detect_and_rectify(
        &self,
        image: &RgbImage,
        dest_width: u32,
    ) -> std::result::Result<RgbImage, PipelineFailure> {
        self.detect_and_rectify_observed(image, dest_width, &mut NoopObserver)
            .map(|doc| doc.image)
    }

    /// Detect and rectify, reporting each stage to `observer`.
    pub fn detect_and_rectify_observed(
        &self,
        image: &RgbImage,
        dest_width: u32,
        observer: &mut dyn PipelineObserver,
    ) -> std::result::Result<RectifiedDocument, PipelineFailure> {
        // Reject a bad width before spending time on detection.
        if dest_width == 0 {
            let failure = PipelineFailure::InvalidInput("output width must be positive".into());
            observer.on_failure(&failure);
            return Err(failure);
        }

        let detection = self.detect_observed(image, observer)?;
        let rectified = self
            .rectify(image, &detection, dest_width)
            .inspect_err(|failure| observer.on_failure(failure))?;
        observer.on_rectified(&rectified);

        info!(
            width = rectified.width(),
            height = rectified.height(),
            tolerance = detection.tolerance,
            "Document scanned"
        );
        Ok(RectifiedDocument {
            detection,
            image: rectified,
        })
    }

    // -- Sources --------------------------------------------------------------

    /// Fetch a photo from `source` and scan it. `dest_width` falls back to
    /// the configured default.
    pub fn scan_source(
        &self,
        source: &dyn ImageSource,
        dest_width: Option<u32>,
        observer: &mut dyn PipelineObserver,
    ) -> Result<RectifiedDocument> {
        let image = source.get_image()?;
        let width = dest_width.unwrap_or(self.config.default_dest_width);
        self.detect_and_rectify_observed(&image, width, observer)
            .map_err(DoccamError::from)
    }
}

/// Find the document in `image` and warp it to `dest_width` pixels wide
/// using the default configuration.
pub fn detect_and_rectify(
    image: &RgbImage,
    dest_width: u32,
) -> std::result::Result<RgbImage, PipelineFailure> {
    DocumentScanner::default().detect_and_rectify(image, dest_width)
}

// -- Tests --------------------------------------------------------------------
