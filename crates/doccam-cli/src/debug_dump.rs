// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Debug dumps — writes each intermediate pipeline result as a PNG so a
// failed or odd detection can be inspected after the fact.

use std::path::{Path, PathBuf};

use doccam_core::{Contour, GridPoint, Quadrilateral};
use doccam_document::PipelineObserver;
use doccam_document::image::save_rgb;
use image::{DynamicImage, GrayImage, Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut};
use tracing::{debug, warn};

const BOUNDARY_COLOUR: Rgb<u8> = Rgb([0, 200, 0]);
const HULL_COLOUR: Rgb<u8> = Rgb([0, 120, 255]);
const QUAD_COLOUR: Rgb<u8> = Rgb([255, 40, 40]);

/// Pipeline observer that saves `edges.png`, `boundary.png`, `hull.png` and
/// `quadrilateral.png` into a directory.
///
/// Overlays are drawn on top of the edge map. Write failures are logged and
/// otherwise ignored; they never affect the scan itself.
pub struct DebugDumpObserver {
    dir: PathBuf,
    canvas: Option<RgbImage>,
    written: Vec<PathBuf>,
}

impl DebugDumpObserver {
    /// Create the dump directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> std::io::Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            canvas: None,
            written: Vec::new(),
        })
    }

    /// Files written so far, in order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn save(&mut self, name: &str, image: &RgbImage) {
        let path = self.dir.join(name);
        match save_rgb(image, &path) {
            Ok(()) => {
                debug!(path = %path.display(), "Wrote debug image");
                self.written.push(path);
            }
            Err(err) => warn!(path = %path.display(), %err, "Could not write debug image"),
        }
    }

    fn overlay(&mut self, name: &str, points: &[GridPoint], colour: Rgb<u8>) {
        let Some(canvas) = &self.canvas else {
            return;
        };
        let mut image = canvas.clone();
        draw_closed_polyline(&mut image, points, colour);
        self.save(name, &image);
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl PipelineObserver for DebugDumpObserver {
    fn on_edges(&mut self, edges: &GrayImage) {
        let canvas = DynamicImage::ImageLuma8(edges.clone()).to_rgb8();
        self.save("edges.png", &canvas);
        self.canvas = Some(canvas);
    }

    fn on_boundary(&mut self, contour: &Contour, _area_ratio: f64) {
        self.overlay("boundary.png", contour.points(), BOUNDARY_COLOUR);
    }

    fn on_hull(&mut self, hull: &Contour) {
        self.overlay("hull.png", hull.points(), HULL_COLOUR);
    }

    fn on_quadrilateral(&mut self, quad: &Quadrilateral, _tolerance: u32) {
        let Some(canvas) = &self.canvas else {
            return;
        };
        let mut image = canvas.clone();
        draw_closed_polyline(&mut image, &quad.corners, QUAD_COLOUR);
        // Mark the first corner so the ordering is visible.
        let first = quad.corners[0];
        draw_filled_circle_mut(&mut image, (first.x, first.y), 6, QUAD_COLOUR);
        self.save("quadrilateral.png", &image);
    }
}

fn draw_closed_polyline(image: &mut RgbImage, points: &[GridPoint], colour: Rgb<u8>) {
    for (i, a) in points.iter().enumerate() {
        let b = points[(i + 1) % points.len()];
        draw_line_segment_mut(
            image,
            (a.x as f32, a.y as f32),
            (b.x as f32, b.y as f32),
            colour,
        );
    }
}
