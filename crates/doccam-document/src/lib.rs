// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// doccam-document — Document detection and rectification.
//
// Provides image sources (file, encoded bytes, in-memory raster), PNG/JPEG
// codec helpers, raster fingerprinting, and the scan pipeline that finds a
// document's four corners in a photo and warps it flat.

pub mod image;
pub mod integrity;
pub mod scan;
pub mod source;

// Re-export the primary entry points so callers can use `doccam_document::DocumentScanner` etc.
pub use scan::observer::{NoopObserver, PipelineObserver, TracingObserver};
pub use scan::pipeline::{DocumentScanner, RectifiedDocument, detect_and_rectify};
pub use source::{BytesImageSource, FileImageSource, ImageSource, MemoryImageSource};
