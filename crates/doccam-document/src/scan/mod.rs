// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scanning pipeline — edge preprocessing, boundary selection, quadrilateral
// simplification, corner ordering and perspective rectification.
//
// Each stage consumes only the previous stage's output and either succeeds
// or returns a `PipelineFailure`; nothing is retried or partially produced.

pub mod boundary;
pub mod canonical;
pub mod observer;
pub mod pipeline;
pub mod preprocess;
pub mod rectify;
pub mod simplify;

#[cfg(test)]
pub(crate) mod fixtures;

pub use boundary::{BoundarySelection, select_boundary};
pub use canonical::{canonicalize, counter_clockwise};
pub use pipeline::{DocumentScanner, RectifiedDocument};
pub use preprocess::preprocess;
pub use rectify::{perspective_projection, rectify};
pub use simplify::{SimplifiedQuad, simplify_to_quad};
