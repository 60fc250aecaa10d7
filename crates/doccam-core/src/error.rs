// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for doccam.

use thiserror::Error;

/// Why a detection-and-rectification run produced no output.
///
/// Every pipeline stage returns one of these tags instead of a degraded
/// result; the run aborts at the first failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineFailure {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("document not found")]
    NoBoundaryFound,

    #[error("could not reduce boundary to 4 corners (last attempt had {last_vertex_count} vertices)")]
    CannotSimplifyToQuad { last_vertex_count: usize },

    #[error("document corners are degenerate (collinear or non-invertible mapping)")]
    DegenerateGeometry,
}

/// Top-level error type for all doccam operations.
#[derive(Debug, Error)]
pub enum DoccamError {
    #[error(transparent)]
    Pipeline(#[from] PipelineFailure),

    // -- Image I/O --
    #[error("image source failed: {0}")]
    ImageSource(String),

    #[error("image processing failed: {0}")]
    ImageError(String),

    // -- Configuration --
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, DoccamError>;
