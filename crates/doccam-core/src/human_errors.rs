// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages.
//
// Every technical error is mapped to plain English with a clear suggestion
// about how to take a better photo or fix the input.

use crate::error::{DoccamError, PipelineFailure};

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// A different photo will probably work.
    Retake,
    /// User must fix something (wrong file, bad setting).
    ActionRequired,
    /// Cannot be fixed by retrying.
    Permanent,
}

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain English summary.
    pub message: String,
    /// What the user should try.
    pub suggestion: String,
    /// Whether trying again with another photo is worthwhile.
    pub retriable: bool,
    pub severity: Severity,
}

/// Convert a `DoccamError` into a `HumanError`.
pub fn humanize_error(err: &DoccamError) -> HumanError {
    match err {
        DoccamError::Pipeline(failure) => humanize_failure(failure),

        DoccamError::ImageSource(_) => HumanError {
            message: "The photo couldn't be opened.".into(),
            suggestion: "The file may be damaged or in an unusual format. Try saving it as a JPEG or PNG first.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        DoccamError::ImageError(_) => HumanError {
            message: "The scanned page couldn't be saved.".into(),
            suggestion: "Check the output file name ends in .png or .jpg and that there is free disk space.".into(),
            retriable: true,
            severity: Severity::ActionRequired,
        },

        DoccamError::InvalidConfig(detail) => HumanError {
            message: "The scanner settings file has a mistake in it.".into(),
            suggestion: format!("Fix the setting and try again. ({detail})"),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        DoccamError::Io(io_err) => {
            if io_err.kind() == std::io::ErrorKind::NotFound {
                HumanError {
                    message: "The file couldn't be found.".into(),
                    suggestion: "It may have been moved or deleted. Check the path and try again.".into(),
                    retriable: false,
                    severity: Severity::ActionRequired,
                }
            } else if io_err.kind() == std::io::ErrorKind::PermissionDenied {
                HumanError {
                    message: "There is no permission to use that file.".into(),
                    suggestion: "Check the file permissions, or copy the file somewhere else first.".into(),
                    retriable: false,
                    severity: Severity::ActionRequired,
                }
            } else {
                HumanError {
                    message: "There was a problem reading or writing a file.".into(),
                    suggestion: "Try again. If this keeps happening, the disk may be full.".into(),
                    retriable: true,
                    severity: Severity::ActionRequired,
                }
            }
        }

        DoccamError::Serialization(_) => HumanError {
            message: "The scanner settings file couldn't be read.".into(),
            suggestion: "Make sure it is valid JSON.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },
    }
}

/// Map a pipeline failure tag to user-facing text.
pub fn humanize_failure(failure: &PipelineFailure) -> HumanError {
    match failure {
        PipelineFailure::InvalidInput(detail) => HumanError {
            message: "This photo can't be scanned.".into(),
            suggestion: format!("Use a non-empty photo and a positive output width. ({detail})"),
            retriable: false,
            severity: Severity::Permanent,
        },

        PipelineFailure::NoBoundaryFound => HumanError {
            message: "No document was found in this photo.".into(),
            suggestion: "Place the page on a darker, plain surface and fill at least a quarter of the picture with it.".into(),
            retriable: true,
            severity: Severity::Retake,
        },

        PipelineFailure::CannotSimplifyToQuad { last_vertex_count } => HumanError {
            message: "The document's four corners couldn't be found.".into(),
            suggestion: format!(
                "Make sure all four corners are visible and the page lies flat. (Outline had {last_vertex_count} corners.)"
            ),
            retriable: true,
            severity: Severity::Retake,
        },

        PipelineFailure::DegenerateGeometry => HumanError {
            message: "The document's shape couldn't be straightened.".into(),
            suggestion: "Take the photo from more directly above the page.".into(),
            retriable: true,
            severity: Severity::Retake,
        },
    }
}
