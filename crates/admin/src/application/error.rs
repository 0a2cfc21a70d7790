//! Submission error types
//!
//! Every failure of the submission pipeline is tagged with the stage it
//! happened in, so the presentation layer can tell the user what to fix and
//! whether anything was already uploaded.

use std::fmt;

use backoffice_domain::{FieldErrors, MediaSlot};
use thiserror::Error;

use crate::ports::outbound::{CreateError, UploadError};

/// Stage of the submission pipeline a failure is attributed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionStage {
    Validation,
    Upload,
    Create,
}

impl fmt::Display for SubmissionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmissionStage::Validation => write!(f, "validation"),
            SubmissionStage::Upload => write!(f, "upload"),
            SubmissionStage::Create => write!(f, "create"),
        }
    }
}

/// Errors that can occur while submitting a wizard draft.
///
/// All variants are recoverable: the draft is left intact for a retry.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SubmissionError {
    /// A required step does not validate against the current draft
    #[error("Step {step} is incomplete ({} invalid field(s))", .errors.len())]
    Validation { step: usize, errors: FieldErrors },

    /// Uploading the file for a media slot failed
    #[error("Uploading the {slot} image failed: {source}")]
    Upload {
        slot: MediaSlot,
        #[source]
        source: UploadError,
    },

    /// The create collaborator refused or never answered
    #[error("Creating the entity failed: {source}")]
    Create {
        #[source]
        source: CreateError,
    },
}

impl SubmissionError {
    pub fn stage(&self) -> SubmissionStage {
        match self {
            SubmissionError::Validation { .. } => SubmissionStage::Validation,
            SubmissionError::Upload { .. } => SubmissionStage::Upload,
            SubmissionError::Create { .. } => SubmissionStage::Create,
        }
    }

    /// Step to reveal for a validation failure
    pub fn failing_step(&self) -> Option<usize> {
        match self {
            SubmissionError::Validation { step, .. } => Some(*step),
            _ => None,
        }
    }
}

impl From<CreateError> for SubmissionError {
    fn from(source: CreateError) -> Self {
        SubmissionError::Create { source }
    }
}
