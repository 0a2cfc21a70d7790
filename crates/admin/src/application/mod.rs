//! Application layer - the wizard engine
//!
//! `WizardSession` is the entry point for the presentation layer; the pieces
//! it is built from are public for callers that drive them directly.

pub mod draft_store;
pub mod error;
pub mod session;
pub mod submission;
pub mod wizard_controller;

pub use draft_store::{DraftStore, DRAFT_FORMAT_VERSION};
pub use error::{SubmissionError, SubmissionStage};
pub use session::WizardSession;
pub use submission::SubmitEntity;
pub use wizard_controller::{StepChange, WizardController};
