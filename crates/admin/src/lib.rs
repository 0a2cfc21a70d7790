//! Back-office admin client.
//!
//! The multi-step entity creation wizard: draft persistence, step
//! navigation, and the submission pipeline, plus the adapters that connect
//! them to local storage and the back-office API.

pub mod application;
pub mod config;
pub mod infrastructure;
pub mod ports;

pub use application::{
    DraftStore, StepChange, SubmissionError, SubmissionStage, SubmitEntity, WizardController,
    WizardSession,
};
pub use config::AdminConfig;
