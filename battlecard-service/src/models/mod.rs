//! Data models for the battlecard service.

pub mod submission;

pub use submission::Submission;
