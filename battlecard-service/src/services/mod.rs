pub mod cleanup;
pub mod error;
pub mod generator;
pub mod naming;
pub mod prompt;
pub mod providers;
pub mod submission_log;

pub use error::BattlecardError;
pub use generator::BattlecardGenerator;
pub use submission_log::{CsvSubmissionLog, SubmissionLog};
