pub mod battlecard;
pub mod health;

pub use battlecard::generate_battlecard;
pub use health::{health_check, readiness_check};
