pub mod battlecard;

pub use battlecard::{GenerateBattlecardRequest, GenerateBattlecardResponse};
