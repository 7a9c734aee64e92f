pub mod config;
pub mod dtos;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;

pub use startup::{build_router, build_state, AppState, Application};
