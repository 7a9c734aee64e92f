//! service-core: Shared infrastructure for the battlecard HTTP service.
pub mod config;
pub mod error;
pub mod middleware;
pub mod observability;

