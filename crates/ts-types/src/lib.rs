//! Shared types and error taxonomy for TuneScout

pub mod errors;

pub use errors::{AppError, AppResult};
