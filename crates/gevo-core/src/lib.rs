//! Core types and utilities for the gevo creature simulation.

pub mod angle;
pub mod config;
pub mod error;
pub mod stats;
pub mod types;

pub use angle::normalize_degrees;
pub use config::*;
pub use error::{Error, Result};
pub use stats::*;
pub use types::*;
