//! Core library components.
//!
//! Secret resolution, coercion and validation, plus the settings bootstrap
//! and operational checks built on them.

pub mod audit;
pub mod coerce;
pub mod config;
pub mod constants;
pub mod diagnose;
pub mod dotenv;
pub mod env;
pub mod environment;
pub mod resolver;
pub mod settings;
pub mod types;
pub mod validation;
