//! # factlens Library
//!
//! This library exposes the factlens application modules for testing and
//! integration.
//!
//! The main binary uses these modules through the `main.rs` entry point.

pub mod analyzer;
pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod lookup;
pub mod search;

// Re-export factlens_core for convenience
pub use factlens_core;
