//! # Formats Module
//!
//! Serialization formats for classifier model artifacts.
//!
//! This module contains:
//! - JSON artifact format (what training scripts emit)
//! - Binary artifact format (magic header + postcard payload)
//!
//! Every loader validates the decoded model before returning it.

mod model_file;

pub use model_file::*;
