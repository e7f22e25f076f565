//! Common types shared across sealpack crates.
//!
//! This crate holds the error taxonomy used by every layer, so the crypto
//! engine and the envelope facade report failures with one vocabulary.

pub mod error;

pub use error::{Error, Result};
