//! Common utilities for optmap.
//!
//! This crate provides the foundational types shared by the optmap crates:
//!
//! - [`BinaryReader`] - Bounds-checked reading from byte slices
//! - [`Error`] - Errors raised when a read runs past the end of its buffer

mod error;
mod reader;

pub use error::{Error, Result};
pub use reader::BinaryReader;
