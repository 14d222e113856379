//! # OxiArc Core
//!
//! Shared low-level building blocks for the OxiArc coder pipeline.
//!
//! This crate provides the two pieces every stage of the pipeline depends
//! on:
//!
//! - [`bitstream`]: MSB-first bit I/O for the arithmetic coder.
//! - [`error`]: the single error type shared by every coder stage.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ L3: Pipeline                                             │
//! │     RLE-specific / RLE-generic / BWT / arithmetic coder │
//! ├─────────────────────────────────────────────────────────┤
//! │ L2: Statistics + tag state (oxiarc-bwtar)                │
//! ├─────────────────────────────────────────────────────────┤
//! │ L1: BitStream (this crate)                                │
//! │     BitReader/BitWriter, error types                    │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use oxiarc_core::bitstream::{BitReader, BitWriter};
//!
//! let mut buf = [0u8; 1];
//! let mut writer = BitWriter::new(&mut buf);
//! writer.write_bit(true).unwrap();
//! writer.write_bit(false).unwrap();
//! let len = writer.finish();
//!
//! let mut reader = BitReader::new(&buf[..len]);
//! assert_eq!(reader.read_bit().unwrap(), true);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod bitstream;
pub mod error;

// Re-exports for convenience
pub use bitstream::{BitReader, BitWriter};
pub use error::{OxiArcError, Result};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bitstream::{BitReader, BitWriter};
    pub use crate::error::{OxiArcError, Result};
}
