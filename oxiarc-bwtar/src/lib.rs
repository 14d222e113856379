//! # OxiArc BWT+AR
//!
//! A lossless byte-stream compressor/decompressor built from a Burrows–
//! Wheeler transform, two layers of run-length coding, and an adaptive
//! finite-precision arithmetic coder.
//!
//! Each call compresses or decompresses one bounded "section" at a time;
//! there is no outer container format. Encoder and decoder must be
//! constructed with identical [`params::CoderParams`] and reset in lockstep
//! (see [`pipeline::SectionCompressor::reset`] /
//! [`pipeline::SectionDecompressor::reset`]), since the arithmetic coder's
//! statistics are adaptive.
//!
//! ## Pipeline
//!
//! ```text
//! raw bytes
//!   -> RLE-specific (symbol 1, optional)
//!   -> BWT forward (prepends original-row index)
//!   -> RLE-specific (symbol 2, optional)
//!   -> RLE-generic
//!   -> append termination symbol 256
//!   -> adaptive arithmetic encode
//!   -> compressed bytes
//! ```
//!
//! Decoding runs every stage in reverse.
//!
//! ## Example
//!
//! ```
//! use oxiarc_bwtar::{CoderParams, SectionCompressor, SectionDecompressor};
//!
//! let params = CoderParams::new(2048, 0x00, 5, 0x00, 0, 15, 16).unwrap();
//! let mut compressor = SectionCompressor::new(params).unwrap();
//! let mut decompressor = SectionDecompressor::new(params).unwrap();
//!
//! let input = b"hello, hello, hello, world!";
//! let mut compressed = vec![0u8; 2048];
//! let clen = compressor.compress(input, &mut compressed, true).unwrap();
//!
//! let mut output = vec![0u8; 2048];
//! let dlen = decompressor.decompress(&compressed[..clen], &mut output).unwrap();
//! assert_eq!(&output[..dlen], &input[..]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod arith;
pub mod bwt;
pub mod params;
pub mod pipeline;
pub mod rle_generic;
pub mod rle_specific;
pub mod stats;

pub use params::{CoderParams, TERMINATION_SYMBOL};
pub use pipeline::{SectionCompressor, SectionDecompressor};

pub use oxiarc_core::error::{OxiArcError, Result};
