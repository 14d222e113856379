//! Error types for the coder pipeline.
//!
//! This module provides a single error type covering every failure mode
//! defined for the bit I/O, statistics, arithmetic coder, BWT, RLE, and
//! pipeline stages. Every error is fatal to the current call; callers must
//! reset the codec pair before retrying (see the `reset` methods on
//! `SectionCompressor`/`SectionDecompressor` in the `oxiarc-bwtar` crate).

use thiserror::Error;

/// The main error type for coder operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OxiArcError {
    /// Word size out of the supported range at construction.
    #[error("invalid word size {word_size}: must satisfy 3 <= w <= 16")]
    InvalidWordSize {
        /// The rejected word size.
        word_size: u32,
    },

    /// Section size was zero (or otherwise invalid) at construction.
    #[error("invalid section size {section_size}: must be >= 1")]
    InvalidSectionSize {
        /// The rejected section size.
        section_size: usize,
    },

    /// The encoder's bit writer ran out of output capacity.
    #[error("out of space: output buffer exhausted after {bytes_written} bytes")]
    OutOfSpace {
        /// Number of bytes successfully written before the failure.
        bytes_written: usize,
    },

    /// The decoder's bit reader was asked to read past the end of the buffer.
    #[error("exceeded buffer: bit reader ran past end of {buffer_len}-byte input")]
    ExceededBuffer {
        /// Length of the backing buffer.
        buffer_len: usize,
    },

    /// An RLE decode step saw a symbol outside its expected extended block.
    #[error("symbol {symbol} out of range for this RLE block")]
    SymbolOutOfRange {
        /// The offending symbol.
        symbol: u32,
    },

    /// Generic-RLE decode's first symbol was not a literal byte.
    #[error("invalid first symbol {symbol}: generic RLE decode must start with a literal")]
    InvalidFirstSymbol {
        /// The offending first symbol.
        symbol: u32,
    },

    /// An intermediate expansion would overflow scratch or caller-supplied space.
    #[error("not enough space: needed at least {needed} bytes, had {available}")]
    NotEnoughSpace {
        /// Bytes required to proceed.
        needed: usize,
        /// Bytes actually available.
        available: usize,
    },

    /// BWT inverse input was not longer than its own header.
    #[error("not enough data: input length {len} does not exceed header size {header_len}")]
    NotEnoughData {
        /// Length of the supplied input.
        len: usize,
        /// Size of the BWT index header.
        header_len: usize,
    },

    /// A fully-decoded symbol fell outside the byte range `[0, 255]`.
    #[error("invalid symbol {symbol}: expected a byte value in 0..=255")]
    InvalidSymbol {
        /// The offending symbol.
        symbol: u32,
    },

    /// The arithmetic decoder's cumulative-count walk ran past the vocabulary size.
    #[error("corrupt stream: cumulative lookup exceeded vocabulary size {vocabulary_size}")]
    CorruptStream {
        /// Size of the symbol vocabulary.
        vocabulary_size: u32,
    },

    /// The decoded section exceeded the configured `section_size`.
    #[error("section too large: decoded {decoded_len} bytes, limit is {section_size}")]
    SectionTooLarge {
        /// Number of bytes actually decoded before the limit was hit.
        decoded_len: usize,
        /// The configured section size.
        section_size: usize,
    },
}

/// Result type alias for coder operations.
pub type Result<T> = std::result::Result<T, OxiArcError>;

impl OxiArcError {
    /// Create an invalid word size error.
    pub fn invalid_word_size(word_size: u32) -> Self {
        Self::InvalidWordSize { word_size }
    }

    /// Create an invalid section size error.
    pub fn invalid_section_size(section_size: usize) -> Self {
        Self::InvalidSectionSize { section_size }
    }

    /// Create an out-of-space error.
    pub fn out_of_space(bytes_written: usize) -> Self {
        Self::OutOfSpace { bytes_written }
    }

    /// Create an exceeded-buffer error.
    pub fn exceeded_buffer(buffer_len: usize) -> Self {
        Self::ExceededBuffer { buffer_len }
    }

    /// Create a symbol-out-of-range error.
    pub fn symbol_out_of_range(symbol: u32) -> Self {
        Self::SymbolOutOfRange { symbol }
    }

    /// Create an invalid-first-symbol error.
    pub fn invalid_first_symbol(symbol: u32) -> Self {
        Self::InvalidFirstSymbol { symbol }
    }

    /// Create a not-enough-space error.
    pub fn not_enough_space(needed: usize, available: usize) -> Self {
        Self::NotEnoughSpace { needed, available }
    }

    /// Create a not-enough-data error.
    pub fn not_enough_data(len: usize, header_len: usize) -> Self {
        Self::NotEnoughData { len, header_len }
    }

    /// Create an invalid-symbol error.
    pub fn invalid_symbol(symbol: u32) -> Self {
        Self::InvalidSymbol { symbol }
    }

    /// Create a corrupt-stream error.
    pub fn corrupt_stream(vocabulary_size: u32) -> Self {
        Self::CorruptStream { vocabulary_size }
    }

    /// Create a section-too-large error.
    pub fn section_too_large(decoded_len: usize, section_size: usize) -> Self {
        Self::SectionTooLarge {
            decoded_len,
            section_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = OxiArcError::invalid_word_size(20);
        assert!(err.to_string().contains("invalid word size"));

        let err = OxiArcError::corrupt_stream(273);
        assert!(err.to_string().contains("corrupt stream"));

        let err = OxiArcError::section_too_large(300, 256);
        assert!(err.to_string().contains("section too large"));
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(
            OxiArcError::out_of_space(4),
            OxiArcError::OutOfSpace { bytes_written: 4 }
        );
    }
}
