//! Construction parameters shared by the compressor and its matching decompressor.

use oxiarc_core::error::{OxiArcError, Result};

/// The termination symbol appended to every section before arithmetic coding.
pub const TERMINATION_SYMBOL: u32 = 256;

/// Base index of the byte/termination vocabulary, before any RLE extension blocks.
pub const BASE_VOCABULARY_SIZE: u32 = 257;

/// Construction parameters for the coder pipeline.
///
/// Both the compressor and the matching decompressor must be constructed
/// with identical parameters; nothing about agreement is negotiated on the
/// wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoderParams {
    section_size: usize,
    special_symbol1: u8,
    special_symbol1_max_run: u32,
    special_symbol2: u8,
    special_symbol2_max_run: u32,
    generic_max_run: u32,
    word_size: u32,
    bwt_store_bytes: usize,
}

impl CoderParams {
    /// Construct a new parameter set, validating `section_size` and `word_size`.
    ///
    /// `special_symbol*_max_run` of `0` disables that RLE-specific layer.
    /// `generic_max_run <= 1` disables generic RLE.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        section_size: usize,
        special_symbol1: u8,
        special_symbol1_max_run: u32,
        special_symbol2: u8,
        special_symbol2_max_run: u32,
        generic_max_run: u32,
        word_size: u32,
    ) -> Result<Self> {
        if section_size < 1 {
            return Err(OxiArcError::invalid_section_size(section_size));
        }
        if !(3..=16).contains(&word_size) {
            return Err(OxiArcError::invalid_word_size(word_size));
        }
        Ok(Self {
            section_size,
            special_symbol1,
            special_symbol1_max_run,
            special_symbol2,
            special_symbol2_max_run,
            generic_max_run,
            word_size,
            bwt_store_bytes: min_bytes_to_represent(section_size),
        })
    }

    /// Maximum number of raw bytes accepted per call.
    pub fn section_size(&self) -> usize {
        self.section_size
    }

    /// The byte value targeted by RLE-specific layer 1.
    pub fn special_symbol1(&self) -> u8 {
        self.special_symbol1
    }

    /// Extended-symbol block size for RLE-specific layer 1 (`0` disables it).
    pub fn special_symbol1_max_run(&self) -> u32 {
        self.special_symbol1_max_run
    }

    /// The byte value targeted by RLE-specific layer 2.
    pub fn special_symbol2(&self) -> u8 {
        self.special_symbol2
    }

    /// Extended-symbol block size for RLE-specific layer 2 (`0` disables it).
    pub fn special_symbol2_max_run(&self) -> u32 {
        self.special_symbol2_max_run
    }

    /// Extended-symbol block size for generic RLE (`<= 1` disables it).
    pub fn generic_max_run(&self) -> u32 {
        self.generic_max_run
    }

    /// Arithmetic coder precision, in bits.
    pub fn word_size(&self) -> u32 {
        self.word_size
    }

    /// Number of little-endian bytes used to store the BWT original-row index.
    pub fn bwt_store_bytes(&self) -> usize {
        self.bwt_store_bytes
    }

    /// Base symbol of the RLE-specific-1 extension block.
    pub fn s1_base(&self) -> u32 {
        BASE_VOCABULARY_SIZE
    }

    /// Base symbol of the RLE-specific-2 extension block.
    pub fn s2_base(&self) -> u32 {
        self.s1_base() + self.special_symbol1_max_run
    }

    /// Base symbol of the generic-RLE extension block.
    pub fn generic_base(&self) -> u32 {
        self.s2_base() + self.special_symbol2_max_run
    }

    /// Total vocabulary size `V = 257 + s1Max + s2Max + genericMaxRun`.
    pub fn vocabulary_size(&self) -> u32 {
        self.generic_base() + self.generic_max_run
    }

    /// Largest size a scratch buffer must accommodate: `section_size + bwt_store_bytes`.
    pub fn scratch_capacity(&self) -> usize {
        self.section_size + self.bwt_store_bytes
    }
}

/// `⌈log256(max_value)⌉`, the minimum number of bytes needed to represent
/// any value in `0..max_value`. Mirrors the BWT header sizing rule in the
/// companion pipeline.
fn min_bytes_to_represent(max_value: usize) -> usize {
    let mut bytes = 1usize;
    let mut limit = 256usize;
    while max_value > limit {
        bytes += 1;
        limit = limit.saturating_mul(256);
    }
    bytes
}
