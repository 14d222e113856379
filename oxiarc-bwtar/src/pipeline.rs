//! End-to-end section pipeline: RLE-specific → BWT → RLE-specific → RLE-generic
//! → termination → arithmetic coding, and its exact inverse.

use oxiarc_core::bitstream::{BitReader, BitWriter};
use oxiarc_core::error::{OxiArcError, Result};

use crate::arith::{ArithmeticDecoder, ArithmeticEncoder};
use crate::params::{CoderParams, TERMINATION_SYMBOL};
use crate::{bwt, rle_generic, rle_specific};

/// Compresses one section at a time under a fixed [`CoderParams`].
///
/// Owns its arithmetic-coder statistics and two scratch buffers, both
/// reused across calls. A failure leaves the coder state undefined; call
/// [`Self::reset`] before reusing the instance.
pub struct SectionCompressor {
    params: CoderParams,
    coder: ArithmeticEncoder,
    scratch_a: Vec<u32>,
    scratch_b: Vec<u32>,
}

impl SectionCompressor {
    /// Build a compressor for the given parameters.
    pub fn new(params: CoderParams) -> Result<Self> {
        let coder = ArithmeticEncoder::new(params.vocabulary_size(), params.word_size())?;
        let cap = params.scratch_capacity();
        Ok(Self {
            params,
            coder,
            scratch_a: Vec::with_capacity(cap),
            scratch_b: Vec::with_capacity(cap),
        })
    }

    /// Reset the arithmetic coder's statistics, interval, and `e3_pending`.
    /// Must be called in lockstep with the matching decompressor's reset.
    pub fn reset(&mut self) {
        self.coder.reset();
    }

    /// Compress `input` (length `<= section_size`) into `output`, returning
    /// the number of bytes written. `last_block` controls whether the
    /// multi-block "don't-care" padding symbol is emitted (see
    /// [`crate::arith::ArithmeticEncoder::finish`]).
    pub fn compress(&mut self, input: &[u8], output: &mut [u8], last_block: bool) -> Result<usize> {
        let p = self.params;
        if input.len() > p.section_size() {
            return Err(OxiArcError::section_too_large(input.len(), p.section_size()));
        }

        self.scratch_a.clear();
        self.scratch_a.extend(input.iter().map(|&b| b as u32));

        if p.special_symbol1_max_run() > 1 {
            let encoded = rle_specific::encode(
                &self.scratch_a,
                p.special_symbol1() as u32,
                p.s1_base(),
                p.special_symbol1_max_run(),
            );
            check_capacity(encoded.len(), p.scratch_capacity())?;
            self.scratch_b.clear();
            self.scratch_b.extend(encoded);
            std::mem::swap(&mut self.scratch_a, &mut self.scratch_b);
        }

        let transformed = bwt::forward(&self.scratch_a, p.bwt_store_bytes());
        check_capacity(transformed.len(), p.scratch_capacity())?;
        self.scratch_b.clear();
        self.scratch_b.extend(transformed);
        std::mem::swap(&mut self.scratch_a, &mut self.scratch_b);

        if p.special_symbol2_max_run() > 1 {
            let encoded = rle_specific::encode(
                &self.scratch_a,
                p.special_symbol2() as u32,
                p.s2_base(),
                p.special_symbol2_max_run(),
            );
            check_capacity(encoded.len(), p.scratch_capacity())?;
            self.scratch_b.clear();
            self.scratch_b.extend(encoded);
            std::mem::swap(&mut self.scratch_a, &mut self.scratch_b);
        }

        if p.generic_max_run() > 1 {
            let encoded = rle_generic::encode(&self.scratch_a, p.generic_base(), p.generic_max_run());
            check_capacity(encoded.len(), p.scratch_capacity())?;
            self.scratch_b.clear();
            self.scratch_b.extend(encoded);
            std::mem::swap(&mut self.scratch_a, &mut self.scratch_b);
        }

        self.scratch_a.push(TERMINATION_SYMBOL);

        let mut writer = BitWriter::new(output);
        for &s in &self.scratch_a {
            self.coder.encode_symbol(s, &mut writer)?;
        }
        self.coder.finish(&mut writer, last_block)?;
        Ok(writer.finish())
    }
}

/// Decompresses one section at a time under a fixed [`CoderParams`].
pub struct SectionDecompressor {
    params: CoderParams,
    coder: ArithmeticDecoder,
    scratch_a: Vec<u32>,
    scratch_b: Vec<u32>,
}

impl SectionDecompressor {
    /// Build a decompressor for the given parameters. Must match the
    /// compressor's parameters exactly.
    pub fn new(params: CoderParams) -> Result<Self> {
        let coder = ArithmeticDecoder::new(params.vocabulary_size(), params.word_size())?;
        let cap = params.scratch_capacity();
        Ok(Self {
            params,
            coder,
            scratch_a: Vec::with_capacity(cap),
            scratch_b: Vec::with_capacity(cap),
        })
    }

    /// Reset the arithmetic coder's statistics and interval. Must be called
    /// in lockstep with the matching compressor's reset.
    pub fn reset(&mut self) {
        self.coder.reset();
    }

    /// Decompress `input` into `output`, returning the number of bytes
    /// written.
    pub fn decompress(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize> {
        let p = self.params;
        let cap = p.scratch_capacity();

        let mut reader = BitReader::new(input);
        self.coder.init(&mut reader)?;

        self.scratch_a.clear();
        loop {
            let s = self.coder.decode_symbol(&mut reader)?;
            if s == TERMINATION_SYMBOL {
                break;
            }
            if self.scratch_a.len() >= cap {
                return Err(OxiArcError::not_enough_space(self.scratch_a.len() + 1, cap));
            }
            self.scratch_a.push(s);
        }

        if p.generic_max_run() > 1 {
            let decoded = rle_generic::decode(&self.scratch_a, p.generic_base(), p.generic_max_run())?;
            check_capacity(decoded.len(), cap)?;
            self.scratch_b.clear();
            self.scratch_b.extend(decoded);
            std::mem::swap(&mut self.scratch_a, &mut self.scratch_b);
        }

        if p.special_symbol2_max_run() > 1 {
            let decoded = rle_specific::decode(
                &self.scratch_a,
                p.special_symbol2() as u32,
                p.s2_base(),
                p.special_symbol2_max_run(),
            )?;
            check_capacity(decoded.len(), cap)?;
            self.scratch_b.clear();
            self.scratch_b.extend(decoded);
            std::mem::swap(&mut self.scratch_a, &mut self.scratch_b);
        }

        let restored = bwt::inverse(&self.scratch_a, p.bwt_store_bytes(), p.vocabulary_size())?;
        check_capacity(restored.len(), p.section_size())?;
        self.scratch_b.clear();
        self.scratch_b.extend(restored);
        std::mem::swap(&mut self.scratch_a, &mut self.scratch_b);

        if p.special_symbol1_max_run() > 1 {
            let decoded = rle_specific::decode(
                &self.scratch_a,
                p.special_symbol1() as u32,
                p.s1_base(),
                p.special_symbol1_max_run(),
            )?;
            self.scratch_b.clear();
            self.scratch_b.extend(decoded);
            std::mem::swap(&mut self.scratch_a, &mut self.scratch_b);
        }

        if self.scratch_a.len() > p.section_size() {
            return Err(OxiArcError::section_too_large(
                self.scratch_a.len(),
                p.section_size(),
            ));
        }
        if self.scratch_a.len() > output.len() {
            return Err(OxiArcError::not_enough_space(
                self.scratch_a.len(),
                output.len(),
            ));
        }

        for (i, &s) in self.scratch_a.iter().enumerate() {
            if s > 255 {
                return Err(OxiArcError::invalid_symbol(s));
            }
            output[i] = s as u8;
        }
        Ok(self.scratch_a.len())
    }
}

fn check_capacity(len: usize, cap: usize) -> Result<()> {
    if len > cap {
        return Err(OxiArcError::not_enough_space(len, cap));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(section_size: usize) -> CoderParams {
        CoderParams::new(section_size, 0, 5, 0, 0, 15, 16).unwrap()
    }

    #[test]
    fn test_roundtrip_single_byte() {
        let p = params(2048);
        let mut enc = SectionCompressor::new(p).unwrap();
        let mut dec = SectionDecompressor::new(p).unwrap();
        let input = [42u8];
        let mut compressed = vec![0u8; 64];
        let clen = enc.compress(&input, &mut compressed, true).unwrap();
        let mut output = vec![0u8; 2048];
        let dlen = dec.decompress(&compressed[..clen], &mut output).unwrap();
        assert_eq!(&output[..dlen], &input[..]);
    }

    #[test]
    fn test_roundtrip_all_bytes_equal() {
        let p = params(2048);
        let mut enc = SectionCompressor::new(p).unwrap();
        let mut dec = SectionDecompressor::new(p).unwrap();
        let input = vec![0xABu8; 500];
        let mut compressed = vec![0u8; 2048];
        let clen = enc.compress(&input, &mut compressed, true).unwrap();
        let mut output = vec![0u8; 2048];
        let dlen = dec.decompress(&compressed[..clen], &mut output).unwrap();
        assert_eq!(&output[..dlen], &input[..]);
        assert!(clen < input.len());
    }

    #[test]
    fn test_roundtrip_all_bytes_distinct() {
        let p = params(256);
        let mut enc = SectionCompressor::new(p).unwrap();
        let mut dec = SectionDecompressor::new(p).unwrap();
        let input: Vec<u8> = (0..=255u8).collect();
        let mut compressed = vec![0u8; 2048];
        let clen = enc.compress(&input, &mut compressed, true).unwrap();
        let mut output = vec![0u8; 256];
        let dlen = dec.decompress(&compressed[..clen], &mut output).unwrap();
        assert_eq!(&output[..dlen], &input[..]);
    }

    #[test]
    fn test_roundtrip_arbitrary_text() {
        let p = params(2048);
        let mut enc = SectionCompressor::new(p).unwrap();
        let mut dec = SectionDecompressor::new(p).unwrap();
        let input = b"the quick brown fox jumps over the lazy dog, again and again and again";
        let mut compressed = vec![0u8; 2048];
        let clen = enc.compress(input, &mut compressed, true).unwrap();
        let mut output = vec![0u8; 2048];
        let dlen = dec.decompress(&compressed[..clen], &mut output).unwrap();
        assert_eq!(&output[..dlen], &input[..]);
    }

    #[test]
    fn test_section_too_large_rejected() {
        let p = params(4);
        let mut enc = SectionCompressor::new(p).unwrap();
        let input = [1u8, 2, 3, 4, 5];
        let mut compressed = vec![0u8; 64];
        let err = enc.compress(&input, &mut compressed, true).unwrap_err();
        assert!(matches!(err, OxiArcError::SectionTooLarge { .. }));
    }

    #[test]
    fn test_multi_block_continuation() {
        let p = params(64);
        let mut enc = SectionCompressor::new(p).unwrap();
        let mut dec = SectionDecompressor::new(p).unwrap();
        let blocks: [&[u8]; 3] = [b"first block data", b"second block data", b"third, final"];

        let mut decoded_all = Vec::new();
        for (i, block) in blocks.iter().enumerate() {
            let last = i == blocks.len() - 1;
            let mut compressed = vec![0u8; 256];
            let clen = enc.compress(block, &mut compressed, last).unwrap();
            enc.reset();

            let mut output = vec![0u8; 64];
            let dlen = dec.decompress(&compressed[..clen], &mut output).unwrap();
            dec.reset();
            decoded_all.extend_from_slice(&output[..dlen]);
        }

        let expected: Vec<u8> = blocks.concat();
        assert_eq!(decoded_all, expected);
    }

    #[test]
    fn test_degenerate_generic_only_mode() {
        // s1Max = s2Max = 0, only generic RLE active.
        let p = CoderParams::new(256, 0, 0, 0, 0, 8, 12).unwrap();
        let mut enc = SectionCompressor::new(p).unwrap();
        let mut dec = SectionDecompressor::new(p).unwrap();
        let input = b"aaaaaaaaaabbbbbbbbbbccccccccccdddddddddd";
        let mut compressed = vec![0u8; 256];
        let clen = enc.compress(input, &mut compressed, true).unwrap();
        let mut output = vec![0u8; 256];
        let dlen = dec.decompress(&compressed[..clen], &mut output).unwrap();
        assert_eq!(&output[..dlen], &input[..]);
    }
}
