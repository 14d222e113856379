//! Adaptive finite-precision arithmetic coder.
//!
//! Implements the tag-interval narrowing, E1/E2/E3 renormalization, and
//! termination described for the core coder: a `w`-bit `[low, high]`
//! interval narrowed per symbol against a [`StatsTable`], with deferred
//! middle-straddle bit emission tracked by `e3_pending`.

use oxiarc_core::bitstream::{BitReader, BitWriter};
use oxiarc_core::error::{OxiArcError, Result};

use crate::stats::StatsTable;

/// Narrow `[low, high]` to the sub-interval for a symbol with cumulative
/// bounds `[cum_lo, cum_hi)` out of `total`. Pure function shared by the
/// encoder's real and "don't-care" padding narrowing.
fn narrow(low: u32, high: u32, total: u32, cum_lo: u32, cum_hi: u32) -> (u32, u32) {
    let range = (high - low) as u64 + 1;
    let total = total as u64;
    let new_low = low + ((range * cum_lo as u64) / total) as u32;
    let new_high = low + ((range * cum_hi as u64) / total) as u32 - 1;
    (new_low, new_high)
}

/// Renormalize `(low, high, e3)` in place, writing emitted bits to `writer`.
/// Shared between the encoder's real interval and its side-effect-free
/// "don't-care" padding copy — the caller decides whether the mutated
/// `(low, high, e3)` are kept or discarded.
fn renormalize_encode(
    low: &mut u32,
    high: &mut u32,
    e3: &mut u32,
    word_mask: u32,
    msb_mask: u32,
    second_msb_mask: u32,
    writer: &mut BitWriter,
) -> Result<()> {
    loop {
        if (*low & msb_mask) == (*high & msb_mask) {
            let b = (*low & msb_mask) != 0;
            writer.write_bit(b)?;
            while *e3 > 0 {
                writer.write_bit(!b)?;
                *e3 -= 1;
            }
            *low = (*low << 1) & word_mask;
            *high = ((*high << 1) | 1) & word_mask;
        } else if (*low & second_msb_mask != 0) && (*high & second_msb_mask == 0) {
            *low = ((*low << 1) & word_mask) ^ msb_mask;
            *high = (((*high << 1) | 1) & word_mask) ^ msb_mask;
            *e3 += 1;
        } else {
            break;
        }
    }
    Ok(())
}

fn masks(word_size: u32) -> (u32, u32, u32) {
    let word_mask = (1u32 << word_size) - 1;
    let msb_mask = 1u32 << (word_size - 1);
    let second_msb_mask = 1u32 << (word_size - 2);
    (word_mask, msb_mask, second_msb_mask)
}

/// Adaptive arithmetic encoder over a `w`-bit tag interval.
#[derive(Debug, Clone)]
pub struct ArithmeticEncoder {
    word_size: u32,
    word_mask: u32,
    msb_mask: u32,
    second_msb_mask: u32,
    low: u32,
    high: u32,
    e3_pending: u32,
    stats: StatsTable,
}

impl ArithmeticEncoder {
    /// Build an encoder for a `vocabulary_size`-symbol alphabet at `word_size`
    /// bits of precision.
    pub fn new(vocabulary_size: u32, word_size: u32) -> Result<Self> {
        if !(3..=16).contains(&word_size) {
            return Err(OxiArcError::invalid_word_size(word_size));
        }
        let (word_mask, msb_mask, second_msb_mask) = masks(word_size);
        Ok(Self {
            word_size,
            word_mask,
            msb_mask,
            second_msb_mask,
            low: 0,
            high: word_mask,
            e3_pending: 0,
            stats: StatsTable::new(vocabulary_size, word_size),
        })
    }

    /// Reset statistics, interval, and pending E3 count to their initial values.
    pub fn reset(&mut self) {
        self.low = 0;
        self.high = self.word_mask;
        self.e3_pending = 0;
        self.stats.reset();
    }

    /// Encode one symbol, narrowing the interval, updating statistics, and
    /// renormalizing (emitting any resulting bits to `writer`).
    pub fn encode_symbol(&mut self, s: u32, writer: &mut BitWriter) -> Result<()> {
        let cum_hi = self.stats.cum(s);
        let cum_lo = cum_hi - self.stats.count(s);
        let total = self.stats.total();
        let (new_low, new_high) = narrow(self.low, self.high, total, cum_lo, cum_hi);
        self.low = new_low;
        self.high = new_high;
        self.stats.increment(s);
        renormalize_encode(
            &mut self.low,
            &mut self.high,
            &mut self.e3_pending,
            self.word_mask,
            self.msb_mask,
            self.second_msb_mask,
            writer,
        )
    }

    /// Finalize the section.
    ///
    /// When `last_block` is `true`, flushes the `w` bits of the real `low`
    /// (plus any pending E3 bits). When `false`, first narrows a copy of the
    /// interval against the "don't-care" symbol `0` *without* touching
    /// statistics, renormalizes that copy (its bits are still emitted for
    /// real), and flushes the copy's resulting `low` instead — this lets a
    /// following independent block's tag reload start on a byte boundary.
    pub fn finish(&mut self, writer: &mut BitWriter, last_block: bool) -> Result<()> {
        let (low, mut e3) = if last_block {
            (self.low, self.e3_pending)
        } else {
            let cum_hi = self.stats.cum(0);
            let cum_lo = cum_hi - self.stats.count(0);
            let total = self.stats.total();
            let (mut pad_low, mut pad_high) = narrow(self.low, self.high, total, cum_lo, cum_hi);
            let mut pad_e3 = self.e3_pending;
            renormalize_encode(
                &mut pad_low,
                &mut pad_high,
                &mut pad_e3,
                self.word_mask,
                self.msb_mask,
                self.second_msb_mask,
                writer,
            )?;
            (pad_low, pad_e3)
        };
        for i in (0..self.word_size).rev() {
            let bit = ((low >> i) & 1) != 0;
            writer.write_bit(bit)?;
            while e3 > 0 {
                writer.write_bit(!bit)?;
                e3 -= 1;
            }
        }
        Ok(())
    }
}

/// Adaptive arithmetic decoder, the mirror image of [`ArithmeticEncoder`].
#[derive(Debug, Clone)]
pub struct ArithmeticDecoder {
    word_size: u32,
    word_mask: u32,
    msb_mask: u32,
    second_msb_mask: u32,
    low: u32,
    high: u32,
    tag: u32,
    stats: StatsTable,
}

impl ArithmeticDecoder {
    /// Build a decoder for a `vocabulary_size`-symbol alphabet at `word_size`
    /// bits of precision.
    pub fn new(vocabulary_size: u32, word_size: u32) -> Result<Self> {
        if !(3..=16).contains(&word_size) {
            return Err(OxiArcError::invalid_word_size(word_size));
        }
        let (word_mask, msb_mask, second_msb_mask) = masks(word_size);
        Ok(Self {
            word_size,
            word_mask,
            msb_mask,
            second_msb_mask,
            low: 0,
            high: word_mask,
            tag: 0,
            stats: StatsTable::new(vocabulary_size, word_size),
        })
    }

    /// Reset statistics and interval. Does not reload the tag; call
    /// [`Self::init`] before decoding a fresh section.
    pub fn reset(&mut self) {
        self.low = 0;
        self.high = self.word_mask;
        self.tag = 0;
        self.stats.reset();
    }

    /// Load the first `w` bits of the section into `tag` and reset the interval.
    pub fn init(&mut self, reader: &mut BitReader) -> Result<()> {
        self.low = 0;
        self.high = self.word_mask;
        self.tag = 0;
        for _ in 0..self.word_size {
            let bit = reader.read_bit()?;
            self.tag = (self.tag << 1) | (bit as u32);
        }
        Ok(())
    }

    /// Decode the next symbol. Callers must stop once the termination symbol
    /// `256` is returned.
    pub fn decode_symbol(&mut self, reader: &mut BitReader) -> Result<u32> {
        let total = self.stats.total();
        let range = (self.high - self.low) as u64 + 1;
        let k = (((self.tag - self.low) as u64 + 1) * total as u64 - 1) / range;
        let k = k as u32;
        let s = self.stats.find_symbol(k);
        if s >= self.stats.vocabulary_size() {
            return Err(OxiArcError::corrupt_stream(self.stats.vocabulary_size()));
        }
        let cum_hi = self.stats.cum(s);
        let cum_lo = cum_hi - self.stats.count(s);
        let (new_low, new_high) = narrow(self.low, self.high, total, cum_lo, cum_hi);
        self.low = new_low;
        self.high = new_high;
        self.stats.increment(s);
        self.renormalize(reader)?;
        Ok(s)
    }

    fn renormalize(&mut self, reader: &mut BitReader) -> Result<()> {
        loop {
            if (self.low & self.msb_mask) == (self.high & self.msb_mask) {
                self.low = (self.low << 1) & self.word_mask;
                self.high = ((self.high << 1) | 1) & self.word_mask;
                let bit = reader.read_bit()?;
                self.tag = ((self.tag << 1) | (bit as u32)) & self.word_mask;
            } else if (self.low & self.second_msb_mask != 0) && (self.high & self.second_msb_mask == 0)
            {
                self.low = ((self.low << 1) & self.word_mask) ^ self.msb_mask;
                self.high = (((self.high << 1) | 1) & self.word_mask) ^ self.msb_mask;
                let bit = reader.read_bit()?;
                self.tag = (((self.tag << 1) | (bit as u32)) & self.word_mask) ^ self.msb_mask;
            } else {
                break;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arithmetic_coder_minimal_example() {
        // w=11, V=257, symbols [0, 0, 1, 256] -> 6 bytes per the seed scenario.
        let mut enc = ArithmeticEncoder::new(257, 11).unwrap();
        let mut out = [0u8; 16];
        let written = {
            let mut writer = BitWriter::new(&mut out);
            for &s in &[0u32, 0, 1, 256] {
                enc.encode_symbol(s, &mut writer).unwrap();
            }
            enc.finish(&mut writer, true).unwrap();
            writer.finish()
        };
        assert_eq!(&out[..written], &[0x00, 0x00, 0x06, 0x3E, 0x80, 0x00]);

        let mut dec = ArithmeticDecoder::new(257, 11).unwrap();
        let mut reader = BitReader::new(&out[..written]);
        dec.init(&mut reader).unwrap();
        let mut decoded = Vec::new();
        loop {
            let s = dec.decode_symbol(&mut reader).unwrap();
            if s == 256 {
                break;
            }
            decoded.push(s);
        }
        assert_eq!(decoded, vec![0, 0, 1]);
    }

    #[test]
    fn test_roundtrip_arbitrary_symbols() {
        let vocab = 260u32;
        let w = 12;
        let symbols: Vec<u32> = vec![5, 5, 5, 200, 0, 256];
        let mut enc = ArithmeticEncoder::new(vocab, w).unwrap();
        let mut out = [0u8; 64];
        let written = {
            let mut writer = BitWriter::new(&mut out);
            for &s in &symbols {
                enc.encode_symbol(s, &mut writer).unwrap();
            }
            enc.finish(&mut writer, true).unwrap();
            writer.finish()
        };

        let mut dec = ArithmeticDecoder::new(vocab, w).unwrap();
        let mut reader = BitReader::new(&out[..written]);
        dec.init(&mut reader).unwrap();
        let mut decoded = Vec::new();
        loop {
            let s = dec.decode_symbol(&mut reader).unwrap();
            if s == 256 {
                break;
            }
            decoded.push(s);
        }
        assert_eq!(decoded, vec![5, 5, 5, 200, 0]);
    }

    #[test]
    fn test_invalid_word_size_rejected() {
        assert!(ArithmeticEncoder::new(257, 2).is_err());
        assert!(ArithmeticEncoder::new(257, 17).is_err());
        assert!(ArithmeticDecoder::new(257, 1).is_err());
    }
}
