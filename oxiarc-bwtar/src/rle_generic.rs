//! Run-length encoding of runs of any repeating symbol.
//!
//! Unlike [`crate::rle_specific`], this layer targets whichever symbol
//! happens to repeat, emitting the literal once followed by zero or more
//! extended duplicate-count codes. The duplicate count per code is capped
//! at `maxDuplicateCount = max_run - 1`, per the consistent boundary
//! formulation mandated for this layer (source revisions disagreed on
//! whether to subtract `max_run` or `max_run - 1` at the split point; this
//! implementation always subtracts `max_run - 1` in both directions so
//! encode and decode round-trip symmetrically).

use oxiarc_core::error::{OxiArcError, Result};

/// Replace runs of any repeating symbol with the symbol itself followed by
/// extended duplicate-count codes `base + k` (`k + 1` additional copies).
///
/// A `max_run <= 1` disables the stage entirely (returned unchanged).
pub fn encode(data: &[u32], base: u32, max_run: u32) -> Vec<u32> {
    if data.is_empty() || max_run <= 1 {
        return data.to_vec();
    }
    let max_dup = max_run - 1;
    let mut out = Vec::with_capacity(data.len());
    let mut prev = data[0];
    out.push(prev);
    let mut dup = 0u32;

    let flush = |dup: &mut u32, out: &mut Vec<u32>| {
        while *dup > max_dup {
            out.push(base + max_dup - 1);
            *dup -= max_dup;
        }
        if *dup >= 1 {
            out.push(base + *dup - 1);
        }
        *dup = 0;
    };

    for &x in &data[1..] {
        if x == prev {
            dup += 1;
        } else {
            flush(&mut dup, &mut out);
            out.push(x);
            prev = x;
        }
    }
    flush(&mut dup, &mut out);
    out
}

/// Expand a generic-RLE stream back into its original symbol sequence.
pub fn decode(data: &[u32], base: u32, max_run: u32) -> Result<Vec<u32>> {
    if data.is_empty() || max_run <= 1 {
        return Ok(data.to_vec());
    }
    let max_dup = max_run - 1;
    let max_code = base + max_dup - 1;

    let first = data[0];
    if first > 255 {
        return Err(OxiArcError::invalid_first_symbol(first));
    }
    let mut out = vec![first];
    let mut prev = first;

    for &sym in &data[1..] {
        if sym <= 255 {
            out.push(sym);
            prev = sym;
        } else if sym >= base && sym <= max_code {
            let copies = sym - base + 1;
            out.extend(std::iter::repeat_n(prev, copies as usize));
        } else {
            return Err(OxiArcError::symbol_out_of_range(sym));
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_basic_expansion() {
        // base=257, max_run=5 so duplicate codes 257..260 are all valid.
        let base = 257;
        let max_run = 5;
        let input = [1u32, 257, 2, 0, 4, 260, 260, 257];
        let decoded = decode(&input, base, max_run).unwrap();
        assert_eq!(
            decoded,
            vec![1, 1, 2, 0, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4]
        );
    }

    #[test]
    fn test_roundtrip_mixed_runs() {
        let input: Vec<u32> = vec![1, 1, 1, 2, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 4];
        let base = 257;
        let max_run = 4;
        let encoded = encode(&input, base, max_run);
        let decoded = decode(&encoded, base, max_run).unwrap();
        assert_eq!(decoded, input);
    }

    #[test]
    fn test_all_bytes_equal_collapses() {
        let input: Vec<u32> = vec![7; 20];
        let base = 257;
        let max_run = 6; // max_dup = 5
        let encoded = encode(&input, base, max_run);
        // literal 7 followed by ceil(19/5)=4 extended codes.
        assert_eq!(encoded.len(), 5);
        let decoded = decode(&encoded, base, max_run).unwrap();
        assert_eq!(decoded, input);
    }

    #[test]
    fn test_all_bytes_distinct_is_noop() {
        let input: Vec<u32> = (0..30u32).collect();
        let encoded = encode(&input, 257, 4);
        assert_eq!(encoded, input);
    }

    #[test]
    fn test_max_run_le_one_disables_stage() {
        let input: Vec<u32> = vec![1, 1, 1, 2];
        assert_eq!(encode(&input, 257, 1), input);
        assert_eq!(decode(&input, 257, 1).unwrap(), input);
        assert_eq!(encode(&input, 257, 0), input);
    }

    #[test]
    fn test_decode_rejects_non_literal_first_symbol() {
        let err = decode(&[300, 1], 257, 4).unwrap_err();
        assert!(matches!(err, OxiArcError::InvalidFirstSymbol { symbol: 300 }));
    }

    #[test]
    fn test_decode_rejects_out_of_range_symbol() {
        let err = decode(&[1, 999], 257, 4).unwrap_err();
        assert!(matches!(err, OxiArcError::SymbolOutOfRange { symbol: 999 }));
    }
}
