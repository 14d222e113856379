//! Run-length encoding targeted at a single designated symbol `T`.
//!
//! Two independent instances of this layer exist in the pipeline: one
//! applied to the raw byte stream before the BWT, one applied to the BWT
//! output afterward. Both share this same encode/decode pair, parameterized
//! by `(t, base, max_run)`.

use oxiarc_core::error::{OxiArcError, Result};

/// Replace runs of `t` with extended codes `base + k` (representing a run
/// of `k + 2` consecutive `t`s), in a single left-to-right pass.
pub fn encode(data: &[u32], t: u32, base: u32, max_run: u32) -> Vec<u32> {
    let mut out = Vec::with_capacity(data.len());
    let mut run = 0u32;

    let mut flush = |run: &mut u32, out: &mut Vec<u32>| {
        while *run > max_run {
            out.push(base + max_run - 2);
            *run -= max_run;
        }
        if *run >= 2 {
            out.push(base + *run - 2);
        } else if *run == 1 {
            out.push(t);
        }
        *run = 0;
    };

    for &x in data {
        if x == t {
            run += 1;
            continue;
        }
        flush(&mut run, &mut out);
        out.push(x);
    }
    flush(&mut run, &mut out);
    out
}

/// Expand extended codes back into runs of `t`. Literals (including a bare
/// `t` emitted for a run of length `1`) pass through unchanged.
pub fn decode(data: &[u32], t: u32, base: u32, max_run: u32) -> Result<Vec<u32>> {
    let max_code = base + max_run - 2;
    let mut out = Vec::with_capacity(data.len());
    for &sym in data {
        if sym <= 255 {
            out.push(sym);
        } else if sym >= base && sym <= max_code {
            let run_len = sym - base + 2;
            out.extend(std::iter::repeat_n(t, run_len as usize));
        } else {
            return Err(OxiArcError::symbol_out_of_range(sym));
        }
    }
    Ok(out)
}
