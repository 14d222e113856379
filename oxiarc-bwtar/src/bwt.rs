//! Burrows–Wheeler forward and inverse transforms over the extended symbol
//! alphabet (not just raw bytes — the forward transform may run after an
//! RLE-specific pass has already introduced extended symbols above 255).

use oxiarc_core::error::{OxiArcError, Result};

/// Forward-transform `data` into a `bwt_store_bytes`-byte little-endian
/// header (the sorted rank of the unrotated row) followed by the `n`-symbol
/// last column of the sorted rotation matrix.
///
/// Rotations are represented by their starting index and compared by
/// walking `data[(p + k) % n]` without ever materializing a rotated copy,
/// per the naive comparator policy — any correct sort is acceptable.
pub fn forward(data: &[u32], bwt_store_bytes: usize) -> Vec<u32> {
    let n = data.len();
    if n == 0 {
        return vec![0; bwt_store_bytes];
    }

    let mut indices: Vec<usize> = (0..n).collect();
    indices.sort_by(|&a, &b| {
        for k in 0..n {
            let da = data[(a + k) % n];
            let db = data[(b + k) % n];
            match da.cmp(&db) {
                std::cmp::Ordering::Equal => continue,
                other => return other,
            }
        }
        std::cmp::Ordering::Equal
    });

    let original_index = indices
        .iter()
        .position(|&p| p == 0)
        .expect("the unrotated row (start index 0) is always present");

    let mut out = Vec::with_capacity(n + bwt_store_bytes);
    for i in 0..bwt_store_bytes {
        out.push(((original_index >> (8 * i)) & 0xFF) as u32);
    }
    for &p in &indices {
        out.push(data[(p + n - 1) % n]);
    }
    out
}

/// Inverse-transform a `header + last-column` buffer back into the original
/// `n`-symbol sequence, in O(n) via the rank/preceding-count tables.
pub fn inverse(data: &[u32], bwt_store_bytes: usize, vocabulary_size: u32) -> Result<Vec<u32>> {
    if data.len() <= bwt_store_bytes {
        return Err(OxiArcError::not_enough_data(data.len(), bwt_store_bytes));
    }

    let mut original_index: usize = 0;
    for i in 0..bwt_store_bytes {
        original_index |= (data[i] as usize) << (8 * i);
    }

    let last_column = &data[bwt_store_bytes..];
    let n = last_column.len();

    let mut preceding_count = vec![0u32; vocabulary_size as usize];
    let mut rank = vec![0usize; n];
    for (i, &c) in last_column.iter().enumerate() {
        rank[i] = preceding_count[c as usize] as usize;
        preceding_count[c as usize] += 1;
    }

    let mut running = 0u32;
    for count in preceding_count.iter_mut() {
        let c = *count;
        *count = running;
        running += c;
    }

    let mut output = vec![0u32; n];
    let mut idx = original_index;
    for i in (0..n).rev() {
        let symbol = last_column[idx];
        output[i] = symbol;
        idx = rank[idx] + preceding_count[symbol as usize] as usize;
    }
    Ok(output)
}
