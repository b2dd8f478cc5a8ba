/*
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use std::collections::BTreeMap;

use crate::bits::{convert, BitVector};
use crate::dict::CodingStore;
use crate::error::Result;

/// Bit-size breakdown returned by `get_bit_data_size()`, keyed by component
/// name (`"StringsSize"`, `"StartsSize"`, `"LengthsSize"`,
/// `"IsUncompressedSize"`, and, for PSRC, `"PrefixOrSuffixSize"`).
pub type BitDataSize = BTreeMap<&'static str, usize>;

/// Index of the nearest uncompressed ancestor `v <= u`, and its stored bit
/// length.
pub fn nearest_anchor(is_uncompressed: &BitVector, coding: &CodingStore, n: usize, u: usize) -> Result<(usize, usize)> {
    let v = if is_uncompressed.get(u)? {
        u
    } else {
        let v_rank = is_uncompressed.rank1(u)?;
        is_uncompressed.select1(v_rank)?
    };
    let len_v = coding.in_strings_len(v, n)?;
    Ok((v, len_v))
}

/// Full decoded length (in bits) of string `i`, computed by walking back
/// along its anchor chain: `string_length(i) = string_length(i-1) -
/// ith(Lengths, i) + in_strings_len(i)`, with `string_length(i) =
/// in_strings_len(i)` at an anchor or at `i == 0`.
pub fn string_length(coding: &CodingStore, is_uncompressed: &BitVector, n: usize, i: usize) -> Result<usize> {
    let mut chain = Vec::new();
    let mut cur = i;
    while cur != 0 && !is_uncompressed.get(cur)? {
        chain.push(cur);
        cur -= 1;
    }
    let mut len = coding.in_strings_len(cur, n)?;
    while let Some(idx) = chain.pop() {
        let li = coding.ith(idx)?;
        len = len - li + coding.in_strings_len(idx, n)?;
    }
    Ok(len)
}

/// Overlays the top `region_len.min(seg_bits.len())` bits of `seg_bits`
/// onto `buffer[region_offset .. region_offset + region_len)`, writing at
/// the high end of that window so a segment shorter than the window leaves
/// the window's low end untouched.
pub fn overlay_top_bits(buffer: &mut BitVector, region_offset: usize, region_len: usize, seg_bits: &BitVector) -> Result<()> {
    let count = region_len.min(seg_bits.len());
    if count == 0 {
        return Ok(());
    }
    let top = convert::first_l_bits(seg_bits, count)?;
    let write_offset = region_offset + (region_len - count);
    for j in 0..count {
        buffer.set(write_offset + j, top.get(j)?)?;
    }
    Ok(())
}
