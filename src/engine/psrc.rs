/*
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::bits::{codes, convert, BitVector};
use crate::config::EngineOptions;
use crate::dict::CodingStore;
use crate::engine::common::{self, BitDataSize};
use crate::error::{Error, Result};

/// Prefix-Suffix Rear Coding dictionary: like LPRC, but each non-anchor
/// string can store either a differing suffix (standard rear-coding
/// direction) or a differing prefix, whichever is shorter, ties going to
/// the suffix. Strings are framed as `\0 || s || \0`; the leading null
/// keeps `different_prefix` meaningful even for the very first differing
/// byte.
#[derive(Debug, Clone)]
pub struct Psrc {
    coding: CodingStore,
    is_uncompressed: BitVector,
    is_stored_suffix: BitVector,
    options: EngineOptions,
    latest_compressed_bits: usize,
    n: usize,
    populated: bool,
}

impl Psrc {
    pub fn new(options: EngineOptions) -> Self {
        Self {
            coding: CodingStore::new(),
            is_uncompressed: BitVector::new(0),
            is_stored_suffix: BitVector::new(0),
            options,
            latest_compressed_bits: 0,
            n: 0,
            populated: false,
        }
    }

    pub fn populate(&mut self, mut strings: Vec<Vec<u8>>) -> Result<()> {
        strings.sort();
        self.n = strings.len();
        self.is_uncompressed = BitVector::zeros(self.n);
        self.is_stored_suffix = BitVector::zeros(self.n);
        let lengths_hint = codes::capacity_hint(strings.iter().map(|s| s.len() + 2));
        self.coding = CodingStore::with_capacity(0, lengths_hint);
        self.latest_compressed_bits = 0;
        for (i, s) in strings.iter().enumerate() {
            self.insert(i, s)?;
        }
        self.coding.freeze(self.options.accel_threshold);
        self.is_uncompressed.freeze(self.options.accel_threshold);
        self.is_stored_suffix.freeze(self.options.accel_threshold);
        self.populated = true;
        log::debug!("psrc populated with {} strings", self.n);
        Ok(())
    }

    fn insert(&mut self, i: usize, s: &[u8]) -> Result<()> {
        let mut framed = Vec::with_capacity(s.len() + 2);
        framed.push(0u8);
        framed.extend_from_slice(s);
        framed.push(0u8);
        let bds = convert::bits_of(&framed);
        let suffix = self.coding.different_suffix(&bds)?;
        let prefix = self.coding.different_prefix(&bds)?;
        let use_suffix = suffix.len() <= prefix.len();
        let chosen = if use_suffix { suffix } else { prefix };
        self.is_stored_suffix.set(i, use_suffix)?;
        let anchor = chosen.len() == bds.len()
            || (self.latest_compressed_bits as f64) > self.options.anchor_factor() * bds.len() as f64;
        let segment = if anchor {
            self.latest_compressed_bits = 0;
            self.is_uncompressed.set(i, true)?;
            bds.clone()
        } else {
            self.latest_compressed_bits += chosen.len();
            chosen
        };
        log::trace!(
            "psrc insert {i}: anchor={anchor} suffix={use_suffix} segment_len={}",
            segment.len()
        );
        self.coding.commit(bds, segment)
    }

    fn ensure_populated(&self) -> Result<()> {
        if self.populated {
            Ok(())
        } else {
            Err(Error::NotInitialized)
        }
    }

    /// Full decoded length, in bits, of string `u`, including its two
    /// framing null bytes.
    pub fn string_length(&self, u: usize) -> Result<usize> {
        self.ensure_populated()?;
        if u >= self.n {
            return Err(Error::IndexOutOfBound { index: u, len: self.n });
        }
        common::string_length(&self.coding, &self.is_uncompressed, self.n, u)
    }

    /// Reconstructs the first `l` bits of string `u`'s unframed encoded
    /// form. Internally requests `l + 8` bits (to skip the leading framing
    /// byte) and errors with [`Error::TooShortString`] if the stored string
    /// does not have that many bits to offer.
    ///
    /// Unlike LPRC, where every non-anchor string inherits its unchanged
    /// region at the same (high) end, PSRC's inherited region flips between
    /// the high and low end depending on each step's stored direction. A
    /// single fixed-size, top-aligned buffer shared across the whole chain
    /// only stays correctly aligned when every step inherits at the same
    /// end, so this walks the chain rebuilding each string's full,
    /// exact-length bit vector bottom-aligned (index 0 = lowest-order bit),
    /// the way the Go reference does, and only slices out the requested
    /// window once the target `u` itself has been reconstructed.
    pub fn retrieval(&self, u: usize, l: usize) -> Result<Vec<u8>> {
        self.ensure_populated()?;
        if u >= self.n {
            return Err(Error::IndexOutOfBound { index: u, len: self.n });
        }
        let l_internal = l + 8;
        let total = self.string_length(u)?;
        if l_internal > total {
            return Err(Error::TooShortString);
        }
        let (v, len_v0) = common::nearest_anchor(&self.is_uncompressed, &self.coding, self.n, u)?;
        let mut current = self.coding.segment_bits(v, self.n)?;
        let mut len_v = len_v0;
        for i in v + 1..=u {
            let li = self.coding.ith(i)?;
            let n_i = len_v - li;
            let seg_i = self.coding.segment_bits(i, self.n)?;
            let stored_i = seg_i.len();
            let mut next = BitVector::zeros(stored_i + n_i);
            if self.is_stored_suffix.get(i)? {
                // Inherited bits are the high-order n_i bits of `current`;
                // the new segment fills the low-order stored_i bits.
                let inherited = convert::first_l_bits(&current, n_i)?;
                for j in 0..stored_i {
                    next.set(j, seg_i.get(j)?)?;
                }
                for j in 0..n_i {
                    next.set(stored_i + j, inherited.get(j)?)?;
                }
            } else {
                // Inherited bits are the low-order n_i bits of `current`;
                // the new segment fills the high-order stored_i bits.
                for j in 0..n_i {
                    next.set(j, current.get(j)?)?;
                }
                for j in 0..stored_i {
                    next.set(n_i + j, seg_i.get(j)?)?;
                }
            }
            len_v = stored_i + n_i;
            current = next;
        }
        let top = convert::first_l_bits(&current, l_internal)?;
        let trimmed = convert::slice_bits(&top, 0, l)?;
        convert::bits_to_trimmed_string(&trimmed)
    }

    /// All stored strings with prefix `p`, in sorted order.
    pub fn full_prefix_search(&self, p: &[u8]) -> Result<Vec<Vec<u8>>> {
        self.ensure_populated()?;
        let l = 8 * p.len();
        let lo = self.lower_bound(p, l)?;
        let hi = self.upper_bound(p, l)?;
        let mut out = Vec::with_capacity(hi.saturating_sub(lo));
        for i in lo..hi {
            let total = self.string_length(i)?;
            out.push(self.retrieval(i, total - 8)?);
        }
        Ok(out)
    }

    fn lower_bound(&self, p: &[u8], l: usize) -> Result<usize> {
        let (mut lo, mut hi) = (0usize, self.n);
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            if self.retrieval(mid, l)?.as_slice() < p {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }
        Ok(lo)
    }

    fn upper_bound(&self, p: &[u8], l: usize) -> Result<usize> {
        let (mut lo, mut hi) = (0usize, self.n);
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            if self.retrieval(mid, l)?.as_slice() <= p {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }
        Ok(lo)
    }

    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    pub fn get_bit_data_size(&self) -> BitDataSize {
        let mut sizes = BitDataSize::new();
        sizes.insert("StringsSize", self.coding.strings.len());
        sizes.insert("StartsSize", self.coding.starts.len());
        sizes.insert("LengthsSize", self.coding.lengths.len());
        sizes.insert("IsUncompressedSize", self.is_uncompressed.len());
        sizes.insert("PrefixOrSuffixSize", self.is_stored_suffix.len());
        sizes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(strings: &[&str]) -> Psrc {
        let mut psrc = Psrc::new(EngineOptions::new(1.0).unwrap());
        psrc.populate(strings.iter().map(|s| s.as_bytes().to_vec()).collect())
            .unwrap();
        psrc
    }

    #[test]
    fn scenario_caso_cena_delfino() {
        let psrc = build(&["caso", "cena", "delfino"]);
        assert_eq!(psrc.retrieval(2, 16).unwrap(), b"de".to_vec());
        let matches = psrc.full_prefix_search(b"ce").unwrap();
        assert_eq!(matches, vec![b"cena".to_vec()]);
    }

    #[test]
    fn full_decode_recovers_original_strings() {
        let psrc = build(&["caso", "cena", "delfino"]);
        for (i, expected) in ["caso", "cena", "delfino"].iter().enumerate() {
            let total = psrc.string_length(i).unwrap();
            assert_eq!(psrc.retrieval(i, total - 8).unwrap(), expected.as_bytes().to_vec());
        }
    }

    #[test]
    fn too_short_string_errors() {
        let psrc = build(&["a", "bb", "ccc"]);
        assert!(matches!(psrc.retrieval(0, 1000), Err(Error::TooShortString)));
    }

    /// "aaaa_common_tail" and "bbbb_common_tail" share a long common suffix
    /// (12 bytes, plus the trailing framing null) but almost no common
    /// prefix (they differ in their very first real byte), so the second
    /// string's differing prefix is far shorter than its differing suffix
    /// and `insert` must pick the prefix direction.
    #[test]
    fn prefix_direction_is_selected_and_decodes_correctly() {
        let psrc = build(&["aaaa_common_tail", "bbbb_common_tail"]);
        assert!(!psrc.is_stored_suffix.get(1).unwrap(), "expected prefix direction for index 1");

        for (i, expected) in ["aaaa_common_tail", "bbbb_common_tail"].iter().enumerate() {
            let total = psrc.string_length(i).unwrap();
            assert_eq!(psrc.retrieval(i, total - 8).unwrap(), expected.as_bytes().to_vec());
        }
        assert_eq!(
            psrc.retrieval(1, 32).unwrap(),
            b"bbbb".to_vec(),
            "partial retrieval should also resolve through the prefix-coded segment"
        );
    }
}
