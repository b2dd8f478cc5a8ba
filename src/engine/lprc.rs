/*
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::bits::{codes, convert, BitVector};
use crate::config::EngineOptions;
use crate::dict::CodingStore;
use crate::engine::common::{self, overlay_top_bits, BitDataSize};
use crate::error::{Error, Result};

/// Locality-Preserving Rear Coding dictionary: each string is stored either
/// as a full copy ("anchor") or as the suffix that differs from its
/// lexicographic predecessor, with anchors re-seeded often enough to bound
/// retrieval work by `epsilon`.
#[derive(Debug, Clone)]
pub struct Lprc {
    coding: CodingStore,
    is_uncompressed: BitVector,
    options: EngineOptions,
    latest_compressed_bits: usize,
    n: usize,
    populated: bool,
}

impl Lprc {
    pub fn new(options: EngineOptions) -> Self {
        Self {
            coding: CodingStore::new(),
            is_uncompressed: BitVector::new(0),
            options,
            latest_compressed_bits: 0,
            n: 0,
            populated: false,
        }
    }

    /// Sorts `strings` and builds the dictionary. Consumes the input: after
    /// this call the raw strings are gone, only the rear-coded form
    /// remains.
    pub fn populate(&mut self, mut strings: Vec<Vec<u8>>) -> Result<()> {
        strings.sort();
        self.n = strings.len();
        self.is_uncompressed = BitVector::zeros(self.n);
        let lengths_hint = codes::capacity_hint(strings.iter().map(|s| s.len() + 1));
        self.coding = CodingStore::with_capacity(0, lengths_hint);
        self.latest_compressed_bits = 0;
        for (i, s) in strings.iter().enumerate() {
            self.insert(i, s)?;
        }
        self.coding.freeze(self.options.accel_threshold);
        self.is_uncompressed.freeze(self.options.accel_threshold);
        self.populated = true;
        log::debug!("lprc populated with {} strings", self.n);
        Ok(())
    }

    fn insert(&mut self, i: usize, s: &[u8]) -> Result<()> {
        let mut framed = Vec::with_capacity(s.len() + 1);
        framed.extend_from_slice(s);
        framed.push(0u8);
        let bds = convert::bits_of(&framed);
        let suffix = self.coding.different_suffix(&bds)?;
        let anchor = suffix.len() == bds.len()
            || (self.latest_compressed_bits as f64) > self.options.anchor_factor() * bds.len() as f64;
        let segment = if anchor {
            self.latest_compressed_bits = 0;
            self.is_uncompressed.set(i, true)?;
            bds.clone()
        } else {
            self.latest_compressed_bits += suffix.len();
            suffix
        };
        log::trace!("lprc insert {i}: anchor={anchor} segment_len={}", segment.len());
        self.coding.commit(bds, segment)
    }

    fn ensure_populated(&self) -> Result<()> {
        if self.populated {
            Ok(())
        } else {
            Err(Error::NotInitialized)
        }
    }

    /// Full decoded length, in bits, of string `u`.
    pub fn string_length(&self, u: usize) -> Result<usize> {
        self.ensure_populated()?;
        if u >= self.n {
            return Err(Error::IndexOutOfBound { index: u, len: self.n });
        }
        common::string_length(&self.coding, &self.is_uncompressed, self.n, u)
    }

    /// Reconstructs the first `l` bits of string `u`'s encoded form,
    /// trimmed of framing zero bytes.
    pub fn retrieval(&self, u: usize, l: usize) -> Result<Vec<u8>> {
        self.ensure_populated()?;
        if u >= self.n {
            return Err(Error::IndexOutOfBound { index: u, len: self.n });
        }
        let mut buffer = BitVector::zeros(l);
        if self.is_uncompressed.get(u)? {
            let seg = self.coding.segment_bits(u, self.n)?;
            overlay_top_bits(&mut buffer, 0, l, &seg)?;
            return convert::bits_to_trimmed_string(&buffer);
        }
        let (v, mut len_v) = common::nearest_anchor(&self.is_uncompressed, &self.coding, self.n, u)?;
        let seg_v = self.coding.segment_bits(v, self.n)?;
        overlay_top_bits(&mut buffer, 0, l, &seg_v)?;
        for i in v + 1..=u {
            let li = self.coding.ith(i)?;
            let n_i = len_v - li;
            let stored_i = self.coding.in_strings_len(i, self.n)?;
            len_v = stored_i + n_i;
            if n_i >= l {
                continue;
            }
            let seg_i = self.coding.segment_bits(i, self.n)?;
            overlay_top_bits(&mut buffer, 0, l - n_i, &seg_i)?;
        }
        convert::bits_to_trimmed_string(&buffer)
    }

    /// All stored strings with prefix `p`, in sorted order.
    pub fn full_prefix_search(&self, p: &[u8]) -> Result<Vec<Vec<u8>>> {
        self.ensure_populated()?;
        let l = 8 * p.len();
        let lo = self.lower_bound(p, l)?;
        let hi = self.upper_bound(p, l)?;
        let mut out = Vec::with_capacity(hi.saturating_sub(lo));
        for i in lo..hi {
            let len = self.string_length(i)?;
            out.push(self.retrieval(i, len)?);
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
        sizes
    }
}
