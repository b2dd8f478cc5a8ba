/*
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::error::{Error, Result};

const WORDS_PER_BLOCK: usize = 8;
const ONES_PER_INVENTORY: usize = 256;

/// Rank9-style per-block counters: one absolute count for the block plus
/// eight 9-bit relative counts packed into a single `usize`.
///
/// Grounded on `rank_sel::rank9::BlockCounters` in the teacher repo: same
/// `9 * (word ^ 7)` packing trick so the counters for word 7 of a block (the
/// one most likely to be probed, since ranks cluster near block starts less
/// often than block ends) sit in the low bits.
#[derive(Debug, Clone, Copy, Default)]
struct BlockCounters {
    absolute: usize,
    relative: usize,
}

impl BlockCounters {
    #[inline(always)]
    fn rel(&self, word: usize) -> usize {
        (self.relative >> (9 * (word ^ 7))) & 0x1FF
    }

    #[inline(always)]
    fn set_rel(&mut self, word: usize, counter: usize) {
        self.relative |= counter << (9 * (word ^ 7));
    }
}

#[derive(Debug, Clone)]
struct SelectIndex {
    /// `samples[j]` is the bit position of the `(j * ONES_PER_INVENTORY)`-th
    /// one bit (0-indexed among ones).
    samples: Vec<usize>,
}

#[derive(Debug, Clone)]
struct Accel {
    counts: Vec<BlockCounters>,
    select_index: SelectIndex,
    num_ones: usize,
}

/// A growable bit vector addressed bit-by-bit, with accelerated rank1/select1
/// once [`BitVector::freeze`] has been called on a sufficiently large vector.
///
/// Below the configured threshold, rank and select fall back to a linear
/// scan over the backing words; this is the common case for per-string
/// scratch vectors (`Strings`-segment extracts, retrieval buffers) which
/// rarely exceed a few hundred bits.
#[derive(Debug, Clone)]
pub struct BitVector {
    words: Vec<u64>,
    len: usize,
    accel: Option<Accel>,
}

impl BitVector {
    /// Creates an empty bit vector with word storage reserved for at least
    /// `capacity_bits` bits.
    pub fn new(capacity_bits: usize) -> Self {
        Self {
            words: Vec::with_capacity(capacity_bits.div_ceil(64)),
            len: 0,
            accel: None,
        }
    }

    /// Creates a bit vector of `len` bits, all clear.
    pub fn zeros(len: usize) -> Self {
        let mut bv = Self::new(len);
        bv.len_pad(len);
        bv
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn ensure_words_for(&mut self, bits: usize) {
        let words_needed = bits.div_ceil(64);
        if self.words.len() < words_needed {
            self.words.resize(words_needed, 0);
        }
    }

    /// Appends a single bit, growing backing storage as needed.
    pub fn append_bit(&mut self, bit: bool) {
        let idx = self.len;
        self.ensure_words_for(idx + 1);
        if bit {
            self.words[idx / 64] |= 1u64 << (idx % 64);
        }
        self.len += 1;
        self.accel = None;
    }

    /// Appends every bit of `other`, in order.
    pub fn append_bits(&mut self, other: &BitVector) {
        self.ensure_words_for(self.len + other.len);
        for i in 0..other.len {
            if other.get_unchecked(i) {
                let idx = self.len + i;
                self.words[idx / 64] |= 1u64 << (idx % 64);
            }
        }
        self.len += other.len;
        self.accel = None;
    }

    /// Advances `len` by `k` without writing any bits (they read as clear).
    pub fn len_pad(&mut self, k: usize) {
        self.len += k;
        self.ensure_words_for(self.len);
        self.accel = None;
    }

    #[inline]
    fn get_unchecked(&self, i: usize) -> bool {
        (self.words[i / 64] >> (i % 64)) & 1 != 0
    }

    pub fn get(&self, i: usize) -> Result<bool> {
        if i >= self.len {
            return Err(Error::IndexOutOfBound { index: i, len: self.len });
        }
        Ok(self.get_unchecked(i))
    }

    pub fn set(&mut self, i: usize, bit: bool) -> Result<()> {
        if i >= self.len {
            return Err(Error::IndexOutOfBound { index: i, len: self.len });
        }
        if bit {
            self.words[i / 64] |= 1u64 << (i % 64);
        } else {
            self.words[i / 64] &= !(1u64 << (i % 64));
        }
        self.accel = None;
        Ok(())
    }

    pub fn clear(&mut self, i: usize) -> Result<()> {
        self.set(i, false)
    }

    /// Number of set bits in `[0, i)`. Domain: `1 <= i <= len`.
    pub fn rank1(&self, i: usize) -> Result<usize> {
        if i == 0 {
            return Err(Error::InvalidIndex(0));
        }
        if i > self.len {
            return Err(Error::IndexOutOfBound { index: i, len: self.len });
        }
        if let Some(accel) = &self.accel {
            return Ok(self.rank1_accel(accel, i));
        }
        Ok(self.rank1_scan(i))
    }

    fn rank1_scan(&self, i: usize) -> usize {
        let full_words = i / 64;
        let mut count = 0usize;
        for w in &self.words[..full_words] {
            count += w.count_ones() as usize;
        }
        let rem = i % 64;
        if rem != 0 {
            let mask = (1u64 << rem) - 1;
            count += (self.words[full_words] & mask).count_ones() as usize;
        }
        count
    }

    fn rank1_accel(&self, accel: &Accel, i: usize) -> usize {
        let word_pos = i / 64;
        let block = word_pos / WORDS_PER_BLOCK;
        let word_in_block = word_pos % WORDS_PER_BLOCK;
        let counters = &accel.counts[block];
        let mut count = counters.absolute + counters.rel(word_in_block);
        let rem = i % 64;
        if rem != 0 {
            let mask = (1u64 << rem) - 1;
            count += (self.words[word_pos] & mask).count_ones() as usize;
        }
        count
    }

    /// Position of the `k`-th set bit (1-indexed). Domain: `1 <= k <= (number
    /// of ones in the vector)`.
    pub fn select1(&self, k: usize) -> Result<usize> {
        if k == 0 {
            return Err(Error::InvalidIndex(0));
        }
        if let Some(accel) = &self.accel {
            if k > accel.num_ones {
                return Err(Error::LessThanKOnes { k, available: accel.num_ones });
            }
            return Ok(self.select1_accel(accel, k));
        }
        self.select1_scan(k)
    }

    fn select1_scan(&self, k: usize) -> Result<usize> {
        let mut seen = 0usize;
        for (wi, &word) in self.words.iter().enumerate() {
            let ones = word.count_ones() as usize;
            if seen + ones >= k {
                let mut w = word;
                while w != 0 {
                    let bit = w.trailing_zeros() as usize;
                    seen += 1;
                    if seen == k {
                        return Ok(wi * 64 + bit);
                    }
                    w &= w - 1;
                }
            } else {
                seen += ones;
            }
        }
        Err(Error::LessThanKOnes { k, available: seen })
    }

    fn select1_accel(&self, accel: &Accel, k: usize) -> usize {
        let target_rank = k - 1; // 0-indexed
        let sample_idx = target_rank / ONES_PER_INVENTORY;
        let mut pos = accel.select_index.samples[sample_idx];
        let mut rank_at_pos = sample_idx * ONES_PER_INVENTORY;
        while rank_at_pos < target_rank {
            pos += 1;
            if self.get_unchecked(pos) {
                rank_at_pos += 1;
            }
        }
        pos
    }

    /// Builds Rank9-style block counters and a sampled select inventory once
    /// the vector holds more than `threshold` bits. Below the threshold,
    /// `rank1`/`select1` keep scanning linearly; constructing acceleration
    /// structures for a few dozen bits would cost more than it saves.
    pub fn freeze(&mut self, threshold: usize) {
        if self.len <= threshold {
            self.accel = None;
            return;
        }
        let num_blocks = self.words.len().div_ceil(WORDS_PER_BLOCK);
        let mut counts = Vec::with_capacity(num_blocks);
        let mut running = 0usize;
        for block in 0..num_blocks {
            let mut bc = BlockCounters { absolute: running, relative: 0 };
            let start = block * WORDS_PER_BLOCK;
            let mut in_block = 0usize;
            for w in 0..WORDS_PER_BLOCK {
                bc.set_rel(w, in_block);
                if let Some(&word) = self.words.get(start + w) {
                    in_block += word.count_ones() as usize;
                }
            }
            running += in_block;
            counts.push(bc);
        }
        let mut samples = Vec::new();
        let mut seen_ones = 0usize;
        for (wi, &word) in self.words.iter().enumerate() {
            let mut w = word;
            while w != 0 {
                if seen_ones % ONES_PER_INVENTORY == 0 {
                    let bit = w.trailing_zeros() as usize;
                    samples.push(wi * 64 + bit);
                }
                seen_ones += 1;
                w &= w - 1;
            }
        }
        self.accel = Some(Accel {
            counts,
            select_index: SelectIndex { samples },
            num_ones: seen_ones,
        });
        log::debug!("froze bit vector of {} bits, {} ones", self.len, seen_ones);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_and_get_roundtrip() {
        let mut bv = BitVector::new(8);
        for i in 0..17 {
            bv.append_bit(i % 3 == 0);
        }
        for i in 0..17 {
            assert_eq!(bv.get(i).unwrap(), i % 3 == 0);
        }
        assert!(bv.get(17).is_err());
    }

    #[test]
    fn rank1_matches_naive_count() {
        let mut bv = BitVector::new(0);
        let pattern = [true, false, true, true, false, false, true, false, true, true];
        for b in pattern {
            bv.append_bit(b);
        }
        let mut naive = 0usize;
        for (i, b) in pattern.iter().enumerate() {
            if *b {
                naive += 1;
            }
            assert_eq!(bv.rank1(i + 1).unwrap(), naive);
        }
    }

    #[test]
    fn select1_finds_kth_one() {
        let mut bv = BitVector::new(0);
        for b in [false, true, false, false, true, true, false, true] {
            bv.append_bit(b);
        }
        assert_eq!(bv.select1(1).unwrap(), 1);
        assert_eq!(bv.select1(2).unwrap(), 4);
        assert_eq!(bv.select1(3).unwrap(), 5);
        assert_eq!(bv.select1(4).unwrap(), 7);
        assert!(bv.select1(5).is_err());
        assert!(bv.select1(0).is_err());
    }

    #[test]
    fn freeze_preserves_rank_and_select() {
        let mut bv = BitVector::new(0);
        for i in 0..20_000usize {
            bv.append_bit(i % 7 == 0);
        }
        let mut naive = BitVector::new(0);
        for i in 0..20_000usize {
            naive.append_bit(i % 7 == 0);
        }
        bv.freeze(10_000);
        for i in [1usize, 500, 4096, 19999, 20000] {
            assert_eq!(bv.rank1(i).unwrap(), naive.rank1(i).unwrap());
        }
        let ones = bv.rank1(20_000).unwrap();
        for k in [1usize, 2, ones / 2, ones - 1, ones] {
            assert_eq!(bv.select1(k).unwrap(), naive.select1(k).unwrap());
        }
    }

    #[test]
    fn len_pad_reads_as_zero() {
        let mut bv = BitVector::new(0);
        bv.append_bit(true);
        bv.len_pad(10);
        assert_eq!(bv.len(), 11);
        for i in 1..11 {
            assert_eq!(bv.get(i).unwrap(), false);
        }
    }
}
