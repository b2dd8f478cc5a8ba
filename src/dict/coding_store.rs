/*
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::bits::{codes, convert, BitVector};
use crate::error::{Error, Result};

/// The three parallel bit vectors every rear-coding engine writes into
/// during `populate`, plus the most recently inserted string's full
/// encoding (needed to diff the next insertion against it).
///
/// `Starts` marks, with a single 1 bit followed by `segment.len() - 1` zero
/// bits, where each stored segment begins inside `Strings`; `select1(i+1)`
/// therefore gives the absolute bit offset of segment `i`.
#[derive(Debug, Clone)]
pub struct CodingStore {
    pub strings: BitVector,
    pub starts: BitVector,
    pub lengths: BitVector,
    pub last_string: BitVector,
}

impl CodingStore {
    pub fn new() -> Self {
        Self {
            strings: BitVector::new(0),
            starts: BitVector::new(0),
            lengths: BitVector::new(0),
            last_string: BitVector::new(0),
        }
    }

    pub fn with_capacity(strings_bits: usize, lengths_bits: usize) -> Self {
        Self {
            strings: BitVector::new(strings_bits),
            starts: BitVector::new(strings_bits),
            lengths: BitVector::new(lengths_bits),
            last_string: BitVector::new(0),
        }
    }

    /// The suffix of `bds` that differs from `last_string`'s high-order
    /// bits (step 1 of LPRC insertion, and of PSRC insertion when the
    /// suffix direction is chosen).
    pub fn different_suffix(&self, bds: &BitVector) -> Result<BitVector> {
        convert::different_suffix(&self.last_string, bds)
    }

    /// The prefix of `bds` that differs from `last_string`'s low-order
    /// bits (PSRC's other candidate segment).
    pub fn different_prefix(&self, bds: &BitVector) -> Result<BitVector> {
        convert::different_prefix(&self.last_string, bds)
    }

    /// Commits the chosen `segment` for the string encoded as `bds`: appends
    /// it to `Strings`, records its removed-bit count in `Lengths` (unless
    /// this is the first string), marks its start in `Starts`, and makes
    /// `bds` the new `last_string`.
    ///
    /// The value appended to `Lengths` is `last_string.len() - (bds.len() -
    /// segment.len())`, not the more obvious `last_string.len() -
    /// segment.len()`: the latter only coincides with the former when
    /// consecutive strings encode to equal bit lengths. Retrieval's running
    /// `len_v` telescopes correctly only with the first formula.
    pub fn commit(&mut self, bds: BitVector, segment: BitVector) -> Result<()> {
        let is_first = self.last_string.is_empty();
        if !is_first {
            let removed = bds.len() - segment.len();
            let code = self.last_string.len() - removed;
            self.encode_length(code)?;
        }
        self.set_starts_with_offset(&segment);
        self.strings.append_bits(&segment);
        self.last_string = bds;
        if self.starts.len() != self.strings.len() {
            return Err(Error::LengthMismatch {
                starts: self.starts.len(),
                strings: self.strings.len(),
            });
        }
        Ok(())
    }

    /// `Lengths` codes are shifted by one on the wire (`code + 1`) so that a
    /// legitimate `code == 0` — the entire predecessor subsumed in the
    /// shared high-order run — still has a valid Elias-γ encoding, which
    /// requires a value of at least 1.
    fn encode_length(&mut self, code: usize) -> Result<()> {
        codes::append_elias_gamma(&mut self.lengths, code + 1)
    }

    /// Decodes the `i`-th `Lengths` code (1-indexed). `ith(0)` is 0 by
    /// convention: no code is ever written for the first string.
    pub fn ith(&self, i: usize) -> Result<usize> {
        if i == 0 {
            return Ok(0);
        }
        Ok(codes::ith_elias_gamma(&self.lengths, i)? - 1)
    }

    fn set_starts_with_offset(&mut self, segment: &BitVector) {
        if segment.is_empty() {
            return;
        }
        self.starts.append_bit(true);
        self.starts.len_pad(segment.len() - 1);
    }

    /// Absolute bit offset in `Strings` where segment `i` begins.
    pub fn segment_start(&self, i: usize) -> Result<usize> {
        self.starts.select1(i + 1)
    }

    /// Stored bit length of segment `i`, out of `n` total strings.
    pub fn in_strings_len(&self, i: usize, n: usize) -> Result<usize> {
        let start = self.segment_start(i)?;
        let end = if i + 1 == n {
            self.strings.len()
        } else {
            self.segment_start(i + 1)?
        };
        Ok(end - start)
    }

    /// Copies segment `i`'s bits out of `Strings` into their own vector.
    pub fn segment_bits(&self, i: usize, n: usize) -> Result<BitVector> {
        let start = self.segment_start(i)?;
        let len = self.in_strings_len(i, n)?;
        convert::slice_bits(&self.strings, start, start + len)
    }

    /// Accelerates rank1/select1 on `Strings` and `Starts` once they exceed
    /// `threshold` bits.
    pub fn freeze(&mut self, threshold: usize) {
        self.strings.freeze(threshold);
        self.starts.freeze(threshold);
        self.lengths.freeze(threshold);
    }
}

impl Default for CodingStore {
    fn default() -> Self {
        Self::new()
    }
}
