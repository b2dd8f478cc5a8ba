/*
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Shared error taxonomy for the bit-vector, coding-store, and engine layers.
//!
//! No layer wraps a lower layer's error: a [`BitVector`](crate::bits::BitVector)
//! error returned from deep inside a `retrieval` call reaches the caller
//! untouched.

/// A single error sum type shared across every layer of the crate.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A bit-vector access addressed a position at or past `len`.
    #[error("index {index} out of bound (len={len})")]
    IndexOutOfBound { index: usize, len: usize },

    /// An append or access was attempted on a bit vector that was never
    /// given a backing array (e.g. a default-constructed `Lengths` vector
    /// used before its first code).
    #[error("bit vector not initialized")]
    NotInitialized,

    /// `bits_to_string` was called on a bit vector whose length is not a
    /// multiple of 8.
    #[error("bit length {0} is not a multiple of 8")]
    InvalidString(usize),

    /// `select1(k)` was called but fewer than `k` ones exist in the vector.
    #[error("requested the {k}-th one bit but only {available} are set")]
    LessThanKOnes { k: usize, available: usize },

    /// `rank1`/`select1` were called with an out-of-domain index (`k == 0`,
    /// or `i` past `len`). Mirrors the Go `ErrInvalidI`/`ErrZeroI` pair,
    /// collapsed into one variant since the payload already disambiguates.
    #[error("invalid index {0} for rank/select (must be >= 1)")]
    InvalidIndex(usize),

    /// A paired bit-vector access inside `different_suffix`/`different_prefix`
    /// addressed a position that does not exist in one of the two operands.
    #[error("invalid position {0} while comparing bit vectors")]
    InvalidPosition(usize),

    /// PSRC retrieval could not reconstruct the requested number of bits
    /// because the stored string is shorter than the request.
    #[error("requested more bits than the stored string contains")]
    TooShortString,

    /// An Elias-γ length query was made on a `Lengths` vector with no codes
    /// written yet, other than the defined `ith(0) == 0` convention.
    #[error("length code requested on an empty coding store")]
    EmptyString,

    /// `new` was called with a non-positive `epsilon`.
    #[error("epsilon must be > 0, got {0}")]
    InvalidEpsilon(f64),

    /// Internal invariant violation: `Starts.len() != Strings.len()` after
    /// an insertion. Surfacing this as an error rather than panicking lets
    /// callers discard the engine cleanly; per the insertion panic
    /// discipline, the engine must not be used again after this.
    #[error("coding store invariant violated: Starts.len()={starts} != Strings.len()={strings}")]
    LengthMismatch { starts: usize, strings: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
