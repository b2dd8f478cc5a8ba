/*
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Bit-level backing store: a growable, randomly-addressable bit vector with
//! rank1/select1, and the integer codes and byte-string conversions built on
//! top of it.

mod bit_vector;
pub mod codes;
pub mod convert;

pub use bit_vector::BitVector;
