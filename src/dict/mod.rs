/*
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! The shared coding store (`Strings`/`Starts`/`Lengths`) that both the LPRC
//! and PSRC engines build on.

mod coding_store;

pub use coding_store::CodingStore;
