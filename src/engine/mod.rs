/*
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Shared retrieval mechanics for the LPRC and PSRC engines: computing a
//! string's full decoded length by walking its anchor chain, and splicing a
//! segment's bits into a running retrieval buffer.

mod common;
mod lprc;
mod psrc;

pub use common::BitDataSize;
pub use lprc::Lprc;
pub use psrc::Psrc;
