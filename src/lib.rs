/*
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))]
#![deny(unconditional_recursion)]

#[cfg(not(target_pointer_width = "64"))]
compile_error!("`target_pointer_width` must be 64");

pub mod bits;
pub mod config;
pub mod dict;
pub mod engine;
pub mod error;

pub mod prelude {
    pub use crate::bits::*;
    pub use crate::config::*;
    pub use crate::dict::*;
    pub use crate::engine::*;
    pub use crate::error::*;
}

pub use config::EngineOptions;
pub use engine::{BitDataSize, Lprc, Psrc};
pub use error::{Error, Result};
