// SPDX-License-Identifier: MIT OR Apache-2.0

//! Platform shim contract (spec component C8) and its host test double.
//!
//! Everything here is the boundary the engine never looks past: register
//! conventions, frame alignment, and the two patch operations a real
//! embedding performs with raw pointer writes. `contfreeze-core` only ever
//! calls through [`Platform`] and [`NativeStack`]; it has no idea whether
//! the frames underneath are x86-64, AArch64, or (as in tests) a plain
//! `Vec`.

mod mock;
mod traits;

pub use mock::{HostPlatform, MockNativeStack};
pub use traits::{NativeStack, Platform};
