// SPDX-License-Identifier: MIT OR Apache-2.0

//! # contfreeze-core
//!
//! Engine for freezing and thawing continuations: capturing the native
//! call frames of a lightweight thread into a heap-resident [`StackChunk`]
//! and reinstalling them later, possibly on a different carrier thread.
//!
//! This crate provides:
//! - [`frame`]: the per-frame vocabulary a host embeds its stack layout in
//! - [`chunk`]: the stack chunk, the heap object frames freeze into
//! - [`stream`]: forward/backward iteration over a chunk's frames
//! - [`continuation`]: the owning object a chunk's tail hangs off of
//! - [`gc`]: the barrier gateway a collector plugs into freeze/thaw
//! - [`platform`]: the native-stack and platform traits a host implements
//! - [`freeze`] / [`thaw`]: the two engine entry points
//! - [`config`]: tunables governing fast/slow-path and bulk/per-frame choices
//! - [`error`] / [`stats`]: failure modes and per-call counters
//!
//! The engine never touches raw bytes: a host's native stack and garbage
//! collector are reached only through the [`platform::NativeStack`] and
//! [`gc::BarrierGateway`] traits, so the same freeze/thaw logic runs
//! against a real native stack or the in-crate mock harness.

#![cfg_attr(not(any(test, feature = "std")), no_std)]

#[cfg(any(test, feature = "std"))]
extern crate std;

#[cfg(not(any(test, feature = "std")))]
extern crate alloc;

pub mod chunk;
pub mod config;
pub mod continuation;
pub mod error;
pub mod frame;
pub mod freeze;
pub mod gc;
pub mod platform;
pub mod stats;
pub mod stream;
pub mod thaw;

pub use chunk::StackChunk;
pub use config::Tunables;
pub use continuation::{Continuation, ScopeTag};
pub use error::{FreezeError, ThawError};
pub use frame::FrameDescriptor;
pub use freeze::{freeze, is_pinned};
pub use stats::{FreezeStats, ThawStats};
pub use thaw::{prepare_thaw, thaw};

/// Crate version.
pub const VERSION: &str = match option_env!("CONTFREEZE_VERSION") {
    Some(v) => v,
    None => "unknown",
};

#[cfg(test)]
mod lib_test;
