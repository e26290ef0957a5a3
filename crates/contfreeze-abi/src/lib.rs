// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared vocabulary between the continuation engine and its collaborators.
//!
//! This crate defines the small set of value types that cross the boundary
//! between the freeze/thaw engine (`contfreeze-core`) and the runtime
//! components it treats as opaque: the JIT/interpreter, the GC, and the
//! platform/architecture shim.
//!
//! # Design Principles
//!
//! - **No heavyweight dependencies**: only `bitflags` for the chunk flag set.
//! - **Stable, copyable, `repr`-pinned types**: every type here is `Copy` and
//!   safe to embed directly in a stack chunk's header.
//! - **100% host-testable**: nothing here touches real memory or hardware.
//!
//! # Modules
//!
//! - [`word`]: machine-word counting types (`Word`, `WordOffset`).
//! - [`frame_kind`]: the frame kind tag from spec component C1.
//! - [`flags`]: the stack-chunk flag set from spec §3 (`ChunkFlags`).
//! - [`result`]: the non-error control-flow codes returned by freeze/thaw.
//! - [`sentinel`]: process-wide sentinel pcs installed once at init.

#![cfg_attr(not(test), no_std)]

pub mod flags;
pub mod frame_kind;
pub mod result;
pub mod sentinel;
pub mod word;

pub use flags::ChunkFlags;
pub use frame_kind::FrameKind;
pub use result::{FreezeResult, PinReason, ThawKind};
pub use sentinel::{RETURN_BARRIER_PC, YIELD_STUB_PC};
pub use word::{Word, WordOffset};
