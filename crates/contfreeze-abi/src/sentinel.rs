// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sentinel program-counter values installed once at runtime init (spec §6,
//! §9: "the resolved `freeze_entry` and `thaw_entry` function pointers are
//! process-wide... thereafter immutable").
//!
//! These are opaque bit patterns as far as this crate is concerned — real
//! embeddings resolve them to the actual address of their yield-stub and
//! return-barrier-stub trampolines. They are reserved here so freeze and
//! thaw agree on what "not a real pc" looks like without either one owning
//! global mutable state.

use crate::Word;

/// Installed into the return-pc slot of a thawed region's bottom frame
/// whenever more continuation content remains below it (spec §3 invariant
/// 5, spec §4.5). A later `ret` through this slot re-enters the thaw
/// engine with `ThawKind::ReturnBarrier`.
pub const RETURN_BARRIER_PC: Word = Word::new(u64::MAX);

/// The address of the yield-stub trampoline that calls into `freeze()`.
/// Used only as a recognizable marker in tests and diagnostics; a real
/// embedding never compares against this constant directly.
pub const YIELD_STUB_PC: Word = Word::new(u64::MAX - 1);
