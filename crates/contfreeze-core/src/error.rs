// SPDX-License-Identifier: MIT OR Apache-2.0

//! True error types, as distinct from the non-error control codes in
//! `contfreeze_abi::result` (spec §7: pinning is advisory, overflow is
//! not). These only ever surface from the sizing pre-pass and the slow
//! path's recursion guard.

use core::fmt;

/// Why a freeze attempt could not proceed at all, as opposed to pinning
/// (which is a successful, informative outcome, not an error).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FreezeError {
    /// The slow path's recursive walk would exceed the native stack's
    /// remaining capacity.
    Overflow,
    /// The backing allocator could not provide a chunk of the required
    /// size.
    AllocationFailed,
}

impl fmt::Display for FreezeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::Overflow => "freeze slow path would overflow the native stack",
            Self::AllocationFailed => "chunk allocation failed",
        };
        f.write_str(msg)
    }
}

impl core::error::Error for FreezeError {}

/// Why a thaw attempt could not proceed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThawError {
    /// The sizing pre-pass determined the thawed region would overflow the
    /// native stack (spec §4.5: `prepare_thaw` returns 0 on this path).
    Overflow,
}

impl fmt::Display for ThawError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("thaw would overflow the native stack")
    }
}

impl core::error::Error for ThawError {}

#[cfg(test)]
mod error_test;
