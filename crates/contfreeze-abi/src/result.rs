// SPDX-License-Identifier: MIT OR Apache-2.0

//! Non-error control-flow codes returned by the freeze and thaw engines.
//!
//! Spec §7: "Pinning is not an error: freeze returns the code and leaves
//! all state unchanged." These are plain enums with hand-written `Display`
//! impls, not `thiserror`-derived error types — matching the rest of this
//! vocabulary crate, which stays dependency-light.

use core::fmt;

/// The result of a `freeze()` call (spec §4.4 entry-contract table).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FreezeResult {
    /// All frames frozen; the topmost is now inside the tail chunk.
    Ok,
    /// Recursion-end sentinel used internally by the slow path; never
    /// observed by a caller of `freeze()`.
    OkBottom,
    /// A critical-section marker on the entry forbids yielding.
    PinnedCs,
    /// A native or stub frame that cannot be frozen is present.
    PinnedNative,
    /// A frame holds an object monitor.
    PinnedMonitor,
    /// Stack overflow or allocation failure.
    Exception,
}

impl FreezeResult {
    /// True for the two outcomes that represent "a continuation was
    /// produced"; `OkBottom` is excluded because it never escapes the slow
    /// path's recursion.
    #[inline]
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Ok)
    }

    /// True for the three `PINNED_*` variants (spec §7: pinning is not an
    /// error, the caller decides whether to block, retry, or raise).
    #[inline]
    #[must_use]
    pub const fn is_pinned(self) -> bool {
        matches!(
            self,
            Self::PinnedCs | Self::PinnedNative | Self::PinnedMonitor
        )
    }

    /// The advisory [`PinReason`] this result corresponds to, if any.
    #[inline]
    #[must_use]
    pub const fn pin_reason(self) -> Option<PinReason> {
        match self {
            Self::PinnedCs => Some(PinReason::CriticalSection),
            Self::PinnedNative => Some(PinReason::NativeFrame),
            Self::PinnedMonitor => Some(PinReason::Monitor),
            Self::Ok | Self::OkBottom | Self::Exception => None,
        }
    }
}

impl fmt::Display for FreezeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::Ok => "all frames frozen",
            Self::OkBottom => "recursion-end sentinel (internal)",
            Self::PinnedCs => "pinned: critical section on entry",
            Self::PinnedNative => "pinned: unfreezable native/stub frame",
            Self::PinnedMonitor => "pinned: frame holds an object monitor",
            Self::Exception => "stack overflow or allocation failure",
        };
        f.write_str(msg)
    }
}

/// The last failed freeze's advisory reason, surfaced as
/// `Continuation.pinned-reason` (spec §3) and queried up front by
/// `is_pinned(scope)` (spec §6).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PinReason {
    /// A critical-section marker forbids yielding right now.
    CriticalSection,
    /// An unfreezable native or stub frame sits between entry and yield.
    NativeFrame,
    /// A frame in the walked region owns an object monitor.
    Monitor,
}

impl fmt::Display for PinReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::CriticalSection => "critical section",
            Self::NativeFrame => "native frame",
            Self::Monitor => "held monitor",
        };
        f.write_str(msg)
    }
}

/// The `kind` argument to `thaw()` (spec §4.5 entry contract).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ThawKind {
    /// First thaw of a continuation after mount.
    Top,
    /// Re-entry through the synthetic return-barrier stub after a method
    /// in a previously thawed region returns.
    ReturnBarrier,
    /// Thaw driven by exception unwinding.
    Exception,
}

impl ThawKind {
    /// Number of frames the slow path walks for this entry kind (spec
    /// §4.5: "1 for return-barrier re-entry, 2 for top thaw").
    #[inline]
    #[must_use]
    pub const fn slow_path_frame_budget(self) -> usize {
        match self {
            Self::ReturnBarrier => 1,
            Self::Top | Self::Exception => 2,
        }
    }
}

impl fmt::Display for ThawKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::Top => "top",
            Self::ReturnBarrier => "return-barrier",
            Self::Exception => "exception",
        };
        f.write_str(msg)
    }
}

#[cfg(test)]
mod result_test;
