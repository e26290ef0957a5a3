// SPDX-License-Identifier: MIT OR Apache-2.0

//! The frame-kind tag from spec component C1 (Frame Descriptor).

use core::fmt;

/// The kind of a native stack frame, as derived from the code blob
/// containing its `pc`.
///
/// Spec §4.1: "Kind is derived from the code blob containing `pc`."
/// `contfreeze-core` never re-derives this itself — it is supplied by the
/// JIT/interpreter collaborator through the `NativeStack`/`ChunkFrames`
/// contracts, exactly as oop maps and argsizes are.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum FrameKind {
    /// A frame executed by the bytecode interpreter.
    Interpreted = 0,
    /// A frame produced by the JIT, with an associated oop map.
    Compiled = 1,
    /// A small runtime trampoline (yield stub, return-barrier stub,
    /// safepoint stub). Carries no oop map of its own.
    Stub = 2,
    /// A frame belonging to native (non-managed) code.
    Native = 3,
    /// A compiled frame that has been marked for deoptimization and must be
    /// rewritten to an interpreted frame on the way back onto the stack.
    Deoptimized = 4,
}

impl FrameKind {
    /// A compiled-only fast path requires every in-scope frame to be one of
    /// these; interpreted, native, and deoptimized frames all force the
    /// slow path (spec §4.4 fast-path preconditions).
    #[inline]
    #[must_use]
    pub const fn is_fast_path_eligible(self) -> bool {
        matches!(self, Self::Compiled)
    }

    /// Interpreted frames carry position-dependent header fields that must
    /// be relativized/derelativized (spec §4.4, §4.5); native/stub frames
    /// never appear inside a chunk at all (they pin freeze instead, spec
    /// §4.4's `PINNED_NATIVE`).
    #[inline]
    #[must_use]
    pub const fn is_interpreted(self) -> bool {
        matches!(self, Self::Interpreted)
    }
}

impl fmt::Display for FrameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Interpreted => "interpreted",
            Self::Compiled => "compiled",
            Self::Stub => "stub",
            Self::Native => "native",
            Self::Deoptimized => "deoptimized",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod frame_kind_test;
