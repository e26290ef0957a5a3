// SPDX-License-Identifier: MIT OR Apache-2.0

//! The stack-chunk flag set (spec §3: "`flags`: bit set with members
//! {HAS_MIXED_FRAMES, GC_MODE, HAS_BITMAP}").

use bitflags::bitflags;

bitflags! {
    /// Per-chunk flags consulted by both the freeze/thaw fast-path gate
    /// (spec §4.4, §4.5) and the GC barrier discipline (spec §4.6).
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct ChunkFlags: u8 {
        /// At least one frame in this chunk is interpreted (or otherwise
        /// not plain-compiled). Disqualifies both fast paths; forces the
        /// per-frame walk in `ChunkFrameStream`'s MIXED mode.
        const HAS_MIXED_FRAMES = 1 << 0;
        /// The collector considers this chunk's memory old/reachable
        /// enough that writes into it must go through store barriers.
        /// Disqualifies the freeze fast path (spec §4.6).
        const GC_MODE = 1 << 1;
        /// This chunk carries an oop bitmap tracking which words hold heap
        /// references. Disqualifies the freeze fast path; thaw must clear
        /// bits for words that move into a caller frame (spec §4.6).
        const HAS_BITMAP = 1 << 2;
    }
}

impl ChunkFlags {
    /// Both engines' fast paths require a chunk free of every disqualifying
    /// flag: not mixed, not GC-mode, not bitmapped (spec §4.4: "not
    /// GC-marked, not barriered, not mixed"; spec §4.5 mirrors this for
    /// thaw).
    #[inline]
    #[must_use]
    pub const fn fast_path_eligible(self) -> bool {
        self.is_empty()
    }
}

#[cfg(test)]
mod flags_test;
