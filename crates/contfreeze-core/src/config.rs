// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tunable thresholds the engine consults but never derives itself.

use contfreeze_abi::WordOffset;

/// Knobs governing freeze/thaw heuristics that spec leaves as an open
/// tuning question (spec §9: "the bulk-vs-single-frame threshold is a
/// tunable heuristic, not a hard architectural boundary").
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tunables {
    /// Above this many words of remaining chunk content, thaw prefers the
    /// bulk copy path over walking frames one at a time.
    pub bulk_thaw_threshold: WordOffset,
    /// Extra slack words added on top of a bulk-thaw sizing estimate to
    /// absorb platform alignment padding.
    pub align_wiggle: WordOffset,
    /// Words of chunk-header bookkeeping reserved on top of frame content
    /// (spec §4.4 step 4).
    pub metadata_words: WordOffset,
}

impl Tunables {
    /// Defaults chosen to mirror production JVM Loom tuning: a few hundred
    /// words is "a handful of frames," well above what any single
    /// interpreter frame walk costs to just do directly.
    pub const DEFAULT_BULK_THAW_THRESHOLD_WORDS: usize = 500;
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            bulk_thaw_threshold: WordOffset::new(Self::DEFAULT_BULK_THAW_THRESHOLD_WORDS),
            align_wiggle: WordOffset::new(1),
            metadata_words: WordOffset::new(2),
        }
    }
}

#[cfg(test)]
mod config_test;
