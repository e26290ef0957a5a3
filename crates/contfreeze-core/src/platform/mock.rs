// SPDX-License-Identifier: MIT OR Apache-2.0

//! Host test doubles for [`Platform`] and [`NativeStack`].
//!
//! `MockNativeStack` plays the role a real thread's machine stack would:
//! a `Vec<FrameDescriptor>` ordered top-to-bottom, with index `0` fixed as
//! the yield-stub sentinel and the last index fixed as the entry marker.
//! It is the same "heap-backed stand-in for real memory" idea the rest of
//! this family uses for its platform mocks, just over structured frames
//! instead of raw bytes, since the engine never touches raw bytes either.

use crate::frame::FrameDescriptor;
use crate::platform::traits::{NativeStack, Platform};
use contfreeze_abi::{FrameKind, Word, WordOffset};

#[cfg(any(test, feature = "std"))]
use std::vec::Vec;

#[cfg(not(any(test, feature = "std")))]
use alloc::vec::Vec;

/// A fixed, deliberately simple set of platform constants for host tests
/// and the demo harness. Real embeddings supply architecture-specific
/// values; these exist only so the engine has something to call.
#[derive(Clone, Copy, Debug, Default)]
pub struct HostPlatform;

impl Platform for HostPlatform {
    fn metadata_words(&self) -> WordOffset {
        WordOffset::new(2)
    }

    fn align_wiggle(&self) -> WordOffset {
        WordOffset::new(1)
    }

    fn sender_sp_ret_address_offset(&self) -> WordOffset {
        WordOffset::new(1)
    }

    fn frame_align_words(&self, words: WordOffset) -> WordOffset {
        words.align_up(2)
    }

    fn frame_align_pointer(&self, offset: WordOffset) -> WordOffset {
        offset.align_up(2)
    }
}

/// A simulated native call stack, backed by a plain `Vec`.
///
/// Frames are stored top-to-bottom: index `0` is the yield stub that called
/// into the engine, the last index is the entry marker. Both sentinels are
/// `FrameKind::Stub` frames with zero size, present purely so
/// `entry_index()`/`pop_frames`/`push_frame` have real boundaries to work
/// against, matching how a real stack always has *something* above and
/// below the continuation's own frames.
pub struct MockNativeStack {
    frames: Vec<FrameDescriptor>,
    capacity_words: WordOffset,
    fast_path_hint: bool,
    critical_section: bool,
}

impl MockNativeStack {
    /// Build a stack with the given in-scope `frames` (ordered top to
    /// bottom, NOT including sentinels) sandwiched between a synthetic
    /// yield stub and entry marker.
    #[must_use]
    pub fn new(frames: Vec<FrameDescriptor>, capacity_words: WordOffset) -> Self {
        let stub = |pc: u64| FrameDescriptor::new(
            FrameKind::Stub,
            Word::new(pc),
            WordOffset::ZERO,
            WordOffset::ZERO,
            WordOffset::ZERO,
            false,
            false,
        );
        let mut all = Vec::with_capacity(frames.len() + 2);
        all.push(stub(contfreeze_abi::YIELD_STUB_PC.bits()));
        all.extend(frames);
        all.push(stub(0));
        Self {
            frames: all,
            capacity_words,
            fast_path_hint: true,
            critical_section: false,
        }
    }

    /// Toggle the fast-path hint this stack reports, to exercise the
    /// slow-path fallback deliberately in tests.
    pub fn set_fast_path_hint(&mut self, allowed: bool) {
        self.fast_path_hint = allowed;
    }

    /// Mark (or unmark) the entry as inside a critical section, to exercise
    /// `PINNED_CS` deliberately in tests.
    pub fn set_critical_section(&mut self, value: bool) {
        self.critical_section = value;
    }

    /// The in-scope frames only (sentinels stripped), top to bottom.
    #[must_use]
    pub fn content_frames(&self) -> &[FrameDescriptor] {
        &self.frames[1..self.frames.len() - 1]
    }
}

impl NativeStack for MockNativeStack {
    fn frame_count(&self) -> usize {
        self.frames.len()
    }

    fn frame(&self, index: usize) -> FrameDescriptor {
        self.frames[index]
    }

    fn entry_index(&self) -> usize {
        self.frames.len() - 1
    }

    fn fast_path_hint(&self) -> bool {
        self.fast_path_hint
    }

    fn in_critical_section(&self) -> bool {
        self.critical_section
    }

    fn remaining_capacity(&self) -> WordOffset {
        let used: WordOffset = self
            .content_frames()
            .iter()
            .map(FrameDescriptor::size)
            .fold(WordOffset::ZERO, |a, b| a + b);
        self.capacity_words.saturating_sub(used)
    }

    fn pop_frames(&mut self, count: usize) -> Vec<FrameDescriptor> {
        let start = 1;
        let end = start + count;
        assert!(end <= self.entry_index(), "pop_frames would remove the entry marker");
        self.frames.drain(start..end).collect()
    }

    fn push_frame(&mut self, frame: FrameDescriptor) {
        self.frames.insert(1, frame);
    }
}

#[cfg(test)]
mod mock_test;
