// SPDX-License-Identifier: MIT OR Apache-2.0

//! Stack Chunk (spec component C2 / spec §3).
//!
//! A `StackChunk` is the heap object a continuation freezes its frames
//! into: a run of [`FrameDescriptor`]s ordered top (shallowest, most
//! recently frozen) to bottom (deepest, closest to the continuation's
//! entry), plus the header fields spec §3 lists by name. `sp`, `pc`, and
//! `argsize` are derived rather than stored twice, so the invariants tying
//! them to the frame list hold by construction instead of by convention.

extern crate alloc;
use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::frame::FrameDescriptor;
use contfreeze_abi::{ChunkFlags, FrameKind, Word, WordOffset, RETURN_BARRIER_PC};

/// A contiguous run of frozen frames plus the bookkeeping spec §3 requires.
pub struct StackChunk {
    /// Top-to-bottom: index 0 is the most recently frozen (shallowest)
    /// frame, the last entry is the deepest.
    frames: Vec<FrameDescriptor>,
    /// Total words currently occupied by content (spec §3 `max_size`),
    /// tracked incrementally rather than recomputed from `frames` on every
    /// read.
    content_size: WordOffset,
    /// Each frame's own net contribution to `content_size`, aligned 1:1
    /// with `frames`. A single bulk capture's own frames never overlap
    /// each other — each frame's `size()` already excludes the
    /// outgoing-argument words it shares with whatever it calls — so only
    /// the deepest frame of a given capture ever has anything subtracted,
    /// and only once: the argsize the chunk's then-current top frame had
    /// reserved for its own outgoing calls, which that capture's bottom
    /// frame now reuses. Kept per-frame (instead of recomputed) so
    /// removing a single frame from the top can undo exactly its own
    /// contribution, regardless of which capture it was part of.
    contributions: Vec<WordOffset>,
    /// High-water capacity in words; persists across empty/refill cycles
    /// so a reused chunk does not reallocate every time it drains.
    stack_size: WordOffset,
    flags: ChunkFlags,
    /// Per-word oop liveness bits, meaningful only while `HAS_BITMAP` is
    /// set. Indexed from the top of `frames` (bit 0 = first word of
    /// `frames[0]`).
    bitmap: Vec<bool>,
    parent: Option<Box<Self>>,
}

/// Plain sum of `frames`' sizes, with no overlap subtraction: correct for a
/// single region captured together in one pass, since each frame's
/// `size()` already excludes the outgoing-argument words it shares with
/// its callee. Used to size a freshly collected in-scope region before it
/// is merged into a chunk (spec §4.4) — a chunk's own accumulated
/// `max_size` is not recomputed this way, since it may carry overlap
/// already netted out at a prior freeze's seam.
#[must_use]
pub(crate) fn content_size(frames: &[FrameDescriptor]) -> WordOffset {
    frames.iter().map(FrameDescriptor::size).fold(WordOffset::ZERO, |total, size| total + size)
}

impl StackChunk {
    /// A freshly allocated, empty chunk with no capacity yet, linked to
    /// `parent` (the next-older chunk, if any — spec §3: "parent: next
    /// chunk toward the bottom").
    #[must_use]
    pub fn new(parent: Option<Box<Self>>) -> Self {
        Self {
            frames: Vec::new(),
            content_size: WordOffset::ZERO,
            contributions: Vec::new(),
            stack_size: WordOffset::ZERO,
            flags: ChunkFlags::empty(),
            bitmap: Vec::new(),
            parent,
        }
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Total words currently occupied by content, overlap already netted
    /// out (spec §3 `max_size`).
    #[inline]
    #[must_use]
    pub const fn max_size(&self) -> WordOffset {
        self.content_size
    }

    #[inline]
    #[must_use]
    pub const fn stack_size(&self) -> WordOffset {
        self.stack_size
    }

    /// Offset of the topmost live frame (spec §3 `sp`); `stack_size` when
    /// empty (invariant 1).
    #[must_use]
    pub fn sp(&self) -> WordOffset {
        self.stack_size.saturating_sub(self.max_size())
    }

    /// Outgoing argument words the bottom frame reserves for whatever lies
    /// below this chunk — the native stack, or a parent chunk.
    #[must_use]
    pub fn argsize(&self) -> WordOffset {
        self.frames.last().map_or(WordOffset::ZERO, FrameDescriptor::stack_argsize)
    }

    /// The topmost frame's return-pc slot, or `None` when empty. By
    /// construction this equals the word sitting at `sp - 1` (invariant 4):
    /// there is no separate stored copy for the two to drift apart.
    #[must_use]
    pub fn pc(&self) -> Option<Word> {
        self.frames.first().map(FrameDescriptor::pc)
    }

    #[inline]
    #[must_use]
    pub const fn flags(&self) -> ChunkFlags {
        self.flags
    }

    #[must_use]
    pub fn parent(&self) -> Option<&Self> {
        self.parent.as_deref()
    }

    pub fn parent_mut(&mut self) -> Option<&mut Self> {
        self.parent.as_deref_mut()
    }

    pub fn take_parent(&mut self) -> Option<Box<Self>> {
        self.parent.take()
    }

    pub fn set_parent(&mut self, parent: Option<Box<Self>>) {
        self.parent = parent;
        self.patch_bottom_pc();
    }

    /// Read-only view of the current frames, top to bottom.
    #[must_use]
    pub fn frames(&self) -> &[FrameDescriptor] {
        &self.frames
    }

    /// Whether `cont_size` more words of content would fit without growing
    /// `stack_size` (spec §4.4 step 3: `chunk.sp - metadata_words >=
    /// cont_size`).
    #[must_use]
    pub fn has_room(&self, cont_size: WordOffset, metadata_words: WordOffset) -> bool {
        self.sp().checked_sub(metadata_words).is_some_and(|avail| avail >= cont_size)
    }

    /// Grow `stack_size` if needed to fit `max_size() + metadata_words`.
    fn ensure_capacity(&mut self, metadata_words: WordOffset) {
        let needed = self.max_size() + metadata_words;
        if self.stack_size < needed {
            self.stack_size = needed;
        }
    }

    /// Prepend `frames` (already top-to-bottom) onto whatever this chunk
    /// currently holds, as the freeze fast path does in one bulk move
    /// (spec §4.4 steps 3-7: allocate-or-reuse, then bulk copy).
    pub fn prepend_frames(&mut self, mut frames: Vec<FrameDescriptor>, metadata_words: WordOffset) {
        if frames.is_empty() {
            return;
        }
        if frames.iter().any(|f| f.kind() != FrameKind::Compiled) {
            self.flags.insert(ChunkFlags::HAS_MIXED_FRAMES);
        }
        // Only the new batch's deepest (last) frame borders the chunk's
        // previous top, which reserved `overlap` words of outgoing args for
        // whatever it calls next; every other frame in the batch contributes
        // its own size untouched.
        let overlap = self.frames.first().map_or(WordOffset::ZERO, FrameDescriptor::stack_argsize);
        let last = frames.len() - 1;
        let mut new_contributions: Vec<WordOffset> = frames.iter().map(FrameDescriptor::size).collect();
        new_contributions[last] = new_contributions[last].saturating_sub(overlap);
        self.content_size += new_contributions.iter().copied().fold(WordOffset::ZERO, |a, b| a + b);
        new_contributions.append(&mut self.contributions);
        self.contributions = new_contributions;
        frames.append(&mut self.frames);
        self.frames = frames;
        self.ensure_capacity(metadata_words);
        self.patch_bottom_pc();
    }

    /// Push a single frame onto the top, used by the freeze slow path's
    /// per-frame recursion (spec §4.4 step 8).
    pub fn push_frame(&mut self, frame: FrameDescriptor, metadata_words: WordOffset) {
        if frame.kind() != FrameKind::Compiled {
            self.flags.insert(ChunkFlags::HAS_MIXED_FRAMES);
        }
        let overlap = self.frames.first().map_or(WordOffset::ZERO, FrameDescriptor::stack_argsize);
        let contribution = frame.size().saturating_sub(overlap);
        self.content_size += contribution;
        self.contributions.insert(0, contribution);
        self.frames.insert(0, frame);
        self.ensure_capacity(metadata_words);
        self.patch_bottom_pc();
    }

    /// Patch the bottom frame's return-pc slot per invariant 5: the
    /// return-barrier sentinel whenever a parent chunk exists, otherwise
    /// left as the true caller pc it already carries.
    fn patch_bottom_pc(&mut self) {
        if self.parent.is_some() {
            if let Some(bottom) = self.frames.last_mut() {
                bottom.set_pc(RETURN_BARRIER_PC);
            }
        }
    }

    /// Remove and return every frame, emptying this chunk for a bulk thaw.
    pub fn drain_all(&mut self) -> Vec<FrameDescriptor> {
        self.flags.remove(ChunkFlags::HAS_MIXED_FRAMES | ChunkFlags::HAS_BITMAP);
        self.bitmap.clear();
        self.content_size = WordOffset::ZERO;
        self.contributions.clear();
        core::mem::take(&mut self.frames)
    }

    /// Remove and return just the topmost frame, for a single-frame thaw.
    /// `None` if already empty.
    pub fn take_top(&mut self) -> Option<FrameDescriptor> {
        if self.frames.is_empty() {
            return None;
        }
        let contribution = self.contributions.remove(0);
        self.content_size = self.content_size.saturating_sub(contribution);
        Some(self.frames.remove(0))
    }

    /// Enable bitmap tracking with `len` bits, all initially clear.
    pub fn install_bitmap(&mut self, len: usize) {
        self.flags.insert(ChunkFlags::HAS_BITMAP);
        self.bitmap = alloc::vec![false; len];
    }

    #[must_use]
    pub fn bitmap(&self) -> &[bool] {
        &self.bitmap
    }

    /// Clear the first `count` bitmap bits (the words leaving the top of
    /// the chunk during a thaw — spec §4.6).
    pub fn clear_bitmap_prefix(&mut self, count: usize) {
        for bit in self.bitmap.iter_mut().take(count) {
            *bit = false;
        }
    }
}

#[cfg(test)]
mod chunk_test;
