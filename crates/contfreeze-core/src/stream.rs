// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chunk Frame Stream (spec component C3).
//!
//! Walks a chunk's frame list top to bottom without mutating it. Thaw and
//! the GC barrier pass both use this instead of indexing `StackChunk`
//! directly, so the walk logic (mode selection, argsize bookkeeping) lives
//! in one place.

use crate::chunk::StackChunk;
use crate::frame::FrameDescriptor;
use contfreeze_abi::{ChunkFlags, FrameKind, Word, WordOffset};

/// Whether the stream walks every frame individually (`Mixed`, because at
/// least one is not plain-compiled) or can let a caller skip straight to
/// bulk handling (`CompiledOnly`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StreamMode {
    Mixed,
    CompiledOnly,
}

/// Placeholder for the register-map state a real unwinder threads through
/// `next()`. Computing its contents is codegen/ABI work this crate never
/// performs (spec §1 scopes it to the JIT/interpreter); the type exists so
/// the stream's external shape matches the named contract.
#[derive(Clone, Copy, Debug, Default)]
pub struct RegisterMap {
    _opaque: (),
}

/// A cursor over one [`StackChunk`]'s frames, top to bottom.
pub struct ChunkFrameStream<'a> {
    frames: &'a [FrameDescriptor],
    index: usize,
    mode: StreamMode,
}

impl<'a> ChunkFrameStream<'a> {
    #[must_use]
    pub fn new(chunk: &'a StackChunk) -> Self {
        let mode = if chunk.flags().contains(ChunkFlags::HAS_MIXED_FRAMES) {
            StreamMode::Mixed
        } else {
            StreamMode::CompiledOnly
        };
        Self {
            frames: chunk.frames(),
            index: 0,
            mode,
        }
    }

    #[inline]
    #[must_use]
    pub const fn mode(&self) -> StreamMode {
        self.mode
    }

    #[inline]
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.index >= self.frames.len()
    }

    #[must_use]
    pub fn current(&self) -> Option<&FrameDescriptor> {
        self.frames.get(self.index)
    }

    #[must_use]
    pub fn current_pc(&self) -> Option<Word> {
        self.current().map(FrameDescriptor::pc)
    }

    #[must_use]
    pub fn current_sp(&self) -> Option<WordOffset> {
        self.current().map(FrameDescriptor::sp)
    }

    #[must_use]
    pub fn unextended_sp(&self) -> Option<WordOffset> {
        self.current().map(FrameDescriptor::effective_sp)
    }

    #[must_use]
    pub fn argsize(&self) -> WordOffset {
        self.current().map_or(WordOffset::ZERO, FrameDescriptor::stack_argsize)
    }

    #[must_use]
    pub fn is_compiled(&self) -> bool {
        self.current().is_some_and(|frame| frame.kind() == FrameKind::Compiled)
    }

    #[must_use]
    pub fn to_frame(&self) -> Option<FrameDescriptor> {
        self.current().copied()
    }

    /// Advance to the next frame. `register_map` is updated in a real
    /// embedding; here it is carried through untouched.
    pub fn next(&mut self, _register_map: &mut RegisterMap) {
        self.index += 1;
    }
}

#[cfg(test)]
mod stream_test;
