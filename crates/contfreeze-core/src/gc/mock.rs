// SPDX-License-Identifier: MIT OR Apache-2.0

//! Host test double for [`BarrierGateway`].

use super::BarrierGateway;
use crate::chunk::StackChunk;
use crate::stream::{ChunkFrameStream, RegisterMap};
use core::cell::Cell;

/// A collector stand-in whose answers are set directly by the test instead
/// of being derived from real generation/marking state.
#[derive(Default)]
pub struct MockGc {
    requires_barriers: Cell<bool>,
    gc_mode: Cell<bool>,
    barriers_applied: Cell<usize>,
}

impl MockGc {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_requires_barriers(&self, value: bool) {
        self.requires_barriers.set(value);
    }

    pub fn set_gc_mode(&self, value: bool) {
        self.gc_mode.set(value);
    }

    /// Total frames ever walked through [`do_barriers`](BarrierGateway::do_barriers),
    /// for tests to confirm the slow freeze path actually invoked it.
    #[must_use]
    pub fn barriers_applied(&self) -> usize {
        self.barriers_applied.get()
    }
}

impl BarrierGateway for MockGc {
    fn requires_barriers(&self, _chunk: &StackChunk) -> bool {
        self.requires_barriers.get()
    }

    fn is_gc_mode(&self, _chunk: &StackChunk) -> bool {
        self.gc_mode.get()
    }

    fn do_barriers(&self, stream: &mut ChunkFrameStream<'_>, register_map: &mut RegisterMap, frame_count: usize) {
        let mut walked = 0;
        while walked < frame_count && !stream.is_done() {
            stream.next(register_map);
            walked += 1;
        }
        self.barriers_applied.set(self.barriers_applied.get() + walked);
    }

    fn clear_bitmap_on_thaw(&self, chunk: &mut StackChunk, count: usize) {
        chunk.clear_bitmap_prefix(count);
    }
}

#[cfg(test)]
mod mock_test;
