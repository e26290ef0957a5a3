// SPDX-License-Identifier: MIT OR Apache-2.0

//! The GC store-barrier gateway (spec component C5 / spec §4.6).
//!
//! The engine never decides on its own whether a write into a chunk needs a
//! barrier. It asks the collector through [`BarrierGateway`], exactly the
//! way the fast-path precondition checks ask `ChunkFlags` whether a chunk
//! is GC-marked rather than inspecting collector-internal state directly.

use crate::chunk::StackChunk;
use crate::stream::{ChunkFrameStream, RegisterMap};

mod mock;

pub use mock::MockGc;

/// The collector's view of a chunk, consulted by both freeze and thaw
/// before taking their fast paths.
pub trait BarrierGateway {
    /// Whether writes into `chunk` must currently go through store
    /// barriers. True disqualifies the freeze fast path (spec §4.6).
    fn requires_barriers(&self, chunk: &StackChunk) -> bool;

    /// Whether the collector is mid-cycle over `chunk`'s generation. True
    /// disqualifies both fast paths (spec §4.4, §4.5).
    fn is_gc_mode(&self, chunk: &StackChunk) -> bool;

    /// Apply store barriers across the `frame_count` frames just written at
    /// the top of the stream's chunk (spec §4.6: "on the slow path, applies
    /// store barriers over the frozen region after writing"; spec §6:
    /// `chunk.do_barriers<STORE>(stream, regmap)`). Only the newly frozen
    /// region is walked, not frames the chunk already held.
    fn do_barriers(&self, stream: &mut ChunkFrameStream<'_>, register_map: &mut RegisterMap, frame_count: usize);

    /// Clear oop-bitmap bits for the `count` words leaving the top of
    /// `chunk` during a thaw, so the collector does not trace stale
    /// now-off-heap slots (spec §4.6: "thaw clears bits for words that
    /// move into a caller frame").
    fn clear_bitmap_on_thaw(&self, chunk: &mut StackChunk, count: usize);
}
