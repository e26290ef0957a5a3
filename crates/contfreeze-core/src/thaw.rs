// SPDX-License-Identifier: MIT OR Apache-2.0

//! Thaw Engine (spec component C7 / spec §4.5).
//!
//! Reinstalls a continuation's tail chunk onto the native stack. A chunk
//! free of every disqualifying flag (compiled-only, not GC-marked, not
//! barriered) is moved in one bulk pass; anything else is walked frame by
//! frame through [`ChunkFrameStream`](crate::stream::ChunkFrameStream)'s
//! sibling per-frame API on [`StackChunk`], bounded by how many frames the
//! entry kind permits (spec §4.5: "1 for return-barrier re-entry, 2 for
//! top thaw").
//!
//! [`prepare_thaw`] must be called (and must return a nonzero budget)
//! before [`thaw`] — it is the sizing pre-pass that turns a would-be
//! overflow into an [`Err`] instead of a stack smash.

extern crate alloc;
use alloc::vec::Vec;

use crate::chunk::{content_size, StackChunk};
use crate::config::Tunables;
use crate::continuation::{Continuation, ContinuationWrapper};
use crate::error::ThawError;
use crate::frame::FrameDescriptor;
use crate::gc::BarrierGateway;
use crate::platform::NativeStack;
use crate::stats::ThawStats;
use crate::stream::ChunkFrameStream;
use contfreeze_abi::{FrameKind, ThawKind, WordOffset};

/// This frame's own base address, the `origin` relativize (at freeze) and
/// derelativize (at thaw) are both keyed on. Mirrors `freeze`'s identical
/// helper: `sp` survives the round trip untouched, so deriving the origin
/// from it here reproduces exactly what freeze derived.
fn derelativize_origin(frame: &FrameDescriptor) -> u64 {
    frame.sp().as_bytes() as u64
}

fn is_bulk_eligible<GC: BarrierGateway>(tail: &StackChunk, gc: &GC) -> bool {
    tail.flags().fast_path_eligible() && !gc.requires_barriers(tail) && !gc.is_gc_mode(tail)
}

/// Estimate how many native-stack words thawing `cont`'s tail under `kind`
/// would need, or [`WordOffset::ZERO`] if the continuation has nothing to
/// thaw, or if thawing it would overflow `stack`'s remaining capacity.
pub fn prepare_thaw<NS, GC>(stack: &NS, cont: &Continuation, kind: ThawKind, gc: &GC, cfg: &Tunables) -> WordOffset
where
    NS: NativeStack,
    GC: BarrierGateway,
{
    let Some(tail) = cont.tail() else {
        return WordOffset::ZERO;
    };
    if tail.is_empty() {
        return WordOffset::ZERO;
    }

    let estimate = if is_bulk_eligible(tail, gc) {
        // Compiled-only and disqualification-free: the whole chunk moves in
        // one pass regardless of size, so its own header field is exact.
        tail.max_size() + cfg.align_wiggle
    } else {
        // A conservative over-estimate: it sums the top `budget` frames as
        // if freshly captured, ignoring any overlap already netted out at
        // an earlier seam within that prefix. Safe for an overflow check,
        // just occasionally pessimistic.
        let budget = kind.slow_path_frame_budget().min(tail.frames().len());
        content_size(&tail.frames()[..budget]) + cfg.align_wiggle
    };

    if stack.remaining_capacity() < estimate {
        WordOffset::ZERO
    } else {
        estimate
    }
}

/// Reinstall `cont`'s tail chunk onto `stack`, bulk-copying a
/// fast-path-eligible chunk or walking up to `kind`'s frame budget
/// otherwise. A chunk left non-empty after a slow-path thaw, or one that
/// graduates to its parent after emptying, stays (or becomes) the new
/// tail.
///
/// # Errors
///
/// Returns [`ThawError::Overflow`] if [`prepare_thaw`] reports this thaw
/// would not fit; no state is mutated in that case.
pub fn thaw<NS, GC>(
    stack: &mut NS,
    cont: &mut Continuation,
    kind: ThawKind,
    gc: &GC,
    cfg: &Tunables,
    stats: &mut ThawStats,
) -> Result<(), ThawError>
where
    NS: NativeStack,
    GC: BarrierGateway,
{
    let has_content = cont.tail().is_some_and(|tail| !tail.is_empty());
    if !has_content {
        return Ok(());
    }
    if prepare_thaw(stack, cont, kind, gc, cfg) == WordOffset::ZERO {
        #[cfg(feature = "std")]
        tracing::warn!(%kind, "thaw would overflow the native stack");
        return Err(ThawError::Overflow);
    }

    let mut wrapper = ContinuationWrapper::new(cont);
    let mut tail = wrapper.take_tail().expect("has_content checked above");

    if is_bulk_eligible(&tail, gc) {
        #[cfg(feature = "std")]
        if tail.max_size() >= cfg.bulk_thaw_threshold {
            tracing::debug!(words = ?tail.max_size(), "bulk-thawing a large chunk in one pass");
        }
        let frames = tail.drain_all();
        let count = frames.len();
        gc.clear_bitmap_on_thaw(&mut tail, count);
        for frame in frames.into_iter().rev() {
            stack.push_frame(frame);
        }
        stats.record_bulk(count);
        #[cfg(feature = "std")]
        tracing::trace!(frames = count, "thaw bulk path");
    } else {
        let budget = kind.slow_path_frame_budget();
        let mut popped = Vec::with_capacity(budget);
        while popped.len() < budget {
            #[cfg(feature = "std")]
            {
                let stream = ChunkFrameStream::new(&tail);
                tracing::trace!(pc = ?stream.current_pc(), "thaw slow path inspecting frame");
            }
            match tail.take_top() {
                Some(mut frame) => {
                    if frame.kind() == FrameKind::Deoptimized {
                        stats.record_deopt();
                    }
                    frame.derelativize(derelativize_origin(&frame));
                    popped.push(frame);
                }
                None => break,
            }
        }
        let count = popped.len();
        for frame in popped.into_iter().rev() {
            stack.push_frame(frame);
        }
        gc.clear_bitmap_on_thaw(&mut tail, count);
        stats.record_slow(count);
        #[cfg(feature = "std")]
        tracing::trace!(frames = count, kind = %kind, "thaw slow path");
    }

    if tail.is_empty() {
        wrapper.set_tail(tail.take_parent());
    } else {
        wrapper.set_tail(Some(tail));
    }
    wrapper.write();
    Ok(())
}

#[cfg(test)]
mod thaw_test;
