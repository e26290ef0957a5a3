// SPDX-License-Identifier: MIT OR Apache-2.0

//! Freeze Engine (spec component C6 / spec §4.4).
//!
//! Captures the frames between a yield stub and a continuation's entry
//! into its tail chunk. Tries the compiled-only fast path first; any frame
//! that disqualifies it falls back to the frame-by-frame slow path
//! instead of failing outright. Pinning is checked up front, over the
//! whole in-scope region, so a pinned freeze leaves both the native stack
//! and the continuation completely untouched (spec §7).

extern crate alloc;
use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::chunk::{content_size, StackChunk};
use crate::config::Tunables;
use crate::continuation::{Continuation, ContinuationWrapper};
use crate::frame::FrameDescriptor;
use crate::gc::BarrierGateway;
use crate::platform::{NativeStack, Platform};
use crate::stats::FreezeStats;
use crate::stream::{ChunkFrameStream, RegisterMap};
use contfreeze_abi::{FreezeResult, PinReason, WordOffset};

/// Whether a continuation's last freeze attempt left it pinned, and why
/// (spec §6 external interface: `is_pinned(scope) -> int`, queried by the
/// language frontend before attempting a `freeze()` call). Advisory only —
/// nothing stops a caller from calling `freeze()` regardless.
#[inline]
#[must_use]
pub fn is_pinned(cont: &Continuation) -> Option<PinReason> {
    cont.pinned_reason()
}

/// This frame's own base address, used as the `origin` both relativize (at
/// freeze) and derelativize (at thaw) are keyed on. `sp` is never mutated
/// by either operation, so deriving the same origin from it at both ends
/// of the round trip reproduces the frame's locals pointer exactly.
fn relativize_origin(frame: &FrameDescriptor) -> u64 {
    frame.sp().as_bytes() as u64
}

fn pin_check(frame: &FrameDescriptor) -> Option<PinReason> {
    use contfreeze_abi::FrameKind;
    match frame.kind() {
        FrameKind::Compiled => {
            if frame.oop_map().is_none() {
                Some(PinReason::NativeFrame)
            } else if frame.is_owning_monitor() {
                Some(PinReason::Monitor)
            } else {
                None
            }
        }
        FrameKind::Interpreted => {
            if frame.is_owning_monitor() {
                Some(PinReason::Monitor)
            } else {
                None
            }
        }
        FrameKind::Native | FrameKind::Stub => Some(PinReason::NativeFrame),
        FrameKind::Deoptimized => None,
    }
}

fn collect_in_scope<NS: NativeStack>(stack: &NS) -> Vec<FrameDescriptor> {
    (1..stack.entry_index())
        .map(|index| {
            let mut frame = stack.frame(index);
            let overrun = frame.overrun();
            if overrun > WordOffset::ZERO {
                frame.grow_size(overrun);
            }
            frame
        })
        .collect()
}

fn fast_path_eligible<NS, GC>(stack: &NS, cont: &Continuation, gc: &GC, frames: &[FrameDescriptor]) -> bool
where
    NS: NativeStack,
    GC: BarrierGateway,
{
    if !stack.fast_path_hint() {
        return false;
    }
    if !frames.iter().all(|frame| frame.kind().is_fast_path_eligible()) {
        return false;
    }
    match cont.tail() {
        Some(tail) => tail.flags().fast_path_eligible() && !gc.requires_barriers(tail) && !gc.is_gc_mode(tail),
        None => true,
    }
}

/// Walk the frames between the yield stub and the continuation's entry and
/// move them into `cont`'s tail chunk, taking the fast or slow path as
/// appropriate. Returns a [`FreezeResult`]; pinning never mutates anything.
pub fn freeze<NS, PF, GC>(
    stack: &mut NS,
    cont: &mut Continuation,
    _platform: &PF,
    gc: &GC,
    cfg: &Tunables,
    stats: &mut FreezeStats,
) -> FreezeResult
where
    NS: NativeStack,
    PF: Platform,
    GC: BarrierGateway,
{
    if stack.in_critical_section() {
        stats.record_pin();
        #[cfg(feature = "std")]
        tracing::debug!(reason = %PinReason::CriticalSection, "freeze pinned");
        cont.set_pinned_reason(Some(PinReason::CriticalSection));
        return FreezeResult::PinnedCs;
    }

    let frames = collect_in_scope(stack);
    if frames.is_empty() {
        return FreezeResult::Ok;
    }

    for frame in &frames {
        if let Some(reason) = pin_check(frame) {
            stats.record_pin();
            #[cfg(feature = "std")]
            tracing::debug!(%reason, "freeze pinned");
            cont.set_pinned_reason(Some(reason));
            return match reason {
                PinReason::CriticalSection => FreezeResult::PinnedCs,
                PinReason::NativeFrame => FreezeResult::PinnedNative,
                PinReason::Monitor => FreezeResult::PinnedMonitor,
            };
        }
    }

    if stack.remaining_capacity() < cfg.metadata_words {
        return FreezeResult::Exception;
    }

    let take_fast_path = fast_path_eligible(stack, cont, gc, &frames);
    let mut wrapper = ContinuationWrapper::new(cont);
    wrapper.set_pinned_reason(None);
    stack.pop_frames(frames.len());

    if take_fast_path {
        let needed = content_size(&frames);
        let reuse = wrapper
            .tail()
            .is_some_and(|tail| !tail.is_empty() && tail.has_room(needed, cfg.metadata_words));

        if reuse {
            wrapper.tail_mut().expect("checked above").prepend_frames(frames.clone(), cfg.metadata_words);
        } else {
            let parent = wrapper.take_tail();
            let mut chunk = StackChunk::new(parent);
            chunk.prepend_frames(frames.clone(), cfg.metadata_words);
            wrapper.set_tail(Some(Box::new(chunk)));
        }
        stats.record_fast(frames.len());
        #[cfg(feature = "std")]
        tracing::trace!(frames = frames.len(), "freeze fast path");
    } else {
        if wrapper.tail().is_none() {
            wrapper.set_tail(Some(Box::new(StackChunk::new(None))));
        }
        let tail = wrapper.tail_mut().expect("just ensured a tail exists");
        for frame in frames.iter().rev() {
            let mut frame = *frame;
            frame.relativize(relativize_origin(&frame));
            tail.push_frame(frame, cfg.metadata_words);
        }
        stats.record_slow(frames.len());
        #[cfg(feature = "std")]
        tracing::trace!(frames = frames.len(), "freeze slow path");

        if let Some(tail) = wrapper.tail() {
            if gc.requires_barriers(tail) {
                let mut stream = ChunkFrameStream::new(tail);
                let mut register_map = RegisterMap::default();
                gc.do_barriers(&mut stream, &mut register_map, frames.len());
            }
        }
    }

    wrapper.write();
    FreezeResult::Ok
}

#[cfg(test)]
mod freeze_test;
