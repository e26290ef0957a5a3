// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{freeze, is_pinned};
use crate::chunk::StackChunk;
use crate::config::Tunables;
use crate::continuation::{Continuation, ScopeTag};
use crate::frame::{FrameDescriptor, LocalsPointer};
use crate::gc::MockGc;
use crate::platform::{HostPlatform, MockNativeStack};
use crate::stats::{FreezeStats, ThawStats};
use crate::thaw::thaw;
use contfreeze_abi::{FrameKind, FreezeResult, PinReason, ThawKind, Word, WordOffset};

fn compiled(size: usize, argsize: usize, has_oop_map: bool, owns_monitor: bool) -> FrameDescriptor {
    FrameDescriptor::new(
        FrameKind::Compiled,
        Word::new(0xc0de),
        WordOffset::new(size),
        WordOffset::new(argsize),
        WordOffset::ZERO,
        has_oop_map,
        owns_monitor,
    )
}

fn interpreted(size: usize, owns_monitor: bool) -> FrameDescriptor {
    FrameDescriptor::new_interpreted(
        Word::new(0xbeef),
        WordOffset::new(size),
        WordOffset::ZERO,
        WordOffset::ZERO,
        WordOffset::ZERO,
        owns_monitor,
        LocalsPointer::Absolute(0x1000),
    )
}

fn native(size: usize) -> FrameDescriptor {
    FrameDescriptor::new(FrameKind::Native, Word::new(0xdead), WordOffset::new(size), WordOffset::ZERO, WordOffset::ZERO, false, false)
}

#[test]
fn freezes_all_compiled_frames_via_the_fast_path() {
    let mut stack = MockNativeStack::new(vec![compiled(4, 1, true, false), compiled(6, 0, true, false)], WordOffset::new(256));
    let mut cont = Continuation::new(ScopeTag::new(1));
    let gc = MockGc::new();
    let platform = HostPlatform;
    let cfg = Tunables::default();
    let mut stats = FreezeStats::default();

    let result = freeze(&mut stack, &mut cont, &platform, &gc, &cfg, &mut stats);

    assert_eq!(result, FreezeResult::Ok);
    assert_eq!(stats.frames_fast, 2);
    assert_eq!(stats.frames_slow, 0);
    assert!(stack.content_frames().is_empty());
    assert_eq!(cont.tail().unwrap().frames().len(), 2);
}

#[test]
fn interpreted_frame_forces_the_slow_path() {
    let mut stack = MockNativeStack::new(vec![compiled(4, 0, true, false), interpreted(6, false)], WordOffset::new(256));
    let mut cont = Continuation::new(ScopeTag::new(2));
    let gc = MockGc::new();
    let platform = HostPlatform;
    let cfg = Tunables::default();
    let mut stats = FreezeStats::default();

    let result = freeze(&mut stack, &mut cont, &platform, &gc, &cfg, &mut stats);

    assert_eq!(result, FreezeResult::Ok);
    assert_eq!(stats.frames_slow, 2);
    assert_eq!(stats.frames_fast, 0);
}

#[test]
fn compiled_frame_without_oop_map_pins_native() {
    let mut stack = MockNativeStack::new(vec![compiled(4, 0, false, false)], WordOffset::new(256));
    let mut cont = Continuation::new(ScopeTag::new(3));
    let gc = MockGc::new();
    let platform = HostPlatform;
    let cfg = Tunables::default();
    let mut stats = FreezeStats::default();

    let result = freeze(&mut stack, &mut cont, &platform, &gc, &cfg, &mut stats);

    assert_eq!(result, FreezeResult::PinnedNative);
    assert!(cont.tail().is_none());
    assert_eq!(stack.content_frames().len(), 1, "pinned freeze must not touch the native stack");
}

#[test]
fn frame_holding_a_monitor_pins_monitor() {
    let mut stack = MockNativeStack::new(vec![compiled(4, 0, true, true)], WordOffset::new(256));
    let mut cont = Continuation::new(ScopeTag::new(4));
    let gc = MockGc::new();
    let platform = HostPlatform;
    let cfg = Tunables::default();
    let mut stats = FreezeStats::default();

    let result = freeze(&mut stack, &mut cont, &platform, &gc, &cfg, &mut stats);
    assert_eq!(result, FreezeResult::PinnedMonitor);
}

#[test]
fn native_frame_pins_native() {
    let mut stack = MockNativeStack::new(vec![native(2)], WordOffset::new(256));
    let mut cont = Continuation::new(ScopeTag::new(5));
    let gc = MockGc::new();
    let platform = HostPlatform;
    let cfg = Tunables::default();
    let mut stats = FreezeStats::default();

    let result = freeze(&mut stack, &mut cont, &platform, &gc, &cfg, &mut stats);
    assert_eq!(result, FreezeResult::PinnedNative);
}

#[test]
fn pinned_freeze_records_the_pin_reason_as_advisory_state() {
    // Pinning bypasses the wrapper's tail/done staging entirely, but the
    // reason is still recorded directly on the continuation (spec §3:
    // `pinned-reason` is "the last failed freeze reason", advisory only).
    let mut stack = MockNativeStack::new(vec![native(2)], WordOffset::new(256));
    let mut cont = Continuation::new(ScopeTag::new(6));
    let gc = MockGc::new();
    let platform = HostPlatform;
    let cfg = Tunables::default();
    let mut stats = FreezeStats::default();

    let result = freeze(&mut stack, &mut cont, &platform, &gc, &cfg, &mut stats);
    assert_eq!(result, FreezeResult::PinnedNative);
    assert_eq!(cont.pinned_reason(), Some(PinReason::NativeFrame));
    assert_eq!(is_pinned(&cont), Some(PinReason::NativeFrame));
}

#[test]
fn critical_section_entry_pins_before_any_frame_is_examined() {
    let mut stack = MockNativeStack::new(vec![compiled(4, 0, true, false)], WordOffset::new(256));
    stack.set_critical_section(true);
    let mut cont = Continuation::new(ScopeTag::new(10));
    let gc = MockGc::new();
    let platform = HostPlatform;
    let cfg = Tunables::default();
    let mut stats = FreezeStats::default();

    let result = freeze(&mut stack, &mut cont, &platform, &gc, &cfg, &mut stats);

    assert_eq!(result, FreezeResult::PinnedCs);
    assert_eq!(cont.pinned_reason(), Some(PinReason::CriticalSection));
    assert_eq!(stack.content_frames().len(), 1, "pinned freeze must not touch the native stack");
}

#[test]
fn successful_freeze_clears_a_stale_pinned_reason() {
    let mut stack = MockNativeStack::new(vec![compiled(4, 0, true, false)], WordOffset::new(256));
    let mut cont = Continuation::new(ScopeTag::new(11));
    cont.set_pinned_reason(Some(PinReason::Monitor));
    let gc = MockGc::new();
    let platform = HostPlatform;
    let cfg = Tunables::default();
    let mut stats = FreezeStats::default();

    let result = freeze(&mut stack, &mut cont, &platform, &gc, &cfg, &mut stats);

    assert_eq!(result, FreezeResult::Ok);
    assert_eq!(cont.pinned_reason(), None);
    assert_eq!(is_pinned(&cont), None);
}

#[test]
fn gc_mode_tail_disqualifies_the_fast_path_even_with_all_compiled_frames() {
    let mut stack = MockNativeStack::new(vec![compiled(4, 0, true, false)], WordOffset::new(256));
    let mut cont = Continuation::new(ScopeTag::new(7));
    {
        // Seed an existing, non-empty tail so the fast path's tail check applies.
        let mut seed_stack = MockNativeStack::new(vec![compiled(2, 0, true, false)], WordOffset::new(64));
        let gc = MockGc::new();
        let platform = HostPlatform;
        let cfg = Tunables::default();
        let mut stats = FreezeStats::default();
        freeze(&mut seed_stack, &mut cont, &platform, &gc, &cfg, &mut stats);
    }
    let gc = MockGc::new();
    gc.set_gc_mode(true);
    let platform = HostPlatform;
    let cfg = Tunables::default();
    let mut stats = FreezeStats::default();

    let result = freeze(&mut stack, &mut cont, &platform, &gc, &cfg, &mut stats);

    assert_eq!(result, FreezeResult::Ok);
    assert_eq!(stats.frames_slow, 1, "GC-mode tail should force the slow path");
}

#[test]
fn reusing_a_tail_with_room_overlaps_argsize_instead_of_allocating_fresh() {
    // A tight first allocation has zero slack (stack_size == max_size +
    // metadata_words), so nothing can reuse it until a thaw leaves a
    // high-water gap behind. Freeze two frames, thaw the top one back off,
    // then freeze a new frame into the resulting room.
    let mut first = MockNativeStack::new(vec![compiled(10, 0, true, false), compiled(8, 2, true, false)], WordOffset::new(256));
    let mut cont = Continuation::new(ScopeTag::new(8));
    let platform = HostPlatform;
    let cfg = Tunables::default();
    let mut freeze_stats = FreezeStats::default();
    freeze(&mut first, &mut cont, &platform, &MockGc::new(), &cfg, &mut freeze_stats);
    assert_eq!(cont.tail().unwrap().max_size(), WordOffset::new(18));

    let thaw_gc = MockGc::new();
    thaw_gc.set_gc_mode(true); // force the slow, single-frame path
    let mut thaw_stats = ThawStats::default();
    thaw(&mut first, &mut cont, ThawKind::ReturnBarrier, &thaw_gc, &cfg, &mut thaw_stats).unwrap();
    let size_after_thaw = cont.tail().unwrap().max_size();
    assert_eq!(size_after_thaw, WordOffset::new(8), "the top frame (size 10) left the chunk");

    let mut second = MockNativeStack::new(vec![compiled(6, 0, true, false)], WordOffset::new(256));
    let freeze_gc = MockGc::new();
    freeze(&mut second, &mut cont, &platform, &freeze_gc, &cfg, &mut freeze_stats);

    // 6 new words overlap 2 old argsize words: net growth is 4, not 6.
    assert_eq!(cont.tail().unwrap().max_size(), size_after_thaw + WordOffset::new(4));
    assert_eq!(cont.tail().unwrap().frames().len(), 2, "same chunk object, grown in place");
}

#[test]
fn empty_in_scope_region_is_a_trivial_ok() {
    let mut stack = MockNativeStack::new(vec![], WordOffset::new(16));
    let mut cont = Continuation::new(ScopeTag::new(9));
    let gc = MockGc::new();
    let platform = HostPlatform;
    let cfg = Tunables::default();
    let mut stats = FreezeStats::default();

    let result = freeze(&mut stack, &mut cont, &platform, &gc, &cfg, &mut stats);
    assert_eq!(result, FreezeResult::Ok);
    assert!(cont.tail().is_none());
}

#[test]
fn slow_path_applies_store_barriers_over_the_newly_frozen_region_only() {
    let mut stack = MockNativeStack::new(vec![interpreted(4, false), interpreted(6, false)], WordOffset::new(256));
    let mut cont = Continuation::new(ScopeTag::new(12));
    let gc = MockGc::new();
    gc.set_requires_barriers(true);
    let platform = HostPlatform;
    let cfg = Tunables::default();
    let mut stats = FreezeStats::default();

    let result = freeze(&mut stack, &mut cont, &platform, &gc, &cfg, &mut stats);

    assert_eq!(result, FreezeResult::Ok);
    assert_eq!(stats.frames_slow, 2);
    assert_eq!(gc.barriers_applied(), 2, "only the 2 frames just written should be walked");
}

#[test]
fn interpreted_frame_round_trips_its_locals_pointer_through_freeze_and_thaw() {
    let mut stack = MockNativeStack::new(vec![interpreted(4, false)], WordOffset::new(256));
    let mut cont = Continuation::new(ScopeTag::new(13));
    let gc = MockGc::new();
    let platform = HostPlatform;
    let cfg = Tunables::default();
    let mut freeze_stats = FreezeStats::default();

    freeze(&mut stack, &mut cont, &platform, &gc, &cfg, &mut freeze_stats);
    let frozen = cont.tail().unwrap().frames()[0];
    assert!(
        matches!(frozen.locals(), Some(LocalsPointer::FrameRelative(_))),
        "freeze must relativize an interpreted frame's locals pointer"
    );

    let mut thaw_stats = ThawStats::default();
    thaw(&mut stack, &mut cont, ThawKind::Top, &gc, &cfg, &mut thaw_stats).unwrap();
    let reinstalled = stack.content_frames()[0];
    assert_eq!(
        reinstalled.locals(),
        Some(LocalsPointer::Absolute(0x1000)),
        "thaw must derelativize back to the original absolute locals pointer"
    );
}

#[test]
fn operand_stack_overrun_grows_the_captured_frame_size() {
    let overrun_frame = FrameDescriptor::new_interpreted(
        Word::new(0xbeef),
        WordOffset::new(4),
        WordOffset::ZERO,
        WordOffset::new(8),
        WordOffset::new(5),
        false,
        LocalsPointer::Absolute(0x2000),
    );
    let mut stack = MockNativeStack::new(vec![overrun_frame], WordOffset::new(256));
    let mut cont = Continuation::new(ScopeTag::new(14));
    let gc = MockGc::new();
    let platform = HostPlatform;
    let cfg = Tunables::default();
    let mut stats = FreezeStats::default();

    freeze(&mut stack, &mut cont, &platform, &gc, &cfg, &mut stats);

    let frozen = cont.tail().unwrap().frames()[0];
    assert_eq!(frozen.size(), WordOffset::new(7), "4 nominal words plus a 3-word overrun");
}
