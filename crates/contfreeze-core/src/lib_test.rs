// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::chunk::StackChunk;
use crate::config::Tunables;
use crate::continuation::{Continuation, ScopeTag};
use crate::frame::FrameDescriptor;
use crate::gc::MockGc;
use crate::platform::{HostPlatform, MockNativeStack};
use crate::stats::{FreezeStats, ThawStats};
use crate::{freeze, thaw};
use contfreeze_abi::{FrameKind, ThawKind, Word, WordOffset};

/// A full cold-start round trip: freeze a single compiled frame off the
/// native stack, then thaw it straight back. Exercises every public
/// module named in the crate's own doc comment together, end to end.
#[test]
fn freeze_then_thaw_round_trips_a_single_compiled_frame() {
    let frame = FrameDescriptor::new(FrameKind::Compiled, Word::new(0x1000), WordOffset::new(4), WordOffset::ZERO, WordOffset::ZERO, true, false);
    let mut stack = MockNativeStack::new(vec![frame], WordOffset::new(64));
    let mut cont = Continuation::new(ScopeTag::new(1));
    let gc = MockGc::new();
    let platform = HostPlatform;
    let cfg = Tunables::default();
    let mut freeze_stats = FreezeStats::default();
    let mut thaw_stats = ThawStats::default();

    let result = freeze(&mut stack, &mut cont, &platform, &gc, &cfg, &mut freeze_stats);
    assert!(result.is_success());
    assert!(stack.content_frames().is_empty());
    assert!(cont.tail().is_some());

    let thaw_result = thaw(&mut stack, &mut cont, ThawKind::Top, &gc, &cfg, &mut thaw_stats);
    assert!(thaw_result.is_ok());
    assert!(cont.tail().is_none());
    assert_eq!(stack.content_frames().len(), 1);
    assert_eq!(stack.content_frames()[0].pc(), Word::new(0x1000));
}

#[test]
fn version_is_not_empty() {
    assert!(!crate::VERSION.is_empty());
}
