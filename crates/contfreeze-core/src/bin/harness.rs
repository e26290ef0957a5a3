// SPDX-License-Identifier: MIT OR Apache-2.0

//! Demo binary: freezes a small synthetic native stack into a
//! continuation's tail chunk, then thaws it straight back, logging each
//! step through `tracing`. Exists so the engine has something runnable
//! outside its own test suite; real embeddings call [`contfreeze_core`]
//! as a library.

use contfreeze_abi::{FrameKind, ThawKind, Word, WordOffset};
use contfreeze_core::config::Tunables;
use contfreeze_core::continuation::{Continuation, ScopeTag};
use contfreeze_core::frame::FrameDescriptor;
use contfreeze_core::gc::MockGc;
use contfreeze_core::platform::{HostPlatform, MockNativeStack};
use contfreeze_core::stats::{FreezeStats, ThawStats};
use contfreeze_core::{freeze, thaw};

fn synthetic_call_stack() -> Vec<FrameDescriptor> {
    vec![
        FrameDescriptor::new(FrameKind::Compiled, Word::new(0x4010), WordOffset::new(6), WordOffset::new(1), WordOffset::ZERO, true, false),
        FrameDescriptor::new(FrameKind::Compiled, Word::new(0x4020), WordOffset::new(4), WordOffset::ZERO, WordOffset::ZERO, true, false),
    ]
}

fn main() {
    tracing_subscriber::fmt::init();

    let mut stack = MockNativeStack::new(synthetic_call_stack(), WordOffset::new(256));
    let mut cont = Continuation::new(ScopeTag::new(1));
    let platform = HostPlatform;
    let gc = MockGc::new();
    let cfg = Tunables::default();
    let mut freeze_stats = FreezeStats::default();
    let mut thaw_stats = ThawStats::default();

    tracing::info!("freezing {} native frame(s)", stack.content_frames().len());
    let freeze_result = freeze(&mut stack, &mut cont, &platform, &gc, &cfg, &mut freeze_stats);
    tracing::info!(?freeze_result, fast = freeze_stats.frames_fast, slow = freeze_stats.frames_slow, "freeze complete");

    let Some(tail) = cont.tail() else {
        tracing::warn!("nothing was frozen, stopping");
        return;
    };
    tracing::info!(max_size = ?tail.max_size(), "tail chunk now holds the frozen frames");

    let thaw_result = thaw(&mut stack, &mut cont, ThawKind::Top, &gc, &cfg, &mut thaw_stats);
    match thaw_result {
        Ok(()) => tracing::info!(
            bulk = thaw_stats.frames_bulk,
            slow = thaw_stats.frames_slow,
            restored = stack.content_frames().len(),
            "thaw complete"
        ),
        Err(err) => tracing::error!(%err, "thaw failed"),
    }
}
