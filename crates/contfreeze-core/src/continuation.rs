// SPDX-License-Identifier: MIT OR Apache-2.0

//! Continuation Wrapper (spec component C4).
//!
//! `Continuation` is the small, durable object a mounted lightweight
//! thread owns: its scope tag, its chunk list, and whether it has run to
//! completion. `ContinuationWrapper` stages freeze's changes to it —
//! tail, done, pinned-reason — and only applies them through [`write`],
//! so a caller that decides partway through not to commit (because a pin
//! was discovered) can simply drop the wrapper instead of undoing field
//! writes one at a time.
//!
//! [`write`]: ContinuationWrapper::write

extern crate alloc;
use alloc::boxed::Box;

use crate::chunk::StackChunk;
use contfreeze_abi::PinReason;

/// Opaque identifier for the mount point a continuation belongs to. Spec
/// §3 calls this `scope`; this crate never interprets its bits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ScopeTag(u64);

impl ScopeTag {
    #[inline]
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[inline]
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// A lightweight thread's continuation: its scope, its chunk list, and
/// whether it has completed (spec §3).
pub struct Continuation {
    scope: ScopeTag,
    tail: Option<Box<StackChunk>>,
    done: bool,
    pinned_reason: Option<PinReason>,
}

impl Continuation {
    #[must_use]
    pub const fn new(scope: ScopeTag) -> Self {
        Self {
            scope,
            tail: None,
            done: false,
            pinned_reason: None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn scope(&self) -> ScopeTag {
        self.scope
    }

    #[must_use]
    pub fn tail(&self) -> Option<&StackChunk> {
        self.tail.as_deref()
    }

    pub fn tail_mut(&mut self) -> Option<&mut StackChunk> {
        self.tail.as_deref_mut()
    }

    #[inline]
    #[must_use]
    pub const fn is_done(&self) -> bool {
        self.done
    }

    #[inline]
    #[must_use]
    pub const fn pinned_reason(&self) -> Option<PinReason> {
        self.pinned_reason
    }

    /// Record the reason the most recent freeze attempt pinned, bypassing
    /// the wrapper's stage-then-commit dance. Pinning never touches the
    /// tail or done flag, so there is nothing else to stage (spec §3:
    /// `pinned-reason` is "the last failed freeze reason", advisory only).
    pub fn set_pinned_reason(&mut self, reason: Option<PinReason>) {
        self.pinned_reason = reason;
    }
}

/// Stages freeze's pending changes to a [`Continuation`] until [`write`] is
/// called; dropping without writing discards whatever the wrapper was
/// holding instead of reapplying it. Freeze only ever constructs one after
/// every pin-check has already passed, so in practice the wrapper is
/// always written.
///
/// [`write`]: Self::write
pub struct ContinuationWrapper<'a> {
    cont: &'a mut Continuation,
    tail: Option<Box<StackChunk>>,
    done: bool,
    pinned_reason: Option<PinReason>,
    committed: bool,
}

impl<'a> ContinuationWrapper<'a> {
    pub fn new(cont: &'a mut Continuation) -> Self {
        let tail = cont.tail.take();
        let done = cont.done;
        let pinned_reason = cont.pinned_reason;
        Self {
            cont,
            tail,
            done,
            pinned_reason,
            committed: false,
        }
    }

    #[must_use]
    pub fn tail(&self) -> Option<&StackChunk> {
        self.tail.as_deref()
    }

    pub fn tail_mut(&mut self) -> Option<&mut StackChunk> {
        self.tail.as_deref_mut()
    }

    /// Take the staged tail out, typically to reparent it under a freshly
    /// allocated chunk.
    pub fn take_tail(&mut self) -> Option<Box<StackChunk>> {
        self.tail.take()
    }

    pub fn set_tail(&mut self, chunk: Option<Box<StackChunk>>) {
        self.tail = chunk;
    }

    pub fn set_done(&mut self, done: bool) {
        self.done = done;
    }

    pub fn set_pinned_reason(&mut self, reason: Option<PinReason>) {
        self.pinned_reason = reason;
    }

    /// Commit the staged tail, done flag, and pinned reason back onto the
    /// continuation.
    pub fn write(mut self) {
        self.cont.tail = self.tail.take();
        self.cont.done = self.done;
        self.cont.pinned_reason = self.pinned_reason;
        self.committed = true;
    }
}

impl Drop for ContinuationWrapper<'_> {
    fn drop(&mut self) {
        if !self.committed {
            self.cont.tail = self.tail.take();
        }
    }
}

#[cfg(test)]
mod continuation_test;
