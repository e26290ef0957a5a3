// SPDX-License-Identifier: MIT OR Apache-2.0

//! Frame Descriptor (spec component C1).
//!
//! A [`FrameDescriptor`] is a snapshot of one native-stack frame as reported
//! by the JIT/interpreter collaborator: its kind, its return pc, its extent,
//! and (for interpreted frames only) the one header field that needs
//! relativizing when the frame moves into a chunk. It never re-derives any
//! of this from raw memory itself — that derivation is the collaborator's
//! job (spec §4.1: "Kind is derived from the code blob containing pc").

use contfreeze_abi::{FrameKind, Word, WordOffset};

/// An interpreted frame's locals-base pointer, either absolute (while the
/// frame lives on a real native stack) or chunk-relative (while frozen).
///
/// Spec §4.4/§4.5 calls this out as the thing freeze "relativizes" and thaw
/// "derelativizes"; round-tripping through both must be the identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LocalsPointer {
    /// A real address on some native stack.
    Absolute(u64),
    /// An offset from the owning frame's own base, valid only while the
    /// frame is resident inside a stack chunk.
    FrameRelative(WordOffset),
}

impl LocalsPointer {
    /// Convert an absolute pointer to a frame-relative one. `origin` is the
    /// absolute address of the frame's own base on the native stack it was
    /// captured from.
    #[must_use]
    pub fn relativize(self, origin: u64) -> Self {
        match self {
            Self::Absolute(addr) => {
                let words = addr.saturating_sub(origin) / 8;
                #[expect(
                    clippy::cast_possible_truncation,
                    reason = "frame offsets never approach usize::MAX words"
                )]
                Self::FrameRelative(WordOffset::new(words as usize))
            }
            relative @ Self::FrameRelative(_) => relative,
        }
    }

    /// Convert a frame-relative pointer back to an absolute one against a
    /// (possibly different) new frame base. Inverse of [`relativize`].
    ///
    /// [`relativize`]: Self::relativize
    #[must_use]
    pub fn derelativize(self, origin: u64) -> Self {
        match self {
            Self::FrameRelative(offset) => {
                let bytes = offset.as_bytes() as u64;
                Self::Absolute(origin.saturating_add(bytes))
            }
            absolute @ Self::Absolute(_) => absolute,
        }
    }
}

/// One frame's worth of metadata, as supplied by the JIT/interpreter and
/// platform collaborators, independent of where the frame currently lives
/// (a native stack or a chunk).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameDescriptor {
    kind: FrameKind,
    /// The address this frame returns to: the contents of its return-pc
    /// slot (spec §3 invariants 4 and 5 talk about this slot directly).
    pc: Word,
    /// Total size of this frame's own words, not counting the outgoing
    /// argument area it shares with its callee.
    size: WordOffset,
    /// Outgoing argument words this frame reserves for whatever it calls
    /// (spec's `argsize` / `stack_argsize`).
    stack_argsize: WordOffset,
    /// `sp` and `unextended_sp` coincide except for an interpreted frame
    /// whose operand stack has grown past its nominal base; `unextended_sp`
    /// then points further down and must be honored by freeze (spec §4.4).
    sp: WordOffset,
    unextended_sp: WordOffset,
    has_oop_map: bool,
    owns_monitor: bool,
    locals: Option<LocalsPointer>,
}

impl FrameDescriptor {
    /// Build a descriptor for a compiled or native/stub frame (no locals
    /// pointer to relativize).
    #[must_use]
    pub const fn new(
        kind: FrameKind,
        pc: Word,
        size: WordOffset,
        stack_argsize: WordOffset,
        sp: WordOffset,
        has_oop_map: bool,
        owns_monitor: bool,
    ) -> Self {
        Self {
            kind,
            pc,
            size,
            stack_argsize,
            sp,
            unextended_sp: sp,
            has_oop_map,
            owns_monitor,
            locals: None,
        }
    }

    /// Build a descriptor for an interpreted frame, carrying its locals
    /// pointer and (if its operand stack overran its base) an
    /// `unextended_sp` lower than `sp`.
    #[must_use]
    #[expect(clippy::too_many_arguments, reason = "mirrors the frame's actual field count")]
    pub const fn new_interpreted(
        pc: Word,
        size: WordOffset,
        stack_argsize: WordOffset,
        sp: WordOffset,
        unextended_sp: WordOffset,
        owns_monitor: bool,
        locals: LocalsPointer,
    ) -> Self {
        Self {
            kind: FrameKind::Interpreted,
            pc,
            size,
            stack_argsize,
            sp,
            unextended_sp,
            has_oop_map: true,
            owns_monitor,
            locals: Some(locals),
        }
    }

    #[inline]
    #[must_use]
    pub const fn kind(&self) -> FrameKind {
        self.kind
    }

    #[inline]
    #[must_use]
    pub const fn pc(&self) -> Word {
        self.pc
    }

    #[inline]
    #[must_use]
    pub const fn size(&self) -> WordOffset {
        self.size
    }

    #[inline]
    #[must_use]
    pub const fn stack_argsize(&self) -> WordOffset {
        self.stack_argsize
    }

    #[inline]
    #[must_use]
    pub const fn sp(&self) -> WordOffset {
        self.sp
    }

    /// The effective top-of-frame boundary: whichever of `sp`/`unextended_sp`
    /// sits deeper (spec §4.4: "freeze must adjust to the greater [extent]").
    /// Offsets in this frame's own convention count down from its nominal
    /// top, so the deeper one — the one an overrun operand stack pushes
    /// further from that top — is the smaller raw `WordOffset`, matching
    /// `StackChunk::sp`'s own "more content means a smaller `sp`" convention.
    #[inline]
    #[must_use]
    pub fn effective_sp(&self) -> WordOffset {
        self.sp.min(self.unextended_sp)
    }

    /// How many words `effective_sp` extends past `sp`: the operand-stack
    /// overrun freeze must additionally capture for an interpreted frame
    /// whose expression stack grew past its nominal base.
    #[inline]
    #[must_use]
    pub fn overrun(&self) -> WordOffset {
        self.sp.saturating_sub(self.effective_sp())
    }

    /// Grow this frame's captured size by `extra` words, used to fold an
    /// operand-stack overrun into the region freeze copies.
    pub fn grow_size(&mut self, extra: WordOffset) {
        self.size += extra;
    }

    /// Presence of an oop map; `None` is what disqualifies a `COMPILED`
    /// frame from freezing (spec §4.4: "`COMPILED` without `oop_map` ->
    /// `PINNED_NATIVE`").
    #[inline]
    #[must_use]
    pub fn oop_map(&self) -> Option<()> {
        self.has_oop_map.then_some(())
    }

    #[inline]
    #[must_use]
    pub const fn is_owning_monitor(&self) -> bool {
        self.owns_monitor
    }

    #[inline]
    #[must_use]
    pub const fn locals(&self) -> Option<LocalsPointer> {
        self.locals
    }

    /// Overwrite this frame's return-pc slot. Used by freeze (invariant 5:
    /// patching the bottom frame with the return-barrier sentinel) and by
    /// thaw (restoring a real caller pc).
    pub fn set_pc(&mut self, pc: Word) {
        self.pc = pc;
    }

    /// Overwrite this frame's own `sp` field. Used by the platform shim's
    /// `patch_sender_sp` to re-link an interpreted frame to the sender sp
    /// it sits above once thaw has reinstalled it.
    pub fn set_sp(&mut self, sp: WordOffset) {
        self.sp = sp;
    }

    /// Relativize this frame's locals pointer in place against `origin`,
    /// the frame's own base address on the native stack it was captured
    /// from. A no-op for non-interpreted frames.
    pub fn relativize(&mut self, origin: u64) {
        if let Some(locals) = self.locals {
            self.locals = Some(locals.relativize(origin));
        }
    }

    /// Derelativize this frame's locals pointer in place against `origin`,
    /// the frame's new base address once reinstalled. A no-op for
    /// non-interpreted frames.
    pub fn derelativize(&mut self, origin: u64) {
        if let Some(locals) = self.locals {
            self.locals = Some(locals.derelativize(origin));
        }
    }
}

#[cfg(test)]
mod frame_test;
