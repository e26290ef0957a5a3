// SPDX-License-Identifier: MIT OR Apache-2.0

//! The platform shim and native-stack contracts (spec component C8 and the
//! "to the JIT/interpreter" half of spec §6).
//!
//! `Platform` carries the handful of architecture-specific constants and
//! patch operations the engine needs; `NativeStack` is the thread's actual
//! call stack, walked and mutated one frame at a time. Neither trait ever
//! exposes raw bytes to the engine — frames arrive and leave as
//! [`FrameDescriptor`] values, exactly as the JIT/interpreter would hand
//! them over in a real embedding.

use crate::frame::FrameDescriptor;
use contfreeze_abi::{Word, WordOffset};

/// Architecture- and ABI-specific constants, named after spec §6's external
/// interface list verbatim.
pub trait Platform {
    /// Words of chunk-header bookkeeping reserved on top of frame content
    /// when sizing a fresh allocation (spec §4.4 step 4: "`stack_size =
    /// cont_size + metadata_words`").
    fn metadata_words(&self) -> WordOffset;

    /// Extra slack words added when sizing a bulk thaw, covering alignment
    /// padding a real embedding's frame layout can introduce.
    fn align_wiggle(&self) -> WordOffset;

    /// Byte (word) offset of a frame's return-pc slot relative to its own
    /// sender's sp, used when the shim must locate that slot directly
    /// rather than through a `FrameDescriptor`.
    fn sender_sp_ret_address_offset(&self) -> WordOffset;

    /// Round an argument-area word count up to this platform's calling
    /// convention alignment.
    fn frame_align_words(&self, words: WordOffset) -> WordOffset;

    /// Round a stack pointer (expressed as a word offset from some base) up
    /// to this platform's required frame alignment.
    fn frame_align_pointer(&self, offset: WordOffset) -> WordOffset;

    /// Overwrite the pc a frame resumes at. In a real embedding this is a
    /// raw pointer store into the frame's return-address slot; here it is
    /// delegated back to the frame value itself.
    fn patch_pc(&self, frame: &mut FrameDescriptor, pc: Word) {
        frame.set_pc(pc);
    }

    /// Re-link an interpreted frame's sender-sp once thaw has reinstalled
    /// it, so its own sender-sp-relative reads see the right caller frame
    /// (spec §6: "patch_sender_sp(interp_frame, sp)"). In a real embedding
    /// this patches a raw word in the frame; here it is delegated back to
    /// the frame value itself.
    fn patch_sender_sp(&self, frame: &mut FrameDescriptor, sp: WordOffset) {
        frame.set_sp(sp);
    }
}

/// A thread's native call stack, walked top (most recent call) to bottom.
///
/// Index `0` is always the yield-stub or return-barrier-stub sentinel frame
/// that invoked the engine; [`entry_index`] marks the first frame that
/// belongs to whatever mounted this continuation, not to the continuation
/// itself. Freeze and thaw only ever touch the frames strictly between
/// those two markers.
///
/// [`entry_index`]: NativeStack::entry_index
pub trait NativeStack {
    /// Number of frames currently tracked, sentinels included.
    fn frame_count(&self) -> usize;

    /// Describe the frame at `index`. Panics if `index >= frame_count()`;
    /// callers always range-check against it first.
    fn frame(&self, index: usize) -> FrameDescriptor;

    /// Index of the entry marker: the carrier frame below which this
    /// continuation's own content ends. Frames `1..entry_index()` are what
    /// freeze walks (index `0` is the yield stub itself, skipped).
    fn entry_index(&self) -> usize;

    /// Whether the owning thread currently permits the freeze/thaw fast
    /// path (spec §4.4 precondition: "`cont.fastPath` flag is set").
    fn fast_path_hint(&self) -> bool;

    /// Whether the entry is marked as inside a critical section, which
    /// forbids yielding outright (spec §4.4 entry contract: `PINNED_CS`).
    /// Checked once per `freeze` call, independent of any individual
    /// frame's own kind.
    fn in_critical_section(&self) -> bool;

    /// Remaining word budget before this native stack would overflow.
    /// Consulted by thaw's sizing pre-pass and by the freeze slow path's
    /// recursion guard.
    fn remaining_capacity(&self) -> WordOffset;

    /// Remove the topmost `count` frames (not including sentinels),
    /// returning their descriptors top-to-bottom. Used by freeze once a
    /// chunk is ready to receive them.
    fn pop_frames(&mut self, count: usize) -> alloc::vec::Vec<FrameDescriptor>;

    /// Push `frame` onto the top of the stack, above whatever is there now
    /// (including sentinels). Used by thaw to reinstall content.
    fn push_frame(&mut self, frame: FrameDescriptor);
}
