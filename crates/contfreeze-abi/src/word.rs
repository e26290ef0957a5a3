// SPDX-License-Identifier: MIT OR Apache-2.0

//! Machine-word value and word-count newtypes.
//!
//! A continuation's stack chunk (spec §3) is an array of machine words.
//! `Word` is the contents of one slot (a raw bit pattern: a return address,
//! an oop, a primitive, or padding). `WordOffset` counts words — it is used
//! for `sp`, `argsize`, `max_size`, `stack_size`, and frame sizes. Keeping
//! them as distinct types prevents accidentally adding a word *value* to a
//! word *count*.

use core::fmt;
use core::ops::{Add, AddAssign, Sub, SubAssign};

/// The raw contents of one stack slot.
///
/// Bit-identical to whatever lived at that native-stack address: a return
/// address, an object reference, a tagged primitive, or frame-header
/// metadata. `contfreeze-core` never interprets the bits itself except where
/// the spec calls for it (the return-pc slot, oop-bitmap-tracked slots).
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
#[repr(transparent)]
pub struct Word(u64);

impl Word {
    /// The all-zero word, used to pre-fill newly allocated chunk storage.
    pub const ZERO: Self = Self(0);

    /// Wrap a raw 64-bit value as a word.
    #[inline]
    #[must_use]
    pub const fn new(bits: u64) -> Self {
        Self(bits)
    }

    /// Return the raw 64-bit value.
    #[inline]
    #[must_use]
    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Reinterpret this word as a native pointer-sized code address.
    #[inline]
    #[must_use]
    pub const fn as_pc(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Word(0x{:016x})", self.0)
    }
}

impl From<u64> for Word {
    #[inline]
    fn from(bits: u64) -> Self {
        Self(bits)
    }
}

impl From<Word> for u64 {
    #[inline]
    fn from(word: Word) -> Self {
        word.0
    }
}

/// A count of (or index into) machine words inside a stack chunk.
///
/// Used for `sp`, `argsize`, `max_size`, `stack_size`, and frame/region
/// sizes throughout spec §3–§4. All arithmetic saturates rather than
/// wrapping or panicking: an offset can never legitimately go negative or
/// overflow, and a saturated result trips an assertion at the call site
/// rather than silently corrupting chunk bookkeeping.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
#[repr(transparent)]
pub struct WordOffset(usize);

impl WordOffset {
    /// The zero offset (an empty region, or the base of a chunk's array).
    pub const ZERO: Self = Self(0);

    /// Construct an offset from a word count.
    #[inline]
    #[must_use]
    pub const fn new(words: usize) -> Self {
        Self(words)
    }

    /// Return the raw word count.
    #[inline]
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }

    /// Number of bytes this many words occupy, assuming 8-byte words.
    #[inline]
    #[must_use]
    pub const fn as_bytes(self) -> usize {
        self.0 * core::mem::size_of::<u64>()
    }

    /// Saturating subtraction; used for `sp - 1` at the empty boundary and
    /// similar computations that must never underflow into a huge `usize`.
    #[inline]
    #[must_use]
    pub const fn saturating_sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }

    /// Saturating addition.
    #[inline]
    #[must_use]
    pub const fn saturating_add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }

    /// Checked subtraction, `None` on underflow.
    #[inline]
    #[must_use]
    pub const fn checked_sub(self, rhs: Self) -> Option<Self> {
        match self.0.checked_sub(rhs.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked addition, `None` on overflow.
    #[inline]
    #[must_use]
    pub const fn checked_add(self, rhs: Self) -> Option<Self> {
        match self.0.checked_add(rhs.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Round this word count up to the nearest multiple of `align` words.
    ///
    /// `align` must be a power of two; returns the offset unchanged if it
    /// is not (callers pass platform-derived constants that are always a
    /// power of two by construction).
    #[inline]
    #[must_use]
    pub const fn align_up(self, align: usize) -> Self {
        if !align.is_power_of_two() {
            return self;
        }
        let mask = align - 1;
        Self((self.0 + mask) & !mask)
    }
}

impl fmt::Debug for WordOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WordOffset({})", self.0)
    }
}

impl fmt::Display for WordOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}w", self.0)
    }
}

impl Add for WordOffset {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for WordOffset {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for WordOffset {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl SubAssign for WordOffset {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl From<usize> for WordOffset {
    #[inline]
    fn from(words: usize) -> Self {
        Self(words)
    }
}

impl From<WordOffset> for usize {
    #[inline]
    fn from(offset: WordOffset) -> Self {
        offset.0
    }
}

#[cfg(test)]
mod word_test;
