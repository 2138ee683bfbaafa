//! Typed handles and a monotonic allocator for each id space.
//!
//! Clip ids and animator ids are distinct types so one can never be passed
//! where the other is expected. Raw value 0 is the invalid sentinel in both
//! spaces; allocators pre-increment, so the first live id is 1.

use std::fmt;
use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

/// Common behaviour of the opaque handle types.
pub trait Handle: Copy + Eq + fmt::Debug {
    const INVALID: Self;

    fn from_raw(raw: u32) -> Self;

    fn raw(self) -> u32;

    #[inline]
    fn is_valid(self) -> bool {
        self != Self::INVALID
    }
}

/// Identifies a clip stored in the [`AnimationLibrary`](crate::AnimationLibrary).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnimationId(pub u32);

/// Identifies a live animator in an [`AnimatorCollection`](crate::AnimatorCollection).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnimatorId(pub u32);

impl AnimationId {
    pub const INVALID: Self = Self(0);
}

impl AnimatorId {
    pub const INVALID: Self = Self(0);
}

impl Handle for AnimationId {
    const INVALID: Self = AnimationId::INVALID;

    #[inline]
    fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    fn raw(self) -> u32 {
        self.0
    }
}

impl Handle for AnimatorId {
    const INVALID: Self = AnimatorId::INVALID;

    #[inline]
    fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for AnimationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "animation#{}", self.0)
    }
}

impl fmt::Display for AnimatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "animator#{}", self.0)
    }
}

/// Monotonic allocator for one handle type.
/// Only `reset` ever rewinds the counter; ids are otherwise never reused.
#[derive(Debug)]
pub struct IdAllocator<H> {
    last: u32,
    _space: PhantomData<H>,
}

impl<H> Default for IdAllocator<H> {
    fn default() -> Self {
        Self {
            last: 0,
            _space: PhantomData,
        }
    }
}

impl<H: Handle> IdAllocator<H> {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc(&mut self) -> H {
        // Wrapping past u32::MAX skips the invalid sentinel.
        self.last = self.last.wrapping_add(1).max(1);
        H::from_raw(self.last)
    }

    /// Make sure future ids are allocated strictly after `id`.
    #[inline]
    pub fn resume_after(&mut self, id: H) {
        self.last = self.last.max(id.raw());
    }

    #[inline]
    pub fn reset(&mut self) {
        self.last = 0;
    }
}
