//! Repeat and start descriptors.

use serde::{Deserialize, Serialize};

use crate::ids::AnimationId;

/// How many passes through a clip an animator makes before it looks at its queue.
///
/// The raw count is the number of passes. Any negative count plays forever.
/// `NEVER` (0) and `ONCE` (1) both play a single pass: `NEVER` states that the
/// clip is not meant to loop, and it compares unequal to `ONCE`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnimatorRepeatSetting(i32);

impl AnimatorRepeatSetting {
    pub const FOREVER: Self = Self(-1);
    pub const NEVER: Self = Self(0);
    pub const ONCE: Self = Self(1);
    pub const TWICE: Self = Self(2);

    #[inline]
    pub const fn new(count: i32) -> Self {
        Self(count)
    }

    #[inline]
    pub const fn count(self) -> i32 {
        self.0
    }

    #[inline]
    pub const fn is_forever(self) -> bool {
        self.0 < 0
    }

    /// Total passes this setting plays, or `None` for forever.
    #[inline]
    pub fn passes(self) -> Option<u32> {
        if self.is_forever() {
            None
        } else {
            Some(self.0.max(1) as u32)
        }
    }

    /// Whether another pass follows once `completed` passes have finished.
    #[inline]
    pub fn allows_another_pass(self, completed: u32) -> bool {
        match self.passes() {
            None => true,
            Some(total) => completed < total,
        }
    }
}

impl Default for AnimatorRepeatSetting {
    fn default() -> Self {
        Self::FOREVER
    }
}

/// "Play this clip this way": a clip id paired with a repeat policy.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnimatorStartSetting {
    pub animation: AnimationId,
    #[serde(default)]
    pub repeat: AnimatorRepeatSetting,
}

impl AnimatorStartSetting {
    /// Play `animation` forever.
    pub const fn new(animation: AnimationId) -> Self {
        Self {
            animation,
            repeat: AnimatorRepeatSetting::FOREVER,
        }
    }

    pub const fn with_repeat(animation: AnimationId, repeat: AnimatorRepeatSetting) -> Self {
        Self { animation, repeat }
    }
}

impl From<AnimationId> for AnimatorStartSetting {
    fn from(animation: AnimationId) -> Self {
        Self::new(animation)
    }
}

impl From<(AnimationId, AnimatorRepeatSetting)> for AnimatorStartSetting {
    fn from((animation, repeat): (AnimationId, AnimatorRepeatSetting)) -> Self {
        Self::with_repeat(animation, repeat)
    }
}
