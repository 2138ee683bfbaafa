//! Read-only animator snapshots for editors and debugging tools.
//!
//! Tooling mutates animators through the ordinary collection API; this module
//! only adds a way to see the internal playback state in one value.

use serde::Serialize;

use crate::ids::{AnimationId, AnimatorId};
use crate::settings::{AnimatorRepeatSetting, AnimatorStartSetting};

/// Point-in-time view of one animator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AnimatorSnapshot {
    pub id: AnimatorId,
    pub animation: AnimationId,
    pub frame: usize,
    pub frame_count: usize,
    /// Length of one pass through the current clip.
    pub clip_duration_ms: u64,
    pub repeat: AnimatorRepeatSetting,
    /// Passes through the current clip finished so far.
    pub repeats_completed: u32,
    pub queued: Vec<AnimatorStartSetting>,
    /// Milliseconds left in the current frame; `None` once the run has
    /// finished and the animator holds its last frame.
    pub time_left_ms: Option<i64>,
    /// Whether the bound target is still alive.
    pub target_alive: bool,
}

impl AnimatorSnapshot {
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.time_left_ms.is_none()
    }
}
