//! Error type shared by every fallible operation in the crate.

use thiserror::Error;

use crate::ids::{AnimationId, AnimatorId};

/// Failure outcomes of library and animator operations.
/// An `Err` always means the call left all state unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnimatorError {
    #[error("unknown animator {0}")]
    UnknownAnimator(AnimatorId),
    #[error("unknown animation {0}")]
    UnknownAnimation(AnimationId),
    #[error("animation {id} is still referenced by {references} animator(s)")]
    StillReferenced { id: AnimationId, references: u32 },
    #[error("frame index {index} out of range for animation with {frame_count} frame(s)")]
    FrameOutOfRange { index: usize, frame_count: usize },
    #[error("invalid animation: {0}")]
    InvalidAnimation(String),
    #[error("cannot replace the animation library while {0} animator(s) are live")]
    LibraryInUse(usize),
    #[error("animation library parse error: {0}")]
    Parse(String),
}
