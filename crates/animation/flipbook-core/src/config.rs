//! Core configuration for flipbook-core.

use serde::{Deserialize, Serialize};

use crate::target::MAX_VIEWS;

/// Sizing hints and limits for an [`AnimatorCollection`](crate::AnimatorCollection).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Initial capacity of the hot schedule and the cold state map.
    pub animator_capacity: usize,
    /// Initial capacity of the clip library.
    pub animation_capacity: usize,
    /// Largest number of views a clip frame may carry. Clamped to [`MAX_VIEWS`].
    pub max_views_per_frame: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            animator_capacity: 256,
            animation_capacity: 64,
            max_views_per_frame: MAX_VIEWS,
        }
    }
}

impl Config {
    /// Effective per-frame view limit.
    #[inline]
    pub fn view_limit(&self) -> usize {
        self.max_views_per_frame.clamp(1, MAX_VIEWS)
    }
}
