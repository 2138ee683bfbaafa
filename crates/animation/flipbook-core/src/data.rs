//! Clip data model: atlas rectangles, timed frames, and clips.

use serde::{Deserialize, Serialize};

use crate::target::MAX_VIEWS;

/// Region of a texture atlas, in texels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

/// One timed step of a clip.
///
/// A frame carries one rectangle per view. Directional sprites use several
/// views (e.g. one per facing); the renderer picks among them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    /// Time the frame stays on screen, in milliseconds.
    #[serde(rename = "duration")]
    pub duration_ms: u32,
    pub views: Vec<Rect>,
}

impl Frame {
    pub fn new(rect: Rect, duration_ms: u32) -> Self {
        Self {
            duration_ms,
            views: vec![rect],
        }
    }

    pub fn with_views(views: Vec<Rect>, duration_ms: u32) -> Self {
        Self { duration_ms, views }
    }
}

/// A clip: an ordered sequence of timed frames.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationData {
    pub frames: Vec<Frame>,
}

impl AnimationData {
    pub fn new(frames: Vec<Frame>) -> Self {
        Self { frames }
    }

    /// Build a single-view clip from `(rect, duration_ms)` pairs.
    pub fn from_rects<I>(frames: I) -> Self
    where
        I: IntoIterator<Item = (Rect, u32)>,
    {
        Self {
            frames: frames
                .into_iter()
                .map(|(rect, duration_ms)| Frame::new(rect, duration_ms))
                .collect(),
        }
    }

    #[inline]
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn frame(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    /// Number of views per frame (0 for an empty clip).
    pub fn view_count(&self) -> usize {
        self.frames.first().map_or(0, |f| f.views.len())
    }

    /// Length of one pass through the clip, in milliseconds.
    pub fn total_duration_ms(&self) -> u64 {
        self.frames.iter().map(|f| u64::from(f.duration_ms)).sum()
    }

    /// Check the invariants a clip must hold before it can be published:
    /// at least one frame, non-zero durations, and the same 1..=`max_views`
    /// view count on every frame.
    pub fn validate(&self, max_views: usize) -> Result<(), String> {
        let max_views = max_views.clamp(1, MAX_VIEWS);
        let Some(first) = self.frames.first() else {
            return Err("animation must have at least one frame".into());
        };
        let views = first.views.len();
        if views == 0 || views > max_views {
            return Err(format!(
                "frames must carry between 1 and {max_views} views, found {views}"
            ));
        }
        for (idx, frame) in self.frames.iter().enumerate() {
            if frame.duration_ms == 0 {
                return Err(format!("frame {idx} has a zero duration"));
            }
            if frame.views.len() != views {
                return Err(format!(
                    "frame {idx} has {} views, expected {views}",
                    frame.views.len()
                ));
            }
        }
        Ok(())
    }
}

/// Provenance of a clip, kept for authoring tools and persisted with it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationSourceInfo {
    /// File the clip was authored from (e.g. a sprite sheet).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(i: i32) -> Rect {
        Rect::new(i * 16, 0, 16, 16)
    }

    #[test]
    fn validate_accepts_single_view_clip() {
        let clip = AnimationData::from_rects([(rect(0), 100), (rect(1), 200)]);
        assert_eq!(clip.validate(MAX_VIEWS), Ok(()));
        assert_eq!(clip.total_duration_ms(), 300);
        assert_eq!(clip.view_count(), 1);
    }

    #[test]
    fn validate_rejects_empty_and_zero_duration() {
        assert!(AnimationData::default().validate(MAX_VIEWS).is_err());
        let clip = AnimationData::from_rects([(rect(0), 100), (rect(1), 0)]);
        let err = clip.validate(MAX_VIEWS).unwrap_err();
        assert!(err.contains("frame 1"), "{err}");
    }

    #[test]
    fn validate_rejects_mismatched_or_excess_views() {
        let clip = AnimationData::new(vec![
            Frame::with_views(vec![rect(0), rect(1)], 50),
            Frame::new(rect(2), 50),
        ]);
        assert!(clip.validate(MAX_VIEWS).is_err());

        let wide = AnimationData::new(vec![Frame::with_views(vec![rect(0); 3], 50)]);
        assert!(wide.validate(2).is_err());
        assert!(wide.validate(3).is_ok());
        assert!(AnimationData::new(vec![Frame::with_views(vec![], 50)])
            .validate(MAX_VIEWS)
            .is_err());
    }
}
