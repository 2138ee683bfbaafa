//! Flipbook Core (engine-agnostic)
//!
//! Frame-based sprite animation scheduling. An [`AnimatorCollection`] owns a
//! library of reusable clips and any number of animators, each bound to an
//! externally owned [`AnimatorTarget`]. The host calls
//! [`AnimatorCollection::animate`] once per tick with the elapsed time; every
//! animator whose frame changed gets the new atlas rectangles written into
//! its target.
//!
//! ```
//! use flipbook_core::{AnimationData, AnimatorCollection, AnimatorRepeatSetting,
//!     AnimatorStartSetting, AnimatorTarget, Rect};
//!
//! let mut animators = AnimatorCollection::default();
//! let walk = animators
//!     .add_animation(AnimationData::from_rects([
//!         (Rect::new(0, 0, 32, 32), 100),
//!         (Rect::new(32, 0, 32, 32), 100),
//!     ]))
//!     .unwrap();
//!
//! let sprite = AnimatorTarget::shared();
//! let id = animators
//!     .add_animator(
//!         &sprite,
//!         AnimatorStartSetting::with_repeat(walk, AnimatorRepeatSetting::FOREVER),
//!     )
//!     .unwrap();
//!
//! animators.animate(100);
//! assert_eq!(animators.animator_frame(id), Some(1));
//! assert_eq!(sprite.primary_view(), Some(Rect::new(32, 0, 32, 32)));
//! ```

pub mod collection;
pub mod config;
pub mod data;
pub mod error;
pub mod ids;
pub mod inspect;
pub mod library;
mod schedule;
pub mod settings;
pub mod target;

// Re-exports for consumers (hosts and tools)
pub use collection::AnimatorCollection;
pub use config::Config;
pub use data::{AnimationData, AnimationSourceInfo, Frame, Rect};
pub use error::AnimatorError;
pub use ids::{AnimationId, AnimatorId, Handle, IdAllocator};
pub use inspect::AnimatorSnapshot;
pub use library::{parse_animation_library_json, AnimationLibrary};
pub use settings::{AnimatorRepeatSetting, AnimatorStartSetting};
pub use target::{AnimatorTarget, ViewBuffer, MAX_VIEWS};
