//! AnimatorCollection: data ownership and public API for sprite animators.
//!
//! Methods:
//! - library: add_animation, remove_animation, reference_count, to_json/from_json
//! - animators: add_animator, remove_animator, set_animator_animation/target/frame,
//!   queue_animation, clear_animation_queue, accessors
//! - animate (per-tick frame advance)
//!
//! Animator state is split in two. The hot schedule is a dense `Vec` of
//! `(time_left, id)` records walked every tick; the cold map holds the rest,
//! keyed by id. Both are updated together inside each call.

use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use hashbrown::HashMap;
use log::{debug, trace, warn};

use crate::config::Config;
use crate::data::{AnimationData, AnimationSourceInfo};
use crate::error::AnimatorError;
use crate::ids::{AnimationId, AnimatorId, IdAllocator};
use crate::inspect::AnimatorSnapshot;
use crate::library::AnimationLibrary;
use crate::schedule::{HotSchedule, HotState, IDLE};
use crate::settings::{AnimatorRepeatSetting, AnimatorStartSetting};
use crate::target::{write_to, AnimatorTarget, TargetRef};

/// Cold per-animator state.
#[derive(Debug)]
struct AnimatorState {
    hot_index: usize,
    animation: AnimationId,
    frame: usize,
    repeat: AnimatorRepeatSetting,
    repeats_completed: u32,
    target: TargetRef,
    queue: VecDeque<AnimatorStartSetting>,
}

impl AnimatorState {
    fn restart(&mut self, start: AnimatorStartSetting) {
        self.animation = start.animation;
        self.repeat = start.repeat;
        self.frame = 0;
        self.repeats_completed = 0;
    }
}

/// Owns the clip library and every live animator.
#[derive(Debug)]
pub struct AnimatorCollection {
    cfg: Config,
    ids: IdAllocator<AnimatorId>,
    hot: HotSchedule,
    states: HashMap<AnimatorId, AnimatorState>,
    animations: AnimationLibrary,
}

impl Default for AnimatorCollection {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

fn first_frame_ms(data: &AnimationData) -> i64 {
    data.frames.first().map_or(IDLE, |f| i64::from(f.duration_ms))
}

/// Pop queued start settings until one names a clip that still exists.
fn next_queued(
    state: &mut AnimatorState,
    animations: &AnimationLibrary,
) -> Option<AnimatorStartSetting> {
    while let Some(start) = state.queue.pop_front() {
        if animations.contains(start.animation) {
            return Some(start);
        }
        warn!("skipping queued {}: no longer in the library", start.animation);
    }
    None
}

/// Resolve every frame transition owed by an animator whose hot timer has
/// run out. Only the final frame is written to the target.
fn advance(hot: &mut HotState, state: &mut AnimatorState, animations: &mut AnimationLibrary) {
    while hot.time_left_ms <= 0 {
        let Some(clip) = animations.get(state.animation) else {
            debug_assert!(false, "{} plays missing {}", hot.animator, state.animation);
            hot.time_left_ms = IDLE;
            return;
        };
        let frame_count = clip.frame_count();

        let next = state.frame + 1;
        if let Some(frame) = clip.frame(next) {
            state.frame = next;
            hot.time_left_ms += i64::from(frame.duration_ms);
            continue;
        }

        // One full pass is done.
        state.repeats_completed = state.repeats_completed.saturating_add(1);
        if state.repeat.allows_another_pass(state.repeats_completed) {
            state.frame = 0;
            hot.time_left_ms += first_frame_ms(clip);
            continue;
        }

        match next_queued(state, animations) {
            Some(start) => {
                trace!(
                    "{}: {} finished, starting queued {}",
                    hot.animator,
                    state.animation,
                    start.animation
                );
                animations.release(state.animation);
                animations.acquire(start.animation);
                state.restart(start);
                hot.time_left_ms += animations
                    .get(start.animation)
                    .map_or(IDLE, first_frame_ms);
            }
            None => {
                state.frame = frame_count.saturating_sub(1);
                hot.time_left_ms = IDLE;
            }
        }
    }

    if let Some(frame) = animations.frame(state.animation, state.frame) {
        write_to(&state.target, frame);
    }
}

impl AnimatorCollection {
    /// Create an empty collection with the given config.
    pub fn new(cfg: Config) -> Self {
        Self {
            ids: IdAllocator::new(),
            hot: HotSchedule::with_capacity(cfg.animator_capacity),
            states: HashMap::with_capacity(cfg.animator_capacity),
            animations: AnimationLibrary::with_capacity(
                cfg.animation_capacity,
                cfg.view_limit(),
            ),
            cfg,
        }
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    // ----- library -----

    pub fn animations(&self) -> &AnimationLibrary {
        &self.animations
    }

    pub fn add_animation(&mut self, data: AnimationData) -> Result<AnimationId, AnimatorError> {
        self.animations.add_animation(data)
    }

    pub fn add_animation_with_source(
        &mut self,
        data: AnimationData,
        source: AnimationSourceInfo,
    ) -> Result<AnimationId, AnimatorError> {
        self.animations.add_animation_with_source(data, source)
    }

    /// Remove a clip; refused while any animator currently plays it.
    pub fn remove_animation(&mut self, id: AnimationId) -> Result<(), AnimatorError> {
        self.animations.remove_animation(id).map(|_| ())
    }

    pub fn reference_count(&self, id: AnimationId) -> Option<u32> {
        self.animations.reference_count(id)
    }

    /// Export the clip library.
    pub fn to_json(&self) -> serde_json::Value {
        self.animations.to_json()
    }

    /// Replace the clip library from a JSON document.
    /// Refused while any animator is live, since they reference clips by id.
    pub fn from_json(&mut self, value: &serde_json::Value) -> Result<(), AnimatorError> {
        if !self.states.is_empty() {
            return Err(AnimatorError::LibraryInUse(self.states.len()));
        }
        self.animations = AnimationLibrary::from_json_with_limit(value, self.cfg.view_limit())?;
        Ok(())
    }

    // ----- animators -----

    /// Create an animator bound to `target`, starting at frame 0 of `start`'s clip.
    /// Frame 0 is written to the target immediately.
    pub fn add_animator(
        &mut self,
        target: &Rc<AnimatorTarget>,
        start: impl Into<AnimatorStartSetting>,
    ) -> Result<AnimatorId, AnimatorError> {
        let start = start.into();
        let clip = self
            .animations
            .get(start.animation)
            .ok_or(AnimatorError::UnknownAnimation(start.animation))?;
        let time_left = first_frame_ms(clip);
        if let Some(frame) = clip.frame(0) {
            target.write_frame(frame);
        }

        let id = self.ids.alloc();
        let hot_index = self.hot.push(id, time_left);
        self.states.insert(
            id,
            AnimatorState {
                hot_index,
                animation: start.animation,
                frame: 0,
                repeat: start.repeat,
                repeats_completed: 0,
                target: Rc::downgrade(target),
                queue: VecDeque::new(),
            },
        );
        self.animations.acquire(start.animation);
        debug_assert_eq!(self.hot.len(), self.states.len());
        debug!("added {id} playing {}", start.animation);
        Ok(id)
    }

    /// Destroy an animator. The bound target is left untouched.
    pub fn remove_animator(&mut self, id: AnimatorId) -> Result<(), AnimatorError> {
        let state = self
            .states
            .remove(&id)
            .ok_or(AnimatorError::UnknownAnimator(id))?;
        self.animations.release(state.animation);
        if let Some(moved) = self.hot.swap_remove(state.hot_index) {
            match self.states.get_mut(&moved) {
                Some(m) => m.hot_index = state.hot_index,
                None => debug_assert!(false, "hot record for {moved} has no cold state"),
            }
        }
        debug_assert_eq!(self.hot.len(), self.states.len());
        debug!("removed {id}");
        Ok(())
    }

    #[inline]
    pub fn animator_exists(&self, id: AnimatorId) -> bool {
        self.states.contains_key(&id)
    }

    #[inline]
    pub fn animator_count(&self) -> usize {
        self.states.len()
    }

    /// Live animator ids in schedule order.
    pub fn animator_ids(&self) -> impl Iterator<Item = AnimatorId> + '_ {
        self.hot.iter().map(|h| h.animator)
    }

    /// Interrupt the current run and start `start` from frame 0.
    /// With `clear_queue` false, pending settings play after the new run.
    pub fn set_animator_animation(
        &mut self,
        id: AnimatorId,
        start: impl Into<AnimatorStartSetting>,
        clear_queue: bool,
    ) -> Result<(), AnimatorError> {
        let start = start.into();
        let state = self
            .states
            .get_mut(&id)
            .ok_or(AnimatorError::UnknownAnimator(id))?;
        let clip = self
            .animations
            .get(start.animation)
            .ok_or(AnimatorError::UnknownAnimation(start.animation))?;
        let time_left = first_frame_ms(clip);
        if let Some(frame) = clip.frame(0) {
            write_to(&state.target, frame);
        }

        self.animations.release(state.animation);
        self.animations.acquire(start.animation);
        state.restart(start);
        if clear_queue {
            state.queue.clear();
        }
        if let Some(hot) = self.hot.get_mut(state.hot_index) {
            hot.time_left_ms = time_left;
        }
        Ok(())
    }

    /// Rebind the animator to another target. Playback is unaffected; the
    /// current frame is written to the new target.
    pub fn set_animator_target(
        &mut self,
        id: AnimatorId,
        target: &Rc<AnimatorTarget>,
    ) -> Result<(), AnimatorError> {
        let state = self
            .states
            .get_mut(&id)
            .ok_or(AnimatorError::UnknownAnimator(id))?;
        state.target = Rc::downgrade(target);
        if let Some(frame) = self.animations.frame(state.animation, state.frame) {
            target.write_frame(frame);
        }
        Ok(())
    }

    /// Jump to `index` in the current clip and restart that frame's timer.
    /// Repeat progress and the queue are left as they are.
    pub fn set_animator_frame(
        &mut self,
        id: AnimatorId,
        index: usize,
    ) -> Result<(), AnimatorError> {
        let state = self
            .states
            .get_mut(&id)
            .ok_or(AnimatorError::UnknownAnimator(id))?;
        let clip = self
            .animations
            .get(state.animation)
            .ok_or(AnimatorError::UnknownAnimation(state.animation))?;
        let frame = clip.frame(index).ok_or(AnimatorError::FrameOutOfRange {
            index,
            frame_count: clip.frame_count(),
        })?;

        state.frame = index;
        if let Some(hot) = self.hot.get_mut(state.hot_index) {
            hot.time_left_ms = i64::from(frame.duration_ms);
        }
        write_to(&state.target, frame);
        Ok(())
    }

    /// Append a start setting to play once the current run is exhausted.
    pub fn queue_animation(
        &mut self,
        id: AnimatorId,
        pending: impl Into<AnimatorStartSetting>,
    ) -> Result<(), AnimatorError> {
        let pending = pending.into();
        if !self.animations.contains(pending.animation) {
            return Err(AnimatorError::UnknownAnimation(pending.animation));
        }
        let state = self
            .states
            .get_mut(&id)
            .ok_or(AnimatorError::UnknownAnimator(id))?;
        state.queue.push_back(pending);
        Ok(())
    }

    pub fn clear_animation_queue(&mut self, id: AnimatorId) -> Result<(), AnimatorError> {
        let state = self
            .states
            .get_mut(&id)
            .ok_or(AnimatorError::UnknownAnimator(id))?;
        state.queue.clear();
        Ok(())
    }

    /// Current frame index, or `None` for an unknown animator.
    pub fn animator_frame(&self, id: AnimatorId) -> Option<usize> {
        self.states.get(&id).map(|s| s.frame)
    }

    /// Clip currently playing, or `None` for an unknown animator.
    pub fn animator_animation(&self, id: AnimatorId) -> Option<AnimationId> {
        self.states.get(&id).map(|s| s.animation)
    }

    /// Snapshot of an animator's internal state for tooling.
    pub fn inspect_animator(&self, id: AnimatorId) -> Option<AnimatorSnapshot> {
        let state = self.states.get(&id)?;
        let hot = self.hot.get(state.hot_index)?;
        let clip = self.animations.get(state.animation);
        Some(AnimatorSnapshot {
            id,
            animation: state.animation,
            frame: state.frame,
            frame_count: clip.map_or(0, AnimationData::frame_count),
            clip_duration_ms: clip.map_or(0, AnimationData::total_duration_ms),
            repeat: state.repeat,
            repeats_completed: state.repeats_completed,
            queued: state.queue.iter().copied().collect(),
            time_left_ms: (!hot.is_idle()).then_some(hot.time_left_ms),
            target_alive: Weak::strong_count(&state.target) > 0,
        })
    }

    /// Remove every animator and rewind the animator id allocator.
    /// Clips stay in the library with their counts back at zero.
    pub fn clear(&mut self) {
        debug!("clearing {} animators", self.states.len());
        self.hot.clear();
        self.states.clear();
        self.animations.clear_references();
        self.ids.reset();
    }

    /// Advance every animator by `dt_ms` milliseconds.
    pub fn animate(&mut self, dt_ms: u32) {
        let dt = i64::from(dt_ms);
        let states = &mut self.states;
        let animations = &mut self.animations;
        for hot in self.hot.iter_mut() {
            if hot.is_idle() {
                continue;
            }
            hot.time_left_ms -= dt;
            if hot.time_left_ms > 0 {
                continue;
            }
            match states.get_mut(&hot.animator) {
                Some(state) => advance(hot, state, animations),
                None => debug_assert!(false, "hot record for {} has no cold state", hot.animator),
            }
        }
    }
}
