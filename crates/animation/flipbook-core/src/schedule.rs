//! Hot schedule: the dense array the per-tick loop walks.
//!
//! Each record holds only what every tick touches: the time left in the
//! current frame and the owning animator id. Everything else lives in the
//! cold state map. Removal swaps the last record into the hole, so the
//! caller must re-point the moved animator's cold `hot_index`.

use crate::ids::AnimatorId;

/// `time_left_ms` of an animator that finished its run with nothing queued.
/// The tick loop skips such records until the animator is redirected.
pub(crate) const IDLE: i64 = i64::MAX;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct HotState {
    pub time_left_ms: i64,
    pub animator: AnimatorId,
}

impl HotState {
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.time_left_ms == IDLE
    }
}

#[derive(Debug, Default)]
pub(crate) struct HotSchedule {
    records: Vec<HotState>,
}

impl HotSchedule {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
        }
    }

    /// Append a record and return its index.
    pub fn push(&mut self, animator: AnimatorId, time_left_ms: i64) -> usize {
        self.records.push(HotState {
            time_left_ms,
            animator,
        });
        self.records.len() - 1
    }

    /// Remove the record at `index` in O(1).
    /// Returns the id of the animator whose record moved into `index`, if any.
    pub fn swap_remove(&mut self, index: usize) -> Option<AnimatorId> {
        if index >= self.records.len() {
            return None;
        }
        self.records.swap_remove(index);
        self.records.get(index).map(|r| r.animator)
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&HotState> {
        self.records.get(index)
    }

    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut HotState> {
        self.records.get_mut(index)
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, HotState> {
        self.records.iter()
    }

    #[inline]
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, HotState> {
        self.records.iter_mut()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}
