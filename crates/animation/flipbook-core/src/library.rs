//! Animation library: the authoritative clip set plus per-clip reference counts.

use hashbrown::HashMap;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::data::{AnimationData, AnimationSourceInfo, Frame};
use crate::error::AnimatorError;
use crate::ids::{AnimationId, Handle, IdAllocator};
use crate::target::MAX_VIEWS;

#[derive(Debug)]
struct LibraryEntry {
    data: AnimationData,
    source: Option<AnimationSourceInfo>,
    references: u32,
}

/// Clip store keyed by [`AnimationId`].
///
/// A clip can only be removed while no animator plays it. Counts are
/// maintained by the owning [`AnimatorCollection`](crate::AnimatorCollection).
#[derive(Debug)]
pub struct AnimationLibrary {
    ids: IdAllocator<AnimationId>,
    entries: HashMap<AnimationId, LibraryEntry>,
    max_views: usize,
}

impl Default for AnimationLibrary {
    fn default() -> Self {
        Self::with_capacity(0, MAX_VIEWS)
    }
}

impl AnimationLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize, max_views: usize) -> Self {
        Self {
            ids: IdAllocator::new(),
            entries: HashMap::with_capacity(capacity),
            max_views: max_views.clamp(1, MAX_VIEWS),
        }
    }

    /// Store a clip, returning its new id. The reference count starts at zero.
    pub fn add_animation(&mut self, data: AnimationData) -> Result<AnimationId, AnimatorError> {
        self.insert(data, None)
    }

    /// Store a clip together with its provenance.
    pub fn add_animation_with_source(
        &mut self,
        data: AnimationData,
        source: AnimationSourceInfo,
    ) -> Result<AnimationId, AnimatorError> {
        self.insert(data, Some(source))
    }

    fn insert(
        &mut self,
        data: AnimationData,
        source: Option<AnimationSourceInfo>,
    ) -> Result<AnimationId, AnimatorError> {
        data.validate(self.max_views)
            .map_err(AnimatorError::InvalidAnimation)?;
        let id = self.ids.alloc();
        debug!("adding {id} ({} frames)", data.frame_count());
        self.entries.insert(
            id,
            LibraryEntry {
                data,
                source,
                references: 0,
            },
        );
        Ok(id)
    }

    /// Erase a clip. Fails while any animator still plays it.
    pub fn remove_animation(&mut self, id: AnimationId) -> Result<AnimationData, AnimatorError> {
        let entry = self
            .entries
            .get(&id)
            .ok_or(AnimatorError::UnknownAnimation(id))?;
        if entry.references != 0 {
            return Err(AnimatorError::StillReferenced {
                id,
                references: entry.references,
            });
        }
        debug!("removing {id}");
        self.entries
            .remove(&id)
            .map(|e| e.data)
            .ok_or(AnimatorError::UnknownAnimation(id))
    }

    /// Number of animators currently playing `id`, or `None` for an unknown id.
    #[inline]
    pub fn reference_count(&self, id: AnimationId) -> Option<u32> {
        self.entries.get(&id).map(|e| e.references)
    }

    #[inline]
    pub fn get(&self, id: AnimationId) -> Option<&AnimationData> {
        self.entries.get(&id).map(|e| &e.data)
    }

    pub fn source_info(&self, id: AnimationId) -> Option<&AnimationSourceInfo> {
        self.entries.get(&id).and_then(|e| e.source.as_ref())
    }

    #[inline]
    pub fn contains(&self, id: AnimationId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All clip ids in ascending order.
    pub fn ids(&self) -> Vec<AnimationId> {
        let mut ids: Vec<AnimationId> = self.entries.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Clips in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (AnimationId, &AnimationData)> + '_ {
        self.ids()
            .into_iter()
            .filter_map(move |id| self.get(id).map(|d| (id, d)))
    }

    #[inline]
    pub(crate) fn frame(&self, id: AnimationId, index: usize) -> Option<&Frame> {
        self.get(id).and_then(|d| d.frame(index))
    }

    pub(crate) fn acquire(&mut self, id: AnimationId) {
        let entry = self.entries.get_mut(&id);
        debug_assert!(entry.is_some(), "acquire of unknown {id}");
        if let Some(entry) = entry {
            entry.references += 1;
        }
    }

    pub(crate) fn release(&mut self, id: AnimationId) {
        let entry = self.entries.get_mut(&id);
        debug_assert!(
            entry.as_ref().is_some_and(|e| e.references > 0),
            "release of unreferenced {id}"
        );
        if let Some(entry) = entry {
            entry.references = entry.references.saturating_sub(1);
        }
    }

    pub(crate) fn clear_references(&mut self) {
        for entry in self.entries.values_mut() {
            entry.references = 0;
        }
    }

    /// Export the clip set as a JSON document, ordered by id.
    /// Reference counts are derived from live animators and are not written.
    pub fn to_json(&self) -> serde_json::Value {
        let doc = StoredLibrary {
            animations: self
                .ids()
                .into_iter()
                .filter_map(|id| {
                    self.entries.get(&id).map(|e| StoredClip {
                        id,
                        source: e.source.clone(),
                        frames: e.data.frames.clone(),
                    })
                })
                .collect(),
        };
        // Plain structs of integers and strings always serialize.
        serde_json::to_value(doc).unwrap_or(serde_json::Value::Null)
    }

    /// Rebuild a library from a document produced by [`to_json`](Self::to_json).
    /// Ids are preserved and every reference count starts at zero.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, AnimatorError> {
        Self::from_json_with_limit(value, MAX_VIEWS)
    }

    pub fn from_json_with_limit(
        value: &serde_json::Value,
        max_views: usize,
    ) -> Result<Self, AnimatorError> {
        let doc = StoredLibrary::deserialize(value)
            .map_err(|e| AnimatorError::Parse(e.to_string()))?;
        Self::from_stored(doc, max_views)
    }

    fn from_stored(doc: StoredLibrary, max_views: usize) -> Result<Self, AnimatorError> {
        let mut lib = Self::with_capacity(doc.animations.len(), max_views);
        for clip in doc.animations {
            if !clip.id.is_valid() {
                return Err(AnimatorError::Parse(format!("invalid animation id {}", clip.id.0)));
            }
            if lib.entries.contains_key(&clip.id) {
                return Err(AnimatorError::Parse(format!("duplicate {}", clip.id)));
            }
            let data = AnimationData::new(clip.frames);
            data.validate(lib.max_views)
                .map_err(|e| AnimatorError::InvalidAnimation(format!("{}: {e}", clip.id)))?;
            lib.ids.resume_after(clip.id);
            lib.entries.insert(
                clip.id,
                LibraryEntry {
                    data,
                    source: clip.source,
                    references: 0,
                },
            );
        }
        Ok(lib)
    }
}

/// Parse a library JSON document from text.
pub fn parse_animation_library_json(s: &str) -> Result<AnimationLibrary, AnimatorError> {
    let doc: StoredLibrary =
        serde_json::from_str(s).map_err(|e| AnimatorError::Parse(e.to_string()))?;
    AnimationLibrary::from_stored(doc, MAX_VIEWS)
}

// ----- JSON schema (serde) -----

#[derive(Debug, Serialize, Deserialize)]
struct StoredLibrary {
    #[serde(default)]
    animations: Vec<StoredClip>,
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredClip {
    id: AnimationId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    source: Option<AnimationSourceInfo>,
    frames: Vec<Frame>,
}
