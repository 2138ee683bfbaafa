//! Render targets: the externally owned sinks animators write frames into.
//!
//! The host owns each [`AnimatorTarget`] behind an `Rc` and hands the
//! collection a borrow of it. The collection keeps only a `Weak` reference,
//! so it never extends a target's lifetime; writes to a dropped target are
//! silently skipped.

use std::cell::Cell;
use std::rc::{Rc, Weak};

use crate::data::{Frame, Rect};

/// Capacity of a [`ViewBuffer`].
pub const MAX_VIEWS: usize = 8;

/// Fixed-capacity set of atlas rectangles for the frame currently shown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ViewBuffer {
    pub views: [Rect; MAX_VIEWS],
    pub view_count: usize,
}

impl ViewBuffer {
    /// Copy up to [`MAX_VIEWS`] rectangles into a new buffer.
    pub fn from_views(views: &[Rect]) -> Self {
        let mut buf = Self::default();
        let n = views.len().min(MAX_VIEWS);
        buf.views[..n].copy_from_slice(&views[..n]);
        buf.view_count = n;
        buf
    }

    #[inline]
    pub fn as_slice(&self) -> &[Rect] {
        &self.views[..self.view_count]
    }
}

/// The thing being animated, as far as the collection is concerned.
#[derive(Debug, Default)]
pub struct AnimatorTarget {
    views: Cell<ViewBuffer>,
}

impl AnimatorTarget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience for hosts: a fresh target ready to be shared with a collection.
    pub fn shared() -> Rc<Self> {
        Rc::new(Self::new())
    }

    /// Rectangles of the frame most recently written.
    #[inline]
    pub fn views(&self) -> ViewBuffer {
        self.views.get()
    }

    /// First view of the current frame, if anything has been written yet.
    pub fn primary_view(&self) -> Option<Rect> {
        let views = self.views.get();
        views.as_slice().first().copied()
    }

    #[inline]
    pub(crate) fn write_frame(&self, frame: &Frame) {
        self.views.set(ViewBuffer::from_views(&frame.views));
    }
}

/// Non-owning back-reference from an animator to its target.
pub(crate) type TargetRef = Weak<AnimatorTarget>;

/// Write `frame` into the target behind `target`, if it is still alive.
#[inline]
pub(crate) fn write_to(target: &TargetRef, frame: &Frame) {
    if let Some(t) = target.upgrade() {
        t.write_frame(frame);
    }
}
