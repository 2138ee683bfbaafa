use std::rc::Rc;

use flipbook_core::{
    AnimationData, AnimationId, AnimatorCollection, AnimatorError, AnimatorId,
    AnimatorRepeatSetting, AnimatorStartSetting, AnimatorTarget, Frame, Rect,
};

fn rect(i: i32) -> Rect {
    Rect::new(i * 16, 0, 16, 16)
}

fn mk_clip(durations: &[u32]) -> AnimationData {
    AnimationData::from_rects(
        durations
            .iter()
            .enumerate()
            .map(|(i, d)| (rect(i as i32), *d)),
    )
}

fn start(anim: AnimationId, repeat: AnimatorRepeatSetting) -> AnimatorStartSetting {
    AnimatorStartSetting::with_repeat(anim, repeat)
}

fn setup(
    durations: &[u32],
    repeat: AnimatorRepeatSetting,
) -> (AnimatorCollection, Rc<AnimatorTarget>, AnimatorId) {
    let mut coll = AnimatorCollection::default();
    let anim = coll.add_animation(mk_clip(durations)).unwrap();
    let target = AnimatorTarget::shared();
    let id = coll.add_animator(&target, start(anim, repeat)).unwrap();
    (coll, target, id)
}

#[test]
fn add_animator_writes_first_frame_and_counts_reference() {
    let (coll, target, id) = setup(&[100, 200], AnimatorRepeatSetting::FOREVER);
    let anim = coll.animator_animation(id).unwrap();
    assert_eq!(coll.animator_frame(id), Some(0));
    assert_eq!(coll.reference_count(anim), Some(1));
    assert_eq!(target.primary_view(), Some(rect(0)));
    assert_eq!(coll.animator_count(), 1);
    assert!(coll.animator_exists(id));

    let snap = coll.inspect_animator(id).unwrap();
    assert_eq!(snap.time_left_ms, Some(100));
    assert_eq!(snap.repeats_completed, 0);
    assert!(snap.queued.is_empty());
}

/// it should hold frame 0 until t=100, frame 1 through t=300, then stay clamped on frame 1
#[test]
fn frame_advance_is_deterministic() {
    let (mut coll, target, id) = setup(&[100, 200], AnimatorRepeatSetting::ONCE);

    coll.animate(100);
    assert_eq!(coll.animator_frame(id), Some(1));
    assert_eq!(target.primary_view(), Some(rect(1)));

    coll.animate(100);
    assert_eq!(coll.animator_frame(id), Some(1));

    coll.animate(100);
    assert_eq!(coll.animator_frame(id), Some(1));
    let snap = coll.inspect_animator(id).unwrap();
    assert!(snap.is_idle());
    assert_eq!(snap.repeats_completed, 1);

    coll.animate(10_000);
    assert_eq!(coll.animator_frame(id), Some(1));
    assert_eq!(target.primary_view(), Some(rect(1)));
}

#[test]
fn frame_boundaries_carry_over_remainder() {
    let (mut coll, _target, id) = setup(&[100, 100, 100], AnimatorRepeatSetting::FOREVER);

    coll.animate(150);
    assert_eq!(coll.animator_frame(id), Some(1));
    assert_eq!(coll.inspect_animator(id).unwrap().time_left_ms, Some(50));

    coll.animate(50);
    assert_eq!(coll.animator_frame(id), Some(2));
    assert_eq!(coll.inspect_animator(id).unwrap().time_left_ms, Some(100));
}

#[test]
fn large_delta_exhausts_repeats() {
    let (mut coll, target, id) = setup(&[50, 50], AnimatorRepeatSetting::TWICE);

    coll.animate(500);
    let snap = coll.inspect_animator(id).unwrap();
    assert_eq!(snap.frame, 1);
    assert_eq!(snap.repeats_completed, 2);
    assert!(snap.is_idle());
    assert_eq!(target.primary_view(), Some(rect(1)));
}

#[test]
fn large_delta_loops_forever_with_bookkeeping() {
    let (mut coll, _target, id) = setup(&[50, 50], AnimatorRepeatSetting::FOREVER);

    coll.animate(275);
    let snap = coll.inspect_animator(id).unwrap();
    assert_eq!(snap.frame, 1);
    assert_eq!(snap.repeats_completed, 2);
    assert_eq!(snap.time_left_ms, Some(25));
}

#[test]
fn never_plays_a_single_pass() {
    let (mut coll, _target, id) = setup(&[10, 10], AnimatorRepeatSetting::NEVER);

    coll.animate(10);
    assert_eq!(coll.animator_frame(id), Some(1));
    coll.animate(10);
    let snap = coll.inspect_animator(id).unwrap();
    assert_eq!(snap.frame, 1);
    assert!(snap.is_idle());
    assert_eq!(snap.repeat, AnimatorRepeatSetting::NEVER);
}

#[test]
fn set_frame_restarts_timer_and_keeps_repeat_state() {
    let (mut coll, target, id) = setup(&[100, 200, 300], AnimatorRepeatSetting::FOREVER);

    coll.animate(350);
    assert_eq!(coll.animator_frame(id), Some(2));
    coll.animate(300);
    // wrapped once: 650ms into a 600ms clip
    let before = coll.inspect_animator(id).unwrap();
    assert_eq!(before.frame, 0);
    assert_eq!(before.repeats_completed, 1);

    coll.set_animator_frame(id, 2).unwrap();
    assert_eq!(target.primary_view(), Some(rect(2)));
    let snap = coll.inspect_animator(id).unwrap();
    assert_eq!(snap.frame, 2);
    assert_eq!(snap.time_left_ms, Some(300));
    assert_eq!(snap.repeats_completed, 1);

    assert_eq!(
        coll.set_animator_frame(id, 3),
        Err(AnimatorError::FrameOutOfRange {
            index: 3,
            frame_count: 3
        })
    );
    assert_eq!(coll.animator_frame(id), Some(2));
    assert_eq!(coll.inspect_animator(id).unwrap().time_left_ms, Some(300));
}

#[test]
fn set_frame_wakes_an_idle_animator() {
    let (mut coll, _target, id) = setup(&[10, 10], AnimatorRepeatSetting::ONCE);
    coll.animate(100);
    assert!(coll.inspect_animator(id).unwrap().is_idle());

    coll.set_animator_frame(id, 0).unwrap();
    assert_eq!(coll.inspect_animator(id).unwrap().time_left_ms, Some(10));
    coll.animate(10);
    assert_eq!(coll.animator_frame(id), Some(1));
    coll.animate(10);
    assert!(coll.inspect_animator(id).unwrap().is_idle());
    assert_eq!(coll.animator_frame(id), Some(1));
}

#[test]
fn set_animation_interrupts_and_moves_reference() {
    let mut coll = AnimatorCollection::default();
    let a = coll.add_animation(mk_clip(&[100, 100])).unwrap();
    let b = coll.add_animation(mk_clip(&[40])).unwrap();
    let c = coll.add_animation(mk_clip(&[10])).unwrap();
    let target = AnimatorTarget::shared();
    let id = coll.add_animator(&target, a).unwrap();
    coll.queue_animation(id, c).unwrap();

    coll.animate(150);
    coll.set_animator_animation(id, start(b, AnimatorRepeatSetting::ONCE), false)
        .unwrap();
    assert_eq!(coll.reference_count(a), Some(0));
    assert_eq!(coll.reference_count(b), Some(1));
    let snap = coll.inspect_animator(id).unwrap();
    assert_eq!(snap.animation, b);
    assert_eq!(snap.frame, 0);
    assert_eq!(snap.time_left_ms, Some(40));
    assert_eq!(snap.queued.len(), 1);
    assert_eq!(target.primary_view(), Some(rect(0)));

    coll.set_animator_animation(id, a, true).unwrap();
    assert!(coll.inspect_animator(id).unwrap().queued.is_empty());
    assert_eq!(coll.reference_count(a), Some(1));
    assert_eq!(coll.reference_count(b), Some(0));

    // restarting the same clip keeps its count stable
    coll.set_animator_animation(id, a, true).unwrap();
    assert_eq!(coll.reference_count(a), Some(1));

    let missing = AnimationId(999);
    assert_eq!(
        coll.set_animator_animation(id, missing, true),
        Err(AnimatorError::UnknownAnimation(missing))
    );
    assert_eq!(coll.animator_animation(id), Some(a));
}

#[test]
fn retargeting_redirects_writes() {
    let (mut coll, first, id) = setup(&[100, 100], AnimatorRepeatSetting::FOREVER);
    let second = AnimatorTarget::shared();

    coll.set_animator_target(id, &second).unwrap();
    assert_eq!(second.primary_view(), Some(rect(0)));

    coll.animate(100);
    assert_eq!(second.primary_view(), Some(rect(1)));
    assert_eq!(first.primary_view(), Some(rect(0)));
    assert_eq!(coll.animator_frame(id), Some(1));
}

#[test]
fn dropped_target_is_tolerated() {
    let (mut coll, target, id) = setup(&[10, 10], AnimatorRepeatSetting::FOREVER);
    drop(target);

    coll.animate(35);
    let snap = coll.inspect_animator(id).unwrap();
    assert!(!snap.target_alive);
    assert_eq!(snap.frame, 1);
    assert!(coll.remove_animator(id).is_ok());
}

#[test]
fn multi_view_frames_fill_the_view_buffer() {
    let mut coll = AnimatorCollection::default();
    let views = |col: i32| -> Vec<Rect> {
        (0..4)
            .map(|row| Rect::new(col * 32, row * 32, 32, 32))
            .collect()
    };
    let anim = coll
        .add_animation(AnimationData::new(vec![
            Frame::with_views(views(0), 100),
            Frame::with_views(views(1), 100),
        ]))
        .unwrap();
    let target = AnimatorTarget::shared();
    coll.add_animator(&target, anim).unwrap();

    coll.animate(100);
    let buf = target.views();
    assert_eq!(buf.view_count, 4);
    assert_eq!(buf.as_slice()[3], Rect::new(32, 96, 32, 32));
}

#[test]
fn unknown_handles_fail_without_side_effects() {
    let (mut coll, target, id) = setup(&[10], AnimatorRepeatSetting::FOREVER);
    let anim = coll.animator_animation(id).unwrap();
    let ghost = AnimatorId(404);
    let missing = AnimationId(404);

    assert_eq!(
        coll.add_animator(&target, missing),
        Err(AnimatorError::UnknownAnimation(missing))
    );
    assert_eq!(coll.animator_count(), 1);
    assert_eq!(
        coll.set_animator_animation(ghost, anim, true),
        Err(AnimatorError::UnknownAnimator(ghost))
    );
    assert_eq!(
        coll.set_animator_animation(ghost, anim, false),
        Err(AnimatorError::UnknownAnimator(ghost))
    );
    assert_eq!(coll.reference_count(anim), Some(1));
    assert_eq!(
        coll.set_animator_animation(id, missing, true),
        Err(AnimatorError::UnknownAnimation(missing))
    );
    assert_eq!(coll.animator_animation(id), Some(anim));
    assert_eq!(coll.reference_count(anim), Some(1));
    assert_eq!(
        coll.set_animator_frame(ghost, 0),
        Err(AnimatorError::UnknownAnimator(ghost))
    );
    assert_eq!(
        coll.set_animator_target(ghost, &target),
        Err(AnimatorError::UnknownAnimator(ghost))
    );
    assert_eq!(
        coll.clear_animation_queue(ghost),
        Err(AnimatorError::UnknownAnimator(ghost))
    );
    assert_eq!(coll.animator_frame(ghost), None);
    assert_eq!(coll.animator_animation(ghost), None);
    assert!(coll.inspect_animator(ghost).is_none());
    assert_eq!(coll.reference_count(missing), None);
    assert!(!coll.animator_exists(AnimatorId::INVALID));
}

#[test]
fn invalid_clips_are_rejected() {
    let mut coll = AnimatorCollection::default();
    assert!(matches!(
        coll.add_animation(mk_clip(&[])),
        Err(AnimatorError::InvalidAnimation(_))
    ));
    assert!(matches!(
        coll.add_animation(mk_clip(&[10, 0])),
        Err(AnimatorError::InvalidAnimation(_))
    ));
    assert!(coll.animations().is_empty());
}
