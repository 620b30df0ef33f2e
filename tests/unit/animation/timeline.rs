use super::*;
use crate::animation::anim::Animation;
use crate::foundation::core::GridPos;
use crate::foundation::error::BlockmotionError;

fn group_of(anims: Vec<Animation>) -> Group {
    Group::new(anims).unwrap()
}

#[test]
fn total_frames_is_the_sum_of_group_durations() {
    let mut timeline = Timeline::new();
    timeline
        .append(group_of(vec![
            Animation::move_to("a", GridPos::ZERO, 5),
            Animation::fade_to("b", 1.0, 10),
            Animation::recolor("c", crate::foundation::core::Rgb8::RED, 3),
        ]))
        .unwrap();
    assert_eq!(timeline.total_frames(), 10);

    timeline
        .append(group_of(vec![Animation::wait(7)]))
        .unwrap();
    assert_eq!(timeline.total_frames(), 17);
}

#[test]
fn group_start_frames_are_cumulative() {
    let mut timeline = Timeline::new();
    timeline
        .append(group_of(vec![Animation::wait(10)]))
        .unwrap();
    timeline
        .append(group_of(vec![Animation::wait(4)]))
        .unwrap();
    timeline
        .append(group_of(vec![Animation::wait(6)]))
        .unwrap();

    let starts: Vec<u64> = timeline.groups_in_order().map(|(s, _)| s.0).collect();
    assert_eq!(starts, vec![0, 10, 14]);
}

#[test]
fn same_lane_overlap_within_a_group_is_rejected() {
    let mut timeline = Timeline::new();
    let err = timeline.append(group_of(vec![
        Animation::fade_to("B", 0.0, 5),
        Animation::fade_to("B", 1.0, 3),
    ]));
    assert!(matches!(
        err,
        Err(BlockmotionError::ConflictingAnimation(_))
    ));
    // The rejected group must not have been scheduled.
    assert_eq!(timeline.total_frames(), 0);
    assert_eq!(timeline.len(), 0);
}

#[test]
fn different_lanes_of_one_entity_may_overlap() {
    let mut timeline = Timeline::new();
    timeline
        .append(group_of(vec![
            Animation::move_to("B", GridPos::ZERO, 5),
            Animation::fade_to("B", 1.0, 5),
            Animation::recolor("B", crate::foundation::core::Rgb8::BLUE, 5),
        ]))
        .unwrap();
}

#[test]
fn sequential_groups_may_reuse_a_lane() {
    let mut timeline = Timeline::new();
    timeline
        .append(group_of(vec![Animation::move_to("B", GridPos::ZERO, 10)]))
        .unwrap();
    // Starts at frame 10, after the first move has fully finished.
    timeline
        .append(group_of(vec![Animation::move_to(
            "B",
            GridPos::new(1.0, 1.0),
            5,
        )]))
        .unwrap();
    assert_eq!(timeline.total_frames(), 15);
}

#[test]
fn waits_never_conflict() {
    let mut timeline = Timeline::new();
    timeline
        .append(group_of(vec![Animation::wait(5), Animation::wait(5)]))
        .unwrap();
    timeline
        .append(group_of(vec![Animation::wait(5)]))
        .unwrap();
}

#[test]
fn zero_duration_group_advances_no_frames() {
    let mut timeline = Timeline::new();
    timeline
        .append(group_of(vec![Animation::move_to("B", GridPos::ZERO, 0)]))
        .unwrap();
    assert_eq!(timeline.total_frames(), 0);
    // The snap still needs one emitted frame to land on.
    assert_eq!(timeline.playback_frames(), 1);

    // A follow-up group shares that frame; touching a different lane is fine.
    timeline
        .append(group_of(vec![Animation::fade_to("B", 1.0, 5)]))
        .unwrap();
    assert_eq!(timeline.total_frames(), 5);
    assert_eq!(timeline.playback_frames(), 5);
}

#[test]
fn zero_duration_snap_conflicts_with_same_lane_successor() {
    let mut timeline = Timeline::new();
    timeline
        .append(group_of(vec![Animation::move_to("B", GridPos::ZERO, 0)]))
        .unwrap();
    // Shares frame 0 with the pending snap on the same lane.
    let err = timeline.append(group_of(vec![Animation::move_to(
        "B",
        GridPos::new(1.0, 1.0),
        5,
    )]));
    assert!(matches!(
        err,
        Err(BlockmotionError::ConflictingAnimation(_))
    ));
}
