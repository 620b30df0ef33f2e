use super::*;
use crate::foundation::core::GridPos;
use crate::foundation::error::BlockmotionError;

#[test]
fn empty_group_is_a_construction_error() {
    assert!(matches!(
        Group::new(vec![]),
        Err(BlockmotionError::EmptyGroup(_))
    ));
}

#[test]
fn group_duration_is_the_member_maximum() {
    let group = Group::new(vec![
        Animation::move_to("a", GridPos::ZERO, 5),
        Animation::fade_to("b", 1.0, 10),
        Animation::recolor("c", crate::foundation::core::Rgb8::RED, 3),
    ])
    .unwrap();
    assert_eq!(group.duration_frames(), 10);
    assert_eq!(group.len(), 3);
}

#[test]
fn proxy_drain_takes_everything_once() {
    let mut proxy = Proxy::new();
    proxy.push(Animation::wait(5));
    proxy.push(Animation::fade_to("a", 1.0, 10));
    assert_eq!(proxy.len(), 2);

    let drained = proxy.drain();
    assert_eq!(drained.len(), 2);
    assert!(proxy.is_empty());
}

#[test]
fn proxy_merge_concatenates_pending_animations() {
    let mut a = Proxy::new();
    a.push(Animation::wait(1));
    let mut b = Proxy::new();
    b.push(Animation::wait(2));
    b.push(Animation::wait(3));

    a.merge(b);
    assert_eq!(a.len(), 3);
}

#[test]
fn into_animations_flattens_proxy_collections() {
    let mut a = Proxy::new();
    a.push(Animation::fade_to("x", 1.0, 4));
    let mut b = Proxy::new();
    b.push(Animation::fade_to("y", 1.0, 4));

    let list = vec![a, b].into_animations();
    assert_eq!(list.len(), 2);
    assert_eq!(
        Animation::wait(7).into_animations()[0].duration_frames(),
        7
    );
}
