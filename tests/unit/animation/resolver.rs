use super::*;
use crate::animation::state::StateStore;

fn store_with(name: &str, pos: GridPos) -> StateStore {
    let mut store = StateStore::new();
    store.register(name).position = pos;
    store
}

#[test]
fn offset_from_reads_live_parent_position() {
    let store = store_with("Genesis", GridPos::new(10.0, 40.0));
    let resolver = PositionResolver::offset_from("Genesis", Vec2::new(15.0, 0.0));
    let pos = resolver.resolve("A", &store.live()).unwrap();
    assert_eq!(pos, GridPos::new(25.0, 40.0));
}

#[test]
fn offset_from_records_parent_relative_metadata() {
    let resolver = PositionResolver::offset_from("Genesis", Vec2::new(15.0, 0.0));
    assert_eq!(resolver.refs(), ["Genesis".to_owned()]);
    assert_eq!(resolver.anchor(), AnchorMode::ParentRelative);

    let meta = resolver.pending_metadata();
    assert_eq!(meta.refs, vec!["Genesis".to_owned()]);
    assert_eq!(meta.anchor, AnchorMode::ParentRelative);
}

#[test]
fn fixed_resolver_ignores_live_state() {
    let store = StateStore::new();
    let resolver = PositionResolver::fixed(GridPos::new(3.0, 4.0));
    assert_eq!(resolver.anchor(), AnchorMode::Fixed);
    assert!(resolver.refs().is_empty());
    assert_eq!(
        resolver.resolve("A", &store.live()).unwrap(),
        GridPos::new(3.0, 4.0)
    );
}

#[test]
fn missing_reference_is_an_unknown_entity_error() {
    let store = StateStore::new();
    let resolver = PositionResolver::offset_from("Genesis", Vec2::ZERO);
    assert!(matches!(
        resolver.resolve("A", &store.live()),
        Err(BlockmotionError::UnknownEntity(_))
    ));
}

#[test]
fn non_finite_coordinates_are_rejected() {
    let store = StateStore::new();
    let resolver = PositionResolver::new([], AnchorMode::Fixed, |_, _| {
        Ok(GridPos::new(f64::NAN, 0.0))
    });
    assert!(matches!(
        resolver.resolve("A", &store.live()),
        Err(BlockmotionError::ResolverFailure(_))
    ));
}
