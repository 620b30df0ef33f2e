use super::*;
use crate::animation::state::StateStore;
use crate::consensus::block::BlockContext;
use crate::foundation::core::GridPos;

fn add(ctx: &mut BlockContext, id: &str, parents: &[&str]) {
    let rules = NakamotoRules;
    let parents = parents.iter().map(|p| (*p).into()).collect();
    let mut block = ConsensusBlock::new(id, "nakamoto", parents);
    rules.validate_parents(&block, ctx).unwrap();
    block.data = rules.compute_consensus_data(&block, ctx);
    ctx.insert(id.to_owned(), block);
}

#[test]
fn multi_parent_blocks_are_rejected() {
    let mut ctx = BlockContext::new();
    add(&mut ctx, "G", &[]);
    add(&mut ctx, "A", &["G"]);

    let block = ConsensusBlock::new("X", "nakamoto", vec!["G".into(), "A".into()]);
    assert!(matches!(
        NakamotoRules.validate_parents(&block, &ctx),
        Err(BlockmotionError::Validation(_))
    ));
}

#[test]
fn second_genesis_is_rejected() {
    let mut ctx = BlockContext::new();
    add(&mut ctx, "G", &[]);
    let block = ConsensusBlock::new("G2", "nakamoto", vec![]);
    assert!(NakamotoRules.validate_parents(&block, &ctx).is_err());
}

#[test]
fn chain_height_increments_per_block() {
    let mut ctx = BlockContext::new();
    add(&mut ctx, "G", &[]);
    add(&mut ctx, "A", &["G"]);
    add(&mut ctx, "B", &["A"]);
    assert_eq!(ctx["B"].data.height, 2);
    assert_eq!(ctx["B"].data.blue_score, 2);
    assert_eq!(ctx["B"].data.selected_parent.as_deref(), Some("A"));
}

#[test]
fn first_child_extends_the_parent_row() {
    let layout = DagLayout::default();
    let mut ctx = BlockContext::new();
    add(&mut ctx, "G", &[]);

    let mut block = ConsensusBlock::new("A", "nakamoto", vec!["G".into()]);
    block.data = NakamotoRules.compute_consensus_data(&block, &ctx);
    let resolver = NakamotoRules.compute_position(&block, &ctx, &layout);

    let mut store = StateStore::new();
    store.register("G").position = layout.genesis_pos;
    assert_eq!(
        resolver.resolve("A", &store.live()).unwrap(),
        layout.genesis_pos + Vec2::new(layout.block_spacing, 0.0)
    );
}

#[test]
fn fork_sibling_is_displaced_by_the_fork_offset() {
    let layout = DagLayout::default();
    let mut ctx = BlockContext::new();
    add(&mut ctx, "G", &[]);
    add(&mut ctx, "A", &["G"]);
    add(&mut ctx, "B", &["A"]);

    // Competing child of A: slot 1, displaced +fork_offset.
    let mut fork = ConsensusBlock::new("B2", "nakamoto", vec!["A".into()]);
    fork.data = NakamotoRules.compute_consensus_data(&fork, &ctx);
    let resolver = NakamotoRules.compute_position(&fork, &ctx, &layout);

    let mut store = StateStore::new();
    store.register("A").position = GridPos::new(16.0, 25.0);
    assert_eq!(
        resolver.resolve("B2", &store.live()).unwrap(),
        GridPos::new(16.0 + layout.block_spacing, 25.0 + layout.fork_offset)
    );
}
