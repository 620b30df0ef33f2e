use super::*;
use crate::animation::state::StateStore;

fn add(ctx: &mut BlockContext, rules: &dyn ConsensusRules, id: &str, parents: &[&str]) {
    let parents = parents.iter().map(|p| (*p).into()).collect();
    let mut block = ConsensusBlock::new(id, rules.tag(), parents);
    rules.validate_parents(&block, ctx).unwrap();
    block.data = rules.compute_consensus_data(&block, ctx);
    ctx.insert(id.to_owned(), block);
}

#[test]
fn sibling_offsets_alternate_around_the_parent_row() {
    assert_eq!(sibling_offset(0, 8.0), 0.0);
    assert_eq!(sibling_offset(1, 8.0), 8.0);
    assert_eq!(sibling_offset(2, 8.0), -8.0);
    assert_eq!(sibling_offset(3, 8.0), 16.0);
    assert_eq!(sibling_offset(4, 8.0), -16.0);
}

#[test]
fn registry_rejects_unknown_tags() {
    let registry = ConsensusRegistry::with_defaults();
    assert!(registry.rules("basic").is_ok());
    assert!(matches!(
        registry.rules("proof-of-vibes"),
        Err(BlockmotionError::Validation(_))
    ));
}

#[test]
fn default_registry_lists_builtin_tags_in_order() {
    let registry = ConsensusRegistry::with_defaults();
    let tags: Vec<&str> = registry.supported_tags().collect();
    assert_eq!(tags, vec!["basic", "ghostdag", "nakamoto"]);
}

#[test]
fn later_registration_replaces_earlier_for_the_same_tag() {
    struct FlatBasic;
    impl ConsensusRules for FlatBasic {
        fn tag(&self) -> &'static str {
            "basic"
        }
        fn validate_parents(
            &self,
            _block: &ConsensusBlock,
            _ctx: &BlockContext,
        ) -> BlockmotionResult<()> {
            Ok(())
        }
        fn compute_consensus_data(
            &self,
            _block: &ConsensusBlock,
            _ctx: &BlockContext,
        ) -> ConsensusData {
            ConsensusData::default()
        }
        fn compute_position(
            &self,
            _block: &ConsensusBlock,
            _ctx: &BlockContext,
            layout: &DagLayout,
        ) -> PositionResolver {
            PositionResolver::fixed(layout.genesis_pos)
        }
    }

    let registry = ConsensusRegistry::with_defaults().register(Box::new(FlatBasic));
    let block = ConsensusBlock::new("x", "basic", vec!["g".into()]);
    let ctx = BlockContext::new();
    let data = registry
        .rules("basic")
        .unwrap()
        .compute_consensus_data(&block, &ctx);
    assert_eq!(data.selected_parent, None);
}

#[test]
fn basic_rules_track_height_and_first_parent() {
    let rules = BasicRules;
    let mut ctx = BlockContext::new();
    add(&mut ctx, &rules, "G", &[]);
    add(&mut ctx, &rules, "A", &["G"]);
    add(&mut ctx, &rules, "B", &["A"]);

    assert_eq!(ctx["G"].data.height, 0);
    assert_eq!(ctx["A"].data.height, 1);
    assert_eq!(ctx["B"].data.height, 2);
    assert_eq!(ctx["B"].data.selected_parent.as_deref(), Some("A"));
}

#[test]
fn basic_rules_reject_unknown_parents() {
    let rules = BasicRules;
    let ctx = BlockContext::new();
    let block = ConsensusBlock::new("A", "basic", vec!["missing".into()]);
    assert!(matches!(
        rules.validate_parents(&block, &ctx),
        Err(BlockmotionError::Validation(_))
    ));
}

#[test]
fn basic_placement_stacks_siblings_below_the_first() {
    let rules = BasicRules;
    let layout = DagLayout::default();
    let mut ctx = BlockContext::new();
    add(&mut ctx, &rules, "G", &[]);
    add(&mut ctx, &rules, "A", &["G"]);

    // Second child of G lands one chain-spacing below the first.
    let mut sibling = ConsensusBlock::new("A2", "basic", vec!["G".into()]);
    sibling.data = rules.compute_consensus_data(&sibling, &ctx);
    let resolver = rules.compute_position(&sibling, &ctx, &layout);

    let mut store = StateStore::new();
    store.register("G").position = layout.genesis_pos;
    let pos = resolver.resolve("A2", &store.live()).unwrap();
    assert_eq!(
        pos,
        layout.genesis_pos + Vec2::new(layout.block_spacing, layout.chain_spacing)
    );
}
