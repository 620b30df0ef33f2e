use crate::animation::resolver::PositionResolver;
use crate::consensus::block::{BlockContext, ConsensusBlock, ConsensusData};
use crate::consensus::rules::{
    ConsensusRules, DagLayout, require_parents_exist, selected_children_count, sibling_offset,
};
use crate::foundation::core::Vec2;
use crate::foundation::error::{BlockmotionError, BlockmotionResult};

/// Longest-chain rules: every non-genesis block extends exactly one parent.
///
/// Competing children of the same parent (a fork) are displaced vertically
/// into alternating ± slots, fixed at the moment the block is added. Chain
/// reorganization sweeps (recoloring or re-centering a losing fork) are left
/// to calling code as ordinary move/recolor animations.
pub struct NakamotoRules;

impl ConsensusRules for NakamotoRules {
    fn tag(&self) -> &'static str {
        "nakamoto"
    }

    fn validate_parents(
        &self,
        block: &ConsensusBlock,
        ctx: &BlockContext,
    ) -> BlockmotionResult<()> {
        if block.is_genesis() {
            if !ctx.is_empty() {
                return Err(BlockmotionError::validation(format!(
                    "block '{}' has no parent but genesis already exists",
                    block.id
                )));
            }
            return Ok(());
        }
        if block.parent_count() != 1 {
            return Err(BlockmotionError::validation(format!(
                "nakamoto block '{}' requires exactly one parent, got {}",
                block.id,
                block.parent_count()
            )));
        }
        require_parents_exist(block, ctx)
    }

    fn compute_consensus_data(&self, block: &ConsensusBlock, ctx: &BlockContext) -> ConsensusData {
        let parent = block.parent_ids().next();
        let height = parent
            .and_then(|p| ctx.get(p))
            .map(|p| p.data.height + 1)
            .unwrap_or(0);
        ConsensusData {
            height,
            blue_score: height,
            selected_parent: parent.map(str::to_owned),
            ..ConsensusData::default()
        }
    }

    fn compute_position(
        &self,
        block: &ConsensusBlock,
        ctx: &BlockContext,
        layout: &DagLayout,
    ) -> PositionResolver {
        let parent = block
            .data
            .selected_parent
            .clone()
            .unwrap_or_default();
        // Later siblings of an already-extended parent are fork tips.
        let slot = selected_children_count(ctx, &parent);
        let offset = Vec2::new(
            layout.block_spacing,
            sibling_offset(slot, layout.fork_offset),
        );
        PositionResolver::offset_from(parent, offset)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/consensus/nakamoto.rs"]
mod tests;
