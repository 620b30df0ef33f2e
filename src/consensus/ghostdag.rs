use crate::animation::resolver::PositionResolver;
use crate::consensus::block::{BlockContext, ConsensusBlock, ConsensusData};
use crate::consensus::rules::{
    ConsensusRules, DagLayout, require_parents_exist, selected_children_count, sibling_offset,
};
use crate::foundation::core::{Rgb8, Vec2};
use crate::foundation::error::{BlockmotionError, BlockmotionResult};

/// GHOSTDAG-style rules: multi-parent blocks, a selected parent chosen by
/// highest blue score, and a blue mergeset ordered selected-parent-first.
///
/// The placement and scoring here cover what the visualization needs
/// (deterministic selected-parent chains and mergeset stacking); the full
/// k-cluster anticone test is consensus business logic that stays outside
/// this crate.
pub struct GhostdagRules;

impl GhostdagRules {
    /// Parent with the highest `(blue score, id)` — the id tiebreak keeps
    /// selection deterministic across runs.
    fn selected_parent<'a>(block: &'a ConsensusBlock, ctx: &BlockContext) -> Option<&'a str> {
        block
            .parent_ids()
            .max_by_key(|p| (ctx.get(*p).map(|b| b.data.blue_score).unwrap_or(0), *p))
    }
}

impl ConsensusRules for GhostdagRules {
    fn tag(&self) -> &'static str {
        "ghostdag"
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
        require_parents_exist(block, ctx)?;
        // Duplicate parents would double-count the mergeset.
        let mut seen: Vec<&str> = Vec::with_capacity(block.parent_count());
        for parent_id in block.parent_ids() {
            if seen.contains(&parent_id) {
                return Err(BlockmotionError::validation(format!(
                    "block '{}' lists parent '{parent_id}' twice",
                    block.id
                )));
            }
            seen.push(parent_id);
        }
        Ok(())
    }

    fn compute_consensus_data(&self, block: &ConsensusBlock, ctx: &BlockContext) -> ConsensusData {
        let Some(selected) = Self::selected_parent(block, ctx) else {
            return ConsensusData::default();
        };

        let mut mergeset_blues = vec![selected.to_owned()];
        let mut others: Vec<String> = block
            .parent_ids()
            .filter(|p| *p != selected)
            .map(str::to_owned)
            .collect();
        others.sort_unstable();
        mergeset_blues.extend(others);

        let selected_score = ctx.get(selected).map(|b| b.data.blue_score).unwrap_or(0);
        let height = block
            .parent_ids()
            .filter_map(|p| ctx.get(p))
            .map(|p| p.data.height + 1)
            .max()
            .unwrap_or(0);

        ConsensusData {
            height,
            blue_score: selected_score + mergeset_blues.len() as u64,
            selected_parent: Some(selected.to_owned()),
            mergeset_blues,
            mergeset_reds: Vec::new(),
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
        let slot = selected_children_count(ctx, &parent);
        let offset = Vec2::new(
            layout.block_spacing,
            sibling_offset(slot, layout.mergeset_offset_y),
        );
        PositionResolver::offset_from(parent, offset)
    }

    fn connection_color(&self, child: &ConsensusBlock, parent_id: &str) -> Rgb8 {
        if child.data.selected_parent.as_deref() == Some(parent_id) {
            Rgb8::GREEN
        } else if child.data.mergeset_blues.iter().any(|b| b == parent_id) {
            Rgb8::BLUE
        } else {
            Rgb8::RED
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/consensus/ghostdag.rs"]
mod tests;
