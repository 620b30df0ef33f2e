use crate::animation::resolver::PositionResolver;
use crate::consensus::block::{BlockContext, ConsensusBlock, ConsensusData};
use crate::foundation::core::{GridPos, Rgb8, Vec2};
use crate::foundation::error::{BlockmotionError, BlockmotionResult};
use std::collections::BTreeMap;
use std::fmt;

/// Geometry constants for block placement, in grid units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DagLayout {
    /// Where the genesis block lands.
    pub genesis_pos: GridPos,
    /// Horizontal distance between a block and its parent.
    pub block_spacing: f64,
    /// Vertical distance between stacked siblings.
    pub chain_spacing: f64,
    /// Vertical displacement of competing fork chains.
    pub fork_offset: f64,
    /// Vertical step between mergeset siblings.
    pub mergeset_offset_y: f64,
}

impl Default for DagLayout {
    fn default() -> Self {
        Self {
            genesis_pos: GridPos::new(10.0, 25.0),
            block_spacing: 6.0,
            chain_spacing: 6.0,
            fork_offset: 8.0,
            mergeset_offset_y: 8.0,
        }
    }
}

/// Capability interface a consensus algorithm implements to plug into
/// [`crate::consensus::dag::BlockDag`].
///
/// Implementations are selected through an explicit [`ConsensusRegistry`]
/// built at process start — no process-wide mutable registry, no reflection.
pub trait ConsensusRules: Send + Sync {
    /// Registry tag, e.g. `"nakamoto"`.
    fn tag(&self) -> &'static str;

    /// Validate parent links against the rules of this consensus type.
    fn validate_parents(
        &self,
        block: &ConsensusBlock,
        ctx: &BlockContext,
    ) -> BlockmotionResult<()>;

    /// Compute consensus data (height, blue score, selected parent, ...).
    ///
    /// Called after `validate_parents` succeeded.
    fn compute_consensus_data(&self, block: &ConsensusBlock, ctx: &BlockContext) -> ConsensusData;

    /// Produce the deferred placement rule for a non-genesis block.
    ///
    /// The returned resolver closes over structural facts (which parent,
    /// which sibling slot) decided now, but reads actual coordinates from
    /// live state at activation time — so placement stays correct even when
    /// the parent is still mid-move in an earlier group.
    fn compute_position(
        &self,
        block: &ConsensusBlock,
        ctx: &BlockContext,
        layout: &DagLayout,
    ) -> PositionResolver;

    /// Color of the connection from `parent_id` to `child`.
    fn connection_color(&self, _child: &ConsensusBlock, _parent_id: &str) -> Rgb8 {
        Rgb8::WHITE
    }
}

/// Explicit tag-to-rules table passed into a DAG at construction.
pub struct ConsensusRegistry {
    rules: BTreeMap<&'static str, Box<dyn ConsensusRules>>,
}

impl fmt::Debug for ConsensusRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsensusRegistry")
            .field("tags", &self.rules.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl ConsensusRegistry {
    /// Empty registry; use [`ConsensusRegistry::register`] to populate.
    pub fn new() -> Self {
        Self {
            rules: BTreeMap::new(),
        }
    }

    /// Registry holding the built-in rule sets
    /// (`basic`, `nakamoto`, `ghostdag`).
    pub fn with_defaults() -> Self {
        Self::new()
            .register(Box::new(BasicRules))
            .register(Box::new(crate::consensus::nakamoto::NakamotoRules))
            .register(Box::new(crate::consensus::ghostdag::GhostdagRules))
    }

    /// Add a rule set, keyed by its tag. Later registrations win.
    pub fn register(mut self, rules: Box<dyn ConsensusRules>) -> Self {
        self.rules.insert(rules.tag(), rules);
        self
    }

    /// Look up the rules for a tag.
    pub fn rules(&self, tag: &str) -> BlockmotionResult<&dyn ConsensusRules> {
        self.rules
            .get(tag)
            .map(|b| b.as_ref())
            .ok_or_else(|| {
                BlockmotionError::validation(format!("unsupported consensus type '{tag}'"))
            })
    }

    /// Registered tags in deterministic order.
    pub fn supported_tags(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.keys().copied()
    }
}

impl Default for ConsensusRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Shared parent-existence check.
pub(crate) fn require_parents_exist(
    block: &ConsensusBlock,
    ctx: &BlockContext,
) -> BlockmotionResult<()> {
    for parent_id in block.parent_ids() {
        if !ctx.contains_key(parent_id) {
            return Err(BlockmotionError::validation(format!(
                "block '{}' references unknown parent '{parent_id}'",
                block.id
            )));
        }
    }
    Ok(())
}

/// Vertical slot for the `index`-th sibling sharing one parent:
/// 0, +step, -step, +2*step, -2*step, ...
pub(crate) fn sibling_offset(index: usize, step: f64) -> f64 {
    if index == 0 {
        return 0.0;
    }
    let magnitude = index.div_ceil(2) as f64 * step;
    if index % 2 == 1 { magnitude } else { -magnitude }
}

/// Number of existing blocks whose selected parent is `parent_id`.
pub(crate) fn selected_children_count(ctx: &BlockContext, parent_id: &str) -> usize {
    ctx.values()
        .filter(|b| b.data.selected_parent.as_deref() == Some(parent_id))
        .count()
}

/// Chain-agnostic rule set: no parent constraints beyond existence, children
/// stack to the right of their first parent.
pub struct BasicRules;

impl ConsensusRules for BasicRules {
    fn tag(&self) -> &'static str {
        "basic"
    }

    fn validate_parents(
        &self,
        block: &ConsensusBlock,
        ctx: &BlockContext,
    ) -> BlockmotionResult<()> {
        require_parents_exist(block, ctx)
    }

    fn compute_consensus_data(&self, block: &ConsensusBlock, ctx: &BlockContext) -> ConsensusData {
        let height = block
            .parent_ids()
            .filter_map(|p| ctx.get(p))
            .map(|p| p.data.height + 1)
            .max()
            .unwrap_or(0);
        ConsensusData {
            height,
            blue_score: height,
            selected_parent: block.parent_ids().next().map(str::to_owned),
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
        let slot = selected_children_count(ctx, &parent);
        let offset = Vec2::new(
            layout.block_spacing,
            sibling_offset(slot, layout.chain_spacing),
        );
        PositionResolver::offset_from(parent, offset)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/consensus/rules.rs"]
mod tests;
