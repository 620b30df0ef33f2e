use crate::animation::anim::Animation;
use crate::animation::group::Proxy;
use crate::consensus::block::{BlockContext, ConsensusBlock, StyledParent};
use crate::consensus::rules::{ConsensusRegistry, DagLayout};
use crate::foundation::core::{GridPos, Rgb8};
use crate::foundation::error::{BlockmotionError, BlockmotionResult};
use crate::scene::Scene;
use std::collections::BTreeMap;
use tracing::debug;

/// Default fade duration for newly added blocks and connections, in seconds.
const DEFAULT_FADE_SECS: f64 = 1.0;

/// Connection topology entry exposed to the rendering collaborator.
///
/// A connection's endpoint geometry is derived by the renderer from the two
/// block states each frame; the connection entity itself only animates
/// opacity and color.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ConnectionSpec {
    /// Parent block id.
    pub from: String,
    /// Child block id.
    pub to: String,
    /// Initial tint.
    pub color: Rgb8,
    /// Whether this is the child's selected-parent edge.
    pub selected_parent: bool,
}

/// DAG collaborator: owns logical blocks and connection topology, registers
/// their entities on a [`Scene`], and hands back animation proxies for the
/// caller to `play`.
///
/// Placement is deferred: a block's position animation carries a resolver
/// that reads its parent's live coordinates at activation, so adding "B on
/// top of A" stays correct even when A is still being moved by an earlier,
/// not-yet-played group.
#[derive(Debug)]
pub struct BlockDag {
    consensus: String,
    registry: ConsensusRegistry,
    layout: DagLayout,
    blocks: BlockContext,
    connections: BTreeMap<String, ConnectionSpec>,
}

impl BlockDag {
    /// Create a DAG governed by the rules registered under `consensus`.
    ///
    /// The registry is the explicit tag-to-rules table built at process
    /// start; an unregistered tag is rejected here, not at first use.
    pub fn new(
        consensus: impl Into<String>,
        registry: ConsensusRegistry,
        layout: DagLayout,
    ) -> BlockmotionResult<Self> {
        let consensus = consensus.into();
        registry.rules(&consensus)?;
        Ok(Self {
            consensus,
            registry,
            layout,
            blocks: BlockContext::new(),
            connections: BTreeMap::new(),
        })
    }

    /// Entity name of the connection from `from` to `to`.
    pub fn connection_id(from: &str, to: &str) -> String {
        format!("{from}->{to}")
    }

    pub fn consensus(&self) -> &str {
        &self.consensus
    }

    pub fn layout(&self) -> &DagLayout {
        &self.layout
    }

    pub fn block(&self, id: &str) -> Option<&ConsensusBlock> {
        self.blocks.get(id)
    }

    pub fn blocks(&self) -> &BlockContext {
        &self.blocks
    }

    pub fn connections(&self) -> &BTreeMap<String, ConnectionSpec> {
        &self.connections
    }

    /// Add a block, registering its entity and one connection entity per
    /// parent on `scene`.
    ///
    /// Returns a proxy holding the block's placement and fade-in animations;
    /// nothing is scheduled until the caller plays it. Genesis blocks are
    /// placed at the configured genesis position immediately on
    /// registration; every other block gets a zero-duration deferred move
    /// that snaps it next to its parent at activation time.
    pub fn add_block(
        &mut self,
        scene: &mut Scene,
        id: impl Into<String>,
        parents: Vec<StyledParent>,
    ) -> BlockmotionResult<Proxy> {
        let id = id.into();
        if self.blocks.contains_key(&id) {
            return Err(BlockmotionError::validation(format!(
                "block '{id}' already exists"
            )));
        }

        let mut block = ConsensusBlock::new(id.clone(), self.consensus.clone(), parents);
        let rules = self.registry.rules(&self.consensus)?;
        rules.validate_parents(&block, &self.blocks)?;
        block.data = rules.compute_consensus_data(&block, &self.blocks);
        debug!(
            block = %id,
            selected_parent = ?block.data.selected_parent,
            blue_score = block.data.blue_score,
            "added block"
        );

        let fade_frames = scene.fps().secs_to_frames(DEFAULT_FADE_SECS)?;
        let mut proxy = Proxy::new();

        let state = scene.register_entity(id.clone());
        if block.is_genesis() {
            state.position = self.layout.genesis_pos;
        } else {
            let resolver = rules.compute_position(&block, &self.blocks, &self.layout);
            proxy.push(Animation::deferred_move(id.clone(), resolver, 0));
        }
        proxy.push(Animation::fade_to(id.clone(), 1.0, fade_frames));

        for parent in block.parents.clone() {
            let conn_id = Self::connection_id(&parent.parent_id, &id);
            let color = parent
                .color
                .unwrap_or_else(|| rules.connection_color(&block, &parent.parent_id));
            let selected = parent.selected
                || block.data.selected_parent.as_deref() == Some(parent.parent_id.as_str());

            scene.register_entity(conn_id.clone()).color = color;
            self.connections.insert(
                conn_id.clone(),
                ConnectionSpec {
                    from: parent.parent_id.clone(),
                    to: id.clone(),
                    color,
                    selected_parent: selected,
                },
            );
            proxy.push(Animation::fade_to(conn_id, 1.0, fade_frames));
        }

        self.blocks.insert(id, block);
        Ok(proxy)
    }

    /// Move a block to a literal grid position.
    pub fn move_block(
        &self,
        id: &str,
        target: GridPos,
        duration_frames: u64,
    ) -> BlockmotionResult<Proxy> {
        self.require_block(id)?;
        let mut proxy = Proxy::new();
        proxy.push(Animation::move_to(id, target, duration_frames));
        Ok(proxy)
    }

    /// Fade a block (not its connections) to a target opacity.
    pub fn fade_block(
        &self,
        id: &str,
        target: f64,
        duration_frames: u64,
    ) -> BlockmotionResult<Proxy> {
        self.require_block(id)?;
        let mut proxy = Proxy::new();
        proxy.push(Animation::fade_to(id, target, duration_frames));
        Ok(proxy)
    }

    /// Recolor a block.
    pub fn recolor_block(
        &self,
        id: &str,
        target: Rgb8,
        duration_frames: u64,
    ) -> BlockmotionResult<Proxy> {
        self.require_block(id)?;
        let mut proxy = Proxy::new();
        proxy.push(Animation::recolor(id, target, duration_frames));
        Ok(proxy)
    }

    /// Blocks on the selected-parent chain ending at `tip`, tip first.
    pub fn selected_chain(&self, tip: &str) -> Vec<&ConsensusBlock> {
        let mut chain = Vec::new();
        let mut cursor = self.blocks.get(tip);
        while let Some(block) = cursor {
            chain.push(block);
            cursor = block
                .data
                .selected_parent
                .as_deref()
                .and_then(|p| self.blocks.get(p));
        }
        chain
    }

    fn require_block(&self, id: &str) -> BlockmotionResult<&ConsensusBlock> {
        self.blocks
            .get(id)
            .ok_or_else(|| BlockmotionError::unknown_entity(id))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/consensus/dag.rs"]
mod tests;
