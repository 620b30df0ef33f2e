use crate::foundation::core::Rgb8;
use std::collections::BTreeMap;

/// A parent reference with optional visual styling overrides.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyledParent {
    /// Referenced parent block id.
    pub parent_id: String,
    /// Connection color override; `None` lets the consensus rules decide.
    pub color: Option<Rgb8>,
    /// Mark the connection as the selected-parent edge regardless of what
    /// the consensus rules compute.
    pub selected: bool,
}

impl StyledParent {
    pub fn new(parent_id: impl Into<String>) -> Self {
        Self {
            parent_id: parent_id.into(),
            color: None,
            selected: false,
        }
    }

    pub fn with_color(mut self, color: Rgb8) -> Self {
        self.color = Some(color);
        self
    }
}

impl From<&str> for StyledParent {
    fn from(parent_id: &str) -> Self {
        Self::new(parent_id)
    }
}

impl From<String> for StyledParent {
    fn from(parent_id: String) -> Self {
        Self::new(parent_id)
    }
}

/// Consensus-specific data computed for a block when it is added.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ConsensusData {
    /// Topological height (genesis is 0).
    pub height: u64,
    /// Accumulated blue score (equals height for chain-style consensus).
    pub blue_score: u64,
    /// The parent this block builds on, if any.
    pub selected_parent: Option<String>,
    /// Blue mergeset in consensus order (selected parent first).
    pub mergeset_blues: Vec<String>,
    /// Red mergeset.
    pub mergeset_reds: Vec<String>,
}

/// Logical block record: identity, parent links and consensus data.
///
/// Purely structural — the visual side of a block lives in its entity's
/// animation state under the same name.
#[derive(Clone, Debug)]
pub struct ConsensusBlock {
    pub id: String,
    pub parents: Vec<StyledParent>,
    /// Registry tag of the consensus rules governing this block.
    pub consensus: String,
    pub data: ConsensusData,
}

impl ConsensusBlock {
    pub fn new(
        id: impl Into<String>,
        consensus: impl Into<String>,
        parents: Vec<StyledParent>,
    ) -> Self {
        Self {
            id: id.into(),
            parents,
            consensus: consensus.into(),
            data: ConsensusData::default(),
        }
    }

    pub fn parent_ids(&self) -> impl Iterator<Item = &str> {
        self.parents.iter().map(|p| p.parent_id.as_str())
    }

    pub fn parent_count(&self) -> usize {
        self.parents.len()
    }

    pub fn is_genesis(&self) -> bool {
        self.parents.is_empty()
    }

    pub fn has_parent(&self, parent_id: &str) -> bool {
        self.parent_ids().any(|p| p == parent_id)
    }
}

/// Existing blocks handed to consensus rules, keyed by id.
pub type BlockContext = BTreeMap<String, ConsensusBlock>;
