use crate::foundation::core::{GridPos, Rgb8};
use crate::foundation::error::{BlockmotionError, BlockmotionResult};
use std::collections::BTreeMap;

/// How a pending position resolution anchors to other entities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorMode {
    /// Target is computed from the referenced entities' live positions.
    ParentRelative,
    /// Target is computed without reading other entities.
    Fixed,
}

/// Metadata describing an unresolved positioning dependency.
///
/// The resolver function itself travels with the scheduled animation (it is
/// consumed exactly once at activation); the entity's state only records
/// which entities the resolution will read and how it anchors to them, so
/// snapshots stay cheap to clone and serialize.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PendingResolution {
    /// Names of the entities the resolver will read.
    pub refs: Vec<String>,
    /// Anchoring mode.
    pub anchor: AnchorMode,
}

/// Live, currently-rendered attributes of one entity.
///
/// Exactly one state exists per registered entity. It always holds the
/// last-computed, frame-accurate value; the orchestrator mutates it in place
/// on every frame an animation targeting the entity is active.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnimationState {
    /// Position in grid coordinates.
    pub position: GridPos,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Tint color.
    pub color: Rgb8,
    /// Unresolved positioning dependency, if any.
    ///
    /// Set when a deferred move targeting this entity is scheduled; cleared
    /// the moment the move activates and the target is resolved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending: Option<PendingResolution>,
}

impl Default for AnimationState {
    fn default() -> Self {
        // Entities enter the scene invisible and fade in.
        Self {
            position: GridPos::ZERO,
            opacity: 0.0,
            color: Rgb8::WHITE,
            pending: None,
        }
    }
}

/// Registry of every entity's [`AnimationState`], keyed by name.
///
/// Iteration order is the lexicographic name order of the underlying
/// `BTreeMap`, which is what makes emitted snapshots byte-stable across runs.
#[derive(Clone, Debug, Default)]
pub struct StateStore {
    states: BTreeMap<String, AnimationState>,
}

impl StateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entity, creating a default state if absent.
    ///
    /// Registration is idempotent: re-registering an existing name returns
    /// the existing state untouched.
    pub fn register(&mut self, name: impl Into<String>) -> &mut AnimationState {
        self.states.entry(name.into()).or_default()
    }

    /// Return `true` when an entity with this name is registered.
    pub fn exists(&self, name: &str) -> bool {
        self.states.contains_key(name)
    }

    pub fn get(&self, name: &str) -> BlockmotionResult<&AnimationState> {
        self.states
            .get(name)
            .ok_or_else(|| BlockmotionError::unknown_entity(name))
    }

    pub fn get_mut(&mut self, name: &str) -> BlockmotionResult<&mut AnimationState> {
        self.states
            .get_mut(name)
            .ok_or_else(|| BlockmotionError::unknown_entity(name))
    }

    /// Number of registered entities.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Iterate `(name, state)` in deterministic name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AnimationState)> {
        self.states.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Read-only view handed to position resolvers.
    pub fn live(&self) -> LiveState<'_> {
        LiveState { store: self }
    }

    pub(crate) fn map(&self) -> &BTreeMap<String, AnimationState> {
        &self.states
    }
}

/// Read-only name-to-state lookup passed to position resolvers.
///
/// The view reflects entity states as of the current activation frame, after
/// every prior group has already written its final interpolated values.
#[derive(Clone, Copy, Debug)]
pub struct LiveState<'a> {
    store: &'a StateStore,
}

impl<'a> LiveState<'a> {
    pub fn get(&self, name: &str) -> BlockmotionResult<&'a AnimationState> {
        self.store.get(name)
    }

    /// Current position of a named entity.
    pub fn position(&self, name: &str) -> BlockmotionResult<GridPos> {
        Ok(self.get(name)?.position)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.store.exists(name)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/state.rs"]
mod tests;
