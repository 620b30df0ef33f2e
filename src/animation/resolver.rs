use crate::animation::state::{AnchorMode, LiveState, PendingResolution};
use crate::foundation::core::{GridPos, Vec2};
use crate::foundation::error::{BlockmotionError, BlockmotionResult};
use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;

/// Resolver function signature: `(entity being placed, live state) -> target`.
pub type ResolverFn = dyn Fn(&str, &LiveState<'_>) -> BlockmotionResult<GridPos> + Send + Sync;

/// A deferred target-position computation.
///
/// Resolvers are stored, not evaluated, until playback reaches the owning
/// animation's activation frame. They must be pure and deterministic given
/// identical live state: the same timeline replayed twice must resolve to the
/// same coordinates. Looking up an unregistered entity surfaces
/// [`BlockmotionError::UnknownEntity`]; any other resolver error, or a
/// non-finite coordinate, aborts the run as a resolver failure.
#[derive(Clone)]
pub struct PositionResolver {
    func: Arc<ResolverFn>,
    refs: SmallVec<[String; 2]>,
    anchor: AnchorMode,
}

impl fmt::Debug for PositionResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PositionResolver")
            .field("refs", &self.refs)
            .field("anchor", &self.anchor)
            .finish_non_exhaustive()
    }
}

impl PositionResolver {
    /// Wrap an arbitrary pure resolver function.
    ///
    /// `refs` lists the entities the function reads; it is carried as pending
    /// metadata on the target entity's state until activation.
    pub fn new(
        refs: impl IntoIterator<Item = String>,
        anchor: AnchorMode,
        func: impl Fn(&str, &LiveState<'_>) -> BlockmotionResult<GridPos> + Send + Sync + 'static,
    ) -> Self {
        Self {
            func: Arc::new(func),
            refs: refs.into_iter().collect(),
            anchor,
        }
    }

    /// The canonical placement rule: the referenced entity's current position
    /// plus a fixed offset.
    pub fn offset_from(parent: impl Into<String>, offset: Vec2) -> Self {
        let parent = parent.into();
        let lookup = parent.clone();
        Self::new(
            [parent],
            AnchorMode::ParentRelative,
            move |_entity, live| Ok(live.position(&lookup)? + offset),
        )
    }

    /// A position independent of other entities, still resolved at
    /// activation time.
    pub fn fixed(target: GridPos) -> Self {
        Self::new([], AnchorMode::Fixed, move |_entity, _live| Ok(target))
    }

    /// Entities the resolver reads.
    pub fn refs(&self) -> &[String] {
        &self.refs
    }

    pub fn anchor(&self) -> AnchorMode {
        self.anchor
    }

    /// Pending-dependency metadata recorded on the target entity's state
    /// while the resolution is outstanding.
    pub fn pending_metadata(&self) -> PendingResolution {
        PendingResolution {
            refs: self.refs.iter().cloned().collect(),
            anchor: self.anchor,
        }
    }

    /// Invoke the resolver against the current live state.
    ///
    /// Non-finite coordinates are rejected here rather than silently written:
    /// a defaulted position would corrupt the output deterministically in a
    /// way invisible to the caller.
    pub fn resolve(&self, entity: &str, live: &LiveState<'_>) -> BlockmotionResult<GridPos> {
        let pos = (self.func)(entity, live)?;
        if !pos.x.is_finite() || !pos.y.is_finite() {
            return Err(BlockmotionError::resolver_failure(format!(
                "resolver for '{entity}' produced non-finite position ({}, {})",
                pos.x, pos.y
            )));
        }
        Ok(pos)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/resolver.rs"]
mod tests;
