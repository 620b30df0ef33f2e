use crate::animation::anim::Animation;
use crate::foundation::error::{BlockmotionError, BlockmotionResult};

/// A set of animations that play together, sharing one start frame.
///
/// Member insertion order is irrelevant for execution (members are logically
/// simultaneous) and only affects log output. The group's duration is the
/// maximum member duration.
#[derive(Debug)]
pub struct Group {
    animations: Vec<Animation>,
}

impl Group {
    /// Build a group from its members.
    ///
    /// An empty group is a caller bug, not a no-op: it would silently advance
    /// no frames while the caller expects elapsed time to be accounted for.
    /// Callers needing a pure pause must schedule an explicit wait animation.
    pub fn new(animations: Vec<Animation>) -> BlockmotionResult<Self> {
        if animations.is_empty() {
            return Err(BlockmotionError::empty_group(
                "a group must contain at least one animation",
            ));
        }
        Ok(Self { animations })
    }

    /// Maximum member duration, in frames.
    pub fn duration_frames(&self) -> u64 {
        self.animations
            .iter()
            .map(Animation::duration_frames)
            .max()
            .unwrap_or(0)
    }

    pub fn animations(&self) -> &[Animation] {
        &self.animations
    }

    pub fn len(&self) -> usize {
        self.animations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }
}

/// Passive aggregation of the animations produced by one logical operation.
///
/// A collaborator that adds, say, a block plus its parent connections hands
/// back one proxy; calling code passes it to `Scene::play` without knowing
/// what is inside. The proxy performs no scheduling itself.
#[derive(Debug, Default)]
pub struct Proxy {
    pending: Vec<Animation>,
}

impl Proxy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, animation: Animation) {
        self.pending.push(animation);
    }

    pub fn extend(&mut self, animations: impl IntoIterator<Item = Animation>) {
        self.pending.extend(animations);
    }

    /// Fold another proxy's pending animations into this one.
    pub fn merge(&mut self, other: Proxy) {
        self.pending.extend(other.pending);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Take the pending animations, leaving the proxy empty.
    pub fn drain(&mut self) -> Vec<Animation> {
        std::mem::take(&mut self.pending)
    }
}

/// Anything `Scene::play` accepts as the members of one group.
pub trait IntoAnimations {
    fn into_animations(self) -> Vec<Animation>;
}

impl IntoAnimations for Animation {
    fn into_animations(self) -> Vec<Animation> {
        vec![self]
    }
}

impl IntoAnimations for Vec<Animation> {
    fn into_animations(self) -> Vec<Animation> {
        self
    }
}

impl IntoAnimations for Proxy {
    fn into_animations(mut self) -> Vec<Animation> {
        self.drain()
    }
}

impl IntoAnimations for Vec<Proxy> {
    fn into_animations(self) -> Vec<Animation> {
        self.into_iter()
            .flat_map(|mut p| p.drain())
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/group.rs"]
mod tests;
