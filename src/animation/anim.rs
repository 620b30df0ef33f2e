use crate::animation::ease::Ease;
use crate::animation::resolver::PositionResolver;
use crate::animation::state::{AnimationState, StateStore};
use crate::foundation::core::{GridPos, Rgb8};
use crate::foundation::error::BlockmotionResult;

pub trait Lerp: Sized {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for GridPos {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        GridPos::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }
}

impl Lerp for Rgb8 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        fn lerp_u8(a: u8, b: u8, t: f64) -> u8 {
            let a = f64::from(a);
            let b = f64::from(b);
            (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
        }

        Self {
            r: lerp_u8(a.r, b.r, t),
            g: lerp_u8(a.g, b.g, t),
            b: lerp_u8(a.b, b.b, t),
        }
    }
}

/// The attribute lane an animation writes.
///
/// Two animations may not write the same lane of the same entity in
/// overlapping frames; the timeline rejects such schedules at append time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Attribute {
    Position,
    Opacity,
    Color,
}

/// Variant behaviors an animation can perform.
#[derive(Clone, Debug)]
pub enum AnimationKind {
    /// Interpolate position toward a literal target.
    Move { target: GridPos },
    /// Interpolate position toward a target resolved at activation time.
    DeferredMove { resolver: PositionResolver },
    /// Interpolate opacity toward a target in `[0, 1]`.
    Fade { target: f64 },
    /// Interpolate color toward a target.
    Recolor { target: Rgb8 },
    /// Consume time without touching any attribute.
    Wait,
}

/// A request to transform one entity's attribute from its value at activation
/// to a target value over a duration measured in frames.
///
/// Immutable once scheduled; per-run activation state (captured start value,
/// resolved target) lives with the playback, not here.
#[derive(Clone, Debug)]
pub struct Animation {
    entity: String,
    kind: AnimationKind,
    duration_frames: u64,
    ease: Ease,
}

impl Animation {
    fn new(entity: impl Into<String>, kind: AnimationKind, duration_frames: u64) -> Self {
        Self {
            entity: entity.into(),
            kind,
            duration_frames,
            ease: Ease::default(),
        }
    }

    /// Move an entity to a literal grid position.
    pub fn move_to(entity: impl Into<String>, target: GridPos, duration_frames: u64) -> Self {
        Self::new(entity, AnimationKind::Move { target }, duration_frames)
    }

    /// Move an entity to a position computed by `resolver` at activation.
    pub fn deferred_move(
        entity: impl Into<String>,
        resolver: PositionResolver,
        duration_frames: u64,
    ) -> Self {
        Self::new(
            entity,
            AnimationKind::DeferredMove { resolver },
            duration_frames,
        )
    }

    /// Fade an entity's opacity toward `target` (clamped to `[0, 1]`).
    pub fn fade_to(entity: impl Into<String>, target: f64, duration_frames: u64) -> Self {
        Self::new(
            entity,
            AnimationKind::Fade {
                target: target.clamp(0.0, 1.0),
            },
            duration_frames,
        )
    }

    /// Interpolate an entity's tint toward `target`.
    pub fn recolor(entity: impl Into<String>, target: Rgb8, duration_frames: u64) -> Self {
        Self::new(entity, AnimationKind::Recolor { target }, duration_frames)
    }

    /// Consume `duration_frames` without touching any attribute.
    pub fn wait(duration_frames: u64) -> Self {
        Self::new("wait", AnimationKind::Wait, duration_frames)
    }

    /// Replace the default easing curve.
    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn entity(&self) -> &str {
        &self.entity
    }

    pub fn kind(&self) -> &AnimationKind {
        &self.kind
    }

    pub fn duration_frames(&self) -> u64 {
        self.duration_frames
    }

    pub fn ease(&self) -> Ease {
        self.ease
    }

    /// The attribute lane this animation writes, if any (`Wait` writes none).
    pub fn attribute(&self) -> Option<Attribute> {
        match &self.kind {
            AnimationKind::Move { .. } | AnimationKind::DeferredMove { .. } => {
                Some(Attribute::Position)
            }
            AnimationKind::Fade { .. } => Some(Attribute::Opacity),
            AnimationKind::Recolor { .. } => Some(Attribute::Color),
            AnimationKind::Wait => None,
        }
    }

    /// Capture the start value and resolve the target against current state.
    ///
    /// Called exactly once, on the animation's first active frame. This is
    /// where a deferred move invokes its resolver, reading whatever positions
    /// are live *now* rather than the positions at declaration time.
    pub(crate) fn activate(&self, states: &StateStore) -> BlockmotionResult<Activated> {
        let (start, target) = match &self.kind {
            AnimationKind::Wait => return Ok(Activated::noop()),
            AnimationKind::Move { target } => {
                let state = states.get(&self.entity)?;
                (
                    AttrValue::Position(state.position),
                    AttrValue::Position(*target),
                )
            }
            AnimationKind::DeferredMove { resolver } => {
                let state = states.get(&self.entity)?;
                let start = AttrValue::Position(state.position);
                let resolved = resolver.resolve(&self.entity, &states.live())?;
                (start, AttrValue::Position(resolved))
            }
            AnimationKind::Fade { target } => {
                let state = states.get(&self.entity)?;
                (AttrValue::Opacity(state.opacity), AttrValue::Opacity(*target))
            }
            AnimationKind::Recolor { target } => {
                let state = states.get(&self.entity)?;
                (AttrValue::Color(state.color), AttrValue::Color(*target))
            }
        };
        Ok(Activated {
            values: Some((start, target)),
        })
    }

    /// Interpolation fraction after `elapsed` active frames.
    ///
    /// The denominator is `duration - 1` so the first active frame lands
    /// exactly on the start value and the last exactly on the target;
    /// durations of 0 and 1 snap straight to the target on their single
    /// active frame.
    pub(crate) fn progress(&self, elapsed: u64) -> f64 {
        let denom = self.duration_frames.saturating_sub(1);
        if denom == 0 {
            return 1.0;
        }
        ((elapsed as f64) / (denom as f64)).clamp(0.0, 1.0)
    }

    /// Write the eased interpolation for `elapsed` active frames into `state`.
    pub(crate) fn apply(&self, activated: &Activated, elapsed: u64, state: &mut AnimationState) {
        let Some((start, target)) = &activated.values else {
            return;
        };
        let fraction = self.progress(elapsed);
        // Endpoints bypass the lerp so the boundary values are bit-exact.
        if fraction >= 1.0 {
            write_value(state, target);
            return;
        }
        if fraction <= 0.0 {
            write_value(state, start);
            return;
        }
        let t = self.ease.apply(fraction);
        match (start, target) {
            (AttrValue::Position(a), AttrValue::Position(b)) => {
                state.position = <GridPos as Lerp>::lerp(a, b, t);
            }
            (AttrValue::Opacity(a), AttrValue::Opacity(b)) => {
                state.opacity = f64::lerp(a, b, t).clamp(0.0, 1.0);
            }
            (AttrValue::Color(a), AttrValue::Color(b)) => {
                state.color = Rgb8::lerp(a, b, t);
            }
            // Start/target lanes always match by construction.
            _ => debug_assert!(false, "mismatched activation values"),
        }
    }
}

fn write_value(state: &mut AnimationState, value: &AttrValue) {
    match value {
        AttrValue::Position(p) => state.position = *p,
        AttrValue::Opacity(o) => state.opacity = o.clamp(0.0, 1.0),
        AttrValue::Color(c) => state.color = *c,
    }
}

/// A captured attribute value (start or resolved target).
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum AttrValue {
    Position(GridPos),
    Opacity(f64),
    Color(Rgb8),
}

/// Per-run activation record: the start value captured on the first active
/// frame and the (possibly resolver-computed) target. Populated at most once
/// per playback.
#[derive(Clone, Debug)]
pub(crate) struct Activated {
    values: Option<(AttrValue, AttrValue)>,
}

impl Activated {
    fn noop() -> Self {
        Self { values: None }
    }

    #[cfg(test)]
    pub(crate) fn target(&self) -> Option<AttrValue> {
        self.values.as_ref().map(|(_, t)| *t)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/anim.rs"]
mod tests;
