use crate::animation::anim::Attribute;
use crate::animation::group::Group;
use crate::foundation::core::{FrameIndex, FrameRange};
use crate::foundation::error::{BlockmotionError, BlockmotionResult};

/// One lane occupancy: an animation writing `(entity, attribute)` over a
/// window of frames. Kept for the static conflict check at append time.
#[derive(Debug)]
struct LaneClaim {
    entity: String,
    attribute: Attribute,
    window: FrameRange,
}

#[derive(Debug)]
struct ScheduledGroup {
    start: FrameIndex,
    group: Group,
}

/// Ordered sequence of groups; owns global scheduling.
///
/// Appending is the only mutation. A group's absolute start frame is the sum
/// of all prior group durations, and once appended its position is fixed —
/// "what frame does animation N execute at" is stable the moment it is
/// declared, which is what makes output deterministic.
#[derive(Debug, Default)]
pub struct Timeline {
    groups: Vec<ScheduledGroup>,
    claims: Vec<LaneClaim>,
    total_frames: u64,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a group, scheduling it after everything already appended.
    ///
    /// Rejects with [`BlockmotionError::ConflictingAnimation`] when any member
    /// would write the same attribute of the same entity as an already
    /// scheduled animation in overlapping frames. Catching this here keeps the
    /// playback loop allocation-free and side-effect-free beyond state writes.
    #[tracing::instrument(level = "debug", skip(self, group), fields(start = self.total_frames, members = group.len()))]
    pub fn append(&mut self, group: Group) -> BlockmotionResult<()> {
        let start = self.total_frames;
        let mut incoming: Vec<LaneClaim> = Vec::new();

        for anim in group.animations() {
            let Some(attribute) = anim.attribute() else {
                continue; // waits claim no lane
            };
            // Zero-duration animations still occupy their single snap frame.
            let window = FrameRange {
                start: FrameIndex(start),
                end: FrameIndex(start + anim.duration_frames().max(1)),
            };
            let claim = LaneClaim {
                entity: anim.entity().to_owned(),
                attribute,
                window,
            };
            for prior in self.claims.iter().chain(incoming.iter()) {
                if prior.entity == claim.entity
                    && prior.attribute == claim.attribute
                    && prior.window.intersects(claim.window)
                {
                    return Err(BlockmotionError::conflicting_animation(format!(
                        "'{}' {:?} is already animated in frames [{}, {})",
                        claim.entity, claim.attribute, prior.window.start.0, prior.window.end.0
                    )));
                }
            }
            incoming.push(claim);
        }

        self.claims.extend(incoming);
        self.total_frames += group.duration_frames();
        self.groups.push(ScheduledGroup {
            start: FrameIndex(start),
            group,
        });
        Ok(())
    }

    /// Total scheduled frame count: the sum of every group's duration.
    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }

    /// Number of scheduled groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Iterate `(start frame, group)` in schedule order.
    pub fn groups_in_order(&self) -> impl Iterator<Item = (FrameIndex, &Group)> {
        self.groups.iter().map(|s| (s.start, &s.group))
    }

    /// Frames a playback must emit to execute every scheduled animation.
    ///
    /// Equals `total_frames()` except when a trailing zero-duration group
    /// would otherwise never see its single application frame.
    pub(crate) fn playback_frames(&self) -> u64 {
        let lane_end = self
            .claims
            .iter()
            .map(|c| c.window.end.0)
            .max()
            .unwrap_or(0);
        self.total_frames.max(lane_end)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timeline.rs"]
mod tests;
