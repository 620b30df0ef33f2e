use crate::animation::anim::{Activated, Animation, AnimationKind};
use crate::animation::state::{AnimationState, StateStore};
use crate::animation::timeline::Timeline;
use crate::foundation::core::{FrameIndex, FrameRange, Fps};
use crate::foundation::error::BlockmotionResult;
use std::collections::BTreeMap;
use tracing::debug;

/// One emitted frame: every entity's state after all writes for the frame.
///
/// Entities iterate in name order, so serializing a snapshot is byte-stable
/// across identical runs.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FrameSnapshot {
    /// Frame this snapshot belongs to.
    pub frame: FrameIndex,
    entities: BTreeMap<String, AnimationState>,
}

impl FrameSnapshot {
    pub fn get(&self, name: &str) -> Option<&AnimationState> {
        self.entities.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AnimationState)> {
        self.entities.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

/// Drives playback of a timeline.
pub struct Orchestrator;

impl Orchestrator {
    /// Build a finite, restartable, lazy frame sequence.
    ///
    /// The playback owns a copy of `initial`, so the caller's states are
    /// untouched and a second run over the same inputs yields a byte-identical
    /// snapshot sequence. Dropping the iterator mid-run is a clean abort:
    /// every state it wrote was a complete, frame-accurate value.
    #[tracing::instrument(level = "debug", skip(timeline, initial), fields(frames = timeline.playback_frames(), entities = initial.len()))]
    pub fn run<'a>(timeline: &'a Timeline, initial: &StateStore, fps: Fps) -> Playback<'a> {
        let mut schedule = Vec::new();
        for (start, group) in timeline.groups_in_order() {
            for anim in group.animations() {
                // Zero-duration animations snap on their single start frame,
                // which a zero-duration group shares with its successor.
                let window = FrameRange {
                    start,
                    end: FrameIndex(start.0 + anim.duration_frames().max(1)),
                };
                schedule.push(Scheduled {
                    anim,
                    window,
                    activated: None,
                });
            }
        }
        Playback {
            schedule,
            states: initial.clone(),
            fps,
            frame: 0,
            end: timeline.playback_frames(),
            failed: false,
        }
    }
}

struct Scheduled<'a> {
    anim: &'a Animation,
    window: FrameRange,
    /// Populated at most once, on the first active frame.
    activated: Option<Activated>,
}

/// Lazy per-frame evaluation of a scheduled timeline.
///
/// Yields one [`FrameSnapshot`] per frame in strictly increasing order. The
/// first error (unknown entity at activation, resolver failure) ends the
/// sequence: a frame with one failed animation has no well-defined meaning.
pub struct Playback<'a> {
    schedule: Vec<Scheduled<'a>>,
    states: StateStore,
    fps: Fps,
    frame: u64,
    end: u64,
    failed: bool,
}

impl Playback<'_> {
    /// Frames this playback will emit.
    pub fn len_frames(&self) -> u64 {
        self.end
    }

    pub fn fps(&self) -> Fps {
        self.fps
    }

    fn step(&mut self) -> BlockmotionResult<FrameSnapshot> {
        let current = FrameIndex(self.frame);

        for entry in &mut self.schedule {
            if !entry.window.contains(current) {
                continue;
            }

            if entry.activated.is_none() {
                // Activation: capture the start value and, for deferred
                // moves, resolve the target against whatever is live now.
                let activated = entry.anim.activate(&self.states)?;
                if matches!(entry.anim.kind(), AnimationKind::DeferredMove { .. }) {
                    self.states.get_mut(entry.anim.entity())?.pending = None;
                    debug!(
                        entity = entry.anim.entity(),
                        frame = current.0,
                        "resolved deferred target"
                    );
                }
                entry.activated = Some(activated);
            }

            if entry.anim.attribute().is_some()
                && let Some(activated) = entry.activated.as_ref()
            {
                let elapsed = current.0 - entry.window.start.0;
                let state = self.states.get_mut(entry.anim.entity())?;
                entry.anim.apply(activated, elapsed, state);
            }
        }

        Ok(FrameSnapshot {
            frame: current,
            entities: self.states.map().clone(),
        })
    }
}

impl Iterator for Playback<'_> {
    type Item = BlockmotionResult<FrameSnapshot>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.frame >= self.end {
            return None;
        }
        let result = self.step();
        match result {
            Ok(snapshot) => {
                self.frame += 1;
                Some(Ok(snapshot))
            }
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/orchestrator.rs"]
mod tests;
