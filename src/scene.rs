use crate::animation::anim::{Animation, AnimationKind};
use crate::animation::group::{Group, IntoAnimations};
use crate::animation::orchestrator::{Orchestrator, Playback};
use crate::animation::state::{AnimationState, PendingResolution, StateStore};
use crate::animation::timeline::Timeline;
use crate::foundation::core::Fps;
use crate::foundation::error::BlockmotionResult;
use crate::render::sink::{SinkConfig, SnapshotSink};

/// Statistics for a completed playback into a sink.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlaybackStats {
    /// Frames pushed to the sink.
    pub frames_emitted: u64,
}

/// Entry point tying entity registration, scheduling and playback together.
///
/// The scene owns the declaration-time entity states and the timeline.
/// Playback never mutates them: each [`Scene::playback`] call works on its
/// own copy, so runs are independently restartable and reproducible.
#[derive(Debug)]
pub struct Scene {
    states: StateStore,
    timeline: Timeline,
    fps: Fps,
}

impl Scene {
    pub fn new(fps: Fps) -> Self {
        Self {
            states: StateStore::new(),
            timeline: Timeline::new(),
            fps,
        }
    }

    pub fn fps(&self) -> Fps {
        self.fps
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Register an entity, returning its (default) state for adjustment.
    ///
    /// Idempotent: re-registering returns the existing state.
    pub fn register_entity(&mut self, name: impl Into<String>) -> &mut AnimationState {
        self.states.register(name)
    }

    pub fn entity_exists(&self, name: &str) -> bool {
        self.states.exists(name)
    }

    /// Declaration-time state of a registered entity.
    pub fn state(&self, name: &str) -> BlockmotionResult<&AnimationState> {
        self.states.get(name)
    }

    /// Number of registered entities.
    pub fn entity_count(&self) -> usize {
        self.states.len()
    }

    /// Schedule a set of animations to play together as one group.
    ///
    /// Accepts a single animation, a `Vec` of animations, or the proxies
    /// handed back by collaborators. Construction-time errors (empty group,
    /// conflicting lanes) surface here, never during playback.
    pub fn play(&mut self, animations: impl IntoAnimations) -> BlockmotionResult<()> {
        let list = animations.into_animations();

        let mut pending: Vec<(String, PendingResolution)> = Vec::new();
        for anim in &list {
            if let AnimationKind::DeferredMove { resolver } = anim.kind()
                && self.states.exists(anim.entity())
            {
                pending.push((anim.entity().to_owned(), resolver.pending_metadata()));
            }
        }

        let group = Group::new(list)?;
        self.timeline.append(group)?;

        // Only flag unresolved dependencies once the group is actually
        // scheduled.
        for (name, meta) in pending {
            self.states.get_mut(&name)?.pending = Some(meta);
        }
        Ok(())
    }

    /// Advance the timeline by `frames` without animating anything.
    pub fn wait(&mut self, frames: u64) -> BlockmotionResult<()> {
        self.play(Animation::wait(frames))
    }

    /// [`Scene::wait`] with a duration in seconds, rounded to whole frames.
    pub fn wait_secs(&mut self, secs: f64) -> BlockmotionResult<()> {
        let frames = self.fps.secs_to_frames(secs)?;
        self.wait(frames)
    }

    /// Start a lazy playback over everything scheduled so far.
    pub fn playback(&self) -> Playback<'_> {
        Orchestrator::run(&self.timeline, &self.states, self.fps)
    }

    /// Run a full playback, streaming every frame snapshot into `sink`.
    pub fn render_into(&self, sink: &mut dyn SnapshotSink) -> BlockmotionResult<PlaybackStats> {
        let playback = self.playback();
        sink.begin(SinkConfig {
            fps: self.fps,
            frames: playback.len_frames(),
            entities: self.states.len() as u64,
        })?;

        let mut stats = PlaybackStats::default();
        for snapshot in playback {
            let snapshot = snapshot?;
            sink.push_frame(snapshot.frame, &snapshot)?;
            stats.frames_emitted += 1;
        }
        sink.end()?;
        Ok(stats)
    }
}
