//! Blockmotion is a deterministic animation engine for blockchain-DAG
//! visualizations.
//!
//! The heart of the crate is a deferred animation timeline: animations may
//! target positions that are computed *when the animation activates*, from
//! the live state of other entities, rather than when it was declared. That
//! is what keeps "place this block next to its parent" correct even when the
//! parent is itself moved by an earlier, still-pending group.
//!
//! The typical flow:
//!
//! - Build a [`Scene`] and (optionally) a [`BlockDag`] with a
//!   [`ConsensusRegistry`]
//! - Declare animations — directly or through DAG-produced [`Proxy`] values —
//!   and schedule them with [`Scene::play`] / [`Scene::wait`]
//! - Iterate [`Scene::playback`] or stream into a [`SnapshotSink`]; every
//!   frame is a complete, deterministic snapshot of all entity states
#![forbid(unsafe_code)]

pub mod animation;
pub mod consensus;
pub mod foundation;
pub mod render;
pub mod scene;

pub use crate::animation::anim::{Animation, AnimationKind, Attribute, Lerp};
pub use crate::animation::ease::Ease;
pub use crate::animation::group::{Group, IntoAnimations, Proxy};
pub use crate::animation::orchestrator::{FrameSnapshot, Orchestrator, Playback};
pub use crate::animation::resolver::PositionResolver;
pub use crate::animation::state::{AnchorMode, AnimationState, LiveState, PendingResolution, StateStore};
pub use crate::animation::timeline::Timeline;
pub use crate::consensus::block::{BlockContext, ConsensusBlock, ConsensusData, StyledParent};
pub use crate::consensus::dag::{BlockDag, ConnectionSpec};
pub use crate::consensus::ghostdag::GhostdagRules;
pub use crate::consensus::nakamoto::NakamotoRules;
pub use crate::consensus::rules::{BasicRules, ConsensusRegistry, ConsensusRules, DagLayout};
pub use crate::foundation::core::{FrameIndex, FrameRange, Fps, GridPos, Point, Rgb8, Vec2};
pub use crate::foundation::error::{BlockmotionError, BlockmotionResult};
pub use crate::render::sink::{InMemorySink, JsonLinesSink, SinkConfig, SnapshotSink};
pub use crate::scene::{PlaybackStats, Scene};
