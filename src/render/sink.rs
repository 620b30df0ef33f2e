use crate::animation::orchestrator::FrameSnapshot;
use crate::foundation::core::{FrameIndex, Fps};
use crate::foundation::error::BlockmotionResult;
use anyhow::Context as _;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Configuration provided to a [`SnapshotSink`] at the start of a playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkConfig {
    /// Playback frames-per-second.
    pub fps: Fps,
    /// Total frames that will be pushed.
    pub frames: u64,
    /// Registered entity count at playback start.
    pub entities: u64,
}

/// Sink contract for consuming frame snapshots in timeline order.
///
/// `push_frame` is called in strictly increasing `FrameIndex` order, after
/// all state writes for that frame have completed. Sinks read; they never
/// write entity state — rasterization and video emission live behind this
/// boundary.
pub trait SnapshotSink {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> BlockmotionResult<()>;
    /// Push one frame in strictly increasing timeline order.
    fn push_frame(&mut self, idx: FrameIndex, snapshot: &FrameSnapshot) -> BlockmotionResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> BlockmotionResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<FrameSnapshot>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// Borrow the captured frames.
    pub fn frames(&self) -> &[FrameSnapshot] {
        &self.frames
    }
}

impl SnapshotSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> BlockmotionResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        Ok(())
    }

    fn push_frame(&mut self, _idx: FrameIndex, snapshot: &FrameSnapshot) -> BlockmotionResult<()> {
        self.frames.push(snapshot.clone());
        Ok(())
    }

    fn end(&mut self) -> BlockmotionResult<()> {
        Ok(())
    }
}

/// Sink writing one JSON object per frame, one frame per line.
///
/// The line format is stable and diffable, which makes it a convenient
/// hand-off to external rasterizers and to golden-file comparisons.
pub struct JsonLinesSink<W: Write> {
    out: W,
}

impl JsonLinesSink<BufWriter<File>> {
    /// Create a sink writing to a new file at `path`.
    pub fn create(path: impl AsRef<Path>) -> BlockmotionResult<Self> {
        let path = path.as_ref();
        let file = File::create(path)
            .with_context(|| format!("create snapshot file '{}'", path.display()))?;
        Ok(Self {
            out: BufWriter::new(file),
        })
    }
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Consume the sink, returning the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> SnapshotSink for JsonLinesSink<W> {
    fn begin(&mut self, _cfg: SinkConfig) -> BlockmotionResult<()> {
        Ok(())
    }

    fn push_frame(&mut self, _idx: FrameIndex, snapshot: &FrameSnapshot) -> BlockmotionResult<()> {
        let line = serde_json::to_string(snapshot).context("serialize frame snapshot")?;
        self.out
            .write_all(line.as_bytes())
            .and_then(|()| self.out.write_all(b"\n"))
            .context("write frame snapshot")?;
        Ok(())
    }

    fn end(&mut self) -> BlockmotionResult<()> {
        self.out.flush().context("flush snapshot sink")?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/sink.rs"]
mod tests;
