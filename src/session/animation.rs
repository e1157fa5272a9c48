use std::path::Path;

use anyhow::Context as _;

use crate::foundation::core::{Canvas, Fps, FrameIndex, FrameRange};
use crate::foundation::error::{ReelError, ReelResult};
use crate::render::surface::Surface;

/// Recommended clip length bounds in seconds.
pub const RECOMMENDED_DURATION_SECS: (f64, f64) = (2.0, 12.0);
/// Recommended frame rates.
pub const RECOMMENDED_FPS: [u32; 3] = [12, 24, 30];
/// Recommended square edge bounds in pixels.
pub const RECOMMENDED_SIZE: (u32, u32) = (384, 1024);

/// Everything a caller supplies to animate one prompt.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnimationSpec {
    /// Free-form prompt text; whitespace-only selects the default scene.
    pub prompt: String,
    /// Clip length in seconds.
    pub duration_secs: f64,
    /// Frames per second.
    pub fps: u32,
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self {
            prompt: String::new(),
            duration_secs: 6.0,
            fps: 24,
            width: 512,
            height: 512,
        }
    }
}

impl AnimationSpec {
    /// Parse a JSON spec; missing fields take their defaults.
    pub fn from_json_str(s: &str) -> ReelResult<Self> {
        serde_json::from_str(s).map_err(|e| ReelError::serde(e.to_string()))
    }

    /// Load a JSON spec from disk.
    pub fn from_path(path: impl AsRef<Path>) -> ReelResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read animation spec '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Hard checks: values the renderer or sinks cannot work with.
    pub fn validate(&self) -> ReelResult<()> {
        if !self.duration_secs.is_finite() || self.duration_secs <= 0.0 {
            return Err(ReelError::validation(format!(
                "duration_secs must be a positive number, got {}",
                self.duration_secs
            )));
        }
        if self.fps == 0 {
            return Err(ReelError::validation("fps must be > 0"));
        }
        if self.width == 0 || self.height == 0 {
            return Err(ReelError::surface(format!(
                "frame size must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        if self.width > Surface::MAX_DIMENSION || self.height > Surface::MAX_DIMENSION {
            return Err(ReelError::surface(format!(
                "frame size {}x{} exceeds the {}px raster limit",
                self.width,
                self.height,
                Surface::MAX_DIMENSION
            )));
        }
        Ok(())
    }

    /// Soft checks: parameters outside the recommended envelope. Rendering still works.
    pub fn advisories(&self) -> Vec<String> {
        let mut out = Vec::new();
        let (lo, hi) = RECOMMENDED_DURATION_SECS;
        if !(lo..=hi).contains(&self.duration_secs) {
            out.push(format!(
                "duration {}s is outside the recommended {lo}..={hi}s",
                self.duration_secs
            ));
        }
        if !RECOMMENDED_FPS.contains(&self.fps) {
            out.push(format!(
                "fps {} is not one of the recommended {RECOMMENDED_FPS:?}",
                self.fps
            ));
        }
        let (min, max) = RECOMMENDED_SIZE;
        if self.width != self.height {
            out.push(format!(
                "frame size {}x{} is not square",
                self.width, self.height
            ));
        }
        if !(min..=max).contains(&self.width) || !(min..=max).contains(&self.height) {
            out.push(format!(
                "frame size {}x{} is outside the recommended {min}..={max}px",
                self.width, self.height
            ));
        }
        out
    }

    /// Output canvas.
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// Timeline derived from duration and frame rate.
    pub fn clock(&self) -> ReelResult<FrameClock> {
        FrameClock::new(Fps::new(self.fps, 1)?, self.duration_secs)
    }
}

/// Maps frame indices to elapsed seconds for a fixed-rate clip.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameClock {
    fps: Fps,
    frame_count: u64,
}

impl FrameClock {
    /// Clock covering `duration_secs` at `fps`, with at least one frame.
    pub fn new(fps: Fps, duration_secs: f64) -> ReelResult<Self> {
        if !duration_secs.is_finite() || duration_secs <= 0.0 {
            return Err(ReelError::validation(
                "clock duration must be a positive number",
            ));
        }
        Ok(Self {
            fps,
            frame_count: fps.secs_to_frames_ceil(duration_secs).max(1),
        })
    }

    /// Frame rate.
    pub fn fps(&self) -> Fps {
        self.fps
    }

    /// Number of frames in the clip.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// The whole clip as a frame range.
    pub fn range(&self) -> FrameRange {
        FrameRange {
            start: FrameIndex(0),
            end: FrameIndex(self.frame_count),
        }
    }

    /// Elapsed seconds at the start of frame `idx`.
    pub fn time_at(&self, idx: FrameIndex) -> f64 {
        self.fps.frames_to_secs(idx.0)
    }

    /// `(index, elapsed seconds)` for every frame of `range`.
    pub fn frame_times(&self, range: FrameRange) -> impl Iterator<Item = (FrameIndex, f64)> + '_ {
        (range.start.0..range.end.0).map(move |i| (FrameIndex(i), self.time_at(FrameIndex(i))))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/animation.rs"]
mod tests;
