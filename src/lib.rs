//! Promptreel turns a text prompt into a deterministic, seekable procedural animation.
//!
//! The pipeline is prompt → 32-bit hash → seeded LCG → [`SceneBlueprint`] → per-frame raster:
//!
//! - Build a blueprint once per prompt with [`build_blueprint`]
//! - Paint any frame at elapsed time `t` with [`render_frame`]
//! - Or drive a whole clip through a [`RenderSession`] into a [`FrameSink`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Frame sinks: in-memory, PNG sequence and ffmpeg MP4.
pub mod encode;
pub(crate) mod render;
pub(crate) mod scene;
pub(crate) mod session;

pub use crate::foundation::core::{Canvas, Fps, FrameIndex, FrameRange, Point, Rgba8Premul, Vec2};
pub use crate::foundation::error::{ReelError, ReelResult};

pub use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts, is_ffmpeg_on_path};
pub use crate::encode::png::{PngSequenceSink, write_png};
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::render::frame::{LAYER_SEGMENTS, render_frame};
pub use crate::render::surface::{BlendGuard, BlendMode, FrameRGBA, Surface};
pub use crate::scene::blueprint::{LAYER_COUNT, LayerSpec, SPARK_COUNT, SceneBlueprint, SparkSpec};
pub use crate::scene::builder::{DEFAULT_PROMPT, build_blueprint, normalize_prompt};
pub use crate::scene::color::Hsla;
pub use crate::scene::hash::prompt_hash;
pub use crate::scene::rng::SeededGenerator;
pub use crate::session::animation::{
    AnimationSpec, FrameClock, RECOMMENDED_DURATION_SECS, RECOMMENDED_FPS, RECOMMENDED_SIZE,
};
pub use crate::session::render_session::{RenderSession, RenderSessionOpts, RenderStats};
