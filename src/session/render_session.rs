use rayon::prelude::*;

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{FrameIndex, FrameRange};
use crate::foundation::error::{ReelError, ReelResult};
use crate::render::frame::render_frame;
use crate::render::surface::{FrameRGBA, Surface};
use crate::scene::blueprint::SceneBlueprint;
use crate::scene::builder::{build_blueprint, normalize_prompt};
use crate::session::animation::{AnimationSpec, FrameClock};

/// How a session spreads range renders over threads.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderSessionOpts {
    /// Render each chunk on a dedicated rayon pool.
    pub parallel: bool,
    /// Frames per chunk; `0` is treated as `1`.
    pub chunk_size: usize,
    /// Worker count for the pool; `None` lets rayon decide.
    pub threads: Option<usize>,
}

impl Default for RenderSessionOpts {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 32,
            threads: None,
        }
    }
}

/// Counters reported by [`RenderSession::render_range`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Frames requested.
    pub frames_total: u64,
    /// Frames rendered and delivered to the sink.
    pub frames_rendered: u64,
}

/// Owns one prompt's blueprint plus a reusable surface and drives per-frame rendering.
///
/// The blueprint is built once per normalized prompt. Each frame is a pure function of the
/// blueprint and its elapsed time, so any frame can be rendered in any order.
pub struct RenderSession {
    spec: AnimationSpec,
    opts: RenderSessionOpts,
    clock: FrameClock,
    prompt_key: String,
    blueprint: SceneBlueprint,
    surface: Surface,
    pool: Option<rayon::ThreadPool>,
}

impl std::fmt::Debug for RenderSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderSession")
            .field("spec", &self.spec)
            .field("opts", &self.opts)
            .field("prompt_key", &self.prompt_key)
            .field("seed", &self.blueprint.seed())
            .finish_non_exhaustive()
    }
}

impl RenderSession {
    /// Validate `spec`, build its blueprint and allocate the frame surface.
    #[tracing::instrument(skip(spec), fields(prompt = %spec.prompt))]
    pub fn new(spec: AnimationSpec, opts: RenderSessionOpts) -> ReelResult<Self> {
        spec.validate()?;
        for advisory in spec.advisories() {
            tracing::warn!("{advisory}");
        }
        let clock = spec.clock()?;
        let surface = Surface::new(spec.width, spec.height)?;
        let pool = if opts.parallel {
            Some(build_thread_pool(opts.threads)?)
        } else {
            None
        };
        let prompt_key = normalize_prompt(&spec.prompt).into_owned();
        let blueprint = build_blueprint(&prompt_key);

        Ok(Self {
            spec,
            opts,
            clock,
            prompt_key,
            blueprint,
            surface,
            pool,
        })
    }

    /// Parameters this session renders with.
    pub fn spec(&self) -> &AnimationSpec {
        &self.spec
    }

    /// Threading options.
    pub fn opts(&self) -> &RenderSessionOpts {
        &self.opts
    }

    /// The memoized blueprint for the current prompt.
    pub fn blueprint(&self) -> &SceneBlueprint {
        &self.blueprint
    }

    /// Normalized prompt the blueprint was built from.
    pub fn prompt_key(&self) -> &str {
        &self.prompt_key
    }

    /// Timeline for the configured duration and frame rate.
    pub fn clock(&self) -> FrameClock {
        self.clock
    }

    /// Switch prompts. Returns `true` when the blueprint was rebuilt.
    pub fn set_prompt(&mut self, prompt: &str) -> bool {
        self.spec.prompt = prompt.to_owned();
        let key = normalize_prompt(prompt);
        if key == self.prompt_key {
            return false;
        }
        self.prompt_key = key.into_owned();
        self.blueprint = build_blueprint(&self.prompt_key);
        tracing::debug!(prompt = %self.prompt_key, seed = self.blueprint.seed(), "blueprint rebuilt");
        true
    }

    /// Change the output size. The blueprint is size independent and is kept.
    pub fn set_size(&mut self, width: u32, height: u32) -> ReelResult<()> {
        let mut next = self.spec.clone();
        next.width = width;
        next.height = height;
        next.validate()?;
        self.surface.resize(width, height)?;
        self.spec = next;
        Ok(())
    }

    /// Render the scene at `elapsed_secs`.
    pub fn render_at(&mut self, elapsed_secs: f64) -> FrameRGBA {
        render_frame(&mut self.surface, elapsed_secs, &self.blueprint);
        self.surface.to_frame()
    }

    /// Render frame `idx` of the clip.
    pub fn render_frame(&mut self, idx: FrameIndex) -> ReelResult<FrameRGBA> {
        if !self.clock.range().contains(idx) {
            return Err(ReelError::validation(format!(
                "frame {} is outside the clip (0..{})",
                idx.0,
                self.clock.frame_count()
            )));
        }
        Ok(self.render_at(self.clock.time_at(idx)))
    }

    /// Render every frame of `range` and push them to `sink` in timeline order.
    #[tracing::instrument(skip(self, sink), fields(prompt = %self.prompt_key))]
    pub fn render_range(
        &mut self,
        range: FrameRange,
        sink: &mut dyn FrameSink,
    ) -> ReelResult<RenderStats> {
        if range.end.0 > self.clock.frame_count() {
            return Err(ReelError::validation(format!(
                "range end {} exceeds the clip length {}",
                range.end.0,
                self.clock.frame_count()
            )));
        }

        sink.begin(SinkConfig {
            width: self.spec.width,
            height: self.spec.height,
            fps: self.clock.fps(),
            frame_count: range.len_frames(),
        })?;

        let mut stats = RenderStats::default();
        let chunk_size = normalized_chunk_size(self.opts.chunk_size);
        let mut chunk_start = range.start.0;
        while chunk_start < range.end.0 {
            let chunk_end = (chunk_start + chunk_size).min(range.end.0);
            let chunk = FrameRange::new(FrameIndex(chunk_start), FrameIndex(chunk_end))?;
            let frames = match &self.pool {
                Some(pool) => render_chunk_parallel(
                    pool,
                    &self.blueprint,
                    &self.clock,
                    chunk,
                    self.spec.width,
                    self.spec.height,
                )?,
                None => render_chunk_sequential(
                    &mut self.surface,
                    &self.blueprint,
                    &self.clock,
                    chunk,
                ),
            };
            for (idx, frame) in frames {
                sink.push_frame(idx, &frame)?;
                stats.frames_rendered += 1;
            }
            stats.frames_total += chunk.len_frames();
            chunk_start = chunk_end;
        }

        sink.end()?;
        tracing::info!(
            frames = stats.frames_rendered,
            parallel = self.pool.is_some(),
            "render finished"
        );
        Ok(stats)
    }
}

fn render_chunk_sequential(
    surface: &mut Surface,
    blueprint: &SceneBlueprint,
    clock: &FrameClock,
    chunk: FrameRange,
) -> Vec<(FrameIndex, FrameRGBA)> {
    clock
        .frame_times(chunk)
        .map(|(idx, t)| {
            render_frame(surface, t, blueprint);
            (idx, surface.to_frame())
        })
        .collect()
}

fn render_chunk_parallel(
    pool: &rayon::ThreadPool,
    blueprint: &SceneBlueprint,
    clock: &FrameClock,
    chunk: FrameRange,
    width: u32,
    height: u32,
) -> ReelResult<Vec<(FrameIndex, FrameRGBA)>> {
    let times: Vec<_> = clock.frame_times(chunk).collect();
    let rendered = pool.install(|| {
        times
            .par_iter()
            .map_init(
                || Surface::new(width, height),
                |surface, &(idx, t)| -> ReelResult<(FrameIndex, FrameRGBA)> {
                    let surface = surface
                        .as_mut()
                        .map_err(|e| ReelError::surface(e.to_string()))?;
                    render_frame(surface, t, blueprint);
                    Ok((idx, surface.to_frame()))
                },
            )
            .collect::<Vec<_>>()
    });
    rendered.into_iter().collect()
}

fn build_thread_pool(threads: Option<usize>) -> ReelResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(ReelError::validation(
            "render threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| ReelError::Other(anyhow::anyhow!("failed to build rayon thread pool: {e}")))
}

fn normalized_chunk_size(chunk_size: usize) -> u64 {
    if chunk_size == 0 {
        1
    } else {
        chunk_size as u64
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/render_session.rs"]
mod tests;
