use std::io::Write as _;
use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(name = "promptreel", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Render a clip to MP4 (requires `ffmpeg` on PATH) or to a PNG sequence.
    Render(RenderArgs),
    /// Print the scene blueprint generated for a prompt as JSON.
    Blueprint(BlueprintArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Prompt text.
    #[arg(long, default_value = "")]
    prompt: String,

    /// Elapsed time in seconds.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    time: f64,

    /// Frame size as WIDTHxHEIGHT.
    #[arg(long, value_parser = parse_size, default_value = "512x512")]
    size: (u32, u32),

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Prompt text; overrides the config file.
    #[arg(long)]
    prompt: Option<String>,

    /// Animation spec JSON; flags given on the command line take precedence.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Clip length in seconds.
    #[arg(long)]
    duration: Option<f64>,

    /// Frames per second.
    #[arg(long)]
    fps: Option<u32>,

    /// Frame size as WIDTHxHEIGHT.
    #[arg(long, value_parser = parse_size)]
    size: Option<(u32, u32)>,

    /// Output MP4 path, or a directory with `--png-sequence`.
    #[arg(long)]
    out: PathBuf,

    /// Write numbered PNG files instead of an MP4.
    #[arg(long)]
    png_sequence: bool,

    /// Render chunks of frames on a thread pool.
    #[arg(long)]
    parallel: bool,

    /// Worker threads for `--parallel`.
    #[arg(long)]
    threads: Option<usize>,

    /// Frames per parallel chunk.
    #[arg(long, default_value_t = 32)]
    chunk_size: usize,
}

#[derive(Parser, Debug)]
struct BlueprintArgs {
    /// Prompt text.
    #[arg(long, default_value = "")]
    prompt: String,

    /// Pretty-print the JSON.
    #[arg(long)]
    pretty: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
        Command::Blueprint(args) => cmd_blueprint(args),
    }
}

fn parse_size(s: &str) -> Result<(u32, u32), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    let w = w
        .trim()
        .parse::<u32>()
        .map_err(|e| format!("bad width '{w}': {e}"))?;
    let h = h
        .trim()
        .parse::<u32>()
        .map_err(|e| format!("bad height '{h}': {e}"))?;
    Ok((w, h))
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let (width, height) = args.size;
    let mut surface = promptreel::Surface::new(width, height)?;
    let blueprint = promptreel::build_blueprint(&args.prompt);
    promptreel::render_frame(&mut surface, args.time, &blueprint);

    promptreel::write_png(&args.out, &surface.to_frame())
        .with_context(|| format!("write frame '{}'", args.out.display()))?;
    tracing::info!(
        seed = blueprint.seed(),
        out = %args.out.display(),
        "frame written"
    );
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut spec = match &args.config {
        Some(path) => promptreel::AnimationSpec::from_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => promptreel::AnimationSpec::default(),
    };
    if let Some(prompt) = args.prompt {
        spec.prompt = prompt;
    }
    if let Some(duration) = args.duration {
        spec.duration_secs = duration;
    }
    if let Some(fps) = args.fps {
        spec.fps = fps;
    }
    if let Some((width, height)) = args.size {
        spec.width = width;
        spec.height = height;
    }

    let opts = promptreel::RenderSessionOpts {
        parallel: args.parallel,
        chunk_size: args.chunk_size,
        threads: args.threads,
    };
    let mut session = promptreel::RenderSession::new(spec, opts)?;
    let range = session.clock().range();

    let stats = if args.png_sequence {
        let mut sink = promptreel::PngSequenceSink::new(&args.out);
        session.render_range(range, &mut sink)?
    } else {
        if !promptreel::is_ffmpeg_on_path() {
            anyhow::bail!("ffmpeg is required for MP4 output (use --png-sequence otherwise)");
        }
        let mut sink =
            promptreel::FfmpegSink::new(promptreel::FfmpegSinkOpts::new(args.out.clone()));
        session.render_range(range, &mut sink)?
    };

    tracing::info!(
        frames = stats.frames_rendered,
        out = %args.out.display(),
        "clip written"
    );
    Ok(())
}

fn cmd_blueprint(args: BlueprintArgs) -> anyhow::Result<()> {
    let blueprint = promptreel::build_blueprint(&args.prompt);
    let json = if args.pretty {
        serde_json::to_string_pretty(&blueprint)
    } else {
        serde_json::to_string(&blueprint)
    }
    .context("serialize blueprint")?;

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{json}")?;
    Ok(())
}
