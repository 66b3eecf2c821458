use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "proofreel", version)]
struct Cli {
    /// Enable debug logging.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the available scenes.
    List,
    /// Render a single frame of a scene as a PNG.
    Frame(FrameArgs),
    /// Render a scene to MP4 (requires `ffmpeg` on PATH).
    Render(RenderArgs),
    /// Write a scene's composition as JSON.
    Dump(DumpArgs),
}

#[derive(Args, Debug)]
struct SceneArgs {
    /// Scene name (see `proofreel list`).
    #[arg(long)]
    scene: String,

    /// Canvas width in pixels.
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Canvas height in pixels.
    #[arg(long, default_value_t = 720)]
    height: u32,

    /// Frames per second.
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Label font, relative to the current directory.
    #[arg(long, default_value = proofreel::DEFAULT_FONT)]
    font: String,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Output MP4 path.
    #[arg(long)]
    out: PathBuf,

    /// Re-render every frame even when nothing changed.
    #[arg(long)]
    no_elision: bool,
}

#[derive(Args, Debug)]
struct DumpArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Output JSON path (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        })
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::List => cmd_list(),
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
        Command::Dump(args) => cmd_dump(args),
    }
}

fn cmd_list() -> anyhow::Result<()> {
    for scene in proofreel::scene::scenes() {
        println!("{:28} {}", scene.name, scene.summary);
    }
    Ok(())
}

fn build_composition(args: &SceneArgs) -> anyhow::Result<proofreel::Composition> {
    let info = proofreel::scene::find(&args.scene).with_context(|| {
        let names: Vec<_> = proofreel::scene::scenes().iter().map(|s| s.name).collect();
        format!(
            "unknown scene '{}'; available: {}",
            args.scene,
            names.join(", ")
        )
    })?;

    let opts = proofreel::SceneOptions {
        canvas: proofreel::Canvas {
            width: args.width,
            height: args.height,
        },
        fps: proofreel::Fps::new(args.fps, 1)?,
        font_source: args.font.clone(),
    };

    let comp = (info.build)(&opts)?;
    comp.validate()?;
    Ok(comp)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let comp = build_composition(&args.scene)?;
    let assets = proofreel::PreparedAssets::prepare(&comp, Path::new("."))?;
    let mut renderer = proofreel::CpuRenderer::new();

    let frame = proofreel::render_frame(
        &comp,
        proofreel::FrameIndex(args.frame),
        &mut renderer,
        &assets,
    )?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        &args.out,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let comp = build_composition(&args.scene)?;
    let assets = proofreel::PreparedAssets::prepare(&comp, Path::new("."))?;
    let mut renderer = proofreel::CpuRenderer::new();

    let opts = proofreel::RenderToMp4Opts {
        range: proofreel::FrameRange::new(proofreel::FrameIndex(0), comp.duration)?,
        overwrite: true,
        static_frame_elision: !args.no_elision,
    };

    let stats =
        proofreel::render_to_mp4_with_stats(&comp, &args.out, opts, &mut renderer, &assets)?;

    eprintln!(
        "wrote {} ({} frames, {} rendered, {} elided)",
        args.out.display(),
        stats.frames_total,
        stats.frames_rendered,
        stats.frames_elided
    );
    Ok(())
}

fn cmd_dump(args: DumpArgs) -> anyhow::Result<()> {
    let comp = build_composition(&args.scene)?;
    let json = serde_json::to_string_pretty(&comp).context("serialize composition")?;

    match args.out {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(&path, json)
                .with_context(|| format!("write json '{}'", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
