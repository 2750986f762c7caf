use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "scrubline", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a scene description.
    Validate(ValidateArgs),
    /// Evaluate a scene at one scroll offset and print the state as JSON.
    Sample(SampleArgs),
    /// Evaluate a scene at evenly spaced offsets across the pinned range,
    /// printing one JSON line per sample.
    Sweep(SweepArgs),
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Input scene JSON; omit to use the built-in about sequence.
    #[arg(long = "in")]
    in_path: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct SampleArgs {
    /// Input scene JSON; omit to use the built-in about sequence.
    #[arg(long = "in")]
    in_path: Option<PathBuf>,

    /// Raw scroll offset in pixels.
    #[arg(long)]
    scroll: f64,

    /// Viewport width in pixels.
    #[arg(long, default_value_t = 1920.0)]
    width: f64,

    /// Viewport height in pixels.
    #[arg(long, default_value_t = 1080.0)]
    height: f64,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,
}

#[derive(Parser, Debug)]
struct SweepArgs {
    /// Input scene JSON; omit to use the built-in about sequence.
    #[arg(long = "in")]
    in_path: Option<PathBuf>,

    /// Number of samples across the pinned range (inclusive of both ends).
    #[arg(long, default_value_t = 11)]
    steps: usize,

    /// Viewport width in pixels.
    #[arg(long, default_value_t = 1920.0)]
    width: f64,

    /// Viewport height in pixels.
    #[arg(long, default_value_t = 1080.0)]
    height: f64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Validate(args) => cmd_validate(args),
        Command::Sample(args) => cmd_sample(args),
        Command::Sweep(args) => cmd_sweep(args),
    }
}

fn load_scene(path: Option<&Path>) -> anyhow::Result<scrubline::Scene> {
    match path {
        Some(path) => {
            let f = File::open(path).with_context(|| format!("open scene '{}'", path.display()))?;
            let r = BufReader::new(f);
            let scene: scrubline::Scene =
                serde_json::from_reader(r).with_context(|| "parse scene JSON")?;
            Ok(scene)
        }
        None => Ok(scrubline::presets::about_scene()?),
    }
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let scene = load_scene(args.in_path.as_deref())?;
    scene.validate()?;
    eprintln!(
        "ok: {} tracks, {} frames, {} stagger groups",
        scene.timeline.tracks.len(),
        scene.frames.as_ref().map_or(0, |f| f.len()),
        scene.staggers.len()
    );
    Ok(())
}

fn cmd_sample(args: SampleArgs) -> anyhow::Result<()> {
    let scene = load_scene(args.in_path.as_deref())?;
    scene.validate()?;

    let viewport = scrubline::Viewport::new(args.width, args.height)?;
    let mut seq = scrubline::ScrollSequence::new(scene, viewport)?;
    seq.set_ready()?;
    seq.on_scroll(args.scroll)?;
    seq.invalidate()?;

    let state = seq.state();
    let json = if args.pretty {
        serde_json::to_string_pretty(state)?
    } else {
        serde_json::to_string(state)?
    };
    println!("{json}");
    eprintln!(
        "progress {:.4} at scroll {} ({}x{})",
        state.progress.value(),
        args.scroll,
        args.width,
        args.height
    );
    Ok(())
}

fn cmd_sweep(args: SweepArgs) -> anyhow::Result<()> {
    if args.steps < 2 {
        anyhow::bail!("sweep needs at least 2 steps");
    }

    let scene = load_scene(args.in_path.as_deref())?;
    scene.validate()?;

    let viewport = scrubline::Viewport::new(args.width, args.height)?;
    let pin = {
        use scrubline::MeasurePin as _;
        scene.pin.measure(viewport)
    };

    let mut seq = scrubline::ScrollSequence::new(scene, viewport)?.with_epsilon(0.0);
    seq.set_ready()?;

    for step in 0..args.steps {
        let t = step as f64 / (args.steps - 1) as f64;
        let scroll = pin.start_offset + pin.virtual_length * t;
        seq.on_scroll(scroll)?;
        // Coalesced boundary repeats still have a current state to print.
        println!("{}", serde_json::to_string(seq.state())?);
    }
    eprintln!(
        "swept {} samples over [{}, {}]",
        args.steps,
        pin.start_offset,
        pin.end_offset()
    );
    Ok(())
}
