use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use mitamorph::{
    DistrictTable, GeometryIndex, Outcome, SceneConfig, SceneController, Step,
    data::scatter::{derive_all, filter_for, outcome_extent},
    scene::raster,
};

#[derive(Parser, Debug)]
#[command(name = "mitamorph", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the scene at one step as SVG or PNG.
    Frame(FrameArgs),
    /// Walk every step and write a frame sequence.
    Play(PlayArgs),
    /// Print a JSON summary of a district table.
    Inspect(InspectArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// District table JSON.
    #[arg(long)]
    data: PathBuf,

    /// Narrative steps JSON (array).
    #[arg(long)]
    steps: PathBuf,

    /// Step index (0-based).
    #[arg(long)]
    step: usize,

    /// Sample the scene this many ms after the step is applied. Settled when omitted.
    #[arg(long)]
    at_ms: Option<f64>,

    /// Scene configuration JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output path; `.png` rasterizes, anything else writes SVG.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct PlayArgs {
    #[arg(long)]
    data: PathBuf,

    #[arg(long)]
    steps: PathBuf,

    #[arg(long)]
    config: Option<PathBuf>,

    /// Output directory for numbered frames.
    #[arg(long)]
    out_dir: PathBuf,

    #[arg(long, default_value_t = 30.0)]
    fps: f64,

    /// Time spent on each step.
    #[arg(long, default_value_t = 2500.0)]
    step_ms: f64,

    #[arg(long, value_enum, default_value_t = FrameFormat::Svg)]
    format: FrameFormat,
}

#[derive(Parser, Debug)]
struct InspectArgs {
    #[arg(long)]
    data: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FrameFormat {
    Svg,
    Png,
}

const SETTLE_FRAME_MS: f64 = 1000.0 / 60.0;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Play(args) => cmd_play(args),
        Command::Inspect(args) => cmd_inspect(args),
    }
}

fn open(path: &Path, what: &str) -> anyhow::Result<BufReader<File>> {
    let f = File::open(path).with_context(|| format!("open {what} '{}'", path.display()))?;
    Ok(BufReader::new(f))
}

fn read_table(path: &Path) -> anyhow::Result<DistrictTable> {
    DistrictTable::from_json_reader(open(path, "district table")?)
        .with_context(|| format!("load district table '{}'", path.display()))
}

fn read_steps(path: &Path) -> anyhow::Result<Vec<Step>> {
    mitamorph::load_steps(open(path, "steps")?)
        .with_context(|| format!("load steps '{}'", path.display()))
}

fn read_config(path: Option<&Path>) -> anyhow::Result<SceneConfig> {
    match path {
        Some(p) => SceneConfig::from_json_reader(open(p, "config")?)
            .with_context(|| format!("load config '{}'", p.display())),
        None => Ok(SceneConfig::default()),
    }
}

fn ensure_parent(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn write_scene(ctrl: &SceneController, out: &Path, format: FrameFormat) -> anyhow::Result<()> {
    ensure_parent(out)?;
    let svg = ctrl.to_svg();
    match format {
        FrameFormat::Svg => std::fs::write(out, svg)
            .with_context(|| format!("write svg '{}'", out.display()))?,
        FrameFormat::Png => raster::render_png(&svg, out)
            .with_context(|| format!("write png '{}'", out.display()))?,
    }
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let table = read_table(&args.data)?;
    let steps = read_steps(&args.steps)?;
    let config = read_config(args.config.as_deref())?;
    anyhow::ensure!(
        args.step < steps.len(),
        "step {} out of range: {} steps loaded",
        args.step,
        steps.len()
    );

    let mut ctrl = SceneController::new(table, config)?;
    let mut now = ctrl.settle(0.0, SETTLE_FRAME_MS)?;
    for step in &steps[..args.step] {
        ctrl.apply_step(step, now)?;
        now = ctrl.settle(now, SETTLE_FRAME_MS)?;
    }
    ctrl.apply_step(&steps[args.step], now)?;
    match args.at_ms {
        Some(at) => {
            anyhow::ensure!(at.is_finite() && at >= 0.0, "--at-ms must be >= 0");
            // Walk frame by frame so edge-triggered paths run as they would live.
            for t in frame_times(now, now + at, SETTLE_FRAME_MS) {
                ctrl.frame(t)?;
            }
        }
        None => {
            ctrl.settle(now, SETTLE_FRAME_MS)?;
        }
    }

    let format = match args.out.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("png") => FrameFormat::Png,
        _ => FrameFormat::Svg,
    };
    write_scene(&ctrl, &args.out, format)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

/// Timestamps from `start` to `end` in `step` increments, ending exactly on `end` once.
fn frame_times(start: f64, end: f64, step: f64) -> impl Iterator<Item = f64> {
    let mut next = Some(start);
    std::iter::from_fn(move || {
        let t = next?;
        next = (t < end).then(|| (t + step).min(end));
        Some(t)
    })
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.fps.is_finite() && args.fps > 0.0, "--fps must be > 0");
    anyhow::ensure!(
        args.step_ms.is_finite() && args.step_ms > 0.0,
        "--step-ms must be > 0"
    );
    let table = read_table(&args.data)?;
    let steps = read_steps(&args.steps)?;
    let config = read_config(args.config.as_deref())?;
    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    let mut ctrl = SceneController::new(table, config)?;
    let frame_ms = 1000.0 / args.fps;
    let per_step = (args.step_ms / frame_ms).ceil().max(1.0) as u64;
    let ext = match args.format {
        FrameFormat::Svg => "svg",
        FrameFormat::Png => "png",
    };

    let mut index: u64 = 0;
    for (i, step) in steps.iter().enumerate() {
        let step_start = index as f64 * frame_ms;
        ctrl.apply_step(step, step_start)
            .with_context(|| format!("apply step {i}"))?;
        for _ in 0..per_step {
            let now = index as f64 * frame_ms;
            ctrl.frame(now)?;
            let out = args.out_dir.join(format!("frame_{index:05}.{ext}"));
            write_scene(&ctrl, &out, args.format)?;
            index += 1;
        }
    }
    eprintln!("wrote {index} frames to {}", args.out_dir.display());
    Ok(())
}

#[derive(serde::Serialize)]
struct OutcomeSummary {
    outcome: Outcome,
    points: usize,
    domain: Option<(f64, f64)>,
}

#[derive(serde::Serialize)]
struct Summary {
    districts: usize,
    inside: usize,
    outside: usize,
    scatter_points: usize,
    boundary: Vec<u32>,
    outcomes: Vec<OutcomeSummary>,
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let table = read_table(&args.data)?;
    let geometry = GeometryIndex::build(&table, SceneConfig::default().geometry.vertex_tolerance);
    let all = derive_all(&table);
    let inside = table.districts().iter().filter(|d| d.mita).count();
    let summary = Summary {
        districts: table.len(),
        inside,
        outside: table.len() - inside,
        scatter_points: all.len(),
        boundary: geometry.boundary().iter().copied().collect(),
        outcomes: Outcome::ALL
            .into_iter()
            .map(|outcome| OutcomeSummary {
                outcome,
                points: filter_for(&all, outcome).len(),
                domain: outcome_extent(&all, outcome),
            })
            .collect(),
    };
    let json = serde_json::to_string_pretty(&summary).context("serialize summary")?;
    println!("{json}");
    Ok(())
}
