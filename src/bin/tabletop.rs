use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "tabletop", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render both passes and the composite for one subject.
    Run(RunArgs),
    /// Render many subjects with randomized orientation and lamp offsets.
    Batch(BatchArgs),
    /// Composite two existing renders.
    Composite(CompositeArgs),
}

#[derive(Args, Debug, Default)]
struct SceneFlags {
    /// Scene parameters JSON; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Table (background) image.
    #[arg(long)]
    background: Option<PathBuf>,

    /// Rotation about X in degrees.
    #[arg(long, allow_hyphen_values = true)]
    rotate_x: Option<f64>,

    /// Rotation about Y in degrees.
    #[arg(long, allow_hyphen_values = true)]
    rotate_y: Option<f64>,

    /// Rotation about Z in degrees.
    #[arg(long, allow_hyphen_values = true)]
    rotate_z: Option<f64>,

    /// Lamp X offset.
    #[arg(long, allow_hyphen_values = true)]
    lamp_x: Option<f64>,

    /// Lamp Y offset.
    #[arg(long, allow_hyphen_values = true)]
    lamp_y: Option<f64>,

    /// Square framebuffer edge in pixels.
    #[arg(long)]
    resolution: Option<u32>,

    /// Output directory.
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Rasterize rows in parallel.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Worker threads when `--parallel` is set.
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Subject (foreground) image.
    #[arg(long)]
    subject: Option<PathBuf>,

    #[command(flatten)]
    scene: SceneFlags,
}

#[derive(Parser, Debug)]
struct BatchArgs {
    /// Subject images, processed in order.
    #[arg(long = "subject", required = true, num_args = 1..)]
    subjects: Vec<PathBuf>,

    /// Runs per subject.
    #[arg(long)]
    iterations: u32,

    /// Sampling seed.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    #[command(flatten)]
    scene: SceneFlags,
}

#[derive(Parser, Debug)]
struct CompositeArgs {
    /// Shader-lit render.
    #[arg(long)]
    image1: PathBuf,

    /// Textured render.
    #[arg(long)]
    image2: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Run(args) => cmd_run(args),
        Command::Batch(args) => cmd_batch(args),
        Command::Composite(args) => cmd_composite(args),
    }
}

fn scene_params(flags: &SceneFlags) -> anyhow::Result<tabletop::SceneParams> {
    let mut params = match &flags.config {
        Some(path) => tabletop::SceneParams::from_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => tabletop::SceneParams::default(),
    };
    if let Some(v) = &flags.background {
        params.background = v.clone();
    }
    if let Some(v) = flags.rotate_x {
        params.rotate_x_deg = v;
    }
    if let Some(v) = flags.rotate_y {
        params.rotate_y_deg = v;
    }
    if let Some(v) = flags.rotate_z {
        params.rotate_z_deg = v;
    }
    if let Some(v) = flags.lamp_x {
        params.lamp_x = v;
    }
    if let Some(v) = flags.lamp_y {
        params.lamp_y = v;
    }
    if let Some(v) = flags.resolution {
        params.resolution = v;
    }
    if let Some(v) = &flags.out_dir {
        params.out_dir = v.clone();
    }
    if flags.parallel {
        params.threading.parallel = true;
    }
    if flags.threads.is_some() {
        params.threading.threads = flags.threads;
    }
    Ok(params)
}

fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    let mut params = scene_params(&args.scene)?;
    if let Some(subject) = args.subject {
        params.subject = subject;
    }

    let mut backend = tabletop::create_backend(tabletop::BackendKind::Cpu, &params.threading)?;
    let report = tabletop::process(&params, backend.as_mut())
        .with_context(|| format!("process subject '{}'", params.subject.display()))?;

    eprintln!("wrote {}", report.composite.display());
    Ok(())
}

fn cmd_batch(args: BatchArgs) -> anyhow::Result<()> {
    let base = scene_params(&args.scene)?;
    let mut backend = tabletop::create_backend(tabletop::BackendKind::Cpu, &base.threading)?;
    let plan = tabletop::BatchPlan {
        subjects: args.subjects,
        iterations: args.iterations,
        seed: args.seed,
        base,
    };
    let reports = tabletop::run_batch(&plan, backend.as_mut())?;

    for report in &reports {
        eprintln!("wrote {}", report.composite.display());
    }
    Ok(())
}

fn cmd_composite(args: CompositeArgs) -> anyhow::Result<()> {
    let image1 = tabletop::load_frame_rgb8(&args.image1)
        .with_context(|| format!("read '{}'", args.image1.display()))?;
    let image2 = tabletop::load_frame_rgb8(&args.image2)
        .with_context(|| format!("read '{}'", args.image2.display()))?;
    let out = tabletop::composite(&image1, &image2)?;
    tabletop::write_png(&args.out, &out)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
