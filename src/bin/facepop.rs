use std::{
    fs::File,
    io::BufWriter,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use facepop::{PopupSnapshot, Stage, StageConfig, Viewport, ZoneTable};

#[derive(Parser, Debug)]
#[command(name = "facepop", version)]
struct Cli {
    /// Log engine events to stderr (repeat for trace level).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the reference zone table as JSON.
    Zones,
    /// Run one reconstruction pass over a still image and write every popup as a PNG.
    Reconstruct(ReconstructArgs),
}

#[derive(Parser, Debug)]
struct ReconstructArgs {
    /// Captured face image (PNG, JPEG, ...).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output directory for popup PNGs and `manifest.json`.
    #[arg(long)]
    out: PathBuf,

    /// Stage configuration JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for shuffling and jitter; overrides the config seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Viewport as WIDTHxHEIGHT; overrides the config viewport.
    #[arg(long, value_parser = parse_viewport)]
    viewport: Option<Viewport>,
}

#[derive(serde::Serialize)]
struct Manifest {
    viewport: Viewport,
    generation: u64,
    finished_at_ms: u64,
    popups: Vec<ManifestEntry>,
}

#[derive(serde::Serialize)]
struct ManifestEntry {
    file: String,
    #[serde(flatten)]
    popup: PopupSnapshot,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Command::Zones => cmd_zones(),
        Command::Reconstruct(args) => cmd_reconstruct(args),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn parse_viewport(s: &str) -> Result<Viewport, String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    let width: f64 = w.trim().parse().map_err(|e| format!("width: {e}"))?;
    let height: f64 = h.trim().parse().map_err(|e| format!("height: {e}"))?;
    Viewport::new(width, height).map_err(|e| e.to_string())
}

fn cmd_zones() -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&ZoneTable::reference())
        .context("serialize zone table")?;
    println!("{json}");
    Ok(())
}

fn load_config(args: &ReconstructArgs) -> anyhow::Result<StageConfig> {
    let mut cfg = match &args.config {
        Some(path) => StageConfig::from_path(path)?,
        None => StageConfig::default(),
    };
    if args.seed.is_some() {
        cfg.seed = args.seed;
    }
    if let Some(vp) = args.viewport {
        cfg.viewport = vp;
    }
    Ok(cfg)
}

fn cmd_reconstruct(args: ReconstructArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args)?;
    let mut stage = Stage::new(cfg)?;

    let bytes = std::fs::read(&args.in_path)
        .with_context(|| format!("read capture '{}'", args.in_path.display()))?;
    stage.capture_encoded(&bytes)?;
    stage.reconstruct();
    let finished_at = stage.run_until_idle();

    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("create output dir '{}'", args.out.display()))?;

    let controller = stage.controller();
    let mut popups: Vec<_> = controller.popups().collect();
    popups.sort_by_key(|p| p.display_index());

    let mut entries = Vec::with_capacity(popups.len());
    for popup in popups {
        let Some(raster) = popup.render()? else {
            tracing::warn!(id = %popup.id(), "popup never decoded; skipped");
            continue;
        };
        let file = format!(
            "popup-{:02}-{}-{}.png",
            popup.display_index(),
            popup.zone_name(),
            popup.filter().name
        );
        write_png(&args.out.join(&file), &raster)?;
        entries.push(ManifestEntry {
            file,
            popup: popup.snapshot(),
        });
    }

    let manifest = Manifest {
        viewport: controller.viewport(),
        generation: controller.generation().0,
        finished_at_ms: finished_at.0,
        popups: entries,
    };
    let manifest_path = args.out.join("manifest.json");
    let f = File::create(&manifest_path)
        .with_context(|| format!("create manifest '{}'", manifest_path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(f), &manifest).context("write manifest")?;

    eprintln!(
        "wrote {} popups to {}",
        manifest.popups.len(),
        args.out.display()
    );
    Ok(())
}

fn write_png(path: &Path, raster: &facepop::Raster) -> anyhow::Result<()> {
    raster
        .save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", path.display()))
}
