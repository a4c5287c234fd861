use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use case_narrative::data::Dataset;
use case_narrative::render::{NullRenderer, SvgRenderer};
use case_narrative::{Narrative, NarrativeConfig};
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "case-narrative", version, about = "Render COVID-19 case narrative scenes")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one scene as an SVG file.
    Render(RenderArgs),
    /// Step through every scene with "next" and write one SVG per scene.
    Tour(TourArgs),
    /// Print the scene view as JSON.
    Inspect(InspectArgs),
    /// List distinct regions in first-seen order.
    Regions(DataArgs),
}

#[derive(Args, Debug)]
struct DataArgs {
    /// Input csv with `date`, `cases` and `state` columns.
    #[arg(long)]
    data: PathBuf,
}

#[derive(Args, Debug)]
struct SceneArgs {
    #[command(flatten)]
    data: DataArgs,

    /// Optional JSON config; defaults apply to omitted fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Scene index (0-based).
    #[arg(long, default_value_t = 0)]
    scene: usize,

    /// Region to select; only valid on the region explorer scene.
    #[arg(long)]
    region: Option<String>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Output SVG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct TourArgs {
    #[command(flatten)]
    data: DataArgs,

    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory receiving `scene-<n>.svg`.
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(Args, Debug)]
struct InspectArgs {
    #[command(flatten)]
    scene: SceneArgs,
}

fn main() -> anyhow::Result<()> {
    let _ = case_narrative::telemetry::init_default_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Tour(args) => cmd_tour(args),
        Command::Inspect(args) => cmd_inspect(args),
        Command::Regions(args) => cmd_regions(args),
    }
}

fn read_config(path: Option<&Path>) -> anyhow::Result<NarrativeConfig> {
    match path {
        Some(path) => NarrativeConfig::from_path(path)
            .with_context(|| format!("load config '{}'", path.display())),
        None => Ok(NarrativeConfig::default()),
    }
}

fn read_dataset(args: &DataArgs) -> anyhow::Result<Dataset> {
    Dataset::load(&args.data).with_context(|| format!("load dataset '{}'", args.data.display()))
}

fn open_scene<R: case_narrative::render::Renderer>(
    renderer: R,
    args: &SceneArgs,
) -> anyhow::Result<Narrative<R>> {
    let config = read_config(args.config.as_deref())?;
    let dataset = read_dataset(&args.data)?;
    let mut narrative = Narrative::new(renderer, dataset, config)?;
    narrative
        .go_to(args.scene)
        .with_context(|| format!("open scene {}", args.scene))?;
    if let Some(region) = &args.region {
        narrative
            .select_region(region.as_str())
            .with_context(|| format!("select region '{region}'"))?;
    }
    Ok(narrative)
}

fn write_output(path: &Path, contents: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("write '{}'", path.display()))
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let narrative = open_scene(SvgRenderer::new(), &args.scene)?;
    write_output(&args.out, narrative.renderer().document())?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_tour(args: TourArgs) -> anyhow::Result<()> {
    let config = read_config(args.config.as_deref())?;
    let dataset = read_dataset(&args.data)?;
    let mut narrative = Narrative::new(SvgRenderer::new(), dataset, config)?;
    let count = narrative.controller().scene_count();

    for step in 0..count {
        let index = narrative.controller().current_scene();
        let out = args.out_dir.join(format!("scene-{index}.svg"));
        write_output(&out, narrative.renderer().document())?;
        eprintln!("wrote {}", out.display());
        if step + 1 < count {
            narrative.next()?;
        }
    }
    Ok(())
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let narrative = open_scene(NullRenderer::default(), &args.scene)?;
    let json = serde_json::to_string_pretty(&narrative.view()).context("serialize scene view")?;
    println!("{json}");
    Ok(())
}

fn cmd_regions(args: DataArgs) -> anyhow::Result<()> {
    let dataset = read_dataset(&args)?;
    for region in dataset.regions() {
        println!("{region}");
    }
    Ok(())
}
