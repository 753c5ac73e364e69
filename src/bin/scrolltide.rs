use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use scrolltide::{ChapterId, Content, Engine, StaticScene, StaticStage, TimingConfig};

#[derive(Parser, Debug)]
#[command(name = "scrolltide", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check content structure and every bridge; fails on any broken bridge.
    Validate(InputArgs),
    /// Print chapter durations and scroll regions.
    Regions(RegionsArgs),
    /// Dump a chapter schedule (or every schedule) as JSON.
    Schedule(ScheduleArgs),
    /// Print the scene state at a scroll position as JSON.
    Sample(SampleArgs),
}

#[derive(Parser, Debug)]
struct InputArgs {
    /// Input content JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Timing config JSON; missing fields use the built-in constants.
    #[arg(long)]
    timing: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct RegionsArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Emit JSON instead of a table.
    #[arg(long)]
    json: bool,
}

#[derive(Parser, Debug)]
struct ScheduleArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Chapter id; omit to dump every chapter.
    #[arg(long)]
    chapter: Option<u32>,
}

#[derive(Parser, Debug)]
struct SampleArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Scroll position in [0, 1].
    #[arg(long)]
    at: f64,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Validate(args) => cmd_validate(args),
        Command::Regions(args) => cmd_regions(args),
        Command::Schedule(args) => cmd_schedule(args),
        Command::Sample(args) => cmd_sample(args),
    }
}

fn load_engine(input: &InputArgs) -> anyhow::Result<Engine> {
    let content = read_content(&input.in_path)?;
    let timing = match &input.timing {
        Some(path) => TimingConfig::from_path(path)
            .with_context(|| format!("load timing config '{}'", path.display()))?,
        None => TimingConfig::default(),
    };
    Ok(Engine::initialize(content, timing)?)
}

fn read_content(path: &Path) -> anyhow::Result<Content> {
    Content::from_path(path).with_context(|| format!("load content '{}'", path.display()))
}

fn cmd_validate(args: InputArgs) -> anyhow::Result<()> {
    let engine = load_engine(&args)?;
    let errors = engine.validate_bridges();
    for e in &errors {
        eprintln!("{e}");
    }
    if !errors.is_empty() {
        anyhow::bail!("{} broken bridge(s)", errors.len());
    }

    let bridges = engine
        .content()
        .chapters
        .iter()
        .flat_map(|c| &c.text_blocks)
        .filter(|t| t.bridges_to.is_some())
        .count();
    eprintln!(
        "ok: {} chapters, {bridges} bridges",
        engine.content().chapters.len()
    );
    Ok(())
}

fn cmd_regions(args: RegionsArgs) -> anyhow::Result<()> {
    let engine = load_engine(&args.input)?;

    if args.json {
        let out = serde_json::json!({
            "totalMs": engine.total_duration_ms(),
            "scrollDistanceVh": engine.scroll_distance_vh(),
            "durationsMs": engine.durations(),
            "regions": engine.regions(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("{:>7} {:>10} {:>10} {:>12}", "chapter", "start", "end", "duration_ms");
    for (id, region) in engine.regions().iter() {
        let ms = engine.chapter_duration_ms(id).unwrap_or(0);
        println!(
            "{:>7} {:>10.6} {:>10.6} {:>12}",
            id.0, region.start, region.end, ms
        );
    }
    println!(
        "total {} ms, scroll distance {} vh",
        engine.total_duration_ms(),
        engine.scroll_distance_vh()
    );
    Ok(())
}

fn cmd_schedule(args: ScheduleArgs) -> anyhow::Result<()> {
    let engine = load_engine(&args.input)?;

    let out = match args.chapter {
        Some(id) => {
            let chapter = engine
                .content()
                .chapter(ChapterId(id))
                .with_context(|| format!("chapter {id} not found"))?;
            let schedule =
                engine.build_chapter_timeline(chapter.id, &StaticScene::from_chapter(chapter))?;
            serde_json::to_value(&schedule)?
        }
        None => {
            let master =
                engine.build_master_timeline(&StaticStage::from_content(engine.content()))?;
            serde_json::json!({
                "schedules": master.schedules(),
                "effectWindows": master.effect_windows(),
            })
        }
    };
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn cmd_sample(args: SampleArgs) -> anyhow::Result<()> {
    let engine = load_engine(&args.input)?;
    let master = engine.build_master_timeline(&StaticStage::from_content(engine.content()))?;
    let mut playhead = master.controller();
    let state = playhead
        .seek(args.at)
        .with_context(|| format!("seek to {}", args.at))?;
    println!("{}", serde_json::to_string_pretty(state)?);
    Ok(())
}
