use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "hue-overlay", version)]
struct Cli {
    /// Log filter, e.g. `info` or `hue_overlay=debug`. `RUST_LOG` takes precedence.
    #[arg(long, global = true, default_value = "info")]
    log: String,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a fixture directory and report rejected records.
    Check(CheckArgs),
    /// Print the percentage position of every hotspot.
    Place(DirArgs),
    /// Print the reveal timeline.
    Timeline(TimelineArgs),
    /// Print the detail panel for one hotspot.
    Detail(DetailArgs),
}

#[derive(Parser, Debug)]
struct DirArgs {
    /// Directory holding hotspots.json, image-config.json and infrastructure-details.json.
    #[arg(long)]
    dir: PathBuf,
}

#[derive(Parser, Debug)]
struct CheckArgs {
    #[command(flatten)]
    dir: DirArgs,

    /// Overlay configuration JSON to validate as well.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Fail when any hotspot record was rejected.
    #[arg(long)]
    strict: bool,
}

#[derive(Parser, Debug)]
struct TimelineArgs {
    /// Overlay configuration JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the total reveal duration, in milliseconds.
    #[arg(long = "duration")]
    duration_ms: Option<u64>,

    /// Simulation clock step, in milliseconds.
    #[arg(long, default_value_t = 50)]
    step: u64,

    /// Run the reveal against the wall clock and print phases as they fire.
    #[arg(long)]
    live: bool,
}

#[derive(Parser, Debug)]
struct DetailArgs {
    #[command(flatten)]
    dir: DirArgs,

    /// Hotspot id.
    #[arg(long)]
    id: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log)?;
    match cli.cmd {
        Command::Check(args) => cmd_check(args),
        Command::Place(args) => cmd_place(args),
        Command::Timeline(args) => cmd_timeline(args),
        Command::Detail(args) => cmd_detail(args),
    }
}

fn init_tracing(default_filter: &str) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(f) => f,
        Err(_) => EnvFilter::try_new(default_filter)
            .with_context(|| format!("parse log filter '{default_filter}'"))?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn load_fixtures(dir: &Path) -> anyhow::Result<hue_overlay::SiteFixtures> {
    hue_overlay::SiteFixtures::load_dir(dir)
        .with_context(|| format!("load fixtures from '{}'", dir.display()))
}

fn load_config(path: Option<&Path>) -> anyhow::Result<hue_overlay::OverlayConfig> {
    match path {
        Some(p) => hue_overlay::OverlayConfig::from_path(p)
            .with_context(|| format!("load config '{}'", p.display())),
        None => Ok(hue_overlay::OverlayConfig::default()),
    }
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let fixtures = load_fixtures(&args.dir.dir)?;
    load_config(args.config.as_deref())?;

    println!("hotspots: {}", fixtures.catalog.len());
    println!(
        "details:  {}",
        fixtures
            .details
            .as_ref()
            .map_or(0, |d| d.infrastructure.len())
    );
    let detail_errors = fixtures
        .details
        .as_ref()
        .map_or(&[][..], |d| d.rejected.as_slice());
    println!("rejected: {}", fixtures.rejected.len() + detail_errors.len());
    for err in &fixtures.rejected {
        println!("  {err}");
    }
    for err in detail_errors {
        println!("  {err}");
    }

    let total = fixtures.rejected.len() + detail_errors.len();
    if args.strict && total > 0 {
        anyhow::bail!("{total} fixture record(s) rejected");
    }
    Ok(())
}

fn cmd_place(args: DirArgs) -> anyhow::Result<()> {
    let fixtures = load_fixtures(&args.dir)?;
    for (id, pos) in fixtures.placements()? {
        let (left, top) = pos.css();
        println!("{id}\tleft={left}\ttop={top}");
    }
    Ok(())
}

fn cmd_timeline(args: TimelineArgs) -> anyhow::Result<()> {
    let mut cfg = load_config(args.config.as_deref())?;
    if args.duration_ms.is_some() {
        cfg.reveal.duration_ms = args.duration_ms;
    }
    let schedule = cfg.reveal.schedule()?;
    if !args.live && args.step == 0 {
        anyhow::bail!("--step must be > 0");
    }

    if !args.live {
        println!("total: {}ms", schedule.total_ms());
        for (phase, offset) in schedule.offsets() {
            println!("{offset:>6}ms  {}", serde_json::to_string(&phase)?);
        }
        let end = schedule.total_ms();
        let mut seq = hue_overlay::RevealSequencer::with_schedule(schedule);
        seq.set_visible(true, hue_overlay::Millis::ZERO);
        let mut t = 0u64;
        loop {
            for ev in seq.advance(hue_overlay::Millis(t)) {
                println!("tick {t:>6}ms  fired {:?} (due {}ms)", ev.phase, ev.at.0);
            }
            if seq.is_complete() || t >= end {
                break;
            }
            t = t.saturating_add(args.step).min(end);
        }
        return Ok(());
    }

    let budget = Duration::from_millis(schedule.total_ms().saturating_mul(2).max(1000));
    let (tx, rx) = mpsc::channel();
    let driver = hue_overlay::RevealDriver::spawn(schedule, move |ev| {
        let _ = tx.send(ev);
    })?;
    driver.set_visible(true)?;

    loop {
        let ev = rx
            .recv_timeout(budget)
            .context("reveal did not reach the info panel in time")?;
        println!("{:>6}ms  {}", ev.at.0, serde_json::to_string(&ev.phase)?);
        if ev.phase.is_terminal() {
            break;
        }
    }
    driver.set_visible(false)?;
    Ok(())
}

fn cmd_detail(args: DetailArgs) -> anyhow::Result<()> {
    let fixtures = load_fixtures(&args.dir.dir)?;
    let hotspot = fixtures
        .catalog
        .get(&args.id)
        .with_context(|| format!("unknown hotspot id '{}'", args.id))?;
    let view = hue_overlay::DetailView::new(hotspot, fixtures.details.as_ref());
    print!("{}", view.to_text());
    Ok(())
}
