use std::{
    fs::File,
    io::{BufWriter, Write as _},
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "permtrace", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate the decision tree and step trace as JSON.
    Trace(TraceArgs),
    /// Replay the trace step by step with explanations.
    Play(PlayArgs),
    /// Print the view snapshot at one position as JSON.
    Snapshot(SnapshotArgs),
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct InputArgs {
    /// Comma-separated input values, e.g. `1,2,3` or `-1,4`.
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    nums: Option<Vec<i32>>,

    /// Session config JSON (`{"nums": [...], "playback": {...}}`).
    #[arg(long = "in")]
    in_path: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct TraceArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Output JSON path (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct PlayArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Milliseconds per step; overrides the config file.
    #[arg(long)]
    speed: Option<u64>,

    /// Sleep between steps instead of replaying instantly.
    #[arg(long, default_value_t = false)]
    realtime: bool,
}

#[derive(Parser, Debug)]
struct SnapshotArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Step index, `-1` for the state before the first step.
    #[arg(long, allow_negative_numbers = true)]
    at: i64,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Trace(args) => cmd_trace(args),
        Command::Play(args) => cmd_play(args),
        Command::Snapshot(args) => cmd_snapshot(args),
    }
}

fn read_config(input: InputArgs) -> anyhow::Result<permtrace::SessionConfig> {
    match (input.nums, input.in_path) {
        (Some(nums), _) => Ok(permtrace::SessionConfig {
            nums: permtrace::InputSequence::new(nums)?,
            playback: permtrace::PlaybackOpts::default(),
        }),
        (None, Some(path)) => permtrace::SessionConfig::from_path(&path)
            .with_context(|| format!("load config '{}'", path.display())),
        (None, None) => anyhow::bail!("either --nums or --in is required"),
    }
}

#[derive(serde::Serialize)]
struct TraceReport<'a> {
    input: &'a permtrace::InputSequence,
    fingerprint: String,
    counts: permtrace::StepCounts,
    total_steps: usize,
    node_count: usize,
    tree: &'a permtrace::DecisionTree,
    steps: &'a permtrace::StepSequence,
}

fn cmd_trace(args: TraceArgs) -> anyhow::Result<()> {
    let cfg = read_config(args.input)?;
    let trace = permtrace::Trace::generate(&cfg.nums);
    let report = TraceReport {
        input: &trace.input,
        fingerprint: permtrace::fingerprint_steps(&trace.steps).to_hex(),
        counts: trace.steps.counts(),
        total_steps: trace.steps.len(),
        node_count: trace.tree.node_count(),
        tree: &trace.tree,
        steps: &trace.steps,
    };

    match &args.out {
        Some(path) => {
            write_json(path, &report)?;
            eprintln!("wrote {}", path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut w = stdout.lock();
            serde_json::to_writer_pretty(&mut w, &report).context("write trace JSON")?;
            writeln!(w)?;
        }
    }
    Ok(())
}

fn write_json(path: &Path, value: &impl serde::Serialize) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let f = File::create(path).with_context(|| format!("create '{}'", path.display()))?;
    let mut w = BufWriter::new(f);
    serde_json::to_writer_pretty(&mut w, value)
        .with_context(|| format!("write JSON '{}'", path.display()))?;
    writeln!(w)?;
    w.flush()?;
    Ok(())
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    let mut cfg = read_config(args.input)?;
    if let Some(speed) = args.speed {
        cfg.playback.speed_ms = speed;
    }

    let mut session = permtrace::Session::from_config(cfg);
    let steps = session.trace().steps.clone();
    let nums = session.input().as_slice().to_vec();
    session.controller_mut().set_observer(move |step, i| {
        let previous = i.checked_sub(1).and_then(|p| steps.get(p));
        let ctx = permtrace::StepContext::new(step, previous, &nums);
        let ex = permtrace::Explanation::for_context(&ctx);
        println!(
            "{i:>4}  {:<9}  {:<20}  {}: {}",
            step.kind.as_str(),
            permtrace::format_list(&step.current_path),
            ex.title,
            ex.main
        );
    });

    session.controller_mut().play();
    while session.controller().state() == permtrace::PlaybackState::Playing {
        let wait = session
            .controller()
            .next_tick_in()
            .unwrap_or(Duration::ZERO);
        if args.realtime {
            std::thread::sleep(wait);
        }
        session.controller_mut().advance(wait);
    }

    let snap = session.snapshot();
    eprintln!(
        "found {} of {} permutations in {} steps (fingerprint {})",
        snap.progress.found_permutations,
        snap.progress.expected_permutations,
        snap.total_steps,
        session.fingerprint().to_hex()
    );
    Ok(())
}

fn cmd_snapshot(args: SnapshotArgs) -> anyhow::Result<()> {
    let cfg = read_config(args.input)?;
    let mut session = permtrace::Session::from_config(cfg);
    let len = session.controller().len() as i64;
    anyhow::ensure!(
        (-1..len).contains(&args.at),
        "--at must be within -1..{len} (got {})",
        args.at
    );
    session.controller_mut().go_to_step(args.at);

    let snap = session.snapshot();
    let stdout = std::io::stdout();
    let mut w = stdout.lock();
    serde_json::to_writer_pretty(&mut w, &snap).context("write snapshot JSON")?;
    writeln!(w)?;
    Ok(())
}
