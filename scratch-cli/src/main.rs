mod reports;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;

use scratch_game::{GameEngine, GameResult, JsonFileLoader, SimulationSummary, simulate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human readable summary
    Console,
    /// Summary as a JSON document
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "scratch", version)]
#[command(about = "Play a scratch game round, or simulate many to estimate RTP")]
struct Args {
    /// Path to the game configuration document
    #[arg(long)]
    config: PathBuf,

    /// Amount staked per round
    #[arg(long)]
    betting_amount: f64,

    /// Seed for the random source (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Number of rounds; more than one runs a simulation and prints its summary
    #[arg(long, default_value_t = 1)]
    rounds: u64,

    /// Simulation report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Console)]
    report: ReportFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Optional path to write the output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    run(&args)
}

fn run(args: &Args) -> Result<()> {
    let loader = JsonFileLoader::new(&args.config);
    let engine = GameEngine::from_loader(&loader)
        .with_context(|| format!("invalid game configuration {}", args.config.display()))?;

    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("using seed {seed}");

    let output = if args.rounds > 1 {
        let summary = simulate(&engine, args.betting_amount, args.rounds, seed)
            .context("simulation failed")?;
        Output::Summary(summary)
    } else {
        let result = engine
            .play_seeded(args.betting_amount, seed)
            .context("play failed")?;
        Output::Result(result)
    };

    let mut output_target = OutputTarget::new(args.output.clone())?;
    match (&output, args.report) {
        (Output::Result(result), _) => {
            reports::write_result(&mut output_target, result, args.pretty)?;
        }
        (Output::Summary(summary), ReportFormat::Json) => {
            reports::generate_json_report(&mut output_target, summary, args.pretty)?;
        }
        (Output::Summary(summary), ReportFormat::Console) => {
            reports::generate_console_report(&mut output_target, summary)?;
        }
    }
    output_target.flush_inner()?;
    Ok(())
}

/// What a run produced, computed before any output is opened.
enum Output {
    Result(GameResult),
    Summary(SimulationSummary),
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}
