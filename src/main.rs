use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io::{self, BufWriter, Write};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use fill::clock::{Clock, FixedClock, SystemClock};
use fill::generate::{GeneratorConfig, Mode};
use fill::output::OutputConfig;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    /// happiness in [-2, 2], plus a derived sleep duration 80% of the time
    Mood,
    /// copies of four fixed sample entries
    Pool,
}

impl From<ModeArg> for Mode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Mood => Mode::Mood,
            ModeArg::Pool => Mode::Pool,
        }
    }
}

#[derive(Parser)]
#[command(
    name = "fill",
    about = "Generate synthetic time-stamped log fixtures as YAML",
    version
)]
struct Cli {
    /// Record generation mode
    #[arg(short = 'm', long, value_enum, default_value_t = ModeArg::Mood)]
    mode: ModeArg,

    /// Seed the random generator for reproducible output
    #[arg(short = 's', long)]
    seed: Option<u64>,

    /// Pin "now" to a fixed local time, formatted YYYY-MM-DD HH:MM:SS
    #[arg(long)]
    now: Option<String>,

    /// Keep the serializer's single quotes instead of stripping them
    #[arg(long = "keep-quotes")]
    keep_quotes: bool,

    /// Escape non-ASCII characters to \uXXXX sequences
    #[arg(short = 'a', long = "ascii-output")]
    ascii_output: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let generator = GeneratorConfig {
        mode: cli.mode.into(),
        count: None,
    };
    let output = OutputConfig {
        strip_quotes: !cli.keep_quotes,
        ascii_output: cli.ascii_output,
    };

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let clock: Box<dyn Clock> = match &cli.now {
        Some(now) => Box::new(
            FixedClock::parse(now).with_context(|| format!("invalid --now value: {now}"))?,
        ),
        None => Box::new(SystemClock),
    };
    debug!(seed = ?cli.seed, now = ?cli.now, "starting generation");

    let stdout = io::stdout().lock();
    let mut out = BufWriter::with_capacity(128 * 1024, stdout);

    fill::run(&mut out, &generator, &output, &mut rng, clock.as_ref())
        .context("failed to generate fixtures")?;
    out.flush()?;

    Ok(())
}
