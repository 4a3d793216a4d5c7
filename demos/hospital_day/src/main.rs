//! hospital_day — one simulated day of hospital contacts.
//!
//! `run` builds a hospital (cells, patients, staffed personnel pools), runs
//! it for `total_ticks` one-second ticks and writes the contact log.
//! `trace` reads a saved `contact_list.json` back and lists everyone the
//! given agents met.
//!
//! ```text
//! hospital_day run --cells 20 --seed 7 --out output
//! hospital_day trace --contacts output/contact_list.json --infected <uuid> <uuid>
//! ```

use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use wt_core::{AgentUid, ContactPairing, SimConfig, SimRng, Tick};
use wt_output::{ContactOutputObserver, CsvWriter, JsonWriter, OutputWriter, trace_file};
use wt_schedule::load_census_csv;
use wt_sim::{ContactLog, ContactRecord, HospitalBuilder, SimObserver};

// ── Constants ─────────────────────────────────────────────────────────────────

/// Progress line every simulated hour.
const PROGRESS_INTERVAL_TICKS: u64 = 3_600;

// ── Command line ──────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "hospital_day")]
#[command(about = "Simulate a hospital day and trace contacts between its residents")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug output (overridden by RUST_LOG)
    #[arg(long, short)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a hospital, run it and write the contact log.
    Run {
        /// JSON file with SimConfig fields; flags below override it
        #[arg(long)]
        config: Option<PathBuf>,
        /// Number of cells
        #[arg(long)]
        cells: Option<usize>,
        /// Ticks to simulate (one tick = one second)
        #[arg(long)]
        ticks: Option<u64>,
        /// Random seed
        #[arg(long)]
        seed: Option<u64>,
        /// Contact pairing: directed, unordered
        #[arg(long)]
        pairing: Option<ContactPairing>,
        /// CSV of `cell,patients` rows; otherwise patient counts are drawn
        #[arg(long)]
        census: Option<PathBuf>,
        /// Output format
        #[arg(long, value_enum, default_value = "json")]
        format: Format,
        /// Output directory
        #[arg(long, default_value = "output")]
        out: PathBuf,
    },

    /// List everyone the given agents met.
    Trace {
        /// Saved contact list (JSON)
        #[arg(long)]
        contacts: PathBuf,
        /// Agent ids to trace
        #[arg(long, num_args = 1.., required = true)]
        infected: Vec<AgentUid>,
    },
}

#[derive(Copy, Clone, ValueEnum)]
enum Format {
    Json,
    Csv,
    Sqlite,
    Parquet,
}

// ── Observer wrapper for progress ─────────────────────────────────────────────

struct ProgressObserver<W: OutputWriter> {
    inner:          ContactOutputObserver<W>,
    logging_events: usize,
    busiest:        Option<(DateTime<Utc>, usize)>,
}

impl<W: OutputWriter> ProgressObserver<W> {
    fn new(inner: ContactOutputObserver<W>) -> Self {
        Self { inner, logging_events: 0, busiest: None }
    }
}

impl<W: OutputWriter> SimObserver for ProgressObserver<W> {
    fn on_tick_end(&mut self, tick: Tick, _transitions: usize) {
        if tick.0 > 0 && tick.0.is_multiple_of(PROGRESS_INTERVAL_TICKS) {
            info!(hour = tick.0 / PROGRESS_INTERVAL_TICKS, "progress");
        }
    }

    fn on_contacts(&mut self, _tick: Tick, timestamp: DateTime<Utc>, records: &[ContactRecord]) {
        self.logging_events += 1;
        if self.busiest.is_none_or(|(_, n)| records.len() > n) {
            self.busiest = Some((timestamp, records.len()));
        }
    }

    fn on_sim_end(&mut self, final_tick: Tick, log: &ContactLog) {
        self.inner.on_sim_end(final_tick, log);
    }
}

// ── Subcommands ───────────────────────────────────────────────────────────────

fn load_config(path: Option<&Path>) -> Result<SimConfig> {
    let Some(path) = path else {
        return Ok(SimConfig::default());
    };
    let file = File::open(path).with_context(|| format!("opening config {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing config {}", path.display()))
}

fn open_writer(format: Format, dir: &Path) -> Result<Box<dyn OutputWriter>> {
    let writer: Box<dyn OutputWriter> = match format {
        Format::Json => Box::new(JsonWriter::new(dir)?),
        Format::Csv => Box::new(CsvWriter::new(dir)?),
        #[cfg(feature = "sqlite")]
        Format::Sqlite => Box::new(wt_output::SqliteWriter::new(dir)?),
        #[cfg(feature = "parquet")]
        Format::Parquet => Box::new(wt_output::ParquetWriter::new(dir)?),
        #[allow(unreachable_patterns)]
        _ => bail!("this build has no writer for the requested format; enable the `sqlite` or `parquet` feature"),
    };
    Ok(writer)
}

#[allow(clippy::too_many_arguments)]
fn run(
    config_path: Option<PathBuf>,
    cells:       Option<usize>,
    ticks:       Option<u64>,
    seed:        Option<u64>,
    pairing:     Option<ContactPairing>,
    census:      Option<PathBuf>,
    format:      Format,
    out:         PathBuf,
) -> Result<()> {
    let mut config = load_config(config_path.as_deref())?;
    if let Some(n) = cells {
        config.cell_count = n;
    }
    if let Some(n) = ticks {
        config.total_ticks = n;
    }
    if let Some(s) = seed {
        config.seed = s;
    }
    if let Some(p) = pairing {
        config.pairing = p;
    }

    let mut builder = HospitalBuilder::new(config.clone());
    if let Some(path) = census {
        let counts = load_census_csv(&path, config.cell_count)
            .with_context(|| format!("loading census {}", path.display()))?;
        builder = builder.patient_counts(counts);
    }

    let t0 = Instant::now();
    let mut rng = SimRng::new(config.seed);
    let mut hospital = builder.build(&mut rng)?;
    info!(
        agents = hospital.agents.count,
        personnel = hospital.agents.personnel_count(),
        elapsed_ms = t0.elapsed().as_millis() as u64,
        "schedules built"
    );

    fs::create_dir_all(&out).with_context(|| format!("creating {}", out.display()))?;
    let mut observer = ProgressObserver::new(ContactOutputObserver::new(open_writer(format, &out)?));

    let t1 = Instant::now();
    hospital.run(&mut observer);
    if let Some(e) = observer.inner.take_error() {
        return Err(e).context("writing contact log");
    }

    println!("Simulated {} ticks over {} cells in {:.2?}", hospital.tick.0, config.cell_count, t1.elapsed());
    println!("  agents:          {}", hospital.agents.count);
    println!("  logging events:  {}", observer.logging_events);
    println!("  contact records: {} ({})", hospital.log.len(), config.pairing);
    if let Some((at, n)) = observer.busiest {
        println!("  busiest sample:  {n} records at {at}");
    }
    println!("  output:          {}", out.display());
    Ok(())
}

fn trace(contacts: &Path, infected: &[AgentUid]) -> Result<()> {
    let met = trace_file(contacts, infected)
        .with_context(|| format!("reading {}", contacts.display()))?;
    for (uid, partners) in &met {
        println!("{uid} met {} agent(s)", partners.len());
        for p in partners {
            println!("  {p}");
        }
    }
    Ok(())
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Run { config, cells, ticks, seed, pairing, census, format, out } => {
            run(config, cells, ticks, seed, pairing, census, format, out)
        }
        Commands::Trace { contacts, infected } => trace(&contacts, &infected),
    }
}
