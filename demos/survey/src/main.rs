//! survey — drift a fleet of wind-driven probes over Mars and report how
//! much of the surface they have crossed.
//!
//! # Usage
//!
//! ```bash
//! # One simulated year, ten probes, default Mars winds
//! survey
//!
//! # Custom run with CSV output every simulated day
//! survey --probes 50 --days 90 --seed 7 --output out/
//!
//! # Legacy wrap-tick behaviour, for comparing against older figures
//! survey --policy teleported
//!
//! # Full scenario from JSON (flags override file values)
//! survey --config scenario.json --days 30
//! ```
//!
//! A scenario file holds any subset of `surface`, `wind`, `sim`, `probes`
//! and `start_lon`; missing sections take the Mars defaults.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use log::info;
use serde::Deserialize;

use ds_core::{SimConfig, Surface, Tick};
use ds_output::{CsvWriter, SimOutputObserver};
use ds_probe::{ProbeStore, SegmentPolicy, WindConfig};
use ds_sim::{CoverageReport, NoopObserver, SimBuilder, SimObserver, TickOutcome};

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "survey")]
#[command(about = "Wind-driven probe coverage simulator")]
#[command(version)]
struct Cli {
    /// JSON scenario file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of probes to deploy.
    #[arg(short, long)]
    probes: Option<usize>,

    /// Simulated days to run.
    #[arg(short, long)]
    days: Option<u64>,

    /// Random seed for reproducibility.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Deployment longitude.
    #[arg(long, allow_hyphen_values = true)]
    start_lon: Option<f64>,

    /// Wrap-tick rasterization: "unwrapped" or "teleported".
    #[arg(long)]
    policy: Option<SegmentPolicy>,

    /// Directory for probe_snapshots.csv and coverage.csv.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

// ── Scenario ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(default)]
struct SurveyConfig {
    surface:   Surface,
    wind:      WindConfig,
    sim:       SimConfig,
    probes:    usize,
    start_lon: f64,
}

impl Default for SurveyConfig {
    fn default() -> Self {
        Self {
            surface:   Surface::mars(),
            wind:      WindConfig::mars(),
            sim:       SimConfig::default(),
            probes:    10,
            start_lon: 0.0,
        }
    }
}

impl SurveyConfig {
    fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
        serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("parsing {}", path.display()))
    }

    fn apply(&mut self, cli: &Cli) -> Result<()> {
        if let Some(probes) = cli.probes {
            self.probes = probes;
        }
        if let Some(days) = cli.days {
            self.sim.total_ticks = self
                .sim
                .make_clock()
                .ticks_for_days(days)
                .ok_or_else(|| anyhow!("--days {days} is too large"))?;
        }
        if let Some(seed) = cli.seed {
            self.sim.seed = seed;
        }
        if let Some(lon) = cli.start_lon {
            self.start_lon = lon;
        }
        if let Some(policy) = cli.policy {
            self.wind.segment_policy = policy;
        }
        Ok(())
    }
}

// ── Progress observer ─────────────────────────────────────────────────────────

#[derive(Default)]
struct Counts {
    crossings: u64,
    peak_new:  usize,
    peak_tick: Tick,
}

/// Tallies boundary crossings and the busiest tick, then forwards to `inner`.
struct Tally<O> {
    inner:  O,
    counts: Counts,
}

impl<O: SimObserver> Tally<O> {
    fn new(inner: O) -> Self {
        Self { inner, counts: Counts::default() }
    }
}

impl<O: SimObserver> SimObserver for Tally<O> {
    fn on_tick_start(&mut self, tick: Tick) {
        self.inner.on_tick_start(tick);
    }

    fn on_tick_end(&mut self, tick: Tick, outcome: &TickOutcome) {
        self.counts.crossings += outcome.crossings as u64;
        if outcome.new_cells > self.counts.peak_new {
            self.counts.peak_new = outcome.new_cells;
            self.counts.peak_tick = tick;
        }
        self.inner.on_tick_end(tick, outcome);
    }

    fn on_snapshot(&mut self, tick: Tick, probes: &ProbeStore, report: &CoverageReport) {
        self.inner.on_snapshot(tick, probes, report);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.inner.on_sim_end(final_tick);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut scenario = match &cli.config {
        Some(path) => SurveyConfig::load(path)?,
        None => SurveyConfig::default(),
    };
    scenario.apply(&cli)?;

    println!("=== survey — wind-driven probe coverage ===");
    println!(
        "Probes: {}  |  Ticks: {}  |  Seed: {}  |  Policy: {:?}",
        scenario.probes, scenario.sim.total_ticks, scenario.sim.seed, scenario.wind.segment_policy
    );
    println!();

    let mut sim = SimBuilder::new(scenario.sim.clone())
        .surface(scenario.surface.clone())
        .wind(scenario.wind.clone())
        .build()?;
    sim.deploy(scenario.probes, scenario.start_lon)?;

    let started = Instant::now();
    let counts = match &cli.output {
        Some(dir) => {
            fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
            info!("writing output to {}", dir.display());
            let mut tally = Tally::new(SimOutputObserver::new(CsvWriter::new(dir)?));
            sim.run(&mut tally)?;
            if let Some(e) = tally.inner.take_error() {
                return Err(e.into());
            }
            tally.counts
        }
        None => {
            let mut tally = Tally::new(NoopObserver);
            sim.run(&mut tally)?;
            tally.counts
        }
    };
    let elapsed = started.elapsed();

    let report = sim.report();
    println!();
    println!("=== Summary ===");
    println!("Simulated:          {}", sim.clock());
    println!("Explored cells:     {}", report.explored_cells);
    println!("Explored area:      {:.2} km²", report.explored_area());
    println!("Coverage:           {}%", report.percent_text());
    println!("Boundary crossings: {}", counts.crossings);
    println!("Busiest tick:       {} (+{} cells)", counts.peak_tick, counts.peak_new);
    println!("Wall time:          {:.3} s", elapsed.as_secs_f64());
    Ok(())
}
