//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

/// Run the pedestrian-flow simulator against a venue Scene.
#[derive(Parser, Debug)]
#[command(name = "pf-cli", version, about = "Edge-resident pedestrian-flow simulator")]
pub struct Args {
    /// Venue Scene, as JSON (bounds, obstacles, entrances, zones, lanes).
    #[arg(long)]
    pub scene: PathBuf,

    /// EngineConfig, as TOML. Omitted fields fall back to the documented defaults.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Where TrackRecords go. `mqtt` uses `mqtt_broker` from the config;
    /// `stdout` and `jsonl` are for local runs without a broker.
    #[arg(long, value_enum, default_value_t = SinkKind::Mqtt)]
    pub sink: SinkKind,

    /// Output path for `--sink jsonl`.
    #[arg(long)]
    pub jsonl_path: Option<PathBuf>,

    /// Override `EngineConfig::seed` for a reproducible run.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Run exactly this many ticks, then stop. Omit to run until a Stop
    /// control message or Ctrl-C.
    #[arg(long)]
    pub ticks: Option<u64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum SinkKind {
    Mqtt,
    Stdout,
    Jsonl,
}
