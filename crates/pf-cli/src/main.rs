//! `pf-cli` — the process entry point. Loads a Scene and an EngineConfig,
//! wires tracing, builds the Sim and its output Publisher, then runs the
//! tick loop to completion or until Ctrl-C.

mod cli;
mod config_loader;
mod logging;
mod scene_loader;

#[cfg(test)]
mod tests;

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use cli::{Args, SinkKind};
use pf_publish::{JsonFileSink, MqttSink, PublishObserver, Publisher, Sink, StdoutSink};
use pf_scene::AStarPathfinder;
use pf_sim::{ControlMessage, SimBuilder};

fn main() -> Result<()> {
    let args = Args::parse();

    let (mut config, warnings) = config_loader::load(args.config.as_deref())?;
    let _log_guard = logging::init(&config.log_level, config.log_file.as_deref())?;
    for warning in &warnings {
        warn!(%warning, "config value clamped");
    }

    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }

    let scene = scene_loader::load(&args.scene)?;
    info!(width_m = scene.width_m, depth_m = scene.depth_m, lanes = scene.lanes.len(), "scene loaded");

    let stop_flush_timeout = Duration::from_millis(config.stop_flush_timeout_ms);
    let sink = build_sink(&args, &config)?;
    let publisher = Publisher::new(sink, &config.topic_prefix, &config.device_id, config.mqtt_queue_capacity);
    let mut observer = PublishObserver::new(publisher);

    let mut sim = SimBuilder::new(config, scene, AStarPathfinder)
        .build()
        .context("building simulation from scene")?;

    let control_tx = sim.control_sender();
    ctrlc::set_handler(move || {
        info!("ctrl-c received; stopping after the in-flight tick");
        let _ = control_tx.send(ControlMessage::Stop);
    })
    .context("installing Ctrl-C handler")?;

    match args.ticks {
        Some(n) => sim.run_ticks(n, &mut observer)?,
        None => sim.run(&mut observer)?,
    }

    info!(tick = sim.clock.current_tick.0, "simulation finished");
    observer.into_publisher().stop(stop_flush_timeout);
    Ok(())
}

fn build_sink(args: &Args, config: &pf_core::EngineConfig) -> Result<Box<dyn Sink>> {
    match args.sink {
        SinkKind::Mqtt => {
            let sink = MqttSink::connect(&config.mqtt_broker, &config.device_id)
                .with_context(|| format!("connecting to MQTT broker {}", config.mqtt_broker))?;
            Ok(Box::new(sink))
        }
        SinkKind::Stdout => Ok(Box::new(StdoutSink)),
        SinkKind::Jsonl => {
            let path = args.jsonl_path.as_deref().context("--jsonl-path is required with --sink jsonl")?;
            let sink = JsonFileSink::create(path)
                .with_context(|| format!("creating JSONL output file {}", path.display()))?;
            Ok(Box::new(sink))
        }
    }
}
