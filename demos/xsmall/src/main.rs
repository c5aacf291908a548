//! xsmall — smallest runnable example for the pedestrian-flow simulator.
//!
//! One aisle-shaped venue, a single checkout lane, six shoppers. Publishes
//! TrackRecords to a JSONL file instead of MQTT so the example runs with no
//! broker running.

use std::time::{Duration, Instant};

use anyhow::Result;

use pf_agent::AgentStore;
use pf_core::{EngineConfig, LaneId, SimClock, Tick, Vec2, ZoneId};
use pf_publish::{JsonFileSink, PublishObserver, Publisher};
use pf_scene::{AStarPathfinder, Entrance, Lane, Obstacle, Scene, Zone, ZoneRole};
use pf_sim::{Diagnostics, LaneSummary, SimBuilder, SimObserver};

// ── Constants ───────────────────────────────────────────────────────────────

const TARGET_PEOPLE: u32 = 6;
const SEED: u64 = 42;
const RUN_TICKS: u64 = 600; // 60 s of simulated time at 10 Hz

// ── Scene ───────────────────────────────────────────────────────────────────

fn build_scene() -> Scene {
    let width = 20.0;
    let depth = 12.0;

    let entrances = vec![Entrance {
        points: vec![Vec2::new(0.0, 5.0), Vec2::new(0.0, 7.0), Vec2::new(1.0, 7.0), Vec2::new(1.0, 5.0)],
    }];

    let obstacles = vec![Obstacle {
        center: Vec2::new(10.0, 2.0),
        half_extents: Vec2::new(6.0, 0.5),
        rotation_rad: 0.0,
    }];

    let queue_zone = Zone {
        role: ZoneRole::Queue,
        lane_id: Some(LaneId(0)),
        points: vec![
            Vec2::new(16.0, 4.0),
            Vec2::new(16.0, 8.0),
            Vec2::new(18.0, 8.0),
            Vec2::new(18.0, 4.0),
        ],
    };
    let service_zone = Zone {
        role: ZoneRole::Service,
        lane_id: Some(LaneId(0)),
        points: vec![
            Vec2::new(18.0, 4.0),
            Vec2::new(18.0, 8.0),
            Vec2::new(19.0, 8.0),
            Vec2::new(19.0, 4.0),
        ],
    };
    let shopping_zone = Zone {
        role: ZoneRole::Shopping,
        lane_id: None,
        points: vec![
            Vec2::new(2.0, 3.0),
            Vec2::new(2.0, 10.0),
            Vec2::new(15.0, 10.0),
            Vec2::new(15.0, 3.0),
        ],
    };

    let lanes = vec![Lane {
        id: LaneId(0),
        queue_zone: ZoneId(0),
        service_zone: ZoneId(1),
        anchor_point: Vec2::new(18.5, 6.0),
        flow_direction: Vec2::new(-1.0, 0.0),
    }];

    Scene::new(width, depth, obstacles, entrances, vec![queue_zone, service_zone, shopping_zone], lanes)
        .expect("xsmall scene is internally consistent")
}

// ── Observer wrapper to tally rows ───────────────────────────────────────────

struct CountingObserver {
    inner: PublishObserver,
    published_rows: usize,
    tick_summaries: usize,
}

impl CountingObserver {
    fn new(inner: PublishObserver) -> Self {
        Self { inner, published_rows: 0, tick_summaries: 0 }
    }
}

impl SimObserver for CountingObserver {
    fn on_publish(&mut self, tick: Tick, clock: &SimClock, config: &EngineConfig, agents: &AgentStore, scene: &Scene) {
        self.published_rows += agents.live_ids().count();
        self.inner.on_publish(tick, clock, config, agents, scene);
    }

    fn on_lane_states(&mut self, tick: Tick, lanes: &[LaneSummary]) {
        self.inner.on_lane_states(tick, lanes);
    }

    fn on_tick_end(&mut self, tick: Tick, diagnostics: &Diagnostics) {
        self.tick_summaries += 1;
        self.inner.on_tick_end(tick, diagnostics);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.inner.on_sim_end(final_tick);
    }
}

fn main() -> Result<()> {
    println!("=== xsmall — pedestrian-flow simulator ===");
    println!("Target shoppers: {TARGET_PEOPLE}  |  Ticks: {RUN_TICKS}  |  Seed: {SEED}");
    println!();

    let scene = build_scene();
    println!("Scene: {} x {} m, {} zones, {} lane(s)", scene.width_m, scene.depth_m, scene.zones.len(), scene.lanes.len());

    let config = EngineConfig {
        target_people_count: TARGET_PEOPLE,
        seed: Some(SEED),
        ..EngineConfig::default()
    };

    let mut sim = SimBuilder::new(config.clone(), scene, AStarPathfinder).build()?;

    std::fs::create_dir_all("output/xsmall")?;
    let sink = JsonFileSink::create(std::path::Path::new("output/xsmall/tracks.jsonl"))?;
    let publisher = Publisher::new(Box::new(sink), &config.topic_prefix, &config.device_id, config.mqtt_queue_capacity);
    let mut obs = CountingObserver::new(PublishObserver::new(publisher));

    let t0 = Instant::now();
    sim.run_ticks(RUN_TICKS, &mut obs)?;
    let elapsed = t0.elapsed();

    obs.inner.into_publisher().stop(Duration::from_millis(config.stop_flush_timeout_ms));

    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  tracks.jsonl   : {} rows published", obs.published_rows);
    println!("  tick summaries : {}", obs.tick_summaries);
    println!();
    println!("Final tick: {}", sim.clock.current_tick);
    println!("Live agents: {}", sim.world.store.live_ids().count());

    Ok(())
}
