//! Fluent builder for constructing a [`Sim`].

use std::collections::VecDeque;
use std::time::{SystemTime, UNIX_EPOCH};

use crossbeam_channel::unbounded;

use pf_agent::builder::AgentWorld;
use pf_behavior::{LaneController, LaneControllerConfig, LaneState};
use pf_core::{EngineConfig, EngineRng, SimClock, Tick};
use pf_scene::navgrid::build_navgrid;
use pf_scene::{Pathfinder, Scene};
use pf_steering::{SteeringEngine, SteeringParams, SteeringStore};

use crate::error::PfSimResult;
use crate::sim::Sim;

/// Agents per startup burst cluster, for the staggered-arrival bootstrap.
const STARTUP_CLUSTER_SIZE: usize = 5;
const STARTUP_WITHIN_CLUSTER_SECS: f32 = 3.0;
const STARTUP_BETWEEN_CLUSTER_SECS: f32 = 30.0;
/// Upper bound on how many agents the startup burst seeds, regardless of
/// `target_people_count`.
const STARTUP_BURST_CAP: u32 = 50;

pub struct SimBuilder<P: Pathfinder> {
    config: EngineConfig,
    scene: Scene,
    pathfinder: P,
    cashier_count: Option<usize>,
}

impl<P: Pathfinder> SimBuilder<P> {
    pub fn new(config: EngineConfig, scene: Scene, pathfinder: P) -> Self {
        Self {
            config,
            scene,
            pathfinder,
            cashier_count: None,
        }
    }

    /// Override the number of cashiers spawned at startup. Defaults to one
    /// per lane declared in the Scene.
    pub fn cashier_count(mut self, n: usize) -> Self {
        self.cashier_count = Some(n);
        self
    }

    pub fn build(self) -> PfSimResult<Sim<P>> {
        let mut config = self.config;
        let _warnings = config.validate();
        let scene = self.scene;
        let navgrid = build_navgrid(&scene);

        let seed = config.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        });
        let mut engine_rng = EngineRng::new(seed);

        let mut world = AgentWorld::new();
        let mut steering_store = SteeringStore::new();

        let lane_count = scene.lanes.len();
        let lane_states = vec![LaneState::Closed; lane_count];
        let queues: Vec<VecDeque<pf_core::AgentId>> = vec![VecDeque::new(); lane_count];
        let pressure_windows: Vec<VecDeque<u32>> = vec![VecDeque::new(); lane_count];

        let tick_duration_secs = config.tick_duration_secs();
        let clock = SimClock::from_frequency(0, config.frequency_hz);

        // ── Startup bulk-spawn: staggered clusters of shoppers ───────────
        let startup_target = config.target_people_count.min(STARTUP_BURST_CAP);
        let mut scheduled_spawns: VecDeque<Tick> = VecDeque::new();
        {
            let within_cluster_ticks =
                (STARTUP_WITHIN_CLUSTER_SECS / tick_duration_secs).round().max(1.0) as u64;
            let between_cluster_ticks =
                (STARTUP_BETWEEN_CLUSTER_SECS / tick_duration_secs).round().max(1.0) as u64;
            let mut tick_cursor = 0u64;
            let mut in_cluster = 0usize;
            for _ in 0..startup_target {
                scheduled_spawns.push_back(Tick(tick_cursor));
                in_cluster += 1;
                if in_cluster >= STARTUP_CLUSTER_SIZE {
                    in_cluster = 0;
                    tick_cursor += between_cluster_ticks;
                } else {
                    tick_cursor += within_cluster_ticks;
                }
            }
        }

        // ── Cashier roster: one per lane by default, inactive until staffed ──
        let cashier_count = self.cashier_count.unwrap_or(lane_count);
        if config.enable_cashiers {
            for i in 0..cashier_count {
                let anchor = if lane_count > 0 {
                    scene.lanes[i % lane_count].anchor_point
                } else {
                    scene
                        .entrances
                        .first()
                        .map(|e| e.centroid())
                        .unwrap_or(pf_core::Vec2::ZERO)
                };
                let shift_secs = engine_rng.gen_range(
                    (config.cashier_shift_min * 60.0 * 0.5)..(config.cashier_shift_min * 60.0 * 1.5),
                );
                let shift_ticks = (shift_secs / tick_duration_secs).ceil().max(1.0) as u64;
                world.spawn_cashier(anchor, Tick(0).offset(shift_ticks), Tick(0), &mut engine_rng);
            }
        }
        steering_store.ensure_len(world.store.len().max(cashier_count));

        let lane_controller = LaneController::new(LaneControllerConfig {
            open_confirm_window_sec: config.lane_open_confirm_sec,
            close_grace_window_sec: config.lane_close_grace_sec,
            queue_pressure_threshold: config.queue_pressure_threshold,
        });

        let (control_tx, control_rx) = unbounded();

        let path_failed = vec![false; world.store.len()];
        let cashier_assigned_lane = vec![None; world.store.len()];

        Ok(Sim {
            config,
            clock,
            scene,
            navgrid,
            world,
            engine_rng,
            pathfinder: self.pathfinder,
            steering: SteeringEngine::new(SteeringParams::default()),
            steering_store,
            lane_controller,
            lane_states,
            queues,
            pressure_windows,
            path_failed,
            cashier_assigned_lane,
            scheduled_spawns,
            control_tx,
            control_rx,
            stopped: false,
        })
    }
}
