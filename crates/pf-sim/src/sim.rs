//! The `Sim` struct and its fixed-step tick loop.

use std::collections::{BTreeMap, HashMap, VecDeque};

use crossbeam_channel::{Receiver, Sender};

use pf_agent::builder::AgentWorld;
use pf_agent::state::{AgentKind, CashierState, ShopperState};
use pf_behavior::{Intent, LaneController, LaneState, SimContext};
use pf_core::{AgentId, EngineConfig, EngineRng, LaneId, SimClock, Tick, Vec2};
use pf_scene::{NavGrid, Pathfinder, Scene};
use pf_steering::{SteeringEngine, SteeringStore};

use crate::control::{ControlMessage, Status};
use crate::error::PfSimResult;
use crate::observer::{Diagnostics, LaneSummary, SimObserver};

/// Consecutive blocked-movement ticks before an agent is considered stuck
/// and a replan is forced.
const STUCK_BLOCKED_FRAMES_THRESHOLD: u32 = 60;
/// Distance within which two agents count as overlapping for diagnostics.
const OVERLAP_RADIUS_M: f32 = 0.3;
/// Distance within which an agent is considered to have reached a waypoint.
const WAYPOINT_EPS_M: f32 = 0.15;
/// Rolling window, in seconds, used to smooth a lane's queue-pressure signal.
const PRESSURE_WINDOW_SECS: f32 = 30.0;

/// The fixed-step tick loop orchestrator.
///
/// Every tick, in order: drain the control mailbox; maybe spawn new
/// agents; update every live agent's FSM and apply the resulting intents;
/// compute steering and resolve collision-filtered movement; tick the
/// checkout lane-state controller; publish one record per live agent through
/// the observer; prune terminal agents; record diagnostics.
///
/// Create via [`crate::SimBuilder`].
pub struct Sim<P: Pathfinder> {
    pub config: EngineConfig,
    pub clock: SimClock,
    pub scene: Scene,
    pub navgrid: NavGrid,
    pub world: AgentWorld,
    pub engine_rng: EngineRng,
    pub pathfinder: P,
    pub steering: SteeringEngine,
    pub steering_store: SteeringStore,
    pub lane_controller: LaneController,
    pub lane_states: Vec<LaneState>,

    pub(crate) queues: Vec<VecDeque<AgentId>>,
    pub(crate) pressure_windows: Vec<VecDeque<u32>>,
    pub(crate) path_failed: Vec<bool>,
    pub(crate) cashier_assigned_lane: Vec<Option<LaneId>>,
    pub(crate) scheduled_spawns: VecDeque<Tick>,

    pub(crate) control_tx: Sender<ControlMessage>,
    pub(crate) control_rx: Receiver<ControlMessage>,
    pub(crate) stopped: bool,
}

impl<P: Pathfinder> Sim<P> {
    // ── Public API ─────────────────────────────────────────────────────────

    /// A sender to this sim's control mailbox. Clone freely — a single
    /// `Sim` is always the lone reader.
    pub fn control_sender(&self) -> Sender<ControlMessage> {
        self.control_tx.clone()
    }

    /// Run until a `ControlMessage::Stop` is drained. Finishes the in-flight
    /// tick before stopping.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> PfSimResult<()> {
        loop {
            self.drain_control();
            if self.stopped {
                break;
            }
            self.tick_step(observer)?;
        }
        observer.on_sim_end(self.clock.current_tick);
        Ok(())
    }

    /// Run exactly `n` more ticks (or fewer, if a `Stop` arrives first).
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> PfSimResult<()> {
        for _ in 0..n {
            self.drain_control();
            if self.stopped {
                break;
            }
            self.tick_step(observer)?;
        }
        Ok(())
    }

    /// A point-in-time status snapshot, the same payload a
    /// `ControlMessage::GetStatus` reply carries.
    pub fn status(&self) -> Status {
        let mut shopper_state_counts: BTreeMap<&'static str, u32> = BTreeMap::new();
        let mut cashier_state_counts: BTreeMap<&'static str, u32> = BTreeMap::new();
        for agent in self.world.store.live_ids() {
            match &self.world.store.kind[agent.index()] {
                Some(AgentKind::Shopper { state, .. }) => {
                    *shopper_state_counts.entry(state.label()).or_insert(0) += 1;
                }
                Some(AgentKind::Cashier { state, .. }) => {
                    *cashier_state_counts.entry(state.label()).or_insert(0) += 1;
                }
                None => {}
            }
        }

        Status {
            tick: self.clock.current_tick,
            agent_count: self.world.store.len(),
            shopper_state_counts,
            cashier_state_counts,
            lanes: self.lane_summaries(),
            config_warnings: Vec::new(),
        }
    }

    // ── Control mailbox ───────────────────────────────────────────────────

    fn drain_control(&mut self) {
        while let Ok(msg) = self.control_rx.try_recv() {
            self.handle_control(msg);
        }
    }

    fn handle_control(&mut self, msg: ControlMessage) {
        match msg {
            ControlMessage::Stop => self.stopped = true,
            ControlMessage::SetLaneState { lane, open } => {
                let now = self.clock.current_tick;
                if let Some(state) = self.lane_states.get_mut(lane.index()) {
                    *state = if open {
                        self.lane_controller.request_open(*state, now)
                    } else {
                        self.lane_controller.request_close(*state, now)
                    };
                }
            }
            ControlMessage::SetConfig(update) => {
                if let Some(v) = update.arrival_rate_multiplier {
                    self.config.arrival_rate_multiplier = v;
                }
                if let Some(v) = update.checkout_prob_multiplier {
                    self.config.checkout_prob_multiplier = v;
                }
                if let Some(v) = update.browsing_speed_multiplier {
                    self.config.browsing_speed_multiplier = v;
                }
                let _ = self.config.validate();
            }
            ControlMessage::GetStatus(reply) => {
                let _ = reply.send(self.status());
            }
        }
    }

    // ── Tick loop ──────────────────────────────────────────────────────────

    fn tick_step<O: SimObserver>(&mut self, observer: &mut O) -> PfSimResult<()> {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);

        self.spawn_phase(now);

        let results = self.intent_phase(now);
        self.apply_phase(results);

        self.movement_phase();

        self.lane_controller_phase(now);

        self.publish_phase(now, observer);

        let pruned_count = self.prune_phase();

        let diagnostics = self.diagnostics(now, pruned_count);
        observer.on_tick_end(now, &diagnostics);

        self.clock.advance();
        Ok(())
    }

    // ── Phase 2: spawn ───────────────────────────────────────────────────

    fn spawn_phase(&mut self, now: Tick) {
        while matches!(self.scheduled_spawns.front(), Some(&t) if t <= now) {
            self.scheduled_spawns.pop_front();
            self.spawn_shopper_at_entrance(now);
        }

        let shopper_count = self
            .world
            .store
            .live_ids()
            .filter(|&a| matches!(self.world.store.kind[a.index()], Some(AgentKind::Shopper { .. })))
            .count() as u32;
        let target = self.config.target_people_count;
        if target == 0 || shopper_count >= target {
            return;
        }
        let gap = (target - shopper_count) as f32 / target as f32;
        let p = (gap * self.config.arrival_rate_multiplier) as f64;
        if self.engine_rng.gen_bool(p) {
            self.spawn_shopper_at_entrance(now);
        }
    }

    fn spawn_shopper_at_entrance(&mut self, now: Tick) {
        let position = match self.engine_rng.choose(&self.scene.entrances) {
            Some(entrance) => entrance.centroid(),
            None => return,
        };
        let stay_secs = self.engine_rng.gen_range(
            (self.config.avg_stay_time_min * 60.0 * 0.5)..(self.config.avg_stay_time_min * 60.0 * 1.5),
        );
        let agent = self.world.spawn_shopper(position, now, stay_secs, now, &mut self.engine_rng);
        self.ensure_capacity(agent);
        self.steering_store.ensure_len(agent.index() + 1);
    }

    fn ensure_capacity(&mut self, agent: AgentId) {
        let len = agent.index() + 1;
        if self.path_failed.len() < len {
            self.path_failed.resize(len, false);
        }
        if self.cashier_assigned_lane.len() < len {
            self.cashier_assigned_lane.resize(len, None);
        }
    }

    // ── Phase 3+4: FSM intents, then apply ──────────────────────────────

    fn intent_phase(&mut self, now: Tick) -> Vec<(AgentId, AgentKind, Vec<Intent>)> {
        let lane_queue_lengths: Vec<u32> = self.queues.iter().map(|q| q.len() as u32).collect();
        let lane_cashier_ready = self.lane_cashier_ready();

        let live: Vec<AgentId> = self.world.store.live_ids().collect();
        let AgentWorld { store, rngs } = &mut self.world;

        let ctx = SimContext {
            tick: now,
            tick_duration_secs: self.config.tick_duration_secs(),
            agents: &*store,
            scene: &self.scene,
            navgrid: &self.navgrid,
            lane_states: &self.lane_states,
            lane_queue_lengths: &lane_queue_lengths,
            lane_cashier_ready: &lane_cashier_ready,
            path_failed: &self.path_failed,
            cashier_assigned_lane: &self.cashier_assigned_lane,
            checkout_prob_multiplier: self.config.checkout_prob_multiplier,
            browsing_speed_multiplier: self.config.browsing_speed_multiplier,
            cashier_break_prob_per_hour: self.config.cashier_break_prob_per_hour,
            enable_cashiers: self.config.enable_cashiers,
        };

        let mut results = Vec::with_capacity(live.len());
        for agent in live {
            let rng = rngs.get_mut(agent);
            if let Ok((kind, intents)) = pf_behavior::update(agent, &ctx, rng) {
                results.push((agent, kind, intents));
            }
        }
        results
    }

    fn apply_phase(&mut self, results: Vec<(AgentId, AgentKind, Vec<Intent>)>) {
        // This tick's ctx snapshot of path_failed has been read; clear it
        // before any new failures below set it for next tick.
        for (agent, _, _) in &results {
            if let Some(slot) = self.path_failed.get_mut(agent.index()) {
                *slot = false;
            }
        }

        for (agent, kind, intents) in results {
            if !self.world.store.is_alive(agent) {
                continue;
            }
            self.world.store.kind[agent.index()] = Some(kind);

            for intent in intents {
                match intent {
                    Intent::SetDestination(target) => {
                        let position = self.world.store.position[agent.index()];
                        match self.pathfinder.find_path(&self.navgrid, position, target) {
                            Ok(path) => {
                                self.world.store.path_waypoints[agent.index()] = path.waypoints;
                                self.path_failed[agent.index()] = false;
                            }
                            Err(_) => {
                                self.world.store.path_waypoints[agent.index()].clear();
                                self.path_failed[agent.index()] = true;
                            }
                        }
                    }
                    Intent::JoinQueue { lane } => {
                        self.queues[lane.index()].push_back(agent);
                    }
                    Intent::LeaveQueue { lane } => {
                        if let Some(pos) = self.queues[lane.index()].iter().position(|&a| a == agent) {
                            self.queues[lane.index()].remove(pos);
                        }
                    }
                }
            }
        }

        self.resync_queue_slots();
    }

    /// Recompute every queued shopper's `slot` from its actual position in
    /// the lane queue, so shoppers ahead leaving moves everyone else up.
    fn resync_queue_slots(&mut self) {
        for lane_idx in 0..self.queues.len() {
            let lane = LaneId(lane_idx as u16);
            for (slot, &agent) in self.queues[lane_idx].iter().enumerate() {
                if let Some(AgentKind::Shopper {
                    state: ShopperState::Queueing { lane: s_lane, slot: s_slot },
                    ..
                }) = &mut self.world.store.kind[agent.index()]
                {
                    if *s_lane == lane {
                        *s_slot = slot as u32;
                    }
                }
            }
        }
    }

    // ── Phase 5: steering + collision filter + integration ──────────────

    fn movement_phase(&mut self) {
        let dt = self.config.tick_duration_secs();
        let live: Vec<AgentId> = self.world.store.live_ids().collect();
        let buckets = build_neighbor_buckets(&self.world.store, self.steering.params.separation_radius_m);

        for &agent in &live {
            let idx = agent.index();
            let position = self.world.store.position[idx];
            let target = self.world.store.path_waypoints[idx].first().copied().unwrap_or(position);
            let neighbors = neighbors_within(
                agent,
                position,
                &self.world.store,
                &buckets,
                self.steering.params.separation_radius_m,
                self.steering.params.separation_radius_m,
            );
            let steering_state = self.steering_store.get(agent);
            let velocity =
                self.steering.compute_velocity(position, target, &neighbors, &self.navgrid, steering_state);

            let (new_position, blocked) = {
                let rng = self.world.rngs.get_mut(agent);
                self.steering.resolve_move(position, velocity, dt, &self.navgrid, rng)
            };

            self.world.store.position[idx] = new_position;
            self.world.store.velocity[idx] = velocity;
            self.steering_store.advance_phase(agent, dt);

            self.world.store.blocked_frames[idx] =
                if blocked { self.world.store.blocked_frames[idx].saturating_add(1) } else { 0 };

            while self.world.store.path_waypoints[idx]
                .first()
                .map(|&wp| new_position.within_radius(wp, WAYPOINT_EPS_M))
                .unwrap_or(false)
            {
                self.world.store.path_waypoints[idx].remove(0);
            }
        }

        self.handle_stuck_agents();
    }

    /// An agent blocked for too many consecutive ticks gets a forced
    /// replan toward its current goal; if that also fails, a small jitter
    /// plus one more replan attempt; failing that, it is forced to exit.
    fn handle_stuck_agents(&mut self) {
        let stuck: Vec<AgentId> = self
            .world
            .store
            .live_ids()
            .filter(|&a| self.world.store.blocked_frames[a.index()] > STUCK_BLOCKED_FRAMES_THRESHOLD)
            .collect();

        for agent in stuck {
            let idx = agent.index();
            let goal = match self.world.store.path_waypoints[idx].last().copied() {
                Some(g) => g,
                None => {
                    self.world.store.blocked_frames[idx] = 0;
                    continue;
                }
            };
            let position = self.world.store.position[idx];

            if let Ok(path) = self.pathfinder.find_path(&self.navgrid, position, goal) {
                self.world.store.path_waypoints[idx] = path.waypoints;
                self.world.store.blocked_frames[idx] = 0;
                continue;
            }

            let angle: f32 = {
                let rng = self.world.rngs.get_mut(agent);
                rng.gen_range(0.0..(2.0 * std::f32::consts::PI))
            };
            let jittered = position + Vec2::new(angle.cos(), angle.sin()) * 0.3;

            if let Ok(path) = self.pathfinder.find_path(&self.navgrid, jittered, goal) {
                self.world.store.position[idx] = jittered;
                self.world.store.path_waypoints[idx] = path.waypoints;
                self.world.store.blocked_frames[idx] = 0;
            } else {
                self.force_exit(agent);
                self.world.store.blocked_frames[idx] = 0;
            }
        }
    }

    fn force_exit(&mut self, agent: AgentId) {
        let idx = agent.index();
        let budget = match &self.world.store.kind[idx] {
            Some(AgentKind::Shopper { budget, .. }) => Some(budget.clone()),
            _ => None,
        };
        if let Some(budget) = budget {
            self.world.store.kind[idx] = Some(AgentKind::Shopper { state: ShopperState::Exiting, budget });
            self.world.store.path_waypoints[idx].clear();
        }
    }

    // ── Phase 6: lane-state controller + cashier staffing ────────────────

    fn lane_controller_phase(&mut self, now: Tick) {
        let tick_duration_secs = self.config.tick_duration_secs();
        let window_ticks = (PRESSURE_WINDOW_SECS / tick_duration_secs).round().max(1.0) as usize;

        for (i, queue) in self.queues.iter().enumerate() {
            let window = &mut self.pressure_windows[i];
            window.push_back(queue.len() as u32);
            while window.len() > window_ticks {
                window.pop_front();
            }
        }

        let queue_lengths: Vec<u32> = self.queues.iter().map(|q| q.len() as u32).collect();
        let cashier_ready = self.lane_cashier_ready();

        for i in 0..self.lane_states.len() {
            self.lane_states[i] =
                self.lane_controller.tick(self.lane_states[i], now, tick_duration_secs, queue_lengths[i], cashier_ready[i]);
        }

        if self.config.enable_checkout_manager {
            if let Some(promote_idx) = self.lane_controller.auto_promote(&self.lane_states, &queue_lengths) {
                self.lane_states[promote_idx] = LaneState::Confirming { since: now };
            }
        }

        self.staff_lanes();
    }

    fn lane_cashier_ready(&self) -> Vec<bool> {
        let mut ready = vec![false; self.lane_states.len()];
        for agent in self.world.store.live_ids() {
            if let Some(AgentKind::Cashier { state: CashierState::Working { lane }, .. }) =
                &self.world.store.kind[agent.index()]
            {
                ready[lane.index()] = true;
            }
        }
        ready
    }

    /// Assign idle (`Inactive`, unassigned) cashiers to lanes currently
    /// `Confirming`/`Open` but lacking a working cashier. This plumbing runs
    /// regardless of `enable_checkout_manager` — that flag only gates
    /// automatic pressure-driven promotion of closed lanes, not getting a
    /// cashier to a lane someone (manual or auto) already opened.
    fn staff_lanes(&mut self) {
        for lane_opt in self.cashier_assigned_lane.iter_mut() {
            if let Some(lane) = *lane_opt {
                if matches!(self.lane_states[lane.index()], LaneState::Closed) {
                    *lane_opt = None;
                }
            }
        }

        let cashier_ready = self.lane_cashier_ready();
        let needing_staff: Vec<LaneId> = self
            .lane_states
            .iter()
            .enumerate()
            .filter(|(i, s)| matches!(s, LaneState::Confirming { .. } | LaneState::Open) && !cashier_ready[*i])
            .map(|(i, _)| LaneId(i as u16))
            .collect();

        let idle_cashiers: Vec<AgentId> = self
            .world
            .store
            .live_ids()
            .filter(|&a| matches!(&self.world.store.kind[a.index()], Some(AgentKind::Cashier { state: CashierState::Inactive, .. })))
            .filter(|&a| self.cashier_assigned_lane.get(a.index()).copied().flatten().is_none())
            .collect();

        for (cashier, lane) in idle_cashiers.into_iter().zip(needing_staff) {
            self.cashier_assigned_lane[cashier.index()] = Some(lane);
        }
    }

    // ── Phase 7: publish ──────────────────────────────────────────────────

    fn publish_phase<O: SimObserver>(&mut self, now: Tick, observer: &mut O) {
        observer.on_publish(now, &self.clock, &self.config, &self.world.store, &self.scene);
        let summaries = self.lane_summaries();
        observer.on_lane_states(now, &summaries);
    }

    fn lane_summaries(&self) -> Vec<LaneSummary> {
        self.lane_states
            .iter()
            .enumerate()
            .map(|(i, &state)| {
                let queue_length = self.queues[i].len() as u32;
                let window = &self.pressure_windows[i];
                let pressure = if window.is_empty() {
                    0.0
                } else {
                    window.iter().sum::<u32>() as f32 / window.len() as f32
                };
                LaneSummary { lane: LaneId(i as u16), state, queue_length, pressure }
            })
            .collect()
    }

    // ── Phase 8: prune ────────────────────────────────────────────────────

    fn prune_phase(&mut self) -> usize {
        let pruned = self.world.prune_terminal();
        for agent in &pruned {
            self.steering_store.reset(*agent);
            if let Some(slot) = self.path_failed.get_mut(agent.index()) {
                *slot = false;
            }
            if let Some(slot) = self.cashier_assigned_lane.get_mut(agent.index()) {
                *slot = None;
            }
            for queue in &mut self.queues {
                if let Some(pos) = queue.iter().position(|a| a == agent) {
                    queue.remove(pos);
                }
            }
        }
        pruned.len()
    }

    // ── Phase 9: diagnostics ──────────────────────────────────────────────

    fn diagnostics(&self, tick: Tick, pruned_count: usize) -> Diagnostics {
        let agent_count = self.world.store.len();
        let buckets = build_neighbor_buckets(&self.world.store, OVERLAP_RADIUS_M);
        let mut overlap_observations = 0u32;
        for agent in self.world.store.live_ids() {
            let position = self.world.store.position[agent.index()];
            let neighbors =
                neighbors_within(agent, position, &self.world.store, &buckets, OVERLAP_RADIUS_M, OVERLAP_RADIUS_M);
            overlap_observations += neighbors.len() as u32;
        }
        let stuck_count = self
            .world
            .store
            .live_ids()
            .filter(|&a| self.world.store.blocked_frames[a.index()] > STUCK_BLOCKED_FRAMES_THRESHOLD)
            .count() as u32;

        Diagnostics {
            tick,
            agent_count,
            overlap_count: overlap_observations / 2,
            stuck_count,
            pruned_count,
        }
    }
}

// ── Neighbor bucketing ───────────────────────────────────────────────────────

/// Coarse grid bucketing of live agents' positions, cell size `cell_size`.
/// A continuous-space analog of the node-keyed contact index used elsewhere
/// in this family of crates: O(1)-amortized instead of O(n^2) neighbor scans.
fn build_neighbor_buckets(
    store: &pf_agent::AgentStore,
    cell_size: f32,
) -> HashMap<(i32, i32), Vec<AgentId>> {
    let mut buckets: HashMap<(i32, i32), Vec<AgentId>> = HashMap::new();
    for agent in store.live_ids() {
        let p = store.position[agent.index()];
        let key = ((p.x / cell_size).floor() as i32, (p.y / cell_size).floor() as i32);
        buckets.entry(key).or_default().push(agent);
    }
    buckets
}

fn neighbors_within(
    agent: AgentId,
    position: Vec2,
    store: &pf_agent::AgentStore,
    buckets: &HashMap<(i32, i32), Vec<AgentId>>,
    cell_size: f32,
    radius: f32,
) -> Vec<Vec2> {
    let (ci, cj) = ((position.x / cell_size).floor() as i32, (position.y / cell_size).floor() as i32);
    let mut out = Vec::new();
    for dj in -1..=1 {
        for di in -1..=1 {
            if let Some(bucket) = buckets.get(&(ci + di, cj + dj)) {
                for &other in bucket {
                    if other == agent {
                        continue;
                    }
                    let op = store.position[other.index()];
                    if position.distance(op) <= radius {
                        out.push(op);
                    }
                }
            }
        }
    }
    out
}
