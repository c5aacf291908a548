//! Integration tests for pf-sim: the tick loop wired end to end.

use std::collections::HashMap;

use pf_core::{EngineConfig, LaneId, Tick, Vec2, ZoneId};
use pf_scene::scene::{Entrance, Lane, Scene, Zone, ZoneRole};
use pf_scene::AStarPathfinder;

use crate::control::ControlMessage;
use crate::observer::{Diagnostics, LaneSummary, SimObserver};
use crate::{NoopObserver, SimBuilder};

// ── Fixture ───────────────────────────────────────────────────────────────────

/// A 20x14 venue with one checkout lane and a single entrance, small enough
/// to run many ticks quickly in a test.
fn fixture_scene() -> Scene {
    let entrance = Entrance {
        points: vec![
            Vec2::new(0.0, 6.0),
            Vec2::new(1.0, 6.0),
            Vec2::new(1.0, 8.0),
            Vec2::new(0.0, 8.0),
        ],
    };
    let shopping = Zone {
        role: ZoneRole::Shopping,
        lane_id: None,
        points: vec![
            Vec2::new(2.0, 2.0),
            Vec2::new(14.0, 2.0),
            Vec2::new(14.0, 12.0),
            Vec2::new(2.0, 12.0),
        ],
    };
    let queue = Zone {
        role: ZoneRole::Queue,
        lane_id: Some(LaneId(0)),
        points: vec![
            Vec2::new(15.0, 5.0),
            Vec2::new(19.0, 5.0),
            Vec2::new(19.0, 7.0),
            Vec2::new(15.0, 7.0),
        ],
    };
    let service = Zone {
        role: ZoneRole::Service,
        lane_id: Some(LaneId(0)),
        points: vec![
            Vec2::new(15.0, 7.0),
            Vec2::new(19.0, 7.0),
            Vec2::new(19.0, 8.0),
            Vec2::new(15.0, 8.0),
        ],
    };
    let lane = Lane {
        id: LaneId(0),
        queue_zone: ZoneId(1),
        service_zone: ZoneId(2),
        anchor_point: Vec2::new(17.0, 7.5),
        flow_direction: Vec2::new(0.0, -1.0),
    };
    Scene::new(20.0, 14.0, vec![], vec![entrance], vec![shopping, queue, service], vec![lane]).unwrap()
}

fn small_config(seed: u64) -> EngineConfig {
    let mut config = EngineConfig::default();
    config.target_people_count = 8;
    config.frequency_hz = 10;
    config.seed = Some(seed);
    config.enable_cashiers = true;
    config.cashier_shift_min = 60.0;
    config
}

#[derive(Default)]
struct RecordingObserver {
    publishes: usize,
    lane_snapshots: Vec<Vec<LaneSummary>>,
    diagnostics: Vec<Diagnostics>,
}

impl SimObserver for RecordingObserver {
    fn on_publish(
        &mut self,
        _tick: Tick,
        _clock: &pf_core::SimClock,
        _config: &EngineConfig,
        _agents: &pf_agent::AgentStore,
        _scene: &Scene,
    ) {
        self.publishes += 1;
    }

    fn on_lane_states(&mut self, _tick: Tick, lanes: &[LaneSummary]) {
        self.lane_snapshots.push(lanes.to_vec());
    }

    fn on_tick_end(&mut self, _tick: Tick, diagnostics: &Diagnostics) {
        self.diagnostics.push(diagnostics.clone());
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[test]
fn population_grows_toward_target_over_startup_burst() {
    let mut sim = SimBuilder::new(small_config(1), fixture_scene(), AStarPathfinder).build().unwrap();
    let mut observer = NoopObserver;

    sim.run_ticks(400, &mut observer).unwrap();

    // The first startup cluster (5 shoppers, 3s apart) should have fully
    // spawned well before tick 400 at 10 Hz.
    assert!(sim.world.store.len() >= 3);
}

#[test]
fn publish_fires_exactly_once_per_tick() {
    let mut sim = SimBuilder::new(small_config(2), fixture_scene(), AStarPathfinder).build().unwrap();
    let mut observer = RecordingObserver::default();

    sim.run_ticks(50, &mut observer).unwrap();

    assert_eq!(observer.publishes, 50);
    assert_eq!(observer.lane_snapshots.len(), 50);
    assert_eq!(observer.diagnostics.len(), 50);
    for snapshot in &observer.lane_snapshots {
        assert_eq!(snapshot.len(), 1, "scene declares exactly one lane");
    }
}

#[test]
fn same_seed_yields_identical_status_sequence() {
    let mut sim_a = SimBuilder::new(small_config(7), fixture_scene(), AStarPathfinder).build().unwrap();
    let mut sim_b = SimBuilder::new(small_config(7), fixture_scene(), AStarPathfinder).build().unwrap();

    let mut obs_a = NoopObserver;
    let mut obs_b = NoopObserver;

    for _ in 0..200 {
        sim_a.run_ticks(1, &mut obs_a).unwrap();
        sim_b.run_ticks(1, &mut obs_b).unwrap();

        let status_a = sim_a.status();
        let status_b = sim_b.status();
        assert_eq!(status_a.tick, status_b.tick);
        assert_eq!(status_a.agent_count, status_b.agent_count);
        assert_eq!(status_a.shopper_state_counts, status_b.shopper_state_counts);
        assert_eq!(status_a.cashier_state_counts, status_b.cashier_state_counts);
    }
}

#[test]
fn control_mailbox_stop_halts_run() {
    let mut sim = SimBuilder::new(small_config(3), fixture_scene(), AStarPathfinder).build().unwrap();
    let sender = sim.control_sender();
    sender.send(ControlMessage::Stop).unwrap();

    let mut observer = NoopObserver;
    sim.run(&mut observer).unwrap();

    // A Stop queued before the first drain means zero ticks should run.
    assert_eq!(sim.clock.current_tick, Tick::ZERO);
}

#[test]
fn control_mailbox_set_lane_state_opens_a_lane() {
    let mut sim = SimBuilder::new(small_config(4), fixture_scene(), AStarPathfinder).build().unwrap();
    let sender = sim.control_sender();
    sender.send(ControlMessage::SetLaneState { lane: LaneId(0), open: true }).unwrap();

    let mut observer = NoopObserver;
    sim.run_ticks(1, &mut observer).unwrap();

    assert!(!matches!(sim.lane_states[0], pf_behavior::LaneState::Closed));
}

#[test]
fn control_mailbox_get_status_replies_on_the_given_channel() {
    let mut sim = SimBuilder::new(small_config(5), fixture_scene(), AStarPathfinder).build().unwrap();
    let sender = sim.control_sender();
    let (reply_tx, reply_rx) = crossbeam_channel::unbounded();
    sender.send(ControlMessage::GetStatus(reply_tx)).unwrap();

    let mut observer = NoopObserver;
    sim.run_ticks(1, &mut observer).unwrap();

    let status = reply_rx.try_recv().expect("status reply should have been sent before the tick ran");
    assert_eq!(status.tick, Tick::ZERO);
}

#[test]
fn no_agent_stays_blocked_forever() {
    // A long run should never leave an agent pegged at max blocked_frames —
    // the stuck-agent recovery path should always eventually clear it.
    let mut sim = SimBuilder::new(small_config(9), fixture_scene(), AStarPathfinder).build().unwrap();
    let mut observer = NoopObserver;

    sim.run_ticks(1000, &mut observer).unwrap();

    let stuck_forever = sim
        .world
        .store
        .live_ids()
        .filter(|&a| sim.world.store.blocked_frames[a.index()] > 500)
        .count();
    assert_eq!(stuck_forever, 0);
}

#[test]
fn lane_queue_slots_are_contiguous() {
    let mut sim = SimBuilder::new(small_config(11), fixture_scene(), AStarPathfinder).build().unwrap();
    let mut observer = NoopObserver;
    sim.run_ticks(600, &mut observer).unwrap();

    for queue in &sim.queues {
        let mut seen: HashMap<u32, usize> = HashMap::new();
        for (slot, &agent) in queue.iter().enumerate() {
            if let Some(pf_agent::AgentKind::Shopper {
                state: pf_agent::ShopperState::Queueing { slot: s, .. },
                ..
            }) = &sim.world.store.kind[agent.index()]
            {
                seen.insert(*s, slot);
            }
        }
        for (recorded_slot, actual_slot) in &seen {
            assert_eq!(*recorded_slot as usize, *actual_slot);
        }
    }
}
