//! `PublishObserver` — bridges `pf_sim::SimObserver` to a [`Publisher`].

use pf_agent::AgentStore;
use pf_core::{EngineConfig, SimClock, Tick};
use pf_scene::Scene;
use pf_sim::SimObserver;

use crate::publisher::Publisher;
use crate::record::track_record;

/// Publishes one [`crate::record::TrackRecord`] per live agent at every
/// `on_publish` call — the tick loop calls it exactly once per tick.
pub struct PublishObserver {
    publisher: Publisher,
}

impl PublishObserver {
    pub fn new(publisher: Publisher) -> Self {
        Self { publisher }
    }

    pub fn into_publisher(self) -> Publisher {
        self.publisher
    }
}

impl SimObserver for PublishObserver {
    fn on_publish(&mut self, _tick: Tick, clock: &SimClock, config: &EngineConfig, agents: &AgentStore, _scene: &Scene) {
        for agent in agents.live_ids() {
            if let Some(record) = track_record(agent, agents, config, clock) {
                self.publisher.publish(&record);
            }
        }
    }
}
