//! The `TrackRecord` wire type and the mapping from live agent state to it.
//!
//! Internal positions are a top-down 2D plane (`Vec2 { x, y }`); the wire
//! format is a ground-plane 3D point with the vertical axis always zero, so
//! internal `y` becomes wire `z` and wire `y` is always `0.0`.

use pf_agent::{AgentKind, AgentStore};
use pf_core::{AgentId, EngineConfig, SimClock};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Point3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct BoundingBox {
    pub w: f32,
    pub h: f32,
    pub d: f32,
}

/// A single tracked-object observation, emitted once per live agent per tick
/// and never mutated after emission.
#[derive(Debug, Clone, Serialize)]
pub struct TrackRecord {
    pub id: u32,
    pub device_id: String,
    pub venue_id: String,
    pub timestamp_ms: i64,
    pub position: Point3,
    pub velocity: Point3,
    pub object_type: &'static str,
    pub bounding_box: BoundingBox,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

/// Every tracked body is a standing adult pedestrian; the feed can't tell a
/// shopper from a cashier by shape alone.
const PERSON_BOUNDING_BOX: BoundingBox = BoundingBox { w: 0.5, h: 1.7, d: 0.5 };

/// Build the `TrackRecord` for `agent`, or `None` if the slot is no longer
/// live (pruned between the intent read and the publish hook).
pub fn track_record(agent: AgentId, agents: &AgentStore, config: &EngineConfig, clock: &SimClock) -> Option<TrackRecord> {
    let kind = agents.kind[agent.index()].as_ref()?;
    let position = agents.position[agent.index()];
    let velocity = agents.velocity[agent.index()];

    Some(TrackRecord {
        id: agent.0,
        device_id: config.device_id.clone(),
        venue_id: config.venue_id.clone(),
        timestamp_ms: clock.current_unix_ms(),
        position: Point3 { x: position.x, y: 0.0, z: position.y },
        velocity: Point3 { x: velocity.x, y: 0.0, z: velocity.y },
        object_type: "person",
        bounding_box: PERSON_BOUNDING_BOX.clone(),
        color: track_color(agent),
        metadata: Some(serde_json::json!({
            "role": role_label(kind),
            "state": kind.label(),
        })),
    })
}

fn role_label(kind: &AgentKind) -> &'static str {
    match kind {
        AgentKind::Shopper { .. } => "shopper",
        AgentKind::Cashier { .. } => "cashier",
    }
}

/// A stable, visually-distinct color per agent id, so a track keeps the same
/// color for its whole lifetime. Not cryptographic — just a fixed-point
/// multiplicative hash spread across the RGB space.
pub(crate) fn track_color(agent: AgentId) -> String {
    let h = (agent.0 as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    format!("#{:06X}", (h >> 40) as u32 & 0xFF_FFFF)
}
