//! Zone spatial index: coarse R-tree AABB filter followed by exact
//! point-in-polygon, mirroring the nearest-node R-tree pattern used
//! elsewhere in this family of crates, adapted here to candidate-zone
//! pruning instead of nearest-point snapping.

use rstar::{RTree, RTreeObject, AABB};

use pf_core::{Vec2, ZoneId};

use crate::scene::{Scene, Zone, ZoneRole};

#[derive(Clone)]
struct ZoneEntry {
    min: [f32; 2],
    max: [f32; 2],
    id: ZoneId,
}

impl RTreeObject for ZoneEntry {
    type Envelope = AABB<[f32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.min, self.max)
    }
}

/// Pre-built index over a `Scene`'s zones for O(1)-amortized containment
/// queries.
pub struct ZoneIndex {
    tree: RTree<ZoneEntry>,
}

impl ZoneIndex {
    pub fn build(scene: &Scene) -> Self {
        let entries: Vec<ZoneEntry> = scene
            .zones
            .iter()
            .enumerate()
            .map(|(i, zone)| {
                let (min, max) = zone.aabb();
                ZoneEntry {
                    min: [min.x, min.y],
                    max: [max.x, max.y],
                    id: ZoneId(i as u16),
                }
            })
            .collect();
        Self {
            tree: RTree::bulk_load(entries),
        }
    }

    /// All zones whose polygon contains `point`, in scene declaration order.
    pub fn zones_containing<'s>(&self, scene: &'s Scene, point: Vec2) -> Vec<(ZoneId, &'s Zone)> {
        let query = AABB::from_point([point.x, point.y]);
        let mut hits: Vec<(ZoneId, &Zone)> = self
            .tree
            .locate_in_envelope_intersecting(&query)
            .filter_map(|entry| {
                let zone = &scene.zones[entry.id.index()];
                zone.contains(point).then_some((entry.id, zone))
            })
            .collect();
        hits.sort_by_key(|(id, _)| id.0);
        hits
    }

    /// Convenience: the first zone of the given role containing `point`, if
    /// any.
    pub fn zone_of_role_containing<'s>(
        &self,
        scene: &'s Scene,
        point: Vec2,
        role: ZoneRole,
    ) -> Option<(ZoneId, &'s Zone)> {
        self.zones_containing(scene, point)
            .into_iter()
            .find(|(_, z)| z.role == role)
    }
}
