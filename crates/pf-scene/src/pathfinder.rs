//! Pathfinding trait and the default grid A* implementation.
//!
//! # Pluggability
//!
//! The engine calls pathfinding via the [`Pathfinder`] trait, so a host
//! application can swap in a different search strategy without touching the
//! rest of the engine. The default [`AStarPathfinder`] is the only
//! implementation shipped here.
//!
//! # Grid vs. continuous boundary
//!
//! `find_path` returns world-space waypoints only (`Vec<Vec2>`). Callers
//! never retain a cell index — this keeps grid resolution free to change
//! without touching agent code.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use pf_core::Vec2;

use crate::navgrid::NavGrid;
use crate::PathfindError;

/// The result of a pathfinding query: an ordered list of world-space
/// waypoints from just after `start` to `goal`.
#[derive(Debug, Clone)]
pub struct Path {
    pub waypoints: Vec<Vec2>,
}

impl Path {
    pub fn is_trivial(&self) -> bool {
        self.waypoints.is_empty()
    }
}

/// Pluggable pathfinding engine.
pub trait Pathfinder: Send + Sync {
    fn find_path(&self, navgrid: &NavGrid, start: Vec2, goal: Vec2) -> Result<Path, PathfindError>;
}

/// Grid A* with octile-distance heuristic, 8-way connectivity, and
/// deterministic tie-breaking (lower f, then lower h, then lower cell
/// index).
pub struct AStarPathfinder;

impl Pathfinder for AStarPathfinder {
    fn find_path(&self, navgrid: &NavGrid, start: Vec2, goal: Vec2) -> Result<Path, PathfindError> {
        find_path(navgrid, start, goal)
    }
}

// ── A* node ───────────────────────────────────────────────────────────────────

/// One entry in the A* open set. Costs are fixed-point (`cost` units times
/// 100) so the type stays `Eq`/`Ord` without floating-point comparison
/// pitfalls.
#[derive(Copy, Clone, PartialEq, Eq)]
struct OpenNode {
    f: u32,
    h: u32,
    cell_index: u32,
}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap; reverse every field so `.pop()` yields
        // the node with lowest f, then lowest h, then lowest cell index.
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.h.cmp(&self.h))
            .then_with(|| other.cell_index.cmp(&self.cell_index))
    }
}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

const STRAIGHT_COST: u32 = 100;
const DIAGONAL_COST: u32 = 141; // 100 * sqrt(2), rounded

/// Octile distance heuristic between two cells, in the same fixed-point
/// units as edge costs.
fn octile_heuristic(dx: i64, dy: i64) -> u32 {
    let dx = dx.unsigned_abs();
    let dy = dy.unsigned_abs();
    let (lo, hi) = if dx < dy { (dx, dy) } else { (dy, dx) };
    (STRAIGHT_COST as u64 * (hi - lo) + DIAGONAL_COST as u64 * lo) as u32
}

const NEIGHBOR_OFFSETS: [(i64, i64, u32); 8] = [
    (-1, 0, STRAIGHT_COST),
    (1, 0, STRAIGHT_COST),
    (0, -1, STRAIGHT_COST),
    (0, 1, STRAIGHT_COST),
    (-1, -1, DIAGONAL_COST),
    (-1, 1, DIAGONAL_COST),
    (1, -1, DIAGONAL_COST),
    (1, 1, DIAGONAL_COST),
];

fn find_path(navgrid: &NavGrid, start: Vec2, goal: Vec2) -> Result<Path, PathfindError> {
    let (sx, sy) = navgrid.cell_at(start);
    let (gx, gy) = navgrid.cell_at(goal);

    let (sx, sy) = if navgrid.walkable(sx, sy) {
        (sx, sy)
    } else {
        navgrid.nearest_walkable(sx, sy).ok_or(PathfindError::NoPath)?
    };
    let (gx, gy) = if navgrid.walkable(gx, gy) {
        (gx, gy)
    } else {
        navgrid.nearest_walkable(gx, gy).ok_or(PathfindError::NoPath)?
    };

    if (sx, sy) == (gx, gy) {
        return Ok(Path { waypoints: vec![] });
    }

    let width = navgrid.width_cells;
    let cell_count = (navgrid.width_cells * navgrid.height_cells) as usize;
    let start_idx = (sy * width + sx) as usize;
    let goal_idx = (gy * width + gx) as usize;

    let mut g_cost = vec![u32::MAX; cell_count];
    let mut came_from = vec![u32::MAX; cell_count];
    let mut closed = vec![false; cell_count];

    g_cost[start_idx] = 0;
    let mut open: BinaryHeap<OpenNode> = BinaryHeap::new();
    open.push(OpenNode {
        f: octile_heuristic(gx as i64 - sx as i64, gy as i64 - sy as i64),
        h: octile_heuristic(gx as i64 - sx as i64, gy as i64 - sy as i64),
        cell_index: start_idx as u32,
    });

    while let Some(current) = open.pop() {
        let idx = current.cell_index as usize;
        if closed[idx] {
            continue;
        }
        closed[idx] = true;

        if idx == goal_idx {
            return Ok(Path {
                waypoints: smooth_path(navgrid, reconstruct(&came_from, start_idx, goal_idx, width)),
            });
        }

        let ci = (idx as u32) % width;
        let cj = (idx as u32) / width;

        for &(di, dj, step_cost) in &NEIGHBOR_OFFSETS {
            let ni = ci as i64 + di;
            let nj = cj as i64 + dj;
            if !navgrid.in_bounds(ni, nj) {
                continue;
            }
            let (ni_u, nj_u) = (ni as u32, nj as u32);
            if !navgrid.walkable(ni_u, nj_u) {
                continue;
            }
            // Forbid cutting a diagonal between two orthogonally blocked cells.
            if di != 0 && dj != 0 {
                let blocked_a = !navgrid.walkable(ci, nj_u);
                let blocked_b = !navgrid.walkable(ni_u, cj);
                if blocked_a || blocked_b {
                    continue;
                }
            }

            let n_idx = (nj_u * width + ni_u) as usize;
            if closed[n_idx] {
                continue;
            }
            let cell_cost = navgrid.cost(ni_u, nj_u) as u32;
            let tentative = g_cost[idx].saturating_add(step_cost.saturating_mul(cell_cost.max(1)));

            if tentative < g_cost[n_idx] {
                g_cost[n_idx] = tentative;
                came_from[n_idx] = idx as u32;
                let h = octile_heuristic(gx as i64 - ni as i64, gy as i64 - nj as i64);
                open.push(OpenNode {
                    f: tentative.saturating_add(h),
                    h,
                    cell_index: n_idx as u32,
                });
            }
        }
    }

    Err(PathfindError::NoPath)
}

fn reconstruct(came_from: &[u32], start_idx: usize, goal_idx: usize, width: u32) -> Vec<(u32, u32)> {
    let mut cells = Vec::new();
    let mut cur = goal_idx;
    loop {
        cells.push((cur as u32 % width, cur as u32 / width));
        if cur == start_idx {
            break;
        }
        cur = came_from[cur] as usize;
    }
    cells.reverse();
    cells
}

/// Merge collinear/redundant cells: keep a waypoint only if the straight
/// segment from the last kept waypoint to the next candidate would cross a
/// non-walkable cell.
fn smooth_path(navgrid: &NavGrid, cells: Vec<(u32, u32)>) -> Vec<Vec2> {
    if cells.is_empty() {
        return vec![];
    }
    let points: Vec<Vec2> = cells.iter().map(|&(i, j)| navgrid.cell_center(i, j)).collect();

    let mut kept = vec![points[0]];
    let mut anchor = 0usize;
    for i in 1..points.len() {
        if i == points.len() - 1 {
            kept.push(points[i]);
            continue;
        }
        if !line_of_sight(navgrid, points[anchor], points[i + 1]) {
            kept.push(points[i]);
            anchor = i;
        }
    }
    // Drop the start point itself; callers already know where they are.
    kept.remove(0);
    if kept.is_empty() {
        kept.push(*points.last().unwrap());
    }
    kept
}

/// Raster walk from `a` to `b`: `true` if every sampled cell along the
/// segment is walkable.
fn line_of_sight(navgrid: &NavGrid, a: Vec2, b: Vec2) -> bool {
    let dist = a.distance(b);
    let steps = (dist / (navgrid.cell_size_m * 0.5)).ceil().max(1.0) as u32;
    for step in 0..=steps {
        let t = step as f32 / steps as f32;
        let p = Vec2::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t);
        let (i, j) = navgrid.cell_at(p);
        if !navgrid.walkable(i, j) {
            return false;
        }
    }
    true
}
