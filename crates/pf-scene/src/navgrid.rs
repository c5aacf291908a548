//! Walkability raster built once from a [`Scene`](crate::Scene).
//!
//! # Data layout
//!
//! The grid is a flat row-major `Vec` over `(width_cells, height_cells)`, a
//! direct analog of the CSR adjacency arrays used elsewhere in this family
//! of crates: dense, contiguous, and indexable in O(1) without pointer
//! chasing. There is no incremental update path — `build_navgrid` is pure
//! and the grid is read-only for the life of the engine.

use pf_core::{CellId, Vec2};

use crate::scene::Scene;

/// Default cell size in metres (~0.25 m gives sub-person resolution without
/// an unreasonable cell count for venue-scale scenes).
pub const DEFAULT_CELL_SIZE_M: f32 = 0.25;

/// Obstacle inflation padding applied before rasterizing walkability.
pub const OBSTACLE_PADDING_M: f32 = 0.2;

/// Extra cost added to the outermost ring of walkable cells around every
/// obstacle, so paths prefer room centers to wall-hugging.
const BORDER_COST_PENALTY: u16 = 4;

#[derive(Clone, Debug)]
pub struct NavGrid {
    pub cell_size_m: f32,
    pub width_cells: u32,
    pub height_cells: u32,
    walkable: Vec<bool>,
    cost: Vec<u16>,
}

impl NavGrid {
    #[inline]
    fn linear_index(&self, i: u32, j: u32) -> usize {
        (j * self.width_cells + i) as usize
    }

    /// Map a world-space point to its containing cell, clamped to grid
    /// bounds.
    pub fn cell_at(&self, p: Vec2) -> (u32, u32) {
        let i = (p.x / self.cell_size_m).floor().max(0.0) as u32;
        let j = (p.y / self.cell_size_m).floor().max(0.0) as u32;
        (
            i.min(self.width_cells.saturating_sub(1)),
            j.min(self.height_cells.saturating_sub(1)),
        )
    }

    /// Center of cell `(i, j)` in world coordinates.
    pub fn cell_center(&self, i: u32, j: u32) -> Vec2 {
        Vec2::new(
            (i as f32 + 0.5) * self.cell_size_m,
            (j as f32 + 0.5) * self.cell_size_m,
        )
    }

    pub fn in_bounds(&self, i: i64, j: i64) -> bool {
        i >= 0 && j >= 0 && (i as u32) < self.width_cells && (j as u32) < self.height_cells
    }

    pub fn walkable(&self, i: u32, j: u32) -> bool {
        self.walkable[self.linear_index(i, j)]
    }

    pub fn cost(&self, i: u32, j: u32) -> u16 {
        self.cost[self.linear_index(i, j)]
    }

    pub fn cell_id(&self, i: u32, j: u32) -> CellId {
        CellId(self.linear_index(i, j) as u32)
    }

    pub fn cell_coords(&self, id: CellId) -> (u32, u32) {
        let idx = id.index() as u32;
        (idx % self.width_cells, idx / self.width_cells)
    }

    /// Breadth-first search outward from `(i, j)` for the nearest walkable
    /// cell. Used when an agent gets pushed inside a fixture by avoidance
    /// and a path search needs a valid start cell.
    pub fn nearest_walkable(&self, i: u32, j: u32) -> Option<(u32, u32)> {
        if self.walkable(i, j) {
            return Some((i, j));
        }

        let mut visited = vec![false; self.walkable.len()];
        visited[self.linear_index(i, j)] = true;
        let mut frontier = std::collections::VecDeque::new();
        frontier.push_back((i as i64, j as i64));

        while let Some((ci, cj)) = frontier.pop_front() {
            for (di, dj) in [(-1, 0), (1, 0), (0, -1), (0, 1), (-1, -1), (-1, 1), (1, -1), (1, 1)] {
                let ni = ci + di;
                let nj = cj + dj;
                if !self.in_bounds(ni, nj) {
                    continue;
                }
                let (ni_u, nj_u) = (ni as u32, nj as u32);
                let idx = self.linear_index(ni_u, nj_u);
                if visited[idx] {
                    continue;
                }
                visited[idx] = true;
                if self.walkable(ni_u, nj_u) {
                    return Some((ni_u, nj_u));
                }
                frontier.push_back((ni, nj));
            }
        }
        None
    }
}

/// Build the walkability raster from a `Scene`. Pure function: same `Scene`
/// always produces the same `NavGrid`.
pub fn build_navgrid(scene: &Scene) -> NavGrid {
    build_navgrid_with_cell_size(scene, DEFAULT_CELL_SIZE_M)
}

pub fn build_navgrid_with_cell_size(scene: &Scene, cell_size_m: f32) -> NavGrid {
    let width_cells = (scene.width_m / cell_size_m).ceil().max(1.0) as u32;
    let height_cells = (scene.depth_m / cell_size_m).ceil().max(1.0) as u32;
    let cell_count = (width_cells * height_cells) as usize;

    let mut walkable = vec![true; cell_count];
    let mut cost = vec![1u16; cell_count];

    for j in 0..height_cells {
        for i in 0..width_cells {
            let idx = (j * width_cells + i) as usize;
            let center = Vec2::new((i as f32 + 0.5) * cell_size_m, (j as f32 + 0.5) * cell_size_m);
            if scene
                .obstacles
                .iter()
                .any(|o| o.contains_inflated(center, OBSTACLE_PADDING_M))
            {
                walkable[idx] = false;
            }
        }
    }

    // Elevate cost on the border ring of walkable cells adjacent to a
    // non-walkable neighbor, discouraging wall-hugging paths.
    for j in 0..height_cells {
        for i in 0..width_cells {
            let idx = (j * width_cells + i) as usize;
            if !walkable[idx] {
                continue;
            }
            let touches_wall = [(-1i64, 0i64), (1, 0), (0, -1), (0, 1)].iter().any(|&(di, dj)| {
                let ni = i as i64 + di;
                let nj = j as i64 + dj;
                if ni < 0 || nj < 0 || ni as u32 >= width_cells || nj as u32 >= height_cells {
                    return true;
                }
                !walkable[(nj as u32 * width_cells + ni as u32) as usize]
            });
            if touches_wall {
                cost[idx] += BORDER_COST_PENALTY;
            }
        }
    }

    NavGrid {
        cell_size_m,
        width_cells,
        height_cells,
        walkable,
        cost,
    }
}
