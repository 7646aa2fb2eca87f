use std::collections::HashMap;

use glam::Vec2;
use itertools::Itertools;

use crate::{boid::Boid, options::SimOptions};

use super::tracker::Tracker;

/// Discrete grid cell coordinate, `(⌊x / cell_size⌋, ⌊y / cell_size⌋)`.
pub type CellCoord = (i32, i32);

/// Grid-bucketed spatial hash over the agent set.
///
/// Cells are square with side `cell_size`, equal to the neighbour radius,
/// which guarantees a 3×3 block of cells covers every agent within that
/// radius of a query point. Buckets hold indices into the flock's agent
/// vector and are rebuilt from scratch every step, so entries can never go
/// stale; the allocation of previously used buckets is reused.
pub struct SpatialIndex {
    cell_size: f32,
    cells: HashMap<CellCoord, Vec<usize>>,
}

impl SpatialIndex {
    pub fn new(cell_size: f32) -> Self {
        SpatialIndex {
            cell_size,
            cells: HashMap::new(),
        }
    }

    #[inline]
    pub fn cell_of(&self, position: Vec2) -> CellCoord {
        (
            (position.x / self.cell_size).floor() as i32,
            (position.y / self.cell_size).floor() as i32,
        )
    }

    /// Discards all previous contents and buckets every agent by its
    /// current position. O(n) total; afterwards every agent index sits in
    /// exactly one bucket.
    pub fn rebuild(&mut self, boids: &[Boid]) {
        for bucket in self.cells.values_mut() {
            bucket.clear();
        }

        for (index, boid) in boids.iter().enumerate() {
            let cell = self.cell_of(boid.position);
            self.cells.entry(cell).or_default().push(index);
        }
    }

    /// Collects references to all agents strictly within `radius` of
    /// `boid`, excluding the agent itself, into `neighbours`. The buffer is
    /// appended to, not cleared, so callers can reuse it across queries.
    ///
    /// Candidates come from the 3×3 block of cells centered on the agent's
    /// cell; cells at the block's rim contribute candidates beyond `radius`
    /// which the exact distance check then drops. Correct for any
    /// `radius <= cell_size`.
    pub fn neighbours_into<'a>(
        &self,
        boid: &Boid,
        boids: &'a [Boid],
        radius: f32,
        neighbours: &mut Vec<&'a Boid>,
    ) {
        debug_assert!(radius <= self.cell_size);

        let (cell_x, cell_y) = self.cell_of(boid.position);
        let radius_sq = radius * radius;

        for (dx, dy) in (-1i32..=1).cartesian_product(-1i32..=1) {
            if let Some(bucket) = self.cells.get(&(cell_x + dx, cell_y + dy)) {
                for &index in bucket {
                    let other = &boids[index];
                    if other.id != boid.id
                        && boid.position.distance_squared(other.position) < radius_sq
                    {
                        neighbours.push(other);
                    }
                }
            }
        }
    }
}

/// The default tracker: spatial-hash accelerated neighbour search,
/// amortized near-linear per step. Degrades towards O(N^2) only when the
/// whole population crowds into a single cell.
pub struct GridTracker {
    boids: Vec<Boid>,
    index: SpatialIndex,
}

impl Tracker for GridTracker {
    fn new(entities: Vec<Boid>, run_options: &SimOptions) -> Self {
        let mut index = SpatialIndex::new(run_options.nearby_distance);
        index.rebuild(&entities);

        GridTracker {
            boids: entities,
            index,
        }
    }

    fn update(&mut self, run_options: &SimOptions) {
        // capture the pre-step positions; the index stays immutable for the
        // whole force-computation phase
        self.index.rebuild(&self.boids);

        let next: Vec<Boid> = {
            let mut neighbours: Vec<&Boid> = Vec::with_capacity(32);

            self.boids
                .iter()
                .map(|boid| {
                    neighbours.clear();
                    self.index.neighbours_into(
                        boid,
                        &self.boids,
                        run_options.nearby_distance,
                        &mut neighbours,
                    );

                    let steering = boid.run_rules(&neighbours, run_options);
                    let heading = boid.turn_towards(steering, run_options);
                    boid.advance(heading, run_options)
                })
                .collect()
        };

        self.boids = next;
    }

    fn view(&self) -> &[Boid] {
        &self.boids
    }

    /// Answers from the index as of its most recent rebuild (construction
    /// or the start of the latest step); distances are checked against
    /// current positions.
    fn get_neighbours<'a>(&'a self, boid: &Boid, run_options: &SimOptions) -> Vec<&'a Boid> {
        let mut neighbours = Vec::new();
        self.index.neighbours_into(
            boid,
            &self.boids,
            run_options.nearby_distance,
            &mut neighbours,
        );

        neighbours
    }

    fn restart(&mut self, entities: Vec<Boid>) {
        self.index.rebuild(&entities);
        self.boids = entities;
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::SpatialIndex;
    use crate::boid::Boid;

    fn boid_at(id: usize, x: f32, y: f32) -> Boid {
        Boid::new(id, Vec2::new(x, y), 0., 1.)
    }

    #[test]
    fn rebuild_buckets_every_boid_exactly_once() {
        let boids: Vec<Boid> = (0..40)
            .map(|id| boid_at(id, id as f32 * 17.3, (40 - id) as f32 * 11.9))
            .collect();

        let mut index = SpatialIndex::new(50.);
        index.rebuild(&boids);

        let mut seen = vec![0usize; boids.len()];
        for (cell, bucket) in index.cells.iter() {
            for &i in bucket {
                seen[i] += 1;
                assert_eq!(index.cell_of(boids[i].position), *cell);
            }
        }

        assert!(seen.iter().all(|&count| count == 1));
    }

    #[test]
    fn rebuild_discards_previous_contents() {
        let mut index = SpatialIndex::new(50.);
        index.rebuild(&[boid_at(0, 10., 10.), boid_at(1, 210., 10.)]);

        // both boids moved into one cell; the old buckets must not linger
        let moved = [boid_at(0, 60., 10.), boid_at(1, 70., 10.)];
        index.rebuild(&moved);

        let occupied: usize = index.cells.values().map(|bucket| bucket.len()).sum();
        assert_eq!(occupied, 2);
        assert_eq!(index.cells.get(&(1, 0)).map(|b| b.len()), Some(2));
    }

    #[test]
    fn query_spans_cell_borders() {
        // neighbours straddle a cell boundary at x = 50
        let boids = [boid_at(0, 49., 25.), boid_at(1, 52., 25.)];

        let mut index = SpatialIndex::new(50.);
        index.rebuild(&boids);

        let mut neighbours = Vec::new();
        index.neighbours_into(&boids[0], &boids, 50., &mut neighbours);

        assert_eq!(neighbours.len(), 1);
        assert_eq!(neighbours[0].id, 1);
    }

    #[test]
    fn query_excludes_self_and_respects_strict_radius() {
        let radius = 50.;
        let boids = [
            boid_at(0, 100., 100.),
            // exactly on the radius: excluded, the check is strict
            boid_at(1, 100. + radius, 100.),
            boid_at(2, 100. + radius - 0.5, 100.),
        ];

        let mut index = SpatialIndex::new(radius);
        index.rebuild(&boids);

        let mut neighbours = Vec::new();
        index.neighbours_into(&boids[0], &boids, radius, &mut neighbours);

        let ids: Vec<usize> = neighbours.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn rim_candidates_are_filtered_by_distance() {
        // same 3×3 block, but diagonal distance is well beyond the radius
        let boids = [boid_at(0, 10., 10.), boid_at(1, 140., 140.)];

        let mut index = SpatialIndex::new(100.);
        index.rebuild(&boids);

        let mut neighbours = Vec::new();
        index.neighbours_into(&boids[0], &boids, 100., &mut neighbours);

        assert!(neighbours.is_empty());
    }

    #[test]
    fn negative_coordinates_bucket_cleanly() {
        let boids = [boid_at(0, -10., -10.), boid_at(1, 10., 10.)];

        let mut index = SpatialIndex::new(100.);
        index.rebuild(&boids);

        assert_eq!(index.cell_of(boids[0].position), (-1, -1));

        let mut neighbours = Vec::new();
        index.neighbours_into(&boids[0], &boids, 100., &mut neighbours);
        assert_eq!(neighbours.len(), 1);
    }
}
