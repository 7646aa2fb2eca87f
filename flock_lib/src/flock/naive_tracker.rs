use crate::{boid::Boid, options::SimOptions};

use super::tracker::Tracker;

/// O(N^2) neighbour search over the whole agent set. Kept as the reference
/// implementation the spatial hash is validated against, and as the
/// benchmark baseline; produces the same neighbour sets for any layout.
pub struct NaiveTracker {
    boids: Vec<Boid>,
}

impl NaiveTracker {
    pub fn get_neighbours_naive<'a>(
        boid: &Boid,
        all_boids: &'a [Boid],
        run_options: &SimOptions,
        neighbours: &mut Vec<&'a Boid>,
    ) {
        let radius_sq = run_options.nearby_distance.powi(2);

        for b_other in all_boids.iter() {
            if b_other.id == boid.id {
                continue;
            }

            if boid.position.distance_squared(b_other.position) < radius_sq {
                neighbours.push(b_other);
            }
        }
    }
}

impl Tracker for NaiveTracker {
    fn new(entities: Vec<Boid>, _: &SimOptions) -> Self {
        NaiveTracker { boids: entities }
    }

    fn update(&mut self, run_options: &SimOptions) {
        let next: Vec<Boid> = {
            let mut neighbours: Vec<&Boid> = Vec::new();

            self.boids
                .iter()
                .map(|boid| {
                    neighbours.clear();
                    NaiveTracker::get_neighbours_naive(
                        boid,
                        &self.boids,
                        run_options,
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

    fn get_neighbours<'a>(&'a self, boid: &Boid, run_options: &SimOptions) -> Vec<&'a Boid> {
        let mut neighbours = Vec::new();
        NaiveTracker::get_neighbours_naive(boid, &self.boids, run_options, &mut neighbours);

        neighbours
    }

    fn restart(&mut self, entities: Vec<Boid>) {
        self.boids = entities;
    }
}
