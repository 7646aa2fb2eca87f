use std::f32::consts::TAU;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::boid::Boid;
use crate::math_helpers::wrap_angle;
use crate::options::{ConfigError, SimOptions, SpawnStrategy, TrackerType};

use self::grid_tracker::GridTracker;
use self::naive_tracker::NaiveTracker;
use self::tracker::Tracker;

pub mod grid_tracker;
pub mod naive_tracker;
pub mod tracker;

/// The simulation: a fixed population of agents behind the tracker chosen
/// in the options.
///
/// One `update` call advances exactly one discrete step; the caller owns
/// wall-clock pacing and reads positions and headings back through
/// [`view`](Flock::view) for rendering.
pub struct Flock {
    tracker: Box<dyn Tracker>,
}

impl Flock {
    /// Validates the options and spawns the population: every agent starts
    /// at the configured spawn position with a random heading and the fixed
    /// per-agent speed.
    pub fn new(run_options: &SimOptions) -> Result<Self, ConfigError> {
        run_options.validate()?;

        Ok(Flock {
            tracker: make_tracker(spawn_boids(run_options), run_options),
        })
    }

    /// Advances every agent by one step. A no-op for an empty population.
    pub fn update(&mut self, run_options: &SimOptions) {
        self.tracker.update(run_options)
    }

    pub fn view(&self) -> &[Boid] {
        self.tracker.view()
    }

    pub fn get_neighbours<'a>(&'a self, boid: &Boid, run_options: &SimOptions) -> Vec<&'a Boid> {
        self.tracker.get_neighbours(boid, run_options)
    }

    /// Re-spawns the population from the options. With a fixed seed this
    /// reproduces the initial state exactly.
    pub fn restart(&mut self, run_options: &SimOptions) {
        self.tracker.restart(spawn_boids(run_options));
    }
}

fn make_tracker(boids: Vec<Boid>, run_options: &SimOptions) -> Box<dyn Tracker> {
    match run_options.tracker_type {
        TrackerType::SpatHash => Box::new(GridTracker::new(boids, run_options)),
        TrackerType::Naive => Box::new(NaiveTracker::new(boids, run_options)),
    }
}

fn spawn_boids(run_options: &SimOptions) -> Vec<Boid> {
    let mut rng = match run_options.seed {
        Some(seed) => Xoshiro256PlusPlus::seed_from_u64(seed),
        None => Xoshiro256PlusPlus::from_entropy(),
    };

    (0..run_options.population)
        .map(|id| {
            let position = match run_options.spawn {
                SpawnStrategy::Point { x, y } => Vec2::new(x, y),
                SpawnStrategy::Scatter => Vec2::new(
                    rng.gen_range(run_options.bounds.x.min..=run_options.bounds.x.max),
                    rng.gen_range(run_options.bounds.y.min..=run_options.bounds.y.max),
                ),
            };
            // heading uniform over the full circle, wrapped into (-π, π]
            let heading = wrap_angle(rng.gen::<f32>() * TAU);

            Boid::new(
                id,
                run_options.bounds.clamp(position),
                heading,
                run_options.speed,
            )
        })
        .collect()
}
