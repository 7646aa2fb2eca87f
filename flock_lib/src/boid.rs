use glam::f32::Vec2;

use crate::{
    math_helpers::{angle_diff, unit_vec, wrap_angle},
    options::SimOptions,
};

/// One simulated agent. Velocity is derived from `heading` and `speed`,
/// never stored, so its magnitude cannot drift.
#[derive(Debug, Clone, Copy)]
pub struct Boid {
    // sequential id starting from 0
    pub id: usize,
    pub position: Vec2,
    /// direction of travel, radians in (-π, π]
    pub heading: f32,
    /// constant for the agent's lifetime
    pub speed: f32,
}

impl Boid {
    /// Creates a new [`Boid`].
    pub fn new(id: usize, position: Vec2, heading: f32, speed: f32) -> Self {
        Boid {
            id,
            position,
            heading: wrap_angle(heading),
            speed,
        }
    }

    #[inline]
    pub fn velocity(&self) -> Vec2 {
        unit_vec(self.heading) * self.speed
    }

    /// Sums the steering forces for this step. `neighbours` is everything
    /// strictly within `nearby_distance`, self excluded, read from the
    /// pre-step snapshot.
    pub fn run_rules(&self, neighbours: &[&Boid], run_options: &SimOptions) -> Vec2 {
        self.cohesion(neighbours, run_options)
            + self.alignment(neighbours, run_options)
            + self.separation(neighbours, run_options)
            + self.avoid_bounds(run_options)
    }

    /// Steer towards the average position of the local neighbourhood.
    pub fn cohesion(&self, neighbours: &[&Boid], run_options: &SimOptions) -> Vec2 {
        if neighbours.is_empty() {
            return Vec2::ZERO;
        }

        let mut center = Vec2::ZERO;
        for other in neighbours {
            center += other.position;
        }
        center /= neighbours.len() as f32;

        (center - self.position) * run_options.cohesion_coefficient
    }

    /// Steer towards the average velocity of the local neighbourhood.
    pub fn alignment(&self, neighbours: &[&Boid], run_options: &SimOptions) -> Vec2 {
        if neighbours.is_empty() {
            return Vec2::ZERO;
        }

        let mut avg = Vec2::ZERO;
        for other in neighbours {
            avg += other.velocity();
        }
        avg /= neighbours.len() as f32;

        (avg - self.velocity()) * run_options.alignment_coefficient
    }

    /// Steer away from neighbours strictly closer than
    /// `separation_distance`. A raw sum over offending neighbours, not an
    /// average: denser crowding produces a proportionally stronger push.
    pub fn separation(&self, neighbours: &[&Boid], run_options: &SimOptions) -> Vec2 {
        let threshold_sq = run_options.separation_distance.powi(2);

        let mut push = Vec2::ZERO;
        for other in neighbours {
            if self.position.distance_squared(other.position) < threshold_sq {
                push += self.position - other.position;
            }
        }

        push * run_options.separation_coefficient
    }

    /// Proportional push back towards the interior once within
    /// `nearby_distance` of an edge, zero beyond the margin. Axes are
    /// independent and their contributions sum.
    pub fn avoid_bounds(&self, run_options: &SimOptions) -> Vec2 {
        let margin = run_options.nearby_distance;
        let bounds = &run_options.bounds;

        let mut push = Vec2::ZERO;
        if self.position.x < bounds.x.min + margin {
            push.x = bounds.x.min + margin - self.position.x;
        } else if self.position.x > bounds.x.max - margin {
            push.x = bounds.x.max - margin - self.position.x;
        }

        if self.position.y < bounds.y.min + margin {
            push.y = bounds.y.min + margin - self.position.y;
        } else if self.position.y > bounds.y.max - margin {
            push.y = bounds.y.max - margin - self.position.y;
        }

        push * run_options.border_coefficient
    }

    /// Resolves the steering forces into the next heading. The desired
    /// velocity is the current one plus `steering`; its angle is chased
    /// under the turn-rate clamp. The clamp applies to the signed delta,
    /// wrapped into (-π, π], never to the absolute angle.
    ///
    /// A zero-magnitude desired velocity has no angle; the current heading
    /// is kept for this step.
    pub fn turn_towards(&self, steering: Vec2, run_options: &SimOptions) -> f32 {
        let desired = self.velocity() + steering;
        if desired.length_squared() == 0. {
            return self.heading;
        }

        let target = desired.y.atan2(desired.x);
        let turn = angle_diff(self.heading, target)
            .clamp(-run_options.max_turn_rate, run_options.max_turn_rate);

        wrap_angle(self.heading + turn)
    }

    /// Integrates one step under `new_heading` and returns the successor
    /// state; `self` is left untouched so that agents later in the pass
    /// still observe the pre-step snapshot.
    pub fn advance(&self, new_heading: f32, run_options: &SimOptions) -> Boid {
        let velocity = unit_vec(new_heading) * self.speed;
        let position = run_options
            .bounds
            .clamp(self.position + velocity * run_options.baseline_speed);

        Boid {
            id: self.id,
            position,
            heading: new_heading,
            speed: self.speed,
        }
    }
}
