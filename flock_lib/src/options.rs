use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejected configuration, reported once at initialization. A running
/// simulation never re-validates its options per step.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("degenerate bounds on the {axis} axis: min {min} must be below max {max}")]
    DegenerateBounds { axis: char, min: f32, max: f32 },

    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },

    #[error("{name} must not be negative, got {value}")]
    Negative { name: &'static str, value: f32 },
}

#[derive(Debug, PartialEq, Copy, Clone, Serialize, Deserialize)]
pub struct AxisRange {
    pub min: f32,
    pub max: f32,
}

impl AxisRange {
    pub fn new(min: f32, max: f32) -> Self {
        AxisRange { min, max }
    }

    pub fn span(&self) -> f32 {
        self.max - self.min
    }
}

/// The rectangle agents are confined to. Owned by the caller and passed in
/// through [`SimOptions`], never read from global or environment state.
#[derive(Debug, PartialEq, Copy, Clone, Serialize, Deserialize)]
pub struct Bounds {
    pub x: AxisRange,
    pub y: AxisRange,
}

impl Bounds {
    pub fn new(x: AxisRange, y: AxisRange) -> Self {
        Bounds { x, y }
    }

    /// Bounds for a `width` × `height` viewport anchored at the origin.
    pub fn from_viewport(width: f32, height: f32) -> Self {
        Bounds {
            x: AxisRange::new(0., width),
            y: AxisRange::new(0., height),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.x.max <= self.x.min {
            return Err(ConfigError::DegenerateBounds {
                axis: 'x',
                min: self.x.min,
                max: self.x.max,
            });
        }
        if self.y.max <= self.y.min {
            return Err(ConfigError::DegenerateBounds {
                axis: 'y',
                min: self.y.min,
                max: self.y.max,
            });
        }
        Ok(())
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x.min && p.x <= self.x.max && p.y >= self.y.min && p.y <= self.y.max
    }

    /// Hard clamp into the rectangle. Position is truncated, nothing else;
    /// an agent pinned at a wall keeps its heading and pushes away through
    /// the border-avoidance force on the following step.
    pub fn clamp(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            p.x.clamp(self.x.min, self.x.max),
            p.y.clamp(self.y.min, self.y.max),
        )
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.x.min + self.x.max) / 2.,
            (self.y.min + self.y.max) / 2.,
        )
    }
}

/// Where the flock starts out.
#[derive(Debug, PartialEq, Copy, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
// {"type": "Point", "x": 640, "y": 360}
pub enum SpawnStrategy {
    /// Every agent spawns at one point (headings still differ).
    Point { x: f32, y: f32 },
    /// Agents spawn uniformly at random within bounds.
    Scatter,
}

#[derive(Debug, PartialEq, Copy, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TrackerType {
    /// Grid-bucketed spatial hash, amortized near-linear neighbour search.
    SpatHash,
    /// O(N^2) scan. Reference implementation and benchmark baseline.
    Naive,
}

#[derive(Debug, Clone)]
pub struct SaveOptions {
    pub save_samples: bool,
    pub save_path: Option<String>,
    pub save_timestamp: bool,
}

/// All tunable parameters of the simulation, with the defaults of the
/// original canvas implementation.
#[derive(Debug, Clone)]
pub struct SimOptions {
    /// number of agents, fixed for the simulation's lifetime
    pub population: usize,
    pub spawn: SpawnStrategy,

    /// per-agent velocity magnitude; headings change, this never does
    pub speed: f32,
    /// world-space travel multiplier applied uniformly during integration,
    /// separate from the per-agent `speed`
    pub baseline_speed: f32,
    /// radians per step the heading may change by, clamp on the delta
    pub max_turn_rate: f32,

    /// distance defining "nearby"; doubles as the grid cell size and the
    /// border-avoidance margin
    pub nearby_distance: f32,
    /// distance below which repulsion activates
    pub separation_distance: f32,

    pub cohesion_coefficient: f32,
    pub alignment_coefficient: f32,
    pub separation_coefficient: f32,
    pub border_coefficient: f32,

    /// rendering hints only, no effect on physics
    pub boid_length: f32,
    pub boid_width: f32,

    pub bounds: Bounds,
    pub tracker_type: TrackerType,

    /// seed for initial headings and scatter positions; `None` seeds from
    /// entropy, any `Some` makes runs reproducible
    pub seed: Option<u64>,

    pub sample_rate: u64,
    pub save_options: SaveOptions,
}

impl SimOptions {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bounds.validate()?;

        for (name, value) in [
            ("nearby_distance", self.nearby_distance),
            ("max_turn_rate", self.max_turn_rate),
            ("baseline_speed", self.baseline_speed),
        ] {
            if value <= 0. {
                return Err(ConfigError::NonPositive { name, value });
            }
        }

        for (name, value) in [
            ("speed", self.speed),
            ("separation_distance", self.separation_distance),
        ] {
            if value < 0. {
                return Err(ConfigError::Negative { name, value });
            }
        }

        Ok(())
    }
}

impl Default for SimOptions {
    fn default() -> Self {
        let bounds = Bounds::from_viewport(1280., 720.);
        let center = bounds.center();

        SimOptions {
            population: 1000,
            spawn: SpawnStrategy::Point {
                x: center.x,
                y: center.y,
            },
            speed: 1.,
            baseline_speed: 5.,
            max_turn_rate: 0.1,
            nearby_distance: 300.,
            separation_distance: 50.,
            cohesion_coefficient: 0.0005,
            alignment_coefficient: 0.05,
            separation_coefficient: 0.05,
            border_coefficient: 0.05,
            boid_length: 10.,
            boid_width: 10.,
            bounds,
            tracker_type: TrackerType::SpatHash,
            seed: None,
            sample_rate: 1,
            save_options: SaveOptions {
                save_samples: false,
                save_path: Some("./".to_owned()),
                save_timestamp: true,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;
    use rstest::rstest;

    use super::{AxisRange, Bounds, ConfigError, SimOptions};

    #[test]
    fn default_options_are_valid() {
        assert_eq!(SimOptions::default().validate(), Ok(()));
    }

    #[rstest]
    #[case(AxisRange::new(0., 0.), AxisRange::new(0., 720.), 'x')]
    #[case(AxisRange::new(100., 50.), AxisRange::new(0., 720.), 'x')]
    #[case(AxisRange::new(0., 1280.), AxisRange::new(3., 3.), 'y')]
    #[case(AxisRange::new(0., 1280.), AxisRange::new(1., -1.), 'y')]
    fn degenerate_bounds_are_rejected(
        #[case] x: AxisRange,
        #[case] y: AxisRange,
        #[case] axis: char,
    ) {
        let options = SimOptions {
            bounds: Bounds::new(x, y),
            ..Default::default()
        };

        match options.validate() {
            Err(ConfigError::DegenerateBounds { axis: a, .. }) => assert_eq!(a, axis),
            other => panic!("expected degenerate bounds error, got {:?}", other),
        }
    }

    #[rstest]
    #[case(SimOptions { nearby_distance: 0., ..Default::default() })]
    #[case(SimOptions { nearby_distance: -30., ..Default::default() })]
    #[case(SimOptions { max_turn_rate: 0., ..Default::default() })]
    #[case(SimOptions { baseline_speed: -1., ..Default::default() })]
    #[case(SimOptions { speed: -0.1, ..Default::default() })]
    #[case(SimOptions { separation_distance: -50., ..Default::default() })]
    fn non_positive_scalars_are_rejected(#[case] options: SimOptions) {
        assert!(options.validate().is_err());
    }

    #[test]
    fn clamp_truncates_into_bounds() {
        let bounds = Bounds::from_viewport(100., 50.);

        assert_eq!(bounds.clamp(Vec2::new(-3., 20.)), Vec2::new(0., 20.));
        assert_eq!(bounds.clamp(Vec2::new(120., 60.)), Vec2::new(100., 50.));
        assert!(bounds.contains(bounds.clamp(Vec2::new(1e6, -1e6))));
    }
}
