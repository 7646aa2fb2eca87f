use thiserror::Error;

use flock::Flock;
use options::SimOptions;
use recorder::{BoidSample, FlockRecorder};

pub mod boid;
pub mod flock;

pub mod math_helpers;
pub mod options;
pub mod recorder;

#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] options::ConfigError),

    #[error(transparent)]
    Recorder(#[from] recorder::RecorderError),
}

/// Runs the simulation without a renderer for `no_steps` discrete steps and
/// returns the recorded samples, saving them per the options first.
pub fn run_headless(no_steps: u64, run_options: SimOptions) -> Result<Vec<BoidSample>, RunError> {
    let ro = run_options;
    let mut flock = Flock::new(&ro)?;
    let mut recorder = FlockRecorder::new(ro.sample_rate);

    (0..no_steps).for_each(|_| {
        flock.update(&ro);
        recorder.watch(&flock);
    });

    let data = recorder.pop_data_save(&ro.save_options)?;

    Ok(data)
}
