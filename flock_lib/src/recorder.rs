use std::{fs::OpenOptions, mem};

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::{flock::Flock, options::SaveOptions};

#[derive(Debug, Error)]
pub enum RecorderError {
    #[error("could not open sample file: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not write sample: {0}")]
    Csv(#[from] csv::Error),
}

/// One agent's state at one sampled step.
#[derive(Serialize, Debug, Clone, Copy)]
pub struct BoidSample {
    pub id: usize,
    pub x: f32,
    pub y: f32,
    pub heading: f32,
    pub step: u64,
}

/// Accumulates agent state over a run, decimated by `sample_rate`, for
/// offline analysis of flocking behaviour.
pub struct FlockRecorder {
    samples: Vec<BoidSample>,
    ticker: u64,
    sample_rate: u64,
}

const PREFIX: &str = "flock-data";

impl FlockRecorder {
    pub fn new(sample_rate: u64) -> Self {
        FlockRecorder {
            samples: Vec::new(),
            ticker: 0,
            sample_rate: sample_rate.max(1),
        }
    }

    /// Triggers data collection; every `sample_rate`-th call records the
    /// whole flock.
    pub fn watch(&mut self, flock: &Flock) {
        if !self.should_sample() {
            return;
        }

        let step = self.ticker / self.sample_rate;
        self.samples.extend(flock.view().iter().map(|b| BoidSample {
            id: b.id,
            x: b.position.x,
            y: b.position.y,
            heading: b.heading,
            step,
        }));
    }

    pub fn restart(&mut self) {
        self.samples.clear();
        self.ticker = 0;
    }

    pub fn pop_data(&mut self) -> Vec<BoidSample> {
        mem::take(&mut self.samples)
    }

    /// Drains the recorded samples, writing them out in CSV format first
    /// when the save options ask for it.
    ///
    /// Depending on the options, either overwrites the fixed-name file or
    /// writes a new timestamped one.
    pub fn pop_data_save(
        &mut self,
        save_options: &SaveOptions,
    ) -> Result<Vec<BoidSample>, RecorderError> {
        let data = self.pop_data();

        if !save_options.save_samples {
            return Ok(data);
        }

        if let Some(path) = &save_options.save_path {
            let file_path = format!(
                "{path}{file_name}",
                file_name = FlockRecorder::get_dataset_name(save_options, Utc::now())
            );

            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(file_path)?;
            let mut wtr = csv::Writer::from_writer(file);

            for sample in data.iter() {
                wtr.serialize(sample)?;
            }
            wtr.flush()?;
        }

        Ok(data)
    }

    fn get_dataset_name(save_options: &SaveOptions, now: DateTime<Utc>) -> String {
        match save_options.save_timestamp {
            true => format!(
                "{prefix}_{datetime}.csv",
                prefix = PREFIX,
                datetime = now.timestamp_millis()
            ),
            false => format!("{prefix}.csv", prefix = PREFIX),
        }
    }

    fn should_sample(&mut self) -> bool {
        self.ticker += 1;

        self.ticker % self.sample_rate == 0
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use chrono::Utc;

    use crate::flock::Flock;
    use crate::options::{SaveOptions, SimOptions, SpawnStrategy, TrackerType};
    use crate::recorder::FlockRecorder;

    #[test]
    fn test_name_timestamped() {
        let expected = "flock-data_1668038059490.csv";
        let save_options = SaveOptions {
            save_samples: true,
            save_path: Some("".to_owned()),
            save_timestamp: true,
        };
        let dt = Utc.timestamp_millis_opt(1_668_038_059_490).unwrap();
        let actual = FlockRecorder::get_dataset_name(&save_options, dt);

        assert_eq!(actual, expected)
    }

    #[test]
    fn test_name_overwrite() {
        let expected = "flock-data.csv";
        let save_options = SaveOptions {
            save_samples: true,
            save_path: Some("".to_owned()),
            save_timestamp: false,
        };
        let dt = Utc.timestamp_millis_opt(1_668_038_059_490).unwrap();
        let actual = FlockRecorder::get_dataset_name(&save_options, dt);

        assert_eq!(actual, expected)
    }

    #[test]
    fn watch_respects_sample_rate() {
        let run_options = SimOptions {
            population: 3,
            spawn: SpawnStrategy::Scatter,
            seed: Some(1),
            tracker_type: TrackerType::Naive,
            ..Default::default()
        };
        let flock = Flock::new(&run_options).unwrap();

        let mut recorder = FlockRecorder::new(4);
        for _ in 0..8 {
            recorder.watch(&flock);
        }

        // 8 ticks at a rate of 4 = 2 samples of 3 boids each
        let data = recorder.pop_data();
        assert_eq!(data.len(), 2 * run_options.population);
        assert_eq!(data[0].step, 1);
        assert_eq!(data[data.len() - 1].step, 2);
    }
}
