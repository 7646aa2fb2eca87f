use std::fs;

use clap_serde_derive::{clap::Parser, ClapSerde};

use flock_lib::options::{Bounds, SaveOptions, SimOptions, SpawnStrategy, TrackerType};
use flock_lib::run_headless;

mod cliargs;
use cliargs::{Args, Config};

type ConfigOpt = <Config as ClapSerde>::Opt;

fn main() {
    // Parse whole args with clap
    let mut args = Args::parse();

    // Get config file
    let config = if let Ok(contents) = fs::read_to_string(&args.config_path) {
        // Parse config with serde
        match toml::from_str::<ConfigOpt>(&contents) {
            // merge config already parsed from clap
            Ok(file_config) => Config::from(file_config).merge(&mut args.config),
            Err(err) => panic!("Error in configuration file:\n{}", err),
        }
    } else {
        // If there is no config file return only config parsed from clap
        Config::from(&mut args.config)
    };

    let run_options = to_run_options(&config);

    match run_headless(config.steps, run_options) {
        Ok(data) => println!(
            "simulated {} boids for {} steps, collected {} samples",
            config.no_boids,
            config.steps,
            data.len()
        ),
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}

fn to_run_options(config: &Config) -> SimOptions {
    let bounds = Bounds::from_viewport(config.init_width as f32, config.init_height as f32);
    let center = bounds.center();

    let mut run_options = SimOptions::default();

    run_options.population = config.no_boids;
    run_options.sample_rate = config.sample_rate;
    run_options.save_options = SaveOptions {
        save_samples: config.save,
        save_path: Some("./".to_owned()),
        save_timestamp: config.save_timestamp,
    };

    run_options.bounds = bounds;
    run_options.spawn = if config.scatter {
        SpawnStrategy::Scatter
    } else {
        SpawnStrategy::Point {
            x: center.x,
            y: center.y,
        }
    };

    run_options.nearby_distance = config.nearby_distance;
    run_options.separation_distance = config.separation_distance;
    run_options.cohesion_coefficient = config.cohesion_coefficient;
    run_options.alignment_coefficient = config.alignment_coefficient;
    run_options.separation_coefficient = config.separation_coefficient;
    run_options.border_coefficient = config.border_coefficient;
    run_options.speed = config.speed;
    run_options.baseline_speed = config.baseline_speed;
    run_options.max_turn_rate = config.max_turn_rate;

    run_options.tracker_type = if config.naive {
        TrackerType::Naive
    } else {
        TrackerType::SpatHash
    };
    run_options.seed = Some(config.seed);

    run_options
}
