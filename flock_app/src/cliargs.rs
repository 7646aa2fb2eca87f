use clap_serde_derive::{
    clap::{self, Parser},
    serde::Serialize,
    ClapSerde,
};

#[derive(Parser)]
#[derive(ClapSerde)]
#[command(version, about, long_about = None)]
/// Headless driver for the flocking simulation: runs the core for a number
/// of discrete steps and optionally writes the sampled agent data to CSV.
pub struct Args {
    /// Config file
    #[arg(short, long = "config", default_value = "config.toml")]
    pub config_path: std::path::PathBuf,

    /// Rest of arguments
    #[command(flatten)]
    pub config: <Config as ClapSerde>::Opt,
}

#[derive(ClapSerde, Serialize)]
/// Programatic configuration
///
/// Uses defaults, which can be overwritten by specifying a filepath for the `-c` or `--config` arg option
pub struct Config {
    #[default(1000)]
    #[arg(short = 'n', long)]
    /// number of boids
    pub no_boids: usize,

    #[default(600)]
    #[arg(long)]
    /// number of simulation steps to run
    pub steps: u64,

    #[default(1)]
    #[arg(short = 'r', long)]
    /// ratio of steps/sample_rate, e.g. 4 = sample every 4th step
    pub sample_rate: u64,

    #[default(true)]
    #[arg(short = 's', long)]
    pub save: bool,

    #[default(false)]
    #[arg(short = 't', long)]
    pub save_timestamp: bool,

    #[default(1280)]
    #[arg(short = 'x', long)]
    pub init_width: u32,

    #[default(720)]
    #[arg(short = 'y', long)]
    pub init_height: u32,

    #[default(300.)]
    #[arg(long = "near_dist")]
    pub nearby_distance: f32,

    #[default(50.)]
    #[arg(long = "sep_dist")]
    pub separation_distance: f32,

    #[default(0.0005)]
    #[arg(long = "coh_coef")]
    pub cohesion_coefficient: f32,
    #[default(0.05)]
    #[arg(long = "ali_coef")]
    pub alignment_coefficient: f32,
    #[default(0.05)]
    #[arg(long = "sep_coef")]
    pub separation_coefficient: f32,
    #[default(0.05)]
    #[arg(long = "border_coef")]
    pub border_coefficient: f32,

    #[default(1.)]
    #[arg(long)]
    pub speed: f32,
    #[default(5.)]
    #[arg(long)]
    pub baseline_speed: f32,
    #[default(0.1)]
    #[arg(long = "max_turn")]
    pub max_turn_rate: f32,

    #[default(false)]
    #[arg(long)]
    /// spawn scattered across the world instead of at the center point
    pub scatter: bool,

    #[default(false)]
    #[arg(long)]
    /// use the O(N^2) tracker instead of the spatial hash
    pub naive: bool,

    #[default(42)]
    #[arg(long)]
    /// seed for initial headings; equal seeds reproduce runs exactly
    pub seed: u64,
}
