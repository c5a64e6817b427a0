use anyhow::Result;
use clap::Parser;
use std::{path::PathBuf, time::Duration};
use stride::{
    eval::{evaluate, EvalConfig},
    ShaperChoice, Terrain, TrainPreset,
};

/// Replays a trained walker
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Serialized actor network
    #[arg(short, long, default_value = "models/best/mlp.bincode")]
    model: PathBuf,

    /// Terrain: flat or hardcore
    #[arg(short, long, default_value = "flat")]
    terrain: Terrain,

    /// Reward shaper: none, simple or gait
    #[arg(short, long, default_value = "none")]
    shaper: ShaperChoice,

    /// Takes terrain and shaper from a preset YAML file instead
    #[arg(long)]
    preset: Option<PathBuf>,

    /// Number of episodes
    #[arg(short, long, default_value_t = 5)]
    n_episodes: usize,

    /// Runs without a window
    #[arg(long, default_value_t = false)]
    no_render: bool,

    /// Wait time at every step in milliseconds while rendering
    #[arg(long, default_value_t = 0)]
    wait: u64,

    /// Writes every step to this CSV file
    #[arg(long)]
    trace: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let (terrain, shaper) = match args.preset.as_ref() {
        Some(path) => {
            let preset = TrainPreset::load(path)?;
            (preset.terrain, preset.shaper)
        }
        None => (args.terrain, args.shaper.into()),
    };

    let config = EvalConfig {
        model_path: args.model,
        terrain,
        shaper,
        n_episodes: args.n_episodes,
        render: !args.no_render,
        wait: Duration::from_millis(args.wait),
        trace_path: args.trace,
    };
    evaluate(&config)?;

    Ok(())
}
