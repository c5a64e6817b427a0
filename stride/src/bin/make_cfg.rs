use anyhow::Result;
use clap::Parser;
use log::info;
use std::{fs, path::Path};
use stride::{presets::PRESET_NAMES, TrainPreset};

/// Writes the training presets as YAML files
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Output directory
    #[arg(short, long, default_value = "configs")]
    out_dir: String,

    /// Writes only this preset
    #[arg(short, long)]
    preset: Option<String>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let names: Vec<&str> = match args.preset.as_deref() {
        Some(name) => vec![name],
        None => PRESET_NAMES.to_vec(),
    };

    fs::create_dir_all(&args.out_dir)?;
    for name in names {
        let preset = TrainPreset::by_name(name)?;
        let path = Path::new(&args.out_dir).join(format!("{}.yaml", name));
        preset.save(&path)?;
        info!("Wrote {:?}", path);
    }

    Ok(())
}
