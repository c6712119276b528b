use std::path::PathBuf;

use clap::Parser;

use crate::config::{Config, TurnOrder};
use crate::RogueResult;

/// Command line arguments for the game.
#[derive(Parser, Debug)]
#[command(name = "tombs")]
#[command(about = "Tombs of the Ancient Kings, a libtcod roguelike")]
#[command(version)]
pub struct Args {
    /// JSON config file, keys not given keep their defaults
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Save file location
    #[arg(long)]
    pub save: Option<PathBuf>,

    /// Random seed for dungeon generation and monster behavior
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Bitmap font for the console window
    #[arg(long)]
    pub font: Option<PathBuf>,

    /// Order monsters act in after the player
    #[arg(long, value_enum)]
    pub turn_order: Option<TurnOrder>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    // config file (or defaults) with command line values on top
    pub fn into_config(self) -> RogueResult<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };
        if let Some(save) = self.save {
            config.save_path = save;
        }
        if let Some(font) = self.font {
            config.font_path = font;
        }
        if let Some(order) = self.turn_order {
            config.turn_order = order;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        Ok(config)
    }
}

// RUST_LOG wins over the --log-level flag when set
pub fn init_logging(log_level: &str) {
    let env = env_logger::Env::default().default_filter_or(log_level);
    // a second init (tests) is not an error worth reporting
    let _ = env_logger::Builder::from_env(env)
        .format_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let args = Args::try_parse_from([
            "tombs",
            "--save",
            "slot1.json",
            "--seed",
            "7",
            "--turn-order",
            "nearest-first",
        ])
        .unwrap();
        let config = args.into_config().unwrap();

        assert_eq!(config.save_path, PathBuf::from("slot1.json"));
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.turn_order, TurnOrder::NearestFirst);
        assert_eq!(config.torch_radius, Config::default().torch_radius);
    }

    #[test]
    fn log_level_defaults_to_info() {
        let args = Args::try_parse_from(["tombs"]).unwrap();
        assert_eq!(args.log_level, "info");
        assert!(args.config.is_none());
    }
}
