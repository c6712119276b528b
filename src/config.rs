use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::item::MAX_INVENTORY_SIZE;
use crate::{RogueError, RogueResult};

// order monsters take their turns in after the player acts
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum TurnOrder {
    // position in the object list
    #[default]
    Sequence,
    // closest to the player first, ties broken by list position
    NearestFirst,
}

/// Tunable settings for one run of the game.
///
/// Every field has a default, so a config file only needs the keys it changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub screen_width: i32,
    pub screen_height: i32,
    pub map_width: i32,
    pub map_height: i32,
    pub room_max_size: i32,
    pub room_min_size: i32,
    pub max_rooms: i32,
    pub torch_radius: i32,
    pub fov_light_walls: bool,
    pub max_inventory_size: usize,
    pub limit_fps: i32,
    pub save_path: PathBuf,
    pub font_path: PathBuf,
    pub menu_background: Option<PathBuf>,
    pub turn_order: TurnOrder,
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            screen_width: 80,
            screen_height: 50,
            map_width: 80,
            map_height: 43,
            room_max_size: 10,
            room_min_size: 6,
            max_rooms: 30,
            torch_radius: 10,
            fov_light_walls: true,
            max_inventory_size: MAX_INVENTORY_SIZE,
            limit_fps: 20,
            save_path: PathBuf::from("savegame"),
            font_path: PathBuf::from("arial10x10.png"),
            menu_background: Some(PathBuf::from("menu_background.png")),
            turn_order: TurnOrder::Sequence,
            seed: None,
        }
    }
}

impl Config {
    // read a json config file, missing keys fall back to defaults
    pub fn from_file(path: &Path) -> RogueResult<Self> {
        let text = fs::read_to_string(path).map_err(|e| RogueError::Config {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;
        let config: Config = serde_json::from_str(&text).map_err(|e| RogueError::Config {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;
        config.check().map_err(|reason| RogueError::Config {
            path: path.to_path_buf(),
            source: reason.into(),
        })?;
        Ok(config)
    }

    // sanity checks on values the map generator and menus depend on
    pub fn check(&self) -> Result<(), String> {
        if self.room_min_size < 3 || self.room_min_size > self.room_max_size {
            return Err(format!(
                "room sizes must satisfy 3 <= min ({}) <= max ({})",
                self.room_min_size, self.room_max_size
            ));
        }
        if self.map_width <= self.room_max_size || self.map_height <= self.room_max_size {
            return Err(format!(
                "map {}x{} is too small for rooms of size {}",
                self.map_width, self.map_height, self.room_max_size
            ));
        }
        if self.max_rooms < 1 {
            return Err("max_rooms must be at least 1".into());
        }
        if self.max_inventory_size == 0 || self.max_inventory_size > MAX_INVENTORY_SIZE {
            return Err(format!(
                "max_inventory_size must be between 1 and {}, got {}",
                MAX_INVENTORY_SIZE, self.max_inventory_size
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(Config::default().check().is_ok());
    }

    #[test]
    fn partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tombs.json");
        fs::write(&path, r#"{ "torch_radius": 4, "turn_order": "nearest-first" }"#).unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.torch_radius, 4);
        assert_eq!(config.turn_order, TurnOrder::NearestFirst);
        assert_eq!(config.map_width, Config::default().map_width);
    }

    #[test]
    fn rejects_oversized_inventory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tombs.json");
        fs::write(&path, r#"{ "max_inventory_size": 40 }"#).unwrap();

        match Config::from_file(&path) {
            Err(RogueError::Config { .. }) => {}
            other => panic!("expected config error, got {:?}", other),
        }
    }
}
