//! Tombs of the Ancient Kings: a turn based roguelike in the libtcod tutorial tradition.
//!
//! The library holds the whole game: entities and world state, the save codec,
//! the per-frame turn loop and the main menu controller. Drawing and keyboard
//! decoding sit behind the `Frontend` trait; the libtcod window is available with
//! the `tcod-frontend` feature.

use std::path::PathBuf;

pub mod cli;
pub mod colors;
pub mod config;
pub mod fov;
pub mod frontend;
pub mod game;
pub mod headless;
pub mod input;
pub mod item;
pub mod magic;
pub mod map;
pub mod menu;
pub mod message;
pub mod monster;
pub mod monster_ai;
pub mod object;
pub mod save;
#[cfg(feature = "tcod-frontend")]
pub mod tcod_frontend;

pub use colors::Color;
pub use config::{Config, TurnOrder};
pub use fov::{Fov, SightMap};
pub use frontend::{Frame, Frontend};
pub use game::{initialize_fov, new_game, next_level, play_game, Context, Game, SessionEnd};
pub use headless::{RenderRecord, ScriptedFrontend, Step};
pub use input::{Input, Key, Mouse};
pub use map::{make_map, Map, Tile};
pub use menu::{main_menu, MenuState};
pub use message::Messages;
pub use object::{Object, PlayerAction};
pub use save::{load_game, remove_save, save_game, DecodeFailure, SaveError};

// player will always be first object in list
pub const PLAYER: usize = 0;

/// Top level error for everything outside the save codec.
#[derive(thiserror::Error, Debug)]
pub enum RogueError {
    #[error("could not read config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("frontend error: {0}")]
    Frontend(String),
}

pub type RogueResult<T> = Result<T, RogueError>;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
