use log::{debug, error, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::colors::*;
use crate::config::Config;
use crate::fov::{Fov, SightMap};
use crate::frontend::{Frame, Frontend};
use crate::headless::ScriptedFrontend;
use crate::input::{handle_keys, Event, Input, Key};
use crate::item::{Equipment, Item, Slot, MAX_INVENTORY_SIZE};
use crate::map::{make_map, wall_map, Map};
use crate::menu::menu;
use crate::message::Messages;
use crate::monster_ai::monsters_take_turn;
use crate::object::{level_up, Object, PlayerAction};
use crate::save::{remove_save, save_game};
use crate::PLAYER;

const SAVE_FAILED_WIDTH: i32 = 50;

/// Everything the core needs from the outside world for one run of the game.
///
/// Replaces a process wide window: the frontend, the field of view, the input of
/// the current frame and the random generator are passed explicitly to every
/// function that needs them.
pub struct Context {
    pub frontend: Box<dyn Frontend>,
    pub fov: Box<dyn Fov>,
    pub input: Input,
    pub rng: StdRng,
    pub config: Config,
    // set when the fov was rebuilt from a new map and not computed yet
    pub fov_stale: bool,
}

impl Context {
    pub fn new(frontend: Box<dyn Frontend>, fov: Box<dyn Fov>, config: Config) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        info!("random seed {}", seed);
        Context {
            frontend,
            fov,
            input: Input::default(),
            rng: StdRng::seed_from_u64(seed),
            config,
            fov_stale: true,
        }
    }

    // scripted window with the built in sight map
    pub fn headless(frontend: ScriptedFrontend, config: Config) -> Self {
        let fov = SightMap::new(config.map_width, config.map_height);
        Context::new(Box::new(frontend), Box::new(fov), config)
    }

    // take at most one event from the frontend, no event means no key this frame
    pub fn poll_input(&mut self) {
        // button presses only last for the frame they happen in
        self.input.mouse.lbutton_pressed = false;
        self.input.mouse.rbutton_pressed = false;
        match self.frontend.poll() {
            Some(Event::Key(key)) => self.input.key = key,
            Some(Event::Mouse(mouse)) => {
                self.input.mouse = mouse;
                self.input.key = Key::None;
            }
            None => self.input.key = Key::None,
        }
    }

    pub fn render(&mut self, game: &Game, objects: &[Object], fov_recompute: bool) {
        let frame = Frame {
            game,
            objects,
            fov: &*self.fov,
            mouse: self.input.mouse,
            fov_recompute,
        };
        self.frontend.render(&frame);
    }
}

/// State of one game in progress, saved together with the object list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub map: Map,
    pub messages: Messages,
    pub inventory: Vec<Object>,
    pub dungeon_level: u32,
}

impl Game {
    // all walls, nothing carried, first level
    pub fn new(config: &Config) -> Self {
        Game {
            map: wall_map(config.map_width, config.map_height),
            messages: Messages::new(),
            inventory: vec![],
            dungeon_level: 1,
        }
    }

    // checks a decoded game can be played, the reason is returned otherwise
    pub fn validate(&self, objects: &[Object]) -> Result<(), String> {
        let width = self.map.len();
        let height = self.map.first().map_or(0, |column| column.len());
        if width == 0 || height == 0 {
            return Err("map is empty".into());
        }
        if let Some(x) = self.map.iter().position(|column| column.len() != height) {
            return Err(format!("map column {} is not {} tiles high", x, height));
        }
        if self.inventory.len() > MAX_INVENTORY_SIZE {
            return Err(format!(
                "inventory holds {} items, at most {} allowed",
                self.inventory.len(),
                MAX_INVENTORY_SIZE
            ));
        }
        if self.dungeon_level == 0 {
            return Err("dungeon level must start at 1".into());
        }
        match objects.get(PLAYER) {
            Some(player) if player.is_player() => {
                // a session never resumes as a corpse
                let living = player.alive && player.fighter.map_or(false, |f| f.hp > 0);
                if !living {
                    return Err(format!("{} is dead", player.name));
                }
            }
            Some(other) => return Err(format!("first object is {}, not the player", other.name)),
            None => return Err("object list is empty".into()),
        }
        let outside = objects
            .iter()
            .find(|o| o.x < 0 || o.y < 0 || o.x as usize >= width || o.y as usize >= height);
        if let Some(object) = outside {
            return Err(format!("{} at ({}, {}) is outside the map", object.name, object.x, object.y));
        }
        Ok(())
    }
}

/// How a call to `play_game` ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEnd {
    // player left and the game was written to the save file
    Saved,
    // player left after a failed save and chose not to retry
    Abandoned,
    // player left dead, the save file is gone
    Died,
    // window closed from outside, nothing saved
    WindowClosed,
}

pub fn new_game(ctx: &mut Context) -> (Game, Vec<Object>) {
    let mut objects = vec![Object::player()];
    let mut game = Game::new(&ctx.config);
    game.map = make_map(&mut objects, 1, &ctx.config, &mut ctx.rng);

    // initial equipment: a dagger
    let mut dagger = Object::new(0, 0, '-', "dagger", CYAN, false);
    dagger.item = Some(Item::Sword);
    dagger.equipment = Some(Equipment {
        equipped: true,
        slot: Slot::LeftHand,
        max_hp_bonus: 0,
        power_bonus: 2,
        defense_bonus: 0,
    });
    game.inventory.push(dagger);

    initialize_fov(ctx, &game.map);

    game.messages.add(
        "Welcome stranger! Prepare to perish in the Tombs of the Ancient Kings!",
        RED,
    );
    info!("new game with {} objects", objects.len());
    (game, objects)
}

// rebuild the fov from a new or loaded map, the turn loop computes it before the next render
pub fn initialize_fov(ctx: &mut Context, map: &Map) {
    let width = map.len() as i32;
    let height = map.first().map_or(0, |column| column.len() as i32);
    ctx.fov.reset(width, height);
    for (x, column) in map.iter().enumerate() {
        for (y, tile) in column.iter().enumerate() {
            // the fov wants the opposite of what tiles store
            ctx.fov.set(x as i32, y as i32, !tile.block_sight, !tile.blocked);
        }
    }
    ctx.fov_stale = true;
}

fn recompute_fov(ctx: &mut Context, game: &mut Game, objects: &[Object]) {
    let (x, y) = objects[PLAYER].pos();
    ctx.fov
        .compute_fov(x, y, ctx.config.torch_radius, ctx.config.fov_light_walls);
    ctx.fov_stale = false;

    for (x, column) in game.map.iter_mut().enumerate() {
        for (y, tile) in column.iter_mut().enumerate() {
            if ctx.fov.is_in_fov(x as i32, y as i32) {
                tile.explored = true;
            }
        }
    }
}

/// Runs one session until the player leaves or the window closes.
pub fn play_game(ctx: &mut Context, game: &mut Game, objects: &mut Vec<Object>) -> SessionEnd {
    // impossible position so the first frame always recomputes
    let mut previous_player_position = (-1, -1);

    loop {
        if ctx.frontend.window_closed() {
            info!("window closed during play");
            if !objects[PLAYER].alive {
                drop_dead_save(ctx, game);
            }
            return SessionEnd::WindowClosed;
        }
        ctx.poll_input();

        let fov_recompute = ctx.fov_stale || previous_player_position != objects[PLAYER].pos();
        if fov_recompute {
            recompute_fov(ctx, game, objects);
        }
        ctx.render(game, objects, fov_recompute);

        level_up(ctx, game, objects);

        previous_player_position = objects[PLAYER].pos();
        let player_action = handle_keys(ctx, game, objects);
        if player_action == PlayerAction::Exit {
            match leave_game(ctx, game, objects) {
                Some(end) => return end,
                None => continue,
            }
        }

        if objects[PLAYER].alive && player_action.took_turn() {
            debug!("player action {:?}, monsters act", player_action);
            monsters_take_turn(ctx, game, objects);
        }
    }
}

// permadeath, a dead player's run cannot be continued
fn drop_dead_save(ctx: &Context, game: &Game) {
    if let Err(e) = remove_save(&ctx.config.save_path) {
        warn!("could not remove save of a dead player: {}", e);
    }
    info!("player left dead on level {}", game.dungeon_level);
}

// save on the way out, or drop the save of a dead player. None means keep playing
fn leave_game(ctx: &mut Context, game: &Game, objects: &[Object]) -> Option<SessionEnd> {
    let path = ctx.config.save_path.clone();
    if !objects[PLAYER].alive {
        drop_dead_save(ctx, game);
        return Some(SessionEnd::Died);
    }

    loop {
        let e = match save_game(&path, game, objects) {
            Ok(()) => {
                info!("game saved to {}", path.display());
                return Some(SessionEnd::Saved);
            }
            Err(e) => e,
        };
        error!("saving failed: {}", e);

        let header = format!("The game could not be saved.\n{}\n", e);
        let choices = &["Try again", "Quit without saving", "Keep playing"];
        match menu(ctx, &header, choices, SAVE_FAILED_WIDTH) {
            Some(0) => continue,
            Some(1) => return Some(SessionEnd::Abandoned),
            _ => return None,
        }
    }
}

// go down the stairs: rest, then a fresh map with only the player kept
pub fn next_level(ctx: &mut Context, game: &mut Game, objects: &mut Vec<Object>) {
    game.messages.add("You take a moment to rest and recover your strength.", VIOLET);
    let heal_hp = objects[PLAYER].max_hp(game) / 2;
    objects[PLAYER].heal(heal_hp, game);

    game.messages.add(
        "After a moment of rest, you venture deeper into the dungeon...",
        RED,
    );
    game.dungeon_level += 1;
    info!("descending to dungeon level {}", game.dungeon_level);

    objects.truncate(1);
    game.map = make_map(objects, game.dungeon_level, &ctx.config, &mut ctx.rng);
    initialize_fov(ctx, &game.map);
}
