use log::debug;

use crate::fov::Fov;
use crate::game::{next_level, Context, Game};
use crate::item::{drop_item, pick_item_up, use_item};
use crate::menu::{inventory_menu, msgbox};
use crate::object::{level_up_xp, player_move_or_attack, Object, PlayerAction};
use crate::PLAYER;

const CHARACTER_SCREEN_WIDTH: i32 = 30;

/// A decoded key press. Frontends translate their device keys into these.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Key {
    // no key pressed this frame
    #[default]
    None,
    Escape,
    Enter { alt: bool },
    Up,
    Down,
    Left,
    Right,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
    Wait,
    Char(char),
}

// mouse state in console cells
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Mouse {
    pub x: i32,
    pub y: i32,
    pub lbutton_pressed: bool,
    pub rbutton_pressed: bool,
}

// one polled event
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    Key(Key),
    Mouse(Mouse),
}

// key of the current frame plus the latest mouse state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Input {
    pub key: Key,
    pub mouse: Mouse,
}

// resolve the current key against the world, returns what the player did
pub fn handle_keys(ctx: &mut Context, game: &mut Game, objects: &mut Vec<Object>) -> PlayerAction {
    let player_alive = objects[PLAYER].alive;
    match (ctx.input.key, player_alive) {
        (Key::Enter { alt: true }, _) => {
            ctx.frontend.toggle_fullscreen();
            PlayerAction::DidntTakeTurn
        }
        (Key::Escape, _) => PlayerAction::Exit,

        // movement keys
        (Key::Up, true) => player_move_or_attack(0, -1, game, objects),
        (Key::Down, true) => player_move_or_attack(0, 1, game, objects),
        (Key::Left, true) => player_move_or_attack(-1, 0, game, objects),
        (Key::Right, true) => player_move_or_attack(1, 0, game, objects),
        (Key::UpLeft, true) => player_move_or_attack(-1, -1, game, objects),
        (Key::UpRight, true) => player_move_or_attack(1, -1, game, objects),
        (Key::DownLeft, true) => player_move_or_attack(-1, 1, game, objects),
        (Key::DownRight, true) => player_move_or_attack(1, 1, game, objects),
        // let monsters come to you
        (Key::Wait, true) => PlayerAction::Waited,

        (Key::Char('g'), true) => {
            let player_pos = objects[PLAYER].pos();
            let item_id = objects
                .iter()
                .position(|object| object.pos() == player_pos && object.item.is_some());
            match item_id {
                Some(item_id) => pick_item_up(item_id, game, objects, ctx.config.max_inventory_size),
                None => PlayerAction::DidntTakeTurn,
            }
        }
        (Key::Char('i'), true) => {
            let inventory_index = inventory_menu(
                ctx,
                &game.inventory,
                "Press the key next to an item to use it, or any other to cancel.\n",
            );
            match inventory_index {
                Some(index) => use_item(index, ctx, game, objects),
                None => PlayerAction::DidntTakeTurn,
            }
        }
        (Key::Char('d'), true) => {
            let inventory_index = inventory_menu(
                ctx,
                &game.inventory,
                "Press the key next to an item to drop it, or any other to cancel.\n",
            );
            match inventory_index {
                Some(index) => drop_item(index, game, objects),
                None => PlayerAction::DidntTakeTurn,
            }
        }
        (Key::Char('c'), true) => {
            let player = &objects[PLAYER];
            if let Some(fighter) = player.fighter.as_ref() {
                let msg = format!(
                    "Character information\n\nLevel: {}\nExperience: {}\nExperience to level up: {}\n\nMaximum HP: {}\nAttack: {}\nDefense: {}",
                    player.level,
                    fighter.xp,
                    level_up_xp(player.level),
                    player.max_hp(game),
                    player.power(game),
                    player.defense(game),
                );
                msgbox(ctx, &msg, CHARACTER_SCREEN_WIDTH);
            }
            PlayerAction::DidntTakeTurn
        }
        (Key::Char('<'), true) => {
            let player_pos = objects[PLAYER].pos();
            let player_on_stairs = objects
                .iter()
                .any(|object| object.pos() == player_pos && object.name == "stairs");
            if player_on_stairs {
                next_level(ctx, game, objects);
            }
            PlayerAction::DidntTakeTurn
        }
        _ => PlayerAction::DidntTakeTurn,
    }
}

// position of a left clicked tile in the player's fov, None when cancelled
pub fn target_tile(
    ctx: &mut Context,
    game: &Game,
    objects: &[Object],
    max_range: Option<f32>,
) -> Option<(i32, i32)> {
    // a click that opened this prompt must not also answer it
    ctx.input.mouse.lbutton_pressed = false;
    ctx.input.mouse.rbutton_pressed = false;

    loop {
        if ctx.frontend.window_closed() {
            return None;
        }
        ctx.poll_input();
        ctx.render(game, objects, false);

        let (x, y) = (ctx.input.mouse.x, ctx.input.mouse.y);
        let on_map = x >= 0 && y >= 0 && (x as usize) < game.map.len() && (y as usize) < game.map[0].len();
        let in_fov = on_map && ctx.fov.is_in_fov(x, y);
        let in_range = max_range.map_or(true, |range| objects[PLAYER].distance(x, y) <= range);
        if ctx.input.mouse.lbutton_pressed && in_fov && in_range {
            debug!("targeted tile ({}, {})", x, y);
            return Some((x, y));
        }

        if ctx.input.mouse.rbutton_pressed || ctx.input.key == Key::Escape {
            return None;
        }
    }
}

// keep asking for a tile until it holds a monster, None when cancelled
pub fn target_monster(
    ctx: &mut Context,
    game: &Game,
    objects: &[Object],
    max_range: Option<f32>,
) -> Option<usize> {
    loop {
        let (x, y) = target_tile(ctx, game, objects, max_range)?;
        let monster = objects
            .iter()
            .enumerate()
            .position(|(id, obj)| id != PLAYER && obj.pos() == (x, y) && obj.fighter.is_some());
        if monster.is_some() {
            return monster;
        }
    }
}

// comma separated names of the visible objects under the mouse
pub fn names_under_mouse(mouse: Mouse, objects: &[Object], fov: &dyn Fov) -> String {
    let (x, y) = (mouse.x, mouse.y);
    objects
        .iter()
        .filter(|obj| obj.pos() == (x, y) && fov.is_in_fov(obj.x, obj.y))
        .map(|obj| obj.name.clone())
        .collect::<Vec<_>>()
        .join(", ")
}
