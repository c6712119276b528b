use std::cmp;

use log::info;
use serde::{Deserialize, Serialize};

use crate::colors::*;
use crate::game::{Context, Game};
use crate::item::{Equipment, Item};
use crate::map::Map;
use crate::menu::menu;
use crate::message::Messages;
use crate::monster_ai::Ai;
use crate::PLAYER;

const LEVEL_UP_BASE: i32 = 200; // need 200 xp for first level up
const LEVEL_UP_FACTOR: i32 = 150; // increase needed xp per each lvl up
const LEVEL_SCREEN_WIDTH: i32 = 40;
pub const PLAYER_NAME: &str = "player";

/*
 *  Object struct, implementation, and related things
 */

// generic object: player, monster, item, stairs
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Object {
    pub x: i32,
    pub y: i32,
    pub char: char,
    pub color: Color,
    pub name: String,
    pub blocks: bool,
    pub alive: bool,
    pub always_visible: bool,
    pub level: i32,
    pub fighter: Option<Fighter>,
    pub ai: Option<Ai>,
    pub item: Option<Item>,
    pub equipment: Option<Equipment>,
}

impl Object {
    pub fn new(x: i32, y: i32, char: char, name: &str, color: Color, blocks: bool) -> Self {
        Object {
            x,
            y,
            char,
            color,
            name: name.into(),
            blocks,
            alive: false,
            always_visible: false,
            level: 1,
            fighter: None,
            ai: None,
            item: None,
            equipment: None,
        }
    }

    // fresh living player, position is set by map generation
    pub fn player() -> Self {
        let mut player = Object::new(0, 0, '@', PLAYER_NAME, WHITE, true);
        player.alive = true;
        player.fighter = Some(Fighter {
            base_max_hp: 100,
            hp: 100,
            base_defense: 1,
            base_power: 2,
            xp: 0,
            on_death: DeathCallback::Player,
        });
        player
    }

    pub fn is_player(&self) -> bool {
        self.name == PLAYER_NAME
    }

    pub fn pos(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    pub fn set_pos(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }

    pub fn distance_to(&self, other: &Object) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        ((dx.pow(2) + dy.pow(2)) as f32).sqrt()
    }

    pub fn distance(&self, x: i32, y: i32) -> f32 {
        (((x - self.x).pow(2) + (y - self.y).pow(2)) as f32).sqrt()
    }

    // apply damage, returns the xp worth of the object if this killed it
    pub fn take_damage(&mut self, damage: i32, game: &mut Game) -> Option<i32> {
        if let Some(fighter) = self.fighter.as_mut() {
            if damage > 0 {
                fighter.hp -= damage;
            }
        }

        if let Some(fighter) = self.fighter {
            if fighter.hp <= 0 {
                self.alive = false;
                fighter.on_death.callback(self, game);
                return Some(fighter.xp);
            }
        }
        None
    }

    pub fn attack(&mut self, target: &mut Object, game: &mut Game) {
        // simple attack formula
        let damage = self.power(game) - target.defense(game);
        if damage > 0 {
            game.messages.add(
                format!("{} attacks {} for {} damage!", self.name, target.name, damage),
                WHITE,
            );
            if let Some(xp) = target.take_damage(damage, game) {
                // only a kill returns xp
                if let Some(fighter) = self.fighter.as_mut() {
                    fighter.xp += xp;
                }
            }
        } else {
            game.messages.add(
                format!("{} attacks {} but it has no effect!", self.name, target.name),
                WHITE,
            );
        }
    }

    // attack power including equipment
    pub fn power(&self, game: &Game) -> i32 {
        let base_power = self.fighter.map_or(0, |f| f.base_power);
        let bonus: i32 = self.get_all_equipped(game).iter().map(|e| e.power_bonus).sum();
        base_power + bonus
    }

    pub fn defense(&self, game: &Game) -> i32 {
        let base_defense = self.fighter.map_or(0, |f| f.base_defense);
        let bonus: i32 = self.get_all_equipped(game).iter().map(|e| e.defense_bonus).sum();
        base_defense + bonus
    }

    pub fn max_hp(&self, game: &Game) -> i32 {
        let base_max_hp = self.fighter.map_or(0, |f| f.base_max_hp);
        let bonus: i32 = self.get_all_equipped(game).iter().map(|e| e.max_hp_bonus).sum();
        base_max_hp + bonus
    }

    pub fn heal(&mut self, amount: i32, game: &Game) {
        let max_hp = self.max_hp(game);
        if let Some(ref mut fighter) = self.fighter {
            fighter.hp = cmp::min(fighter.hp + amount, max_hp);
        }
    }

    pub fn equip(&mut self, messages: &mut Messages) {
        if self.item.is_none() {
            messages.add(format!("Can't equip {} because it is not an item.", self.name), RED);
            return;
        }

        if let Some(ref mut equipment) = self.equipment {
            if !equipment.equipped {
                equipment.equipped = true;
                messages.add(format!("Equipped {} on {}.", self.name, equipment.slot), LIGHT_GREEN);
            }
        } else {
            messages.add(format!("Can't equip {} because it is not equipment.", self.name), RED);
        }
    }

    pub fn unequip(&mut self, messages: &mut Messages) {
        if self.item.is_none() {
            messages.add(format!("Can't unequip {} because it is not an item.", self.name), RED);
            return;
        }

        if let Some(ref mut equipment) = self.equipment {
            if equipment.equipped {
                equipment.equipped = false;
                messages.add(
                    format!("Unequipped {} from {}.", self.name, equipment.slot),
                    LIGHT_YELLOW,
                );
            }
        } else {
            messages.add(format!("Can't unequip {} because it is not equipment.", self.name), RED);
        }
    }

    // equipment currently worn, only the player carries an inventory
    pub fn get_all_equipped(&self, game: &Game) -> Vec<Equipment> {
        if self.is_player() {
            game.inventory
                .iter()
                .filter_map(|item| item.equipment)
                .filter(|e| e.equipped)
                .collect()
        } else {
            vec![]
        }
    }
}

/// Outcome of handling the player's input for one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerAction {
    Moved,
    Attacked,
    Waited,
    UsedItem,
    DroppedItem,
    PickedUpItem,
    DidntTakeTurn,
    Exit,
}

impl PlayerAction {
    // monsters only act after actions that spend the player's turn
    pub fn took_turn(self) -> bool {
        !matches!(self, PlayerAction::DidntTakeTurn | PlayerAction::Exit)
    }
}

// value that starts applying at a dungeon level
pub struct Transition {
    pub level: u32,
    pub value: u32,
}

/*
 *  Components for objects
 */

// combat related properties (player and monsters)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fighter {
    pub base_max_hp: i32,
    pub hp: i32,
    pub base_defense: i32,
    pub base_power: i32,
    pub xp: i32,
    pub on_death: DeathCallback,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCallback {
    Player,
    Monster,
}

impl DeathCallback {
    fn callback(self, object: &mut Object, game: &mut Game) {
        match self {
            DeathCallback::Player => player_death(object, game),
            DeathCallback::Monster => monster_death(object, game),
        }
    }
}

/*
 * Object related functions
 */

pub fn move_by(id: usize, dx: i32, dy: i32, map: &Map, objects: &mut [Object]) {
    let (x, y) = objects[id].pos();
    if !is_blocked(x + dx, y + dy, map, objects) {
        objects[id].set_pos(x + dx, y + dy);
    }
}

// step one tile towards a target (usually monster toward player)
pub fn move_towards(id: usize, target_x: i32, target_y: i32, map: &Map, objects: &mut [Object]) {
    let dx = target_x - objects[id].x;
    let dy = target_y - objects[id].y;
    let distance = ((dx.pow(2) + dy.pow(2)) as f32).sqrt();
    if distance == 0.0 {
        return;
    }

    // normalize to length 1 then round so movement stays on the grid
    let dx = (dx as f32 / distance).round() as i32;
    let dy = (dy as f32 / distance).round() as i32;
    move_by(id, dx, dy, map, objects);
}

// out of bounds counts as blocked
pub fn is_blocked(x: i32, y: i32, map: &Map, objects: &[Object]) -> bool {
    if x < 0 || y < 0 {
        return true;
    }
    match map.get(x as usize).and_then(|column| column.get(y as usize)) {
        Some(tile) if !tile.blocked => {
            objects.iter().any(|object| object.blocks && object.pos() == (x, y))
        }
        _ => true,
    }
}

pub fn player_move_or_attack(dx: i32, dy: i32, game: &mut Game, objects: &mut [Object]) -> PlayerAction {
    let x = objects[PLAYER].x + dx;
    let y = objects[PLAYER].y + dy;

    let target_id = objects
        .iter()
        .position(|object| object.fighter.is_some() && object.pos() == (x, y));

    match target_id {
        Some(target_id) if target_id != PLAYER => {
            let (player, target) = mut_two(PLAYER, target_id, objects);
            player.attack(target, game);
            PlayerAction::Attacked
        }
        _ => {
            move_by(PLAYER, dx, dy, &game.map, objects);
            PlayerAction::Moved
        }
    }
}

// closest visible monster within range, by index into objects
pub fn closest_monster(ctx: &Context, objects: &[Object], max_range: i32) -> Option<usize> {
    let mut closest_enemy = None;
    let mut closest_dist = (max_range + 1) as f32;

    for (id, object) in objects.iter().enumerate() {
        if (id != PLAYER)
            && object.fighter.is_some()
            && object.ai.is_some()
            && ctx.fov.is_in_fov(object.x, object.y)
        {
            let dist = objects[PLAYER].distance_to(object);
            if dist < closest_dist {
                closest_enemy = Some(id);
                closest_dist = dist;
            }
        }
    }
    closest_enemy
}

// borrow two elements of a slice mutably at once, indices must differ
pub fn mut_two<T>(first_index: usize, second_index: usize, items: &mut [T]) -> (&mut T, &mut T) {
    assert!(first_index != second_index);
    let split_at_index = cmp::max(first_index, second_index);
    let (first_slice, second_slice) = items.split_at_mut(split_at_index);
    if first_index < second_index {
        (&mut first_slice[first_index], &mut second_slice[0])
    } else {
        (&mut second_slice[0], &mut first_slice[second_index])
    }
}

/*
 *  Death callback functions
 */

fn player_death(player: &mut Object, game: &mut Game) {
    info!("player died on dungeon level {}", game.dungeon_level);
    game.messages.add("You died!", RED);

    player.char = '%';
    player.color = DARK_RED;
}

fn monster_death(monster: &mut Object, game: &mut Game) {
    let xp = monster.fighter.map_or(0, |f| f.xp);
    game.messages.add(
        format!("{} is dead! You gain {} experience points.", monster.name, xp),
        ORANGE,
    );

    // corpse: doesn't block, can't be attacked and doesn't move
    monster.char = '%';
    monster.color = DARK_RED;
    monster.blocks = false;
    monster.fighter = None;
    monster.ai = None;
    monster.name = format!("remains of {}", monster.name);
}

/*
 * Level up and xp
 */

pub fn level_up_xp(level: i32) -> i32 {
    LEVEL_UP_BASE + level * LEVEL_UP_FACTOR
}

// asks the player which stat to raise once enough xp is collected
pub fn level_up(ctx: &mut Context, game: &mut Game, objects: &mut [Object]) {
    let player = &mut objects[PLAYER];
    let required = level_up_xp(player.level);
    let fighter = match player.fighter.as_mut() {
        Some(fighter) if fighter.xp >= required => fighter,
        _ => return,
    };

    let options = [
        format!("Constitution (+20 HP, from {})", fighter.base_max_hp),
        format!("Strength (+1 attack, from {})", fighter.base_power),
        format!("Agility (+1 defense, from {})", fighter.base_defense),
    ];
    // keep asking until a choice is made
    let mut choice = None;
    while choice.is_none() {
        if ctx.frontend.window_closed() {
            return;
        }
        choice = menu(
            ctx,
            "Level up! Choose skill to increase:\n",
            &options,
            LEVEL_SCREEN_WIDTH,
        )
        .filter(|&index| index < options.len());
    }

    fighter.xp -= required;
    match choice {
        Some(0) => {
            fighter.base_max_hp += 20;
            fighter.hp += 20;
        }
        Some(1) => fighter.base_power += 1,
        _ => fighter.base_defense += 1,
    }
    player.level += 1;
    info!("player reached level {}", player.level);
    game.messages.add(
        format!("Your battle skills grow stronger! You reached level {}!", player.level),
        YELLOW,
    );
}

// value for a dungeon level from a table of transitions, 0 before the first one
pub fn from_dungeon_level(table: &[Transition], level: u32) -> u32 {
    table
        .iter()
        .rev()
        .find(|transition| level >= transition.level)
        .map_or(0, |transition| transition.value)
}
