use std::cmp;

use log::debug;
use rand::distributions::WeightedIndex;
use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::colors::*;
use crate::config::Config;
use crate::item::{Equipment, Item, Slot};
use crate::monster::place_monsters;
use crate::object::{from_dungeon_level, is_blocked, Object, Transition};
use crate::PLAYER;

/*
 *  Map, Tile, Rect struct and implementations
 */

pub type Map = Vec<Vec<Tile>>; // 2d array of tiles, indexed map[x][y]

// struct of map tile and properties
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub blocked: bool,
    pub explored: bool,
    pub block_sight: bool,
}

impl Tile {
    pub fn empty() -> Self {
        Tile {
            blocked: false,
            explored: false,
            block_sight: false,
        }
    }

    pub fn wall() -> Self {
        Tile {
            blocked: true,
            explored: false,
            block_sight: true,
        }
    }
}

// map of the given size filled with walls
pub fn wall_map(width: i32, height: i32) -> Map {
    vec![vec![Tile::wall(); height as usize]; width as usize]
}

// rectangle on map representing a room, has coordinates of top left and bottom right
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Rect {
    // create new rectangle with top left and dimensions
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Rect {
            x1: x,
            y1: y,
            x2: x + w,
            y2: y + h,
        }
    }

    // center of a room, used as the end of tunnels
    pub fn center(&self) -> (i32, i32) {
        let center_x = (self.x1 + self.x2) / 2;
        let center_y = (self.y1 + self.y2) / 2;
        (center_x, center_y)
    }

    pub fn intersects_with(&self, other: &Rect) -> bool {
        (self.x1 <= other.x2)
            && (self.x2 >= other.x1)
            && (self.y1 <= other.y2)
            && (self.y2 >= other.y1)
    }
}

/*
 *  Map generation
 */

// rooms and corridors, places the player in the first room and the stairs in the last
pub fn make_map(objects: &mut Vec<Object>, level: u32, config: &Config, rng: &mut impl Rng) -> Map {
    let mut map = wall_map(config.map_width, config.map_height);
    let mut rooms: Vec<Rect> = vec![];

    for _ in 0..config.max_rooms {
        let w = rng.gen_range(config.room_min_size..=config.room_max_size);
        let h = rng.gen_range(config.room_min_size..=config.room_max_size);
        // random position without going out of bounds of map
        let x = rng.gen_range(0..config.map_width - w);
        let y = rng.gen_range(0..config.map_height - h);

        let new_room = Rect::new(x, y, w, h);

        let failed = rooms.iter().any(|other_room| new_room.intersects_with(other_room));
        if failed {
            continue;
        }

        create_room(new_room, &mut map);
        let (new_x, new_y) = new_room.center();
        if rooms.is_empty() {
            // player first, so no monster spawns on its tile
            objects[PLAYER].set_pos(new_x, new_y);
        }
        place_objects(new_room, &map, objects, level, rng);

        if let Some(prev_room) = rooms.last() {
            // connect to the previous room, coin flip decides which leg comes first
            let (prev_x, prev_y) = prev_room.center();
            if rng.gen::<bool>() {
                create_h_tunnel(prev_x, new_x, prev_y, &mut map);
                create_v_tunnel(prev_y, new_y, new_x, &mut map);
            } else {
                create_v_tunnel(prev_y, new_y, prev_x, &mut map);
                create_h_tunnel(prev_x, new_x, new_y, &mut map);
            }
        }
        rooms.push(new_room);
    }

    // stairs at the center of the last room
    if let Some(last_room) = rooms.last() {
        let (last_room_x, last_room_y) = last_room.center();
        let mut stairs = Object::new(last_room_x, last_room_y, '<', "stairs", WHITE, false);
        stairs.always_visible = true;
        objects.push(stairs);
    }

    debug!(
        "generated level {} with {} rooms and {} objects",
        level,
        rooms.len(),
        objects.len()
    );
    map
}

// carve the inside of a room, outer ring stays wall
pub fn create_room(room: Rect, map: &mut Map) {
    for x in (room.x1 + 1)..room.x2 {
        for y in (room.y1 + 1)..room.y2 {
            map[x as usize][y as usize] = Tile::empty();
        }
    }
}

fn create_h_tunnel(x1: i32, x2: i32, y: i32, map: &mut Map) {
    for x in cmp::min(x1, x2)..(cmp::max(x1, x2) + 1) {
        map[x as usize][y as usize] = Tile::empty();
    }
}

fn create_v_tunnel(y1: i32, y2: i32, x: i32, map: &mut Map) {
    for y in cmp::min(y1, y2)..(cmp::max(y1, y2) + 1) {
        map[x as usize][y as usize] = Tile::empty();
    }
}

// monsters first, then items on free tiles
fn place_objects(room: Rect, map: &Map, objects: &mut Vec<Object>, level: u32, rng: &mut impl Rng) {
    place_monsters(room, map, objects, level, rng);

    let max_items = from_dungeon_level(
        &[
            Transition { level: 1, value: 1 },
            Transition { level: 4, value: 2 },
        ],
        level,
    );
    let num_items = rng.gen_range(0..=max_items);

    // item random table
    let item_chances = [
        (Item::Sword, from_dungeon_level(&[Transition { level: 4, value: 5 }], level)),
        (Item::Shield, from_dungeon_level(&[Transition { level: 8, value: 15 }], level)),
        (Item::Heal, 35),
        (Item::Lightning, from_dungeon_level(&[Transition { level: 4, value: 25 }], level)),
        (Item::Fireball, from_dungeon_level(&[Transition { level: 6, value: 25 }], level)),
        (Item::Confuse, from_dungeon_level(&[Transition { level: 2, value: 10 }], level)),
    ];
    let item_choice = match WeightedIndex::new(item_chances.iter().map(|c| c.1)) {
        Ok(choice) => choice,
        Err(_) => return,
    };

    for _ in 0..num_items {
        let x = rng.gen_range((room.x1 + 1)..room.x2);
        let y = rng.gen_range((room.y1 + 1)..room.y2);

        if !is_blocked(x, y, map, objects) {
            let kind = item_chances[item_choice.sample(rng)].0;
            let mut item = make_item(kind, x, y);
            item.always_visible = true;
            objects.push(item);
        }
    }
}

// build the object for an item kind at a position
pub fn make_item(kind: Item, x: i32, y: i32) -> Object {
    let mut object = match kind {
        Item::Sword => {
            let mut object = Object::new(x, y, '/', "sword", CYAN, false);
            object.equipment = Some(Equipment {
                equipped: false,
                slot: Slot::RightHand,
                max_hp_bonus: 0,
                power_bonus: 3,
                defense_bonus: 0,
            });
            object
        }
        Item::Shield => {
            let mut object = Object::new(x, y, '[', "shield", DARKER_ORANGE, false);
            object.equipment = Some(Equipment {
                equipped: false,
                slot: Slot::LeftHand,
                max_hp_bonus: 0,
                power_bonus: 0,
                defense_bonus: 1,
            });
            object
        }
        Item::Heal => Object::new(x, y, '!', "healing potion", VIOLET, false),
        Item::Lightning => Object::new(x, y, '#', "scroll of lightning bolt", LIGHT_YELLOW, false),
        Item::Fireball => Object::new(x, y, '#', "scroll of fireball", ORANGE, false),
        Item::Confuse => Object::new(x, y, '#', "scroll of confusion", PINK, false),
    };
    object.item = Some(kind);
    object
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;

    fn generate(seed: u64, level: u32) -> (Map, Vec<Object>) {
        let mut objects = vec![Object::player()];
        let mut rng = StdRng::seed_from_u64(seed);
        let map = make_map(&mut objects, level, &Config::default(), &mut rng);
        (map, objects)
    }

    #[test]
    fn map_has_configured_size_and_wall_border() {
        let config = Config::default();
        let (map, _) = generate(1, 1);

        assert_eq!(map.len(), config.map_width as usize);
        assert!(map.iter().all(|column| column.len() == config.map_height as usize));
        for x in 0..config.map_width as usize {
            assert!(map[x][0].blocked);
        }
        for y in 0..config.map_height as usize {
            assert!(map[0][y].blocked);
        }
    }

    #[test]
    fn player_starts_on_floor_and_stairs_exist() {
        let (map, objects) = generate(2, 1);
        let (px, py) = objects[PLAYER].pos();

        assert!(!map[px as usize][py as usize].blocked);
        assert_eq!(objects[PLAYER].name, "player");
        assert_eq!(objects.iter().filter(|o| o.name == "stairs").count(), 1);
    }

    #[test]
    fn same_seed_same_dungeon() {
        let (map_a, objects_a) = generate(99, 3);
        let (map_b, objects_b) = generate(99, 3);
        assert_eq!(map_a, map_b);
        assert_eq!(objects_a, objects_b);
    }

    #[test]
    fn rooms_overlap_check() {
        let a = Rect::new(0, 0, 5, 5);
        assert!(a.intersects_with(&Rect::new(5, 5, 3, 3)));
        assert!(!a.intersects_with(&Rect::new(6, 0, 3, 3)));
        assert_eq!(a.center(), (2, 2));
    }
}
