use rand::distributions::WeightedIndex;
use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::colors::*;
use crate::map::{Map, Rect};
use crate::monster_ai::Ai;
use crate::object::{from_dungeon_level, is_blocked, DeathCallback, Fighter, Object, Transition};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Monster {
    Orc,
    Troll,
    Bandit,
    Warrior,
}

// living monster of the given kind with basic ai
pub fn make_monster(kind: Monster, x: i32, y: i32) -> Object {
    let (char, name, color, max_hp, defense, power, xp) = match kind {
        Monster::Orc => ('o', "orc", DESATURATED_GREEN, 20, 0, 4, 35),
        Monster::Troll => ('T', "troll", DARKER_GREEN, 30, 2, 8, 100),
        Monster::Bandit => ('B', "bandit", LIGHT_GREEN, 45, 3, 10, 175),
        Monster::Warrior => ('W', "warrior", WHITE, 60, 5, 12, 250),
    };
    let mut monster = Object::new(x, y, char, name, color, true);
    monster.fighter = Some(Fighter {
        base_max_hp: max_hp,
        hp: max_hp,
        base_defense: defense,
        base_power: power,
        xp,
        on_death: DeathCallback::Monster,
    });
    monster.ai = Some(Ai::Basic);
    monster.alive = true;
    monster
}

// roll the monsters for one room from this level's tables
pub fn place_monsters(room: Rect, map: &Map, objects: &mut Vec<Object>, level: u32, rng: &mut impl Rng) {
    let max_monsters = from_dungeon_level(
        &[
            Transition { level: 1, value: 2 },
            Transition { level: 4, value: 3 },
            Transition { level: 6, value: 5 },
            Transition { level: 11, value: 2 },
            Transition { level: 15, value: 3 },
            Transition { level: 18, value: 5 },
            Transition { level: 21, value: 3 },
            Transition { level: 24, value: 4 },
            Transition { level: 27, value: 6 },
        ],
        level,
    );
    let num_monsters = rng.gen_range(0..=max_monsters);

    let orc_chance = from_dungeon_level(
        &[
            Transition { level: 1, value: 100 },
            Transition { level: 3, value: 85 },
            Transition { level: 5, value: 70 },
            Transition { level: 7, value: 40 },
            Transition { level: 11, value: 0 },
        ],
        level,
    );
    let troll_chance = from_dungeon_level(
        &[
            Transition { level: 3, value: 15 },
            Transition { level: 5, value: 30 },
            Transition { level: 7, value: 60 },
            Transition { level: 11, value: 50 },
            Transition { level: 14, value: 10 },
            Transition { level: 17, value: 0 },
        ],
        level,
    );
    let bandit_chance = from_dungeon_level(
        &[
            Transition { level: 11, value: 50 },
            Transition { level: 14, value: 60 },
            Transition { level: 17, value: 55 },
            Transition { level: 21, value: 10 },
        ],
        level,
    );
    let warrior_chance = from_dungeon_level(
        &[
            Transition { level: 14, value: 30 },
            Transition { level: 17, value: 45 },
            Transition { level: 21, value: 70 },
        ],
        level,
    );

    let monster_chances = [
        (Monster::Orc, orc_chance),
        (Monster::Troll, troll_chance),
        (Monster::Bandit, bandit_chance),
        (Monster::Warrior, warrior_chance),
    ];
    let monster_choice = match WeightedIndex::new(monster_chances.iter().map(|c| c.1)) {
        Ok(choice) => choice,
        Err(_) => return,
    };

    for _ in 0..num_monsters {
        let x = rng.gen_range((room.x1 + 1)..room.x2);
        let y = rng.gen_range((room.y1 + 1)..room.y2);
        let kind = monster_chances[monster_choice.sample(rng)].0;

        if !is_blocked(x, y, map, objects) {
            objects.push(make_monster(kind, x, y));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::{create_room, wall_map};
    use rand::rngs::StdRng;

    #[test]
    fn deep_levels_have_no_orcs() {
        let mut map = wall_map(20, 20);
        let room = Rect::new(0, 0, 19, 19);
        create_room(room, &mut map);

        let mut rng = StdRng::seed_from_u64(5);
        let mut objects = vec![];
        for _ in 0..20 {
            place_monsters(room, &map, &mut objects, 25, &mut rng);
        }
        assert!(!objects.is_empty());
        assert!(objects.iter().all(|o| o.name == "bandit" || o.name == "warrior"));
        assert!(objects.iter().all(|o| o.alive && o.ai == Some(Ai::Basic)));
    }

    #[test]
    fn monsters_never_share_a_tile() {
        let mut map = wall_map(8, 8);
        let room = Rect::new(0, 0, 4, 4);
        create_room(room, &mut map);

        let mut rng = StdRng::seed_from_u64(11);
        let mut objects = vec![];
        for _ in 0..30 {
            place_monsters(room, &map, &mut objects, 6, &mut rng);
        }
        // 3x3 room interior
        assert!(objects.len() <= 9);
        for (i, a) in objects.iter().enumerate() {
            for b in &objects[i + 1..] {
                assert_ne!(a.pos(), b.pos());
            }
        }
    }
}
