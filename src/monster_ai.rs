use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::colors::*;
use crate::config::TurnOrder;
use crate::game::{Context, Game};
use crate::object::{move_by, move_towards, mut_two, Object};
use crate::PLAYER;

// monster artificial intelligence
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ai {
    Basic,
    Confused {
        previous_ai: Box<Ai>,
        num_turns: i32,
    },
}

// indices of every object with an ai, in the order they act this turn
pub fn turn_order(order: TurnOrder, objects: &[Object]) -> Vec<usize> {
    let mut ids: Vec<usize> = (0..objects.len())
        .filter(|&id| objects[id].ai.is_some())
        .collect();
    if order == TurnOrder::NearestFirst {
        let player = &objects[PLAYER];
        let distance = |id: usize| {
            let (x, y) = objects[id].pos();
            (x - player.x).pow(2) + (y - player.y).pow(2)
        };
        // stable sort keeps list order for equal distances
        ids.sort_by_key(|&id| distance(id));
    }
    ids
}

// every monster acts once, later ones see what earlier ones did
pub fn monsters_take_turn(ctx: &mut Context, game: &mut Game, objects: &mut [Object]) {
    for id in turn_order(ctx.config.turn_order, objects) {
        ai_take_turn(id, ctx, game, objects);
    }
}

pub fn ai_take_turn(monster_id: usize, ctx: &mut Context, game: &mut Game, objects: &mut [Object]) {
    // take() leaves None while the ai runs, the returned ai is put back
    if let Some(ai) = objects[monster_id].ai.take() {
        let new_ai = match ai {
            Ai::Basic => ai_basic(monster_id, ctx, game, objects),
            Ai::Confused {
                previous_ai,
                num_turns,
            } => ai_confused(monster_id, ctx, game, objects, previous_ai, num_turns),
        };
        objects[monster_id].ai = Some(new_ai);
    }
}

// if you can see it, it can see you
fn ai_basic(monster_id: usize, ctx: &mut Context, game: &mut Game, objects: &mut [Object]) -> Ai {
    let (monster_x, monster_y) = objects[monster_id].pos();

    if ctx.fov.is_in_fov(monster_x, monster_y) {
        if objects[monster_id].distance_to(&objects[PLAYER]) >= 2.0 {
            let (player_x, player_y) = objects[PLAYER].pos();
            move_towards(monster_id, player_x, player_y, &game.map, objects);
        } else if objects[PLAYER].fighter.map_or(false, |f| f.hp > 0) {
            // close enough to attack a living player
            let (monster, player) = mut_two(monster_id, PLAYER, objects);
            monster.attack(player, game);
        }
    }
    Ai::Basic
}

fn ai_confused(
    monster_id: usize,
    ctx: &mut Context,
    game: &mut Game,
    objects: &mut [Object],
    previous_ai: Box<Ai>,
    num_turns: i32,
) -> Ai {
    if num_turns >= 0 {
        // still confused, stumble in a random direction
        let dx = ctx.rng.gen_range(-1..=1);
        let dy = ctx.rng.gen_range(-1..=1);
        move_by(monster_id, dx, dy, &game.map, objects);
        Ai::Confused {
            previous_ai,
            num_turns: num_turns - 1,
        }
    } else {
        game.messages.add(
            format!("The {} is no longer confused!", objects[monster_id].name),
            RED,
        );
        *previous_ai
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::headless::ScriptedFrontend;
    use crate::map::Tile;
    use crate::monster::{make_monster, Monster};

    fn setup(order: TurnOrder) -> (Context, Game, Vec<Object>) {
        let config = Config {
            turn_order: order,
            seed: Some(3),
            ..Config::default()
        };
        let mut ctx = Context::headless(ScriptedFrontend::new(vec![]), config);
        let mut game = Game::new(&ctx.config);
        game.map = vec![vec![Tile::empty(); 12]; 12];
        crate::game::initialize_fov(&mut ctx, &game.map);
        let mut player = Object::player();
        player.set_pos(5, 5);
        let objects = vec![
            player,
            make_monster(Monster::Orc, 9, 5),
            make_monster(Monster::Orc, 6, 5),
            Object::new(1, 1, '!', "healing potion", VIOLET, false),
        ];
        ctx.fov.compute_fov(5, 5, 10, true);
        (ctx, game, objects)
    }

    #[test]
    fn sequence_order_follows_list_position() {
        let (_, _, objects) = setup(TurnOrder::Sequence);
        assert_eq!(turn_order(TurnOrder::Sequence, &objects), vec![1, 2]);
    }

    #[test]
    fn nearest_first_sorts_by_distance() {
        let (_, _, objects) = setup(TurnOrder::NearestFirst);
        assert_eq!(turn_order(TurnOrder::NearestFirst, &objects), vec![2, 1]);
    }

    #[test]
    fn basic_ai_approaches_then_attacks() {
        let (mut ctx, mut game, mut objects) = setup(TurnOrder::Sequence);
        monsters_take_turn(&mut ctx, &mut game, &mut objects);

        // far orc stepped closer, adjacent orc hit the player (power 4 - defense 1)
        assert_eq!(objects[1].pos(), (8, 5));
        assert_eq!(objects[PLAYER].fighter.unwrap().hp, 97);
        assert!(game.messages.iter().any(|(m, _)| m == "orc attacks player for 3 damage!"));
    }

    #[test]
    fn confusion_wears_off() {
        let (mut ctx, mut game, mut objects) = setup(TurnOrder::Sequence);
        objects[2].ai = Some(Ai::Confused {
            previous_ai: Box::new(Ai::Basic),
            num_turns: 0,
        });

        ai_take_turn(2, &mut ctx, &mut game, &mut objects);
        assert!(matches!(objects[2].ai, Some(Ai::Confused { num_turns: -1, .. })));

        ai_take_turn(2, &mut ctx, &mut game, &mut objects);
        assert_eq!(objects[2].ai, Some(Ai::Basic));
        assert_eq!(game.messages.last(), Some("The orc is no longer confused!"));
    }
}
