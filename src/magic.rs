use crate::colors::*;
use crate::game::{Context, Game};
use crate::input::{target_monster, target_tile};
use crate::item::UseResult;
use crate::monster_ai::Ai;
use crate::object::{closest_monster, Object};
use crate::PLAYER;

const HEAL_AMOUNT: i32 = 40;
const LIGHTNING_RANGE: i32 = 5;
const LIGHTNING_DAMAGE: i32 = 40;
const CONFUSE_RANGE: i32 = 8;
const CONFUSE_NUM_TURNS: i32 = 10;
const FIREBALL_RADIUS: i32 = 3;
const FIREBALL_DAMAGE: i32 = 25;

fn give_player_xp(objects: &mut [Object], xp: i32) {
    if let Some(fighter) = objects[PLAYER].fighter.as_mut() {
        fighter.xp += xp;
    }
}

pub fn cast_heal(_inventory_id: usize, _ctx: &mut Context, game: &mut Game, objects: &mut [Object]) -> UseResult {
    let player = &mut objects[PLAYER];
    if let Some(fighter) = player.fighter {
        if fighter.hp == player.max_hp(game) {
            game.messages.add("You are already at full health.", RED);
            return UseResult::Cancelled;
        }
        game.messages.add("Your wounds start to feel better!", LIGHT_VIOLET);
        player.heal(HEAL_AMOUNT, game);
        return UseResult::UsedUp;
    }
    UseResult::Cancelled
}

// strike the closest visible enemy in range
pub fn cast_lightning(_inventory_id: usize, ctx: &mut Context, game: &mut Game, objects: &mut [Object]) -> UseResult {
    let monster_id = match closest_monster(ctx, objects, LIGHTNING_RANGE) {
        Some(id) => id,
        None => {
            game.messages.add("No enemy is close enough to strike.", RED);
            return UseResult::Cancelled;
        }
    };

    game.messages.add(
        format!(
            "A lightning bolt strikes the {} with a loud thunder! The damage is {} hit points.",
            objects[monster_id].name, LIGHTNING_DAMAGE
        ),
        LIGHT_BLUE,
    );
    if let Some(xp) = objects[monster_id].take_damage(LIGHTNING_DAMAGE, game) {
        give_player_xp(objects, xp);
    }
    UseResult::UsedUp
}

pub fn cast_confuse(_inventory_id: usize, ctx: &mut Context, game: &mut Game, objects: &mut [Object]) -> UseResult {
    game.messages.add(
        "Left-click an enemy to confuse it, or right-click to cancel.",
        LIGHT_CYAN,
    );

    let monster_id = match target_monster(ctx, game, objects, Some(CONFUSE_RANGE as f32)) {
        Some(id) => id,
        None => {
            game.messages.add("No enemy is close enough to confuse.", RED);
            return UseResult::Cancelled;
        }
    };

    let old_ai = objects[monster_id].ai.take().unwrap_or(Ai::Basic);
    objects[monster_id].ai = Some(Ai::Confused {
        previous_ai: Box::new(old_ai),
        num_turns: CONFUSE_NUM_TURNS,
    });
    game.messages.add(
        format!(
            "The eyes of the {} look vacant, as he starts to stumble around!",
            objects[monster_id].name
        ),
        LIGHT_GREEN,
    );
    UseResult::UsedUp
}

// burn every fighter around a targeted tile, the player included
pub fn cast_fireball(_inventory_id: usize, ctx: &mut Context, game: &mut Game, objects: &mut [Object]) -> UseResult {
    game.messages.add(
        "Left-click a target tile for the fireball, or right-click to cancel.",
        LIGHT_CYAN,
    );
    let (x, y) = match target_tile(ctx, game, objects, None) {
        Some(tile_pos) => tile_pos,
        None => return UseResult::Cancelled,
    };
    game.messages.add(
        format!("The fireball explodes, burning everything within {} tiles!", FIREBALL_RADIUS),
        ORANGE,
    );

    let mut xp_to_gain = 0;
    for (id, obj) in objects.iter_mut().enumerate() {
        if obj.distance(x, y) <= FIREBALL_RADIUS as f32 && obj.fighter.is_some() {
            game.messages.add(
                format!("The {} gets burned for {} hit points.", obj.name, FIREBALL_DAMAGE),
                ORANGE,
            );
            if let Some(xp) = obj.take_damage(FIREBALL_DAMAGE, game) {
                // no xp for burning yourself
                if id != PLAYER {
                    xp_to_gain += xp;
                }
            }
        }
    }
    give_player_xp(objects, xp_to_gain);
    UseResult::UsedUp
}
