use log::debug;
use serde::{Deserialize, Serialize};

use crate::colors::*;
use crate::game::{Context, Game};
use crate::magic::{cast_confuse, cast_fireball, cast_heal, cast_lightning};
use crate::object::{Object, PlayerAction};
use crate::PLAYER;

// menus label items a..z, so no inventory can hold more
pub const MAX_INVENTORY_SIZE: usize = 26;

// what an item does when used
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Item {
    Heal,
    Lightning,
    Confuse,
    Fireball,
    Sword,
    Shield,
}

pub enum UseResult {
    UsedUp,
    UsedAndKept,
    Cancelled,
}

// equipment component of an object
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equipment {
    pub slot: Slot,
    pub equipped: bool,
    pub max_hp_bonus: i32,
    pub power_bonus: i32,
    pub defense_bonus: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Slot {
    LeftHand,
    RightHand,
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            Slot::LeftHand => write!(f, "left hand"),
            Slot::RightHand => write!(f, "right hand"),
        }
    }
}

/*
 * Item and equipment related functions
 */

// move an item from the map into the inventory, auto equipping into a free slot
pub fn pick_item_up(object_id: usize, game: &mut Game, objects: &mut Vec<Object>, max_inventory: usize) -> PlayerAction {
    if game.inventory.len() >= max_inventory {
        game.messages.add(
            format!("Your inventory is full, cannot pick up {}.", objects[object_id].name),
            RED,
        );
        return PlayerAction::DidntTakeTurn;
    }

    // remove() keeps the order of the remaining objects
    let item = objects.remove(object_id);
    game.messages.add(format!("You picked up a {}!", item.name), GREEN);
    debug!("picked up {} into slot {}", item.name, game.inventory.len());
    let index = game.inventory.len();
    let slot = item.equipment.map(|e| e.slot);
    game.inventory.push(item);

    if let Some(slot) = slot {
        if get_equipped_in_slot(slot, &game.inventory).is_none() {
            game.inventory[index].equip(&mut game.messages);
        }
    }
    PlayerAction::PickedUpItem
}

// put an inventory item back on the map under the player
pub fn drop_item(inventory_id: usize, game: &mut Game, objects: &mut Vec<Object>) -> PlayerAction {
    let mut item = game.inventory.remove(inventory_id);
    if item.equipment.is_some() {
        item.unequip(&mut game.messages);
    }
    item.set_pos(objects[PLAYER].x, objects[PLAYER].y);
    game.messages.add(format!("You dropped a {}.", item.name), YELLOW);
    objects.push(item);
    PlayerAction::DroppedItem
}

pub fn use_item(inventory_id: usize, ctx: &mut Context, game: &mut Game, objects: &mut [Object]) -> PlayerAction {
    let item = match game.inventory[inventory_id].item {
        Some(item) => item,
        None => {
            game.messages.add(
                format!("The {} cannot be used.", game.inventory[inventory_id].name),
                WHITE,
            );
            return PlayerAction::DidntTakeTurn;
        }
    };

    let on_use = match item {
        Item::Heal => cast_heal,
        Item::Lightning => cast_lightning,
        Item::Confuse => cast_confuse,
        Item::Fireball => cast_fireball,
        Item::Sword | Item::Shield => toggle_equipment,
    };

    match on_use(inventory_id, ctx, game, objects) {
        UseResult::UsedUp => {
            // destroy after use
            game.inventory.remove(inventory_id);
            PlayerAction::UsedItem
        }
        UseResult::UsedAndKept => PlayerAction::UsedItem,
        UseResult::Cancelled => {
            game.messages.add("Cancelled", WHITE);
            PlayerAction::DidntTakeTurn
        }
    }
}

fn toggle_equipment(inventory_id: usize, _ctx: &mut Context, game: &mut Game, _objects: &mut [Object]) -> UseResult {
    let equipment = match game.inventory[inventory_id].equipment {
        Some(equipment) => equipment,
        None => return UseResult::Cancelled,
    };

    if equipment.equipped {
        game.inventory[inventory_id].unequip(&mut game.messages);
    } else {
        // free the slot first
        if let Some(current) = get_equipped_in_slot(equipment.slot, &game.inventory) {
            game.inventory[current].unequip(&mut game.messages);
        }
        game.inventory[inventory_id].equip(&mut game.messages);
    }
    UseResult::UsedAndKept
}

// inventory index of the item equipped in a slot
pub fn get_equipped_in_slot(slot: Slot, inventory: &[Object]) -> Option<usize> {
    inventory.iter().position(|item| {
        item.equipment
            .as_ref()
            .map_or(false, |e| e.equipped && e.slot == slot)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::headless::ScriptedFrontend;
    use crate::map::make_item;

    fn setup() -> (Context, Game, Vec<Object>) {
        let ctx = Context::headless(ScriptedFrontend::new(vec![]), Config::default());
        let game = Game::new(&ctx.config);
        let mut player = Object::player();
        player.set_pos(3, 3);
        (ctx, game, vec![player])
    }

    #[test]
    fn pick_up_keeps_object_order_and_auto_equips() {
        let (_, mut game, mut objects) = setup();
        objects.push(make_item(Item::Sword, 3, 3));
        objects.push(make_item(Item::Heal, 4, 4));

        let action = pick_item_up(1, &mut game, &mut objects, 26);

        assert_eq!(action, PlayerAction::PickedUpItem);
        assert_eq!(objects.len(), 2);
        assert_eq!(objects[1].name, "healing potion");
        assert_eq!(game.inventory[0].name, "sword");
        assert!(game.inventory[0].equipment.unwrap().equipped);
        assert_eq!(objects[PLAYER].power(&game), 2 + 3);
    }

    #[test]
    fn full_inventory_refuses_pick_up() {
        let (_, mut game, mut objects) = setup();
        objects.push(make_item(Item::Heal, 3, 3));
        game.inventory.push(make_item(Item::Heal, 0, 0));

        let action = pick_item_up(1, &mut game, &mut objects, 1);

        assert_eq!(action, PlayerAction::DidntTakeTurn);
        assert_eq!(objects.len(), 2);
        assert_eq!(game.inventory.len(), 1);
    }

    #[test]
    fn drop_unequips_and_places_under_player() {
        let (_, mut game, mut objects) = setup();
        let mut shield = make_item(Item::Shield, 0, 0);
        shield.equipment.as_mut().unwrap().equipped = true;
        game.inventory.push(shield);

        drop_item(0, &mut game, &mut objects);

        assert!(game.inventory.is_empty());
        let dropped = objects.last().unwrap();
        assert_eq!(dropped.pos(), (3, 3));
        assert!(!dropped.equipment.unwrap().equipped);
    }

    #[test]
    fn equipping_swaps_out_the_slot() {
        let (mut ctx, mut game, mut objects) = setup();
        let mut old = make_item(Item::Sword, 0, 0);
        old.equipment.as_mut().unwrap().equipped = true;
        game.inventory.push(old);
        game.inventory.push(make_item(Item::Sword, 0, 0));

        let action = use_item(1, &mut ctx, &mut game, &mut objects);

        assert_eq!(action, PlayerAction::UsedItem);
        assert!(!game.inventory[0].equipment.unwrap().equipped);
        assert!(game.inventory[1].equipment.unwrap().equipped);
        assert_eq!(get_equipped_in_slot(Slot::RightHand, &game.inventory), Some(1));
    }

    #[test]
    fn healing_at_full_health_is_cancelled() {
        let (mut ctx, mut game, mut objects) = setup();
        game.inventory.push(make_item(Item::Heal, 0, 0));

        let action = use_item(0, &mut ctx, &mut game, &mut objects);

        assert_eq!(action, PlayerAction::DidntTakeTurn);
        assert_eq!(game.inventory.len(), 1);
    }

    #[test]
    fn healing_potion_is_used_up() {
        let (mut ctx, mut game, mut objects) = setup();
        game.inventory.push(make_item(Item::Heal, 0, 0));
        objects[PLAYER].fighter.as_mut().unwrap().hp = 30;

        let action = use_item(0, &mut ctx, &mut game, &mut objects);

        assert_eq!(action, PlayerAction::UsedItem);
        assert!(game.inventory.is_empty());
        assert_eq!(objects[PLAYER].fighter.unwrap().hp, 70);
    }
}
