//! Turn loop and title screen driven through the scripted frontend.

use tombs::map::Tile;
use tombs::monster::{make_monster, Monster};
use tombs::{
    initialize_fov, main_menu, new_game, play_game, Config, Context, Game, Key, Object,
    ScriptedFrontend, SessionEnd, Step, TurnOrder, PLAYER,
};

fn walk_script() -> Vec<Step> {
    let keys = [
        Key::Right,
        Key::Right,
        Key::Down,
        Key::Wait,
        Key::DownLeft,
        Key::Up,
        Key::Wait,
        Key::Left,
        Key::UpRight,
        Key::Wait,
    ];
    keys.iter().copied().map(Step::Key).collect()
}

fn run_once(seed: u64) -> (Game, Vec<Object>) {
    let config = Config {
        seed: Some(seed),
        ..Config::default()
    };
    let mut ctx = Context::headless(ScriptedFrontend::new(walk_script()), config);
    let (mut game, mut objects) = new_game(&mut ctx);
    let end = play_game(&mut ctx, &mut game, &mut objects);
    assert_eq!(end, SessionEnd::WindowClosed);
    (game, objects)
}

#[test]
fn test_same_seed_and_input_give_same_world() {
    let (game_a, objects_a) = run_once(99);
    let (game_b, objects_b) = run_once(99);

    assert_eq!(game_a, game_b);
    assert_eq!(objects_a, objects_b);
}

// open 12x12 room, player at (5, 5) and two orcs in a column below
fn column_of_orcs(order: TurnOrder) -> Vec<Object> {
    let config = Config {
        turn_order: order,
        seed: Some(1),
        ..Config::default()
    };
    let mut ctx = Context::headless(ScriptedFrontend::new(vec![Step::Key(Key::Wait)]), config);
    let mut game = Game::new(&ctx.config);
    game.map = vec![vec![Tile::empty(); 12]; 12];
    initialize_fov(&mut ctx, &game.map);

    let mut player = Object::player();
    player.set_pos(5, 5);
    let far_orc = make_monster(Monster::Orc, 5, 8);
    let near_orc = make_monster(Monster::Orc, 5, 7);
    let mut objects = vec![player, far_orc, near_orc];

    play_game(&mut ctx, &mut game, &mut objects);
    objects
}

#[test]
fn test_sequence_order_lets_list_order_decide() {
    let objects = column_of_orcs(TurnOrder::Sequence);
    // the far orc moved first and was blocked by the near one
    assert_eq!(objects[1].pos(), (5, 8));
    assert_eq!(objects[2].pos(), (5, 6));
}

#[test]
fn test_nearest_first_moves_closest_monster_first() {
    let objects = column_of_orcs(TurnOrder::NearestFirst);
    assert_eq!(objects[2].pos(), (5, 6));
    assert_eq!(objects[1].pos(), (5, 7));
    assert_eq!(objects[PLAYER].pos(), (5, 5));
}

#[test]
fn test_title_screen_new_save_continue_quit() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        save_path: dir.path().join("savegame"),
        seed: Some(8),
        ..Config::default()
    };
    let frontend = ScriptedFrontend::new(vec![
        Step::Choose(Some(0)),
        Step::Key(Key::Escape),
        Step::Choose(Some(1)),
        Step::Idle,
        Step::Key(Key::Escape),
        Step::Choose(Some(2)),
    ]);
    let transcript = frontend.transcript();
    let mut ctx = Context::headless(frontend, config);

    main_menu(&mut ctx);

    assert!(dir.path().join("savegame").exists());
    let transcript = transcript.borrow();
    assert_eq!(transcript.menus.iter().filter(|m| *m == "main menu").count(), 3);
    // first game rendered once, the continued game twice
    assert_eq!(transcript.renders.len(), 3);
    assert_eq!(transcript.renders[0].player_pos, transcript.renders[1].player_pos);
}

#[test]
fn test_second_new_game_has_no_leftovers() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        save_path: dir.path().join("savegame"),
        seed: Some(8),
        ..Config::default()
    };
    let mut ctx = Context::headless(ScriptedFrontend::new(walk_script()), config);

    let (mut first, mut first_objects) = new_game(&mut ctx);
    first.messages.add("from the first game", tombs::colors::RED);
    play_game(&mut ctx, &mut first, &mut first_objects);

    let (second, second_objects) = new_game(&mut ctx);
    assert_eq!(second.messages.len(), 1);
    assert_eq!(second.inventory.len(), 1);
    assert_eq!(second.dungeon_level, 1);
    assert!(second.map.iter().flatten().all(|tile| !tile.explored));
    assert_eq!(second_objects.iter().filter(|o| o.is_player()).count(), 1);
}
