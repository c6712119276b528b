//! Save file behavior seen from outside the crate.

use std::fs;

use tombs::save::SAVE_VERSION;
use tombs::{
    load_game, new_game, play_game, save_game, Config, Context, DecodeFailure, Key, SaveError,
    ScriptedFrontend, Step, PLAYER,
};

fn played_game(dir: &tempfile::TempDir) -> (tombs::Game, Vec<tombs::Object>) {
    let config = Config {
        save_path: dir.path().join("savegame"),
        seed: Some(2024),
        ..Config::default()
    };
    let steps = [Key::Right, Key::Down, Key::Wait, Key::Left, Key::Up]
        .into_iter()
        .map(Step::Key)
        .collect();
    let mut ctx = Context::headless(ScriptedFrontend::new(steps), config);
    let (mut game, mut objects) = new_game(&mut ctx);
    play_game(&mut ctx, &mut game, &mut objects);
    (game, objects)
}

#[test]
fn test_round_trip_after_play() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("savegame");
    let (game, objects) = played_game(&dir);

    save_game(&path, &game, &objects).unwrap();
    let (loaded_game, loaded_objects) = load_game(&path).unwrap();

    assert_eq!(loaded_game, game);
    assert_eq!(loaded_objects, objects);
    assert_eq!(loaded_game.messages.iter().count(), game.messages.len());
}

#[test]
fn test_player_stays_first_after_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("savegame");
    let (game, objects) = played_game(&dir);

    save_game(&path, &game, &objects).unwrap();
    let (_, loaded) = load_game(&path).unwrap();

    assert_eq!(loaded[PLAYER].char, objects[PLAYER].char);
    assert_eq!(loaded[PLAYER].alive, objects[PLAYER].alive);
    assert!(loaded[PLAYER].is_player());
}

#[test]
fn test_missing_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let result = load_game(&dir.path().join("savegame"));
    assert!(matches!(result, Err(SaveError::NotFound { .. })));
}

#[test]
fn test_corrupted_file_leaves_state_alone() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("savegame");
    let (game, objects) = played_game(&dir);
    let (game_before, objects_before) = (game.clone(), objects.clone());
    fs::write(&path, b"{\"version\": 1, \"game\": {\"map\": [[").unwrap();

    let result = load_game(&path);

    assert!(matches!(
        result,
        Err(SaveError::Decode {
            reason: DecodeFailure::Malformed(_),
            ..
        })
    ));
    assert_eq!(game, game_before);
    assert_eq!(objects, objects_before);
}

#[test]
fn test_newer_save_version_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("savegame");
    let (game, objects) = played_game(&dir);
    save_game(&path, &game, &objects).unwrap();

    let mut envelope: serde_json::Value = serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
    envelope["version"] = serde_json::json!(SAVE_VERSION + 1);
    fs::write(&path, serde_json::to_vec(&envelope).unwrap()).unwrap();

    match load_game(&path) {
        Err(SaveError::Decode {
            reason: DecodeFailure::UnsupportedVersion { found, .. },
            ..
        }) => assert_eq!(found, SAVE_VERSION + 1),
        Err(e) => panic!("expected a version failure, got {}", e),
        Ok(_) => panic!("a save from another version loaded"),
    }
}

#[test]
fn test_oversized_inventory_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("savegame");
    let (mut game, objects) = played_game(&dir);
    let dagger = game.inventory[0].clone();
    game.inventory = vec![dagger; 27];
    save_game(&path, &game, &objects).unwrap();

    assert!(matches!(
        load_game(&path),
        Err(SaveError::Decode {
            reason: DecodeFailure::Invalid(_),
            ..
        })
    ));
}
