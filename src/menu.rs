use log::{info, warn};

use crate::game::{initialize_fov, new_game, play_game, Context, Game};
use crate::item::MAX_INVENTORY_SIZE;
use crate::object::Object;
use crate::save::{load_game, SaveError};

const INVENTORY_WIDTH: i32 = 50;
const MSGBOX_WIDTH: i32 = 24;
const MAIN_MENU_CHOICES: [&str; 3] = ["Play a new game", "Continue last game", "Quit"];

// ask the frontend to pick one option, None when cancelled or out of range
pub fn menu<T: AsRef<str>>(ctx: &mut Context, header: &str, options: &[T], width: i32) -> Option<usize> {
    // options are labelled a..z
    assert!(
        options.len() <= MAX_INVENTORY_SIZE,
        "Cannot have a menu with more than {} options",
        MAX_INVENTORY_SIZE
    );
    let options: Vec<String> = options.iter().map(|option| option.as_ref().to_string()).collect();
    ctx.frontend
        .menu(header, &options, width)
        .filter(|&index| index < options.len())
}

// inventory items as menu options
pub fn inventory_menu(ctx: &mut Context, inventory: &[Object], header: &str) -> Option<usize> {
    let options = if inventory.is_empty() {
        vec!["Inventory is empty.".to_string()]
    } else {
        inventory
            .iter()
            .map(|item| match item.equipment {
                Some(equipment) if equipment.equipped => {
                    format!("{} (on {})", item.name, equipment.slot)
                }
                _ => item.name.clone(),
            })
            .collect()
    };

    let inventory_index = menu(ctx, header, &options, INVENTORY_WIDTH);
    if inventory.is_empty() {
        None
    } else {
        inventory_index
    }
}

// a menu without options, just shows text until a key is pressed
pub fn msgbox(ctx: &mut Context, text: &str, width: i32) {
    let options: &[&str] = &[];
    menu(ctx, text, options, width);
}

/// Where the program is between the title screen and a running game.
#[derive(Debug, PartialEq)]
pub enum MenuState {
    MainMenu,
    Playing { game: Game, objects: Vec<Object> },
    Terminated,
}

fn load_failure_message(error: &SaveError) -> String {
    match error {
        SaveError::NotFound { .. } | SaveError::Decode { .. } => "\nNo saved game to load.\n".into(),
        SaveError::Io { source, .. } => format!("\nCould not read the saved game: {}\n", source),
        SaveError::Encode(e) => format!("\nCould not read the saved game: {}\n", e),
    }
}

/// Performs one transition of the title screen state machine.
pub fn step(ctx: &mut Context, state: MenuState) -> MenuState {
    match state {
        MenuState::MainMenu => {
            if ctx.frontend.window_closed() {
                return MenuState::Terminated;
            }
            let choices: Vec<String> = MAIN_MENU_CHOICES.iter().map(|c| c.to_string()).collect();
            match ctx.frontend.main_menu(&choices) {
                Some(0) => {
                    let (game, objects) = new_game(ctx);
                    MenuState::Playing { game, objects }
                }
                Some(1) => match load_game(&ctx.config.save_path) {
                    Ok((game, objects)) => {
                        info!("continuing game on dungeon level {}", game.dungeon_level);
                        initialize_fov(ctx, &game.map);
                        MenuState::Playing { game, objects }
                    }
                    Err(e) => {
                        warn!("could not load game: {}", e);
                        msgbox(ctx, &load_failure_message(&e), MSGBOX_WIDTH);
                        MenuState::MainMenu
                    }
                },
                Some(2) => MenuState::Terminated,
                _ => MenuState::MainMenu,
            }
        }
        MenuState::Playing {
            mut game,
            mut objects,
        } => {
            let end = play_game(ctx, &mut game, &mut objects);
            info!("session ended: {:?}", end);
            MenuState::MainMenu
        }
        MenuState::Terminated => MenuState::Terminated,
    }
}

// title screen loop, returns once the player quits or the window closes
pub fn main_menu(ctx: &mut Context) {
    let mut state = MenuState::MainMenu;
    while state != MenuState::Terminated {
        state = step(ctx, state);
    }
    info!("leaving main menu");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::headless::{ScriptedFrontend, Step};
    use crate::input::Key;
    use crate::PLAYER;

    fn context(dir: &tempfile::TempDir, steps: Vec<Step>) -> Context {
        let config = Config {
            save_path: dir.path().join("savegame"),
            seed: Some(5),
            ..Config::default()
        };
        Context::headless(ScriptedFrontend::new(steps), config)
    }

    #[test]
    fn menu_drops_out_of_range_answers() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = context(&dir, vec![Step::Choose(Some(5)), Step::Choose(Some(1))]);
        assert_eq!(menu(&mut ctx, "pick", &["a", "b"], 20), None);
        assert_eq!(menu(&mut ctx, "pick", &["a", "b"], 20), Some(1));
    }

    #[test]
    fn empty_inventory_never_selects() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = context(&dir, vec![Step::Choose(Some(0))]);
        assert_eq!(inventory_menu(&mut ctx, &[], "use"), None);
    }

    #[test]
    fn quit_terminates() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = context(&dir, vec![Step::Choose(Some(2)), Step::Idle]);
        assert_eq!(step(&mut ctx, MenuState::MainMenu), MenuState::Terminated);
    }

    #[test]
    fn closed_window_terminates() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = context(&dir, vec![]);
        assert_eq!(step(&mut ctx, MenuState::MainMenu), MenuState::Terminated);
    }

    #[test]
    fn continue_without_save_stays_in_menu() {
        let dir = tempfile::tempdir().unwrap();
        let frontend = ScriptedFrontend::new(vec![Step::Choose(Some(1)), Step::Choose(None)]);
        let transcript = frontend.transcript();
        let mut ctx = Context::headless(
            frontend,
            Config {
                save_path: dir.path().join("savegame"),
                ..Config::default()
            },
        );

        assert_eq!(step(&mut ctx, MenuState::MainMenu), MenuState::MainMenu);
        let transcript = transcript.borrow();
        let menus = &transcript.menus;
        assert_eq!(menus.last().map(String::as_str), Some("\nNo saved game to load.\n"));
    }

    #[test]
    fn new_game_after_exit_starts_clean() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = context(
            &dir,
            vec![
                Step::Choose(Some(0)),
                Step::Key(Key::Escape),
                Step::Choose(Some(0)),
                Step::Idle,
            ],
        );

        let state = step(&mut ctx, MenuState::MainMenu);
        assert!(matches!(state, MenuState::Playing { .. }));
        let state = step(&mut ctx, state);
        assert_eq!(state, MenuState::MainMenu);

        match step(&mut ctx, state) {
            MenuState::Playing { game, objects } => {
                assert_eq!(game.messages.len(), 1);
                assert_eq!(game.inventory.len(), 1);
                assert_eq!(game.dungeon_level, 1);
                assert!(objects[PLAYER].is_player());
                assert_eq!(objects.iter().filter(|o| o.is_player()).count(), 1);
            }
            other => panic!("expected a new game, got {:?}", other),
        }
    }

    #[test]
    fn continue_resumes_saved_game() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = context(
            &dir,
            vec![
                Step::Choose(Some(0)),
                Step::Key(Key::Escape),
                Step::Choose(Some(1)),
                Step::Idle,
            ],
        );

        let state = step(&mut ctx, MenuState::MainMenu);
        let (saved_game, saved_objects) = match &state {
            MenuState::Playing { game, objects } => (game.clone(), objects.clone()),
            other => panic!("expected a new game, got {:?}", other),
        };
        let state = step(&mut ctx, state);

        match step(&mut ctx, state) {
            MenuState::Playing { game, objects } => {
                assert_eq!(objects, saved_objects);
                assert_eq!(game.inventory, saved_game.inventory);
                assert_eq!(game.messages, saved_game.messages);
                assert!(ctx.fov_stale);
            }
            other => panic!("expected the saved game, got {:?}", other),
        }
    }
}
