use log::{debug, warn};
use tcod::colors::{self, Color as TcodColor};
use tcod::console::*;
use tcod::image::{self, Image};
use tcod::input::{self, Event as TcodEvent, Key as TcodKey, KeyCode};
use tcod::map::{FovAlgorithm, Map as FovMap}; // rename tcod Map type as FovMap

use crate::colors::*;
use crate::config::Config;
use crate::fov::Fov;
use crate::frontend::{Frame, Frontend};
use crate::input::{Event, Key, Mouse};
use crate::{RogueError, RogueResult};

const FOV_ALGO: FovAlgorithm = FovAlgorithm::Basic; // default algorithm
const MAIN_MENU_WIDTH: i32 = 24;
// size and coordinates for gui
const BAR_WIDTH: i32 = 20;
const PANEL_HEIGHT: i32 = 7;
const MSG_X: i32 = BAR_WIDTH + 2;
const MSG_HEIGHT: i32 = PANEL_HEIGHT - 1;

fn tcod_color(color: Color) -> TcodColor {
    TcodColor::new(color.r, color.g, color.b)
}

/// libtcod's own fov map behind the `Fov` trait.
pub struct TcodFov {
    map: FovMap,
    width: i32,
    height: i32,
}

impl TcodFov {
    pub fn new(width: i32, height: i32) -> Self {
        TcodFov {
            map: FovMap::new(width, height),
            width,
            height,
        }
    }

    // libtcod asserts on coordinates outside the map
    fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }
}

impl Fov for TcodFov {
    fn reset(&mut self, width: i32, height: i32) {
        *self = TcodFov::new(width, height);
    }

    fn set(&mut self, x: i32, y: i32, transparent: bool, walkable: bool) {
        if self.contains(x, y) {
            self.map.set(x, y, transparent, walkable);
        }
    }

    fn compute_fov(&mut self, x: i32, y: i32, radius: i32, light_walls: bool) {
        if self.contains(x, y) {
            self.map.compute_fov(x, y, radius, light_walls, FOV_ALGO);
        }
    }

    fn is_in_fov(&self, x: i32, y: i32) -> bool {
        self.contains(x, y) && self.map.is_in_fov(x, y)
    }
}

/// The game window: a libtcod root console with a map console and a gui panel.
pub struct TcodFrontend {
    root: Root,
    con: Offscreen,
    panel: Offscreen,
    background: Option<Image>,
    screen_width: i32,
    screen_height: i32,
}

impl TcodFrontend {
    pub fn new(config: &Config) -> RogueResult<Self> {
        // libtcod aborts the process on a missing font, check first
        if !config.font_path.is_file() {
            return Err(RogueError::Frontend(format!(
                "font {} not found",
                config.font_path.display()
            )));
        }

        let root = Root::initializer()
            .font(&config.font_path, FontLayout::Tcod)
            .font_type(FontType::Greyscale)
            .size(config.screen_width, config.screen_height)
            .title("Tombs of the Ancient Kings")
            .init();
        tcod::system::set_fps(config.limit_fps);

        let background = config.menu_background.as_ref().and_then(|path| {
            let image = Image::from_file(path).ok();
            if image.is_none() {
                warn!("menu background {} could not be loaded", path.display());
            }
            image
        });

        Ok(TcodFrontend {
            root,
            con: Offscreen::new(config.map_width, config.map_height),
            panel: Offscreen::new(config.screen_width, PANEL_HEIGHT),
            background,
            screen_width: config.screen_width,
            screen_height: config.screen_height,
        })
    }

    fn render_map(&mut self, frame: &Frame) {
        self.con.clear();
        for (x, column) in frame.game.map.iter().enumerate() {
            for (y, tile) in column.iter().enumerate() {
                if !tile.explored {
                    continue;
                }
                let (x, y) = (x as i32, y as i32);
                let visible = frame.fov.is_in_fov(x, y);
                let color = match (visible, tile.block_sight) {
                    // outside field of view
                    (false, true) => COLOR_DARK_WALL,
                    (false, false) => COLOR_DARK_GROUND,
                    // inside fov
                    (true, true) => COLOR_LIGHT_WALL,
                    (true, false) => COLOR_LIGHT_GROUND,
                };
                self.con
                    .set_char_background(x, y, tcod_color(color), BackgroundFlag::Set);
            }
        }

        for object in frame.visible_objects() {
            self.con.set_default_foreground(tcod_color(object.color));
            self.con
                .put_char(object.x, object.y, object.char, BackgroundFlag::None);
        }

        let (width, height) = (self.con.width(), self.con.height());
        blit(&self.con, (0, 0), (width, height), &mut self.root, (0, 0), 1.0, 1.0);
    }

    fn render_panel(&mut self, frame: &Frame) {
        self.panel.set_default_background(colors::BLACK);
        self.panel.clear();

        // player stats
        let player = frame.player();
        let hp = player.fighter.map_or(0, |f| f.hp);
        let max_hp = player.max_hp(frame.game);
        render_bar(&mut self.panel, 1, 1, BAR_WIDTH, "HP", hp, max_hp, LIGHT_RED, DARKER_RED);
        self.panel.print_ex(
            1,
            3,
            BackgroundFlag::None,
            TextAlignment::Left,
            format!("Dungeon level: {}", frame.game.dungeon_level),
        );

        self.panel.set_default_foreground(tcod_color(LIGHT_GREY));
        self.panel.print_ex(
            1,
            0,
            BackgroundFlag::None,
            TextAlignment::Left,
            frame.names_under_mouse(),
        );

        // most recent messages at the bottom, older ones above while they fit
        let msg_width = self.screen_width - BAR_WIDTH - 2;
        let mut y = MSG_HEIGHT;
        for (msg, color) in frame.game.messages.iter().rev() {
            let msg_height = self.panel.get_height_rect(MSG_X, y, msg_width, 0, msg);
            y -= msg_height;
            if y < 0 {
                break;
            }
            self.panel.set_default_foreground(tcod_color(*color));
            self.panel.print_rect(MSG_X, y, msg_width, 0, msg);
        }

        blit(
            &self.panel,
            (0, 0),
            (self.screen_width, PANEL_HEIGHT),
            &mut self.root,
            (0, self.screen_height - PANEL_HEIGHT),
            1.0,
            1.0,
        );
    }
}

// generic status bar, hp for now
#[allow(clippy::too_many_arguments)]
fn render_bar(
    panel: &mut Offscreen,
    x: i32,
    y: i32,
    total_width: i32,
    name: &str,
    value: i32,
    maximum: i32,
    bar_color: Color,
    back_color: Color,
) {
    let bar_width = if maximum > 0 {
        (value as f32 / maximum as f32 * total_width as f32) as i32
    } else {
        0
    };

    // background first, then the bar on top
    panel.set_default_background(tcod_color(back_color));
    panel.rect(x, y, total_width, 1, false, BackgroundFlag::Screen);
    panel.set_default_background(tcod_color(bar_color));
    if bar_width > 0 {
        panel.rect(x, y, bar_width, 1, false, BackgroundFlag::Screen);
    }

    panel.set_default_foreground(colors::WHITE);
    panel.print_ex(
        x + total_width / 2,
        y,
        BackgroundFlag::None,
        TextAlignment::Center,
        &format!("{}: {}/{}", name, value, maximum),
    );
}

fn decode_key(key: TcodKey) -> Key {
    match key.code {
        KeyCode::Enter => Key::Enter { alt: key.alt },
        KeyCode::Escape => Key::Escape,
        KeyCode::Up | KeyCode::NumPad8 => Key::Up,
        KeyCode::Down | KeyCode::NumPad2 => Key::Down,
        KeyCode::Left | KeyCode::NumPad4 => Key::Left,
        KeyCode::Right | KeyCode::NumPad6 => Key::Right,
        KeyCode::Home | KeyCode::NumPad7 => Key::UpLeft,
        KeyCode::PageUp | KeyCode::NumPad9 => Key::UpRight,
        KeyCode::End | KeyCode::NumPad1 => Key::DownLeft,
        KeyCode::PageDown | KeyCode::NumPad3 => Key::DownRight,
        KeyCode::NumPad5 => Key::Wait,
        KeyCode::Text => key.text().chars().next().map_or(Key::None, Key::Char),
        _ => Key::None,
    }
}

impl Frontend for TcodFrontend {
    fn window_closed(&self) -> bool {
        self.root.window_closed()
    }

    fn poll(&mut self) -> Option<Event> {
        match input::check_for_event(input::MOUSE | input::KEY_PRESS) {
            Some((_, TcodEvent::Mouse(m))) => Some(Event::Mouse(Mouse {
                x: m.cx as i32,
                y: m.cy as i32,
                lbutton_pressed: m.lbutton_pressed,
                rbutton_pressed: m.rbutton_pressed,
            })),
            Some((_, TcodEvent::Key(k))) => Some(Event::Key(decode_key(k))),
            None => None,
        }
    }

    fn render(&mut self, frame: &Frame) {
        self.render_map(frame);
        self.render_panel(frame);
        self.root.flush();
    }

    fn menu(&mut self, header: &str, options: &[String], width: i32) -> Option<usize> {
        // total height: header (if any) plus one line per option
        let header_height = if header.is_empty() {
            0
        } else {
            self.root
                .get_height_rect(0, 0, width, self.screen_height, header)
        };
        let height = options.len() as i32 + header_height;

        let mut window = Offscreen::new(width, height);
        window.set_default_foreground(colors::WHITE);
        window.print_rect_ex(
            0,
            0,
            width,
            height,
            BackgroundFlag::None,
            TextAlignment::Left,
            header,
        );
        for (index, option_text) in options.iter().enumerate() {
            let menu_letter = (b'a' + index as u8) as char;
            window.print_ex(
                0,
                header_height + index as i32,
                BackgroundFlag::None,
                TextAlignment::Left,
                format!("({}) {}", menu_letter, option_text),
            );
        }

        let x = self.screen_width / 2 - width / 2;
        let y = self.screen_height / 2 - height / 2;
        blit(&window, (0, 0), (width, height), &mut self.root, (x, y), 1.0, 0.7);

        self.root.flush();
        let key = self.root.wait_for_keypress(true);

        // letter to index
        if key.printable.is_ascii_alphabetic() {
            let index = key.printable.to_ascii_lowercase() as usize - 'a' as usize;
            debug!("menu answer {}", index);
            Some(index)
        } else {
            None
        }
    }

    fn main_menu(&mut self, options: &[String]) -> Option<usize> {
        if let Some(background) = &self.background {
            // twice the normal console resolution
            image::blit_2x(background, (0, 0), (-1, -1), &mut self.root, (0, 0));
        } else {
            self.root.set_default_background(colors::BLACK);
            self.root.clear();
        }

        self.root.set_default_foreground(tcod_color(LIGHT_YELLOW));
        self.root.print_ex(
            self.screen_width / 2,
            self.screen_height / 2 - 4,
            BackgroundFlag::None,
            TextAlignment::Center,
            "TOMBS OF THE ANCIENT KINGS",
        );
        self.root.print_ex(
            self.screen_width / 2,
            self.screen_height - 2,
            BackgroundFlag::None,
            TextAlignment::Center,
            format!("v{}", crate::VERSION),
        );

        self.menu("", options, MAIN_MENU_WIDTH)
    }

    fn toggle_fullscreen(&mut self) {
        let fullscreen = self.root.is_fullscreen();
        self.root.set_fullscreen(!fullscreen);
    }
}
