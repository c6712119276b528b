use serde::{Deserialize, Serialize};

// rgb color stored with every object and message, converted by the frontend when drawing
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }
}

// palette used by the game, same values as libtcod's named colors
pub const BLACK: Color = Color::new(0, 0, 0);
pub const WHITE: Color = Color::new(255, 255, 255);
pub const RED: Color = Color::new(255, 0, 0);
pub const DARK_RED: Color = Color::new(191, 0, 0);
pub const DARKER_RED: Color = Color::new(127, 0, 0);
pub const LIGHT_RED: Color = Color::new(255, 63, 63);
pub const ORANGE: Color = Color::new(255, 127, 0);
pub const DARKER_ORANGE: Color = Color::new(127, 63, 0);
pub const YELLOW: Color = Color::new(255, 255, 0);
pub const LIGHT_YELLOW: Color = Color::new(255, 255, 63);
pub const GREEN: Color = Color::new(0, 255, 0);
pub const LIGHT_GREEN: Color = Color::new(63, 255, 63);
pub const DARKER_GREEN: Color = Color::new(0, 127, 0);
pub const DESATURATED_GREEN: Color = Color::new(63, 127, 63);
pub const CYAN: Color = Color::new(0, 255, 255);
pub const LIGHT_CYAN: Color = Color::new(63, 255, 255);
pub const LIGHT_BLUE: Color = Color::new(63, 63, 255);
pub const VIOLET: Color = Color::new(127, 0, 255);
pub const LIGHT_VIOLET: Color = Color::new(159, 63, 255);
pub const PINK: Color = Color::new(255, 0, 127);
pub const LIGHT_GREY: Color = Color::new(159, 159, 159);

// map tile colors
pub const COLOR_DARK_WALL: Color = Color::new(0, 0, 100);
pub const COLOR_LIGHT_WALL: Color = Color::new(130, 110, 50);
pub const COLOR_DARK_GROUND: Color = Color::new(50, 50, 150);
pub const COLOR_LIGHT_GROUND: Color = Color::new(200, 180, 50);
