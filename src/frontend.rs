use crate::fov::Fov;
use crate::game::Game;
use crate::input::{names_under_mouse, Event, Mouse};
use crate::object::Object;
use crate::PLAYER;

/// Everything the frontend needs to draw one frame.
pub struct Frame<'a> {
    pub game: &'a Game,
    pub objects: &'a [Object],
    pub fov: &'a dyn Fov,
    pub mouse: Mouse,
    // true when the player moved or a new map was loaded this frame
    pub fov_recompute: bool,
}

impl<'a> Frame<'a> {
    pub fn player(&self) -> &'a Object {
        &self.objects[PLAYER]
    }

    // objects to draw: in fov, or remembered on an explored tile. non blocking ones first
    pub fn visible_objects(&self) -> Vec<&'a Object> {
        let map = &self.game.map;
        let mut to_draw: Vec<_> = self
            .objects
            .iter()
            .filter(|o| {
                self.fov.is_in_fov(o.x, o.y)
                    || (o.always_visible && map[o.x as usize][o.y as usize].explored)
            })
            .collect();
        to_draw.sort_by(|o1, o2| o1.blocks.cmp(&o2.blocks));
        to_draw
    }

    pub fn names_under_mouse(&self) -> String {
        names_under_mouse(self.mouse, self.objects, self.fov)
    }
}

/// The window the game runs in: drawing, menus and raw input.
///
/// The core never talks to a console library directly. Everything that needs
/// the screen or the keyboard goes through this trait, so the same turn loop
/// runs in the libtcod window and in headless tests.
pub trait Frontend {
    fn window_closed(&self) -> bool;

    // at most one pending key or mouse event, None when nothing happened
    fn poll(&mut self) -> Option<Event>;

    fn render(&mut self, frame: &Frame);

    // show a menu with options labelled a, b, c... and wait for the answer
    fn menu(&mut self, header: &str, options: &[String], width: i32) -> Option<usize>;

    // title screen with its own background
    fn main_menu(&mut self, options: &[String]) -> Option<usize>;

    fn toggle_fullscreen(&mut self);
}
