use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use log::warn;

use crate::frontend::{Frame, Frontend};
use crate::input::{Event, Key, Mouse};

// one scripted frame of user activity
#[derive(Clone, Debug, PartialEq)]
pub enum Step {
    Key(Key),
    Mouse(Mouse),
    // answer to the next menu, None cancels it
    Choose(Option<usize>),
    // a frame where nothing is pressed
    Idle,
}

// summary of one rendered frame
#[derive(Clone, Debug, PartialEq)]
pub struct RenderRecord {
    pub player_pos: (i32, i32),
    pub fov_recompute: bool,
    pub object_count: usize,
    pub message_count: usize,
    pub inventory_count: usize,
    pub dungeon_level: u32,
}

// what the scripted window showed, shared with the test that owns the script
#[derive(Clone, Debug, Default)]
pub struct Transcript {
    pub renders: Vec<RenderRecord>,
    pub menus: Vec<String>,
    pub fullscreen: bool,
}

/// Frontend that plays back a fixed script instead of reading a keyboard.
///
/// Every poll or menu consumes exactly one step, and the window reports itself
/// closed once the script runs out, so any session driven by it terminates.
pub struct ScriptedFrontend {
    steps: VecDeque<Step>,
    transcript: Rc<RefCell<Transcript>>,
}

impl ScriptedFrontend {
    pub fn new(steps: Vec<Step>) -> Self {
        ScriptedFrontend {
            steps: steps.into(),
            transcript: Rc::new(RefCell::new(Transcript::default())),
        }
    }

    pub fn transcript(&self) -> Rc<RefCell<Transcript>> {
        Rc::clone(&self.transcript)
    }

    fn answer(&mut self, header: &str) -> Option<usize> {
        self.transcript.borrow_mut().menus.push(header.to_string());
        match self.steps.pop_front() {
            Some(Step::Choose(choice)) => choice,
            Some(other) => {
                warn!("script step {:?} used to answer menu {:?}", other, header);
                None
            }
            None => None,
        }
    }
}

impl Frontend for ScriptedFrontend {
    fn window_closed(&self) -> bool {
        self.steps.is_empty()
    }

    fn poll(&mut self) -> Option<Event> {
        match self.steps.pop_front()? {
            Step::Key(key) => Some(Event::Key(key)),
            Step::Mouse(mouse) => Some(Event::Mouse(mouse)),
            Step::Idle => None,
            Step::Choose(choice) => {
                warn!("script answer {:?} consumed by input poll", choice);
                None
            }
        }
    }

    fn render(&mut self, frame: &Frame) {
        let record = RenderRecord {
            player_pos: frame.player().pos(),
            fov_recompute: frame.fov_recompute,
            object_count: frame.objects.len(),
            message_count: frame.game.messages.len(),
            inventory_count: frame.game.inventory.len(),
            dungeon_level: frame.game.dungeon_level,
        };
        self.transcript.borrow_mut().renders.push(record);
    }

    fn menu(&mut self, header: &str, _options: &[String], _width: i32) -> Option<usize> {
        self.answer(header)
    }

    fn main_menu(&mut self, _options: &[String]) -> Option<usize> {
        self.answer("main menu")
    }

    fn toggle_fullscreen(&mut self) {
        let mut transcript = self.transcript.borrow_mut();
        transcript.fullscreen = !transcript.fullscreen;
    }
}
