#![allow(dead_code)]

use std::time::Instant;

use glyphtree::component::Element;
use glyphtree::context::Handle;
use glyphtree::core::buffer::BufferDisplay;
use glyphtree::core::input::DriverInput;
use glyphtree::core::input::MouseButton;
use glyphtree::core::keymap::key_char;
use glyphtree::scene::Scene;
use glyphtree::scheduler::MainLoop;
use glyphtree::scheduler::SchedulerOptions;

/// A scene whose tree comes from a closure.
pub struct Build<F>(pub F);

impl<F: FnMut(&Handle) -> Element> Scene for Build<F> {
    fn create(&mut self, handle: &Handle) -> Option<Element> {
        Some((self.0)(handle))
    }
}

pub struct App {
    pub main: MainLoop<BufferDisplay>,
    pub now: Instant,
}

impl App {
    pub fn new(height: u16, width: u16, scene: impl Scene + 'static) -> Self {
        let main = MainLoop::new(BufferDisplay::new(height, width), SchedulerOptions::default());
        main.change_scene(scene);
        let mut app = Self {
            main,
            now: Instant::now(),
        };
        app.cycle();
        app
    }

    /// Runs one cycle without advancing the clock, so no ticks fire.
    pub fn cycle(&mut self) -> bool {
        self.main.run_cycle(self.now)
    }

    pub fn send(&mut self, input: DriverInput) {
        self.main.display_mut().push_input(input);
        self.cycle();
    }

    pub fn key(&mut self, c: char) {
        self.send(DriverInput::Key(key_char(c)));
    }

    /// Press and release at one cell; each half takes a cycle.
    pub fn click(&mut self, x: i32, y: i32) {
        let button = MouseButton::Left;
        self.send(DriverInput::Press { button, x, y });
        self.send(DriverInput::Release { button, x, y });
    }

    pub fn lines(&self) -> Vec<String> {
        self.main.display().lines()
    }
}
