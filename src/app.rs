use crate::{prelude::*, screen::*};

/// The window-facing state driving the screen manager.
pub struct App {
    manager: ScreenManager,
    painter: Painter,
    framebuffer_size: vec2<usize>,
    cursor_pos: vec2<f64>,
}

impl App {
    pub fn new(geng: &Geng, config: &Rc<Config>, music: Box<dyn MusicPlayer>) -> Self {
        Self {
            manager: ScreenManager::new(config, music, rand::random()),
            painter: Painter::new(geng),
            framebuffer_size: vec2(1, 1),
            cursor_pos: vec2::ZERO,
        }
    }

    fn cursor_ui_pos(&self) -> vec2<f32> {
        self.painter
            .camera
            .screen_to_world(self.framebuffer_size.as_f32(), self.cursor_pos.as_f32())
    }
}

impl geng::State for App {
    fn handle_event(&mut self, event: geng::Event) {
        let input = match event {
            geng::Event::KeyPress { key } => Input::Key(key),
            geng::Event::CursorMove { position } => {
                self.cursor_pos = position;
                Input::CursorMove(self.cursor_ui_pos())
            }
            geng::Event::MousePress {
                button: geng::MouseButton::Left,
            } => Input::Click(self.cursor_ui_pos()),
            _ => return,
        };
        self.manager.handle_input(input);
    }

    fn update(&mut self, delta_time: f64) {
        self.manager.update(delta_time);
    }

    fn draw(&mut self, framebuffer: &mut ugli::Framebuffer) {
        self.framebuffer_size = framebuffer.size();
        self.manager.draw(&self.painter, framebuffer);
    }
}
