use crate::{main_menu::MainMenu, prelude::*, screen::*};

use rand::{rngs::StdRng, Rng, SeedableRng};

struct Square {
    size: f32,
    /// Bottom left corner.
    pos: vec2<f32>,
    velocity: vec2<f32>,
    color: Color,
}

impl Square {
    fn random(rng: &mut impl Rng) -> Self {
        let size = rng.gen_range(24.0..=68.0);
        Self {
            size,
            pos: vec2(
                rng.gen_range(0.0..=SCREEN_SIZE.x - size),
                rng.gen_range(0.0..=SCREEN_SIZE.y - size),
            ),
            velocity: vec2(
                random_sign(rng) * rng.gen_range(1.2..=3.0),
                random_sign(rng) * rng.gen_range(1.0..=2.8),
            ),
            color: random_color(rng),
        }
    }

    /// Move one step, bouncing off the screen edges with a new colour.
    fn update(&mut self, rng: &mut impl Rng) {
        self.pos += self.velocity;
        let max = SCREEN_SIZE - vec2(self.size, self.size);
        let mut bounced = false;
        if self.pos.x <= 0.0 {
            self.pos.x = 0.0;
            self.velocity.x = self.velocity.x.abs();
            bounced = true;
        } else if self.pos.x >= max.x {
            self.pos.x = max.x;
            self.velocity.x = -self.velocity.x.abs();
            bounced = true;
        }
        if self.pos.y <= 0.0 {
            self.pos.y = 0.0;
            self.velocity.y = self.velocity.y.abs();
            bounced = true;
        } else if self.pos.y >= max.y {
            self.pos.y = max.y;
            self.velocity.y = -self.velocity.y.abs();
            bounced = true;
        }
        if bounced {
            self.color = random_color(rng);
        }
    }
}

fn random_sign(rng: &mut impl Rng) -> f32 {
    if rng.gen_bool(0.5) {
        1.0
    } else {
        -1.0
    }
}

fn random_color(rng: &mut impl Rng) -> Color {
    Rgba::<u8>::opaque(
        rng.gen_range(50..=255),
        rng.gen_range(50..=255),
        rng.gen_range(50..=255),
    )
    .convert()
}

pub struct TitleScreen {
    config: Rc<Config>,
    rng: StdRng,
    squares: Vec<Square>,
    start: MenuButton,
    hovered: bool,
    /// Ticks left until the main menu once start was pressed.
    stinger: Option<Ticks>,
}

impl TitleScreen {
    pub fn new(config: &Rc<Config>, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let palette = Palette::new();

        let mut squares = vec![Square {
            size: 40.0,
            pos: vec2(50.0, 50.0),
            velocity: vec2(2.4, 1.8),
            color: Rgba::<u8>::opaque(200, 60, 60).convert(),
        }];
        squares.extend((1..config.title.squares).map(|_| Square::random(&mut rng)));

        Self {
            config: config.clone(),
            rng,
            squares,
            start: MenuButton::new(
                rect(220.0, 190.0, 200.0, 50.0),
                "Start Game",
                palette.blue,
                palette.white,
            ),
            hovered: false,
            stinger: None,
        }
    }
}

impl Screen for TitleScreen {
    fn music(&self) -> Option<Track> {
        Some(if self.stinger.is_some() {
            Track::Stinger
        } else {
            Track::Title
        })
    }

    fn handle_input(&mut self, input: Input) -> Option<Transition> {
        if self.stinger.is_some() {
            return None;
        }
        match input {
            Input::CursorMove(pos) => self.hovered = self.start.contains(pos),
            Input::Click(pos) if self.start.contains(pos) => {
                log::debug!("Start pressed");
                self.stinger = Some(self.config.title.stinger_delay);
            }
            _ => {}
        }
        None
    }

    fn tick(&mut self) -> Option<Transition> {
        for square in &mut self.squares {
            square.update(&mut self.rng);
        }

        let timer = self.stinger.as_mut()?;
        *timer = timer.saturating_sub(1);
        if *timer > 0 {
            return None;
        }
        let menu = MainMenu::new(&self.config, self.rng.gen());
        Some(Transition::Switch(ActiveScreen::MainMenu(menu)))
    }

    fn draw(&self, painter: &Painter, framebuffer: &mut ugli::Framebuffer) {
        let palette = &painter.palette;
        painter.clear(palette.white, framebuffer);
        for square in &self.squares {
            painter.quad(
                rect(square.pos.x, square.pos.y, square.size, square.size),
                square.color,
                framebuffer,
            );
        }
        painter.text_centered(
            &self.config.title.caption,
            vec2(SCREEN_SIZE.x / 2.0, SCREEN_SIZE.y * 2.0 / 3.0),
            36.0,
            palette.black,
            framebuffer,
        );

        let color = if self.hovered {
            palette.light_blue
        } else {
            palette.blue
        };
        painter.quad(self.start.target, color, framebuffer);
        painter.text_centered(
            &self.start.label,
            self.start.target.center(),
            28.0,
            self.start.text_color,
            framebuffer,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn title() -> TitleScreen {
        TitleScreen::new(&crate::config::test_config(), 7)
    }

    #[test]
    fn squares_stay_on_screen() {
        let mut title = title();
        assert_eq!(title.squares.len(), title.config.title.squares);
        for _ in 0..2_000 {
            title.tick();
        }
        for square in &title.squares {
            assert!(square.pos.x >= 0.0 && square.pos.x <= SCREEN_SIZE.x - square.size);
            assert!(square.pos.y >= 0.0 && square.pos.y <= SCREEN_SIZE.y - square.size);
        }
    }

    #[test]
    fn hovering_the_start_button() {
        let mut title = title();
        title.handle_input(Input::CursorMove(vec2(300.0, 200.0)));
        assert!(title.hovered);
        title.handle_input(Input::CursorMove(vec2(10.0, 10.0)));
        assert!(!title.hovered);
    }

    #[test]
    fn clicks_outside_the_button_do_nothing() {
        let mut title = title();
        title.handle_input(Input::Click(vec2(10.0, 10.0)));
        assert_eq!(title.stinger, None);
        assert_eq!(title.music(), Some(Track::Title));
    }

    #[test]
    fn stinger_delays_the_menu() {
        let mut title = title();
        let delay = title.config.title.stinger_delay;
        title.handle_input(Input::Click(vec2(320.0, 215.0)));
        assert_eq!(title.music(), Some(Track::Stinger));

        // Ignored while the stinger plays
        title.handle_input(Input::Click(vec2(320.0, 215.0)));
        for _ in 1..delay {
            assert!(title.tick().is_none());
        }
        assert!(matches!(
            title.tick(),
            Some(Transition::Switch(ActiveScreen::MainMenu(_)))
        ));
    }
}
