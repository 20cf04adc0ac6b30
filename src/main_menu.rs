use crate::{
    battle::BattleScreen, game::OverworldScreen, prelude::*, screen::*, title::TitleScreen,
};

use rand::{rngs::StdRng, Rng, SeedableRng};

const BAR_COUNT: usize = 8;
const BAR_MAX_HEIGHT: f32 = 120.0;
const BAR_MARGIN: f32 = 12.0;

struct Bar {
    phase: f32,
    speed: f32,
    color: Color,
}

pub struct MainMenu {
    config: Rc<Config>,
    rng: StdRng,
    bars: Vec<Bar>,
    bar_time: f32,
}

impl MainMenu {
    pub fn new(config: &Rc<Config>, seed: u64) -> Self {
        let bars = (0..BAR_COUNT)
            .map(|i| {
                let t = i as f32 / BAR_COUNT as f32;
                Bar {
                    phase: t * 2.0 * std::f32::consts::PI,
                    speed: 0.8 + (i % 4) as f32 * 0.25,
                    color: Hsva::new(t, 0.75, 0.85, 1.0).into(),
                }
            })
            .collect();
        Self {
            config: config.clone(),
            rng: StdRng::seed_from_u64(seed),
            bars,
            bar_time: 0.0,
        }
    }

    fn bar_height(&self, bar: &Bar) -> f32 {
        ((self.bar_time * bar.speed + bar.phase).sin() + 1.0) / 2.0 * BAR_MAX_HEIGHT
    }
}

impl Screen for MainMenu {
    fn music(&self) -> Option<Track> {
        Some(Track::Menu)
    }

    fn handle_input(&mut self, input: Input) -> Option<Transition> {
        let Input::Key(key) = input else {
            return None;
        };
        let next = match key {
            geng::Key::Enter => {
                ActiveScreen::Overworld(OverworldScreen::new(&self.config, self.rng.gen()))
            }
            geng::Key::Space => ActiveScreen::Battle(BattleScreen::practice(&self.config)),
            geng::Key::Escape => {
                ActiveScreen::Title(TitleScreen::new(&self.config, self.rng.gen()))
            }
            _ => return None,
        };
        Some(Transition::Switch(next))
    }

    fn tick(&mut self) -> Option<Transition> {
        self.bar_time += 0.06;
        None
    }

    fn draw(&self, painter: &Painter, framebuffer: &mut ugli::Framebuffer) {
        let palette = &painter.palette;
        painter.clear(palette.green, framebuffer);

        let center = SCREEN_SIZE.x / 2.0;
        let top = SCREEN_SIZE.y * 5.0 / 6.0;
        painter.text_centered(
            "Welcome To A New Adventure!",
            vec2(center, top),
            36.0,
            palette.white,
            framebuffer,
        );
        let lines = [
            ("Make a selection:", 28.0),
            ("Press ENTER to start the adventure!", 20.0),
            ("Press SPACE to test out the battle feature?", 20.0),
            ("Or press ESC to return...", 20.0),
        ];
        for (i, (line, size)) in lines.into_iter().enumerate() {
            let pos = vec2(center, top - 50.0 * (i + 1) as f32);
            painter.text_centered(line, pos, size, palette.white, framebuffer);
        }

        let bar_width = (SCREEN_SIZE.x / (BAR_COUNT * 3) as f32).floor().max(8.0);
        let spacing = (bar_width / 2.0).floor();
        let total_width = BAR_COUNT as f32 * bar_width + (BAR_COUNT - 1) as f32 * spacing;
        let start = ((SCREEN_SIZE.x - total_width) / 2.0).floor();
        for (i, bar) in self.bars.iter().enumerate() {
            let x = start + i as f32 * (bar_width + spacing);
            let height = self.bar_height(bar);
            painter.quad(rect(x, BAR_MARGIN, bar_width, height), bar.color, framebuffer);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu() -> MainMenu {
        MainMenu::new(&crate::config::test_config(), 3)
    }

    fn press(menu: &mut MainMenu, key: geng::Key) -> Option<ActiveScreen> {
        match menu.handle_input(Input::Key(key)) {
            Some(Transition::Switch(screen)) => Some(screen),
            Some(_) => panic!("the menu only switches screens"),
            None => None,
        }
    }

    #[test]
    fn keys_pick_the_next_screen() {
        let mut menu = menu();
        assert!(matches!(
            press(&mut menu, geng::Key::Enter),
            Some(ActiveScreen::Overworld(_))
        ));
        assert!(matches!(
            press(&mut menu, geng::Key::Space),
            Some(ActiveScreen::Battle(_))
        ));
        assert!(matches!(
            press(&mut menu, geng::Key::Escape),
            Some(ActiveScreen::Title(_))
        ));
        assert!(press(&mut menu, geng::Key::A).is_none());
        assert!(menu.handle_input(Input::Click(vec2(320.0, 240.0))).is_none());
    }

    #[test]
    fn bars_stay_within_their_height() {
        let mut menu = menu();
        for _ in 0..500 {
            menu.tick();
            for bar in &menu.bars {
                let height = menu.bar_height(bar);
                assert!((0.0..=BAR_MAX_HEIGHT).contains(&height));
            }
        }
    }

    #[test]
    fn bars_walk_around_the_hue_circle() {
        let menu = menu();
        let first = menu.bars[0].color;
        assert!((first.r - 0.85).abs() < 1e-4);
        assert!((first.g - first.b).abs() < 1e-4);
        assert!(first.g < first.r);
        for pair in menu.bars.windows(2) {
            assert_ne!(pair[0].color, pair[1].color);
        }
    }
}
