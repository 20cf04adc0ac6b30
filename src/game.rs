use geng::Key;

use crate::{battle::BattleScreen, main_menu::MainMenu, prelude::*, screen::*};

use rand::{rngs::StdRng, Rng, SeedableRng};

/// The grid map the player walks around on.
pub struct OverworldScreen {
    config: Rc<Config>,
    rng: StdRng,
    pub model: Overworld,
}

impl OverworldScreen {
    pub fn new(config: &Rc<Config>, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let model = Overworld::new(&config.overworld, &mut rng);
        Self {
            config: config.clone(),
            rng,
            model,
        }
    }

    /// Bottom left corner of a cell on screen. Grid rows count down from the top.
    fn cell_origin(&self, pos: vec2<Coord>) -> vec2<f32> {
        let cell = self.model.config.cell_size;
        vec2(
            pos.x as f32 * cell,
            SCREEN_SIZE.y - (pos.y + 1) as f32 * cell,
        )
    }
}

impl Screen for OverworldScreen {
    fn music(&self) -> Option<Track> {
        Some(Track::Adventure)
    }

    fn handle_input(&mut self, input: Input) -> Option<Transition> {
        let Input::Key(key) = input else {
            return None;
        };
        let dir = match key {
            Key::ArrowUp => vec2(0, -1),
            Key::ArrowDown => vec2(0, 1),
            Key::ArrowLeft => vec2(-1, 0),
            Key::ArrowRight => vec2(1, 0),
            Key::Escape => {
                let menu = MainMenu::new(&self.config, self.rng.gen());
                return Some(Transition::Switch(ActiveScreen::MainMenu(menu)));
            }
            _ => return None,
        };
        self.model.move_player(dir);
        None
    }

    fn tick(&mut self) -> Option<Transition> {
        let id = self.model.tick(&mut self.rng)?;
        let enemy = self.model.enemies.get(id)?;
        log::debug!("Encountered {} at {}", enemy.name, enemy.position);
        Some(Transition::Encounter(BattleScreen::encounter(
            &self.config,
            enemy.combatant(),
            id,
        )))
    }

    fn draw(&self, painter: &Painter, framebuffer: &mut ugli::Framebuffer) {
        let palette = &painter.palette;
        painter.clear(palette.blue, framebuffer);

        let cell = self.model.config.cell_size;
        for x in 0..=self.model.size.x {
            let x = x as f32 * cell;
            painter.quad(rect(x, 0.0, 1.0, SCREEN_SIZE.y), palette.black, framebuffer);
        }
        for y in 0..=self.model.size.y {
            let y = SCREEN_SIZE.y - y as f32 * cell;
            painter.quad(rect(0.0, y, SCREEN_SIZE.x, 1.0), palette.black, framebuffer);
        }

        for (_, enemy) in &self.model.enemies {
            let origin = self.cell_origin(enemy.position);
            let color = if enemy.name == "Boss" {
                palette.boss
            } else {
                palette.enemy
            };
            painter.quad(
                rect(origin.x + 4.0, origin.y + 4.0, cell - 8.0, cell - 8.0),
                color,
                framebuffer,
            );
            painter.text(
                &enemy.name,
                vec2(origin.x + 6.0, origin.y + cell - 6.0),
                10.0,
                vec2(0.0, 1.0),
                palette.white,
                framebuffer,
            );
        }

        let origin = self.cell_origin(self.model.player);
        painter.quad(
            rect(origin.x + 2.0, origin.y + 2.0, cell - 4.0, cell - 4.0),
            palette.player,
            framebuffer,
        );

        painter.text(
            "Use arrow keys to move - ESC to return to menu",
            vec2(10.0, SCREEN_SIZE.y - 10.0),
            18.0,
            vec2(0.0, 1.0),
            palette.white,
            framebuffer,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen() -> OverworldScreen {
        OverworldScreen::new(&crate::config::test_config(), 11)
    }

    #[test]
    fn arrows_move_on_the_grid() {
        let mut screen = screen();
        let start = screen.model.player;
        screen.handle_input(Input::Key(Key::ArrowUp));
        assert_eq!(screen.model.player, start + vec2(0, -1));
        screen.handle_input(Input::Key(Key::ArrowRight));
        screen.handle_input(Input::Key(Key::ArrowRight));
        assert_eq!(screen.model.player, start + vec2(2, -1));
        screen.handle_input(Input::Key(Key::ArrowDown));
        screen.handle_input(Input::Key(Key::ArrowLeft));
        assert_eq!(screen.model.player, start + vec2(1, 0));
    }

    #[test]
    fn escape_returns_to_the_menu() {
        let mut screen = screen();
        assert!(matches!(
            screen.handle_input(Input::Key(Key::Escape)),
            Some(Transition::Switch(ActiveScreen::MainMenu(_)))
        ));
    }

    #[test]
    fn collision_starts_a_battle_with_that_enemy() {
        let mut screen = screen();
        let player = screen.model.player;
        let (id, enemy) = screen.model.enemies.iter_mut().next().expect("map has enemies");
        enemy.position = player;
        enemy.move_timer = 100;
        let name = enemy.name.clone();

        let Some(Transition::Encounter(battle)) = screen.tick() else {
            panic!("expected an encounter");
        };
        assert_eq!(battle.model.enemy.name, name);
        assert_eq!(battle.origin(), Some(id));
        assert_eq!(battle.model.player.max_health, 50);
    }

    #[test]
    fn rows_are_drawn_from_the_top() {
        let screen = screen();
        assert_eq!(screen.cell_origin(vec2(0, 0)), vec2(0.0, 440.0));
        assert_eq!(screen.cell_origin(vec2(15, 11)), vec2(600.0, 0.0));
    }
}
