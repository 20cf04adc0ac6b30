use geng::Key;

use crate::{main_menu::MainMenu, prelude::*, screen::*};

pub struct BattleScreen {
    config: Rc<Config>,
    pub model: Battle,
    /// The overworld enemy being fought, if the battle was started from the map.
    origin: Option<EnemyId>,
    boss: bool,
    buttons: [(BattleAction, MenuButton); 3],
    hovered: Option<BattleAction>,
    /// Set once the result was handed over to the manager.
    reported: bool,
}

impl BattleScreen {
    fn new(config: &Rc<Config>, enemy: Combatant, origin: Option<EnemyId>) -> Self {
        let battle_config = &config.battle;
        let boss = enemy.max_health > battle_config.boss_health;
        let player = Combatant::new(battle_config.player_name.clone(), battle_config.player);
        log::debug!(
            "Battle against {} ({} hp), boss: {}",
            enemy.name,
            enemy.max_health,
            boss
        );

        let palette = Palette::new();
        let button = |x: f32, label: &str, color: Color| {
            MenuButton::new(rect(x, 50.0, 150.0, 50.0), label, color, palette.black)
        };
        Self {
            config: config.clone(),
            model: Battle::new(player, enemy, battle_config),
            origin,
            boss,
            buttons: [
                (BattleAction::Attack, button(50.0, "ATTACK", palette.attack)),
                (BattleAction::Heal, button(250.0, "HEAL", palette.heal)),
                (BattleAction::Plead, button(450.0, "PLEAD", palette.plead)),
            ],
            hovered: None,
            reported: false,
        }
    }

    /// A battle against an overworld enemy, reported back to the map when won.
    pub fn encounter(config: &Rc<Config>, enemy: Combatant, id: EnemyId) -> Self {
        Self::new(config, enemy, Some(id))
    }

    /// A battle against the practice enemy from the main menu.
    pub fn practice(config: &Rc<Config>) -> Self {
        let template = &config.battle.practice_enemy;
        Self::new(
            config,
            Combatant::new(template.name.clone(), template.stats),
            None,
        )
    }

    #[cfg(test)]
    pub fn origin(&self) -> Option<EnemyId> {
        self.origin
    }

    /// The map could not take the result, leave the player to exit manually.
    pub fn victory_fallback(&mut self) {
        self.model.log = "Victory! Press ESC to return.".to_owned();
    }

    fn act(&mut self, action: BattleAction) -> Option<Transition> {
        let winner = self.model.player_action(action)?;
        self.report(winner)
    }

    fn report(&mut self, winner: Fraction) -> Option<Transition> {
        if winner != Fraction::Player || self.reported {
            return None;
        }
        let enemy = self.origin?;
        self.reported = true;
        Some(Transition::BattleConcluded(BattleReport {
            outcome: self.model.outcome(),
            enemy,
        }))
    }
}

impl Screen for BattleScreen {
    fn music(&self) -> Option<Track> {
        Some(if self.boss { Track::Boss } else { Track::Battle })
    }

    fn handle_input(&mut self, input: Input) -> Option<Transition> {
        match input {
            Input::Key(Key::Escape) => {
                let menu = MainMenu::new(&self.config, rand::random());
                Some(Transition::Switch(ActiveScreen::MainMenu(menu)))
            }
            Input::Key(key) => {
                let action = match key {
                    Key::A => BattleAction::Attack,
                    Key::H => BattleAction::Heal,
                    Key::P => BattleAction::Plead,
                    _ => return None,
                };
                self.act(action)
            }
            Input::Click(pos) => {
                let action = self
                    .buttons
                    .iter()
                    .find(|(_, button)| button.contains(pos))
                    .map(|(action, _)| *action)?;
                self.act(action)
            }
            Input::CursorMove(pos) => {
                self.hovered = self
                    .buttons
                    .iter()
                    .find(|(_, button)| button.contains(pos))
                    .map(|(action, _)| *action);
                None
            }
        }
    }

    fn tick(&mut self) -> Option<Transition> {
        let winner = self.model.tick()?;
        self.report(winner)
    }

    fn draw(&self, painter: &Painter, framebuffer: &mut ugli::Framebuffer) {
        let palette = &painter.palette;
        painter.clear(palette.black, framebuffer);

        let center = SCREEN_SIZE.x / 2.0;
        let top = SCREEN_SIZE.y;
        painter.text(
            "BATTLE!",
            vec2(center, top - 20.0),
            28.0,
            vec2(0.5, 1.0),
            palette.white,
            framebuffer,
        );

        let sides = [
            (&self.model.player, 50.0),
            (&self.model.enemy, SCREEN_SIZE.x - 200.0),
        ];
        let left = vec2(0.0, 1.0);
        for (fighter, x) in sides {
            painter.text(
                &fighter.name,
                vec2(x, top - 80.0),
                20.0,
                left,
                palette.white,
                framebuffer,
            );
            let bar = rect(x, top - 130.0, 150.0, 20.0);
            painter.health_bar(bar, fighter.health_ratio(), framebuffer);
            painter.text_centered(
                &format!("{}/{}", fighter.shown_health(), fighter.max_health),
                bar.center(),
                16.0,
                palette.white,
                framebuffer,
            );
            painter.text(
                &format!("DMG: {} | HEAL: {}", fighter.damage, fighter.heal),
                vec2(x, top - 140.0),
                16.0,
                left,
                palette.white,
                framebuffer,
            );
        }

        painter.text_centered(
            &self.model.log,
            vec2(center, SCREEN_SIZE.y / 2.0 + 50.0),
            20.0,
            palette.white,
            framebuffer,
        );

        if self.model.is_over() {
            painter.text_centered(
                "Press ESC to return to menu",
                vec2(center, 30.0),
                18.0,
                palette.white,
                framebuffer,
            );
            return;
        }

        let (turn, color) = if self.model.is_player_turn() {
            ("YOUR TURN", palette.your_turn)
        } else {
            ("ENEMY'S TURN", palette.enemy_turn)
        };
        painter.text_centered(
            turn,
            vec2(center, SCREEN_SIZE.y / 2.0 - 30.0),
            20.0,
            color,
            framebuffer,
        );

        if self.model.is_player_turn() {
            for (action, button) in &self.buttons {
                painter.button(button, self.hovered == Some(*action), framebuffer);
            }
            painter.text_centered(
                "(A) Attack | (H) Heal | (P) Plead | Click or Press Keys",
                vec2(center, 30.0),
                16.0,
                palette.white,
                framebuffer,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn config() -> Rc<Config> {
        crate::config::test_config()
    }

    fn enemy_id() -> EnemyId {
        let mut arena = Arena::new();
        let template = config().overworld.templates[0].clone();
        let mut rng = StdRng::seed_from_u64(0);
        let enemy = Enemy::from_template(&template, vec2(0, 0), &config().overworld, &mut rng);
        arena.insert(enemy)
    }

    fn fighter(name: &str, health: Hp) -> Combatant {
        Combatant::new(
            name,
            CombatStats {
                health,
                damage: 6,
                heal: 6,
            },
        )
    }

    #[test]
    fn boss_music_above_the_threshold() {
        let config = config();
        let regular = BattleScreen::encounter(&config, fighter("Orc", 40), enemy_id());
        assert_eq!(regular.music(), Some(Track::Battle));
        let boss = BattleScreen::encounter(&config, fighter("Boss", 55), enemy_id());
        assert_eq!(boss.music(), Some(Track::Boss));
        let edge = BattleScreen::encounter(&config, fighter("Edge", 50), enemy_id());
        assert_eq!(edge.music(), Some(Track::Battle));
    }

    #[test]
    fn practice_uses_the_configured_enemy() {
        let screen = BattleScreen::practice(&config());
        assert_eq!(screen.model.enemy.name, "Enemy");
        assert_eq!(screen.model.enemy.max_health, 50);
        assert_eq!(screen.model.player.name, "The Hero");
        assert_eq!(screen.origin(), None);
    }

    #[test]
    fn buttons_and_keys_pick_actions() {
        let mut screen = BattleScreen::practice(&config());
        screen.handle_input(Input::CursorMove(vec2(300.0, 70.0)));
        assert_eq!(screen.hovered, Some(BattleAction::Heal));

        screen.handle_input(Input::Click(vec2(100.0, 75.0)));
        assert_eq!(screen.model.enemy.health, 35);
        // Not the player's turn anymore
        screen.handle_input(Input::Key(Key::A));
        assert_eq!(screen.model.enemy.health, 35);
    }

    #[test]
    fn victory_is_reported_once() {
        let id = enemy_id();
        let mut screen = BattleScreen::encounter(&config(), fighter("Imp", 15), id);
        let report = screen.handle_input(Input::Key(Key::A));
        let Some(Transition::BattleConcluded(report)) = report else {
            panic!("expected a battle report");
        };
        assert_eq!(
            report,
            BattleReport {
                outcome: BattleOutcome::PlayerWon,
                enemy: id,
            }
        );
        assert!(screen.report(Fraction::Player).is_none());
        assert!(screen.tick().is_none());
    }

    #[test]
    fn defeat_is_not_reported() {
        let mut screen = BattleScreen::encounter(&config(), fighter("Imp", 500), enemy_id());
        screen.model.player.health = 1;
        screen.handle_input(Input::Key(Key::P));
        for _ in 0..1_000 {
            assert!(screen.tick().is_none());
        }
        assert_eq!(screen.model.outcome(), BattleOutcome::EnemyWon);
        assert!(matches!(
            screen.handle_input(Input::Key(Key::Escape)),
            Some(Transition::Switch(ActiveScreen::MainMenu(_)))
        ));
    }
}
