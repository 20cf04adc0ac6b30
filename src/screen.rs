use crate::{
    battle::BattleScreen, game::OverworldScreen, main_menu::MainMenu, prelude::*,
    title::TitleScreen,
};

/// Window input, already converted into the UI coordinate space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Input {
    Key(geng::Key),
    /// Left mouse button press.
    Click(vec2<f32>),
    CursorMove(vec2<f32>),
}

pub trait Screen {
    /// The track this screen wants playing right now.
    fn music(&self) -> Option<Track>;
    fn handle_input(&mut self, input: Input) -> Option<Transition>;
    /// Advance by one fixed tick.
    fn tick(&mut self) -> Option<Transition>;
    fn draw(&self, painter: &Painter, framebuffer: &mut ugli::Framebuffer);
}

pub enum ActiveScreen {
    Title(TitleScreen),
    MainMenu(MainMenu),
    Overworld(OverworldScreen),
    Battle(BattleScreen),
}

impl ActiveScreen {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Title(_) => "title",
            Self::MainMenu(_) => "main menu",
            Self::Overworld(_) => "overworld",
            Self::Battle(_) => "battle",
        }
    }

    pub fn screen(&self) -> &dyn Screen {
        match self {
            Self::Title(screen) => screen,
            Self::MainMenu(screen) => screen,
            Self::Overworld(screen) => screen,
            Self::Battle(screen) => screen,
        }
    }

    pub fn screen_mut(&mut self) -> &mut dyn Screen {
        match self {
            Self::Title(screen) => screen,
            Self::MainMenu(screen) => screen,
            Self::Overworld(screen) => screen,
            Self::Battle(screen) => screen,
        }
    }
}

/// What a screen asks the manager to do.
pub enum Transition {
    /// Replace the current screen.
    Switch(ActiveScreen),
    /// Start a battle, keeping the current overworld to return to.
    Encounter(BattleScreen),
    /// A battle started from the overworld was won.
    BattleConcluded(BattleReport),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BattleReport {
    pub outcome: BattleOutcome,
    pub enemy: EnemyId,
}

/// A transition waiting for the next tick. Battle reports never wait.
enum Pending {
    Switch(ActiveScreen),
    Encounter(BattleScreen),
}

/// Holds the single active screen and runs it at a fixed tick rate.
pub struct ScreenManager {
    config: Rc<Config>,
    current: ActiveScreen,
    /// The overworld waiting for the current battle to end.
    parked: Option<OverworldScreen>,
    /// Applied at the start of the next tick.
    pending: Option<Pending>,
    music: Box<dyn MusicPlayer>,
    playing: Option<Track>,
    accumulator: f64,
}

impl ScreenManager {
    pub fn new(config: &Rc<Config>, music: Box<dyn MusicPlayer>, seed: u64) -> Self {
        let mut manager = Self {
            config: config.clone(),
            current: ActiveScreen::Title(TitleScreen::new(config, seed)),
            parked: None,
            pending: None,
            music,
            playing: None,
            accumulator: 0.0,
        };
        manager.sync_music();
        manager
    }

    #[cfg(test)]
    pub fn current(&self) -> &ActiveScreen {
        &self.current
    }

    #[cfg(test)]
    pub fn parked(&self) -> Option<&OverworldScreen> {
        self.parked.as_ref()
    }

    pub fn handle_input(&mut self, input: Input) {
        if self.pending.is_some() {
            log::trace!("Dropping {:?}, a transition is pending", input);
            return;
        }
        if let Some(transition) = self.current.screen_mut().handle_input(input) {
            self.request(transition);
        }
    }

    /// Run as many whole ticks as `delta_time` seconds cover.
    pub fn update(&mut self, delta_time: f64) {
        self.apply_pending();

        self.accumulator += delta_time;
        let step = self.config.tick_duration();
        let mut ticks = 0;
        while self.accumulator >= step && ticks < self.config.max_ticks_per_frame {
            self.accumulator -= step;
            ticks += 1;
            self.tick();
        }
        if self.accumulator >= step {
            log::debug!("Frame took too long, skipping {:.3}s", self.accumulator);
            self.accumulator %= step;
        }
    }

    pub fn tick(&mut self) {
        self.apply_pending();
        if let Some(transition) = self.current.screen_mut().tick() {
            self.request(transition);
        }
        self.apply_pending();
        self.sync_music();
    }

    pub fn draw(&self, painter: &Painter, framebuffer: &mut ugli::Framebuffer) {
        self.current.screen().draw(painter, framebuffer);
    }

    fn request(&mut self, transition: Transition) {
        match transition {
            Transition::Switch(screen) => self.pending = Some(Pending::Switch(screen)),
            Transition::Encounter(battle) => self.pending = Some(Pending::Encounter(battle)),
            Transition::BattleConcluded(report) => self.conclude_battle(report),
        }
    }

    fn conclude_battle(&mut self, report: BattleReport) {
        if report.outcome != BattleOutcome::PlayerWon {
            return;
        }
        let Some(mut map) = self.parked.take() else {
            log::warn!("Battle won but there is no map to return to");
            self.victory_fallback();
            return;
        };
        match map.model.resolve_victory(report.enemy) {
            Ok(()) => {
                self.pending = Some(Pending::Switch(ActiveScreen::Overworld(map)));
            }
            Err(err) => {
                log::warn!("Failed to apply battle result: {}", err);
                self.parked = Some(map);
                self.victory_fallback();
            }
        }
    }

    fn victory_fallback(&mut self) {
        if let ActiveScreen::Battle(battle) = &mut self.current {
            battle.victory_fallback();
        }
    }

    fn apply_pending(&mut self) {
        let Some(pending) = self.pending.take() else {
            return;
        };
        match pending {
            Pending::Switch(screen) => {
                log::debug!("Switching from {} to {}", self.current.name(), screen.name());
                self.parked = None;
                self.current = screen;
            }
            Pending::Encounter(battle) => {
                log::debug!("Starting a battle from {}", self.current.name());
                let previous = std::mem::replace(&mut self.current, ActiveScreen::Battle(battle));
                match previous {
                    ActiveScreen::Overworld(map) => self.parked = Some(map),
                    other => log::warn!(
                        "Battle started from {}, there is no map to return to",
                        other.name()
                    ),
                }
            }
        }
        self.restart_music();
    }

    fn restart_music(&mut self) {
        self.music.stop();
        self.playing = None;
        self.sync_music();
    }

    fn sync_music(&mut self) {
        let wanted = self.current.screen().music();
        if wanted == self.playing {
            return;
        }
        match wanted {
            Some(track) => self.music.play(track),
            None => self.music.stop(),
        }
        self.playing = wanted;
    }
}
