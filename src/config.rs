use crate::prelude::*;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Simulation ticks per second.
    pub tick_rate: f64,
    /// The most ticks simulated in a single frame.
    pub max_ticks_per_frame: usize,
    pub window_title: String,
    pub title: TitleConfig,
    pub music: MusicConfig,
    pub battle: BattleConfig,
    pub overworld: OverworldConfig,
    pub stocks: StocksConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TitleConfig {
    pub caption: String,
    /// Ticks between pressing start and the main menu, while the stinger plays.
    pub stinger_delay: Ticks,
    /// Number of bouncing squares behind the title.
    pub squares: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MusicConfig {
    pub volume: f64,
    /// Paths relative to the assets directory.
    pub title: String,
    pub stinger: String,
    pub menu: String,
    pub adventure: String,
    pub battle: String,
    pub boss: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BattleConfig {
    /// How long an action's message is shown before the other side moves.
    pub action_delay: Ticks,
    /// The enemy heals when below this fraction of its max health.
    pub enemy_heal_threshold: f64,
    /// Enemies with more max health than this get the boss soundtrack.
    pub boss_health: Hp,
    pub player_name: String,
    pub player: CombatStats,
    /// The opponent for battles started from the main menu.
    pub practice_enemy: EnemyTemplate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverworldConfig {
    /// Cell size in pixels.
    pub cell_size: f32,
    pub width: Coord,
    pub height: Coord,
    pub templates: Vec<EnemyTemplate>,
    /// Starting positions, each paired with the template of the same index.
    pub initial_enemies: Vec<(Coord, Coord)>,
    pub spawn_interval: Ticks,
    pub spawn_attempts: usize,
    pub max_enemies: usize,
    /// Inclusive range of ticks between enemy steps.
    pub move_delay: (Ticks, Ticks),
    /// Chance to pick a new direction after a successful step.
    pub turn_chance: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StocksConfig {
    pub months: usize,
    pub title: String,
    pub tickers: Vec<TickerConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickerConfig {
    pub symbol: String,
    pub label: String,
}

impl Config {
    pub async fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = file::load_string(path)
            .await
            .context(format!("when loading config file at {:?}", path))?;
        Self::parse(&content).context(format!("when parsing config file at {:?}", path))
    }

    pub fn parse(content: &str) -> anyhow::Result<Self> {
        Ok(ron::from_str(content)?)
    }

    pub fn tick_duration(&self) -> f64 {
        1.0 / self.tick_rate
    }
}

#[cfg(test)]
pub fn test_config() -> Rc<Config> {
    Rc::new(Config::parse(include_str!("../assets/config.ron")).expect("bundled config is valid"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_config_matches_defaults() {
        let config = test_config();
        assert_eq!(config.battle.action_delay, 180);
        assert_eq!(config.battle.player.health, 50);
        assert_eq!(config.overworld.width, 16);
        assert_eq!(config.overworld.height, 12);
        assert_eq!(config.overworld.templates.len(), 4);
        assert_eq!(config.overworld.max_enemies, 8);
        assert_eq!(config.stocks.tickers.len(), 4);
    }

    #[test]
    fn load_reads_the_bundled_file() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/assets/config.ron");
        let config = futures::executor::block_on(Config::load(path)).unwrap();
        assert_eq!(config.window_title, test_config().window_title);
    }

    #[test]
    fn load_reports_the_missing_path() {
        let err = futures::executor::block_on(Config::load("no/such/config.ron")).unwrap_err();
        assert!(format!("{:#}", err).contains("no/such/config.ron"));
    }
}
