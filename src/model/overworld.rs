use super::*;

use rand::{seq::SliceRandom, Rng};

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum MapError {
    #[error("enemy {0:?} is not on the map")]
    UnknownEnemy(EnemyId),
}

/// The grid map with the player and the wandering enemies.
pub struct Overworld {
    pub config: OverworldConfig,
    pub size: vec2<Coord>,
    pub player: vec2<Coord>,
    pub enemies: Arena<Enemy>,
    /// Ticks until the next spawn attempt.
    pub spawn_timer: Ticks,
}

impl Overworld {
    pub fn new(config: &OverworldConfig, rng: &mut impl Rng) -> Self {
        let size = vec2(config.width, config.height);
        let mut map = Self {
            config: config.clone(),
            size,
            player: vec2(size.x / 2, size.y / 2),
            enemies: Arena::new(),
            spawn_timer: 0,
        };
        for (template, &(x, y)) in config.templates.iter().zip(&config.initial_enemies) {
            let enemy = Enemy::from_template(template, vec2(x, y), config, rng);
            map.enemies.insert(enemy);
        }
        map
    }

    pub fn clamp_pos(&self, pos: vec2<Coord>) -> vec2<Coord> {
        vec2(
            pos.x.clamp(0, self.size.x - 1),
            pos.y.clamp(0, self.size.y - 1),
        )
    }

    /// Step the player by `dir`, staying inside the map.
    pub fn move_player(&mut self, dir: vec2<Coord>) {
        self.player = self.clamp_pos(self.player + dir);
    }

    pub fn enemy_at(&self, pos: vec2<Coord>) -> Option<EnemyId> {
        self.enemies
            .iter()
            .find(|(_, enemy)| enemy.position == pos)
            .map(|(id, _)| id)
    }

    /// Advance the map by one tick.
    /// Returns the enemy the player ran into, if any.
    pub fn tick(&mut self, rng: &mut impl Rng) -> Option<EnemyId> {
        self.move_enemies(rng);

        if let Some(enemy) = self.enemy_at(self.player) {
            log::debug!("Encounter with enemy {:?}", enemy);
            return Some(enemy);
        }

        if self.spawn_timer == 0 {
            self.spawn_enemy(rng);
            self.spawn_timer = self.config.spawn_interval;
        } else {
            self.spawn_timer -= 1;
        }
        None
    }

    fn move_enemies(&mut self, rng: &mut impl Rng) {
        let size = self.size;
        let config = &self.config;
        for (_, enemy) in &mut self.enemies {
            enemy.move_timer = enemy.move_timer.saturating_sub(1);
            if enemy.move_timer > 0 {
                continue;
            }

            let target = enemy.position + enemy.direction;
            if check_pos(size, target) {
                enemy.position = target;
                if rng.gen_bool(config.turn_chance.clamp(0.0, 1.0)) {
                    enemy.direction = random_direction(rng);
                }
            } else {
                // Bounce off the edge
                enemy.direction = random_direction(rng);
            }
            enemy.move_timer = random_move_delay(config, rng);
        }
    }

    /// Try to place a random enemy on a free cell.
    /// Gives up silently at the enemy cap or when no free cell was found in time.
    pub fn spawn_enemy(&mut self, rng: &mut impl Rng) -> Option<EnemyId> {
        if self.enemies.len() >= self.config.max_enemies {
            return None;
        }
        let template = self.config.templates.choose(rng)?.clone();

        for _ in 0..self.config.spawn_attempts {
            let pos = vec2(rng.gen_range(0..self.size.x), rng.gen_range(0..self.size.y));
            if pos == self.player || self.enemy_at(pos).is_some() {
                continue;
            }
            let enemy = Enemy::from_template(&template, pos, &self.config, rng);
            let id = self.enemies.insert(enemy);
            log::debug!("Spawned {} at {}", template.name, pos);
            return Some(id);
        }

        log::debug!("No free cell found to spawn an enemy");
        None
    }

    /// Remove a defeated enemy and put the player where it stood.
    pub fn resolve_victory(&mut self, enemy: EnemyId) -> Result<(), MapError> {
        let defeated = self
            .enemies
            .remove(enemy)
            .ok_or(MapError::UnknownEnemy(enemy))?;
        log::debug!("Defeated {} at {}", defeated.name, defeated.position);
        self.player = defeated.position;
        Ok(())
    }
}

/// Whether `pos` is a cell of a map of the given size.
pub fn check_pos(size: vec2<Coord>, pos: vec2<Coord>) -> bool {
    (0..size.x).contains(&pos.x) && (0..size.y).contains(&pos.y)
}
