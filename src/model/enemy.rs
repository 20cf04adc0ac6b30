use super::*;

use rand::{seq::SliceRandom, Rng};

pub type EnemyId = Id;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyTemplate {
    pub name: String,
    pub stats: CombatStats,
}

#[derive(Debug, Clone)]
pub struct Enemy {
    pub name: String,
    pub stats: CombatStats,
    pub position: vec2<Coord>,
    /// Grid step taken on each move, never zero.
    pub direction: vec2<Coord>,
    /// Ticks left until the next move.
    pub move_timer: Ticks,
}

impl Enemy {
    pub fn from_template(
        template: &EnemyTemplate,
        position: vec2<Coord>,
        config: &OverworldConfig,
        rng: &mut impl Rng,
    ) -> Self {
        Self {
            name: template.name.clone(),
            stats: template.stats,
            position,
            direction: random_direction(rng),
            move_timer: random_move_delay(config, rng),
        }
    }

    pub fn combatant(&self) -> Combatant {
        Combatant::new(self.name.clone(), self.stats)
    }
}

/// A random grid step with each axis in `-1..=1`, where a zero step becomes a step to the right.
pub fn random_direction(rng: &mut impl Rng) -> vec2<Coord> {
    const STEPS: [Coord; 3] = [-1, 0, 1];
    let dx = *STEPS.choose(rng).unwrap_or(&1);
    let dy = *STEPS.choose(rng).unwrap_or(&0);
    if dx == 0 && dy == 0 {
        vec2(1, 0)
    } else {
        vec2(dx, dy)
    }
}

pub fn random_move_delay(config: &OverworldConfig, rng: &mut impl Rng) -> Ticks {
    let (min, max) = config.move_delay;
    rng.gen_range(min..=max.max(min))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn directions_are_never_zero() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1_000 {
            let dir = random_direction(&mut rng);
            assert_ne!(dir, vec2(0, 0));
            assert!(dir.x.abs() <= 1 && dir.y.abs() <= 1);
        }
    }

    #[test]
    fn move_delay_in_range() {
        let config = crate::config::test_config();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1_000 {
            let delay = random_move_delay(&config.overworld, &mut rng);
            assert!((6..=18).contains(&delay));
        }
    }
}
