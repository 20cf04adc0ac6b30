use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatStats {
    pub health: Hp,
    pub damage: Hp,
    pub heal: Hp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fraction {
    Player,
    Enemy,
}

/// A participant in a battle.
///
/// Health is allowed to drop below zero after a hit, the battle is over as soon
/// as it reaches zero. Healing always lands inside `0..=max_health`.
#[derive(Debug, Clone)]
pub struct Combatant {
    pub name: String,
    pub max_health: Hp,
    pub health: Hp,
    pub damage: Hp,
    pub heal: Hp,
}

impl Combatant {
    pub fn new(name: impl Into<String>, stats: CombatStats) -> Self {
        Self {
            name: name.into(),
            max_health: stats.health,
            health: stats.health,
            damage: stats.damage,
            heal: stats.heal,
        }
    }

    pub fn take_damage(&mut self, damage: Hp) {
        self.health -= damage;
    }

    pub fn heal_self(&mut self) {
        self.health = (self.health + self.heal).clamp(0, self.max_health);
    }

    pub fn is_defeated(&self) -> bool {
        self.health <= 0
    }

    /// Whether current health is strictly below `fraction` of the max.
    pub fn is_below(&self, fraction: f64) -> bool {
        (self.health as f64) < self.max_health as f64 * fraction
    }

    /// Health for display purposes, never negative.
    pub fn shown_health(&self) -> Hp {
        self.health.max(0)
    }

    pub fn health_ratio(&self) -> f32 {
        if self.max_health <= 0 {
            return 0.0;
        }
        (self.shown_health() as f32 / self.max_health as f32).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn fighter(health: Hp, heal: Hp) -> Combatant {
        Combatant::new(
            "Test",
            CombatStats {
                health,
                damage: 1,
                heal,
            },
        )
    }

    #[test]
    fn heal_stops_at_max() {
        let mut c = fighter(50, 10);
        c.take_damage(5);
        c.heal_self();
        assert_eq!(c.health, 50);
    }

    #[test]
    fn damage_goes_below_zero_but_shows_zero() {
        let mut c = fighter(10, 0);
        c.take_damage(15);
        assert_eq!(c.health, -5);
        assert!(c.is_defeated());
        assert_eq!(c.shown_health(), 0);
        assert_eq!(c.health_ratio(), 0.0);
    }

    #[test]
    fn below_threshold_is_exact_for_large_pools() {
        let mut c = fighter(100_000_000, 0);
        c.health = 39_999_999;
        assert!(c.is_below(0.4));
        c.health = 40_000_000;
        assert!(!c.is_below(0.4));

        let mut small = fighter(50, 0);
        small.health = 20;
        assert!(!small.is_below(0.4));
        small.health = 19;
        assert!(small.is_below(0.4));
    }

    proptest! {
        #[test]
        fn heal_lands_in_bounds(max in 1i64..1_000, start in -1_000i64..1_000, heal in 1i64..1_000) {
            let mut c = fighter(max, heal);
            c.health = start;
            c.heal_self();
            prop_assert!(c.health >= 0);
            prop_assert!(c.health <= c.max_health);
        }
    }
}
