use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleAction {
    Attack,
    Heal,
    /// Begging for mercy. Only changes the message, the enemy just laughs.
    Plead,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattlePhase {
    /// Waiting for the player to pick an action.
    PlayerTurn,
    /// An action's message is on screen, `next` moves once the timer runs out.
    Resolving { next: Fraction, timer: Ticks },
    /// The enemy picks its action on the next tick.
    EnemyTurn,
    /// Absorbing, nothing changes health anymore.
    Over { winner: Fraction },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleOutcome {
    Ongoing,
    PlayerWon,
    EnemyWon,
}

pub struct Battle {
    pub player: Combatant,
    pub enemy: Combatant,
    pub phase: BattlePhase,
    pub log: String,
    action_delay: Ticks,
    enemy_heal_threshold: f64,
}

impl Battle {
    pub fn new(player: Combatant, enemy: Combatant, config: &BattleConfig) -> Self {
        Self {
            player,
            enemy,
            phase: BattlePhase::PlayerTurn,
            log: "Battle Start! Choose your action.".to_owned(),
            action_delay: config.action_delay,
            enemy_heal_threshold: config.enemy_heal_threshold,
        }
    }

    pub fn outcome(&self) -> BattleOutcome {
        match self.phase {
            BattlePhase::Over {
                winner: Fraction::Player,
            } => BattleOutcome::PlayerWon,
            BattlePhase::Over {
                winner: Fraction::Enemy,
            } => BattleOutcome::EnemyWon,
            _ => BattleOutcome::Ongoing,
        }
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, BattlePhase::Over { .. })
    }

    pub fn is_player_turn(&self) -> bool {
        matches!(self.phase, BattlePhase::PlayerTurn)
    }

    /// Apply the player's action.
    /// Returns the winner if this action ended the battle.
    pub fn player_action(&mut self, action: BattleAction) -> Option<Fraction> {
        if !self.is_player_turn() {
            log::debug!(
                "Ignoring player action {:?} during phase {:?}",
                action,
                self.phase
            );
            return None;
        }
        log::debug!("Player action: {:?}", action);

        match action {
            BattleAction::Attack => {
                self.enemy.take_damage(self.player.damage);
                self.log = format!("You attacked! Enemy took {} damage!", self.player.damage);
            }
            BattleAction::Heal => {
                self.player.heal_self();
                self.log = format!("You healed for {} HP!", self.player.heal);
            }
            BattleAction::Plead => {
                self.log = format!("You begged for mercy! The {} laughs.", self.enemy.name);
            }
        }

        self.finish_action(Fraction::Enemy)
    }

    /// What the enemy does on its turn: heal when hurt badly, attack otherwise.
    pub fn enemy_choice(&self) -> BattleAction {
        if self.enemy.is_below(self.enemy_heal_threshold) {
            BattleAction::Heal
        } else {
            BattleAction::Attack
        }
    }

    /// Advance the battle by one tick.
    /// Returns the winner if the battle ended during this tick.
    pub fn tick(&mut self) -> Option<Fraction> {
        match &mut self.phase {
            BattlePhase::Resolving { next, timer } => {
                *timer = timer.saturating_sub(1);
                if *timer == 0 {
                    self.phase = turn_of(*next);
                }
                None
            }
            BattlePhase::EnemyTurn => self.enemy_turn(),
            BattlePhase::PlayerTurn | BattlePhase::Over { .. } => None,
        }
    }

    fn enemy_turn(&mut self) -> Option<Fraction> {
        let action = self.enemy_choice();
        log::debug!("Enemy action: {:?}", action);
        match action {
            BattleAction::Heal => {
                self.enemy.heal_self();
                self.log = format!("Enemy healed for {} HP!", self.enemy.heal);
            }
            _ => {
                self.player.take_damage(self.enemy.damage);
                self.log = format!("Enemy attacked! You took {} damage!", self.enemy.damage);
            }
        }
        self.finish_action(Fraction::Player)
    }

    /// Check for the end of the battle, otherwise show the message and pass the turn.
    fn finish_action(&mut self, next: Fraction) -> Option<Fraction> {
        if let Some(winner) = self.check_end() {
            return Some(winner);
        }
        self.phase = if self.action_delay == 0 {
            turn_of(next)
        } else {
            BattlePhase::Resolving {
                next,
                timer: self.action_delay,
            }
        };
        None
    }

    fn check_end(&mut self) -> Option<Fraction> {
        let winner = if self.player.is_defeated() {
            self.log = format!(
                "{} has been defeated! Press ESC to return.",
                self.player.name
            );
            Fraction::Enemy
        } else if self.enemy.is_defeated() {
            self.log = format!(
                "Victory! You defeated {}! Returning to map...",
                self.enemy.name
            );
            Fraction::Player
        } else {
            return None;
        };
        log::debug!("Battle over, winner: {:?}", winner);
        self.phase = BattlePhase::Over { winner };
        Some(winner)
    }
}

fn turn_of(fraction: Fraction) -> BattlePhase {
    match fraction {
        Fraction::Player => BattlePhase::PlayerTurn,
        Fraction::Enemy => BattlePhase::EnemyTurn,
    }
}
