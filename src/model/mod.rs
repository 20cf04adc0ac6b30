mod battle;
mod combatant;
mod enemy;
mod overworld;
mod prices;

pub use self::{battle::*, combatant::*, enemy::*, overworld::*, prices::*};

use crate::prelude::*;

pub type Coord = i64;
pub type Hp = i64;
/// Simulation time, counted in fixed-rate ticks.
pub type Ticks = u64;
