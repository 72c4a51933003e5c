//! Persistent and volatile status conditions.
//!
//! Each condition kind is a variant carrying its own counters. Behaviour is
//! reached through [`ConditionHooks`], which the combatant consults before it
//! acts, after each turn, and whenever a derived stat is read.

use crate::battle::state::TurnRng;
use schema::{StatType, StatusType, VolatileType};
use std::collections::VecDeque;

/// What a combatant's hooks get to see and where they report.
pub struct HookContext<'a> {
    pub name: &'a str,
    pub max_hp: u16,
    pub messages: &'a mut VecDeque<String>,
}

/// Verdict of a before-move hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeforeMove {
    Proceed,
    /// The condition ended; the move goes ahead.
    Cured,
    Blocked,
    /// The move is lost and the combatant takes this much damage.
    HurtItself(u16),
}

pub trait ConditionHooks {
    fn on_before_move(&mut self, _ctx: &mut HookContext<'_>, _rng: &mut TurnRng) -> BeforeMove {
        BeforeMove::Proceed
    }

    /// Returns end-of-turn damage, 0 if none.
    fn on_after_turn(&self, _ctx: &mut HookContext<'_>) -> u16 {
        0
    }

    fn stat_modifier(&self, _stat: StatType) -> f32 {
        1.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCondition {
    /// Turns left asleep.
    Sleep(u8),
    Poison,
    Burn,
    Freeze,
    Paralysis,
}

impl StatusCondition {
    /// Build a fresh condition of the given kind, rolling any duration it needs.
    pub fn inflict(kind: StatusType, rng: &mut TurnRng) -> Self {
        match kind {
            StatusType::Sleep => StatusCondition::Sleep(rng.next_in_range("sleep duration", 1..=3) as u8),
            StatusType::Poison => StatusCondition::Poison,
            StatusType::Burn => StatusCondition::Burn,
            StatusType::Freeze => StatusCondition::Freeze,
            StatusType::Paralysis => StatusCondition::Paralysis,
        }
    }

    pub fn kind(&self) -> StatusType {
        match self {
            StatusCondition::Sleep(_) => StatusType::Sleep,
            StatusCondition::Poison => StatusType::Poison,
            StatusCondition::Burn => StatusType::Burn,
            StatusCondition::Freeze => StatusType::Freeze,
            StatusCondition::Paralysis => StatusType::Paralysis,
        }
    }

    pub fn start_message(&self, name: &str) -> String {
        match self {
            StatusCondition::Sleep(_) => format!("{} fell asleep!", name),
            StatusCondition::Poison => format!("{} was poisoned!", name),
            StatusCondition::Burn => format!("{} was burned!", name),
            StatusCondition::Freeze => format!("{} was frozen solid!", name),
            StatusCondition::Paralysis => {
                format!("{} is paralyzed! It may be unable to move!", name)
            }
        }
    }

    /// Capture multiplier granted by this condition.
    pub fn catch_bonus(&self) -> f32 {
        match self {
            StatusCondition::Sleep(_) | StatusCondition::Freeze => 2.0,
            StatusCondition::Paralysis | StatusCondition::Burn | StatusCondition::Poison => 1.5,
        }
    }
}

impl ConditionHooks for StatusCondition {
    fn on_before_move(&mut self, ctx: &mut HookContext<'_>, rng: &mut TurnRng) -> BeforeMove {
        match self {
            StatusCondition::Sleep(turns) => {
                if *turns == 0 {
                    ctx.messages.push_back(format!("{} woke up!", ctx.name));
                    return BeforeMove::Cured;
                }
                *turns -= 1;
                ctx.messages.push_back(format!("{} is fast asleep.", ctx.name));
                BeforeMove::Blocked
            }
            StatusCondition::Freeze => {
                if rng.chance_one_in("thaw check", 5) {
                    ctx.messages.push_back(format!("{} thawed out!", ctx.name));
                    BeforeMove::Cured
                } else {
                    ctx.messages.push_back(format!("{} is frozen solid!", ctx.name));
                    BeforeMove::Blocked
                }
            }
            StatusCondition::Paralysis => {
                if rng.chance_one_in("full paralysis check", 4) {
                    ctx.messages.push_back(format!("{} is paralyzed! It can't move!", ctx.name));
                    BeforeMove::Blocked
                } else {
                    BeforeMove::Proceed
                }
            }
            StatusCondition::Poison | StatusCondition::Burn => BeforeMove::Proceed,
        }
    }

    fn on_after_turn(&self, ctx: &mut HookContext<'_>) -> u16 {
        match self {
            StatusCondition::Poison => {
                ctx.messages.push_back(format!("{} is hurt by poison!", ctx.name));
                (ctx.max_hp / 8).max(1)
            }
            StatusCondition::Burn => {
                ctx.messages.push_back(format!("{} is hurt by its burn!", ctx.name));
                (ctx.max_hp / 16).max(1)
            }
            _ => 0,
        }
    }

    fn stat_modifier(&self, stat: StatType) -> f32 {
        match (self, stat) {
            (StatusCondition::Burn, StatType::Atk) => 0.5,
            (StatusCondition::Paralysis, StatType::Spe) => 0.25,
            _ => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolatileCondition {
    /// Turns left confused.
    Confusion(u8),
}

impl VolatileCondition {
    pub fn inflict(kind: VolatileType, rng: &mut TurnRng) -> Self {
        match kind {
            VolatileType::Confusion => {
                VolatileCondition::Confusion(rng.next_in_range("confusion duration", 1..=4) as u8)
            }
        }
    }

    pub fn kind(&self) -> VolatileType {
        match self {
            VolatileCondition::Confusion(_) => VolatileType::Confusion,
        }
    }

    pub fn start_message(&self, name: &str) -> String {
        match self {
            VolatileCondition::Confusion(_) => format!("{} became confused!", name),
        }
    }
}

impl ConditionHooks for VolatileCondition {
    fn on_before_move(&mut self, ctx: &mut HookContext<'_>, rng: &mut TurnRng) -> BeforeMove {
        match self {
            VolatileCondition::Confusion(turns) => {
                if *turns == 0 {
                    ctx.messages.push_back(format!("{} snapped out of its confusion!", ctx.name));
                    return BeforeMove::Cured;
                }
                *turns -= 1;
                if rng.chance_one_in("confusion self-hit", 2) {
                    ctx.messages.push_back(format!("{} is confused!", ctx.name));
                    ctx.messages.push_back("It hurt itself in its confusion!".to_string());
                    BeforeMove::HurtItself((ctx.max_hp / 8).max(1))
                } else {
                    BeforeMove::Proceed
                }
            }
        }
    }
}
