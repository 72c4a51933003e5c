use crate::battle::state::TurnRng;
use schema::{MoveData, MultiHit};

/// Multipliers layered on top of the base damage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageModifiers {
    pub critical: f32,
    pub stab: f32,
    pub type_effectiveness: f32,
    pub random_factor: f32,
}

impl Default for DamageModifiers {
    fn default() -> Self {
        Self {
            critical: 1.0,
            stab: 1.0,
            type_effectiveness: 1.0,
            random_factor: 1.0,
        }
    }
}

/// Standard damage formula.
///
/// `base = ((2*level/5 + 2) * power * attack/defense) / 50 + 2`, then every
/// modifier is multiplied in and the result floored. Anything that connects
/// deals at least 1; an immune target takes 0.
pub fn calculate_damage(
    level: u8,
    power: u16,
    attack: u16,
    defense: u16,
    modifiers: DamageModifiers,
) -> u16 {
    if modifiers.type_effectiveness <= 0.0 {
        return 0;
    }

    let level = level as f64;
    let ratio = attack as f64 / defense.max(1) as f64;
    let base = ((2.0 * level / 5.0 + 2.0) * power as f64 * ratio) / 50.0 + 2.0;

    let total = base
        * modifiers.critical as f64
        * modifiers.stab as f64
        * modifiers.type_effectiveness as f64
        * modifiers.random_factor as f64;

    (total.floor().min(u16::MAX as f64) as u16).max(1)
}

/// How many times a move strikes this use.
pub fn hit_count(move_data: &MoveData, rng: &mut TurnRng) -> u8 {
    match move_data.hits {
        MultiHit::Fixed(n) => n.max(1),
        MultiHit::Range { max } if max > 2 => {
            rng.next_in_range("multi-hit count", 2..=max as u32) as u8
        }
        MultiHit::Range { max } => max.max(1),
    }
}

/// Odds of fleeing as a threshold against a draw in 0..=255.
///
/// `None` means the escape is guaranteed because the enemy is slower.
pub fn escape_threshold(player_speed: u16, enemy_speed: u16, attempts: u32) -> Option<u32> {
    if enemy_speed < player_speed {
        return None;
    }
    let ratio = player_speed as u32 * 128 / enemy_speed.max(1) as u32;
    Some((ratio + 30 * attempts) % 256)
}
