use crate::battle::state::TurnRng;
use crate::pokemon::PokemonInst;

/// A catch value at or above this never breaks free.
pub const GUARANTEED_CATCH_VALUE: f64 = 255.0;

/// Shakes needed for the ball to hold.
pub const SHAKES_TO_CATCH: u8 = 4;

/// The catch value `a`: low HP, a low-resistance species and a status all raise it.
///
/// Formula: `a = (3 * max_hp - 2 * hp) * catch_rate * status_bonus / (3 * max_hp)`
pub fn catch_value(max_hp: u16, hp: u16, catch_rate: u8, status_bonus: f32) -> f64 {
    let max_hp = max_hp.max(1) as f64;
    let hp = hp as f64;
    (3.0 * max_hp - 2.0 * hp) * catch_rate as f64 * status_bonus as f64 / (3.0 * max_hp)
}

/// Catch value for the combatant as it stands right now.
pub fn catch_value_for(target: &PokemonInst) -> f64 {
    catch_value(
        target.max_hp(),
        target.current_hp(),
        target.species().catch_rate,
        target.catch_bonus(),
    )
}

/// Per-shake threshold against a draw in 0..=65534.
pub fn shake_threshold(catch_value: f64) -> f64 {
    1_048_560.0 / (16_711_680.0 / catch_value).sqrt().sqrt()
}

/// Roll how many times the ball shakes, 0 to 4. Four means caught.
pub fn shake_count(catch_value: f64, rng: &mut TurnRng) -> u8 {
    if catch_value >= GUARANTEED_CATCH_VALUE {
        return SHAKES_TO_CATCH;
    }
    if catch_value <= 0.0 {
        return 0;
    }

    let threshold = shake_threshold(catch_value);
    let mut shakes = 0;
    while shakes < SHAKES_TO_CATCH {
        let roll = rng.next_in_range("shake check", 0..=65_534);
        if roll as f64 >= threshold {
            break;
        }
        shakes += 1;
    }
    shakes
}
