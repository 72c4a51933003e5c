use crate::battle::state::TurnRng;
use crate::pokemon::PokemonInst;
use schema::{MoveData, StatType};

/// Lowest and highest boost stage.
pub const MIN_STAGE: i8 = -6;
pub const MAX_STAGE: i8 = 6;

/// Accuracy/evasion multipliers for stages 0..=6. Negative stages divide by the same table.
const ACCURACY_STAGE_TABLE: [f32; 7] = [
    1.0,
    4.0 / 3.0,
    5.0 / 3.0,
    2.0,
    7.0 / 3.0,
    8.0 / 3.0,
    3.0,
];

/// Apply stat stage multipliers according to Pokemon formula
/// Stages range from -6 to +6
/// Negative stages: (2 / (2 + |stage|))
/// Positive stages: ((2 + stage) / 2)
pub fn stat_stage_multiplier(stage: i8) -> f32 {
    let stage = stage.clamp(MIN_STAGE, MAX_STAGE) as f32;
    if stage >= 0.0 {
        (2.0 + stage) / 2.0
    } else {
        2.0 / (2.0 - stage)
    }
}

pub fn accuracy_stage_multiplier(stage: i8) -> f32 {
    let stage = stage.clamp(MIN_STAGE, MAX_STAGE);
    let factor = ACCURACY_STAGE_TABLE[stage.unsigned_abs() as usize];
    if stage >= 0 {
        factor
    } else {
        1.0 / factor
    }
}

pub fn apply_stat_stage_multiplier(base_stat: u16, stage: i8) -> u16 {
    (base_stat as f32 * stat_stage_multiplier(stage)).floor() as u16
}

/// Base accuracy scaled up by the attacker's accuracy stage and down by the defender's evasion stage.
pub fn effective_accuracy(base_accuracy: u8, accuracy_stage: i8, evasion_stage: i8) -> f32 {
    base_accuracy as f32 * accuracy_stage_multiplier(accuracy_stage)
        / accuracy_stage_multiplier(evasion_stage)
}

/// Roll whether `move_data` connects. Moves without an accuracy value never miss.
pub fn move_hits(
    move_data: &MoveData,
    attacker: &PokemonInst,
    defender: &PokemonInst,
    rng: &mut TurnRng,
) -> bool {
    let Some(base_accuracy) = move_data.accuracy else {
        return true;
    };

    let accuracy = effective_accuracy(
        base_accuracy,
        attacker.stat_stage(StatType::Acc),
        defender.stat_stage(StatType::Eva),
    );

    let roll = rng.percent("accuracy check");
    roll as f32 <= accuracy
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 100)]
    #[case(1, 150)]
    #[case(2, 200)]
    #[case(6, 400)]
    #[case(-1, 66)]
    #[case(-2, 50)]
    #[case(-6, 25)]
    #[case(9, 400)]
    fn test_stat_stage_multiplier(#[case] stage: i8, #[case] expected: u16) {
        assert_eq!(apply_stat_stage_multiplier(100, stage), expected);
    }

    #[rstest]
    #[case(0, 1.0)]
    #[case(1, 4.0 / 3.0)]
    #[case(3, 2.0)]
    #[case(6, 3.0)]
    #[case(-3, 0.5)]
    #[case(-6, 1.0 / 3.0)]
    fn test_accuracy_stage_multiplier(#[case] stage: i8, #[case] expected: f32) {
        assert!((accuracy_stage_multiplier(stage) - expected).abs() < 1e-6);
    }

    #[test]
    fn test_evasion_lowers_effective_accuracy() {
        // Evasion +1 against neutral accuracy: 100 / (4/3) = 75
        assert!((effective_accuracy(100, 0, 1) - 75.0).abs() < 1e-4);
        // Evasion -1 makes the defender easier to hit
        assert!(effective_accuracy(90, 0, -1) > 90.0);
        // Matching stages cancel out
        assert!((effective_accuracy(80, 2, 2) - 80.0).abs() < 1e-4);
    }
}
