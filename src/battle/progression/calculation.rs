/// Experience for knocking out a combatant.
///
/// `floor(exp_yield * level * bonus / 7)`, where `bonus` is the trainer-battle
/// multiplier or 1.0 in the wild.
pub fn experience_gain(exp_yield: u16, defeated_level: u8, bonus: f32) -> u32 {
    let raw = exp_yield as f64 * defeated_level as f64 * bonus as f64;
    (raw / 7.0).floor() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(51, 5, 1.0, 36)] // 255 / 7
    #[case(51, 5, 1.5, 54)] // 382.5 / 7
    #[case(64, 10, 1.0, 91)]
    #[case(1, 1, 1.0, 0)]
    fn test_experience_gain(
        #[case] exp_yield: u16,
        #[case] level: u8,
        #[case] bonus: f32,
        #[case] expected: u32,
    ) {
        assert_eq!(experience_gain(exp_yield, level, bonus), expected);
    }

    #[test]
    fn test_single_floor_matches_floor_then_divide() {
        for exp_yield in [39u16, 50, 51, 64, 113] {
            for level in 1u8..=60 {
                let raw = exp_yield as f64 * level as f64 * 1.5;
                let twice_truncated = raw.floor() as u32 / 7;
                assert_eq!(experience_gain(exp_yield, level, 1.5), twice_truncated);
            }
        }
    }
}
