#[cfg(test)]
mod tests {
    use crate::battle::engine::BattleInput;
    use crate::battle::presentation::PresentationEvent;
    use crate::battle::state::{BattleOutcome, BattlePhase};
    use crate::battle::tests::common::{
        assert_ok, create_trainer_session, predictable_rng, TestPokemonBuilder,
    };
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_trainer_battle_refuses_run_and_bag() {
        let charmander = TestPokemonBuilder::new("Charmander", 20).build();
        let caterpie = TestPokemonBuilder::new("Caterpie", 2).build();

        let (session, presenter) = create_trainer_session(
            vec![charmander],
            vec![caterpie],
            vec![
                BattleInput::Run,
                BattleInput::Bag,
                BattleInput::Fight,
                BattleInput::SelectMove(0),
            ],
            predictable_rng(),
        );
        let report = assert_ok(session.run().await);

        assert_eq!(report.outcome, BattleOutcome::PlayerWon);
        assert_eq!(report.turns, 1);
        assert_eq!(
            presenter.messages(),
            vec![
                "Blue wants to battle!",
                "Blue sent out Caterpie!",
                "Go Charmander!",
                "You can't run from trainer battles!",
                "You can't steal the trainer's Pokémon!",
                "Charmander used Scratch!",
                "Caterpie fainted!",
                // Trainer battles pay out half again as much
                "Charmander gained 16 EXP. Points!",
            ]
        );
    }

    #[tokio::test]
    async fn test_trainer_sends_out_next_after_offering_a_switch() {
        let charmander = TestPokemonBuilder::new("Charmander", 20).build();
        let squirtle = TestPokemonBuilder::new("Squirtle", 10).build();
        let caterpie = TestPokemonBuilder::new("Caterpie", 2).build();
        let pidgey = TestPokemonBuilder::new("Pidgey", 2).with_hp(1).build();

        let (session, presenter) = create_trainer_session(
            vec![charmander, squirtle],
            vec![caterpie, pidgey],
            vec![
                BattleInput::Fight,
                BattleInput::SelectMove(0),
                BattleInput::Confirm(true),
                BattleInput::SelectMember(1),
                BattleInput::Fight,
                BattleInput::SelectMove(0),
            ],
            predictable_rng(),
        );
        let report = assert_ok(session.run().await);

        assert_eq!(report.outcome, BattleOutcome::PlayerWon);
        assert_eq!(report.turns, 2);
        assert_eq!(
            presenter.messages(),
            vec![
                "Blue wants to battle!",
                "Blue sent out Caterpie!",
                "Go Charmander!",
                "Charmander used Scratch!",
                "Caterpie fainted!",
                "Charmander gained 16 EXP. Points!",
                "Blue is about to use Pidgey. Do you want to change Pokémon?",
                "Come back Charmander!",
                "Go Squirtle!",
                "Blue sent out Pidgey!",
                "Squirtle used Tackle!",
                "Pidgey fainted!",
                "Squirtle gained 21 EXP. Points!",
            ]
        );

        let phases: Vec<BattlePhase> = presenter
            .events()
            .into_iter()
            .filter_map(|event| match event {
                PresentationEvent::Phase(phase) => Some(phase),
                _ => None,
            })
            .collect();
        assert!(phases.contains(&BattlePhase::AboutToUseSwitch));
        assert!(phases.contains(&BattlePhase::PartyScreen));
    }

    #[tokio::test]
    async fn test_declining_the_switch_keeps_the_active_pokemon() {
        let charmander = TestPokemonBuilder::new("Charmander", 20).build();
        let squirtle = TestPokemonBuilder::new("Squirtle", 10).build();
        let caterpie = TestPokemonBuilder::new("Caterpie", 2).build();
        let pidgey = TestPokemonBuilder::new("Pidgey", 2).build();

        let (session, presenter) = create_trainer_session(
            vec![charmander, squirtle],
            vec![caterpie, pidgey],
            vec![
                BattleInput::Fight,
                BattleInput::SelectMove(0),
                BattleInput::Confirm(false),
                BattleInput::Fight,
                BattleInput::SelectMove(0),
            ],
            predictable_rng(),
        );
        let report = assert_ok(session.run().await);

        assert_eq!(report.outcome, BattleOutcome::PlayerWon);
        assert!(!presenter.has_message("Come back Charmander!"));
        assert!(presenter.has_message("Blue sent out Pidgey!"));
        assert!(presenter.has_message("Pidgey fainted!"));
        // Both knockouts went to Charmander; the second pays 50*2*1.5/7
        assert!(presenter.has_message("Charmander gained 21 EXP. Points!"));
    }
}
