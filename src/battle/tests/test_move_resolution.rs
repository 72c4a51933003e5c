#[cfg(test)]
mod tests {
    use crate::battle::conditions::StatusCondition;
    use crate::battle::engine::BattleInput;
    use crate::battle::presentation::Cue;
    use crate::battle::state::{BattleOutcome, Side, TurnRng};
    use crate::battle::tests::common::{
        assert_ok, create_wild_session, predictable_rng, TestPokemonBuilder,
    };
    use pretty_assertions::assert_eq;
    use schema::StatType;

    #[tokio::test]
    async fn test_multi_hit_reports_the_hit_count() {
        // Level 15 Pikachu knows Tail Whip, Thunder Wave, Quick Attack and Double Kick
        let pikachu = TestPokemonBuilder::new("Pikachu", 15).build();
        let geodude = TestPokemonBuilder::new("Geodude", 10).build();
        let geodude_max_hp = geodude.max_hp();

        let (session, presenter) = create_wild_session(
            vec![pikachu],
            geodude,
            vec![
                BattleInput::Fight,
                BattleInput::SelectMove(3),
                BattleInput::Run,
            ],
            predictable_rng(),
        );
        let report = assert_ok(session.run().await);

        assert_eq!(report.outcome, BattleOutcome::Escaped);
        assert!(presenter.has_message("Pikachu used Double Kick!"));
        assert!(presenter.has_message("Hit 2 times!"));

        let super_effective = presenter
            .messages()
            .iter()
            .filter(|m| *m == "It's super effective!")
            .count();
        assert_eq!(super_effective, 2);

        let hits_on_geodude = presenter
            .cues()
            .into_iter()
            .filter(|cue| *cue == (Cue::Hit, Side::Enemy))
            .count();
        assert_eq!(hits_on_geodude, 2);

        // Two hits of 10 on the lowest roll
        assert_eq!(report.opponent.members()[0].current_hp(), geodude_max_hp - 20);
    }

    #[tokio::test]
    async fn test_status_move_and_battle_over_cleanup() {
        let pikachu = TestPokemonBuilder::new("Pikachu", 10).build();
        let pidgey = TestPokemonBuilder::new("Pidgey", 5).build();

        // Thunder Wave lands, Pidgey shrugs off paralysis and throws sand
        let (session, presenter) = create_wild_session(
            vec![pikachu],
            pidgey,
            vec![
                BattleInput::Fight,
                BattleInput::SelectMove(3),
                BattleInput::Run,
            ],
            predictable_rng(),
        );
        let report = assert_ok(session.run().await);

        assert_eq!(report.outcome, BattleOutcome::Escaped);
        assert!(presenter.has_message("Pikachu used Thunder Wave!"));
        assert!(presenter.has_message("Pidgey is paralyzed! It may be unable to move!"));
        assert!(presenter.has_message("Pidgey used Sand Attack!"));
        assert!(presenter.has_message("Pikachu's Accuracy fell!"));

        // Boosts are battle-scoped; the opponent's status is cured on the way out
        let pikachu = &report.player.members()[0];
        assert_eq!(pikachu.stat_stage(StatType::Acc), 0);
        assert_eq!(report.opponent.members()[0].status, None);
    }

    #[tokio::test]
    async fn test_status_move_on_an_already_afflicted_target_fails() {
        let pikachu = TestPokemonBuilder::new("Pikachu", 10).build();
        let pidgey = TestPokemonBuilder::new("Pidgey", 5)
            .with_status(StatusCondition::Burn)
            .build();

        let (session, presenter) = create_wild_session(
            vec![pikachu],
            pidgey,
            vec![
                BattleInput::Fight,
                BattleInput::SelectMove(3),
                BattleInput::Run,
            ],
            predictable_rng(),
        );
        let report = assert_ok(session.run().await);

        assert_eq!(report.outcome, BattleOutcome::Escaped);
        assert!(presenter.has_message("But it failed!"));
        assert!(presenter.has_message("Pidgey is hurt by its burn!"));
    }

    #[tokio::test]
    async fn test_poison_ticks_before_the_slower_side_moves() {
        let pikachu = TestPokemonBuilder::new("Pikachu", 10)
            .with_status(StatusCondition::Poison)
            .build();
        let pidgey = TestPokemonBuilder::new("Pidgey", 5).build();

        let (session, presenter) = create_wild_session(
            vec![pikachu],
            pidgey,
            vec![
                BattleInput::Fight,
                BattleInput::SelectMove(3),
                BattleInput::Run,
            ],
            predictable_rng(),
        );
        let report = assert_ok(session.run().await);
        assert_eq!(report.outcome, BattleOutcome::Escaped);

        let messages = presenter.messages();
        let position = |text: &str| messages.iter().position(|m| m == text);
        let thunder_wave = position("Pikachu used Thunder Wave!").expect("Pikachu moved");
        let poison = position("Pikachu is hurt by poison!").expect("poison ticked");
        let sand_attack = position("Pidgey used Sand Attack!").expect("Pidgey moved");
        assert!(thunder_wave < poison);
        assert!(poison < sand_attack);
    }

    #[tokio::test]
    async fn test_sleeping_pokemon_keeps_its_pp() {
        let charmander = TestPokemonBuilder::new("Charmander", 20)
            .with_moves(vec!["Scratch"])
            .with_status(StatusCondition::Sleep(2))
            .build();
        let caterpie = TestPokemonBuilder::new("Caterpie", 2)
            .with_moves(vec!["String Shot"])
            .build();

        let (session, presenter) = create_wild_session(
            vec![charmander],
            caterpie,
            vec![
                BattleInput::Fight,
                BattleInput::SelectMove(0),
                BattleInput::Run,
            ],
            predictable_rng(),
        );
        let report = assert_ok(session.run().await);

        assert_eq!(report.outcome, BattleOutcome::Escaped);
        assert!(presenter.has_message("Charmander is fast asleep."));
        assert!(!presenter.has_message("Charmander used Scratch!"));
        assert!(presenter.has_message("Caterpie used String Shot!"));

        let charmander = &report.player.members()[0];
        assert_eq!(charmander.moves[0].pp, charmander.moves[0].max_pp());
        assert_eq!(charmander.status, Some(StatusCondition::Sleep(1)));
    }

    #[tokio::test]
    async fn test_full_paralysis_keeps_pp() {
        let charmander = TestPokemonBuilder::new("Charmander", 20)
            .with_moves(vec!["Scratch"])
            .with_status(StatusCondition::Paralysis)
            .build();
        let caterpie = TestPokemonBuilder::new("Caterpie", 2)
            .with_moves(vec!["String Shot"])
            .build();

        // Paralysis makes Charmander the slower side. Draws: enemy move pick,
        // String Shot's accuracy, full paralysis on 1, then the escape roll
        let (session, presenter) = create_wild_session(
            vec![charmander],
            caterpie,
            vec![
                BattleInput::Fight,
                BattleInput::SelectMove(0),
                BattleInput::Run,
            ],
            TurnRng::new_for_test(vec![0, 50, 1, 0]),
        );
        let report = assert_ok(session.run().await);

        assert_eq!(report.outcome, BattleOutcome::Escaped);
        assert!(presenter.has_message("Charmander is paralyzed! It can't move!"));
        assert!(!presenter.has_message("Charmander used Scratch!"));

        let scratch = &report.player.members()[0].moves[0];
        assert_eq!(scratch.pp, scratch.max_pp());
    }
}
