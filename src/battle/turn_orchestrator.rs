use crate::battle::calculators::escape_threshold;
use crate::battle::engine::{BattleSession, TurnAction};
use crate::battle::presentation::{Cue, PresentationPort};
use crate::battle::state::{BattleOutcome, BattlePhase, BattleType, Side, TurnRng};
use crate::config::SpeedTiePolicy;
use crate::errors::BattleResult;
use crate::moves::MoveChoice;

/// Decide which side moves first when both use a move.
///
/// Higher priority goes first, then higher speed. A tie falls to `policy`; the
/// RNG is only drawn for a coin flip.
pub fn turn_order(
    player: (i8, u16),
    enemy: (i8, u16),
    policy: SpeedTiePolicy,
    rng: &mut TurnRng,
) -> [Side; 2] {
    let (player_priority, player_speed) = player;
    let (enemy_priority, enemy_speed) = enemy;

    let player_first = if player_priority != enemy_priority {
        player_priority > enemy_priority
    } else if player_speed != enemy_speed {
        player_speed > enemy_speed
    } else {
        match policy {
            SpeedTiePolicy::PlayerFirst => true,
            SpeedTiePolicy::CoinFlip => rng.next_in_range("speed tie", 0..=1) == 0,
        }
    };

    if player_first {
        [Side::Player, Side::Enemy]
    } else {
        [Side::Enemy, Side::Player]
    }
}

impl<P: PresentationPort> BattleSession<P> {
    /// Run one full turn: the player's action, the opponent's move, then end-of-turn effects.
    pub(super) async fn run_turn(&mut self, action: TurnAction) -> BattleResult<()> {
        self.set_phase(BattlePhase::RunningTurn);
        self.turn_number += 1;
        tracing::debug!(turn = self.turn_number, ?action, "turn start");

        // Switching, throwing and fleeing happen before the opponent moves
        let player_choice = match action {
            TurnAction::Move(choice) => Some(choice),
            TurnAction::Switch(index) => {
                self.switch_pokemon(index).await;
                None
            }
            TurnAction::Catch => {
                self.throw_ball().await?;
                None
            }
            TurnAction::Escape => {
                self.try_escape().await;
                None
            }
        };
        if self.is_over() {
            return Ok(());
        }

        let enemy_choice = self
            .enemy_behavior
            .choose_move(self.players[1].active_pokemon(), &mut self.rng);

        let order: Vec<(Side, MoveChoice)> = match player_choice {
            Some(player_choice) => {
                let player = self.players[0].active_pokemon();
                let enemy = self.players[1].active_pokemon();
                let order = turn_order(
                    (player.move_priority(player_choice), player.speed()),
                    (enemy.move_priority(enemy_choice), enemy.speed()),
                    self.config.speed_tie,
                    &mut self.rng,
                );
                order
                    .into_iter()
                    .map(|side| match side {
                        Side::Player => (side, player_choice),
                        Side::Enemy => (side, enemy_choice),
                    })
                    .collect()
            }
            None => vec![(Side::Enemy, enemy_choice)],
        };

        // Whoever is out right now; a replacement sent in mid-turn does not act
        let slots = [
            self.players[0].active_index(),
            self.players[1].active_index(),
        ];

        // Each side's end-of-turn damage lands before the other side moves
        for (side, choice) in order {
            let slot = slots[side.to_index()];
            if self.is_over() {
                break;
            }
            if !self.still_active(side, slot) {
                continue;
            }
            self.run_move(side, choice).await?;
            if self.is_over() {
                break;
            }
            self.run_after_turn(side, slot).await?;
        }

        if !self.is_over() {
            self.action_selection();
        }
        Ok(())
    }

    fn still_active(&self, side: Side, slot: usize) -> bool {
        let player = &self.players[side.to_index()];
        player.active_index() == slot && !player.active_pokemon().is_fainted()
    }

    async fn run_after_turn(&mut self, side: Side, slot: usize) -> BattleResult<()> {
        if !self.still_active(side, slot) {
            return Ok(());
        }

        let lost = self.active_mut(side).on_after_turn();
        self.flush_status_changes(side).await;
        if lost > 0 {
            self.show_hp(side).await;
        }

        if self.active(side).is_fainted() {
            self.handle_fainted(side).await?;
        }
        Ok(())
    }

    /// Announce a faint, reward the player for knocking out the opponent and
    /// decide what happens next.
    pub(super) async fn handle_fainted(&mut self, side: Side) -> BattleResult<()> {
        let name = self.active(side).name().to_string();
        tracing::debug!(%side, pokemon = %name, "fainted");

        self.say(&format!("{} fainted!", name)).await;
        self.cue(Cue::Faint, side).await;
        self.pause(self.config.pacing.faint()).await;

        if side == Side::Enemy && !self.active(Side::Player).is_fainted() {
            self.award_experience().await?;
        }

        self.check_for_battle_over(side).await
    }

    async fn check_for_battle_over(&mut self, fainted: Side) -> BattleResult<()> {
        match fainted {
            Side::Player => {
                if self.players[0].has_healthy_reserve() {
                    self.await_forced_replacement().await?;
                } else {
                    self.finish(BattleOutcome::PlayerLost).await;
                }
            }
            Side::Enemy => match self.battle_type {
                BattleType::Wild => self.finish(BattleOutcome::PlayerWon).await,
                BattleType::Trainer => match self.players[1].party.healthy_index() {
                    Some(next) if self.active(Side::Player).is_fainted() => {
                        self.send_next_trainer_pokemon(next).await;
                    }
                    Some(next) => self.offer_switch_before_send_out(next).await?,
                    None => self.finish(BattleOutcome::PlayerWon).await,
                },
            },
        }
        Ok(())
    }

    async fn try_escape(&mut self) {
        self.escape_attempts += 1;
        let player_speed = self.active(Side::Player).speed();
        let enemy_speed = self.active(Side::Enemy).speed();

        let escaped = match escape_threshold(player_speed, enemy_speed, self.escape_attempts) {
            None => true,
            Some(threshold) => self.rng.next_in_range("escape roll", 0..=255) < threshold,
        };
        tracing::debug!(attempts = self.escape_attempts, escaped, "escape attempt");

        if escaped {
            self.say("Got away safely!").await;
            self.finish(BattleOutcome::Escaped).await;
        } else {
            self.say("Can't escape!").await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::priority_beats_speed((1, 10), (0, 200), [Side::Player, Side::Enemy])]
    #[case::enemy_priority((0, 200), (1, 10), [Side::Enemy, Side::Player])]
    #[case::faster_player((0, 50), (0, 40), [Side::Player, Side::Enemy])]
    #[case::faster_enemy((0, 40), (0, 50), [Side::Enemy, Side::Player])]
    fn test_turn_order_without_tie(
        #[case] player: (i8, u16),
        #[case] enemy: (i8, u16),
        #[case] expected: [Side; 2],
    ) {
        // An untied order never touches the RNG
        let mut rng = TurnRng::new_for_test(vec![]);
        assert_eq!(
            turn_order(player, enemy, SpeedTiePolicy::CoinFlip, &mut rng),
            expected
        );
    }

    #[test]
    fn test_speed_tie_coin_flip() {
        let mut rng = TurnRng::new_for_test(vec![0, 1]);
        assert_eq!(
            turn_order((0, 30), (0, 30), SpeedTiePolicy::CoinFlip, &mut rng),
            [Side::Player, Side::Enemy]
        );
        assert_eq!(
            turn_order((0, 30), (0, 30), SpeedTiePolicy::CoinFlip, &mut rng),
            [Side::Enemy, Side::Player]
        );
    }

    #[test]
    fn test_speed_tie_player_first_policy() {
        let mut rng = TurnRng::new_for_test(vec![]);
        assert_eq!(
            turn_order((0, 30), (0, 30), SpeedTiePolicy::PlayerFirst, &mut rng),
            [Side::Player, Side::Enemy]
        );
    }
}
