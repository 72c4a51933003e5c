use crate::battle::engine::{BattleInput, BattleSession};
use crate::battle::presentation::PresentationPort;
use crate::battle::progression::{can_receive_experience, experience_gain};
use crate::battle::state::{BattlePhase, BattleType, Side};
use crate::errors::{ActionError, BattleResult};
use crate::species::MAX_MOVES;
use schema::MoveData;
use std::sync::Arc;

impl<P: PresentationPort> BattleSession<P> {
    /// Give the player's active combatant experience for the opponent that just fainted,
    /// then run every level-up it earned.
    pub(crate) async fn award_experience(&mut self) -> BattleResult<()> {
        let defeated = self.active(Side::Enemy);
        let bonus = match self.battle_type {
            BattleType::Trainer => self.config.trainer_exp_bonus,
            BattleType::Wild => 1.0,
        };
        let gain = experience_gain(defeated.species().exp_yield, defeated.level, bonus);

        if let Err(reason) = can_receive_experience(self.active(Side::Player)) {
            tracing::debug!(?reason, "no experience awarded");
            return Ok(());
        }

        let recipient = self.active_mut(Side::Player);
        recipient.exp = recipient.exp.saturating_add(gain);
        let name = recipient.name().to_string();
        tracing::debug!(pokemon = %name, gain, total = recipient.exp, "experience gained");
        self.say(&format!("{} gained {} EXP. Points!", name, gain)).await;

        while self.active_mut(Side::Player).check_for_level_up() {
            let level = self.active(Side::Player).level;
            self.say(&format!("{} grew to level {}!", name, level)).await;
            self.show_hp(Side::Player).await;
            self.pause(self.config.pacing.level_up()).await;

            let unlocked = self.active(Side::Player).learnable_moves_at_current_level();
            for move_data in unlocked {
                self.teach_move(move_data).await?;
            }
        }
        Ok(())
    }

    /// Teach a newly unlocked move, asking which one to forget when every slot is full.
    async fn teach_move(&mut self, move_data: Arc<MoveData>) -> BattleResult<()> {
        let name = self.active(Side::Player).name().to_string();
        if self.active(Side::Player).knows_move(&move_data.name) {
            return Ok(());
        }

        if self.active_mut(Side::Player).learn_move(Arc::clone(&move_data)) {
            self.say(&format!("{} learned {}!", name, move_data.name)).await;
            return Ok(());
        }

        self.say(&format!("{} is trying to learn {}.", name, move_data.name))
            .await;
        self.say(&format!(
            "But {} can't learn more than {} moves.",
            name, MAX_MOVES
        ))
        .await;

        let resume_phase = self.phase;
        self.set_phase(BattlePhase::MoveToForget);
        loop {
            match self.next_input().await? {
                BattleInput::ForgetMove(None) => {
                    self.say(&format!("{} did not learn {}.", name, move_data.name))
                        .await;
                    break;
                }
                BattleInput::ForgetMove(Some(slot)) => {
                    let replaced = self
                        .active_mut(Side::Player)
                        .replace_move(slot, Arc::clone(&move_data));
                    match replaced {
                        Some(old) => {
                            self.say(&format!(
                                "{} forgot {} and learned {}!",
                                name,
                                old.name(),
                                move_data.name
                            ))
                            .await;
                            break;
                        }
                        None => self.reject(ActionError::InvalidMoveIndex(slot)).await,
                    }
                }
                input => tracing::debug!(?input, "waiting for a move to forget"),
            }
        }
        self.set_phase(resume_phase);
        Ok(())
    }
}
