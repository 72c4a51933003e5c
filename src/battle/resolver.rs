//! Resolving a single move from start to finish.

use crate::battle::calculators::hit_count;
use crate::battle::engine::BattleSession;
use crate::battle::presentation::{Cue, PresentationPort};
use crate::battle::state::Side;
use crate::battle::stats::move_hits;
use crate::errors::BattleResult;
use crate::moves::MoveChoice;
use crate::player::BattlePlayer;
use crate::pokemon::{DamageDetails, PokemonInst};
use schema::{MoveCategory, MoveData, MoveEffects, Target};

/// Borrow the attacker's and defender's active combatants at once.
fn split_active_mut(
    players: &mut [BattlePlayer; 2],
    attacker: Side,
) -> (&mut PokemonInst, &mut PokemonInst) {
    let [player, enemy] = players;
    match attacker {
        Side::Player => (player.active_pokemon_mut(), enemy.active_pokemon_mut()),
        Side::Enemy => (enemy.active_pokemon_mut(), player.active_pokemon_mut()),
    }
}

impl<P: PresentationPort> BattleSession<P> {
    /// Resolve `choice` for `side`'s active combatant against the other side.
    pub(super) async fn run_move(&mut self, side: Side, choice: MoveChoice) -> BattleResult<()> {
        let target_side = side.opponent();

        let can_move = self.players[side.to_index()]
            .active_pokemon_mut()
            .on_before_move(&mut self.rng);
        self.flush_status_changes(side).await;

        if !can_move {
            self.show_hp(side).await;
            if self.active(side).is_fainted() {
                self.handle_fainted(side).await?;
            }
            return Ok(());
        }

        let move_data = self.active(side).move_data(choice);
        let user = self.active(side).name().to_string();
        match choice {
            MoveChoice::Slot(slot) => {
                if let Some(instance) = self.active_mut(side).moves.get_mut(slot) {
                    instance.use_pp();
                }
            }
            MoveChoice::Struggle => {
                self.say(&format!("{} has no moves left!", user)).await;
            }
        }
        self.say(&format!("{} used {}!", user, move_data.name)).await;
        tracing::debug!(%side, pokemon = %user, r#move = %move_data.name, "move used");

        let hits = move_hits(
            &move_data,
            self.players[side.to_index()].active_pokemon(),
            self.players[target_side.to_index()].active_pokemon(),
            &mut self.rng,
        );
        if !hits {
            self.say(&format!("{}'s attack missed!", user)).await;
            return Ok(());
        }

        let strikes = hit_count(&move_data, &mut self.rng);
        let mut landed: u8 = 0;
        let mut target_fainted = false;

        for _ in 0..strikes {
            self.cue(Cue::Attack, side).await;
            self.pause(self.config.pacing.attack()).await;
            self.cue(Cue::Hit, target_side).await;

            if move_data.category == MoveCategory::Status {
                let changed = self
                    .apply_move_effects(&move_data.effects, side, move_data.target)
                    .await;
                if !changed {
                    self.say("But it failed!").await;
                }
            } else {
                let (details, recoil) = self.strike(side, &move_data);
                self.show_hp(target_side).await;
                self.show_damage_details(&details).await;
                if recoil > 0 {
                    self.say(&format!("{} is damaged by recoil!", user)).await;
                    self.show_hp(side).await;
                }
            }
            landed += 1;

            if self.active(target_side).is_fainted() {
                if landed >= 2 {
                    self.say(&format!("Hit {} times!", landed)).await;
                }
                target_fainted = true;
                self.handle_fainted(target_side).await?;
                break;
            }
            if self.active(side).is_fainted() {
                break;
            }
        }

        if !target_fainted && landed >= 2 {
            self.say(&format!("Hit {} times!", landed)).await;
        }
        if self.is_over() {
            return Ok(());
        }

        if self.active(side).is_fainted() {
            return self.handle_fainted(side).await;
        }

        if !target_fainted {
            for secondary in &move_data.secondaries {
                let roll = self.rng.percent("secondary effect chance");
                if roll <= secondary.chance as u32 {
                    self.apply_move_effects(&secondary.effects, side, secondary.target)
                        .await;
                }
            }
        }
        Ok(())
    }

    /// One damaging hit, plus the attacker's recoil. Returns the hit and the recoil taken.
    fn strike(&mut self, side: Side, move_data: &MoveData) -> (DamageDetails, u16) {
        let (attacker, defender) = split_active_mut(&mut self.players, side);
        let details = defender.take_damage(move_data, attacker, &mut self.rng, &self.config);

        let recoil = if move_data.recoil_percent > 0 && details.amount > 0 {
            let amount = (details.amount as u32 * move_data.recoil_percent as u32 / 100).max(1);
            attacker.lose_hp(amount as u16)
        } else {
            0
        };
        (details, recoil)
    }

    async fn show_damage_details(&self, details: &DamageDetails) {
        if details.is_critical {
            self.say("A critical hit!").await;
        }
        if details.type_effectiveness > 1.0 {
            self.say("It's super effective!").await;
        } else if details.type_effectiveness == 0.0 {
            self.say("It had no effect!").await;
        } else if details.type_effectiveness < 1.0 {
            self.say("It's not very effective...").await;
        }
    }

    /// Apply `effects` from `source`'s move to whichever side `target` names.
    ///
    /// Returns whether anything was attempted that produced a message.
    async fn apply_move_effects(&mut self, effects: &MoveEffects, source: Side, target: Target) -> bool {
        let recipient = match target {
            Target::User => source,
            Target::Target => source.opponent(),
        };

        let mut changed = false;
        {
            let pokemon = self.players[recipient.to_index()].active_pokemon_mut();
            if !effects.boosts.is_empty() {
                pokemon.apply_boosts(&effects.boosts);
                changed = true;
            }
            if let Some(status) = effects.status {
                changed |= pokemon.set_status(status, &mut self.rng);
            }
            if let Some(volatile) = effects.volatile_status {
                changed |= pokemon.set_volatile_status(volatile, &mut self.rng);
            }
        }

        self.flush_status_changes(source).await;
        if recipient != source {
            self.flush_status_changes(recipient).await;
        }
        changed
    }
}
