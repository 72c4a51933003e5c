use crate::battle::catch::{catch_value_for, shake_count, SHAKES_TO_CATCH};
use crate::battle::engine::BattleSession;
use crate::battle::presentation::{Cue, PresentationPort};
use crate::battle::state::{BattleOutcome, Side};
use crate::errors::BattleResult;

impl<P: PresentationPort> BattleSession<P> {
    /// Throw a ball at the wild combatant. Callers check `can_attempt_catch` first.
    pub(crate) async fn throw_ball(&mut self) -> BattleResult<()> {
        let thrower = self.players[0].name.clone();
        self.say(&format!("{} used a Poké Ball!", thrower)).await;

        let value = catch_value_for(self.active(Side::Enemy));
        let shakes = shake_count(value, &mut self.rng);
        tracing::debug!(catch_value = value, shakes, "catch attempt");

        for _ in 0..shakes.min(SHAKES_TO_CATCH - 1) {
            self.pause(self.config.pacing.shake()).await;
            self.cue(Cue::CaptureShake, Side::Enemy).await;
        }

        let name = self.active(Side::Enemy).name().to_string();
        if shakes >= SHAKES_TO_CATCH {
            self.cue(Cue::CaptureSuccess, Side::Enemy).await;
            self.say(&format!("{} was caught!", name)).await;

            let mut caught = self.active(Side::Enemy).clone();
            caught.cure_status();
            caught.on_battle_over();
            self.players[0].party.add_pokemon(caught)?;

            self.say(&format!("{} has been added to your party.", name)).await;
            self.finish(BattleOutcome::Captured).await;
        } else {
            self.pause(self.config.pacing.shake()).await;
            self.cue(Cue::CaptureBreakOut, Side::Enemy).await;
            if shakes < 2 {
                self.say("The Pokémon broke free!").await;
            } else {
                self.say("Almost caught it!").await;
            }
        }
        Ok(())
    }
}
