//! The battle session.
//!
//! A [`BattleSession`] owns both sides for the length of one fight. It reads
//! [`BattleInput`]s from a channel, and each completed selection runs the turn
//! script to its end, awaiting the [`PresentationPort`] at every step. The
//! session returns the parties, reset for the next battle, in a [`BattleReport`].

use crate::battle::ai::{Behavior, RandomBehavior};
use crate::battle::catch::can_attempt_catch;
use crate::battle::presentation::{Cue, PresentationPort};
use crate::battle::state::{BattleOutcome, BattlePhase, BattleType, Side, TurnRng};
use crate::config::BattleConfig;
use crate::errors::{ActionError, BattleEngineError, BattleResult};
use crate::moves::MoveChoice;
use crate::party::Party;
use crate::player::BattlePlayer;
use crate::pokemon::PokemonInst;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Menu selections fed to a running battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleInput {
    Fight,
    /// Throw the capture device.
    Bag,
    Party,
    Run,
    SelectMove(usize),
    SelectMember(usize),
    Back,
    /// Yes/no answer to a dialog question.
    Confirm(bool),
    /// Which known move to drop for the new one; `None` keeps the current moves.
    ForgetMove(Option<usize>),
}

pub fn input_channel() -> (UnboundedSender<BattleInput>, UnboundedReceiver<BattleInput>) {
    mpsc::unbounded_channel()
}

/// A player action that consumes a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnAction {
    Move(MoveChoice),
    Switch(usize),
    Catch,
    Escape,
}

#[derive(Debug)]
pub struct BattleReport {
    pub outcome: BattleOutcome,
    pub turns: u32,
    pub player: Party,
    pub opponent: Party,
}

pub struct BattleSession<P: PresentationPort> {
    pub(super) presenter: P,
    inputs: UnboundedReceiver<BattleInput>,
    pub(super) rng: TurnRng,
    pub(super) config: BattleConfig,
    pub(super) battle_type: BattleType,
    pub(super) players: [BattlePlayer; 2],
    pub(super) phase: BattlePhase,
    pub(super) escape_attempts: u32,
    pub(super) turn_number: u32,
    pub(super) outcome: Option<BattleOutcome>,
    pub(super) enemy_behavior: Box<dyn Behavior>,
}

impl<P: PresentationPort> BattleSession<P> {
    /// A battle against a single wild combatant.
    pub fn wild(
        player: BattlePlayer,
        wild: PokemonInst,
        presenter: P,
        inputs: UnboundedReceiver<BattleInput>,
    ) -> BattleResult<Self> {
        let name = format!("Wild {}", wild.name());
        let party = Party::new(vec![wild])?;
        let enemy = BattlePlayer::new(name, Side::Enemy, party)?;
        Ok(Self::new(BattleType::Wild, player, enemy, presenter, inputs))
    }

    /// A battle against another trainer's party.
    pub fn trainer(
        player: BattlePlayer,
        trainer: BattlePlayer,
        presenter: P,
        inputs: UnboundedReceiver<BattleInput>,
    ) -> BattleResult<Self> {
        Ok(Self::new(BattleType::Trainer, player, trainer, presenter, inputs))
    }

    fn new(
        battle_type: BattleType,
        mut player: BattlePlayer,
        mut enemy: BattlePlayer,
        presenter: P,
        inputs: UnboundedReceiver<BattleInput>,
    ) -> Self {
        player.side = Side::Player;
        enemy.side = Side::Enemy;
        Self {
            presenter,
            inputs,
            rng: TurnRng::new_random(),
            config: BattleConfig::default(),
            battle_type,
            players: [player, enemy],
            phase: BattlePhase::Busy,
            escape_attempts: 0,
            turn_number: 0,
            outcome: None,
            enemy_behavior: Box::new(RandomBehavior),
        }
    }

    pub fn with_rng(mut self, rng: TurnRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn with_config(mut self, config: BattleConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_enemy_behavior(mut self, behavior: Box<dyn Behavior>) -> Self {
        self.enemy_behavior = behavior;
        self
    }

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    pub fn battle_type(&self) -> BattleType {
        self.battle_type
    }

    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    pub fn player(&self, side: Side) -> &BattlePlayer {
        &self.players[side.to_index()]
    }

    /// Play the battle out, returning once it is over.
    pub async fn run(mut self) -> BattleResult<BattleReport> {
        tracing::info!(
            battle_type = ?self.battle_type,
            player = %self.players[0].name,
            opponent = %self.players[1].name,
            "battle started"
        );
        self.setup().await;

        loop {
            if let Some(outcome) = self.outcome {
                return Ok(self.into_report(outcome));
            }
            let input = self.next_input().await?;
            self.handle_input(input).await?;
        }
    }

    fn into_report(self, outcome: BattleOutcome) -> BattleReport {
        let [player, opponent] = self.players;
        BattleReport {
            outcome,
            turns: self.turn_number,
            player: player.party,
            opponent: opponent.party,
        }
    }

    async fn setup(&mut self) {
        self.set_phase(BattlePhase::Busy);
        let player_pokemon = self.active(Side::Player).name().to_string();
        let enemy_pokemon = self.active(Side::Enemy).name().to_string();

        match self.battle_type {
            BattleType::Wild => {
                self.cue(Cue::Enter, Side::Enemy).await;
                self.say(&format!("A wild {} appeared!", enemy_pokemon)).await;
            }
            BattleType::Trainer => {
                let trainer = self.players[1].name.clone();
                self.say(&format!("{} wants to battle!", trainer)).await;
                self.cue(Cue::Enter, Side::Enemy).await;
                self.say(&format!("{} sent out {}!", trainer, enemy_pokemon)).await;
                self.pause(self.config.pacing.send_out()).await;
            }
        }
        self.show_hp(Side::Enemy).await;

        self.cue(Cue::Enter, Side::Player).await;
        self.say(&format!("Go {}!", player_pokemon)).await;
        self.show_hp(Side::Player).await;

        self.escape_attempts = 0;
        self.action_selection();
    }

    async fn handle_input(&mut self, input: BattleInput) -> BattleResult<()> {
        match (self.phase, input) {
            (BattlePhase::ActionSelection, BattleInput::Fight) => {
                if self.active(Side::Player).has_usable_move() {
                    self.set_phase(BattlePhase::MoveSelection);
                } else {
                    self.run_turn(TurnAction::Move(MoveChoice::Struggle)).await?;
                }
            }
            (BattlePhase::ActionSelection, BattleInput::Bag) => {
                let check = can_attempt_catch(
                    self.battle_type,
                    &self.players[0].party,
                    self.active(Side::Enemy),
                );
                match check {
                    Ok(()) => self.run_turn(TurnAction::Catch).await?,
                    Err(err) => self.reject(err).await,
                }
            }
            (BattlePhase::ActionSelection, BattleInput::Party) => self.set_phase(BattlePhase::PartyScreen),
            (BattlePhase::ActionSelection, BattleInput::Run) => {
                if self.battle_type == BattleType::Trainer {
                    self.reject(ActionError::CannotEscapeTrainerBattle).await;
                } else {
                    self.run_turn(TurnAction::Escape).await?;
                }
            }
            (BattlePhase::MoveSelection, BattleInput::SelectMove(slot)) => {
                match self.validate_move_selection(slot) {
                    Ok(()) => self.run_turn(TurnAction::Move(MoveChoice::Slot(slot))).await?,
                    Err(err) => self.reject(err).await,
                }
            }
            (BattlePhase::MoveSelection, BattleInput::Back) => self.action_selection(),
            (BattlePhase::PartyScreen, BattleInput::SelectMember(index)) => {
                match self.players[0].validate_switch(index) {
                    Ok(()) => self.run_turn(TurnAction::Switch(index)).await?,
                    Err(err) => self.reject(err).await,
                }
            }
            (BattlePhase::PartyScreen, BattleInput::Back) => self.action_selection(),
            (phase, input) => {
                tracing::debug!(?phase, ?input, "input ignored in this phase");
            }
        }
        Ok(())
    }

    fn validate_move_selection(&self, slot: usize) -> Result<(), ActionError> {
        let instance = self
            .active(Side::Player)
            .moves
            .get(slot)
            .ok_or(ActionError::InvalidMoveIndex(slot))?;
        if !instance.is_usable() {
            return Err(ActionError::NoPpRemaining);
        }
        Ok(())
    }

    // --- Phase and input plumbing ---

    pub(super) fn set_phase(&mut self, phase: BattlePhase) {
        if self.phase != phase {
            tracing::debug!(from = ?self.phase, to = ?phase, "phase change");
        }
        self.phase = phase;
        self.presenter.phase_changed(phase);
    }

    pub(super) fn action_selection(&mut self) {
        self.set_phase(BattlePhase::ActionSelection);
    }

    pub(super) async fn next_input(&mut self) -> BattleResult<BattleInput> {
        self.inputs.recv().await.ok_or(BattleEngineError::InputClosed)
    }

    pub(super) async fn reject(&self, err: ActionError) {
        tracing::debug!(%err, phase = ?self.phase, "selection rejected");
        self.say(&err.to_string()).await;
    }

    pub(super) fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    // --- Side access ---

    pub(super) fn active(&self, side: Side) -> &PokemonInst {
        self.players[side.to_index()].active_pokemon()
    }

    pub(super) fn active_mut(&mut self, side: Side) -> &mut PokemonInst {
        self.players[side.to_index()].active_pokemon_mut()
    }

    // --- Presentation helpers ---

    pub(super) async fn say(&self, text: &str) {
        self.presenter.show_message(text).await;
    }

    pub(super) async fn cue(&self, cue: Cue, side: Side) {
        self.presenter.play_cue(cue, side).await;
    }

    pub(super) async fn pause(&self, duration: Duration) {
        self.presenter.wait(duration).await;
    }

    pub(super) async fn show_hp(&self, side: Side) {
        let pokemon = self.active(side);
        self.presenter
            .update_hp(side, pokemon.current_hp(), pokemon.max_hp())
            .await;
    }

    /// Show every pending status message of `side`'s active combatant, oldest first.
    pub(super) async fn flush_status_changes(&mut self, side: Side) {
        while let Some(message) = self.active_mut(side).pop_status_change() {
            self.say(&message).await;
        }
    }

    // --- Switching ---

    /// Put party member `index` in as the player's active combatant.
    pub(super) async fn switch_pokemon(&mut self, index: usize) {
        let current = self.active(Side::Player);
        if !current.is_fainted() {
            let message = format!("Come back {}!", current.name());
            self.say(&message).await;
        }

        self.players[0].set_active(index);
        let name = self.active(Side::Player).name().to_string();
        self.cue(Cue::Enter, Side::Player).await;
        self.say(&format!("Go {}!", name)).await;
        self.show_hp(Side::Player).await;
    }

    /// The player's active combatant fainted: wait for a replacement. Costs no turn.
    pub(super) async fn await_forced_replacement(&mut self) -> BattleResult<()> {
        self.set_phase(BattlePhase::PartyScreen);
        loop {
            match self.next_input().await? {
                BattleInput::SelectMember(index) => match self.players[0].validate_switch(index) {
                    Ok(()) => {
                        self.switch_pokemon(index).await;
                        self.set_phase(BattlePhase::RunningTurn);
                        return Ok(());
                    }
                    Err(err) => self.reject(err).await,
                },
                input => tracing::debug!(?input, "a replacement must be chosen"),
            }
        }
    }

    /// Ask whether the player wants to switch before the trainer's next combatant comes out.
    pub(super) async fn offer_switch_before_send_out(&mut self, next_index: usize) -> BattleResult<()> {
        self.set_phase(BattlePhase::Busy);
        let trainer = self.players[1].name.clone();
        let next_name = self.players[1].party[next_index].name().to_string();
        self.say(&format!(
            "{} is about to use {}. Do you want to change Pokémon?",
            trainer, next_name
        ))
        .await;

        self.set_phase(BattlePhase::AboutToUseSwitch);
        let wants_switch = loop {
            match self.next_input().await? {
                BattleInput::Confirm(answer) => break answer,
                BattleInput::Back => break false,
                input => tracing::debug!(?input, "waiting for a yes/no answer"),
            }
        };

        if wants_switch {
            self.set_phase(BattlePhase::PartyScreen);
            loop {
                match self.next_input().await? {
                    BattleInput::SelectMember(index) => {
                        match self.players[0].validate_switch(index) {
                            Ok(()) => {
                                self.switch_pokemon(index).await;
                                break;
                            }
                            Err(err) => self.reject(err).await,
                        }
                    }
                    BattleInput::Back => break,
                    input => tracing::debug!(?input, "waiting for a party choice"),
                }
            }
        }

        self.send_next_trainer_pokemon(next_index).await;
        Ok(())
    }

    pub(super) async fn send_next_trainer_pokemon(&mut self, index: usize) {
        self.set_phase(BattlePhase::Busy);
        self.players[1].set_active(index);
        let trainer = self.players[1].name.clone();
        let name = self.active(Side::Enemy).name().to_string();
        self.cue(Cue::Enter, Side::Enemy).await;
        self.say(&format!("{} sent out {}!", trainer, name)).await;
        self.show_hp(Side::Enemy).await;
        self.set_phase(BattlePhase::RunningTurn);
    }

    // --- End of battle ---

    /// End the battle. Every side drops its battle-scoped state; the opponent's status is cured.
    pub(super) async fn finish(&mut self, outcome: BattleOutcome) {
        if self.outcome.is_some() {
            return;
        }
        self.outcome = Some(outcome);
        self.set_phase(BattlePhase::BattleOver);

        self.players[0].party.on_battle_over();
        self.active_mut(Side::Enemy).cure_status();
        self.players[1].party.on_battle_over();

        tracing::info!(%outcome, turns = self.turn_number, "battle over");
        self.presenter.battle_over(outcome).await;
    }
}
