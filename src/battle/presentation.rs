use crate::battle::state::{BattleOutcome, BattlePhase, Side};
use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Visual effects the battle asks the front end to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Enter,
    Attack,
    Hit,
    Faint,
    CaptureShake,
    CaptureSuccess,
    CaptureBreakOut,
}

/// Everything the battle needs from a front end.
///
/// Each call resolves once the effect has finished presenting; the battle does
/// not continue until it does.
#[async_trait]
pub trait PresentationPort: Send + Sync {
    async fn show_message(&self, text: &str);

    async fn play_cue(&self, cue: Cue, side: Side);

    async fn wait(&self, duration: Duration);

    async fn update_hp(&self, _side: Side, _hp: u16, _max_hp: u16) {}

    fn phase_changed(&self, _phase: BattlePhase) {}

    /// Fired exactly once, when the battle ends.
    async fn battle_over(&self, _outcome: BattleOutcome) {}
}

#[async_trait]
impl<T: PresentationPort + ?Sized> PresentationPort for Arc<T> {
    async fn show_message(&self, text: &str) {
        (**self).show_message(text).await
    }

    async fn play_cue(&self, cue: Cue, side: Side) {
        (**self).play_cue(cue, side).await
    }

    async fn wait(&self, duration: Duration) {
        (**self).wait(duration).await
    }

    async fn update_hp(&self, side: Side, hp: u16, max_hp: u16) {
        (**self).update_hp(side, hp, max_hp).await
    }

    fn phase_changed(&self, phase: BattlePhase) {
        (**self).phase_changed(phase)
    }

    async fn battle_over(&self, outcome: BattleOutcome) {
        (**self).battle_over(outcome).await
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PresentationEvent {
    Message(String),
    Cue(Cue, Side),
    Wait(Duration),
    Hp { side: Side, hp: u16, max_hp: u16 },
    Phase(BattlePhase),
    BattleOver(BattleOutcome),
}

/// Front end that completes every call immediately and keeps a log of what it was asked to do.
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    events: Mutex<Vec<PresentationEvent>>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    // A panic elsewhere must not hide what was already recorded
    fn log(&self) -> MutexGuard<'_, Vec<PresentationEvent>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, event: PresentationEvent) {
        self.log().push(event);
    }

    pub fn events(&self) -> Vec<PresentationEvent> {
        self.log().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                PresentationEvent::Message(text) => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn cues(&self) -> Vec<(Cue, Side)> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                PresentationEvent::Cue(cue, side) => Some((cue, side)),
                _ => None,
            })
            .collect()
    }

    pub fn has_message(&self, text: &str) -> bool {
        self.messages().iter().any(|message| message == text)
    }

    pub fn outcomes(&self) -> Vec<BattleOutcome> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                PresentationEvent::BattleOver(outcome) => Some(outcome),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl PresentationPort for RecordingPresenter {
    async fn show_message(&self, text: &str) {
        self.record(PresentationEvent::Message(text.to_string()));
    }

    async fn play_cue(&self, cue: Cue, side: Side) {
        self.record(PresentationEvent::Cue(cue, side));
    }

    async fn wait(&self, duration: Duration) {
        self.record(PresentationEvent::Wait(duration));
    }

    async fn update_hp(&self, side: Side, hp: u16, max_hp: u16) {
        self.record(PresentationEvent::Hp { side, hp, max_hp });
    }

    fn phase_changed(&self, phase: BattlePhase) {
        self.record(PresentationEvent::Phase(phase));
    }

    async fn battle_over(&self, outcome: BattleOutcome) {
        self.record(PresentationEvent::BattleOver(outcome));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_recording_survives_a_poisoned_lock() {
        let presenter = Arc::new(RecordingPresenter::new());
        presenter.phase_changed(BattlePhase::Busy);

        let holder = Arc::clone(&presenter);
        let result = std::thread::spawn(move || {
            let _guard = holder.log();
            panic!("panicked while holding the event log");
        })
        .join();
        assert!(result.is_err());

        presenter.phase_changed(BattlePhase::BattleOver);
        assert_eq!(
            presenter.events(),
            vec![
                PresentationEvent::Phase(BattlePhase::Busy),
                PresentationEvent::Phase(BattlePhase::BattleOver),
            ]
        );
    }
}
