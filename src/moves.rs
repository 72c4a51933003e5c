use schema::{MoveCategory, MoveData, MoveEffects, MultiHit, PokemonType, Target};
use std::sync::{Arc, LazyLock};

// Note: In some game generations, recoil is 1/4 of the user's max HP.
static STRUGGLE: LazyLock<Arc<MoveData>> = LazyLock::new(|| {
    Arc::new(MoveData {
        name: "Struggle".to_string(),
        description: "Used only when no other move has PP left.".to_string(),
        move_type: PokemonType::Typeless,
        category: MoveCategory::Physical,
        target: Target::Target,
        power: 50,
        accuracy: None,
        priority: 0,
        max_pp: 0, // Not a real move, no PP
        hits: MultiHit::Fixed(1),
        effects: MoveEffects::default(),
        secondaries: Vec::new(),
        recoil_percent: 25, // 25% recoil of damage dealt
    })
});

/// The fallback move used when every known move is out of PP.
pub fn struggle() -> Arc<MoveData> {
    Arc::clone(&STRUGGLE)
}

/// A known move with its remaining PP. The definition is shared between every instance.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveInstance {
    data: Arc<MoveData>,
    pub pp: u8,
}

impl MoveInstance {
    /// Create a new move instance with max PP
    pub fn new(data: Arc<MoveData>) -> Self {
        let pp = data.max_pp;
        Self { data, pp }
    }

    pub fn data(&self) -> &Arc<MoveData> {
        &self.data
    }

    pub fn name(&self) -> &str {
        &self.data.name
    }

    pub fn max_pp(&self) -> u8 {
        self.data.max_pp
    }

    pub fn is_usable(&self) -> bool {
        self.pp > 0
    }

    /// Spend one PP. Never drops below zero.
    pub fn use_pp(&mut self) {
        self.pp = self.pp.saturating_sub(1);
    }

    pub fn restore_all_pp(&mut self) {
        self.pp = self.max_pp();
    }
}

/// What a combatant is about to use: one of its own move slots, or Struggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveChoice {
    Slot(usize),
    Struggle,
}
