use crate::battle::calculators::{calculate_damage, DamageModifiers};
use crate::battle::conditions::{
    BeforeMove, ConditionHooks, HookContext, StatusCondition, VolatileCondition,
};
use crate::battle::state::TurnRng;
use crate::battle::stats::{apply_stat_stage_multiplier, MAX_STAGE, MIN_STAGE};
use crate::config::BattleConfig;
use crate::moves::{struggle, MoveChoice, MoveInstance};
use crate::species::{Species, MAX_LEVEL, MAX_MOVES};
use schema::{MoveCategory, MoveData, PokemonType, StatBoost, StatType, StatusType, VolatileType};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

/// Result of one damaging hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageDetails {
    pub amount: u16,
    pub is_critical: bool,
    pub type_effectiveness: f32,
    pub fainted: bool,
}

/// A combatant: one member of a party, or a wild encounter.
#[derive(Debug, Clone, PartialEq)]
pub struct PokemonInst {
    species: Arc<Species>,
    pub level: u8,
    hp: u16,
    pub exp: u32,
    pub moves: Vec<MoveInstance>,
    pub status: Option<StatusCondition>,
    pub volatile_statuses: Vec<VolatileCondition>,
    stat_stages: HashMap<StatType, i8>,
    status_changes: VecDeque<String>,
}

impl PokemonInst {
    /// Create a combatant knowing the most recent moves its species unlocks by `level`.
    pub fn new(species: Arc<Species>, level: u8) -> Self {
        let level = level.clamp(1, MAX_LEVEL);
        let moves = species.starting_moves(level);
        Self::with_moves(species, level, moves)
    }

    pub fn with_moves(species: Arc<Species>, level: u8, moves: Vec<Arc<MoveData>>) -> Self {
        let level = level.clamp(1, MAX_LEVEL);
        let exp = species.exp_for_level(level);
        let mut pokemon = Self {
            species,
            level,
            hp: 0,
            exp,
            moves: moves
                .into_iter()
                .take(MAX_MOVES)
                .map(MoveInstance::new)
                .collect(),
            status: None,
            volatile_statuses: Vec::new(),
            stat_stages: HashMap::new(),
            status_changes: VecDeque::new(),
        };
        pokemon.hp = pokemon.max_hp();
        pokemon
    }

    pub fn name(&self) -> &str {
        &self.species.name
    }

    pub fn species(&self) -> &Arc<Species> {
        &self.species
    }

    // --- Stats ---

    pub fn max_hp(&self) -> u16 {
        let base = self.species.base_stats.hp as u32;
        let level = self.level as u32;
        (base * level / 100 + 10 + level) as u16
    }

    /// Stat value before boosts and conditions.
    pub fn base_stat(&self, stat: StatType) -> u16 {
        let stats = &self.species.base_stats;
        let base = match stat {
            StatType::Atk => stats.attack,
            StatType::Def => stats.defense,
            StatType::SpAtk => stats.sp_attack,
            StatType::SpDef => stats.sp_defense,
            StatType::Spe => stats.speed,
            // Accuracy and evasion only exist as stages
            StatType::Acc | StatType::Eva => return 1,
        } as u32;
        (base * self.level as u32 / 100 + 5) as u16
    }

    /// Stat value as it applies right now: level, boost stage and conditions.
    pub fn stat(&self, stat: StatType) -> u16 {
        let staged = apply_stat_stage_multiplier(self.base_stat(stat), self.stat_stage(stat));
        let mut modifier = 1.0;
        if let Some(status) = &self.status {
            modifier *= status.stat_modifier(stat);
        }
        for volatile in &self.volatile_statuses {
            modifier *= volatile.stat_modifier(stat);
        }
        ((staged as f32 * modifier).floor() as u16).max(1)
    }

    pub fn attack(&self) -> u16 {
        self.stat(StatType::Atk)
    }

    pub fn defense(&self) -> u16 {
        self.stat(StatType::Def)
    }

    pub fn sp_attack(&self) -> u16 {
        self.stat(StatType::SpAtk)
    }

    pub fn sp_defense(&self) -> u16 {
        self.stat(StatType::SpDef)
    }

    pub fn speed(&self) -> u16 {
        self.stat(StatType::Spe)
    }

    pub fn stat_stage(&self, stat: StatType) -> i8 {
        self.stat_stages.get(&stat).copied().unwrap_or(0)
    }

    // --- HP ---

    pub fn current_hp(&self) -> u16 {
        self.hp
    }

    pub fn set_hp(&mut self, hp: u16) {
        self.hp = hp.min(self.max_hp());
    }

    pub fn set_hp_to_max(&mut self) {
        self.hp = self.max_hp();
    }

    /// Remove up to `amount` HP. Returns how much was actually lost.
    pub fn lose_hp(&mut self, amount: u16) -> u16 {
        let lost = amount.min(self.hp);
        self.hp -= lost;
        lost
    }

    pub fn is_fainted(&self) -> bool {
        self.hp == 0
    }

    /// Restore HP, clear every condition and refill PP.
    pub fn full_heal(&mut self) {
        self.set_hp_to_max();
        self.status = None;
        self.volatile_statuses.clear();
        for move_instance in &mut self.moves {
            move_instance.restore_all_pp();
        }
    }

    // --- Damage ---

    /// Take a hit from `move_data` used by `attacker`.
    pub fn take_damage(
        &mut self,
        move_data: &MoveData,
        attacker: &PokemonInst,
        rng: &mut TurnRng,
        config: &BattleConfig,
    ) -> DamageDetails {
        let is_critical = rng.chance_one_in("critical hit check", config.crit_chance);

        let type_effectiveness = PokemonType::combined_effectiveness(
            move_data.move_type,
            self.species.primary_type,
            self.species.secondary_type,
        );

        let stab = if attacker.species.has_type(move_data.move_type) {
            config.stab_multiplier
        } else {
            1.0
        };

        let roll = rng.next_in_range("damage roll", config.random_factor_min..=100);

        let (attack, defense) = match move_data.category {
            MoveCategory::Special => (attacker.sp_attack(), self.sp_defense()),
            _ => (attacker.attack(), self.defense()),
        };

        let modifiers = DamageModifiers {
            critical: if is_critical { config.crit_multiplier } else { 1.0 },
            stab,
            type_effectiveness,
            random_factor: roll as f32 / 100.0,
        };

        let amount = calculate_damage(attacker.level, move_data.power, attack, defense, modifiers);
        let dealt = self.lose_hp(amount);

        DamageDetails {
            amount: dealt,
            is_critical,
            type_effectiveness,
            fainted: self.is_fainted(),
        }
    }

    // --- Boosts ---

    pub fn apply_boosts(&mut self, boosts: &[StatBoost]) {
        for boost in boosts {
            if boost.stages == 0 {
                continue;
            }
            let current = self.stat_stage(boost.stat);
            let name = self.species.name.clone();

            if boost.stages > 0 && current >= MAX_STAGE {
                self.status_changes
                    .push_back(format!("{}'s {} won't go any higher!", name, boost.stat));
                continue;
            }
            if boost.stages < 0 && current <= MIN_STAGE {
                self.status_changes
                    .push_back(format!("{}'s {} won't go any lower!", name, boost.stat));
                continue;
            }

            let updated = (current as i16 + boost.stages as i16)
                .clamp(MIN_STAGE as i16, MAX_STAGE as i16) as i8;
            self.stat_stages.insert(boost.stat, updated);

            let change = updated - current;
            let description = match change {
                1 => "rose",
                2 => "rose sharply",
                c if c >= 3 => "rose drastically",
                -1 => "fell",
                -2 => "harshly fell",
                _ => "severely fell",
            };
            self.status_changes
                .push_back(format!("{}'s {} {}!", name, boost.stat, description));
        }
    }

    // --- Conditions ---

    /// Inflict a persistent status. The first one sticks until cured.
    pub fn set_status(&mut self, kind: StatusType, rng: &mut TurnRng) -> bool {
        if self.status.is_some() {
            return false;
        }
        let status = StatusCondition::inflict(kind, rng);
        let message = status.start_message(self.name());
        self.status_changes.push_back(message);
        self.status = Some(status);
        true
    }

    /// Add a volatile status alongside any others. A kind already present is left alone.
    pub fn set_volatile_status(&mut self, kind: VolatileType, rng: &mut TurnRng) -> bool {
        if self.has_volatile_status(kind) {
            return false;
        }
        let volatile = VolatileCondition::inflict(kind, rng);
        let message = volatile.start_message(self.name());
        self.status_changes.push_back(message);
        self.volatile_statuses.push(volatile);
        true
    }

    pub fn has_volatile_status(&self, kind: VolatileType) -> bool {
        self.volatile_statuses.iter().any(|v| v.kind() == kind)
    }

    pub fn cure_status(&mut self) {
        self.status = None;
    }

    pub fn cure_volatile_status(&mut self, kind: VolatileType) {
        self.volatile_statuses.retain(|v| v.kind() != kind);
    }

    /// Run every before-move hook. Returns whether the move may go ahead.
    pub fn on_before_move(&mut self, rng: &mut TurnRng) -> bool {
        let max_hp = self.max_hp();
        let mut can_move = true;
        let mut self_damage = 0;

        if let Some(status) = self.status.as_mut() {
            let mut ctx = HookContext {
                name: &self.species.name,
                max_hp,
                messages: &mut self.status_changes,
            };
            match status.on_before_move(&mut ctx, rng) {
                BeforeMove::Proceed => {}
                BeforeMove::Cured => self.status = None,
                BeforeMove::Blocked => can_move = false,
                BeforeMove::HurtItself(damage) => {
                    self_damage += damage;
                    can_move = false;
                }
            }
        }

        // A combatant that can't act this turn still counts down its volatile conditions
        let mut cured = Vec::new();
        for volatile in self.volatile_statuses.iter_mut() {
            let mut ctx = HookContext {
                name: &self.species.name,
                max_hp,
                messages: &mut self.status_changes,
            };
            match volatile.on_before_move(&mut ctx, rng) {
                BeforeMove::Proceed => {}
                BeforeMove::Cured => cured.push(volatile.kind()),
                BeforeMove::Blocked => can_move = false,
                BeforeMove::HurtItself(damage) => {
                    self_damage += damage;
                    can_move = false;
                }
            }
        }
        for kind in cured {
            self.cure_volatile_status(kind);
        }

        if self_damage > 0 {
            self.lose_hp(self_damage);
        }
        can_move
    }

    /// Apply end-of-turn condition damage. Returns the HP lost.
    pub fn on_after_turn(&mut self) -> u16 {
        let max_hp = self.max_hp();
        let Some(status) = self.status.as_ref() else {
            return 0;
        };
        let mut ctx = HookContext {
            name: &self.species.name,
            max_hp,
            messages: &mut self.status_changes,
        };
        let damage = status.on_after_turn(&mut ctx);
        self.lose_hp(damage)
    }

    /// Reset battle-scoped state. The persistent status is kept.
    pub fn on_battle_over(&mut self) {
        self.stat_stages.clear();
        self.volatile_statuses.clear();
    }

    pub fn catch_bonus(&self) -> f32 {
        self.status.as_ref().map_or(1.0, StatusCondition::catch_bonus)
    }

    // --- Status messages ---

    pub fn pop_status_change(&mut self) -> Option<String> {
        self.status_changes.pop_front()
    }

    // --- Experience ---

    /// Gain one level if experience has reached the next threshold.
    ///
    /// Current HP rises by as much as max HP does. Call repeatedly to process several levels.
    pub fn check_for_level_up(&mut self) -> bool {
        if self.level >= MAX_LEVEL {
            return false;
        }
        if self.exp < self.species.exp_for_level(self.level + 1) {
            return false;
        }
        let old_max = self.max_hp();
        self.level += 1;
        let gained = self.max_hp().saturating_sub(old_max);
        self.hp = self.hp.saturating_add(gained).min(self.max_hp());
        true
    }

    pub fn learnable_moves_at_current_level(&self) -> Vec<Arc<MoveData>> {
        self.species.moves_learned_at_level(self.level)
    }

    pub fn knows_move(&self, name: &str) -> bool {
        self.moves.iter().any(|m| m.name() == name)
    }

    /// Learn into a free slot. Fails when all slots are taken.
    pub fn learn_move(&mut self, move_data: Arc<MoveData>) -> bool {
        if self.moves.len() >= MAX_MOVES {
            return false;
        }
        self.moves.push(MoveInstance::new(move_data));
        true
    }

    /// Swap the move in `slot` for a fresh instance of `move_data`. Returns the forgotten move.
    pub fn replace_move(&mut self, slot: usize, move_data: Arc<MoveData>) -> Option<MoveInstance> {
        let existing = self.moves.get_mut(slot)?;
        Some(std::mem::replace(existing, MoveInstance::new(move_data)))
    }

    // --- Move choice ---

    pub fn has_usable_move(&self) -> bool {
        self.moves.iter().any(MoveInstance::is_usable)
    }

    /// Uniform pick among moves with PP left, or Struggle when none have any.
    pub fn get_random_move(&self, rng: &mut TurnRng) -> MoveChoice {
        let usable: Vec<usize> = self
            .moves
            .iter()
            .enumerate()
            .filter(|(_, m)| m.is_usable())
            .map(|(index, _)| index)
            .collect();

        if usable.is_empty() {
            return MoveChoice::Struggle;
        }
        MoveChoice::Slot(usable[rng.pick_index("random move choice", usable.len())])
    }

    /// Definition behind a move choice. Out-of-range slots fall back to Struggle.
    pub fn move_data(&self, choice: MoveChoice) -> Arc<MoveData> {
        match choice {
            MoveChoice::Slot(slot) => self
                .moves
                .get(slot)
                .map(|m| Arc::clone(m.data()))
                .unwrap_or_else(struggle),
            MoveChoice::Struggle => struggle(),
        }
    }

    pub fn move_priority(&self, choice: MoveChoice) -> i8 {
        self.move_data(choice).priority
    }
}
