use crate::errors::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// How to order two actions with equal priority and equal speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SpeedTiePolicy {
    /// Fair 50/50 draw each time.
    #[default]
    CoinFlip,
    /// Player always moves first.
    PlayerFirst,
}

/// Presentation pauses, in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pacing {
    pub attack_ms: u64,
    pub faint_ms: u64,
    pub shake_ms: u64,
    pub send_out_ms: u64,
    pub level_up_ms: u64,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            attack_ms: 750,
            faint_ms: 2000,
            shake_ms: 500,
            send_out_ms: 750,
            level_up_ms: 1000,
        }
    }
}

impl Pacing {
    pub fn attack(&self) -> Duration {
        Duration::from_millis(self.attack_ms)
    }

    pub fn faint(&self) -> Duration {
        Duration::from_millis(self.faint_ms)
    }

    pub fn shake(&self) -> Duration {
        Duration::from_millis(self.shake_ms)
    }

    pub fn send_out(&self) -> Duration {
        Duration::from_millis(self.send_out_ms)
    }

    pub fn level_up(&self) -> Duration {
        Duration::from_millis(self.level_up_ms)
    }
}

/// Tunable battle rules. Every field has a default, so a config file only needs the overrides.
///
/// ```ron
/// (
///     speed_tie: PlayerFirst,
///     pacing: (attack_ms: 0, faint_ms: 0),
/// )
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    /// A critical hit lands on a 1-in-`crit_chance` draw.
    pub crit_chance: u32,
    pub crit_multiplier: f32,
    /// Same-type attack bonus.
    pub stab_multiplier: f32,
    /// Lower bound of the damage roll, in percent. The upper bound is always 100.
    pub random_factor_min: u32,
    pub trainer_exp_bonus: f32,
    pub speed_tie: SpeedTiePolicy,
    pub pacing: Pacing,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            crit_chance: 16,
            crit_multiplier: 2.0,
            stab_multiplier: 1.5,
            random_factor_min: 85,
            trainer_exp_bonus: 1.5,
            speed_tie: SpeedTiePolicy::CoinFlip,
            pacing: Pacing::default(),
        }
    }
}

impl BattleConfig {
    pub fn from_ron_str(source: &str) -> ConfigResult<Self> {
        let config: BattleConfig = ron::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_ron_str(&content)
    }

    fn validate(&self) -> ConfigResult<()> {
        if self.crit_chance == 0 {
            return Err(ConfigError::Invalid("crit_chance must be at least 1".to_string()));
        }
        if self.random_factor_min == 0 || self.random_factor_min > 100 {
            return Err(ConfigError::Invalid(format!(
                "random_factor_min must be within 1..=100, got {}",
                self.random_factor_min
            )));
        }
        for (name, value) in [
            ("crit_multiplier", self.crit_multiplier),
            ("stab_multiplier", self.stab_multiplier),
            ("trainer_exp_bonus", self.trainer_exp_bonus),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid(format!("{name} must be positive, got {value}")));
            }
        }
        Ok(())
    }

    /// Zero-delay pacing, for headless runs and tests.
    pub fn instant() -> Self {
        Self {
            pacing: Pacing {
                attack_ms: 0,
                faint_ms: 0,
                shake_ms: 0,
                send_out_ms: 0,
                level_up_ms: 0,
            },
            ..Self::default()
        }
    }
}
