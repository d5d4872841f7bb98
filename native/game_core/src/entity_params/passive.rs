//! Path: native/game_core/src/entity_params/passive.rs
//! Summary: パッシブモジュールのテンプレート（レベル毎の効果ベクトル・最大レベル・進化触媒フラグ）

use super::TemplateId;
use crate::stats::EffectVector;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum PassiveId {
    #[default]
    PowerCore       = 0,
    NanoArmor       = 1,
    ShieldBooster   = 2,
    Regenerator     = 3,
    Overclock       = 4,
    Amplifier       = 5,
    Accelerator     = 6,
    Stabilizer      = 7,
    JetBoots        = 8,
    TractorBeam     = 9,
    XpChip          = 10,
    LuckyChip       = 11,
    // 進化触媒
    EnergyCell      = 12,
    TargetingSystem = 13,
    ReactorCore     = 14,
    Capacitor       = 15,
    ExplosiveModule = 16,
    NanoSwarm       = 17,
}

#[derive(Clone, Copy, Debug)]
pub struct PassiveParams {
    pub name:      &'static str,
    /// 1 レベルあたりの効果（レベル倍して合算する）
    pub effect:    EffectVector,
    pub max_level: u32,
    /// 武器進化の前提条件になるモジュール
    pub catalyst:  bool,
}

const fn regular(name: &'static str, effect: EffectVector, max_level: u32) -> PassiveParams {
    PassiveParams { name, effect, max_level, catalyst: false }
}

const fn catalyst(name: &'static str, effect: EffectVector) -> PassiveParams {
    PassiveParams { name, effect, max_level: 3, catalyst: true }
}

static PASSIVE_TABLE: [PassiveParams; 18] = [
    regular("Power Core",     EffectVector { damage: 0.10, ..EffectVector::ZERO }, 5),
    regular("Nano Armor",     EffectVector { armor: 0.05, ..EffectVector::ZERO }, 5),
    regular("Shield Booster", EffectVector { max_hp: 0.2, ..EffectVector::ZERO }, 5),
    regular("Regenerator",    EffectVector { hp_regen: 0.3, ..EffectVector::ZERO }, 5),
    regular("Overclock",      EffectVector { cooldown: 0.08, ..EffectVector::ZERO }, 5),
    regular("Amplifier",      EffectVector { area: 0.1, ..EffectVector::ZERO }, 5),
    regular("Accelerator",    EffectVector { projectile_speed: 0.1, ..EffectVector::ZERO }, 5),
    regular("Stabilizer",     EffectVector { duration: 0.1, ..EffectVector::ZERO }, 5),
    regular("Jet Boots",      EffectVector { speed: 0.1, ..EffectVector::ZERO }, 5),
    regular("Tractor Beam",   EffectVector { pickup_range: 0.4, ..EffectVector::ZERO }, 3),
    regular("XP Chip",        EffectVector { xp_gain: 0.1, ..EffectVector::ZERO }, 5),
    regular("Lucky Chip",     EffectVector { luck: 0.1, ..EffectVector::ZERO }, 5),
    catalyst("Energy Cell",      EffectVector { laser_damage: 0.1, ..EffectVector::ZERO }),
    catalyst("Targeting System", EffectVector { homing: 0.15, ..EffectVector::ZERO }),
    catalyst("Reactor Core",     EffectVector { orbitals: 1.0, ..EffectVector::ZERO }),
    catalyst("Capacitor",        EffectVector { chains: 1.0, ..EffectVector::ZERO }),
    catalyst("Explosive Module", EffectVector { explosion_radius: 0.15, ..EffectVector::ZERO }),
    catalyst("Nano Swarm",       EffectVector { homing: 0.1, ..EffectVector::ZERO }),
];

impl PassiveId {
    pub fn params(self) -> &'static PassiveParams {
        &PASSIVE_TABLE[self as usize]
    }
}

impl TemplateId for PassiveId {
    const CATEGORY: &'static str = "passive";
    const ALL: &'static [Self] = &[
        Self::PowerCore, Self::NanoArmor, Self::ShieldBooster, Self::Regenerator,
        Self::Overclock, Self::Amplifier, Self::Accelerator, Self::Stabilizer,
        Self::JetBoots, Self::TractorBeam, Self::XpChip, Self::LuckyChip,
        Self::EnergyCell, Self::TargetingSystem, Self::ReactorCore, Self::Capacitor,
        Self::ExplosiveModule, Self::NanoSwarm,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::PowerCore       => "power_core",
            Self::NanoArmor       => "nano_armor",
            Self::ShieldBooster   => "shield_booster",
            Self::Regenerator     => "regenerator",
            Self::Overclock       => "overclock",
            Self::Amplifier       => "amplifier",
            Self::Accelerator     => "accelerator",
            Self::Stabilizer      => "stabilizer",
            Self::JetBoots        => "jet_boots",
            Self::TractorBeam     => "tractor_beam",
            Self::XpChip          => "xp_chip",
            Self::LuckyChip       => "lucky_chip",
            Self::EnergyCell      => "energy_cell",
            Self::TargetingSystem => "targeting_system",
            Self::ReactorCore     => "reactor_core",
            Self::Capacitor       => "capacitor",
            Self::ExplosiveModule => "explosive_module",
            Self::NanoSwarm       => "nano_swarm",
        }
    }
}
