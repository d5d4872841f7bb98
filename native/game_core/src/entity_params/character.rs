//! Path: native/game_core/src/entity_params/character.rs
//! Summary: プレイアブルキャラクターのテンプレート（基礎ステータス・固有パッシブ・初期武器・解放条件）

use super::{TemplateId, WeaponId};
use crate::progression::UnlockCondition;
use crate::stats::EffectVector;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum CharacterId {
    #[default]
    Commander = 0,
    Scientist = 1,
    Soldier   = 2,
    Scout     = 3,
    Engineer  = 4,
    Psychic   = 5,
    Android   = 6,
}

#[derive(Clone, Copy, Debug)]
pub struct CharacterParams {
    pub name:            &'static str,
    pub max_hp:          f32,
    /// 基礎移動速度に掛ける係数
    pub speed:           f32,
    /// 基礎ダメージ倍率
    pub damage:          f32,
    /// アーマー（%）
    pub armor:           f32,
    /// 固有パッシブ（常時適用、レベルなし）
    pub passive:         EffectVector,
    pub starting_weapon: WeaponId,
    pub unlock:          UnlockCondition,
}

static CHARACTER_TABLE: [CharacterParams; 7] = [
    CharacterParams {
        name: "Commander", max_hp: 100.0, speed: 1.0, damage: 1.0, armor: 0.0,
        passive: EffectVector { damage: 0.10, ..EffectVector::ZERO },
        starting_weapon: WeaponId::Blaster,
        unlock: UnlockCondition::None,
    },
    CharacterParams {
        name: "Scientist", max_hp: 80.0, speed: 1.1, damage: 0.9, armor: 0.0,
        passive: EffectVector { xp_gain: 0.2, ..EffectVector::ZERO },
        starting_weapon: WeaponId::TeslaCoil,
        unlock: UnlockCondition::Level(20),
    },
    CharacterParams {
        name: "Soldier", max_hp: 120.0, speed: 0.9, damage: 1.15, armor: 5.0,
        passive: EffectVector { projectile_speed: 0.15, ..EffectVector::ZERO },
        starting_weapon: WeaponId::PlasmaRifle,
        unlock: UnlockCondition::Survive { seconds: 600.0, map: None },
    },
    CharacterParams {
        name: "Scout", max_hp: 70.0, speed: 1.35, damage: 0.85, armor: 0.0,
        passive: EffectVector { speed: 0.15, pickup_range: 0.3, ..EffectVector::ZERO },
        starting_weapon: WeaponId::HomingMissiles,
        unlock: UnlockCondition::Kills(3000),
    },
    CharacterParams {
        name: "Engineer", max_hp: 90.0, speed: 1.0, damage: 0.95, armor: 3.0,
        passive: EffectVector { cooldown: 0.15, ..EffectVector::ZERO },
        starting_weapon: WeaponId::ShieldOrbs,
        unlock: UnlockCondition::BossKills(1),
    },
    CharacterParams {
        name: "Psychic", max_hp: 60.0, speed: 1.0, damage: 1.25, armor: 0.0,
        passive: EffectVector { area: 0.25, ..EffectVector::ZERO },
        starting_weapon: WeaponId::ForceField,
        unlock: UnlockCondition::Survive { seconds: 900.0, map: Some(super::MapId::AlienShip) },
    },
    CharacterParams {
        name: "Android", max_hp: 150.0, speed: 0.85, damage: 1.3, armor: 10.0,
        passive: EffectVector { all_stats: 0.05, ..EffectVector::ZERO },
        starting_weapon: WeaponId::RailGun,
        unlock: UnlockCondition::CompleteAllMaps,
    },
];

impl CharacterId {
    pub fn params(self) -> &'static CharacterParams {
        &CHARACTER_TABLE[self as usize]
    }
}

impl TemplateId for CharacterId {
    const CATEGORY: &'static str = "character";
    const ALL: &'static [Self] = &[
        Self::Commander, Self::Scientist, Self::Soldier, Self::Scout,
        Self::Engineer, Self::Psychic, Self::Android,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::Commander => "commander",
            Self::Scientist => "scientist",
            Self::Soldier   => "soldier",
            Self::Scout     => "scout",
            Self::Engineer  => "engineer",
            Self::Psychic   => "psychic",
            Self::Android   => "android",
        }
    }
}
