//! Path: native/game_core/src/entity_params/drop.rs
//! Summary: ドロップアイテムのテンプレート（カテゴリ・既定値・特殊ドロップ確率）

use super::TemplateId;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum DropKind {
    #[default]
    XpSmall      = 0,
    XpMedium     = 1,
    XpLarge      = 2,
    XpRare       = 3,
    GoldSmall    = 4,
    GoldLarge    = 5,
    HealthSmall  = 6,
    HealthLarge  = 7,
    Magnet       = 8,
    Nuke         = 9,
    Invincible   = 10,
    DoubleDamage = 11,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DropCategory {
    Xp,
    Gold,
    Health,
    Special,
}

#[derive(Clone, Copy, Debug)]
pub struct DropParams {
    pub category: DropCategory,
    pub value:    u32,
    /// 通常撃破時の特殊ドロップ抽選確率（特殊以外は 0）
    pub chance:   f32,
}

static DROP_TABLE: [DropParams; 12] = [
    DropParams { category: DropCategory::Xp,      value: 1,   chance: 0.0 },
    DropParams { category: DropCategory::Xp,      value: 5,   chance: 0.0 },
    DropParams { category: DropCategory::Xp,      value: 25,  chance: 0.0 },
    DropParams { category: DropCategory::Xp,      value: 100, chance: 0.0 },
    DropParams { category: DropCategory::Gold,    value: 1,   chance: 0.0 },
    DropParams { category: DropCategory::Gold,    value: 10,  chance: 0.0 },
    DropParams { category: DropCategory::Health,  value: 20,  chance: 0.0 },
    DropParams { category: DropCategory::Health,  value: 50,  chance: 0.0 },
    DropParams { category: DropCategory::Special, value: 0,   chance: 0.008 },
    DropParams { category: DropCategory::Special, value: 0,   chance: 0.002 },
    DropParams { category: DropCategory::Special, value: 0,   chance: 0.004 },
    DropParams { category: DropCategory::Special, value: 0,   chance: 0.006 },
];

impl DropKind {
    pub const SPECIALS: &'static [DropKind] = &[
        Self::Magnet, Self::Nuke, Self::Invincible, Self::DoubleDamage,
    ];

    pub fn params(self) -> &'static DropParams {
        &DROP_TABLE[self as usize]
    }

    /// 敵の経験値量から xp ドロップの段階を選ぶ
    pub fn xp_tier(xp: u32) -> DropKind {
        match xp {
            0..=5   => Self::XpSmall,
            6..=20  => Self::XpMedium,
            21..=50 => Self::XpLarge,
            _       => Self::XpRare,
        }
    }
}

impl TemplateId for DropKind {
    const CATEGORY: &'static str = "drop";
    const ALL: &'static [Self] = &[
        Self::XpSmall, Self::XpMedium, Self::XpLarge, Self::XpRare,
        Self::GoldSmall, Self::GoldLarge, Self::HealthSmall, Self::HealthLarge,
        Self::Magnet, Self::Nuke, Self::Invincible, Self::DoubleDamage,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::XpSmall      => "xp_small",
            Self::XpMedium     => "xp_medium",
            Self::XpLarge      => "xp_large",
            Self::XpRare       => "xp_rare",
            Self::GoldSmall    => "gold_small",
            Self::GoldLarge    => "gold_large",
            Self::HealthSmall  => "health_small",
            Self::HealthLarge  => "health_large",
            Self::Magnet       => "magnet",
            Self::Nuke         => "nuke",
            Self::Invincible   => "invincible",
            Self::DoubleDamage => "double_damage",
        }
    }
}
