//! Path: native/game_core/src/entity_params/talent.rs
//! Summary: タレント（メタ進行）のテンプレート。ゴールドのコスト表とレベル毎効果

use super::TemplateId;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum TalentId {
    #[default]
    Vitality   = 0,
    Power      = 1,
    Agility    = 2,
    Greed      = 3,
    Wisdom     = 4,
    Regen      = 5,
    Fortune    = 6,
    Efficiency = 7,
    Magnetism  = 8,
    Revival    = 9,
}

#[derive(Clone, Copy, Debug)]
pub struct TalentParams {
    pub name:   &'static str,
    /// `costs[n]` がレベル n → n+1 の価格
    pub costs:  &'static [u32],
    /// 1 レベルあたりの効果量
    pub effect: f32,
}

impl TalentParams {
    pub fn max_level(&self) -> u32 {
        self.costs.len() as u32
    }

    /// 現在レベルから次のレベルに上げる価格。最大レベルなら None
    pub fn cost_for_level(&self, current_level: u32) -> Option<u32> {
        self.costs.get(current_level as usize).copied()
    }
}

static DOUBLING_10: [u32; 10] = [100, 200, 400, 800, 1600, 3200, 6400, 12800, 25600, 51200];

static TALENT_TABLE: [TalentParams; 10] = [
    TalentParams { name: "Vitality",   costs: &DOUBLING_10, effect: 5.0 },
    TalentParams { name: "Power",      costs: &DOUBLING_10, effect: 0.03 },
    TalentParams { name: "Agility",    costs: &[200, 400, 800, 1600, 3200], effect: 0.03 },
    TalentParams {
        name: "Greed",
        costs: &[150, 300, 600, 1200, 2400, 4800, 9600, 19200, 38400, 76800],
        effect: 0.08,
    },
    TalentParams { name: "Wisdom",     costs: &DOUBLING_10, effect: 0.05 },
    TalentParams { name: "Regen",      costs: &[300, 600, 1200, 2400, 4800], effect: 0.1 },
    TalentParams {
        name: "Fortune",
        costs: &[200, 400, 800, 1600, 3200, 6400, 12800, 25600, 51200, 102400],
        effect: 0.05,
    },
    TalentParams { name: "Efficiency", costs: &[250, 500, 1000, 2000, 4000], effect: 0.03 },
    TalentParams { name: "Magnetism",  costs: &[150, 300, 600, 1200, 2400], effect: 0.15 },
    TalentParams { name: "Revival",    costs: &[5000, 15000, 50000], effect: 0.25 },
];

impl TalentId {
    pub fn params(self) -> &'static TalentParams {
        &TALENT_TABLE[self as usize]
    }
}

impl TemplateId for TalentId {
    const CATEGORY: &'static str = "talent";
    const ALL: &'static [Self] = &[
        Self::Vitality, Self::Power, Self::Agility, Self::Greed, Self::Wisdom,
        Self::Regen, Self::Fortune, Self::Efficiency, Self::Magnetism, Self::Revival,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::Vitality   => "vitality",
            Self::Power      => "power",
            Self::Agility    => "agility",
            Self::Greed      => "greed",
            Self::Wisdom     => "wisdom",
            Self::Regen      => "regen",
            Self::Fortune    => "fortune",
            Self::Efficiency => "efficiency",
            Self::Magnetism  => "magnetism",
            Self::Revival    => "revival",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cost_ladder_lookup() {
        let vit = TalentId::Vitality.params();
        assert_eq!(vit.max_level(), 10);
        assert_eq!(vit.cost_for_level(0), Some(100));
        assert_eq!(vit.cost_for_level(9), Some(51200));
        assert_eq!(vit.cost_for_level(10), None);
        assert_eq!(TalentId::Revival.params().cost_for_level(2), Some(50000));
    }
}
