//! Path: native/game_core/src/entity_params/boss.rs
//! Summary: ボステンプレート（基礎値・出現時刻・攻撃リスト・フェーズ数）

use super::TemplateId;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum BossId {
    #[default]
    HiveQueen    = 0,
    MechTitan    = 1,
    XenoOverlord = 2,
    CorruptedAi  = 3,
    ElderGod     = 4,
}

/// ボスの攻撃。`All` はワイルドカードで、選択時に具体的な攻撃へ展開される
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BossAttack {
    SpawnSwarm,
    AcidSpit,
    Charge,
    Missiles,
    LaserSweep,
    Stomp,
    Teleport,
    PsychicBlast,
    SummonElites,
    SpawnDrones,
    ElectricField,
    HackProjectiles,
    All,
}

impl BossAttack {
    pub const CONCRETE: &'static [BossAttack] = &[
        Self::SpawnSwarm, Self::AcidSpit, Self::Charge, Self::Missiles, Self::LaserSweep,
        Self::Stomp, Self::Teleport, Self::PsychicBlast, Self::SummonElites,
        Self::SpawnDrones, Self::ElectricField, Self::HackProjectiles,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::SpawnSwarm      => "spawn_swarm",
            Self::AcidSpit        => "acid_spit",
            Self::Charge          => "charge",
            Self::Missiles        => "missiles",
            Self::LaserSweep      => "laser_sweep",
            Self::Stomp           => "stomp",
            Self::Teleport        => "teleport",
            Self::PsychicBlast    => "psychic_blast",
            Self::SummonElites    => "summon_elites",
            Self::SpawnDrones     => "spawn_drones",
            Self::ElectricField   => "electric_field",
            Self::HackProjectiles => "hack_projectiles",
            Self::All             => "all",
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct BossParams {
    pub name:       &'static str,
    pub max_hp:     f32,
    pub damage:     f32,
    pub speed:      f32,
    pub size:       f32,
    pub xp:         u32,
    pub gold:       u32,
    /// 出現時刻（秒）
    pub spawn_time: f32,
    pub attacks:    &'static [BossAttack],
    pub max_phases: u32,
}

impl BossParams {
    pub fn radius(&self) -> f32 {
        self.size / 2.0
    }

    /// 選択可能な攻撃一覧。`All` は全具体攻撃に展開し、空なら `Charge` のみ
    pub fn attack_pool(&self) -> &'static [BossAttack] {
        if self.attacks.contains(&BossAttack::All) {
            BossAttack::CONCRETE
        } else if self.attacks.is_empty() {
            &[BossAttack::Charge]
        } else {
            self.attacks
        }
    }
}

static BOSS_TABLE: [BossParams; 5] = [
    BossParams {
        name: "Hive Queen", max_hp: 500.0, damage: 30.0, speed: 40.0, size: 80.0,
        xp: 200, gold: 50, spawn_time: 300.0,
        attacks: &[BossAttack::SpawnSwarm, BossAttack::AcidSpit, BossAttack::Charge],
        max_phases: 3,
    },
    BossParams {
        name: "Mech Titan", max_hp: 1500.0, damage: 50.0, speed: 25.0, size: 100.0,
        xp: 500, gold: 100, spawn_time: 600.0,
        attacks: &[BossAttack::Missiles, BossAttack::LaserSweep, BossAttack::Stomp],
        max_phases: 4,
    },
    BossParams {
        name: "Xeno Overlord", max_hp: 3000.0, damage: 60.0, speed: 50.0, size: 90.0,
        xp: 1000, gold: 200, spawn_time: 900.0,
        attacks: &[BossAttack::Teleport, BossAttack::PsychicBlast, BossAttack::SummonElites],
        max_phases: 5,
    },
    BossParams {
        name: "Corrupted AI", max_hp: 5000.0, damage: 45.0, speed: 0.0, size: 120.0,
        xp: 2000, gold: 350, spawn_time: 1200.0,
        attacks: &[BossAttack::SpawnDrones, BossAttack::ElectricField, BossAttack::HackProjectiles],
        max_phases: 4,
    },
    BossParams {
        name: "Elder God", max_hp: 10000.0, damage: 80.0, speed: 35.0, size: 150.0,
        xp: 5000, gold: 1000, spawn_time: 1500.0,
        attacks: &[BossAttack::All],
        max_phases: 6,
    },
];

impl BossId {
    pub fn params(self) -> &'static BossParams {
        &BOSS_TABLE[self as usize]
    }
}

impl TemplateId for BossId {
    const CATEGORY: &'static str = "boss";
    const ALL: &'static [Self] = &[
        Self::HiveQueen, Self::MechTitan, Self::XenoOverlord, Self::CorruptedAi, Self::ElderGod,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::HiveQueen    => "hive_queen",
            Self::MechTitan    => "mech_titan",
            Self::XenoOverlord => "xeno_overlord",
            Self::CorruptedAi  => "corrupted_ai",
            Self::ElderGod     => "elder_god",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcard_expands_and_is_never_selectable() {
        let pool = BossId::ElderGod.params().attack_pool();
        assert_eq!(pool.len(), BossAttack::CONCRETE.len());
        assert!(!pool.contains(&BossAttack::All));
    }

    #[test]
    fn regular_pool_is_template_list() {
        let pool = BossId::HiveQueen.params().attack_pool();
        assert_eq!(pool, &[BossAttack::SpawnSwarm, BossAttack::AcidSpit, BossAttack::Charge]);
    }
}
