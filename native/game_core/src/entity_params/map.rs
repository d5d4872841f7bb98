//! Path: native/game_core/src/entity_params/map.rs
//! Summary: マップテンプレートとウェーブ表

use super::{BossId, EnemyId, TemplateId};
use crate::progression::UnlockCondition;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum MapId {
    #[default]
    Station   = 0,
    Mars      = 1,
    AlienShip = 2,
    Jungle    = 3,
    Void      = 4,
}

#[derive(Clone, Copy, Debug)]
pub struct MapParams {
    pub name:         &'static str,
    /// 正方形マップの一辺（px）
    pub size:         f32,
    /// 生存すれば勝利となる時間（秒）
    pub duration:     f32,
    pub enemy_pool:   &'static [EnemyId],
    pub elite_chance: f32,
    pub boss:         BossId,
    pub difficulty:   f32,
    pub unlock:       UnlockCondition,
}

static MAP_TABLE: [MapParams; 5] = [
    MapParams {
        name: "Space Station", size: 4000.0, duration: 15.0 * 60.0,
        enemy_pool: &[EnemyId::Grunt, EnemyId::Insectoid, EnemyId::Drone],
        elite_chance: 0.03, boss: BossId::HiveQueen, difficulty: 1.0,
        unlock: UnlockCondition::None,
    },
    MapParams {
        name: "Mars Colony", size: 5000.0, duration: 18.0 * 60.0,
        enemy_pool: &[EnemyId::Grunt, EnemyId::Tank, EnemyId::Exploder, EnemyId::Spawner],
        elite_chance: 0.04, boss: BossId::MechTitan, difficulty: 1.2,
        unlock: UnlockCondition::Survive { seconds: 600.0, map: None },
    },
    MapParams {
        name: "Alien Ship", size: 3500.0, duration: 20.0 * 60.0,
        enemy_pool: &[EnemyId::Grunt, EnemyId::Insectoid, EnemyId::Ghost, EnemyId::Elite],
        elite_chance: 0.05, boss: BossId::XenoOverlord, difficulty: 1.4,
        unlock: UnlockCondition::BossKills(1),
    },
    MapParams {
        name: "Toxic Jungle", size: 5500.0, duration: 22.0 * 60.0,
        enemy_pool: &[EnemyId::Insectoid, EnemyId::Ghost, EnemyId::Spawner, EnemyId::Exploder],
        elite_chance: 0.05, boss: BossId::CorruptedAi, difficulty: 1.6,
        unlock: UnlockCondition::Level(50),
    },
    MapParams {
        name: "The Void", size: 6000.0, duration: 30.0 * 60.0,
        enemy_pool: &[
            EnemyId::Grunt, EnemyId::Insectoid, EnemyId::Drone, EnemyId::Tank,
            EnemyId::Ghost, EnemyId::Elite, EnemyId::Exploder, EnemyId::Spawner,
        ],
        elite_chance: 0.08, boss: BossId::ElderGod, difficulty: 2.0,
        unlock: UnlockCondition::CompleteAllMaps,
    },
];

impl MapId {
    pub fn params(self) -> &'static MapParams {
        &MAP_TABLE[self as usize]
    }
}

impl TemplateId for MapId {
    const CATEGORY: &'static str = "map";
    const ALL: &'static [Self] = &[
        Self::Station, Self::Mars, Self::AlienShip, Self::Jungle, Self::Void,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::Station   => "station",
            Self::Mars      => "mars",
            Self::AlienShip => "alien_ship",
            Self::Jungle    => "jungle",
            Self::Void      => "void",
        }
    }
}

// ─── Waves ─────────────────────────────────────────────────────

/// ウェーブの出現種別。`All` はマップの敵プールに解決される
#[derive(Clone, Copy, Debug)]
pub enum WaveTypes {
    List(&'static [EnemyId]),
    All,
}

#[derive(Clone, Copy, Debug)]
pub struct WaveEntry {
    /// 開始時刻（秒）
    pub time:         f32,
    pub types:        WaveTypes,
    pub weight:       f32,
    pub elite_chance: f32,
}

impl WaveEntry {
    /// マップのプールとの積集合。空なら grunt にフォールバック
    pub fn resolve_types(&self, pool: &[EnemyId], out: &mut Vec<EnemyId>) {
        out.clear();
        match self.types {
            WaveTypes::All => out.extend_from_slice(pool),
            WaveTypes::List(types) => {
                out.extend(types.iter().copied().filter(|t| pool.contains(t)));
            }
        }
        if out.is_empty() {
            out.push(EnemyId::Grunt);
        }
    }

    /// 経過時間に対応するウェーブ（開始時刻 <= elapsed の最後のエントリ）
    pub fn current(elapsed: f32) -> &'static WaveEntry {
        WAVES
            .iter()
            .rev()
            .find(|w| w.time <= elapsed)
            .unwrap_or(&WAVES[0])
    }
}

const EARLY: &[EnemyId] = &[EnemyId::Grunt, EnemyId::Insectoid];
const EARLY_DRONE: &[EnemyId] = &[EnemyId::Grunt, EnemyId::Insectoid, EnemyId::Drone];
const EARLY_TANK: &[EnemyId] = &[EnemyId::Grunt, EnemyId::Insectoid, EnemyId::Drone, EnemyId::Tank];

// 0〜5 分で敵種が増え、以降は重みとエリート率だけが上がる
pub static WAVES: [WaveEntry; 13] = [
    WaveEntry { time: 0.0,    types: WaveTypes::List(&[EnemyId::Grunt]), weight: 1.0,  elite_chance: 0.0 },
    WaveEntry { time: 30.0,   types: WaveTypes::List(EARLY),             weight: 1.2,  elite_chance: 0.01 },
    WaveEntry { time: 60.0,   types: WaveTypes::List(EARLY),             weight: 1.5,  elite_chance: 0.02 },
    WaveEntry { time: 120.0,  types: WaveTypes::List(EARLY_DRONE),       weight: 2.0,  elite_chance: 0.03 },
    WaveEntry { time: 180.0,  types: WaveTypes::List(EARLY_TANK),        weight: 2.5,  elite_chance: 0.04 },
    WaveEntry { time: 300.0,  types: WaveTypes::All,                     weight: 3.0,  elite_chance: 0.05 },
    WaveEntry { time: 420.0,  types: WaveTypes::All,                     weight: 3.5,  elite_chance: 0.06 },
    WaveEntry { time: 540.0,  types: WaveTypes::All,                     weight: 4.0,  elite_chance: 0.07 },
    WaveEntry { time: 600.0,  types: WaveTypes::All,                     weight: 5.0,  elite_chance: 0.08 },
    WaveEntry { time: 720.0,  types: WaveTypes::All,                     weight: 6.0,  elite_chance: 0.10 },
    WaveEntry { time: 900.0,  types: WaveTypes::All,                     weight: 8.0,  elite_chance: 0.12 },
    WaveEntry { time: 1200.0, types: WaveTypes::All,                     weight: 10.0, elite_chance: 0.15 },
    WaveEntry { time: 1500.0, types: WaveTypes::All,                     weight: 15.0, elite_chance: 0.20 },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_wave_is_latest_started() {
        assert_eq!(WaveEntry::current(0.0).time, 0.0);
        assert_eq!(WaveEntry::current(29.9).time, 0.0);
        assert_eq!(WaveEntry::current(30.0).time, 30.0);
        assert_eq!(WaveEntry::current(10_000.0).time, 1500.0);
        assert_eq!(WaveEntry::current(-1.0).time, 0.0);
    }

    #[test]
    fn wave_types_intersect_map_pool() {
        let mut out = Vec::new();
        // mars には insectoid がいない
        WAVES[1].resolve_types(MapId::Mars.params().enemy_pool, &mut out);
        assert_eq!(out, vec![EnemyId::Grunt]);

        // jungle には grunt もいないので grunt へフォールバック
        WAVES[0].resolve_types(MapId::Jungle.params().enemy_pool, &mut out);
        assert_eq!(out, vec![EnemyId::Grunt]);

        WAVES[5].resolve_types(MapId::Station.params().enemy_pool, &mut out);
        assert_eq!(out.len(), 3);
    }
}
