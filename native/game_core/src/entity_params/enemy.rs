//! Path: native/game_core/src/entity_params/enemy.rs
//! Summary: 敵テンプレート（基礎値と行動タグ。行動タグは固有パラメータを持つ）

use super::TemplateId;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum EnemyId {
    #[default]
    Grunt     = 0,
    Insectoid = 1,
    Drone     = 2,
    Tank      = 3,
    Ghost     = 4,
    Elite     = 5,
    Exploder  = 6,
    Spawner   = 7,
}

/// 行動タグ。毎 tick 再入されるステートマシンの種類を決める
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum EnemyBehavior {
    Chase,
    Swarm,
    Ranged { shoot_cooldown: f32, projectile_speed: f32 },
    Phase { interval: f32 },
    Aggressive { dash_cooldown: f32 },
    Kamikaze { explosion_radius: f32 },
    Spawner { interval: f32, spawn: EnemyId, max_spawns: u32 },
}

#[derive(Clone, Copy, Debug)]
pub struct EnemyParams {
    pub name:        &'static str,
    pub max_hp:      f32,
    pub damage:      f32,
    pub speed:       f32,
    /// 直径（px）。当たり半径は size / 2
    pub size:        f32,
    pub xp:          u32,
    pub gold_chance: f32,
    pub behavior:    EnemyBehavior,
}

impl EnemyParams {
    pub fn radius(&self) -> f32 {
        self.size / 2.0
    }
}

static ENEMY_TABLE: [EnemyParams; 8] = [
    EnemyParams { name: "Grunt",     max_hp: 10.0, damage: 8.0,  speed: 60.0,  size: 28.0, xp: 1,  gold_chance: 0.15, behavior: EnemyBehavior::Chase },
    EnemyParams { name: "Insectoid", max_hp: 5.0,  damage: 5.0,  speed: 120.0, size: 20.0, xp: 1,  gold_chance: 0.1,  behavior: EnemyBehavior::Swarm },
    EnemyParams { name: "Drone",     max_hp: 15.0, damage: 12.0, speed: 80.0,  size: 24.0, xp: 3,  gold_chance: 0.2,  behavior: EnemyBehavior::Ranged { shoot_cooldown: 2.0, projectile_speed: 300.0 } },
    EnemyParams { name: "Tank",      max_hp: 80.0, damage: 20.0, speed: 30.0,  size: 45.0, xp: 10, gold_chance: 0.4,  behavior: EnemyBehavior::Chase },
    EnemyParams { name: "Ghost",     max_hp: 20.0, damage: 15.0, speed: 90.0,  size: 26.0, xp: 5,  gold_chance: 0.25, behavior: EnemyBehavior::Phase { interval: 3.0 } },
    EnemyParams { name: "Elite",     max_hp: 50.0, damage: 25.0, speed: 100.0, size: 35.0, xp: 15, gold_chance: 0.5,  behavior: EnemyBehavior::Aggressive { dash_cooldown: 3.0 } },
    EnemyParams { name: "Exploder",  max_hp: 12.0, damage: 40.0, speed: 110.0, size: 22.0, xp: 3,  gold_chance: 0.2,  behavior: EnemyBehavior::Kamikaze { explosion_radius: 60.0 } },
    EnemyParams { name: "Spawner",   max_hp: 60.0, damage: 0.0,  speed: 0.0,   size: 50.0, xp: 20, gold_chance: 0.6,  behavior: EnemyBehavior::Spawner { interval: 3.0, spawn: EnemyId::Insectoid, max_spawns: 10 } },
];

impl EnemyId {
    pub fn params(self) -> &'static EnemyParams {
        &ENEMY_TABLE[self as usize]
    }
}

impl TemplateId for EnemyId {
    const CATEGORY: &'static str = "enemy";
    const ALL: &'static [Self] = &[
        Self::Grunt, Self::Insectoid, Self::Drone, Self::Tank,
        Self::Ghost, Self::Elite, Self::Exploder, Self::Spawner,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::Grunt     => "grunt",
            Self::Insectoid => "insectoid",
            Self::Drone     => "drone",
            Self::Tank      => "tank",
            Self::Ghost     => "ghost",
            Self::Elite     => "elite",
            Self::Exploder  => "exploder",
            Self::Spawner   => "spawner",
        }
    }
}
