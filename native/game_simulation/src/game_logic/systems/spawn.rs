use crate::config::SpawnConfig;
use game_core::constants::{BOSS_SPAWN_DISTANCE, BOSS_SPAWN_MARGIN, SPAWN_MARGIN};
use game_core::entity_params::{BossId, EnemyId, MapId, WaveEntry};
use game_core::physics::rng::SimpleRng;
use game_core::util::{clamp_to_map, spawn_position_around_player};
use rustc_hash::FxHashSet;
use std::f32::consts::TAU;

/// 敵のスポーン要求（スポーナー・spawner 型の敵・ボス攻撃が発行する）
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemySpawnRequest {
    pub id:    EnemyId,
    pub x:     f32,
    pub y:     f32,
    pub elite: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BossSpawnRequest {
    pub id: BossId,
    pub x:  f32,
    pub y:  f32,
}

#[derive(Debug, Default)]
pub struct SpawnOutput {
    pub enemies: Vec<EnemySpawnRequest>,
    pub boss:    Option<BossSpawnRequest>,
}

/// ウェーブ表と人口上限に従って敵とボスを出すスポーナー
pub struct Spawner {
    config:         SpawnConfig,
    map:            MapId,
    /// 現在のスポーン間隔（発生毎に減衰）
    interval:       f32,
    timer:          f32,
    wave_index:     usize,
    bosses_spawned: FxHashSet<BossId>,
    /// ウェーブ種別解決用の再利用バッファ
    type_buf:       Vec<EnemyId>,
}

impl Spawner {
    pub fn new(map: MapId, config: SpawnConfig) -> Self {
        Self {
            interval: config.base_interval,
            timer: 0.0,
            wave_index: 0,
            bosses_spawned: FxHashSet::default(),
            type_buf: Vec::new(),
            config,
            map,
        }
    }

    /// 1 始まりのウェーブ番号（HUD 用）
    pub fn wave_number(&self) -> usize {
        self.wave_index + 1
    }

    pub fn interval(&self) -> f32 {
        self.interval
    }

    pub fn population_cap(&self, elapsed: f32) -> usize {
        self.config.population_cap(elapsed)
    }

    /// `population` は現在の通常敵数（ボスは数えない）
    pub fn tick(
        &mut self,
        dt: f32,
        elapsed: f32,
        player_x: f32,
        player_y: f32,
        population: usize,
        rng: &mut SimpleRng,
    ) -> SpawnOutput {
        let mut out = SpawnOutput::default();
        let map = self.map.params();

        let wave = WaveEntry::current(elapsed);
        let wave_index = game_core::entity_params::WAVES
            .iter()
            .rposition(|w| w.time <= elapsed)
            .unwrap_or(0);
        if wave_index != self.wave_index {
            log::debug!("wave {} -> {} at {:.1}s", self.wave_number(), wave_index + 1, elapsed);
            self.wave_index = wave_index;
        }

        let boss = map.boss;
        if elapsed >= boss.params().spawn_time && self.bosses_spawned.insert(boss) {
            let angle = rng.next_f32() * TAU;
            let (x, y) = clamp_to_map(
                player_x + angle.cos() * BOSS_SPAWN_DISTANCE,
                player_y + angle.sin() * BOSS_SPAWN_DISTANCE,
                map.size,
                BOSS_SPAWN_MARGIN,
            );
            out.boss = Some(BossSpawnRequest { id: boss, x, y });
        }

        let cap = self.config.population_cap(elapsed);
        if population >= cap {
            return out;
        }

        self.timer -= dt;
        if self.timer > 0.0 {
            return out;
        }

        let count = (wave.weight * (1.0 + elapsed / self.config.ramp_seconds)).floor().max(0.0) as usize;
        wave.resolve_types(map.enemy_pool, &mut self.type_buf);
        let elite_chance = wave.elite_chance + map.elite_chance;
        for _ in 0..count.min(cap - population) {
            let (x, y) = spawn_position_around_player(
                rng,
                player_x,
                player_y,
                self.config.spawn_min_dist,
                self.config.spawn_max_dist,
            );
            let (x, y) = clamp_to_map(x, y, map.size, SPAWN_MARGIN);
            let id = rng.pick(&self.type_buf).copied().unwrap_or_default();
            let elite = rng.chance(elite_chance);
            out.enemies.push(EnemySpawnRequest { id, x, y, elite });
        }

        self.interval = (self.interval * self.config.interval_decay).max(self.config.min_interval);
        self.timer = self.interval;
        out
    }
}
