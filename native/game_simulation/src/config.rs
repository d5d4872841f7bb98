//! Path: native/game_simulation/src/config.rs
//! Summary: セッション・スポーナーの調整パラメータ（serde で JSON から読み込み可能、欠けた項目は既定値）

use game_core::constants::{MAX_DT, MAX_ENEMIES, UPGRADE_CHOICE_COUNT};
use serde::{Deserialize, Serialize};

/// スポーナーの調整値
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    /// 初期スポーン間隔（秒）
    pub base_interval:          f32,
    /// 発生毎に間隔へ掛ける減衰率
    pub interval_decay:         f32,
    /// スポーン間隔の下限（秒）
    pub min_interval:           f32,
    /// 人口上限の基礎値
    pub max_enemies_base:       usize,
    /// 1 分毎に人口上限へ加算する数
    pub max_enemies_per_minute: usize,
    /// 人口のハード上限
    pub hard_cap:               usize,
    pub spawn_min_dist:         f32,
    pub spawn_max_dist:         f32,
    /// 1 発生あたりの数が weight × (1 + t / ramp_seconds) で増える
    pub ramp_seconds:           f32,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            base_interval:          1.5,
            interval_decay:         0.97,
            min_interval:           0.3,
            max_enemies_base:       100,
            max_enemies_per_minute: 10,
            hard_cap:               MAX_ENEMIES,
            spawn_min_dist:         400.0,
            spawn_max_dist:         600.0,
            ramp_seconds:           300.0,
        }
    }
}

impl SpawnConfig {
    /// `min(base + per_minute × floor(t / 60), hard_cap)`
    pub fn population_cap(&self, elapsed: f32) -> usize {
        let minutes = (elapsed.max(0.0) / 60.0).floor() as usize;
        (self.max_enemies_base + self.max_enemies_per_minute * minutes).min(self.hard_cap)
    }
}

/// セッション全体の調整値
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// 1 tick の dt 上限（秒）
    pub max_dt:               f32,
    /// 乱数シード。同じシード・同じ入力列なら同じ結果になる
    pub seed:                 u64,
    pub upgrade_choice_count: usize,
    pub spawn:                SpawnConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_dt:               MAX_DT,
            seed:                 0x5EED_CAFE,
            upgrade_choice_count: UPGRADE_CHOICE_COUNT,
            spawn:                SpawnConfig::default(),
        }
    }
}
