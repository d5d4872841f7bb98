//! Path: native/game_simulation/src/world/game_world.rs
//! Summary: ゲームワールド（全プール・スポーナー・進行状態を所有する 1 セッション分の状態）

use super::{ChestWorld, EnemyWorld, FrameEvent, ItemWorld, PlayerState, ProjectileWorld, WeaponEffect};
use crate::config::SessionConfig;
use crate::game_logic::systems::leveling::UpgradeChoice;
use crate::game_logic::systems::spawn::{EnemySpawnRequest, Spawner};
use game_core::constants::{CELL_SIZE, MAX_CHESTS, MAX_ENEMIES, MAX_ITEMS, MAX_PROJECTILES};
use game_core::entity_params::{CharacterId, MapId};
use game_core::physics::rng::SimpleRng;
use game_core::physics::spatial_hash::SpatialHash;
use game_core::stats::TalentBonuses;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Victory,
    Defeat,
}

/// セッションの進行状態。`Ended` は終端で、以後 tick は何もしない
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    Running,
    Paused,
    /// 強化の選択待ち（選ぶまでシミュレーションを止める）
    AwaitingUpgrade,
    Ended(Outcome),
}

/// ゲームワールド内部状態
pub struct GameWorld {
    pub frame_id:             u32,
    pub map:                  MapId,
    pub map_size:             f32,
    pub difficulty:           f32,
    /// 生存勝利に必要な経過時間（秒）
    pub duration:             f32,
    pub player:               PlayerState,
    pub enemies:              EnemyWorld,
    pub projectiles:          ProjectileWorld,
    pub items:                ItemWorld,
    pub chests:               ChestWorld,
    pub rng:                  SimpleRng,
    /// 敵スロットの空間ハッシュ（敵移動後に毎 tick 再構築）
    pub spatial:              SpatialHash,
    /// 空間ハッシュクエリ用バッファ（毎フレーム再利用）
    pub query_buf:            Vec<usize>,
    pub spawner:              Spawner,
    /// 敵・ボスが発行したスポーン要求（敵ステージの最後に反映）
    pub spawn_queue:          Vec<EnemySpawnRequest>,
    /// ゲーム開始からの経過時間（秒）
    pub elapsed:              f32,
    pub kills:                u32,
    pub boss_kills:           u32,
    pub phase:                SessionPhase,
    /// 未処理の強化数（レベルアップ・宝箱）
    pub pending_upgrades:     u32,
    /// 提示中の強化候補（AwaitingUpgrade のときだけ非空）
    pub upgrade_choices:      Vec<UpgradeChoice>,
    /// このフレームで発生したイベント（drain される）
    pub frame_events:         Vec<FrameEvent>,
    /// 継続武器・雷撃の描画用エフェクト（毎 tick 作り直す）
    pub effects:              Vec<WeaponEffect>,
    pub max_dt:               f32,
    pub upgrade_choice_count: usize,
}

impl GameWorld {
    pub fn new(map: MapId, character: CharacterId, talents: TalentBonuses, config: SessionConfig) -> Self {
        let params = map.params();
        let center = params.size / 2.0;
        Self {
            frame_id:             0,
            map,
            map_size:             params.size,
            difficulty:           params.difficulty,
            duration:             params.duration,
            player:               PlayerState::new(character, talents, center, center),
            enemies:              EnemyWorld::new(MAX_ENEMIES),
            projectiles:          ProjectileWorld::new(MAX_PROJECTILES),
            items:                ItemWorld::new(MAX_ITEMS),
            chests:               ChestWorld::new(MAX_CHESTS),
            rng:                  SimpleRng::new(config.seed),
            spatial:              SpatialHash::new(CELL_SIZE),
            query_buf:            Vec::new(),
            spawner:              Spawner::new(map, config.spawn),
            spawn_queue:          Vec::new(),
            elapsed:              0.0,
            kills:                0,
            boss_kills:           0,
            phase:                SessionPhase::Running,
            pending_upgrades:     0,
            upgrade_choices:      Vec::new(),
            frame_events:         Vec::new(),
            effects:              Vec::new(),
            max_dt:               config.max_dt,
            upgrade_choice_count: config.upgrade_choice_count,
        }
    }

    /// 空間ハッシュを再構築する。phase 中の敵は衝突対象外なので入れない
    pub(crate) fn rebuild_collision(&mut self) {
        self.spatial.clear();
        for i in 0..self.enemies.len() {
            if self.enemies.is_targetable(i) {
                self.spatial.insert(i, self.enemies.positions_x[i], self.enemies.positions_y[i]);
            }
        }
    }

    pub fn is_ended(&self) -> bool {
        matches!(self.phase, SessionPhase::Ended(_))
    }
}
