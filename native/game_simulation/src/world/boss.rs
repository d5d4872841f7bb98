//! Path: native/game_simulation/src/world/boss.rs
//! Summary: ボス固有状態（フェーズ・激昂・攻撃ステートマシン）。敵スロットに付随するペイロード

use game_core::constants::{BOSS_ATTACK_COOLDOWN, BOSS_FIRST_ATTACK};
use game_core::entity_params::{BossAttack, BossId};

/// 攻撃内部のステージ
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AttackStage {
    Starting,
    Executing,
    Charging,
    Fired,
    Done,
}

/// フェーズ更新の結果
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct PhaseChange {
    /// このフレームで進んだフェーズ数（0 なら変化なし）
    pub advanced: u32,
    /// このフレームで激昂に入った
    pub enraged:  bool,
}

#[derive(Clone, Debug)]
pub struct BossState {
    pub id:               BossId,
    pub phase:            u32,
    pub max_phases:       u32,
    pub enraged:          bool,
    pub attack:           Option<BossAttack>,
    pub stage:            AttackStage,
    /// 次の攻撃までの残り時間
    pub attack_timer:     f32,
    pub attack_cooldown:  f32,
    /// 実行中の攻撃の残り時間
    pub attack_remaining: f32,
    pub charge_vx:        f32,
    pub charge_vy:        f32,
    /// laser_sweep の発射間隔タイマー
    pub laser_timer:      f32,
    pub gold:             u32,
}

impl BossState {
    pub fn new(id: BossId) -> Self {
        let params = id.params();
        Self {
            id,
            phase: 1,
            max_phases: params.max_phases.max(1),
            enraged: false,
            attack: None,
            stage: AttackStage::Starting,
            attack_timer: BOSS_FIRST_ATTACK,
            attack_cooldown: BOSS_ATTACK_COOLDOWN,
            attack_remaining: 0.0,
            charge_vx: 0.0,
            charge_vy: 0.0,
            laser_timer: 0.0,
            gold: params.gold,
        }
    }

    /// HP 割合からフェーズを更新する。フェーズは減らない
    pub fn update_phase(&mut self, hp_ratio: f32) -> PhaseChange {
        let mut change = PhaseChange::default();
        let target = phase_for_ratio(hp_ratio, self.max_phases);
        if target > self.phase {
            change.advanced = target - self.phase;
            self.phase = target;
        }
        if self.phase == self.max_phases && !self.enraged {
            self.enraged = true;
            change.enraged = true;
        }
        change
    }
}

/// `1 + 越えた閾値の数`。閾値は `1 - i/N`（i = 1..N-1）
pub fn phase_for_ratio(hp_ratio: f32, max_phases: u32) -> u32 {
    let n = max_phases.max(1);
    let crossed = (1..n)
        .filter(|&i| hp_ratio <= 1.0 - i as f32 / n as f32)
        .count() as u32;
    (1 + crossed).min(n)
}
