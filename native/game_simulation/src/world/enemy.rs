//! Path: native/game_simulation/src/world/enemy.rs
//! Summary: 敵 SoA（EnemyWorld）。固定容量アリーナ + フリーリスト + 世代付きハンドル

use super::boss::BossState;
use super::handle::EnemyHandle;
use game_core::constants::{
    ELITE_DAMAGE_MULT, ELITE_GOLD_MULT, ELITE_HP_MULT, ELITE_SIZE_MULT, ELITE_SPEED_MULT,
    ELITE_XP_MULT, HIT_FLASH_DURATION,
};
use game_core::entity_params::{BossId, EnemyBehavior, EnemyId, WeaponId};
use serde::Serialize;

/// 敵スロットの種別（通常敵かボスか）
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyKind {
    Regular(EnemyId),
    Boss(BossId),
}

/// 行動タグ毎の実行時状態。スポーン時にテンプレートのクールダウンで初期化する
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum BehaviorState {
    Chase,
    Swarm,
    Ranged { shoot_timer: f32, shoot_cooldown: f32, projectile_speed: f32 },
    Phase { timer: f32, interval: f32, phased: bool },
    Aggressive { dash_timer: f32, dash_cooldown: f32, dashing: bool, dash_vx: f32, dash_vy: f32 },
    Kamikaze { explosion_radius: f32 },
    Spawner { timer: f32, interval: f32, spawn: EnemyId, spawned: u32, max_spawns: u32 },
    Boss,
}

impl BehaviorState {
    pub fn from_template(behavior: EnemyBehavior) -> Self {
        match behavior {
            EnemyBehavior::Chase => Self::Chase,
            EnemyBehavior::Swarm => Self::Swarm,
            EnemyBehavior::Ranged { shoot_cooldown, projectile_speed } => Self::Ranged {
                shoot_timer: shoot_cooldown,
                shoot_cooldown,
                projectile_speed,
            },
            EnemyBehavior::Phase { interval } => Self::Phase { timer: interval, interval, phased: false },
            EnemyBehavior::Aggressive { dash_cooldown } => Self::Aggressive {
                dash_timer: dash_cooldown,
                dash_cooldown,
                dashing: false,
                dash_vx: 0.0,
                dash_vy: 0.0,
            },
            EnemyBehavior::Kamikaze { explosion_radius } => Self::Kamikaze { explosion_radius },
            EnemyBehavior::Spawner { interval, spawn, max_spawns } => Self::Spawner {
                timer: interval,
                interval,
                spawn,
                spawned: 0,
                max_spawns,
            },
        }
    }
}

/// スロットに書き込む初期値一式
struct EnemyInit {
    kind:        EnemyKind,
    x:           f32,
    y:           f32,
    hp:          f32,
    damage:      f32,
    speed:       f32,
    radius:      f32,
    elite:       bool,
    xp:          u32,
    gold_chance: f32,
    behavior:    BehaviorState,
    boss:        Option<BossState>,
}

/// 敵 SoA（Structure of Arrays）。座標は円の中心
#[derive(Clone)]
pub struct EnemyWorld {
    pub positions_x:  Vec<f32>,
    pub positions_y:  Vec<f32>,
    /// 直近 tick の移動速度（描画・向き用）
    pub velocities_x: Vec<f32>,
    pub velocities_y: Vec<f32>,
    pub knockback_x:  Vec<f32>,
    pub knockback_y:  Vec<f32>,
    pub speeds:       Vec<f32>,
    pub hp:           Vec<f32>,
    pub max_hp:       Vec<f32>,
    pub damage:       Vec<f32>,
    pub radius:       Vec<f32>,
    pub kinds:        Vec<EnemyKind>,
    pub elite:        Vec<bool>,
    pub xp:           Vec<u32>,
    pub gold_chance:  Vec<f32>,
    pub hit_flash:    Vec<f32>,
    pub stun:         Vec<f32>,
    pub behavior:     Vec<BehaviorState>,
    /// ボススロットのみ Some
    pub boss:         Vec<Option<BossState>>,
    /// 最後にダメージを与えた武器（撃破イベント用）
    pub last_hit:     Vec<Option<WeaponId>>,
    pub alive:        Vec<bool>,
    /// スロット再利用毎に進む世代。古いハンドルを無効化する
    generation:       Vec<u32>,
    pub count:        usize,
    capacity:         usize,
    /// 空きスロットのインデックススタック
    free_list:        Vec<usize>,
}

impl EnemyWorld {
    pub fn new(capacity: usize) -> Self {
        Self {
            positions_x:  Vec::with_capacity(capacity),
            positions_y:  Vec::with_capacity(capacity),
            velocities_x: Vec::with_capacity(capacity),
            velocities_y: Vec::with_capacity(capacity),
            knockback_x:  Vec::with_capacity(capacity),
            knockback_y:  Vec::with_capacity(capacity),
            speeds:       Vec::with_capacity(capacity),
            hp:           Vec::with_capacity(capacity),
            max_hp:       Vec::with_capacity(capacity),
            damage:       Vec::with_capacity(capacity),
            radius:       Vec::with_capacity(capacity),
            kinds:        Vec::with_capacity(capacity),
            elite:        Vec::with_capacity(capacity),
            xp:           Vec::with_capacity(capacity),
            gold_chance:  Vec::with_capacity(capacity),
            hit_flash:    Vec::with_capacity(capacity),
            stun:         Vec::with_capacity(capacity),
            behavior:     Vec::with_capacity(capacity),
            boss:         Vec::with_capacity(capacity),
            last_hit:     Vec::with_capacity(capacity),
            alive:        Vec::with_capacity(capacity),
            generation:   Vec::with_capacity(capacity),
            count:        0,
            capacity,
            free_list:    Vec::new(),
        }
    }

    /// 確保済みスロット数（生存・死亡を含む）
    pub fn len(&self) -> usize {
        self.positions_x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// 通常敵をスポーンする。難易度でHP・ダメージ・経験値を切り捨てスケーリングし、エリートは倍率を掛ける
    pub fn spawn_enemy(
        &mut self,
        id: EnemyId,
        x: f32,
        y: f32,
        elite: bool,
        difficulty: f32,
    ) -> Option<EnemyHandle> {
        let p = id.params();
        let (hp_m, dmg_m, spd_m, size_m, xp_m, gold_m) = if elite {
            (ELITE_HP_MULT, ELITE_DAMAGE_MULT, ELITE_SPEED_MULT, ELITE_SIZE_MULT, ELITE_XP_MULT, ELITE_GOLD_MULT)
        } else {
            (1.0, 1.0, 1.0, 1.0, 1, 1.0)
        };
        self.insert(EnemyInit {
            kind:        EnemyKind::Regular(id),
            x,
            y,
            hp:          (p.max_hp * difficulty * hp_m).floor().max(1.0),
            damage:      (p.damage * difficulty * dmg_m).floor(),
            speed:       p.speed * spd_m,
            radius:      p.radius() * size_m,
            elite,
            xp:          (p.xp as f32 * difficulty * xp_m as f32).floor() as u32,
            gold_chance: p.gold_chance * gold_m,
            behavior:    BehaviorState::from_template(p.behavior),
            boss:        None,
        })
    }

    /// ボスをスポーンする。難易度は HP のみに掛かる
    pub fn spawn_boss(&mut self, id: BossId, x: f32, y: f32, difficulty: f32) -> Option<EnemyHandle> {
        let p = id.params();
        self.insert(EnemyInit {
            kind:        EnemyKind::Boss(id),
            x,
            y,
            hp:          (p.max_hp * difficulty).floor().max(1.0),
            damage:      p.damage,
            speed:       p.speed,
            radius:      p.radius(),
            elite:       false,
            xp:          p.xp,
            gold_chance: 0.0,
            behavior:    BehaviorState::Boss,
            boss:        Some(BossState::new(id)),
        })
    }

    fn insert(&mut self, e: EnemyInit) -> Option<EnemyHandle> {
        let i = if let Some(i) = self.free_list.pop() {
            self.positions_x[i]  = e.x;
            self.positions_y[i]  = e.y;
            self.velocities_x[i] = 0.0;
            self.velocities_y[i] = 0.0;
            self.knockback_x[i]  = 0.0;
            self.knockback_y[i]  = 0.0;
            self.speeds[i]       = e.speed;
            self.hp[i]           = e.hp;
            self.max_hp[i]       = e.hp;
            self.damage[i]       = e.damage;
            self.radius[i]       = e.radius;
            self.kinds[i]        = e.kind;
            self.elite[i]        = e.elite;
            self.xp[i]           = e.xp;
            self.gold_chance[i]  = e.gold_chance;
            self.hit_flash[i]    = 0.0;
            self.stun[i]         = 0.0;
            self.behavior[i]     = e.behavior;
            self.boss[i]         = e.boss;
            self.last_hit[i]     = None;
            self.alive[i]        = true;
            i
        } else if self.len() < self.capacity {
            self.positions_x.push(e.x);
            self.positions_y.push(e.y);
            self.velocities_x.push(0.0);
            self.velocities_y.push(0.0);
            self.knockback_x.push(0.0);
            self.knockback_y.push(0.0);
            self.speeds.push(e.speed);
            self.hp.push(e.hp);
            self.max_hp.push(e.hp);
            self.damage.push(e.damage);
            self.radius.push(e.radius);
            self.kinds.push(e.kind);
            self.elite.push(e.elite);
            self.xp.push(e.xp);
            self.gold_chance.push(e.gold_chance);
            self.hit_flash.push(0.0);
            self.stun.push(0.0);
            self.behavior.push(e.behavior);
            self.boss.push(e.boss);
            self.last_hit.push(None);
            self.alive.push(true);
            self.generation.push(0);
            self.len() - 1
        } else {
            log::debug!("enemy pool exhausted ({}), dropping {:?}", self.capacity, e.kind);
            return None;
        };
        self.count += 1;
        Some(self.handle(i))
    }

    pub fn kill(&mut self, i: usize) {
        if self.alive[i] {
            self.alive[i] = false;
            self.boss[i] = None;
            self.generation[i] = self.generation[i].wrapping_add(1);
            self.count = self.count.saturating_sub(1);
            self.free_list.push(i);
        }
    }

    pub fn handle(&self, i: usize) -> EnemyHandle {
        EnemyHandle { index: i as u32, generation: self.generation[i] }
    }

    /// 生存中かつ世代が一致するときだけスロット番号を返す
    pub fn resolve(&self, h: EnemyHandle) -> Option<usize> {
        let i = h.index();
        (i < self.len() && self.alive[i] && self.generation[i] == h.generation).then_some(i)
    }

    /// ダメージ契約: HP は必ず減る。ヒットフラッシュを張り、ノックバックを加算する。戻り値は `hp <= 0`
    pub fn take_damage(&mut self, i: usize, amount: f32, knockback: Option<(f32, f32)>) -> bool {
        self.hp[i] -= amount.max(0.0);
        self.hit_flash[i] = HIT_FLASH_DURATION;
        if let Some((kx, ky)) = knockback {
            self.knockback_x[i] += kx;
            self.knockback_y[i] += ky;
        }
        self.hp[i] <= 0.0
    }

    /// 重なったスタンは長い方を採る
    pub fn stun(&mut self, i: usize, duration: f32) {
        self.stun[i] = self.stun[i].max(duration);
    }

    /// 実体化していない（phase 中）敵はあらゆる衝突から除外される
    pub fn is_phased(&self, i: usize) -> bool {
        matches!(self.behavior[i], BehaviorState::Phase { phased: true, .. })
    }

    pub fn is_boss(&self, i: usize) -> bool {
        matches!(self.kinds[i], EnemyKind::Boss(_))
    }

    /// 当たり判定の対象になり得るか（生存・HP 残あり・非 phase）。
    /// 同一 tick 内で倒された敵は死亡処理までスロットに残るが、以後の命中対象にはならない
    #[inline]
    pub fn is_targetable(&self, i: usize) -> bool {
        self.alive[i] && self.hp[i] > 0.0 && !self.is_phased(i)
    }

    /// 通常敵の数（ボスは人口上限の対象外）
    pub fn regular_count(&self) -> usize {
        (0..self.len())
            .filter(|&i| self.alive[i] && !self.is_boss(i))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_damage_is_monotonic_and_reports_death() {
        let mut w = EnemyWorld::new(4);
        let h = w.spawn_enemy(EnemyId::Grunt, 0.0, 0.0, false, 1.0).unwrap();
        let i = w.resolve(h).unwrap();
        let mut last = w.hp[i];
        for amount in [0.0, 3.0, -5.0, 2.5, 4.0, 100.0] {
            let dead = w.take_damage(i, amount, None);
            assert!(w.hp[i] <= last);
            assert_eq!(dead, w.hp[i] <= 0.0);
            last = w.hp[i];
        }
        assert!(w.hit_flash[i] > 0.0);
    }

    #[test]
    fn knockback_accumulates() {
        let mut w = EnemyWorld::new(1);
        let h = w.spawn_enemy(EnemyId::Tank, 0.0, 0.0, false, 1.0).unwrap();
        let i = w.resolve(h).unwrap();
        w.take_damage(i, 1.0, Some((10.0, 0.0)));
        w.take_damage(i, 1.0, Some((5.0, -2.0)));
        assert_eq!((w.knockback_x[i], w.knockback_y[i]), (15.0, -2.0));
    }

    #[test]
    fn overlapping_stuns_take_max() {
        let mut w = EnemyWorld::new(1);
        w.spawn_enemy(EnemyId::Grunt, 0.0, 0.0, false, 1.0);
        w.stun(0, 0.5);
        w.stun(0, 0.1);
        assert_eq!(w.stun[0], 0.5);
    }

    #[test]
    fn elite_and_difficulty_scaling() {
        let mut w = EnemyWorld::new(2);
        w.spawn_enemy(EnemyId::Grunt, 0.0, 0.0, true, 1.2);
        // floor(10 * 1.2 * 3) = 36, floor(8 * 1.2 * 1.5) = 14
        assert_eq!(w.hp[0], 36.0);
        assert_eq!(w.damage[0], 14.0);
        assert_eq!(w.xp[0], 3);
        assert!((w.radius[0] - 14.0 * 1.3).abs() < 1e-5);
        assert!((w.speeds[0] - 72.0).abs() < 1e-4);
    }

    #[test]
    fn pool_rejects_when_full_and_reuses_slots() {
        let mut w = EnemyWorld::new(2);
        let a = w.spawn_enemy(EnemyId::Grunt, 0.0, 0.0, false, 1.0).unwrap();
        assert!(w.spawn_enemy(EnemyId::Grunt, 0.0, 0.0, false, 1.0).is_some());
        assert!(w.spawn_enemy(EnemyId::Grunt, 0.0, 0.0, false, 1.0).is_none());

        w.kill(a.index());
        assert!(w.resolve(a).is_none());
        let b = w.spawn_boss(BossId::HiveQueen, 0.0, 0.0, 1.0).unwrap();
        assert_eq!(b.index, a.index);
        assert_ne!(b.generation, a.generation);
        assert!(w.boss[b.index()].is_some());
        assert_eq!(w.len(), 2);
        assert_eq!(w.regular_count(), 1);
    }

    #[test]
    fn phase_state_excludes_from_targeting() {
        let mut w = EnemyWorld::new(1);
        w.spawn_enemy(EnemyId::Ghost, 0.0, 0.0, false, 1.0);
        assert!(w.is_targetable(0));
        if let BehaviorState::Phase { phased, .. } = &mut w.behavior[0] {
            *phased = true;
        }
        assert!(!w.is_targetable(0));
    }
}
