//! Path: native/game_simulation/src/world/projectile.rs
//! Summary: 弾 SoA（ProjectileWorld）。固定容量アリーナ、所有者フラグ、命中済み集合、運動バリアント

use super::handle::{EnemyHandle, ProjectileHandle};
use game_core::entity_params::WeaponId;

/// 発射元。命中判定は所有者が異なる相手とだけ行う
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Owner {
    Player,
    Enemy,
}

/// 弾の運動。毎 tick 位置積分の前に評価される
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Motion {
    Straight,
    /// `turn_rate` は rad/s
    Homing { turn_rate: f32, target: Option<EnemyHandle> },
    Boomerang { returning: bool, origin_x: f32, origin_y: f32, max_distance: f32 },
}

/// 弾の生成パラメータ（武器・敵・ボスが組み立てる）
#[derive(Clone, Copy, Debug)]
pub struct ProjectileConfig {
    pub x:                f32,
    pub y:                f32,
    pub vx:               f32,
    pub vy:               f32,
    pub damage:           f32,
    pub radius:           f32,
    pub duration:         f32,
    /// 命中可能な異なる対象の最大数（1 以上）
    pub pierce:           u32,
    pub owner:            Owner,
    pub motion:           Motion,
    pub explosion_radius: Option<f32>,
    pub source:           Option<WeaponId>,
}

impl ProjectileConfig {
    /// 敵弾（直進・貫通 1）
    pub fn enemy_shot(x: f32, y: f32, vx: f32, vy: f32, damage: f32, radius: f32, duration: f32) -> Self {
        Self {
            x,
            y,
            vx,
            vy,
            damage,
            radius,
            duration,
            pierce: 1,
            owner: Owner::Enemy,
            motion: Motion::Straight,
            explosion_radius: None,
            source: None,
        }
    }
}

/// 弾 SoA（Structure of Arrays）
pub struct ProjectileWorld {
    pub positions_x:      Vec<f32>,
    pub positions_y:      Vec<f32>,
    pub velocities_x:     Vec<f32>,
    pub velocities_y:     Vec<f32>,
    pub damage:           Vec<f32>,
    pub radius:           Vec<f32>,
    /// 残り寿命（秒）
    pub duration:         Vec<f32>,
    pub pierce:           Vec<u32>,
    pub hits:             Vec<u32>,
    /// 命中済みの敵。同じ弾が同じ敵に 2 度当たらないことを保証する
    pub hit_set:          Vec<Vec<EnemyHandle>>,
    pub owner:            Vec<Owner>,
    pub motion:           Vec<Motion>,
    pub explosion_radius: Vec<Option<f32>>,
    /// 撃破イベント用の発射元武器
    pub source:           Vec<Option<WeaponId>>,
    pub alive:            Vec<bool>,
    generation:           Vec<u32>,
    pub count:            usize,
    capacity:             usize,
    /// 空きスロットのインデックススタック — O(1) でスロットを取得・返却
    free_list:            Vec<usize>,
}

impl ProjectileWorld {
    pub fn new(capacity: usize) -> Self {
        Self {
            positions_x:      Vec::with_capacity(capacity),
            positions_y:      Vec::with_capacity(capacity),
            velocities_x:     Vec::with_capacity(capacity),
            velocities_y:     Vec::with_capacity(capacity),
            damage:           Vec::with_capacity(capacity),
            radius:           Vec::with_capacity(capacity),
            duration:         Vec::with_capacity(capacity),
            pierce:           Vec::with_capacity(capacity),
            hits:             Vec::with_capacity(capacity),
            hit_set:          Vec::with_capacity(capacity),
            owner:            Vec::with_capacity(capacity),
            motion:           Vec::with_capacity(capacity),
            explosion_radius: Vec::with_capacity(capacity),
            source:           Vec::with_capacity(capacity),
            alive:            Vec::with_capacity(capacity),
            generation:       Vec::with_capacity(capacity),
            count:            0,
            capacity,
            free_list:        Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.positions_x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// 空きがなければ None（プールは伸長しない）
    pub fn spawn(&mut self, c: ProjectileConfig) -> Option<ProjectileHandle> {
        let pierce = c.pierce.max(1);
        let i = if let Some(i) = self.free_list.pop() {
            // O(1): フリーリストから空きスロットを取得
            self.positions_x[i]      = c.x;
            self.positions_y[i]      = c.y;
            self.velocities_x[i]     = c.vx;
            self.velocities_y[i]     = c.vy;
            self.damage[i]           = c.damage;
            self.radius[i]           = c.radius;
            self.duration[i]         = c.duration;
            self.pierce[i]           = pierce;
            self.hits[i]             = 0;
            self.hit_set[i].clear();
            self.owner[i]            = c.owner;
            self.motion[i]           = c.motion;
            self.explosion_radius[i] = c.explosion_radius;
            self.source[i]           = c.source;
            self.alive[i]            = true;
            i
        } else if self.len() < self.capacity {
            self.positions_x.push(c.x);
            self.positions_y.push(c.y);
            self.velocities_x.push(c.vx);
            self.velocities_y.push(c.vy);
            self.damage.push(c.damage);
            self.radius.push(c.radius);
            self.duration.push(c.duration);
            self.pierce.push(pierce);
            self.hits.push(0);
            self.hit_set.push(Vec::new());
            self.owner.push(c.owner);
            self.motion.push(c.motion);
            self.explosion_radius.push(c.explosion_radius);
            self.source.push(c.source);
            self.alive.push(true);
            self.generation.push(0);
            self.len() - 1
        } else {
            log::debug!("projectile pool exhausted ({})", self.capacity);
            return None;
        };
        self.count += 1;
        Some(ProjectileHandle { index: i as u32, generation: self.generation[i] })
    }

    pub fn kill(&mut self, i: usize) {
        if self.alive[i] {
            self.alive[i] = false;
            self.generation[i] = self.generation[i].wrapping_add(1);
            self.count = self.count.saturating_sub(1);
            self.free_list.push(i);
        }
    }

    pub fn resolve(&self, h: ProjectileHandle) -> Option<usize> {
        let i = h.index();
        (i < self.len() && self.alive[i] && self.generation[i] == h.generation).then_some(i)
    }

    /// 命中を記録する。既に当たった敵なら false（ダメージを与えてはならない）
    pub fn register_hit(&mut self, i: usize, target: EnemyHandle) -> bool {
        if self.hit_set[i].contains(&target) {
            return false;
        }
        self.hit_set[i].push(target);
        self.hits[i] += 1;
        true
    }

    pub fn pierce_exhausted(&self, i: usize) -> bool {
        self.hits[i] >= self.pierce[i]
    }
}
