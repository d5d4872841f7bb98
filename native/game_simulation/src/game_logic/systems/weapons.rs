use super::damage::damage_enemy;
use crate::game_logic::chase_ai::find_nearest_enemy_spatial;
use crate::world::{
    EnemyHandle, EnemyWorld, GameWorld, Motion, Owner, ProjectileConfig, WeaponEffect,
    WeaponInstance, WeaponState,
};
use game_core::constants::{
    CHAIN_DAMAGE_FALLOFF, GRENADE_AIM_JITTER, GRENADE_FACING_JITTER, HOMING_LAUNCH_JITTER,
    MAX_ENEMY_RADIUS, ORBITAL_LASER_INTERVAL, ORBITAL_LASER_RADIUS, ORBIT_HIT_COOLDOWN,
    WEAPON_SEARCH_RADIUS,
};
use game_core::entity_params::{WeaponArchetype, WeaponId, WeaponParams};
use game_core::physics::rng::SimpleRng;
use game_core::physics::spatial_hash::SpatialHash;
use game_core::stats::ResolvedStats;
use game_core::util::{angle_to, distance_sq, point_segment_distance_sq, wrap_angle};
use std::f32::consts::TAU;

/// 発射判定に使うプレイヤー側の情報
pub struct WeaponContext<'a> {
    pub x:       f32,
    pub y:       f32,
    /// ラジアン
    pub facing:  f32,
    pub elapsed: f32,
    pub stats:   &'a ResolvedStats,
}

/// 弾を介さない直接ダメージ（雷撃・オーラ・円錐・ビーム・オーブ）
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectHit {
    pub target: EnemyHandle,
    pub damage: f32,
    /// 0 ならスタンなし
    pub stun:   f32,
    pub weapon: WeaponId,
}

#[derive(Default, Debug)]
pub struct WeaponOutput {
    pub projectiles: Vec<ProjectileConfig>,
    pub direct_hits: Vec<DirectHit>,
    pub effects:     Vec<WeaponEffect>,
}

/// 全武器を 1 tick 進める。ワールドは読み取りのみで、結果は `WeaponOutput` にまとめて返す
pub fn fire_weapons(
    weapons: &mut [WeaponInstance],
    ctx: &WeaponContext,
    enemies: &EnemyWorld,
    spatial: &SpatialHash,
    buf: &mut Vec<usize>,
    dt: f32,
    rng: &mut SimpleRng,
) -> WeaponOutput {
    let mut f = Firing { ctx, enemies, spatial, buf, rng, out: WeaponOutput::default() };

    for weapon in weapons.iter_mut() {
        let id = weapon.id;
        let p = id.params();
        let level = weapon.level;
        match &mut weapon.state {
            WeaponState::Cooldown { timer } => {
                *timer -= dt;
                if *timer > 0.0 {
                    continue;
                }
                // 目標必須の武器は目標が現れるまで待機（タイマーは 0 以下のまま）
                if f.fire(id, p, level) {
                    *timer = p.cooldown * p.cooldown_mult_at(level) * (1.0 - ctx.stats.cooldown_reduction);
                }
            }
            WeaponState::Pulse { damage_timer } => {
                *damage_timer -= dt;
                let strike = *damage_timer <= 0.0;
                if strike {
                    *damage_timer = p.damage_interval * p.interval_mult_at(level);
                }
                match p.archetype {
                    WeaponArchetype::Aura => f.aura(id, p, level, strike),
                    WeaponArchetype::Cone => f.cone(id, p, level, strike),
                    WeaponArchetype::Beam => f.beam(id, p, level, strike),
                    _ => {}
                }
            }
            WeaponState::Orbit { hit_cooldowns, laser_timer } => {
                hit_cooldowns.retain(|_, remaining| {
                    *remaining -= dt;
                    *remaining > 0.0
                });
                let orbs = f.orbit(id, p, level);
                for (orb, target) in orbs {
                    if hit_cooldowns.contains_key(&(orb, target.target)) {
                        continue;
                    }
                    hit_cooldowns.insert((orb, target.target), ORBIT_HIT_COOLDOWN);
                    f.out.direct_hits.push(target);
                }
                if p.shoots_lasers {
                    *laser_timer -= dt;
                    if *laser_timer <= 0.0 {
                        *laser_timer = ORBITAL_LASER_INTERVAL;
                        f.orbital_lasers(id, p, level);
                    }
                }
            }
        }
    }
    f.out
}

/// `(base + inc × (level - 1)) × damage_mult`。レーザー系は laser_damage も掛かる
pub fn weapon_damage(p: &WeaponParams, level: u32, stats: &ResolvedStats) -> f32 {
    let laser = if p.laser { stats.laser_damage } else { 1.0 };
    p.damage_at(level) * stats.damage_mult * laser
}

struct Firing<'a> {
    ctx:     &'a WeaponContext<'a>,
    enemies: &'a EnemyWorld,
    spatial: &'a SpatialHash,
    buf:     &'a mut Vec<usize>,
    rng:     &'a mut SimpleRng,
    out:     WeaponOutput,
}

impl Firing<'_> {
    fn nearest(&mut self) -> Option<usize> {
        find_nearest_enemy_spatial(self.spatial, self.enemies, self.ctx.x, self.ctx.y, WEAPON_SEARCH_RADIUS, self.buf)
    }

    /// `buf` を (x, y) から `reach` 以内の命中可能な敵に絞る。`include_radius` なら敵半径ぶん広げる
    fn gather(&mut self, x: f32, y: f32, reach: f32, include_radius: bool) {
        let enemies = self.enemies;
        let pad = if include_radius { MAX_ENEMY_RADIUS } else { 0.0 };
        self.spatial.query_nearby_into(x, y, reach + pad, self.buf);
        self.buf.retain(|&i| {
            if i >= enemies.len() || !enemies.is_targetable(i) {
                return false;
            }
            let r = reach + if include_radius { enemies.radius[i] } else { 0.0 };
            distance_sq(enemies.positions_x[i], enemies.positions_y[i], x, y) < r * r
        });
    }

    fn hit(&mut self, i: usize, damage: f32, stun: f32, weapon: WeaponId) {
        self.out.direct_hits.push(DirectHit { target: self.enemies.handle(i), damage, stun, weapon });
    }

    fn shot(&self, id: WeaponId, p: &WeaponParams, level: u32, angle: f32, damage: f32) -> ProjectileConfig {
        let s = self.ctx.stats;
        let speed = p.speed * p.speed_mult_at(level) * s.projectile_speed;
        ProjectileConfig {
            x:                self.ctx.x,
            y:                self.ctx.y,
            vx:               angle.cos() * speed,
            vy:               angle.sin() * speed,
            damage,
            radius:           p.size * p.size_mult_at(level) * s.area,
            duration:         p.duration * s.duration,
            pierce:           p.pierce_at(level).max(1),
            owner:            Owner::Player,
            motion:           Motion::Straight,
            explosion_radius: None,
            source:           Some(id),
        }
    }

    fn homing_motion(&self, p: &WeaponParams, target: Option<usize>) -> Motion {
        Motion::Homing {
            turn_rate: p.turn_speed * (1.0 + self.ctx.stats.homing),
            target:    target.map(|i| self.enemies.handle(i)),
        }
    }

    /// クールダウン武器の発射。発射しなかった（目標必須で目標なし）ときは false
    fn fire(&mut self, id: WeaponId, p: &WeaponParams, level: u32) -> bool {
        let damage = weapon_damage(p, level, self.ctx.stats);
        let (x, y, facing) = (self.ctx.x, self.ctx.y, self.ctx.facing);
        let target = self.nearest();
        if p.requires_target && target.is_none() {
            return false;
        }
        let aim = target
            .map(|i| angle_to(x, y, self.enemies.positions_x[i], self.enemies.positions_y[i]))
            .unwrap_or(facing);
        let n = p.projectiles_at(level).max(1);
        let half = (n - 1) as f32 / 2.0;

        match p.archetype {
            WeaponArchetype::Projectile | WeaponArchetype::Spread | WeaponArchetype::Piercing => {
                let spread = p.spread_at(level);
                for k in 0..n {
                    let mut c = self.shot(id, p, level, aim + (k as f32 - half) * spread, damage);
                    if p.archetype == WeaponArchetype::Piercing {
                        c.radius = p.width * p.width_mult_at(level) * self.ctx.stats.area;
                    }
                    if p.homing_shots {
                        c.motion = self.homing_motion(p, target);
                    }
                    self.out.projectiles.push(c);
                }
            }
            WeaponArchetype::Homing => {
                for k in 0..n {
                    let a = facing + (k as f32 - half) * p.spread + self.rng.signed(HOMING_LAUNCH_JITTER);
                    let mut c = self.shot(id, p, level, a, damage);
                    c.motion = self.homing_motion(p, target);
                    self.out.projectiles.push(c);
                }
            }
            WeaponArchetype::Swarm => {
                for _ in 0..n {
                    let a = self.rng.next_f32() * TAU;
                    let mut c = self.shot(id, p, level, a, damage);
                    c.motion = self.homing_motion(p, None);
                    self.out.projectiles.push(c);
                }
            }
            WeaponArchetype::Explosive => {
                let radius = p.explosion_radius
                    * p.radius_mult_at(level)
                    * self.ctx.stats.area
                    * self.ctx.stats.explosion_radius;
                for _ in 0..n {
                    let a = if target.is_some() {
                        aim + self.rng.signed(GRENADE_AIM_JITTER)
                    } else {
                        facing + self.rng.signed(GRENADE_FACING_JITTER)
                    };
                    let mut c = self.shot(id, p, level, a, damage);
                    c.duration = p.duration;
                    c.explosion_radius = Some(radius);
                    self.out.projectiles.push(c);
                }
            }
            WeaponArchetype::Boomerang => {
                for k in 0..n {
                    let mut c = self.shot(id, p, level, facing + (k as f32 - half) * p.spread, damage);
                    c.duration = p.duration;
                    c.motion = Motion::Boomerang {
                        returning:    false,
                        origin_x:     x,
                        origin_y:     y,
                        max_distance: p.max_distance * self.ctx.stats.area,
                    };
                    self.out.projectiles.push(c);
                }
            }
            WeaponArchetype::Lightning => return self.lightning(id, p, level, damage),
            WeaponArchetype::Orbital | WeaponArchetype::Aura | WeaponArchetype::Cone | WeaponArchetype::Beam => {
                return false;
            }
        }
        true
    }

    /// 射程内のランダムな敵から始め、連鎖範囲内の未命中の敵へランダムに跳ぶ
    fn lightning(&mut self, id: WeaponId, p: &WeaponParams, level: u32, damage: f32) -> bool {
        let area = self.ctx.stats.area;
        let range = p.range * p.range_mult_at(level) * area;
        let chain_range = p.chain_range * area;
        let links = p.chains_at(level) + self.ctx.stats.extra_chains;

        self.gather(self.ctx.x, self.ctx.y, range, false);
        let Some(&first) = self.rng.pick(&self.buf[..]) else {
            return false;
        };

        let mut visited = vec![first];
        let (mut lx, mut ly) = (self.ctx.x, self.ctx.y);
        let mut current = first;
        for link in 0..=links {
            let cx = self.enemies.positions_x[current];
            let cy = self.enemies.positions_y[current];
            let dmg = if link == 0 { damage } else { damage * CHAIN_DAMAGE_FALLOFF };
            self.hit(current, dmg, p.stun, id);
            self.out.effects.push(WeaponEffect::Arc { weapon: id, x1: lx, y1: ly, x2: cx, y2: cy });
            (lx, ly) = (cx, cy);

            if link == links {
                break;
            }
            self.gather(cx, cy, chain_range, false);
            self.buf.retain(|i| !visited.contains(i));
            match self.rng.pick(&self.buf[..]) {
                Some(&next) => {
                    visited.push(next);
                    current = next;
                }
                None => break,
            }
        }
        true
    }

    fn aura(&mut self, id: WeaponId, p: &WeaponParams, level: u32, strike: bool) {
        let radius = p.radius * p.radius_mult_at(level) * self.ctx.stats.area;
        let (x, y) = (self.ctx.x, self.ctx.y);
        self.out.effects.push(WeaponEffect::Aura { weapon: id, x, y, radius });
        if !strike {
            return;
        }
        let damage = weapon_damage(p, level, self.ctx.stats);
        self.gather(x, y, radius, true);
        for k in 0..self.buf.len() {
            let i = self.buf[k];
            self.hit(i, damage, 0.0, id);
        }
    }

    fn cone(&mut self, id: WeaponId, p: &WeaponParams, level: u32, strike: bool) {
        let range = p.range * p.range_mult_at(level) * self.ctx.stats.area;
        let half_angle = p.cone_angle * p.angle_mult_at(level);
        let (x, y, facing) = (self.ctx.x, self.ctx.y, self.ctx.facing);
        self.out.effects.push(WeaponEffect::Cone { weapon: id, x, y, facing, half_angle, range });
        if !strike {
            return;
        }
        let damage = weapon_damage(p, level, self.ctx.stats);
        // 境界上（dist == range）も含める
        self.gather(x, y, range + f32::EPSILON, false);
        for k in 0..self.buf.len() {
            let i = self.buf[k];
            let a = angle_to(x, y, self.enemies.positions_x[i], self.enemies.positions_y[i]);
            if wrap_angle(a - facing).abs() < half_angle {
                self.hit(i, damage, 0.0, id);
            }
        }
    }

    /// 最近接の敵（いなければ向き）へ伸びる線分と円が交わる敵すべて
    fn beam(&mut self, id: WeaponId, p: &WeaponParams, level: u32, strike: bool) {
        let area = self.ctx.stats.area;
        let range = p.range * p.range_mult_at(level) * area;
        let width = p.width * p.width_mult_at(level) * area;
        let (x, y) = (self.ctx.x, self.ctx.y);
        let aim = match self.nearest() {
            Some(i) => angle_to(x, y, self.enemies.positions_x[i], self.enemies.positions_y[i]),
            None => self.ctx.facing,
        };
        let (x2, y2) = (x + aim.cos() * range, y + aim.sin() * range);
        self.out.effects.push(WeaponEffect::Beam { weapon: id, x1: x, y1: y, x2, y2, width });
        if !strike {
            return;
        }
        let damage = weapon_damage(p, level, self.ctx.stats);
        let (mx, my) = ((x + x2) / 2.0, (y + y2) / 2.0);
        self.gather(mx, my, range / 2.0 + width, true);
        for k in 0..self.buf.len() {
            let i = self.buf[k];
            let reach = width / 2.0 + self.enemies.radius[i];
            let d_sq = point_segment_distance_sq(
                self.enemies.positions_x[i],
                self.enemies.positions_y[i],
                x,
                y,
                x2,
                y2,
            );
            if d_sq < reach * reach {
                self.hit(i, damage, 0.0, id);
            }
        }
    }

    fn orb_layout(&self, p: &WeaponParams, level: u32) -> (u32, f32, f32) {
        let s = self.ctx.stats;
        let count = p.projectiles_at(level) + s.extra_orbitals;
        let radius = p.orbit_radius * p.radius_mult_at(level) * s.area;
        let size = p.size * p.size_mult_at(level) * s.area;
        (count.max(1), radius, size)
    }

    fn orb_angle(&self, p: &WeaponParams, orb: u32, count: u32) -> f32 {
        self.ctx.elapsed * p.orbit_speed + orb as f32 * TAU / count as f32
    }

    /// 各オーブの接触候補を (オーブ番号, ヒット) で返す。ヒットクールダウンは呼び出し側
    fn orbit(&mut self, id: WeaponId, p: &WeaponParams, level: u32) -> Vec<(u8, DirectHit)> {
        let (count, radius, size) = self.orb_layout(p, level);
        let damage = weapon_damage(p, level, self.ctx.stats);
        let mut contacts = Vec::new();
        for orb in 0..count {
            let a = self.orb_angle(p, orb, count);
            let ox = self.ctx.x + a.cos() * radius;
            let oy = self.ctx.y + a.sin() * radius;
            self.out.effects.push(WeaponEffect::Orb { weapon: id, x: ox, y: oy, radius: size });
            self.gather(ox, oy, size, true);
            for &i in self.buf.iter() {
                let target = self.enemies.handle(i);
                contacts.push((orb.min(u8::MAX as u32) as u8, DirectHit { target, damage, stun: 0.0, weapon: id }));
            }
        }
        contacts
    }

    /// 進化版オーブ: 各オーブから外向きにレーザー弾を放つ
    fn orbital_lasers(&mut self, id: WeaponId, p: &WeaponParams, level: u32) {
        let (count, radius, _) = self.orb_layout(p, level);
        let damage = weapon_damage(p, level, self.ctx.stats);
        for orb in 0..count {
            let a = self.orb_angle(p, orb, count);
            let mut c = self.shot(id, p, level, a, damage);
            c.x += a.cos() * radius;
            c.y += a.sin() * radius;
            c.radius = ORBITAL_LASER_RADIUS;
            self.out.projectiles.push(c);
        }
    }
}

/// 武器ステージ: 発射結果を弾プール・敵 HP・描画エフェクトへ反映する
pub(crate) fn update_weapons(w: &mut GameWorld, dt: f32) {
    w.effects.clear();
    let ctx = WeaponContext {
        x:       w.player.x,
        y:       w.player.y,
        facing:  w.player.facing,
        elapsed: w.elapsed,
        stats:   &w.player.stats,
    };
    let out = fire_weapons(
        &mut w.player.weapons,
        &ctx,
        &w.enemies,
        &w.spatial,
        &mut w.query_buf,
        dt,
        &mut w.rng,
    );

    for c in out.projectiles {
        if w.projectiles.spawn(c).is_none() {
            break;
        }
    }
    for hit in out.direct_hits {
        let Some(i) = w.enemies.resolve(hit.target) else {
            continue;
        };
        if hit.stun > 0.0 {
            w.enemies.stun(i, hit.stun);
        }
        damage_enemy(w, i, hit.damage, None, Some(hit.weapon), false);
    }
    w.effects.extend(out.effects);
}
