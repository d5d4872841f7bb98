use super::collision::hurt_player;
use super::damage::damage_enemy;
use crate::game_logic::chase_ai::find_nearest_enemy_within;
use crate::world::{EnemyHandle, EnemyWorld, FrameEvent, GameWorld, Motion, Owner, ProjectileWorld};
use game_core::constants::{
    BOOMERANG_CATCH_RADIUS, BOOMERANG_RETURN_ACCEL, BOOMERANG_RETURN_TURN, CRIT_MULTIPLIER,
    EXPLOSION_EDGE_FALLOFF, EXPLOSION_KNOCKBACK, HOMING_ACQUIRE_RADIUS, MAX_ENEMY_RADIUS,
    PLAYER_RADIUS,
};
use game_core::entity_params::WeaponId;
use game_core::physics::spatial_hash::SpatialHash;
use game_core::util::{angle_to, distance_sq, normalize, turn_towards};

/// 爆発（寿命切れ・貫通上限で発生。連鎖はしない）
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Explosion {
    pub x:      f32,
    pub y:      f32,
    pub radius: f32,
    pub damage: f32,
    pub weapon: Option<WeaponId>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectileHit {
    pub target: EnemyHandle,
    pub damage: f32,
    pub weapon: Option<WeaponId>,
}

#[derive(Default, Debug)]
pub struct ProjectileOutput {
    pub explosions:  Vec<Explosion>,
    pub enemy_hits:  Vec<ProjectileHit>,
    /// 敵弾がプレイヤーに当たったときのダメージ量
    pub player_hits: Vec<f32>,
}

fn explosion_of(projectiles: &ProjectileWorld, i: usize) -> Option<Explosion> {
    projectiles.explosion_radius[i].map(|radius| Explosion {
        x: projectiles.positions_x[i],
        y: projectiles.positions_y[i],
        radius,
        damage: projectiles.damage[i],
        weapon: projectiles.source[i],
    })
}

/// 速さを保ったまま進行方向を `target` 角へ最大 `max_turn` だけ回す
fn steer(projectiles: &mut ProjectileWorld, i: usize, target: f32, max_turn: f32, accel: f32) {
    let vx = projectiles.velocities_x[i];
    let vy = projectiles.velocities_y[i];
    let speed = (vx * vx + vy * vy).sqrt() * accel;
    let heading = turn_towards(vy.atan2(vx), target, max_turn);
    projectiles.velocities_x[i] = heading.cos() * speed;
    projectiles.velocities_y[i] = heading.sin() * speed;
}

/// 全弾を 1 tick 進める。ダメージの適用は呼び出し側（ヒット一覧を返すだけ）
///
/// 1 発ごとの順序: 寿命 → ホーミング → ブーメラン → 移動 → 当たり判定
pub fn step_projectiles(
    projectiles: &mut ProjectileWorld,
    enemies: &EnemyWorld,
    spatial: &SpatialHash,
    buf: &mut Vec<usize>,
    player_x: f32,
    player_y: f32,
    dt: f32,
) -> ProjectileOutput {
    let mut out = ProjectileOutput::default();

    for i in 0..projectiles.len() {
        if !projectiles.alive[i] {
            continue;
        }

        projectiles.duration[i] -= dt;
        if projectiles.duration[i] <= 0.0 {
            out.explosions.extend(explosion_of(projectiles, i));
            projectiles.kill(i);
            continue;
        }

        let x = projectiles.positions_x[i];
        let y = projectiles.positions_y[i];
        let motion = projectiles.motion[i];
        match motion {
            Motion::Straight => {}
            Motion::Homing { turn_rate, target } => {
                let locked = target
                    .and_then(|h| enemies.resolve(h))
                    .filter(|&e| enemies.is_targetable(e));
                let locked = locked.or_else(|| find_nearest_enemy_within(spatial, enemies, x, y, HOMING_ACQUIRE_RADIUS, buf));
                projectiles.motion[i] = Motion::Homing { turn_rate, target: locked.map(|e| enemies.handle(e)) };
                if let Some(e) = locked {
                    let to = angle_to(x, y, enemies.positions_x[e], enemies.positions_y[e]);
                    steer(projectiles, i, to, turn_rate * dt, 1.0);
                }
            }
            Motion::Boomerang { returning, origin_x, origin_y, max_distance } => {
                let returning = returning || distance_sq(x, y, origin_x, origin_y) >= max_distance * max_distance;
                projectiles.motion[i] = Motion::Boomerang { returning, origin_x, origin_y, max_distance };
                if returning {
                    let to = angle_to(x, y, player_x, player_y);
                    steer(projectiles, i, to, BOOMERANG_RETURN_TURN * dt, BOOMERANG_RETURN_ACCEL);
                    if distance_sq(x, y, player_x, player_y) < BOOMERANG_CATCH_RADIUS * BOOMERANG_CATCH_RADIUS {
                        projectiles.kill(i);
                        continue;
                    }
                }
            }
        }

        projectiles.positions_x[i] += projectiles.velocities_x[i] * dt;
        projectiles.positions_y[i] += projectiles.velocities_y[i] * dt;
        let x = projectiles.positions_x[i];
        let y = projectiles.positions_y[i];
        let r = projectiles.radius[i];

        match projectiles.owner[i] {
            Owner::Enemy => {
                let reach = r + PLAYER_RADIUS;
                if distance_sq(x, y, player_x, player_y) < reach * reach {
                    out.player_hits.push(projectiles.damage[i]);
                    projectiles.kill(i);
                }
            }
            Owner::Player => {
                spatial.query_nearby_into(x, y, r + MAX_ENEMY_RADIUS, buf);
                for &e in buf.iter() {
                    if e >= enemies.len() || !enemies.is_targetable(e) {
                        continue;
                    }
                    let reach = r + enemies.radius[e];
                    if distance_sq(x, y, enemies.positions_x[e], enemies.positions_y[e]) >= reach * reach {
                        continue;
                    }
                    let handle = enemies.handle(e);
                    if !projectiles.register_hit(i, handle) {
                        continue;
                    }
                    out.enemy_hits.push(ProjectileHit {
                        target: handle,
                        damage: projectiles.damage[i],
                        weapon: projectiles.source[i],
                    });
                    if projectiles.pierce_exhausted(i) {
                        out.explosions.extend(explosion_of(projectiles, i));
                        projectiles.kill(i);
                        break;
                    }
                }
            }
        }
    }
    out
}

/// 弾ステージ: 移動と判定のあと、命中（会心あり）・爆発・被弾を反映する
pub(crate) fn update_projectiles(w: &mut GameWorld, dt: f32) {
    let out = step_projectiles(
        &mut w.projectiles,
        &w.enemies,
        &w.spatial,
        &mut w.query_buf,
        w.player.x,
        w.player.y,
        dt,
    );

    let luck = w.player.stats.luck;
    for hit in out.enemy_hits {
        let Some(i) = w.enemies.resolve(hit.target) else {
            continue;
        };
        let crit = w.rng.chance(luck);
        let damage = if crit { hit.damage * CRIT_MULTIPLIER } else { hit.damage };
        damage_enemy(w, i, damage, None, hit.weapon, crit);
    }

    for ex in out.explosions {
        apply_explosion(w, &ex);
    }

    for damage in out.player_hits {
        hurt_player(w, damage);
    }
}

/// 中心から離れるほど弱まる（縁で 50%）。ボス以外は外向きに弾き飛ばす
fn apply_explosion(w: &mut GameWorld, ex: &Explosion) {
    let mut buf = std::mem::take(&mut w.query_buf);
    w.spatial.query_nearby_into(ex.x, ex.y, ex.radius, &mut buf);
    for &i in buf.iter() {
        if i >= w.enemies.len() || !w.enemies.is_targetable(i) {
            continue;
        }
        let ix = w.enemies.positions_x[i];
        let iy = w.enemies.positions_y[i];
        let dist = distance_sq(ix, iy, ex.x, ex.y).sqrt();
        if dist >= ex.radius {
            continue;
        }
        let damage = ex.damage * (1.0 - dist / ex.radius * EXPLOSION_EDGE_FALLOFF);
        let knockback = if w.enemies.is_boss(i) {
            None
        } else {
            normalize(ix - ex.x, iy - ex.y).map(|(nx, ny)| (nx * EXPLOSION_KNOCKBACK, ny * EXPLOSION_KNOCKBACK))
        };
        damage_enemy(w, i, damage, knockback, ex.weapon, false);
    }
    w.query_buf = buf;
    w.frame_events.push(FrameEvent::Explosion { x: ex.x, y: ex.y, radius: ex.radius });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::ProjectileConfig;
    use game_core::constants::CELL_SIZE;
    use game_core::entity_params::EnemyId;

    struct Rig {
        projectiles: ProjectileWorld,
        enemies:     EnemyWorld,
        spatial:     SpatialHash,
        buf:         Vec<usize>,
    }

    impl Rig {
        fn new() -> Self {
            Self {
                projectiles: ProjectileWorld::new(32),
                enemies:     EnemyWorld::new(32),
                spatial:     SpatialHash::new(CELL_SIZE),
                buf:         Vec::new(),
            }
        }

        fn enemy(&mut self, id: EnemyId, x: f32, y: f32) -> usize {
            self.enemies.spawn_enemy(id, x, y, false, 1.0).unwrap().index()
        }

        fn step(&mut self, dt: f32) -> ProjectileOutput {
            self.spatial.clear();
            for i in 0..self.enemies.len() {
                if self.enemies.is_targetable(i) {
                    self.spatial.insert(i, self.enemies.positions_x[i], self.enemies.positions_y[i]);
                }
            }
            step_projectiles(&mut self.projectiles, &self.enemies, &self.spatial, &mut self.buf, -5000.0, -5000.0, dt)
        }
    }

    fn player_shot(x: f32, y: f32, vx: f32, vy: f32, pierce: u32) -> ProjectileConfig {
        ProjectileConfig {
            x,
            y,
            vx,
            vy,
            damage: 10.0,
            radius: 5.0,
            duration: 5.0,
            pierce,
            owner: Owner::Player,
            motion: Motion::Straight,
            explosion_radius: None,
            source: Some(WeaponId::Blaster),
        }
    }

    #[test]
    fn pierce_limits_distinct_targets_without_repeats() {
        let mut rig = Rig::new();
        for k in 0..4 {
            rig.enemy(EnemyId::Tank, 100.0 + k as f32 * 60.0, 0.0);
        }
        rig.projectiles.spawn(player_shot(0.0, 0.0, 600.0, 0.0, 2));
        let mut hits = Vec::new();
        for _ in 0..60 {
            hits.extend(rig.step(0.016).enemy_hits.into_iter().map(|h| h.target));
        }
        assert_eq!(hits.len(), 2);
        assert_ne!(hits[0], hits[1]);
        assert_eq!(rig.projectiles.count, 0);
    }

    #[test]
    fn slow_shot_does_not_hit_same_enemy_twice() {
        let mut rig = Rig::new();
        rig.enemy(EnemyId::Tank, 30.0, 0.0);
        rig.projectiles.spawn(player_shot(0.0, 0.0, 50.0, 0.0, 5));
        let total: usize = (0..40).map(|_| rig.step(0.02).enemy_hits.len()).sum();
        assert_eq!(total, 1);
    }

    #[test]
    fn phased_enemies_are_passed_through() {
        let mut rig = Rig::new();
        let g = rig.enemy(EnemyId::Ghost, 50.0, 0.0);
        if let crate::world::BehaviorState::Phase { phased, .. } = &mut rig.enemies.behavior[g] {
            *phased = true;
        }
        rig.projectiles.spawn(player_shot(0.0, 0.0, 500.0, 0.0, 1));
        let total: usize = (0..20).map(|_| rig.step(0.016).enemy_hits.len()).sum();
        assert_eq!(total, 0);
    }

    #[test]
    fn explosive_shot_explodes_on_expiry_once() {
        let mut rig = Rig::new();
        let mut c = player_shot(0.0, 0.0, 0.0, 0.0, 1);
        c.duration = 0.05;
        c.explosion_radius = Some(80.0);
        rig.projectiles.spawn(c);
        let out = rig.step(0.1);
        assert_eq!(out.explosions.len(), 1);
        assert_eq!(out.explosions[0].radius, 80.0);
        assert!(rig.step(0.1).explosions.is_empty());
    }

    #[test]
    fn homing_turns_towards_enemy_off_axis() {
        let mut rig = Rig::new();
        rig.enemy(EnemyId::Tank, 100.0, 200.0);
        let mut c = player_shot(0.0, 0.0, 300.0, 0.0, 1);
        c.motion = Motion::Homing { turn_rate: 5.0, target: None };
        rig.projectiles.spawn(c);
        rig.step(0.05);
        assert!(rig.projectiles.velocities_y[0] > 0.0);
        let speed = rig.projectiles.velocities_x[0].hypot(rig.projectiles.velocities_y[0]);
        assert!((speed - 300.0).abs() < 1e-2);
        assert!(matches!(rig.projectiles.motion[0], Motion::Homing { target: Some(_), .. }));
    }

    #[test]
    fn boomerang_turns_back_after_max_distance() {
        let mut rig = Rig::new();
        let mut c = player_shot(0.0, 0.0, 400.0, 0.0, 10);
        c.motion = Motion::Boomerang { returning: false, origin_x: 0.0, origin_y: 0.0, max_distance: 100.0 };
        rig.projectiles.spawn(c);
        for _ in 0..20 {
            rig.step(0.016);
        }
        assert!(matches!(rig.projectiles.motion[0], Motion::Boomerang { returning: true, .. }));
    }

    #[test]
    fn enemy_shot_reports_player_hit() {
        let mut rig = Rig::new();
        rig.projectiles.spawn(ProjectileConfig::enemy_shot(-5000.0 + 40.0, -5000.0, -300.0, 0.0, 7.0, 8.0, 2.0));
        let out = rig.step(0.1);
        assert_eq!(out.player_hits, vec![7.0]);
        assert_eq!(rig.projectiles.count, 0);
    }
}
