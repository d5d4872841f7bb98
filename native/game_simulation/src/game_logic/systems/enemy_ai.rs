use super::boss::update_boss;
use super::spawn::EnemySpawnRequest;
use crate::game_logic::chase_ai::update_chase_ai;
use crate::world::{BehaviorState, EnemyWorld, GameWorld, ProjectileConfig};
use game_core::constants::{
    DASH_MAX_RANGE, DASH_MIN_RANGE, DASH_OVERRUN, DASH_SPEED_SCALE, ENEMY_SHOT_DURATION,
    ENEMY_SHOT_RADIUS, KAMIKAZE_BOOST, KAMIKAZE_BOOST_RANGE, KNOCKBACK_DECAY, KNOCKBACK_MIN,
    PHASE_SPEED_SCALE, RANGED_APPROACH_SCALE, RANGED_BAND, RANGED_ENGAGE_RANGE,
    RANGED_PREFERRED_DIST, SPAWNER_OFFSET, SPAWN_MARGIN, SWARM_NOISE_AMPLITUDE,
};
use game_core::util::{clamp_to_map, distance};
use std::f32::consts::TAU;

/// (tx, ty) へ speed で移動する。戻り値は移動前の距離
pub(super) fn move_towards(enemies: &mut EnemyWorld, i: usize, tx: f32, ty: f32, speed: f32, dt: f32) -> f32 {
    let dx   = tx - enemies.positions_x[i];
    let dy   = ty - enemies.positions_y[i];
    let dist = (dx * dx + dy * dy).sqrt();
    if dist <= 0.0 {
        enemies.velocities_x[i] = 0.0;
        enemies.velocities_y[i] = 0.0;
        return dist;
    }
    let vx = dx / dist * speed;
    let vy = dy / dist * speed;
    enemies.velocities_x[i]  = vx;
    enemies.velocities_y[i]  = vy;
    enemies.positions_x[i] += vx * dt;
    enemies.positions_y[i] += vy * dt;
    dist
}

/// 敵ステージ: ヒットフラッシュ・ノックバック → chase（並列）→ 行動タグ別の逐次更新 → スポーン要求の反映
pub(crate) fn update_enemies(w: &mut GameWorld, dt: f32) {
    let len = w.enemies.len();

    // ── 前処理: フラッシュとノックバック（スタン中は動かない） ──
    for i in 0..len {
        if !w.enemies.alive[i] {
            continue;
        }
        let e = &mut w.enemies;
        e.hit_flash[i] = (e.hit_flash[i] - dt).max(0.0);
        if e.stun[i] > 0.0 {
            continue;
        }
        if e.knockback_x[i] != 0.0 || e.knockback_y[i] != 0.0 {
            e.positions_x[i] += e.knockback_x[i] * dt;
            e.positions_y[i] += e.knockback_y[i] * dt;
            e.knockback_x[i] *= KNOCKBACK_DECAY;
            e.knockback_y[i] *= KNOCKBACK_DECAY;
            if e.knockback_x[i].abs() < KNOCKBACK_MIN {
                e.knockback_x[i] = 0.0;
            }
            if e.knockback_y[i].abs() < KNOCKBACK_MIN {
                e.knockback_y[i] = 0.0;
            }
        }
    }

    update_chase_ai(&mut w.enemies, w.player.x, w.player.y, dt);

    // ── 行動タグ別の逐次更新 ──
    for i in 0..len {
        if !w.enemies.alive[i] {
            continue;
        }
        if w.enemies.stun[i] > 0.0 {
            w.enemies.stun[i] = (w.enemies.stun[i] - dt).max(0.0);
            w.enemies.velocities_x[i] = 0.0;
            w.enemies.velocities_y[i] = 0.0;
            continue;
        }
        match w.enemies.behavior[i] {
            BehaviorState::Chase => {}
            BehaviorState::Boss => update_boss(w, i, dt),
            mut state => {
                update_behavior(w, i, &mut state, dt);
                w.enemies.behavior[i] = state;
            }
        }
    }

    flush_spawn_queue(w);
}

fn update_behavior(w: &mut GameWorld, i: usize, state: &mut BehaviorState, dt: f32) {
    let (px, py) = (w.player.x, w.player.y);
    let speed = w.enemies.speeds[i];
    let ex = w.enemies.positions_x[i];
    let ey = w.enemies.positions_y[i];
    let dist = distance(ex, ey, px, py);

    match state {
        BehaviorState::Swarm => {
            if dist <= 0.0 {
                return;
            }
            let (nx, ny) = ((px - ex) / dist, (py - ey) / dist);
            // 進行方向に垂直なゆらぎ（プレイヤー方向の正味の移動量は変えない）
            let noise = (w.elapsed * 5.0 + ex * 0.1).sin() * SWARM_NOISE_AMPLITUDE;
            let vx = (nx - ny * noise) * speed;
            let vy = (ny + nx * noise) * speed;
            let e = &mut w.enemies;
            e.velocities_x[i]  = vx;
            e.velocities_y[i]  = vy;
            e.positions_x[i] += vx * dt;
            e.positions_y[i] += vy * dt;
        }
        BehaviorState::Ranged { shoot_timer, shoot_cooldown, projectile_speed } => {
            if dist > 0.0 {
                let (nx, ny) = ((px - ex) / dist, (py - ey) / dist);
                let step = if dist < RANGED_PREFERRED_DIST - RANGED_BAND {
                    -speed
                } else if dist > RANGED_PREFERRED_DIST + RANGED_BAND {
                    speed * RANGED_APPROACH_SCALE
                } else {
                    0.0
                };
                let e = &mut w.enemies;
                e.velocities_x[i]  = nx * step;
                e.velocities_y[i]  = ny * step;
                e.positions_x[i] += nx * step * dt;
                e.positions_y[i] += ny * step * dt;
            }
            *shoot_timer -= dt;
            if *shoot_timer <= 0.0 && dist < RANGED_ENGAGE_RANGE && dist > 0.0 {
                *shoot_timer = *shoot_cooldown;
                let (nx, ny) = ((px - ex) / dist, (py - ey) / dist);
                w.projectiles.spawn(ProjectileConfig::enemy_shot(
                    ex,
                    ey,
                    nx * *projectile_speed,
                    ny * *projectile_speed,
                    w.enemies.damage[i],
                    ENEMY_SHOT_RADIUS,
                    ENEMY_SHOT_DURATION,
                ));
            }
        }
        BehaviorState::Phase { timer, interval, phased } => {
            *timer -= dt;
            if *timer <= 0.0 {
                *phased = !*phased;
                *timer = *interval;
            }
            let mult = if *phased { PHASE_SPEED_SCALE } else { 1.0 };
            move_towards(&mut w.enemies, i, px, py, speed * mult, dt);
        }
        BehaviorState::Aggressive { dash_timer, dash_cooldown, dashing, dash_vx, dash_vy } => {
            *dash_timer -= dt;
            if *dashing {
                let e = &mut w.enemies;
                e.velocities_x[i]  = *dash_vx;
                e.velocities_y[i]  = *dash_vy;
                e.positions_x[i] += *dash_vx * dt;
                e.positions_y[i] += *dash_vy * dt;
                if *dash_timer <= -DASH_OVERRUN {
                    *dashing    = false;
                    *dash_timer = *dash_cooldown;
                }
            } else if *dash_timer <= 0.0 && dist > DASH_MIN_RANGE && dist < DASH_MAX_RANGE {
                // 発動時点のプレイヤー位置へ向けて固定
                *dashing = true;
                let dash_speed = speed * DASH_SPEED_SCALE;
                *dash_vx = (px - ex) / dist * dash_speed;
                *dash_vy = (py - ey) / dist * dash_speed;
            } else {
                move_towards(&mut w.enemies, i, px, py, speed, dt);
            }
        }
        BehaviorState::Kamikaze { .. } => {
            let mult = if dist < KAMIKAZE_BOOST_RANGE { KAMIKAZE_BOOST } else { 1.0 };
            move_towards(&mut w.enemies, i, px, py, speed * mult, dt);
        }
        BehaviorState::Spawner { timer, interval, spawn, spawned, max_spawns } => {
            w.enemies.velocities_x[i] = 0.0;
            w.enemies.velocities_y[i] = 0.0;
            *timer -= dt;
            if *timer <= 0.0 && *spawned < *max_spawns {
                *timer = *interval;
                *spawned += 1;
                let a = w.rng.next_f32() * TAU;
                w.spawn_queue.push(EnemySpawnRequest {
                    id:    *spawn,
                    x:     ex + a.cos() * SPAWNER_OFFSET,
                    y:     ey + a.sin() * SPAWNER_OFFSET,
                    elite: false,
                });
            }
        }
        BehaviorState::Chase | BehaviorState::Boss => {}
    }
}

/// 敵・ボスが発行したスポーン要求をまとめて配置する。
/// 召喚も人口上限に数えるので、上限かプール満杯を超えた分は捨てる
fn flush_spawn_queue(w: &mut GameWorld) {
    if w.spawn_queue.is_empty() {
        return;
    }
    let cap = w.spawner.population_cap(w.elapsed);
    let requests = std::mem::take(&mut w.spawn_queue);
    let mut placed = 0;
    for req in &requests {
        if w.enemies.regular_count() >= cap {
            break;
        }
        let (x, y) = clamp_to_map(req.x, req.y, w.map_size, SPAWN_MARGIN);
        if w.enemies.spawn_enemy(req.id, x, y, req.elite, w.difficulty).is_none() {
            break;
        }
        placed += 1;
    }
    log::trace!("flushed {}/{} enemy spawn requests", placed, requests.len());
    // バッファを再利用する
    w.spawn_queue = requests;
    w.spawn_queue.clear();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SessionConfig;
    use crate::world::Owner;
    use game_core::entity_params::{CharacterId, EnemyId, MapId};
    use game_core::stats::TalentBonuses;

    fn world() -> GameWorld {
        GameWorld::new(MapId::Station, CharacterId::Commander, TalentBonuses::default(), SessionConfig::default())
    }

    fn spawn_at(w: &mut GameWorld, id: EnemyId, dx: f32, dy: f32) -> usize {
        let (x, y) = (w.player.x + dx, w.player.y + dy);
        w.enemies.spawn_enemy(id, x, y, false, 1.0).unwrap().index()
    }

    #[test]
    fn ranged_backs_off_and_fires_in_range() {
        let mut w = world();
        let i = spawn_at(&mut w, EnemyId::Drone, 100.0, 0.0);
        let x0 = w.enemies.positions_x[i];
        update_enemies(&mut w, 0.1);
        assert!(w.enemies.positions_x[i] > x0);
        assert_eq!(w.projectiles.count, 0);

        for _ in 0..20 {
            update_enemies(&mut w, 0.1);
        }
        assert!(w.projectiles.count >= 1);
        assert_eq!(w.projectiles.owner[0], Owner::Enemy);
        assert!(w.projectiles.velocities_x[0] < 0.0);
    }

    #[test]
    fn ranged_holds_inside_band() {
        let mut w = world();
        let i = spawn_at(&mut w, EnemyId::Drone, 250.0, 0.0);
        let x0 = w.enemies.positions_x[i];
        update_enemies(&mut w, 0.1);
        assert_eq!(w.enemies.positions_x[i], x0);
    }

    #[test]
    fn swarm_noise_does_not_change_progress_toward_player() {
        let mut w = world();
        w.elapsed = 1.3;
        let i = spawn_at(&mut w, EnemyId::Insectoid, 300.0, 0.0);
        let speed = w.enemies.speeds[i];
        let x0 = w.enemies.positions_x[i];
        update_enemies(&mut w, 0.1);
        assert!((x0 - w.enemies.positions_x[i] - speed * 0.1).abs() < 1e-3);
    }

    #[test]
    fn phase_toggles_on_interval() {
        let mut w = world();
        let i = spawn_at(&mut w, EnemyId::Ghost, 400.0, 0.0);
        let BehaviorState::Phase { interval, .. } = w.enemies.behavior[i] else {
            panic!("ghost should phase");
        };
        let steps = (interval / 0.1).ceil() as usize + 1;
        for _ in 0..steps {
            update_enemies(&mut w, 0.1);
        }
        assert!(w.enemies.is_phased(i));
        assert!(!w.enemies.is_targetable(i));
    }

    #[test]
    fn aggressive_dashes_then_overruns_then_cools_down() {
        let mut w = world();
        let i = spawn_at(&mut w, EnemyId::Elite, 200.0, 0.0);
        if let BehaviorState::Aggressive { dash_timer, .. } = &mut w.enemies.behavior[i] {
            *dash_timer = 0.05;
        }
        update_enemies(&mut w, 0.1);
        let BehaviorState::Aggressive { dashing, dash_vx, .. } = w.enemies.behavior[i] else {
            panic!("elite should be aggressive");
        };
        assert!(dashing);
        assert!((dash_vx + w.enemies.speeds[i] * DASH_SPEED_SCALE).abs() < 1e-3);

        for _ in 0..3 {
            update_enemies(&mut w, 0.1);
        }
        let BehaviorState::Aggressive { dashing, dash_timer, dash_cooldown, .. } = w.enemies.behavior[i] else {
            unreachable!()
        };
        assert!(!dashing);
        assert_eq!(dash_timer, dash_cooldown);
    }

    #[test]
    fn spawner_is_stationary_and_respects_max() {
        let mut w = world();
        let i = spawn_at(&mut w, EnemyId::Spawner, 300.0, 300.0);
        let x0 = w.enemies.positions_x[i];
        for _ in 0..400 {
            update_enemies(&mut w, 0.1);
            // 子は毎 tick 片付けてスポーナーだけを観測する
            for j in 0..w.enemies.len() {
                if j != i {
                    w.enemies.kill(j);
                }
            }
        }
        assert_eq!(w.enemies.positions_x[i], x0);
        let BehaviorState::Spawner { spawned, max_spawns, .. } = w.enemies.behavior[i] else {
            panic!("spawner behavior expected");
        };
        assert_eq!(spawned, max_spawns);
    }

    #[test]
    fn spawner_children_appear_next_to_parent() {
        let mut w = world();
        let i = spawn_at(&mut w, EnemyId::Spawner, 300.0, 300.0);
        for _ in 0..31 {
            update_enemies(&mut w, 0.1);
        }
        let child = (0..w.enemies.len()).find(|&j| j != i && w.enemies.alive[j]).unwrap();
        let d = distance(
            w.enemies.positions_x[child],
            w.enemies.positions_y[child],
            w.enemies.positions_x[i],
            w.enemies.positions_y[i],
        );
        // 子はスポーン後 1 tick ぶん移動しうる
        assert!(d <= SPAWNER_OFFSET + w.enemies.speeds[child] * 0.1 + 1e-3);
    }

    #[test]
    fn summons_respect_population_cap() {
        let mut config = SessionConfig::default();
        config.spawn.max_enemies_base = 2;
        let mut w = GameWorld::new(MapId::Station, CharacterId::Commander, TalentBonuses::default(), config);
        spawn_at(&mut w, EnemyId::Spawner, 300.0, 300.0);
        for _ in 0..3 {
            w.spawn_queue.push(EnemySpawnRequest { id: EnemyId::Grunt, x: 100.0, y: 100.0, elite: false });
        }
        flush_spawn_queue(&mut w);
        assert_eq!(w.enemies.regular_count(), 2);
        assert!(w.spawn_queue.is_empty());
    }

    #[test]
    fn stun_freezes_movement_and_timers() {
        let mut w = world();
        let i = spawn_at(&mut w, EnemyId::Drone, 300.0, 0.0);
        let before = w.enemies.behavior[i];
        let x0 = w.enemies.positions_x[i];
        w.enemies.stun(i, 0.35);
        w.enemies.knockback_x[i] = 100.0;
        for _ in 0..3 {
            update_enemies(&mut w, 0.1);
        }
        assert_eq!(w.enemies.behavior[i], before);
        assert_eq!(w.enemies.positions_x[i], x0);
        assert!(w.enemies.stun[i] > 0.0);
        update_enemies(&mut w, 0.1);
        assert_eq!(w.enemies.stun[i], 0.0);
    }

    #[test]
    fn knockback_decays_to_zero() {
        let mut w = world();
        let i = spawn_at(&mut w, EnemyId::Spawner, 300.0, 0.0);
        w.enemies.knockback_x[i] = 50.0;
        let x0 = w.enemies.positions_x[i];
        update_enemies(&mut w, 0.1);
        assert!((w.enemies.positions_x[i] - x0 - 5.0).abs() < 1e-4);
        assert!((w.enemies.knockback_x[i] - 45.0).abs() < 1e-4);
        for _ in 0..60 {
            update_enemies(&mut w, 0.1);
        }
        assert_eq!(w.enemies.knockback_x[i], 0.0);
    }
}
