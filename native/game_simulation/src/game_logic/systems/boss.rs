use super::enemy_ai::move_towards;
use super::spawn::{BossSpawnRequest, EnemySpawnRequest};
use crate::world::{AttackStage, BossState, FrameEvent, GameWorld, ProjectileConfig};
use game_core::constants::{
    BOSS_ATTACK_DURATION, BOSS_CHARGE_SPEED_MULT, BOSS_ENRAGE_COOLDOWN_MULT, BOSS_ENRAGE_SPEED_MULT,
    BOSS_FIELD_SHOTS, BOSS_FIELD_SPEED, BOSS_HACK_SPEED, BOSS_HACK_SPREAD, BOSS_LASER_DAMAGE_RATIO,
    BOSS_LASER_DURATION, BOSS_LASER_INTERVAL, BOSS_LASER_OFFSET, BOSS_LASER_RADIUS, BOSS_LASER_SPEED,
    BOSS_LASER_SPIN, BOSS_PHASE_SPEED_MULT, BOSS_RING_GAP, BOSS_SHOT_DURATION, BOSS_SHOT_RADIUS,
    BOSS_SHOT_SPEED, BOSS_SHOT_SPREAD, BOSS_SUMMON_DISTANCE, BOSS_TELEPORT_DISTANCE,
};
use game_core::entity_params::{BossAttack, EnemyId};
use game_core::util::{angle_to, clamp_to_map, normalize};
use std::f32::consts::TAU;

/// 攻撃の副作用（ボス状態の借用を外してから適用する）
#[derive(Default)]
struct AttackOutput {
    shots:  Vec<ProjectileConfig>,
    spawns: Vec<EnemySpawnRequest>,
    /// 移動後の位置
    moved:  Option<(f32, f32)>,
}

/// ボスを配置して BossSpawned を発行する。プールが満杯なら何もしない
pub(crate) fn spawn_boss(w: &mut GameWorld, req: BossSpawnRequest) {
    if w.enemies.spawn_boss(req.id, req.x, req.y, w.difficulty).is_some() {
        log::info!("boss spawned: {:?} at ({:.0}, {:.0})", req.id, req.x, req.y);
        w.frame_events.push(FrameEvent::BossSpawned { boss: req.id });
    }
}

/// ボス 1 体分の更新: フェーズ判定 → 攻撃タイマー → 攻撃実行（なければ追跡）
pub(crate) fn update_boss(w: &mut GameWorld, i: usize, dt: f32) {
    let Some(mut state) = w.enemies.boss[i].take() else {
        return;
    };

    let ratio = w.enemies.hp[i] / w.enemies.max_hp[i].max(1.0);
    let change = state.update_phase(ratio);
    if change.advanced > 0 {
        w.enemies.speeds[i] *= BOSS_PHASE_SPEED_MULT.powi(change.advanced as i32);
    }
    if change.enraged {
        w.enemies.speeds[i] *= BOSS_ENRAGE_SPEED_MULT;
        state.attack_cooldown *= BOSS_ENRAGE_COOLDOWN_MULT;
        log::info!("boss {:?} enraged", state.id);
    }
    if change.advanced > 0 || change.enraged {
        w.frame_events.push(FrameEvent::BossPhaseChanged {
            boss:    state.id,
            phase:   state.phase,
            enraged: state.enraged,
        });
    }

    state.attack_timer -= dt;
    if state.attack_timer <= 0.0 && state.attack.is_none() {
        let pool = state.id.params().attack_pool();
        state.attack = w.rng.pick(pool).copied();
        state.attack_remaining = BOSS_ATTACK_DURATION;
        state.stage = AttackStage::Starting;
        state.laser_timer = 0.0;
        log::trace!("boss {:?} starts {:?}", state.id, state.attack);
    }

    let out = match state.attack {
        Some(attack) => execute_attack(w, i, &mut state, attack, dt),
        None => {
            let speed = w.enemies.speeds[i];
            move_towards(&mut w.enemies, i, w.player.x, w.player.y, speed, dt);
            AttackOutput::default()
        }
    };

    if state.attack.is_some() && state.attack_remaining <= 0.0 {
        state.attack = None;
        state.stage = AttackStage::Starting;
        state.attack_timer = state.attack_cooldown;
    }
    w.enemies.boss[i] = Some(state);

    if let Some((x, y)) = out.moved {
        w.enemies.positions_x[i] = x;
        w.enemies.positions_y[i] = y;
    }
    for shot in out.shots {
        w.projectiles.spawn(shot);
    }
    w.spawn_queue.extend(out.spawns);
}

fn execute_attack(w: &mut GameWorld, i: usize, state: &mut BossState, attack: BossAttack, dt: f32) -> AttackOutput {
    let mut out = AttackOutput::default();
    state.attack_remaining -= dt;

    let bx = w.enemies.positions_x[i];
    let by = w.enemies.positions_y[i];
    let (px, py) = (w.player.x, w.player.y);
    let damage = w.enemies.damage[i];
    let radius = w.enemies.radius[i];
    let phase = state.phase;

    match attack {
        BossAttack::SpawnSwarm | BossAttack::SpawnDrones if state.stage == AttackStage::Starting => {
            let (id, count) = if attack == BossAttack::SpawnSwarm {
                (EnemyId::Insectoid, 5 + 2 * phase)
            } else {
                (EnemyId::Drone, 2 + phase)
            };
            let dist = radius + BOSS_RING_GAP;
            for k in 0..count {
                let a = k as f32 / count as f32 * TAU;
                out.spawns.push(EnemySpawnRequest {
                    id,
                    x: bx + a.cos() * dist,
                    y: by + a.sin() * dist,
                    elite: false,
                });
            }
            state.stage = AttackStage::Executing;
        }
        BossAttack::AcidSpit | BossAttack::Missiles => {
            if state.attack_remaining > 1.5 && state.stage != AttackStage::Fired {
                aimed_burst(&mut out, bx, by, px, py, 3 + phase, BOSS_SHOT_SPREAD, BOSS_SHOT_SPEED, damage);
                state.stage = AttackStage::Fired;
            }
        }
        BossAttack::HackProjectiles if state.stage == AttackStage::Starting => {
            aimed_burst(&mut out, bx, by, px, py, 2 + phase, BOSS_HACK_SPREAD, BOSS_HACK_SPEED, damage);
            state.stage = AttackStage::Fired;
        }
        BossAttack::Charge | BossAttack::Stomp => match state.stage {
            AttackStage::Starting => {
                let speed = w.enemies.speeds[i] * BOSS_CHARGE_SPEED_MULT;
                let (nx, ny) = normalize(px - bx, py - by).unwrap_or((0.0, 0.0));
                state.charge_vx = nx * speed;
                state.charge_vy = ny * speed;
                state.stage = AttackStage::Charging;
            }
            AttackStage::Charging => {
                w.enemies.velocities_x[i] = state.charge_vx;
                w.enemies.velocities_y[i] = state.charge_vy;
                out.moved = Some((bx + state.charge_vx * dt, by + state.charge_vy * dt));
            }
            _ => {}
        },
        BossAttack::LaserSweep => {
            state.laser_timer -= dt;
            if state.attack_remaining > 1.0 && state.laser_timer <= 0.0 {
                state.laser_timer = BOSS_LASER_INTERVAL;
                let a = (w.elapsed * BOSS_LASER_SPIN) % TAU;
                out.shots.push(ProjectileConfig::enemy_shot(
                    bx + a.cos() * BOSS_LASER_OFFSET,
                    by + a.sin() * BOSS_LASER_OFFSET,
                    a.cos() * BOSS_LASER_SPEED,
                    a.sin() * BOSS_LASER_SPEED,
                    damage * BOSS_LASER_DAMAGE_RATIO,
                    BOSS_LASER_RADIUS,
                    BOSS_LASER_DURATION,
                ));
            }
        }
        BossAttack::SummonElites if state.stage == AttackStage::Starting => {
            for _ in 0..2 {
                let a = w.rng.next_f32() * TAU;
                out.spawns.push(EnemySpawnRequest {
                    id:    EnemyId::Elite,
                    x:     bx + a.cos() * BOSS_SUMMON_DISTANCE,
                    y:     by + a.sin() * BOSS_SUMMON_DISTANCE,
                    elite: true,
                });
            }
            state.stage = AttackStage::Done;
        }
        BossAttack::Teleport if state.stage == AttackStage::Starting => {
            let a = w.rng.next_f32() * TAU;
            out.moved = Some(clamp_to_map(
                px + a.cos() * BOSS_TELEPORT_DISTANCE,
                py + a.sin() * BOSS_TELEPORT_DISTANCE,
                w.map_size,
                radius,
            ));
            state.stage = AttackStage::Done;
        }
        BossAttack::PsychicBlast | BossAttack::ElectricField if state.stage == AttackStage::Starting => {
            let (count, speed) = if attack == BossAttack::PsychicBlast {
                (8 + 2 * phase, BOSS_SHOT_SPEED)
            } else {
                (BOSS_FIELD_SHOTS, BOSS_FIELD_SPEED)
            };
            for k in 0..count {
                let a = k as f32 / count as f32 * TAU;
                out.shots.push(ProjectileConfig::enemy_shot(
                    bx,
                    by,
                    a.cos() * speed,
                    a.sin() * speed,
                    damage,
                    BOSS_SHOT_RADIUS,
                    BOSS_SHOT_DURATION,
                ));
            }
            state.stage = AttackStage::Fired;
        }
        _ => {}
    }
    out
}

/// プレイヤーへ向けた扇状の連射
#[allow(clippy::too_many_arguments)]
fn aimed_burst(
    out: &mut AttackOutput,
    bx: f32,
    by: f32,
    px: f32,
    py: f32,
    count: u32,
    spread: f32,
    speed: f32,
    damage: f32,
) {
    let base = angle_to(bx, by, px, py);
    for k in 0..count {
        let a = base + (k as f32 - (count - 1) as f32 / 2.0) * spread;
        out.shots.push(ProjectileConfig::enemy_shot(
            bx,
            by,
            a.cos() * speed,
            a.sin() * speed,
            damage,
            BOSS_SHOT_RADIUS,
            BOSS_SHOT_DURATION,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SessionConfig;
    use crate::world::Owner;
    use game_core::entity_params::{BossId, CharacterId, MapId};
    use game_core::stats::TalentBonuses;

    fn world_with_boss(id: BossId) -> (GameWorld, usize) {
        let mut w = GameWorld::new(MapId::Station, CharacterId::Commander, TalentBonuses::default(), SessionConfig::default());
        let h = w.enemies.spawn_boss(id, w.player.x + 300.0, w.player.y, 1.0).unwrap();
        (w, h.index())
    }

    fn force_attack(w: &mut GameWorld, i: usize, attack: BossAttack) {
        if let Some(s) = w.enemies.boss[i].as_mut() {
            s.attack = Some(attack);
            s.attack_remaining = BOSS_ATTACK_DURATION;
            s.stage = AttackStage::Starting;
            s.attack_timer = 10.0;
        }
    }

    #[test]
    fn three_phase_boss_scenario() {
        let (mut w, i) = world_with_boss(BossId::HiveQueen);
        let base_speed = w.enemies.speeds[i];
        let max = w.enemies.max_hp[i];

        w.enemies.hp[i] = max * 0.67;
        update_boss(&mut w, i, 0.01);
        assert_eq!(w.enemies.boss[i].as_ref().unwrap().phase, 1);

        w.enemies.hp[i] = max * 0.666;
        update_boss(&mut w, i, 0.01);
        let s = w.enemies.boss[i].as_ref().unwrap();
        assert_eq!(s.phase, 2);
        assert!(!s.enraged);
        assert!((w.enemies.speeds[i] - base_speed * 1.1).abs() < 1e-4);

        w.enemies.hp[i] = max * 0.333;
        update_boss(&mut w, i, 0.01);
        let s = w.enemies.boss[i].as_ref().unwrap();
        assert_eq!(s.phase, 3);
        assert!(s.enraged);
        assert!((s.attack_cooldown - 1.5).abs() < 1e-6);
        assert!((w.enemies.speeds[i] - base_speed * 1.1 * 1.1 * 1.5).abs() < 1e-3);

        let enrage_events = w
            .frame_events
            .iter()
            .filter(|e| matches!(e, FrameEvent::BossPhaseChanged { enraged: true, .. }))
            .count();
        assert_eq!(enrage_events, 1);
    }

    #[test]
    fn attack_starts_after_timer_and_ends_after_duration() {
        let (mut w, i) = world_with_boss(BossId::HiveQueen);
        update_boss(&mut w, i, 1.0);
        assert!(w.enemies.boss[i].as_ref().unwrap().attack.is_none());
        update_boss(&mut w, i, 1.0);
        assert!(w.enemies.boss[i].as_ref().unwrap().attack.is_some());
        for _ in 0..25 {
            update_boss(&mut w, i, 0.1);
        }
        let s = w.enemies.boss[i].as_ref().unwrap();
        assert!(s.attack.is_none());
        assert!(s.attack_timer > 0.0);
    }

    #[test]
    fn spawn_swarm_rings_insectoids_once() {
        let (mut w, i) = world_with_boss(BossId::HiveQueen);
        force_attack(&mut w, i, BossAttack::SpawnSwarm);
        update_boss(&mut w, i, 0.1);
        update_boss(&mut w, i, 0.1);
        assert_eq!(w.spawn_queue.len(), 7);
        assert!(w.spawn_queue.iter().all(|r| r.id == EnemyId::Insectoid));
    }

    #[test]
    fn acid_spit_fires_aimed_fan_once() {
        let (mut w, i) = world_with_boss(BossId::HiveQueen);
        force_attack(&mut w, i, BossAttack::AcidSpit);
        update_boss(&mut w, i, 0.1);
        update_boss(&mut w, i, 0.1);
        assert_eq!(w.projectiles.count, 4);
        for p in 0..w.projectiles.len() {
            assert_eq!(w.projectiles.owner[p], Owner::Enemy);
            // プレイヤーは -x 方向
            assert!(w.projectiles.velocities_x[p] < 0.0);
        }
    }

    #[test]
    fn charge_moves_only_after_windup() {
        let (mut w, i) = world_with_boss(BossId::HiveQueen);
        force_attack(&mut w, i, BossAttack::Charge);
        let x0 = w.enemies.positions_x[i];
        update_boss(&mut w, i, 0.1);
        assert_eq!(w.enemies.positions_x[i], x0);
        update_boss(&mut w, i, 0.1);
        let speed = w.enemies.speeds[i] * BOSS_CHARGE_SPEED_MULT;
        assert!((x0 - w.enemies.positions_x[i] - speed * 0.1).abs() < 1e-3);
    }

    #[test]
    fn teleport_lands_near_player() {
        let (mut w, i) = world_with_boss(BossId::XenoOverlord);
        force_attack(&mut w, i, BossAttack::Teleport);
        update_boss(&mut w, i, 0.1);
        let d = game_core::util::distance(w.enemies.positions_x[i], w.enemies.positions_y[i], w.player.x, w.player.y);
        assert!((d - BOSS_TELEPORT_DISTANCE).abs() < 1e-2);
    }
}
