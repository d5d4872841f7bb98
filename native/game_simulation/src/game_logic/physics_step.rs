//! Path: native/game_simulation/src/game_logic/physics_step.rs
//! Summary: 1 tick の固定順序（プレイヤー → スポーン → 敵 → 接触 → 武器 → 弾 → 死亡 → アイテム → 終了判定）

use super::systems::boss::spawn_boss;
use super::systems::collision::resolve_player_contacts;
use super::systems::damage::resolve_deaths;
use super::systems::enemy_ai::update_enemies;
use super::systems::items::{update_chests, update_items};
use super::systems::leveling::check_level_up;
use super::systems::projectiles::update_projectiles;
use super::systems::weapons::update_weapons;
use crate::world::{FrameEvent, GameWorld, Outcome, SessionPhase};
use game_core::constants::PLAYER_RADIUS;
use game_core::util::{clamp_to_map, normalize};

/// 物理ステップの内部実装。`dt` は `max_dt` で頭打ちにする（フレーム落ち時の暴走防止）
pub(crate) fn physics_step_inner(w: &mut GameWorld, dt: f32) {
    let dt = if dt.is_finite() { dt.clamp(0.0, w.max_dt) } else { 0.0 };
    // trace にしておき、RUST_LOG=trace のときだけ毎フレーム出力
    log::trace!("physics_step: dt={:.4}s frame_id={} enemies={}", dt, w.frame_id, w.enemies.count);

    // イベントは直近 1 tick 分だけ保持する
    w.frame_events.clear();
    w.frame_id = w.frame_id.wrapping_add(1);
    w.elapsed += dt;

    move_player(w, dt);
    update_spawner(w, dt);
    update_enemies(w, dt);

    // 敵の移動が終わってから空間ハッシュを作り直す
    w.rebuild_collision();
    resolve_player_contacts(w);

    update_weapons(w, dt);
    update_projectiles(w, dt);
    resolve_deaths(w);

    update_items(w, dt);
    // ニュークで倒れた敵を同じ tick で片付ける
    resolve_deaths(w);
    update_chests(w);

    check_session_end(w);
    check_level_up(w);
}

fn move_player(w: &mut GameWorld, dt: f32) {
    let map_size = w.map_size;
    let p = &mut w.player;
    // 斜め移動を正規化して速度を一定に保つ
    if let Some((nx, ny)) = normalize(p.input_dx, p.input_dy) {
        p.x += nx * p.stats.speed * dt;
        p.y += ny * p.stats.speed * dt;
        p.facing = ny.atan2(nx);
    }
    let (x, y) = clamp_to_map(p.x, p.y, map_size, PLAYER_RADIUS);
    p.x = x;
    p.y = y;
    p.tick_timers(dt);
}

/// スポーナーの要求を反映する。ボスは人口上限の対象外
fn update_spawner(w: &mut GameWorld, dt: f32) {
    let population = w.enemies.regular_count();
    let out = w.spawner.tick(dt, w.elapsed, w.player.x, w.player.y, population, &mut w.rng);
    if let Some(req) = out.boss {
        spawn_boss(w, req);
    }
    let difficulty = w.difficulty;
    for req in out.enemies {
        if w.enemies.spawn_enemy(req.id, req.x, req.y, req.elite, difficulty).is_none() {
            break;
        }
    }
}

/// 死亡（復活判定はダメージ時に済んでいる）と時間切れ勝利
fn check_session_end(w: &mut GameWorld) {
    let outcome = if w.player.is_dead() {
        Outcome::Defeat
    } else if w.elapsed >= w.duration {
        Outcome::Victory
    } else {
        return;
    };
    w.phase = SessionPhase::Ended(outcome);
    w.upgrade_choices.clear();
    w.pending_upgrades = 0;
    let victory = outcome == Outcome::Victory;
    log::info!(
        "session ended: {} at {:.1}s (kills={}, level={})",
        if victory { "victory" } else { "defeat" },
        w.elapsed,
        w.kills,
        w.player.level
    );
    w.frame_events.push(FrameEvent::SessionEnded { victory });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SessionConfig;
    use game_core::entity_params::{CharacterId, DropKind, EnemyId, MapId};
    use game_core::stats::TalentBonuses;

    fn world() -> GameWorld {
        GameWorld::new(MapId::Station, CharacterId::Commander, TalentBonuses::default(), SessionConfig::default())
    }

    #[test]
    fn dt_is_clamped_and_bad_dt_is_ignored() {
        let mut w = world();
        physics_step_inner(&mut w, 5.0);
        assert!((w.elapsed - w.max_dt).abs() < 1e-6);
        physics_step_inner(&mut w, f32::NAN);
        physics_step_inner(&mut w, -1.0);
        assert!((w.elapsed - w.max_dt).abs() < 1e-6);
        assert_eq!(w.frame_id, 3);
    }

    #[test]
    fn player_moves_at_stat_speed_and_faces_input() {
        let mut w = world();
        let x0 = w.player.x;
        w.player.input_dx = 1.0;
        w.player.input_dy = 0.0;
        move_player(&mut w, 0.1);
        assert!((w.player.x - (x0 + w.player.stats.speed * 0.1)).abs() < 1e-3);
        assert_eq!(w.player.facing, 0.0);
    }

    #[test]
    fn player_is_kept_inside_map() {
        let mut w = world();
        w.player.x = 5.0;
        w.player.y = w.map_size + 100.0;
        move_player(&mut w, 0.016);
        assert_eq!(w.player.x, PLAYER_RADIUS);
        assert_eq!(w.player.y, w.map_size - PLAYER_RADIUS);
    }

    #[test]
    fn reaching_duration_is_victory() {
        let mut w = world();
        w.elapsed = w.duration - 0.01;
        physics_step_inner(&mut w, 0.05);
        assert_eq!(w.phase, SessionPhase::Ended(Outcome::Victory));
        assert!(w.frame_events.contains(&FrameEvent::SessionEnded { victory: true }));
    }

    #[test]
    fn nuke_kills_are_resolved_in_the_same_tick() {
        let mut w = world();
        let (px, py) = (w.player.x, w.player.y);
        let grunt = w.enemies.spawn_enemy(EnemyId::Grunt, px + 300.0, py, false, 1.0).unwrap();
        w.items.spawn(px, py, DropKind::Nuke, 0);
        physics_step_inner(&mut w, 0.016);
        assert!(w.enemies.resolve(grunt).is_none());
        assert!(w.kills >= 1);
        assert!(w
            .frame_events
            .iter()
            .any(|e| matches!(e, FrameEvent::EnemyKilled { enemy: EnemyId::Grunt, .. })));
    }

    #[test]
    fn events_only_cover_the_latest_tick() {
        let mut w = world();
        w.frame_events.push(FrameEvent::LevelUp { new_level: 99 });
        physics_step_inner(&mut w, 0.016);
        assert!(!w.frame_events.contains(&FrameEvent::LevelUp { new_level: 99 }));
    }

    #[test]
    fn death_is_defeat() {
        let mut w = world();
        w.player.hp = 0.0;
        check_session_end(&mut w);
        assert_eq!(w.phase, SessionPhase::Ended(Outcome::Defeat));
    }
}
