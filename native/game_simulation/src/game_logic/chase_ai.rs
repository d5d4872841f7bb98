//! Path: native/game_simulation/src/game_logic/chase_ai.rs
//! Summary: chase 型の敵の移動（rayon 並列）と最近接探索（find_nearest_*）

use crate::world::{BehaviorState, EnemyWorld};
use game_core::physics::spatial_hash::SpatialHash;
use game_core::util::distance_sq;
use rayon::prelude::*;

/// 最近接の命中可能な敵インデックスを返す（全探索）
pub fn find_nearest_enemy(enemies: &EnemyWorld, px: f32, py: f32) -> Option<usize> {
    let mut min_dist = f32::MAX;
    let mut nearest  = None;
    for i in 0..enemies.len() {
        if !enemies.is_targetable(i) {
            continue;
        }
        let dist = distance_sq(enemies.positions_x[i], enemies.positions_y[i], px, py);
        if dist < min_dist {
            min_dist = dist;
            nearest  = Some(i);
        }
    }
    nearest
}

/// 半径内の最近接（半径外は見ない）。ホーミングの再捕捉用
pub fn find_nearest_enemy_within(
    spatial: &SpatialHash,
    enemies: &EnemyWorld,
    px: f32,
    py: f32,
    radius: f32,
    buf: &mut Vec<usize>,
) -> Option<usize> {
    spatial.query_nearby_into(px, py, radius, buf);
    let r_sq = radius * radius;
    buf.iter()
        .copied()
        .filter(|&i| i < enemies.len() && enemies.is_targetable(i))
        .map(|i| (i, distance_sq(enemies.positions_x[i], enemies.positions_y[i], px, py)))
        .filter(|&(_, d)| d < r_sq)
        .min_by(|(_, da), (_, db)| da.total_cmp(db))
        .map(|(i, _)| i)
}

/// Spatial Hash を使った高速最近接探索
/// search_radius 内に候補がいなければ全探索にフォールバック
pub fn find_nearest_enemy_spatial(
    spatial: &SpatialHash,
    enemies: &EnemyWorld,
    px: f32,
    py: f32,
    search_radius: f32,
    buf: &mut Vec<usize>,
) -> Option<usize> {
    find_nearest_enemy_within(spatial, enemies, px, py, search_radius, buf)
        .or_else(|| find_nearest_enemy(enemies, px, py))
}

/// Chase AI: chase 型の敵をプレイヤーに向けて移動（rayon で並列化）。
/// スタン中の敵と他の行動タグは enemy_ai 側で処理する
pub fn update_chase_ai(enemies: &mut EnemyWorld, player_x: f32, player_y: f32, dt: f32) {
    let len = enemies.len();
    let positions_x  = &mut enemies.positions_x[..len];
    let positions_y  = &mut enemies.positions_y[..len];
    let velocities_x = &mut enemies.velocities_x[..len];
    let velocities_y = &mut enemies.velocities_y[..len];
    let speeds       = &enemies.speeds[..len];
    let alive        = &enemies.alive[..len];
    let behavior     = &enemies.behavior[..len];
    let stun         = &enemies.stun[..len];

    (
        positions_x,
        positions_y,
        velocities_x,
        velocities_y,
        speeds,
        alive,
        behavior,
        stun,
    )
        .into_par_iter()
        .for_each(|(px, py, vx, vy, speed, is_alive, tag, stun)| {
            if !*is_alive || *stun > 0.0 || !matches!(tag, BehaviorState::Chase) {
                return;
            }
            let dx   = player_x - *px;
            let dy   = player_y - *py;
            let dist = (dx * dx + dy * dy).sqrt();
            if dist <= 0.0 {
                *vx = 0.0;
                *vy = 0.0;
                return;
            }
            *vx  = (dx / dist) * speed;
            *vy  = (dy / dist) * speed;
            *px += *vx * dt;
            *py += *vy * dt;
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::entity_params::EnemyId;

    #[test]
    fn chase_moves_only_chase_tag_and_skips_stunned() {
        let mut w = EnemyWorld::new(4);
        w.spawn_enemy(EnemyId::Grunt, 100.0, 0.0, false, 1.0);
        w.spawn_enemy(EnemyId::Grunt, 0.0, 100.0, false, 1.0);
        w.spawn_enemy(EnemyId::Drone, -100.0, 0.0, false, 1.0);
        w.stun(1, 0.5);
        update_chase_ai(&mut w, 0.0, 0.0, 0.5);
        assert!((w.positions_x[0] - 70.0).abs() < 1e-4);
        assert_eq!(w.positions_y[1], 100.0);
        assert_eq!(w.positions_x[2], -100.0);
    }

    #[test]
    fn nearest_skips_dead_and_phased() {
        let mut w = EnemyWorld::new(4);
        w.spawn_enemy(EnemyId::Grunt, 10.0, 0.0, false, 1.0);
        w.spawn_enemy(EnemyId::Ghost, 5.0, 0.0, false, 1.0);
        w.spawn_enemy(EnemyId::Grunt, 50.0, 0.0, false, 1.0);
        if let BehaviorState::Phase { phased, .. } = &mut w.behavior[1] {
            *phased = true;
        }
        assert_eq!(find_nearest_enemy(&w, 0.0, 0.0), Some(0));
        w.kill(0);
        assert_eq!(find_nearest_enemy(&w, 0.0, 0.0), Some(2));
    }

    #[test]
    fn spatial_search_falls_back_to_full_scan() {
        let mut w = EnemyWorld::new(2);
        w.spawn_enemy(EnemyId::Grunt, 2000.0, 2000.0, false, 1.0);
        let mut hash = SpatialHash::new(80.0);
        hash.insert(0, 2000.0, 2000.0);
        let mut buf = Vec::new();
        assert_eq!(find_nearest_enemy_within(&hash, &w, 0.0, 0.0, 400.0, &mut buf), None);
        assert_eq!(find_nearest_enemy_spatial(&hash, &w, 0.0, 0.0, 400.0, &mut buf), Some(0));
    }
}
