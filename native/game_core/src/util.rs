//! Path: native/game_core/src/util.rs
//! Summary: 距離・角度・正規化・円衝突・旋回・マップクランプ・スポーン位置などの共通ユーティリティ

use crate::constants::LEVEL_UP_XP_PERCENT;
use crate::physics::rng::SimpleRng;
use std::f32::consts::{PI, TAU};

/// 二乗距離（sqrt を避けて高速化）
#[inline]
pub fn distance_sq(x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    let dx = x1 - x2;
    let dy = y1 - y2;
    dx * dx + dy * dy
}

#[inline]
pub fn distance(x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    distance_sq(x1, y1, x2, y2).sqrt()
}

/// (x1, y1) から (x2, y2) への角度（ラジアン）
#[inline]
pub fn angle_to(x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    (y2 - y1).atan2(x2 - x1)
}

/// 単位ベクトル化。長さ 0 のときは None（NaN を外に出さない）
#[inline]
pub fn normalize(dx: f32, dy: f32) -> Option<(f32, f32)> {
    let len = (dx * dx + dy * dy).sqrt();
    if len > f32::EPSILON && len.is_finite() {
        Some((dx / len, dy / len))
    } else {
        None
    }
}

/// 円-円の重なり判定（境界に接するだけの場合は重ならない）
#[inline]
pub fn circles_overlap(x1: f32, y1: f32, r1: f32, x2: f32, y2: f32, r2: f32) -> bool {
    let r = r1 + r2;
    distance_sq(x1, y1, x2, y2) < r * r
}

/// 角度を [-PI, PI] に正規化する
pub fn wrap_angle(angle: f32) -> f32 {
    let mut a = angle % TAU;
    if a > PI {
        a -= TAU;
    } else if a < -PI {
        a += TAU;
    }
    a
}

/// `current` を `target` へ最大 `max_turn` ラジアンだけ回す（瞬間的なスナップはしない）
pub fn turn_towards(current: f32, target: f32, max_turn: f32) -> f32 {
    let diff = wrap_angle(target - current);
    current + diff.clamp(-max_turn, max_turn)
}

/// 点 (px, py) から線分 (ax, ay)-(bx, by) への二乗距離（ビーム判定用）
pub fn point_segment_distance_sq(px: f32, py: f32, ax: f32, ay: f32, bx: f32, by: f32) -> f32 {
    let abx = bx - ax;
    let aby = by - ay;
    let len_sq = abx * abx + aby * aby;
    if len_sq <= f32::EPSILON {
        return distance_sq(px, py, ax, ay);
    }
    let t = (((px - ax) * abx + (py - ay) * aby) / len_sq).clamp(0.0, 1.0);
    distance_sq(px, py, ax + abx * t, ay + aby * t)
}

/// 座標をマップ [margin, size - margin] に収める
#[inline]
pub fn clamp_to_map(x: f32, y: f32, map_size: f32, margin: f32) -> (f32, f32) {
    let hi = (map_size - margin).max(margin);
    (x.clamp(margin, hi), y.clamp(margin, hi))
}

/// プレイヤー周囲の円環 [min_dist, max_dist) 上のランダム位置
pub fn spawn_position_around_player(
    rng: &mut SimpleRng,
    player_x: f32,
    player_y: f32,
    min_dist: f32,
    max_dist: f32,
) -> (f32, f32) {
    let angle = rng.next_f32() * TAU;
    let dist = rng.range_f32(min_dist, max_dist);
    (
        player_x + angle.cos() * dist,
        player_y + angle.sin() * dist,
    )
}

/// 次のレベルに必要な経験値（現在値 × 1.15 の切り捨て）
pub fn next_xp_threshold(current: u32) -> u32 {
    let next = current as u64 * LEVEL_UP_XP_PERCENT as u64 / 100;
    next.min(u32::MAX as u64) as u32
}

/// レベル表参照。`level` は 1 始まり。空の表は `default`、範囲外は末尾要素
pub fn level_entry<T: Copy>(table: &[T], level: u32, default: T) -> T {
    if table.is_empty() {
        return default;
    }
    let idx = (level.max(1) as usize - 1).min(table.len() - 1);
    table[idx]
}
