//! Path: native/game_simulation/src/world/weapon_effect.rs
//! Summary: 継続武器・雷撃の描画用エフェクト（毎 tick 作り直して RenderSnapshot に載せる）

use game_core::entity_params::WeaponId;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum WeaponEffect {
    /// force_field の円
    Aura  { weapon: WeaponId, x: f32, y: f32, radius: f32 },
    /// flamethrower の扇形（`half_angle` はラジアン）
    Cone  { weapon: WeaponId, x: f32, y: f32, facing: f32, half_angle: f32, range: f32 },
    Beam  { weapon: WeaponId, x1: f32, y1: f32, x2: f32, y2: f32, width: f32 },
    Orb   { weapon: WeaponId, x: f32, y: f32, radius: f32 },
    /// 雷撃チェーンの 1 区間
    Arc   { weapon: WeaponId, x1: f32, y1: f32, x2: f32, y2: f32 },
}
