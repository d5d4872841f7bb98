//! Path: native/game_simulation/src/game_logic/systems/mod.rs
//! Summary: tick の各ステージ（スポーン・敵行動・ボス・武器・弾・接触・死亡処理・アイテム・レベルアップ）

pub(crate) mod boss;
pub(crate) mod collision;
pub(crate) mod damage;
pub(crate) mod enemy_ai;
pub(crate) mod items;
pub mod leveling;
pub mod projectiles;
pub mod spawn;
pub mod weapons;
