//! Path: native/game_simulation/src/game_logic/mod.rs
//! Summary: 物理ステップ・Chase AI・各システム・イベント drain

mod chase_ai;
mod events;
mod physics_step;
pub mod systems;

pub use chase_ai::{find_nearest_enemy, find_nearest_enemy_spatial, find_nearest_enemy_within, update_chase_ai};
pub(crate) use events::drain_frame_events_inner;
pub(crate) use physics_step::physics_step_inner;
