//! Path: native/game_simulation/src/world/mod.rs
//! Summary: ワールド型（PlayerState, EnemyWorld, ProjectileWorld, ItemWorld, ChestWorld, BossState, GameWorld）

mod boss;
mod chest;
mod enemy;
mod frame_event;
mod game_world;
mod handle;
mod item;
mod player;
mod projectile;
mod weapon_effect;

pub use boss::{phase_for_ratio, AttackStage, BossState, PhaseChange};
pub use chest::{Chest, ChestWorld};
pub use enemy::{BehaviorState, EnemyKind, EnemyWorld};
pub use frame_event::{AudioCue, FrameEvent};
pub use game_world::{GameWorld, Outcome, SessionPhase};
pub use handle::{EnemyHandle, ProjectileHandle};
pub use item::{Attraction, ItemWorld};
pub use player::{DamageOutcome, PlayerState, WeaponInstance, WeaponState};
pub use projectile::{Motion, Owner, ProjectileConfig, ProjectileWorld};
pub use weapon_effect::WeaponEffect;
