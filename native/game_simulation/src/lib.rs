//! Path: native/game_simulation/src/lib.rs
//! Summary: モジュール宣言と公開 API（Session・ワールド型・各システムの純関数）

pub mod config;
mod error;
mod game_logic;
mod render_snapshot;
mod session;
pub mod world;

pub use config::{SessionConfig, SpawnConfig};
pub use error::UpgradeError;
pub use game_logic::systems::leveling::{apply_upgrade, compute_upgrade_choices, UpgradeChoice};
pub use game_logic::systems::projectiles::{step_projectiles, Explosion, ProjectileHit, ProjectileOutput};
pub use game_logic::systems::spawn::{BossSpawnRequest, EnemySpawnRequest, SpawnOutput, Spawner};
pub use game_logic::systems::weapons::{fire_weapons, weapon_damage, DirectHit, WeaponContext, WeaponOutput};
pub use game_logic::{find_nearest_enemy, find_nearest_enemy_spatial, find_nearest_enemy_within, update_chase_ai};
pub use render_snapshot::{
    build_render_snapshot, BossHudInfo, EnemySprite, HudData, ItemSprite, PlayerSprite, ProjectileSprite,
    RenderSnapshot,
};
pub use session::{Session, TickInput};
pub use world::{
    AudioCue, BossState, EnemyHandle, EnemyKind, EnemyWorld, FrameEvent, GameWorld, Outcome, PlayerState,
    ProjectileConfig, ProjectileWorld, SessionPhase, WeaponEffect,
};
