//! Path: native/game_simulation/src/world/frame_event.rs
//! Summary: フレーム内で発生したゲームイベント（オーディオ・UI 層へ drain して渡す）

use game_core::entity_params::{BossId, DropKind, EnemyId, WeaponId};
use serde::Serialize;

/// オーディオ層へ渡す再生キュー（fire-and-forget）
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioCue {
    Hit,
    Explosion,
    LevelUp,
    Pickup,
    BossSpawn,
    Death,
}

/// フレーム内で発生したゲームイベント
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum FrameEvent {
    EnemyKilled      { enemy: EnemyId, elite: bool, weapon: Option<WeaponId> },
    EnemyHit         { damage: f32, crit: bool },
    Explosion        { x: f32, y: f32, radius: f32 },
    PlayerDamaged    { damage: f32 },
    PlayerRevived,
    LevelUp          { new_level: u32 },
    ItemPickup       { kind: DropKind },
    BossSpawned      { boss: BossId },
    BossPhaseChanged { boss: BossId, phase: u32, enraged: bool },
    BossDefeated     { boss: BossId },
    ChestOpened      { gold: u32, upgrades: u32 },
    WeaponEvolved    { from: WeaponId, to: WeaponId },
    SessionEnded     { victory: bool },
}

impl FrameEvent {
    pub fn audio_cue(&self) -> Option<AudioCue> {
        match self {
            Self::EnemyHit { .. } | Self::PlayerDamaged { .. } => Some(AudioCue::Hit),
            Self::Explosion { .. } | Self::BossDefeated { .. } => Some(AudioCue::Explosion),
            Self::LevelUp { .. } | Self::WeaponEvolved { .. } => Some(AudioCue::LevelUp),
            Self::ItemPickup { .. } | Self::ChestOpened { .. } | Self::PlayerRevived => Some(AudioCue::Pickup),
            Self::BossSpawned { .. } => Some(AudioCue::BossSpawn),
            Self::SessionEnded { victory: false } => Some(AudioCue::Death),
            Self::EnemyKilled { .. } | Self::BossPhaseChanged { .. } | Self::SessionEnded { .. } => None,
        }
    }
}
