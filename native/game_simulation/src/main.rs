//! Path: native/game_simulation/src/main.rs
//! Summary: ヘッドレス実行デモ（自動操縦で 1 ランを回し、サマリーと解放結果を JSON で出力）
//!
//! 使い方: `game_simulation [map] [character] [config.json]`
//! ログは `RUST_LOG=debug` などで有効化する。

use game_core::entity_params::{CharacterId, MapId, TemplateId};
use game_core::progression::{check_unlocks, ProfileProgress, RunSummary, Unlocks};
use game_core::stats::TalentBonuses;
use game_simulation::{Session, SessionConfig, SessionPhase, TickInput};
use serde::Serialize;

const DT: f32 = 1.0 / 60.0;
/// スナップショットを取る間隔（フレーム）
const SNAPSHOT_EVERY: u64 = 600;

#[derive(Serialize)]
struct Report<'a> {
    summary: &'a RunSummary,
    unlocks: &'a Unlocks,
    frames:  u64,
}

fn load_config(path: &str) -> SessionConfig {
    let parsed = std::fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|s| serde_json::from_str::<SessionConfig>(&s).map_err(|e| e.to_string()));
    match parsed {
        Ok(config) => config,
        Err(e) => {
            log::warn!("failed to load config `{path}`: {e}; using defaults");
            SessionConfig::default()
        }
    }
}

fn main() {
    let _ = env_logger::Builder::from_default_env().try_init();

    let mut args = std::env::args().skip(1);
    let map = args.next().map(|s| MapId::parse_or_default(&s)).unwrap_or_default();
    let character = args.next().map(|s| CharacterId::parse_or_default(&s)).unwrap_or_default();
    let config = args.next().map(|p| load_config(&p)).unwrap_or_default();

    let mut session = Session::new(map, character, TalentBonuses::default(), config);
    let mut frames: u64 = 0;

    while !session.is_ended() {
        // 円を描きながら逃げ回る
        let t = frames as f32 * DT * 0.5;
        let input = TickInput { move_x: t.cos(), move_y: t.sin(), toggle_pause: false };

        if session.tick(DT, input) == SessionPhase::AwaitingUpgrade {
            // 先頭の候補を取り続ける
            while session.phase() == SessionPhase::AwaitingUpgrade {
                match session.choose_upgrade(0) {
                    Ok(choice) => log::debug!("picked {:?}", choice),
                    Err(e) => {
                        log::warn!("{e}");
                        break;
                    }
                }
            }
        }

        for event in session.drain_events() {
            if let Some(cue) = event.audio_cue() {
                log::trace!("audio cue {:?} <- {:?}", cue, event);
            }
        }

        frames += 1;
        if frames % SNAPSHOT_EVERY == 0 {
            let snap = session.snapshot();
            log::debug!(
                "t={:.0}s hp={:.0}/{:.0} lv={} enemies={} projectiles={} items={} wave={}",
                snap.hud.elapsed_seconds,
                snap.hud.hp,
                snap.hud.max_hp,
                snap.hud.level,
                snap.enemies.len(),
                snap.projectiles.len(),
                snap.items.len(),
                snap.hud.wave
            );
        }
    }

    let summary = session.summary();
    let mut profile = ProfileProgress::default();
    let unlocks = check_unlocks(&mut profile, &summary);
    let report = Report { summary: &summary, unlocks: &unlocks, frames };
    match serde_json::to_string_pretty(&report) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("failed to serialize report: {e}"),
    }
}
