//! Path: native/game_simulation/src/session.rs
//! Summary: 1 ランのセッション（入力反映・tick・強化選択・スナップショット・イベント drain・サマリー）

use crate::config::SessionConfig;
use crate::error::UpgradeError;
use crate::game_logic::systems::leveling::{apply_upgrade, refresh_upgrade_offer, UpgradeChoice};
use crate::game_logic::{drain_frame_events_inner, physics_step_inner};
use crate::render_snapshot::{build_render_snapshot, RenderSnapshot};
use crate::world::{FrameEvent, GameWorld, Outcome, SessionPhase};
use game_core::entity_params::{CharacterId, MapId, TemplateId};
use game_core::progression::RunSummary;
use game_core::stats::TalentBonuses;
use serde::{Deserialize, Serialize};

/// 1 tick 分の入力。移動は入力層で正規化済み
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TickInput {
    pub move_x:       f32,
    pub move_y:       f32,
    /// 立ち上がりで一時停止を切り替える
    pub toggle_pause: bool,
}

pub struct Session {
    world: GameWorld,
}

impl Session {
    pub fn new(map: MapId, character: CharacterId, talents: TalentBonuses, config: SessionConfig) -> Self {
        log::info!(
            "session start: map={} character={} seed={:#x}",
            map.as_str(),
            character.as_str(),
            config.seed
        );
        Self { world: GameWorld::new(map, character, talents, config) }
    }

    /// 入力を反映し、Running のときだけシミュレーションを 1 ステップ進める
    pub fn tick(&mut self, dt: f32, input: TickInput) -> SessionPhase {
        let w = &mut self.world;
        if input.toggle_pause {
            w.phase = match w.phase {
                SessionPhase::Running => SessionPhase::Paused,
                SessionPhase::Paused => SessionPhase::Running,
                other => other,
            };
        }
        w.player.input_dx = input.move_x;
        w.player.input_dy = input.move_y;
        if w.phase == SessionPhase::Running {
            physics_step_inner(w, dt);
        }
        w.phase
    }

    /// 提示中の候補から 1 つ選ぶ。未処理の強化が残っていれば次の候補を提示する
    pub fn choose_upgrade(&mut self, index: usize) -> Result<UpgradeChoice, UpgradeError> {
        let w = &mut self.world;
        if w.phase != SessionPhase::AwaitingUpgrade {
            return Err(UpgradeError::NotOffered(w.phase));
        }
        let choice = *w.upgrade_choices.get(index).ok_or(UpgradeError::OutOfRange {
            index,
            count: w.upgrade_choices.len(),
        })?;
        if !apply_upgrade(&mut w.player, choice) {
            log::debug!("upgrade {:?} had no effect", choice);
        }
        self.finish_upgrade();
        Ok(choice)
    }

    /// 強化を 1 つ見送る
    pub fn skip_upgrade(&mut self) -> Result<(), UpgradeError> {
        if self.world.phase != SessionPhase::AwaitingUpgrade {
            return Err(UpgradeError::NotOffered(self.world.phase));
        }
        self.finish_upgrade();
        Ok(())
    }

    fn finish_upgrade(&mut self) {
        let w = &mut self.world;
        w.pending_upgrades = w.pending_upgrades.saturating_sub(1);
        w.upgrade_choices.clear();
        w.phase = SessionPhase::Running;
        refresh_upgrade_offer(w);
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        build_render_snapshot(&self.world)
    }

    /// 直近の tick で発生したイベント（発生順）。次の tick の開始時に捨てられるので毎 tick 呼ぶ
    pub fn drain_events(&mut self) -> Vec<FrameEvent> {
        drain_frame_events_inner(&mut self.world)
    }

    /// 永続化層へ渡すサマリー。金貨は gold_mult を掛けて切り捨てる
    pub fn summary(&self) -> RunSummary {
        let w = &self.world;
        RunSummary {
            time:       w.elapsed,
            kills:      w.kills,
            level:      w.player.level,
            boss_kills: w.boss_kills,
            gold:       (w.player.gold as f32 * w.player.stats.gold_mult).floor().max(0.0) as u32,
            victory:    w.phase == SessionPhase::Ended(Outcome::Victory),
            map:        w.map,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.world.phase
    }

    pub fn is_ended(&self) -> bool {
        self.world.is_ended()
    }

    pub fn world(&self) -> &GameWorld {
        &self.world
    }

    /// テスト・デバッグ用の直接操作
    pub fn world_mut(&mut self) -> &mut GameWorld {
        &mut self.world
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(MapId::Station, CharacterId::Commander, TalentBonuses::default(), SessionConfig::default())
    }

    #[test]
    fn pause_freezes_time() {
        let mut s = session();
        s.tick(0.016, TickInput::default());
        let t = s.world().elapsed;
        assert_eq!(s.tick(0.016, TickInput { toggle_pause: true, ..TickInput::default() }), SessionPhase::Paused);
        s.tick(0.016, TickInput::default());
        assert_eq!(s.world().elapsed, t);
        s.tick(0.016, TickInput { toggle_pause: true, ..TickInput::default() });
        assert!(s.world().elapsed > t);
    }

    #[test]
    fn choosing_outside_offer_is_an_error() {
        let mut s = session();
        assert_eq!(s.choose_upgrade(0), Err(UpgradeError::NotOffered(SessionPhase::Running)));
        assert_eq!(s.skip_upgrade(), Err(UpgradeError::NotOffered(SessionPhase::Running)));
    }

    #[test]
    fn level_up_blocks_until_every_pending_upgrade_is_resolved() {
        let mut s = session();
        // 2 段分の経験値（10 + 11）
        s.world_mut().player.xp = 21;
        s.tick(0.016, TickInput::default());
        assert_eq!(s.phase(), SessionPhase::AwaitingUpgrade);
        assert_eq!(s.world().player.level, 3);
        assert_eq!(s.world().pending_upgrades, 2);

        let t = s.world().elapsed;
        s.tick(0.016, TickInput::default());
        assert_eq!(s.world().elapsed, t);

        let count = s.world().upgrade_choices.len();
        assert_eq!(
            s.choose_upgrade(count),
            Err(UpgradeError::OutOfRange { index: count, count })
        );
        assert!(s.choose_upgrade(0).is_ok());
        assert_eq!(s.phase(), SessionPhase::AwaitingUpgrade);
        assert!(s.skip_upgrade().is_ok());
        assert_eq!(s.phase(), SessionPhase::Running);
        assert_eq!(s.world().pending_upgrades, 0);
    }

    #[test]
    fn summary_applies_gold_multiplier() {
        let talents = TalentBonuses { gold_mult: 1.5, ..TalentBonuses::default() };
        let mut s = Session::new(MapId::Station, CharacterId::Commander, talents, SessionConfig::default());
        s.world_mut().player.gold = 7;
        let summary = s.summary();
        assert_eq!(summary.gold, 10);
        assert!(!summary.victory);
        assert_eq!(summary.map, MapId::Station);
    }

    #[test]
    fn events_drain_once() {
        let mut s = session();
        s.world_mut().player.xp = 10;
        s.tick(0.016, TickInput::default());
        let events = s.drain_events();
        assert!(events.contains(&FrameEvent::LevelUp { new_level: 2 }));
        assert!(s.drain_events().is_empty());
    }
}
