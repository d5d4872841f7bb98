//! Path: native/game_core/src/progression.rs
//! Summary: 解放条件・プロフィール進捗・ランサマリー（永続化層との受け渡し型）

use crate::entity_params::{CharacterId, MapId, TemplateId};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// キャラクター・マップの解放条件
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UnlockCondition {
    None,
    /// 1 ランで到達したレベル
    Level(u32),
    /// 生存時間（秒）。`map` 指定時はそのマップでのみ
    Survive { seconds: f32, map: Option<MapId> },
    /// 累計撃破数
    Kills(u32),
    /// 累計ボス撃破数
    BossKills(u32),
    /// 全マップ（void 以外）のクリア
    CompleteAllMaps,
}

/// セッション終了時に永続化層へ渡すサマリー
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// 生存時間（秒）
    pub time:       f32,
    pub kills:      u32,
    pub level:      u32,
    pub boss_kills: u32,
    /// gold_mult 適用済み
    pub gold:       u32,
    pub victory:    bool,
    pub map:        MapId,
}

/// 永続化層が保持する累計進捗（解放判定に使う）
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileProgress {
    pub total_kills:         u32,
    pub total_boss_kills:    u32,
    pub max_level:           u32,
    pub max_survival:        f32,
    pub completed_maps:      Vec<MapId>,
    /// マップ毎の最長生存時間
    pub best_survival:       Vec<(MapId, f32)>,
    pub unlocked_characters: Vec<CharacterId>,
    pub unlocked_maps:       Vec<MapId>,
}

impl ProfileProgress {
    /// ランの結果を累計に反映する
    pub fn record_run(&mut self, run: &RunSummary) {
        self.total_kills = self.total_kills.saturating_add(run.kills);
        self.total_boss_kills = self.total_boss_kills.saturating_add(run.boss_kills);
        self.max_level = self.max_level.max(run.level);
        self.max_survival = self.max_survival.max(run.time);
        match self.best_survival.iter_mut().find(|(m, _)| *m == run.map) {
            Some((_, t)) => *t = t.max(run.time),
            None => self.best_survival.push((run.map, run.time)),
        }
        if run.victory && !self.completed_maps.contains(&run.map) {
            self.completed_maps.push(run.map);
        }
    }

    fn survival_on(&self, map: MapId) -> f32 {
        self.best_survival
            .iter()
            .find(|(m, _)| *m == map)
            .map(|(_, t)| *t)
            .unwrap_or(0.0)
    }

    pub fn satisfies(&self, cond: &UnlockCondition) -> bool {
        match *cond {
            UnlockCondition::None => true,
            UnlockCondition::Level(l) => self.max_level >= l,
            UnlockCondition::Survive { seconds, map: None } => self.max_survival >= seconds,
            UnlockCondition::Survive { seconds, map: Some(m) } => self.survival_on(m) >= seconds,
            UnlockCondition::Kills(k) => self.total_kills >= k,
            UnlockCondition::BossKills(k) => self.total_boss_kills >= k,
            UnlockCondition::CompleteAllMaps => MapId::ALL
                .iter()
                .filter(|&&m| m != MapId::Void)
                .all(|m| self.completed_maps.contains(m)),
        }
    }
}

/// 新たに解放されたキャラクターとマップ
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Unlocks {
    pub characters: Vec<CharacterId>,
    pub maps:       Vec<MapId>,
}

impl Unlocks {
    pub fn is_empty(&self) -> bool {
        self.characters.is_empty() && self.maps.is_empty()
    }
}

/// ランの結果を反映し、新たに条件を満たしたキャラクター・マップを返す（profile も更新する）
pub fn check_unlocks(profile: &mut ProfileProgress, run: &RunSummary) -> Unlocks {
    profile.record_run(run);

    let owned_chars: FxHashSet<CharacterId> = profile.unlocked_characters.iter().copied().collect();
    let owned_maps: FxHashSet<MapId> = profile.unlocked_maps.iter().copied().collect();

    let characters: Vec<CharacterId> = CharacterId::ALL
        .iter()
        .copied()
        .filter(|c| !owned_chars.contains(c) && profile.satisfies(&c.params().unlock))
        .collect();
    let maps: Vec<MapId> = MapId::ALL
        .iter()
        .copied()
        .filter(|m| !owned_maps.contains(m) && profile.satisfies(&m.params().unlock))
        .collect();

    profile.unlocked_characters.extend_from_slice(&characters);
    profile.unlocked_maps.extend_from_slice(&maps);
    if !characters.is_empty() || !maps.is_empty() {
        log::info!("unlocked characters={characters:?} maps={maps:?}");
    }
    Unlocks { characters, maps }
}
