use crate::world::{FrameEvent, GameWorld, PlayerState, SessionPhase};
use game_core::entity_params::{PassiveId, TemplateId, WeaponId};
use game_core::physics::rng::SimpleRng;
use serde::Serialize;

const WEIGHT_NEW_WEAPON:      f32 = 1.0;
const WEIGHT_UPGRADE_WEAPON:  f32 = 1.5;
const WEIGHT_NEW_PASSIVE:     f32 = 0.8;
const WEIGHT_UPGRADE_PASSIVE: f32 = 1.2;

/// レベルアップ時に提示する強化候補
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UpgradeChoice {
    NewWeapon      { id: WeaponId },
    /// `level` は適用後のレベル
    UpgradeWeapon  { id: WeaponId, level: u32 },
    NewPassive     { id: PassiveId },
    UpgradePassive { id: PassiveId, level: u32 },
}

/// 候補を重み付きで非復元抽出する（新規武器は空きスロットがある場合のみ、最大レベルは除外）
pub fn compute_upgrade_choices(player: &PlayerState, count: usize, rng: &mut SimpleRng) -> Vec<UpgradeChoice> {
    let mut pool: Vec<(UpgradeChoice, f32)> = Vec::new();

    for &id in WeaponId::BASE_WEAPONS {
        match player.weapons.iter().find(|w| w.id == id) {
            None if player.has_free_weapon_slot() => {
                pool.push((UpgradeChoice::NewWeapon { id }, WEIGHT_NEW_WEAPON));
            }
            Some(w) if !w.is_maxed() => {
                pool.push((UpgradeChoice::UpgradeWeapon { id, level: w.level + 1 }, WEIGHT_UPGRADE_WEAPON));
            }
            _ => {}
        }
    }
    for &id in PassiveId::ALL {
        let level = player.passive_level(id);
        if level == 0 {
            pool.push((UpgradeChoice::NewPassive { id }, WEIGHT_NEW_PASSIVE));
        } else if level < id.params().max_level {
            pool.push((UpgradeChoice::UpgradePassive { id, level: level + 1 }, WEIGHT_UPGRADE_PASSIVE));
        }
    }

    let mut choices = Vec::with_capacity(count.min(pool.len()));
    while choices.len() < count && !pool.is_empty() {
        let total: f32 = pool.iter().map(|(_, w)| w).sum();
        let mut roll = rng.next_f32() * total;
        let mut picked = pool.len() - 1;
        for (i, (_, weight)) in pool.iter().enumerate() {
            if roll < *weight {
                picked = i;
                break;
            }
            roll -= weight;
        }
        choices.push(pool.swap_remove(picked).0);
    }
    choices
}

/// 選択を適用する。装備が変わらなければ false
pub fn apply_upgrade(player: &mut PlayerState, choice: UpgradeChoice) -> bool {
    match choice {
        UpgradeChoice::NewWeapon { id } | UpgradeChoice::UpgradeWeapon { id, .. } => player.add_weapon(id),
        UpgradeChoice::NewPassive { id } | UpgradeChoice::UpgradePassive { id, .. } => player.add_passive(id),
    }
}

/// 閾値を超えた分だけレベルを上げ、未処理の強化を積む
pub(crate) fn check_level_up(w: &mut GameWorld) {
    while w.player.try_level_up() {
        w.pending_upgrades += 1;
        w.frame_events.push(FrameEvent::LevelUp { new_level: w.player.level });
        log::debug!("level up -> {}", w.player.level);
    }
    refresh_upgrade_offer(w);
}

/// 未処理の強化があり候補が未提示なら、候補を作って AwaitingUpgrade に入る。
/// 候補が 1 つもなければ残りを破棄する
pub(crate) fn refresh_upgrade_offer(w: &mut GameWorld) {
    if w.pending_upgrades == 0 || !w.upgrade_choices.is_empty() {
        return;
    }
    if matches!(w.phase, SessionPhase::Ended(_)) {
        return;
    }
    let choices = compute_upgrade_choices(&w.player, w.upgrade_choice_count, &mut w.rng);
    if choices.is_empty() {
        log::debug!("no upgrades left, discarding {} pending", w.pending_upgrades);
        w.pending_upgrades = 0;
        return;
    }
    w.upgrade_choices = choices;
    w.phase = SessionPhase::AwaitingUpgrade;
}

/// 宝箱: 進化可能な武器を先に進化させ、金貨と強化を付与する
pub(crate) fn open_chest(w: &mut GameWorld, gold: u32, upgrades: u32) {
    if let Some((from, to)) = w.player.try_evolve() {
        log::info!("weapon evolved: {} -> {}", from.as_str(), to.as_str());
        w.frame_events.push(FrameEvent::WeaponEvolved { from, to });
    }
    w.player.gold = w.player.gold.saturating_add(gold);
    w.pending_upgrades += upgrades;
    w.frame_events.push(FrameEvent::ChestOpened { gold, upgrades });
}
