//! Path: native/game_simulation/src/world/player.rs
//! Summary: プレイヤー状態（座標・HP・経験値・装備・解決済みステータス・バフ・無敵・復活）

use super::handle::EnemyHandle;
use game_core::constants::{
    BASE_XP_TO_LEVEL, INVINCIBLE_DURATION, MAX_WEAPON_SLOTS, REVIVE_HP_RATIO, REVIVE_INVINCIBLE,
};
use game_core::entity_params::{CharacterId, PassiveId, WeaponArchetype, WeaponId};
use game_core::physics::rng::SimpleRng;
use game_core::stats::{resolve_stats, BuffFlags, PassiveInstance, ResolvedStats, TalentBonuses};
use game_core::util::next_xp_threshold;
use rustc_hash::FxHashMap;

/// 武器インスタンスのアーキタイプ別状態
#[derive(Clone, Debug, PartialEq)]
pub enum WeaponState {
    /// 発射型。0 以下で発射し、クールダウンへ戻す
    Cooldown { timer: f32 },
    /// aura / cone / beam。ダメージ間隔タイマー
    Pulse { damage_timer: f32 },
    /// orbital。(オーブ番号, 敵) 毎のヒットクールダウンと、進化版のレーザータイマー
    Orbit { hit_cooldowns: FxHashMap<(u8, EnemyHandle), f32>, laser_timer: f32 },
}

impl WeaponState {
    pub fn for_weapon(id: WeaponId) -> Self {
        match id.params().archetype {
            WeaponArchetype::Orbital => Self::Orbit { hit_cooldowns: FxHashMap::default(), laser_timer: 0.0 },
            WeaponArchetype::Aura | WeaponArchetype::Cone | WeaponArchetype::Beam => {
                Self::Pulse { damage_timer: 0.0 }
            }
            _ => Self::Cooldown { timer: 0.0 },
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct WeaponInstance {
    pub id:    WeaponId,
    pub level: u32,
    pub state: WeaponState,
}

impl WeaponInstance {
    pub fn new(id: WeaponId) -> Self {
        Self { id, level: 1, state: WeaponState::for_weapon(id) }
    }

    pub fn is_maxed(&self) -> bool {
        self.level >= self.id.params().max_level
    }
}

/// 被弾処理の結果
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DamageOutcome {
    /// 無敵中で無効
    Blocked,
    Hurt(f32),
    /// 致死ダメージを受けたが復活した
    Revived(f32),
    Died(f32),
}

/// プレイヤー状態
pub struct PlayerState {
    pub x:                     f32,
    pub y:                     f32,
    /// 向き（ラジアン）。停止中は直前の移動方向を保つ
    pub facing:                f32,
    pub input_dx:              f32,
    pub input_dy:              f32,
    pub hp:                    f32,
    pub level:                 u32,
    pub xp:                    u32,
    pub xp_to_next:            u32,
    pub weapons:               Vec<WeaponInstance>,
    pub passives:              Vec<PassiveInstance>,
    pub stats:                 ResolvedStats,
    pub character:             CharacterId,
    pub talents:               TalentBonuses,
    /// 被弾後の無敵
    pub invincible_timer:      f32,
    pub double_damage_timer:   f32,
    pub invincible_buff_timer: f32,
    pub revive_used:           bool,
    /// 拾った金貨（gold_mult 適用前）
    pub gold:                  u32,
}

impl PlayerState {
    pub fn new(character: CharacterId, talents: TalentBonuses, x: f32, y: f32) -> Self {
        let params = character.params();
        let stats = resolve_stats(params, &talents, &[], BuffFlags::default());
        Self {
            x,
            y,
            facing: 0.0,
            input_dx: 0.0,
            input_dy: 0.0,
            hp: stats.max_hp,
            level: 1,
            xp: 0,
            xp_to_next: BASE_XP_TO_LEVEL,
            weapons: vec![WeaponInstance::new(params.starting_weapon)],
            passives: Vec::new(),
            stats,
            character,
            talents,
            invincible_timer: 0.0,
            double_damage_timer: 0.0,
            invincible_buff_timer: 0.0,
            revive_used: false,
            gold: 0,
        }
    }

    fn buff_flags(&self) -> BuffFlags {
        BuffFlags {
            double_damage: self.double_damage_timer > 0.0,
            invincible:    self.invincible_buff_timer > 0.0,
        }
    }

    /// 装備・バフ状態が変わったときだけ呼ぶ
    pub fn recompute_stats(&mut self) {
        self.stats = resolve_stats(
            self.character.params(),
            &self.talents,
            &self.passives,
            self.buff_flags(),
        );
        self.hp = self.hp.min(self.stats.max_hp);
    }

    /// バフタイマーを進め、切れたらステータスを再解決する
    pub fn tick_timers(&mut self, dt: f32) {
        if self.invincible_timer > 0.0 {
            self.invincible_timer = (self.invincible_timer - dt).max(0.0);
        }
        let before = self.buff_flags();
        self.double_damage_timer = (self.double_damage_timer - dt).max(0.0);
        self.invincible_buff_timer = (self.invincible_buff_timer - dt).max(0.0);
        if self.buff_flags() != before {
            self.recompute_stats();
        }
        if self.stats.hp_regen > 0.0 && self.hp > 0.0 && self.hp < self.stats.max_hp {
            self.hp = (self.hp + self.stats.hp_regen * dt).min(self.stats.max_hp);
        }
    }

    pub fn apply_double_damage(&mut self, duration: f32) {
        self.double_damage_timer = self.double_damage_timer.max(duration);
        self.recompute_stats();
    }

    pub fn apply_invincible(&mut self, duration: f32) {
        self.invincible_buff_timer = self.invincible_buff_timer.max(duration);
        self.recompute_stats();
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible_timer > 0.0 || self.invincible_buff_timer > 0.0
    }

    pub fn is_dead(&self) -> bool {
        self.hp <= 0.0
    }

    /// `floor(amount × xp_mult)` を加算する。レベルアップ判定は呼び出し側
    pub fn add_xp(&mut self, amount: u32) -> u32 {
        let gained = (amount as f32 * self.stats.xp_mult).floor().max(0.0) as u32;
        self.xp = self.xp.saturating_add(gained);
        gained
    }

    /// 閾値を 1 回消費できればレベルを上げて true
    pub fn try_level_up(&mut self) -> bool {
        if self.xp < self.xp_to_next {
            return false;
        }
        self.xp -= self.xp_to_next;
        self.level += 1;
        self.xp_to_next = next_xp_threshold(self.xp_to_next).max(1);
        true
    }

    pub fn heal(&mut self, amount: f32) -> f32 {
        let healed = (self.stats.max_hp - self.hp).clamp(0.0, amount.max(0.0));
        self.hp += healed;
        healed
    }

    /// アーマーで軽減（最低 1）し、被弾後無敵を張る。致死なら一度だけ復活判定
    pub fn take_damage(&mut self, amount: f32, rng: &mut SimpleRng) -> DamageOutcome {
        if self.is_invincible() || self.is_dead() {
            return DamageOutcome::Blocked;
        }
        let dealt = (amount * (1.0 - self.stats.armor / 100.0)).max(1.0);
        self.hp -= dealt;
        self.invincible_timer = INVINCIBLE_DURATION;

        if self.hp > 0.0 {
            return DamageOutcome::Hurt(dealt);
        }
        if !self.revive_used && self.stats.revive_chance > 0.0 && rng.chance(self.stats.revive_chance) {
            self.revive_used = true;
            self.hp = self.stats.max_hp * REVIVE_HP_RATIO;
            self.invincible_timer = REVIVE_INVINCIBLE;
            return DamageOutcome::Revived(dealt);
        }
        self.hp = 0.0;
        DamageOutcome::Died(dealt)
    }

    pub fn weapon_level(&self, id: WeaponId) -> u32 {
        self.weapons.iter().find(|w| w.id == id).map_or(0, |w| w.level)
    }

    pub fn passive_level(&self, id: PassiveId) -> u32 {
        self.passives.iter().find(|p| p.id == id).map_or(0, |p| p.level)
    }

    pub fn has_free_weapon_slot(&self) -> bool {
        self.weapons.len() < MAX_WEAPON_SLOTS
    }

    /// 新規取得（空きスロットが必要）または 1 レベル上げる。変化がなければ false
    pub fn add_weapon(&mut self, id: WeaponId) -> bool {
        if let Some(w) = self.weapons.iter_mut().find(|w| w.id == id) {
            if w.is_maxed() {
                return false;
            }
            w.level += 1;
            return true;
        }
        if !self.has_free_weapon_slot() {
            return false;
        }
        self.weapons.push(WeaponInstance::new(id));
        true
    }

    pub fn add_passive(&mut self, id: PassiveId) -> bool {
        let max = id.params().max_level;
        let changed = match self.passives.iter_mut().find(|p| p.id == id) {
            Some(p) if p.level < max => {
                p.level += 1;
                true
            }
            Some(_) => false,
            None => {
                self.passives.push(PassiveInstance { id, level: 1 });
                true
            }
        };
        if changed {
            self.recompute_stats();
        }
        changed
    }

    /// 最大レベルかつ触媒パッシブ所持の武器を進化させる。進化したら (元, 先) を返す
    pub fn try_evolve(&mut self) -> Option<(WeaponId, WeaponId)> {
        let passives = &self.passives;
        let slot = self.weapons.iter_mut().find(|w| {
            w.is_maxed()
                && w.id
                    .params()
                    .evolution
                    .is_some_and(|e| passives.iter().any(|p| p.id == e.requires))
        })?;
        let evo = slot.id.params().evolution?;
        let from = slot.id;
        *slot = WeaponInstance::new(evo.becomes);
        Some((from, evo.becomes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::entity_params::WeaponId;

    fn commander() -> PlayerState {
        PlayerState::new(CharacterId::Commander, TalentBonuses::default(), 0.0, 0.0)
    }

    #[test]
    fn starts_with_character_weapon() {
        let p = commander();
        assert_eq!(p.weapons.len(), 1);
        assert_eq!(p.weapons[0].id, WeaponId::Blaster);
        assert_eq!(p.hp, 100.0);
        assert_eq!(p.xp_to_next, 10);
    }

    #[test]
    fn multiple_level_ups_consume_thresholds() {
        let mut p = commander();
        p.add_xp(10 + 11 + 12 + 5);
        let mut ups = 0;
        while p.try_level_up() {
            ups += 1;
        }
        assert_eq!(ups, 3);
        assert_eq!(p.level, 4);
        assert_eq!(p.xp, 5);
        assert_eq!(p.xp_to_next, 13);
    }

    #[test]
    fn armor_reduces_with_minimum_one() {
        let mut rng = SimpleRng::new(1);
        let mut p = PlayerState::new(CharacterId::Android, TalentBonuses::default(), 0.0, 0.0);
        assert_eq!(p.take_damage(10.0, &mut rng), DamageOutcome::Hurt(9.0));
        // 被弾後無敵中は無効
        assert_eq!(p.take_damage(10.0, &mut rng), DamageOutcome::Blocked);
        p.invincible_timer = 0.0;
        assert_eq!(p.take_damage(0.5, &mut rng), DamageOutcome::Hurt(1.0));
    }

    #[test]
    fn guaranteed_revive_happens_once() {
        let mut rng = SimpleRng::new(3);
        let talents = TalentBonuses { revive_chance: 1.0, ..TalentBonuses::default() };
        let mut p = PlayerState::new(CharacterId::Commander, talents, 0.0, 0.0);
        assert!(matches!(p.take_damage(500.0, &mut rng), DamageOutcome::Revived(_)));
        assert_eq!(p.hp, 50.0);
        assert_eq!(p.invincible_timer, REVIVE_INVINCIBLE);
        p.invincible_timer = 0.0;
        assert!(matches!(p.take_damage(500.0, &mut rng), DamageOutcome::Died(_)));
        assert!(p.is_dead());
    }

    #[test]
    fn invincible_buff_blocks_damage_and_expires() {
        let mut rng = SimpleRng::new(5);
        let mut p = commander();
        p.apply_invincible(1.0);
        assert!(p.stats.invincible);
        assert_eq!(p.take_damage(30.0, &mut rng), DamageOutcome::Blocked);
        p.tick_timers(1.5);
        assert!(!p.stats.invincible);
        assert!(matches!(p.take_damage(30.0, &mut rng), DamageOutcome::Hurt(_)));
    }

    #[test]
    fn evolution_requires_max_level_and_catalyst() {
        let mut p = commander();
        for _ in 0..7 {
            assert!(p.add_weapon(WeaponId::Blaster));
        }
        assert!(!p.add_weapon(WeaponId::Blaster));
        assert_eq!(p.try_evolve(), None);
        p.add_passive(PassiveId::EnergyCell);
        assert_eq!(p.try_evolve(), Some((WeaponId::Blaster, WeaponId::DeathRay)));
        assert_eq!(p.weapons[0].id, WeaponId::DeathRay);
        assert!(matches!(p.weapons[0].state, WeaponState::Pulse { .. }));
    }

    #[test]
    fn weapon_slots_are_capped() {
        let mut p = commander();
        for &id in &WeaponId::BASE_WEAPONS[1..6] {
            assert!(p.add_weapon(id));
        }
        assert!(!p.has_free_weapon_slot());
        assert!(!p.add_weapon(WeaponId::BoomerangDrone));
    }
}
