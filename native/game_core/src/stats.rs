//! Path: native/game_core/src/stats.rs
//! Summary: ステータス集約（キャラクター基礎値・タレント・パッシブ・固有パッシブ・バフ → ResolvedStats）
//!
//! `resolve_stats` は純関数。装備やタレントが変わったときだけ呼び、毎フレームは呼ばない。
//! 合成順は各ステータスで共通:
//! 基礎値 + タレント固定値 → ×(1+タレント) → ×(1+装備パッシブ合計) → ×(1+固有パッシブ) → バフ

use crate::constants::{PICKUP_RADIUS_BASE, PLAYER_BASE_SPEED};
use crate::entity_params::{CharacterParams, PassiveId, TalentId};
use crate::error::TemplateError;
use serde::{Deserialize, Serialize};

/// パッシブ・キャラクター固有効果の共通表現（各値は割合、orbitals/chains は個数）
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectVector {
    pub damage:           f32,
    pub max_hp:           f32,
    pub speed:            f32,
    pub armor:            f32,
    pub hp_regen:         f32,
    pub cooldown:         f32,
    pub area:             f32,
    pub projectile_speed: f32,
    pub duration:         f32,
    pub pickup_range:     f32,
    pub xp_gain:          f32,
    pub luck:             f32,
    /// android 用。乗算系ステータス全てに加算される
    pub all_stats:        f32,
    pub laser_damage:     f32,
    pub homing:           f32,
    pub orbitals:         f32,
    pub chains:           f32,
    pub explosion_radius: f32,
}

impl EffectVector {
    pub const ZERO: Self = Self {
        damage:           0.0,
        max_hp:           0.0,
        speed:            0.0,
        armor:            0.0,
        hp_regen:         0.0,
        cooldown:         0.0,
        area:             0.0,
        projectile_speed: 0.0,
        duration:         0.0,
        pickup_range:     0.0,
        xp_gain:          0.0,
        luck:             0.0,
        all_stats:        0.0,
        laser_damage:     0.0,
        homing:           0.0,
        orbitals:         0.0,
        chains:           0.0,
        explosion_radius: 0.0,
    };

    pub fn scaled(&self, k: f32) -> Self {
        Self {
            damage:           self.damage * k,
            max_hp:           self.max_hp * k,
            speed:            self.speed * k,
            armor:            self.armor * k,
            hp_regen:         self.hp_regen * k,
            cooldown:         self.cooldown * k,
            area:             self.area * k,
            projectile_speed: self.projectile_speed * k,
            duration:         self.duration * k,
            pickup_range:     self.pickup_range * k,
            xp_gain:          self.xp_gain * k,
            luck:             self.luck * k,
            all_stats:        self.all_stats * k,
            laser_damage:     self.laser_damage * k,
            homing:           self.homing * k,
            orbitals:         self.orbitals * k,
            chains:           self.chains * k,
            explosion_radius: self.explosion_radius * k,
        }
    }

    /// `all_stats` を乗算系の各フィールドへ展開したコピー
    pub fn expanded(&self) -> Self {
        let a = self.all_stats;
        Self {
            damage:           self.damage + a,
            max_hp:           self.max_hp + a,
            speed:            self.speed + a,
            area:             self.area + a,
            projectile_speed: self.projectile_speed + a,
            duration:         self.duration + a,
            pickup_range:     self.pickup_range + a,
            xp_gain:          self.xp_gain + a,
            all_stats:        0.0,
            ..*self
        }
    }
}

impl std::ops::AddAssign for EffectVector {
    fn add_assign(&mut self, o: Self) {
        self.damage           += o.damage;
        self.max_hp           += o.max_hp;
        self.speed            += o.speed;
        self.armor            += o.armor;
        self.hp_regen         += o.hp_regen;
        self.cooldown         += o.cooldown;
        self.area             += o.area;
        self.projectile_speed += o.projectile_speed;
        self.duration         += o.duration;
        self.pickup_range     += o.pickup_range;
        self.xp_gain          += o.xp_gain;
        self.luck             += o.luck;
        self.all_stats        += o.all_stats;
        self.laser_damage     += o.laser_damage;
        self.homing           += o.homing;
        self.orbitals         += o.orbitals;
        self.chains           += o.chains;
        self.explosion_radius += o.explosion_radius;
    }
}

/// タレント由来のボーナス（セッション開始時に永続化層から受け取る）
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TalentBonuses {
    /// 最大 HP の固定加算
    pub max_hp:        f32,
    pub damage:        f32,
    pub speed:         f32,
    /// 1 + 合計
    pub gold_mult:     f32,
    /// 1 + 合計
    pub xp_mult:       f32,
    pub hp_regen:      f32,
    pub luck:          f32,
    pub cooldown:      f32,
    pub pickup_range:  f32,
    pub revive_chance: f32,
}

impl Default for TalentBonuses {
    fn default() -> Self {
        Self {
            max_hp:        0.0,
            damage:        0.0,
            speed:         0.0,
            gold_mult:     1.0,
            xp_mult:       1.0,
            hp_regen:      0.0,
            luck:          0.0,
            cooldown:      0.0,
            pickup_range:  0.0,
            revive_chance: 0.0,
        }
    }
}

impl TalentBonuses {
    /// タレントレベルから `effect × level` を合算する
    pub fn from_levels(levels: &[(TalentId, u32)]) -> Result<Self, TemplateError> {
        let mut b = Self::default();
        for &(id, level) in levels {
            let params = id.params();
            if level > params.max_level() {
                return Err(TemplateError::InvalidLevel {
                    talent: params.name,
                    level,
                    max: params.max_level(),
                });
            }
            let v = params.effect * level as f32;
            match id {
                TalentId::Vitality   => b.max_hp += v,
                TalentId::Power      => b.damage += v,
                TalentId::Agility    => b.speed += v,
                TalentId::Greed      => b.gold_mult += v,
                TalentId::Wisdom     => b.xp_mult += v,
                TalentId::Regen      => b.hp_regen += v,
                TalentId::Fortune    => b.luck += v,
                TalentId::Efficiency => b.cooldown += v,
                TalentId::Magnetism  => b.pickup_range += v,
                TalentId::Revival    => b.revive_chance += v,
            }
        }
        Ok(b)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassiveInstance {
    pub id:    PassiveId,
    pub level: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuffFlags {
    pub double_damage: bool,
    pub invincible:    bool,
}

/// 実行時に参照する解決済みステータス
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedStats {
    pub max_hp:             f32,
    /// 移動速度（px/s）
    pub speed:              f32,
    pub damage_mult:        f32,
    /// ダメージ軽減率（%、0..=75）
    pub armor:              f32,
    /// クールダウン短縮率（0..=0.75）
    pub cooldown_reduction: f32,
    pub area:               f32,
    pub projectile_speed:   f32,
    pub duration:           f32,
    /// 取得半径（px）
    pub pickup_range:       f32,
    pub xp_mult:            f32,
    pub gold_mult:          f32,
    pub luck:               f32,
    /// 毎秒回復量
    pub hp_regen:           f32,
    pub revive_chance:      f32,
    pub laser_damage:       f32,
    pub homing:             f32,
    pub extra_orbitals:     u32,
    pub extra_chains:       u32,
    pub explosion_radius:   f32,
    pub invincible:         bool,
}

pub fn aggregate_passives(passives: &[PassiveInstance]) -> EffectVector {
    let mut sum = EffectVector::ZERO;
    for p in passives {
        sum += p.id.params().effect.scaled(p.level as f32);
    }
    sum
}

/// 純関数。同じ入力からは常にビット単位で同じ結果を返す
pub fn resolve_stats(
    character: &CharacterParams,
    talents: &TalentBonuses,
    passives: &[PassiveInstance],
    buffs: BuffFlags,
) -> ResolvedStats {
    let p = aggregate_passives(passives);
    let c = character.passive.expanded();

    #[inline]
    fn chain(base: f32, talent: f32, passive: f32, innate: f32) -> f32 {
        base * (1.0 + talent) * (1.0 + passive) * (1.0 + innate)
    }

    let mut damage_mult = chain(character.damage, talents.damage, p.damage, c.damage);
    if buffs.double_damage {
        damage_mult *= 2.0;
    }

    ResolvedStats {
        // 最大 HP は整数に切り捨てる
        max_hp:             chain(character.max_hp + talents.max_hp, 0.0, p.max_hp, c.max_hp).floor(),
        speed:              chain(PLAYER_BASE_SPEED * character.speed, talents.speed, p.speed, c.speed),
        damage_mult,
        armor:              (character.armor + (p.armor + c.armor) * 100.0).clamp(0.0, 75.0),
        cooldown_reduction: (talents.cooldown + p.cooldown + c.cooldown).clamp(0.0, 0.75),
        area:               chain(1.0, 0.0, p.area, c.area),
        projectile_speed:   chain(1.0, 0.0, p.projectile_speed, c.projectile_speed),
        duration:           chain(1.0, 0.0, p.duration, c.duration),
        pickup_range:       chain(PICKUP_RADIUS_BASE, talents.pickup_range, p.pickup_range, c.pickup_range),
        xp_mult:            chain(talents.xp_mult, 0.0, p.xp_gain, c.xp_gain),
        gold_mult:          talents.gold_mult,
        luck:               talents.luck + p.luck + c.luck,
        hp_regen:           talents.hp_regen + p.hp_regen + c.hp_regen,
        revive_chance:      talents.revive_chance.clamp(0.0, 1.0),
        laser_damage:       1.0 + p.laser_damage + c.laser_damage,
        homing:             p.homing + c.homing,
        extra_orbitals:     (p.orbitals + c.orbitals).round().max(0.0) as u32,
        extra_chains:       (p.chains + c.chains).round().max(0.0) as u32,
        explosion_radius:   1.0 + p.explosion_radius + c.explosion_radius,
        invincible:         buffs.invincible,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity_params::CharacterId;

    fn pi(id: PassiveId, level: u32) -> PassiveInstance {
        PassiveInstance { id, level }
    }

    #[test]
    fn commander_baseline() {
        let s = resolve_stats(
            CharacterId::Commander.params(),
            &TalentBonuses::default(),
            &[],
            BuffFlags::default(),
        );
        assert_eq!(s.max_hp, 100.0);
        assert_eq!(s.speed, 200.0);
        assert!((s.damage_mult - 1.1).abs() < 1e-6);
        assert_eq!(s.armor, 0.0);
        assert_eq!(s.pickup_range, PICKUP_RADIUS_BASE);
        assert_eq!(s.xp_mult, 1.0);
    }

    #[test]
    fn composition_order_is_multiplicative_chain() {
        let talents = TalentBonuses { damage: 0.09, ..TalentBonuses::default() };
        let s = resolve_stats(
            CharacterId::Commander.params(),
            &talents,
            &[pi(PassiveId::PowerCore, 2)],
            BuffFlags::default(),
        );
        let expected = 1.0 * 1.09 * 1.2 * 1.1;
        assert!((s.damage_mult - expected).abs() < 1e-5);
    }

    #[test]
    fn double_damage_doubles_final_multiplier() {
        let ch = CharacterId::Soldier.params();
        let t = TalentBonuses::default();
        let plain = resolve_stats(ch, &t, &[], BuffFlags::default());
        let buffed = resolve_stats(ch, &t, &[], BuffFlags { double_damage: true, invincible: false });
        assert_eq!(buffed.damage_mult, plain.damage_mult * 2.0);
    }

    #[test]
    fn armor_and_cooldown_are_clamped() {
        let ch = CharacterId::Android.params();
        let talents = TalentBonuses { cooldown: 0.6, ..TalentBonuses::default() };
        let passives = [
            pi(PassiveId::NanoArmor, 5),
            pi(PassiveId::NanoArmor, 5),
            pi(PassiveId::NanoArmor, 5),
            pi(PassiveId::Overclock, 5),
        ];
        let s = resolve_stats(ch, &talents, &passives, BuffFlags::default());
        assert_eq!(s.armor, 75.0);
        assert_eq!(s.cooldown_reduction, 0.75);
    }

    #[test]
    fn passive_order_does_not_matter() {
        let ch = CharacterId::Scout.params();
        let t = TalentBonuses { speed: 0.06, luck: 0.1, ..TalentBonuses::default() };
        let forward = [
            pi(PassiveId::PowerCore, 3),
            pi(PassiveId::JetBoots, 2),
            pi(PassiveId::Amplifier, 4),
            pi(PassiveId::LuckyChip, 1),
            pi(PassiveId::ShieldBooster, 2),
        ];
        let mut reversed = forward;
        reversed.reverse();
        let a = resolve_stats(ch, &t, &forward, BuffFlags::default());
        let b = resolve_stats(ch, &t, &reversed, BuffFlags::default());
        assert!((a.damage_mult - b.damage_mult).abs() < 1e-5);
        assert!((a.speed - b.speed).abs() < 1e-3);
        assert!((a.area - b.area).abs() < 1e-5);
        assert!((a.luck - b.luck).abs() < 1e-5);
        assert!((a.max_hp - b.max_hp).abs() < 1e-3);
    }

    #[test]
    fn resolving_twice_is_bit_identical() {
        let ch = CharacterId::Psychic.params();
        let t = TalentBonuses::from_levels(&[(TalentId::Power, 4), (TalentId::Fortune, 2)])
            .unwrap();
        let passives = [pi(PassiveId::Amplifier, 2), pi(PassiveId::Stabilizer, 5)];
        let buffs = BuffFlags { double_damage: true, invincible: false };
        let a = resolve_stats(ch, &t, &passives, buffs);
        let b = resolve_stats(ch, &t, &passives, buffs);
        assert_eq!(a.damage_mult.to_bits(), b.damage_mult.to_bits());
        assert_eq!(a.area.to_bits(), b.area.to_bits());
        assert_eq!(a.duration.to_bits(), b.duration.to_bits());
        assert_eq!(a, b);
    }

    #[test]
    fn android_all_stats_expands() {
        let s = resolve_stats(
            CharacterId::Android.params(),
            &TalentBonuses::default(),
            &[],
            BuffFlags::default(),
        );
        assert!((s.area - 1.05).abs() < 1e-6);
        assert_eq!(s.max_hp, 157.0);
        assert_eq!(s.armor, 10.0);
    }

    #[test]
    fn talent_levels_sum_effects() {
        let t = TalentBonuses::from_levels(&[
            (TalentId::Vitality, 3),
            (TalentId::Greed, 2),
            (TalentId::Wisdom, 4),
        ])
        .unwrap();
        assert_eq!(t.max_hp, 15.0);
        assert!((t.gold_mult - 1.16).abs() < 1e-6);
        assert!((t.xp_mult - 1.2).abs() < 1e-6);

        let err = TalentBonuses::from_levels(&[(TalentId::Revival, 4)]).unwrap_err();
        assert!(matches!(err, TemplateError::InvalidLevel { level: 4, max: 3, .. }));
    }

    #[test]
    fn talent_bonuses_from_partial_json() {
        let t: TalentBonuses = serde_json::from_str(r#"{"damage":0.06}"#).unwrap();
        assert_eq!(t.damage, 0.06);
        assert_eq!(t.gold_mult, 1.0);
    }
}
