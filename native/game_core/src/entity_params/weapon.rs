//! Path: native/game_core/src/entity_params/weapon.rs
//! Summary: 武器テンプレート（アーキタイプ・基礎値・レベル別ボーナス表・進化リンク）

use super::{PassiveId, TemplateId};
use crate::util::level_entry;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum WeaponId {
    #[default]
    Blaster         = 0,
    PlasmaRifle     = 1,
    TeslaCoil       = 2,
    ShieldOrbs      = 3,
    HomingMissiles  = 4,
    ForceField      = 5,
    RailGun         = 6,
    GrenadeLauncher = 7,
    Flamethrower    = 8,
    BoomerangDrone  = 9,
    // 進化武器
    DeathRay        = 10,
    PlasmaStorm     = 11,
    ThunderGod      = 12,
    OrbitalStrike   = 13,
    DroneSwarm      = 14,
}

/// 武器の挙動ファミリ（発射・ダメージアルゴリズムを決める）
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum WeaponArchetype {
    Projectile,
    Spread,
    Lightning,
    Orbital,
    Homing,
    Aura,
    Piercing,
    Explosive,
    Cone,
    Boomerang,
    Beam,
    Swarm,
}

impl WeaponArchetype {
    /// cooldown == 0 で毎 tick 評価される武器
    pub fn is_continuous(self) -> bool {
        matches!(self, Self::Orbital | Self::Aura | Self::Cone | Self::Beam)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Evolution {
    pub requires: PassiveId,
    pub becomes:  WeaponId,
}

/// レベル 1..=max_level のボーナス表。空スライスは「変化なし」
#[derive(Clone, Copy, Debug)]
pub struct LevelBonus {
    /// レベル毎のダメージ加算
    pub damage:        f32,
    pub projectiles:   &'static [u32],
    pub pierce:        &'static [u32],
    pub cooldown_mult: &'static [f32],
    pub spread:        &'static [f32],
    pub chains:        &'static [u32],
    pub range_mult:    &'static [f32],
    pub radius_mult:   &'static [f32],
    pub size_mult:     &'static [f32],
    pub speed_mult:    &'static [f32],
    pub interval_mult: &'static [f32],
    pub width_mult:    &'static [f32],
    pub angle_mult:    &'static [f32],
}

impl LevelBonus {
    pub const NONE: Self = Self {
        damage:        0.0,
        projectiles:   &[],
        pierce:        &[],
        cooldown_mult: &[],
        spread:        &[],
        chains:        &[],
        range_mult:    &[],
        radius_mult:   &[],
        size_mult:     &[],
        speed_mult:    &[],
        interval_mult: &[],
        width_mult:    &[],
        angle_mult:    &[],
    };
}

#[derive(Clone, Copy, Debug)]
pub struct WeaponParams {
    pub name:             &'static str,
    pub archetype:        WeaponArchetype,
    /// 0 なら継続武器
    pub cooldown:         f32,
    pub damage:           f32,
    pub speed:            f32,
    pub size:             f32,
    pub pierce:           u32,
    pub duration:         f32,
    /// 弾同士の角度差（ラジアン）
    pub spread:           f32,
    pub projectiles:      u32,
    pub range:            f32,
    pub chain_range:      f32,
    pub chains:           u32,
    pub stun:             f32,
    pub orbit_radius:     f32,
    pub orbit_speed:      f32,
    pub turn_speed:       f32,
    pub damage_interval:  f32,
    pub radius:           f32,
    pub width:            f32,
    pub explosion_radius: f32,
    /// 円錐の半角（ラジアン）
    pub cone_angle:       f32,
    pub max_distance:     f32,
    /// 目標がいないときは発射しない
    pub requires_target:  bool,
    /// 発射弾をホーミングにする（plasma_storm）
    pub homing_shots:     bool,
    /// 軌道オーブがレーザーを撃つ（orbital_strike）
    pub shoots_lasers:    bool,
    /// レーザー系（energy_cell の laser_damage が乗る）
    pub laser:            bool,
    pub max_level:        u32,
    pub levels:           LevelBonus,
    pub evolution:        Option<Evolution>,
}

impl WeaponParams {
    const BASE: Self = Self {
        name:             "",
        archetype:        WeaponArchetype::Projectile,
        cooldown:         1.0,
        damage:           10.0,
        speed:            0.0,
        size:             8.0,
        pierce:           1,
        duration:         1.0,
        spread:           0.0,
        projectiles:      1,
        range:            0.0,
        chain_range:      0.0,
        chains:           0,
        stun:             0.0,
        orbit_radius:     0.0,
        orbit_speed:      0.0,
        turn_speed:       0.0,
        damage_interval:  0.0,
        radius:           0.0,
        width:            0.0,
        explosion_radius: 0.0,
        cone_angle:       0.0,
        max_distance:     0.0,
        requires_target:  false,
        homing_shots:     false,
        shoots_lasers:    false,
        laser:            false,
        max_level:        8,
        levels:           LevelBonus::NONE,
        evolution:        None,
    };

    /// `(base + inc × (level - 1))`（プレイヤー倍率は呼び出し側で掛ける）
    pub fn damage_at(&self, level: u32) -> f32 {
        self.damage + self.levels.damage * (level.max(1) - 1) as f32
    }

    pub fn projectiles_at(&self, level: u32) -> u32 {
        level_entry(self.levels.projectiles, level, self.projectiles)
    }

    pub fn pierce_at(&self, level: u32) -> u32 {
        level_entry(self.levels.pierce, level, self.pierce)
    }

    pub fn cooldown_mult_at(&self, level: u32) -> f32 {
        level_entry(self.levels.cooldown_mult, level, 1.0)
    }

    pub fn spread_at(&self, level: u32) -> f32 {
        level_entry(self.levels.spread, level, self.spread)
    }

    pub fn chains_at(&self, level: u32) -> u32 {
        level_entry(self.levels.chains, level, self.chains)
    }

    pub fn range_mult_at(&self, level: u32) -> f32 {
        level_entry(self.levels.range_mult, level, 1.0)
    }

    pub fn radius_mult_at(&self, level: u32) -> f32 {
        level_entry(self.levels.radius_mult, level, 1.0)
    }

    pub fn size_mult_at(&self, level: u32) -> f32 {
        level_entry(self.levels.size_mult, level, 1.0)
    }

    pub fn speed_mult_at(&self, level: u32) -> f32 {
        level_entry(self.levels.speed_mult, level, 1.0)
    }

    pub fn interval_mult_at(&self, level: u32) -> f32 {
        level_entry(self.levels.interval_mult, level, 1.0)
    }

    pub fn width_mult_at(&self, level: u32) -> f32 {
        level_entry(self.levels.width_mult, level, 1.0)
    }

    pub fn angle_mult_at(&self, level: u32) -> f32 {
        level_entry(self.levels.angle_mult, level, 1.0)
    }

    pub fn is_evolved(&self) -> bool {
        self.max_level == 1
    }
}

static WEAPON_TABLE: [WeaponParams; 15] = [
    WeaponParams {
        name: "Blaster", archetype: WeaponArchetype::Projectile,
        cooldown: 0.5, damage: 10.0, speed: 600.0, size: 8.0, pierce: 1, duration: 2.0,
        spread: 0.15, requires_target: true, laser: true,
        levels: LevelBonus {
            damage: 3.0,
            projectiles: &[1, 1, 1, 2, 2, 2, 3, 3],
            pierce: &[1, 1, 1, 1, 2, 2, 2, 2],
            cooldown_mult: &[1.0, 0.95, 0.9, 0.85, 0.8, 0.75, 0.7, 0.65],
            ..LevelBonus::NONE
        },
        evolution: Some(Evolution { requires: PassiveId::EnergyCell, becomes: WeaponId::DeathRay }),
        ..WeaponParams::BASE
    },
    WeaponParams {
        name: "Plasma Rifle", archetype: WeaponArchetype::Spread,
        cooldown: 1.0, damage: 8.0, speed: 500.0, size: 10.0, duration: 1.5, projectiles: 3,
        spread: 0.3,
        levels: LevelBonus {
            damage: 2.0,
            projectiles: &[3, 4, 4, 5, 5, 6, 7, 8],
            spread: &[0.3, 0.35, 0.4, 0.45, 0.5, 0.55, 0.6, 0.7],
            ..LevelBonus::NONE
        },
        evolution: Some(Evolution { requires: PassiveId::TargetingSystem, becomes: WeaponId::PlasmaStorm }),
        ..WeaponParams::BASE
    },
    WeaponParams {
        name: "Tesla Coil", archetype: WeaponArchetype::Lightning,
        cooldown: 1.2, damage: 15.0, range: 300.0, chain_range: 150.0, chains: 1,
        stun: 0.1, laser: true,
        levels: LevelBonus {
            damage: 4.0,
            chains: &[1, 1, 2, 2, 3, 3, 4, 5],
            range_mult: &[1.0, 1.1, 1.2, 1.3, 1.4, 1.5, 1.6, 1.8],
            ..LevelBonus::NONE
        },
        evolution: Some(Evolution { requires: PassiveId::Capacitor, becomes: WeaponId::ThunderGod }),
        ..WeaponParams::BASE
    },
    WeaponParams {
        name: "Shield Orbs", archetype: WeaponArchetype::Orbital,
        cooldown: 0.0, damage: 12.0, size: 15.0, projectiles: 2,
        orbit_radius: 80.0, orbit_speed: 2.0,
        levels: LevelBonus {
            damage: 3.0,
            projectiles: &[2, 3, 3, 4, 4, 5, 6, 8],
            radius_mult: &[1.0, 1.1, 1.2, 1.25, 1.3, 1.35, 1.4, 1.5],
            size_mult: &[1.0, 1.1, 1.15, 1.2, 1.25, 1.3, 1.4, 1.5],
            ..LevelBonus::NONE
        },
        evolution: Some(Evolution { requires: PassiveId::ReactorCore, becomes: WeaponId::OrbitalStrike }),
        ..WeaponParams::BASE
    },
    WeaponParams {
        name: "Homing Missiles", archetype: WeaponArchetype::Homing,
        cooldown: 1.5, damage: 25.0, speed: 250.0, size: 12.0, duration: 4.0,
        turn_speed: 3.0, spread: 0.5,
        levels: LevelBonus {
            damage: 6.0,
            projectiles: &[1, 1, 2, 2, 3, 3, 4, 5],
            speed_mult: &[1.0, 1.1, 1.2, 1.3, 1.4, 1.5, 1.6, 1.8],
            ..LevelBonus::NONE
        },
        evolution: Some(Evolution { requires: PassiveId::NanoSwarm, becomes: WeaponId::DroneSwarm }),
        ..WeaponParams::BASE
    },
    WeaponParams {
        name: "Force Field", archetype: WeaponArchetype::Aura,
        cooldown: 0.0, damage: 5.0, damage_interval: 0.5, radius: 100.0,
        levels: LevelBonus {
            damage: 2.0,
            radius_mult: &[1.0, 1.15, 1.3, 1.45, 1.6, 1.75, 1.9, 2.1],
            interval_mult: &[1.0, 0.95, 0.9, 0.85, 0.8, 0.75, 0.7, 0.6],
            ..LevelBonus::NONE
        },
        ..WeaponParams::BASE
    },
    WeaponParams {
        name: "Rail Gun", archetype: WeaponArchetype::Piercing,
        cooldown: 2.0, damage: 40.0, speed: 1200.0, pierce: 999, duration: 1.0,
        width: 10.0, requires_target: true, laser: true,
        levels: LevelBonus {
            damage: 12.0,
            width_mult: &[1.0, 1.2, 1.4, 1.6, 1.8, 2.0, 2.3, 2.6],
            cooldown_mult: &[1.0, 0.95, 0.9, 0.85, 0.8, 0.75, 0.7, 0.6],
            ..LevelBonus::NONE
        },
        ..WeaponParams::BASE
    },
    WeaponParams {
        name: "Grenade Launcher", archetype: WeaponArchetype::Explosive,
        cooldown: 1.8, damage: 20.0, speed: 350.0, size: 14.0, duration: 1.5,
        explosion_radius: 80.0,
        levels: LevelBonus {
            damage: 5.0,
            radius_mult: &[1.0, 1.15, 1.3, 1.45, 1.6, 1.8, 2.0, 2.3],
            projectiles: &[1, 1, 2, 2, 2, 3, 3, 4],
            ..LevelBonus::NONE
        },
        ..WeaponParams::BASE
    },
    WeaponParams {
        name: "Flamethrower", archetype: WeaponArchetype::Cone,
        cooldown: 0.0, damage: 3.0, damage_interval: 0.1, range: 120.0, cone_angle: 0.6,
        levels: LevelBonus {
            damage: 1.0,
            range_mult: &[1.0, 1.15, 1.3, 1.45, 1.6, 1.75, 1.9, 2.1],
            angle_mult: &[1.0, 1.1, 1.2, 1.3, 1.4, 1.5, 1.6, 1.8],
            ..LevelBonus::NONE
        },
        ..WeaponParams::BASE
    },
    WeaponParams {
        name: "Boomerang Drone", archetype: WeaponArchetype::Boomerang,
        cooldown: 1.3, damage: 18.0, speed: 400.0, size: 16.0, pierce: 999, duration: 10.0,
        max_distance: 350.0, spread: 0.8,
        levels: LevelBonus {
            damage: 4.0,
            projectiles: &[1, 1, 2, 2, 2, 3, 3, 4],
            speed_mult: &[1.0, 1.1, 1.2, 1.3, 1.4, 1.5, 1.6, 1.8],
            ..LevelBonus::NONE
        },
        ..WeaponParams::BASE
    },
    // ── 進化武器（レベル 1 固定） ──
    WeaponParams {
        name: "Death Ray", archetype: WeaponArchetype::Beam,
        cooldown: 0.0, damage: 50.0, damage_interval: 0.05, range: 500.0, width: 20.0,
        laser: true, max_level: 1,
        ..WeaponParams::BASE
    },
    WeaponParams {
        name: "Plasma Storm", archetype: WeaponArchetype::Spread,
        cooldown: 0.8, damage: 15.0, speed: 600.0, size: 10.0, duration: 2.0, projectiles: 12,
        spread: std::f32::consts::TAU / 12.0, turn_speed: 3.0, homing_shots: true,
        max_level: 1,
        ..WeaponParams::BASE
    },
    WeaponParams {
        name: "Thunder God", archetype: WeaponArchetype::Lightning,
        cooldown: 0.8, damage: 35.0, range: 300.0, chain_range: 150.0, chains: 8, stun: 0.5,
        laser: true, max_level: 1,
        ..WeaponParams::BASE
    },
    WeaponParams {
        name: "Orbital Strike", archetype: WeaponArchetype::Orbital,
        cooldown: 0.0, damage: 25.0, size: 18.0, projectiles: 8,
        orbit_radius: 100.0, orbit_speed: 2.0, speed: 500.0, duration: 1.0,
        shoots_lasers: true, laser: true, max_level: 1,
        ..WeaponParams::BASE
    },
    WeaponParams {
        name: "Drone Swarm", archetype: WeaponArchetype::Swarm,
        cooldown: 1.0, damage: 8.0, speed: 300.0, size: 6.0, duration: 3.0, projectiles: 20,
        turn_speed: 4.0, max_level: 1,
        ..WeaponParams::BASE
    },
];

impl WeaponId {
    pub fn params(self) -> &'static WeaponParams {
        &WEAPON_TABLE[self as usize]
    }

    /// レベルアップ候補になる基本武器（進化武器を除く）
    pub const BASE_WEAPONS: &'static [WeaponId] = &[
        Self::Blaster, Self::PlasmaRifle, Self::TeslaCoil, Self::ShieldOrbs, Self::HomingMissiles,
        Self::ForceField, Self::RailGun, Self::GrenadeLauncher, Self::Flamethrower,
        Self::BoomerangDrone,
    ];
}

impl TemplateId for WeaponId {
    const CATEGORY: &'static str = "weapon";
    const ALL: &'static [Self] = &[
        Self::Blaster, Self::PlasmaRifle, Self::TeslaCoil, Self::ShieldOrbs, Self::HomingMissiles,
        Self::ForceField, Self::RailGun, Self::GrenadeLauncher, Self::Flamethrower,
        Self::BoomerangDrone, Self::DeathRay, Self::PlasmaStorm, Self::ThunderGod,
        Self::OrbitalStrike, Self::DroneSwarm,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::Blaster         => "blaster",
            Self::PlasmaRifle     => "plasma_rifle",
            Self::TeslaCoil       => "tesla_coil",
            Self::ShieldOrbs      => "shield_orbs",
            Self::HomingMissiles  => "homing_missiles",
            Self::ForceField      => "force_field",
            Self::RailGun         => "rail_gun",
            Self::GrenadeLauncher => "grenade_launcher",
            Self::Flamethrower    => "flamethrower",
            Self::BoomerangDrone  => "boomerang_drone",
            Self::DeathRay        => "death_ray",
            Self::PlasmaStorm     => "plasma_storm",
            Self::ThunderGod      => "thunder_god",
            Self::OrbitalStrike   => "orbital_strike",
            Self::DroneSwarm      => "drone_swarm",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_order_matches_ids() {
        for &id in WeaponId::ALL {
            let p = id.params();
            assert!(!p.name.is_empty());
            assert_eq!(p.archetype.is_continuous(), p.cooldown == 0.0, "{}", id.as_str());
        }
    }

    #[test]
    fn blaster_level_scaling() {
        let p = WeaponId::Blaster.params();
        assert_eq!(p.damage_at(1), 10.0);
        assert_eq!(p.damage_at(3), 16.0);
        assert_eq!(p.projectiles_at(1), 1);
        assert_eq!(p.projectiles_at(8), 3);
        assert_eq!(p.pierce_at(4), 1);
        assert_eq!(p.pierce_at(5), 2);
        assert!((p.cooldown_mult_at(8) - 0.65).abs() < 1e-6);
    }

    #[test]
    fn evolutions_point_to_evolved_weapons() {
        for &id in WeaponId::BASE_WEAPONS {
            if let Some(evo) = id.params().evolution {
                assert!(evo.becomes.params().is_evolved());
                assert!(evo.requires.params().catalyst);
            }
        }
    }
}
