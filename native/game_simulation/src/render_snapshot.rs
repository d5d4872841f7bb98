//! Path: native/game_simulation/src/render_snapshot.rs
//! Summary: GameWorld から描画用スナップショットを構築（読み取り専用のコピー）
//!
//! 描画側は tick の完了を待たずにこのコピーだけを参照する。
//! コアは描画の完了を待たない。

use crate::game_logic::systems::leveling::UpgradeChoice;
use crate::world::{EnemyKind, GameWorld, Owner, SessionPhase, WeaponEffect};
use game_core::constants::{INVINCIBLE_DURATION, VIEW_HALF_HEIGHT, VIEW_HALF_WIDTH};
use game_core::entity_params::{BossId, DropKind, WeaponId};
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlayerSprite {
    pub x:          f32,
    pub y:          f32,
    pub facing:     f32,
    pub invincible: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EnemySprite {
    pub x:         f32,
    pub y:         f32,
    pub radius:    f32,
    pub kind:      EnemyKind,
    pub elite:     bool,
    /// 正なら被弾フラッシュ中
    pub hit_flash: f32,
    pub phased:    bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProjectileSprite {
    pub x:       f32,
    pub y:       f32,
    pub radius:  f32,
    pub hostile: bool,
    pub source:  Option<WeaponId>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ItemSprite {
    pub x:    f32,
    pub y:    f32,
    pub kind: DropKind,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BossHudInfo {
    pub boss:    BossId,
    pub name:    &'static str,
    pub hp:      f32,
    pub max_hp:  f32,
    pub phase:   u32,
    pub enraged: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HudData {
    pub hp:                 f32,
    pub max_hp:             f32,
    pub level:              u32,
    pub xp:                 u32,
    pub xp_to_next:         u32,
    pub elapsed_seconds:    f32,
    pub duration:           f32,
    pub kills:              u32,
    pub gold:               u32,
    pub wave:               usize,
    pub enemy_count:        usize,
    pub projectile_count:   usize,
    pub weapon_levels:      Vec<(WeaponId, u32)>,
    pub boss_info:          Option<BossHudInfo>,
    pub phase:              SessionPhase,
    pub upgrade_choices:    Vec<UpgradeChoice>,
    pub double_damage:      bool,
    pub camera_x:           f32,
    pub camera_y:           f32,
    pub screen_flash_alpha: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RenderSnapshot {
    pub frame_id:    u32,
    pub player:      PlayerSprite,
    pub enemies:     Vec<EnemySprite>,
    pub projectiles: Vec<ProjectileSprite>,
    pub items:       Vec<ItemSprite>,
    /// 未開封の宝箱の位置
    pub chests:      Vec<(f32, f32)>,
    pub effects:     Vec<WeaponEffect>,
    pub hud:         HudData,
}

/// GameWorld から RenderSnapshot を構築する
pub fn build_render_snapshot(w: &GameWorld) -> RenderSnapshot {
    let mut enemies = Vec::with_capacity(w.enemies.count);
    for i in 0..w.enemies.len() {
        if w.enemies.alive[i] {
            enemies.push(EnemySprite {
                x:         w.enemies.positions_x[i],
                y:         w.enemies.positions_y[i],
                radius:    w.enemies.radius[i],
                kind:      w.enemies.kinds[i],
                elite:     w.enemies.elite[i],
                hit_flash: w.enemies.hit_flash[i],
                phased:    w.enemies.is_phased(i),
            });
        }
    }

    let mut projectiles = Vec::with_capacity(w.projectiles.count);
    for i in 0..w.projectiles.len() {
        if w.projectiles.alive[i] {
            projectiles.push(ProjectileSprite {
                x:       w.projectiles.positions_x[i],
                y:       w.projectiles.positions_y[i],
                radius:  w.projectiles.radius[i],
                hostile: w.projectiles.owner[i] == Owner::Enemy,
                source:  w.projectiles.source[i],
            });
        }
    }

    let mut items = Vec::with_capacity(w.items.count);
    for i in 0..w.items.len() {
        if w.items.alive[i] {
            items.push(ItemSprite { x: w.items.positions_x[i], y: w.items.positions_y[i], kind: w.items.kinds[i] });
        }
    }

    let boss_info = (0..w.enemies.len())
        .filter(|&i| w.enemies.alive[i])
        .find_map(|i| match (w.enemies.kinds[i], w.enemies.boss[i].as_ref()) {
            (EnemyKind::Boss(boss), Some(state)) => Some(BossHudInfo {
                boss,
                name:    boss.params().name,
                hp:      w.enemies.hp[i].max(0.0),
                max_hp:  w.enemies.max_hp[i],
                phase:   state.phase,
                enraged: state.enraged,
            }),
            _ => None,
        });

    let p = &w.player;
    let screen_flash_alpha = if p.invincible_timer > 0.0 && INVINCIBLE_DURATION > 0.0 {
        // 被弾直後に強く、無敵時間の減衰にあわせて弱くする（最大 0.5）
        (p.invincible_timer / INVINCIBLE_DURATION).clamp(0.0, 1.0) * 0.5
    } else {
        0.0
    };

    let hud = HudData {
        hp:                 p.hp.max(0.0),
        max_hp:             p.stats.max_hp,
        level:              p.level,
        xp:                 p.xp,
        xp_to_next:         p.xp_to_next,
        elapsed_seconds:    w.elapsed,
        duration:           w.duration,
        kills:              w.kills,
        gold:               p.gold,
        wave:               w.spawner.wave_number(),
        enemy_count:        w.enemies.count,
        projectile_count:   w.projectiles.count,
        weapon_levels:      p.weapons.iter().map(|wp| (wp.id, wp.level)).collect(),
        boss_info,
        phase:              w.phase,
        upgrade_choices:    w.upgrade_choices.clone(),
        double_damage:      p.double_damage_timer > 0.0,
        camera_x:           p.x - VIEW_HALF_WIDTH,
        camera_y:           p.y - VIEW_HALF_HEIGHT,
        screen_flash_alpha,
    };

    RenderSnapshot {
        frame_id: w.frame_id,
        player: PlayerSprite { x: p.x, y: p.y, facing: p.facing, invincible: p.is_invincible() },
        enemies,
        projectiles,
        items,
        chests: w.chests.closed().map(|c| (c.x, c.y)).collect(),
        effects: w.effects.clone(),
        hud,
    }
}
