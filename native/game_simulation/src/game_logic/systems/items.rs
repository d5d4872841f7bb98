use super::damage::damage_enemy;
use super::leveling::open_chest;
use crate::world::{Attraction, FrameEvent, GameWorld};
use game_core::constants::{
    CHEST_GOLD, CHEST_RADIUS, CHEST_UPGRADES, DOUBLE_DAMAGE_DURATION, INVINCIBLE_BUFF_DURATION,
    ITEM_ATTRACT_SPEED, ITEM_COLLECT_RADIUS, ITEM_MAGNET_SPEED_MULT, PLAYER_RADIUS,
    VIEW_HALF_HEIGHT, VIEW_HALF_WIDTH,
};
use game_core::entity_params::DropKind;
use game_core::util::{distance_sq, normalize};

/// 寿命・吸引・取得。取得したアイテムの効果は即座に反映する
pub(crate) fn update_items(w: &mut GameWorld, dt: f32) {
    let px = w.player.x;
    let py = w.player.y;
    let pickup_sq = w.player.stats.pickup_range * w.player.stats.pickup_range;
    let collect_sq = ITEM_COLLECT_RADIUS * ITEM_COLLECT_RADIUS;

    for i in 0..w.items.len() {
        if !w.items.alive[i] {
            continue;
        }
        w.items.lifetime[i] -= dt;
        if w.items.lifetime[i] <= 0.0 {
            w.items.kill(i);
            continue;
        }

        let ix = w.items.positions_x[i];
        let iy = w.items.positions_y[i];
        if w.items.attraction[i] == Attraction::None && distance_sq(ix, iy, px, py) < pickup_sq {
            w.items.attraction[i] = Attraction::InRange;
        }
        let speed = match w.items.attraction[i] {
            Attraction::None       => 0.0,
            Attraction::InRange    => ITEM_ATTRACT_SPEED,
            Attraction::Magnetized => ITEM_ATTRACT_SPEED * ITEM_MAGNET_SPEED_MULT,
        };
        if speed > 0.0 {
            if let Some((nx, ny)) = normalize(px - ix, py - iy) {
                let step = (speed * dt).min(distance_sq(ix, iy, px, py).sqrt());
                w.items.positions_x[i] += nx * step;
                w.items.positions_y[i] += ny * step;
            }
        }

        if distance_sq(w.items.positions_x[i], w.items.positions_y[i], px, py) < collect_sq {
            let kind = w.items.kinds[i];
            let value = w.items.value[i];
            w.items.kill(i);
            apply_pickup(w, kind, value);
        }
    }
}

fn apply_pickup(w: &mut GameWorld, kind: DropKind, value: u32) {
    match kind {
        DropKind::XpSmall | DropKind::XpMedium | DropKind::XpLarge | DropKind::XpRare => {
            w.player.add_xp(value);
        }
        DropKind::GoldSmall | DropKind::GoldLarge => {
            w.player.gold = w.player.gold.saturating_add(value);
        }
        DropKind::HealthSmall | DropKind::HealthLarge => {
            w.player.heal(value as f32);
        }
        DropKind::Magnet => w.items.magnetize_all(),
        DropKind::Nuke => nuke(w),
        DropKind::Invincible => w.player.apply_invincible(INVINCIBLE_BUFF_DURATION),
        DropKind::DoubleDamage => w.player.apply_double_damage(DOUBLE_DAMAGE_DURATION),
    }
    w.frame_events.push(FrameEvent::ItemPickup { kind });
}

/// 画面内の通常敵を即死させ、ボスには最大 HP の 10% を与える
fn nuke(w: &mut GameWorld) {
    let px = w.player.x;
    let py = w.player.y;
    let mut killed = 0;
    for i in 0..w.enemies.len() {
        if !w.enemies.is_targetable(i) {
            continue;
        }
        let dx = (w.enemies.positions_x[i] - px).abs();
        let dy = (w.enemies.positions_y[i] - py).abs();
        if dx >= VIEW_HALF_WIDTH || dy >= VIEW_HALF_HEIGHT {
            continue;
        }
        if w.enemies.is_boss(i) {
            let amount = w.enemies.max_hp[i] * 0.1;
            damage_enemy(w, i, amount, None, None, false);
        } else {
            w.enemies.hp[i] = 0.0;
            killed += 1;
        }
    }
    log::debug!("nuke cleared {} enemies", killed);
}

/// 閉じた宝箱に触れたら開ける
pub(crate) fn update_chests(w: &mut GameWorld) {
    let reach = CHEST_RADIUS + PLAYER_RADIUS;
    let mut opened = 0;
    for chest in w.chests.chests.iter_mut() {
        if !chest.open && distance_sq(chest.x, chest.y, w.player.x, w.player.y) < reach * reach {
            chest.open = true;
            opened += 1;
        }
    }
    for _ in 0..opened {
        open_chest(w, CHEST_GOLD, CHEST_UPGRADES);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SessionConfig;
    use game_core::entity_params::{BossId, CharacterId, EnemyId, MapId};
    use game_core::stats::TalentBonuses;

    fn world() -> GameWorld {
        GameWorld::new(MapId::Station, CharacterId::Commander, TalentBonuses::default(), SessionConfig::default())
    }

    #[test]
    fn xp_in_range_is_pulled_and_collected() {
        let mut w = world();
        let (px, py) = (w.player.x, w.player.y);
        w.items.spawn(px + 40.0, py, DropKind::XpMedium, 5);
        update_items(&mut w, 0.016);
        assert_eq!(w.items.attraction[0], Attraction::InRange);
        for _ in 0..10 {
            update_items(&mut w, 0.016);
        }
        assert_eq!(w.items.count, 0);
        assert_eq!(w.player.xp, 5);
        assert!(w.frame_events.contains(&FrameEvent::ItemPickup { kind: DropKind::XpMedium }));
    }

    #[test]
    fn items_outside_range_stay_and_expire() {
        let mut w = world();
        let (px, py) = (w.player.x, w.player.y);
        w.items.spawn(px + 300.0, py, DropKind::GoldSmall, 1);
        update_items(&mut w, 1.0);
        assert_eq!(w.items.positions_x[0], px + 300.0);
        update_items(&mut w, 60.0);
        assert_eq!(w.items.count, 0);
        assert_eq!(w.player.gold, 0);
    }

    #[test]
    fn magnet_pulls_from_afar_at_double_speed() {
        let mut w = world();
        let (px, py) = (w.player.x, w.player.y);
        w.items.spawn(px + 1000.0, py, DropKind::XpSmall, 1);
        apply_pickup(&mut w, DropKind::Magnet, 0);
        update_items(&mut w, 0.1);
        let moved = px + 1000.0 - w.items.positions_x[0];
        assert!((moved - ITEM_ATTRACT_SPEED * ITEM_MAGNET_SPEED_MULT * 0.1).abs() < 1e-2);
    }

    #[test]
    fn nuke_kills_regulars_on_screen_and_chips_bosses() {
        let mut w = world();
        let (px, py) = (w.player.x, w.player.y);
        let near = w.enemies.spawn_enemy(EnemyId::Tank, px + 300.0, py, false, 1.0).unwrap().index();
        let off = w.enemies.spawn_enemy(EnemyId::Tank, px + 900.0, py, false, 1.0).unwrap().index();
        let boss = w.enemies.spawn_boss(BossId::HiveQueen, px - 200.0, py, 1.0).unwrap().index();
        let boss_hp = w.enemies.max_hp[boss];
        nuke(&mut w);
        assert_eq!(w.enemies.hp[near], 0.0);
        assert!(w.enemies.hp[off] > 0.0);
        assert!((w.enemies.hp[boss] - boss_hp * 0.9).abs() < 1e-2);
    }

    #[test]
    fn buffs_and_heal_apply() {
        let mut w = world();
        w.player.hp = 10.0;
        apply_pickup(&mut w, DropKind::HealthSmall, 20);
        assert_eq!(w.player.hp, 30.0);
        apply_pickup(&mut w, DropKind::Invincible, 0);
        assert!(w.player.is_invincible());
        let base = w.player.stats.damage_mult;
        apply_pickup(&mut w, DropKind::DoubleDamage, 0);
        assert!((w.player.stats.damage_mult - base * 2.0).abs() < 1e-4);
    }

    #[test]
    fn touching_chest_opens_it_once() {
        let mut w = world();
        let (px, py) = (w.player.x, w.player.y);
        assert!(w.chests.spawn(px + 10.0, py));
        update_chests(&mut w);
        update_chests(&mut w);
        assert_eq!(w.player.gold, CHEST_GOLD);
        assert_eq!(w.pending_upgrades, CHEST_UPGRADES);
        assert_eq!(w.chests.closed().count(), 0);
    }
}
