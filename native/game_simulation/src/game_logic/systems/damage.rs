use crate::world::{EnemyKind, FrameEvent, GameWorld};
use game_core::constants::{
    BOSS_GOLD_DROPS, BOSS_XP_DROPS, DROP_JITTER, DROP_SCATTER, ELITE_GOLD_CHANCE, ELITE_GOLD_VALUE,
    ELITE_HEALTH_CHANCE,
};
use game_core::entity_params::{BossId, DropKind, WeaponId};

/// 敵へのダメージ適用。撃破判定は `resolve_deaths` でまとめて行う
pub(crate) fn damage_enemy(
    w: &mut GameWorld,
    i: usize,
    amount: f32,
    knockback: Option<(f32, f32)>,
    weapon: Option<WeaponId>,
    crit: bool,
) -> bool {
    if weapon.is_some() {
        w.enemies.last_hit[i] = weapon;
    }
    w.frame_events.push(FrameEvent::EnemyHit { damage: amount, crit });
    w.enemies.take_damage(i, amount, knockback)
}

/// HP 0 以下の敵を 1 体につき 1 回だけ処理する（撃破数・ドロップ・宝箱・イベント）
pub(crate) fn resolve_deaths(w: &mut GameWorld) {
    for i in 0..w.enemies.len() {
        if !w.enemies.alive[i] || w.enemies.hp[i] > 0.0 {
            continue;
        }
        let x = w.enemies.positions_x[i];
        let y = w.enemies.positions_y[i];
        w.kills += 1;
        match w.enemies.kinds[i] {
            EnemyKind::Regular(enemy) => {
                let elite = w.enemies.elite[i];
                w.frame_events.push(FrameEvent::EnemyKilled { enemy, elite, weapon: w.enemies.last_hit[i] });
                drop_regular(w, i, x, y);
            }
            EnemyKind::Boss(boss) => {
                w.boss_kills += 1;
                log::info!("boss defeated: {:?} at {:.1}s", boss, w.elapsed);
                w.frame_events.push(FrameEvent::BossDefeated { boss });
                let xp = w.enemies.xp[i];
                drop_boss(w, boss, xp, x, y);
                if !w.chests.spawn(x, y) {
                    log::warn!("chest pool full, boss chest dropped");
                }
            }
        }
        w.enemies.kill(i);
    }
}

fn scatter(w: &mut GameWorld, x: f32, y: f32, amount: f32) -> (f32, f32) {
    (x + w.rng.signed(amount), y + w.rng.signed(amount))
}

fn drop_item(w: &mut GameWorld, x: f32, y: f32, kind: DropKind, value: u32) {
    let (dx, dy) = scatter(w, x, y, DROP_SCATTER);
    w.items.spawn(dx, dy, kind, value);
}

fn drop_regular(w: &mut GameWorld, i: usize, x: f32, y: f32) {
    let xp = w.enemies.xp[i];
    if xp > 0 {
        drop_item(w, x, y, DropKind::xp_tier(xp), xp);
    }
    if w.rng.chance(w.enemies.gold_chance[i]) {
        drop_item(w, x, y, DropKind::GoldSmall, DropKind::GoldSmall.params().value);
    }
    if w.enemies.elite[i] {
        if w.rng.chance(ELITE_GOLD_CHANCE) {
            drop_item(w, x, y, DropKind::GoldLarge, ELITE_GOLD_VALUE);
        }
        if w.rng.chance(ELITE_HEALTH_CHANCE) {
            drop_item(w, x, y, DropKind::HealthSmall, DropKind::HealthSmall.params().value);
        }
    }
    let luck = w.player.stats.luck;
    for &kind in DropKind::SPECIALS {
        if w.rng.chance(kind.params().chance * (1.0 + luck)) {
            let (dx, dy) = scatter(w, x, y, DROP_JITTER);
            w.items.spawn(dx, dy, kind, 0);
        }
    }
}

fn drop_boss(w: &mut GameWorld, boss: BossId, xp: u32, x: f32, y: f32) {
    for _ in 0..BOSS_XP_DROPS {
        drop_item(w, x, y, DropKind::XpRare, xp / BOSS_XP_DROPS);
    }
    let gold = boss.params().gold;
    for _ in 0..BOSS_GOLD_DROPS {
        drop_item(w, x, y, DropKind::GoldLarge, gold / BOSS_GOLD_DROPS);
    }
    drop_item(w, x, y, DropKind::HealthLarge, DropKind::HealthLarge.params().value);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SessionConfig;
    use game_core::entity_params::{CharacterId, EnemyId, MapId};
    use game_core::stats::TalentBonuses;

    fn world() -> GameWorld {
        GameWorld::new(MapId::Station, CharacterId::Commander, TalentBonuses::default(), SessionConfig::default())
    }

    #[test]
    fn dead_enemy_is_resolved_exactly_once() {
        let mut w = world();
        let i = w.enemies.spawn_enemy(EnemyId::Grunt, 100.0, 100.0, false, 1.0).unwrap().index();
        damage_enemy(&mut w, i, 100.0, None, Some(WeaponId::Blaster), false);
        resolve_deaths(&mut w);
        resolve_deaths(&mut w);
        assert_eq!(w.kills, 1);
        assert!(!w.enemies.alive[i]);
        let killed: Vec<_> = w
            .frame_events
            .iter()
            .filter(|e| matches!(e, FrameEvent::EnemyKilled { .. }))
            .collect();
        assert_eq!(
            killed,
            vec![&FrameEvent::EnemyKilled { enemy: EnemyId::Grunt, elite: false, weapon: Some(WeaponId::Blaster) }]
        );
        // xp 1 の grunt は xp_small を必ず落とす
        assert!((0..w.items.len()).any(|k| w.items.alive[k] && w.items.kinds[k] == DropKind::XpSmall));
    }

    #[test]
    fn survivors_are_untouched() {
        let mut w = world();
        let i = w.enemies.spawn_enemy(EnemyId::Tank, 100.0, 100.0, false, 1.0).unwrap().index();
        damage_enemy(&mut w, i, 1.0, None, None, false);
        resolve_deaths(&mut w);
        assert!(w.enemies.alive[i]);
        assert_eq!(w.kills, 0);
    }

    #[test]
    fn boss_death_drops_loot_and_chest() {
        let mut w = world();
        let i = w.enemies.spawn_boss(BossId::HiveQueen, 500.0, 500.0, 1.0).unwrap().index();
        w.enemies.hp[i] = 0.0;
        resolve_deaths(&mut w);
        assert_eq!(w.boss_kills, 1);
        assert_eq!(w.chests.closed().count(), 1);
        let count = |kind| (0..w.items.len()).filter(|&k| w.items.alive[k] && w.items.kinds[k] == kind).count();
        assert_eq!(count(DropKind::XpRare), 10);
        assert_eq!(count(DropKind::GoldLarge), 5);
        assert_eq!(count(DropKind::HealthLarge), 1);
        assert!(w.frame_events.contains(&FrameEvent::BossDefeated { boss: BossId::HiveQueen }));
    }
}
