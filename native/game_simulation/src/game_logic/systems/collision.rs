use super::damage::damage_enemy;
use crate::world::{BehaviorState, DamageOutcome, FrameEvent, GameWorld};
use game_core::constants::{KAMIKAZE_SPLASH_RATIO, PLAYER_RADIUS};
use game_core::util::distance_sq;

/// プレイヤーへのダメージ適用（アーマー・無敵・復活はプレイヤー側で判定）
pub(crate) fn hurt_player(w: &mut GameWorld, amount: f32) -> DamageOutcome {
    let outcome = w.player.take_damage(amount, &mut w.rng);
    match outcome {
        DamageOutcome::Blocked => {}
        DamageOutcome::Hurt(dealt) | DamageOutcome::Died(dealt) => {
            w.frame_events.push(FrameEvent::PlayerDamaged { damage: dealt });
        }
        DamageOutcome::Revived(dealt) => {
            log::info!("player revived at {:.1}s", w.elapsed);
            w.frame_events.push(FrameEvent::PlayerDamaged { damage: dealt });
            w.frame_events.push(FrameEvent::PlayerRevived);
        }
    }
    outcome
}

/// プレイヤーと敵の接触。被弾すると無敵が張られるので 1 tick に効くのは最初の 1 体だけ。
/// 自爆型は接触した tick に周囲の敵を巻き込んで消える
pub(crate) fn resolve_player_contacts(w: &mut GameWorld) {
    if w.player.is_invincible() || w.player.is_dead() {
        return;
    }
    let px = w.player.x;
    let py = w.player.y;
    for i in 0..w.enemies.len() {
        if !w.enemies.is_targetable(i) {
            continue;
        }
        let reach = w.enemies.radius[i] + PLAYER_RADIUS;
        if distance_sq(w.enemies.positions_x[i], w.enemies.positions_y[i], px, py) >= reach * reach {
            continue;
        }
        let damage = w.enemies.damage[i];
        hurt_player(w, damage);
        if let BehaviorState::Kamikaze { explosion_radius } = w.enemies.behavior[i] {
            detonate(w, i, explosion_radius);
        }
        if w.player.is_invincible() || w.player.is_dead() {
            break;
        }
    }
}

fn detonate(w: &mut GameWorld, i: usize, radius: f32) {
    let x = w.enemies.positions_x[i];
    let y = w.enemies.positions_y[i];
    let splash = w.enemies.damage[i] * KAMIKAZE_SPLASH_RATIO;
    w.enemies.hp[i] = 0.0;

    let mut buf = std::mem::take(&mut w.query_buf);
    w.spatial.query_nearby_into(x, y, radius, &mut buf);
    let r_sq = radius * radius;
    for &j in buf.iter() {
        if j == i || j >= w.enemies.len() || !w.enemies.is_targetable(j) {
            continue;
        }
        if distance_sq(w.enemies.positions_x[j], w.enemies.positions_y[j], x, y) < r_sq {
            damage_enemy(w, j, splash, None, None, false);
        }
    }
    w.query_buf = buf;
    w.frame_events.push(FrameEvent::Explosion { x, y, radius });
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
    fn contact_hurts_once_then_invincibility_blocks() {
        let mut w = world();
        let (px, py) = (w.player.x, w.player.y);
        w.enemies.spawn_enemy(EnemyId::Grunt, px + 5.0, py, false, 1.0);
        w.enemies.spawn_enemy(EnemyId::Grunt, px - 5.0, py, false, 1.0);
        let before = w.player.hp;
        w.rebuild_collision();
        resolve_player_contacts(&mut w);
        let hits = w.frame_events.iter().filter(|e| matches!(e, FrameEvent::PlayerDamaged { .. })).count();
        assert_eq!(hits, 1);
        assert!(w.player.hp < before);
        let after = w.player.hp;
        resolve_player_contacts(&mut w);
        assert_eq!(w.player.hp, after);
    }

    #[test]
    fn distant_enemies_do_not_touch() {
        let mut w = world();
        let (px, py) = (w.player.x, w.player.y);
        w.enemies.spawn_enemy(EnemyId::Grunt, px + 200.0, py, false, 1.0);
        let before = w.player.hp;
        w.rebuild_collision();
        resolve_player_contacts(&mut w);
        assert_eq!(w.player.hp, before);
    }

    #[test]
    fn kamikaze_hits_player_once_splashes_and_dies() {
        let mut w = world();
        let (px, py) = (w.player.x, w.player.y);
        let k = w.enemies.spawn_enemy(EnemyId::Exploder, px + 10.0, py, false, 1.0).unwrap().index();
        let near = w.enemies.spawn_enemy(EnemyId::Tank, px + 40.0, py + 30.0, false, 1.0).unwrap().index();
        let far = w.enemies.spawn_enemy(EnemyId::Tank, px + 400.0, py, false, 1.0).unwrap().index();
        let splash = w.enemies.damage[k] * KAMIKAZE_SPLASH_RATIO;
        let near_hp = w.enemies.hp[near];
        let far_hp = w.enemies.hp[far];

        w.rebuild_collision();
        resolve_player_contacts(&mut w);

        assert_eq!(w.enemies.hp[k], 0.0);
        assert!((w.enemies.hp[near] - (near_hp - splash)).abs() < 1e-4);
        assert_eq!(w.enemies.hp[far], far_hp);
        let damaged = w.frame_events.iter().filter(|e| matches!(e, FrameEvent::PlayerDamaged { .. })).count();
        assert_eq!(damaged, 1);
        assert!(w.frame_events.iter().any(|e| matches!(e, FrameEvent::Explosion { .. })));
    }
}
