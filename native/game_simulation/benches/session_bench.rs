//! Path: native/game_simulation/benches/session_bench.rs
//! Summary: 敵・弾を詰めた状態での Session::tick ベンチマーク

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use game_core::entity_params::{CharacterId, EnemyId, MapId, WeaponId};
use game_core::stats::TalentBonuses;
use game_simulation::world::{Motion, Owner};
use game_simulation::{ProjectileConfig, Session, SessionConfig, TickInput};

#[derive(Clone, Copy)]
struct Scenario {
    name:        &'static str,
    enemies:     usize,
    projectiles: usize,
}

const KINDS: [EnemyId; 4] = [EnemyId::Grunt, EnemyId::Insectoid, EnemyId::Drone, EnemyId::Tank];

fn build_session(s: Scenario) -> Session {
    let mut session = Session::new(MapId::Station, CharacterId::Commander, TalentBonuses::default(), SessionConfig::default());
    let w = session.world_mut();
    let (px, py) = (w.player.x, w.player.y);

    for i in 0..s.enemies {
        let a = i as f32 * 0.37;
        let r = 150.0 + (i % 40) as f32 * 12.0;
        w.enemies.spawn_enemy(KINDS[i % KINDS.len()], px + a.cos() * r, py + a.sin() * r, i % 25 == 0, 1.0);
    }
    for i in 0..s.projectiles {
        let a = i as f32 * 0.017;
        w.projectiles.spawn(ProjectileConfig {
            x:                px,
            y:                py,
            vx:               a.cos() * 400.0,
            vy:               a.sin() * 400.0,
            damage:           10.0,
            radius:           5.0,
            duration:         1.5,
            pierce:           2,
            owner:            Owner::Player,
            motion:           Motion::Straight,
            explosion_radius: None,
            source:           Some(WeaponId::Blaster),
        });
    }
    session
}

fn bench_session_tick(c: &mut Criterion) {
    let scenarios = [
        Scenario { name: "session_tick_light", enemies: 100, projectiles: 50 },
        Scenario { name: "session_tick_medium", enemies: 250, projectiles: 300 },
        Scenario { name: "session_tick_full", enemies: 500, projectiles: 1_000 },
    ];
    let input = TickInput { move_x: 1.0, move_y: 0.0, toggle_pause: false };

    for scenario in scenarios {
        c.bench_function(scenario.name, |b| {
            b.iter_batched(
                || build_session(scenario),
                |mut session| {
                    session.tick(1.0 / 60.0, input);
                    session
                },
                BatchSize::PerIteration,
            )
        });
    }
}

criterion_group!(benches, bench_session_tick);
criterion_main!(benches);
