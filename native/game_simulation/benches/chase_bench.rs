//! Path: native/game_simulation/benches/chase_bench.rs
//! Summary: Chase AI ベンチマーク（rayon 並列の追跡移動）

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use game_core::constants::MAX_ENEMIES;
use game_core::entity_params::EnemyId;
use game_simulation::{update_chase_ai, EnemyWorld};

fn setup_enemies(n: usize) -> EnemyWorld {
    let mut enemies = EnemyWorld::new(n);
    for i in 0..n {
        let x = (i as f32 * 1.7) % 1280.0;
        let y = (i as f32 * 2.3) % 720.0;
        enemies.spawn_enemy(EnemyId::Grunt, x, y, false, 1.0);
    }
    enemies
}

fn bench_chase_ai(c: &mut Criterion) {
    let player_x = 640.0;
    let player_y = 360.0;
    let dt = 0.016;

    for (name, n) in [("chase_ai_pool_full", MAX_ENEMIES), ("chase_ai_10k", 10_000)] {
        c.bench_function(name, |b| {
            b.iter_batched(
                || setup_enemies(n),
                |mut enemies| {
                    update_chase_ai(&mut enemies, player_x, player_y, dt);
                    enemies
                },
                BatchSize::PerIteration,
            )
        });
    }
}

criterion_group!(benches, bench_chase_ai);
criterion_main!(benches);
