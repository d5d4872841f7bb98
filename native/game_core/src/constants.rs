//! Path: native/game_core/src/constants.rs
//! Summary: プール容量・プレイヤー物理・戦闘・スポーンなどの定数定義

// Pool capacities
pub const MAX_ENEMIES:     usize = 500;
pub const MAX_PROJECTILES: usize = 1000;
pub const MAX_ITEMS:       usize = 500;
pub const MAX_CHESTS:      usize = 8;

// Frame
/// フレーム落ち時の物理破綻を防ぐ delta time 上限（秒）
pub const MAX_DT: f32 = 0.1;

// View (nuke の有効範囲。画面 1280x720 の半分)
pub const VIEW_HALF_WIDTH:  f32 = 640.0;
pub const VIEW_HALF_HEIGHT: f32 = 360.0;

// Player
pub const PLAYER_RADIUS:        f32 = 18.0;
pub const PLAYER_BASE_SPEED:    f32 = 200.0;
pub const PICKUP_RADIUS_BASE:   f32 = 50.0;
pub const INVINCIBLE_DURATION:  f32 = 0.5;
pub const REVIVE_INVINCIBLE:    f32 = 2.0;
pub const REVIVE_HP_RATIO:      f32 = 0.5;
pub const MAX_WEAPON_SLOTS:     usize = 6;

// Progression
pub const BASE_XP_TO_LEVEL:       u32 = 10;
/// レベルアップ毎の必要経験値倍率（1.15 倍を整数百分率で保持して丸め誤差を避ける）
pub const LEVEL_UP_XP_PERCENT:    u32 = 115;
pub const UPGRADE_CHOICE_COUNT:   usize = 4;

// Buffs
pub const DOUBLE_DAMAGE_DURATION: f32 = 10.0;
pub const INVINCIBLE_BUFF_DURATION: f32 = 5.0;

// Enemy combat
pub const HIT_FLASH_DURATION:   f32 = 0.1;
pub const KNOCKBACK_DECAY:      f32 = 0.9;
pub const KNOCKBACK_MIN:        f32 = 1.0;
pub const KAMIKAZE_SPLASH_RATIO: f32 = 0.5;
pub const KAMIKAZE_BOOST_RANGE: f32 = 100.0;
pub const KAMIKAZE_BOOST:       f32 = 1.5;
pub const RANGED_PREFERRED_DIST: f32 = 250.0;
pub const RANGED_BAND:          f32 = 50.0;
pub const RANGED_ENGAGE_RANGE:  f32 = 400.0;
pub const RANGED_APPROACH_SCALE: f32 = 0.5;
pub const ENEMY_SHOT_RADIUS:    f32 = 8.0;
pub const ENEMY_SHOT_DURATION:  f32 = 3.0;
pub const PHASE_SPEED_SCALE:    f32 = 1.5;
pub const DASH_SPEED_SCALE:     f32 = 4.0;
pub const DASH_MIN_RANGE:       f32 = 50.0;
pub const DASH_MAX_RANGE:       f32 = 300.0;
pub const DASH_OVERRUN:         f32 = 0.3;
pub const SPAWNER_OFFSET:       f32 = 50.0;
pub const SWARM_NOISE_AMPLITUDE: f32 = 0.5;

// Elite scaling
pub const ELITE_HP_MULT:     f32 = 3.0;
pub const ELITE_DAMAGE_MULT: f32 = 1.5;
pub const ELITE_SPEED_MULT:  f32 = 1.2;
pub const ELITE_SIZE_MULT:   f32 = 1.3;
pub const ELITE_XP_MULT:     u32 = 3;
pub const ELITE_GOLD_MULT:   f32 = 2.0;

// Boss
pub const BOSS_SPAWN_DISTANCE:   f32 = 500.0;
pub const BOSS_SPAWN_MARGIN:     f32 = 100.0;
pub const BOSS_FIRST_ATTACK:     f32 = 2.0;
pub const BOSS_ATTACK_COOLDOWN:  f32 = 3.0;
pub const BOSS_ATTACK_DURATION:  f32 = 2.0;
pub const BOSS_PHASE_SPEED_MULT: f32 = 1.1;
pub const BOSS_ENRAGE_SPEED_MULT: f32 = 1.5;
pub const BOSS_ENRAGE_COOLDOWN_MULT: f32 = 0.5;
pub const BOSS_CHARGE_SPEED_MULT: f32 = 5.0;
pub const BOSS_SHOT_SPEED:       f32 = 250.0;
pub const BOSS_SHOT_RADIUS:      f32 = 12.0;
pub const BOSS_SHOT_DURATION:    f32 = 4.0;
pub const BOSS_SHOT_SPREAD:      f32 = 0.3;
pub const BOSS_LASER_SPEED:      f32 = 400.0;
pub const BOSS_LASER_INTERVAL:   f32 = 0.05;
pub const BOSS_LASER_OFFSET:     f32 = 50.0;
pub const BOSS_LASER_RADIUS:     f32 = 6.0;
pub const BOSS_LASER_DURATION:   f32 = 1.0;
pub const BOSS_LASER_DAMAGE_RATIO: f32 = 0.5;
/// laser_sweep の回転速度（rad/s）
pub const BOSS_LASER_SPIN:       f32 = 10.0;
pub const BOSS_TELEPORT_DISTANCE: f32 = 200.0;
/// spawn_swarm / spawn_drones の輪をボスの外周からどれだけ離すか
pub const BOSS_RING_GAP:         f32 = 30.0;
pub const BOSS_SUMMON_DISTANCE:  f32 = 100.0;
pub const BOSS_FIELD_SHOTS:      u32 = 12;
pub const BOSS_FIELD_SPEED:      f32 = 120.0;
pub const BOSS_HACK_SPEED:       f32 = 450.0;
pub const BOSS_HACK_SPREAD:      f32 = 0.1;

// Spawner
pub const SPAWN_MARGIN: f32 = 50.0;

// Projectiles
pub const HOMING_ACQUIRE_RADIUS:   f32 = 400.0;
pub const BOOMERANG_RETURN_TURN:   f32 = 8.0;
pub const BOOMERANG_RETURN_ACCEL:  f32 = 1.02;
pub const BOOMERANG_CATCH_RADIUS:  f32 = 30.0;
pub const EXPLOSION_EDGE_FALLOFF:  f32 = 0.5;
pub const EXPLOSION_KNOCKBACK:     f32 = 200.0;
pub const CHAIN_DAMAGE_FALLOFF:    f32 = 0.7;
pub const ORBIT_HIT_COOLDOWN:      f32 = 0.3;
pub const ORBITAL_LASER_INTERVAL:  f32 = 0.5;
pub const ORBITAL_LASER_RADIUS:    f32 = 5.0;
/// 最近接探索の初期半径（見つからなければ全探索）
pub const WEAPON_SEARCH_RADIUS:    f32 = 600.0;
/// 追尾ミサイル発射角のランダム幅（±）
pub const HOMING_LAUNCH_JITTER:    f32 = 0.2;
pub const GRENADE_AIM_JITTER:      f32 = 0.3;
pub const GRENADE_FACING_JITTER:   f32 = 0.5;
pub const CRIT_MULTIPLIER:         f32 = 2.0;

// Items
pub const ITEM_LIFETIME:         f32 = 60.0;
pub const ITEM_ATTRACT_SPEED:    f32 = 400.0;
pub const ITEM_MAGNET_SPEED_MULT: f32 = 2.0;
pub const ITEM_COLLECT_RADIUS:   f32 = 25.0;
pub const DROP_SCATTER:          f32 = 20.0;
pub const DROP_JITTER:           f32 = 15.0;
pub const ELITE_GOLD_CHANCE:     f32 = 0.3;
pub const ELITE_GOLD_VALUE:      u32 = 5;
pub const ELITE_HEALTH_CHANCE:   f32 = 0.1;
pub const BOSS_XP_DROPS:         u32 = 10;
pub const BOSS_GOLD_DROPS:       u32 = 5;
pub const CHEST_RADIUS:          f32 = 24.0;
pub const CHEST_GOLD:            u32 = 50;
pub const CHEST_UPGRADES:        u32 = 3;

// Spatial hash cell size
pub const CELL_SIZE: f32 = 80.0;
/// 空間ハッシュのクエリ半径に上乗せする最大敵半径（elder_god 150px を想定）
pub const MAX_ENEMY_RADIUS: f32 = 100.0;
