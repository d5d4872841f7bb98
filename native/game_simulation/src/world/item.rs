//! Path: native/game_simulation/src/world/item.rs
//! Summary: ドロップアイテム SoA（ItemWorld）。吸引状態と寿命を持つ固定容量プール

use game_core::constants::ITEM_LIFETIME;
use game_core::entity_params::{DropCategory, DropKind};

/// 吸引状態
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Attraction {
    None,
    /// 取得半径に一度入った（以後は半径外でも追従する）
    InRange,
    /// 磁石で全域から吸引中（速度 2 倍）
    Magnetized,
}

/// アイテム SoA（Structure of Arrays）
///
/// フリーリストにより kill されたスロットを O(1) で再利用する。
pub struct ItemWorld {
    pub positions_x: Vec<f32>,
    pub positions_y: Vec<f32>,
    pub kinds:       Vec<DropKind>,
    /// xp: 経験値量, gold: 枚数, health: 回復量, special: 未使用
    pub value:       Vec<u32>,
    pub attraction:  Vec<Attraction>,
    /// 残り寿命（秒）
    pub lifetime:    Vec<f32>,
    pub alive:       Vec<bool>,
    pub count:       usize,
    capacity:        usize,
    /// kill 時にインデックスを積み、spawn 時に pop して再利用する
    free_list:       Vec<usize>,
}

impl ItemWorld {
    pub fn new(capacity: usize) -> Self {
        Self {
            positions_x: Vec::with_capacity(capacity),
            positions_y: Vec::with_capacity(capacity),
            kinds:       Vec::with_capacity(capacity),
            value:       Vec::with_capacity(capacity),
            attraction:  Vec::with_capacity(capacity),
            lifetime:    Vec::with_capacity(capacity),
            alive:       Vec::with_capacity(capacity),
            count:       0,
            capacity,
            free_list:   Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.positions_x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// アイテムをスポーンする。満杯なら false を返して捨てる
    pub fn spawn(&mut self, x: f32, y: f32, kind: DropKind, value: u32) -> bool {
        if let Some(i) = self.free_list.pop() {
            self.positions_x[i] = x;
            self.positions_y[i] = y;
            self.kinds[i]       = kind;
            self.value[i]       = value;
            self.attraction[i]  = Attraction::None;
            self.lifetime[i]    = ITEM_LIFETIME;
            self.alive[i]       = true;
        } else if self.len() < self.capacity {
            self.positions_x.push(x);
            self.positions_y.push(y);
            self.kinds.push(kind);
            self.value.push(value);
            self.attraction.push(Attraction::None);
            self.lifetime.push(ITEM_LIFETIME);
            self.alive.push(true);
        } else {
            log::debug!("item pool exhausted ({}), dropping {:?}", self.capacity, kind);
            return false;
        }
        self.count += 1;
        true
    }

    /// アイテムを消去し、スロットをフリーリストに返却する。
    pub fn kill(&mut self, i: usize) {
        if self.alive[i] {
            self.alive[i] = false;
            self.count = self.count.saturating_sub(1);
            self.free_list.push(i);
        }
    }

    /// 磁石: 全ての xp / gold を吸引状態にする
    pub fn magnetize_all(&mut self) {
        for i in 0..self.len() {
            if !self.alive[i] {
                continue;
            }
            if matches!(self.kinds[i].params().category, DropCategory::Xp | DropCategory::Gold) {
                self.attraction[i] = Attraction::Magnetized;
            }
        }
    }
}
