//! Path: native/game_simulation/src/world/chest.rs
//! Summary: 宝箱（ボス撃破時の黄金宝箱）。数が少ないので AoS で持つ

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Chest {
    pub x:    f32,
    pub y:    f32,
    pub open: bool,
}

pub struct ChestWorld {
    pub chests: Vec<Chest>,
    capacity:   usize,
}

impl ChestWorld {
    pub fn new(capacity: usize) -> Self {
        Self { chests: Vec::with_capacity(capacity), capacity }
    }

    /// 開封済みの宝箱を片付けてから追加する。満杯なら false
    pub fn spawn(&mut self, x: f32, y: f32) -> bool {
        self.chests.retain(|c| !c.open);
        if self.chests.len() >= self.capacity {
            log::debug!("chest pool exhausted ({})", self.capacity);
            return false;
        }
        self.chests.push(Chest { x, y, open: false });
        true
    }

    pub fn closed(&self) -> impl Iterator<Item = &Chest> {
        self.chests.iter().filter(|c| !c.open)
    }
}
