//! Path: native/game_simulation/src/world/handle.rs
//! Summary: プールスロットを指す世代付きハンドル（再利用後の古い参照を検出する）

/// 敵スロットへの参照。スロットが再利用されると `generation` が変わり無効になる
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct EnemyHandle {
    pub index:      u32,
    pub generation: u32,
}

impl EnemyHandle {
    pub fn index(self) -> usize {
        self.index as usize
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ProjectileHandle {
    pub index:      u32,
    pub generation: u32,
}

impl ProjectileHandle {
    pub fn index(self) -> usize {
        self.index as usize
    }
}
