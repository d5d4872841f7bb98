//! Path: native/game_core/src/physics/spatial_hash.rs
//! Summary: 一様グリッドの空間ハッシュ（敵スロットの近傍クエリ）

use rustc_hash::FxHashMap;

pub struct SpatialHash {
    pub cell_size: f32,
    cells: FxHashMap<(i32, i32), Vec<usize>>,
}

impl SpatialHash {
    pub fn new(cell_size: f32) -> Self {
        Self {
            cell_size,
            cells: FxHashMap::default(),
        }
    }

    /// セルの Vec は保持したまま中身だけ空にする（毎フレームの再確保を避ける）
    pub fn clear(&mut self) {
        for ids in self.cells.values_mut() {
            ids.clear();
        }
    }

    pub fn insert(&mut self, id: usize, x: f32, y: f32) {
        let key = self.cell_key(x, y);
        self.cells.entry(key).or_default().push(id);
    }

    fn cell_key(&self, x: f32, y: f32) -> (i32, i32) {
        (
            (x / self.cell_size).floor() as i32,
            (y / self.cell_size).floor() as i32,
        )
    }

    /// 指定円を覆うセルに入っている ID を `buf` に書き込む（アロケーションなし）。
    /// 結果は候補であり、呼び出し側で正確な円判定を行うこと。
    pub fn query_nearby_into(&self, x: f32, y: f32, radius: f32, buf: &mut Vec<usize>) {
        buf.clear();
        if !radius.is_finite() || radius < 0.0 {
            return;
        }
        let r = (radius / self.cell_size).ceil() as i32;
        let (cx, cy) = self.cell_key(x, y);
        for ix in (cx - r)..=(cx + r) {
            for iy in (cy - r)..=(cy + r) {
                if let Some(ids) = self.cells.get(&(ix, iy)) {
                    buf.extend_from_slice(ids);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_finds_inserted_neighbours() {
        let mut hash = SpatialHash::new(80.0);
        hash.insert(0, 10.0, 10.0);
        hash.insert(1, 150.0, 10.0);
        hash.insert(2, 2000.0, 2000.0);
        let mut buf = Vec::new();
        hash.query_nearby_into(0.0, 0.0, 160.0, &mut buf);
        assert!(buf.contains(&0));
        assert!(buf.contains(&1));
        assert!(!buf.contains(&2));
    }

    #[test]
    fn negative_coordinates_use_floor_cells() {
        let mut hash = SpatialHash::new(80.0);
        hash.insert(7, -5.0, -5.0);
        let mut buf = Vec::new();
        hash.query_nearby_into(-1.0, -1.0, 1.0, &mut buf);
        assert_eq!(buf, vec![7]);
    }

    #[test]
    fn clear_empties_all_cells() {
        let mut hash = SpatialHash::new(80.0);
        hash.insert(3, 0.0, 0.0);
        hash.clear();
        let mut buf = vec![99];
        hash.query_nearby_into(0.0, 0.0, 100.0, &mut buf);
        assert!(buf.is_empty());
    }
}
