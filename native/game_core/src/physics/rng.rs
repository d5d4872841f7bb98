//! Path: native/game_core/src/physics/rng.rs
//! Summary: 決定論的 LCG 乱数ジェネレータ（シード付き、全乱数呼び出しに明示的に渡す）

#[derive(Clone, Debug)]
pub struct SimpleRng(u64);

impl SimpleRng {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub fn next_u32(&mut self) -> u32 {
        self.0 = self.0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 32) as u32
    }

    /// [0, 1) の一様乱数（上位 24bit を使用）
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// [min, max) の一様乱数
    pub fn range_f32(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }

    /// [-amount, amount) の一様乱数
    pub fn signed(&mut self, amount: f32) -> f32 {
        (self.next_f32() - 0.5) * 2.0 * amount
    }

    /// 確率 `p` で true
    pub fn chance(&mut self, p: f32) -> bool {
        self.next_f32() < p
    }

    /// `len` 要素から一様に 1 つ選ぶ。空なら None
    pub fn index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            None
        } else {
            Some(self.next_u32() as usize % len)
        }
    }

    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        self.index(items.len()).and_then(|i| items.get(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_reproducibility() {
        let mut rng = SimpleRng::new(12345);
        let a: Vec<u32> = (0..10).map(|_| rng.next_u32()).collect();
        let mut rng2 = SimpleRng::new(12345);
        let b: Vec<u32> = (0..10).map(|_| rng2.next_u32()).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn next_f32_in_half_open_range() {
        let mut rng = SimpleRng::new(999);
        for _ in 0..10_000 {
            let f = rng.next_f32();
            assert!((0.0..1.0).contains(&f));
        }
    }

    #[test]
    fn uses_full_32_bit_range() {
        let mut rng = SimpleRng::new(7);
        let high = (0..1000).any(|_| rng.next_u32() > u32::MAX / 2 + u32::MAX / 4);
        assert!(high);
    }

    #[test]
    fn index_of_empty_is_none() {
        let mut rng = SimpleRng::new(1);
        assert_eq!(rng.index(0), None);
        let empty: [u8; 0] = [];
        assert!(rng.pick(&empty).is_none());
        for _ in 0..100 {
            assert!(rng.index(3).is_some_and(|i| i < 3));
        }
    }

    #[test]
    fn chance_extremes() {
        let mut rng = SimpleRng::new(42);
        for _ in 0..100 {
            assert!(!rng.chance(0.0));
            assert!(rng.chance(1.0));
        }
    }
}
