//! Path: native/game_simulation/src/error.rs
//! Summary: セッション操作のエラー型（呼び出し側が不正な入力を渡し得る操作だけが返す）

use crate::world::SessionPhase;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UpgradeError {
    #[error("no upgrade is on offer (phase: {0:?})")]
    NotOffered(SessionPhase),
    #[error("upgrade choice {index} is out of range ({count} offered)")]
    OutOfRange { index: usize, count: usize },
}
