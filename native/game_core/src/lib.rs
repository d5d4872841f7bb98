//! Path: native/game_core/src/lib.rs
//! Summary: シミュレーション共通ロジック（定数・テンプレート・ステータス解決・数学・物理プリミティブ）

pub mod constants;
pub mod entity_params;
pub mod error;
pub mod physics;
pub mod progression;
pub mod stats;
pub mod util;
