//! Path: native/game_core/src/error.rs
//! Summary: テンプレート参照・メタ進行のエラー型

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("unknown {category} id `{id}`")]
    UnknownId { category: &'static str, id: String },
    #[error("talent `{talent}` level {level} exceeds max level {max}")]
    InvalidLevel { talent: &'static str, level: u32, max: u32 },
}
