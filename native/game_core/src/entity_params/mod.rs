//! Path: native/game_core/src/entity_params/mod.rs
//! Summary: キャラクター・武器・パッシブ・タレント・敵・ボス・マップ・ドロップの静的テンプレートテーブル
//!
//! 各カテゴリは閉じた enum の ID と、それをキーにした不変テーブルで構成する。
//! 文字列 ID は境界（設定読み込み・セーブデータ）でのみ `TemplateId::parse` で変換する。

mod boss;
mod character;
mod drop;
mod enemy;
mod map;
mod passive;
mod talent;
mod weapon;

pub use boss::{BossAttack, BossId, BossParams};
pub use character::{CharacterId, CharacterParams};
pub use drop::{DropCategory, DropKind, DropParams};
pub use enemy::{EnemyBehavior, EnemyId, EnemyParams};
pub use map::{MapId, MapParams, WaveEntry, WaveTypes, WAVES};
pub use passive::{PassiveId, PassiveParams};
pub use talent::{TalentId, TalentParams};
pub use weapon::{Evolution, LevelBonus, WeaponArchetype, WeaponId, WeaponParams};

use crate::error::TemplateError;

/// 閉じた ID enum に共通の文字列変換
pub trait TemplateId: Copy + Default + PartialEq + Sized + 'static {
    /// エラーメッセージ用のカテゴリ名
    const CATEGORY: &'static str;
    /// 全 ID（テーブル順）
    const ALL: &'static [Self];

    fn as_str(self) -> &'static str;

    fn parse(id: &str) -> Result<Self, TemplateError> {
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == id)
            .ok_or_else(|| TemplateError::UnknownId {
                category: Self::CATEGORY,
                id: id.to_string(),
            })
    }

    /// 未知の ID はログを出して既定値にフォールバックする（セッションは止めない）
    fn parse_or_default(id: &str) -> Self {
        match Self::parse(id) {
            Ok(k) => k,
            Err(e) => {
                let fallback = Self::default();
                log::warn!("{e}; falling back to `{}`", fallback.as_str());
                fallback
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_round_trip<T: TemplateId + std::fmt::Debug>() {
        for &id in T::ALL {
            assert_eq!(T::parse(id.as_str()), Ok(id));
        }
    }

    #[test]
    fn every_id_parses_back() {
        assert_round_trip::<CharacterId>();
        assert_round_trip::<WeaponId>();
        assert_round_trip::<PassiveId>();
        assert_round_trip::<TalentId>();
        assert_round_trip::<EnemyId>();
        assert_round_trip::<BossId>();
        assert_round_trip::<MapId>();
        assert_round_trip::<DropKind>();
    }

    #[test]
    fn unknown_id_is_recoverable() {
        let err = EnemyId::parse("slime").unwrap_err();
        assert_eq!(
            err,
            TemplateError::UnknownId { category: "enemy", id: "slime".to_string() }
        );
        assert_eq!(EnemyId::parse_or_default("slime"), EnemyId::Grunt);
        assert_eq!(CharacterId::parse_or_default("wizard"), CharacterId::Commander);
        assert_eq!(WeaponId::parse_or_default(""), WeaponId::Blaster);
        assert_eq!(MapId::parse_or_default("moon"), MapId::Station);
    }
}
