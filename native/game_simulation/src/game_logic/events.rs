//! Path: native/game_simulation/src/game_logic/events.rs
//! Summary: フレームイベントの drain（オーディオ・UI 層へ渡す）

use crate::world::{FrameEvent, GameWorld};

/// 溜まったイベントを発生順に取り出す。呼ばれるまでイベントは tick をまたいで蓄積される
pub(crate) fn drain_frame_events_inner(w: &mut GameWorld) -> Vec<FrameEvent> {
    w.frame_events.drain(..).collect()
}
