//! Cursor and progress snapshot types.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Position within the effective step list. Both indices are always
/// valid for the list the session was started with.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct CookingCursor {
    pub step_index: usize,
    pub sub_step_index: usize,
}

impl CookingCursor {
    pub fn new(step_index: usize, sub_step_index: usize) -> Self {
        Self {
            step_index,
            sub_step_index,
        }
    }
}

/// Repeat-this-step cursor for recipes that process identical units
/// sequentially through one step. At most one loop exists at a time,
/// anchored to exactly one step index.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct StepLoopState {
    /// Step index the loop is anchored to
    pub step_index: usize,

    /// Total units to process (>= 2)
    pub total_items: u32,

    /// 1-based unit currently being processed
    pub current_item: u32,
}

impl StepLoopState {
    pub fn new(step_index: usize, total_items: u32) -> Self {
        Self {
            step_index,
            total_items,
            current_item: 1,
        }
    }

    /// True while units remain after the current one.
    pub fn has_pending(&self) -> bool {
        self.current_item < self.total_items
    }
}

/// Advisory progress snapshot persisted per recipe for resume after a
/// restart. Never authoritative over in-memory state while a session is
/// live.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProgressSnapshot {
    pub cursor: CookingCursor,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_loop: Option<StepLoopState>,

    pub saved_at: Timestamp,
}

impl ProgressSnapshot {
    pub fn new(cursor: CookingCursor, step_loop: Option<StepLoopState>) -> Self {
        Self {
            cursor,
            step_loop,
            saved_at: Timestamp::now(),
        }
    }
}
