//! 完成槽：一次调用的终态只能被写入一次。

use std::sync::atomic::{AtomicU8, Ordering};

use super::call_state::CallState;

const PENDING: u8 = 0;
const FULFILLED: u8 = 1;
const FAILED: u8 = 2;
const CANCELLED: u8 = 3;

/// 单写者完成槽，第一个 compare-and-set 成功的写入者胜出，之后的写入全部无效。
#[derive(Debug)]
pub(crate) struct CompletionSlot {
    state: AtomicU8,
}

impl CompletionSlot {
    pub(crate) fn new() -> Self {
        Self {
            state: AtomicU8::new(PENDING),
        }
    }

    /// 尝试提交终态；返回是否由本次写入完成提交。
    pub(crate) fn commit(&self, terminal: CallState) -> bool {
        let target = match terminal {
            CallState::Fulfilled => FULFILLED,
            CallState::Failed => FAILED,
            CallState::Cancelled => CANCELLED,
            CallState::Idle | CallState::Pending => return false,
        };
        self.state
            .compare_exchange(PENDING, target, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    pub(crate) fn is_filled(&self) -> bool {
        self.state.load(Ordering::Acquire) != PENDING
    }
}
