/// 单次调用的状态（由挂起点内部维护，外部只读监听）
///
/// `Idle → Pending → {Fulfilled | Failed | Cancelled}`，三个终态不会再变化。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallState {
    Idle,
    Pending,
    Fulfilled,
    Failed,
    Cancelled,
}

impl CallState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Fulfilled | Self::Failed | Self::Cancelled)
    }
}
