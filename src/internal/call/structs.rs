pub mod call_error;
pub mod call_state;
pub(crate) mod completion_slot;
pub mod pending_operation;

// 重导出公共类型
pub use call_error::{CallError, CallErrorKind};
pub use call_state::CallState;
pub use pending_operation::PendingOperation;
