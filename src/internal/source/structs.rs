pub mod cancel_handle;
pub mod future_source;
pub mod operation_source;
pub mod reactions;

pub use cancel_handle::CancelHandle;
pub use future_source::FutureSource;
pub use operation_source::OperationSource;
pub use reactions::Reactions;
