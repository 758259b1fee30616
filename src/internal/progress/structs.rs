pub mod dispatchers;
pub mod progress;
pub mod progress_throttler;

pub use dispatchers::{InlineDispatcher, SerialDispatcher, TokioDispatcher};
pub use progress::Progress;
pub use progress_throttler::{ProgressSink, ProgressThrottler};
