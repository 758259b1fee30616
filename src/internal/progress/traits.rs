pub mod dispatcher;
pub mod progress_callback;

pub use dispatcher::{Dispatcher, Job};
pub use progress_callback::ProgressCallback;
