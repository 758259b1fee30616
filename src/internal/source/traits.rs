pub mod operation;

pub use operation::{CallbackSource, Disposable, ReactiveSource};
