pub mod await_call;
pub mod call_factory;

pub use await_call::AwaitCall;
pub use call_factory::CallFactory;
