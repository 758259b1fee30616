/// 调度器投递的工作单元
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// 执行上下文：接收一个无参工作单元，并相对提交方异步地执行它。
///
/// 仅用于把进度转发挪到调用方指定的上下文上。
pub trait Dispatcher: Send + Sync {
    fn dispatch(&self, job: Job);
}
