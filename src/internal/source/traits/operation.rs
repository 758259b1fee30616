//! 操作源契约：挂起点只通过这两个接口消费底层异步操作。
//!
//! - [`ReactiveSource`]：订阅式，最多发出一个值（随后隐式完成），或发出一个错误；
//! - [`CallbackSource`]：入队式，每次入队恰好触发成功 / 失败中的一个，另有独立的取消入口。

use crate::internal::source::structs::reactions::Reactions;

/// 订阅返回的可释放句柄。`dispose` 必须幂等，调用后停止投递。
pub trait Disposable: Send + Sync {
    fn dispose(&self);
}

/// 订阅式操作源
pub trait ReactiveSource<R>: Send {
    /// 订阅并注册完成回调；返回用于停止投递的句柄。
    fn subscribe(self: Box<Self>, reactions: Reactions<R>) -> Box<dyn Disposable>;
}

/// 入队式操作源
pub trait CallbackSource<R>: Send + Sync {
    /// 入队执行，完成时恰好触发 `reactions` 中的一个回调。
    fn enqueue(&self, reactions: Reactions<R>);

    /// 取消执行；必须幂等，在已完成后调用也是安全的。
    fn cancel(&self);
}
