use std::future::Future;
use std::pin::Pin;

use tokio::task::AbortHandle;

use crate::internal::call::structs::call_error::CallError;
use crate::internal::source::structs::reactions::Reactions;
use crate::internal::source::traits::operation::{Disposable, ReactiveSource};

type BoxFuture<T> = Pin<Box<dyn Future<Output = Result<T, CallError>> + Send>>;

/// 把一个 future 包装成订阅式操作源：订阅时在当前 tokio 运行时上 spawn，
/// 释放时中止任务。
pub struct FutureSource<T> {
    future: BoxFuture<T>,
}

impl<T> FutureSource<T>
where
    T: Send + 'static,
{
    pub fn new(
        future: impl Future<Output = Result<T, CallError>> + Send + 'static,
    ) -> Self {
        Self {
            future: Box::pin(future),
        }
    }
}

impl<T> ReactiveSource<T> for FutureSource<T>
where
    T: Send + 'static,
{
    fn subscribe(self: Box<Self>, reactions: Reactions<T>) -> Box<dyn Disposable> {
        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                reactions.on_error(CallError::NoRuntime);
                return Box::new(TaskDisposable(None));
            }
        };

        let future = self.future;
        let task = handle.spawn(async move {
            match future.await {
                Ok(value) => reactions.on_success(value),
                Err(err) => reactions.on_error(err),
            };
        });

        Box::new(TaskDisposable(Some(task.abort_handle())))
    }
}

/// 中止后台任务的释放句柄；对已结束的任务调用 abort 没有副作用。
struct TaskDisposable(Option<AbortHandle>);

impl Disposable for TaskDisposable {
    fn dispose(&self) {
        if let Some(task) = &self.0 {
            task.abort();
        }
    }
}
