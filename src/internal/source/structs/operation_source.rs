use crate::internal::source::structs::cancel_handle::CancelHandle;
use crate::internal::source::structs::reactions::Reactions;
use crate::internal::source::traits::operation::{CallbackSource, ReactiveSource};

/// 两种调用风格的统一入口：挂起点只需要 `start(reactions) -> CancelHandle` 这一个能力。
pub enum OperationSource<R> {
    Reactive(Box<dyn ReactiveSource<R>>),
    Callback(Box<dyn CallbackSource<R>>),
}

impl<R: 'static> OperationSource<R> {
    pub fn reactive(source: impl ReactiveSource<R> + 'static) -> Self {
        Self::Reactive(Box::new(source))
    }

    pub fn callback(source: impl CallbackSource<R> + 'static) -> Self {
        Self::Callback(Box::new(source))
    }

    /// 注册回调并启动底层操作，返回独占的取消句柄。
    pub(crate) fn start(self, reactions: Reactions<R>) -> CancelHandle {
        match self {
            Self::Reactive(source) => {
                let disposable = source.subscribe(reactions);
                CancelHandle::new(move || disposable.dispose())
            }
            Self::Callback(source) => {
                source.enqueue(reactions);
                CancelHandle::new(move || source.cancel())
            }
        }
    }

    pub fn style(&self) -> &'static str {
        match self {
            Self::Reactive(_) => "reactive",
            Self::Callback(_) => "callback",
        }
    }
}

impl<R> std::fmt::Debug for OperationSource<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Reactive(_) => f.write_str("OperationSource::Reactive"),
            Self::Callback(_) => f.write_str("OperationSource::Callback"),
        }
    }
}
