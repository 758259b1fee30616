//! 内置的几种执行上下文。
//!
//! - [`InlineDispatcher`]：在生产者线程上同步执行，等同于不指定调度器；
//! - [`TokioDispatcher`]：每个工作单元 spawn 成独立任务，不保证相互之间的顺序；
//! - [`SerialDispatcher`]：单个后台任务按 FIFO 顺序依次执行，适合要求顺序的 UI 回调。

use tokio::runtime::Handle;
use tokio::sync::mpsc;

use crate::internal::call::structs::call_error::CallError;
use crate::internal::progress::traits::dispatcher::{Dispatcher, Job};

/// 同步执行
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineDispatcher;

impl Dispatcher for InlineDispatcher {
    fn dispatch(&self, job: Job) {
        job();
    }
}

/// 在 tokio 运行时上为每个工作单元 spawn 一个任务
#[derive(Debug, Clone)]
pub struct TokioDispatcher {
    handle: Handle,
}

impl TokioDispatcher {
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// 使用当前所在的运行时
    pub fn current() -> Result<Self, CallError> {
        Handle::try_current()
            .map(Self::new)
            .map_err(|_| CallError::NoRuntime)
    }
}

impl Dispatcher for TokioDispatcher {
    fn dispatch(&self, job: Job) {
        self.handle.spawn(async move { job() });
    }
}

/// 串行调度器（生产者端）
///
/// 内部是一条无界 mpsc 队列 + 一个消费任务，生产者无锁、立即返回，
/// 工作单元严格按提交顺序执行。所有句柄销毁后消费任务自然退出。
#[derive(Debug, Clone)]
pub struct SerialDispatcher {
    sender: mpsc::UnboundedSender<Job>,
}

impl SerialDispatcher {
    pub fn new(handle: &Handle) -> Self {
        let (sender, mut receiver) = mpsc::unbounded_channel::<Job>();
        handle.spawn(async move {
            while let Some(job) = receiver.recv().await {
                job();
            }
        });
        Self { sender }
    }

    /// 在当前所在的运行时上启动消费任务
    pub fn current() -> Result<Self, CallError> {
        Handle::try_current()
            .map(|handle| Self::new(&handle))
            .map_err(|_| CallError::NoRuntime)
    }
}

impl Dispatcher for SerialDispatcher {
    fn dispatch(&self, job: Job) {
        if self.sender.send(job).is_err() {
            tracing::warn!("串行调度器的消费任务已退出，工作单元被丢弃");
        }
    }
}
