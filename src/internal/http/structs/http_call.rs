//! 基于 reqwest 的入队式操作源。
//!
//! 入队时在当前 tokio 运行时上 spawn 请求任务，拿到响应头后触发成功回调（响应体仍为流，交给解析器读取）；
//! 取消时中止请求任务。一个 `HttpCall` 只能入队一次。

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use reqwest::{Client, Request};
use tokio::task::AbortHandle;

use crate::internal::call::structs::call_error::CallError;
use crate::internal::http::structs::raw_response::RawResponse;
use crate::internal::progress::traits::progress_callback::ProgressCallback;
use crate::internal::source::structs::reactions::Reactions;
use crate::internal::source::traits::operation::CallbackSource;

pub struct HttpCall {
    client: Client,
    request: Mutex<Option<Request>>,
    progress: Mutex<Option<Box<dyn ProgressCallback>>>,
    task: Mutex<Option<AbortHandle>>,
    canceled: AtomicBool,
}

impl HttpCall {
    pub fn new(
        client: Client,
        request: Request,
        progress: Option<Box<dyn ProgressCallback>>,
    ) -> Self {
        Self {
            client,
            request: Mutex::new(Some(request)),
            progress: Mutex::new(progress),
            task: Mutex::new(None),
            canceled: AtomicBool::new(false),
        }
    }

    pub fn is_canceled(&self) -> bool {
        self.canceled.load(Ordering::Acquire)
    }

    pub fn is_executed(&self) -> bool {
        lock(&self.request).is_none()
    }
}

impl CallbackSource<RawResponse> for HttpCall {
    fn enqueue(&self, reactions: Reactions<RawResponse>) {
        let Some(request) = lock(&self.request).take() else {
            reactions.on_error(CallError::AlreadyExecuted);
            return;
        };

        if self.is_canceled() {
            reactions.on_error(CallError::Cancelled);
            return;
        }

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            reactions.on_error(CallError::NoRuntime);
            return;
        };

        let client = self.client.clone();
        let progress = lock(&self.progress).take();
        tracing::debug!(method = %request.method(), url = %request.url(), "发送 HTTP 请求");

        let task = runtime.spawn(async move {
            match client.execute(request).await {
                Ok(response) => {
                    let mut raw = RawResponse::from_reqwest(response);
                    if let Some(callback) = progress {
                        raw = raw.with_progress(callback);
                    }
                    reactions.on_success(raw);
                }
                Err(err) => {
                    reactions.on_error(CallError::Request(err));
                }
            }
        });

        *lock(&self.task) = Some(task.abort_handle());

        // cancel 可能在 spawn 与保存句柄之间到达
        if self.is_canceled() {
            task.abort();
        }
    }

    fn cancel(&self) {
        if self.canceled.swap(true, Ordering::AcqRel) {
            return;
        }
        if let Some(task) = lock(&self.task).as_ref() {
            tracing::debug!("中止 HTTP 请求任务");
            task.abort();
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
