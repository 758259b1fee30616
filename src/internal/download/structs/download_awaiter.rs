//! 下载构建器
//!
//! 使用方式：`request.download_to(path).offset_size(n).on_progress(f).send().await`
//!
//! - **续传**：`offset_size` 为本地已存在的字节数，进度按「已有 + 本次」重新计算，且只在百分比上涨时回调；
//! - **调度**：`dispatch_on` 指定进度回调所在的执行上下文，不指定则在传输线程上同步回调；
//! - **取消**：`with_cancellation` 挂上令牌，触发后中止请求并返回 `CallError::Cancelled`。

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::internal::call::structs::call_error::CallError;
use crate::internal::call::structs::pending_operation::PendingOperation;
use crate::internal::call::traits::call_factory::CallFactory;
use crate::internal::parser::structs::download_parser::DownloadParser;
use crate::internal::progress::structs::progress::Progress;
use crate::internal::progress::structs::progress_throttler::{ProgressSink, ProgressThrottler};
use crate::internal::progress::traits::dispatcher::Dispatcher;
use crate::internal::progress::traits::progress_callback::ProgressCallback;

pub struct DownloadAwaiter<'a, F: ?Sized> {
    factory: &'a F,
    dest_path: PathBuf,
    offset_size: u64,
    dispatcher: Option<Arc<dyn Dispatcher>>,
    on_progress: Option<ProgressSink>,
    signal: Option<CancellationToken>,
}

impl<'a, F> DownloadAwaiter<'a, F>
where
    F: CallFactory + ?Sized,
{
    pub fn new(factory: &'a F, dest_path: impl AsRef<Path>) -> Self {
        Self {
            factory,
            dest_path: dest_path.as_ref().to_path_buf(),
            offset_size: 0,
            dispatcher: None,
            on_progress: None,
            signal: None,
        }
    }

    /// 续传前本地已存在的字节数
    pub fn offset_size(mut self, offset_size: u64) -> Self {
        self.offset_size = offset_size;
        self
    }

    /// 进度回调所在的执行上下文
    pub fn dispatch_on(mut self, dispatcher: impl Dispatcher + 'static) -> Self {
        self.dispatcher = Some(Arc::new(dispatcher));
        self
    }

    pub fn dispatch_on_shared(mut self, dispatcher: Option<Arc<dyn Dispatcher>>) -> Self {
        self.dispatcher = dispatcher;
        self
    }

    /// 注册进度回调；不注册则不统计进度。
    pub fn on_progress(mut self, f: impl Fn(Progress) + Send + Sync + 'static) -> Self {
        self.on_progress = Some(Arc::new(f));
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.signal = Some(token);
        self
    }

    /// 执行下载，成功时返回写入的文件路径。
    pub async fn send(self) -> Result<String, CallError> {
        let Self {
            factory,
            dest_path,
            offset_size,
            dispatcher,
            on_progress,
            signal,
        } = self;

        let progress = on_progress.map(|sink| {
            let throttler = ProgressThrottler::from_sink(offset_size, sink).with_dispatcher(dispatcher);
            Box::new(throttler) as Box<dyn ProgressCallback>
        });

        let mut pending = PendingOperation::new(factory.new_call(progress)?);
        if let Some(token) = signal {
            pending = pending.with_cancellation(token);
        }

        tracing::debug!(path = %dest_path.display(), offset_size, "开始下载");
        pending.await_with(DownloadParser::new(dest_path)).await
    }
}
