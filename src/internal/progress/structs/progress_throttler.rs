//! 进度节流器：单次传输的进度去重与转发。
//!
//! 传输层每次读到数据都可能回调一次进度（通常一次传输最多 100 次）。
//! 节流器在续传（配置了偏移量）时把已有字节计入分子分母重新计算百分比，
//! 只转发严格高于历史最高值的采样；转发可以同步执行，也可以投递到调用方指定的调度器上。

use std::sync::Arc;

use crate::internal::progress::structs::progress::Progress;
use crate::internal::progress::traits::dispatcher::Dispatcher;
use crate::internal::progress::traits::progress_callback::ProgressCallback;

/// 进度接收方
pub type ProgressSink = Arc<dyn Fn(Progress) + Send + Sync>;

/// 单次传输独占的进度节流器，不可 Clone。
pub struct ProgressThrottler {
    /// 续传时已存在的字节数，为 0 表示非续传
    offset_size: u64,
    /// 上次转发的百分比，只增不减
    last_progress: u8,
    dispatcher: Option<Arc<dyn Dispatcher>>,
    sink: ProgressSink,
}

impl ProgressThrottler {
    pub fn new(offset_size: u64, sink: impl Fn(Progress) + Send + Sync + 'static) -> Self {
        Self {
            offset_size,
            last_progress: 0,
            dispatcher: None,
            sink: Arc::new(sink),
        }
    }

    pub fn from_sink(offset_size: u64, sink: ProgressSink) -> Self {
        Self {
            offset_size,
            last_progress: 0,
            dispatcher: None,
            sink,
        }
    }

    /// 指定转发所在的执行上下文；不调用则在生产者线程上同步转发。
    pub fn with_dispatcher(mut self, dispatcher: Option<Arc<dyn Dispatcher>>) -> Self {
        self.dispatcher = dispatcher;
        self
    }

    pub fn offset_size(&self) -> u64 {
        self.offset_size
    }

    pub fn last_progress(&self) -> u8 {
        self.last_progress
    }

    /// 处理一次原始采样。
    pub fn on_sample(&mut self, percent: u8, current_size: u64, total_size: Option<u64>) {
        let mut progress = Progress::new(percent, current_size, total_size);

        if self.offset_size > 0 {
            progress.add_current_size(self.offset_size);

            // 总大小未知或为 0 时无法计算百分比，只转发字节数，不参与去重
            if progress.has_known_total() {
                progress.add_total_size(self.offset_size);
                progress.update_progress();
                if progress.percent <= self.last_progress {
                    tracing::trace!(
                        percent = progress.percent,
                        last = self.last_progress,
                        "进度未增长，丢弃本次采样"
                    );
                    return;
                }
                self.last_progress = progress.percent;
            } else {
                progress.total_size = None;
            }
        }

        self.forward(progress);
    }

    fn forward(&self, progress: Progress) {
        match &self.dispatcher {
            Some(dispatcher) => {
                let sink = Arc::clone(&self.sink);
                dispatcher.dispatch(Box::new(move || sink(progress)));
            }
            None => (self.sink)(progress),
        }
    }
}

impl ProgressCallback for ProgressThrottler {
    fn on_progress(&mut self, percent: u8, current_size: u64, total_size: Option<u64>) {
        self.on_sample(percent, current_size, total_size);
    }
}

impl std::fmt::Debug for ProgressThrottler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressThrottler")
            .field("offset_size", &self.offset_size)
            .field("last_progress", &self.last_progress)
            .field("has_dispatcher", &self.dispatcher.is_some())
            .finish()
    }
}
