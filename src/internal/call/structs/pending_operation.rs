//! 挂起点：把一次「恰好一个结果」的回调式异步操作转换为一个 `.await`。
//!
//! ## 流程
//!
//! 1. 创建一次性通道并把回调（[`Reactions`]）注册给操作源，操作源随即启动；
//! 2. 等待方挂起，直到成功 / 失败回调之一触发；
//! 3. 成功时交给解析器转换，解析器的错误与传输错误一样作为失败结果返回；
//! 4. 结果提交到完成槽，状态进入终态。
//!
//! ## 取消
//!
//! - 丢弃等待中的 future：析构守卫发现结果尚未提交，调用底层取消句柄；
//! - 通过 [`PendingOperation::with_cancellation`] 挂上的令牌被触发：同上，并返回 [`CallError::Cancelled`]。
//!
//! 结果一旦提交，之后的取消均为空操作；取消句柄最多被调用一次。

use tokio_util::sync::CancellationToken;

use crate::internal::call::structs::call_error::CallError;
use crate::internal::call::structs::call_state::CallState;
use crate::internal::call::structs::completion_slot::CompletionSlot;
use crate::internal::parser::traits::parser::{FnParser, Parser};
use crate::internal::source::structs::cancel_handle::CancelHandle;
use crate::internal::source::structs::operation_source::OperationSource;
use crate::internal::source::structs::reactions::Reactions;
use crate::internal::states::watch_state::WatchState;

/// 一次尚未开始的调用。可链式配置后通过 `await_value` / `await_with` 挂起等待。
pub struct PendingOperation<R> {
    source: OperationSource<R>,
    state: WatchState<CallState>,
    signal: Option<CancellationToken>,
}

impl<R> PendingOperation<R>
where
    R: Send + 'static,
{
    pub fn new(source: OperationSource<R>) -> Self {
        Self {
            source,
            state: WatchState::new(CallState::Idle),
            signal: None,
        }
    }

    /// 挂上外部取消令牌；令牌触发时若结果尚未提交，则取消底层操作并返回 [`CallError::Cancelled`]。
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.signal = Some(token);
        self
    }

    /// 本次调用的状态；返回可共享句柄，`.watch()` 后可监听状态变化。
    pub fn state(&self) -> WatchState<CallState> {
        self.state.clone()
    }

    /// 等待原始结果，不做转换。
    pub async fn await_value(self) -> Result<R, CallError> {
        self.await_with(FnParser(|raw: R| -> Result<R, CallError> { Ok(raw) })).await
    }

    /// 等待原始结果并用 `parser` 转换。
    pub async fn await_with<T, P>(self, parser: P) -> Result<T, CallError>
    where
        T: Send,
        P: Parser<T, R>,
    {
        let Self {
            source,
            state,
            signal,
        } = self;

        let (reactions, receiver) = Reactions::new();
        tracing::debug!(style = source.style(), "调用开始，注册完成回调");

        // 回调在 start 内注册完毕；之后任何一方触发都只会写入一次性通道
        let cancel_handle = source.start(reactions);
        state.update(CallState::Pending);

        let guard = InFlight {
            slot: CompletionSlot::new(),
            cancel_handle,
            state,
        };

        let work = async move {
            let raw = match receiver.await {
                Ok(outcome) => outcome?,
                Err(_) => return Err(CallError::Abandoned),
            };
            parser.on_parse(raw).await
        };
        tokio::pin!(work);

        let outcome = match signal {
            Some(token) => {
                tokio::select! {
                    biased;
                    outcome = &mut work => Some(outcome),
                    _ = token.cancelled() => None,
                }
            }
            None => Some(work.await),
        };

        match outcome {
            Some(outcome) => {
                guard.settle(&outcome);
                outcome
            }
            None => {
                guard.cancel();
                Err(CallError::Cancelled)
            }
        }
    }
}

impl<R> std::fmt::Debug for PendingOperation<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingOperation")
            .field("source", &self.source)
            .field("state", &self.state.get_current())
            .field("cancellable", &self.signal.is_some())
            .finish()
    }
}

/// 挂起期间的析构守卫：持有取消句柄与完成槽，保证资源要么随正常完成释放，要么随取消释放。
struct InFlight {
    slot: CompletionSlot,
    cancel_handle: CancelHandle,
    state: WatchState<CallState>,
}

impl InFlight {
    fn settle<T>(&self, outcome: &Result<T, CallError>) {
        let terminal = match outcome {
            Ok(_) => CallState::Fulfilled,
            Err(_) => CallState::Failed,
        };
        if self.slot.commit(terminal) {
            tracing::debug!(state = ?terminal, "调用结果已提交");
            self.state.update(terminal);
        }
    }

    fn cancel(&self) {
        if self.slot.commit(CallState::Cancelled) {
            tracing::debug!("调用在结果提交前被取消，通知底层操作");
            self.cancel_handle.cancel();
            self.state.update(CallState::Cancelled);
        }
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        if !self.slot.is_filled() {
            self.cancel();
        }
    }
}
