use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::oneshot;

use crate::internal::call::structs::call_error::CallError;

type Outcome<R> = Result<R, CallError>;

/// 注册给操作源的一对完成回调（成功 / 失败）。
///
/// 可以 Clone 后分别交给不同的回调路径；所有副本共享同一个一次性通道，
/// 只有第一次触发有效，之后的触发属于操作源违约，会被忽略并记录告警。
/// 所有副本都被丢弃却从未触发时，等待方会收到 [`CallError::Abandoned`]。
pub struct Reactions<R> {
    sender: Arc<Mutex<Option<oneshot::Sender<Outcome<R>>>>>,
}

impl<R> Clone for Reactions<R> {
    fn clone(&self) -> Self {
        Self {
            sender: Arc::clone(&self.sender),
        }
    }
}

impl<R> std::fmt::Debug for Reactions<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reactions")
            .field("fired", &self.is_fired())
            .finish()
    }
}

impl<R> Reactions<R> {
    pub(crate) fn new() -> (Self, oneshot::Receiver<Outcome<R>>) {
        let (sender, receiver) = oneshot::channel();
        let reactions = Self {
            sender: Arc::new(Mutex::new(Some(sender))),
        };
        (reactions, receiver)
    }

    /// 成功回调（reactive 源的 next / callback 源的 response）。返回本次触发是否生效。
    pub fn on_success(&self, value: R) -> bool {
        self.fire(Ok(value))
    }

    /// 失败回调（reactive 源的 error / callback 源的 failure）。返回本次触发是否生效。
    pub fn on_error(&self, err: CallError) -> bool {
        self.fire(Err(err))
    }

    /// 是否已经有回调触发过
    pub fn is_fired(&self) -> bool {
        self.sender
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }

    fn fire(&self, outcome: Outcome<R>) -> bool {
        let sender = self
            .sender
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        match sender {
            // 等待方已经离开时 send 会失败，结果直接丢弃
            Some(tx) => {
                let _ = tx.send(outcome);
                true
            }
            None => {
                tracing::warn!(
                    is_ok = outcome.is_ok(),
                    "操作源重复触发完成回调，已忽略"
                );
                false
            }
        }
    }
}
