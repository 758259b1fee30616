//! # WatchState：可监听的状态单元
//!
//! 基于 [`tokio::sync::watch`] 的轻量状态容器，用于对外发布一次调用的 [`CallState`]。
//! 写入永不阻塞、永不失败；读取方可以同步拿快照，也可以异步等待变化。
//!
//! [`CallState`]: crate::call::CallState
//!
//! ## 使用示例
//! ```rust,no_run
//! use call_await::states::WatchState;
//!
//! # async fn example() {
//! let state = WatchState::new(0u32);
//! let mut watcher = state.watch();
//! state.update(1);
//! assert_eq!(watcher.changed().await.unwrap(), 1);
//! # }
//! ```

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::watch;
use tokio::sync::watch::error::RecvError;

/// 状态监听错误
#[derive(Debug, Error)]
pub enum StateError {
    /// 所有写入端都已销毁，不会再有新值
    #[error("状态已被销毁: {0}")]
    Closed(#[from] RecvError),
}

/// 可共享、可监听的状态单元。Clone 得到的是同一份状态的句柄。
#[derive(Debug)]
pub struct WatchState<T> {
    sender: Arc<watch::Sender<T>>,
}

impl<T> Clone for WatchState<T> {
    fn clone(&self) -> Self {
        Self {
            sender: Arc::clone(&self.sender),
        }
    }
}

impl<T> WatchState<T>
where
    T: Clone + Send + Sync,
{
    pub fn new(value: T) -> Self {
        let (sender, _) = watch::channel(value);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// 写入新值并通知所有监听者；没有监听者时同样会保存新值。
    pub fn update(&self, new_value: T) {
        self.sender.send_replace(new_value);
    }

    /// 当前值的快照（会 clone）。
    pub fn get_current(&self) -> T {
        self.sender.borrow().clone()
    }

    /// 创建一个监听器。监听器创建时的当前值视为已读。
    pub fn watch(&self) -> StateWatcher<T> {
        StateWatcher {
            receiver: self.sender.subscribe(),
        }
    }
}

/// 状态监听器
#[derive(Debug)]
pub struct StateWatcher<T> {
    receiver: watch::Receiver<T>,
}

impl<T> StateWatcher<T>
where
    T: Clone + Send + Sync,
{
    /// 等待下一次变化，返回变化后的值。
    pub async fn changed(&mut self) -> Result<T, StateError> {
        self.receiver.changed().await?;
        Ok(self.receiver.borrow_and_update().clone())
    }

    /// 等待直到值满足条件；当前值已满足时立即返回。
    pub async fn wait_for(
        &mut self,
        predicate: impl FnMut(&T) -> bool,
    ) -> Result<T, StateError> {
        let value = self.receiver.wait_for(predicate).await?;
        Ok(value.clone())
    }

    pub fn borrow(&self) -> T {
        self.receiver.borrow().clone()
    }
}
