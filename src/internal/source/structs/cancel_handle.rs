use std::sync::{Mutex, PoisonError};

type CancelAction = Box<dyn FnOnce() + Send>;

/// 底层操作的取消句柄，由挂起点独占持有。
///
/// 无论操作源自身的 cancel / dispose 是否幂等，本句柄保证其最多被调用一次。
pub struct CancelHandle {
    action: Mutex<Option<CancelAction>>,
}

impl CancelHandle {
    pub fn new(action: impl FnOnce() + Send + 'static) -> Self {
        Self {
            action: Mutex::new(Some(Box::new(action))),
        }
    }

    /// 调用取消动作；返回本次是否真正执行了动作。
    pub fn cancel(&self) -> bool {
        let action = self
            .action
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        match action {
            Some(action) => {
                action();
                true
            }
            None => false,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.action
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }
}

impl std::fmt::Debug for CancelHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CancelHandle")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}
