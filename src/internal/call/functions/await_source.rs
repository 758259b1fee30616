use crate::internal::call::structs::call_error::CallError;
use crate::internal::call::structs::pending_operation::PendingOperation;
use crate::internal::parser::traits::parser::Parser;
use crate::internal::source::structs::operation_source::OperationSource;
use crate::internal::source::traits::operation::{CallbackSource, ReactiveSource};

/// 订阅一个最多发出一个值的操作源，等待该值或错误。
pub async fn await_source<T>(
    source: impl ReactiveSource<T> + 'static,
) -> Result<T, CallError>
where
    T: Send + 'static,
{
    PendingOperation::new(OperationSource::reactive(source))
        .await_value()
        .await
}

/// 入队一个回调式操作源，等待其原始结果并用 `parser` 转换。
pub async fn await_callback<R, T, P>(
    source: impl CallbackSource<R> + 'static,
    parser: P,
) -> Result<T, CallError>
where
    R: Send + 'static,
    T: Send,
    P: Parser<T, R>,
{
    PendingOperation::new(OperationSource::callback(source))
        .await_with(parser)
        .await
}
