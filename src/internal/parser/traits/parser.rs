//! 结果转换策略：把底层操作的原始结果转换成调用方需要的类型。

use async_trait::async_trait;

use crate::internal::call::structs::call_error::CallError;
use crate::internal::http::structs::raw_response::RawResponse;

/// 每次调用最多执行一次；返回的错误会作为挂起点的失败结果交给调用方。
#[async_trait]
pub trait Parser<T, R = RawResponse>: Send + Sync
where
    R: Send + 'static,
{
    async fn on_parse(&self, raw: R) -> Result<T, CallError>;
}

/// 同步闭包形式的转换策略
pub struct FnParser<F>(pub F);

#[async_trait]
impl<F, T, R> Parser<T, R> for FnParser<F>
where
    F: Fn(R) -> Result<T, CallError> + Send + Sync,
    T: Send,
    R: Send + 'static,
{
    async fn on_parse(&self, raw: R) -> Result<T, CallError> {
        (self.0)(raw)
    }
}
