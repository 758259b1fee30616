//! 各类型的等待方法。
//!
//! 除下载外，所有 `await_xxx` 都只是给 [`AwaitCall::await_with`] 提供一个对应的解析器。
//!
//! ```rust,no_run
//! # use call_await::call::AwaitCall;
//! # use call_await::http::HttpRequest;
//! # async fn example(client: reqwest::Client) -> Result<(), call_await::call::CallError> {
//! let request = HttpRequest::get(&client, "https://example.com/count")?;
//! let count = request.await_i64().await?;
//! let names: Vec<String> = request.await_list().await?;
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;
use std::hash::Hash;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;

use crate::internal::call::structs::call_error::CallError;
use crate::internal::call::structs::pending_operation::PendingOperation;
use crate::internal::call::traits::call_factory::CallFactory;
use crate::internal::download::structs::download_awaiter::DownloadAwaiter;
use crate::internal::http::structs::raw_response::RawResponse;
use crate::internal::parser::structs::response_parser::ResponseParser;
use crate::internal::parser::structs::simple_parser::{ListParser, MapParser, SimpleParser};
use crate::internal::parser::structs::string_parser::StringParser;
use crate::internal::parser::traits::parser::Parser;
use crate::internal::progress::structs::progress::Progress;
use crate::internal::progress::traits::dispatcher::Dispatcher;

#[async_trait]
pub trait AwaitCall: CallFactory {
    /// 生成一次尚未开始的调用，可在等待前挂上取消令牌或监听状态。
    fn pending(&self) -> Result<PendingOperation<RawResponse>, CallError> {
        Ok(PendingOperation::new(self.new_call(None)?))
    }

    /// 所有非下载的 `await_xxx` 最终都走这里。
    async fn await_with<T, P>(&self, parser: P) -> Result<T, CallError>
    where
        T: Send,
        P: Parser<T>,
    {
        self.pending()?.await_with(parser).await
    }

    async fn await_bool(&self) -> Result<bool, CallError> {
        self.await_with(SimpleParser::<bool>::new()).await
    }

    async fn await_i8(&self) -> Result<i8, CallError> {
        self.await_with(SimpleParser::<i8>::new()).await
    }

    async fn await_i16(&self) -> Result<i16, CallError> {
        self.await_with(SimpleParser::<i16>::new()).await
    }

    async fn await_i32(&self) -> Result<i32, CallError> {
        self.await_with(SimpleParser::<i32>::new()).await
    }

    async fn await_i64(&self) -> Result<i64, CallError> {
        self.await_with(SimpleParser::<i64>::new()).await
    }

    async fn await_f32(&self) -> Result<f32, CallError> {
        self.await_with(SimpleParser::<f32>::new()).await
    }

    async fn await_f64(&self) -> Result<f64, CallError> {
        self.await_with(SimpleParser::<f64>::new()).await
    }

    /// 响应体原文
    async fn await_string(&self) -> Result<String, CallError> {
        self.await_with(StringParser).await
    }

    async fn await_json<T>(&self) -> Result<T, CallError>
    where
        T: DeserializeOwned + Send,
    {
        self.await_with(SimpleParser::<T>::new()).await
    }

    async fn await_list<T>(&self) -> Result<Vec<T>, CallError>
    where
        T: DeserializeOwned + Send,
    {
        self.await_with(ListParser::<T>::new()).await
    }

    async fn await_map<K, V>(&self) -> Result<HashMap<K, V>, CallError>
    where
        K: DeserializeOwned + Eq + Hash + Send,
        V: DeserializeOwned + Send,
    {
        self.await_with(MapParser::<K, V>::new()).await
    }

    /// 原始响应，不检查状态码
    async fn await_response(&self) -> Result<RawResponse, CallError> {
        self.await_with(ResponseParser).await
    }

    /// 先等待完整的原始响应，再从中取出响应头
    async fn await_headers(&self) -> Result<HeaderMap, CallError> {
        Ok(self.await_response().await?.into_headers())
    }

    /// 下载构建器；可链式配置续传偏移、进度回调、调度器、取消令牌后 `send()`。
    fn download_to(&self, dest_path: impl AsRef<Path>) -> DownloadAwaiter<'_, Self> {
        DownloadAwaiter::new(self, dest_path)
    }

    /// 下载到 `dest_path`，返回写入的路径。
    ///
    /// `offset_size` 为续传前已存在的字节数；`dispatcher` 为空时进度在传输线程上同步回调。
    async fn await_download<D, F>(
        &self,
        dest_path: D,
        dispatcher: Option<Arc<dyn Dispatcher>>,
        offset_size: u64,
        on_progress: F,
    ) -> Result<String, CallError>
    where
        D: AsRef<Path> + Send,
        F: Fn(Progress) + Send + Sync + 'static,
    {
        self.download_to(dest_path)
            .offset_size(offset_size)
            .dispatch_on_shared(dispatcher)
            .on_progress(on_progress)
            .send()
            .await
    }
}

impl<F> AwaitCall for F where F: CallFactory + ?Sized {}
