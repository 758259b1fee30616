//! 原始响应：状态码、响应头与尚未读取的流式响应体。
//!
//! 响应体只能被消费一次，交由解析器决定是整体读入内存还是边读边写盘。

use std::pin::Pin;

use bytes::{Bytes, BytesMut};
use futures_util::{Stream, StreamExt};
use reqwest::StatusCode;
use reqwest::header::{CONTENT_LENGTH, HeaderMap};
use url::Url;

use crate::internal::call::structs::call_error::CallError;
use crate::internal::progress::structs::progress::percent_of;
use crate::internal::progress::traits::progress_callback::ProgressCallback;

/// 流式响应体
pub type BodyStream = Pin<Box<dyn Stream<Item = Result<Bytes, CallError>> + Send>>;

pub struct RawResponse {
    status: StatusCode,
    headers: HeaderMap,
    url: Option<Url>,
    body: BodyStream,
}

impl RawResponse {
    pub fn new(
        status: StatusCode,
        headers: HeaderMap,
        body: impl Stream<Item = Result<Bytes, CallError>> + Send + 'static,
    ) -> Self {
        Self {
            status,
            headers,
            url: None,
            body: Box::pin(body),
        }
    }

    /// 用完整的内存数据构造响应，`Content-Length` 按数据长度补齐。
    pub fn from_bytes(status: StatusCode, mut headers: HeaderMap, body: impl Into<Bytes>) -> Self {
        let body: Bytes = body.into();
        if !headers.contains_key(CONTENT_LENGTH) {
            headers.insert(CONTENT_LENGTH, body.len().into());
        }
        Self::new(
            status,
            headers,
            futures_util::stream::once(async move { Ok(body) }),
        )
    }

    pub(crate) fn from_reqwest(response: reqwest::Response) -> Self {
        let status = response.status();
        let headers = response.headers().clone();
        let url = response.url().clone();
        let body = response
            .bytes_stream()
            .map(|chunk| chunk.map_err(CallError::Request));

        Self {
            status,
            headers,
            url: Some(url),
            body: Box::pin(body),
        }
    }

    pub fn with_url(mut self, url: Url) -> Self {
        self.url = Some(url);
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn url(&self) -> Option<&Url> {
        self.url.as_ref()
    }

    /// 状态码是否为 2xx
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// 从 `Content-Length` 解析的响应体长度
    pub fn content_length(&self) -> Option<u64> {
        self.headers
            .get(CONTENT_LENGTH)?
            .to_str()
            .ok()?
            .parse()
            .ok()
    }

    /// 拆出响应头，丢弃未读取的响应体
    pub fn into_headers(self) -> HeaderMap {
        self.headers
    }

    pub fn into_body(self) -> BodyStream {
        self.body
    }

    /// 读取完整响应体
    pub async fn bytes(self) -> Result<Bytes, CallError> {
        let mut body = self.body;
        let mut buf = BytesMut::new();
        while let Some(chunk) = body.next().await {
            buf.extend_from_slice(&chunk?);
        }
        Ok(buf.freeze())
    }

    /// 读取完整响应体并按 UTF-8 解码（非法字节按替换字符处理）
    pub async fn text(self) -> Result<String, CallError> {
        let bytes = self.bytes().await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// 给响应体挂上进度回调：百分比变化时回调一次；总长度未知时每块数据回调一次。
    pub fn with_progress(self, mut callback: Box<dyn ProgressCallback>) -> Self {
        let total = self.content_length();
        let mut current: u64 = 0;
        let mut last_percent: Option<u8> = None;

        let body = self.body.map(move |chunk| {
            if let Ok(bytes) = &chunk {
                current += bytes.len() as u64;
                match total.filter(|&t| t > 0) {
                    Some(t) => {
                        let percent = percent_of(current, t);
                        if last_percent.is_none_or(|last| percent > last) {
                            last_percent = Some(percent);
                            callback.on_progress(percent, current, total);
                        }
                    }
                    None => callback.on_progress(0, current, None),
                }
            }
            chunk
        });

        Self {
            status: self.status,
            headers: self.headers,
            url: self.url,
            body: Box::pin(body),
        }
    }
}

impl std::fmt::Debug for RawResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawResponse")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .field("url", &self.url)
            .finish_non_exhaustive()
    }
}
