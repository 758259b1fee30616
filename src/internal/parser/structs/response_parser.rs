use async_trait::async_trait;

use crate::internal::call::structs::call_error::CallError;
use crate::internal::http::structs::raw_response::RawResponse;
use crate::internal::parser::traits::parser::Parser;

/// 原样返回响应，不检查状态码，响应体留给调用方读取。
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseParser;

#[async_trait]
impl Parser<RawResponse> for ResponseParser {
    async fn on_parse(&self, raw: RawResponse) -> Result<RawResponse, CallError> {
        Ok(raw)
    }
}
