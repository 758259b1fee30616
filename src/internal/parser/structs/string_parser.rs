use async_trait::async_trait;

use crate::internal::call::structs::call_error::CallError;
use crate::internal::http::structs::raw_response::RawResponse;
use crate::internal::parser::functions::ensure_success::ensure_success;
use crate::internal::parser::traits::parser::Parser;

/// 2xx 响应体原样作为字符串返回，不做 JSON 解析。
#[derive(Debug, Clone, Copy, Default)]
pub struct StringParser;

#[async_trait]
impl Parser<String> for StringParser {
    async fn on_parse(&self, raw: RawResponse) -> Result<String, CallError> {
        ensure_success(raw).await?.text().await
    }
}
