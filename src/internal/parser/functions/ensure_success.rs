use crate::internal::call::structs::call_error::CallError;
use crate::internal::http::structs::raw_response::RawResponse;

/// 非 2xx 响应读出响应体作为错误信息返回；2xx 原样交回。
pub(crate) async fn ensure_success(response: RawResponse) -> Result<RawResponse, CallError> {
    if response.is_success() {
        return Ok(response);
    }

    let status = response.status().as_u16();
    // 读取失败时错误信息留空，状态码本身已足够说明问题
    let body = response.text().await.unwrap_or_default();
    tracing::debug!(status, "响应状态码非 2xx");
    Err(CallError::HttpStatus { status, body })
}
