use crate::internal::call::structs::call_error::CallError;
use crate::internal::http::structs::raw_response::RawResponse;
use crate::internal::progress::traits::progress_callback::ProgressCallback;
use crate::internal::source::structs::operation_source::OperationSource;

/// 能反复生成新调用的请求描述。
///
/// 每次调用生成一个全新的、尚未启动的操作源；`progress` 不为空时，
/// 操作源在读取响应体时把进度回调给它。
pub trait CallFactory: Send + Sync {
    fn new_call(
        &self,
        progress: Option<Box<dyn ProgressCallback>>,
    ) -> Result<OperationSource<RawResponse>, CallError>;
}
