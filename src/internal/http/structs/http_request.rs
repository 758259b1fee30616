use reqwest::header::{HeaderValue, RANGE};
use reqwest::{Client, Method, Request};
use url::Url;

use crate::internal::call::structs::call_error::CallError;
use crate::internal::call::traits::call_factory::CallFactory;
use crate::internal::http::structs::http_call::HttpCall;
use crate::internal::http::structs::raw_response::RawResponse;
use crate::internal::progress::traits::progress_callback::ProgressCallback;
use crate::internal::source::structs::operation_source::OperationSource;

/// 可重复发起的请求模板：每次 `new_call` 复制一份请求，生成一个新的 [`HttpCall`]。
#[derive(Debug)]
pub struct HttpRequest {
    client: Client,
    request: Request,
}

impl HttpRequest {
    pub fn new(client: Client, request: Request) -> Self {
        Self { client, request }
    }

    pub fn get(client: &Client, url: &str) -> Result<Self, CallError> {
        let url = Url::parse(url)?;
        Ok(Self::new(client.clone(), Request::new(Method::GET, url)))
    }

    /// 续传：从 `offset` 字节开始请求剩余部分；`offset` 为 0 时不做修改。
    pub fn resume_from(mut self, offset: u64) -> Self {
        if offset > 0 {
            if let Ok(value) = HeaderValue::from_str(&format!("bytes={offset}-")) {
                self.request.headers_mut().insert(RANGE, value);
            }
        }
        self
    }

    pub fn request(&self) -> &Request {
        &self.request
    }
}

impl CallFactory for HttpRequest {
    fn new_call(
        &self,
        progress: Option<Box<dyn ProgressCallback>>,
    ) -> Result<OperationSource<RawResponse>, CallError> {
        let request = self
            .request
            .try_clone()
            .ok_or(CallError::RequestNotCloneable)?;

        Ok(OperationSource::callback(HttpCall::new(
            self.client.clone(),
            request,
            progress,
        )))
    }
}
