use std::time::Duration;

use reqwest::Client;

use crate::internal::call::structs::call_error::CallError;

/// 默认连接超时：10 秒
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// 默认读取超时：30 秒（两次读到数据之间的最长间隔，下载大文件时不限制总时长）
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(30);

/// 默认 User-Agent
pub const DEFAULT_USER_AGENT: &str = concat!("call_await/", env!("CARGO_PKG_VERSION"));

/// 内置 HTTP 操作源使用的客户端配置
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
    /// 整个请求（含响应体）的总超时，`None` 表示不限制
    pub timeout: Option<Duration>,
    pub user_agent: String,
    /// 只使用 HTTP/1.1
    pub http1_only: bool,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            read_timeout: DEFAULT_READ_TIMEOUT,
            timeout: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            http1_only: false,
        }
    }
}

impl HttpClientConfig {
    pub fn build_client(&self) -> Result<Client, CallError> {
        let mut builder = Client::builder()
            .connect_timeout(self.connect_timeout)
            .read_timeout(self.read_timeout)
            .user_agent(self.user_agent.as_str());

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if self.http1_only {
            builder = builder.http1_only();
        }

        builder.build().map_err(CallError::ClientBuild)
    }
}
