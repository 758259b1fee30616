//! 调用相关错误类型。

use thiserror::Error;

/// 错误大类。挂起点上只区分「没有产生值」与「被取消」，
/// 细分到传输 / 转换仅用于日志和诊断。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallErrorKind {
    /// 底层操作报告失败（网络、协议、服务端）
    Transport,
    /// 解析器在转换成功的原始结果时失败
    Transform,
    /// 等待方在结果提交前取消
    Cancellation,
}

#[derive(Debug, Error)]
pub enum CallError {
    #[error("HTTP 请求失败: {0}")]
    Request(#[from] reqwest::Error),

    #[error("传输失败: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("HTTP 状态码异常: {status}，响应体: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("请求已执行过，不能重复发送")]
    AlreadyExecuted,

    #[error("请求体为流，无法复制出新的调用")]
    RequestNotCloneable,

    #[error("URL 格式错误: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("构建 HTTP 客户端失败: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("当前不在 tokio 运行时中")]
    NoRuntime,

    #[error("操作源未产生任何结果就结束了")]
    Abandoned,

    #[error("响应解析失败: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("结果转换失败: {0}")]
    Transform(String),

    #[error("创建文件失败: {0}")]
    CreateFile(std::io::Error),

    #[error("写入文件失败: {0}")]
    WriteFile(std::io::Error),

    #[error("调用被取消")]
    Cancelled,
}

impl CallError {
    /// 将任意错误包装为传输错误，供自定义操作源使用。
    pub fn transport(
        err: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Transport(err.into())
    }

    pub fn kind(&self) -> CallErrorKind {
        match self {
            Self::Request(_)
            | Self::Transport(_)
            | Self::HttpStatus { .. }
            | Self::AlreadyExecuted
            | Self::RequestNotCloneable
            | Self::InvalidUrl(_)
            | Self::ClientBuild(_)
            | Self::NoRuntime
            | Self::Abandoned => CallErrorKind::Transport,
            Self::Parse(_)
            | Self::Transform(_)
            | Self::CreateFile(_)
            | Self::WriteFile(_) => CallErrorKind::Transform,
            Self::Cancelled => CallErrorKind::Cancellation,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
