//! 下载解析器：把响应体流式写入目标文件，返回文件路径。

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::StatusCode;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

use crate::internal::call::structs::call_error::CallError;
use crate::internal::http::structs::raw_response::RawResponse;
use crate::internal::parser::functions::ensure_success::ensure_success;
use crate::internal::parser::traits::parser::Parser;

/// 服务端返回 `206 Partial Content` 时视为续传，追加写入；否则覆盖写入。
#[derive(Debug, Clone)]
pub struct DownloadParser {
    dest_path: PathBuf,
}

impl DownloadParser {
    pub fn new(dest_path: impl AsRef<Path>) -> Self {
        Self {
            dest_path: dest_path.as_ref().to_path_buf(),
        }
    }

    pub fn dest_path(&self) -> &Path {
        &self.dest_path
    }
}

#[async_trait]
impl Parser<String> for DownloadParser {
    async fn on_parse(&self, raw: RawResponse) -> Result<String, CallError> {
        let response = ensure_success(raw).await?;
        let append = response.status() == StatusCode::PARTIAL_CONTENT;

        if let Some(parent) = self.dest_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(CallError::CreateFile)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .append(append)
            .truncate(!append)
            .open(&self.dest_path)
            .await
            .map_err(CallError::CreateFile)?;

        tracing::debug!(path = %self.dest_path.display(), append, "开始写入下载文件");

        let mut body = response.into_body();
        let mut written: u64 = 0;
        while let Some(chunk) = body.next().await {
            let chunk = chunk?;
            file.write_all(&chunk).await.map_err(CallError::WriteFile)?;
            written += chunk.len() as u64;
        }
        file.flush().await.map_err(CallError::WriteFile)?;

        tracing::debug!(path = %self.dest_path.display(), written, "下载文件写入完成");
        Ok(self.dest_path.to_string_lossy().into_owned())
    }
}
