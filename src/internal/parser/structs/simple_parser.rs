use std::collections::HashMap;
use std::marker::PhantomData;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::internal::call::structs::call_error::CallError;
use crate::internal::http::structs::raw_response::RawResponse;
use crate::internal::parser::functions::ensure_success::ensure_success;
use crate::internal::parser::traits::parser::Parser;

/// 把 2xx 响应体按 JSON 反序列化为 `T`。
pub struct SimpleParser<T> {
    _marker: PhantomData<fn() -> T>,
}

/// JSON 数组
pub type ListParser<T> = SimpleParser<Vec<T>>;

/// JSON 对象
pub type MapParser<K, V> = SimpleParser<HashMap<K, V>>;

impl<T> SimpleParser<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for SimpleParser<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T> Parser<T> for SimpleParser<T>
where
    T: DeserializeOwned + Send,
{
    async fn on_parse(&self, raw: RawResponse) -> Result<T, CallError> {
        let body = ensure_success(raw).await?.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
