pub mod http_call;
pub mod http_client_config;
pub mod http_request;
pub mod raw_response;

pub use http_call::HttpCall;
pub use http_client_config::HttpClientConfig;
pub use http_request::HttpRequest;
pub use raw_response::{BodyStream, RawResponse};
