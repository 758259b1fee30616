pub mod download_awaiter;

pub use download_awaiter::DownloadAwaiter;
