use crate::error::FetchError;
use async_trait::async_trait;

mod request;

pub use request::RequestFetcher;

/// Retrieves a page body. Timeouts, retries and headers are the fetcher's
/// concern; extraction only ever sees the finished HTML.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}
