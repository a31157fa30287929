use crate::domain::model::{UpstreamBody, UpstreamRequest};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::net::SocketAddr;
use std::time::Duration;

pub trait ConfigProvider: Send + Sync {
    fn upstream_base_url(&self) -> &str;
    fn bind_address(&self) -> SocketAddr;
    fn base_path(&self) -> &str;
    fn request_timeout(&self) -> Option<Duration>;
}

/// Anything able to answer an [`UpstreamRequest`] with the raw upstream body.
#[async_trait]
pub trait Upstream: Send + Sync {
    async fn fetch(&self, request: &UpstreamRequest) -> Result<UpstreamBody>;
}
