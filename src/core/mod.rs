pub mod forward;
pub mod routes;
pub mod server;
pub mod upstream;

pub use crate::domain::model::{Route, UpstreamBody, UpstreamRequest};
pub use crate::domain::ports::{ConfigProvider, Upstream};
pub use crate::utils::error::Result;
