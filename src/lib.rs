//! Thin HTTP proxy behind the QuikNepal site.
//!
//! Calendar, conversion, market-rate, forex and rashifal data all live on an
//! external API. This crate re-exposes a fixed set of its endpoints, renames
//! the month parameter for the detailed calendar, relays successful bodies
//! byte-for-byte and turns every upstream failure into a route-specific 500.

pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliArgs;
pub use crate::config::{ConfigOverrides, ProxyConfig};

pub use crate::core::routes::AppState;
pub use crate::core::server::{router, serve};
pub use crate::core::upstream::HttpUpstream;
pub use crate::domain::model::Route;
pub use crate::utils::error::{ProxyError, Result};
