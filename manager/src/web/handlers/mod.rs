//! HTTP request handlers for the cache manager API.
//!
//! This module is organized by domain:
//! - `cache` - Manual cache operations and backup listings
//! - `common` - Shared response envelope and query structs
//! - `operations` - Operation history
//! - `schedule` - Schedule configuration and lifecycle

pub mod cache;
pub mod common;
pub mod operations;
pub mod schedule;

// Note: common module is internal, used only by sibling modules
pub use cache::*;
pub use operations::*;
pub use schedule::*;
