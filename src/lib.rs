//! # curlsmith
//!
//! Interactive terminal tool for assembling HTTP requests, previewing them
//! as shell-ready `curl` command lines, executing them, and saving them for
//! later replay.
//!
//! ## Architecture
//! - Core: request model, curl serializer/parser, executor, saved-request
//!   store
//! - Presentation: prompt-driven session flows (quick and menu) layered on
//!   top of the core

pub mod catalog;
pub mod constants;
pub mod curl;
pub mod models;
pub mod network;
pub mod session;
pub mod storage;

// Re-export commonly used types
pub use catalog::{HeaderCatalog, METHODS};
pub use curl::{parse_curl, to_curl};
pub use models::Request;
pub use network::{create_client, execute, Outcome, ResponseDetail};
pub use session::Session;
pub use storage::{default_store_path, Store};
