//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

/// Directory under the home directory that holds saved data
pub const CONFIG_DIR: &str = ".curlsmith";

/// File name of the saved request store
pub const STORE_FILE: &str = "saved_requests.json";

/// Application name
pub const APP_NAME: &str = "curlsmith";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
