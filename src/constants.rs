//! Application constants
//!
//! Centralized location for the backend origin and state defaults.

/// Backend origin all API paths are joined to
pub const DEFAULT_BASE_URL: &str =
    "https://a3eqyxqi6gfrg3nhw4v3rl6q4m0gtpqi.lambda-url.eu-west-1.on.aws";

/// Test user loaded when nothing else is configured
pub const DEFAULT_USER_ID: i64 = 301507567;

/// Locale used before a user record says otherwise
pub const DEFAULT_LANG: &str = "en";

/// Transport timeout for every API call
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Directory under the home dir holding `config.yaml`
pub const CONFIG_DIR_NAME: &str = ".artbot";

/// Log file written by the binary
pub const LOG_FILE_NAME: &str = "artbot-store.log";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
