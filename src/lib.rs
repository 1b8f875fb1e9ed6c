//! # artbot-store
//!
//! Application state and data-fetching layer of the artbot Telegram
//! mini-app.
//!
//! ## Features
//! - Current user, model catalog and localized site text as one state
//! - Derived views: tab labels, modes, resolution presets, languages
//! - Settings save, account reset, dry-run cost estimate
//! - Sequential or parallel initial load
//!
//! ## Architecture
//! - App Layer - [`AppStore`] owns [`AppState`]; [`StoreActor`] serializes commands
//! - Network Layer - typed [`ApiClient`] over a [`Transport`] (reqwest in production)

pub mod app;
pub mod config;
pub mod constants;
pub mod error;
pub mod messages;
pub mod models;
pub mod network;

// Re-export commonly used types
pub use app::{AppState, AppStore, StoreActor, StoreHandle};
pub use config::{InitialLoadPolicy, StoreConfig};
pub use error::StoreError;
pub use messages::{StoreCommand, ViewState};
pub use models::{Content, Mode, Model, User, UserData, UserSettings};
pub use network::{ApiClient, HttpTransport, Transport};
