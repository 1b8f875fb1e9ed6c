//! App layer - application state, its projections, and the operations
//! that keep it in sync with the backend
//!
//! [`AppStore`] owns the state and runs operations; [`StoreActor`] wraps a
//! store in a message loop for a UI to drive.

pub mod actor;
pub mod state;
pub mod store;
pub mod views;

pub use actor::{StoreActor, StoreHandle};
pub use state::AppState;
pub use store::AppStore;
