//! Message types flowing between the UI layer and the store actor.

pub mod commands;
pub mod view;

pub use commands::{Reply, StoreCommand};
pub use view::ViewState;
