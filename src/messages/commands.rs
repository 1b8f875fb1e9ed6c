//! Store commands - requests sent to the store actor

use tokio::sync::oneshot;

use crate::error::Result;
use crate::models::{UserData, UserSettings};

/// Where the actor sends the outcome of one command
pub type Reply<T> = oneshot::Sender<Result<T>>;

/// Commands processed by [`crate::app::StoreActor`], one at a time
#[derive(Debug)]
pub enum StoreCommand {
    /// Load user, content and models into state
    LoadInitial { reply: Reply<()> },
    /// Replace the model catalog
    ReloadModels { reply: Reply<usize> },
    /// Fetch a user record without touching state
    FetchUserData { id: i64, reply: Reply<UserData> },
    /// Change the selected model locally
    SelectModel { name: String, reply: Reply<()> },
    /// Replace the loaded user's settings locally
    UpdateSettings {
        settings: UserSettings,
        reply: Reply<()>,
    },
    /// Persist the loaded user's settings
    SaveSettings { reply: Reply<bool> },
    /// Reset a user server-side and reload it
    Reset { id: i64, reply: Reply<bool> },
    /// Dry-run cost of a generation; `None` uses the loaded user's settings
    CalculateImageCost {
        settings: Option<UserSettings>,
        reply: Reply<bool>,
    },
    /// Switch locale and fetch its content
    ChangeLanguage { lang: String, reply: Reply<()> },
    /// Stop the actor
    Shutdown,
}
