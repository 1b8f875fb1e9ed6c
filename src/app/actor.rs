//! Store actor - message loop owning the store
//!
//! Commands are handled strictly one after another, so a second initial
//! load can never interleave with a running one. After each command the
//! actor publishes a fresh [`ViewState`].

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::app::store::AppStore;
use crate::error::{Result, StoreError};
use crate::messages::{Reply, StoreCommand, ViewState};
use crate::models::{UserData, UserSettings};
use crate::network::Transport;

/// Store actor that processes commands against its [`AppStore`]
pub struct StoreActor<T> {
    store: AppStore<T>,
    view_tx: mpsc::UnboundedSender<ViewState>,
}

impl<T: Transport + 'static> StoreActor<T> {
    pub fn new(store: AppStore<T>, view_tx: mpsc::UnboundedSender<ViewState>) -> Self {
        StoreActor { store, view_tx }
    }

    /// Spawn the actor on the current runtime and return a handle to it
    pub fn spawn(
        store: AppStore<T>,
        view_tx: mpsc::UnboundedSender<ViewState>,
    ) -> (StoreHandle, JoinHandle<()>) {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(StoreActor::new(store, view_tx).run(cmd_rx));
        (StoreHandle { tx: cmd_tx }, task)
    }

    /// Run the actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<StoreCommand>) {
        // Send initial view state
        let _ = self.view_tx.send(self.store.state().to_view_state());

        while let Some(cmd) = cmd_rx.recv().await {
            if self.handle_command(cmd).await {
                tracing::info!("Store actor shutting down");
                break;
            }
            let _ = self.view_tx.send(self.store.state().to_view_state());
        }
    }

    /// Handle one command, returns true if shutdown was requested
    async fn handle_command(&mut self, cmd: StoreCommand) -> bool {
        match cmd {
            StoreCommand::LoadInitial { reply } => {
                let _ = reply.send(self.store.fetch_initial_data().await);
            }
            StoreCommand::ReloadModels { reply } => {
                let _ = reply.send(self.store.reload_models().await);
            }
            StoreCommand::FetchUserData { id, reply } => {
                let _ = reply.send(self.store.fetch_user_data(id).await);
            }
            StoreCommand::SelectModel { name, reply } => {
                self.store.select_model(name);
                let _ = reply.send(Ok(()));
            }
            StoreCommand::UpdateSettings { settings, reply } => {
                let _ = reply.send(self.store.update_settings(settings));
            }
            StoreCommand::SaveSettings { reply } => {
                let _ = reply.send(self.store.save_current_settings().await);
            }
            StoreCommand::Reset { id, reply } => {
                let _ = reply.send(self.store.reset(id).await);
            }
            StoreCommand::CalculateImageCost { settings, reply } => {
                let settings = settings.or_else(|| self.store.pending_settings());
                let result = match settings {
                    Some(settings) => self.store.calculate_image_cost(&settings).await,
                    None => Err(StoreError::NoUser),
                };
                let _ = reply.send(result);
            }
            StoreCommand::ChangeLanguage { lang, reply } => {
                let _ = reply.send(self.store.change_language(&lang).await);
            }
            StoreCommand::Shutdown => return true,
        }

        false
    }
}

/// Cloneable sender side of a running [`StoreActor`]
#[derive(Clone, Debug)]
pub struct StoreHandle {
    tx: mpsc::UnboundedSender<StoreCommand>,
}

impl StoreHandle {
    async fn request<V>(&self, make: impl FnOnce(Reply<V>) -> StoreCommand) -> Result<V> {
        let (reply, rx) = oneshot::channel();
        self.tx.send(make(reply)).map_err(|_| StoreError::ActorGone)?;
        rx.await.map_err(|_| StoreError::ActorGone)?
    }

    pub async fn load_initial(&self) -> Result<()> {
        self.request(|reply| StoreCommand::LoadInitial { reply }).await
    }

    pub async fn reload_models(&self) -> Result<usize> {
        self.request(|reply| StoreCommand::ReloadModels { reply }).await
    }

    pub async fn fetch_user_data(&self, id: i64) -> Result<UserData> {
        self.request(|reply| StoreCommand::FetchUserData { id, reply })
            .await
    }

    pub async fn select_model(&self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        self.request(|reply| StoreCommand::SelectModel { name, reply })
            .await
    }

    pub async fn update_settings(&self, settings: UserSettings) -> Result<()> {
        self.request(|reply| StoreCommand::UpdateSettings { settings, reply })
            .await
    }

    pub async fn save_settings(&self) -> Result<bool> {
        self.request(|reply| StoreCommand::SaveSettings { reply }).await
    }

    pub async fn reset(&self, id: i64) -> Result<bool> {
        self.request(|reply| StoreCommand::Reset { id, reply }).await
    }

    pub async fn calculate_image_cost(&self, settings: Option<UserSettings>) -> Result<bool> {
        self.request(|reply| StoreCommand::CalculateImageCost { settings, reply })
            .await
    }

    pub async fn change_language(&self, lang: impl Into<String>) -> Result<()> {
        let lang = lang.into();
        self.request(|reply| StoreCommand::ChangeLanguage { lang, reply })
            .await
    }

    /// Ask the actor to stop; pending commands queued before this still run
    pub fn shutdown(&self) {
        let _ = self.tx.send(StoreCommand::Shutdown);
    }
}
