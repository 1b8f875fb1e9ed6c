//! App store - owns [`AppState`] and runs every operation that changes it
//!
//! All writes go through `&mut self` methods, so one store never runs two
//! state-changing operations at once. Fetch helpers only take `&self`
//! and hand their result back without touching state.

use crate::app::state::AppState;
use crate::config::{InitialLoadPolicy, StoreConfig};
use crate::error::{Result, StoreError};
use crate::models::{Content, Model, User, UserData, UserSettings};
use crate::network::{ApiClient, HttpTransport, Transport};

/// Log a failed operation before handing the error on
fn logged<V>(result: Result<V>, what: &'static str) -> Result<V> {
    if let Err(e) = &result {
        tracing::error!(error = %e, "{}", what);
    }
    result
}

/// Application store: raw state plus the API it is synchronized with
pub struct AppStore<T> {
    api: ApiClient<T>,
    state: AppState,
    initial_load: InitialLoadPolicy,
}

impl AppStore<HttpTransport> {
    /// Store talking HTTP to the configured backend
    pub fn from_config(config: &StoreConfig) -> Self {
        let transport = HttpTransport::new(config.base_url.clone(), config.timeout());
        AppStore::new(
            ApiClient::new(transport),
            AppState::from_config(config),
            config.initial_load,
        )
    }
}

impl<T: Transport> AppStore<T> {
    pub fn new(api: ApiClient<T>, state: AppState, initial_load: InitialLoadPolicy) -> Self {
        AppStore {
            api,
            state,
            initial_load,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn initial_load_policy(&self) -> InitialLoadPolicy {
        self.initial_load
    }

    pub fn api(&self) -> &ApiClient<T> {
        &self.api
    }

    pub async fn fetch_content(&self, lang: &str) -> Result<Content> {
        logged(self.api.fetch_content(lang).await, "Error fetching content")
    }

    pub async fn fetch_models(&self) -> Result<Vec<Model>> {
        logged(self.api.fetch_models().await, "Error fetching models")
    }

    pub async fn fetch_user_data(&self, id: i64) -> Result<UserData> {
        logged(self.api.fetch_user_data(id).await, "Error fetching user")
    }

    /// Load user, content and model catalog into state.
    ///
    /// Whatever was written before a failing fetch stays written.
    pub async fn fetch_initial_data(&mut self) -> Result<()> {
        let result = match self.initial_load {
            InitialLoadPolicy::Sequential => self.load_sequential().await,
            InitialLoadPolicy::Parallel => self.load_parallel().await,
        };
        logged(result, "Error fetching initial data")
    }

    async fn load_sequential(&mut self) -> Result<()> {
        let data = self.fetch_user_data(self.state.user_id).await?;
        let lang = data
            .user
            .language()
            .unwrap_or(self.state.lang.as_str())
            .to_string();
        self.apply_user(data.user);

        let content = self.fetch_content(&lang).await?;
        self.state.lang = lang;
        self.state.site_content = Some(content);

        self.state.models = self.fetch_models().await?;
        tracing::info!(
            user_id = self.state.user_id,
            lang = %self.state.lang,
            models = self.state.models.len(),
            "Initial data loaded"
        );
        Ok(())
    }

    async fn load_parallel(&mut self) -> Result<()> {
        let lang = self.state.lang.clone();
        let (data, content) = tokio::try_join!(
            self.fetch_user_data(self.state.user_id),
            self.fetch_content(&lang)
        )?;
        self.apply_user(data.user);
        self.state.site_content = Some(content);

        self.state.models = self.fetch_models().await?;
        tracing::info!(
            user_id = self.state.user_id,
            lang = %self.state.lang,
            models = self.state.models.len(),
            "Initial data loaded"
        );
        Ok(())
    }

    /// Replace the user and resync the selected model with its settings
    fn apply_user(&mut self, user: User) {
        self.state.selected_model = user.settings.model.clone();
        self.state.user = Some(user);
    }

    /// Persist `settings` for user `id`
    pub async fn save_settings(&self, settings: &UserSettings, id: i64) -> Result<bool> {
        logged(
            self.api.save_settings(settings, id).await,
            "Error saving settings",
        )?;
        tracing::info!(user_id = id, "Settings saved");
        Ok(true)
    }

    /// The loaded user's settings with the selected model applied.
    ///
    /// This is what a save posts and what a cost estimate without explicit
    /// settings is priced on.
    pub fn pending_settings(&self) -> Option<UserSettings> {
        let mut settings = self.state.user.as_ref()?.settings.clone();
        if let Some(selected) = &self.state.selected_model {
            settings.model = Some(selected.clone());
        }
        Some(settings)
    }

    /// Persist the loaded user's settings with the selected model applied
    pub async fn save_current_settings(&mut self) -> Result<bool> {
        let Some(settings) = self.pending_settings() else {
            return logged(Err(StoreError::NoUser), "Error saving settings");
        };

        self.save_settings(&settings, self.state.user_id).await?;
        if let Some(user) = self.state.user.as_mut() {
            user.settings = settings;
        }
        Ok(true)
    }

    /// Reset user `id` server-side and reload it. `user` is untouched on failure.
    pub async fn reset(&mut self, id: i64) -> Result<bool> {
        logged(self.api.reset(id).await, "Error resetting user")?;
        let data = self.fetch_user_data(id).await?;
        self.apply_user(data.user);
        tracing::info!(user_id = id, "User reset");
        Ok(true)
    }

    /// Ask the backend what a generation with `settings` would cost.
    ///
    /// `image_cost` takes the returned kudos before the status is checked,
    /// so it is updated even when the call then fails.
    pub async fn calculate_image_cost(&mut self, settings: &UserSettings) -> Result<bool> {
        let outcome = logged(
            self.api.dry_run(settings).await,
            "Error calculating image cost",
        )?;

        if let Some(kudos) = outcome.kudos {
            self.state.image_cost = kudos;
        }

        if !outcome.is_success() {
            return logged(
                Err(StoreError::ImageCostFailed {
                    status: outcome.status,
                }),
                "Error calculating image cost",
            );
        }
        Ok(true)
    }

    /// Pick a model locally. Saves and cost estimates pick it up through
    /// [`Self::pending_settings`]; durable only after [`Self::save_current_settings`].
    pub fn select_model(&mut self, name: impl Into<String>) {
        self.state.selected_model = Some(name.into());
    }

    /// Replace the model catalog with a fresh copy from the backend
    pub async fn reload_models(&mut self) -> Result<usize> {
        self.state.models = self.fetch_models().await?;
        Ok(self.state.models.len())
    }

    /// Replace the loaded user's settings locally. Durable only after a save.
    pub fn update_settings(&mut self, settings: UserSettings) -> Result<()> {
        match self.settings_mut() {
            Some(current) => {
                *current = settings;
                Ok(())
            }
            None => Err(StoreError::NoUser),
        }
    }

    /// Local edits to the loaded user's settings
    pub fn settings_mut(&mut self) -> Option<&mut UserSettings> {
        self.state.user.as_mut().map(|u| &mut u.settings)
    }

    /// Switch the active locale, fetching its content first
    pub async fn change_language(&mut self, lang: &str) -> Result<()> {
        let content = self.fetch_content(lang).await?;
        self.state.lang = lang.to_string();
        self.state.site_content = Some(content);
        if let Some(settings) = self.settings_mut() {
            settings.lang = Some(lang.to_string());
        }
        Ok(())
    }

    /// Point subsequent loads at another user
    pub fn set_user_id(&mut self, id: i64) {
        self.state.user_id = id;
    }
}
