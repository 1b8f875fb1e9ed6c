//! App state - pure data structure with no I/O logic

use crate::app::views;
use crate::config::StoreConfig;
use crate::messages::ViewState;
use crate::models::{Content, Model, User};

/// Raw application state.
///
/// Readable by anyone; written only by [`crate::app::AppStore`]
/// operations. Derived data lives in [`crate::app::views`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AppState {
    pub(crate) models: Vec<Model>,
    pub(crate) user: Option<User>,
    pub(crate) site_content: Option<Content>,
    pub(crate) selected_model: Option<String>,
    pub(crate) user_id: i64,
    pub(crate) lang: String,
    pub(crate) image_cost: f64,
}

impl AppState {
    pub fn new(user_id: i64, lang: impl Into<String>) -> Self {
        AppState {
            user_id,
            lang: lang.into(),
            ..Default::default()
        }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(config.user_id, config.lang.clone())
    }

    pub fn models(&self) -> &[Model] {
        &self.models
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn site_content(&self) -> Option<&Content> {
        self.site_content.as_ref()
    }

    pub fn selected_model(&self) -> Option<&str> {
        self.selected_model.as_deref()
    }

    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    pub fn lang(&self) -> &str {
        &self.lang
    }

    pub fn image_cost(&self) -> f64 {
        self.image_cost
    }

    /// True when the selected model differs from what the loaded user has saved
    pub fn has_unsaved_model(&self) -> bool {
        match (&self.user, &self.selected_model) {
            (Some(user), Some(selected)) => user.settings.model.as_deref() != Some(selected.as_str()),
            _ => false,
        }
    }

    /// Snapshot of raw state and every projection for the UI
    pub fn to_view_state(&self) -> ViewState {
        ViewState {
            user: self.user.clone(),
            selected_model: self.selected_model.clone(),
            user_id: self.user_id,
            lang: self.lang.clone(),
            image_cost: self.image_cost,
            model_names: views::model_names(self),
            tab_headers: views::tab_headers(self.site_content()),
            modes: views::modes(self.site_content()),
            resolutions: views::resolutions().to_vec(),
            languages: views::language_objects(),
        }
    }
}
