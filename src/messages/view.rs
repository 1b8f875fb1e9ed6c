//! View state - snapshot sent from the store actor to the UI after every command

use serde::Serialize;

use crate::app::views::{LanguageOption, ModeOption, Resolution};
use crate::models::User;

/// Everything the UI needs to render, raw and derived
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewState {
    // Raw state
    pub user: Option<User>,
    pub selected_model: Option<String>,
    pub user_id: i64,
    pub lang: String,
    pub image_cost: f64,

    // Projections
    pub model_names: Vec<String>,
    pub tab_headers: Vec<String>,
    pub modes: Vec<ModeOption>,
    pub resolutions: Vec<Resolution>,
    pub languages: Vec<LanguageOption>,
}

impl ViewState {
    pub fn is_loaded(&self) -> bool {
        self.user.is_some()
    }
}
