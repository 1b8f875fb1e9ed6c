//! artbot-store - command line driver for the mini-app store
//!
//! Spawns the store actor against the configured backend, runs one
//! command and prints the resulting view as JSON.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tokio::sync::mpsc;

use artbot_store::app::views;
use artbot_store::constants::{APP_VERSION, LOG_FILE_NAME};
use artbot_store::{AppStore, InitialLoadPolicy, StoreActor, StoreConfig, StoreHandle, ViewState};

#[derive(Parser, Debug)]
#[command(name = "artbot-store")]
#[command(version = APP_VERSION)]
#[command(about = "Load and update mini-app state against the artbot backend", long_about = None)]
struct Args {
    /// Config file (default: ~/.artbot/config.yaml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Backend origin
    #[arg(long)]
    base_url: Option<String>,

    /// User to load
    #[arg(short, long)]
    user_id: Option<i64>,

    /// Locale for content
    #[arg(short, long)]
    lang: Option<String>,

    /// Initial load ordering
    #[arg(long, value_enum)]
    initial_load: Option<InitialLoadPolicy>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Load user, content and models (default)
    Load,
    /// List the model catalog
    Models,
    /// Show the raw user record with balance and expenses
    User,
    /// Switch locale and show the localized labels
    Language { lang: String },
    /// Select a model and save it to the user's settings
    SelectModel { name: String },
    /// Apply a resolution preset (e.g. 2:3) and save it
    Resolution { label: String },
    /// Reset the user's settings server-side
    Reset,
    /// Estimate the kudos cost of a generation with the saved settings
    Cost,
}

impl Args {
    fn into_config(self) -> Result<(StoreConfig, Commands)> {
        let mut config = match &self.config {
            Some(path) => StoreConfig::load_from(path),
            None => StoreConfig::load(),
        }
        .context("Failed to load config")?;

        if let Some(base_url) = self.base_url {
            config.base_url = base_url;
        }
        if let Some(user_id) = self.user_id {
            config.user_id = user_id;
        }
        if let Some(lang) = self.lang {
            config.lang = lang;
        }
        if let Some(policy) = self.initial_load {
            config.initial_load = policy;
        }
        Ok((config, self.command.unwrap_or(Commands::Load)))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging to file
    let file_appender = tracing_appender::rolling::never(".", LOG_FILE_NAME);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    let (config, command) = Args::parse().into_config()?;
    tracing::info!(base_url = %config.base_url, user_id = config.user_id, "Starting");

    let (view_tx, mut view_rx) = mpsc::unbounded_channel::<ViewState>();
    let (handle, task) = StoreActor::spawn(AppStore::from_config(&config), view_tx);
    // initial empty view
    view_rx.recv().await.context("Store actor exited")?;

    let output = run_command(&handle, &mut view_rx, &config, command).await;

    handle.shutdown();
    task.await.context("Store actor panicked")?;

    println!("{}", serde_json::to_string_pretty(&output?)?);
    Ok(())
}

/// Wait for the view the actor publishes after a command
async fn next_view(view_rx: &mut mpsc::UnboundedReceiver<ViewState>) -> Result<ViewState> {
    view_rx.recv().await.context("Store actor exited")
}

async fn run_command(
    handle: &StoreHandle,
    view_rx: &mut mpsc::UnboundedReceiver<ViewState>,
    config: &StoreConfig,
    command: Commands,
) -> Result<serde_json::Value> {
    if let Commands::User = command {
        let data = handle.fetch_user_data(config.user_id).await;
        next_view(view_rx).await?;
        return Ok(serde_json::to_value(data?)?);
    }

    let loaded = handle.load_initial().await;
    let mut view = next_view(view_rx).await?;
    loaded.context("Initial load failed")?;

    match command {
        Commands::Load | Commands::User => {}
        Commands::Models => {
            return Ok(serde_json::to_value(&view.model_names)?);
        }
        Commands::Language { lang } => {
            if !views::is_supported_language(&lang) {
                bail!("Unsupported language: {}", lang);
            }
            let changed = handle.change_language(lang).await;
            view = next_view(view_rx).await?;
            changed?;
            return Ok(serde_json::json!({
                "tabs": view.tab_headers,
                "modes": view.modes,
            }));
        }
        Commands::SelectModel { name } => {
            if !view.model_names.contains(&name) {
                bail!("Unknown model: {}", name);
            }
            handle.select_model(name).await?;
            next_view(view_rx).await?;
            let saved = handle.save_settings().await;
            view = next_view(view_rx).await?;
            saved?;
        }
        Commands::Resolution { label } => {
            let Some(preset) = views::resolutions().iter().find(|r| r.label == label) else {
                bail!("Unknown resolution preset: {}", label);
            };
            let mut settings = view
                .user
                .as_ref()
                .map(|u| u.settings.clone())
                .context("No user loaded")?;
            settings.set_resolution(preset.value);
            let updated = handle.update_settings(settings).await;
            next_view(view_rx).await?;
            updated?;
            let saved = handle.save_settings().await;
            view = next_view(view_rx).await?;
            saved?;
        }
        Commands::Reset => {
            let reset = handle.reset(config.user_id).await;
            view = next_view(view_rx).await?;
            reset?;
        }
        Commands::Cost => {
            let cost = handle.calculate_image_cost(None).await;
            view = next_view(view_rx).await?;
            cost?;
            return Ok(serde_json::json!({ "kudos": view.image_cost }));
        }
    }

    Ok(serde_json::to_value(&view)?)
}
