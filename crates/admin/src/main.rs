//! Back-office admin - headless driver for the series wizard
//!
//! Works on the draft persisted by the admin client:
//! - `status` shows the stored draft and which required steps still fail
//! - `submit [--cover PATH] [--banner PATH]` uploads any images and creates the series
//! - `reset` discards the stored draft

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use backoffice_admin::config::{load_dotenv_from_repo_root, AdminConfig};
use backoffice_admin::infrastructure::http::BackofficeApiClient;
use backoffice_admin::infrastructure::navigation::LogNavigator;
use backoffice_admin::infrastructure::platform::FileStorageProvider;
use backoffice_admin::ports::outbound::StorageProvider;
use backoffice_admin::{DraftStore, WizardSession};
use backoffice_domain::{series_steps, SeriesDraft, SeriesDraftPatch, UploadFile, WizardDraft};

const USAGE: &str = "Usage: backoffice-admin <command>\n\nCommands:\n  status\n  submit [--cover PATH] [--banner PATH]\n  reset";

#[tokio::main]
async fn main() -> Result<()> {
    load_dotenv_from_repo_root();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "backoffice_admin=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AdminConfig::from_env()?;
    let storage: Arc<dyn StorageProvider> = match &config.storage_path {
        Some(path) => Arc::new(FileStorageProvider::at_path(path)),
        None => Arc::new(FileStorageProvider::new()),
    };

    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        Some("status") => status(storage),
        Some("submit") => submit(&config, storage, args.collect()).await,
        Some("reset") => reset(&config, storage),
        Some(cmd) => anyhow::bail!("Unknown command: {cmd}\n\n{USAGE}"),
        None => anyhow::bail!(USAGE),
    }
}

fn status(storage: Arc<dyn StorageProvider>) -> Result<()> {
    let store = DraftStore::<SeriesDraft>::open(storage);
    let Some(saved_at) = store.saved_at() else {
        println!("No {} draft stored", SeriesDraft::ENTITY_TYPE);
        return Ok(());
    };

    let draft = store.draft();
    println!("Draft saved at {saved_at}");
    println!("  title: {}", display_or_dash(&draft.title.romaji));
    for slot in SeriesDraft::media_slots() {
        let media = draft
            .media_id(*slot)
            .map(|id| id.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!("  {slot} image: {media}");
    }

    let plan = series_steps();
    for step in plan.required_steps() {
        let label = plan.get(step).map(|s| s.label).unwrap_or("?");
        let result = plan.validate(step, draft);
        if result.valid {
            println!("  step {step} ({label}): ok");
        } else {
            println!("  step {step} ({label}): {} problem(s)", result.errors.len());
            for (path, message) in result.errors.iter() {
                println!("    {path}: {message}");
            }
        }
    }
    Ok(())
}

async fn submit(config: &AdminConfig, storage: Arc<dyn StorageProvider>, args: Vec<String>) -> Result<()> {
    let mut session = session(config, storage)?;

    let mut patch = SeriesDraftPatch::default();
    let mut args = args.into_iter();
    while let Some(flag) = args.next() {
        let slot = match flag.as_str() {
            "--cover" => &mut patch.cover_image_file,
            "--banner" => &mut patch.banner_image_file,
            other => anyhow::bail!("Unknown option: {other}\n\n{USAGE}"),
        };
        let path = args
            .next()
            .with_context(|| format!("{flag} expects a file path"))?;
        *slot = Some(Some(read_upload(Path::new(&path)).await?));
    }
    session.edit(patch);

    match session.submit().await {
        Ok(id) => {
            println!("Created {} {id}", SeriesDraft::ENTITY_TYPE);
            Ok(())
        }
        Err(e) => {
            if let Some(errors) = session.state().errors_for(session.state().current_step()) {
                for (path, message) in errors.iter() {
                    eprintln!("  {path}: {message}");
                }
            }
            let stage = e.stage();
            Err(anyhow::Error::new(e).context(format!("Submission failed at the {stage} stage")))
        }
    }
}

fn reset(config: &AdminConfig, storage: Arc<dyn StorageProvider>) -> Result<()> {
    session(config, storage)?.reset();
    println!("Draft discarded");
    Ok(())
}

fn session(config: &AdminConfig, storage: Arc<dyn StorageProvider>) -> Result<WizardSession<SeriesDraft>> {
    let api = Arc::new(
        BackofficeApiClient::from_config(config).context("Failed to build HTTP client")?,
    );
    Ok(WizardSession::new(
        series_steps(),
        storage,
        api.clone(),
        api,
        Arc::new(LogNavigator),
    ))
}

async fn read_upload(path: &Path) -> Result<UploadFile> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());
    let content_type = match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        _ => "application/octet-stream",
    };
    Ok(UploadFile::new(file_name, content_type, bytes))
}

fn display_or_dash(value: &str) -> &str {
    if value.trim().is_empty() {
        "-"
    } else {
        value
    }
}
