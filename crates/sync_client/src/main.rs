use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use contracts::domain::a001_data_source::{SourceType, CONNECTORS};
use contracts::shared::product_record::ProductRecord;
use contracts::usecases::common::UseCaseError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use sync_client::shared::config::load_config;
use sync_client::system;
use sync_client::usecases::u501_sync_products::{
    detect_file_type, preview_file, SourceFields, SourceSelector, SyncApiClient, SyncError,
    SyncExecutor, UploadedFile,
};

#[derive(Parser)]
#[command(name = "sync-client")]
#[command(about = "Product catalog sync client: configure a data source and submit it to the Sync API")]
struct Args {
    /// Path to config.toml (default: next to the executable, then built-in defaults)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List available connectors
    Connectors,

    /// Detect the format of a product file
    Detect { file: PathBuf },

    /// Show the first rows of a product file
    Preview { file: PathBuf },

    /// Submit a sync for the source described in a form file
    Sync {
        /// TOML form: `source = "CRAWLER"` plus the connector's fields
        #[arg(long)]
        form: PathBuf,

        /// Product file for MANUAL_FILE_UPLOAD
        #[arg(long)]
        file: Option<PathBuf>,

        /// JSON array of product records for SUPERSEARCH_API
        #[arg(long)]
        records: Option<PathBuf>,
    },

    /// Show sync history
    History {
        #[arg(long, default_value_t = 1)]
        page: u32,

        #[arg(long, default_value_t = 10)]
        size: u32,
    },
}

/// Форма источника из файла: тип коннектора и значения его полей
#[derive(Debug, Deserialize)]
struct FormFile {
    source: SourceType,
    #[serde(flatten)]
    fields: SourceFields,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    system::tracing::initialize()?;

    match args.command {
        Command::Connectors => print_json(&CONNECTORS),
        Command::Detect { file } => {
            let file = read_file(&file).await?;
            let file_type = detect_file_type(&file);
            tracing::info!("{} detected as {}", file.name(), file_type.as_str());
            println!("{}", file_type.as_str());
            Ok(())
        }
        Command::Preview { file } => {
            let file = read_file(&file).await?;
            let preview = preview_file(&file).map_err(|e| failure(SyncError::from(e)))?;
            print_json(&preview)
        }
        Command::Sync {
            form,
            file,
            records,
        } => {
            let executor = build_executor(args.config.as_deref())?;
            let selector = load_form(&form, file.as_deref()).await?;
            let records = match records {
                Some(path) => Some(read_records(&path).await?),
                None => None,
            };

            let result = tokio::select! {
                result = executor.submit(&selector, records) => result,
                _ = tokio::signal::ctrl_c() => {
                    executor.cancel();
                    Err(SyncError::Cancelled)
                }
            };
            let response = result.map_err(failure)?;
            print_json(&response)
        }
        Command::History { page, size } => {
            let executor = build_executor(args.config.as_deref())?;
            let history = executor
                .fetch_sync_history(page, size)
                .await
                .map_err(failure)?;
            print_json(&history)
        }
    }
}

fn build_executor(config_path: Option<&Path>) -> Result<SyncExecutor> {
    let config = load_config(config_path)?;
    tracing::info!(
        "Sync API: {} (tenant path '{}')",
        config.api.base_url,
        config.tenant.path
    );
    let client = SyncApiClient::from_config(&config)?;
    Ok(SyncExecutor::new(Arc::new(client)))
}

async fn read_file(path: &Path) -> Result<UploadedFile> {
    UploadedFile::from_path(path)
        .await
        .map_err(|e| failure(SyncError::from(e)))
}

async fn load_form(path: &Path, file: Option<&Path>) -> Result<SourceSelector> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read form {}", path.display()))?;
    let form: FormFile = toml::from_str(&text)
        .with_context(|| format!("Failed to parse form {}", path.display()))?;

    let mut selector = SourceSelector::new();
    selector.select_source(form.source);
    selector.fields = form.fields;
    if let Some(file) = file {
        selector.set_file(read_file(file).await?);
    }
    Ok(selector)
}

async fn read_records(path: &Path) -> Result<Vec<ProductRecord>> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read records {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("{} must contain a JSON array of objects", path.display()))
}

/// Ошибка пайплайна в виде UseCaseError для вывода пользователю
fn failure(error: SyncError) -> anyhow::Error {
    let error = UseCaseError::from(error);
    tracing::error!("{} ({})", error, error.code);
    anyhow::Error::new(error)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
