//! Voicebank CLI
//!
//! - `generate-samples`: 为非基础语言的音色批量生成预览样本
//! - `merge-metadata`: 合并外部音色元数据
//! - `show-config`: 打印生效的配置

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;

use voicebank::application::ports::{ContentStoragePort, TtsEnginePort};
use voicebank::application::{
    GenerateSamples, GenerateSamplesHandler, ItemOutcome, MergeMetadata, MergeMetadataHandler,
    SamplePipelineConfig,
};
use voicebank::config::{load_config_from_path, print_config, AppConfig, StorageBackend};
use voicebank::domain::voice::LanguageCode;
use voicebank::domain::SampleTexts;
use voicebank::infrastructure::{
    FileContentStorage, HttpContentStorage, HttpContentStorageConfig, HttpTtsClient,
    HttpTtsClientConfig, JsonCatalogRepository, JsonMetadataSource,
};

/// Voicebank - 音色目录与预览样本工具
#[derive(Parser)]
#[command(name = "voicebank")]
#[command(about = "Voice catalog tooling: multilingual preview generation and metadata merge", long_about = None)]
struct Cli {
    /// 配置文件路径（默认搜索 voicebank.toml / voicebank.local.toml）
    #[arg(long, global = true, value_name = "FILE", env = "VOICEBANK_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate missing-language preview samples for the catalog
    GenerateSamples {
        /// Compute storage keys without calling the TTS provider or writing the catalog
        #[arg(long)]
        dry_run: bool,

        /// Skip voices that already have a preview URL
        #[arg(long)]
        skip_existing: bool,
    },
    /// Merge externally authored alias/tags/description into the catalog
    MergeMetadata {
        /// Metadata JSON file (defaults to catalog.metadata_path)
        #[arg(long, value_name = "FILE")]
        source: Option<PathBuf>,
    },
    /// Print the effective configuration
    ShowConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config_from_path(cli.config.as_deref())
        .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config);

    match cli.command {
        Commands::GenerateSamples {
            dry_run,
            skip_existing,
        } => generate_samples(&config, dry_run, skip_existing).await,
        Commands::MergeMetadata { source } => merge_metadata(&config, source).await,
        Commands::ShowConfig => {
            print_config(&config);
            Ok(())
        }
    }
}

/// 初始化日志，`RUST_LOG` 优先于配置
fn init_tracing(config: &AppConfig) {
    let log_filter = format!("{},voicebank={}", config.log.level, config.log.level);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    if config.log.json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn generate_samples(
    config: &AppConfig,
    dry_run: bool,
    skip_existing: bool,
) -> anyhow::Result<()> {
    print_config(config);

    let catalog_repo = Arc::new(JsonCatalogRepository::new(&config.catalog.path));

    // 创建 HTTP TTS 客户端
    let tts_config = HttpTtsClientConfig::new(&config.tts.url)
        .with_api_key(&config.tts.api_key)
        .with_timeout(config.tts.timeout_secs)
        .with_retries(config.tts.max_retries, config.tts.retry_backoff_ms);
    let tts_engine: Arc<dyn TtsEnginePort> = Arc::new(HttpTtsClient::new(tts_config)?);

    let storage = build_storage(config).await?;

    let pipeline_config = SamplePipelineConfig {
        base_language: LanguageCode::new(&config.samples.base_language)
            .map_err(|e| anyhow::anyhow!(e))?,
        model_id: config.tts.model_id.clone(),
        voice_settings: config.tts.voice_settings.clone(),
        delay: Duration::from_millis(config.samples.delay_ms),
    };
    let texts = SampleTexts::new(config.samples.merged_texts());

    // Ctrl-C 时停止处理剩余音色，已完成的结果仍会写回
    let cancel = CancellationToken::new();
    let signal_token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Received interrupt, finishing current voice and writing catalog");
            signal_token.cancel();
        }
    });

    let handler = GenerateSamplesHandler::new(
        catalog_repo,
        tts_engine,
        storage,
        texts,
        pipeline_config,
    )
    .with_cancellation(cancel);

    let report = handler
        .handle(GenerateSamples {
            dry_run,
            skip_existing,
        })
        .await
        .context("sample generation run failed")?;

    for item in &report.items {
        match &item.outcome {
            ItemOutcome::Generated { url, .. } => {
                println!("generated  {:<24} {:<8} {}", item.character, item.language.as_str(), url)
            }
            ItemOutcome::Planned { key } => {
                println!("planned    {:<24} {:<8} {}", item.character, item.language.as_str(), key)
            }
            ItemOutcome::SkippedNoText => {
                println!("no-text    {:<24} {}", item.character, item.language)
            }
            ItemOutcome::SkippedExisting => {
                println!("existing   {:<24} {}", item.character, item.language)
            }
            ItemOutcome::UploadFailure(e) => {
                println!("up-failed  {:<24} {:<8} {}", item.character, item.language.as_str(), e)
            }
            ItemOutcome::GenerationFailure(e) => {
                println!("tts-failed {:<24} {:<8} {}", item.character, item.language.as_str(), e)
            }
            ItemOutcome::Cancelled => println!("cancelled  {}", item.character),
        }
    }

    println!(
        "{} voices, {} targeted: {} generated, {} skipped, {} failed, {} cancelled ({} ms)",
        report.total_voices,
        report.items.len(),
        report.generated(),
        report.skipped(),
        report.failed(),
        report.cancelled(),
        (report.finished_at - report.started_at).num_milliseconds()
    );

    Ok(())
}

async fn build_storage(config: &AppConfig) -> anyhow::Result<Arc<dyn ContentStoragePort>> {
    let storage: Arc<dyn ContentStoragePort> = match config.storage.backend {
        StorageBackend::File => Arc::new(
            FileContentStorage::new(&config.storage.root_dir, &config.storage.public_base_url)
                .await?,
        ),
        StorageBackend::Http => Arc::new(HttpContentStorage::new(HttpContentStorageConfig {
            endpoint: config.storage.endpoint.clone(),
            token: config.storage.token.clone(),
            timeout_secs: config.storage.timeout_secs,
        })?),
    };
    Ok(storage)
}

async fn merge_metadata(config: &AppConfig, source: Option<PathBuf>) -> anyhow::Result<()> {
    let source = source.unwrap_or_else(|| config.catalog.metadata_path.clone());
    tracing::info!(source = %source.display(), catalog = %config.catalog.path.display(), "Merging metadata");

    let handler = MergeMetadataHandler::new(
        Arc::new(JsonCatalogRepository::new(&config.catalog.path)),
        Arc::new(JsonMetadataSource::new(source)),
    );

    let report = handler
        .handle(MergeMetadata)
        .await
        .context("metadata merge aborted, catalog left untouched")?;

    println!(
        "{} voices updated, {} without external metadata",
        report.matched, report.unmatched
    );

    Ok(())
}
