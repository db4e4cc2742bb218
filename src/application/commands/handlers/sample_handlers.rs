//! Sample Command Handlers - 多语言预览样本批量生成
//!
//! 流程:
//! 1. 读取整个目录
//! 2. 过滤出语言不是基础语言（含其地区变体）的音色
//! 3. 严格顺序处理，每次只有一个外部调用在进行，成功后固定延迟
//! 4. 单个音色的失败只记录日志，不中断批次
//! 5. 全部处理完后一次性原子写回目录

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio_util::sync::CancellationToken;

use crate::application::commands::GenerateSamples;
use crate::application::error::ApplicationError;
use crate::application::ports::{
    CatalogRepositoryPort, ContentStoragePort, SpeechRequest, StorageError, TtsEnginePort,
    TtsError,
};
use crate::domain::voice::{LanguageCode, Voice, VoiceId, VoiceSettings};
use crate::domain::{sample_storage_key, SampleTexts, SAMPLE_CONTENT_TYPE};

// ============================================================================
// Config
// ============================================================================

/// 样本生成流程配置
#[derive(Debug, Clone)]
pub struct SamplePipelineConfig {
    /// 基础语言，该语言及其地区变体不需要本地化样本
    pub base_language: LanguageCode,
    /// 多语言模型标识
    pub model_id: String,
    /// 音色参数
    pub voice_settings: VoiceSettings,
    /// 每个成功条目之后的等待时间（供应商限流）
    pub delay: Duration,
}

impl Default for SamplePipelineConfig {
    fn default() -> Self {
        Self {
            base_language: LanguageCode::default(),
            model_id: "eleven_multilingual_v2".to_string(),
            voice_settings: VoiceSettings::default(),
            delay: Duration::from_secs(1),
        }
    }
}

// ============================================================================
// Report
// ============================================================================

/// 单个音色的处理结果
#[derive(Debug)]
pub enum ItemOutcome {
    /// 已生成并上传
    Generated { key: String, url: String },
    /// dry-run 下将要写入的 key
    Planned { key: String },
    /// 该语言没有示例文本
    SkippedNoText,
    /// 已有 previewUrl 且要求跳过
    SkippedExisting,
    /// TTS 调用失败（服务错误或网络错误）
    GenerationFailure(TtsError),
    /// 存储上传失败
    UploadFailure(StorageError),
    /// 运行被取消，未处理
    Cancelled,
}

impl ItemOutcome {
    pub fn is_generated(&self) -> bool {
        matches!(self, ItemOutcome::Generated { .. })
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, ItemOutcome::SkippedNoText | ItemOutcome::SkippedExisting)
    }

    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            ItemOutcome::GenerationFailure(_) | ItemOutcome::UploadFailure(_)
        )
    }

    /// 存储 key（已生成或计划中）
    pub fn key(&self) -> Option<&str> {
        match self {
            ItemOutcome::Generated { key, .. } | ItemOutcome::Planned { key } => Some(key),
            _ => None,
        }
    }
}

/// 单条目报告
#[derive(Debug)]
pub struct ItemReport {
    pub voice_id: VoiceId,
    pub character: String,
    pub language: LanguageCode,
    pub outcome: ItemOutcome,
}

/// 一次运行的汇总
#[derive(Debug)]
pub struct SampleReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// 目录中的音色总数
    pub total_voices: usize,
    /// 非基础语言的音色（按目录顺序）
    pub items: Vec<ItemReport>,
    /// 目录是否已写回
    pub catalog_written: bool,
}

impl SampleReport {
    pub fn generated(&self) -> usize {
        self.items.iter().filter(|i| i.outcome.is_generated()).count()
    }

    pub fn skipped(&self) -> usize {
        self.items.iter().filter(|i| i.outcome.is_skipped()).count()
    }

    pub fn failed(&self) -> usize {
        self.items.iter().filter(|i| i.outcome.is_failure()).count()
    }

    pub fn cancelled(&self) -> usize {
        self.items
            .iter()
            .filter(|i| matches!(i.outcome, ItemOutcome::Cancelled))
            .count()
    }

    pub fn item(&self, voice_id: &str) -> Option<&ItemReport> {
        self.items.iter().find(|i| i.voice_id.as_str() == voice_id)
    }
}

// ============================================================================
// GenerateSamples
// ============================================================================

/// GenerateSamples Handler
pub struct GenerateSamplesHandler {
    catalog_repo: Arc<dyn CatalogRepositoryPort>,
    tts_engine: Arc<dyn TtsEnginePort>,
    storage: Arc<dyn ContentStoragePort>,
    texts: SampleTexts,
    config: SamplePipelineConfig,
    cancel: CancellationToken,
}

impl GenerateSamplesHandler {
    pub fn new(
        catalog_repo: Arc<dyn CatalogRepositoryPort>,
        tts_engine: Arc<dyn TtsEnginePort>,
        storage: Arc<dyn ContentStoragePort>,
        texts: SampleTexts,
        config: SamplePipelineConfig,
    ) -> Self {
        Self {
            catalog_repo,
            tts_engine,
            storage,
            texts,
            config,
            cancel: CancellationToken::new(),
        }
    }

    /// 使用外部取消令牌；取消后剩余音色标记为 Cancelled，目录仍会写回
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub async fn handle(&self, command: GenerateSamples) -> Result<SampleReport, ApplicationError> {
        let started_at = Utc::now();
        let mut catalog = self.catalog_repo.load().await?;

        let targets: Vec<VoiceId> = catalog
            .iter()
            .filter(|v| !v.language().is_variant_of(&self.config.base_language))
            .map(|v| v.id().clone())
            .collect();

        tracing::info!(
            total_voices = catalog.len(),
            targets = targets.len(),
            base_language = %self.config.base_language,
            dry_run = command.dry_run,
            "Sample generation started"
        );

        // 只告警：单个音色的失败仍按条目记录
        if !command.dry_run && !targets.is_empty() && !self.tts_engine.health_check().await {
            tracing::warn!("TTS service health check failed, generation is likely to fail");
        }

        let mut items = Vec::with_capacity(targets.len());

        for voice_id in targets {
            let Some(voice) = catalog.get(&voice_id) else {
                continue;
            };
            let character = voice.character().to_string();
            let language = voice.language().clone();

            let outcome = if self.cancel.is_cancelled() {
                ItemOutcome::Cancelled
            } else {
                self.process_voice(voice, &command).await
            };

            Self::log_outcome(&voice_id, &character, &language, &outcome);

            if let ItemOutcome::Generated { url, .. } = &outcome {
                if let Some(voice) = catalog.get_mut(&voice_id) {
                    voice.set_preview_url(url.clone());
                }
            }

            let pause = outcome.is_generated() && !self.config.delay.is_zero();

            items.push(ItemReport {
                voice_id,
                character,
                language,
                outcome,
            });

            if pause {
                tokio::select! {
                    _ = tokio::time::sleep(self.config.delay) => {}
                    _ = self.cancel.cancelled() => {}
                }
            }
        }

        let catalog_written = if command.dry_run {
            false
        } else {
            self.catalog_repo.save(&catalog).await?;
            true
        };

        let report = SampleReport {
            started_at,
            finished_at: Utc::now(),
            total_voices: catalog.len(),
            items,
            catalog_written,
        };

        tracing::info!(
            generated = report.generated(),
            skipped = report.skipped(),
            failed = report.failed(),
            cancelled = report.cancelled(),
            catalog_written = report.catalog_written,
            "Sample generation finished"
        );

        Ok(report)
    }

    /// 处理单个音色：查文本 -> 合成 -> 上传
    async fn process_voice(&self, voice: &Voice, command: &GenerateSamples) -> ItemOutcome {
        if command.skip_existing && voice.preview_url().is_some() {
            return ItemOutcome::SkippedExisting;
        }

        let Some(text) = self.texts.lookup(voice.language()) else {
            return ItemOutcome::SkippedNoText;
        };

        let key = sample_storage_key(voice.language(), voice.id());
        if command.dry_run {
            return ItemOutcome::Planned { key };
        }

        let request = SpeechRequest {
            provider_voice_id: voice.provider_voice_id().to_string(),
            text: text.to_string(),
            model_id: self.config.model_id.clone(),
            settings: self.config.voice_settings.clone(),
        };

        let audio = match self.tts_engine.generate_speech(request).await {
            Ok(audio) if audio.is_empty() => {
                return ItemOutcome::GenerationFailure(TtsError::InvalidResponse(
                    "empty audio body".to_string(),
                ));
            }
            Ok(audio) => audio,
            Err(e) => return ItemOutcome::GenerationFailure(e),
        };

        match self.storage.put(&key, audio, SAMPLE_CONTENT_TYPE).await {
            Ok(stored) => ItemOutcome::Generated {
                key: stored.key,
                url: stored.url,
            },
            Err(e) => ItemOutcome::UploadFailure(e),
        }
    }

    fn log_outcome(voice_id: &VoiceId, character: &str, language: &LanguageCode, outcome: &ItemOutcome) {
        match outcome {
            ItemOutcome::Generated { key, url } => tracing::info!(
                voice_id = %voice_id,
                character = %character,
                language = %language,
                key = %key,
                url = %url,
                "Sample generated"
            ),
            ItemOutcome::Planned { key } => tracing::info!(
                voice_id = %voice_id,
                character = %character,
                language = %language,
                key = %key,
                "Sample planned (dry run)"
            ),
            ItemOutcome::SkippedNoText => tracing::warn!(
                voice_id = %voice_id,
                character = %character,
                language = %language,
                "No sample text for language, skipping"
            ),
            ItemOutcome::SkippedExisting => tracing::debug!(
                voice_id = %voice_id,
                character = %character,
                "Preview already present, skipping"
            ),
            ItemOutcome::GenerationFailure(e) => tracing::error!(
                voice_id = %voice_id,
                character = %character,
                language = %language,
                error = %e,
                "Speech generation failed"
            ),
            ItemOutcome::UploadFailure(e) => tracing::error!(
                voice_id = %voice_id,
                character = %character,
                language = %language,
                error = %e,
                "Sample upload failed"
            ),
            ItemOutcome::Cancelled => tracing::debug!(
                voice_id = %voice_id,
                "Run cancelled, voice not processed"
            ),
        }
    }
}
