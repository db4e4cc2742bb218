//! Sample Commands - 多语言预览样本生成

/// 批量生成缺失语言的预览样本
#[derive(Debug, Clone, Default)]
pub struct GenerateSamples {
    /// 只计算计划，不调用 TTS / 存储，也不写回目录
    pub dry_run: bool,
    /// 跳过已有 previewUrl 的音色
    pub skip_existing: bool,
}
