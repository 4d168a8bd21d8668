// 設定管理の具象実装

use crate::core::{PipelineConfig, PipelineError, PipelineResult};

/// 自動バッファサイズの上限
pub const MAX_AUTO_BUFFER: usize = 65_536;

/// デフォルト設定実装
#[derive(Debug, Clone)]
pub struct DefaultPipelineConfig {
    total_widgets: u64,
    producers: usize,
    consumers: usize,
    defect_index: i64,
    buffer_size: usize,
}

impl DefaultPipelineConfig {
    pub fn new(total_widgets: u64) -> Self {
        Self {
            total_widgets,
            ..Self::default()
        }
    }

    pub fn with_producers(mut self, producers: usize) -> Self {
        self.producers = producers;
        self
    }

    pub fn with_consumers(mut self, consumers: usize) -> Self {
        self.consumers = consumers;
        self
    }

    pub fn with_defect_index(mut self, defect_index: i64) -> Self {
        self.defect_index = defect_index;
        self
    }

    /// 0を指定するとウィジェット1個につき1スロット
    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }
}

impl Default for DefaultPipelineConfig {
    fn default() -> Self {
        Self {
            total_widgets: 10,
            producers: 1,
            consumers: 1,
            defect_index: -1,
            buffer_size: 0,
        }
    }
}

impl PipelineConfig for DefaultPipelineConfig {
    fn total_widgets(&self) -> u64 {
        self.total_widgets
    }

    fn producer_count(&self) -> usize {
        self.producers
    }

    fn consumer_count(&self) -> usize {
        self.consumers
    }

    fn defect_index(&self) -> i64 {
        self.defect_index
    }

    fn channel_buffer_size(&self) -> usize {
        if self.buffer_size > 0 {
            return self.buffer_size;
        }
        usize::try_from(self.total_widgets)
            .unwrap_or(MAX_AUTO_BUFFER)
            .clamp(1, MAX_AUTO_BUFFER)
    }
}

/// 進行不能な構成を拒否する
///
/// ウィジェットが1個以上あるのにどちらかのプールが空だと、
/// ジョブもキューも永遠に消費されない。範囲外の defect index は
/// 「壊れたウィジェット無し」として扱うため、ここでは検査しない。
pub fn validate_config<C>(config: &C) -> PipelineResult<()>
where
    C: PipelineConfig + ?Sized,
{
    if config.channel_buffer_size() == 0 {
        return Err(PipelineError::configuration(
            "channel buffer size must be positive",
        ));
    }
    if config.channel_buffer_size() > tokio::sync::Semaphore::MAX_PERMITS {
        return Err(PipelineError::configuration(format!(
            "channel buffer size must not exceed {}",
            tokio::sync::Semaphore::MAX_PERMITS
        )));
    }
    if config.total_widgets() == 0 {
        return Ok(());
    }
    if config.producer_count() == 0 {
        return Err(PipelineError::validation(
            "producers",
            "at least one producer is required",
        ));
    }
    if config.consumer_count() == 0 {
        return Err(PipelineError::validation(
            "consumers",
            "at least one consumer is required",
        ));
    }
    Ok(())
}
