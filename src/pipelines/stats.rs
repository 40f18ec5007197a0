use std::time::{Duration, Instant};

use super::cache::StrategyState;

/// Statistics for one `run()` call.
#[derive(Debug, Clone)]
pub struct PipelineStats {
    /// Total execution time.
    pub total_time: Duration,
    /// Number of texts scored.
    pub items_processed: usize,
    /// Strategy the texts were scored with.
    pub strategy: StrategyState,
}

impl PipelineStats {
    /// Start timing an operation.
    pub(crate) fn start() -> PipelineStatsBuilder {
        PipelineStatsBuilder {
            start_time: Instant::now(),
        }
    }

    /// Mean time per item, zero for an empty run.
    pub fn time_per_item(&self) -> Duration {
        match u32::try_from(self.items_processed) {
            Ok(n) if n > 0 => self.total_time / n,
            _ => Duration::ZERO,
        }
    }
}

/// Tracks timing from creation to [`finish`](Self::finish).
pub(crate) struct PipelineStatsBuilder {
    start_time: Instant,
}

impl PipelineStatsBuilder {
    pub fn finish(self, items_processed: usize, strategy: StrategyState) -> PipelineStats {
        PipelineStats {
            total_time: self.start_time.elapsed(),
            items_processed,
            strategy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_items_and_strategy() {
        let stats = PipelineStats::start().finish(4, StrategyState::ModelAbsent);
        assert_eq!(stats.items_processed, 4);
        assert_eq!(stats.strategy, StrategyState::ModelAbsent);
        assert!(stats.time_per_item() <= stats.total_time);
    }

    #[test]
    fn empty_run_has_zero_per_item() {
        let stats = PipelineStats::start().finish(0, StrategyState::Custom);
        assert_eq!(stats.time_per_item(), Duration::ZERO);
    }
}
