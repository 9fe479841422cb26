//! Forecast pipeline
//!
//! scan → decode → resample → fit → predict → sink, for one entity or many.

use crate::config::PipelineConfig;
use crate::error::{PipelineError, Result};
use forecast_facade::{ForecastSink, ForecastTable};
use rayon::prelude::*;
use serde::Serialize;
use series_facade::{Bin, ScanProvider, ScanSummary};
use tracing::{info, info_span};

/// Everything one run produced
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineOutput {
    pub entity: String,
    pub summary: ScanSummary,
    pub bins: Vec<Bin>,
    pub table: ForecastTable,
}

/// Runs pipelines against a caller-owned store.
pub struct ForecastPipeline<'a> {
    provider: &'a dyn ScanProvider,
}

impl<'a> ForecastPipeline<'a> {
    pub fn new(provider: &'a dyn ScanProvider) -> Self {
        Self { provider }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Load, resample and forecast one entity.
    pub fn run(&self, config: &PipelineConfig) -> Result<PipelineOutput> {
        let span = info_span!("pipeline", entity = %config.entity);
        let _guard = span.enter();

        config.validate()?;
        let entity = config.entity.as_str();

        let load = config.load.loader().load(self.provider, entity)?;
        let bins = config
            .resample
            .resampler()?
            .resample(&load.observations)
            .map_err(|e| PipelineError::for_entity(e, entity))?;

        let table = config
            .forecast
            .engine()?
            .forecast(&bins, config.forecast.horizon_bins)?;

        info!(
            bins = bins.len(),
            horizon = table.horizon,
            mode = %table.mode,
            skipped = load.summary.skipped(),
            "Forecast complete"
        );

        Ok(PipelineOutput {
            entity: config.entity.clone(),
            summary: load.summary,
            bins,
            table,
        })
    }

    /// Run, then hand the bins and the table to `sink`.
    pub fn run_and_emit(
        &self,
        config: &PipelineConfig,
        sink: &mut dyn ForecastSink,
    ) -> Result<PipelineOutput> {
        let output = self.run(config)?;
        sink.emit(&output.bins, &output.table)?;
        Ok(output)
    }

    /// Run several independent pipelines in parallel.
    ///
    /// Results come back in the order of `configs`.
    pub fn run_many(&self, configs: &[PipelineConfig]) -> Vec<Result<PipelineOutput>> {
        configs.par_iter().map(|config| self.run(config)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forecast_facade::{FitMode, ForecastError, Result as ForecastResult};
    use series_facade::{CounterWriter, MemoryStore, SeriesError};

    fn store_with(entity: &str, hours: i64) -> MemoryStore {
        let mut store = MemoryStore::open("stats");
        let mut writer = CounterWriter::new(&mut store);
        for hour in 0..hours {
            let hits = if hour % 24 == 14 { 9 } else { 2 };
            writer.record_many(entity, hour * 3600 + 30, hits).unwrap();
        }
        store
    }

    #[derive(Default)]
    struct CountingSink {
        calls: usize,
        last_len: usize,
    }

    impl ForecastSink for CountingSink {
        fn emit(&mut self, _history: &[Bin], table: &ForecastTable) -> ForecastResult<()> {
            self.calls += 1;
            self.last_len = table.len();
            Ok(())
        }
    }

    #[test]
    fn test_run_produces_table() {
        let store = store_with("10.0.0.99", 72);
        let output = ForecastPipeline::new(&store)
            .run(&PipelineConfig::new("10.0.0.99"))
            .unwrap();

        assert_eq!(output.entity, "10.0.0.99");
        assert_eq!(output.summary.observations, 72);
        assert_eq!(output.bins.len(), 72);
        assert_eq!(output.table.len(), 96);
        assert_eq!(output.table.mode, FitMode::Full);
    }

    #[test]
    fn test_unknown_entity_reports_entity() {
        let store = store_with("10.0.0.99", 72);
        let err = ForecastPipeline::new(&store)
            .run(&PipelineConfig::new("10.0.0.1"))
            .unwrap_err();
        assert_eq!(
            err,
            PipelineError::EmptySeries {
                entity: "10.0.0.1".to_string()
            }
        );
    }

    #[test]
    fn test_short_history_fails_without_fallback() {
        let store = store_with("h", 30);
        let pipeline = ForecastPipeline::new(&store);

        let err = pipeline.run(&PipelineConfig::new("h")).unwrap_err();
        assert_eq!(
            err,
            PipelineError::Forecast(ForecastError::InsufficientHistory {
                required: 48,
                actual: 30
            })
        );

        let lenient = PipelineConfig::builder("h")
            .allow_trend_only(true)
            .build()
            .unwrap();
        assert_eq!(pipeline.run(&lenient).unwrap().table.mode, FitMode::TrendOnly);
    }

    #[test]
    fn test_closed_store_is_unavailable() {
        let mut store = store_with("h", 72);
        store.close();
        let err = ForecastPipeline::new(&store)
            .run(&PipelineConfig::new("h"))
            .unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Series(SeriesError::SourceUnavailable(_))
        ));
    }

    #[test]
    fn test_invalid_config_rejected_before_scan() {
        let store = store_with("h", 72);
        let mut config = PipelineConfig::new("h");
        config.resample.bin_width_seconds = -5;
        let err = ForecastPipeline::new(&store).run(&config).unwrap_err();
        assert!(matches!(err, PipelineError::Config(_)));
    }

    #[test]
    fn test_run_and_emit_calls_sink() {
        let store = store_with("h", 48);
        let mut sink = CountingSink::default();
        ForecastPipeline::new(&store)
            .run_and_emit(&PipelineConfig::new("h"), &mut sink)
            .unwrap();
        assert_eq!(sink.calls, 1);
        assert_eq!(sink.last_len, 72);
    }

    #[test]
    fn test_run_many_preserves_order() {
        let mut store = MemoryStore::open("stats");
        {
            let mut writer = CounterWriter::new(&mut store);
            for (i, entity) in ["a", "b", "c"].iter().enumerate() {
                for hour in 0..(48 + i as i64 * 24) {
                    writer.record(entity, hour * 3600).unwrap();
                }
            }
        }
        let base = PipelineConfig::new("a");
        let configs = vec![base.for_entity("c"), base.for_entity("missing"), base.for_entity("a")];

        let results = ForecastPipeline::new(&store).run_many(&configs);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().bins.len(), 96);
        assert!(matches!(results[1], Err(PipelineError::EmptySeries { .. })));
        assert_eq!(results[2].as_ref().unwrap().bins.len(), 48);
    }
}
