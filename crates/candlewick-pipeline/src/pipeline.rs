//! The fan-out orchestrator.

use std::collections::HashMap;
use std::path::Path;

use candlewick_aggregate::{AggregatorStats, WindowAggregator, run_aggregator};
use candlewick_format::{CsvFormatter, JsonFormatter, OutputFormat, WriterStats, run_writer};
use candlewick_ingest::read_ticks;
use candlewick_types::WindowSpan;
use tokio::fs::File;
use tokio::io::{AsyncBufRead, AsyncWrite, BufReader, BufWriter};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::check_spans;
use crate::{PipelineConfig, PipelineError, RunSummary, SpanSummary};

/// Hand-off capacity between stages. One slot keeps every producer in
/// lockstep with its consumer.
const HANDOFF_CAPACITY: usize = 1;

/// One reader fanned out to an aggregator and writer per window span.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Creates a pipeline with a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::InvalidConfig`] if the configuration is unusable.
    pub fn new(config: PipelineConfig) -> Result<Self, PipelineError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Opens the input file and one output file per configured span, then runs.
    ///
    /// Outputs are created in the configured output directory as
    /// `candles_<minutes>min.<ext>`.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be opened or created, or if the run fails.
    pub async fn run_files(&self, input: impl AsRef<Path>) -> Result<RunSummary, PipelineError> {
        let path = input.as_ref();
        let file = File::open(path).await.map_err(|source| PipelineError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        let mut sinks = Vec::with_capacity(self.config.spans.len());
        for &span in &self.config.spans {
            let path = self.config.output_path(span);
            let out = File::create(&path)
                .await
                .map_err(|source| PipelineError::Create { path, source })?;
            sinks.push((span, BufWriter::new(out)));
        }

        self.run(BufReader::new(file), sinks).await
    }

    /// Runs the pipeline over `input`, writing each span's candles to its sink.
    ///
    /// Returns once every writer has drained. The first error reported by
    /// any stage, or the deadline passing, ends the run immediately; in
    /// every case all workers are cancelled before this returns.
    ///
    /// # Errors
    ///
    /// Returns the first error reported by the reader or a writer,
    /// [`PipelineError::DeadlineExceeded`] if the run is too slow, or
    /// [`PipelineError::InvalidConfig`] if `sinks` is empty or repeats a span.
    pub async fn run<R, W>(
        &self,
        input: R,
        sinks: Vec<(WindowSpan, W)>,
    ) -> Result<RunSummary, PipelineError>
    where
        R: AsyncBufRead + Unpin + Send + 'static,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let spans: Vec<WindowSpan> = sinks.iter().map(|(span, _)| *span).collect();
        check_spans(&spans)?;

        let timeout = self.config.timeout;
        info!(?spans, ?timeout, format = %self.config.format, "starting pipeline");

        let cancel = CancellationToken::new();
        let _cancel_on_return = cancel.clone().drop_guard();

        // Every stage may report; only the first report is ever read.
        let (err_tx, mut err_rx) = mpsc::channel::<PipelineError>(spans.len() + 1);

        let mut tick_outputs = Vec::with_capacity(spans.len());
        let mut aggregators: JoinSet<(WindowSpan, AggregatorStats)> = JoinSet::new();
        let mut writers: JoinSet<(WindowSpan, WriterStats)> = JoinSet::new();

        for (span, sink) in sinks {
            let (tick_tx, tick_rx) = mpsc::channel(HANDOFF_CAPACITY);
            let (candle_tx, candle_rx) = mpsc::channel(HANDOFF_CAPACITY);
            tick_outputs.push(tick_tx);

            let aggregator = WindowAggregator::with_schedule(span, self.config.schedule);
            let token = cancel.clone();
            aggregators.spawn(async move {
                (span, run_aggregator(aggregator, tick_rx, candle_tx, token).await)
            });

            let format = self.config.format;
            let header = self.config.csv_header;
            let errors = err_tx.clone();
            let token = cancel.clone();
            writers.spawn(async move {
                let stats = match format {
                    OutputFormat::Csv => {
                        let formatter = CsvFormatter::new().with_header(header);
                        run_writer(span, formatter, sink, candle_rx, errors, token).await
                    }
                    OutputFormat::Ndjson => {
                        run_writer(span, JsonFormatter::new(), sink, candle_rx, errors, token).await
                    }
                };
                (span, stats)
            });
        }

        let mut reader = JoinSet::new();
        reader.spawn(read_ticks(input, tick_outputs, err_tx, cancel.clone()));

        let deadline = tokio::time::sleep(timeout);
        tokio::pin!(deadline);

        let mut written = HashMap::with_capacity(spans.len());
        loop {
            tokio::select! {
                biased;
                Some(err) = err_rx.recv() => {
                    warn!(error = %err, "aborting pipeline");
                    return Err(err);
                }
                () = &mut deadline => {
                    warn!(?timeout, "pipeline deadline exceeded");
                    return Err(PipelineError::DeadlineExceeded(timeout));
                }
                joined = writers.join_next() => match joined {
                    Some(joined) => {
                        let (span, stats) = joined?;
                        debug!(%span, candles = stats.candles_written, "writer finished");
                        written.insert(span, stats);
                    }
                    None => break,
                },
            }
        }

        // A report made just before the last writer finished still fails the run.
        if let Ok(err) = err_rx.try_recv() {
            warn!(error = %err, "aborting pipeline");
            return Err(err);
        }

        // Writers only finish after their aggregator has, and aggregators
        // after the reader, so these joins are already complete.
        let mut aggregated = HashMap::with_capacity(spans.len());
        while let Some(joined) = aggregators.join_next().await {
            let (span, stats) = joined?;
            aggregated.insert(span, stats);
        }
        let lines_read = match reader.join_next().await {
            Some(joined) => joined?.lines_read,
            None => 0,
        };

        let spans = spans
            .into_iter()
            .map(|span| {
                let aggregator = aggregated.get(&span).copied().unwrap_or_default();
                let writer = written.get(&span).copied().unwrap_or_default();
                SpanSummary {
                    span,
                    ticks_accepted: aggregator.ticks_accepted,
                    ticks_discarded: aggregator.ticks_discarded,
                    candles_written: writer.candles_written,
                }
            })
            .collect();

        Ok(RunSummary { lines_read, spans })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_validates() {
        let config = PipelineConfig {
            spans: Vec::new(),
            ..PipelineConfig::default()
        };
        assert!(matches!(
            Pipeline::new(config),
            Err(PipelineError::InvalidConfig(_))
        ));
        assert!(Pipeline::new(PipelineConfig::default()).is_ok());
    }

    #[tokio::test]
    async fn test_run_rejects_duplicate_sinks() {
        let pipeline = Pipeline::new(PipelineConfig::default()).unwrap();
        let sinks = vec![
            (WindowSpan::MINUTE_5, tokio::io::sink()),
            (WindowSpan::MINUTE_5, tokio::io::sink()),
        ];
        let result = pipeline.run(&b""[..], sinks).await;
        assert!(matches!(result, Err(PipelineError::InvalidConfig(_))));
    }

    #[tokio::test]
    async fn test_run_without_input() {
        let pipeline = Pipeline::new(PipelineConfig::default()).unwrap();
        let sinks = vec![(WindowSpan::MINUTE_30, tokio::io::sink())];

        let summary = pipeline.run(&b""[..], sinks).await.unwrap();

        assert_eq!(summary.lines_read, 0);
        assert_eq!(summary.candles_written(), 0);
        assert_eq!(summary.spans.len(), 1);
    }
}
