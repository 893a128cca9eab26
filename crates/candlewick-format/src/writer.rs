//! Writer stage: drains a candle channel into an output sink.

use candlewick_aggregate::Candle;
use candlewick_types::WindowSpan;
use thiserror::Error;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::{FormatError, Formatter};

/// A candle could not be written to a span's output.
#[derive(Error, Debug)]
#[error("failed to write {span} candles: {source}")]
pub struct WriteError {
    /// Span whose output failed.
    pub span: WindowSpan,
    /// Underlying formatting or I/O failure.
    pub source: FormatError,
}

/// Counters describing one writer's run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriterStats {
    /// Candles written to the sink.
    pub candles_written: u64,
    /// Records that failed to format or write.
    pub write_errors: u64,
}

/// Writes every received candle to `sink` using `formatter`.
///
/// A failed record is reported on `errors` and the writer moves on to the
/// next candle; it keeps draining so that upstream stages never block on a
/// writer that gave up. Once the candle channel closes, the sink is flushed
/// and the function returns. Returning is the completion signal, so it
/// happens exactly once and means "drained", not "persisted".
pub async fn run_writer<F, W, E>(
    span: WindowSpan,
    formatter: F,
    mut sink: W,
    mut candles: mpsc::Receiver<Candle>,
    errors: mpsc::Sender<E>,
    cancel: CancellationToken,
) -> WriterStats
where
    F: Formatter,
    W: AsyncWrite + Unpin,
    E: From<WriteError>,
{
    let mut stats = WriterStats::default();
    let mut record = Vec::with_capacity(128);

    if let Err(source) = write_record(&mut sink, record_header(&formatter, &mut record)).await {
        stats.write_errors += 1;
        if !report(&errors, WriteError { span, source }, &cancel).await {
            return stats;
        }
    }

    loop {
        let candle = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!(%span, "writer cancelled");
                return stats;
            }
            candle = candles.recv() => candle,
        };
        let Some(candle) = candle else { break };

        record.clear();
        let result = match formatter.write_candle(&candle, &mut record) {
            Ok(()) => write_record(&mut sink, &record).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(()) => stats.candles_written += 1,
            Err(source) => {
                stats.write_errors += 1;
                warn!(%span, ticker = %candle.ticker, error = %source, "failed to write candle");
                if !report(&errors, WriteError { span, source }, &cancel).await {
                    return stats;
                }
            }
        }
    }

    if let Err(e) = sink.flush().await {
        stats.write_errors += 1;
        warn!(%span, error = %e, "failed to flush output");
        let source = FormatError::Io(e);
        report(&errors, WriteError { span, source }, &cancel).await;
    }

    debug!(%span, ?stats, "writer drained");
    stats
}

fn record_header<'a, F: Formatter>(formatter: &F, buf: &'a mut Vec<u8>) -> &'a [u8] {
    buf.clear();
    // Writing into a Vec cannot fail.
    let _ = formatter.write_header(&mut *buf);
    buf
}

async fn write_record<W: AsyncWrite + Unpin>(
    sink: &mut W,
    record: &[u8],
) -> Result<(), FormatError> {
    if !record.is_empty() {
        sink.write_all(record).await?;
    }
    Ok(())
}

/// Reports an error unless the run is already over.
async fn report<E: From<WriteError>>(
    errors: &mpsc::Sender<E>,
    err: WriteError,
    cancel: &CancellationToken,
) -> bool {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => false,
        sent = errors.send(E::from(err)) => sent.is_ok(),
    }
}
