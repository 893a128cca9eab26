//! Sequential tick reading with fan-out to every consumer.

use std::sync::Arc;

use candlewick_types::{ParseError, Tick};
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::parse_line;

/// Errors reported by the reader.
#[derive(Error, Debug)]
pub enum IngestError {
    /// A record could not be parsed.
    #[error("line {line}: {source}")]
    Parse {
        /// 1-based line number of the record.
        line: u64,
        /// Why the record was rejected.
        source: ParseError,
    },

    /// Reading the input failed.
    #[error("failed to read input: {0}")]
    Read(#[from] std::io::Error),
}

/// Counters describing one pass over the input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadStats {
    /// Lines read from the input.
    pub lines_read: u64,
    /// Lines parsed into ticks and broadcast.
    pub ticks_forwarded: u64,
    /// Lines rejected by the parser.
    pub parse_errors: u64,
}

/// Reads tick records line by line and sends each tick to every output.
///
/// Ticks are sent to the outputs one at a time, in registration order, so
/// every consumer sees the input order and the slowest consumer paces the
/// reader. A record that fails to parse is reported on `errors` and is not
/// forwarded; reading continues with the next line. A read failure is
/// reported and ends the pass.
///
/// All outputs are closed when this function returns. It returns early when
/// `cancel` fires or an output's receiver is gone.
pub async fn read_ticks<R, E>(
    input: R,
    outputs: Vec<mpsc::Sender<Arc<Tick>>>,
    errors: mpsc::Sender<E>,
    cancel: CancellationToken,
) -> ReadStats
where
    R: AsyncBufRead + Unpin,
    E: From<IngestError>,
{
    let mut stats = ReadStats::default();
    let mut lines = input.lines();

    'read: loop {
        let next = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!(lines = stats.lines_read, "reader cancelled");
                break;
            }
            next = lines.next_line() => next,
        };

        let line = match next {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                warn!(error = %e, "input read failed");
                report(&errors, IngestError::Read(e), &cancel).await;
                break;
            }
        };
        stats.lines_read += 1;

        let tick = match parse_line(&line) {
            Ok(tick) => Arc::new(tick),
            Err(source) => {
                stats.parse_errors += 1;
                warn!(line = stats.lines_read, error = %source, "rejecting malformed tick");
                let err = IngestError::Parse {
                    line: stats.lines_read,
                    source,
                };
                if !report(&errors, err, &cancel).await {
                    break;
                }
                continue;
            }
        };

        for output in &outputs {
            let sent = tokio::select! {
                biased;
                _ = cancel.cancelled() => false,
                sent = output.send(Arc::clone(&tick)) => sent.is_ok(),
            };
            if !sent {
                break 'read;
            }
        }
        stats.ticks_forwarded += 1;
    }

    debug!(?stats, "reader finished");
    stats
}

/// Reports an error unless the run is already over.
async fn report<E: From<IngestError>>(
    errors: &mpsc::Sender<E>,
    err: IngestError,
    cancel: &CancellationToken,
) -> bool {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => false,
        sent = errors.send(E::from(err)) => sent.is_ok(),
    }
}
