//! Channel-driven aggregation stage.

use std::sync::Arc;

use candlewick_types::Tick;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::{AggregatorStats, Candle, WindowAggregator};

/// Runs an aggregator over a tick channel, forwarding flushed candles.
///
/// Returns when the tick channel closes and the last window has been
/// forwarded, when `cancel` fires, or when the candle receiver is dropped.
/// Every receive and send races the cancellation token, so a cancelled run
/// never leaves this stage blocked on a hand-off.
pub async fn run_aggregator(
    mut aggregator: WindowAggregator,
    mut ticks: mpsc::Receiver<Arc<Tick>>,
    candles: mpsc::Sender<Candle>,
    cancel: CancellationToken,
) -> AggregatorStats {
    let span = aggregator.span();

    loop {
        let tick = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!(%span, window = ?aggregator.current_window(), "aggregator cancelled");
                return aggregator.stats();
            }
            tick = ticks.recv() => tick,
        };
        let Some(tick) = tick else { break };

        for candle in aggregator.process(&tick) {
            if !forward(&candles, candle, &cancel).await {
                return aggregator.stats();
            }
        }
    }

    for candle in aggregator.finish() {
        if !forward(&candles, candle, &cancel).await {
            break;
        }
    }

    debug!(%span, stats = ?aggregator.stats(), "aggregator drained");
    aggregator.stats()
}

/// Hands a candle to the writer. Returns false if the run is over.
async fn forward(
    candles: &mpsc::Sender<Candle>,
    candle: Candle,
    cancel: &CancellationToken,
) -> bool {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => false,
        sent = candles.send(candle) => sent.is_ok(),
    }
}
