//! Collector orchestration.
//!
//! `DataCollector` owns a ticker list, a live feed and a `TickHandler`.
//! The feed calls the handler once per message; the handler normalizes the
//! message and stores the resulting entry. Any handler error ends the run.

use crate::config::AppConfig;
use crate::error::{CollectorError, CollectorResult};
use crate::tickers::read_tickers;
use std::future::Future;
use tickstream_core::TickerList;
use tickstream_feed::{LiveFeed, MessageHandler, MessageNormalizer, RawMessage, WsLiveFeed};
use tickstream_persistence::RecordSink;
use tickstream_telemetry::Metrics;
use tracing::{debug, info, warn};

/// Normalizes feed messages and forwards them to a sink.
pub struct TickHandler<S> {
    normalizer: MessageNormalizer,
    sink: S,
    handled: u64,
}

impl<S: RecordSink> TickHandler<S> {
    pub fn new(normalizer: MessageNormalizer, sink: S) -> Self {
        Self {
            normalizer,
            sink,
            handled: 0,
        }
    }

    /// Messages successfully normalized and stored.
    pub fn handled(&self) -> u64 {
        self.handled
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    fn close(&mut self) -> CollectorResult<()> {
        Ok(self.sink.close()?)
    }
}

impl<S: RecordSink> MessageHandler for TickHandler<S> {
    type Error = CollectorError;

    fn handle_message(&mut self, message: RawMessage) -> CollectorResult<()> {
        Metrics::message_received();

        let entry = self.normalizer.normalize(&message).map_err(|e| {
            Metrics::message_rejected("normalize");
            e
        })?;
        debug!(
            id = %entry.id,
            price = entry.price,
            time = %entry.time,
            change = entry.change,
            change_percent = entry.change_percent,
            "Tick normalized"
        );

        let ticker = entry.id.clone();
        self.sink.store(entry).map_err(|e| {
            Metrics::message_rejected("store");
            e
        })?;
        Metrics::entry_stored(&ticker);
        self.handled += 1;

        Ok(())
    }
}

/// Streams ticks from a live feed into a record sink.
pub struct DataCollector<F, S> {
    tickers: TickerList,
    feed: F,
    handler: TickHandler<S>,
}

impl DataCollector<WsLiveFeed, Box<dyn RecordSink>> {
    /// Build a WebSocket collector from configuration.
    ///
    /// Fails if the ticker file cannot be read or the sink cannot be
    /// created.
    pub fn from_config(config: &AppConfig) -> CollectorResult<Self> {
        let tickers = read_tickers(&config.tickers_file)?;
        let normalizer = MessageNormalizer::new(config.timestamp_renderer()?);
        let feed = WsLiveFeed::new(config.feed.clone().into(), tickers.clone());
        let sink = config.persistence.build_sink()?;

        Ok(Self::with_normalizer(tickers, feed, sink, normalizer))
    }
}

impl<F: LiveFeed, S: RecordSink> DataCollector<F, S> {
    /// Create a collector with the default UTC-8 timestamp rendering.
    pub fn new(tickers: TickerList, feed: F, sink: S) -> Self {
        Self::with_normalizer(tickers, feed, sink, MessageNormalizer::default())
    }

    pub fn with_normalizer(
        tickers: TickerList,
        feed: F,
        sink: S,
        normalizer: MessageNormalizer,
    ) -> Self {
        Self {
            tickers,
            feed,
            handler: TickHandler::new(normalizer, sink),
        }
    }

    pub fn tickers(&self) -> &TickerList {
        &self.tickers
    }

    pub fn feed(&self) -> &F {
        &self.feed
    }

    pub fn sink(&self) -> &S {
        self.handler.sink()
    }

    /// Messages successfully handled so far.
    pub fn handled(&self) -> u64 {
        self.handler.handled()
    }

    /// Normalize one message and store it.
    pub fn handle_message(&mut self, message: RawMessage) -> CollectorResult<()> {
        self.handler.handle_message(message)
    }

    /// Run the live feed until it ends, fails, or `shutdown` resolves.
    ///
    /// Resolving `shutdown` (e.g. Ctrl-C) is a clean exit. The sink is
    /// closed on every path.
    pub async fn run<Sig>(&mut self, shutdown: Sig) -> CollectorResult<()>
    where
        Sig: Future<Output = ()>,
    {
        info!(tickers = ?self.tickers.as_slice(), "Starting live collection");

        let outcome = tokio::select! {
            result = self.feed.live(&mut self.handler) => result,
            () = shutdown => {
                info!("Interrupt received; exiting");
                Ok(())
            }
        };

        let closed = self.handler.close();
        info!(handled = self.handler.handled(), "Live collection stopped");

        match outcome {
            Ok(()) => closed,
            Err(e) => {
                if let Err(close_err) = closed {
                    warn!(?close_err, "Failed to close sink after feed error");
                }
                Err(e)
            }
        }
    }
}
