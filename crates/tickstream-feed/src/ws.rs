//! WebSocket live feed.
//!
//! Connects once, optionally sends a subscription request for the ticker
//! list, then forwards every JSON object frame to the handler. There is no
//! reconnection: the feed ends when the server closes the connection.

use crate::error::FeedError;
use crate::feed::{BoxFuture, LiveFeed, MessageHandler, RawMessage};
use futures_util::{Sink, SinkExt, Stream, StreamExt};
use serde_json::Value;
use tickstream_core::TickerList;
use tokio_tungstenite::{
    connect_async,
    tungstenite::{self, Message},
};
use tracing::{debug, info, warn};

/// Close code for a normal shutdown.
const NORMAL_CLOSE: u16 = 1000;

/// Default endpoint: a local relay that emits flat tick objects.
pub const DEFAULT_FEED_URL: &str = "ws://127.0.0.1:8765";

/// WebSocket feed configuration.
#[derive(Debug, Clone)]
pub struct WsFeedConfig {
    /// WebSocket URL. The endpoint must send one flat JSON tick object per
    /// text frame; vendor envelopes are not unwrapped.
    pub url: String,
    /// Send `{"subscribe": [...]}` after connecting.
    pub subscribe: bool,
}

impl Default for WsFeedConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_FEED_URL.to_string(),
            subscribe: true,
        }
    }
}

/// Connection state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
}

/// Build the subscription request for a ticker list.
pub fn subscribe_request(tickers: &TickerList) -> String {
    serde_json::json!({ "subscribe": tickers.as_slice() }).to_string()
}

/// Live feed over a single WebSocket connection.
pub struct WsLiveFeed {
    config: WsFeedConfig,
    tickers: TickerList,
    state: ConnectionState,
    frames_received: u64,
}

impl WsLiveFeed {
    pub fn new(config: WsFeedConfig, tickers: TickerList) -> Self {
        Self {
            config,
            tickers,
            state: ConnectionState::Disconnected,
            frames_received: 0,
        }
    }

    pub fn tickers(&self) -> &TickerList {
        &self.tickers
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Text frames received over the lifetime of this feed.
    pub fn frames_received(&self) -> u64 {
        self.frames_received
    }

    async fn stream<H: MessageHandler>(&mut self, handler: &mut H) -> Result<(), H::Error> {
        info!(url = %self.config.url, tickers = self.tickers.len(), "Connecting to live feed");
        self.state = ConnectionState::Connecting;

        let (ws_stream, _response) = match connect_async(self.config.url.as_str()).await {
            Ok(conn) => conn,
            Err(e) => {
                self.state = ConnectionState::Disconnected;
                return Err(FeedError::ConnectionFailed(e.to_string()).into());
            }
        };
        let (write, read) = ws_stream.split();
        self.session(write, read, handler).await
    }

    /// Run one connected session. The state is `Disconnected` again on
    /// return, whichever way the session ended.
    async fn session<W, R, H>(
        &mut self,
        mut write: W,
        mut read: R,
        handler: &mut H,
    ) -> Result<(), H::Error>
    where
        W: Sink<Message, Error = tungstenite::Error> + Unpin,
        R: Stream<Item = Result<Message, tungstenite::Error>> + Unpin,
        H: MessageHandler,
    {
        self.state = ConnectionState::Connected;
        info!("Live feed connected");

        let result = self.read_loop(&mut write, &mut read, handler).await;
        self.state = ConnectionState::Disconnected;
        result
    }

    /// Subscribe, then dispatch frames until the connection ends.
    async fn read_loop<W, R, H>(
        &mut self,
        write: &mut W,
        read: &mut R,
        handler: &mut H,
    ) -> Result<(), H::Error>
    where
        W: Sink<Message, Error = tungstenite::Error> + Unpin,
        R: Stream<Item = Result<Message, tungstenite::Error>> + Unpin,
        H: MessageHandler,
    {
        if self.config.subscribe {
            let request = subscribe_request(&self.tickers);
            debug!(%request, "Sending subscription");
            write
                .send(Message::Text(request))
                .await
                .map_err(FeedError::from)?;
        }

        loop {
            let frame = match read.next().await {
                Some(Ok(frame)) => frame,
                Some(Err(e)) => break Err(FeedError::from(e).into()),
                None => {
                    warn!("Live feed stream ended");
                    break Ok(());
                }
            };

            match frame {
                Message::Text(text) => {
                    self.frames_received += 1;
                    match decode_message(&text) {
                        Ok(message) => {
                            if let Err(e) = handler.handle_message(message) {
                                break Err(e);
                            }
                        }
                        Err(e) => warn!(?e, "Skipping undecodable frame"),
                    }
                }
                Message::Ping(data) => {
                    debug!("Received ping, sending pong");
                    if let Err(e) = write.send(Message::Pong(data)).await {
                        break Err(FeedError::from(e).into());
                    }
                }
                Message::Close(frame) => {
                    let (code, reason) = frame
                        .map(|f| (f.code.into(), f.reason.to_string()))
                        .unwrap_or((NORMAL_CLOSE, "Normal close".to_string()));
                    if code == NORMAL_CLOSE {
                        info!(%reason, "Live feed closed by server");
                        break Ok(());
                    }
                    warn!(code, %reason, "Live feed closed by server");
                    break Err(FeedError::ConnectionClosed { code, reason }.into());
                }
                _ => {}
            }
        }
    }
}

impl LiveFeed for WsLiveFeed {
    fn live<'a, H>(&'a mut self, handler: &'a mut H) -> BoxFuture<'a, Result<(), H::Error>>
    where
        H: MessageHandler + 'a,
    {
        Box::pin(self.stream(handler))
    }
}

/// Decode a text frame into a raw message. Only JSON objects are messages.
fn decode_message(text: &str) -> Result<RawMessage, FeedError> {
    match serde_json::from_str::<Value>(text)? {
        Value::Object(map) => Ok(map),
        other => Err(FeedError::InvalidData(format!(
            "expected JSON object, got {other}"
        ))),
    }
}
