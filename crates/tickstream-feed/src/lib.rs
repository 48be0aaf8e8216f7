//! Live price feed and message normalization for tickstream.
//!
//! - `LiveFeed`: a source that streams raw tick messages into a handler
//! - `MessageNormalizer`: reshapes a raw message into a `PriceEntry`
//! - `WsLiveFeed`: WebSocket implementation of `LiveFeed`

pub mod error;
pub mod feed;
pub mod normalizer;
pub mod ws;

pub use error::{FeedError, FeedResult};
pub use feed::{handler_fn, BoxFuture, FnHandler, LiveFeed, MessageHandler, RawMessage};
pub use normalizer::MessageNormalizer;
pub use ws::{subscribe_request, ConnectionState, WsFeedConfig, WsLiveFeed, DEFAULT_FEED_URL};
