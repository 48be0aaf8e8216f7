//! Live feed abstraction.
//!
//! A `LiveFeed` owns the connection to a market-data source and calls a
//! `MessageHandler` once per incoming message, in arrival order, never
//! concurrently. Handler errors stop the feed and are returned unchanged.

use crate::error::FeedError;
use serde_json::{Map, Value};
use std::future::Future;
use std::pin::Pin;

/// Boxed future for async trait methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// One message as delivered by the feed, before normalization.
pub type RawMessage = Map<String, Value>;

/// Callback invoked for every message a feed delivers.
pub trait MessageHandler: Send {
    /// Error type returned by the handler. Feed failures convert into it.
    type Error: From<FeedError> + Send;

    /// Handle one message. An error ends the live loop.
    fn handle_message(&mut self, message: RawMessage) -> Result<(), Self::Error>;
}

/// Source of live price messages.
pub trait LiveFeed: Send {
    /// Start streaming and invoke `handler` for each message.
    ///
    /// Resolves when the source ends, on a transport failure, or on the
    /// first handler error.
    fn live<'a, H>(&'a mut self, handler: &'a mut H) -> BoxFuture<'a, Result<(), H::Error>>
    where
        H: MessageHandler + 'a;
}

/// Adapter turning a closure into a `MessageHandler`.
pub struct FnHandler<F> {
    f: F,
}

/// Wrap a closure as a `MessageHandler`.
pub fn handler_fn<F, E>(f: F) -> FnHandler<F>
where
    F: FnMut(RawMessage) -> Result<(), E> + Send,
    E: From<FeedError> + Send,
{
    FnHandler { f }
}

impl<F, E> MessageHandler for FnHandler<F>
where
    F: FnMut(RawMessage) -> Result<(), E> + Send,
    E: From<FeedError> + Send,
{
    type Error = E;

    fn handle_message(&mut self, message: RawMessage) -> Result<(), E> {
        (self.f)(message)
    }
}
