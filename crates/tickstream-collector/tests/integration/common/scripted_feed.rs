//! In-process `LiveFeed` that replays a fixed script.

use serde_json::Value;
use tickstream_feed::{BoxFuture, LiveFeed, MessageHandler, RawMessage};
use tokio::sync::oneshot;

/// Replays scripted messages in order.
///
/// With an interrupt attached, the feed fires it after the last message
/// and then stays open like a live stream would. Without one, the feed
/// ends after the last message.
pub struct ScriptedFeed {
    script: Vec<RawMessage>,
    interrupt: Option<oneshot::Sender<()>>,
}

impl ScriptedFeed {
    pub fn new(script: Vec<Value>) -> Self {
        Self {
            script: script
                .into_iter()
                .map(|v| v.as_object().cloned().expect("scripted message must be an object"))
                .collect(),
            interrupt: None,
        }
    }

    /// Attach an interrupt; the returned future resolves once the script
    /// has been delivered.
    pub fn with_interrupt(mut self) -> (Self, impl std::future::Future<Output = ()>) {
        let (tx, rx) = oneshot::channel();
        self.interrupt = Some(tx);
        (self, async move {
            let _ = rx.await;
        })
    }
}

impl LiveFeed for ScriptedFeed {
    fn live<'a, H>(&'a mut self, handler: &'a mut H) -> BoxFuture<'a, Result<(), H::Error>>
    where
        H: MessageHandler + 'a,
    {
        Box::pin(async move {
            for message in self.script.drain(..) {
                handler.handle_message(message)?;
            }
            match self.interrupt.take() {
                Some(tx) => {
                    let _ = tx.send(());
                    std::future::pending::<()>().await;
                    Ok(())
                }
                None => Ok(()),
            }
        })
    }
}
