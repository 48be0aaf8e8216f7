//! Mock WebSocket tick server for integration tests.
//!
//! Accepts connections, records the frames clients send, and answers the
//! first subscription request with a scripted list of tick frames followed
//! by an optional close frame.

use futures_util::{SinkExt, StreamExt};
use std::borrow::Cow;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, Mutex};
use tokio_tungstenite::tungstenite::protocol::{frame::coding::CloseCode, CloseFrame};
use tokio_tungstenite::{accept_async, tungstenite::Message};

/// Frames to send and how to end the session.
#[derive(Clone)]
pub struct Script {
    pub frames: Vec<String>,
    /// Close code sent after the frames; `None` keeps the connection open.
    pub close_code: Option<u16>,
}

/// A mock WebSocket server for testing.
pub struct MockTickServer {
    addr: SocketAddr,
    shutdown_tx: mpsc::Sender<()>,
    received: Arc<Mutex<Vec<String>>>,
}

impl MockTickServer {
    /// Start a server on an available port.
    pub async fn start(script: Script) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let received: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);

        let received_clone = received.clone();
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    Ok((stream, _)) = listener.accept() => {
                        tokio::spawn(handle_connection(stream, script.clone(), received_clone.clone()));
                    }
                    _ = shutdown_rx.recv() => break,
                }
            }
        });

        Self {
            addr,
            shutdown_tx,
            received,
        }
    }

    pub fn url(&self) -> String {
        format!("ws://{}", self.addr)
    }

    /// Text frames received from clients.
    pub async fn received(&self) -> Vec<String> {
        self.received.lock().await.clone()
    }

    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(()).await;
    }
}

async fn handle_connection(stream: TcpStream, script: Script, received: Arc<Mutex<Vec<String>>>) {
    let ws_stream = match accept_async(stream).await {
        Ok(ws) => ws,
        Err(e) => {
            eprintln!("WebSocket handshake failed: {e}");
            return;
        }
    };
    let (mut write, mut read) = ws_stream.split();
    let mut replied = false;

    while let Some(msg) = read.next().await {
        match msg {
            Ok(Message::Text(text)) => {
                let is_subscribe = text.contains("\"subscribe\"");
                received.lock().await.push(text);

                if is_subscribe && !replied {
                    replied = true;
                    for frame in &script.frames {
                        if write.send(Message::Text(frame.clone())).await.is_err() {
                            return;
                        }
                    }
                    if let Some(code) = script.close_code {
                        let close = CloseFrame {
                            code: CloseCode::from(code),
                            reason: Cow::Borrowed("script complete"),
                        };
                        let _ = write.send(Message::Close(Some(close))).await;
                    }
                }
            }
            Ok(Message::Ping(data)) => {
                let _ = write.send(Message::Pong(data)).await;
            }
            Ok(Message::Close(_)) | Err(_) => break,
            _ => {}
        }
    }
}
