//! `DuelServer` builder and server loop.
//!
//! This is the entry point for running a word duel server. It ties
//! together all the layers: transport → protocol → rooms.

use std::sync::Arc;

use tokio::sync::Mutex;
use wordduel_protocol::{Codec, JsonCodec};
use wordduel_room::{AnyWord, Dictionary, RoomRegistry};
use wordduel_transport::{Transport, WebSocketTransport};

use crate::handler::handle_connection;
use crate::DuelError;

/// Shared server state passed to each connection handler task.
///
/// Wrapped in `Arc` so it can be cheaply cloned across tasks.
/// Interior mutability via `Mutex` where needed.
pub(crate) struct ServerState<C: Codec> {
    pub(crate) registry: Mutex<RoomRegistry>,
    pub(crate) codec: C,
}

/// Builder for configuring and starting a word duel server.
///
/// # Example
///
/// ```rust,ignore
/// use wordduel::prelude::*;
///
/// let server = DuelServer::builder()
///     .bind("0.0.0.0:8080")
///     .build()
///     .await?;
/// server.run().await
/// ```
pub struct DuelServerBuilder {
    bind_addr: String,
    dictionary: Arc<dyn Dictionary>,
}

impl DuelServerBuilder {
    /// Creates a new builder with default settings: localhost bind,
    /// any well-formed five-letter word accepted.
    pub fn new() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".to_string(),
            dictionary: Arc::new(AnyWord),
        }
    }

    /// Sets the address to bind the server to.
    pub fn bind(mut self, addr: &str) -> Self {
        self.bind_addr = addr.to_string();
        self
    }

    /// Sets the dictionary used to validate secret words and guesses.
    pub fn dictionary(mut self, dictionary: Arc<dyn Dictionary>) -> Self {
        self.dictionary = dictionary;
        self
    }

    /// Builds and starts the server.
    ///
    /// Uses `JsonCodec` and `WebSocketTransport`, matching the web
    /// client.
    pub async fn build(self) -> Result<DuelServer<JsonCodec>, DuelError> {
        let transport = WebSocketTransport::bind(&self.bind_addr).await?;

        let state = Arc::new(ServerState {
            registry: Mutex::new(RoomRegistry::new(self.dictionary)),
            codec: JsonCodec,
        });

        Ok(DuelServer { transport, state })
    }
}

impl Default for DuelServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A running word duel server.
///
/// Call [`run()`](Self::run) to start accepting connections.
pub struct DuelServer<C: Codec> {
    transport: WebSocketTransport,
    state: Arc<ServerState<C>>,
}

impl DuelServer<JsonCodec> {
    /// Creates a new builder.
    pub fn builder() -> DuelServerBuilder {
        DuelServerBuilder::new()
    }
}

impl<C: Codec> DuelServer<C> {
    /// Returns the local address the server is bound to.
    pub fn local_addr(
        &self,
    ) -> Result<std::net::SocketAddr, DuelError> {
        self.transport.local_addr().map_err(DuelError::Transport)
    }

    /// Runs the server accept loop.
    ///
    /// Accepts incoming connections and spawns a handler task for each
    /// connected player. Runs until the process is terminated.
    pub async fn run(mut self) -> Result<(), DuelError> {
        tracing::info!("word duel server running");

        loop {
            match self.transport.accept().await {
                Ok(conn) => {
                    let state = Arc::clone(&self.state);
                    tokio::spawn(async move {
                        if let Err(e) =
                            handle_connection(conn, state).await
                        {
                            tracing::debug!(
                                error = %e,
                                "connection ended with error"
                            );
                        }
                    });
                }
                Err(e) => {
                    tracing::error!(error = %e, "accept failed");
                }
            }
        }
    }
}
