//! Unified error type for the word duel server.

use wordduel_protocol::ProtocolError;
use wordduel_room::GameError;
use wordduel_transport::TransportError;

/// Top-level error that wraps all crate-specific errors.
///
/// When using the `wordduel` meta-crate, you deal with this single
/// error type instead of importing errors from each sub-crate.
/// The `#[from]` attribute on each variant auto-generates `From` impls,
/// so the `?` operator converts sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum DuelError {
    /// A transport-level error (connection, send, recv).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A protocol-level error (encode, decode, invalid message).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A game-level error (room not found, wrong turn, bad word).
    #[error(transparent)]
    Game(#[from] GameError),
}
