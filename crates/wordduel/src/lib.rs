//! # Wordduel
//!
//! Real-time two-player word duel server.
//!
//! Two players share a room: one sets a secret five-letter word, the
//! other has six guesses to find it, with per-letter feedback after
//! each guess. Roles swap every round and scores accumulate until a
//! player leaves. The server is authoritative; clients speak JSON over
//! WebSocket.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use wordduel::prelude::*;
//!
//! # async fn run() -> Result<(), DuelError> {
//! let server = DuelServer::builder()
//!     .bind("0.0.0.0:8080")
//!     .build()
//!     .await?;
//! server.run().await
//! # }
//! ```

mod error;
mod handler;
mod server;

pub use error::DuelError;
pub use server::{DuelServer, DuelServerBuilder};

/// Commonly used types, re-exported for convenience.
pub mod prelude {
    pub use crate::{DuelError, DuelServer, DuelServerBuilder};
    pub use wordduel_protocol::{
        ClientAction, LetterMark, PlayerId, RoomCode, ServerEvent,
        WORD_LEN,
    };
    pub use wordduel_room::{
        AnyWord, Dictionary, GameError, WordList, MAX_GUESSES,
    };
}
