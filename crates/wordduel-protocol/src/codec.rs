//! Codec trait and implementations for serializing messages.
//!
//! The rest of the stack doesn't care how messages become wire text —
//! it goes through the [`Codec`] trait, so a different encoding can be
//! swapped in later without touching the server or room layers.

use serde::{de::DeserializeOwned, Serialize};

use crate::ProtocolError;

/// Encodes Rust types to wire text and decodes it back.
///
/// The wire is UTF-8 text (the web client speaks JSON over WebSocket
/// text frames). `Send + Sync + 'static` because the codec is shared
/// across connection handler tasks.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into wire text.
    fn encode<T: Serialize>(
        &self,
        value: &T,
    ) -> Result<String, ProtocolError>;

    /// Deserializes wire text back into a value.
    fn decode<T: DeserializeOwned>(
        &self,
        text: &str,
    ) -> Result<T, ProtocolError>;
}

/// A [`Codec`] that uses JSON (via `serde_json`).
///
/// Human-readable, inspectable in browser DevTools, and what the web
/// client speaks. Behind the `json` feature flag (enabled by default).
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn encode<T: Serialize>(
        &self,
        value: &T,
    ) -> Result<String, ProtocolError> {
        serde_json::to_string(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(
        &self,
        text: &str,
    ) -> Result<T, ProtocolError> {
        serde_json::from_str(text).map_err(ProtocolError::Decode)
    }
}
