//! Five-letter word validation and normalization.

use std::fmt;

use wordduel_protocol::WORD_LEN;

/// A validated secret word or guess: exactly five ASCII letters,
/// stored uppercased.
///
/// Constructing a `Word` is the only way word-shaped input enters the
/// engine, so everything past the parse can assume a well-formed,
/// case-normalized value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Word([u8; WORD_LEN]);

/// Why a raw string failed to parse as a [`Word`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum WordError {
    /// Not exactly five characters.
    #[error("word must be exactly {WORD_LEN} letters")]
    WrongLength,

    /// Contains something other than A-Z / a-z.
    #[error("word must contain only letters")]
    NotAlphabetic,

    /// Well-formed but not in the configured dictionary.
    #[error("word is not in the accepted word list")]
    NotInWordList,
}

impl Word {
    /// Parses and normalizes a raw string.
    ///
    /// Leading/trailing whitespace is tolerated (clients echo raw input
    /// fields); anything else that isn't five ASCII letters is rejected.
    pub fn parse(raw: &str) -> Result<Self, WordError> {
        let raw = raw.trim();
        if raw.len() != WORD_LEN {
            return Err(WordError::WrongLength);
        }

        let mut letters = [0u8; WORD_LEN];
        for (slot, byte) in letters.iter_mut().zip(raw.bytes()) {
            if !byte.is_ascii_alphabetic() {
                return Err(WordError::NotAlphabetic);
            }
            *slot = byte.to_ascii_uppercase();
        }
        Ok(Self(letters))
    }

    /// Returns the uppercased letters.
    pub fn letters(&self) -> &[u8; WORD_LEN] {
        &self.0
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.0 {
            write!(f, "{}", b as char)?;
        }
        Ok(())
    }
}
