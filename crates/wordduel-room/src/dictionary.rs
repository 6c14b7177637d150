//! Pluggable word validation.
//!
//! The engine checks the *shape* of words itself ([`Word::parse`]);
//! whether a well-formed word is an *accepted* word is delegated to a
//! [`Dictionary`] so deployments can ship whatever word list they like.

use std::collections::HashSet;

use crate::{Word, WordError};

/// Decides whether a well-formed five-letter word is accepted.
pub trait Dictionary: Send + Sync + 'static {
    /// Returns `true` if `word` is a member of the accepted word set.
    fn contains(&self, word: &Word) -> bool;
}

/// Accepts every well-formed word. The default when no word list is
/// configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnyWord;

impl Dictionary for AnyWord {
    fn contains(&self, _word: &Word) -> bool {
        true
    }
}

/// A fixed set of accepted words.
///
/// Entries that don't parse as five-letter words are skipped, so a word
/// list file can be fed in line by line without pre-cleaning.
#[derive(Debug, Clone, Default)]
pub struct WordList {
    words: HashSet<Word>,
}

impl WordList {
    /// Builds a word list from raw entries.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = entries
            .into_iter()
            .filter_map(|entry| Word::parse(entry.as_ref()).ok())
            .collect();
        Self { words }
    }

    /// Number of accepted words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns `true` if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Dictionary for WordList {
    fn contains(&self, word: &Word) -> bool {
        self.words.contains(word)
    }
}

/// Parses `raw` and checks it against `dict`.
pub(crate) fn validate_word(
    raw: &str,
    dict: &dyn Dictionary,
) -> Result<Word, WordError> {
    let word = Word::parse(raw)?;
    if !dict.contains(&word) {
        return Err(WordError::NotInWordList);
    }
    Ok(word)
}
