//! The two-pass letter-matching function used to score one guess.

use wordduel_protocol::{LetterMark, WORD_LEN};

use crate::Word;

/// Scores `guess` against `secret`, producing one mark per position.
///
/// Two passes, so duplicate letters behave the way the canonical game
/// defines them:
///
/// 1. Exact position matches become `Correct` and consume that secret
///    position.
/// 2. Each remaining guess letter scans the unconsumed secret positions
///    left to right; the first match becomes `Present` and consumes it,
///    otherwise the letter stays `Absent`.
///
/// Pure function of `(guess, secret)`; ties among duplicates resolve to
/// the leftmost available slot.
pub fn score_guess(guess: &Word, secret: &Word) -> [LetterMark; WORD_LEN] {
    let g = guess.letters();
    let s = secret.letters();

    let mut marks = [LetterMark::Absent; WORD_LEN];
    let mut consumed = [false; WORD_LEN];

    for i in 0..WORD_LEN {
        if g[i] == s[i] {
            marks[i] = LetterMark::Correct;
            consumed[i] = true;
        }
    }

    for i in 0..WORD_LEN {
        if marks[i] == LetterMark::Correct {
            continue;
        }
        for j in 0..WORD_LEN {
            if !consumed[j] && g[i] == s[j] {
                marks[i] = LetterMark::Present;
                consumed[j] = true;
                break;
            }
        }
    }

    marks
}

/// Returns `true` if every position is `Correct`.
pub(crate) fn is_all_correct(marks: &[LetterMark; WORD_LEN]) -> bool {
    marks.iter().all(|m| *m == LetterMark::Correct)
}
