//! Pure state and transition logic for the guess grid.
//!
//! The rendering layer in `app` derives everything it shows from the attempt
//! history the server returns, so re-rendering a row can never accumulate
//! stale feedback classes and activating a row is idempotent by construction.

use std::collections::HashMap;

use thiserror::Error;

use crate::model::{Attempt, LetterStatus};

/// Letters per guess.
pub const WORD_LEN: usize = 7;

/// Rows in the grid. The server ends the game after nine attempts.
pub const MAX_ROWS: usize = 9;

/// Lifecycle of a grid row. Exactly one row is `Active` at a time; rows
/// before it hold submitted attempts, rows after it are blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowState {
    Submitted,
    Active,
    Untouched,
}

/// Fill level of the active row. Only a `Full` row may be submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowFill {
    Empty,
    PartiallyFilled,
    Full,
}

/// Where focus should go after an input event on the active row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusMove {
    Advance(usize),
    Retreat(usize),
    Submit,
    Stay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Please complete the word before submitting.")]
pub struct IncompleteGuess;

/// Classifies row `row` given the number of attempts the server has
/// recorded. Once all rows hold attempts, no row is active.
pub fn row_state(attempt_count: usize, row: usize) -> RowState {
    if row < attempt_count {
        RowState::Submitted
    } else if row == attempt_count && row < MAX_ROWS {
        RowState::Active
    } else {
        RowState::Untouched
    }
}

/// Focus transition after a character lands in column `col`.
pub fn entry_transition(col: usize, value: &str) -> FocusMove {
    if value.chars().count() == 1 && col + 1 < WORD_LEN {
        FocusMove::Advance(col + 1)
    } else {
        FocusMove::Stay
    }
}

/// Focus transition for a keydown in column `col`. `value` is the cell's
/// content before the browser applies the key.
pub fn key_transition(col: usize, key: &str, value: &str) -> FocusMove {
    match key {
        "Backspace" if value.is_empty() && col > 0 => FocusMove::Retreat(col - 1),
        "Enter" if col == WORD_LEN - 1 => FocusMove::Submit,
        _ => FocusMove::Stay,
    }
}

pub fn classify(letters: &[String]) -> RowFill {
    let filled = letters.iter().filter(|cell| !cell.is_empty()).count();
    if filled == 0 {
        RowFill::Empty
    } else if filled < WORD_LEN {
        RowFill::PartiallyFilled
    } else {
        RowFill::Full
    }
}

/// Concatenates and uppercases the active row's cell values into a guess
/// candidate, refusing rows that are not completely filled.
pub fn assemble_guess(letters: &[String]) -> Result<String, IncompleteGuess> {
    match classify(letters) {
        RowFill::Full => Ok(letters.concat().to_uppercase()),
        RowFill::Empty | RowFill::PartiallyFilled => Err(IncompleteGuess),
    }
}

/// Letter and feedback for each of a submitted row's cells, oldest-first in
/// display order. Tolerates short guesses or feedback from the server.
pub fn filled_cells(attempt: &Attempt) -> Vec<(Option<char>, Option<LetterStatus>)> {
    let mut letters = attempt.guess.chars();
    (0..WORD_LEN)
        .map(|col| (letters.next(), attempt.feedback.get(col).copied()))
        .collect()
}

/// Cumulative keyboard key state across all attempts. The server sends
/// per-attempt feedback, so the merge happens here, best status winning.
pub fn keyboard_status(attempts: &[Attempt]) -> HashMap<char, LetterStatus> {
    let mut keys = HashMap::new();
    for attempt in attempts {
        for (letter, status) in attempt.guess.chars().zip(attempt.feedback.iter().copied()) {
            let merged = match keys.get(&letter).copied() {
                Some(current) => merge_key_status(current, status),
                None => status,
            };
            keys.insert(letter, merged);
        }
    }
    keys
}

// Precedence: correct > present > absent.
fn merge_key_status(current: LetterStatus, new: LetterStatus) -> LetterStatus {
    match (current, new) {
        (LetterStatus::Correct, _) | (_, LetterStatus::Correct) => LetterStatus::Correct,
        (LetterStatus::Present, _) | (_, LetterStatus::Present) => LetterStatus::Present,
        _ => LetterStatus::Absent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    fn attempt(guess: &str, feedback: &[LetterStatus]) -> Attempt {
        Attempt {
            guess: guess.to_string(),
            feedback: feedback.to_vec(),
        }
    }

    #[test]
    fn exactly_one_row_is_active() {
        for count in 0..MAX_ROWS {
            let active: Vec<usize> = (0..MAX_ROWS)
                .filter(|&row| row_state(count, row) == RowState::Active)
                .collect();
            assert_eq!(active, vec![count]);
        }
    }

    #[test]
    fn row_state_is_stable_across_repeated_queries() {
        // Activation is a pure function of the attempt count, so asking
        // twice can never yield a second active row.
        assert_eq!(row_state(2, 2), RowState::Active);
        assert_eq!(row_state(2, 2), RowState::Active);
        assert_eq!(row_state(2, 1), RowState::Submitted);
        assert_eq!(row_state(2, 3), RowState::Untouched);
    }

    #[test]
    fn no_row_is_active_once_the_grid_is_full() {
        for row in 0..MAX_ROWS {
            assert_eq!(row_state(MAX_ROWS, row), RowState::Submitted);
        }
        assert_eq!(row_state(MAX_ROWS, MAX_ROWS), RowState::Untouched);
    }

    #[test]
    fn entering_a_character_advances_focus_except_in_the_last_column() {
        assert_eq!(entry_transition(0, "a"), FocusMove::Advance(1));
        assert_eq!(entry_transition(5, "z"), FocusMove::Advance(6));
        assert_eq!(entry_transition(6, "g"), FocusMove::Stay);
        // Deleting back to empty does not move focus.
        assert_eq!(entry_transition(3, ""), FocusMove::Stay);
    }

    #[test]
    fn backspace_on_an_empty_cell_retreats_except_in_the_first_column() {
        assert_eq!(key_transition(3, "Backspace", ""), FocusMove::Retreat(2));
        assert_eq!(key_transition(0, "Backspace", ""), FocusMove::Stay);
        // A non-empty cell lets the browser delete in place.
        assert_eq!(key_transition(3, "Backspace", "x"), FocusMove::Stay);
    }

    #[test]
    fn enter_submits_only_from_the_last_column() {
        assert_eq!(key_transition(6, "Enter", "g"), FocusMove::Submit);
        assert_eq!(key_transition(6, "Enter", ""), FocusMove::Submit);
        assert_eq!(key_transition(2, "Enter", "c"), FocusMove::Stay);
        assert_eq!(key_transition(6, "a", "g"), FocusMove::Stay);
    }

    #[test]
    fn classify_tracks_the_row_fill_lifecycle() {
        assert_eq!(classify(&cells(&["", "", "", "", "", "", ""])), RowFill::Empty);
        assert_eq!(
            classify(&cells(&["a", "b", "", "", "", "", ""])),
            RowFill::PartiallyFilled
        );
        assert_eq!(
            classify(&cells(&["a", "b", "c", "d", "e", "f", "g"])),
            RowFill::Full
        );
    }

    #[test]
    fn assemble_guess_uppercases_a_full_row() {
        let letters = cells(&["a", "b", "c", "d", "e", "f", "g"]);
        assert_eq!(assemble_guess(&letters).unwrap(), "ABCDEFG");
    }

    #[test]
    fn assemble_guess_refuses_an_incomplete_row() {
        let letters = cells(&["a", "b", "c", "", "e", "f", "g"]);
        assert_eq!(assemble_guess(&letters), Err(IncompleteGuess));
        assert_eq!(
            IncompleteGuess.to_string(),
            "Please complete the word before submitting."
        );
    }

    #[test]
    fn filled_cells_pairs_letters_with_their_feedback() {
        use LetterStatus::{Absent, Correct, Present};
        let attempt = attempt(
            "ABCDEFG",
            &[Correct, Absent, Present, Absent, Absent, Absent, Absent],
        );
        let cells = filled_cells(&attempt);
        assert_eq!(cells.len(), WORD_LEN);
        assert_eq!(cells[0], (Some('A'), Some(Correct)));
        assert_eq!(cells[1], (Some('B'), Some(Absent)));
        assert_eq!(cells[2], (Some('C'), Some(Present)));
        assert_eq!(cells[6], (Some('G'), Some(Absent)));
    }

    #[test]
    fn filled_cells_tolerates_short_server_data() {
        let attempt = attempt("AB", &[LetterStatus::Correct]);
        let cells = filled_cells(&attempt);
        assert_eq!(cells[1], (Some('B'), None));
        assert_eq!(cells[2], (None, None));
    }

    #[test]
    fn keyboard_status_merges_with_best_of_precedence() {
        use LetterStatus::{Absent, Correct, Present};
        let attempts = vec![
            attempt(
                "AAAAAAA",
                &[Absent, Absent, Absent, Absent, Absent, Absent, Absent],
            ),
            attempt(
                "ABABABA",
                &[Present, Absent, Present, Absent, Present, Absent, Present],
            ),
            attempt(
                "CACACAC",
                &[Correct, Absent, Correct, Absent, Correct, Absent, Correct],
            ),
        ];
        let keys = keyboard_status(&attempts);
        // A was upgraded absent -> present and never downgraded.
        assert_eq!(keys.get(&'A'), Some(&Present));
        assert_eq!(keys.get(&'B'), Some(&Absent));
        assert_eq!(keys.get(&'C'), Some(&Correct));
    }

    #[test]
    fn correct_is_never_downgraded() {
        use LetterStatus::{Absent, Correct};
        let attempts = vec![
            attempt(
                "AAAAAAA",
                &[Correct, Correct, Correct, Correct, Correct, Correct, Correct],
            ),
            attempt(
                "AAAAAAA",
                &[Absent, Absent, Absent, Absent, Absent, Absent, Absent],
            ),
        ];
        assert_eq!(keyboard_status(&attempts).get(&'A'), Some(&Correct));
    }

    #[test]
    fn clearing_the_history_clears_the_keyboard() {
        assert!(keyboard_status(&[]).is_empty());
    }
}
