use serde::{Deserialize, Serialize};

/// Per-letter feedback classification, used verbatim as a styling class on
/// grid cells and keyboard keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LetterStatus {
    Correct,
    Present,
    Absent,
}

impl LetterStatus {
    pub fn css_class(self) -> &'static str {
        match self {
            LetterStatus::Correct => "correct",
            LetterStatus::Present => "present",
            LetterStatus::Absent => "absent",
        }
    }
}

/// One submitted guess plus its per-letter feedback, as returned by the
/// server. The client only renders these; it never produces them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attempt {
    pub guess: String,
    pub feedback: Vec<LetterStatus>,
}

/// Response envelope of `GET /get_attempts`.
#[derive(Debug, Clone, Deserialize)]
pub struct AttemptHistory {
    pub attempts: Vec<Attempt>,
}

/// Request body of `POST /guess`.
#[derive(Debug, Clone, Serialize)]
pub struct GuessRequest<'a> {
    pub guess: &'a str,
}

/// Response of `POST /guess`. Servers may omit the game-over fields on an
/// ordinary mid-game attempt.
#[derive(Debug, Clone, Deserialize)]
pub struct GuessOutcome {
    pub attempts: Vec<Attempt>,
    #[serde(default)]
    pub game_over: bool,
    #[serde(default)]
    pub game_over_message: Option<String>,
}
