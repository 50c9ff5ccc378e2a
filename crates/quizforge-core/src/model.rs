//! Per-round data types.
//!
//! Nothing here outlives a round except the counters in [`SessionSummary`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// A question and its reference answer, parsed from one provider reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedQa {
    pub question: String,
    pub answer: String,
}

/// The verdict text returned by the judging request.
///
/// Kept verbatim: the service is asked for "Correct" or "Incorrect" but
/// nothing enforces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Evaluation(pub String);

impl Evaluation {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lenient reading of the verdict, used only for score keeping.
    ///
    /// "Correct", "correct." and "Correct!" count; "Incorrect" and anything
    /// else do not.
    pub fn looks_correct(&self) -> bool {
        self.0
            .trim_start()
            .get(..7)
            .is_some_and(|head| head.eq_ignore_ascii_case("correct"))
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Counters reported when a session ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Rounds that reached evaluation.
    pub rounds: u32,
    /// Rounds whose verdict read as correct.
    pub correct: u32,
}
