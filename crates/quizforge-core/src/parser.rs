//! Reply parser for generated questions.
//!
//! Two layouts are understood:
//!
//! - labelled lines (`Question: ...` / `Answer: ...`, case-insensitive), which
//!   is what the generation prompt asks for;
//! - the bare positional layout `question / blank line / answer`.
//!
//! Labels win when present. Otherwise line 0 is the question and line 2 is
//! the answer; a missing answer line yields [`FALLBACK_ANSWER`].

use crate::model::GeneratedQa;

/// Answer used when the reply has no recognisable answer line.
pub const FALLBACK_ANSWER: &str = "No answer provided";

const QUESTION_LABEL: &str = "question:";
const ANSWER_LABEL: &str = "answer:";

/// Split a generation reply into a question and an answer.
///
/// Pure: the same reply always yields the same pair.
pub fn parse_reply(reply: &str) -> GeneratedQa {
    let lines: Vec<&str> = reply
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();

    let question = match labelled(&lines, QUESTION_LABEL) {
        Some(text) => text.unwrap_or_default(),
        None => lines.first().map(|line| line.to_string()).unwrap_or_default(),
    };

    let answer = match labelled(&lines, ANSWER_LABEL) {
        Some(text) => text,
        None => lines.get(2).map(|line| line.to_string()),
    }
    .filter(|answer| !answer.is_empty())
    .unwrap_or_else(|| FALLBACK_ANSWER.to_string());

    GeneratedQa { question, answer }
}

/// Text following `label` on the first line that starts with it.
///
/// `None` means the label is absent. A label with nothing after it takes the
/// next non-blank line, unless another label comes first, in which case the
/// label is present but empty (`Some(None)`).
fn labelled(lines: &[&str], label: &str) -> Option<Option<String>> {
    let (index, rest) = lines.iter().enumerate().find_map(|(i, line)| {
        strip_label(line.trim_start(), label).map(|rest| (i, rest.trim()))
    })?;

    if !rest.is_empty() {
        return Some(Some(rest.to_string()));
    }
    let continuation = lines[index + 1..]
        .iter()
        .map(|line| line.trim())
        .find(|line| !line.is_empty())
        .filter(|line| !starts_with_label(line))
        .map(str::to_string);
    Some(continuation)
}

fn starts_with_label(line: &str) -> bool {
    [QUESTION_LABEL, ANSWER_LABEL]
        .iter()
        .any(|label| strip_label(line, label).is_some())
}

fn strip_label<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    let head = line.get(..label.len())?;
    head.eq_ignore_ascii_case(label)
        .then(|| &line[label.len()..])
}
