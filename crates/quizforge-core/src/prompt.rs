//! Prompt templates for question generation and answer judging.

/// Instruction text that pushes the judge toward accepting partial answers.
pub const LENIENCY_INSTRUCTION: &str = "Even if the answer is not complete, or partially correct, mark it as correct.";

/// Build the question-generation instruction for a subtopic.
pub fn question_prompt(language: &str, subtopic: &str) -> String {
    format!(
        "Create a {language} quiz question and its answer about the {subtopic} topic.\n\
         Keep the question length short and do not show any code snippets. This should\n\
         strictly be a text-based question and answer.\n\
         Reply using exactly this layout:\n\
         Question: <the question>\n\
         \n\
         Answer: <the answer>"
    )
}

/// Build the judging instruction for a user answer.
///
/// Both answers are embedded verbatim inside double quotes.
pub fn evaluation_prompt(user_answer: &str, correct_answer: &str) -> String {
    format!(
        "Given the correct answer is: \"{correct_answer}\", evaluate the following user answer: \"{user_answer}\".\n\
         Is the user's answer correct, or incorrect? {LENIENCY_INSTRUCTION}\n\
         \n\
         Be sure to provide a clear and concise evaluation. Do not require necessary context to fully explain usage.\n\
         Not detailed answers can still be correct. Do not require a full explanation.\n\
         \n\
         Give me a very short response to evaluate the user's answer. It should be either \"Correct\" or \"Incorrect\"."
    )
}
