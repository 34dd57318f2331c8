use super::types::QuizRequest;

/// Build the LLM prompt for a quiz request.
///
/// The prompt spells out the exact GML layout the game object expects so the
/// response can be written to `Create_0.gml` without further editing.
pub fn build_prompt(request: &QuizRequest) -> String {
    format!(
        r#"Create 3 multiple-choice questions on the topic: {topic} with difficulty level: {difficulty}.
Please return the output exactly in the following GML format (without additional comments or formatting):

questions = [];
questions[0] = "[Question 1]";
questions[1] = "[Question 2]";
questions[2] = "[Question 3]";

answers = [];
answers[0] = ["[Answer 1-1]", "[Answer 1-2]", "[Answer 1-3]"];
answers[1] = ["[Answer 2-1]", "[Answer 2-2]", "[Answer 2-3]"];
answers[2] = ["[Answer 3-1]", "[Answer 3-2]", "[Answer 3-3]"];

currentQuestion = 0;

correctAnswer = [];
correctAnswer[0] = Index of the correct answer for question 1;
correctAnswer[1] = Index of the correct answer for question 2;
correctAnswer[2] = Index of the correct answer for question 3;

soundright = -1;
soundwrong = -1;

Please replace all placeholders ([Question X] and [Answer X-Y]) with suitable, correct information.
Important: When specifying the correct answer, you should **not** use square brackets - only the numerical index (as a number) must be used.
Answer **only** with the GML code without introduction, without ``` blocks."#,
        topic = request.topic.trim(),
        difficulty = request.difficulty,
    )
}
