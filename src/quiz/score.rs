// score.rs - Answer key and grading
//
// The key lives here so grading and the tests agree on a single table:
// four fixed general questions plus an OS-dependent fifth.

use super::{Answer, FormState, Os, QUESTION_COUNT};

/// Points awarded per correct answer.
pub const POINTS_PER_QUESTION: u32 = 4;
pub const MAX_SCORE: u32 = POINTS_PER_QUESTION * QUESTION_COUNT as u32;

// Expected answers for Q1..Q4 (VPN, firewall, HTTPS, phishing).
const GENERAL_KEY: [Answer; 4] = [Answer::B, Answer::A, Answer::C, Answer::B];

/// Expected Q5 answer for the chosen system. `None` while no system is
/// selected; the question is then forfeit regardless of the given answer.
pub fn q5_key(os: Option<Os>) -> Option<Answer> {
    match os? {
        Os::Windows => Some(Answer::A),
        Os::MacOs => Some(Answer::B),
        Os::Linux => Some(Answer::C),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuestionResult {
    /// 1-based question number.
    pub number: u8,
    pub given: Option<Answer>,
    pub expected: Option<Answer>,
    pub correct: bool,
}

/// Grading outcome: the total plus the per-question breakdown the result
/// view renders.
#[derive(Clone, Debug)]
pub struct ScoreCard {
    pub total: u32,
    pub max: u32,
    pub questions: [QuestionResult; QUESTION_COUNT],
}

/// Grade a submitted form.
pub fn score(form: &FormState) -> ScoreCard {
    let mut questions = [QuestionResult {
        number: 0,
        given: None,
        expected: None,
        correct: false,
    }; QUESTION_COUNT];

    for (i, slot) in questions.iter_mut().enumerate() {
        let expected = if i < GENERAL_KEY.len() {
            Some(GENERAL_KEY[i])
        } else {
            q5_key(form.os)
        };
        let given = form.answers[i];
        *slot = QuestionResult {
            number: i as u8 + 1,
            given,
            expected,
            correct: matches!((given, expected), (Some(g), Some(e)) if g == e),
        };
    }

    let total = questions.iter().filter(|q| q.correct).count() as u32 * POINTS_PER_QUESTION;
    ScoreCard {
        total,
        max: MAX_SCORE,
        questions,
    }
}
