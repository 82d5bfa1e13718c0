//! The fixed question catalog

use serde::Serialize;

use crate::random::RandomSource;
use crate::theory::Quality;

/// What a question asks the player to press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    /// The perfect fifth above the tonic
    Fifth,
    /// The tonic itself, as fast as possible
    Speed,
}

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::Fifth => "fifth",
            QuestionType::Speed => "speed",
        }
    }
}

/// One question archetype. `question_format` carries `{{key}}` and
/// `{{majMin}}` placeholders for [`super::format_question`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub maj_min: Quality,
    pub question_format: &'static str,
}

pub static QUIZ_QUESTIONS: [QuizQuestion; 4] = [
    QuizQuestion {
        question_type: QuestionType::Fifth,
        maj_min: Quality::Major,
        question_format: "Which is perfect fifth of {{key}} ({{majMin}})?",
    },
    QuizQuestion {
        question_type: QuestionType::Fifth,
        maj_min: Quality::Minor,
        question_format: "Which is perfect fifth of {{key}} ({{majMin}})?",
    },
    QuizQuestion {
        question_type: QuestionType::Speed,
        maj_min: Quality::Major,
        question_format: "Press {{key}} on your keyboard",
    },
    QuizQuestion {
        question_type: QuestionType::Speed,
        maj_min: Quality::Minor,
        question_format: "Press {{key}} on your keyboard",
    },
];

/// Uniform pick over [`QUIZ_QUESTIONS`]. Consecutive draws may repeat.
pub fn get_random_question<R: RandomSource + ?Sized>(rng: &mut R) -> &'static QuizQuestion {
    &QUIZ_QUESTIONS[rng.next_index(QUIZ_QUESTIONS.len())]
}
