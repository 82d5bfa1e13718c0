//! A question bound to a concrete scale

use std::collections::HashMap;

use serde::Serialize;

use super::catalog::{get_random_question, QuestionType, QuizQuestion, QUIZ_QUESTIONS};
use super::format::format_question;
use crate::error::TrainerError;
use crate::random::RandomSource;
use crate::scale::{Scale, ScaleTable};
use crate::theory::{pitch_class, MidiNumber, OCTAVE_LENGTH};

/// A ready-to-show quiz question and its answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizPrompt {
    pub question: QuizQuestion,
    pub scale_value: String,
    pub tonic: String,
    pub text: String,
    /// Pitch class (0-11) of the expected key
    pub answer: u8,
}

impl QuizPrompt {
    /// Draw a question, then a table scale of the question's quality.
    ///
    /// Questions whose quality has no scale in `table` are never drawn.
    ///
    /// # Examples
    /// ```
    /// use scale_trainer::quiz::QuizPrompt;
    /// use scale_trainer::{ScaleTable, SequenceSource};
    ///
    /// // Question 0 (fifth, major), then major scale 1 (G major)
    /// let mut rng = SequenceSource::new(vec![0, 1]);
    /// let prompt = QuizPrompt::generate(&ScaleTable::builtin(), &mut rng)?;
    /// assert_eq!(prompt.text, "Which is perfect fifth of G (Major)?");
    /// assert!(prompt.is_correct(62));
    /// assert!(prompt.is_correct(74));
    /// assert!(!prompt.is_correct(67));
    /// # Ok::<(), scale_trainer::TrainerError>(())
    /// ```
    pub fn generate<R: RandomSource + ?Sized>(
        table: &ScaleTable,
        rng: &mut R,
    ) -> Result<Self, TrainerError> {
        let answerable: Vec<&'static QuizQuestion> = QUIZ_QUESTIONS
            .iter()
            .filter(|q| !table.of_quality(q.maj_min).is_empty())
            .collect();

        let question = if answerable.len() == QUIZ_QUESTIONS.len() {
            get_random_question(rng)
        } else if answerable.is_empty() {
            return Err(TrainerError::EmptyScaleTable);
        } else {
            answerable[rng.next_index(answerable.len())]
        };

        let candidates = table.of_quality(question.maj_min);
        let scale = candidates[rng.next_index(candidates.len())];
        Ok(Self::for_scale(*question, scale))
    }

    /// Bind `question` to `scale`.
    pub fn for_scale(question: QuizQuestion, scale: &Scale) -> Self {
        let quality = question.maj_min.to_string();
        let bindings = HashMap::from([("key", scale.tonic()), ("majMin", quality.as_str())]);
        let text = format_question(question.question_format, &bindings);

        let tonic = pitch_class(scale.start());
        let answer = match question.question_type {
            QuestionType::Speed => tonic,
            QuestionType::Fifth => (tonic + 7) % OCTAVE_LENGTH,
        };

        Self {
            question,
            scale_value: scale.value().to_string(),
            tonic: scale.tonic().to_string(),
            text,
            answer,
        }
    }

    /// Whether pressing `midi` answers the question, in any octave.
    pub fn is_correct(&self, midi: MidiNumber) -> bool {
        pitch_class(midi) == self.answer
    }
}
