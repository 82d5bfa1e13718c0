//! # Quiz Module
//!
//! Stateless question generation for the quiz screen.
//!
//! ## Sub-modules
//! - `catalog` - The four question archetypes and the uniform draw
//! - `format` - `{{name}}` placeholder substitution
//! - `prompt` - A question bound to a scale, with its expected answer
//!
//! ## Bindings
//! Templates use two placeholders:
//!
//! | Placeholder   | Bound to                         |
//! |---------------|----------------------------------|
//! | `{{key}}`     | tonic spelling, e.g. `F#`        |
//! | `{{majMin}}`  | `Major` or `Minor`               |

mod catalog;
mod format;
mod prompt;

pub use catalog::{get_random_question, QuestionType, QuizQuestion, QUIZ_QUESTIONS};
pub use format::format_question;
pub use prompt::QuizPrompt;
