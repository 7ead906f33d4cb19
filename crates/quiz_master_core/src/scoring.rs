//! crates/quiz_master_core/src/scoring.rs
//!
//! Scores a finished quiz and builds the per-question review.

use crate::domain::{QuizData, Selection, UserAnswer};

/// The outcome for a single question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionReview {
    pub question_id: i64,
    pub is_correct: bool,
    pub selected: Selection,
    pub correct: usize,
}

/// Which closing message a score earns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    Mastered,
    GoodEffort,
    KeepStudying,
}

impl Feedback {
    pub fn message(&self) -> &'static str {
        match self {
            Feedback::Mastered => "Amazing job! You've mastered this topic.",
            Feedback::GoodEffort => "Good effort! Review the missed questions below.",
            Feedback::KeepStudying => "Keep studying! Practical repetition is the key to mastery.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreReport {
    pub correct_count: usize,
    pub total: usize,
    pub per_question: Vec<QuestionReview>,
}

impl ScoreReport {
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.correct_count as f64 / self.total as f64 * 100.0
    }

    /// For display only.
    pub fn rounded_percentage(&self) -> u32 {
        self.percentage().round() as u32
    }

    pub fn feedback(&self) -> Feedback {
        let percentage = self.percentage();
        if percentage >= 80.0 {
            Feedback::Mastered
        } else if percentage >= 50.0 {
            Feedback::GoodEffort
        } else {
            Feedback::KeepStudying
        }
    }
}

/// A question is correct iff its answer is `Chosen(correct_answer)`.
///
/// Answers are matched to questions by position. A missing or unanswered
/// slot counts as incorrect rather than failing.
pub fn score(quiz: &QuizData, answers: &[UserAnswer]) -> ScoreReport {
    let per_question: Vec<QuestionReview> = quiz
        .questions
        .iter()
        .enumerate()
        .map(|(i, question)| {
            let selected = answers
                .get(i)
                .map(|answer| answer.selected_option)
                .unwrap_or_default();
            QuestionReview {
                question_id: question.id,
                is_correct: selected == Selection::Chosen(question.correct_answer),
                selected,
                correct: question.correct_answer,
            }
        })
        .collect();

    ScoreReport {
        correct_count: per_question.iter().filter(|review| review.is_correct).count(),
        total: quiz.len(),
        per_question,
    }
}
