//! crates/quiz_master_core/src/session.rs
//!
//! The in-progress quiz: the current question pointer and the user's answers.

use crate::domain::{Question, QuizData, Selection, UserAnswer, OPTIONS_PER_QUESTION};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("Select an answer before continuing.")]
    NotAnswered,
    #[error("The quiz can only be submitted from the last question.")]
    NotLastQuestion,
    #[error("Option {0} does not exist; pick one of A-D.")]
    OptionOutOfRange(usize),
    #[error("The quiz has no questions.")]
    EmptyQuiz,
}

/// Navigation state for one quiz.
///
/// `answers` is parallel to `quiz.questions` and `current_index` always points
/// at an existing question.
#[derive(Debug, Clone)]
pub struct QuizSession {
    quiz: QuizData,
    current_index: usize,
    answers: Vec<UserAnswer>,
}

impl QuizSession {
    /// Starts at the first question with every answer unanswered.
    pub fn new(quiz: QuizData) -> Result<Self, NavigationError> {
        if quiz.is_empty() {
            return Err(NavigationError::EmptyQuiz);
        }
        let answers = quiz
            .questions
            .iter()
            .map(|question| UserAnswer::unanswered(question.id))
            .collect();
        Ok(Self {
            quiz,
            current_index: 0,
            answers,
        })
    }

    pub fn quiz(&self) -> &QuizData {
        &self.quiz
    }

    pub fn answers(&self) -> &[UserAnswer] {
        &self.answers
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_question(&self) -> &Question {
        &self.quiz.questions[self.current_index]
    }

    pub fn current_selection(&self) -> Selection {
        self.answers[self.current_index].selected_option
    }

    /// 1-based position of the current question.
    pub fn position(&self) -> usize {
        self.current_index + 1
    }

    pub fn len(&self) -> usize {
        self.quiz.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quiz.is_empty()
    }

    pub fn is_first(&self) -> bool {
        self.current_index == 0
    }

    pub fn is_last(&self) -> bool {
        self.current_index + 1 == self.quiz.len()
    }

    pub fn progress_percent(&self) -> f64 {
        self.position() as f64 / self.len() as f64 * 100.0
    }

    /// Records a choice for the current question, replacing any earlier one.
    /// The pointer does not move.
    pub fn select_option(&mut self, option_index: usize) -> Result<(), NavigationError> {
        if option_index >= OPTIONS_PER_QUESTION {
            return Err(NavigationError::OptionOutOfRange(option_index));
        }
        self.answers[self.current_index].selected_option = Selection::Chosen(option_index);
        Ok(())
    }

    /// Forward navigation and submission are both blocked until the current question is answered.
    pub fn can_advance(&self) -> bool {
        self.current_selection().is_answered()
    }

    /// Moves forward one question. A no-op on the last question.
    pub fn next(&mut self) -> Result<(), NavigationError> {
        if !self.can_advance() {
            return Err(NavigationError::NotAnswered);
        }
        if !self.is_last() {
            self.current_index += 1;
        }
        Ok(())
    }

    /// Moves back one question. A no-op on the first question.
    pub fn previous(&mut self) {
        if self.current_index > 0 {
            self.current_index -= 1;
        }
    }

    /// Returns the answers in question order. Only allowed from the last
    /// question once it has been answered.
    pub fn finish(&self) -> Result<Vec<UserAnswer>, NavigationError> {
        if !self.is_last() {
            return Err(NavigationError::NotLastQuestion);
        }
        if !self.can_advance() {
            return Err(NavigationError::NotAnswered);
        }
        Ok(self.answers.clone())
    }

    pub fn into_quiz(self) -> QuizData {
        self.quiz
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn sample_quiz(correct: &[usize]) -> QuizData {
        QuizData {
            title: "Sample".to_string(),
            questions: correct
                .iter()
                .enumerate()
                .map(|(i, &correct_answer)| Question {
                    id: i as i64 + 1,
                    question: format!("Question {}", i + 1),
                    options: ["a", "b", "c", "d"].map(String::from),
                    correct_answer,
                    explanation: format!("Because {}", i + 1),
                })
                .collect(),
        }
    }

    #[test]
    fn loads_with_every_answer_unanswered() {
        let session = QuizSession::new(sample_quiz(&[0, 2, 1])).unwrap();
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.answers().len(), 3);
        assert!(session
            .answers()
            .iter()
            .all(|answer| answer.selected_option == Selection::Unanswered));
        assert_eq!(
            session.answers().iter().map(|a| a.question_id).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn empty_quiz_cannot_start() {
        let quiz = QuizData {
            title: "Nothing".to_string(),
            questions: vec![],
        };
        assert_eq!(QuizSession::new(quiz).unwrap_err(), NavigationError::EmptyQuiz);
    }

    #[test]
    fn cannot_advance_without_an_answer() {
        let mut session = QuizSession::new(sample_quiz(&[0, 2])).unwrap();
        assert!(!session.can_advance());
        assert_eq!(session.next(), Err(NavigationError::NotAnswered));
        assert_eq!(session.current_index(), 0);

        session.select_option(3).unwrap();
        session.next().unwrap();
        assert_eq!(session.current_index(), 1);
    }

    #[test]
    fn selecting_overwrites_and_does_not_move() {
        let mut session = QuizSession::new(sample_quiz(&[0, 2])).unwrap();
        session.select_option(1).unwrap();
        session.select_option(2).unwrap();
        assert_eq!(session.current_selection(), Selection::Chosen(2));
        assert_eq!(session.current_index(), 0);
        assert_eq!(
            session.select_option(4),
            Err(NavigationError::OptionOutOfRange(4))
        );
    }

    #[test]
    fn navigation_stops_at_both_ends() {
        let mut session = QuizSession::new(sample_quiz(&[0, 1])).unwrap();
        session.previous();
        assert_eq!(session.current_index(), 0);

        session.select_option(0).unwrap();
        session.next().unwrap();
        session.select_option(1).unwrap();
        session.next().unwrap();
        assert_eq!(session.current_index(), 1);
        assert!(session.is_last());
    }

    #[test]
    fn earlier_answers_stay_editable() {
        let mut session = QuizSession::new(sample_quiz(&[0, 1])).unwrap();
        session.select_option(0).unwrap();
        session.next().unwrap();
        session.previous();
        session.select_option(3).unwrap();
        assert_eq!(session.answers()[0].selected_option, Selection::Chosen(3));
    }

    #[test]
    fn finish_requires_last_question_answered() {
        let mut session = QuizSession::new(sample_quiz(&[0, 1])).unwrap();
        session.select_option(0).unwrap();
        assert_eq!(session.finish(), Err(NavigationError::NotLastQuestion));

        session.next().unwrap();
        assert_eq!(session.finish(), Err(NavigationError::NotAnswered));

        session.select_option(1).unwrap();
        let answers = session.finish().unwrap();
        assert_eq!(
            answers.iter().map(|a| a.selected_option).collect::<Vec<_>>(),
            vec![Selection::Chosen(0), Selection::Chosen(1)]
        );
    }

    #[test]
    fn progress_tracks_position() {
        let mut session = QuizSession::new(sample_quiz(&[0, 0, 0, 0])).unwrap();
        assert_eq!(session.progress_percent(), 25.0);
        session.select_option(0).unwrap();
        session.next().unwrap();
        assert_eq!(session.position(), 2);
        assert_eq!(session.progress_percent(), 50.0);
    }
}
