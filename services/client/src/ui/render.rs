//! services/client/src/ui/render.rs
//!
//! Draws each screen as plain text from the current state.

use crate::ui::state::QuizRuntime;
use quiz_master_core::{AppPhase, ContentCollector, QuizData, QuizSession, ScoreReport, Selection};
use std::fmt;

const RULE: &str = "------------------------------------------------------------";

fn letter(index: usize) -> char {
    (b'A' + index as u8) as char
}

pub fn render(runtime: &QuizRuntime) -> String {
    let controller = runtime.controller();
    match controller.phase() {
        AppPhase::Idle { error } => IdleScreen {
            collector: runtime.collector(),
            error: error.as_deref(),
        }
        .to_string(),
        AppPhase::Generating { .. } => GeneratingScreen.to_string(),
        AppPhase::Quiz { session } => QuestionScreen { session }.to_string(),
        AppPhase::Results {
            quiz,
            report,
            finished_at,
            ..
        } => {
            let finished = finished_at.format("%Y-%m-%d %H:%M UTC").to_string();
            ResultsScreen {
                quiz,
                report,
                finished: &finished,
            }
            .to_string()
        }
    }
}

struct IdleScreen<'a> {
    collector: &'a ContentCollector,
    error: Option<&'a str>,
}

impl fmt::Display for IdleScreen<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", RULE)?;
        writeln!(f, "Ready to test your knowledge?")?;
        writeln!(
            f,
            "Add notes or attach a textbook image or PDF, and let AI create a custom quiz."
        )?;
        writeln!(f, "{}", RULE)?;

        match self.collector.text().lines().count() {
            0 => writeln!(f, "Notes:      (none)")?,
            lines => writeln!(f, "Notes:      {} line(s)", lines)?,
        }
        match self.collector.media() {
            Some(media) => writeln!(f, "Attachment: {} ({})", media.name(), media.mime_type())?,
            None => writeln!(f, "Attachment: (none)")?,
        }
        writeln!(f, "Questions:  {}", self.collector.question_count())?;

        if self.collector.can_submit() {
            writeln!(f, "Type 'generate' to create your quiz.")?;
        } else {
            writeln!(f, "Add notes or an attachment to enable 'generate'.")?;
        }

        if let Some(error) = self.error {
            writeln!(f, "\n[!] {}", error)?;
        }
        Ok(())
    }
}

struct GeneratingScreen;

impl fmt::Display for GeneratingScreen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", RULE)?;
        writeln!(f, "Crafting your quiz...")?;
        writeln!(f, "Our AI is analyzing your content to pick the best questions.")
    }
}

struct QuestionScreen<'a> {
    session: &'a QuizSession,
}

impl fmt::Display for QuestionScreen<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let session = self.session;
        let question = session.current_question();
        let selection = session.current_selection();

        writeln!(f, "{}", RULE)?;
        writeln!(
            f,
            "{}  |  Question {} of {}  ({}% complete)",
            session.quiz().title,
            session.position(),
            session.len(),
            session.progress_percent().round() as u32
        )?;
        writeln!(f, "{}", RULE)?;
        writeln!(f, "{}\n", question.question)?;

        for (index, option) in question.options.iter().enumerate() {
            let marker = if selection == Selection::Chosen(index) { '>' } else { ' ' };
            writeln!(f, "{} {}. {}", marker, letter(index), option)?;
        }

        writeln!(f)?;
        let forward = if session.is_last() { "submit" } else { "next" };
        if session.can_advance() {
            writeln!(f, "Type '{}' to continue.", forward)?;
        } else {
            writeln!(f, "Choose an answer (a-d) to enable '{}'.", forward)?;
        }
        if !session.is_first() {
            writeln!(f, "Type 'prev' to go back.")?;
        }
        Ok(())
    }
}

struct ResultsScreen<'a> {
    quiz: &'a QuizData,
    report: &'a ScoreReport,
    finished: &'a str,
}

impl fmt::Display for ResultsScreen<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.report;
        writeln!(f, "{}", RULE)?;
        writeln!(f, "Quiz Completed: {}", self.quiz.title)?;
        writeln!(
            f,
            "{} / {}  ({}% Success)",
            report.correct_count,
            report.total,
            report.rounded_percentage()
        )?;
        writeln!(f, "{}", report.feedback().message())?;
        writeln!(f, "{}", RULE)?;
        writeln!(f, "Review Answers\n")?;

        for (question, review) in self.quiz.questions.iter().zip(&report.per_question) {
            let mark = if review.is_correct { "[correct]" } else { "[wrong]  " };
            writeln!(f, "{} {}", mark, question.question)?;
            for (index, option) in question.options.iter().enumerate() {
                let tag = if index == review.correct {
                    "  <- Correct"
                } else if review.selected == Selection::Chosen(index) {
                    "  <- Your choice"
                } else {
                    ""
                };
                writeln!(f, "    {}. {}{}", letter(index), option, tag)?;
            }
            if review.selected == Selection::Unanswered {
                writeln!(f, "    (not answered)")?;
            }
            writeln!(f, "    Explanation: {}\n", question.explanation)?;
        }

        writeln!(f, "Finished {}.", self.finished)?;
        writeln!(f, "Type 'restart' to try another topic.")
    }
}
