//! Quiz-taking session for Wiki Quiz.
//!
//! A [`QuizSession`] tracks one attempt at one quiz: the option picked for each question,
//! whether the attempt has been submitted, and the resulting score. It is pure in-memory
//! state driven by discrete user actions, so it has no error type: every input is either
//! applied or ignored.

use std::collections::BTreeMap;

use wq_model::{Quiz, QuizId};

/// Lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Selections may still change
    InProgress,
    /// Selections are frozen and the score is final
    Submitted,
}

/// Result for a single question once the session has been submitted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The selected option matches the answer exactly
    Correct,
    /// An option was selected but it is not the answer
    Incorrect,
    /// No option was selected
    Unanswered,
}

/// One user's attempt at a quiz.
///
/// # Invariants
///
/// * At most one selection per question index, and only indices inside the question list.
/// * Once [`SessionState::Submitted`], selections never change until the session is reset.
/// * [`QuizSession::score`] is `0` while in progress.
#[derive(Debug, Clone)]
pub struct QuizSession {
    quiz: Quiz,
    selections: BTreeMap<usize, String>,
    state: SessionState,
}

impl QuizSession {
    /// Start a fresh, unsubmitted attempt at `quiz`.
    pub fn new(quiz: Quiz) -> Self {
        Self {
            quiz,
            selections: BTreeMap::new(),
            state: SessionState::InProgress,
        }
    }

    /// The quiz being taken
    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    /// Identifier of the quiz being taken
    pub fn quiz_id(&self) -> Option<QuizId> {
        self.quiz.id
    }

    /// Current lifecycle state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Whether the attempt has been submitted
    pub fn is_submitted(&self) -> bool {
        self.state == SessionState::Submitted
    }

    /// Number of questions in the quiz
    pub fn question_count(&self) -> usize {
        self.quiz.question_count()
    }

    /// Number of questions with a selection
    pub fn answered_count(&self) -> usize {
        self.selections.len()
    }

    /// The option picked for `question`, if any
    pub fn selection(&self, question: usize) -> Option<&str> {
        self.selections.get(&question).map(String::as_str)
    }

    /// All selections keyed by question index
    pub fn selections(&self) -> &BTreeMap<usize, String> {
        &self.selections
    }

    /// Pick `option` for the question at `question`, replacing any earlier pick.
    ///
    /// Ignored once the session is submitted or when `question` is out of range. The option
    /// text is not checked against the question's options.
    pub fn select_option(&mut self, question: usize, option: impl Into<String>) {
        if self.is_submitted() {
            tracing::trace!(question, "selection ignored, session already submitted");
            return;
        }
        if question >= self.question_count() {
            tracing::trace!(question, "selection ignored, no such question");
            return;
        }

        self.selections.insert(question, option.into());
    }

    /// Freeze the selections and make the score final.
    ///
    /// A quiz without questions cannot be submitted and stays in progress. Submitting twice
    /// changes nothing.
    pub fn submit(&mut self) {
        if self.is_submitted() || self.quiz.questions.is_empty() {
            return;
        }

        self.state = SessionState::Submitted;
        tracing::debug!(
            quiz_id = ?self.quiz.id,
            score = self.score(),
            total = self.question_count(),
            "quiz submitted"
        );
    }

    /// Number of questions whose selection equals the answer exactly.
    ///
    /// Always `0` while in progress. Unanswered questions count as incorrect.
    pub fn score(&self) -> usize {
        if !self.is_submitted() {
            return 0;
        }

        self.quiz
            .questions
            .iter()
            .enumerate()
            .filter(|(idx, question)| {
                self.selection(*idx)
                    .is_some_and(|picked| question.is_correct(picked))
            })
            .count()
    }

    /// Per-question result. `None` before submission or for an out-of-range index.
    pub fn outcome(&self, question: usize) -> Option<Outcome> {
        if !self.is_submitted() {
            return None;
        }

        let expected = self.quiz.questions.get(question)?;
        Some(match self.selection(question) {
            None => Outcome::Unanswered,
            Some(picked) if expected.is_correct(picked) => Outcome::Correct,
            Some(_) => Outcome::Incorrect,
        })
    }

    /// Discard all selections and return to [`SessionState::InProgress`].
    pub fn reset(&mut self) {
        self.selections.clear();
        self.state = SessionState::InProgress;
    }

    /// Point the session at `quiz`.
    ///
    /// When the quiz identifier differs from the current one the attempt is reset, so
    /// selections made for one quiz never show up on another. Reloading the same quiz keeps
    /// the attempt as it is.
    pub fn load(&mut self, quiz: Quiz) {
        let changed = quiz.id != self.quiz.id;
        self.quiz = quiz;
        if changed {
            tracing::debug!(quiz_id = ?self.quiz.id, "quiz changed, resetting session");
            self.reset();
        }
    }
}
