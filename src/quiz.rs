use crate::error::{ApiError, TransitionError};
use crate::models::{QueryContext, Question};
use tracing::{debug, info, warn};

/// Why a quiz has nothing to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmptyReason {
    NoResults,
    /// The server could not be reached or rejected the request.
    Unavailable(String),
    /// The server answered but the reply could not be read.
    BadResponse(String),
}

/// Per-pass progress through a fetched question list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizState {
    pub questions: Vec<Question>,
    pub current_index: usize,
    pub selected_option: Option<String>,
    pub revealed: bool,
    pub correct_count: usize,
    /// Highlighted option row; moving it does not select anything.
    pub cursor: usize,
    /// Submitted answer per question, for the summary screen.
    pub answers: Vec<Option<String>>,
}

impl QuizState {
    fn new(questions: Vec<Question>) -> Self {
        let answers = vec![None; questions.len()];
        Self {
            questions,
            current_index: 0,
            selected_option: None,
            revealed: false,
            correct_count: 0,
            cursor: 0,
            answers,
        }
    }

    fn reset(&mut self) {
        self.current_index = 0;
        self.selected_option = None;
        self.revealed = false;
        self.correct_count = 0;
        self.cursor = 0;
        self.answers = vec![None; self.questions.len()];
    }

    pub fn current_question(&self) -> &Question {
        &self.questions[self.current_index]
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn is_last(&self) -> bool {
        self.current_index + 1 >= self.questions.len()
    }

    /// Whether the revealed answer for the current question was correct.
    pub fn last_answer_correct(&self) -> Option<bool> {
        if !self.revealed {
            return None;
        }
        self.selected_option
            .as_deref()
            .map(|answer| self.current_question().is_correct(answer))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizPhase {
    Loading,
    Empty(EmptyReason),
    InProgress(QuizState),
    Completed(QuizState),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseKind {
    Loading,
    Empty,
    InProgress,
    Completed,
}

impl QuizPhase {
    pub fn kind(&self) -> PhaseKind {
        match self {
            QuizPhase::Loading => PhaseKind::Loading,
            QuizPhase::Empty(_) => PhaseKind::Empty,
            QuizPhase::InProgress(_) => PhaseKind::InProgress,
            QuizPhase::Completed(_) => PhaseKind::Completed,
        }
    }

    fn name(&self) -> &'static str {
        match self.kind() {
            PhaseKind::Loading => "loading",
            PhaseKind::Empty => "empty",
            PhaseKind::InProgress => "in progress",
            PhaseKind::Completed => "completed",
        }
    }
}

/// One quiz activation: the context it was started with, the generation of its
/// single question request, and the current phase.
#[derive(Debug)]
pub struct QuizFlow {
    context: QueryContext,
    generation: u64,
    phase: QuizPhase,
}

impl QuizFlow {
    pub fn new(context: QueryContext, generation: u64) -> Self {
        info!(
            generation,
            mode = ?context.mode(),
            query = context.value(),
            "Quiz flow activated"
        );
        Self {
            context,
            generation,
            phase: QuizPhase::Loading,
        }
    }

    pub fn context(&self) -> &QueryContext {
        &self.context
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn phase(&self) -> &QuizPhase {
        &self.phase
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, QuizPhase::Loading)
    }

    /// Apply the outcome of the question request. Returns false when the
    /// result belongs to another activation or arrives after loading finished.
    pub fn resolve(&mut self, generation: u64, result: Result<Vec<Question>, ApiError>) -> bool {
        if generation != self.generation || !self.is_loading() {
            debug!(
                generation,
                current = self.generation,
                "Discarding stale question response"
            );
            return false;
        }

        let result = result.map(|questions| {
            questions
                .into_iter()
                .enumerate()
                .filter_map(|(i, q)| {
                    if q.options.is_empty() {
                        warn!(index = i, "Dropping question without options");
                        return None;
                    }
                    if !q.is_well_formed() {
                        warn!(
                            index = i,
                            correct_option = %q.correct_option,
                            "Question's correct option is not among its options"
                        );
                    }
                    Some(q)
                })
                .collect::<Vec<_>>()
        });

        self.phase = match result {
            Ok(questions) if questions.is_empty() => {
                info!(generation, "No questions found");
                QuizPhase::Empty(EmptyReason::NoResults)
            }
            Ok(questions) => {
                info!(generation, count = questions.len(), "Questions loaded");
                QuizPhase::InProgress(QuizState::new(questions))
            }
            Err(e) if e.is_transport() => {
                warn!(generation, error = %e, "Question request failed");
                QuizPhase::Empty(EmptyReason::Unavailable(e.to_string()))
            }
            Err(e) => {
                warn!(generation, error = %e, "Question response unreadable");
                QuizPhase::Empty(EmptyReason::BadResponse(e.to_string()))
            }
        };
        true
    }

    fn in_progress(&mut self, action: &'static str) -> Result<&mut QuizState, TransitionError> {
        match &mut self.phase {
            QuizPhase::InProgress(state) => Ok(state),
            other => Err(TransitionError::WrongPhase {
                action,
                phase: other.name(),
            }),
        }
    }

    pub fn move_cursor(&mut self, delta: isize) -> Result<(), TransitionError> {
        let state = self.in_progress("move cursor")?;
        let len = state.current_question().options.len();
        if len == 0 {
            return Ok(());
        }
        let max = len - 1;
        state.cursor = state.cursor.saturating_add_signed(delta).min(max);
        Ok(())
    }

    pub fn select_option(&mut self, option: &str) -> Result<(), TransitionError> {
        let state = self.in_progress("select option")?;
        if state.revealed {
            return Err(TransitionError::AlreadyRevealed);
        }
        let question = state.current_question();
        let Some(pos) = question.options.iter().position(|o| o == option) else {
            return Err(TransitionError::UnknownOption(option.to_string()));
        };
        state.cursor = pos;
        state.selected_option = Some(option.to_string());
        Ok(())
    }

    /// Select the option at `index` in the current question.
    pub fn select_index(&mut self, index: usize) -> Result<(), TransitionError> {
        let option = {
            let state = self.in_progress("select option")?;
            state
                .current_question()
                .options
                .get(index)
                .cloned()
                .ok_or_else(|| TransitionError::UnknownOption(format!("#{}", index + 1)))?
        };
        self.select_option(&option)
    }

    pub fn select_highlighted(&mut self) -> Result<(), TransitionError> {
        let cursor = self.in_progress("select option")?.cursor;
        self.select_index(cursor)
    }

    pub fn submit_answer(&mut self) -> Result<(), TransitionError> {
        let state = self.in_progress("submit")?;
        if state.revealed {
            return Err(TransitionError::AlreadyRevealed);
        }
        let Some(answer) = state.selected_option.clone() else {
            return Err(TransitionError::NoSelection);
        };

        state.revealed = true;
        let correct = state.current_question().is_correct(&answer);
        if correct {
            state.correct_count += 1;
        }
        let index = state.current_index;
        state.answers[index] = Some(answer);
        debug!(question = index, correct, "Answer submitted");
        Ok(())
    }

    pub fn next(&mut self) -> Result<(), TransitionError> {
        let state = self.in_progress("next")?;
        if !state.revealed {
            return Err(TransitionError::NotRevealed);
        }

        if !state.is_last() {
            state.current_index += 1;
            state.selected_option = None;
            state.revealed = false;
            state.cursor = 0;
            return Ok(());
        }

        self.phase = match std::mem::replace(&mut self.phase, QuizPhase::Loading) {
            QuizPhase::InProgress(state) => {
                info!(
                    correct = state.correct_count,
                    total = state.total(),
                    "Quiz completed"
                );
                QuizPhase::Completed(state)
            }
            other => other,
        };
        Ok(())
    }

    /// Start over on the same questions without fetching again.
    pub fn restart(&mut self) -> Result<(), TransitionError> {
        match std::mem::replace(&mut self.phase, QuizPhase::Loading) {
            QuizPhase::Completed(mut state) => {
                state.reset();
                info!(total = state.total(), "Quiz restarted");
                self.phase = QuizPhase::InProgress(state);
                Ok(())
            }
            other => {
                let phase = other.name();
                self.phase = other;
                Err(TransitionError::WrongPhase {
                    action: "restart",
                    phase,
                })
            }
        }
    }

    /// `(correct, total)` once the quiz is completed.
    pub fn score(&self) -> Option<(usize, usize)> {
        match &self.phase {
            QuizPhase::Completed(state) => Some((state.correct_count, state.total())),
            _ => None,
        }
    }
}
