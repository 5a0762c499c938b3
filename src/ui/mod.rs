pub mod layout;
mod quiz;
mod selection;
mod summary;

pub use layout::{calculate_quiz_chunks, calculate_selection_chunks, calculate_summary_chunks};
pub use quiz::{draw_quit_confirmation, draw_quiz};
pub use selection::draw_selection;
pub use summary::draw_summary;

use crate::app::App;
use crate::models::AppState;
use crate::quiz::QuizPhase;
use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
    Frame,
};

/// Render whichever screen the app is on.
pub fn draw(f: &mut Frame, app: &App) {
    match app.state {
        AppState::Selection => draw_selection(f, &app.selection),
        AppState::Quiz => match &app.quiz {
            Some(quiz) => match quiz.phase() {
                QuizPhase::Completed(state) => draw_summary(f, quiz.context(), state),
                _ => draw_quiz(f, quiz),
            },
            None => draw_selection(f, &app.selection),
        },
        AppState::QuizQuitConfirm => draw_quit_confirmation(f),
    }
}

fn key_span(key: &str) -> Span<'_> {
    Span::styled(
        key,
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
}

#[cfg(test)]
pub(crate) mod test_support {
    use ratatui::{backend::TestBackend, Frame, Terminal};

    /// Draw into an in-memory terminal and return the screen as plain text.
    pub(crate) fn render<F>(width: u16, height: u16, draw: F) -> String
    where
        F: FnOnce(&mut Frame),
    {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(draw).unwrap();

        let buffer = terminal.backend().buffer();
        let mut screen = String::new();
        for row in buffer.content().chunks(usize::from(width)) {
            for cell in row {
                screen.push_str(cell.symbol());
            }
            screen.push('\n');
        }
        screen
    }
}
