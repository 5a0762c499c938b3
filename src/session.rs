use crate::app::App;
use crate::models::AppState;
use crate::quiz::{PhaseKind, QuizFlow, QuizPhase};
use crate::selection::Focus;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::debug;

pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        return;
    }
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return;
    }

    match app.state {
        AppState::Selection => handle_selection_input(app, key),
        AppState::Quiz => handle_quiz_input(app, key),
        AppState::QuizQuitConfirm => handle_quit_confirm_input(app, key),
    }
}

pub fn handle_selection_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => return app.quit(),
        KeyCode::Enter => return app.submit_selection(),
        _ => {}
    }

    let selection = &mut app.selection;
    match selection.focus {
        Focus::Query => match key.code {
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Down => selection.toggle_focus(),
            KeyCode::Left => selection.cursor_left(),
            KeyCode::Right => selection.cursor_right(),
            KeyCode::Home => selection.cursor_home(),
            KeyCode::End => selection.cursor_end(),
            KeyCode::Backspace => selection.backspace(),
            KeyCode::Char(c) => selection.insert_char(c),
            _ => {}
        },
        Focus::Tags => match key.code {
            KeyCode::Tab | KeyCode::BackTab => selection.toggle_focus(),
            KeyCode::Up if selection.tag_cursor == 0 => selection.focus = Focus::Query,
            KeyCode::Up | KeyCode::Left => selection.move_tag_cursor(-1),
            KeyCode::Down | KeyCode::Right => selection.move_tag_cursor(1),
            KeyCode::Char(' ') => {
                if let Err(e) = selection.select_highlighted_tag() {
                    debug!(error = %e, "Tag not selected");
                }
            }
            // Typing always goes to the query, which disables the tags.
            KeyCode::Char(c) => {
                selection.focus = Focus::Query;
                selection.insert_char(c);
            }
            KeyCode::Backspace => selection.focus = Focus::Query,
            _ => {}
        },
    }
}

pub fn handle_quiz_input(app: &mut App, key: KeyEvent) {
    let Some(kind) = app.quiz.as_ref().map(|quiz| quiz.phase().kind()) else {
        app.activate_selection();
        return;
    };

    match kind {
        PhaseKind::Loading => {
            if key.code == KeyCode::Esc {
                app.activate_selection();
            }
        }
        PhaseKind::Empty => match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('b') | KeyCode::Char('m') => {
                app.activate_selection()
            }
            _ => {}
        },
        PhaseKind::InProgress => {
            if key.code == KeyCode::Esc {
                app.state = AppState::QuizQuitConfirm;
            } else if let Some(quiz) = app.quiz.as_mut() {
                handle_question_input(quiz, key);
            }
        }
        PhaseKind::Completed => match key.code {
            KeyCode::Char('r') => {
                if let Some(Err(e)) = app.quiz.as_mut().map(QuizFlow::restart) {
                    debug!(error = %e, "Restart ignored");
                }
            }
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('b') | KeyCode::Char('m') => {
                app.activate_selection()
            }
            _ => {}
        },
    }
}

fn handle_question_input(quiz: &mut QuizFlow, key: KeyEvent) {
    let revealed = matches!(quiz.phase(), QuizPhase::InProgress(state) if state.revealed);
    let result = match key.code {
        KeyCode::Up | KeyCode::Char('k') => quiz.move_cursor(-1),
        KeyCode::Down | KeyCode::Char('j') => quiz.move_cursor(1),
        KeyCode::Char(' ') => quiz.select_highlighted(),
        KeyCode::Char(c @ '1'..='9') => quiz.select_index(c as usize - '1' as usize),
        KeyCode::Enter if revealed => quiz.next(),
        KeyCode::Enter => quiz.submit_answer(),
        KeyCode::Right | KeyCode::Char('n') => quiz.next(),
        _ => Ok(()),
    };

    if let Err(e) = result {
        debug!(error = %e, "Quiz action ignored");
    }
}

pub fn handle_quit_confirm_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => app.activate_selection(),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.state = AppState::Quiz,
        _ => {}
    }
}
