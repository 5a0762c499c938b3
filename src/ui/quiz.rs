use super::key_span;
use crate::quiz::{EmptyReason, QuizFlow, QuizPhase, QuizState};
use crate::ui::layout::calculate_quiz_chunks;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn draw_quiz(f: &mut Frame, quiz: &QuizFlow) {
    match quiz.phase() {
        QuizPhase::Loading => draw_message(
            f,
            quiz,
            Text::from("Loading questions..."),
            vec![key_span("Esc"), Span::from(" Back to Search")],
        ),
        QuizPhase::Empty(reason) => draw_empty(f, quiz, reason),
        QuizPhase::InProgress(state) | QuizPhase::Completed(state) => {
            draw_question(f, quiz, state)
        }
    }
}

fn header(text: String) -> Paragraph<'static> {
    Paragraph::new(text)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL))
}

fn help_bar(spans: Vec<Span<'_>>) -> Paragraph<'_> {
    Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL))
}

/// Loading and empty screens share one frame: header, a centered message and
/// a help bar.
fn draw_message(f: &mut Frame, quiz: &QuizFlow, message: Text<'_>, help: Vec<Span<'_>>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(3),
        ])
        .split(f.area());

    f.render_widget(header(format!("Quiz: {}", quiz.context().describe())), chunks[0]);

    let body = Paragraph::new(message)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(body, chunks[1]);

    f.render_widget(help_bar(help), chunks[2]);
}

fn draw_empty(f: &mut Frame, quiz: &QuizFlow, reason: &EmptyReason) {
    let mut text = Text::default();
    match reason {
        EmptyReason::NoResults => {
            text.push_line(Line::from(Span::styled(
                "No questions found",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )));
            text.push_line(Line::from(""));
            text.push_line(Line::from("Try another search or tag."));
        }
        EmptyReason::Unavailable(detail) => {
            text.push_line(Line::from(Span::styled(
                "Could not reach the server",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )));
            text.push_line(Line::from(""));
            text.push_line(Line::from(detail.as_str()));
        }
        EmptyReason::BadResponse(detail) => {
            text.push_line(Line::from(Span::styled(
                "The server sent a reply that could not be read",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )));
            text.push_line(Line::from(""));
            text.push_line(Line::from(detail.as_str()));
        }
    }

    draw_message(
        f,
        quiz,
        text,
        vec![key_span("b/Esc"), Span::from(" Back to Search")],
    );
}

fn option_lines(state: &QuizState) -> Text<'_> {
    let question = state.current_question();
    let mut text = Text::default();

    for (i, option) in question.options.iter().enumerate() {
        let selected = state.selected_option.as_deref() == Some(option.as_str());
        let marker = if selected { "(*)" } else { "( )" };
        let pointer = if i == state.cursor && !state.revealed { ">" } else { " " };

        let style = if state.revealed && *option == question.correct_option {
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD)
        } else if state.revealed && selected {
            Style::default().fg(Color::Red)
        } else if i == state.cursor {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        text.push_line(Line::from(Span::styled(
            format!("{} {} {}. {}", pointer, marker, i + 1, option),
            style,
        )));
    }

    if let Some(correct) = state.last_answer_correct() {
        text.push_line(Line::from(""));
        text.push_line(if correct {
            Line::from(Span::styled(
                "Correct!",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ))
        } else {
            Line::from(vec![
                Span::styled(
                    "Incorrect.",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::from(format!(" The answer is: {}", question.correct_option)),
            ])
        });
        if !question.explanation.is_empty() {
            text.push_line(Line::from(""));
            text.push_line(Line::from(format!(
                "Explanation: {}",
                question.explanation
            )));
        }
    }
    text
}

fn draw_question(f: &mut Frame, quiz: &QuizFlow, state: &QuizState) {
    let layout = calculate_quiz_chunks(f.area());
    let question = state.current_question();

    let progress = format!(
        "Question {} of {} - {}",
        state.current_index + 1,
        state.total(),
        quiz.context().describe()
    );
    f.render_widget(header(progress), layout.header_area);

    let question_widget = Paragraph::new(question.question.as_str())
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Question"));
    f.render_widget(question_widget, layout.question_area);

    let answers = Paragraph::new(option_lines(state))
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("Options"));
    f.render_widget(answers, layout.answer_area);

    let mut help = if state.revealed {
        let next = if state.is_last() { " Finish  " } else { " Next  " };
        vec![key_span("Enter"), Span::from(next)]
    } else {
        vec![
            key_span("↑/↓"),
            Span::from(" Move  "),
            key_span("Space/1-9"),
            Span::from(" Select  "),
            key_span("Enter"),
            Span::from(" Submit  "),
        ]
    };
    help.extend([key_span("Esc"), Span::from(" Quit Quiz")]);
    f.render_widget(help_bar(help), layout.help_area);
}

fn centered_column(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .margin(5)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Length(3),
        ])
        .split(area)
}

pub fn draw_quit_confirmation(f: &mut Frame) {
    let chunks = centered_column(f.area());

    let title = Paragraph::new("Quit Quiz")
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let message = Paragraph::new("Back to search? Progress in this quiz is lost.")
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(message, chunks[1]);

    let help_text = vec![Line::from(vec![
        Span::styled(
            "y",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Yes (Back to Search)  "),
        Span::styled(
            "n",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Span::from(" No (Continue Quiz)  "),
        key_span("Ctrl+C"),
        Span::from(" Exit App"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[2]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::models::QueryContext;
    use crate::quiz::tests::two_questions;
    use crate::ui::test_support::render;

    fn loaded_quiz() -> QuizFlow {
        let mut quiz = QuizFlow::new(QueryContext::Text("math".to_string()), 1);
        quiz.resolve(1, Ok(two_questions()));
        quiz
    }

    #[test]
    fn test_loading_screen() {
        let quiz = QuizFlow::new(QueryContext::Text("math".to_string()), 1);
        let screen = render(80, 20, |f| draw_quiz(f, &quiz));
        assert!(screen.contains("Loading questions..."));
        assert!(screen.contains("Quiz: \"math\""));
    }

    #[test]
    fn test_no_results_screen() {
        let mut quiz = QuizFlow::new(QueryContext::Text("nothing".to_string()), 1);
        quiz.resolve(1, Ok(vec![]));
        let screen = render(80, 20, |f| draw_quiz(f, &quiz));
        assert!(screen.contains("No questions found"));
        assert!(screen.contains("Back to Search"));
        assert!(!screen.contains("Submit"));
    }

    #[test]
    fn test_unavailable_screen_differs_from_no_results() {
        let mut quiz = QuizFlow::new(QueryContext::Text("math".to_string()), 1);
        quiz.resolve(
            1,
            Err(ApiError::Status {
                status: 502,
                body: "bad gateway".to_string(),
            }),
        );
        let screen = render(80, 20, |f| draw_quiz(f, &quiz));
        assert!(screen.contains("Could not reach the server"));
        assert!(!screen.contains("No questions found"));
    }

    #[test]
    fn test_unreadable_reply_is_not_reported_as_unreachable() {
        let err: ApiError = serde_json::from_str::<Vec<String>>("{\"nope\":1}")
            .unwrap_err()
            .into();
        let mut quiz = QuizFlow::new(QueryContext::Text("math".to_string()), 1);
        quiz.resolve(1, Err(err));

        let screen = render(80, 20, |f| draw_quiz(f, &quiz));
        assert!(screen.contains("could not be read"));
        assert!(!screen.contains("Could not reach the server"));
        assert!(screen.contains("Back to Search"));
    }

    #[test]
    fn test_question_screen_shows_progress_and_options() {
        let quiz = loaded_quiz();
        let screen = render(80, 24, |f| draw_quiz(f, &quiz));
        assert!(screen.contains("Question 1 of 2"));
        assert!(screen.contains("What is 2+2?"));
        assert!(screen.contains("1. 3"));
        assert!(screen.contains("2. 4"));
        assert!(screen.contains("Submit"));
    }

    #[test]
    fn test_revealed_answer_shows_verdict() {
        let mut quiz = loaded_quiz();
        quiz.select_option("5").unwrap();
        quiz.submit_answer().unwrap();

        let screen = render(80, 24, |f| draw_quiz(f, &quiz));
        assert!(screen.contains("Incorrect."));
        assert!(screen.contains("The answer is: 4"));
        assert!(screen.contains("Next"));
    }

    #[test]
    fn test_last_question_offers_finish() {
        let mut quiz = loaded_quiz();
        quiz.select_option("4").unwrap();
        quiz.submit_answer().unwrap();
        quiz.next().unwrap();
        quiz.select_option("Paris").unwrap();
        quiz.submit_answer().unwrap();

        let screen = render(80, 24, |f| draw_quiz(f, &quiz));
        assert!(screen.contains("Correct!"));
        assert!(screen.contains("Finish"));
    }

    #[test]
    fn test_quit_confirmation_screen() {
        let screen = render(100, 24, draw_quit_confirmation);
        assert!(screen.contains("Back to search?"));
        assert!(screen.contains("Yes (Back to Search)"));
    }
}
