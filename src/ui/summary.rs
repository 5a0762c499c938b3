use super::key_span;
use crate::models::QueryContext;
use crate::quiz::QuizState;
use crate::ui::layout::calculate_summary_chunks;
use crate::utils::truncate_string;
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn draw_summary(f: &mut Frame, context: &QueryContext, state: &QuizState) {
    let layout = calculate_summary_chunks(f.area());

    let title = Paragraph::new(format!("Quiz Completed! - {}", context.describe()))
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, layout.header_area);

    let mut summary_text = Text::default();
    summary_text.push_line(Line::from(Span::styled(
        format!(
            "You answered {} out of {} questions correctly.",
            state.correct_count,
            state.total()
        ),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    summary_text.push_line(Line::from(""));

    for (i, (question, answer)) in state.questions.iter().zip(&state.answers).enumerate() {
        let correct = answer
            .as_deref()
            .is_some_and(|answer| question.is_correct(answer));
        let (mark, style) = if correct {
            ("[✓]", Style::default().fg(Color::Green))
        } else {
            ("[✗]", Style::default().fg(Color::Red))
        };
        summary_text.push_line(Line::from(vec![
            Span::styled(mark, style),
            Span::from(format!(" {}. {}", i + 1, truncate_string(&question.question, 60))),
        ]));
        summary_text.push_line(Line::from(format!(
            "   Your Answer: {}",
            truncate_string(answer.as_deref().unwrap_or("-"), 56)
        )));
        if !correct {
            summary_text.push_line(Line::from(format!(
                "   Correct: {}",
                truncate_string(&question.correct_option, 56)
            )));
        }
    }

    let summary = Paragraph::new(summary_text)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(summary, layout.content_area);

    let help_text = vec![Line::from(vec![
        key_span("r"),
        Span::from(" Restart  "),
        key_span("b/Esc"),
        Span::from(" Back to Search  "),
        key_span("Ctrl+C"),
        Span::from(" Exit App"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.footer_area);
}
