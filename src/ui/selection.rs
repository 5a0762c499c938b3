use super::key_span;
use crate::selection::{Focus, SelectionFlow, TagLoad};
use crate::ui::layout::calculate_selection_chunks;
use crate::utils::cursor_column;
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn tag_items(selection: &SelectionFlow) -> Vec<ListItem<'static>> {
    let placeholder = |text: String| {
        vec![ListItem::new(text).style(
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )]
    };

    match &selection.tag_load {
        TagLoad::Pending => return placeholder("Loading tags...".to_string()),
        TagLoad::Failed(reason) => return placeholder(format!("Tags unavailable: {}", reason)),
        TagLoad::Loaded if selection.tags.is_empty() => {
            return placeholder("No tags available".to_string())
        }
        TagLoad::Loaded => {}
    }

    let enabled = selection.tags_enabled();
    let focused = selection.focus == Focus::Tags;
    selection
        .tags
        .iter()
        .enumerate()
        .map(|(i, tag)| {
            let checked = selection.selected_tag.as_ref() == Some(tag);
            let marker = if checked { "[x]" } else { "[ ]" };
            let style = if !enabled {
                Style::default().fg(Color::DarkGray)
            } else if focused && i == selection.tag_cursor {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(format!("{} {}", marker, tag.display_name())).style(style)
        })
        .collect()
}

pub fn draw_selection(f: &mut Frame, selection: &SelectionFlow) {
    let layout = calculate_selection_chunks(f.area());

    let title = Paragraph::new(format!("Recall Quiz v{}", env!("CARGO_PKG_VERSION")))
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, layout.header_area);

    let query_focused = selection.focus == Focus::Query;
    let query_text = if selection.query.is_empty() && !query_focused {
        Span::styled(
            "[Type a topic to search...]",
            Style::default().fg(Color::DarkGray),
        )
    } else {
        Span::from(selection.query.as_str())
    };
    let query = Paragraph::new(Line::from(query_text)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style(query_focused))
            .title("Search"),
    );
    f.render_widget(query, layout.query_area);

    if query_focused {
        let column = cursor_column(&selection.query, selection.cursor_position) as u16;
        let max_x = layout.query_area.x + layout.query_area.width.saturating_sub(2);
        let cursor_x = (layout.query_area.x + 1 + column).min(max_x);
        f.set_cursor_position((cursor_x, layout.query_area.y + 1));
    }

    let tags_title = if selection.tags_enabled() {
        "Tags"
    } else {
        "Tags (disabled while a search query is entered)"
    };
    let tags = List::new(tag_items(selection)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style(selection.focus == Focus::Tags))
            .title(tags_title),
    );
    f.render_widget(tags, layout.tags_area);

    if let Some(error) = &selection.last_error {
        let status = Paragraph::new(error.to_string())
            .style(Style::default().fg(Color::Red))
            .alignment(Alignment::Center);
        f.render_widget(status, layout.status_area);
    }

    let help_text = vec![Line::from(vec![
        key_span("Enter"),
        Span::from(" Start Quiz  "),
        key_span("Tab"),
        Span::from(" Switch Focus  "),
        key_span("Space"),
        Span::from(" Select Tag  "),
        key_span("Esc"),
        Span::from(" Quit"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.help_area);
}
